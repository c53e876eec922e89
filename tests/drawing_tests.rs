use glam::{DVec2, Vec2};
use golden_spirals::core::{font, Canvas, DisplayContext, DrawOp, Turtle, TurtleCommand};
use golden_spirals::math::Color;

fn count(canvas: &Canvas, color: Color) -> usize {
    let (w, h) = canvas.dimensions();
    (0..h)
        .flat_map(|y| (0..w).map(move |x| (x, y)))
        .filter(|&(x, y)| canvas.pixel(x, y) == Some(color))
        .count()
}

// ============================================================================
// Canvas
// ============================================================================

#[test]
fn test_ops_run_in_queue_order() {
    let canvas = Canvas::new(20, 20)
        .draw(DrawOp::Clear(Color::BLACK))
        .draw(DrawOp::Rect { x: 0, y: 0, width: 10, height: 20, color: Color::WHITE })
        .draw(DrawOp::Rect { x: 5, y: 0, width: 10, height: 20, color: Color::GOLD });
    assert_eq!(canvas.pending(), 3);

    let canvas = canvas.execute_ops();
    assert_eq!(canvas.pending(), 0);
    assert_eq!(canvas.pixel(2, 5), Some(Color::WHITE));
    assert_eq!(canvas.pixel(7, 5), Some(Color::GOLD));
    assert_eq!(canvas.pixel(17, 5), Some(Color::BLACK));
}

#[test]
fn test_translucent_stroke_blends_evenly_along_its_length() {
    let color = Color::WHITE.with_alpha(0.5);
    let canvas = Canvas::new(64, 16)
        .draw(DrawOp::Clear(Color::BLACK))
        .draw(DrawOp::ThickLine {
            from: Vec2::new(4.0, 8.0),
            to: Vec2::new(60.0, 8.0),
            width: 4.0,
            color,
        })
        .execute_ops();

    let centre: Vec<Color> = (8..56).filter_map(|x| canvas.pixel(x, 8)).collect();
    assert!(centre.iter().all(|c| *c == centre[0]));
    assert_eq!(centre[0].r, 128);
}

#[test]
fn test_line_far_off_canvas_keeps_visible_part() {
    let canvas = Canvas::new(50, 50)
        .draw(DrawOp::Clear(Color::BLACK))
        .draw(DrawOp::Line {
            from: Vec2::new(-1.0e6, 25.0),
            to: Vec2::new(1.0e6, 25.0),
            color: Color::LIME,
        })
        .execute_ops();
    assert_eq!(count(&canvas, Color::LIME), 50);
}

#[test]
fn test_text_fits_measured_box() {
    let text = "F1 = 1";
    let scale = 2;
    let canvas = Canvas::new(64, 32)
        .draw(DrawOp::Clear(Color::BLACK))
        .draw(DrawOp::Text { x: 0, y: 0, text: text.into(), scale, color: Color::WHITE })
        .execute_ops();

    let width = font::text_width(text, scale);
    let height = font::text_height(text, scale);
    assert!(count(&canvas, Color::WHITE) > 0);
    for y in 0..32 {
        for x in 0..64 {
            if canvas.pixel(x, y) == Some(Color::WHITE) {
                assert!(x < width && y < height, "ink outside box at ({}, {})", x, y);
            }
        }
    }
}

// ============================================================================
// Turtle
// ============================================================================

#[test]
fn test_turtle_square_is_drawn_around_origin() {
    let mut t = Turtle::new();
    t.pencolor(Color::GOLD);
    for _ in 0..4 {
        t.forward(20.0);
        t.left(90.0);
    }
    let canvas = t.finish(Color::NAVY).render(&DisplayContext::new(60, 60));

    // World (0,0)-(20,20) sits right of and above the centre
    assert_eq!(canvas.pixel(40, 30), Some(Color::GOLD));
    assert_eq!(canvas.pixel(50, 20), Some(Color::GOLD));
    assert_eq!(canvas.pixel(40, 10), Some(Color::GOLD));
    assert_eq!(canvas.pixel(40, 20), Some(Color::NAVY));
    assert_eq!(canvas.pixel(20, 40), Some(Color::NAVY));
}

#[test]
fn test_fill_stays_under_outline() {
    let mut t = Turtle::new();
    t.pencolor(Color::WHITE);
    t.pensize(3.0);
    t.fillcolor(Color::GOLD);
    t.begin_fill();
    for _ in 0..4 {
        t.forward(20.0);
        t.left(90.0);
    }
    t.end_fill();

    assert!(matches!(t.commands()[0], TurtleCommand::Fill { .. }));
    let canvas = t.finish(Color::BLACK).render(&DisplayContext::new(60, 60));
    assert_eq!(canvas.pixel(40, 30), Some(Color::WHITE));
    assert_eq!(canvas.pixel(40, 20), Some(Color::GOLD));
}

#[test]
fn test_setheading_and_goto() {
    let mut t = Turtle::new();
    t.penup();
    t.setheading(270.0);
    t.forward(5.0);
    assert_eq!(t.position(), DVec2::new(0.0, -5.0));

    t.pendown();
    t.goto(DVec2::new(3.0, 4.0));
    assert_eq!(t.position(), DVec2::new(3.0, 4.0));
    assert_eq!(t.commands().len(), 1);
}
