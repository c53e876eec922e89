use glam::DVec3;
use winit::event::KeyEvent;
use winit::keyboard::{KeyCode, PhysicalKey};

/// Degrees per frame while an orbit key is held
pub const ORBIT_SPEED: f64 = 1.5;
const MAX_ELEVATION: f64 = 89.0;

/// 3D camera angles in degrees: azimuth about +z, elevation above the xy-plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct View {
    pub elev: f64,
    pub azim: f64,
}

impl Default for View {
    fn default() -> Self {
        Self::new(30.0, -60.0)
    }
}

impl View {
    pub fn new(elev: f64, azim: f64) -> Self {
        Self { elev, azim }
    }

    /// Unit vector pointing from the scene towards the viewer
    pub fn eye(&self) -> DVec3 {
        let (se, ce) = self.elev.to_radians().sin_cos();
        let (sa, ca) = self.azim.to_radians().sin_cos();
        DVec3::new(ce * ca, ce * sa, se)
    }

    /// Screen-right direction in scene space
    pub fn right(&self) -> DVec3 {
        let (sa, ca) = self.azim.to_radians().sin_cos();
        DVec3::new(-sa, ca, 0.0)
    }

    /// Screen-up direction in scene space
    pub fn up(&self) -> DVec3 {
        let (se, ce) = self.elev.to_radians().sin_cos();
        let (sa, ca) = self.azim.to_radians().sin_cos();
        DVec3::new(-se * ca, -se * sa, ce)
    }

    /// Orthographic projection: (screen x, screen y up, depth towards the viewer)
    pub fn project(&self, p: DVec3) -> DVec3 {
        DVec3::new(p.dot(self.right()), p.dot(self.up()), p.dot(self.eye()))
    }
}

#[derive(Default, Clone, Copy, Debug)]
pub struct OrbitState {
    pub azim_left: bool,
    pub azim_right: bool,
    pub elev_up: bool,
    pub elev_down: bool,
}

impl OrbitState {
    const fn to_direction(positive: bool, negative: bool) -> f64 {
        match (positive, negative) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => 0.0,
        }
    }

    const fn velocity(&self) -> (f64, f64) {
        (
            Self::to_direction(self.elev_up, self.elev_down),
            Self::to_direction(self.azim_right, self.azim_left),
        )
    }

    pub fn is_moving(&self) -> bool {
        self.velocity() != (0.0, 0.0)
    }
}

/// Keyboard-driven offset on top of a sketch's own view
#[derive(Debug, Clone, Default)]
pub struct OrbitCamera {
    pub elev_offset: f64,
    pub azim_offset: f64,
    pub orbit: OrbitState,
}

impl OrbitCamera {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self) {
        let (elev, azim) = self.orbit.velocity();
        self.elev_offset += elev * ORBIT_SPEED;
        self.azim_offset = (self.azim_offset + azim * ORBIT_SPEED).rem_euclid(360.0);
    }

    /// Sketch view with the user's orbit applied
    pub fn apply(&self, base: View) -> View {
        View::new(
            (base.elev + self.elev_offset).clamp(-MAX_ELEVATION, MAX_ELEVATION),
            base.azim + self.azim_offset,
        )
    }

    pub fn process_keyboard(&mut self, event: &KeyEvent) {
        let is_pressed = event.state.is_pressed();
        if let PhysicalKey::Code(keycode) = event.physical_key {
            match keycode {
                KeyCode::KeyW | KeyCode::ArrowUp => self.orbit.elev_up = is_pressed,
                KeyCode::KeyS | KeyCode::ArrowDown => self.orbit.elev_down = is_pressed,
                KeyCode::KeyA | KeyCode::ArrowLeft => self.orbit.azim_left = is_pressed,
                KeyCode::KeyD | KeyCode::ArrowRight => self.orbit.azim_right = is_pressed,
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: DVec3, b: DVec3) -> bool {
        (a - b).length() < 1e-9
    }

    #[test]
    fn front_view_maps_x_right_and_z_up() {
        let view = View::new(0.0, -90.0);
        assert!(close(view.project(DVec3::X), DVec3::new(1.0, 0.0, 0.0)));
        assert!(close(view.project(DVec3::Z), DVec3::new(0.0, 1.0, 0.0)));
        assert!(close(view.project(DVec3::NEG_Y), DVec3::new(0.0, 0.0, 1.0)));
    }

    #[test]
    fn top_view_looks_down_z() {
        let view = View::new(90.0, -90.0);
        assert!(close(view.eye(), DVec3::Z));
        assert!(close(view.project(DVec3::Y), DVec3::new(0.0, 1.0, 0.0)));
    }

    #[test]
    fn basis_is_orthonormal() {
        let view = View::new(22.0, -58.0);
        assert!(view.right().dot(view.up()).abs() < 1e-12);
        assert!(view.right().dot(view.eye()).abs() < 1e-12);
        assert!(view.up().dot(view.eye()).abs() < 1e-12);
        assert!((view.up().length() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn orbit_offsets_clamp_elevation() {
        let mut camera = OrbitCamera::new();
        camera.orbit.elev_up = true;
        for _ in 0..200 {
            camera.update();
        }
        assert_eq!(camera.apply(View::new(20.0, 0.0)).elev, MAX_ELEVATION);
        assert!(camera.orbit.is_moving());
    }
}
