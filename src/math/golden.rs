use std::f64::consts::{PI, TAU};

/// Golden ratio, (1 + sqrt 5) / 2
pub const PHI: f64 = 1.618_033_988_749_895;

/// Logarithmic growth rate per radian that multiplies the radius by φ once per full turn
pub fn growth_per_radian() -> f64 {
    PHI.ln() / TAU
}

/// Convert a number of full revolutions to radians
pub fn revolutions(turns: f64) -> f64 {
    turns * 2.0 * PI
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phi_matches_closed_form() {
        assert!((PHI - (1.0 + 5f64.sqrt()) / 2.0).abs() < 1e-15);
    }

    #[test]
    fn growth_rate_is_about_0_0766() {
        assert!((growth_per_radian() - 0.076_587).abs() < 1e-5);
    }

    #[test]
    fn one_turn_is_tau() {
        assert_eq!(revolutions(1.0), TAU);
        assert_eq!(revolutions(0.0), 0.0);
    }
}
