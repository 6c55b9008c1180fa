//! Deterministic stand-in for an LD06 sweep, used when no lidar is attached.

use crate::points::Point;

/// Angular step between samples, in degrees
pub const STEP_DEG: usize = 2;
/// Mean wall distance in millimetres
pub const BASE_RANGE_MM: f64 = 800.0;
/// Amplitude of the range wobble in millimetres
pub const WOBBLE_MM: f64 = 150.0;

/// One full sweep at time `t` seconds: 180 points around the sensor, in mm.
///
/// The range breathes with `t`, so successive calls trace a slowly
/// deforming ring.
pub fn simulated_scan(t: f64) -> Vec<Point> {
    (0..360)
        .step_by(STEP_DEG)
        .map(|deg| {
            let i = deg as f64;
            let r = BASE_RANGE_MM + WOBBLE_MM * (t * 0.7 + i * 0.1).sin();
            let a = i.to_radians();
            Point::new(r * a.cos(), r * a.sin())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sweep_has_one_point_per_step() {
        let pts = simulated_scan(0.0);
        assert_eq!(pts.len(), 180);
        // first sample sits on the +x axis at the base range
        assert!((pts[0].x - BASE_RANGE_MM).abs() < 1e-9);
        assert!(pts[0].y.abs() < 1e-9);
    }

    #[test]
    fn ranges_stay_within_wobble() {
        for p in simulated_scan(12.3) {
            let r = (p.x * p.x + p.y * p.y).sqrt();
            assert!(r >= BASE_RANGE_MM - WOBBLE_MM - 1e-6);
            assert!(r <= BASE_RANGE_MM + WOBBLE_MM + 1e-6);
        }
    }

    #[test]
    fn same_time_same_sweep() {
        assert_eq!(simulated_scan(4.0), simulated_scan(4.0));
    }
}
