use glam::Vec3;

/// Project a spin angle onto the circular sun trajectory.
///
/// The sky rig rotates about the x axis, so the orbit lies in the y/z
/// plane: angle 0 puts the point straight up, increasing angles carry
/// it toward +z and under the world. Pure geometry; callers derive the
/// angle from clock time and aim the light back at the origin.
pub fn project(radius: f32, angle: f32) -> Vec3 {
    Vec3::new(0.0, radius * angle.cos(), radius * angle.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn test_quadrants() {
        let r = 100.0;
        assert!(close(project(r, 0.0), Vec3::new(0.0, r, 0.0)));
        assert!(close(project(r, FRAC_PI_2), Vec3::new(0.0, 0.0, r)));
        assert!(close(project(r, PI), Vec3::new(0.0, -r, 0.0)));
    }

    #[test]
    fn test_stays_on_circle() {
        for i in 0..16 {
            let angle = i as f32 * PI / 8.0;
            let p = project(50.0, angle);
            assert!((p.length() - 50.0).abs() < 1e-3);
            assert_eq!(p.x, 0.0);
        }
    }
}
