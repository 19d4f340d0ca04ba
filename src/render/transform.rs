//! Model, view and projection matrices for the cube scene.

use glam::{Mat4, Vec3};
use rand::Rng;

use crate::abs::Viewport;

/// Vertical field of view of the camera, in degrees.
pub const FOV_Y_DEGREES: f32 = 45.0;
pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 100.0;

pub const CAMERA_POSITION: Vec3 = Vec3::new(0.0, 0.0, 1.0);
pub const CAMERA_TARGET: Vec3 = Vec3::ZERO;
pub const CAMERA_UP: Vec3 = Vec3::Y;

/// Picks a random rotation axis.
///
/// Each component is one of `-1.0, -0.5, 0.0, 0.5, 1.0`. The zero vector is rejected and
/// drawn again.
pub fn random_axis<R: Rng>(rng: &mut R) -> Vec3 {
    let mut component = || (rng.random_range(0..5i32) - 2) as f32 / 2.0;
    loop {
        let axis = Vec3::new(component(), component(), component());
        if axis != Vec3::ZERO {
            return axis;
        }
    }
}

/// An object that sits at a fixed place and spins around an axis over time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spin {
    pub translation: Vec3,
    /// Normalized rotation axis.
    pub axis: Vec3,
    pub degrees_per_second: f32,
    pub scale: f32,
}

impl Spin {
    /// Creates a spin. `axis` is normalized here; a zero axis gives an object that never
    /// rotates.
    pub fn new(translation: Vec3, axis: Vec3, degrees_per_second: f32, scale: f32) -> Self {
        Self {
            translation,
            axis: axis.normalize_or_zero(),
            degrees_per_second,
            scale,
        }
    }

    /// The model matrix after `elapsed` seconds: translate, then rotate, then scale.
    pub fn model_matrix(&self, elapsed: f32) -> Mat4 {
        let rotation = if self.axis == Vec3::ZERO {
            Mat4::IDENTITY
        } else {
            Mat4::from_axis_angle(self.axis, (elapsed * self.degrees_per_second).to_radians())
        };
        Mat4::from_translation(self.translation)
            * rotation
            * Mat4::from_scale(Vec3::splat(self.scale))
    }
}

/// The fixed camera looking down the negative Z axis.
pub fn view_matrix() -> Mat4 {
    Mat4::look_at_rh(CAMERA_POSITION, CAMERA_TARGET, CAMERA_UP)
}

/// Perspective projection for the given viewport.
pub fn projection_matrix(viewport: Viewport) -> Mat4 {
    Mat4::perspective_rh_gl(
        FOV_Y_DEGREES.to_radians(),
        viewport.aspect_ratio(),
        Z_NEAR,
        Z_FAR,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    const STEPS: [f32; 5] = [-1.0, -0.5, 0.0, 0.5, 1.0];

    #[test]
    fn test_random_axis_is_never_zero() {
        for seed in 0..500 {
            let mut rng = StdRng::seed_from_u64(seed);
            let axis = random_axis(&mut rng);
            assert_ne!(axis, Vec3::ZERO);
            for c in axis.to_array() {
                assert!(STEPS.contains(&c), "unexpected component {c}");
            }
        }
    }

    #[test]
    fn test_model_matrix_at_start() {
        let spin = Spin::new(Vec3::new(1.5, 0.2, -2.5), Vec3::new(1.0, 0.5, 0.0), 150.0, 0.2);
        let model = spin.model_matrix(0.0);
        let expected = Mat4::from_translation(Vec3::new(1.5, 0.2, -2.5))
            * Mat4::from_scale(Vec3::splat(0.2));
        assert!(model.abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn test_model_matrix_full_turn() {
        let spin = Spin::new(Vec3::new(-0.8, 0.0, -3.0), Vec3::new(0.0, 2.0, 0.0), 60.0, 1.0);
        assert!((spin.axis.length() - 1.0).abs() < 1e-6);
        // 6 seconds at 60 degrees per second is one full revolution.
        let model = spin.model_matrix(6.0);
        assert!(model.abs_diff_eq(Mat4::from_translation(spin.translation), 1e-4));

        let quarter = spin.model_matrix(1.5);
        let p = quarter.transform_point3(Vec3::X);
        assert!(p.abs_diff_eq(Vec3::new(-0.8, 0.0, -4.0), 1e-5));
    }

    #[test]
    fn test_zero_axis_does_not_rotate() {
        let spin = Spin::new(Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO, 90.0, 0.5);
        assert_eq!(spin.axis, Vec3::ZERO);
        let expected =
            Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0)) * Mat4::from_scale(Vec3::splat(0.5));
        for elapsed in [0.0, 0.7, 12.0] {
            let model = spin.model_matrix(elapsed);
            assert!(!model.is_nan());
            assert!(model.abs_diff_eq(expected, 1e-6));
        }
    }

    #[test]
    fn test_view_matrix() {
        let view = view_matrix();
        assert!(view.transform_point3(CAMERA_POSITION).abs_diff_eq(Vec3::ZERO, 1e-6));
        assert!(
            view.transform_point3(Vec3::ZERO)
                .abs_diff_eq(Vec3::new(0.0, 0.0, -1.0), 1e-6)
        );
    }

    #[test]
    fn test_projection_uses_viewport_aspect() {
        let wide = projection_matrix(Viewport::new(1600, 800));
        assert!((wide.y_axis.y / wide.x_axis.x - 2.0).abs() < 1e-5);

        let square = projection_matrix(Viewport::new(600, 600));
        assert!((square.x_axis.x - square.y_axis.y).abs() < 1e-6);
        let f = 1.0 / (FOV_Y_DEGREES.to_radians() / 2.0).tan();
        assert!((square.y_axis.y - f).abs() < 1e-5);
    }
}
