use glam::{Mat4, Vec3};

/// Fixed camera: look-at view plus perspective projection.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,

    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub aspect: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(-2.0, 0.0, 2.0),
            target: Vec3::ZERO,
            up: Vec3::Z,
            fov_y: std::f32::consts::FRAC_PI_4,
            aspect: 800.0 / 600.0,
            z_near: 0.1,
            z_far: 10.0,
        }
    }
}

impl Camera {
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.z_near, self.z_far)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    const EPS: f32 = 1e-5;

    fn assert_mat_eq(actual: Mat4, expected: Mat4) {
        assert!(
            actual.abs_diff_eq(expected, EPS),
            "matrices differ:\n{actual:?}\n{expected:?}"
        );
    }

    #[test]
    fn projection_matches_reference() {
        let cam = Camera::default();
        let f = 1.0 / (std::f32::consts::FRAC_PI_4 / 2.0).tan();
        let aspect = 800.0f32 / 600.0;
        let (near, far) = (0.1f32, 10.0f32);
        let depth = far / (near - far);

        let expected = Mat4::from_cols(
            Vec4::new(f / aspect, 0.0, 0.0, 0.0),
            Vec4::new(0.0, f, 0.0, 0.0),
            Vec4::new(0.0, 0.0, depth, -1.0),
            Vec4::new(0.0, 0.0, depth * near, 0.0),
        );

        assert_mat_eq(cam.projection(), expected);
    }

    #[test]
    fn view_matches_reference() {
        let h = std::f32::consts::FRAC_1_SQRT_2;
        let expected = Mat4::from_cols(
            Vec4::new(0.0, h, -h, 0.0),
            Vec4::new(-1.0, 0.0, 0.0, 0.0),
            Vec4::new(0.0, h, h, 0.0),
            Vec4::new(0.0, 0.0, -2.0 * std::f32::consts::SQRT_2, 1.0),
        );

        assert_mat_eq(Camera::default().view(), expected);
    }

    #[test]
    fn view_puts_eye_at_origin_looking_down_negative_z() {
        let cam = Camera::default();
        let view = cam.view();

        assert!(view.transform_point3(cam.eye).abs_diff_eq(Vec3::ZERO, EPS));

        let dist = cam.eye.distance(cam.target);
        let target = view.transform_point3(cam.target);
        assert!(target.abs_diff_eq(Vec3::new(0.0, 0.0, -dist), EPS));
    }

    #[test]
    fn near_and_far_planes_map_to_wgpu_depth_range() {
        let proj = Camera::default().projection();

        let near = proj * Vec4::new(0.0, 0.0, -0.1, 1.0);
        let far = proj * Vec4::new(0.0, 0.0, -10.0, 1.0);

        assert!((near.z / near.w).abs() < EPS);
        assert!((far.z / far.w - 1.0).abs() < EPS);
    }
}
