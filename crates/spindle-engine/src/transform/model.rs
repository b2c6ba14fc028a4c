use glam::{Mat4, Vec3};

/// Model matrix at time `t`: a rotation of `t` radians about +Z, nothing else.
///
/// `t` is reduced modulo a full turn first so long sessions keep f32 precision.
pub fn model_at(t: f64) -> Mat4 {
    let angle = t.rem_euclid(std::f64::consts::TAU) as f32;
    Mat4::from_axis_angle(Vec3::Z, angle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;

    #[test]
    fn zero_is_identity() {
        assert!(model_at(0.0).abs_diff_eq(Mat4::IDENTITY, 1e-6));
    }

    #[test]
    fn decomposes_to_pure_z_rotation() {
        for t in [0.25, 1.0, 2.5, 4.0, 7.0, 100.0] {
            let (scale, rotation, translation) = model_at(t).to_scale_rotation_translation();

            assert!(scale.abs_diff_eq(Vec3::ONE, 1e-5), "t={t} scale={scale:?}");
            assert!(translation.abs_diff_eq(Vec3::ZERO, 1e-6), "t={t}");

            let expected = Quat::from_rotation_z(t.rem_euclid(std::f64::consts::TAU) as f32);
            assert!(
                rotation.dot(expected).abs() > 1.0 - 1e-5,
                "t={t} rotation={rotation:?}"
            );
        }
    }

    #[test]
    fn rotates_x_axis_in_xy_plane() {
        let t = std::f64::consts::FRAC_PI_2;
        let x = model_at(t).transform_vector3(Vec3::X);
        assert!(x.abs_diff_eq(Vec3::Y, 1e-6));
    }

    #[test]
    fn full_turns_are_equivalent() {
        let t = 0.75;
        let later = t + 3.0 * std::f64::consts::TAU;
        assert!(model_at(t).abs_diff_eq(model_at(later), 1e-5));
    }
}
