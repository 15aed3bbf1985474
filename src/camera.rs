//! Look-at camera and perspective projection.
//!
//! The view matrix is assembled directly from the camera's orthonormal
//! basis, with no matrix inversion. The rotation block carries the basis
//! vectors in its rows and is then post-multiplied by a translation to
//! `-eye`, which translates into camera space after rotating into camera
//! axes. Projection parameters are validated up front so a degenerate
//! matrix can never be constructed.

use crate::math::{Mat4, MathError, Vec3};

/// World up used to derive the camera basis.
pub const WORLD_UP: Vec3 = Vec3::Y;

/// The camera's eye/target pair cannot produce a view basis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraError {
    /// The eye and look-at target coincide, or the view direction is
    /// parallel to world up; no orthonormal basis exists.
    DegenerateLookAt,
}

impl std::fmt::Display for CameraError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CameraError::DegenerateLookAt => {
                write!(f, "degenerate look-at: no orthonormal camera basis exists")
            }
        }
    }
}

impl std::error::Error for CameraError {}

impl From<MathError> for CameraError {
    fn from(_: MathError) -> Self {
        CameraError::DegenerateLookAt
    }
}

/// Invalid perspective projection parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectionError {
    /// Field of view must lie strictly between 0 and 180 degrees.
    InvalidFov(f32),
    /// Requires `far > near > 0`.
    InvalidPlanes { near: f32, far: f32 },
    /// Aspect ratio must be positive.
    InvalidAspect(f32),
}

impl std::fmt::Display for ProjectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProjectionError::InvalidFov(fov) => {
                write!(f, "field of view must be in (0, 180) degrees, got {}", fov)
            }
            ProjectionError::InvalidPlanes { near, far } => {
                write!(
                    f,
                    "depth planes must satisfy far > near > 0, got near {} far {}",
                    near, far
                )
            }
            ProjectionError::InvalidAspect(aspect) => {
                write!(f, "aspect ratio must be positive, got {}", aspect)
            }
        }
    }
}

impl std::error::Error for ProjectionError {}

/// A look-at camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Eye position in world space.
    pub eye: Vec3,
    /// The point the camera looks at.
    pub target: Vec3,
}

impl Camera {
    pub fn new(eye: Vec3, target: Vec3) -> Self {
        Self { eye, target }
    }

    /// Builds the world-to-camera matrix from the current eye and target.
    ///
    /// `forward = normalize(target - eye)`, `right = normalize(forward ×
    /// up)`, `up' = normalize(right × forward)`; the basis goes straight
    /// into the rotation block, then the eye translation is composed on the
    /// right. Fails when eye and target coincide rather than returning a
    /// matrix full of NaN.
    pub fn view_matrix(&self) -> Result<Mat4, CameraError> {
        let forward = (self.target - self.eye).normalized()?;
        let right = forward.cross(WORLD_UP).normalized()?;
        let up = right.cross(forward).normalized()?;

        let mut view = Mat4::IDENTITY;
        view[0] = right.x;
        view[4] = right.y;
        view[8] = right.z;
        view[1] = up.x;
        view[5] = up.y;
        view[9] = up.z;
        view[2] = -forward.x;
        view[6] = -forward.y;
        view[10] = -forward.z;

        Ok(view * Mat4::from_translation(-self.eye))
    }
}

/// A validated symmetric perspective projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    fov_degrees: f32,
    near: f32,
    far: f32,
    aspect: f32,
}

impl Projection {
    /// Creates a projection, rejecting parameters that would produce a
    /// mathematically invalid matrix.
    pub fn new(
        fov_degrees: f32,
        near: f32,
        far: f32,
        aspect: f32,
    ) -> Result<Self, ProjectionError> {
        if !(fov_degrees > 0.0 && fov_degrees < 180.0) {
            return Err(ProjectionError::InvalidFov(fov_degrees));
        }
        if !(near > 0.0 && far > near) {
            return Err(ProjectionError::InvalidPlanes { near, far });
        }
        if !(aspect > 0.0) {
            return Err(ProjectionError::InvalidAspect(aspect));
        }
        Ok(Self {
            fov_degrees,
            near,
            far,
            aspect,
        })
    }

    /// Updates the aspect ratio from new viewport dimensions.
    ///
    /// Zero-sized dimensions are ignored, mirroring how the surface itself
    /// refuses zero-sized reconfiguration during window minimize.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// The perspective matrix for the validated parameters.
    pub fn matrix(&self) -> Mat4 {
        let f = 1.0 / (self.fov_degrees * (std::f32::consts::PI / 360.0)).tan();

        let mut proj = Mat4::IDENTITY;
        proj[0] = f / self.aspect;
        proj[5] = f;
        proj[10] = (self.far + self.near) / (self.near - self.far);
        proj[14] = (2.0 * self.far * self.near) / (self.near - self.far);
        proj[11] = -1.0;
        proj[15] = 0.0;
        proj
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    #[test]
    fn view_basis_is_orthonormal() {
        let camera = Camera::new(Vec3::new(3.5, 3.5, 3.5), Vec3::ZERO);
        let view = camera.view_matrix().unwrap();

        // Rows of the rotation block are the basis vectors.
        let rows = [
            Vec3::new(view[0], view[4], view[8]),
            Vec3::new(view[1], view[5], view[9]),
            Vec3::new(view[2], view[6], view[10]),
        ];
        for row in &rows {
            assert!((row.length() - 1.0).abs() < EPS);
        }
        assert!(rows[0].dot(rows[1]).abs() < EPS);
        assert!(rows[0].dot(rows[2]).abs() < EPS);
        assert!(rows[1].dot(rows[2]).abs() < EPS);
    }

    #[test]
    fn view_matches_reference_look_at() {
        let camera = Camera::new(Vec3::new(3.5, 3.5, 3.5), Vec3::ZERO);
        let view = camera.view_matrix().unwrap();
        let reference = glam::Mat4::look_at_rh(
            glam::Vec3::new(3.5, 3.5, 3.5),
            glam::Vec3::ZERO,
            glam::Vec3::Y,
        )
        .to_cols_array();

        let ours = view.to_cols_array();
        for i in 0..16 {
            assert!(
                (ours[i] - reference[i]).abs() < EPS,
                "element {}: {} vs {}",
                i,
                ours[i],
                reference[i]
            );
        }
    }

    #[test]
    fn view_moves_eye_to_origin() {
        let eye = Vec3::new(1.0, 2.0, 3.0);
        let camera = Camera::new(eye, Vec3::new(4.0, 2.0, 3.0));
        let view = camera.view_matrix().unwrap();

        let p = view.transform([eye.x, eye.y, eye.z, 1.0]);
        assert!(p[0].abs() < EPS && p[1].abs() < EPS && p[2].abs() < EPS);
    }

    #[test]
    fn degenerate_look_at_is_rejected() {
        let eye = Vec3::new(1.0, 1.0, 1.0);
        assert_eq!(
            Camera::new(eye, eye).view_matrix(),
            Err(CameraError::DegenerateLookAt)
        );

        // Looking straight along world up leaves no usable right vector.
        let straight_up = Camera::new(Vec3::ZERO, Vec3::new(0.0, 5.0, 0.0));
        assert_eq!(
            straight_up.view_matrix(),
            Err(CameraError::DegenerateLookAt)
        );
    }

    #[test]
    fn projection_matches_reference() {
        let proj = Projection::new(53.13, 0.1, 1000.0, 1.0).unwrap().matrix();
        let reference = glam::Mat4::perspective_rh_gl(53.13f32.to_radians(), 1.0, 0.1, 1000.0)
            .to_cols_array();

        let ours = proj.to_cols_array();
        for i in 0..16 {
            assert!(
                (ours[i] - reference[i]).abs() < EPS,
                "element {}: {} vs {}",
                i,
                ours[i],
                reference[i]
            );
        }
    }

    #[test]
    fn near_and_far_plane_centers_hit_ndc_bounds() {
        let proj = Projection::new(60.0, 0.5, 100.0, 1.5).unwrap().matrix();

        let near = proj.transform([0.0, 0.0, -0.5, 1.0]);
        let ndc_near = near[2] / near[3];
        assert!((ndc_near + 1.0).abs() < EPS, "near center: {}", ndc_near);

        let far = proj.transform([0.0, 0.0, -100.0, 1.0]);
        let ndc_far = far[2] / far[3];
        assert!((ndc_far - 1.0).abs() < 1e-3, "far center: {}", ndc_far);
    }

    #[test]
    fn invalid_projection_parameters_are_rejected() {
        assert!(matches!(
            Projection::new(0.0, 0.1, 100.0, 1.0),
            Err(ProjectionError::InvalidFov(_))
        ));
        assert!(matches!(
            Projection::new(180.0, 0.1, 100.0, 1.0),
            Err(ProjectionError::InvalidFov(_))
        ));
        assert!(matches!(
            Projection::new(60.0, 100.0, 0.1, 1.0),
            Err(ProjectionError::InvalidPlanes { .. })
        ));
        assert!(matches!(
            Projection::new(60.0, 0.0, 100.0, 1.0),
            Err(ProjectionError::InvalidPlanes { .. })
        ));
        assert!(matches!(
            Projection::new(60.0, 0.1, 100.0, 0.0),
            Err(ProjectionError::InvalidAspect(_))
        ));
    }

    #[test]
    fn resize_ignores_zero_dimensions() {
        let mut proj = Projection::new(60.0, 0.1, 100.0, 1.0).unwrap();
        proj.resize(0, 720);
        assert_eq!(proj.aspect(), 1.0);
        proj.resize(1280, 720);
        assert!((proj.aspect() - 1280.0 / 720.0).abs() < EPS);
    }
}
