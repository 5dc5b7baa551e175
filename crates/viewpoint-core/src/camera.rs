//! Camera state and view/projection math.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Camera projection mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProjectionMode {
    /// Perspective projection.
    #[default]
    Perspective,
    /// Orthographic (parallel) projection.
    Orthographic,
}

/// Axis direction for the forced up vector in world space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AxisDirection {
    /// Positive X axis.
    PosX,
    /// Negative X axis.
    NegX,
    /// Positive Y axis.
    PosY,
    /// Negative Y axis.
    NegY,
    /// Positive Z axis (default up for anatomical/world space).
    #[default]
    PosZ,
    /// Negative Z axis.
    NegZ,
}

impl AxisDirection {
    /// Returns the unit vector for this direction.
    #[must_use]
    pub fn to_vec3(self) -> Vec3 {
        match self {
            AxisDirection::PosX => Vec3::X,
            AxisDirection::NegX => Vec3::NEG_X,
            AxisDirection::PosY => Vec3::Y,
            AxisDirection::NegY => Vec3::NEG_Y,
            AxisDirection::PosZ => Vec3::Z,
            AxisDirection::NegZ => Vec3::NEG_Z,
        }
    }

    /// Returns display name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            AxisDirection::PosX => "+X",
            AxisDirection::NegX => "-X",
            AxisDirection::PosY => "+Y",
            AxisDirection::NegY => "-Y",
            AxisDirection::PosZ => "+Z",
            AxisDirection::NegZ => "-Z",
        }
    }
}

/// Fixed camera roll, in degrees, applied by every controller.
pub const DEFAULT_ROLL_DEGREES: f32 = 180.0;

/// The mutable camera parameters for a view.
///
/// The engine never creates or destroys the camera; it only mutates these
/// fields through the active controller. The view reads them for rendering.
#[derive(Debug, Clone)]
pub struct CameraState {
    /// Camera position in world space.
    pub position: Vec3,
    /// Point the camera is looking at, world space.
    pub focal_point: Vec3,
    /// Up vector, world space.
    pub up: Vec3,
    /// Field of view in radians (perspective).
    pub fov: f32,
    /// Parallel scale (orthographic half-height).
    pub ortho_scale: f32,
    /// Projection mode.
    pub projection_mode: ProjectionMode,
    /// Camera roll in degrees. Held at [`DEFAULT_ROLL_DEGREES`] by the engine.
    pub roll_degrees: f32,
    /// Aspect ratio (width / height).
    pub aspect_ratio: f32,
    /// Near clipping plane.
    pub near: f32,
    /// Far clipping plane.
    pub far: f32,
}

impl CameraState {
    /// Creates a new camera with default settings.
    #[must_use]
    pub fn new(aspect_ratio: f32) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 3.0),
            focal_point: Vec3::ZERO,
            up: Vec3::Y,
            fov: std::f32::consts::FRAC_PI_6, // 30 degrees
            ortho_scale: 1.0,
            projection_mode: ProjectionMode::Perspective,
            roll_degrees: DEFAULT_ROLL_DEGREES,
            aspect_ratio,
            near: 0.01,
            far: 1000.0,
        }
    }

    /// Returns the view matrix (world to camera space).
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.focal_point, self.up)
    }

    /// Returns the projection matrix.
    ///
    /// Depth maps to [0, 1]; x and y map to [-1, 1].
    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        match self.projection_mode {
            ProjectionMode::Perspective => {
                Mat4::perspective_rh(self.fov, self.aspect_ratio, self.near, self.far)
            }
            ProjectionMode::Orthographic => {
                let half_height = self.ortho_scale;
                let half_width = half_height * self.aspect_ratio;
                Mat4::orthographic_rh(
                    -half_width,
                    half_width,
                    -half_height,
                    half_height,
                    self.near,
                    self.far,
                )
            }
        }
    }

    /// Returns the combined view-projection matrix.
    #[must_use]
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Returns the camera's forward direction.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        (self.focal_point - self.position).normalize_or(Vec3::NEG_Z)
    }

    /// Returns the camera's right direction.
    #[must_use]
    pub fn right(&self) -> Vec3 {
        self.forward().cross(self.up).normalize_or(Vec3::X)
    }

    /// Recomputes the clipping planes from the camera-to-focal distance.
    ///
    /// Called after every externally driven camera move so newly framed
    /// geometry is never depth-clipped.
    pub fn reset_clipping_range(&mut self) {
        let dist = (self.position - self.focal_point).length().max(1e-3);
        self.near = (dist * 0.01).max(1e-3);
        self.far = (dist * 100.0).max(self.near + 0.1);
    }

    /// Sets the aspect ratio.
    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio.max(1e-3);
    }

    /// Sets the projection mode.
    pub fn set_projection_mode(&mut self, mode: ProjectionMode) {
        self.projection_mode = mode;
    }

    /// Sets the field of view in radians, clamped to a renderable range.
    pub fn set_fov(&mut self, fov: f32) {
        self.fov = fov.clamp(0.1, std::f32::consts::PI - 0.1);
    }

    /// Returns FOV in degrees.
    #[must_use]
    pub fn fov_degrees(&self) -> f32 {
        self.fov.to_degrees()
    }

    /// Sets FOV from degrees.
    pub fn set_fov_degrees(&mut self, degrees: f32) {
        self.set_fov(degrees.to_radians());
    }

    /// Sets the parallel (orthographic) scale.
    pub fn set_ortho_scale(&mut self, scale: f32) {
        self.ortho_scale = scale.max(0.01);
    }
}

impl Default for CameraState {
    fn default() -> Self {
        Self::new(16.0 / 9.0)
    }
}
