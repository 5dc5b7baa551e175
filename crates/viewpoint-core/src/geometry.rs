//! Frame conversions between local, world, camera, and normalized view space.
//!
//! All functions here are pure and total: geometric degeneracies are resolved
//! by deterministic fallbacks (with a warning logged) rather than reported to
//! the caller, so the rendered view stays continuous.
//!
//! Normalized view coordinates follow one convention everywhere: x and y are
//! NDC in [-1, +1], depth z is in [0, 1].

use glam::{Mat3, Mat4, Vec3};
use log::warn;

use crate::camera::CameraState;

/// Tolerance below which a vector is treated as zero-length.
pub const DEGENERATE_EPS: f32 = 1e-6;

/// Fallback up direction substituted when the requested up is parallel to
/// the view direction.
const FALLBACK_UP: Vec3 = Vec3::new(1.0, 1.0, 1.0);

/// Applies a full homogeneous transform to a point (perspective divide
/// included).
#[must_use]
pub fn transform_point(m: &Mat4, p: Vec3) -> Vec3 {
    m.project_point3(p)
}

/// Applies only the linear part of a transform to a free vector.
///
/// Distinct from [`transform_point`]: free vectors ignore translation. Poses
/// are affine 4x4 here, so the linear part does not depend on where the
/// vector is anchored.
#[must_use]
pub fn transform_vector(m: &Mat4, v: Vec3) -> Vec3 {
    m.transform_vector3(v)
}

/// Maps a world-space point into camera space.
#[must_use]
pub fn world_to_camera_point(camera: &CameraState, p: Vec3) -> Vec3 {
    camera.view_matrix().transform_point3(p)
}

/// Maps a camera-space point back to world space.
#[must_use]
pub fn camera_to_world_point(camera: &CameraState, p: Vec3) -> Vec3 {
    camera.view_matrix().inverse().transform_point3(p)
}

/// Rotates a world-space free vector into camera space.
#[must_use]
pub fn world_to_camera_vector(camera: &CameraState, v: Vec3) -> Vec3 {
    Mat3::from_mat4(camera.view_matrix()) * v
}

/// Rotates a camera-space free vector into world space.
///
/// This is what makes "adjust along camera X/Y/Z" behave consistently under
/// any camera orientation: deltas measured in camera space are carried back
/// to world space through the camera rotation alone.
#[must_use]
pub fn camera_to_world_vector(camera: &CameraState, v: Vec3) -> Vec3 {
    // The view rotation is orthonormal, so the transpose is the inverse.
    Mat3::from_mat4(camera.view_matrix()).transpose() * v
}

/// Projects a world point into normalized view coordinates.
///
/// Returns (x, y) in [-1, +1] and z in [0, 1] for points inside the frustum;
/// points outside simply map outside those ranges. A point on the camera
/// plane (homogeneous w near zero) falls back to the origin with a warning.
#[must_use]
pub fn world_to_view(camera: &CameraState, p: Vec3) -> Vec3 {
    let clip = camera.view_projection_matrix() * p.extend(1.0);
    if clip.w.abs() < DEGENERATE_EPS {
        warn!("world_to_view: point projects onto the camera plane, using view origin");
        return Vec3::ZERO;
    }
    clip.truncate() / clip.w
}

/// Maps a normalized view coordinate back to a world point.
///
/// Inverse of [`world_to_view`] for coordinates produced by it. The matrix
/// inverse is carried out in f64: a perspective projection concentrates most
/// of the [0, 1] depth range near the near plane, and inverting it in f32
/// loses several digits. Round-trip accuracy is still bounded by the f32
/// depth resolution of the forward projection, which shrinks as the near
/// plane moves toward zero.
#[must_use]
pub fn view_to_world(camera: &CameraState, p: Vec3) -> Vec3 {
    let inverse = camera.view_projection_matrix().as_dmat4().inverse();
    inverse.project_point3(p.as_dvec3()).as_vec3()
}

/// Re-orthogonalized up vector for a given view direction.
///
/// Computes `right = forward x desired_up` and returns
/// `normalize(right x forward)`. When `desired_up` is parallel to `forward`
/// the fixed fallback direction `normalize(1, 1, 1)` is substituted and the
/// computation retried once; if the forward direction is parallel to the
/// fallback as well, an arbitrary orthonormal axis is used. The result is
/// always a unit vector perpendicular to `forward`.
#[must_use]
pub fn corrected_up(forward: Vec3, desired_up: Vec3) -> Vec3 {
    let mut right = forward.cross(desired_up);
    if right.length_squared() < DEGENERATE_EPS {
        warn!("corrected_up: up direction parallel to view direction, substituting fallback");
        right = forward.cross(FALLBACK_UP.normalize());
        if right.length_squared() < DEGENERATE_EPS {
            right = forward.any_orthonormal_vector();
        }
    }
    right.cross(forward).normalize()
}

/// A world-space axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Aabb {
    /// Creates a bounding box from its extreme corners.
    #[must_use]
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Returns the center point.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Returns the 8 corner points.
    ///
    /// These corners, not the full geometry, are what the safe-zone
    /// membership test samples.
    #[must_use]
    pub fn corners(&self) -> [Vec3; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            Vec3::new(lo.x, lo.y, lo.z),
            Vec3::new(hi.x, lo.y, lo.z),
            Vec3::new(lo.x, hi.y, lo.z),
            Vec3::new(hi.x, hi.y, lo.z),
            Vec3::new(lo.x, lo.y, hi.z),
            Vec3::new(hi.x, lo.y, hi.z),
            Vec3::new(lo.x, hi.y, hi.z),
            Vec3::new(hi.x, hi.y, hi.z),
        ]
    }
}
