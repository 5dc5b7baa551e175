//! A minimal [`ViewSurface`] backed by a [`CameraState`].

use viewpoint_core::{CameraState, ViewSurface};

/// A render view that owns its camera and projects through the camera's
/// view-projection matrix.
#[derive(Debug, Clone, Default)]
pub struct RenderView {
    camera: CameraState,
}

impl RenderView {
    /// Creates a view around the given camera.
    #[must_use]
    pub fn new(camera: CameraState) -> Self {
        Self { camera }
    }

    /// Creates a view with a default camera at the given aspect ratio.
    #[must_use]
    pub fn with_aspect_ratio(aspect_ratio: f32) -> Self {
        Self {
            camera: CameraState::new(aspect_ratio),
        }
    }
}

impl ViewSurface for RenderView {
    fn camera(&self) -> &CameraState {
        &self.camera
    }

    fn camera_mut(&mut self) -> &mut CameraState {
        &mut self.camera
    }
}
