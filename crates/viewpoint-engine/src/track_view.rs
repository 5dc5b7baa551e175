//! The Track View mode: rigidly slaves the camera to a tracked instrument
//! pose.

use glam::Vec3;
use log::warn;

use viewpoint_core::geometry;
use viewpoint_core::{
    NodeId, ObjectStore, PoseGraph, ProjectionMode, Result, TrackViewOptions, ViewSurface,
    ViewpointError, DEFAULT_ROLL_DEGREES, LOOK_AHEAD_MM,
};

use crate::pose_tracker::PoseChain;

/// Fallback view direction when the focal point collapses onto the camera
/// origin.
const FALLBACK_FORWARD: Vec3 = Vec3::NEG_Z;

/// Event-driven controller that recomputes the camera placement on every
/// modification of the tracked pose chain.
///
/// There is no smoothing and no debouncing: every notification triggers a
/// full recompute, so tracking latency is bounded by the pose source's
/// update rate at the price of one recompute per update.
#[derive(Debug)]
pub struct TrackViewController {
    tool: NodeId,
    chain: PoseChain,
    options: TrackViewOptions,
    /// Target object center in world space, captured once at start for
    /// three-DOF mode.
    target_center: Option<Vec3>,
}

impl TrackViewController {
    /// Builds the controller: walks the tool's parent chain and, in
    /// three-DOF mode, captures the target object's center.
    pub fn new(
        graph: &dyn PoseGraph,
        objects: &dyn ObjectStore,
        tool: NodeId,
        options: TrackViewOptions,
    ) -> Result<Self> {
        let chain = PoseChain::from_node(graph, tool)?;

        let target_center = if options.dof.forces_focal_point() {
            let Some(target) = options.target else {
                return Err(ViewpointError::MissingTarget);
            };
            if !objects.contains_object(target) {
                return Err(ViewpointError::UnknownObject(target));
            }
            let Some(center) = objects.center(target) else {
                return Err(ViewpointError::NoBounds(target));
            };
            Some(center)
        } else {
            None
        };

        for id in [options.show_while_active, options.show_while_inactive]
            .into_iter()
            .flatten()
        {
            if !objects.contains_object(id) {
                warn!("track view: point-of-view model {id:?} not found, ignoring");
            }
        }

        Ok(Self {
            tool,
            chain,
            options,
            target_center,
        })
    }

    /// The tracked tool node.
    #[must_use]
    pub fn tool(&self) -> NodeId {
        self.tool
    }

    /// The observed transform chain.
    #[must_use]
    pub fn chain(&self) -> &PoseChain {
        &self.chain
    }

    /// Whether a modification of `node` concerns this controller.
    #[must_use]
    pub fn observes(&self, node: NodeId) -> bool {
        self.chain.observes(node)
    }

    /// Current options.
    #[must_use]
    pub fn options(&self) -> &TrackViewOptions {
        &self.options
    }

    /// Mutable options. Changes take effect on the next pose notification;
    /// there is no forced recompute.
    pub fn options_mut(&mut self) -> &mut TrackViewOptions {
        &mut self.options
    }

    /// Applies the point-of-view visibility toggles for mode start.
    pub fn activate(&self, objects: &mut dyn ObjectStore) {
        if let Some(id) = self.options.show_while_active {
            objects.set_visible(id, true);
        }
        if let Some(id) = self.options.show_while_inactive {
            objects.set_visible(id, false);
        }
    }

    /// Restores the point-of-view visibility toggles for mode stop.
    pub fn deactivate(&self, objects: &mut dyn ObjectStore) {
        if let Some(id) = self.options.show_while_active {
            objects.set_visible(id, false);
        }
        if let Some(id) = self.options.show_while_inactive {
            objects.set_visible(id, true);
        }
    }

    /// Recomputes and applies the camera placement from the current pose.
    pub fn apply(&self, graph: &dyn PoseGraph, view: &mut dyn ViewSurface) {
        let Some(tool_to_world) = graph.transform_to_world(self.tool) else {
            warn!("track view: tool node {:?} no longer resolves, skipping recompute", self.tool);
            return;
        };

        let offset = Vec3::new(
            self.options.x_offset_mm,
            self.options.y_offset_mm,
            self.options.z_offset_mm,
        );
        let origin = geometry::transform_point(&tool_to_world, offset);

        let focal_point = match self.target_center {
            Some(center) if self.options.dof.forces_focal_point() => center,
            _ => geometry::transform_point(&tool_to_world, offset - Vec3::Z * LOOK_AHEAD_MM),
        };

        let forward = (focal_point - origin).try_normalize().unwrap_or_else(|| {
            warn!("track view: degenerate view direction, falling back to -Z");
            FALLBACK_FORWARD
        });

        let up = if self.options.dof.forces_up() {
            geometry::corrected_up(forward, self.options.up_direction.to_vec3())
        } else {
            geometry::transform_vector(&tool_to_world, Vec3::Y).normalize_or(Vec3::Y)
        };

        let camera = view.camera_mut();
        camera.position = origin;
        camera.focal_point = focal_point;
        camera.up = up;
        camera.roll_degrees = DEFAULT_ROLL_DEGREES;
        camera.set_projection_mode(self.options.projection);
        match self.options.projection {
            ProjectionMode::Perspective => camera.set_fov_degrees(self.options.view_angle_degrees),
            ProjectionMode::Orthographic => camera.set_ortho_scale(self.options.parallel_scale),
        }
        view.reset_clipping_range();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Mat4, Quat};
    use viewpoint_core::{Aabb, AxisDirection, CameraState, DofMode, ObjectId};
    use viewpoint_scene::{ObjectSet, RenderView, TransformTree};

    fn tool_at(translation: Vec3) -> (TransformTree, NodeId) {
        let mut tree = TransformTree::new();
        let root = tree.add_node(None, Mat4::IDENTITY);
        let tool = tree.add_node(Some(root), Mat4::from_translation(translation));
        (tree, tool)
    }

    #[test]
    fn test_six_dof_focal_from_local_minus_z() {
        let (tree, tool) = tool_at(Vec3::new(10.0, 0.0, 0.0));
        let objects = ObjectSet::new();
        let mut view = RenderView::new(CameraState::new(1.0));

        let controller =
            TrackViewController::new(&tree, &objects, tool, TrackViewOptions::default()).unwrap();
        controller.apply(&tree, &mut view);

        assert!((view.camera().position - Vec3::new(10.0, 0.0, 0.0)).length() < 1e-4);
        // Focal point 200mm ahead along the tool's local -Z
        assert!((view.camera().focal_point - Vec3::new(10.0, 0.0, -200.0)).length() < 1e-3);
    }

    #[test]
    fn test_offsets_shift_origin_and_focal() {
        let (tree, tool) = tool_at(Vec3::ZERO);
        let objects = ObjectSet::new();
        let mut view = RenderView::new(CameraState::new(1.0));

        let options = TrackViewOptions {
            x_offset_mm: 3.0,
            y_offset_mm: -2.0,
            z_offset_mm: 15.0,
            ..TrackViewOptions::default()
        };
        let controller = TrackViewController::new(&tree, &objects, tool, options).unwrap();
        controller.apply(&tree, &mut view);

        assert!((view.camera().position - Vec3::new(3.0, -2.0, 15.0)).length() < 1e-4);
        assert!((view.camera().focal_point - Vec3::new(3.0, -2.0, -185.0)).length() < 1e-3);
    }

    #[test]
    fn test_three_dof_focal_locked_to_target() {
        let mut objects = ObjectSet::new();
        let target = objects.add_object(
            "tumor",
            Aabb::new(Vec3::new(4.0, 4.0, 4.0), Vec3::new(6.0, 6.0, 6.0)),
        );

        // Tool pointing along an arbitrary direction far from the target
        let mut tree = TransformTree::new();
        let tool = tree.add_node(
            None,
            Mat4::from_rotation_translation(
                Quat::from_rotation_y(1.2),
                Vec3::new(-30.0, 7.0, 2.0),
            ),
        );
        let mut view = RenderView::new(CameraState::new(1.0));

        let options = TrackViewOptions {
            dof: DofMode::ThreeDof,
            target: Some(target),
            ..TrackViewOptions::default()
        };
        let controller = TrackViewController::new(&tree, &objects, tool, options).unwrap();
        controller.apply(&tree, &mut view);

        // Focal point equals the target center regardless of pointing
        // direction
        assert!((view.camera().focal_point - Vec3::splat(5.0)).length() < 1e-4);
        // Up is forced perpendicular to the view direction
        let forward = view.camera().forward();
        assert!(view.camera().up.dot(forward).abs() < 1e-4);
    }

    #[test]
    fn test_three_dof_requires_target() {
        let (tree, tool) = tool_at(Vec3::ZERO);
        let objects = ObjectSet::new();

        let options = TrackViewOptions {
            dof: DofMode::ThreeDof,
            ..TrackViewOptions::default()
        };
        let err = TrackViewController::new(&tree, &objects, tool, options).unwrap_err();
        assert_eq!(err, ViewpointError::MissingTarget);
    }

    #[test]
    fn test_controller_debug_names_tracked_chain() {
        let (tree, tool) = tool_at(Vec3::ZERO);
        let objects = ObjectSet::new();
        let controller =
            TrackViewController::new(&tree, &objects, tool, TrackViewOptions::default()).unwrap();
        assert!(format!("{controller:?}").contains("chain"));
    }

    #[test]
    fn test_five_dof_forces_up_direction() {
        // Tool rolled about its own Z: six-DOF would tilt the camera up
        let mut tree = TransformTree::new();
        let tool = tree.add_node(None, Mat4::from_rotation_z(0.7));
        let objects = ObjectSet::new();
        let mut view = RenderView::new(CameraState::new(1.0));

        let options = TrackViewOptions {
            dof: DofMode::FiveDof,
            up_direction: AxisDirection::PosY,
            ..TrackViewOptions::default()
        };
        let controller = TrackViewController::new(&tree, &objects, tool, options).unwrap();
        controller.apply(&tree, &mut view);

        // Forward is the tool's -Z (unchanged by a Z roll), so the forced up
        // stays exactly +Y
        assert!((view.camera().up - Vec3::Y).length() < 1e-4);

        // Six-DOF instead inherits the rolled tool-local up
        let options = TrackViewOptions::default();
        let controller = TrackViewController::new(&tree, &objects, tool, options).unwrap();
        controller.apply(&tree, &mut view);
        assert!((view.camera().up - Vec3::Y).length() > 0.1);
    }

    #[test]
    fn test_visibility_toggles() {
        let (tree, tool) = tool_at(Vec3::ZERO);
        let mut objects = ObjectSet::new();
        let pov = objects.add_unbounded("probe model");
        let overview = objects.add_unbounded("overview model");
        objects.set_visible(pov, false);

        let options = TrackViewOptions {
            show_while_active: Some(pov),
            show_while_inactive: Some(overview),
            ..TrackViewOptions::default()
        };
        let controller = TrackViewController::new(&tree, &objects, tool, options).unwrap();

        controller.activate(&mut objects);
        assert!(objects.is_visible(pov));
        assert!(!objects.is_visible(overview));

        controller.deactivate(&mut objects);
        assert!(!objects.is_visible(pov));
        assert!(objects.is_visible(overview));
    }

    #[test]
    fn test_unknown_pov_model_is_unknown_object_tolerant() {
        let (tree, tool) = tool_at(Vec3::ZERO);
        let objects = ObjectSet::new();
        let options = TrackViewOptions {
            show_while_active: Some(ObjectId(42)),
            ..TrackViewOptions::default()
        };
        // Missing point-of-view models are tolerated with a warning
        assert!(TrackViewController::new(&tree, &objects, tool, options).is_ok());
    }

    #[test]
    fn test_orthographic_applies_parallel_scale() {
        let (tree, tool) = tool_at(Vec3::ZERO);
        let objects = ObjectSet::new();
        let mut view = RenderView::new(CameraState::new(1.0));

        let options = TrackViewOptions {
            projection: ProjectionMode::Orthographic,
            parallel_scale: 7.5,
            ..TrackViewOptions::default()
        };
        let controller = TrackViewController::new(&tree, &objects, tool, options).unwrap();
        controller.apply(&tree, &mut view);

        assert_eq!(view.camera().projection_mode, ProjectionMode::Orthographic);
        assert!((view.camera().ortho_scale - 7.5).abs() < 1e-5);
    }
}
