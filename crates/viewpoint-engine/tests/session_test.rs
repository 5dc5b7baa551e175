//! Integration tests for the mode supervisor and the follow cycle.

use std::time::Instant;

use glam::{Mat4, Vec3};
use viewpoint_engine::{
    Aabb, CameraState, FollowController, FollowOptions, FollowState, Mode, TrackViewOptions,
    ViewSurface, ViewpointError, ViewpointSession,
};
use viewpoint_scene::{ObjectSet, RenderView, TransformTree};

fn test_view() -> RenderView {
    let mut camera = CameraState::new(1.0);
    camera.position = Vec3::new(0.0, 0.0, 10.0);
    camera.focal_point = Vec3::ZERO;
    camera.up = Vec3::Y;
    RenderView::new(camera)
}

fn small_box(objects: &mut ObjectSet) -> viewpoint_engine::ObjectId {
    objects.add_object("watched", Aabb::new(Vec3::splat(-0.5), Vec3::splat(0.5)))
}

/// The worked scenario: dwell thresholds 1.0 / 0.5 / 1.0 seconds, object
/// leaves the zone at t = 0, ticks of 0.25 s. Expected: Unsafe for
/// t in (0, 1.0), Adjusting at 1.0, Resting at 1.5, Safe again at 2.5.
#[test]
fn follow_full_cycle_timing() {
    let mut objects = ObjectSet::new();
    let id = small_box(&mut objects);
    let mut view = test_view();

    let mut options = FollowOptions::default();
    options.set_dwell_times(1.0, 0.5, 1.0);
    let mut follow = FollowController::new(id, options, &objects, &view).unwrap();

    objects.translate(id, Vec3::X * 5.0);
    follow.tick(0.0, &objects, &mut view);
    assert_eq!(follow.state(), FollowState::Unsafe);

    let mut t = 0.0f32;
    let mut states = Vec::new();
    for _ in 0..10 {
        t += 0.25;
        follow.tick(0.25, &objects, &mut view);
        states.push((t, follow.state()));
    }

    for (t, state) in states {
        let expected = if t < 1.0 {
            FollowState::Unsafe
        } else if t < 1.5 {
            FollowState::Adjusting
        } else if t < 2.5 {
            FollowState::Resting
        } else {
            FollowState::Safe
        };
        assert_eq!(state, expected, "wrong state at t = {t}");
    }

    // After the cycle the camera has translated with the object
    assert!((view.camera().position - Vec3::new(5.0, 0.0, 10.0)).length() < 1e-3);
}

#[test]
fn mode_exclusivity() {
    let mut tree = TransformTree::new();
    let tool = tree.add_node(None, Mat4::IDENTITY);
    let mut objects = ObjectSet::new();
    let id = small_box(&mut objects);
    let mut view = test_view();

    let mut session = ViewpointSession::new();
    assert_eq!(session.mode(), Mode::Off);

    session
        .start_track_view(&tree, &mut objects, &mut view, tool, TrackViewOptions::default())
        .unwrap();
    assert_eq!(session.mode(), Mode::TrackView);

    // Starting follow while track view is active fails and changes nothing
    let err = session
        .start_follow(&objects, &view, id, FollowOptions::default())
        .unwrap_err();
    assert_eq!(
        err,
        ViewpointError::ModeConflict {
            requested: Mode::Follow,
            active: Mode::TrackView,
        }
    );
    assert_eq!(session.mode(), Mode::TrackView);

    // A follow tick in the wrong mode is rejected and mutates nothing
    let before = view.camera().clone();
    assert!(session
        .on_timer_tick(Instant::now(), &objects, &mut view)
        .is_none());
    assert_eq!(view.camera().position, before.position);

    // Stopping the wrong mode fails too
    assert_eq!(
        session.stop_follow().unwrap_err(),
        ViewpointError::NotActive(Mode::Follow)
    );
    assert_eq!(session.mode(), Mode::TrackView);

    // The legal path goes through Off
    session.stop_track_view(&mut objects).unwrap();
    assert_eq!(session.mode(), Mode::Off);
    session
        .start_follow(&objects, &view, id, FollowOptions::default())
        .unwrap();
    assert_eq!(session.mode(), Mode::Follow);
    assert!(session
        .on_timer_tick(Instant::now(), &objects, &mut view)
        .is_some());
    session.stop_follow().unwrap();
}

#[test]
fn stale_tick_after_stop_is_noop() {
    let mut objects = ObjectSet::new();
    let id = small_box(&mut objects);
    let mut view = test_view();

    let mut session = ViewpointSession::new();
    session
        .start_follow(&objects, &view, id, FollowOptions::default())
        .unwrap();
    session.stop_follow().unwrap();

    // A tick the host had already queued before the stop
    objects.translate(id, Vec3::X * 50.0);
    let before = view.camera().position;
    assert!(session
        .on_timer_tick(Instant::now(), &objects, &mut view)
        .is_none());
    assert_eq!(view.camera().position, before);
}

#[test]
fn pose_notifications_drive_track_view() {
    let mut tree = TransformTree::new();
    let root = tree.add_node(None, Mat4::IDENTITY);
    let tool = tree.add_node(Some(root), Mat4::IDENTITY);
    let unrelated = tree.add_node(None, Mat4::IDENTITY);
    let mut objects = ObjectSet::new();
    let mut view = test_view();

    let mut session = ViewpointSession::new();
    session
        .start_track_view(&tree, &mut objects, &mut view, tool, TrackViewOptions::default())
        .unwrap();
    assert!((view.camera().position - Vec3::ZERO).length() < 1e-4);

    // Moving an ancestor moves the camera on notification
    tree.set_local_transform(root, Mat4::from_translation(Vec3::new(0.0, 4.0, 0.0)));
    session.on_transform_modified(root, &tree, &mut view);
    assert!((view.camera().position - Vec3::new(0.0, 4.0, 0.0)).length() < 1e-4);

    // An unrelated node's notification changes nothing
    tree.set_local_transform(unrelated, Mat4::from_translation(Vec3::splat(9.0)));
    let before = view.camera().position;
    session.on_transform_modified(unrelated, &tree, &mut view);
    assert_eq!(view.camera().position, before);

    // After stop, notifications are detached entirely
    session.stop_track_view(&mut objects).unwrap();
    tree.set_local_transform(root, Mat4::from_translation(Vec3::splat(7.0)));
    session.on_transform_modified(root, &tree, &mut view);
    assert_eq!(view.camera().position, before);
}

#[test]
fn failed_start_leaves_state_untouched() {
    let tree = TransformTree::new();
    let mut objects = ObjectSet::new();
    let mut view = test_view();
    let before = view.camera().clone();

    let mut session = ViewpointSession::new();
    let err = session
        .start_track_view(
            &tree,
            &mut objects,
            &mut view,
            viewpoint_engine::NodeId(0),
            TrackViewOptions::default(),
        )
        .unwrap_err();
    assert_eq!(err, ViewpointError::UnknownNode(viewpoint_engine::NodeId(0)));
    assert_eq!(session.mode(), Mode::Off);
    assert_eq!(view.camera().position, before.position);

    // Missing bounds on the watched object
    let unbounded = objects.add_unbounded("annotation");
    let err = session
        .start_follow(&objects, &view, unbounded, FollowOptions::default())
        .unwrap_err();
    assert_eq!(err, ViewpointError::NoBounds(unbounded));
    assert_eq!(session.mode(), Mode::Off);
}

#[test]
fn live_option_setters_take_effect_next_tick() {
    let mut objects = ObjectSet::new();
    let id = small_box(&mut objects);
    let mut view = test_view();

    let mut session = ViewpointSession::new();
    session
        .start_follow(&objects, &view, id, FollowOptions::default())
        .unwrap();

    // Shrink the zone so the centered object is suddenly outside it
    let follow = session.follow_mut().unwrap();
    follow.set_safe_zone(viewpoint_engine::SafeZone {
        x: [0.5, 0.8],
        y: [-0.8, 0.8],
        z: [0.0, 1.0],
    });
    follow.tick(0.1, &objects, &mut view);
    assert_eq!(follow.state(), FollowState::Unsafe);
}
