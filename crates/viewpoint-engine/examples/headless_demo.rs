//! Headless demo driving both camera-control modes against the reference
//! scene implementations.
//!
//! Run with `RUST_LOG=debug cargo run --example headless_demo` to see the
//! state transitions.

use std::time::Instant;

use glam::{Mat4, Vec3};
use viewpoint_engine::{
    Aabb, FollowOptions, Result, TrackViewOptions, ViewSurface, ViewpointSession,
};
use viewpoint_scene::{ObjectSet, RenderView, TransformTree};

fn main() -> Result<()> {
    env_logger::init();

    // A tracked probe hanging off a reference frame
    let mut tree = TransformTree::new();
    let reference = tree.add_node(None, Mat4::IDENTITY);
    let probe = tree.add_node(Some(reference), Mat4::from_translation(Vec3::new(0.0, 0.0, 50.0)));

    let mut objects = ObjectSet::new();
    let tumor = objects.add_object(
        "tumor",
        Aabb::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0)),
    );

    let mut view = RenderView::with_aspect_ratio(16.0 / 9.0);
    let mut session = ViewpointSession::new();

    // Track view: the camera rides the probe while it sweeps sideways
    session.start_track_view(&tree, &mut objects, &mut view, probe, TrackViewOptions::default())?;
    for step in 0u8..20 {
        let x = f32::from(step) * 2.0;
        tree.set_local_transform(probe, Mat4::from_translation(Vec3::new(x, 0.0, 50.0)));
        session.on_transform_modified(probe, &tree, &mut view);
        println!("track view step {step:2}: camera at {:?}", view.camera().position);
    }
    session.stop_track_view(&mut objects)?;

    // Follow: the tumor drifts out of the safe zone and the camera recenters
    view.camera_mut().position = Vec3::new(0.0, 0.0, 30.0);
    view.camera_mut().focal_point = Vec3::ZERO;
    view.camera_mut().up = Vec3::Y;
    session.start_follow(&objects, &view, tumor, FollowOptions::default())?;

    let mut deadline = Instant::now();
    for step in 0..60 {
        objects.translate(tumor, Vec3::X * 0.4);
        let Some(next) = session.on_timer_tick(deadline, &objects, &mut view) else {
            break;
        };
        deadline = next;
        if step % 10 == 0 {
            println!("follow step {step:2}: camera at {:?}", view.camera().position);
        }
    }
    session.stop_follow()?;

    Ok(())
}
