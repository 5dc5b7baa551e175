//! Reference scene implementations for viewpoint-rs.
//!
//! Hosts embedding the engine in a real application implement the
//! `viewpoint-core` scene traits over their own scene graph and renderer.
//! This crate provides small self-contained implementations of those traits
//! for tests, demos, and hosts that have none:
//! - [`TransformTree`]: an arena of parent-linked transform nodes
//! - [`ObjectSet`]: named objects with bounds and visibility
//! - [`RenderView`]: a view surface backed by a [`viewpoint_core::CameraState`]

#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod object_set;
pub mod render_view;
pub mod transform_tree;

pub use object_set::ObjectSet;
pub use render_view::RenderView;
pub use transform_tree::TransformTree;
