//! A flat object collection implementing [`ObjectStore`].

use glam::Vec3;
use viewpoint_core::{Aabb, ObjectId, ObjectStore};

struct Entry {
    name: String,
    bounds: Option<Aabb>,
    visible: bool,
}

/// Named objects with world-space bounds and a visibility flag.
///
/// Like [`crate::TransformTree`], handles are stable indices and entries are
/// never removed.
#[derive(Default)]
pub struct ObjectSet {
    entries: Vec<Entry>,
}

impl ObjectSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an object with the given bounds, returning its handle.
    pub fn add_object(&mut self, name: impl Into<String>, bounds: Aabb) -> ObjectId {
        self.push(name.into(), Some(bounds))
    }

    /// Adds an object with no spatial extent (e.g. an annotation).
    pub fn add_unbounded(&mut self, name: impl Into<String>) -> ObjectId {
        self.push(name.into(), None)
    }

    fn push(&mut self, name: String, bounds: Option<Aabb>) -> ObjectId {
        let id = ObjectId(u32::try_from(self.entries.len()).unwrap_or(u32::MAX));
        self.entries.push(Entry {
            name,
            bounds,
            visible: true,
        });
        id
    }

    /// Replaces an object's bounds, e.g. after the object moved.
    pub fn set_bounds(&mut self, id: ObjectId, bounds: Aabb) {
        if let Some(e) = self.entries.get_mut(id.0 as usize) {
            e.bounds = Some(bounds);
        }
    }

    /// Moves an object's bounds by a world-space offset.
    pub fn translate(&mut self, id: ObjectId, offset: Vec3) {
        if let Some(e) = self.entries.get_mut(id.0 as usize) {
            if let Some(b) = e.bounds {
                e.bounds = Some(Aabb::new(b.min + offset, b.max + offset));
            }
        }
    }

    /// Returns the object's name.
    #[must_use]
    pub fn name(&self, id: ObjectId) -> Option<&str> {
        self.entries.get(id.0 as usize).map(|e| e.name.as_str())
    }

    /// Returns the number of objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ObjectStore for ObjectSet {
    fn contains_object(&self, id: ObjectId) -> bool {
        (id.0 as usize) < self.entries.len()
    }

    fn world_bounds(&self, id: ObjectId) -> Option<Aabb> {
        self.entries.get(id.0 as usize)?.bounds
    }

    fn is_visible(&self, id: ObjectId) -> bool {
        self.entries
            .get(id.0 as usize)
            .is_some_and(|e| e.visible)
    }

    fn set_visible(&mut self, id: ObjectId, visible: bool) {
        if let Some(e) = self.entries.get_mut(id.0 as usize) {
            e.visible = visible;
        }
    }
}
