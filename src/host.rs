use crate::settings::{DepthMode, SideMode};
use anyhow::Result;
use glam::Vec3;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageId(usize);

impl ImageId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EmptyId(usize);

impl EmptyId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollectionId(usize);

impl CollectionId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// A single display-property assignment. Applied one at a time so a host may
/// reject properties it does not support without losing the rest.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EmptyAttribute {
    Depth(DepthMode),
    Side(SideMode),
    ShowOrthographic(bool),
    ShowPerspective(bool),
    UseAlpha(bool),
    Opacity(f32),
}

impl EmptyAttribute {
    pub fn label(self) -> &'static str {
        match self {
            EmptyAttribute::Depth(_) => "depth",
            EmptyAttribute::Side(_) => "side",
            EmptyAttribute::ShowOrthographic(_) => "show_orthographic",
            EmptyAttribute::ShowPerspective(_) => "show_perspective",
            EmptyAttribute::UseAlpha(_) => "use_alpha",
            EmptyAttribute::Opacity(_) => "opacity",
        }
    }
}

/// Capabilities the placement engine consumes from the embedding editor.
///
/// Image handles come from a load-once cache: requesting the same path twice
/// returns the same id. Empties live in a name-addressable object store; the
/// engine keeps the ids it is handed and only falls back to `find_empty` to
/// evict same-named objects it did not create itself.
pub trait SceneHost {
    fn load_image(&mut self, path: &Path) -> Result<ImageId>;

    fn ensure_collection(&mut self, name: &str) -> CollectionId;

    fn create_empty(&mut self, name: &str, collection: CollectionId) -> Result<EmptyId>;

    fn find_empty(&self, name: &str) -> Option<EmptyId>;

    fn remove_empty(&mut self, id: EmptyId);

    /// Whether `id` still refers to a live image-plane empty.
    fn is_image_empty(&self, id: EmptyId) -> bool;

    fn attach_image(&mut self, id: EmptyId, image: ImageId) -> Result<()>;

    fn set_rotation(&mut self, id: EmptyId, rotation: Vec3);

    fn set_position(&mut self, id: EmptyId, position: Vec3);

    fn set_display_size(&mut self, id: EmptyId, size: f32);

    fn apply_attribute(&mut self, id: EmptyId, attribute: EmptyAttribute) -> Result<()>;
}
