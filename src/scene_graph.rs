use crate::host::{CollectionId, EmptyAttribute, EmptyId, ImageId, SceneHost};
use crate::settings::{DepthMode, SideMode};
use anyhow::{anyhow, bail, Context, Result};
use glam::Vec3;
use image::{GenericImageView, ImageReader};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

/// Arena-backed reference implementation of [`SceneHost`]. Removal leaves a
/// tombstone so ids stay stable for the lifetime of the scene.
#[derive(Default)]
pub struct MemoryScene {
    empties: Vec<Option<EmptyObject>>,
    images: Vec<ImageAsset>,
    image_cache: HashMap<PathBuf, ImageId>,
    collections: Vec<String>,
    denied_attributes: HashSet<String>,
}

#[derive(Debug, Clone)]
pub struct EmptyObject {
    pub name: String,
    pub collection: CollectionId,
    pub image: Option<ImageId>,
    pub position: Vec3,
    pub rotation: Vec3,
    pub display_size: f32,
    pub depth: DepthMode,
    pub side: SideMode,
    pub show_orthographic: bool,
    pub show_perspective: bool,
    pub use_alpha: bool,
    pub opacity: f32,
}

impl EmptyObject {
    fn new(name: String, collection: CollectionId) -> Self {
        Self {
            name,
            collection,
            image: None,
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            display_size: 1.0,
            depth: DepthMode::default(),
            side: SideMode::default(),
            show_orthographic: true,
            show_perspective: true,
            use_alpha: false,
            opacity: 1.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ImageAsset {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

impl MemoryScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `apply_attribute` reject the named attribute, imitating hosts
    /// whose older versions lack individual display properties.
    pub fn deny_attribute(&mut self, label: impl Into<String>) {
        self.denied_attributes.insert(label.into());
    }

    pub fn empty(&self, id: EmptyId) -> Option<&EmptyObject> {
        self.empties.get(id.index()).and_then(|slot| slot.as_ref())
    }

    pub fn empties(&self) -> impl Iterator<Item = (EmptyId, &EmptyObject)> {
        self.empties
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|object| (EmptyId::new(index), object)))
    }

    pub fn empty_count(&self) -> usize {
        self.empties.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn image(&self, id: ImageId) -> Option<&ImageAsset> {
        self.images.get(id.index())
    }

    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    pub fn collection_name(&self, id: CollectionId) -> Option<&str> {
        self.collections.get(id.index()).map(String::as_str)
    }

    fn empty_mut(&mut self, id: EmptyId) -> Result<&mut EmptyObject> {
        self.empties
            .get_mut(id.index())
            .and_then(|slot| slot.as_mut())
            .ok_or_else(|| anyhow!("empty {} no longer exists", id.index()))
    }
}

impl SceneHost for MemoryScene {
    fn load_image(&mut self, path: &Path) -> Result<ImageId> {
        if let Some(&id) = self.image_cache.get(path) {
            return Ok(id);
        }
        let decoded = ImageReader::open(path)
            .with_context(|| format!("opening image '{}'", path.display()))?
            .with_guessed_format()
            .with_context(|| format!("probing image format of '{}'", path.display()))?
            .decode()
            .with_context(|| format!("decoding image '{}'", path.display()))?;
        let (width, height) = decoded.dimensions();
        let id = ImageId::new(self.images.len());
        self.images.push(ImageAsset { path: path.to_path_buf(), width, height });
        self.image_cache.insert(path.to_path_buf(), id);
        Ok(id)
    }

    fn ensure_collection(&mut self, name: &str) -> CollectionId {
        if let Some(index) = self.collections.iter().position(|existing| existing == name) {
            return CollectionId::new(index);
        }
        self.collections.push(name.to_string());
        CollectionId::new(self.collections.len() - 1)
    }

    fn create_empty(&mut self, name: &str, collection: CollectionId) -> Result<EmptyId> {
        if self.collections.get(collection.index()).is_none() {
            bail!("collection {} does not exist", collection.index());
        }
        let id = EmptyId::new(self.empties.len());
        self.empties.push(Some(EmptyObject::new(name.to_string(), collection)));
        Ok(id)
    }

    fn find_empty(&self, name: &str) -> Option<EmptyId> {
        self.empties.iter().enumerate().find_map(|(index, slot)| {
            slot.as_ref().filter(|object| object.name == name).map(|_| EmptyId::new(index))
        })
    }

    fn remove_empty(&mut self, id: EmptyId) {
        if let Some(slot) = self.empties.get_mut(id.index()) {
            *slot = None;
        }
    }

    fn is_image_empty(&self, id: EmptyId) -> bool {
        self.empty(id).is_some()
    }

    fn attach_image(&mut self, id: EmptyId, image: ImageId) -> Result<()> {
        if self.images.get(image.index()).is_none() {
            bail!("image {} does not exist", image.index());
        }
        self.empty_mut(id)?.image = Some(image);
        Ok(())
    }

    fn set_rotation(&mut self, id: EmptyId, rotation: Vec3) {
        if let Ok(object) = self.empty_mut(id) {
            object.rotation = rotation;
        }
    }

    fn set_position(&mut self, id: EmptyId, position: Vec3) {
        if let Ok(object) = self.empty_mut(id) {
            object.position = position;
        }
    }

    fn set_display_size(&mut self, id: EmptyId, size: f32) {
        if let Ok(object) = self.empty_mut(id) {
            object.display_size = size;
        }
    }

    fn apply_attribute(&mut self, id: EmptyId, attribute: EmptyAttribute) -> Result<()> {
        if self.denied_attributes.contains(attribute.label()) {
            bail!("attribute '{}' is not supported by this scene", attribute.label());
        }
        let object = self.empty_mut(id)?;
        match attribute {
            EmptyAttribute::Depth(depth) => object.depth = depth,
            EmptyAttribute::Side(side) => object.side = side,
            EmptyAttribute::ShowOrthographic(show) => object.show_orthographic = show,
            EmptyAttribute::ShowPerspective(show) => object.show_perspective = show,
            EmptyAttribute::UseAlpha(use_alpha) => object.use_alpha = use_alpha,
            EmptyAttribute::Opacity(opacity) => object.opacity = opacity,
        }
        Ok(())
    }
}
