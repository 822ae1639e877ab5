use crate::view::{AxisRemap, ViewDirection};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const MIN_DISPLAY_SIZE: f32 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepthMode {
    Default,
    Front,
    Back,
}

impl DepthMode {
    pub fn label(self) -> &'static str {
        match self {
            DepthMode::Default => "Default",
            DepthMode::Front => "Front",
            DepthMode::Back => "Back",
        }
    }

    /// Mode actually handed to the host. `Default` has no host-side
    /// counterpart and is applied as `Back`.
    pub fn host_mode(self) -> DepthMode {
        match self {
            DepthMode::Default => DepthMode::Back,
            other => other,
        }
    }
}

impl Default for DepthMode {
    fn default() -> Self {
        DepthMode::Front
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SideMode {
    Double,
    Front,
    Back,
}

impl SideMode {
    pub fn label(self) -> &'static str {
        match self {
            SideMode::Double => "Both",
            SideMode::Front => "Front",
            SideMode::Back => "Back",
        }
    }
}

impl Default for SideMode {
    fn default() -> Self {
        SideMode::Front
    }
}

/// Display properties shared by every placed image plane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplaySettings {
    #[serde(default = "DisplaySettings::default_size")]
    pub size: f32,
    #[serde(default)]
    pub depth: DepthMode,
    #[serde(default)]
    pub side: SideMode,
    #[serde(default = "DisplaySettings::default_show_orthographic")]
    pub show_orthographic: bool,
    #[serde(default)]
    pub show_perspective: bool,
    #[serde(default)]
    pub axis_aligned: bool,
    #[serde(default)]
    pub use_opacity: bool,
    #[serde(default = "DisplaySettings::default_opacity")]
    pub opacity: f32,
}

impl DisplaySettings {
    const fn default_size() -> f32 {
        1.0
    }

    const fn default_show_orthographic() -> bool {
        true
    }

    const fn default_opacity() -> f32 {
        1.0
    }

    pub fn effective_size(&self) -> f32 {
        self.size.max(MIN_DISPLAY_SIZE)
    }

    /// Opacity value applied to the host: 1.0 whenever opacity is disabled.
    pub fn effective_opacity(&self) -> f32 {
        if self.use_opacity {
            self.opacity.clamp(0.0, 1.0)
        } else {
            1.0
        }
    }
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            size: Self::default_size(),
            depth: DepthMode::default(),
            side: SideMode::default(),
            show_orthographic: Self::default_show_orthographic(),
            show_perspective: false,
            axis_aligned: false,
            use_opacity: false,
            opacity: Self::default_opacity(),
        }
    }
}

/// One optional source-image path per canonical view. Embedded in host scene
/// data by the caller, so unassigned slots serialize away entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewSlots {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub front: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub back: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom: Option<PathBuf>,
}

impl ViewSlots {
    pub fn get(&self, view: ViewDirection) -> Option<&Path> {
        self.slot(view).as_deref()
    }

    pub fn set(&mut self, view: ViewDirection, path: PathBuf) {
        *self.slot_mut(view) = Some(path);
    }

    pub fn clear_view(&mut self, view: ViewDirection) {
        *self.slot_mut(view) = None;
    }

    pub fn clear(&mut self) {
        for view in ViewDirection::ALL {
            self.clear_view(view);
        }
    }

    pub fn is_empty(&self) -> bool {
        ViewDirection::ALL.iter().all(|view| self.get(*view).is_none())
    }

    pub fn assigned(&self) -> impl Iterator<Item = (ViewDirection, &Path)> {
        ViewDirection::ALL.iter().filter_map(|view| self.get(*view).map(|path| (*view, path)))
    }

    fn slot(&self, view: ViewDirection) -> &Option<PathBuf> {
        match view {
            ViewDirection::Front => &self.front,
            ViewDirection::Right => &self.right,
            ViewDirection::Left => &self.left,
            ViewDirection::Back => &self.back,
            ViewDirection::Top => &self.top,
            ViewDirection::Bottom => &self.bottom,
        }
    }

    fn slot_mut(&mut self, view: ViewDirection) -> &mut Option<PathBuf> {
        match view {
            ViewDirection::Front => &mut self.front,
            ViewDirection::Right => &mut self.right,
            ViewDirection::Left => &mut self.left,
            ViewDirection::Back => &mut self.back,
            ViewDirection::Top => &mut self.top,
            ViewDirection::Bottom => &mut self.bottom,
        }
    }
}

/// The whole user-editable configuration, passed explicitly into every engine
/// call. An empty `main_image` means no image has been picked yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlueprintConfig {
    #[serde(default)]
    pub main_image: PathBuf,
    #[serde(default)]
    pub display: DisplaySettings,
    #[serde(default)]
    pub remap: AxisRemap,
    #[serde(default)]
    pub clear_previous: bool,
}

/// Which engine pass a configuration edit requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigChange {
    None,
    SyncScale,
    SyncDisplay,
    FullPlacement,
}

impl ConfigChange {
    /// Classifies the diff between two configurations. Path and axis-remap
    /// edits force a full re-placement; a size-only edit takes the cheap
    /// scale pass; any other display edit takes the display pass.
    pub fn between(old: &BlueprintConfig, new: &BlueprintConfig) -> Self {
        if old.main_image != new.main_image
            || old.remap != new.remap
            || old.clear_previous != new.clear_previous
        {
            return ConfigChange::FullPlacement;
        }
        let before = &old.display;
        let after = &new.display;
        let display_changed = before.depth != after.depth
            || before.side != after.side
            || before.show_orthographic != after.show_orthographic
            || before.show_perspective != after.show_perspective
            || before.axis_aligned != after.axis_aligned
            || before.use_opacity != after.use_opacity
            || before.opacity != after.opacity;
        if display_changed {
            ConfigChange::SyncDisplay
        } else if before.size != after.size {
            ConfigChange::SyncScale
        } else {
            ConfigChange::None
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ConfigChange::None => "none",
            ConfigChange::SyncScale => "sync-scale",
            ConfigChange::SyncDisplay => "sync-display",
            ConfigChange::FullPlacement => "full-placement",
        }
    }
}
