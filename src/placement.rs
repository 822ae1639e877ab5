use crate::discovery;
use crate::host::{EmptyAttribute, EmptyId, SceneHost};
use crate::settings::{BlueprintConfig, ConfigChange, DisplaySettings, ViewSlots};
use crate::view::ViewDirection;
use glam::Vec3;
use std::path::Path;

/// Collection every placed reference plane is linked into.
pub const COLLECTION_NAME: &str = "Blueprints";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Warning,
    Error,
}

impl StatusKind {
    pub fn label(self) -> &'static str {
        match self {
            StatusKind::Info => "info",
            StatusKind::Success => "success",
            StatusKind::Warning => "warning",
            StatusKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub message: String,
}

/// Outcome of one engine pass: which views got (re)placed and the
/// diagnostics the embedding editor should surface.
#[derive(Debug, Clone, Default)]
pub struct PlacementReport {
    pub placed: Vec<ViewDirection>,
    pub messages: Vec<StatusMessage>,
}

impl PlacementReport {
    fn push(&mut self, kind: StatusKind, message: impl Into<String>) {
        self.messages.push(StatusMessage { kind, message: message.into() });
    }

    pub fn has_errors(&self) -> bool {
        self.messages.iter().any(|status| status.kind == StatusKind::Error)
    }
}

/// Object name derived from an image path: the file stem, case preserved.
/// Doubles as the object-identity key inside the host scene.
pub fn derived_name(path: &Path) -> String {
    path.file_stem().map(|stem| stem.to_string_lossy().into_owned()).unwrap_or_default()
}

/// Discovers sibling view images and keeps the host scene's image planes in
/// step with the configuration. Owns the slot -> object-handle record, so the
/// cheap sync passes never have to look objects up by name.
#[derive(Debug, Default)]
pub struct PlacementEngine {
    slots: ViewSlots,
    placed: [Option<EmptyId>; 6],
}

impl PlacementEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slots(&self) -> &ViewSlots {
        &self.slots
    }

    pub fn placed(&self, view: ViewDirection) -> Option<EmptyId> {
        self.placed[view.index()]
    }

    /// Adopts slot state persisted by the host. Object handles are not
    /// persisted; a full placement run re-links them.
    pub fn restore_slots(&mut self, slots: ViewSlots) {
        self.slots = slots;
        self.placed = [None; 6];
    }

    /// Dispatches a configuration edit to the pass it requires.
    pub fn apply_config_change<H: SceneHost>(
        &mut self,
        host: &mut H,
        old: &BlueprintConfig,
        new: &BlueprintConfig,
    ) -> PlacementReport {
        match ConfigChange::between(old, new) {
            ConfigChange::FullPlacement => self.run_full_placement(host, new),
            ConfigChange::SyncDisplay => self.sync_display(host, new),
            ConfigChange::SyncScale => self.sync_scale(host, new),
            ConfigChange::None => PlacementReport::default(),
        }
    }

    /// Full discovery-and-placement pass, driven by `config.main_image`.
    ///
    /// Aborts before touching any state when the main image does not exist.
    /// Otherwise resets all six slots, assigns the trigger to its own slot
    /// where the filename suffix allows, probes the directory for the other
    /// views, and delete-then-recreates one image plane per resolved slot.
    /// Re-running with unchanged inputs converges to the same object set.
    pub fn run_full_placement<H: SceneHost>(
        &mut self,
        host: &mut H,
        config: &BlueprintConfig,
    ) -> PlacementReport {
        let mut report = PlacementReport::default();
        if config.main_image.as_os_str().is_empty() {
            report.push(StatusKind::Warning, "no main image picked");
            return report;
        }
        let trigger = discovery::resolve_absolute(&config.main_image);
        if !trigger.exists() {
            eprintln!("[blueprints] main image '{}' does not exist", trigger.display());
            report.push(
                StatusKind::Error,
                format!("main image '{}' does not exist", trigger.display()),
            );
            return report;
        }
        let token = discovery::base_token(&trigger);

        if config.clear_previous {
            self.remove_placed(host);
        }
        self.slots.clear();
        // Handles always track the current run; objects a failed or absent
        // re-placement leaves behind stay in the scene but are forgotten.
        self.placed = [None; 6];
        if let Some(view) = token.view {
            self.slots.set(view, trigger.clone());
        }
        if let Some(directory) = trigger.parent() {
            for view in ViewDirection::ALL {
                if token.view == Some(view) {
                    continue;
                }
                if let Some(found) = discovery::find_view_image(directory, &token.base, view) {
                    self.slots.set(view, found);
                }
            }
        }

        for view in ViewDirection::ALL {
            let Some(path) = self.slots.get(view).map(Path::to_path_buf) else {
                continue;
            };
            if !path.exists() {
                continue;
            }
            self.place_view(host, config, view, &path, &mut report);
        }

        if report.placed.is_empty() {
            report.push(StatusKind::Info, format!("no view images found for base '{}'", token.base));
        } else {
            report.push(
                StatusKind::Success,
                format!("placed {} of 6 views for base '{}'", report.placed.len(), token.base),
            );
        }
        report
    }

    /// Reapplies the full display settings to every known placed object.
    /// Never creates, never deletes, never probes the filesystem; objects
    /// that went missing since placement are skipped.
    pub fn sync_display<H: SceneHost>(
        &mut self,
        host: &mut H,
        config: &BlueprintConfig,
    ) -> PlacementReport {
        let mut report = PlacementReport::default();
        for id in self.live_placed(host) {
            host.set_display_size(id, config.display.effective_size());
            // Unlike the create path, the sync path leaves alpha blending on.
            apply_display_attributes(host, id, &config.display, true, &mut report);
        }
        report
    }

    /// Size-only variant of [`sync_display`](Self::sync_display).
    pub fn sync_scale<H: SceneHost>(
        &mut self,
        host: &mut H,
        config: &BlueprintConfig,
    ) -> PlacementReport {
        for id in self.live_placed(host) {
            host.set_display_size(id, config.display.effective_size());
        }
        PlacementReport::default()
    }

    fn live_placed<H: SceneHost>(&self, host: &H) -> Vec<EmptyId> {
        ViewDirection::ALL
            .into_iter()
            .filter(|view| self.slots.get(*view).is_some())
            .filter_map(|view| self.placed[view.index()])
            .filter(|id| host.is_image_empty(*id))
            .collect()
    }

    fn remove_placed<H: SceneHost>(&mut self, host: &mut H) {
        for slot in &mut self.placed {
            if let Some(id) = slot.take() {
                if host.is_image_empty(id) {
                    host.remove_empty(id);
                }
            }
        }
    }

    fn place_view<H: SceneHost>(
        &mut self,
        host: &mut H,
        config: &BlueprintConfig,
        view: ViewDirection,
        path: &Path,
        report: &mut PlacementReport,
    ) {
        let name = derived_name(path);
        // Only same-named objects are replaced; an earlier set with a
        // different base token stays unless clear_previous removed it.
        if let Some(existing) = host.find_empty(&name) {
            host.remove_empty(existing);
        }

        let image = match host.load_image(path) {
            Ok(image) => image,
            Err(err) => {
                eprintln!("[blueprints] failed to load '{}': {err:?}", path.display());
                report.push(
                    StatusKind::Warning,
                    format!("skipped {view}: failed to load '{}': {err}", path.display()),
                );
                return;
            }
        };
        let collection = host.ensure_collection(COLLECTION_NAME);
        let empty = match host.create_empty(&name, collection) {
            Ok(empty) => empty,
            Err(err) => {
                eprintln!("[blueprints] failed to create empty '{name}': {err:?}");
                report.push(StatusKind::Warning, format!("skipped {view}: {err}"));
                return;
            }
        };
        if let Err(err) = host.attach_image(empty, image) {
            eprintln!("[blueprints] failed to attach image to '{name}': {err:?}");
            report.push(StatusKind::Warning, format!("{view}: image not attached: {err}"));
        }
        host.set_display_size(empty, config.display.effective_size());
        let effective = config.remap.effective_view(view);
        host.set_rotation(empty, effective.rotation_euler());
        host.set_position(empty, Vec3::ZERO);
        apply_display_attributes(host, empty, &config.display, config.display.use_opacity, report);

        self.placed[view.index()] = Some(empty);
        report.placed.push(view);
    }
}

fn apply_display_attributes<H: SceneHost>(
    host: &mut H,
    id: EmptyId,
    display: &DisplaySettings,
    use_alpha: bool,
    report: &mut PlacementReport,
) {
    let attributes = [
        EmptyAttribute::Depth(display.depth.host_mode()),
        EmptyAttribute::Side(display.side),
        EmptyAttribute::ShowOrthographic(display.show_orthographic),
        EmptyAttribute::ShowPerspective(display.show_perspective),
        EmptyAttribute::UseAlpha(use_alpha),
        EmptyAttribute::Opacity(display.effective_opacity()),
    ];
    for attribute in attributes {
        if let Err(err) = host.apply_attribute(id, attribute) {
            eprintln!("[blueprints] could not set {}: {err:?}", attribute.label());
            report.push(StatusKind::Warning, format!("could not set {}: {err}", attribute.label()));
        }
    }
}
