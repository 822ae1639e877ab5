use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, PI};
use std::fmt;

/// One of the six canonical orthographic camera directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewDirection {
    Front,
    Right,
    Left,
    Back,
    Top,
    Bottom,
}

impl ViewDirection {
    /// Fixed iteration order used for suffix matching, probing, and slot walks.
    pub const ALL: [ViewDirection; 6] = [
        ViewDirection::Front,
        ViewDirection::Right,
        ViewDirection::Left,
        ViewDirection::Back,
        ViewDirection::Top,
        ViewDirection::Bottom,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ViewDirection::Front => "front",
            ViewDirection::Right => "right",
            ViewDirection::Left => "left",
            ViewDirection::Back => "back",
            ViewDirection::Top => "top",
            ViewDirection::Bottom => "bottom",
        }
    }

    /// Filename suffix that marks an image as belonging to this view.
    pub fn suffix(self) -> &'static str {
        match self {
            ViewDirection::Front => "_front",
            ViewDirection::Right => "_right",
            ViewDirection::Left => "_left",
            ViewDirection::Back => "_back",
            ViewDirection::Top => "_top",
            ViewDirection::Bottom => "_bottom",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "front" => Some(ViewDirection::Front),
            "right" => Some(ViewDirection::Right),
            "left" => Some(ViewDirection::Left),
            "back" => Some(ViewDirection::Back),
            "top" => Some(ViewDirection::Top),
            "bottom" => Some(ViewDirection::Bottom),
            _ => None,
        }
    }

    pub fn index(self) -> usize {
        match self {
            ViewDirection::Front => 0,
            ViewDirection::Right => 1,
            ViewDirection::Left => 2,
            ViewDirection::Back => 3,
            ViewDirection::Top => 4,
            ViewDirection::Bottom => 5,
        }
    }

    /// Euler rotation (radians) that orients an image plane to face this view.
    pub fn rotation_euler(self) -> Vec3 {
        match self {
            ViewDirection::Front => Vec3::new(FRAC_PI_2, 0.0, 0.0),
            ViewDirection::Right => Vec3::new(FRAC_PI_2, 0.0, FRAC_PI_2),
            ViewDirection::Left => Vec3::new(FRAC_PI_2, 0.0, -FRAC_PI_2),
            ViewDirection::Back => Vec3::new(FRAC_PI_2, 0.0, PI),
            ViewDirection::Top => Vec3::ZERO,
            ViewDirection::Bottom => Vec3::new(PI, 0.0, 0.0),
        }
    }
}

impl fmt::Display for ViewDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// User toggles that relabel a nominal view before the orientation lookup.
/// The stages run in declaration order; each consumes the previous result.
/// Slot assignment and derived object names are never affected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisRemap {
    #[serde(default = "AxisRemap::default_swap_xy")]
    pub swap_xy: bool,
    #[serde(default)]
    pub switch_x: bool,
    #[serde(default)]
    pub switch_y: bool,
}

impl AxisRemap {
    const fn default_swap_xy() -> bool {
        true
    }

    pub fn effective_view(self, nominal: ViewDirection) -> ViewDirection {
        let mut view = nominal;
        if self.swap_xy {
            view = match view {
                ViewDirection::Left => ViewDirection::Front,
                ViewDirection::Right => ViewDirection::Back,
                ViewDirection::Front => ViewDirection::Right,
                ViewDirection::Back => ViewDirection::Left,
                other => other,
            };
        }
        if self.switch_x {
            view = match view {
                ViewDirection::Left => ViewDirection::Right,
                ViewDirection::Right => ViewDirection::Left,
                other => other,
            };
        }
        if self.switch_y {
            view = match view {
                ViewDirection::Front => ViewDirection::Back,
                ViewDirection::Back => ViewDirection::Front,
                other => other,
            };
        }
        view
    }
}

impl Default for AxisRemap {
    fn default() -> Self {
        Self { swap_xy: Self::default_swap_xy(), switch_x: false, switch_y: false }
    }
}
