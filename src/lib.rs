pub mod discovery;
pub mod host;
pub mod placement;
pub mod scene_graph;
pub mod settings;
pub mod view;

pub use placement::{PlacementEngine, PlacementReport, StatusKind, StatusMessage, COLLECTION_NAME};
pub use settings::{BlueprintConfig, ConfigChange, DepthMode, DisplaySettings, SideMode, ViewSlots};
pub use view::{AxisRemap, ViewDirection};
