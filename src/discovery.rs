use crate::view::ViewDirection;
use std::fs;
use std::path::{Path, PathBuf};

/// Extensions recognized as reference images, compared case-insensitively.
pub const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "tiff"];

pub fn is_image_file(path: &Path) -> bool {
    let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
        return false;
    };
    let lowered = ext.to_ascii_lowercase();
    IMAGE_EXTENSIONS.iter().any(|known| *known == lowered)
}

/// Base token derived from a picked image: the lowercased stem with any
/// recognized view suffix stripped, plus the view that suffix named.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseToken {
    pub base: String,
    pub view: Option<ViewDirection>,
}

pub fn base_token(path: &Path) -> BaseToken {
    let stem = path.file_stem().map(|stem| stem.to_string_lossy().to_lowercase()).unwrap_or_default();
    for view in ViewDirection::ALL {
        if let Some(base) = stem.strip_suffix(view.suffix()) {
            return BaseToken { base: base.to_string(), view: Some(view) };
        }
    }
    BaseToken { base: stem, view: None }
}

/// Probes `directory` for an image whose stem is `{base}_{view}`. Matching is
/// case-insensitive on stem and extension; the first directory entry wins, so
/// two siblings differing only by extension resolve to whichever the file
/// system lists first.
pub fn find_view_image(directory: &Path, base: &str, view: ViewDirection) -> Option<PathBuf> {
    let expected = format!("{base}{}", view.suffix());
    let entries = fs::read_dir(directory).ok()?;
    for entry in entries.flatten() {
        if !entry.file_type().map(|kind| kind.is_file()).unwrap_or(false) {
            continue;
        }
        let path = entry.path();
        if !is_image_file(&path) {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
            continue;
        };
        if stem.to_lowercase() == expected {
            return Some(path);
        }
    }
    None
}

pub fn resolve_absolute(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}
