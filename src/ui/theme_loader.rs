use std::fs;
use std::path::{Path, PathBuf};

use ratatui::style::Color;
use serde::Deserialize;

use crate::config::Settings;
use crate::controller::theme_store::ThemeId;
use crate::error::Result;

use super::theme::Palette;

// ═══════════════════════════════════════════════════════════════════════════════
// Palette override file (~/.termfolio/themes/{id}.json)
// Every field is a 256-color index; missing fields keep the built-in color.
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PaletteJson {
    pub bg: Option<u8>,
    pub bg_alt: Option<u8>,
    pub fg: Option<u8>,
    pub fg_dim: Option<u8>,
    pub fg_strong: Option<u8>,
    pub accent: Option<u8>,
    pub highlight: Option<u8>,
    pub border: Option<u8>,
}

/// Path of the override file for a theme
pub fn override_path(id: ThemeId) -> Option<PathBuf> {
    Settings::themes_dir().map(|d| d.join(format!("{}.json", id.id())))
}

/// Loads the user override for `id` on top of `base`, if one exists
pub fn load_palette_override(id: ThemeId, base: Palette) -> Option<Palette> {
    let path = override_path(id)?;
    if !path.exists() {
        return None;
    }
    match load_palette_from_path(&path, base) {
        Ok(palette) => Some(palette),
        Err(e) => {
            tracing::warn!("Ignoring theme override {}: {}", path.display(), e);
            None
        }
    }
}

pub fn load_palette_from_path(path: &Path, base: Palette) -> Result<Palette> {
    let content = fs::read_to_string(path)?;
    let json: PaletteJson = serde_json::from_str(&content)?;
    Ok(apply_override(&json, base))
}

fn apply_override(json: &PaletteJson, base: Palette) -> Palette {
    let pick = |value: Option<u8>, fallback: Color| value.map(Color::Indexed).unwrap_or(fallback);
    Palette {
        bg: pick(json.bg, base.bg),
        bg_alt: pick(json.bg_alt, base.bg_alt),
        fg: pick(json.fg, base.fg),
        fg_dim: pick(json.fg_dim, base.fg_dim),
        fg_strong: pick(json.fg_strong, base.fg_strong),
        accent: pick(json.accent, base.accent),
        highlight: pick(json.highlight, base.highlight),
        border: pick(json.border, base.border),
    }
}
