//! Canvas settings, stored as JSON.
//!
//! Every key is optional in the file; missing keys take the built-in
//! defaults from [`crate::constants`].
//!
//! ```json
//! {
//!   "min_table_size": { "width": 150.0, "height": 80.0 },
//!   "clamp": "within_parent",
//!   "drag_region": "whole_node"
//! }
//! ```

use crate::constants::{
    CONNECTOR_HIT_WIDTH, CORNER_HANDLE_SIZE, DEFAULT_CANVAS_SIZE, DEFAULT_TABLE_SIZE,
    EDGE_HANDLE_THICKNESS, HEADER_HEIGHT, MIN_TABLE_HEIGHT, MIN_TABLE_WIDTH,
    MOUNT_RECOMPUTE_DELAY_MS,
};
use crate::error::{SettingsError, SettingsResult};
use crate::interaction::{ClampPolicy, DragRegion, HandleMetrics, InteractionPolicy};
use crate::types::Size;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    /// Floor for resizing, also applied to newly created tables
    pub min_table_size: Size,
    pub default_table_size: Size,
    /// Extent of the canvas, the parent used by `ClampPolicy::WithinParent`
    pub canvas_size: Size,
    pub clamp: ClampPolicy,
    pub drag_region: DragRegion,
    pub header_height: f32,
    pub edge_handle_thickness: f32,
    pub corner_handle_size: f32,
    pub connector_hit_width: f32,
    pub mount_recompute_delay_ms: u64,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            min_table_size: Size::new(MIN_TABLE_WIDTH, MIN_TABLE_HEIGHT),
            default_table_size: DEFAULT_TABLE_SIZE.into(),
            canvas_size: DEFAULT_CANVAS_SIZE.into(),
            clamp: ClampPolicy::default(),
            drag_region: DragRegion::default(),
            header_height: HEADER_HEIGHT,
            edge_handle_thickness: EDGE_HANDLE_THICKNESS,
            corner_handle_size: CORNER_HANDLE_SIZE,
            connector_hit_width: CONNECTOR_HIT_WIDTH,
            mount_recompute_delay_ms: MOUNT_RECOMPUTE_DELAY_MS,
        }
    }
}

impl CanvasSettings {
    /// Load from the default location, falling back to defaults on any error.
    pub fn load() -> Self {
        match default_settings_path() {
            Some(path) if path.exists() => Self::load_or_default(&path),
            _ => Self::default(),
        }
    }

    pub fn load_or_default(path: &Path) -> Self {
        match Self::load_from(path) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Failed to load settings from {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&content)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn save_to(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        info!("Saved settings to {}", path.display());
        Ok(())
    }

    pub fn validate(&self) -> SettingsResult<()> {
        fn positive(key: &'static str, value: f32) -> SettingsResult<()> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(SettingsError::Invalid {
                    key,
                    reason: format!("must be a positive number, got {value}"),
                })
            }
        }

        positive("min_table_size.width", self.min_table_size.width)?;
        positive("min_table_size.height", self.min_table_size.height)?;
        positive("default_table_size.width", self.default_table_size.width)?;
        positive("default_table_size.height", self.default_table_size.height)?;
        positive("canvas_size.width", self.canvas_size.width)?;
        positive("canvas_size.height", self.canvas_size.height)?;
        positive("header_height", self.header_height)?;
        positive("edge_handle_thickness", self.edge_handle_thickness)?;
        positive("corner_handle_size", self.corner_handle_size)?;
        positive("connector_hit_width", self.connector_hit_width)?;
        Ok(())
    }

    pub fn interaction_policy(&self) -> InteractionPolicy {
        InteractionPolicy {
            min_size: self.min_table_size,
            clamp: self.clamp,
        }
    }

    pub fn handle_metrics(&self) -> HandleMetrics {
        HandleMetrics {
            header_height: self.header_height,
            edge_thickness: self.edge_handle_thickness,
            corner_size: self.corner_handle_size,
            drag_region: self.drag_region,
        }
    }

    pub fn mount_recompute_delay(&self) -> Duration {
        Duration::from_millis(self.mount_recompute_delay_ms)
    }
}

/// `<config dir>/schemaboard/settings.json`, if the platform has a config dir.
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("schemaboard").join("settings.json"))
}
