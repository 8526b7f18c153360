// Read-only resources exposed under the volume:// scheme.

use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use volctl_core::{Preset, VolumeController};

use crate::protocol::{ReadResourceResult, ResourceContents, ResourceSchema};

pub const CURRENT_STATE_URI: &str = "volume://current-state";
pub const PRESETS_URI: &str = "volume://presets";
pub const CAPABILITIES_URI: &str = "volume://capabilities";

const MIME_JSON: &str = "application/json";

/// The three read-only endpoints: live state, preset table, capabilities.
pub struct ResourceRegistry {
    controller: Arc<VolumeController>,
}

impl ResourceRegistry {
    pub fn new(controller: Arc<VolumeController>) -> Self {
        Self { controller }
    }

    pub fn list_schemas(&self) -> Vec<ResourceSchema> {
        vec![
            ResourceSchema {
                uri: CURRENT_STATE_URI.to_string(),
                name: "Current Volume State".to_string(),
                description: "Live system volume level and mute status".to_string(),
                mime_type: MIME_JSON.to_string(),
            },
            ResourceSchema {
                uri: PRESETS_URI.to_string(),
                name: "Volume Presets".to_string(),
                description: "Predefined volume configurations".to_string(),
                mime_type: MIME_JSON.to_string(),
            },
            ResourceSchema {
                uri: CAPABILITIES_URI.to_string(),
                name: "Volume Control Capabilities".to_string(),
                description: "Supported operations and volume range".to_string(),
                mime_type: MIME_JSON.to_string(),
            },
        ]
    }

    /// Read a resource by URI; `Ok(None)` for URIs outside the table.
    pub fn read(&self, uri: &str) -> Result<Option<ReadResourceResult>> {
        let content = match uri {
            CURRENT_STATE_URI => self.current_state(),
            PRESETS_URI => preset_table(),
            CAPABILITIES_URI => capabilities(),
            _ => return Ok(None),
        };

        Ok(Some(ReadResourceResult {
            contents: vec![ResourceContents {
                uri: uri.to_string(),
                mime_type: MIME_JSON.to_string(),
                text: serde_json::to_string_pretty(&content)?,
            }],
        }))
    }

    /// Live mixer snapshot. A mixer failure is reported inside the
    /// payload rather than failing the read.
    fn current_state(&self) -> serde_json::Value {
        let queried_at = Utc::now().to_rfc3339();
        match self.controller.get_volume() {
            Ok(state) => serde_json::json!({
                "level": state.level,
                "muted": state.muted,
                "queriedAt": queried_at,
            }),
            Err(err) => serde_json::json!({
                "error": err.to_string(),
                "queriedAt": queried_at,
            }),
        }
    }
}

fn preset_table() -> serde_json::Value {
    let presets: Vec<serde_json::Value> = Preset::ALL
        .iter()
        .map(|p| {
            serde_json::json!({
                "name": p.name(),
                "label": p.label(),
                "level": p.level(),
                "muted": p.muted(),
                "description": p.description(),
            })
        })
        .collect();

    serde_json::json!({
        "presets": presets,
        "count": Preset::ALL.len(),
        "usage": "Call the apply_preset tool with a preset name",
    })
}

fn capabilities() -> serde_json::Value {
    serde_json::json!({
        "supportedOperations": [
            "get_volume",
            "set_volume",
            "mute",
            "unmute",
            "toggle_mute",
            "apply_preset",
        ],
        "volumeRange": { "minimum": 0, "maximum": 100, "unit": "percentage" },
        "features": {
            "volumeControl": true,
            "mute": true,
            "presets": true,
        },
        "platform": {
            "os": "Windows",
            "audioApi": "Windows Core Audio (WASAPI endpoint volume)",
        },
    })
}
