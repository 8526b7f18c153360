// The six volume tools, all thin wrappers over the controller.

use std::sync::Arc;

use anyhow::Result;
use serde::Deserialize;
use volctl_core::{Preset, VolumeController, VolumeError, VolumeState};

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{json_schema_integer, json_schema_object, json_schema_string, Tool};

/// Serialize a controller outcome as a tool result.
///
/// Success carries the resulting state as JSON text; controller errors
/// become error results rather than adapter faults.
fn state_result(outcome: Result<VolumeState, VolumeError>) -> Result<CallToolResult> {
    match outcome {
        Ok(state) => Ok(CallToolResult::ok(serde_json::to_string(&state)?)),
        Err(err) => {
            tracing::warn!(error = %err, "volume operation failed");
            Ok(CallToolResult::err(err.to_string()))
        }
    }
}

/// Report the current volume level and mute status.
pub struct GetVolumeTool {
    controller: Arc<VolumeController>,
}

impl GetVolumeTool {
    pub fn new(controller: Arc<VolumeController>) -> Self {
        Self { controller }
    }
}

#[async_trait::async_trait]
impl Tool for GetVolumeTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_volume".to_string(),
            description: "Get the current system volume level and mute status".to_string(),
            input_schema: json_schema_object(serde_json::json!({}), vec![]),
        }
    }

    async fn execute(&self, _arguments: serde_json::Value) -> Result<CallToolResult> {
        state_result(self.controller.get_volume())
    }
}

/// Set the master volume to a percentage.
pub struct SetVolumeTool {
    controller: Arc<VolumeController>,
}

impl SetVolumeTool {
    pub fn new(controller: Arc<VolumeController>) -> Self {
        Self { controller }
    }
}

#[derive(Debug, Deserialize)]
struct SetVolumeArgs {
    percent: i64,
}

#[async_trait::async_trait]
impl Tool for SetVolumeTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "set_volume".to_string(),
            description: "Set the system volume to a specific percentage (0-100)".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "percent": json_schema_integer("Target volume percentage", 0, 100),
                }),
                vec!["percent"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: SetVolumeArgs = match serde_json::from_value(arguments) {
            Ok(args) => args,
            Err(e) => return Ok(CallToolResult::err(format!("invalid arguments: {e}"))),
        };
        state_result(self.controller.set_volume(args.percent))
    }
}

/// Mute the system audio; the stored level is untouched.
pub struct MuteTool {
    controller: Arc<VolumeController>,
}

impl MuteTool {
    pub fn new(controller: Arc<VolumeController>) -> Self {
        Self { controller }
    }
}

#[async_trait::async_trait]
impl Tool for MuteTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "mute".to_string(),
            description: "Mute the system audio without changing the volume level".to_string(),
            input_schema: json_schema_object(serde_json::json!({}), vec![]),
        }
    }

    async fn execute(&self, _arguments: serde_json::Value) -> Result<CallToolResult> {
        state_result(self.controller.mute())
    }
}

/// Unmute the system audio.
pub struct UnmuteTool {
    controller: Arc<VolumeController>,
}

impl UnmuteTool {
    pub fn new(controller: Arc<VolumeController>) -> Self {
        Self { controller }
    }
}

#[async_trait::async_trait]
impl Tool for UnmuteTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "unmute".to_string(),
            description: "Unmute the system audio, restoring the previous level".to_string(),
            input_schema: json_schema_object(serde_json::json!({}), vec![]),
        }
    }

    async fn execute(&self, _arguments: serde_json::Value) -> Result<CallToolResult> {
        state_result(self.controller.unmute())
    }
}

/// Flip the current mute state.
pub struct ToggleMuteTool {
    controller: Arc<VolumeController>,
}

impl ToggleMuteTool {
    pub fn new(controller: Arc<VolumeController>) -> Self {
        Self { controller }
    }
}

#[async_trait::async_trait]
impl Tool for ToggleMuteTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "toggle_mute".to_string(),
            description: "Toggle between muted and unmuted states".to_string(),
            input_schema: json_schema_object(serde_json::json!({}), vec![]),
        }
    }

    async fn execute(&self, _arguments: serde_json::Value) -> Result<CallToolResult> {
        state_result(self.controller.toggle_mute())
    }
}

/// Apply a named volume preset.
pub struct ApplyPresetTool {
    controller: Arc<VolumeController>,
}

impl ApplyPresetTool {
    pub fn new(controller: Arc<VolumeController>) -> Self {
        Self { controller }
    }
}

#[derive(Debug, Deserialize)]
struct ApplyPresetArgs {
    name: String,
}

#[async_trait::async_trait]
impl Tool for ApplyPresetTool {
    fn schema(&self) -> ToolSchema {
        let names: Vec<&str> = Preset::ALL.iter().map(|p| p.name()).collect();
        ToolSchema {
            name: "apply_preset".to_string(),
            description: "Apply a predefined volume preset".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "name": json_schema_string("Preset to apply", &names),
                }),
                vec!["name"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: ApplyPresetArgs = match serde_json::from_value(arguments) {
            Ok(args) => args,
            Err(e) => return Ok(CallToolResult::err(format!("invalid arguments: {e}"))),
        };
        state_result(self.controller.apply_preset(&args.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use volctl_core::FakeMixer;

    fn controller(level: u8, muted: bool) -> Arc<VolumeController> {
        Arc::new(VolumeController::new(Box::new(FakeMixer::new(
            level, muted,
        ))))
    }

    fn text_of(result: &CallToolResult) -> &str {
        let crate::protocol::Content::Text { text } = &result.content[0];
        text
    }

    #[tokio::test]
    async fn test_get_volume_returns_state_json() {
        let tool = GetVolumeTool::new(controller(42, false));
        let result = tool.execute(serde_json::json!({})).await.unwrap();

        assert!(result.is_error.is_none());
        let state: VolumeState = serde_json::from_str(text_of(&result)).unwrap();
        assert_eq!(state, VolumeState { level: 42, muted: false });
    }

    #[tokio::test]
    async fn test_set_volume_applies_percent() {
        let ctl = controller(10, false);
        let tool = SetVolumeTool::new(ctl.clone());
        let result = tool
            .execute(serde_json::json!({ "percent": 80 }))
            .await
            .unwrap();

        let state: VolumeState = serde_json::from_str(text_of(&result)).unwrap();
        assert_eq!(state.level, 80);
        assert_eq!(ctl.get_volume().unwrap().level, 80);
    }

    #[tokio::test]
    async fn test_set_volume_out_of_range_is_error_result() {
        let tool = SetVolumeTool::new(controller(10, false));
        let result = tool
            .execute(serde_json::json!({ "percent": 101 }))
            .await
            .unwrap();

        assert_eq!(result.is_error, Some(true));
        assert!(text_of(&result).contains("between 0 and 100"));
    }

    #[tokio::test]
    async fn test_set_volume_malformed_arguments() {
        let tool = SetVolumeTool::new(controller(10, false));
        let result = tool
            .execute(serde_json::json!({ "percent": "loud" }))
            .await
            .unwrap();
        assert_eq!(result.is_error, Some(true));
    }

    #[tokio::test]
    async fn test_apply_preset_unknown_name() {
        let ctl = controller(65, false);
        let tool = ApplyPresetTool::new(ctl.clone());
        let result = tool
            .execute(serde_json::json!({ "name": "BLARING" }))
            .await
            .unwrap();

        assert_eq!(result.is_error, Some(true));
        // State untouched on rejected lookup.
        assert_eq!(ctl.get_volume().unwrap().level, 65);
    }

    #[tokio::test]
    async fn test_mute_tool_preserves_level() {
        let tool = MuteTool::new(controller(33, false));
        let result = tool.execute(serde_json::json!({})).await.unwrap();
        let state: VolumeState = serde_json::from_str(text_of(&result)).unwrap();
        assert!(state.muted);
        assert_eq!(state.level, 33);
    }

    #[tokio::test]
    async fn test_device_unavailable_is_error_result() {
        let ctl = Arc::new(VolumeController::new(Box::new(FakeMixer::unplugged())));
        let tool = GetVolumeTool::new(ctl);
        let result = tool.execute(serde_json::json!({})).await.unwrap();

        assert_eq!(result.is_error, Some(true));
        assert!(text_of(&result).contains("unavailable"));
    }
}
