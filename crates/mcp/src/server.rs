// Stdio JSON-RPC loop and method dispatch.

use anyhow::Result;
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::prompts::PromptRegistry;
use crate::protocol::{
    CallToolParams, CapabilityFlags, GetPromptParams, InitializeResult, JsonRpcError,
    JsonRpcRequest, JsonRpcResponse, ListPromptsResult, ListResourcesResult, ListToolsResult,
    ReadResourceParams, ServerCapabilities, ServerInfo, PROTOCOL_VERSION,
};
use crate::resources::ResourceRegistry;
use crate::tools::ToolRegistry;

pub const SERVER_NAME: &str = "volctl";

/// MCP server over line-delimited JSON-RPC on stdin/stdout.
///
/// Requests are handled one at a time, in order; every mixer call blocks
/// the loop until the OS returns. Stdout carries protocol frames only,
/// logging goes to stderr.
pub struct McpServer {
    tools: ToolRegistry,
    resources: ResourceRegistry,
    prompts: PromptRegistry,
}

impl McpServer {
    pub fn new(tools: ToolRegistry, resources: ResourceRegistry) -> Self {
        Self {
            tools,
            resources,
            prompts: PromptRegistry::new(),
        }
    }

    /// Serve until stdin closes.
    pub async fn run(&self) -> Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdout = tokio::io::stdout();

        tracing::info!(
            tools = self.tools.len(),
            resources = self.resources.list_schemas().len(),
            prompts = self.prompts.len(),
            "serving on stdio"
        );

        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let response = match serde_json::from_str::<JsonRpcRequest>(line) {
                Ok(request) => self.handle(request).await,
                Err(err) => {
                    tracing::warn!(error = %err, "unparseable frame");
                    Some(JsonRpcResponse::failure(
                        Value::Null,
                        JsonRpcError::parse_error(),
                    ))
                }
            };

            if let Some(response) = response {
                let mut frame = serde_json::to_string(&response)?;
                frame.push('\n');
                stdout.write_all(frame.as_bytes()).await?;
                stdout.flush().await?;
            }
        }

        tracing::info!("stdin closed, shutting down");
        Ok(())
    }

    /// Dispatch a single request. Notifications produce no response.
    pub async fn handle(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.is_notification() {
            tracing::debug!(method = %request.method, "notification");
            return None;
        }

        let id = request.id.unwrap_or(Value::Null);
        let params = request.params.unwrap_or(Value::Null);

        let response = match request.method.as_str() {
            "initialize" => self.initialize(id),
            "ping" => JsonRpcResponse::success(id, Value::Object(Default::default())),
            "tools/list" => reply(
                id,
                &ListToolsResult {
                    tools: self.tools.list_schemas(),
                },
            ),
            "tools/call" => self.call_tool(id, params).await,
            "resources/list" => reply(
                id,
                &ListResourcesResult {
                    resources: self.resources.list_schemas(),
                },
            ),
            "resources/read" => self.read_resource(id, params),
            "prompts/list" => reply(
                id,
                &ListPromptsResult {
                    prompts: self.prompts.list_schemas(),
                },
            ),
            "prompts/get" => self.get_prompt(id, params),
            other => {
                JsonRpcResponse::failure(id, JsonRpcError::method_not_found(other))
            }
        };

        Some(response)
    }

    fn initialize(&self, id: Value) -> JsonRpcResponse {
        reply(
            id,
            &InitializeResult {
                protocol_version: PROTOCOL_VERSION.to_string(),
                capabilities: ServerCapabilities {
                    tools: CapabilityFlags::default(),
                    resources: CapabilityFlags::default(),
                    prompts: CapabilityFlags::default(),
                },
                server_info: ServerInfo {
                    name: SERVER_NAME.to_string(),
                    version: env!("CARGO_PKG_VERSION").to_string(),
                },
            },
        )
    }

    async fn call_tool(&self, id: Value, params: Value) -> JsonRpcResponse {
        let params: CallToolParams = match serde_json::from_value(params) {
            Ok(p) => p,
            Err(err) => {
                return JsonRpcResponse::failure(
                    id,
                    JsonRpcError::invalid_params(format!("invalid tools/call params: {err}")),
                )
            }
        };

        let Some(tool) = self.tools.get(&params.name) else {
            return JsonRpcResponse::failure(
                id,
                JsonRpcError::invalid_params(format!("unknown tool: {}", params.name)),
            );
        };

        tracing::debug!(tool = %params.name, "tool call");
        match tool.execute(params.arguments).await {
            Ok(result) => reply(id, &result),
            Err(err) => {
                tracing::error!(tool = %params.name, error = %err, "tool fault");
                JsonRpcResponse::failure(id, JsonRpcError::internal_error(err.to_string()))
            }
        }
    }

    fn read_resource(&self, id: Value, params: Value) -> JsonRpcResponse {
        let params: ReadResourceParams = match serde_json::from_value(params) {
            Ok(p) => p,
            Err(err) => {
                return JsonRpcResponse::failure(
                    id,
                    JsonRpcError::invalid_params(format!("invalid resources/read params: {err}")),
                )
            }
        };

        match self.resources.read(&params.uri) {
            Ok(Some(result)) => reply(id, &result),
            Ok(None) => JsonRpcResponse::failure(
                id,
                JsonRpcError::invalid_params(format!("unknown resource: {}", params.uri)),
            ),
            Err(err) => JsonRpcResponse::failure(id, JsonRpcError::internal_error(err.to_string())),
        }
    }

    fn get_prompt(&self, id: Value, params: Value) -> JsonRpcResponse {
        let params: GetPromptParams = match serde_json::from_value(params) {
            Ok(p) => p,
            Err(err) => {
                return JsonRpcResponse::failure(
                    id,
                    JsonRpcError::invalid_params(format!("invalid prompts/get params: {err}")),
                )
            }
        };

        match self.prompts.get(&params.name) {
            Some(result) => reply(id, &result),
            None => JsonRpcResponse::failure(
                id,
                JsonRpcError::invalid_params(format!("unknown prompt: {}", params.name)),
            ),
        }
    }
}

fn reply(id: Value, result: &impl serde::Serialize) -> JsonRpcResponse {
    match serde_json::to_value(result) {
        Ok(value) => JsonRpcResponse::success(id, value),
        Err(err) => JsonRpcResponse::failure(id, JsonRpcError::internal_error(err.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use volctl_core::{FakeMixer, VolumeController};

    use super::*;
    use crate::resources;
    use crate::tools::{
        ApplyPresetTool, GetVolumeTool, MuteTool, SetVolumeTool, ToggleMuteTool, UnmuteTool,
    };

    fn test_server() -> McpServer {
        let controller = Arc::new(VolumeController::new(Box::new(FakeMixer::new(50, false))));

        let mut tools = ToolRegistry::new();
        tools
            .register(Arc::new(GetVolumeTool::new(controller.clone())))
            .unwrap();
        tools
            .register(Arc::new(SetVolumeTool::new(controller.clone())))
            .unwrap();
        tools
            .register(Arc::new(MuteTool::new(controller.clone())))
            .unwrap();
        tools
            .register(Arc::new(UnmuteTool::new(controller.clone())))
            .unwrap();
        tools
            .register(Arc::new(ToggleMuteTool::new(controller.clone())))
            .unwrap();
        tools
            .register(Arc::new(ApplyPresetTool::new(controller.clone())))
            .unwrap();

        McpServer::new(tools, ResourceRegistry::new(controller))
    }

    fn request(id: i64, method: &str, params: serde_json::Value) -> JsonRpcRequest {
        JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: Some(id.into()),
            method: method.to_string(),
            params: Some(params),
        }
    }

    #[tokio::test]
    async fn test_initialize_handshake() {
        let server = test_server();
        let response = server
            .handle(request(1, "initialize", serde_json::json!({})))
            .await
            .unwrap();

        let result = response.result.unwrap();
        assert_eq!(result["protocolVersion"], PROTOCOL_VERSION);
        assert_eq!(result["serverInfo"]["name"], "volctl");
        assert!(result["capabilities"]["tools"].is_object());
        assert!(result["capabilities"]["prompts"].is_object());
    }

    #[tokio::test]
    async fn test_tools_list_has_six_entries() {
        let server = test_server();
        let response = server
            .handle(request(2, "tools/list", serde_json::json!({})))
            .await
            .unwrap();

        let tools = response.result.unwrap()["tools"].as_array().unwrap().len();
        assert_eq!(tools, 6);
    }

    #[tokio::test]
    async fn test_tools_call_roundtrips_state() {
        let server = test_server();
        let response = server
            .handle(request(
                3,
                "tools/call",
                serde_json::json!({"name": "set_volume", "arguments": {"percent": 25}}),
            ))
            .await
            .unwrap();

        let result = response.result.unwrap();
        assert!(result.get("isError").is_none());
        let state: volctl_core::VolumeState =
            serde_json::from_str(result["content"][0]["text"].as_str().unwrap()).unwrap();
        assert_eq!(state.level, 25);
    }

    #[tokio::test]
    async fn test_unknown_tool_is_invalid_params() {
        let server = test_server();
        let response = server
            .handle(request(
                4,
                "tools/call",
                serde_json::json!({"name": "set_bass", "arguments": {}}),
            ))
            .await
            .unwrap();

        assert_eq!(response.error.unwrap().code, -32602);
    }

    #[tokio::test]
    async fn test_unknown_method_is_method_not_found() {
        let server = test_server();
        let response = server
            .handle(request(5, "volume/stream", serde_json::json!({})))
            .await
            .unwrap();

        assert_eq!(response.error.unwrap().code, -32601);
    }

    #[tokio::test]
    async fn test_notification_produces_no_response() {
        let server = test_server();
        let note = JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: None,
            method: "notifications/initialized".to_string(),
            params: None,
        };
        assert!(server.handle(note).await.is_none());
    }

    #[tokio::test]
    async fn test_resources_read_all_uris() {
        let server = test_server();
        for uri in [
            resources::CURRENT_STATE_URI,
            resources::PRESETS_URI,
            resources::CAPABILITIES_URI,
        ] {
            let response = server
                .handle(request(6, "resources/read", serde_json::json!({"uri": uri})))
                .await
                .unwrap();
            let result = response.result.unwrap();
            assert_eq!(result["contents"][0]["uri"], uri);
        }
    }

    #[tokio::test]
    async fn test_prompts_get_known_and_unknown() {
        let server = test_server();

        let response = server
            .handle(request(
                7,
                "prompts/get",
                serde_json::json!({"name": "volume-settings"}),
            ))
            .await
            .unwrap();
        assert!(response.result.is_some());

        let response = server
            .handle(request(
                8,
                "prompts/get",
                serde_json::json!({"name": "volume-eq"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.error.unwrap().code, -32602);
    }

    #[tokio::test]
    async fn test_ping() {
        let server = test_server();
        let response = server
            .handle(request(9, "ping", serde_json::json!({})))
            .await
            .unwrap();
        assert!(response.result.unwrap().is_object());
    }
}
