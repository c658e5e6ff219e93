use anyhow::Result;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use super::transport::StdioTransport;
use super::types::*;
use crate::tools::{
    bill_text_tool::{BillTextTool, BILL_TEXT_TOOL_DEFINITION},
    senator_profile_tool::{SenatorProfileTool, SENATOR_PROFILE_TOOL_DEFINITION},
};

pub struct McpServer {
    transport: StdioTransport,
    initialized: bool,
}

impl McpServer {
    pub fn new() -> Self {
        Self {
            transport: StdioTransport::new(),
            initialized: false,
        }
    }

    pub async fn start(&mut self) -> Result<()> {
        info!("MCP server started and listening on stdio");

        loop {
            match self.transport.read_message().await? {
                Some(IncomingMessage::Request(request)) => {
                    let response = self.handle_request(request).await;
                    self.transport.write_response(response).await?;
                }
                Some(IncomingMessage::Notification(notification)) => {
                    self.handle_notification(notification);
                }
                None => {
                    info!("Client disconnected");
                    break;
                }
            }
        }

        Ok(())
    }

    async fn handle_request(&mut self, request: Request) -> Response {
        match request.method.as_str() {
            "initialize" => Self::handle_initialize(request),
            "tools/list" => Self::handle_list_tools(request),
            "tools/call" => Self::handle_call_tool(request).await,
            "ping" => Response::result(request.id, json!({})),
            _ => Response::error(request.id, METHOD_NOT_FOUND, "Method not found"),
        }
    }

    fn handle_notification(&mut self, notification: Notification) {
        debug!("Received notification: {}", notification.method);

        match notification.method.as_str() {
            "notifications/initialized" => {
                info!("Client initialization completed");
                self.initialized = true;
            }
            "notifications/cancelled" => {
                debug!("Request cancelled notification received");
            }
            _ => {
                warn!("Unknown notification method: {}", notification.method);
            }
        }
    }

    fn handle_initialize(request: Request) -> Response {
        let result = InitializeResult {
            protocol_version: "2024-11-05".to_string(),
            server_info: ServerInfo {
                name: "Brazilian Senate Open Data MCP".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                description: Some(
                    "A Model Context Protocol server for the Brazilian Senate open-data service"
                        .to_string(),
                ),
            },
            capabilities: ServerCapabilities {
                tools: ToolsCapability {
                    list_changed: false,
                },
            },
        };

        Response::result(request.id, serde_json::to_value(result).unwrap_or(Value::Null))
    }

    fn handle_list_tools(request: Request) -> Response {
        let result = ListToolsResult {
            tools: vec![
                BILL_TEXT_TOOL_DEFINITION.clone(),
                SENATOR_PROFILE_TOOL_DEFINITION.clone(),
            ],
        };

        Response::result(request.id, serde_json::to_value(result).unwrap_or(Value::Null))
    }

    async fn handle_call_tool(request: Request) -> Response {
        let params = match request.params {
            Some(params) => match serde_json::from_value::<CallToolParams>(params) {
                Ok(params) => params,
                Err(e) => {
                    return Response::error(
                        request.id,
                        INVALID_PARAMS,
                        format!("Invalid params: {}", e),
                    )
                }
            },
            None => return Response::error(request.id, INVALID_PARAMS, "Missing params"),
        };

        let result = Self::execute_tool(params).await;
        Response::result(
            request.id,
            serde_json::to_value(result).unwrap_or(Value::Null),
        )
    }

    async fn execute_tool(params: CallToolParams) -> CallToolResult {
        match params.name.as_str() {
            "getBillText" => BillTextTool::new().execute(params.arguments).await,
            "getSenatorProfile" => SenatorProfileTool::new().execute(params.arguments).await,
            _ => CallToolResult::error(format!("Tool not found: {}", params.name)),
        }
    }
}
