//! MCP server implementation.

use super::protocol::*;
use super::tools::{self, get_tools, ChannelArgs, GetVideoArgs, PlaylistArgs, SearchVideosArgs};
use crate::config::Settings;
use crate::error::{Result, TubecapError};
use crate::transcript::{SearchTranscriptArgs, TranscriptArgs, TranscriptService};
use crate::youtube::YoutubeClient;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

const PROTOCOL_VERSION: &str = "2024-11-05";
const SERVER_NAME: &str = "tubecap";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// MCP Server for Tubecap.
pub struct McpServer {
    transcripts: TranscriptService,
    youtube: YoutubeClient,
}

impl McpServer {
    /// Create a new MCP server talking to YouTube.
    pub fn new(settings: &Settings) -> Result<Self> {
        Ok(Self::with_services(
            TranscriptService::from_settings(settings)?,
            YoutubeClient::new(&settings.youtube)?,
        ))
    }

    /// Create a server over explicit services.
    pub fn with_services(transcripts: TranscriptService, youtube: YoutubeClient) -> Self {
        Self { transcripts, youtube }
    }

    /// Run the MCP server (reads from stdin, writes to stdout).
    pub async fn run(&self) -> anyhow::Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdout = tokio::io::stdout();

        info!("Tubecap MCP server v{} started", SERVER_VERSION);
        if !self.youtube.has_api_key() {
            warn!("{} (video, channel and playlist tools will fail until it is set)", TubecapError::MissingApiKey);
        }

        while let Some(line) = lines.next_line().await? {
            if let Some(response) = self.handle_line(&line).await {
                let mut payload = serde_json::to_string(&response)?;
                payload.push('\n');
                stdout.write_all(payload.as_bytes()).await?;
                stdout.flush().await?;
            }
        }

        info!("stdin closed, shutting down");
        Ok(())
    }

    /// Handle one line of input. Returns `None` when no reply is due.
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        match serde_json::from_str::<JsonRpcRequest>(line) {
            Ok(request) => self.handle_request(request).await,
            Err(e) => {
                warn!("Failed to parse request: {}", e);
                Some(JsonRpcResponse::error(None, PARSE_ERROR, "Parse error"))
            }
        }
    }

    /// Handle a single JSON-RPC request.
    async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        debug!(method = %request.method, "Handling request");

        if request.is_notification() {
            debug!(method = %request.method, "Notification received");
            return None;
        }

        if request.jsonrpc != "2.0" {
            return Some(JsonRpcResponse::error(
                request.id,
                INVALID_REQUEST,
                "Only JSON-RPC 2.0 is supported",
            ));
        }

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(request.id, request.params),
            "ping" => JsonRpcResponse::success(request.id, json!({})),
            "tools/list" => self.handle_tools_list(request.id),
            "tools/call" => self.handle_tools_call(request.id, request.params).await,
            _ => JsonRpcResponse::error(
                request.id,
                METHOD_NOT_FOUND,
                &format!("Method not found: {}", request.method),
            ),
        };

        Some(response)
    }

    /// Handle initialize request.
    fn handle_initialize(&self, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
        let params = params.and_then(|p| serde_json::from_value::<InitializeParams>(p).ok());
        if let Some(params) = params {
            let client = params.client_info.map(|c| c.name).unwrap_or_else(|| "unknown".to_string());
            info!(
                "Client '{}' connected (protocol {})",
                client,
                params.protocol_version.as_deref().unwrap_or("unspecified")
            );
        }

        let result = InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: ToolsCapability { list_changed: false },
            },
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: SERVER_VERSION.to_string(),
            },
        };

        JsonRpcResponse::from_result(id, result)
    }

    /// Handle tools/list request.
    fn handle_tools_list(&self, id: Option<Value>) -> JsonRpcResponse {
        JsonRpcResponse::from_result(id, ToolsListResult { tools: get_tools() })
    }

    /// Handle tools/call request.
    async fn handle_tools_call(&self, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
        let params: ToolCallParams = match params {
            Some(p) => match serde_json::from_value(p) {
                Ok(params) => params,
                Err(e) => {
                    return JsonRpcResponse::error(id, INVALID_PARAMS, &format!("Invalid params: {}", e))
                }
            },
            None => return JsonRpcResponse::error(id, INVALID_PARAMS, "Missing params"),
        };

        let arguments = params.arguments.unwrap_or_else(|| json!({}));
        let result = match self.call_tool(&params.name, arguments).await {
            Ok(Some(value)) => match serde_json::to_string_pretty(&value) {
                Ok(text) => ToolCallResult::text(text),
                Err(e) => ToolCallResult::error(format!("Failed to encode result: {}", e)),
            },
            Ok(None) => ToolCallResult::error(format!("Unknown tool: {}", params.name)),
            Err(e) => {
                warn!(tool = %params.name, "Tool call failed: {}", e);
                ToolCallResult::error(e.to_string())
            }
        };

        JsonRpcResponse::from_result(id, result)
    }

    /// Dispatch a tool call. `Ok(None)` means the tool does not exist.
    async fn call_tool(&self, name: &str, arguments: Value) -> Result<Option<Value>> {
        let value = match name {
            tools::GET_VIDEO => {
                let args: GetVideoArgs = parse_args(arguments)?;
                to_value(self.youtube.get_video(&args.video_id, args.parts.as_deref()).await?)?
            }
            tools::SEARCH_VIDEOS => {
                let args: SearchVideosArgs = parse_args(arguments)?;
                to_value(self.youtube.search_videos(&args.query, args.max_results).await?)?
            }
            tools::GET_TRANSCRIPT => {
                let args: TranscriptArgs = parse_args(arguments)?;
                to_value(self.transcripts.get_transcript(&args).await?)?
            }
            tools::SEARCH_TRANSCRIPT => {
                let args: SearchTranscriptArgs = parse_args(arguments)?;
                to_value(self.transcripts.search_transcript(&args).await?)?
            }
            tools::GET_TIMESTAMPED_TRANSCRIPT => {
                let args: TranscriptArgs = parse_args(arguments)?;
                to_value(self.transcripts.get_timestamped_transcript(&args).await?)?
            }
            tools::GET_CHANNEL => {
                let args: ChannelArgs = parse_args(arguments)?;
                to_value(self.youtube.get_channel(&args.channel_id).await?)?
            }
            tools::LIST_CHANNEL_VIDEOS => {
                let args: ChannelArgs = parse_args(arguments)?;
                to_value(self.youtube.list_channel_videos(&args.channel_id, args.max_results).await?)?
            }
            tools::GET_PLAYLIST => {
                let args: PlaylistArgs = parse_args(arguments)?;
                to_value(self.youtube.get_playlist(&args.playlist_id).await?)?
            }
            tools::GET_PLAYLIST_ITEMS => {
                let args: PlaylistArgs = parse_args(arguments)?;
                to_value(self.youtube.get_playlist_items(&args.playlist_id, args.max_results).await?)?
            }
            _ => return Ok(None),
        };

        Ok(Some(value))
    }
}

fn parse_args<T: DeserializeOwned>(arguments: Value) -> Result<T> {
    serde_json::from_value(arguments).map_err(|e| TubecapError::InvalidInput(format!("Invalid arguments: {}", e)))
}

fn to_value<T: Serialize>(value: T) -> Result<Value> {
    Ok(serde_json::to_value(value)?)
}
