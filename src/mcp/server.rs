//! MCP server implementation.

use super::protocol::*;
use super::tools::{get_tools, CREATE_PPT_FROM_TEXT, GET_YOUTUBE_TRANSCRIPT};
use crate::config::Settings;
use crate::error::SlidesError;
use crate::generation::GenerationResult;
use crate::orchestrator::Orchestrator;
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::{mpsc, Mutex};
use tokio::task::AbortHandle;
use tracing::{debug, info, warn};

const PROTOCOL_VERSION: &str = "2024-11-05";
const SERVER_NAME: &str = "magicslides-mcp";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatePptArgs {
    #[serde(default)]
    user_text: Option<String>,
    #[serde(default)]
    account_id: Option<String>,
    #[serde(default)]
    account_identity: Option<String>,
}

impl CreatePptArgs {
    /// Text and account id, preferring `accountId` over `accountIdentity`.
    fn into_inputs(self) -> Option<(String, String)> {
        let text = self.user_text.filter(|t| !t.trim().is_empty())?;
        let account = [self.account_id, self.account_identity]
            .into_iter()
            .flatten()
            .find(|a| !a.trim().is_empty())?;
        Some((text, account))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranscriptArgs {
    #[serde(default)]
    yt_url: Option<String>,
}

/// MCP Server for MagicSlides.
///
/// Every `tools/call` runs on its own task so a `notifications/cancelled`
/// can abort it, dropping whatever HTTP request is in flight.
#[derive(Clone)]
pub struct McpServer {
    orchestrator: Arc<Orchestrator>,
    in_flight: Arc<Mutex<HashMap<String, AbortHandle>>>,
}

impl McpServer {
    /// Create a new MCP server.
    pub fn new(settings: Settings) -> crate::error::Result<Self> {
        Ok(Self::with_orchestrator(Orchestrator::new(settings)?))
    }

    pub fn with_orchestrator(orchestrator: Orchestrator) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
            in_flight: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Run the MCP server (reads from stdin, writes to stdout).
    pub async fn run(&self) -> anyhow::Result<()> {
        info!("MagicSlides MCP server starting...");
        self.serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await
    }

    /// Serve line-delimited JSON-RPC until `reader` reaches EOF and every
    /// outstanding call has answered.
    pub async fn serve<R, W>(&self, reader: R, writer: W) -> anyhow::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel::<JsonRpcResponse>();
        let writer_task = tokio::spawn(write_responses(rx, writer));

        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str::<JsonRpcRequest>(&line) {
                Ok(request) => self.dispatch(request, &tx).await,
                Err(e) => {
                    warn!("Failed to parse request: {}", e);
                    let _ = tx.send(JsonRpcResponse::error(None, PARSE_ERROR, "Parse error"));
                }
            }
        }

        debug!("Input closed, waiting for in-flight calls");
        drop(tx);
        writer_task.await??;
        Ok(())
    }

    async fn dispatch(&self, request: JsonRpcRequest, tx: &mpsc::UnboundedSender<JsonRpcResponse>) {
        let method = request.method.clone();
        match method.as_str() {
            "tools/call" => {
                let key = request.id.as_ref().map(Value::to_string);
                let server = self.clone();
                let tx = tx.clone();

                // Hold the lock across spawn so a fast call cannot remove its
                // entry before it is inserted.
                let mut in_flight = self.in_flight.lock().await;
                let task_key = key.clone();
                let handle = tokio::spawn(async move {
                    let response = server.handle_tools_call(request.id, request.params).await;
                    if let Some(key) = task_key {
                        server.in_flight.lock().await.remove(&key);
                    }
                    let _ = tx.send(response);
                });
                if let Some(key) = key {
                    in_flight.insert(key, handle.abort_handle());
                }
            }
            "notifications/cancelled" => self.handle_cancelled(request.params).await,
            _ => {
                if let Some(response) = self.handle_request(request) {
                    let _ = tx.send(response);
                }
            }
        }
    }

    /// Handle a request that completes synchronously.
    fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let method = request.method.clone();
        match method.as_str() {
            "initialize" => Some(self.handle_initialize(request.id)),
            "initialized" | "notifications/initialized" => {
                request.id.map(|id| JsonRpcResponse::success(Some(id), json!({})))
            }
            "ping" => Some(JsonRpcResponse::success(request.id, json!({}))),
            "tools/list" => Some(self.handle_tools_list(request.id)),
            method if request.id.is_none() => {
                debug!("Ignoring notification {}", method);
                None
            }
            method => Some(JsonRpcResponse::error(
                request.id,
                METHOD_NOT_FOUND,
                &format!("Method not found: {}", method),
            )),
        }
    }

    /// Handle initialize request.
    fn handle_initialize(&self, id: Option<Value>) -> JsonRpcResponse {
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

        JsonRpcResponse::from_serializable(id, &result)
    }

    /// Handle tools/list request.
    fn handle_tools_list(&self, id: Option<Value>) -> JsonRpcResponse {
        JsonRpcResponse::from_serializable(id, &ToolsListResult { tools: get_tools() })
    }

    async fn handle_cancelled(&self, params: Option<Value>) {
        let params: CancelledParams = match params.map(serde_json::from_value) {
            Some(Ok(params)) => params,
            _ => {
                warn!("Ignoring malformed cancellation");
                return;
            }
        };

        let key = params.request_id.to_string();
        match self.in_flight.lock().await.remove(&key) {
            Some(handle) => {
                handle.abort();
                info!(
                    "Cancelled request {} ({})",
                    key,
                    params.reason.as_deref().unwrap_or("no reason given")
                );
            }
            None => debug!("Cancellation for unknown or finished request {}", key),
        }
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

        let result = match params.name.as_str() {
            CREATE_PPT_FROM_TEXT => self.tool_create_ppt(params.arguments).await,
            GET_YOUTUBE_TRANSCRIPT => self.tool_get_transcript(params.arguments).await,
            name => {
                return JsonRpcResponse::error(id, METHOD_NOT_FOUND, &format!("Tool not found: {}", name))
            }
        };

        JsonRpcResponse::from_serializable(id, &result)
    }

    /// Create presentation tool.
    async fn tool_create_ppt(&self, args: Option<Value>) -> ToolCallResult {
        let inputs = args
            .and_then(|a| serde_json::from_value::<CreatePptArgs>(a).ok())
            .and_then(CreatePptArgs::into_inputs);
        let (text, account_id) = match inputs {
            Some(inputs) => inputs,
            None => return error_result(&json!({ "error": "Missing parameters." })),
        };

        match self.orchestrator.create_presentation(&text, &account_id).await {
            Ok(result) => ToolCallResult::text(success_payload(&result).to_string()),
            Err(e) => {
                warn!("create_ppt_from_text failed: {}", e);
                error_result(&error_payload(&e))
            }
        }
    }

    /// Transcript tool.
    async fn tool_get_transcript(&self, args: Option<Value>) -> ToolCallResult {
        let url = match args.and_then(|a| serde_json::from_value::<TranscriptArgs>(a).ok()) {
            Some(TranscriptArgs { yt_url: Some(url) }) if !url.trim().is_empty() => url,
            _ => return error_result(&json!({ "error": "Missing YouTube URL parameter." })),
        };

        match self.orchestrator.fetch_transcript(&url).await {
            Ok(transcript) => ToolCallResult::text(json!({ "transcript": transcript }).to_string()),
            Err(SlidesError::InvalidInput(message)) => error_result(&json!({ "error": message })),
            Err(e) => {
                warn!("get_youtube_transcript failed: {}", e);
                error_result(&error_payload(&e))
            }
        }
    }
}

async fn write_responses<W>(mut rx: mpsc::UnboundedReceiver<JsonRpcResponse>, mut writer: W) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    while let Some(response) = rx.recv().await {
        let mut line = serde_json::to_string(&response)?;
        line.push('\n');
        writer.write_all(line.as_bytes()).await?;
        writer.flush().await?;
    }
    Ok(())
}

fn error_result(payload: &Value) -> ToolCallResult {
    ToolCallResult::error(payload.to_string())
}

/// Render a successful generation for the calling agent.
fn success_payload(result: &GenerationResult) -> Value {
    let mut payload = json!({ "message": "Presentation created!" });
    if let (Some(obj), Ok(Value::Object(fields))) = (payload.as_object_mut(), serde_json::to_value(result)) {
        obj.extend(fields);
        if let Some(url) = &result.presentation_url {
            obj.insert("pptUrl".to_string(), json!(url));
        }
    }
    payload
}

/// Render a terminal error as `{ error, kind, upgradeUrl? }`.
fn error_payload(err: &SlidesError) -> Value {
    let mut payload = json!({
        "error": err.to_string(),
        "kind": err.kind(),
    });
    if let (Some(obj), Some(url)) = (payload.as_object_mut(), err.upgrade_url()) {
        obj.insert("upgradeUrl".to_string(), json!(url));
    }
    payload
}
