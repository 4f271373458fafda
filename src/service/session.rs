//! Long-running JSON-lines session.
//!
//! Each input line is one request object tagged by `op`:
//!
//! ```text
//! {"id": 1, "op": "infer", "prompt": "hello", "model": "qwen3"}
//! {"id": 2, "op": "explain", "code": "def f():\n    pass\n"}
//! {"id": 3, "op": "analyze", "code": "print(x)\n"}
//! {"id": 4, "op": "stats"}
//! ```
//!
//! Requests run as independent tasks against one shared service, so every
//! request in the session sees the same response cache. Replies are written one
//! per line in completion order and echo the request `id` when one was given.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::task::JoinSet;

use super::{AssistantService, ModelChoice};
use crate::gateway::ModelGateway;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Request {
    Explain {
        code: String,
        #[serde(default)]
        model: ModelChoice,
    },
    Infer {
        prompt: String,
        #[serde(default)]
        model: ModelChoice,
    },
    Analyze {
        code: String,
    },
    Stats,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct Envelope {
    #[serde(default)]
    id: Option<Value>,
    #[serde(flatten)]
    request: Request,
}

/// One output line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reply {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Reply {
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            id,
            ok: true,
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(id: Option<Value>, error: impl Into<String>) -> Self {
        Self {
            id,
            ok: false,
            result: None,
            error: Some(error.into()),
        }
    }
}

/// Parse and execute a single request line.
pub async fn handle_line<G: ModelGateway>(service: &AssistantService<G>, line: &str) -> Reply {
    let envelope: Envelope = match serde_json::from_str(line) {
        Ok(envelope) => envelope,
        Err(e) => {
            log::warn!("Rejected request line: {}", e);
            let id = serde_json::from_str::<Value>(line)
                .ok()
                .and_then(|value| value.get("id").cloned());
            return Reply::failure(id, format!("Invalid request: {e}"));
        }
    };

    let Envelope { id, request } = envelope;
    let outcome = match request {
        Request::Explain { code, model } => service
            .explain(&code, model)
            .await
            .map_err(|e| e.to_string())
            .and_then(|r| to_result(&r)),
        Request::Infer { prompt, model } => service
            .infer(&prompt, model)
            .await
            .map_err(|e| e.to_string())
            .and_then(|r| to_result(&r)),
        Request::Analyze { code } => to_result(&service.analyze(&code)),
        Request::Stats => to_result(&service.cache_stats()),
    };

    match outcome {
        Ok(result) => Reply::success(id, result),
        Err(error) => Reply::failure(id, error),
    }
}

fn to_result<T: Serialize>(value: &T) -> Result<Value, String> {
    serde_json::to_value(value).map_err(|e| format!("Failed to encode response: {e}"))
}

/// Serve requests from `input` until end of input, writing replies to `output`.
///
/// Returns the number of replies written. Blank lines are skipped.
pub async fn serve<G, R, W>(
    service: Arc<AssistantService<G>>,
    input: R,
    mut output: W,
) -> std::io::Result<usize>
where
    G: ModelGateway + 'static,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    let mut tasks = JoinSet::new();
    let mut reading = true;
    let mut written = 0;

    loop {
        tokio::select! {
            line = lines.next_line(), if reading => match line? {
                Some(line) if line.trim().is_empty() => {}
                Some(line) => {
                    let service = Arc::clone(&service);
                    tasks.spawn(async move { handle_line(&service, &line).await });
                }
                None => reading = false,
            },
            Some(joined) = tasks.join_next(), if !tasks.is_empty() => {
                let reply = joined
                    .unwrap_or_else(|e| Reply::failure(None, format!("Request task failed: {e}")));
                write_reply(&mut output, &reply).await?;
                written += 1;
            },
            else => break,
        }
    }

    log::info!("Session closed after {} requests", written);
    Ok(written)
}

async fn write_reply<W: AsyncWrite + Unpin>(output: &mut W, reply: &Reply) -> std::io::Result<()> {
    let mut line = serde_json::to_string(reply).map_err(std::io::Error::other)?;
    line.push('\n');
    output.write_all(line.as_bytes()).await?;
    output.flush().await
}
