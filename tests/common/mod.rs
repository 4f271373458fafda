// Test utility module for code-assist integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use code_assist::cache::{ManualClock, TtlCache};
use code_assist::gateway::{GatewayError, GenerationParams, ModelGateway};
use code_assist::service::AssistantService;
use code_assist::AppConfig;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

/// A recorded gateway invocation
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayCall {
    pub model_id: String,
    pub prompt: String,
    pub params: GenerationParams,
}

/// Gateway that replays queued results, then falls back to echoing the prompt
#[derive(Default)]
pub struct FakeGateway {
    replies: Mutex<VecDeque<Result<String, GatewayError>>>,
    calls: Mutex<Vec<GatewayCall>>,
}

impl FakeGateway {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_replies(replies: Vec<Result<String, GatewayError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait]
impl ModelGateway for FakeGateway {
    async fn invoke(
        &self,
        model_id: &str,
        prompt: &str,
        params: GenerationParams,
    ) -> Result<String, GatewayError> {
        self.calls.lock().push(GatewayCall {
            model_id: model_id.to_string(),
            prompt: prompt.to_string(),
            params,
        });
        self.replies
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(format!("echo: {prompt}")))
    }
}

/// Service wired to a fake gateway and a manually driven clock
pub struct TestHarness {
    pub service: AssistantService<Arc<FakeGateway>>,
    pub gateway: Arc<FakeGateway>,
    pub clock: Arc<ManualClock>,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_gateway(AppConfig::default(), FakeGateway::new())
    }

    pub fn with_gateway(config: AppConfig, gateway: Arc<FakeGateway>) -> Self {
        let clock = Arc::new(ManualClock::starting_now());
        let cache = Arc::new(TtlCache::with_clock(
            config.cache.ttl_seconds,
            config.cache.max_items,
            clock.clone(),
        ));
        Self {
            service: AssistantService::new(config, gateway.clone(), cache),
            gateway,
            clock,
        }
    }
}

/// Chat-completions body carrying `content` as the generated text
pub fn chat_completion_body(content: &str) -> String {
    serde_json::json!({
        "choices": [{"message": {"role": "assistant", "content": content}}]
    })
    .to_string()
}

/// Local HTTP endpoint answering each connection with the next scripted
/// `(status, body)` pair, then 500 once the script runs out
pub struct StubEndpoint {
    pub url: String,
    requests: Arc<AtomicUsize>,
}

impl StubEndpoint {
    pub fn start(responses: Vec<(u16, String)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!(
            "http://{}/v1/chat/completions",
            listener.local_addr().unwrap()
        );
        let requests = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&requests);

        thread::spawn(move || {
            let mut script = responses.into_iter();
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { break };
                read_http_request(&mut stream);
                counter.fetch_add(1, Ordering::SeqCst);
                let (status, body) = script
                    .next()
                    .unwrap_or((500, "stub script exhausted".to_string()));
                let response = format!(
                    "HTTP/1.1 {status} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes());
                let _ = stream.flush();
            }
        });

        Self { url, requests }
    }

    /// Number of requests answered so far
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

fn read_http_request(stream: &mut TcpStream) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let Ok(n) = stream.read(&mut chunk) else { return };
        if n == 0 {
            return;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..end]).to_ascii_lowercase();
            let length = head
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|value| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + length {
                return;
            }
        }
    }
}
