use anyhow::Result;
use reqwest::Client;
use std::future::Future;
use std::pin::Pin;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::config::Config;
use crate::providers;

pub type CompletionFuture<'a> = Pin<Box<dyn Future<Output = Result<String>> + 'a>>;

/// Seam between the session and the remote endpoint so the loops can be
/// exercised without a network.
pub trait CompletionBackend {
    fn complete<'a>(
        &'a self,
        client: &'a Client,
        cfg: &'a Config,
        prompt: &'a str,
    ) -> CompletionFuture<'a>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ProviderBackend;

impl CompletionBackend for ProviderBackend {
    fn complete<'a>(
        &'a self,
        client: &'a Client,
        cfg: &'a Config,
        prompt: &'a str,
    ) -> CompletionFuture<'a> {
        Box::pin(async move { providers::openai::complete(client, cfg, prompt).await })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionTurn {
    pub text: String,
    pub elapsed: Duration,
}

/// One conversation: the transcript plus everything needed to reach the
/// completion endpoint. The transcript alternates user prompt and model
/// response and is only ever mutated here, on a successful call.
pub struct Session<'a, B = ProviderBackend> {
    client: &'a Client,
    cfg: &'a Config,
    transcript: Vec<String>,
    backend: B,
}

impl<'a> Session<'a, ProviderBackend> {
    pub fn new(client: &'a Client, cfg: &'a Config) -> Self {
        Self::with_backend(client, cfg, ProviderBackend)
    }
}

impl<'a, B> Session<'a, B> {
    pub fn with_backend(client: &'a Client, cfg: &'a Config, backend: B) -> Self {
        Self {
            client,
            cfg,
            transcript: Vec::new(),
            backend,
        }
    }

    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    fn request_payload(&self, prompt: &str) -> String {
        let mut parts: Vec<&str> = self.transcript.iter().map(String::as_str).collect();
        parts.push(prompt);
        parts.join("\n")
    }
}

impl<'a, B: CompletionBackend> Session<'a, B> {
    /// Sends the whole transcript plus `prompt` to the completion endpoint.
    /// On success the prompt and the trimmed response are appended to the
    /// transcript; on failure the transcript is left untouched and the
    /// failed turn stays invisible to future context.
    pub async fn respond(&mut self, prompt: &str) -> Result<CompletionTurn> {
        let payload = self.request_payload(prompt);
        debug!(
            engine = %self.cfg.engine,
            transcript_entries = self.transcript.len(),
            payload_len = payload.len(),
            "sending completion request"
        );

        let started = Instant::now();
        let raw = self.backend.complete(self.client, self.cfg, &payload).await?;
        let elapsed = started.elapsed();

        let text = raw.trim().to_string();
        debug!(
            response_len = text.len(),
            elapsed_ms = elapsed.as_millis() as u64,
            "received completion response"
        );
        self.transcript.push(prompt.to_string());
        self.transcript.push(text.clone());
        Ok(CompletionTurn { text, elapsed })
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use anyhow::anyhow;
    use reqwest::Client;
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::{CompletionBackend, CompletionFuture};
    use crate::config::Config;

    #[derive(Debug)]
    enum StubOutcome {
        Ok(String),
        Err(String),
    }

    /// Records every payload it receives and replays a fixed outcome. The
    /// call log is shared so tests can inspect it after handing the backend
    /// to a session.
    #[derive(Debug)]
    pub struct StubBackend {
        calls: Rc<RefCell<Vec<String>>>,
        outcome: StubOutcome,
    }

    impl StubBackend {
        pub fn ok(content: impl Into<String>) -> Self {
            Self {
                calls: Rc::new(RefCell::new(Vec::new())),
                outcome: StubOutcome::Ok(content.into()),
            }
        }

        pub fn err(message: impl Into<String>) -> Self {
            Self {
                calls: Rc::new(RefCell::new(Vec::new())),
                outcome: StubOutcome::Err(message.into()),
            }
        }

        pub fn calls(&self) -> Rc<RefCell<Vec<String>>> {
            Rc::clone(&self.calls)
        }
    }

    impl CompletionBackend for StubBackend {
        fn complete<'a>(
            &'a self,
            _client: &'a Client,
            _cfg: &'a Config,
            prompt: &'a str,
        ) -> CompletionFuture<'a> {
            self.calls.borrow_mut().push(prompt.to_string());
            let result = match &self.outcome {
                StubOutcome::Ok(content) => Ok(content.clone()),
                StubOutcome::Err(message) => Err(anyhow!(message.clone())),
            };
            Box::pin(async move { result })
        }
    }

    pub fn test_config() -> Config {
        Config {
            interactive: false,
            engine: "text-davinci-003".to_string(),
            max_tokens: 800,
            temperature: 0.8,
            mode: 1,
            verbosity: 2,
            top_p: 1.0,
            num_suggestions: 5,
            api_key: Some("sk-test".to_string()),
            api_base_url: "http://localhost:9999".to_string(),
        }
    }
}
