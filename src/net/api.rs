//! Chat endpoint client.
//!
//! Client-side (csr): real HTTP calls via `gloo-net`, bounded by a
//! `gloo-timers` timeout. Native builds have no transport and every call
//! fails with [`ChatError::Unavailable`].
//!
//! ERROR HANDLING
//! ==============
//! Network errors, unparseable bodies and timeouts all surface as
//! `ChatError`; the controller renders them as the transport-failure outcome.
//! A non-2xx status with a parseable body is not a transport failure: the
//! service reports its own failures as `{ ok: false, error }` JSON.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::future::Future;
use std::pin::pin;

use futures::future::{Either, select};

#[cfg(feature = "csr")]
use super::types::ChatRequest;
use super::types::ChatResponse;
use crate::config::WidgetConfig;
use crate::error::ChatError;

/// The single capability the widget needs from the remote chat service.
#[allow(async_fn_in_trait)]
pub trait ChatClient {
    /// Send one visitor message and wait for the structured response.
    ///
    /// # Errors
    ///
    /// Returns a [`ChatError`] when the call does not produce a chat response.
    async fn send(&self, message: &str) -> Result<ChatResponse, ChatError>;
}

/// HTTP implementation posting `{ message }` as JSON.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpChatClient {
    endpoint: String,
    timeout_ms: u32,
}

impl HttpChatClient {
    pub fn new(endpoint: impl Into<String>, timeout_ms: u32) -> Self {
        Self { endpoint: endpoint.into(), timeout_ms }
    }

    pub fn from_config(config: &WidgetConfig) -> Self {
        Self::new(config.endpoint.clone(), config.request_timeout_ms)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn timeout_ms(&self) -> u32 {
        self.timeout_ms
    }
}

impl ChatClient for HttpChatClient {
    async fn send(&self, message: &str) -> Result<ChatResponse, ChatError> {
        #[cfg(feature = "csr")]
        {
            let timer = gloo_timers::future::TimeoutFuture::new(self.timeout_ms);
            with_timeout(post_message(&self.endpoint, message), timer, self.timeout_ms).await
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = message;
            Err(ChatError::Unavailable)
        }
    }
}

/// Race `work` against `timer`; the timer winning yields [`ChatError::Timeout`].
///
/// # Errors
///
/// Returns the error from `work`, or a timeout error carrying `timeout_ms`.
pub async fn with_timeout<T, W, D>(work: W, timer: D, timeout_ms: u32) -> Result<T, ChatError>
where
    W: Future<Output = Result<T, ChatError>>,
    D: Future<Output = ()>,
{
    let work = pin!(work);
    let timer = pin!(timer);
    match select(work, timer).await {
        Either::Left((result, _)) => result,
        Either::Right(((), _)) => Err(ChatError::Timeout { ms: timeout_ms }),
    }
}

#[cfg(feature = "csr")]
async fn post_message(endpoint: &str, message: &str) -> Result<ChatResponse, ChatError> {
    let resp = gloo_net::http::Request::post(endpoint)
        .json(&ChatRequest { message })
        .map_err(|e| ChatError::Request(e.to_string()))?
        .send()
        .await
        .map_err(|e| ChatError::Request(e.to_string()))?;
    let status = resp.status();
    let body = resp.text().await.map_err(|e| ChatError::Request(e.to_string()))?;
    decode_response(status, &body)
}

#[cfg(any(test, feature = "csr"))]
fn decode_response(status: u16, body: &str) -> Result<ChatResponse, ChatError> {
    if !(200..300).contains(&status) {
        log::warn!("bv-chat: chat endpoint answered {status}");
    }
    serde_json::from_str(body).map_err(|e| ChatError::Decode(decode_failed_message(status, &e)))
}

#[cfg(any(test, feature = "csr"))]
fn decode_failed_message(status: u16, err: &serde_json::Error) -> String {
    format!("status {status}: {err}")
}
