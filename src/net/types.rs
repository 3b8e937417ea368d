//! Wire DTOs for the chat endpoint and the typed reply built from them.
//!
//! DESIGN
//! ======
//! `ChatResponse` mirrors the loosely-typed JSON the service sends.
//! `ChatReply` folds it, together with transport errors, into a closed set of
//! variants so response dispatch can match exhaustively.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ChatError;

/// Request body for `POST {endpoint}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
}

/// Raw response body from the chat endpoint.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ChatResponse {
    /// Application-level success flag. Missing means failure.
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub text: Option<String>,
    /// Malformed items are skipped rather than failing the whole body.
    #[serde(default, deserialize_with = "deserialize_products")]
    pub products: Option<Vec<ProductRef>>,
    /// Failure reason reported by the service, if any.
    #[serde(default)]
    pub error: Option<String>,
}

/// A product matched by the chat service.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ProductRef {
    pub id: ProductId,
    #[serde(rename = "nombre")]
    pub display_name: String,
    #[serde(rename = "precio", deserialize_with = "deserialize_price")]
    pub price: f64,
    /// Short description, shown as the link title.
    #[serde(rename = "nota", default)]
    pub note: Option<String>,
    /// Thumbnail URL.
    #[serde(rename = "imagen", default)]
    pub image: Option<String>,
}

/// Product identifier; the service sends database ids but strings are accepted.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Settled result of one chat exchange.
#[derive(Clone, Debug, PartialEq)]
pub enum ChatReply {
    Success { text: Option<String>, products: Vec<ProductRef> },
    ApplicationFailure { reason: Option<String> },
    TransportFailure(ChatError),
}

impl ChatReply {
    /// Fold a client result into a reply variant.
    pub fn from_result(result: Result<ChatResponse, ChatError>) -> Self {
        match result {
            Ok(response) => Self::from(response),
            Err(e) => Self::TransportFailure(e),
        }
    }

    /// Short label for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Success { .. } => "success",
            Self::ApplicationFailure { .. } => "application_failure",
            Self::TransportFailure(_) => "transport_failure",
        }
    }
}

impl From<ChatResponse> for ChatReply {
    fn from(response: ChatResponse) -> Self {
        if !response.ok {
            return Self::ApplicationFailure { reason: response.error };
        }
        Self::Success {
            // An empty string is the same as no text at all.
            text: response.text.filter(|t| !t.is_empty()),
            products: response.products.unwrap_or_default(),
        }
    }
}

fn deserialize_products<'de, D>(deserializer: D) -> Result<Option<Vec<ProductRef>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(items) = Option::<Vec<serde_json::Value>>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let products = items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<ProductRef>(item) {
            Ok(product) => Some(product),
            Err(e) => {
                log::warn!("bv-chat: skipping malformed product: {e}");
                None
            }
        })
        .collect();
    Ok(Some(products))
}

fn deserialize_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Number(number) => {
            number.as_f64().ok_or_else(|| D::Error::custom("price out of range"))
        }
        serde_json::Value::String(raw) => {
            raw.trim().parse::<f64>().map_err(|_| D::Error::custom(format!("invalid price string: {raw}")))
        }
        _ => Err(D::Error::custom("expected number or numeric string")),
    }
}
