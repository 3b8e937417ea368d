//! Response dispatch: maps a settled [`ChatReply`] to the one entry shown
//! for the exchange.
//!
//! | reply                                   | outcome           |
//! |-----------------------------------------|-------------------|
//! | transport failure                       | `TransportError`  |
//! | `ok: false`                             | `ConnectionError` |
//! | success, text                           | `Text`            |
//! | success, whitespace-only text           | `Done`            |
//! | success, no text, products              | `Products`        |
//! | success, no text, no products           | `NoMatches`       |
//!
//! Text wins over products; a turn never renders both.

#[cfg(test)]
#[path = "dispatch_test.rs"]
mod dispatch_test;

use crate::config::WidgetConfig;
use crate::net::types::{ChatReply, ProductRef};
use crate::state::transcript::{DisplayContent, ProductLink, ProductList};
use crate::util::format::{product_href, product_label};

#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    TransportError,
    ConnectionError,
    Text(String),
    Done,
    Products(Vec<ProductRef>),
    NoMatches,
}

impl Outcome {
    pub fn for_reply(reply: ChatReply) -> Self {
        match reply {
            ChatReply::TransportFailure(_) => Self::TransportError,
            ChatReply::ApplicationFailure { .. } => Self::ConnectionError,
            ChatReply::Success { text: Some(text), .. } => {
                if text.trim().is_empty() {
                    Self::Done
                } else {
                    Self::Text(text)
                }
            }
            ChatReply::Success { text: None, products } if !products.is_empty() => Self::Products(products),
            ChatReply::Success { text: None, .. } => Self::NoMatches,
        }
    }

    /// Short label for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::TransportError => "transport_error",
            Self::ConnectionError => "connection_error",
            Self::Text(_) => "text",
            Self::Done => "done",
            Self::Products(_) => "products",
            Self::NoMatches => "no_matches",
        }
    }

    pub fn render(self, config: &WidgetConfig) -> DisplayContent {
        let copy = &config.copy;
        match self {
            Self::TransportError => DisplayContent::Text(copy.transport_error.clone()),
            Self::ConnectionError => DisplayContent::Text(copy.connection_error.clone()),
            Self::Text(text) => DisplayContent::Text(text),
            Self::Done => DisplayContent::Text(copy.done.clone()),
            Self::Products(products) => {
                let links = products.iter().map(|p| product_link(p, config)).collect();
                ProductList::new(links)
                    .map_or_else(|| DisplayContent::Text(copy.no_matches.clone()), DisplayContent::Products)
            }
            Self::NoMatches => DisplayContent::Text(copy.no_matches.clone()),
        }
    }
}

fn product_link(product: &ProductRef, config: &WidgetConfig) -> ProductLink {
    ProductLink {
        label: product_label(&product.display_name, product.price, config.thousands_separator),
        href: product_href(&config.product_path, &product.id),
        title: product.note.clone().filter(|n| !n.trim().is_empty()),
        image: product.image.clone().filter(|i| !i.trim().is_empty()),
    }
}
