//! Network layer: the chat endpoint client and its wire types.

pub mod api;
pub mod types;
