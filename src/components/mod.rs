//! Leptos UI components.

pub mod chat_widget;
