//! Client-side widget state.
//!
//! DESIGN
//! ======
//! `transcript` and `panel` are small leaf models; `widget` composes them
//! into the state machine the chat panel renders from.

pub mod panel;
pub mod transcript;
pub mod widget;
