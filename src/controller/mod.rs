//! Widget controller: drives one chat exchange at a time.
//!
//! SYSTEM CONTEXT
//! ==============
//! The controller is built from a [`ChatClient`], a [`StateCell`] holding the
//! [`WidgetState`], and the widget configuration. In the browser the cell is
//! the `RwSignal` the panel renders from; tests use `Rc<RefCell<_>>` and a
//! fake client.
//!
//! ERROR HANDLING
//! ==============
//! Nothing escapes `submit`. Transport and application failures are logged
//! and end as exactly one transcript entry, like every other outcome.


pub mod dispatch;

use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;
use std::sync::Arc;

use leptos::prelude::{RwSignal, Update};

use crate::config::WidgetConfig;
use crate::net::api::ChatClient;
use crate::net::types::ChatReply;
use crate::state::transcript::EntryHandle;
use crate::state::widget::{SubmitRejection, WidgetState};
use dispatch::Outcome;

/// Shared, mutable home of the widget state.
pub trait StateCell {
    /// Run `f` against the state. Returns `None` if the state no longer exists.
    fn with_state<R>(&self, f: impl FnOnce(&mut WidgetState) -> R) -> Option<R>;
}

impl StateCell for RwSignal<WidgetState> {
    fn with_state<R>(&self, f: impl FnOnce(&mut WidgetState) -> R) -> Option<R> {
        self.try_update(f)
    }
}

impl StateCell for Rc<RefCell<WidgetState>> {
    fn with_state<R>(&self, f: impl FnOnce(&mut WidgetState) -> R) -> Option<R> {
        Some(f(&mut self.borrow_mut()))
    }
}

/// How a submission ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Nothing was appended and the client was not called.
    Ignored(SubmitRejection),
    /// The exchange settled into this transcript entry.
    Settled(EntryHandle),
    /// The state went away before the exchange could start or settle.
    Dropped,
}

#[derive(Clone)]
pub struct ChatController<C, S> {
    client: C,
    state: S,
    config: Arc<WidgetConfig>,
}

impl<C: ChatClient, S: StateCell> ChatController<C, S> {
    pub fn new(client: C, state: S, config: Arc<WidgetConfig>) -> Self {
        Self { client, state, config }
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn open(&self) -> bool {
        self.state.with_state(|w| w.open(&self.config.copy)).unwrap_or(false)
    }

    pub fn close(&self) -> bool {
        self.state.with_state(WidgetState::close).unwrap_or(false)
    }

    pub fn toggle(&self) -> bool {
        self.state.with_state(|w| w.toggle(&self.config.copy)).unwrap_or(false)
    }

    /// Open the panel after `delay` resolves, once per widget lifetime.
    pub async fn run_auto_open(&self, delay: impl Future<Output = ()>) -> bool {
        delay.await;
        let fired = self.state.with_state(|w| w.auto_open(&self.config.copy)).unwrap_or(false);
        if fired {
            log::debug!("bv-chat: auto-open fired");
        }
        fired
    }

    pub fn set_input(&self, text: String) {
        self.state.with_state(|w| w.input = text);
    }

    /// Submit whatever is currently in the input.
    pub async fn submit_input(&self) -> SubmitOutcome {
        let Some(raw) = self.state.with_state(|w| w.input.clone()) else {
            return SubmitOutcome::Dropped;
        };
        self.submit(&raw).await
    }

    /// Run one exchange for `raw`: echo, placeholder, call, settle.
    pub async fn submit(&self, raw: &str) -> SubmitOutcome {
        let copy = &self.config.copy;
        let Some(begun) = self.state.with_state(|w| w.begin_submit(raw, copy)) else {
            return SubmitOutcome::Dropped;
        };
        let ticket = match begun {
            Ok(ticket) => ticket,
            Err(rejection) => {
                log::debug!("bv-chat: submission ignored: {rejection}");
                return SubmitOutcome::Ignored(rejection);
            }
        };
        log::info!("bv-chat: exchange {} sent ({} chars)", ticket.id(), ticket.message().chars().count());

        let reply = ChatReply::from_result(self.client.send(ticket.message()).await);
        log::debug!("bv-chat: exchange {} replied with {}", ticket.id(), reply.kind());
        match &reply {
            ChatReply::TransportFailure(e) => {
                log::warn!("bv-chat: exchange {} failed: {e}", ticket.id());
            }
            ChatReply::ApplicationFailure { reason } => {
                log::warn!(
                    "bv-chat: exchange {} rejected by service: {}",
                    ticket.id(),
                    reason.as_deref().unwrap_or("no reason given")
                );
            }
            ChatReply::Success { .. } => {}
        }

        let outcome = Outcome::for_reply(reply);
        log::debug!("bv-chat: exchange {} settled as {}", ticket.id(), outcome.kind());
        let content = outcome.render(&self.config);

        match self.state.with_state(|w| w.settle(&ticket, content)).flatten() {
            Some(entry) => SubmitOutcome::Settled(entry),
            None => SubmitOutcome::Dropped,
        }
    }
}
