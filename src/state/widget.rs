//! Synchronous core of the widget controller.
//!
//! DESIGN
//! ======
//! Every state transition is a plain `&mut self` method so it runs inside a
//! single signal update. In particular, placeholder removal and outcome
//! append happen in one `settle` call and can never be observed apart.
//! The async half (sending the message) lives in `crate::controller`.

#[cfg(test)]
#[path = "widget_test.rs"]
mod widget_test;

use super::panel::{PanelPhase, PanelState};
use super::transcript::{ConversationEntry, DisplayContent, EntryHandle, Transcript};
use crate::config::WidgetCopy;

/// The in-flight exchange. At most one exists.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct PendingExchange {
    id: u64,
    placeholder: EntryHandle,
}

/// Issued for an accepted submission; redeemed by [`WidgetState::settle`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExchangeTicket {
    id: u64,
    message: String,
}

impl ExchangeTicket {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Trimmed visitor message to send.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Why a submission was ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SubmitRejection {
    #[error("panel is closed")]
    Closed,
    #[error("message is empty")]
    Empty,
    #[error("an exchange is already pending")]
    Pending,
}

/// Everything the chat panel renders, plus the exchange bookkeeping.
#[derive(Clone, Debug, Default)]
pub struct WidgetState {
    pub panel: PanelState,
    pub transcript: Transcript,
    /// Current contents of the message input.
    pub input: String,
    /// Bumped whenever the input should take focus.
    pub focus_seq: u64,
    pending: Option<PendingExchange>,
    next_exchange: u64,
    auto_open_fired: bool,
}

impl WidgetState {
    pub fn phase(&self) -> PanelPhase {
        PanelPhase::of(self.panel, self.pending.is_some())
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn auto_open_fired(&self) -> bool {
        self.auto_open_fired
    }

    /// Show the panel and move focus to the input, greeting once per widget
    /// lifetime.
    ///
    /// Returns `false` if the panel was already visible.
    pub fn open(&mut self, copy: &WidgetCopy) -> bool {
        if !self.reveal(copy) {
            return false;
        }
        self.focus_seq += 1;
        true
    }

    /// Show the panel and greet if needed, leaving focus where it is.
    fn reveal(&mut self, copy: &WidgetCopy) -> bool {
        if self.panel.visible {
            return false;
        }
        self.panel.visible = true;
        if !self.panel.has_greeted && self.transcript.is_empty() {
            self.transcript.append(ConversationEntry::assistant_text(copy.greeting.clone()));
        }
        self.panel.has_greeted = true;
        true
    }

    /// Hide the panel. A pending exchange keeps running and settles into the
    /// transcript while hidden.
    pub fn close(&mut self) -> bool {
        let was_visible = self.panel.visible;
        self.panel.visible = false;
        was_visible
    }

    /// Flip visibility; returns the new visibility.
    pub fn toggle(&mut self, copy: &WidgetCopy) -> bool {
        if self.panel.visible {
            self.close();
        } else {
            self.open(copy);
        }
        self.panel.visible
    }

    /// One-shot timed open. Returns `true` only the first time.
    ///
    /// Unlike [`open`](Self::open) this never requests focus; the visitor may
    /// be typing elsewhere on the page.
    pub fn auto_open(&mut self, copy: &WidgetCopy) -> bool {
        if self.auto_open_fired {
            return false;
        }
        self.auto_open_fired = true;
        self.reveal(copy);
        true
    }

    /// Accept a visitor message and start an exchange.
    ///
    /// Appends the visitor entry, clears the input and appends the
    /// placeholder, in that order. The caller sends the ticket's message and
    /// hands the result to [`settle`](Self::settle).
    ///
    /// # Errors
    ///
    /// Returns a [`SubmitRejection`] without touching any state when the panel
    /// is closed, the trimmed message is empty, or an exchange is pending.
    pub fn begin_submit(&mut self, raw: &str, copy: &WidgetCopy) -> Result<ExchangeTicket, SubmitRejection> {
        if self.pending.is_some() {
            return Err(SubmitRejection::Pending);
        }
        if !self.panel.visible {
            return Err(SubmitRejection::Closed);
        }
        let message = raw.trim();
        if message.is_empty() {
            return Err(SubmitRejection::Empty);
        }

        self.transcript.append(ConversationEntry::visitor(message));
        self.input.clear();
        let placeholder = self.transcript.append(ConversationEntry::placeholder(copy.thinking.clone()));

        let id = self.next_exchange;
        self.next_exchange += 1;
        self.pending = Some(PendingExchange { id, placeholder });
        Ok(ExchangeTicket { id, message: message.to_owned() })
    }

    /// Finish the exchange for `ticket`: retract the placeholder, then append
    /// the single outcome entry.
    ///
    /// Returns `None` if `ticket` does not match the pending exchange.
    pub fn settle(&mut self, ticket: &ExchangeTicket, content: DisplayContent) -> Option<EntryHandle> {
        let Some(pending) = self.pending.take_if(|p| p.id == ticket.id) else {
            log::warn!("bv-chat: ignoring settle for stale exchange {}", ticket.id);
            return None;
        };
        self.transcript.remove(pending.placeholder);
        Some(self.transcript.append(ConversationEntry::assistant(content)))
    }
}
