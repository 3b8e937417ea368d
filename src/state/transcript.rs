//! Ordered conversation transcript for one widget session.
//!
//! DESIGN
//! ======
//! Append-only except for `remove`, which exists to retract the pending
//! placeholder. Every mutation bumps `revision`; the panel watches it to keep
//! the message list scrolled to the newest entry.

#[cfg(test)]
#[path = "transcript_test.rs"]
mod transcript_test;

/// Who an entry is attributed to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Speaker {
    Visitor,
    Assistant,
}

impl Speaker {
    /// CSS modifier used by the message list.
    pub fn css_modifier(self) -> &'static str {
        match self {
            Self::Visitor => "user",
            Self::Assistant => "bot",
        }
    }
}

/// A rendered product link.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProductLink {
    /// `"{name} — ${price}"`.
    pub label: String,
    pub href: String,
    pub title: Option<String>,
    pub image: Option<String>,
}

/// Non-empty list of product links.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProductList(Vec<ProductLink>);

impl ProductList {
    /// Returns `None` for an empty list; absence is rendered as text instead.
    pub fn new(links: Vec<ProductLink>) -> Option<Self> {
        (!links.is_empty()).then_some(Self(links))
    }

    pub fn links(&self) -> &[ProductLink] {
        &self.0
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DisplayContent {
    Text(String),
    Products(ProductList),
}

impl DisplayContent {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Products(_) => None,
        }
    }
}

/// One line of the conversation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConversationEntry {
    pub speaker: Speaker,
    pub content: DisplayContent,
    /// Transient "thinking" entry shown while an exchange is pending.
    pub placeholder: bool,
}

impl ConversationEntry {
    pub fn visitor(text: impl Into<String>) -> Self {
        Self { speaker: Speaker::Visitor, content: DisplayContent::Text(text.into()), placeholder: false }
    }

    pub fn assistant(content: DisplayContent) -> Self {
        Self { speaker: Speaker::Assistant, content, placeholder: false }
    }

    pub fn assistant_text(text: impl Into<String>) -> Self {
        Self::assistant(DisplayContent::Text(text.into()))
    }

    pub fn placeholder(text: impl Into<String>) -> Self {
        Self { placeholder: true, ..Self::assistant_text(text) }
    }
}

/// Opaque reference to an appended entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EntryHandle(u64);

impl EntryHandle {
    /// Stable key for keyed list rendering.
    pub fn key(self) -> u64 {
        self.0
    }
}

#[derive(Clone, Debug, Default)]
pub struct Transcript {
    entries: Vec<(EntryHandle, ConversationEntry)>,
    next_handle: u64,
    revision: u64,
}

impl Transcript {
    /// Append `entry` at the end and return its handle.
    pub fn append(&mut self, entry: ConversationEntry) -> EntryHandle {
        let handle = EntryHandle(self.next_handle);
        self.next_handle += 1;
        self.entries.push((handle, entry));
        self.revision += 1;
        handle
    }

    /// Remove a previously appended entry. Returns `false` if it was already gone.
    pub fn remove(&mut self, handle: EntryHandle) -> bool {
        let Some(pos) = self.entries.iter().position(|(h, _)| *h == handle) else {
            return false;
        };
        self.entries.remove(pos);
        self.revision += 1;
        true
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntryHandle, &ConversationEntry)> {
        self.entries.iter().map(|(h, e)| (*h, e))
    }

    pub fn last(&self) -> Option<&ConversationEntry> {
        self.entries.last().map(|(_, e)| e)
    }

    /// Mutation counter, bumped on every append and remove.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}
