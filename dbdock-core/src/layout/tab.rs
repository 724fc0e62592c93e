//! Tabs hosted by leaf panes
//!
//! A tab is one content view instance (a table viewer, a query editor,
//! an AI chat, a terminal). The layout engine only stores the tab's kind,
//! title and a small per-kind payload; rendering is resolved through the
//! [`ContentRegistry`](crate::registry::ContentRegistry).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::types::{TabId, TerminalSessionId};

/// Kind of content a tab shows.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TabKind {
    /// Table data browser.
    Data,
    /// SQL/query editor.
    Query,
    /// AI chat.
    Ai,
    /// Shell terminal backed by a terminal session.
    Terminal,
    /// Database console (e.g. redis-cli, mongo shell).
    Console,
    /// A kind registered by an extension.
    Other(String),
}

impl TabKind {
    /// Returns the tag of this kind.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Data => "data",
            Self::Query => "query",
            Self::Ai => "ai",
            Self::Terminal => "terminal",
            Self::Console => "console",
            Self::Other(tag) => tag,
        }
    }

    /// Returns true for terminal tabs, whose payload owns an external session.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Terminal)
    }
}

impl From<String> for TabKind {
    /// Built-in tags match case-insensitively; any other tag is kept as given.
    fn from(tag: String) -> Self {
        const BUILTIN: [TabKind; 5] = [
            TabKind::Data,
            TabKind::Query,
            TabKind::Ai,
            TabKind::Terminal,
            TabKind::Console,
        ];
        BUILTIN
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(&tag))
            .unwrap_or(Self::Other(tag))
    }
}

impl From<TabKind> for String {
    fn from(kind: TabKind) -> Self {
        match kind {
            TabKind::Other(tag) => tag,
            other => other.as_str().to_owned(),
        }
    }
}

impl FromStr for TabKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.to_owned()))
    }
}

impl fmt::Display for TabKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-kind state carried by a tab.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TabPayload {
    /// No payload.
    #[default]
    None,
    /// Reference to a table (or collection) of the connection.
    Table {
        /// Schema or database the table lives in.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        schema: Option<String>,
        /// Table name.
        table: String,
    },
    /// Query editor contents.
    Query {
        /// Current editor text.
        text: String,
    },
    /// Terminal session backing the tab.
    Terminal {
        /// Session id, `None` until a session was created.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        session: Option<TerminalSessionId>,
    },
    /// AI chat conversation.
    Chat {
        /// Conversation id, if one was started.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        conversation: Option<String>,
    },
}

impl TabPayload {
    /// Returns the terminal session referenced by this payload.
    #[must_use]
    pub const fn terminal_session(&self) -> Option<TerminalSessionId> {
        match self {
            Self::Terminal { session } => *session,
            _ => None,
        }
    }
}

/// A single content view owned by exactly one leaf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tab {
    /// Workspace-unique identifier.
    pub id: TabId,
    /// Content kind.
    pub kind: TabKind,
    /// Title shown in the tab strip.
    pub title: String,
    /// Kind-specific state.
    #[serde(default)]
    pub payload: TabPayload,
}

impl Tab {
    /// Creates a tab with a fresh id and no payload.
    #[must_use]
    pub fn new(kind: TabKind, title: impl Into<String>) -> Self {
        Self {
            id: TabId::new(),
            kind,
            title: title.into(),
            payload: TabPayload::None,
        }
    }

    /// Sets the payload.
    #[must_use]
    pub fn with_payload(mut self, payload: TabPayload) -> Self {
        self.payload = payload;
        self
    }

    /// Returns the terminal session owned by this tab, if any.
    ///
    /// Only terminal tabs own a session; a terminal payload on any other
    /// kind is ignored.
    #[must_use]
    pub const fn terminal_session(&self) -> Option<TerminalSessionId> {
        if self.kind.is_terminal() {
            self.payload.terminal_session()
        } else {
            None
        }
    }

    /// Merges a patch into this tab.
    pub fn apply_patch(&mut self, patch: TabPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(payload) = patch.payload {
            self.payload = payload;
        }
    }
}

/// Initial values for a new tab.
///
/// Missing fields are filled from the content registry defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabInit {
    /// Title, defaults to the registry's title for the kind.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Payload, defaults to [`TabPayload::None`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<TabPayload>,
}

impl TabInit {
    /// Creates an init with only a title.
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            payload: None,
        }
    }

    /// Sets the payload.
    #[must_use]
    pub fn with_payload(mut self, payload: TabPayload) -> Self {
        self.payload = Some(payload);
        self
    }
}

/// Fields to merge into an existing tab. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabPatch {
    /// New title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<TabPayload>,
}

impl TabPatch {
    /// Creates a patch changing only the title.
    #[must_use]
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            payload: None,
        }
    }

    /// Creates a patch changing only the payload.
    #[must_use]
    pub fn payload(payload: TabPayload) -> Self {
        Self {
            title: None,
            payload: Some(payload),
        }
    }

    /// Returns true if the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.payload.is_none()
    }
}
