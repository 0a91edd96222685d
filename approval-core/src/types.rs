use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::InputError;

/// A single comment on the reviewed item, in posting order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub author: String,
    pub body: String,
}

impl Comment {
    pub fn new(author: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            body: body.into(),
        }
    }
}

/// Identities allowed to approve or deny the item.
///
/// Identities are compared verbatim. Duplicates collapse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApproverSet(BTreeSet<String>);

impl ApproverSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, identity: &str) -> bool {
        self.0.contains(identity)
    }

    pub fn insert(&mut self, identity: impl Into<String>) -> bool {
        self.0.insert(identity.into())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Approvers in identity order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for ApproverSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Lifecycle state of the reviewed item at evaluation time.
///
/// Parsing and deserialization share one rule: case-insensitive, surrounding
/// whitespace ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum ItemState {
    #[default]
    Open,
    Closed,
}

impl fmt::Display for ItemState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemState::Open => write!(f, "open"),
            ItemState::Closed => write!(f, "closed"),
        }
    }
}

impl TryFrom<String> for ItemState {
    type Error = InputError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl FromStr for ItemState {
    type Err = InputError;

    /// Parses the `state` field used by GitHub issues and pull requests.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let state = s.trim();
        if state.eq_ignore_ascii_case("open") {
            Ok(ItemState::Open)
        } else if state.eq_ignore_ascii_case("closed") {
            Ok(ItemState::Closed)
        } else {
            Err(InputError::UnknownItemState(s.to_string()))
        }
    }
}

/// What a single approver's most recent classifiable comment says
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Signal {
    Approved,
    Denied,
    /// No classifiable comment yet
    #[default]
    Pending,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::Approved => write!(f, "approved"),
            Signal::Denied => write!(f, "denied"),
            Signal::Pending => write!(f, "pending"),
        }
    }
}

/// Final verdict for the whole item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregateDecision {
    Approved,
    Denied,
    Pending,
}

impl fmt::Display for AggregateDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AggregateDecision::Approved => write!(f, "approved"),
            AggregateDecision::Denied => write!(f, "denied"),
            AggregateDecision::Pending => write!(f, "pending"),
        }
    }
}
