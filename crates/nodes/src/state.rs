//! The ticket state record threaded through a single run.
//!
//! One `TicketState` is created per inbound query, updated step by step via
//! [`StateUpdate`] merges, and discarded by the caller once the terminal step
//! has run. The record is never shared between runs.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// Which team a query belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    General,
    Billing,
    Technical,
    /// Not yet classified.
    Unset,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::General => write!(f, "general"),
            Self::Billing => write!(f, "billing"),
            Self::Technical => write!(f, "technical"),
            Self::Unset => write!(f, "unset"),
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    /// Parse a classifier label. `Unset` is not a label a classifier may
    /// return, so it is not accepted here.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "general" => Ok(Self::General),
            "billing" => Ok(Self::Billing),
            "technical" => Ok(Self::Technical),
            other => Err(format!("unknown category label: {other}")),
        }
    }
}

// ---------------------------------------------------------------------------
// Sentiment
// ---------------------------------------------------------------------------

/// Tone of the query, used to decide between escalation and a normal answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
    /// Not yet classified.
    Unset,
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Positive => write!(f, "positive"),
            Self::Neutral => write!(f, "neutral"),
            Self::Negative => write!(f, "negative"),
            Self::Unset => write!(f, "unset"),
        }
    }
}

impl std::str::FromStr for Sentiment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "positive" => Ok(Self::Positive),
            "neutral" => Ok(Self::Neutral),
            "negative" => Ok(Self::Negative),
            other => Err(format!("unknown sentiment label: {other}")),
        }
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// A validated classification result.
///
/// Category and sentiment travel together so a half-classified state is
/// unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub category: Category,
    pub sentiment: Sentiment,
}

// ---------------------------------------------------------------------------
// TicketState
// ---------------------------------------------------------------------------

/// Accumulated knowledge about one in-flight query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketState {
    /// The inbound query. Set once at creation, immutable thereafter.
    pub query: String,
    /// Written exactly once, by the classification step.
    pub category: Category,
    /// Written exactly once, by the classification step.
    pub sentiment: Sentiment,
    /// Written exactly once, by either the escalation step or the
    /// response-generation step.
    pub response: Option<String>,
}

impl TicketState {
    /// Fresh state for an inbound query.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            category: Category::Unset,
            sentiment: Sentiment::Unset,
            response: None,
        }
    }

    /// Both classification fields carry a value from their closed domain.
    pub fn is_classified(&self) -> bool {
        self.category != Category::Unset && self.sentiment != Sentiment::Unset
    }

    pub fn has_response(&self) -> bool {
        self.response.is_some()
    }
}

// ---------------------------------------------------------------------------
// StateUpdate
// ---------------------------------------------------------------------------

/// The partial update a step returns.
///
/// The executor merges it into the run's `TicketState`, rejecting any write
/// to a field an earlier step already finalized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateUpdate {
    pub classification: Option<Classification>,
    pub response: Option<String>,
}

impl StateUpdate {
    /// An update that changes nothing.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn classified(category: Category, sentiment: Sentiment) -> Self {
        Self {
            classification: Some(Classification { category, sentiment }),
            response: None,
        }
    }

    pub fn responded(text: impl Into<String>) -> Self {
        Self {
            classification: None,
            response: Some(text.into()),
        }
    }
}
