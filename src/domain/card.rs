use crate::domain::column::ColumnId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Identifier of a card, unique within its board (e.g. #1, #2, #100)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(u64);

impl CardId {
    const PREFIX: char = '#';

    /// Creates a new CardId from a counter
    pub const fn new(counter: u64) -> Self {
        Self(counter)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl FromStr for CardId {
    type Err = crate::error::FlowboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix(Self::PREFIX).unwrap_or(trimmed);

        digits.parse::<u64>().map(Self).map_err(|_| {
            crate::error::FlowboardError::Validation(format!("Invalid card id: {}", s))
        })
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::PREFIX, self.0)
    }
}

/// A unit of work tracked through the columns of a board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub title: String,
    pub description: String,
    /// Key of the column currently holding the card
    pub column: Option<ColumnId>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub blocked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_reason: Option<String>,
}

impl Card {
    /// Creates an unplaced, unblocked card. Timestamps stay empty until the
    /// card is stamped by its board or first mutated.
    pub fn new(id: CardId, title: &str, description: &str) -> Self {
        Self {
            id,
            title: title.trim().to_string(),
            description: description.trim().to_string(),
            column: None,
            created_at: None,
            updated_at: None,
            blocked: false,
            block_reason: None,
        }
    }

    /// Sets the title. Missing or blank input is ignored and the previous
    /// title is kept.
    pub fn set_title(&mut self, title: Option<&str>) {
        let Some(title) = title.map(str::trim).filter(|t| !t.is_empty()) else {
            return;
        };
        self.title = title.to_string();
        tracing::debug!(card = %self.id, title = %self.title, "card title updated");
    }

    /// Sets the description. Missing input is ignored.
    pub fn set_description(&mut self, description: Option<&str>) {
        if let Some(description) = description {
            self.description = description.trim().to_string();
            tracing::debug!(card = %self.id, "card description updated");
        }
    }

    /// Marks the card as blocked. Blocking twice overwrites the reason.
    pub fn block(&mut self, reason: &str) {
        self.blocked = true;
        self.block_reason = Some(reason.to_string());
        self.touch();
        tracing::info!(card = %self.id, reason, "card blocked");
    }

    /// Clears the blocked state. The reason is only recorded in the log.
    pub fn unblock(&mut self, reason: &str) {
        self.blocked = false;
        self.block_reason = None;
        self.touch();
        tracing::info!(card = %self.id, reason, "card unblocked");
    }

    pub fn can_move(&self) -> bool {
        if self.blocked {
            tracing::warn!(card = %self.id, "card is blocked and cannot move");
            return false;
        }
        true
    }

    /// Points the card at a new column and refreshes `updated_at`
    pub(crate) fn move_to(&mut self, column: ColumnId) {
        self.column = Some(column);
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }
}
