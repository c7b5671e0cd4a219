use crate::domain::card::{Card, CardId};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Cards a column holds before it reports itself as full
pub const DEFAULT_COLUMN_CAPACITY: usize = 100;

/// Identifier of a column, unique within its board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnId(u32);

impl ColumnId {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Role a column plays in the workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ColumnKind {
    Initial,
    Pending,
    Final,
    Cancel,
}

impl ColumnKind {
    /// Terminal columns accept no further transitions
    pub fn is_terminal(&self) -> bool {
        match self {
            Self::Initial | Self::Pending => false,
            Self::Final | Self::Cancel => true,
        }
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Initial => write!(f, "INITIAL"),
            Self::Pending => write!(f, "PENDING"),
            Self::Final => write!(f, "FINAL"),
            Self::Cancel => write!(f, "CANCEL"),
        }
    }
}

impl FromStr for ColumnKind {
    type Err = crate::error::FlowboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "INITIAL" => Ok(Self::Initial),
            "PENDING" => Ok(Self::Pending),
            "FINAL" => Ok(Self::Final),
            "CANCEL" => Ok(Self::Cancel),
            _ => Err(crate::error::FlowboardError::Validation(format!(
                "Invalid column kind '{}'. Valid kinds: INITIAL, PENDING, FINAL, CANCEL",
                s
            ))),
        }
    }
}

/// A named workflow stage holding cards in arrival order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub name: String,
    pub order: u32,
    kind: ColumnKind,
    #[serde(default)]
    cards: Vec<CardId>,
}

impl Column {
    pub fn new(id: ColumnId, name: &str, order: u32, kind: ColumnKind) -> Self {
        Self {
            id,
            name: name.trim().to_string(),
            order,
            kind,
            cards: Vec::new(),
        }
    }

    pub fn kind(&self) -> ColumnKind {
        self.kind
    }

    pub fn is_terminal(&self) -> bool {
        self.kind.is_terminal()
    }

    /// Card ids in arrival order
    pub fn cards(&self) -> &[CardId] {
        &self.cards
    }

    /// Appends the card and points it at this column. The column the card
    /// came from is left untouched.
    pub fn add_card(&mut self, card: &mut Card) {
        self.cards.push(card.id);
        card.column = Some(self.id);
        tracing::debug!(card = %card.id, column = %self.id, "card added to column");
    }

    /// Removes the card if present; returns whether it was
    pub fn remove_card(&mut self, card: CardId) -> bool {
        let Some(pos) = self.cards.iter().position(|id| *id == card) else {
            return false;
        };
        self.cards.remove(pos);
        tracing::debug!(card = %card, column = %self.id, "card removed from column");
        true
    }

    pub fn contains(&self, card: CardId) -> bool {
        self.cards.contains(&card)
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    /// Capacity check against [`DEFAULT_COLUMN_CAPACITY`]. Not enforced by
    /// [`Column::add_card`].
    pub fn is_full(&self) -> bool {
        self.is_full_at(DEFAULT_COLUMN_CAPACITY)
    }

    pub fn is_full_at(&self, capacity: usize) -> bool {
        let full = self.cards.len() >= capacity;
        if full {
            tracing::warn!(column = %self.id, cards = self.cards.len(), "column is full");
        }
        full
    }
}
