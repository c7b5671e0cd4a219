use crate::{
    domain::{
        card::{Card, CardId},
        column::{Column, ColumnId, ColumnKind},
    },
    error::{FlowboardError, Result},
    validation,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type BoardId = Uuid;

/// Kanban board: owns its columns and every card placed on them.
///
/// Cards live in a single arena on the board and refer to their column by
/// [`ColumnId`]; columns keep the arrival order as a list of [`CardId`]s.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    pub id: BoardId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    columns: Vec<Column>,
    #[serde(default)]
    cards: Vec<Card>,
    next_card_number: u64,
}

impl Board {
    pub fn new(name: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            created_at: Utc::now(),
            columns: Vec::new(),
            cards: Vec::new(),
            next_card_number: 1,
        }
    }

    /// Board with the default To Do / In Progress / Done / Cancelled columns
    pub fn with_standard_columns(name: &str) -> Self {
        let mut board = Self::new(name);
        let defaults = [
            ("To Do", ColumnKind::Initial),
            ("In Progress", ColumnKind::Pending),
            ("Done", ColumnKind::Final),
            ("Cancelled", ColumnKind::Cancel),
        ];
        for (order, (name, kind)) in (0u32..).zip(defaults) {
            board.add_column(Column::new(ColumnId::new(order), name, order, kind));
        }
        board
    }

    /// Appends a column. Callers supply columns in their intended order;
    /// nothing is reordered or deduplicated here.
    pub fn add_column(&mut self, column: Column) {
        tracing::debug!(board = %self.id, column = %column.name, "column added to board");
        self.columns.push(column);
    }

    /// Columns in insertion order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Columns sorted by `order`; ties keep insertion order
    pub fn ordered_columns(&self) -> Vec<&Column> {
        let mut columns: Vec<&Column> = self.columns.iter().collect();
        columns.sort_by_key(|c| c.order);
        columns
    }

    pub fn column(&self, id: ColumnId) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == id)
    }

    /// Column that follows `id` in board order, if any
    pub fn column_after(&self, id: ColumnId) -> Option<&Column> {
        let ordered = self.ordered_columns();
        let pos = ordered.iter().position(|c| c.id == id)?;
        ordered.get(pos + 1).copied()
    }

    /// First column of the given kind
    pub fn find_column(&self, kind: ColumnKind) -> Option<&Column> {
        self.columns.iter().find(|c| c.kind() == kind)
    }

    pub fn initial_column(&self) -> Result<&Column> {
        tracing::debug!(board = %self.id, "looking up initial column");
        self.required_column(ColumnKind::Initial)
    }

    pub fn cancel_column(&self) -> Result<&Column> {
        tracing::debug!(board = %self.id, "looking up cancel column");
        self.required_column(ColumnKind::Cancel)
    }

    fn required_column(&self, kind: ColumnKind) -> Result<&Column> {
        self.find_column(kind).ok_or_else(|| {
            tracing::error!(board = %self.id, %kind, "column not found");
            FlowboardError::ColumnNotFound {
                board: self.id,
                kind,
            }
        })
    }

    /// True when at least one INITIAL and one CANCEL column exist. Does not
    /// check uniqueness, contiguous ordering or reachability.
    pub fn is_valid(&self) -> bool {
        let valid = self.find_column(ColumnKind::Initial).is_some()
            && self.find_column(ColumnKind::Cancel).is_some();
        if !valid {
            tracing::warn!(board = %self.id, "board needs an initial and a cancel column");
        }
        valid
    }

    pub fn validate_structure(&self) -> Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(FlowboardError::InvalidBoard(self.id))
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    /// Cards of a column in arrival order
    pub fn cards_in(&self, column: ColumnId) -> Vec<&Card> {
        self.column(column)
            .map(|col| col.cards().iter().filter_map(|id| self.card(*id)).collect())
            .unwrap_or_default()
    }

    /// Generates the next card ID
    pub fn next_card_id(&mut self) -> CardId {
        let id = CardId::new(self.next_card_number);
        self.next_card_number += 1;
        id
    }

    /// Creates a card in the initial column and returns its id
    pub fn create_card(&mut self, title: &str, description: &str) -> Result<CardId> {
        validation::validate_card_title(title)?;
        validation::validate_card_description(description)?;
        let initial = self.initial_column()?.id;
        let column = self.column_index(initial)?;

        let id = self.next_card_id();
        let mut card = Card::new(id, title, description);
        card.created_at = Some(Utc::now());
        self.columns[column].add_card(&mut card);
        self.cards.push(card);

        tracing::info!(board = %self.id, card = %id, "card created");
        Ok(id)
    }

    /// Deletes a card from the board and from whichever column holds it
    pub fn remove_card(&mut self, id: CardId) -> Result<Card> {
        let index = self.card_index(id)?;
        for column in &mut self.columns {
            column.remove_card(id);
        }
        let card = self.cards.remove(index);
        tracing::info!(board = %self.id, card = %id, "card deleted");
        Ok(card)
    }

    pub(crate) fn card_mut(&mut self, id: CardId) -> Result<&mut Card> {
        self.cards
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(FlowboardError::CardNotFound(id))
    }

    /// Column currently holding the card
    pub(crate) fn column_of(&self, card: &Card) -> Result<&Column> {
        let id = card
            .column
            .ok_or_else(|| FlowboardError::IllegalStateTransition {
                card: card.id,
                reason: "card is not placed in any column".to_string(),
            })?;
        self.column(id).ok_or(FlowboardError::UnknownColumn(id))
    }

    /// Moves a card from its current column to `to`. Every lookup happens
    /// before the first mutation, so a failure leaves the board untouched.
    pub(crate) fn relocate_card(&mut self, id: CardId, to: ColumnId) -> Result<ColumnId> {
        let card_index = self.card_index(id)?;
        let from = self.column_of(&self.cards[card_index])?.id;
        let from_index = self.column_index(from)?;
        let to_index = self.column_index(to)?;

        self.columns[from_index].remove_card(id);
        let card = &mut self.cards[card_index];
        self.columns[to_index].add_card(card);
        card.move_to(to);
        Ok(from)
    }

    fn card_index(&self, id: CardId) -> Result<usize> {
        self.cards
            .iter()
            .position(|c| c.id == id)
            .ok_or(FlowboardError::CardNotFound(id))
    }

    fn column_index(&self, id: ColumnId) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c.id == id)
            .ok_or(FlowboardError::UnknownColumn(id))
    }
}
