//! Card movement state machine.
//!
//! Each card has two independent dimensions: its position (which column)
//! and whether it is blocked. A card sitting in a FINAL or CANCEL column is
//! terminal and accepts no transition in either dimension.

use crate::{
    domain::{
        board::Board,
        card::CardId,
        column::{ColumnId, ColumnKind, DEFAULT_COLUMN_CAPACITY},
    },
    error::{FlowboardError, Result},
};
use serde::{Deserialize, Serialize};

/// Capacity policy applied to moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowConfig {
    pub column_capacity: usize,
    pub enforce_column_capacity: bool,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            column_capacity: DEFAULT_COLUMN_CAPACITY,
            enforce_column_capacity: false,
        }
    }
}

/// Outcome of a successful move or cancel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardMove {
    pub card: CardId,
    pub from: ColumnId,
    pub to: ColumnId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Next,
    Cancel,
}

/// Applies workflow transitions to a board. Holds no state besides its
/// capacity policy; every operation either fully applies or leaves the
/// board as it was.
#[derive(Debug, Clone, Default)]
pub struct Workflow {
    config: WorkflowConfig,
}

impl Workflow {
    pub fn new(config: WorkflowConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WorkflowConfig {
        &self.config
    }

    /// Moves a card to the column immediately after its current one
    pub fn move_forward(&self, board: &mut Board, card: CardId) -> Result<CardMove> {
        self.relocate(board, card, Target::Next)
    }

    /// Sends a card straight to the board's CANCEL column
    pub fn cancel(&self, board: &mut Board, card: CardId) -> Result<CardMove> {
        self.relocate(board, card, Target::Cancel)
    }

    pub fn block(&self, board: &mut Board, card: CardId, reason: &str) -> Result<()> {
        board.validate_structure()?;
        ensure_not_terminal(board, card)?;

        let card = board.card_mut(card)?;
        if card.blocked {
            return Err(FlowboardError::AlreadyBlocked(card.id));
        }
        card.block(reason);
        Ok(())
    }

    pub fn unblock(&self, board: &mut Board, card: CardId, reason: &str) -> Result<()> {
        board.validate_structure()?;
        ensure_not_terminal(board, card)?;

        let card = board.card_mut(card)?;
        if !card.blocked {
            return Err(FlowboardError::NotBlocked(card.id));
        }
        card.unblock(reason);
        Ok(())
    }

    fn relocate(&self, board: &mut Board, id: CardId, target: Target) -> Result<CardMove> {
        board.validate_structure()?;
        let current = ensure_not_terminal(board, id)?;

        let card = board.card(id).ok_or(FlowboardError::CardNotFound(id))?;
        if !card.can_move() {
            return Err(FlowboardError::CardBlocked(id));
        }

        let destination = match target {
            Target::Next => board
                .column_after(current)
                .ok_or_else(|| FlowboardError::IllegalStateTransition {
                    card: id,
                    reason: "no column after the current one".to_string(),
                })?,
            Target::Cancel => board.cancel_column()?,
        };

        if self.config.enforce_column_capacity
            && destination.is_full_at(self.config.column_capacity)
        {
            return Err(FlowboardError::ColumnFull(destination.id));
        }

        let to = destination.id;
        let from = board.relocate_card(id, to)?;
        tracing::info!(board = %board.id, card = %id, %from, %to, ?target, "card moved");

        Ok(CardMove { card: id, from, to })
    }
}

/// Fails when the card sits in a terminal column; returns its column otherwise
fn ensure_not_terminal(board: &Board, id: CardId) -> Result<ColumnId> {
    let card = board.card(id).ok_or(FlowboardError::CardNotFound(id))?;
    let column = board.column_of(card)?;

    match column.kind() {
        ColumnKind::Initial | ColumnKind::Pending => Ok(column.id),
        ColumnKind::Final | ColumnKind::Cancel => {
            tracing::warn!(card = %id, column = %column.name, "card already in terminal state");
            Err(FlowboardError::terminal(id))
        }
    }
}
