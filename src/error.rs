use crate::domain::{BoardId, CardId, ColumnId, ColumnKind};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, FlowboardError>;

#[derive(Debug, Error)]
pub enum FlowboardError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Column not found: board {board} has no {kind} column")]
    ColumnNotFound { board: BoardId, kind: ColumnKind },

    #[error("Board {0} is invalid: it needs an INITIAL and a CANCEL column")]
    InvalidBoard(BoardId),

    #[error("Card {0} is blocked and cannot be moved")]
    CardBlocked(CardId),

    #[error("Card {0} is already blocked")]
    AlreadyBlocked(CardId),

    #[error("Card {0} is not blocked")]
    NotBlocked(CardId),

    #[error("Illegal state transition for card {card}: {reason}")]
    IllegalStateTransition { card: CardId, reason: String },

    #[error("Column {0} is full")]
    ColumnFull(ColumnId),

    #[error("Card not found: {0}")]
    CardNotFound(CardId),

    #[error("Column {0} does not belong to this board")]
    UnknownColumn(ColumnId),

    #[error("Board not found: {0}")]
    BoardNotFound(String),

    #[error("Project not initialized. Call Storage::initialize first.")]
    ProjectNotInitialized,

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Coarse classification of a [`FlowboardError`], for callers that map
/// failures to user-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Structural,
    BlockedCard,
    IllegalStateTransition,
    NotFound,
    Persistence,
}

impl FlowboardError {
    pub(crate) fn terminal(card: CardId) -> Self {
        Self::IllegalStateTransition {
            card,
            reason: "card already in terminal state".to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::ColumnNotFound { .. } | Self::InvalidBoard(_) => ErrorKind::Structural,
            Self::CardBlocked(_) => ErrorKind::BlockedCard,
            Self::AlreadyBlocked(_)
            | Self::NotBlocked(_)
            | Self::IllegalStateTransition { .. }
            | Self::ColumnFull(_) => ErrorKind::IllegalStateTransition,
            Self::CardNotFound(_)
            | Self::UnknownColumn(_)
            | Self::BoardNotFound(_)
            | Self::ProjectNotInitialized => ErrorKind::NotFound,
            Self::StorageError(_)
            | Self::IoError(_)
            | Self::SerializationError(_)
            | Self::ConfigError(_) => ErrorKind::Persistence,
        }
    }

    /// Whether the caller can correct the situation and retry.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self.kind(), ErrorKind::Structural | ErrorKind::Persistence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let card = CardId::new(1);

        assert_eq!(
            FlowboardError::Validation("x".to_string()).kind(),
            ErrorKind::Validation
        );
        assert_eq!(FlowboardError::CardBlocked(card).kind(), ErrorKind::BlockedCard);
        assert_eq!(
            FlowboardError::AlreadyBlocked(card).kind(),
            ErrorKind::IllegalStateTransition
        );
        assert_eq!(
            FlowboardError::NotBlocked(card).kind(),
            ErrorKind::IllegalStateTransition
        );
        assert_eq!(
            FlowboardError::InvalidBoard(uuid::Uuid::nil()).kind(),
            ErrorKind::Structural
        );
        assert_eq!(
            FlowboardError::ProjectNotInitialized.kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn test_terminal_error_message() {
        let err = FlowboardError::terminal(CardId::new(7));
        assert_eq!(
            err.to_string(),
            "Illegal state transition for card #7: card already in terminal state"
        );
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_column_not_found_is_not_recoverable() {
        let err = FlowboardError::ColumnNotFound {
            board: uuid::Uuid::nil(),
            kind: ColumnKind::Cancel,
        };
        assert_eq!(err.kind(), ErrorKind::Structural);
        assert!(!err.is_recoverable());
        assert!(err.to_string().contains("CANCEL"));
    }
}
