//! Field-level constraints for boards, columns and cards.
//!
//! The workflow engine assumes names and texts were checked here first;
//! position and blocking transitions are validated by the engine itself.

use crate::{
    domain::{Board, Card, Column},
    error::{FlowboardError, Result},
};
use std::ops::RangeInclusive;

pub const BOARD_NAME_LENGTH: RangeInclusive<usize> = 3..=100;
pub const COLUMN_NAME_LENGTH: RangeInclusive<usize> = 2..=50;
pub const CARD_TITLE_LENGTH: RangeInclusive<usize> = 3..=100;
pub const CARD_DESCRIPTION_MAX_LENGTH: usize = 500;

fn check_text(field: &str, value: &str, length: RangeInclusive<usize>) -> Result<()> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FlowboardError::Validation(format!("{} must not be blank", field)));
    }

    let len = trimmed.chars().count();
    if !length.contains(&len) {
        return Err(FlowboardError::Validation(format!(
            "{} must be between {} and {} characters (got {})",
            field,
            length.start(),
            length.end(),
            len
        )));
    }
    Ok(())
}

pub fn validate_board_name(name: &str) -> Result<()> {
    check_text("Board name", name, BOARD_NAME_LENGTH)
}

pub fn validate_column_name(name: &str) -> Result<()> {
    check_text("Column name", name, COLUMN_NAME_LENGTH)
}

pub fn validate_card_title(title: &str) -> Result<()> {
    check_text("Card title", title, CARD_TITLE_LENGTH)
}

pub fn validate_card_description(description: &str) -> Result<()> {
    check_text(
        "Card description",
        description,
        1..=CARD_DESCRIPTION_MAX_LENGTH,
    )
}

/// A board needs a valid name and at least one column
pub fn validate_board(board: &Board) -> Result<()> {
    validate_board_name(&board.name)?;
    if board.columns().is_empty() {
        tracing::warn!(board = %board.id, "board has no columns");
        return Err(FlowboardError::Validation(
            "Board must have at least one column".to_string(),
        ));
    }
    board.columns().iter().try_for_each(validate_column)
}

pub fn validate_column(column: &Column) -> Result<()> {
    validate_column_name(&column.name)
}

/// A card needs a valid title and description and must sit in a column
pub fn validate_card(card: &Card) -> Result<()> {
    validate_card_title(&card.title)?;
    validate_card_description(&card.description)?;
    if card.column.is_none() {
        tracing::warn!(card = %card.id, "card is not placed in a column");
        return Err(FlowboardError::Validation(format!(
            "Card {} must belong to a column",
            card.id
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CardId, ColumnId, ColumnKind};

    #[test]
    fn test_card_title_length() {
        assert!(validate_card_title("AB").is_err());
        assert!(validate_card_title("Fix bug").is_ok());
        assert!(validate_card_title("abc").is_ok());
        assert!(validate_card_title(&"x".repeat(100)).is_ok());
        assert!(validate_card_title(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_blank_values_rejected() {
        assert!(validate_card_title("   ").is_err());
        assert!(validate_card_description("").is_err());
        assert!(validate_board_name("\t").is_err());
        assert!(validate_column_name(" ").is_err());
    }

    #[test]
    fn test_length_counts_trimmed_characters() {
        // Padding does not count toward the minimum
        assert!(validate_card_title("  AB  ").is_err());
        // Multi-byte characters count once
        assert!(validate_column_name("ÀÉ").is_ok());
    }

    #[test]
    fn test_description_max_length() {
        assert!(validate_card_description(&"d".repeat(500)).is_ok());
        assert!(validate_card_description(&"d".repeat(501)).is_err());
    }

    #[test]
    fn test_board_and_column_names() {
        assert!(validate_board_name("AB").is_err());
        assert!(validate_board_name("Sprint board").is_ok());
        assert!(validate_column_name("A").is_err());
        assert!(validate_column_name("QA").is_ok());
        assert!(validate_column_name(&"c".repeat(51)).is_err());
    }

    #[test]
    fn test_validation_error_message() {
        let err = validate_card_title("AB").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation error: Card title must be between 3 and 100 characters (got 2)"
        );
    }

    #[test]
    fn test_validate_board_requires_columns() {
        let mut board = Board::new("Test board");
        assert!(validate_board(&board).is_err());

        board.add_column(Column::new(ColumnId::new(0), "To Do", 0, ColumnKind::Initial));
        assert!(validate_board(&board).is_ok());

        board.add_column(Column::new(ColumnId::new(1), "", 1, ColumnKind::Pending));
        assert!(validate_board(&board).is_err());
    }

    #[test]
    fn test_validate_card_requires_column() {
        let mut card = Card::new(CardId::new(1), "Test card", "Card description");
        assert!(validate_card(&card).is_err());

        let mut column = Column::new(ColumnId::new(0), "To Do", 0, ColumnKind::Initial);
        column.add_card(&mut card);
        assert!(validate_card(&card).is_ok());

        card.title = String::new();
        assert!(validate_card(&card).is_err());
    }
}
