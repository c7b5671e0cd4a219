use crate::{
    config::FlowboardConfig,
    domain::{Board, BoardId},
    error::Result,
};
use async_trait::async_trait;

pub mod file_storage;

pub use file_storage::FileStorage;

/// Storage trait for persisting fully hydrated boards.
///
/// A board is saved and loaded as one aggregate (columns and cards
/// included), so a save either replaces the previous state or fails.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Initializes the storage backend
    async fn initialize(&self) -> Result<()>;

    /// Saves a board with all its columns and cards
    async fn save_board(&self, board: &Board) -> Result<()>;

    /// Loads a board by ID
    async fn load_board(&self, id: &BoardId) -> Result<Board>;

    /// Lists all board IDs
    async fn list_board_ids(&self) -> Result<Vec<BoardId>>;

    /// Deletes a board
    async fn delete_board(&self, id: &BoardId) -> Result<()>;

    /// Loads the project configuration, or defaults when none is stored
    async fn load_config(&self) -> Result<FlowboardConfig>;

    /// Checks if the project is initialized
    async fn is_initialized(&self) -> bool;
}
