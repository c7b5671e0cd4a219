//! Presentation-facing operations over persisted boards.
//!
//! Every mutating call takes the board's lock, loads a fresh copy from
//! storage, applies one workflow operation and saves the result. A failed
//! operation writes nothing and a failed save drops the modified copy, so
//! storage only ever holds the state before or after a transition.

use crate::{
    domain::{Board, BoardId, Card, CardId, CardMove, Column, ColumnId, ColumnKind, Workflow},
    error::{FlowboardError, Result},
    storage::Storage,
    validation,
};
use std::{collections::HashMap, sync::Arc};
use tokio::sync::Mutex;

pub struct BoardService<S: Storage> {
    storage: S,
    workflow: Workflow,
    locks: Mutex<HashMap<BoardId, Arc<Mutex<()>>>>,
}

impl<S: Storage> BoardService<S> {
    pub fn new(storage: S, workflow: Workflow) -> Self {
        Self {
            storage,
            workflow,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Builds a service whose workflow follows the stored configuration
    pub async fn from_storage(storage: S) -> Result<Self> {
        let config = storage.load_config().await?;
        Ok(Self::new(storage, Workflow::new(config.workflow())))
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn workflow(&self) -> &Workflow {
        &self.workflow
    }

    /// Creates a board whose columns take their order from their position
    /// in `columns`
    pub async fn create_board(&self, name: &str, columns: &[(&str, ColumnKind)]) -> Result<Board> {
        validation::validate_board_name(name)?;

        let mut board = Board::new(name);
        for (order, (column_name, kind)) in (0u32..).zip(columns) {
            validation::validate_column_name(column_name)?;
            board.add_column(Column::new(ColumnId::new(order), column_name, order, *kind));
        }
        validation::validate_board(&board)?;
        board.validate_structure()?;

        self.storage.save_board(&board).await?;
        tracing::info!(board = %board.id, name = %board.name, "board created");
        Ok(board)
    }

    /// Creates a board with the default To Do / In Progress / Done / Cancelled columns
    pub async fn create_standard_board(&self, name: &str) -> Result<Board> {
        validation::validate_board_name(name)?;

        let board = Board::with_standard_columns(name);
        self.storage.save_board(&board).await?;
        tracing::info!(board = %board.id, name = %board.name, "board created");
        Ok(board)
    }

    pub async fn load_board(&self, id: &BoardId) -> Result<Board> {
        self.storage.load_board(id).await
    }

    pub async fn list_boards(&self) -> Result<Vec<Board>> {
        let mut boards = Vec::new();
        for id in self.storage.list_board_ids().await? {
            boards.push(self.storage.load_board(&id).await?);
        }
        Ok(boards)
    }

    /// Creates a card in the board's initial column
    pub async fn create_card(&self, board: &BoardId, title: &str, description: &str) -> Result<Card> {
        self.mutate(board, |_, board| {
            board.validate_structure()?;
            let id = board.create_card(title, description)?;
            board.card(id).cloned().ok_or(FlowboardError::CardNotFound(id))
        })
        .await
    }

    pub async fn move_card(&self, board: &BoardId, card: CardId) -> Result<CardMove> {
        self.mutate(board, |workflow, board| workflow.move_forward(board, card))
            .await
    }

    pub async fn cancel_card(&self, board: &BoardId, card: CardId) -> Result<CardMove> {
        self.mutate(board, |workflow, board| workflow.cancel(board, card))
            .await
    }

    pub async fn block_card(&self, board: &BoardId, card: CardId, reason: &str) -> Result<()> {
        self.mutate(board, |workflow, board| workflow.block(board, card, reason))
            .await
    }

    pub async fn unblock_card(&self, board: &BoardId, card: CardId, reason: &str) -> Result<()> {
        self.mutate(board, |workflow, board| workflow.unblock(board, card, reason))
            .await
    }

    pub async fn delete_card(&self, board: &BoardId, card: CardId) -> Result<Card> {
        self.mutate(board, |_, board| board.remove_card(card)).await
    }

    async fn board_lock(&self, id: &BoardId) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks.entry(*id).or_default().clone()
    }

    async fn mutate<T, F>(&self, id: &BoardId, op: F) -> Result<T>
    where
        F: FnOnce(&Workflow, &mut Board) -> Result<T>,
    {
        let lock = self.board_lock(id).await;
        let _guard = lock.lock().await;

        let mut board = self.storage.load_board(id).await?;
        let output = op(&self.workflow, &mut board).map_err(|e| {
            tracing::warn!(board = %id, error = %e, "workflow operation rejected");
            e
        })?;
        self.storage.save_board(&board).await?;
        Ok(output)
    }
}
