//! # Flowboard Core
//!
//! Workflow state machine and domain models for kanban boards.
//!
//! Cards move through an ordered sequence of columns, each tagged with a
//! [`ColumnKind`]. The [`Workflow`] engine enforces the movement and
//! blocking rules over an in-memory [`Board`]; persistence lives behind the
//! [`Storage`] trait and [`BoardService`] ties the two together.

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod service;
pub mod storage;
pub mod validation;

// Re-export commonly used types
pub use config::FlowboardConfig;
pub use domain::{
    board::{Board, BoardId},
    card::{Card, CardId},
    column::{Column, ColumnId, ColumnKind},
    workflow::{CardMove, Workflow, WorkflowConfig},
};
pub use error::{ErrorKind, FlowboardError, Result};
pub use service::BoardService;
pub use storage::{FileStorage, Storage};
