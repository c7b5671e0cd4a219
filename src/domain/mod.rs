pub mod board;
pub mod card;
pub mod column;
pub mod workflow;

pub use board::{Board, BoardId};
pub use card::{Card, CardId};
pub use column::{Column, ColumnId, ColumnKind, DEFAULT_COLUMN_CAPACITY};
pub use workflow::{CardMove, Workflow, WorkflowConfig};
