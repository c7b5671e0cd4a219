use crate::{
    config::FlowboardConfig,
    domain::{Board, BoardId},
    error::{FlowboardError, Result},
    storage::Storage,
};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

/// File-based storage implementation, one JSON document per board
pub struct FileStorage {
    root_path: PathBuf,
}

impl FileStorage {
    const FLOWBOARD_DIR: &'static str = ".flowboard";
    const BOARDS_DIR: &'static str = "boards";
    const CONFIG_FILE: &'static str = "config.toml";

    /// Creates a new FileStorage instance for the given project root
    pub fn new(project_root: impl AsRef<Path>) -> Self {
        Self {
            root_path: project_root.as_ref().join(Self::FLOWBOARD_DIR),
        }
    }

    fn boards_dir(&self) -> PathBuf {
        self.root_path.join(Self::BOARDS_DIR)
    }

    fn config_file(&self) -> PathBuf {
        self.root_path.join(Self::CONFIG_FILE)
    }

    fn board_file(&self, id: &BoardId) -> PathBuf {
        self.boards_dir().join(format!("{}.json", id))
    }

    async fn ensure_directory_exists(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).await?;
        }
        Ok(())
    }

    /// Writes to a temp file in the same directory, then renames it over the
    /// target so readers never see a partial board
    async fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        let temp_file = tempfile::NamedTempFile::new_in(parent)?;
        let temp_path = temp_file.into_temp_path();

        fs::write(&temp_path, data).await?;
        temp_path
            .persist(path)
            .map_err(|e| FlowboardError::StorageError(e.to_string()))?;

        tracing::debug!(bytes = data.len(), path = %path.display(), "board written");
        Ok(())
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn initialize(&self) -> Result<()> {
        self.ensure_directory_exists(&self.root_path).await?;
        self.ensure_directory_exists(&self.boards_dir()).await?;

        if !self.config_file().exists() {
            let config = FlowboardConfig::default().to_toml_string()?;
            fs::write(self.config_file(), config).await?;
        }

        let gitignore_path = self.root_path.join(".gitignore");
        if !gitignore_path.exists() {
            fs::write(gitignore_path, "# Interrupted writes\n.tmp*\n").await?;
        }

        tracing::info!(root = %self.root_path.display(), "storage initialized");
        Ok(())
    }

    async fn save_board(&self, board: &Board) -> Result<()> {
        if !self.is_initialized().await {
            return Err(FlowboardError::ProjectNotInitialized);
        }

        let json = serde_json::to_string_pretty(board)?;
        Self::write_atomic(&self.board_file(&board.id), json.as_bytes()).await
    }

    async fn load_board(&self, id: &BoardId) -> Result<Board> {
        let file_path = self.board_file(id);

        if !file_path.exists() {
            return Err(FlowboardError::BoardNotFound(id.to_string()));
        }

        let contents = fs::read_to_string(&file_path).await?;
        let board: Board = serde_json::from_str(&contents)?;

        Ok(board)
    }

    async fn list_board_ids(&self) -> Result<Vec<BoardId>> {
        let boards_dir = self.boards_dir();

        if !boards_dir.exists() {
            return Ok(Vec::new());
        }

        let mut entries = fs::read_dir(&boards_dir).await?;
        let mut ids: Vec<BoardId> = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) == Some("json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    if let Ok(id) = Uuid::parse_str(stem) {
                        ids.push(id);
                    }
                }
            }
        }

        ids.sort();
        Ok(ids)
    }

    async fn delete_board(&self, id: &BoardId) -> Result<()> {
        let file_path = self.board_file(id);

        if !file_path.exists() {
            return Err(FlowboardError::BoardNotFound(id.to_string()));
        }

        fs::remove_file(file_path).await?;
        Ok(())
    }

    async fn load_config(&self) -> Result<FlowboardConfig> {
        FlowboardConfig::load(self.config_file()).await
    }

    async fn is_initialized(&self) -> bool {
        self.root_path.exists() && self.boards_dir().exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CardId, Workflow};
    use tempfile::TempDir;

    async fn initialized_storage() -> (TempDir, FileStorage) {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());
        storage.initialize().await.unwrap();
        (temp_dir, storage)
    }

    #[tokio::test]
    async fn test_storage_initialization() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());

        assert!(!storage.is_initialized().await);

        storage.initialize().await.unwrap();

        assert!(storage.is_initialized().await);
        assert!(storage.boards_dir().exists());
        assert!(storage.config_file().exists());
    }

    #[tokio::test]
    async fn test_initialize_keeps_existing_config() {
        let (_temp_dir, storage) = initialized_storage().await;
        fs::write(storage.config_file(), "column_capacity = 7\n")
            .await
            .unwrap();

        storage.initialize().await.unwrap();

        let config = storage.load_config().await.unwrap();
        assert_eq!(config.column_capacity, 7);
    }

    #[tokio::test]
    async fn test_save_requires_initialization() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());
        let board = Board::with_standard_columns("Test board");

        assert!(matches!(
            storage.save_board(&board).await,
            Err(FlowboardError::ProjectNotInitialized)
        ));
    }

    #[tokio::test]
    async fn test_board_save_and_load() {
        let (_temp_dir, storage) = initialized_storage().await;

        let mut board = Board::with_standard_columns("Test board");
        let card = board.create_card("Fix bug", "Crash on startup").unwrap();
        Workflow::default().block(&mut board, card, "waiting").unwrap();
        storage.save_board(&board).await.unwrap();

        let loaded = storage.load_board(&board.id).await.unwrap();
        assert_eq!(loaded.name, "Test board");
        assert_eq!(loaded.columns().len(), 4);
        assert!(loaded.initial_column().unwrap().contains(card));

        let loaded_card = loaded.card(card).unwrap();
        assert!(loaded_card.blocked);
        assert_eq!(loaded_card.block_reason.as_deref(), Some("waiting"));
    }

    #[tokio::test]
    async fn test_save_overwrites_previous_state() {
        let (_temp_dir, storage) = initialized_storage().await;

        let mut board = Board::with_standard_columns("Test board");
        storage.save_board(&board).await.unwrap();

        let card = board.create_card("Fix bug", "Crash on startup").unwrap();
        storage.save_board(&board).await.unwrap();

        let loaded = storage.load_board(&board.id).await.unwrap();
        assert!(loaded.card(card).is_some());
        assert!(loaded.card(CardId::new(2)).is_none());
    }

    #[tokio::test]
    async fn test_load_missing_board() {
        let (_temp_dir, storage) = initialized_storage().await;

        assert!(matches!(
            storage.load_board(&Uuid::new_v4()).await,
            Err(FlowboardError::BoardNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_list_board_ids() {
        let (_temp_dir, storage) = initialized_storage().await;

        let first = Board::with_standard_columns("First board");
        let second = Board::with_standard_columns("Second board");
        storage.save_board(&first).await.unwrap();
        storage.save_board(&second).await.unwrap();

        // Unrelated files are skipped
        fs::write(storage.boards_dir().join("notes.json"), "{}")
            .await
            .unwrap();

        let mut expected = vec![first.id, second.id];
        expected.sort();
        assert_eq!(storage.list_board_ids().await.unwrap(), expected);
    }

    #[tokio::test]
    async fn test_list_board_ids_empty_storage() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());

        assert!(storage.list_board_ids().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_board() {
        let (_temp_dir, storage) = initialized_storage().await;
        let board = Board::with_standard_columns("Test board");
        storage.save_board(&board).await.unwrap();

        storage.delete_board(&board.id).await.unwrap();

        assert!(storage.list_board_ids().await.unwrap().is_empty());
        assert!(matches!(
            storage.delete_board(&board.id).await,
            Err(FlowboardError::BoardNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_no_temp_files_left_behind() {
        let (_temp_dir, storage) = initialized_storage().await;
        let board = Board::with_standard_columns("Test board");
        storage.save_board(&board).await.unwrap();
        storage.save_board(&board).await.unwrap();

        let mut entries = fs::read_dir(storage.boards_dir()).await.unwrap();
        let mut count = 0;
        while let Some(_entry) = entries.next_entry().await.unwrap() {
            count += 1;
        }
        assert_eq!(count, 1);
    }
}
