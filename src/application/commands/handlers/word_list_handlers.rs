//! Word List Command Handlers

use std::sync::Arc;

use crate::application::commands::word_list_commands::*;
use crate::application::error::ApplicationError;
use crate::application::ports::WordListRepositoryPort;
use crate::domain::words::{ListName, SavedWordList};

/// SaveWordList Handler
pub struct SaveWordListHandler {
    word_list_repo: Arc<dyn WordListRepositoryPort>,
}

impl SaveWordListHandler {
    pub fn new(word_list_repo: Arc<dyn WordListRepositoryPort>) -> Self {
        Self { word_list_repo }
    }

    pub async fn handle(&self, cmd: SaveWordList) -> Result<SavedWordList, ApplicationError> {
        let name = ListName::new(&cmd.name)?;
        let words: Vec<String> = cmd
            .words
            .into_iter()
            .map(|w| w.trim().to_string())
            .filter(|w| !w.is_empty())
            .collect();
        let list = SavedWordList::new(name, words, cmd.grade)?;

        self.word_list_repo.save(&list, cmd.overwrite).await?;

        tracing::info!(
            name = %list.name(),
            word_count = list.words().len(),
            grade = %list.grade(),
            overwrite = cmd.overwrite,
            "Word list saved"
        );

        Ok(list)
    }
}

/// DeleteWordList Handler
pub struct DeleteWordListHandler {
    word_list_repo: Arc<dyn WordListRepositoryPort>,
}

impl DeleteWordListHandler {
    pub fn new(word_list_repo: Arc<dyn WordListRepositoryPort>) -> Self {
        Self { word_list_repo }
    }

    pub async fn handle(&self, cmd: DeleteWordList) -> Result<(), ApplicationError> {
        let name = ListName::new(&cmd.name)?;
        if !self.word_list_repo.delete(&name).await? {
            return Err(ApplicationError::not_found("Word list", name.as_str()));
        }

        tracing::info!(name = %name, "Word list deleted");
        Ok(())
    }
}
