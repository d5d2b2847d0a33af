//! Word Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{WordListRepositoryPort, WordPoolPort};
use crate::application::queries::{
    GetWordPool, ListWordLists, LoadWordList, WordListSummary, WordPoolResponse,
};
use crate::domain::words::{GradeLevel, ListName, SavedWordList};

/// GetWordPool Handler
pub struct GetWordPoolHandler {
    word_pool: Arc<dyn WordPoolPort>,
}

impl GetWordPoolHandler {
    pub fn new(word_pool: Arc<dyn WordPoolPort>) -> Self {
        Self { word_pool }
    }

    /// 词库大小，不复制单词
    pub fn pool_size(&self, grade: GradeLevel) -> usize {
        self.word_pool.words(grade).len()
    }

    pub fn handle(&self, query: GetWordPool) -> WordPoolResponse {
        let pool_size = self.word_pool.words(query.grade).len();
        let words = match query.search.as_deref() {
            Some(term) => self.word_pool.search(query.grade, term),
            None => self.word_pool.words(query.grade).to_vec(),
        };

        WordPoolResponse {
            grade: query.grade,
            words,
            pool_size,
        }
    }
}

/// LoadWordList Handler
pub struct LoadWordListHandler {
    word_list_repo: Arc<dyn WordListRepositoryPort>,
}

impl LoadWordListHandler {
    pub fn new(word_list_repo: Arc<dyn WordListRepositoryPort>) -> Self {
        Self { word_list_repo }
    }

    pub async fn handle(&self, query: LoadWordList) -> Result<SavedWordList, ApplicationError> {
        let name = ListName::new(&query.name)?;
        self.word_list_repo
            .find(&name)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Word list", name.as_str()))
    }
}

/// ListWordLists Handler
pub struct ListWordListsHandler {
    word_list_repo: Arc<dyn WordListRepositoryPort>,
}

impl ListWordListsHandler {
    pub fn new(word_list_repo: Arc<dyn WordListRepositoryPort>) -> Self {
        Self { word_list_repo }
    }

    pub async fn handle(&self, _query: ListWordLists) -> Result<Vec<WordListSummary>, ApplicationError> {
        let lists = self.word_list_repo.list().await?;
        Ok(lists.iter().map(WordListSummary::from).collect())
    }
}
