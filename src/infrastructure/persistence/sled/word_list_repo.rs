//! Sled-based Word List Repository Implementation

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use sled::Db;
use std::path::Path;

use crate::application::ports::{RepositoryError, WordListRepositoryPort};
use crate::domain::words::{GradeLevel, ListName, SavedWordList};

const KEY_PREFIX: &str = "list:";

/// 存储记录
#[derive(Debug, Clone, Serialize, Deserialize)]
struct WordListRecord {
    name: String,
    words: Vec<String>,
    grade: String,
    created_at: i64,
}

impl From<&SavedWordList> for WordListRecord {
    fn from(list: &SavedWordList) -> Self {
        Self {
            name: list.name().as_str().to_string(),
            words: list.words().to_vec(),
            grade: list.grade().as_str().to_string(),
            created_at: list.created_at().timestamp_millis(),
        }
    }
}

impl TryFrom<WordListRecord> for SavedWordList {
    type Error = RepositoryError;

    fn try_from(record: WordListRecord) -> Result<Self, Self::Error> {
        let invalid = |e: crate::domain::words::WordListError| {
            RepositoryError::SerializationError(e.to_string())
        };
        let name = ListName::new(&record.name).map_err(invalid)?;
        let grade: GradeLevel = record.grade.parse().map_err(invalid)?;
        let created_at: DateTime<Utc> = Utc
            .timestamp_millis_opt(record.created_at)
            .single()
            .unwrap_or_else(Utc::now);
        SavedWordList::restore(name, record.words, grade, created_at).map_err(invalid)
    }
}

/// Sled 单词表仓储
pub struct SledWordListRepository {
    db: Db,
}

impl SledWordListRepository {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, RepositoryError> {
        let db = sled::open(path.as_ref())
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        tracing::info!(
            db_path = %path.as_ref().display(),
            lists = db.scan_prefix(KEY_PREFIX).count(),
            "SledWordListRepository initialized"
        );

        Ok(Self { db })
    }

    fn key(name: &ListName) -> String {
        format!("{}{}", KEY_PREFIX, name.as_str())
    }

    fn decode(value: &[u8]) -> Result<SavedWordList, RepositoryError> {
        let record: WordListRecord = bincode::deserialize(value)
            .map_err(|e| RepositoryError::SerializationError(e.to_string()))?;
        record.try_into()
    }
}

#[async_trait]
impl WordListRepositoryPort for SledWordListRepository {
    async fn save(&self, list: &SavedWordList, overwrite: bool) -> Result<(), RepositoryError> {
        let key = Self::key(list.name());
        let value = bincode::serialize(&WordListRecord::from(list))
            .map_err(|e| RepositoryError::SerializationError(e.to_string()))?;

        if overwrite {
            self.db
                .insert(key.as_bytes(), value)
                .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;
        } else {
            self.db
                .compare_and_swap(key.as_bytes(), None as Option<&[u8]>, Some(value))
                .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?
                .map_err(|_| RepositoryError::Duplicate(list.name().to_string()))?;
        }

        self.db
            .flush_async()
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find(&self, name: &ListName) -> Result<Option<SavedWordList>, RepositoryError> {
        match self
            .db
            .get(Self::key(name).as_bytes())
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?
        {
            Some(value) => Ok(Some(Self::decode(&value)?)),
            None => Ok(None),
        }
    }

    async fn delete(&self, name: &ListName) -> Result<bool, RepositoryError> {
        let removed = self
            .db
            .remove(Self::key(name).as_bytes())
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        if removed.is_some() {
            self.db
                .flush_async()
                .await
                .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;
        }

        Ok(removed.is_some())
    }

    async fn list(&self) -> Result<Vec<SavedWordList>, RepositoryError> {
        let mut lists = Vec::new();
        for item in self.db.scan_prefix(KEY_PREFIX) {
            let (key, value) = item.map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;
            match Self::decode(&value) {
                Ok(list) => lists.push(list),
                Err(e) => {
                    tracing::warn!(
                        key = %String::from_utf8_lossy(&key),
                        error = %e,
                        "Skipping unreadable word list"
                    );
                }
            }
        }
        lists.sort_by(|a, b| a.name().as_str().cmp(b.name().as_str()));
        Ok(lists)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(name: &str, words: &[&str]) -> SavedWordList {
        SavedWordList::new(
            ListName::new(name).unwrap(),
            words.iter().map(|w| w.to_string()).collect(),
            GradeLevel::Gr45,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_save_and_find() {
        let dir = tempfile::tempdir().unwrap();
        let repo = SledWordListRepository::open(dir.path().join("lists.sled")).unwrap();

        let saved = list("week 1", &["atom", "bleach"]);
        repo.save(&saved, false).await.unwrap();

        let found = repo.find(saved.name()).await.unwrap().unwrap();
        assert_eq!(found.words(), saved.words());
        assert_eq!(found.grade(), GradeLevel::Gr45);
        assert_eq!(
            found.created_at().timestamp_millis(),
            saved.created_at().timestamp_millis()
        );
    }

    #[tokio::test]
    async fn test_duplicate_requires_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let repo = SledWordListRepository::open(dir.path().join("lists.sled")).unwrap();

        repo.save(&list("week 1", &["atom"]), false).await.unwrap();
        let err = repo.save(&list("week 1", &["cat"]), false).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Duplicate(_)));

        repo.save(&list("week 1", &["cat"]), true).await.unwrap();
        let found = repo
            .find(&ListName::new("week 1").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.words(), &["cat".to_string()]);
    }

    #[tokio::test]
    async fn test_list_sorted_and_delete() {
        let dir = tempfile::tempdir().unwrap();
        let repo = SledWordListRepository::open(dir.path().join("lists.sled")).unwrap();

        repo.save(&list("week 2", &["b"]), false).await.unwrap();
        repo.save(&list("week 1", &["a"]), false).await.unwrap();

        let names: Vec<String> = repo
            .list()
            .await
            .unwrap()
            .iter()
            .map(|l| l.name().to_string())
            .collect();
        assert_eq!(names, vec!["week 1", "week 2"]);

        assert!(repo.delete(&ListName::new("week 1").unwrap()).await.unwrap());
        assert!(!repo.delete(&ListName::new("week 1").unwrap()).await.unwrap());
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }
}
