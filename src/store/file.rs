use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use super::{ExpenseStore, Snapshot};
use crate::models::{DayComment, DayLogWrite, Expense, ExpenseUpdate, NewExpense};
use crate::StoreError;

/// A store kept in a JSON file
///
/// The whole file is read when the store is opened and rewritten after every change.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    state: Mutex<Snapshot>,
}

impl FileStore {
    /// Opens the store at `path`. A missing file is an empty store.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let snapshot = if path.exists() {
            let content = fs::read_to_string(&path)?;
            serde_json::from_str(&content)?
        } else {
            debug!("{:?} does not exist, starting an empty store", path);
            Snapshot::default()
        };
        Ok(FileStore {
            path,
            state: Mutex::new(snapshot),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn state(&self) -> MutexGuard<'_, Snapshot> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Applies a change and writes the result. Nothing is written if the change fails.
    fn modify<T, F>(&self, change: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut Snapshot) -> Result<T, StoreError>,
    {
        let mut state = self.state();
        let mut updated = state.clone();
        let result = change(&mut updated)?;
        fs::write(&self.path, serde_json::to_string_pretty(&updated)?)?;
        *state = updated;
        info!("Saved store to {:?}", self.path);
        Ok(result)
    }
}

#[async_trait]
impl ExpenseStore for FileStore {
    async fn create_expense(&self, expense: NewExpense) -> Result<Expense, StoreError> {
        self.modify(|s| Ok(s.create_expense(expense, Utc::now())))
    }

    async fn update_expense(
        &self,
        id: &str,
        update: ExpenseUpdate,
    ) -> Result<Expense, StoreError> {
        self.modify(|s| s.update_expense(id, update, Utc::now()))
    }

    async fn delete_expense(&self, id: &str) -> Result<(), StoreError> {
        self.modify(|s| s.delete_expense(id, Utc::now()))
    }

    async fn expenses_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Expense>, StoreError> {
        Ok(self.state().expenses_between(from, to))
    }

    async fn append_day_log(
        &self,
        date: DateTime<Utc>,
        stars: f64,
        comment: DayComment,
    ) -> Result<DayLogWrite, StoreError> {
        self.modify(|s| Ok(s.append_day_log(date, stars, comment)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn survives_reopening() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let store = FileStore::open(&path).unwrap();
        let expense = store
            .create_expense(NewExpense {
                description: "Coffee".to_string(),
                cost: 3.5,
                category_name: "Food".to_string(),
                date: Utc::now(),
            })
            .await
            .unwrap();
        drop(store);

        let reopened = FileStore::open(&path).unwrap();
        let updated = reopened
            .update_expense(
                &expense.id,
                ExpenseUpdate {
                    cost: Some(4.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.description, "Coffee");
        assert_eq!(updated.cost, 4.0);
        assert!(reopened.delete_expense("999").await.is_err());
    }

    #[test]
    fn corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "not json").unwrap();
        assert!(matches!(
            FileStore::open(&path),
            Err(StoreError::Serialization(_))
        ));
    }
}
