use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::{Mutex, MutexGuard};

use super::{ExpenseStore, Snapshot};
use crate::models::{DayComment, DayLogWrite, Expense, ExpenseUpdate, NewExpense};
use crate::StoreError;

/// A store that lives as long as the process
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<Snapshot>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    fn state(&self) -> MutexGuard<'_, Snapshot> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl ExpenseStore for MemoryStore {
    async fn create_expense(&self, expense: NewExpense) -> Result<Expense, StoreError> {
        Ok(self.state().create_expense(expense, Utc::now()))
    }

    async fn update_expense(
        &self,
        id: &str,
        update: ExpenseUpdate,
    ) -> Result<Expense, StoreError> {
        self.state().update_expense(id, update, Utc::now())
    }

    async fn delete_expense(&self, id: &str) -> Result<(), StoreError> {
        self.state().delete_expense(id, Utc::now())
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
        Ok(self.state().append_day_log(date, stars, comment))
    }
}
