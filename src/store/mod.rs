//! Storage of expenses, categories and day logs
//!
//! The handlers only talk to the [`ExpenseStore`] trait. Two implementations are
//! provided: [`MemoryStore`] keeps everything in memory and [`FileStore`] persists the
//! same data as a JSON document after every change.
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{
    Category, DayComment, DayLog, DayLogWrite, Expense, ExpenseUpdate, HasName, NewExpense,
};
use crate::StoreError;

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

#[async_trait]
pub trait ExpenseStore: Send + Sync {
    /// Creates an expense, creating its category if it does not exist yet
    async fn create_expense(&self, expense: NewExpense) -> Result<Expense, StoreError>;
    /// Updates an expense that is not deleted
    async fn update_expense(&self, id: &str, update: ExpenseUpdate)
        -> Result<Expense, StoreError>;
    /// Marks an expense as deleted
    async fn delete_expense(&self, id: &str) -> Result<(), StoreError>;
    /// Expenses that are not deleted with `from <= created_at <= to`, newest first
    async fn expenses_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Expense>, StoreError>;
    /// Appends a comment to the log of `date`, creating the log if needed
    async fn append_day_log(
        &self,
        date: DateTime<Utc>,
        stars: f64,
        comment: DayComment,
    ) -> Result<DayLogWrite, StoreError>;
}

/// The whole content of a store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Snapshot {
    next_id: u64,
    categories: Vec<Category>,
    expenses: Vec<Expense>,
    day_logs: Vec<DayLog>,
}

impl Snapshot {
    fn new_id(&mut self) -> String {
        self.next_id += 1;
        self.next_id.to_string()
    }

    fn category(&mut self, name: &str) -> Category {
        if let Some(x) = self.categories.iter().find(|c| c.get_name() == name) {
            return x.clone();
        }
        let category = Category {
            id: self.new_id(),
            name: name.to_string(),
        };
        self.categories.push(category.clone());
        category
    }

    fn live_expense(&mut self, id: &str) -> Result<&mut Expense, StoreError> {
        self.expenses
            .iter_mut()
            .find(|e| e.id == id && !e.deleted)
            .ok_or_else(|| StoreError::NotFound(format!("expense {}", id)))
    }

    pub(crate) fn create_expense(&mut self, expense: NewExpense, now: DateTime<Utc>) -> Expense {
        let category = self.category(&expense.category_name);
        let created = Expense {
            id: self.new_id(),
            description: expense.description,
            cost: expense.cost,
            category,
            deleted: false,
            created_at: expense.date,
            updated_at: now,
        };
        self.expenses.push(created.clone());
        created
    }

    pub(crate) fn update_expense(
        &mut self,
        id: &str,
        update: ExpenseUpdate,
        now: DateTime<Utc>,
    ) -> Result<Expense, StoreError> {
        self.live_expense(id)?;
        let category = update.category_name.map(|name| self.category(&name));
        let expense = self.live_expense(id)?;
        if let Some(description) = update.description {
            expense.description = description;
        }
        if let Some(cost) = update.cost {
            expense.cost = cost;
        }
        if let Some(category) = category {
            expense.category = category;
        }
        expense.updated_at = now;
        Ok(expense.clone())
    }

    pub(crate) fn delete_expense(&mut self, id: &str, now: DateTime<Utc>) -> Result<(), StoreError> {
        let expense = self.live_expense(id)?;
        expense.deleted = true;
        expense.updated_at = now;
        Ok(())
    }

    pub(crate) fn expenses_between(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Vec<Expense> {
        let mut found: Vec<Expense> = self
            .expenses
            .iter()
            .filter(|e| !e.deleted && e.created_at >= from && e.created_at <= to)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        found
    }

    pub(crate) fn append_day_log(
        &mut self,
        date: DateTime<Utc>,
        stars: f64,
        comment: DayComment,
    ) -> DayLogWrite {
        if let Some(log) = self.day_logs.iter_mut().find(|l| l.date == date) {
            log.stars = stars;
            log.comments.push(comment);
            return DayLogWrite::Appended(log.clone());
        }
        let log = DayLog {
            id: self.new_id(),
            date,
            stars,
            comments: vec![comment],
        };
        self.day_logs.push(log.clone());
        DayLogWrite::Created(log)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn new_expense(description: &str, category: &str, day: u32) -> NewExpense {
        NewExpense {
            description: description.to_string(),
            cost: 10.0,
            category_name: category.to_string(),
            date: Utc.with_ymd_and_hms(2024, 5, day, 9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn categories_are_created_once() {
        let now = Utc::now();
        let mut snapshot = Snapshot::default();
        let a = snapshot.create_expense(new_expense("a", "Food", 1), now);
        let b = snapshot.create_expense(new_expense("b", "Food", 2), now);
        assert_eq!(a.category, b.category);
        assert_eq!(snapshot.categories.len(), 1);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn deleted_expenses_are_hidden() {
        let now = Utc::now();
        let mut snapshot = Snapshot::default();
        let a = snapshot.create_expense(new_expense("a", "Food", 1), now);
        let b = snapshot.create_expense(new_expense("b", "Food", 3), now);
        snapshot.delete_expense(&a.id, now).unwrap();

        let from = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2024, 5, 31, 0, 0, 0).unwrap();
        let found = snapshot.expenses_between(from, to);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, b.id);

        assert!(matches!(
            snapshot.delete_expense(&a.id, now),
            Err(StoreError::NotFound(_))
        ));
        assert!(snapshot
            .update_expense(&a.id, ExpenseUpdate::default(), now)
            .is_err());
    }

    #[test]
    fn day_logs_accumulate_comments() {
        let mut snapshot = Snapshot::default();
        let day = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        let comment = |text: &str| DayComment {
            text: text.to_string(),
            timestamp: Utc::now(),
        };
        assert!(matches!(
            snapshot.append_day_log(day, 3.0, comment("first")),
            DayLogWrite::Created(_)
        ));
        match snapshot.append_day_log(day, 4.0, comment("second")) {
            DayLogWrite::Appended(log) => {
                assert_eq!(log.comments.len(), 2);
                assert_eq!(log.stars, 4.0);
            }
            other => panic!("expected an appended log, got {:?}", other),
        }
    }
}
