use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::HasName;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

impl HasName for Category {
    fn get_name(&self) -> &str {
        self.name.as_str()
    }
}

/// A stored expense. Deleting an expense only marks it as deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    pub description: String,
    pub cost: f64,
    pub category: Category,
    pub deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub description: String,
    pub cost: f64,
    pub category_name: String,
    pub date: DateTime<Utc>,
}

impl NewExpense {
    pub fn validate(&self) -> Result<(), String> {
        if self.description.trim().is_empty() {
            return Err("description must not be empty".to_string());
        }
        validate_cost(self.cost)
    }
}

/// Changes to an expense, `None` leaves the field untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseUpdate {
    pub description: Option<String>,
    pub cost: Option<f64>,
    pub category_name: Option<String>,
}

impl ExpenseUpdate {
    pub fn validate(&self) -> Result<(), String> {
        match self.cost {
            Some(cost) => validate_cost(cost),
            None => Ok(()),
        }
    }
}

fn validate_cost(cost: f64) -> Result<(), String> {
    if cost.is_finite() && cost > 0.0 {
        Ok(())
    } else {
        Err(format!("cost must be positive, got {}", cost))
    }
}

/// The shape of an expense returned to the shortcut
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseView {
    pub id: String,
    pub description: String,
    pub cost: f64,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Expense> for ExpenseView {
    fn from(expense: &Expense) -> Self {
        ExpenseView {
            id: expense.id.clone(),
            description: expense.description.clone(),
            cost: expense.cost,
            category: expense.category.name.clone(),
            created_at: expense.created_at,
            updated_at: expense.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation() {
        let mut expense = NewExpense {
            description: "Coffee".to_string(),
            cost: 3.5,
            category_name: "Food".to_string(),
            date: Utc::now(),
        };
        assert!(expense.validate().is_ok());
        expense.cost = 0.0;
        assert!(expense.validate().is_err());
        expense.cost = 1.0;
        expense.description = "  ".to_string();
        assert!(expense.validate().is_err());

        assert!(ExpenseUpdate::default().validate().is_ok());
        let update = ExpenseUpdate {
            cost: Some(-2.0),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }
}
