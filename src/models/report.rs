use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;

use crate::models::Expense;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
    pub count: usize,
}

impl CategoryTotal {
    pub fn average(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.total / self.count as f64
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_expenses: f64,
    pub by_category: Vec<CategoryTotal>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

/// Everything that goes into an expense report
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportData {
    pub expenses: Vec<Expense>,
    pub summary: Summary,
    pub date_range: DateRange,
}

impl ReportData {
    /// Builds the report for the given expenses
    ///
    /// Categories are sorted by total, largest first. Ties keep the order in which the
    /// categories first appear in `expenses`.
    pub fn new(expenses: Vec<Expense>, from: DateTime<Utc>, to: DateTime<Utc>) -> ReportData {
        let mut totals: IndexMap<String, CategoryTotal> = IndexMap::new();
        for expense in expenses.iter() {
            let entry = totals
                .entry(expense.category.name.clone())
                .or_insert_with(|| CategoryTotal {
                    category: expense.category.name.clone(),
                    total: 0.0,
                    count: 0,
                });
            entry.total += expense.cost;
            entry.count += 1;
        }
        let mut by_category: Vec<CategoryTotal> = totals.into_iter().map(|(_, v)| v).collect();
        by_category.sort_by(|a, b| {
            b.total
                .partial_cmp(&a.total)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        ReportData {
            summary: Summary {
                total_expenses: expenses.iter().map(|e| e.cost).sum(),
                by_category,
            },
            expenses,
            date_range: DateRange { from, to },
        }
    }
}
