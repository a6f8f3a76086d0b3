use chrono::Utc;
use log::info;

use super::Services;
use crate::models::{Expense, ExpenseUpdate, ExpenseView, NewExpense, Response};
use crate::parser::ParsedCommand;
use crate::{HandlerError, StoreError};

const NOT_FOUND: &str = "Expense not found or already deleted";

fn describe(verb: &str, expense: &Expense) -> Response {
    Response::success(format!(
        "{} expense: {} ({:.2}€) in category {}",
        verb, expense.description, expense.cost, expense.category.name
    ))
    .with_data(&ExpenseView::from(expense))
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|x| !x.is_empty()).map(|x| x.to_string())
}

/// The positional id, an empty one (`update ""`) counts as absent
fn expense_id(command: &ParsedCommand) -> Option<&str> {
    command.id.as_deref().filter(|x| !x.is_empty())
}

pub(crate) async fn add(
    services: &Services,
    command: &ParsedCommand,
) -> Result<Response, HandlerError> {
    let category_name = match non_empty(command.text("cat")) {
        Some(x) => x,
        None => services.config.default_category()?.to_string(),
    };
    let expense = NewExpense {
        description: command.text("desc").unwrap_or_default().to_string(),
        cost: command.number("cost").unwrap_or_default(),
        category_name,
        date: command.date("date").unwrap_or_else(Utc::now),
    };
    if let Err(reason) = expense.validate() {
        return Ok(Response::failure(format!(
            "Expense validation failed: {}",
            reason
        )));
    }

    let created = services.store.create_expense(expense).await?;
    info!("Added expense {} ({})", created.id, created.description);
    Ok(describe("Added", &created))
}

pub(crate) async fn update(
    services: &Services,
    command: &ParsedCommand,
) -> Result<Response, HandlerError> {
    let id = match expense_id(command) {
        Some(x) => x,
        None => return Ok(Response::failure("Expense ID is required for update")),
    };
    let update = ExpenseUpdate {
        description: non_empty(command.text("desc")),
        cost: command.number("cost"),
        category_name: non_empty(command.text("cat")),
    };
    if let Err(reason) = update.validate() {
        return Ok(Response::failure(format!(
            "Expense validation failed: {}",
            reason
        )));
    }

    match services.store.update_expense(id, update).await {
        Ok(expense) => {
            info!("Updated expense {}", expense.id);
            Ok(describe("Updated", &expense))
        }
        Err(StoreError::NotFound(_)) => Ok(Response::failure(NOT_FOUND)),
        Err(err) => Err(err.into()),
    }
}

pub(crate) async fn delete(
    services: &Services,
    command: &ParsedCommand,
) -> Result<Response, HandlerError> {
    let id = match expense_id(command) {
        Some(x) => x,
        None => return Ok(Response::failure("Expense ID is required for deletion")),
    };
    match services.store.delete_expense(id).await {
        Ok(()) => {
            info!("Deleted expense {}", id);
            Ok(Response::success(format!("Deleted expense with ID: {}", id)))
        }
        Err(StoreError::NotFound(_)) => Ok(Response::failure(NOT_FOUND)),
        Err(err) => Err(err.into()),
    }
}
