//! Expense reports sent by mail
use chrono::{DateTime, Utc};
use log::info;
use std::sync::Arc;

use super::Services;
use crate::mail::{Attachment, Email, Mailer};
use crate::models::{ReportData, Response};
use crate::parser::ParsedCommand;
use crate::store::ExpenseStore;
use crate::{ConfigError, HandlerError};

pub const JSON_ATTACHMENT: &str = "expense-report.json";

/// Builds expense reports and mails them to the configured recipient
pub struct ExpenseReporter {
    store: Arc<dyn ExpenseStore>,
    mailer: Arc<dyn Mailer>,
    recipient: String,
    sender: String,
}

impl ExpenseReporter {
    pub fn new(services: &Services) -> Result<Self, ConfigError> {
        let recipient = services.config.recipient_email()?.to_string();
        let sender = services
            .config
            .report_sender
            .clone()
            .unwrap_or_else(|| recipient.clone());
        Ok(ExpenseReporter {
            store: services.store.clone(),
            mailer: services.mailer.clone(),
            recipient,
            sender,
        })
    }

    pub async fn generate_report(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<ReportData, HandlerError> {
        let expenses = self.store.expenses_between(from, to).await?;
        Ok(ReportData::new(expenses, from, to))
    }

    pub async fn send_report(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        include_json: bool,
    ) -> Result<ReportData, HandlerError> {
        let report = self.generate_report(from, to).await?;
        let mut attachments = vec![];
        if include_json {
            let json = serde_json::to_string_pretty(&report)?;
            attachments.push(Attachment::new(JSON_ATTACHMENT, json.as_bytes()));
        }
        let email = Email {
            from: self.sender.clone(),
            to: self.recipient.clone(),
            subject: format!(
                "Expense Report: {} - {}",
                short_date(&from),
                short_date(&to)
            ),
            html: render_html(&report),
            attachments,
        };
        self.mailer.send(email).await?;
        info!(
            "Sent report with {} expenses to {}",
            report.expenses.len(),
            self.recipient
        );
        Ok(report)
    }
}

pub(crate) async fn report(
    services: &Services,
    command: &ParsedCommand,
) -> Result<Response, HandlerError> {
    let reporter = ExpenseReporter::new(services)?;
    let from = match command.date("from") {
        Some(x) => x,
        None => return Ok(Response::failure("Missing required flag: from")),
    };
    let to = command.date("to").unwrap_or_else(Utc::now);
    let include_json = command.boolean("export").unwrap_or(false);

    reporter.send_report(from, to, include_json).await?;
    Ok(Response::success(format!(
        "Report sent for period: {} to {}",
        long_date(&from),
        long_date(&to)
    )))
}

/// `March 5, 2024`
pub fn long_date(date: &DateTime<Utc>) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// `3/5/2024`
pub fn short_date(date: &DateTime<Utc>) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

/// Formats an amount of euros as `€1,234.50`
pub fn format_currency(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let digits = (cents / 100).to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}€{}.{:02}", sign, grouped, cents % 100)
}

fn escape_html(content: &str) -> String {
    content
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

const STYLE: &str = "
      body { font-family: Arial, sans-serif; line-height: 1.6; color: #333; }
      table { border-collapse: collapse; width: 100%; margin: 20px 0; }
      th, td { padding: 12px; text-align: left; border-bottom: 1px solid #ddd; }
      th { background-color: #f5f5f5; }
      .summary { margin: 20px 0; padding: 20px; background: #f9f9f9; border-radius: 5px; }
      .category-summary { margin-top: 10px; }";

/// Renders the body of the report mail
pub fn render_html(report: &ReportData) -> String {
    let mut categories = String::new();
    for category in report.summary.by_category.iter() {
        categories.push_str(&format!(
            "\n          <tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape_html(&category.category),
            format_currency(category.total),
            category.count,
            format_currency(category.average())
        ));
    }
    let mut expenses = String::new();
    for expense in report.expenses.iter() {
        expenses.push_str(&format!(
            "\n      <tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            long_date(&expense.created_at),
            escape_html(&expense.description),
            escape_html(&expense.category.name),
            format_currency(expense.cost)
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html>
  <head>
    <style>{style}
    </style>
  </head>
  <body>
    <h1>Expense Report</h1>
    <p>From {from} to {to}</p>
    <div class="summary">
      <h2>Summary</h2>
      <p><strong>Total Expenses:</strong> {total}</p>
      <div class="category-summary">
        <h3>Expenses by Category</h3>
        <table>
          <tr><th>Category</th><th>Total</th><th>Count</th><th>Average</th></tr>{categories}
        </table>
      </div>
    </div>
    <h2>Detailed Expenses</h2>
    <table>
      <tr><th>Date</th><th>Description</th><th>Category</th><th>Amount</th></tr>{expenses}
    </table>
  </body>
</html>
"#,
        style = STYLE,
        from = long_date(&report.date_range.from),
        to = long_date(&report.date_range.to),
        total = format_currency(report.summary.total_expenses),
        categories = categories,
        expenses = expenses,
    )
}
