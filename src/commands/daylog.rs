use chrono::Utc;
use log::info;

use super::Services;
use crate::models::{DayComment, DayLogWrite, Response};
use crate::parser::utils::start_of_day;
use crate::parser::ParsedCommand;
use crate::HandlerError;

/// Adds a comment to the diary of a day, by default today
pub(crate) async fn daylog(
    services: &Services,
    command: &ParsedCommand,
) -> Result<Response, HandlerError> {
    let day = start_of_day(command.date("date").unwrap_or_else(Utc::now));
    let comment = DayComment {
        text: command.text("text").unwrap_or_default().to_string(),
        timestamp: Utc::now(),
    };
    let stars = command.number("stars").unwrap_or_default();

    let written = services.store.append_day_log(day, stars, comment).await?;
    let label = day.format("%-m/%-d/%Y");
    let message = match &written {
        DayLogWrite::Created(_) => format!("Created new log for {}", label),
        DayLogWrite::Appended(_) => format!("Added comment to existing log for {}", label),
    };
    info!("{}", message);
    Ok(Response::success(message).with_data(written.log()))
}
