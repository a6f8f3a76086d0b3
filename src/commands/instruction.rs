use async_trait::async_trait;
use log::warn;

use super::{daylog, expense, report, Services};
use crate::catalog::{diary_commands, expense_commands};
use crate::models::Response;
use crate::parser::{ParsedCommand, Parser};
use crate::registry::{CommandHandler, Parameters};
use crate::HandlerError;

/// Runs instructions written in the command language
pub struct InstructionCommand {
    parser: Parser,
    services: Services,
    parameter_names: &'static [&'static str],
}

impl InstructionCommand {
    /// Expense commands only. The instruction may also come in the `message` parameter.
    pub fn expense(services: Services) -> Self {
        InstructionCommand {
            parser: Parser::with_commands(expense_commands()),
            services,
            parameter_names: &["instruction", "message"],
        }
    }

    /// Expense commands, reports and day logs
    pub fn diary(services: Services) -> Self {
        InstructionCommand {
            parser: Parser::with_commands(diary_commands()),
            services,
            parameter_names: &["instruction"],
        }
    }

    pub fn parser(&self) -> &Parser {
        &self.parser
    }

    fn instruction<'a>(&self, parameters: &'a Option<Parameters>) -> Option<&'a str> {
        let parameters = parameters.as_ref()?;
        self.parameter_names
            .iter()
            .filter_map(|name| parameters.get(*name))
            .map(|x| x.as_str())
            .find(|x| !x.is_empty())
    }

    async fn execute(&self, command: &ParsedCommand) -> Result<Response, HandlerError> {
        match command.command.as_str() {
            "add" => expense::add(&self.services, command).await,
            "update" => expense::update(&self.services, command).await,
            "delete" => expense::delete(&self.services, command).await,
            "report" => report::report(&self.services, command).await,
            "daylog" => daylog::daylog(&self.services, command).await,
            other => Ok(Response::failure(format!("Unknown command: {}", other))),
        }
    }
}

#[async_trait]
impl CommandHandler for InstructionCommand {
    async fn handle(&self, parameters: Option<Parameters>) -> Result<Response, HandlerError> {
        let instruction = match self.instruction(&parameters) {
            Some(x) => x,
            None => return Ok(Response::failure("Instruction parameter is missing.")),
        };
        match self.parser.parse(instruction) {
            Ok(command) => self.execute(&command).await,
            Err(err) => {
                warn!("Rejected instruction {:?}: {}", instruction, err);
                Ok(Response::failure(err.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::mail::MemoryMailer;
    use crate::store::MemoryStore;
    use std::sync::Arc;

    fn services() -> Services {
        Services::new(
            Arc::new(MemoryStore::new()),
            Arc::new(MemoryMailer::new()),
            Config::default(),
        )
    }

    #[test]
    fn catalogs() {
        let expense = InstructionCommand::expense(services());
        let names: Vec<&str> = expense
            .parser()
            .commands()
            .values()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["add", "update", "delete"]);

        let diary = InstructionCommand::diary(services());
        assert_eq!(diary.parser().commands().len(), 5);
        assert!(diary.parser().commands().get("daylog").is_some());
    }

    #[test]
    fn instruction_parameter() {
        let expense = InstructionCommand::expense(services());
        let mut parameters = Parameters::new();
        parameters.insert("instruction".to_string(), String::new());
        parameters.insert("message".to_string(), "delete 1".to_string());
        let parameters = Some(parameters);
        assert_eq!(expense.instruction(&parameters), Some("delete 1"));

        let mut blank = Parameters::new();
        blank.insert("instruction".to_string(), "  ".to_string());
        let blank = Some(blank);
        assert_eq!(expense.instruction(&blank), Some("  "));
        assert_eq!(expense.instruction(&None), None);
    }
}
