use chrono::{TimeZone, Utc};
use walletwhisper::catalog::{diary_commands, expense_commands};
use walletwhisper::models::{CommandSpec, FlagSpec, FlagType, FlagValue};
use walletwhisper::parser::Parser;
use walletwhisper::ParseError;

#[test]
fn add_with_quoted_description() {
    let parser = Parser::with_commands(expense_commands());
    let parsed = parser
        .parse(r#"add -desc "Team lunch" -cost 12.5 -cat Food"#)
        .unwrap();
    assert_eq!(parsed.command, "add");
    assert_eq!(parsed.id, None);
    let keys: Vec<&str> = parsed.flags.keys().map(|x| x.as_str()).collect();
    assert_eq!(keys, vec!["desc", "cost", "cat"]);
    assert_eq!(parsed.flags["desc"], FlagValue::Text("Team lunch".to_string()));
    assert_eq!(parsed.flags["cost"], FlagValue::Number(12.5));
    assert_eq!(parsed.flags["cat"], FlagValue::Text("Food".to_string()));
}

#[test]
/// Parsing twice gives the same command, dates included
fn idempotent() {
    let parser = Parser::with_commands(diary_commands());
    let instruction = r#"daylog -stars 4 -text "A  long   day" -date 2024-02-10T08:00:00Z"#;
    let first = parser.parse(instruction).unwrap();
    let second = parser.parse(instruction).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.text("text"), Some("A  long   day"));
    assert_eq!(
        first.date("date"),
        Some(Utc.with_ymd_and_hms(2024, 2, 10, 8, 0, 0).unwrap())
    );
}

#[test]
fn numeric_flag_rejects_words() {
    let parser = Parser::with_commands(diary_commands());
    assert_eq!(
        parser.parse("update 42 -cost abc"),
        Err(ParseError::InvalidNumber("cost".into(), "abc".into()))
    );
}

#[test]
fn positional_id_required() {
    let parser = Parser::with_commands(diary_commands());
    assert_eq!(
        parser.parse("delete"),
        Err(ParseError::MissingId("delete".into()))
    );
}

#[test]
/// The expense catalog does not know about reports
fn catalogs_differ() {
    let expenses = Parser::with_commands(expense_commands());
    let diary = Parser::with_commands(diary_commands());
    let instruction = "report -from 2024-01-01";
    assert_eq!(
        expenses.parse(instruction),
        Err(ParseError::UnknownCommand("report".into()))
    );
    assert!(diary.parse(instruction).is_ok());
}

#[test]
fn overlapping_registrations() {
    let mut parser = Parser::with_commands(diary_commands());
    parser.register_command(
        CommandSpec::new("Add")
            .flag(FlagSpec::new("amount", FlagType::Number).required().alias("a")),
    );
    assert_eq!(
        parser.parse("add -desc x -cost 1"),
        Err(ParseError::UnknownFlag("desc".into()))
    );
    let parsed = parser.parse("add -a 2").unwrap();
    assert_eq!(parsed.number("amount"), Some(2.0));
}

#[test]
fn missing_required_flag_after_all_tokens() {
    let parser = Parser::with_commands(diary_commands());
    assert_eq!(
        parser.parse("daylog -text \"nothing to see\""),
        Err(ParseError::MissingRequiredFlag("stars".into()))
    );
}
