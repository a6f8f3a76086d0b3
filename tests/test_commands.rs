use std::collections::HashMap;

use walletwhisper::config::Config;
use walletwhisper::models::ActionType;
mod common;
use common::{config, instruction};

#[tokio::test]
async fn ping() {
    let (registry, _) = common::registry(config());
    let response = registry.dispatch("ping", None).await;
    assert!(response.success);
    assert_eq!(response.message, "pong");
    assert_eq!(
        response.action.map(|a| a.action_type),
        Some(ActionType::Notification)
    );
}

#[tokio::test]
async fn add_update_delete() {
    let (registry, _) = common::registry(config());

    let response = registry
        .dispatch(
            "diary",
            instruction(r#"add -desc "Team lunch" -cost 12.5 -cat Food"#),
        )
        .await;
    assert!(response.success, "{}", response.message);
    assert_eq!(
        response.message,
        "Added expense: Team lunch (12.50€) in category Food"
    );
    let data = response.data.unwrap();
    assert_eq!(data["category"], "Food");
    let id = data["id"].as_str().unwrap().to_string();

    let response = registry
        .dispatch("diary", instruction(&format!("update {} -cost 14 -cat Work", id)))
        .await;
    assert_eq!(
        response.message,
        "Updated expense: Team lunch (14.00€) in category Work"
    );

    let response = registry
        .dispatch("expense", instruction(&format!("delete {}", id)))
        .await;
    assert!(response.success);
    assert_eq!(response.message, format!("Deleted expense with ID: {}", id));

    for text in [format!("delete {}", id), format!("update {} -desc x", id)].iter() {
        let response = registry.dispatch("diary", instruction(text)).await;
        assert!(!response.success);
        assert_eq!(response.message, "Expense not found or already deleted");
    }
}

#[tokio::test]
async fn default_category() {
    let (registry, _) = common::registry(config());
    let response = registry
        .dispatch("diary", instruction("add -desc Coffee -cost 3.50"))
        .await;
    assert_eq!(
        response.message,
        "Added expense: Coffee (3.50€) in category General"
    );

    let mut without_default = config();
    without_default.default_category = None;
    let (registry, _) = common::registry(without_default);
    let response = registry
        .dispatch("diary", instruction("add -desc Coffee -cost 3.50"))
        .await;
    assert!(!response.success);
    assert_eq!(
        response.message,
        "DEFAULT_CATEGORY environment variable is not set"
    );
}

#[tokio::test]
async fn malformed_instructions() {
    let (registry, _) = common::registry(config());
    let cases = vec![
        ("update 42 -cost abc", "Invalid number for flag cost: abc"),
        ("delete", "Command delete requires an ID"),
        ("", "Instruction parameter is missing."),
        ("   ", "Invalid command format"),
        (r#"update "" -cost 3"#, "Expense ID is required for update"),
        (r#"delete """#, "Expense ID is required for deletion"),
        ("fly -to Paris", "Unknown command: fly"),
        ("add -desc Coffee -cost -2", "Expense validation failed: cost must be positive, got -2"),
        ("add -desc Coffee", "Missing required flag: cost"),
    ];
    for (text, message) in cases {
        let response = registry.dispatch("diary", instruction(text)).await;
        assert!(!response.success, "{} should fail", text);
        assert_eq!(response.message, message);
    }

    let response = registry.dispatch("diary", None).await;
    assert_eq!(response.message, "Instruction parameter is missing.");
}

#[tokio::test]
/// The expense command only knows the expense commands, and accepts the legacy parameter
async fn expense_command() {
    let (registry, _) = common::registry(config());
    let response = registry
        .dispatch("expense", instruction("report -from 2024-01-01"))
        .await;
    assert_eq!(response.message, "Unknown command: report");

    let mut parameters = HashMap::new();
    parameters.insert("message".to_string(), "add -desc Taxi -cost 20".to_string());
    let response = registry.dispatch("expense", Some(parameters.clone())).await;
    assert!(response.success, "{}", response.message);

    // diary only reads the instruction parameter
    let response = registry.dispatch("diary", Some(parameters)).await;
    assert_eq!(response.message, "Instruction parameter is missing.");
}

#[tokio::test]
async fn report_by_mail() {
    let (registry, mailer) = common::registry(config());
    for text in [
        r#"add -desc "Team lunch" -cost 12.5 -cat Food -date 2024-03-05"#,
        "add -desc Train -cost 40 -cat Travel -date 2024-03-10",
        "add -desc Snack -cost 2.5 -cat Food -date 2024-03-12",
        "add -desc Later -cost 99 -cat Food -date 2024-04-02",
    ]
    .iter()
    {
        assert!(registry.dispatch("diary", instruction(text)).await.success);
    }

    let response = registry
        .dispatch(
            "diary",
            instruction("report -from 2024-03-01 -to 2024-03-31 -export true"),
        )
        .await;
    assert!(response.success, "{}", response.message);
    assert_eq!(
        response.message,
        "Report sent for period: March 1, 2024 to March 31, 2024"
    );

    let sent = mailer.sent();
    assert_eq!(sent.len(), 1);
    let email = &sent[0];
    assert_eq!(email.to, "me@example.com");
    assert_eq!(email.from, "me@example.com");
    assert_eq!(email.subject, "Expense Report: 3/1/2024 - 3/31/2024");
    assert!(email.html.contains("<strong>Total Expenses:</strong> €55.00"));
    assert!(!email.html.contains("Later"));
    assert_eq!(email.attachments.len(), 1);
    assert_eq!(email.attachments[0].filename, "expense-report.json");

    let json: serde_json::Value =
        serde_json::from_slice(&email.attachments[0].decode().unwrap()).unwrap();
    assert_eq!(json["expenses"].as_array().unwrap().len(), 3);
    assert_eq!(json["expenses"][0]["description"], "Snack");
    assert_eq!(json["summary"]["byCategory"][0]["category"], "Travel");
}

#[tokio::test]
async fn report_needs_a_recipient() {
    let mut without_recipient = config();
    without_recipient.recipient_email = None;
    let (registry, mailer) = common::registry(without_recipient);
    let response = registry
        .dispatch("diary", instruction("report -from 2024-03-01"))
        .await;
    assert!(!response.success);
    assert_eq!(
        response.message,
        "RECIPIENT_EMAIL environment variable is not set"
    );
    assert!(mailer.sent().is_empty());
}

#[tokio::test]
async fn day_logs() {
    let (registry, _) = common::registry(Config::default());
    let response = registry
        .dispatch(
            "diary",
            instruction(r#"daylog -stars 4 -text "Good day" -date 2024-06-01T21:30:00"#),
        )
        .await;
    assert!(response.success, "{}", response.message);
    assert_eq!(response.message, "Created new log for 6/1/2024");

    let response = registry
        .dispatch(
            "diary",
            instruction(r#"daylog -stars 5 -text "Even better" -date 2024-06-01"#),
        )
        .await;
    assert_eq!(response.message, "Added comment to existing log for 6/1/2024");
    let data = response.data.unwrap();
    assert_eq!(data["stars"], 5.0);
    assert_eq!(data["comments"].as_array().unwrap().len(), 2);
    assert_eq!(data["comments"][1]["text"], "Even better");
}
