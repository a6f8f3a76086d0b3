#![allow(dead_code)]
use std::collections::HashMap;
use std::sync::Arc;

use walletwhisper::commands::{default_registry, Services};
use walletwhisper::config::Config;
use walletwhisper::mail::MemoryMailer;
use walletwhisper::registry::{CommandRegistry, Parameters};
use walletwhisper::run_app;
use walletwhisper::store::MemoryStore;

pub fn test_args(args: &[&str]) {
    let mut function_args: Vec<&str> = vec!["testing"];
    for arg in args {
        function_args.push(arg);
    }
    let res = run_app(function_args.iter().map(|x| x.to_string()).collect());
    assert!(res.is_ok());
}

pub fn test_err(args: &[&str]) {
    let mut function_args: Vec<&str> = vec!["testing"];
    for arg in args {
        function_args.push(arg);
    }
    let res = run_app(function_args.iter().map(|x| x.to_string()).collect());
    assert!(res.is_err());
}

pub fn config() -> Config {
    Config {
        api_key: Some("secret".to_string()),
        default_category: Some("General".to_string()),
        recipient_email: Some("me@example.com".to_string()),
        report_sender: None,
    }
}

/// A registry backed by memory, with access to the mail that was sent
pub fn registry(config: Config) -> (CommandRegistry, Arc<MemoryMailer>) {
    let mailer = Arc::new(MemoryMailer::new());
    let services = Services::new(Arc::new(MemoryStore::new()), mailer.clone(), config);
    (default_registry(services), mailer)
}

pub fn instruction(text: &str) -> Option<Parameters> {
    let mut parameters = HashMap::new();
    parameters.insert("instruction".to_string(), text.to_string());
    Some(parameters)
}
