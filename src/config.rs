//! Configuration
//!
//! Secrets and defaults come from the environment. Command line options may also be
//! stored in an init file, see [`merge_init_file`].
use log::debug;
use std::fs::read_to_string;
use std::path::{Path, PathBuf};

use crate::ConfigError;

pub const API_KEY: &str = "API_KEY";
pub const DEFAULT_CATEGORY: &str = "DEFAULT_CATEGORY";
pub const RECIPIENT_EMAIL: &str = "RECIPIENT_EMAIL";
pub const REPORT_SENDER: &str = "REPORT_SENDER";

/// Values read from the environment, empty variables count as unset
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub api_key: Option<String>,
    pub default_category: Option<String>,
    pub recipient_email: Option<String>,
    pub report_sender: Option<String>,
}

impl Config {
    pub fn from_env() -> Config {
        Config::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Config {
        let get = |key: &str| lookup(key).filter(|x| !x.trim().is_empty());
        Config {
            api_key: get(API_KEY),
            default_category: get(DEFAULT_CATEGORY),
            recipient_email: get(RECIPIENT_EMAIL),
            report_sender: get(REPORT_SENDER),
        }
    }

    pub fn api_key(&self) -> Result<&str, ConfigError> {
        required(&self.api_key, API_KEY)
    }
    pub fn default_category(&self) -> Result<&str, ConfigError> {
        required(&self.default_category, DEFAULT_CATEGORY)
    }
    pub fn recipient_email(&self) -> Result<&str, ConfigError> {
        required(&self.recipient_email, RECIPIENT_EMAIL)
    }
}

fn required<'a>(value: &'a Option<String>, name: &'static str) -> Result<&'a str, ConfigError> {
    value.as_deref().ok_or(ConfigError::Missing(name))
}

const INIT_FILE_FLAG: &str = "--init-file";
const NO_INIT_FILE_FLAG: &str = "--args-only";
const INIT_PATHS_UNDER_DIR: &str = "~/.walletwhisperrc";
const INIT_PATHS: &str = ".walletwhisperrc";

/// Candidate init files, most specific first
fn init_paths(args: &[String]) -> Vec<String> {
    let mut possible_paths: Vec<String> = Vec::new();
    for i in 0..args.len() {
        if args[i] == NO_INIT_FILE_FLAG {
            return vec![];
        } else if args[i] == INIT_FILE_FLAG {
            if let Some(path) = args.get(i + 1) {
                possible_paths.push(path.clone());
            }
        }
    }
    possible_paths.push(shellexpand::tilde(INIT_PATHS_UNDER_DIR).to_string());
    possible_paths.push(INIT_PATHS.to_string());
    possible_paths
}

/// Adds the options of the first existing init file to the argument vector
///
/// Every line of the file is either an option (`--store diary.json`), a comment starting
/// with one of `; # ! %`, or blank. Options already given on the command line are not
/// overridden.
pub fn merge_init_file(mut args: Vec<String>) -> Result<Vec<String>, ConfigError> {
    let config_file = init_paths(&args)
        .into_iter()
        .map(PathBuf::from)
        .find(|x| x.exists());
    let file = match config_file {
        Some(x) => x,
        None => return Ok(args),
    };
    debug!("Reading options from {:?}", file);
    let contents = read_to_string(&file)?;
    for line in contents.lines() {
        let option = line.trim();
        match option.chars().next() {
            Some('-') => {
                if !option.starts_with("--") {
                    return Err(bad_line(&file, line));
                }
                let mut iter = option.split_whitespace();
                let name = match iter.next() {
                    Some(x) => x,
                    None => return Err(bad_line(&file, line)),
                };
                if !args.iter().any(|x| x == name) {
                    args.push(name.to_string());
                    let rest: Vec<&str> = iter.collect();
                    if !rest.is_empty() {
                        args.push(rest.join(" "));
                    }
                }
            }
            Some(';') | Some('#') | Some('!') | Some('%') | None => (), // a comment
            Some(_) => return Err(bad_line(&file, line)),
        }
    }
    Ok(args)
}

fn bad_line(file: &Path, line: &str) -> ConfigError {
    ConfigError::BadInitFile {
        file: file.to_path_buf(),
        line: line.to_string(),
    }
}
