//! Document the command line interface
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::Editor;
use std::fs::read_to_string;
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;
use structopt::StructOpt;

use crate::commands::{default_registry, Services};
use crate::config::{merge_init_file, Config};
use crate::handler::{Reply, ShortcutsHandler};
use crate::mail::DirectoryMailer;
use crate::models::Response;
use crate::registry::{CommandRegistry, Parameters};
use crate::store::FileStore;
use crate::Error;

#[derive(Debug, StructOpt)]
enum Command {
    /// Dispatch a single command and print its response
    Run {
        #[structopt(flatten)]
        options: CommonOpts,
        /// The command, e.g. ping, expense or diary
        command: String,
        /// Parameters for the command as key=value
        #[structopt(short = "p", long = "param", parse(try_from_str = parameter_parser))]
        parameters: Vec<(String, String)>,
    },
    /// Process a request body the way the webhook does
    Request {
        #[structopt(flatten)]
        options: CommonOpts,
        /// File with the request body, standard input if absent
        #[structopt(short = "i", long = "input", parse(from_os_str))]
        input: Option<PathBuf>,
    },
    /// Type diary instructions interactively
    Repl(CommonOpts),
}

#[derive(Debug, StructOpt)]
#[structopt(about = "Expense and diary commands for voice shortcuts",
version = env ! ("CARGO_PKG_VERSION"),
author = env ! ("CARGO_PKG_AUTHORS"),
name = "walletwhisper"
)]
struct Opt {
    #[structopt(subcommand)]
    cmd: Command,
}

/// Command line options
#[derive(Debug, StructOpt, Clone)]
pub struct CommonOpts {
    /// JSON file holding expenses and day logs
    #[structopt(
        long = "store",
        parse(from_os_str),
        default_value = "walletwhisper.json"
    )]
    pub store: PathBuf,

    /// Directory where report mails are written
    #[structopt(long = "outbox", parse(from_os_str), default_value = "outbox")]
    pub outbox: PathBuf,

    /// Ignore init file if it exists
    #[structopt(long = "args-only")]
    args_only: bool,

    /// Init file
    #[structopt(long = "init-file", parse(from_os_str))]
    init_file: Option<PathBuf>,

    /// Log debug messages
    #[structopt(short = "v", long = "verbose")]
    pub verbose: bool,
}

impl CommonOpts {
    fn services(&self) -> Result<Services, Error> {
        let store = FileStore::open(&self.store)?;
        Ok(Services::new(
            Arc::new(store),
            Arc::new(DirectoryMailer::new(&self.outbox)),
            Config::from_env(),
        ))
    }
}

fn init_logger(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .try_init();
}

/// Entry point for the command line app
///
/// Load the options from one of the init files, add them to the supplied command line
/// options and run the command accordingly.
pub fn run_app(args: Vec<String>) -> Result<(), Error> {
    let args = merge_init_file(args)?;
    let opt: Opt = Opt::from_iter(args.iter());
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    match opt.cmd {
        Command::Run {
            options,
            command,
            parameters,
        } => {
            init_logger(options.verbose);
            let registry = default_registry(options.services()?);
            let parameters: Parameters = parameters.into_iter().collect();
            let response = runtime.block_on(registry.dispatch(&command, Some(parameters)));
            println!("{}", serde_json::to_string_pretty(&response)?);
            if response.success {
                Ok(())
            } else {
                Err(Error { message: vec![] })
            }
        }
        Command::Request { options, input } => {
            init_logger(options.verbose);
            let body = match input {
                Some(path) => read_to_string(path)?,
                None => {
                    let mut body = String::new();
                    std::io::stdin().read_to_string(&mut body)?;
                    body
                }
            };
            let config = Config::from_env();
            let reply = match ShortcutsHandler::new(&config, default_registry(options.services()?)) {
                Ok(handler) => runtime.block_on(handler.handle_body(&body)),
                Err(err) => {
                    log::error!("Error processing shortcuts request: {}", err);
                    Reply::internal_error()
                }
            };
            println!("{}", serde_json::to_string_pretty(&reply)?);
            if reply.status == 200 {
                Ok(())
            } else {
                Err(Error { message: vec![] })
            }
        }
        Command::Repl(options) => {
            init_logger(options.verbose);
            let registry = default_registry(options.services()?);
            runtime.block_on(repl(&registry))
        }
    }
}

async fn repl(registry: &CommandRegistry) -> Result<(), Error> {
    println!(
        "{}",
        "Type diary instructions, e.g. add -desc \"Coffee\" -cost 3.50. exit to quit.".dimmed()
    );
    let mut rl = Editor::<()>::new();
    loop {
        match rl.readline(">> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                if line == "exit" || line == "quit" {
                    break;
                }
                rl.add_history_entry(line);
                let mut parameters = Parameters::new();
                parameters.insert("instruction".to_string(), line.to_string());
                print_response(&registry.dispatch("diary", Some(parameters)).await);
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => return Err(Error::new(&err.to_string())),
        }
    }
    Ok(())
}

fn print_response(response: &Response) {
    if response.success {
        println!("{}", response.message.green());
    } else {
        println!("{}", response.message.bold().bright_red());
    }
    if let Some(data) = &response.data {
        if let Ok(pretty) = serde_json::to_string_pretty(data) {
            println!("{}", pretty.dimmed());
        }
    }
}

/// A parser for `key=value` parameters
pub fn parameter_parser(parameter: &str) -> Result<(String, String), String> {
    match parameter.find('=') {
        Some(i) if i > 0 => Ok((
            parameter[..i].to_string(),
            parameter[i + 1..].to_string(),
        )),
        _ => Err(format!("Invalid parameter {}, expected key=value", parameter)),
    }
}
