mod auth;
mod checker;
mod cli;
mod comments;
mod config;
mod error;
mod fetcher;
mod git;
mod issuetracker;
mod language;
mod logging;
mod report;
mod scan;
mod todos;
mod walk;

use std::io;
use std::process;

use clap::{CommandFactory, Parser};

use checker::TodoError;
use cli::{Cli, Commands};
use config::Config;
use error::Error;
use fetcher::Fetcher;
use logging::{Logger, TracingLogger};
use scan::ScanOptions;

const EXIT_FINDINGS: i32 = 2;
const EXIT_DEFECT: i32 = 3;

fn main() {
    let cli = Cli::parse();

    if let Some(Commands::Completions { shell }) = &cli.command {
        clap_complete::generate(*shell, &mut Cli::command(), "todocheck", &mut io::stdout());
        return;
    }

    logging::init(cli.verbose);
    let logger = TracingLogger;

    let findings = match run(&cli, &logger) {
        Ok(findings) => findings,
        Err(err) => {
            eprintln!("error: {err}");
            process::exit(if err.is_defect() { EXIT_DEFECT } else { 1 });
        }
    };

    if let Err(err) = report::print(cli.format, &findings) {
        eprintln!("error: {err}");
        process::exit(1);
    }
    if !findings.is_empty() {
        process::exit(EXIT_FINDINGS);
    }
}

fn run(cli: &Cli, logger: &dyn Logger) -> Result<Vec<TodoError>, Error> {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| cli.basepath.join(config::DEFAULT_CONFIG));
    let cfg = Config::load(&config_path)?;

    let origin = match &cfg.origin {
        Some(origin) => origin.clone(),
        None => git::detect_origin(&cli.basepath).ok_or_else(|| {
            Error::Config("no origin configured and no \"origin\" git remote found".into())
        })?,
    };

    let problems = config::validation::validate(&cfg, &origin);
    if !problems.is_empty() {
        let list: Vec<String> = problems.iter().map(|p| format!("  - {p}")).collect();
        return Err(Error::Config(format!(
            "validation errors found:\n{}",
            list.join("\n")
        )));
    }

    let kind = cfg.tracker()?;
    let tracker = issuetracker::for_origin(kind, &origin)?;
    let token = auth::acquire_token_interactive(
        &cfg.auth,
        cfg.auth.token_key(&origin),
        &tracker.token_instructions(),
        logger,
    )?;
    let creds = cfg.credentials(token);
    config::validation::warn_unauthenticated(kind, &creds, logger);

    logger.debug(format_args!(
        "checking {} against {kind} issues of {origin}; extensions: {}",
        cli.basepath.display(),
        language::supported_extensions().collect::<Vec<_>>().join(" ")
    ));

    let fetcher = Fetcher::new(tracker, &origin, &creds, logger)?;
    let opts = ScanOptions {
        ignored: cfg.ignored.clone(),
        custom_todos: cfg.custom_todos.clone(),
        case_sensitive: cfg.match_case_sensitive,
    };
    scan::scan(&cli.basepath, &opts, fetcher, logger)
}
