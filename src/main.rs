mod cli;
mod output;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};
use devcache::{Availability, CleanerRegistry, Environment, RunOptions, Status};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            output::print_error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<ExitCode> {
    let env = match cli.home {
        Some(home) => Environment::sandboxed(home),
        None => Environment::detect().context("cannot locate user directories")?,
    };
    let registry = CleanerRegistry::new(env);

    match cli.command {
        Command::List => {
            for status in registry.list_targets() {
                output::print_target_row(&status);
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Check { id } => {
            let availability = registry
                .check(&id)
                .with_context(|| format!("cannot check `{id}`"))?;
            println!("{id}: {availability}");
            Ok(match availability {
                Availability::Available => ExitCode::SUCCESS,
                Availability::Unavailable(_) => ExitCode::FAILURE,
            })
        }
        Command::Refresh => {
            let unavailable = registry.refresh();
            for status in &unavailable {
                output::print_unavailable(status);
            }
            if unavailable.is_empty() {
                output::print_all_available();
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Clean {
            ids,
            all,
            dry_run,
            parallel,
        } => {
            let selected: Vec<String> = if all {
                registry.targets().map(|t| t.id.to_string()).collect()
            } else {
                ids
            };
            let options = RunOptions {
                dry_run,
                parallel,
                ..RunOptions::default()
            };
            clean(&registry, &selected, &options)
        }
    }
}

fn clean(
    registry: &CleanerRegistry,
    selected: &[String],
    options: &RunOptions,
) -> Result<ExitCode> {
    let report = match registry.run_with(selected, options) {
        Ok(report) => report,
        Err(err) if err.is_programming_error() => {
            output::print_error(&err.to_string());
            output::print_hint("run `devcache list` to see the valid target ids");
            return Ok(ExitCode::FAILURE);
        }
        Err(err) => return Err(err).context("cannot start cleaning"),
    };
    output::print_banner();
    let home = &registry.env().home;

    for outcome in &report.outcomes {
        output::print_outcome(outcome, report.dry_run);
        if report.dry_run && outcome.status == Status::Success {
            for entry in &outcome.entries {
                output::print_entry(&entry.path, entry.size_bytes, home);
            }
        }
        for message in &outcome.suppressed {
            output::print_suppressed(message, home);
        }
    }
    output::print_separator();

    if let Some(message) = report.error_message() {
        output::print_failures(&message);
    }
    let skips = report.skip_messages();
    if !skips.is_empty() {
        output::print_skips(&skips);
    }

    if report.dry_run {
        output::print_dry_run_footer(report.total_freed());
    } else {
        output::print_clean_complete(report.total_freed(), report.finished_at);
    }

    Ok(if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
