use std::path::Path;

use chrono::{DateTime, Local};
use colored::Colorize;
use devcache::utils::{display_path, format_size};
use devcache::{Availability, RunOutcome, Status, TargetStatus};

pub fn print_banner() {
    println!(
        "{}",
        concat!("devcache - developer cache cleaner v", env!("CARGO_PKG_VERSION"))
            .bold()
            .cyan()
    );
    println!();
}

pub fn print_target_row(status: &TargetStatus) {
    let target = status.target;
    let marker = match &status.availability {
        Availability::Available => "available".green(),
        Availability::Unavailable(reason) => reason.as_str().yellow(),
    };
    println!(
        "  {:<16} {:<24} {}",
        target.id.bold(),
        target.display_name,
        marker
    );
    println!("  {:<16} {}", "", target.description.dimmed());
}

pub fn print_unavailable(status: &TargetStatus) {
    println!(
        "  {} {}",
        format!("{}:", status.target.display_name).bold(),
        status.availability.to_string().yellow()
    );
}

pub fn print_all_available() {
    println!("{}", "Every target is available.".green());
}

pub fn print_outcome(outcome: &RunOutcome, dry_run: bool) {
    match &outcome.status {
        Status::Success => {
            let verb = if dry_run { "Would free" } else { "Freed" };
            println!(
                "  {:<24} {} {}  {}",
                outcome.display_name.bold(),
                verb,
                format_size(outcome.freed_bytes).yellow(),
                format!("({} entries)", outcome.entries.len()).dimmed()
            );
        }
        Status::Skipped(reason) => {
            println!(
                "  {:<24} {}",
                outcome.display_name.bold(),
                format!("skipped: {reason}").dimmed()
            );
        }
        Status::Failed(reason) => {
            println!(
                "  {:<24} {}",
                outcome.display_name.bold(),
                format!("failed: {reason}").red()
            );
        }
    }
}

pub fn print_entry(path: &Path, size: u64, home: &Path) {
    println!(
        "    {}  {}",
        display_path(path, home).dimmed(),
        format_size(size).yellow()
    );
}

pub fn print_suppressed(message: &str, home: &Path) {
    let shortened = message.replace(&home.display().to_string(), "~");
    println!("    {} {}", "Skipped".yellow(), shortened.dimmed());
}

pub fn print_separator() {
    println!("  {}", "─".repeat(45).dimmed());
}

pub fn print_failures(message: &str) {
    println!("{}", "Errors:".red().bold());
    for line in message.lines() {
        println!("  {}", line.red());
    }
}

pub fn print_skips(lines: &[String]) {
    println!("{}", "Skipped:".yellow().bold());
    for line in lines {
        println!("  {}", line.yellow());
    }
}

pub fn print_clean_complete(freed: u64, at: DateTime<Local>) {
    println!(
        "{} {}",
        "Cleaned!".green().bold(),
        format!("{} freed.", format_size(freed)).green()
    );
    println!(
        "{} {}",
        "Last cleaned:".bold(),
        at.format("%Y-%m-%d %H:%M:%S")
    );
}

pub fn print_dry_run_footer(freed: u64) {
    println!(
        "{}",
        format!(
            "This was a dry run; {} would be freed. Run without --dry-run to delete.",
            format_size(freed)
        )
        .yellow()
        .bold()
    );
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "Error:".red().bold(), msg.red());
}

pub fn print_hint(msg: &str) {
    eprintln!("{} {}", "Hint:".cyan().bold(), msg);
}
