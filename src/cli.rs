use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// Offline checker for capstone scheduling rules.
#[derive(Parser)]
#[command(
    name = "capstone-check",
    version,
    about = "Check semester and milestone payloads against the scheduling rules"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to TOML validator configuration. Defaults apply when omitted.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Validate a semester creation form against existing semesters.
    Semester(SemesterArgs),
    /// Validate and apply a milestone delay update.
    Delay(DelayArgs),
    /// Summarize milestone progress.
    Progress(ProgressArgs),
}

/// Arguments for the `semester` subcommand.
#[derive(clap::Args)]
pub struct SemesterArgs {
    /// JSON file with the existing semesters (bare array or `{ "data": [...] }`).
    #[arg(short, long)]
    pub existing: PathBuf,

    /// JSON file with the candidate semester form.
    #[arg(long)]
    pub candidate: PathBuf,
}

/// Arguments for the `delay` subcommand.
#[derive(clap::Args)]
pub struct DelayArgs {
    /// JSON file with the current milestone record.
    #[arg(short, long)]
    pub milestone: PathBuf,

    /// JSON file with the delay update (`isDelayed`, `dueDate`).
    #[arg(short, long)]
    pub update: PathBuf,
}

/// Arguments for the `progress` subcommand.
#[derive(clap::Args)]
pub struct ProgressArgs {
    /// JSON file with the project's milestones.
    #[arg(short, long)]
    pub milestones: PathBuf,

    /// Reference day for overdue checks (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    pub today: Option<NaiveDate>,
}
