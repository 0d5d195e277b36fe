//! Command line interface for MCC, built on clap.
//!
//! Defines the [`Cli`] struct with the [`Command`] subcommands (scaffold,
//! uplink, approve, merge, refine, status, run) and global flags
//! (--store, --verbose).

use clap::{Parser, Subcommand, ValueEnum};

use crate::lifecycle::AgentMode;

/// MCC — Mission Command Center job engine.
#[derive(Debug, Parser)]
#[command(name = "mcc", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path of the job store document (overrides mcc.toml).
    #[arg(long, global = true)]
    pub store: Option<String>,

    /// Show full job logs instead of the latest line.
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,
}

/// Agent mode accepted on the command line.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum ModeArg {
    /// Run end to end without pausing for plan review.
    #[default]
    Auto,
    /// Pause after planning until the plan is approved.
    Interactive,
}

impl From<ModeArg> for AgentMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Auto => AgentMode::Auto,
            ModeArg::Interactive => AgentMode::Interactive,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Launch a job that scaffolds a fresh repository from a recipe.
    Scaffold {
        /// Repository name to create.
        name: String,

        /// Generator recipe identifier.
        #[arg(long, default_value = "rust-tauri")]
        recipe: String,

        /// Agent instructions (the AGENTS.md content).
        #[arg(long, default_value = "")]
        context: String,

        #[arg(long, value_enum, default_value_t)]
        mode: ModeArg,

        /// Dashboard icon name carried on the job card.
        #[arg(long)]
        icon: Option<String>,
    },

    /// Launch a job against an existing repository.
    Uplink {
        /// Repository in "owner/repo" form.
        repo: String,

        #[arg(long, default_value = "")]
        context: String,

        #[arg(long, value_enum, default_value_t)]
        mode: ModeArg,
    },

    /// Approve the plan of a job waiting for review.
    Approve {
        job_id: String,
    },

    /// Merge the pull request of a job that is PR-ready.
    Merge {
        job_id: String,
    },

    /// Send plan feedback to the planner without approving.
    Refine {
        job_id: String,
        feedback: String,
    },

    /// Show the job board.
    Status,

    /// Drive pending jobs with the simulated agent until every job is
    /// waiting on a decision or merged.
    Run {
        /// Stop after this many ticks even if jobs are still moving.
        #[arg(long)]
        ticks: Option<u64>,

        /// Seed the simulator for a reproducible run.
        #[arg(long)]
        seed: Option<u64>,

        /// Milliseconds between ticks (overrides mcc.toml).
        #[arg(long)]
        interval_ms: Option<u64>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_scaffold_subcommand() {
        let cli = Cli::parse_from(["mcc", "scaffold", "my-app", "--mode", "interactive"]);
        match cli.command {
            Command::Scaffold {
                name, recipe, mode, ..
            } => {
                assert_eq!(name, "my-app");
                assert_eq!(recipe, "rust-tauri");
                assert!(matches!(mode, ModeArg::Interactive));
            }
            _ => panic!("expected Scaffold command"),
        }
    }

    #[test]
    fn cli_parses_uplink_with_defaults() {
        let cli = Cli::parse_from(["mcc", "uplink", "octo/repo"]);
        match cli.command {
            Command::Uplink {
                repo,
                context,
                mode,
            } => {
                assert_eq!(repo, "octo/repo");
                assert!(context.is_empty());
                assert!(matches!(mode, ModeArg::Auto));
            }
            _ => panic!("expected Uplink command"),
        }
    }

    #[test]
    fn cli_parses_global_flags_and_run_options() {
        let cli = Cli::parse_from([
            "mcc",
            "--store",
            "/tmp/jobs.json",
            "--verbose",
            "run",
            "--seed",
            "42",
            "--ticks",
            "10",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.store.as_deref(), Some("/tmp/jobs.json"));
        match cli.command {
            Command::Run { ticks, seed, .. } => {
                assert_eq!(ticks, Some(10));
                assert_eq!(seed, Some(42));
            }
            _ => panic!("expected Run command"),
        }
    }

    #[test]
    fn cli_parses_refine_with_feedback() {
        let cli = Cli::parse_from(["mcc", "refine", "job-1", "split the migration"]);
        match cli.command {
            Command::Refine { job_id, feedback } => {
                assert_eq!(job_id, "job-1");
                assert_eq!(feedback, "split the migration");
            }
            _ => panic!("expected Refine command"),
        }
    }

    #[test]
    fn cli_verify() {
        Cli::command().debug_assert();
    }
}
