mod backend;
mod cli;
mod config;
mod engine;
mod error;
mod lifecycle;
mod sim;
mod store;
mod ui;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Command};
use config::MccConfig;
use engine::JobEngine;
use ui::{JobBoard, RunProgress};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = MccConfig::load()?;
    if let Some(store) = cli.store {
        config.store_path = store;
    }

    let board = JobBoard::new();

    match cli.command {
        Command::Scaffold {
            name,
            recipe,
            context,
            mode,
            icon,
        } => {
            let mut engine = JobEngine::new(&config, None)?;
            let id = engine
                .create_scaffold_job(&name, &recipe, &context, mode.into(), icon)
                .await?;
            println!("Started scaffold job {id} for {name}");
        }

        Command::Uplink {
            repo,
            context,
            mode,
        } => {
            let mut engine = JobEngine::new(&config, None)?;
            let id = engine
                .create_uplink_job(&repo, &context, mode.into())
                .await?;
            println!("Started uplink job {id} for {repo}");
        }

        Command::Approve { job_id } => {
            let mut engine = JobEngine::new(&config, None)?;
            engine.approve(&job_id).await?;
            println!("Plan approved; job {job_id} is now working");
        }

        Command::Merge { job_id } => {
            let mut engine = JobEngine::new(&config, None)?;
            engine.merge(&job_id).await?;
            println!("Merged job {job_id}");
        }

        Command::Refine { job_id, feedback } => {
            let mut engine = JobEngine::new(&config, None)?;
            engine.refine(&job_id, &feedback).await?;
            println!("Feedback sent for job {job_id}");
        }

        Command::Status => {
            let engine = JobEngine::new(&config, None)?;
            board.render(engine.store(), cli.verbose);
        }

        Command::Run {
            ticks,
            seed,
            interval_ms,
        } => {
            let mut engine = JobEngine::new(&config, seed)?;
            let interval = interval_ms.unwrap_or(config.tick_interval_ms);
            let progress = RunProgress::start();
            engine
                .run(ticks, interval, |store| progress.update(store))
                .await?;
            progress.finish();
            board.render(engine.store(), cli.verbose);
        }
    }

    Ok(())
}
