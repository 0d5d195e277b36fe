//! Terminal rendering for the job board — spinner and colored output.
//!
//! Uses `indicatif` for the run-loop spinner and `console` for color
//! styling. [`JobBoard`] prints the job cards; [`RunProgress`] tracks a
//! simulation run visually.

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::lifecycle::{Job, JobStatus};
use crate::store::JobStore;

/// Prints the job collection as a terminal job board.
pub struct JobBoard {
    green: Style,
    yellow: Style,
    cyan: Style,
    dim: Style,
}

impl JobBoard {
    pub fn new() -> Self {
        Self {
            green: Style::new().green().bold(),
            yellow: Style::new().yellow().bold(),
            cyan: Style::new().cyan(),
            dim: Style::new().dim(),
        }
    }

    fn status_style(&self, status: JobStatus) -> &Style {
        if status.is_terminal() {
            &self.green
        } else if status.is_blocking() {
            &self.yellow
        } else {
            &self.cyan
        }
    }

    /// Print one line per job; `verbose` adds the full log trail.
    pub fn render(&self, store: &JobStore, verbose: bool) {
        if store.is_empty() {
            println!("No jobs yet. Launch one with `mcc scaffold` or `mcc uplink`.");
            return;
        }

        println!("{}", self.dim.apply_to("─── Job Board ───"));
        for job in store.iter() {
            self.render_card(job, verbose);
        }
    }

    fn render_card(&self, job: &Job, verbose: bool) {
        let short_id = &job.id[..8.min(job.id.len())];
        println!(
            "{} {:<17} {} {}",
            self.dim.apply_to(short_id),
            self.status_style(job.status).apply_to(job.status),
            job.repo_name,
            self.dim.apply_to(format!("[{} · {}]", job.kind, job.mode)),
        );

        if let Some(pr) = &job.pr_details {
            println!(
                "         {} #{} — {} ({} files) {}",
                self.green.apply_to("PR"),
                pr.number,
                pr.title,
                pr.files_changed,
                self.dim.apply_to(&pr.url),
            );
        }

        if verbose {
            for line in &job.logs {
                println!("         {}", self.dim.apply_to(line));
            }
        } else {
            println!("         {}", self.dim.apply_to(job.last_log()));
        }
    }
}

impl Default for JobBoard {
    fn default() -> Self {
        Self::new()
    }
}

/// Visual progress indicator for a simulation run.
///
/// Shows an animated spinner whose message tracks how many jobs are still
/// moving versus paused or done.
pub struct RunProgress {
    pb: ProgressBar,
    green: Style,
}

impl RunProgress {
    /// Start the spinner.
    pub fn start() -> Self {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .expect("invalid template"),
        );
        pb.set_message("Driving agent jobs...");
        pb.enable_steady_tick(std::time::Duration::from_millis(100));

        Self {
            pb,
            green: Style::new().green().bold(),
        }
    }

    /// Refresh the spinner message with the collection's current shape.
    pub fn update(&self, store: &JobStore) {
        let mut active = 0usize;
        let mut waiting = 0usize;
        let mut ready = 0usize;
        let mut merged = 0usize;
        for job in store.iter() {
            match job.status {
                JobStatus::WaitingApproval => waiting += 1,
                JobStatus::PrReady => ready += 1,
                JobStatus::Merged => merged += 1,
                _ => active += 1,
            }
        }
        self.pb.set_message(format!(
            "{active} active · {waiting} waiting approval · {ready} PR ready · {merged} merged"
        ));
    }

    /// Stop the spinner and print the closing line.
    pub fn finish(&self) {
        self.pb.finish_and_clear();
        println!(
            "  {} All jobs are waiting on you or merged",
            self.green.apply_to("✓")
        );
    }
}
