//! Simulation command handlers
//!
//! Handles submitting simulations, viewing them, and watching in-flight
//! jobs until the service reports a final status.

use std::path::PathBuf;
use std::sync::Arc;

use aesthetic_client::SimulationClient;
use aesthetic_core::domain::simulation::{JobId, Simulation, SimulationStatus};
use aesthetic_core::dto::simulation::{CreateSimulation, ImageUpload};
use aesthetic_poller::{ChannelSink, PollAttempt, PollOutcome, PollerConfig, PollerTracker};
use anyhow::{Context, Result, bail};
use clap::Subcommand;
use colored::*;
use tracing::{info, warn};

use crate::config::Config;

/// Simulation subcommands
#[derive(Subcommand)]
pub enum SimulationCommands {
    /// Submit a photo for an AI "after" rendering
    Create {
        /// Patient ID
        #[arg(long)]
        patient: i64,

        /// Intervention type key (see `aesthetic intervention list`)
        #[arg(long)]
        intervention: String,

        /// Dose, in the intervention's unit
        #[arg(long)]
        dose: f64,

        /// Photo to upload (jpg, png or webp)
        #[arg(long)]
        image: PathBuf,

        /// Wait for the rendering to finish
        #[arg(short, long)]
        watch: bool,
    },
    /// Get simulation details
    Get {
        /// Simulation ID
        id: JobId,
    },
    /// List recent simulations
    List,
    /// Watch one or more simulations until they finish
    Watch {
        /// Simulation IDs
        #[arg(required = true)]
        ids: Vec<JobId>,
    },
}

pub async fn handle_simulation_command(command: SimulationCommands, config: &Config) -> Result<()> {
    let client = config.client()?;

    match command {
        SimulationCommands::Create {
            patient,
            intervention,
            dose,
            image,
            watch,
        } => {
            let simulation = create_simulation(&client, patient, intervention, dose, image).await?;
            print_simulation_details(&client, &simulation);

            if watch {
                println!();
                watch_simulations(client, vec![simulation.id], config.poller()?).await?;
            }
            Ok(())
        }
        SimulationCommands::Get { id } => {
            let simulation = client.get_simulation(&id).await?;
            print_simulation_details(&client, &simulation);
            Ok(())
        }
        SimulationCommands::List => list_simulations(&client).await,
        SimulationCommands::Watch { ids } => watch_simulations(client, ids, config.poller()?).await,
    }
}

/// Validates the request against the live catalogue, then uploads it
async fn create_simulation(
    client: &SimulationClient,
    patient_id: i64,
    intervention_type: String,
    dose: f64,
    image: PathBuf,
) -> Result<Simulation> {
    let file_name = image
        .file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("Invalid image path: {}", image.display()))?
        .to_string();

    let bytes = tokio::fs::read(&image)
        .await
        .with_context(|| format!("Failed to read image {}", image.display()))?;

    let request = CreateSimulation {
        patient_id,
        intervention_type,
        dose,
        image: ImageUpload::new(file_name, bytes),
    };

    let catalog = client
        .list_interventions()
        .await
        .context("Failed to fetch intervention catalogue")?;
    request.validate(&catalog)?;

    let simulation = client
        .create_simulation(request)
        .await
        .context("Failed to submit simulation")?;

    info!("Submitted simulation {}", simulation.id);
    println!("{}", "✓ Simulation submitted".green());

    Ok(simulation)
}

async fn list_simulations(client: &SimulationClient) -> Result<()> {
    let simulations = client.list_simulations().await?;

    if simulations.is_empty() {
        println!("{}", "No simulations found.".yellow());
    } else {
        println!("{}", format!("Found {} simulation(s):", simulations.len()).bold());
        println!();
        for simulation in simulations {
            print_simulation_summary(&simulation);
        }
    }

    Ok(())
}

/// Watches every id concurrently; Ctrl-C cancels all pollers
///
/// Fails if any simulation did not complete successfully.
async fn watch_simulations(
    client: SimulationClient,
    ids: Vec<JobId>,
    poll: PollerConfig,
) -> Result<()> {
    let client = Arc::new(client);
    let mut tracker = PollerTracker::new(Arc::clone(&client), poll)?;
    let (sink, mut updates) = ChannelSink::channel();

    for id in ids {
        if let Err(e) = tracker.start(id.clone(), sink.clone()) {
            warn!("Not watching simulation {}: {}", id, e);
        }
    }
    // Pollers hold the remaining senders; the channel closes once all have stopped.
    drop(sink);

    let total = tracker.len();
    if total == 0 {
        bail!("No simulation to watch");
    }

    println!(
        "{}",
        format!(
            "Watching {} simulation(s) (every {:?}, up to {} checks)...",
            total,
            tracker.config().interval,
            tracker.config().max_attempts
        )
        .bold()
    );

    let mut interrupted = false;
    loop {
        tokio::select! {
            update = updates.recv() => match update {
                Some((attempt, simulation)) => print_update(attempt, &simulation),
                None => break,
            },
            _ = tokio::signal::ctrl_c(), if !interrupted => {
                interrupted = true;
                eprintln!("{}", "Interrupted, stopping...".yellow());
                tracker.cancel_all();
            }
        }
    }

    println!();
    let mut unfinished = 0;
    for (id, outcome) in tracker.join_all().await {
        match outcome {
            Ok(PollOutcome::Completed(simulation)) => {
                println!("  {} Simulation {} completed", "✓".green(), id.to_string().cyan());
                if let Some(path) = &simulation.generated_image_path {
                    println!("    Result: {}", client.image_url(path).underline());
                }
            }
            Ok(PollOutcome::Failed(_)) => {
                unfinished += 1;
                println!("  {} Simulation {} failed", "✗".red(), id.to_string().cyan());
            }
            Ok(PollOutcome::Exhausted { attempts }) => {
                unfinished += 1;
                println!(
                    "  {} Simulation {} still running after {} checks; gave up watching",
                    "⚠".yellow(),
                    id.to_string().cyan(),
                    attempts
                );
            }
            Ok(PollOutcome::Cancelled { .. }) => {
                unfinished += 1;
                println!("  {} Simulation {} no longer watched", "-".dimmed(), id.to_string().cyan());
            }
            Err(e) => {
                unfinished += 1;
                println!("  {} Simulation {}: {}", "✗".red(), id.to_string().cyan(), e);
            }
        }
    }

    if unfinished > 0 {
        bail!("{} of {} simulation(s) did not complete", unfinished, total);
    }

    Ok(())
}

fn print_update(attempt: PollAttempt, simulation: &Simulation) {
    println!(
        "  {} [{:>3}s] #{:<3} Simulation {} is {}",
        "▸".cyan(),
        attempt.elapsed.as_secs(),
        attempt.sequence,
        simulation.id.to_string().cyan(),
        colorize_status(simulation.status)
    );
}

/// Print a simulation summary line block
fn print_simulation_summary(simulation: &Simulation) {
    println!(
        "  {} Simulation {}",
        "▸".cyan(),
        simulation.id.to_string().dimmed()
    );
    if let Some(intervention) = &simulation.intervention_type {
        let dose = simulation.dose.map(|d| format!(" ({})", d)).unwrap_or_default();
        println!("    Intervention: {}{}", intervention, dose);
    }
    println!("    Status:       {}", colorize_status(simulation.status));
    if let Some(created) = simulation.created_at {
        println!(
            "    Created:      {}",
            created.format("%Y-%m-%d %H:%M:%S").to_string().dimmed()
        );
    }
    println!();
}

/// Print detailed simulation information
fn print_simulation_details(client: &SimulationClient, simulation: &Simulation) {
    println!("{}", "Simulation Details:".bold());
    println!("  ID:           {}", simulation.id.to_string().cyan());
    println!("  Status:       {}", colorize_status(simulation.status));

    if let Some(patient) = simulation.patient_id {
        println!("  Patient:      {}", patient);
    }
    if let Some(intervention) = &simulation.intervention_type {
        println!("  Intervention: {}", intervention);
    }
    if let Some(dose) = simulation.dose {
        println!("  Dose:         {}", dose);
    }
    if let Some(created) = simulation.created_at {
        println!("  Created:      {}", created.format("%Y-%m-%d %H:%M:%S"));
    }
    if let Some(completed) = simulation.completed_at {
        println!("  Completed:    {}", completed.format("%Y-%m-%d %H:%M:%S"));
    }
    if let Some(seconds) = simulation.generation_time {
        println!("  Generation:   {:.1}s", seconds);
    }

    if let Some(path) = &simulation.original_image_path {
        println!("  Original:     {}", client.image_url(path).dimmed());
    }
    if let Some(path) = &simulation.generated_image_path {
        println!("  Result:       {}", client.image_url(path).underline());
    }
}

/// Colorize simulation status for display
fn colorize_status(status: SimulationStatus) -> ColoredString {
    let status_str = status.to_string();
    match status {
        SimulationStatus::Pending => status_str.yellow(),
        SimulationStatus::Processing => status_str.cyan(),
        SimulationStatus::Completed => status_str.green(),
        SimulationStatus::Failed => status_str.red(),
    }
}
