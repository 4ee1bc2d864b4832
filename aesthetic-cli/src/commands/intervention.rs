//! Intervention catalogue commands

use anyhow::Result;
use clap::Subcommand;
use colored::*;

use crate::config::Config;

#[derive(Subcommand)]
pub enum InterventionCommands {
    /// List supported interventions and their dose ranges
    List,
}

pub async fn handle_intervention_command(
    command: InterventionCommands,
    config: &Config,
) -> Result<()> {
    let client = config.client()?;

    match command {
        InterventionCommands::List => {
            let catalog = client.list_interventions().await?;

            if catalog.is_empty() {
                println!("{}", "No interventions available.".yellow());
                return Ok(());
            }

            for (key, intervention) in &catalog {
                println!("  {} {} {}", "▸".cyan(), key.bold(), intervention.name.dimmed());
                println!(
                    "    Dose: {} to {} {}",
                    intervention.min_dose, intervention.max_dose, intervention.unit
                );
                if let Some(description) = &intervention.description {
                    println!("    {}", description.dimmed());
                }
                println!();
            }
        }
    }

    Ok(())
}
