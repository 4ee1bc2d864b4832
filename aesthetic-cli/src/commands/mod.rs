//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod auth;
mod intervention;
mod patient;
mod simulation;

pub use auth::AuthCommands;
pub use intervention::InterventionCommands;
pub use patient::PatientCommands;
pub use simulation::SimulationCommands;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Account management (login, register)
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
    /// Patient management
    Patient {
        #[command(subcommand)]
        command: PatientCommands,
    },
    /// Intervention catalogue
    Intervention {
        #[command(subcommand)]
        command: InterventionCommands,
    },
    /// Simulation requests and watching
    Simulation {
        #[command(subcommand)]
        command: SimulationCommands,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Auth { command } => auth::handle_auth_command(command, config).await,
        Commands::Patient { command } => patient::handle_patient_command(command, config).await,
        Commands::Intervention { command } => {
            intervention::handle_intervention_command(command, config).await
        }
        Commands::Simulation { command } => {
            simulation::handle_simulation_command(command, config).await
        }
    }
}
