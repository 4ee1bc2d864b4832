//! Patient command handlers

use aesthetic_core::domain::patient::{AgeRange, Gender, Patient, SkinType};
use aesthetic_core::dto::patient::CreatePatient;
use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;

use crate::config::Config;

/// Patient subcommands
#[derive(Subcommand)]
pub enum PatientCommands {
    /// Register an anonymised patient
    Create {
        /// One of 18-25, 26-35, 36-45, 46-55, 56-65, 65+
        #[arg(long)]
        age_range: AgeRange,

        /// One of F, M, Autre
        #[arg(long)]
        gender: Gender,

        /// One of Claire, Mate, Foncée, Mixte
        #[arg(long)]
        skin_type: SkinType,
    },
    /// List recent patients
    List,
}

pub async fn handle_patient_command(command: PatientCommands, config: &Config) -> Result<()> {
    let client = config.client()?;

    match command {
        PatientCommands::Create {
            age_range,
            gender,
            skin_type,
        } => {
            let patient = client
                .create_patient(CreatePatient {
                    age_range,
                    gender,
                    skin_type,
                })
                .await
                .context("Failed to create patient")?;

            println!("{}", "✓ Patient registered".green());
            print_patient(&patient);
        }
        PatientCommands::List => {
            let patients = client.list_patients().await?;

            if patients.is_empty() {
                println!("{}", "No patients found.".yellow());
            } else {
                println!("{}", format!("Found {} patient(s):", patients.len()).bold());
                println!();
                for patient in patients {
                    print_patient(&patient);
                }
            }
        }
    }

    Ok(())
}

fn print_patient(patient: &Patient) {
    println!(
        "  {} Patient {} {}",
        "▸".cyan(),
        patient.id.to_string().cyan(),
        format!("({})", patient.anonymous_id).dimmed()
    );
    println!("    Age:    {}", patient.age_range);
    println!("    Gender: {}", patient.gender);
    println!("    Skin:   {}", patient.skin_type);
    if let Some(created) = patient.created_at {
        println!(
            "    Added:  {}",
            created.format("%Y-%m-%d %H:%M:%S").to_string().dimmed()
        );
    }
    println!();
}
