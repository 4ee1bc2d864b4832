//! Account command handlers

use aesthetic_core::dto::auth::{LoginRequest, RegisterUser};
use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;

use crate::config::Config;

/// Account subcommands
#[derive(Subcommand)]
pub enum AuthCommands {
    /// Log in and print a bearer token
    Login {
        #[arg(short, long)]
        username: String,

        /// Numeric PIN
        #[arg(short, long, env = "AESTHETIC_PIN", hide_env_values = true)]
        pin: String,
    },
    /// Register a practitioner account
    Register {
        #[arg(short, long)]
        username: String,

        #[arg(short, long, env = "AESTHETIC_PIN", hide_env_values = true)]
        pin: String,

        #[arg(long)]
        full_name: String,

        /// Medical speciality (e.g. medecine_esthetique, dermatologie)
        #[arg(long)]
        speciality: String,

        #[arg(long)]
        license_number: String,
    },
}

pub async fn handle_auth_command(command: AuthCommands, config: &Config) -> Result<()> {
    let client = config.client()?;

    match command {
        AuthCommands::Login { username, pin } => {
            let token = client
                .login(LoginRequest { username, pin })
                .await
                .context("Login failed")?;

            eprintln!("{}", "✓ Logged in".green());
            eprintln!(
                "{}",
                "  Export the token below as AESTHETIC_TOKEN to authenticate other commands."
                    .dimmed()
            );
            println!("{}", token.access_token);
        }
        AuthCommands::Register {
            username,
            pin,
            full_name,
            speciality,
            license_number,
        } => {
            let user = client
                .register(RegisterUser {
                    username,
                    pin,
                    full_name,
                    speciality,
                    license_number,
                })
                .await
                .context("Registration failed")?;

            println!("{}", "✓ Account created".green());
            println!("  ID:         {}", user.id.to_string().cyan());
            println!("  Username:   {}", user.username);
            println!("  Name:       {}", user.full_name);
            println!("  Speciality: {}", user.speciality.dimmed());
        }
    }

    Ok(())
}
