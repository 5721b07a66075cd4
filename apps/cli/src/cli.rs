use clap::{Parser, Subcommand};

use shared_models::Role;

/// Dental clinic booking
#[derive(Parser)]
#[command(name = "clinic")]
#[command(about = "Book and list dental clinic appointments", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List dentists and procedures that can be booked
    Catalog {
        /// Output JSON only
        #[arg(long)]
        json: bool,
    },

    /// Book an appointment in one go
    Book {
        /// Dentist id from `clinic catalog`
        #[arg(long)]
        practitioner: String,

        /// Procedure id from `clinic catalog`
        #[arg(long)]
        procedure: String,

        /// YYYY-MM-DD
        #[arg(long)]
        date: String,

        /// HH:MM, 24-hour
        #[arg(long)]
        time: String,

        /// Book for this patient id instead of the guest account
        #[arg(long, conflicts_with = "username")]
        patient: Option<String>,

        /// Sign in as this patient and book under their account
        #[arg(long, requires = "password")]
        username: Option<String>,

        #[arg(long, requires = "username")]
        password: Option<String>,
    },

    /// Show appointments, for one patient or the whole clinic
    Appointments {
        /// Only this patient's appointments
        #[arg(long, conflicts_with = "role")]
        patient: Option<String>,

        /// Sign in and show the dashboard of this role
        #[arg(long, value_parser = parse_role, requires_all = ["username", "password"])]
        role: Option<Role>,

        #[arg(long, requires = "role")]
        username: Option<String>,

        #[arg(long, requires = "role")]
        password: Option<String>,

        /// Output JSON only
        #[arg(long)]
        json: bool,
    },

    /// Register a new patient
    Register {
        /// Full name
        #[arg(long)]
        name: String,

        /// Exactly 2 characters
        #[arg(long)]
        username: String,

        /// Exactly 2 characters
        #[arg(long)]
        password: String,
    },

    /// Check credentials and print the resulting session
    Login {
        /// patient, dentist or staff
        #[arg(long, value_parser = parse_role)]
        role: Role,

        #[arg(long)]
        username: String,

        #[arg(long)]
        password: String,
    },
}

fn parse_role(value: &str) -> Result<Role, String> {
    Role::parse(value).ok_or_else(|| format!("unknown role '{}', expected patient, dentist or staff", value))
}
