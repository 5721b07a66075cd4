use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use appointment_cell::services::dashboard::{format_display_date, practitioner_short_name};
use appointment_cell::{BookingWizard, DashboardService, ScheduleOverview};
use catalog_cell::{Practitioner, Procedure};
use patient_cell::CreatePatientRequest;
use shared_models::{AppError, Role, Session};
use shared_utils::SystemClock;

use crate::cli::Commands;
use crate::context::ClinicContext;

pub fn run(command: Commands, ctx: &ClinicContext) -> Result<(), AppError> {
    match command {
        Commands::Catalog { json } => catalog(ctx, json),
        Commands::Book {
            practitioner,
            procedure,
            date,
            time,
            patient,
            username,
            password,
        } => {
            let patient = match (username, password) {
                (Some(username), Some(password)) => {
                    let session = ctx.authenticator.authenticate(Role::Patient, &username, &password)?;
                    session.patient_id().map(str::to_string)
                }
                _ => patient,
            };
            book(ctx, practitioner, procedure, date, time, patient)
        }
        Commands::Appointments {
            patient,
            role,
            username,
            password,
            json,
        } => {
            let session = match (role, username, password) {
                (Some(role), Some(username), Some(password)) => {
                    Some(ctx.authenticator.authenticate(role, &username, &password)?)
                }
                _ => None,
            };
            appointments(ctx, patient, session, json)
        }
        Commands::Register { name, username, password } => register(ctx, name, username, password),
        Commands::Login { role, username, password } => login(ctx, role, &username, &password),
    }
}

#[derive(Serialize)]
struct CatalogListing<'a> {
    practitioners: &'a [Practitioner],
    procedures: &'a [Procedure],
}

fn catalog(ctx: &ClinicContext, as_json: bool) -> Result<(), AppError> {
    let practitioners = ctx.catalog.list_practitioners();
    let procedures = ctx.catalog.list_procedures();

    if as_json {
        return print_json(&CatalogListing {
            practitioners: &practitioners,
            procedures: &procedures,
        });
    }

    println!("Dentists:");
    for p in &practitioners {
        println!("  [{}] {}", p.id, p.display_name());
    }
    println!("Procedures:");
    for p in &procedures {
        println!("  [{}] {}", p.id, p.name);
    }
    Ok(())
}

fn book(
    ctx: &ClinicContext,
    practitioner: String,
    procedure: String,
    date: String,
    time: String,
    patient: Option<String>,
) -> Result<(), AppError> {
    let mut wizard = BookingWizard::from_config(
        &ctx.config,
        ctx.catalog.clone(),
        ctx.appointments.clone(),
        patient.as_deref(),
    );

    wizard.set_practitioner(practitioner)?;
    wizard.set_procedure(procedure)?;
    wizard.next()?;

    wizard.set_date(date)?;
    wizard.set_time(time)?;
    wizard.next()?;

    if let Some(summary) = wizard.summary() {
        println!("Dentist:   {}", summary.practitioner_short);
        println!("Procedure: {}", summary.procedure);
        println!("Date:      {}", summary.display_date);
        println!("Time:      {}", summary.time);
    }

    let step = wizard.next()?;
    debug!("Wizard finished on step {}", step);

    if let Some(appointment) = wizard.committed() {
        println!("Appointment {} booked for {}", appointment.id, appointment.patient_id);
    }
    Ok(())
}

fn appointments(
    ctx: &ClinicContext,
    patient: Option<String>,
    session: Option<Session>,
    as_json: bool,
) -> Result<(), AppError> {
    let dashboard = DashboardService::new(ctx.appointments.clone(), Arc::new(SystemClock));
    let (overview, show_patient) = match (&session, &patient) {
        (Some(session), _) => (dashboard.overview_for(session)?, session.role.sees_full_schedule()),
        (None, Some(patient_id)) => (dashboard.patient_overview(patient_id)?, false),
        (None, None) => (dashboard.full_schedule()?, true),
    };

    if as_json {
        return print_json(&overview);
    }
    print_overview(&overview, show_patient);
    Ok(())
}

fn print_overview(overview: &ScheduleOverview, show_patient: bool) {
    println!("Total: {}  Upcoming: {}", overview.total, overview.upcoming);
    for apt in &overview.appointments {
        let mut line = format!(
            "  {} {}  {}  {}",
            format_display_date(&apt.date),
            apt.time,
            practitioner_short_name(&apt.practitioner_name),
            apt.procedure_name
        );
        if show_patient {
            line.push_str(&format!("  ({})", apt.patient_id));
        }
        println!("{}", line);
    }
}

fn register(ctx: &ClinicContext, name: String, username: String, password: String) -> Result<(), AppError> {
    let patient = ctx
        .patients
        .register(CreatePatientRequest::new(name, username, password))?;
    println!("Registered {} as {}", patient.full_name, patient.id);
    Ok(())
}

fn login(ctx: &ClinicContext, role: Role, username: &str, password: &str) -> Result<(), AppError> {
    let session = ctx.authenticator.authenticate(role, username, password)?;
    print_json(&session)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    let rendered = serde_json::to_string_pretty(value).map_err(|e| AppError::Internal(e.to_string()))?;
    println!("{}", rendered);
    Ok(())
}
