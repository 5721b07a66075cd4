// libs/appointment-cell/src/models.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use shared_models::AppError;

// ==============================================================================
// CORE APPOINTMENT MODELS
// ==============================================================================

/// A committed booking as persisted in the `appointments` collection.
///
/// Practitioner and procedure are stored as display strings so readers never
/// need the catalog. There is no update path once a record is appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub patient_id: String,
    #[serde(alias = "dentistName")]
    pub practitioner_name: String,
    pub procedure_name: String,
    pub date: String,
    pub time: String,
    pub created_at: DateTime<Utc>,
}

/// Selection state owned by a single booking wizard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDraft {
    pub practitioner_id: String,
    pub procedure_id: String,
    pub date: String,
    pub time: String,
}

impl BookingDraft {
    pub fn get(&self, field: DraftField) -> &str {
        match field {
            DraftField::Practitioner => &self.practitioner_id,
            DraftField::Procedure => &self.procedure_id,
            DraftField::Date => &self.date,
            DraftField::Time => &self.time,
        }
    }

    pub fn set(&mut self, field: DraftField, value: impl Into<String>) {
        let value = value.into();
        match field {
            DraftField::Practitioner => self.practitioner_id = value,
            DraftField::Procedure => self.procedure_id = value,
            DraftField::Date => self.date = value,
            DraftField::Time => self.time = value,
        }
    }

    /// Fields gated by `step` that are still blank.
    pub fn missing_fields(&self, step: WizardStep) -> Vec<DraftField> {
        step.required_fields()
            .iter()
            .copied()
            .filter(|field| self.get(*field).trim().is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftField {
    Practitioner,
    Procedure,
    Date,
    Time,
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DraftField::Practitioner => write!(f, "dentist"),
            DraftField::Procedure => write!(f, "procedure"),
            DraftField::Date => write!(f, "date"),
            DraftField::Time => write!(f, "time"),
        }
    }
}

// ==============================================================================
// WIZARD STATE MODELS
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    SelectingProviderAndProcedure,
    SelectingDateTime,
    Confirming,
    Completed,
}

impl WizardStep {
    /// 1-based position shown in the progress indicator.
    pub fn number(&self) -> u8 {
        match self {
            WizardStep::SelectingProviderAndProcedure => 1,
            WizardStep::SelectingDateTime => 2,
            WizardStep::Confirming => 3,
            WizardStep::Completed => 4,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WizardStep::SelectingProviderAndProcedure => "Selection",
            WizardStep::SelectingDateTime => "Date/Time",
            WizardStep::Confirming => "Confirm",
            WizardStep::Completed => "Done",
        }
    }

    pub fn required_fields(&self) -> &'static [DraftField] {
        match self {
            WizardStep::SelectingProviderAndProcedure => &[DraftField::Practitioner, DraftField::Procedure],
            WizardStep::SelectingDateTime => &[DraftField::Date, DraftField::Time],
            WizardStep::Confirming | WizardStep::Completed => &[],
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, WizardStep::Completed)
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.number(), self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardAction {
    Next,
    Back,
    Reset,
}

impl fmt::Display for WizardAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WizardAction::Next => write!(f, "advance"),
            WizardAction::Back => write!(f, "go back"),
            WizardAction::Reset => write!(f, "reset"),
        }
    }
}

/// What the confirmation and success screens show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingSummary {
    pub practitioner: String,
    pub practitioner_short: String,
    pub procedure: String,
    pub date: String,
    pub display_date: String,
    pub time: String,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppointmentError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Stored appointment data is invalid: {0}")]
    CorruptedRecord(String),
}

impl From<shared_database::StoreError> for AppointmentError {
    fn from(e: shared_database::StoreError) -> Self {
        match e {
            shared_database::StoreError::Corrupted { .. } => AppointmentError::CorruptedRecord(e.to_string()),
            other => AppointmentError::Storage(other.to_string()),
        }
    }
}

/// Rejections raised by the step gates. Shown to the user one at a time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingValidationError {
    #[error("Please select the {}.", join_fields(.missing))]
    IncompleteSelection {
        step: WizardStep,
        missing: Vec<DraftField>,
    },

    #[error("Time {time} on {date} is already taken. Please choose another time.")]
    SlotUnavailable { date: String, time: String },

    #[error("Dentist {0} is not offered for booking.")]
    UnknownPractitioner(String),

    #[error("Procedure {0} is not offered for booking.")]
    UnknownProcedure(String),

    #[error("Invalid date '{0}', expected YYYY-MM-DD.")]
    MalformedDate(String),

    #[error("Invalid time '{0}', expected HH:MM.")]
    MalformedTime(String),

    #[error("Date {date} is in the past. The earliest bookable date is {today}.")]
    DateInPast { date: String, today: String },
}

fn join_fields(fields: &[DraftField]) -> String {
    fields
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join(" and the ")
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    #[error(transparent)]
    Validation(#[from] BookingValidationError),

    #[error("Cannot {action} from step {from}")]
    InvalidTransition { from: WizardStep, action: WizardAction },

    #[error("Booking already completed; start a new booking to change it")]
    AlreadyCompleted,

    #[error("Could not save the appointment: {0}")]
    Store(#[from] AppointmentError),
}

impl From<AppointmentError> for AppError {
    fn from(e: AppointmentError) -> Self {
        AppError::Storage(e.to_string())
    }
}

impl From<WizardError> for AppError {
    fn from(e: WizardError) -> Self {
        match e {
            WizardError::Validation(BookingValidationError::SlotUnavailable { .. }) => AppError::Conflict(e.to_string()),
            WizardError::Validation(BookingValidationError::UnknownPractitioner(_))
            | WizardError::Validation(BookingValidationError::UnknownProcedure(_)) => AppError::NotFound(e.to_string()),
            WizardError::Validation(_) | WizardError::InvalidTransition { .. } | WizardError::AlreadyCompleted => {
                AppError::ValidationError(e.to_string())
            }
            WizardError::Store(inner) => inner.into(),
        }
    }
}
