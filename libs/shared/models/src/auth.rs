use serde::{Deserialize, Serialize};
use std::fmt;

/// Which dashboard a signed-in user gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Patient,
    Dentist,
    Staff,
}

impl Role {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "patient" => Some(Role::Patient),
            "dentist" => Some(Role::Dentist),
            "staff" | "employee" => Some(Role::Staff),
            _ => None,
        }
    }

    /// Patients only see their own appointments; everyone else sees the whole schedule.
    pub fn sees_full_schedule(&self) -> bool {
        !matches!(self, Role::Patient)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Patient => write!(f, "patient"),
            Role::Dentist => write!(f, "dentist"),
            Role::Staff => write!(f, "staff"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub role: Role,
    pub user_id: String,
}

impl Session {
    pub fn new(role: Role, user_id: impl Into<String>) -> Self {
        Self {
            role,
            user_id: user_id.into(),
        }
    }

    /// Patient id to book under, if this session belongs to a patient.
    pub fn patient_id(&self) -> Option<&str> {
        match self.role {
            Role::Patient => Some(&self.user_id),
            _ => None,
        }
    }
}
