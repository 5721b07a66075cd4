use serde::{Deserialize, Serialize};

/// Separator between a practitioner's name and specialty in display strings.
pub const DISPLAY_SEPARATOR: &str = " - ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Procedure {
    pub id: String,
    pub name: String,
}

impl Procedure {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Practitioner {
    pub id: String,
    pub name: String,
    pub specialty: String,
}

impl Practitioner {
    pub fn new(id: impl Into<String>, name: impl Into<String>, specialty: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            specialty: specialty.into(),
        }
    }

    /// `"<name> - <specialty>"`, the string copied into booked appointments.
    pub fn display_name(&self) -> String {
        format!("{}{}{}", self.name, DISPLAY_SEPARATOR, self.specialty)
    }
}
