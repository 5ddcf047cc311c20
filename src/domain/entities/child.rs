//! Child and guardian profiles captured by the registration form.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        };
        f.write_str(label)
    }
}

/// The child a booking is made for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildProfile {
    pub full_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub school_name: Option<String>,
}

impl ChildProfile {
    /// School name as sent upstream; the booking API rejects empty values.
    pub fn school_or_default(&self) -> &str {
        match self.school_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => "Not Specified",
        }
    }
}

/// Parent or guardian who owns the booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuardianProfile {
    pub full_name: String,
    pub email: String,
    pub phone: String,
}
