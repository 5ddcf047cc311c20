//! DTOs for public registration.

use chrono::NaiveDate;
use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;
use validator::Validate;

use super::quote::{AddOnLineDto, add_on_lines};
use crate::application::services::RegistrationRequest;
use crate::domain::entities::{ChildProfile, Gender, GuardianProfile};

static PHONE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\+?[0-9]{10,15}$").unwrap());

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GuardianDto {
    #[validate(length(min = 1, max = 100))]
    pub full_name: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(regex(path = *PHONE_REGEX, message = "Phone must be 10 to 15 digits"))]
    pub phone: String,
}

impl From<&GuardianDto> for GuardianProfile {
    fn from(dto: &GuardianDto) -> Self {
        GuardianProfile {
            full_name: dto.full_name.trim().to_string(),
            email: dto.email.trim().to_string(),
            phone: dto.phone.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChildDto {
    #[validate(length(min = 1, max = 100))]
    pub full_name: String,

    pub date_of_birth: NaiveDate,

    pub gender: Gender,

    #[validate(length(max = 150))]
    pub school_name: Option<String>,
}

impl From<&ChildDto> for ChildProfile {
    fn from(dto: &ChildDto) -> Self {
        ChildProfile {
            full_name: dto.full_name.trim().to_string(),
            date_of_birth: dto.date_of_birth,
            gender: dto.gender,
            school_name: dto.school_name.clone(),
        }
    }
}

/// Body of `POST /api/bookings`.
///
/// ```json
/// {
///   "parent": { "full_name": "Ravi Kumar", "email": "ravi@example.com", "phone": "9876543210" },
///   "child": { "full_name": "Asha", "date_of_birth": "2025-03-02", "gender": "female" },
///   "event_id": 7,
///   "slot_ids": [31],
///   "add_ons": [{ "add_on_id": 3, "variant_id": 9, "quantity": 1 }],
///   "promo_code": "WELCOME10",
///   "terms_accepted": true
/// }
/// ```
#[derive(Debug, Deserialize, Validate)]
pub struct RegistrationRequestDto {
    pub user_id: Option<i64>,

    #[validate(nested)]
    pub parent: GuardianDto,

    #[validate(nested)]
    pub child: ChildDto,

    pub event_id: i64,

    pub slot_ids: Vec<i64>,

    #[serde(default)]
    #[validate(nested)]
    pub add_ons: Vec<AddOnLineDto>,

    #[validate(length(max = 50))]
    pub promo_code: Option<String>,

    #[serde(default)]
    pub terms_accepted: bool,
}

impl From<&RegistrationRequestDto> for RegistrationRequest {
    fn from(dto: &RegistrationRequestDto) -> Self {
        RegistrationRequest {
            user_id: dto.user_id,
            guardian: GuardianProfile::from(&dto.parent),
            child: ChildProfile::from(&dto.child),
            event_id: dto.event_id,
            slot_ids: dto.slot_ids.clone(),
            add_ons: add_on_lines(&dto.add_ons),
            promo_code: dto.promo_code.clone(),
            terms_accepted: dto.terms_accepted,
        }
    }
}
