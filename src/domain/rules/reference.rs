//! Booking reference and transaction id formats.
//!
//! References are `PREFIX` + `YYMMDD` + three digits, e.g. `MAN261018042`.
//! Online bookings use `PPT`, bookings entered by an admin use `MAN`.

use chrono::{NaiveDate, Utc};
use rand::Rng;
use regex::Regex;
use sha2::{Digest, Sha256};
use std::fmt;
use std::sync::LazyLock;

static MANUAL_REFERENCE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^MAN\d{9}$").unwrap());

const ONLINE_PREFIX: &str = "PPT";
const MANUAL_PREFIX: &str = "MAN";
const TRANSACTION_SUFFIX_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BookingReference(String);

impl BookingReference {
    /// Reference for a booking made through the public registration flow.
    pub fn online(seed: &str, date: NaiveDate) -> Self {
        Self::build(ONLINE_PREFIX, seed, date)
    }

    /// Reference for a booking entered by an admin.
    pub fn manual(seed: &str, date: NaiveDate) -> Self {
        Self::build(MANUAL_PREFIX, seed, date)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    fn build(prefix: &str, seed: &str, date: NaiveDate) -> Self {
        Self(format!(
            "{}{}{:03}",
            prefix,
            date.format("%y%m%d"),
            seed_digits(prefix, seed)
        ))
    }
}

impl fmt::Display for BookingReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Three digits derived from the seed, stable for a given seed.
fn seed_digits(prefix: &str, seed: &str) -> u16 {
    let digest = Sha256::new()
        .chain_update(prefix.as_bytes())
        .chain_update(seed.as_bytes())
        .finalize();
    (u16::from_be_bytes([digest[0], digest[1]])) % 1000
}

pub fn is_valid_manual_reference(reference: &str) -> bool {
    MANUAL_REFERENCE_REGEX.is_match(reference)
}

pub fn is_manual_booking(reference: &str) -> bool {
    is_valid_manual_reference(reference)
}

/// Transaction id in the form `PREFIX_<unix millis>_<6 alphanumerics>`.
pub fn generate_transaction_id(prefix: &str) -> String {
    let suffix: String = rand::rng()
        .sample_iter(&rand::distr::Alphanumeric)
        .take(TRANSACTION_SUFFIX_LEN)
        .map(char::from)
        .collect();
    format!("{}_{}_{}", prefix, Utc::now().timestamp_millis(), suffix)
}
