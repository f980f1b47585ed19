//! Validated contact fields.
//!
//! Every field type can only be obtained through its validator, so a value in
//! hand is always valid. Serde goes through the same validators
//! (`try_from = "String"`), which means a stored file cannot smuggle in a
//! value the interactive prompts would have rejected.

use std::fmt;

use chrono::{Datelike, Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{ContactsError, Result};

/// Earliest accepted birth year.
pub const MIN_YEAR: i32 = 1900;

/// Number of digits in a phone number.
pub const PHONE_DIGITS: usize = 12;

// Year-unknown birthdays are anchored in a leap year so that 02-29 is valid.
const ANCHOR_YEAR: i32 = 2000;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\w+([-+.']\w+)*@\w+([-.]\w+)*\.\w+([-.]\w+)*$").expect("email pattern compiles")
});

static MONTH_DAY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{2})-(\d{2})$").expect("month-day pattern compiles"));

static FULL_DATE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").expect("full date pattern compiles"));

/// Today's date in the local timezone.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Contact name, unique key of the address book.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Name(String);

impl Name {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validate a contact name. Surrounding whitespace is dropped.
pub fn validate_name(value: &str) -> Result<Name> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ContactsError::EmptyName);
    }
    Ok(Name(trimmed.to_string()))
}

/// Phone number: exactly twelve decimal digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Phone(String);

impl Phone {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub fn validate_phone(value: &str) -> Result<Phone> {
    if value.len() == PHONE_DIGITS && value.bytes().all(|b| b.is_ascii_digit()) {
        Ok(Phone(value.to_string()))
    } else {
        Err(ContactsError::InvalidPhone(value.to_string()))
    }
}

/// E-mail address in `local@domain` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub fn validate_email(value: &str) -> Result<Email> {
    if EMAIL_PATTERN.is_match(value) {
        Ok(Email(value.to_string()))
    } else {
        Err(ContactsError::InvalidEmail(value.to_string()))
    }
}

/// Birthday, optionally without a year.
///
/// Accepted input is `MM-DD` (year unknown) or `YYYY-MM-DD` with the year in
/// `[MIN_YEAR, current year)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Birthday {
    date: NaiveDate,
    year_known: bool,
}

/// Validate a birthday against the local calendar.
pub fn validate_birthday(value: &str) -> Result<Birthday> {
    Birthday::parse(value, local_today())
}

impl Birthday {
    /// Parse a birthday relative to `today`.
    pub fn parse(value: &str, today: NaiveDate) -> Result<Self> {
        let invalid = || ContactsError::InvalidDate(value.to_string());

        if let Some(caps) = MONTH_DAY_PATTERN.captures(value) {
            let month: u32 = caps[1].parse().map_err(|_| invalid())?;
            let day: u32 = caps[2].parse().map_err(|_| invalid())?;
            let date = NaiveDate::from_ymd_opt(ANCHOR_YEAR, month, day).ok_or_else(invalid)?;
            return Ok(Self {
                date,
                year_known: false,
            });
        }

        let caps = FULL_DATE_PATTERN.captures(value).ok_or_else(invalid)?;
        let year: i32 = caps[1].parse().map_err(|_| invalid())?;
        let month: u32 = caps[2].parse().map_err(|_| invalid())?;
        let day: u32 = caps[3].parse().map_err(|_| invalid())?;
        if !(MIN_YEAR..today.year()).contains(&year) {
            return Err(invalid());
        }
        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)?;
        Ok(Self {
            date,
            year_known: true,
        })
    }

    pub fn year(&self) -> Option<i32> {
        self.year_known.then(|| self.date.year())
    }

    /// Days from `today` until the next occurrence of this month/day.
    ///
    /// Returns 0 when the birthday is today. Feb 29 is celebrated on Feb 28
    /// in non-leap years.
    pub fn days_to_birthday(&self, today: NaiveDate) -> i64 {
        let this_year = self.occurrence_in(today.year());
        let next = match this_year {
            Some(date) if date >= today => Some(date),
            _ => self.occurrence_in(today.year() + 1),
        };
        next.map_or(0, |date| (date - today).num_days())
    }

    fn occurrence_in(&self, year: i32) -> Option<NaiveDate> {
        self.date
            .with_year(year)
            .or_else(|| NaiveDate::from_ymd_opt(year, 2, 28))
    }

    /// Storage form: `MM-DD` or `YYYY-MM-DD`.
    pub fn std_str(&self) -> String {
        if self.year_known {
            self.date.format("%Y-%m-%d").to_string()
        } else {
            self.date.format("%m-%d").to_string()
        }
    }

    /// Display form: `DD Mon` or `DD Mon YYYY`.
    pub fn display_str(&self) -> String {
        if self.year_known {
            self.date.format("%d %b %Y").to_string()
        } else {
            self.date.format("%d %b").to_string()
        }
    }

    /// Display form with the countdown, e.g. `21 May (12 days left)`.
    pub fn display_with_countdown(&self, today: NaiveDate) -> String {
        format!(
            "{} ({} days left)",
            self.display_str(),
            self.days_to_birthday(today)
        )
    }
}

macro_rules! string_field {
    ($ty:ident, $validate:path) => {
        impl TryFrom<String> for $ty {
            type Error = ContactsError;

            fn try_from(value: String) -> Result<Self> {
                $validate(&value)
            }
        }

        impl From<$ty> for String {
            fn from(value: $ty) -> Self {
                value.0
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_field!(Name, validate_name);
string_field!(Phone, validate_phone);
string_field!(Email, validate_email);

impl TryFrom<String> for Birthday {
    type Error = ContactsError;

    fn try_from(value: String) -> Result<Self> {
        validate_birthday(&value)
    }
}

impl From<Birthday> for String {
    fn from(value: Birthday) -> Self {
        value.std_str()
    }
}

impl fmt::Display for Birthday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_str())
    }
}
