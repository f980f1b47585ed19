//! A single contact and its search predicate.

use chrono::NaiveDate;
use regex::{Regex, RegexBuilder};

use crate::fields::{Birthday, Email, Name, Phone};

/// Column widths of the tabular row: name, birthday, e-mail, phones.
pub const ROW_WIDTHS: [usize; 4] = [20, 27, 30, 20];

/// One contact: name, optional birthday, optional e-mail and an ordered set
/// of unique phones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub name: Name,
    pub birthday: Option<Birthday>,
    pub email: Option<Email>,
    phones: Vec<Phone>,
}

impl Record {
    pub fn new(name: Name) -> Self {
        Self {
            name,
            birthday: None,
            email: None,
            phones: Vec::new(),
        }
    }

    pub fn with_birthday(mut self, birthday: Birthday) -> Self {
        self.birthday = Some(birthday);
        self
    }

    pub fn with_email(mut self, email: Email) -> Self {
        self.email = Some(email);
        self
    }

    pub fn with_phones(mut self, phones: impl IntoIterator<Item = Phone>) -> Self {
        self.add_phones(phones);
        self
    }

    pub fn phones(&self) -> &[Phone] {
        &self.phones
    }

    pub fn has_phone(&self, phone: &Phone) -> bool {
        self.phones.contains(phone)
    }

    /// Append `phone` unless already present. Returns whether it was added.
    pub fn add_phone(&mut self, phone: Phone) -> bool {
        if self.has_phone(&phone) {
            return false;
        }
        self.phones.push(phone);
        true
    }

    /// Append every phone not already present. Returns how many were added.
    pub fn add_phones(&mut self, phones: impl IntoIterator<Item = Phone>) -> usize {
        phones
            .into_iter()
            .map(|phone| self.add_phone(phone))
            .filter(|added| *added)
            .count()
    }

    pub fn remove_phone(&mut self, phone: &Phone) -> bool {
        match self.phones.iter().position(|p| p == phone) {
            Some(index) => {
                self.phones.remove(index);
                true
            }
            None => false,
        }
    }

    /// Whether this record matches a search query.
    ///
    /// Queries of one character or less never match.
    pub fn matches(&self, query: &str) -> bool {
        SearchQuery::new(query).is_some_and(|q| q.matches(self))
    }

    /// Fixed-width row: name, birthday with countdown, e-mail, phones.
    pub fn row(&self, today: NaiveDate) -> String {
        let [name_w, birthday_w, email_w, phones_w] = ROW_WIDTHS;
        format!(
            "{:<name_w$} {:<birthday_w$} {:<email_w$} {:<phones_w$}",
            self.name.as_str(),
            self.birthday
                .map(|b| b.display_with_countdown(today))
                .unwrap_or_default(),
            self.email.as_ref().map(Email::as_str).unwrap_or_default(),
            self.phones_joined(", "),
        )
    }

    pub fn phones_joined(&self, separator: &str) -> String {
        self.phones
            .iter()
            .map(Phone::as_str)
            .collect::<Vec<_>>()
            .join(separator)
    }
}

/// A compiled search query, built once and applied to many records.
///
/// The query is a case-insensitive pattern against the name. An all-digit
/// query also matches against the phones joined with `!`, so a match can
/// never span two numbers.
#[derive(Debug)]
pub struct SearchQuery {
    name_pattern: Regex,
    digits: Option<String>,
}

impl SearchQuery {
    /// Compile `query`, or `None` if it is too short to search with.
    pub fn new(query: &str) -> Option<Self> {
        if query.chars().count() <= 1 {
            return None;
        }
        let name_pattern = RegexBuilder::new(query)
            .case_insensitive(true)
            .build()
            .or_else(|_| {
                RegexBuilder::new(&regex::escape(query))
                    .case_insensitive(true)
                    .build()
            })
            .ok()?;
        let digits = query
            .bytes()
            .all(|b| b.is_ascii_digit())
            .then(|| query.to_string());
        Some(Self {
            name_pattern,
            digits,
        })
    }

    pub fn matches(&self, record: &Record) -> bool {
        if self.name_pattern.is_match(record.name.as_str()) {
            return true;
        }
        match &self.digits {
            Some(digits) => record.phones_joined("!").contains(digits.as_str()),
            None => false,
        }
    }
}
