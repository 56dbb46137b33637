// ABOUTME: Field validation helpers applied at the request boundary
// ABOUTME: Email and password checks, violation collection, tag and ingredient-list normalization
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkast

//! Boundary validation.
//!
//! Payload types collect every violated constraint into [`Violations`] and
//! report them together as a single validation failure, so a client sees all
//! problems with a request at once instead of one per round trip.

use std::collections::BTreeSet;

use crate::constants::limits;
use crate::errors::{AppError, AppResult};

/// Accumulator for constraint violations found while validating a payload
#[derive(Debug, Default)]
pub struct Violations(Vec<String>);

impl Violations {
    /// Create an empty accumulator
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation
    pub fn push(&mut self, message: impl Into<String>) {
        self.0.push(message.into());
    }

    /// Record `message` unless `ok` holds
    pub fn check(&mut self, ok: bool, message: impl FnOnce() -> String) {
        if !ok {
            self.0.push(message());
        }
    }

    /// Require a non-blank string
    pub fn not_blank(&mut self, field: &str, value: &str) {
        self.check(!value.trim().is_empty(), || format!("{field} must not be blank"));
    }

    /// Require a character count within `min..=max`
    pub fn length_between(&mut self, field: &str, value: &str, min: usize, max: usize) {
        let len = value.trim().chars().count();
        self.check((min..=max).contains(&len), || {
            format!("{field} must be between {min} and {max} characters")
        });
    }

    /// Require at most `max` characters
    pub fn max_length(&mut self, field: &str, value: &str, max: usize) {
        self.check(value.chars().count() <= max, || {
            format!("{field} must be at most {max} characters")
        });
    }

    /// Require a value in `1..=u32::MAX`, the range stored counters can hold
    pub fn positive(&mut self, field: &str, value: i64) {
        if value <= 0 {
            self.push(format!("{field} must be positive"));
        } else if u32::try_from(value).is_err() {
            self.push(format!("{field} must be at most {}", u32::MAX));
        }
    }

    /// [`Violations::positive`] when a value is present
    pub fn positive_if_present(&mut self, field: &str, value: Option<i64>) {
        if let Some(v) = value {
            self.positive(field, v);
        }
    }

    /// Whether no violation has been recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Convert into a validation failure if anything was recorded
    ///
    /// # Errors
    ///
    /// Returns an `InvalidInput` error listing every recorded violation
    pub fn into_result(self) -> AppResult<()> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(AppError::validation(self.0))
        }
    }
}

/// Loose structural email check: `local@domain.tld`
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    if email.len() < limits::EMAIL_MIN_LENGTH {
        return false;
    }
    let Some(at_pos) = email.find('@') else {
        return false;
    };
    if at_pos == 0 || at_pos == email.len() - 1 {
        return false;
    }
    let domain_part = &email[at_pos + 1..];
    domain_part.contains('.') && !domain_part.starts_with('.') && !domain_part.ends_with('.')
}

/// Password strength check
#[must_use]
pub const fn is_valid_password(password: &str) -> bool {
    password.len() >= limits::PASSWORD_MIN_LENGTH
}

/// Validate registration credentials
///
/// # Errors
///
/// Returns an `InvalidInput` error naming each failed check
pub fn validate_credentials(email: &str, password: &str) -> AppResult<()> {
    let mut violations = Violations::new();
    violations.check(is_valid_email(email), || "Invalid email format".to_owned());
    violations.check(is_valid_password(password), || {
        format!(
            "Password must be at least {} characters long",
            limits::PASSWORD_MIN_LENGTH
        )
    });
    violations.into_result()
}

/// Normalize a list of preference or allergy tags
///
/// Tags are trimmed and blank entries dropped; duplicates collapse.
///
/// # Errors
///
/// Returns an `InvalidInput` error if any tag is too long
pub fn normalize_tags<I, S>(tags: I) -> AppResult<BTreeSet<String>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut violations = Violations::new();
    let mut normalized = BTreeSet::new();
    for tag in tags {
        let tag = tag.as_ref().trim();
        if tag.is_empty() {
            continue;
        }
        violations.max_length("tag", tag, limits::TAG_MAX_CHARS);
        normalized.insert(tag.to_owned());
    }
    violations.into_result()?;
    Ok(normalized)
}

/// Parse a comma separated ingredient query such as `salt, pepper`
///
/// # Errors
///
/// Returns an `InvalidInput` error when the list holds no names at all
pub fn parse_ingredient_list(raw: &str) -> AppResult<BTreeSet<String>> {
    let names: BTreeSet<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
        .collect();

    if names.is_empty() {
        return Err(AppError::invalid_input(
            "ingredients must name at least one ingredient",
        ));
    }
    Ok(names)
}
