// Rule definitions and the runner that applies them to a submitted form

use regex::Regex;
use std::collections::HashMap;
use tracing::{debug, error};

use crate::accounts::repository::AccountStore;
use crate::inventory::repository::InventoryStore;
use crate::store::StoreError;
use crate::validation::sanitize;
use crate::validation::{FormValues, ValidationErrorSet};

pub const STRONG_PASSWORD_MIN_LENGTH: usize = 12;

pub type Normalizer = fn(&str) -> String;

/// Pure predicate over a sanitized value
#[derive(Debug, Clone)]
pub enum Check {
    Required,
    MinLength(usize),
    Matches(Regex),
    Email,
    StrongPassword,
    /// Rule that could not be built; always fails
    Never,
}

impl Check {
    pub fn passes(&self, value: &str) -> bool {
        match self {
            Check::Required => !value.is_empty(),
            Check::MinLength(min) => value.chars().count() >= *min,
            Check::Matches(pattern) => pattern.is_match(value),
            Check::Email => validator::validate_email(value),
            Check::StrongPassword => is_strong_password(value),
            Check::Never => false,
        }
    }
}

/// Characters counted as symbols by the strong password check
pub const PASSWORD_SYMBOLS: &str = "-#!$@£%^&*()_+|~=`{}[]:\";'<>?,./\\ ";

/// At least 12 characters with one ASCII lowercase, one ASCII uppercase,
/// one digit and one of [`PASSWORD_SYMBOLS`]
pub fn is_strong_password(value: &str) -> bool {
    value.chars().count() >= STRONG_PASSWORD_MIN_LENGTH
        && value.chars().any(|c| c.is_ascii_lowercase())
        && value.chars().any(|c| c.is_ascii_uppercase())
        && value.chars().any(|c| c.is_ascii_digit())
        && value.chars().any(|c| PASSWORD_SYMBOLS.contains(c))
}

/// Check that consults the persistent store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreCheck {
    /// No account uses the email
    EmailAbsent,
    /// The email belongs to the account named in `id_field`
    EmailOwnedBy { id_field: &'static str },
    /// The email is unused, or used by the account named in `id_field`
    EmailAvailableFor { id_field: &'static str },
    /// No classification has the name
    ClassificationAbsent,
    /// The value is the id of an existing classification
    ClassificationExists,
}

/// Store handles available to store checks
#[derive(Clone, Copy)]
pub struct CheckContext<'a> {
    pub accounts: &'a dyn AccountStore,
    pub inventory: &'a dyn InventoryStore,
}

impl StoreCheck {
    pub async fn passes(
        &self,
        value: &str,
        values: &FormValues,
        ctx: CheckContext<'_>,
    ) -> Result<bool, StoreError> {
        match self {
            StoreCheck::EmailAbsent => Ok(!ctx.accounts.email_exists(value).await?),
            StoreCheck::EmailOwnedBy { id_field } => {
                let Some(existing) = ctx.accounts.find_by_email(value).await? else {
                    return Ok(false);
                };
                Ok(owner_id(values, id_field) == Some(existing.account_id))
            }
            StoreCheck::EmailAvailableFor { id_field } => {
                let Some(existing) = ctx.accounts.find_by_email(value).await? else {
                    return Ok(true);
                };
                Ok(owner_id(values, id_field) == Some(existing.account_id))
            }
            StoreCheck::ClassificationAbsent => {
                Ok(!ctx.inventory.classification_exists(value).await?)
            }
            StoreCheck::ClassificationExists => match value.parse::<i32>() {
                Ok(id) => Ok(ctx.inventory.get_classification(id).await?.is_some()),
                Err(_) => Ok(false),
            },
        }
    }
}

fn owner_id(values: &FormValues, id_field: &str) -> Option<i32> {
    values.value(id_field).parse::<i32>().ok()
}

#[derive(Debug, Clone)]
pub struct Rule {
    pub check: Check,
    pub message: &'static str,
}

/// Sanitizers, ordered checks and an optional store check for one field
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub field: &'static str,
    pub normalizers: Vec<Normalizer>,
    pub checks: Vec<Rule>,
    pub store_check: Option<(StoreCheck, &'static str)>,
}

impl FieldRule {
    pub fn new(field: &'static str) -> Self {
        Self {
            field,
            normalizers: Vec::new(),
            checks: Vec::new(),
            store_check: None,
        }
    }

    pub fn trim(mut self) -> Self {
        self.normalizers.push(sanitize::trim);
        self
    }

    pub fn escape(mut self) -> Self {
        self.normalizers.push(sanitize::escape);
        self
    }

    pub fn normalize_email(mut self) -> Self {
        self.normalizers.push(sanitize::normalize_email);
        self
    }

    pub fn check(mut self, check: Check, message: &'static str) -> Self {
        self.checks.push(Rule { check, message });
        self
    }

    pub fn required(self, message: &'static str) -> Self {
        self.check(Check::Required, message)
    }

    pub fn min_length(self, min: usize, message: &'static str) -> Self {
        self.check(Check::MinLength(min), message)
    }

    pub fn email(self, message: &'static str) -> Self {
        self.check(Check::Email, message)
    }

    pub fn strong_password(self, message: &'static str) -> Self {
        self.check(Check::StrongPassword, message)
    }

    pub fn matches(self, pattern: &str, message: &'static str) -> Self {
        match Regex::new(pattern) {
            Ok(regex) => self.check(Check::Matches(regex), message),
            Err(e) => {
                error!("Invalid pattern for field {}: {}", self.field, e);
                self.check(Check::Never, message)
            }
        }
    }

    pub fn store(mut self, check: StoreCheck, message: &'static str) -> Self {
        self.store_check = Some((check, message));
        self
    }

    pub fn sanitize(&self, raw: &str) -> String {
        self.normalizers
            .iter()
            .fold(raw.to_string(), |value, normalize| normalize(&value))
    }
}

/// Result of running a rule table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Valid(FormValues),
    Invalid {
        values: FormValues,
        errors: ValidationErrorSet,
    },
}

impl Outcome {
    pub fn values(&self) -> &FormValues {
        match self {
            Outcome::Valid(values) => values,
            Outcome::Invalid { values, .. } => values,
        }
    }

    pub fn errors(&self) -> Option<&ValidationErrorSet> {
        match self {
            Outcome::Valid(_) => None,
            Outcome::Invalid { errors, .. } => Some(errors),
        }
    }
}

/// Sanitize every declared field; undeclared fields are dropped
pub fn sanitize_all(rules: &[FieldRule], raw: &HashMap<String, String>) -> FormValues {
    let mut values = FormValues::new();
    for rule in rules {
        let submitted = raw.get(rule.field).map(String::as_str).unwrap_or("");
        values.insert(rule.field, rule.sanitize(submitted));
    }
    values
}

/// Run a rule table against raw form input.
///
/// All fields are sanitized first so store checks can read sibling values.
/// A field's store check only runs when its pure checks passed.
pub async fn run(
    rules: &[FieldRule],
    raw: &HashMap<String, String>,
    ctx: CheckContext<'_>,
) -> Result<Outcome, StoreError> {
    let values = sanitize_all(rules, raw);
    let mut errors = ValidationErrorSet::new();

    for rule in rules {
        let value = values.value(rule.field);
        let mut field_ok = true;
        for Rule { check, message } in &rule.checks {
            if !check.passes(value) {
                field_ok = false;
                errors.push(rule.field, message);
            }
        }

        if let (true, Some((store_check, message))) = (field_ok, &rule.store_check) {
            if !store_check.passes(value, &values, ctx).await? {
                errors.push(rule.field, message);
            }
        }
    }

    if errors.is_empty() {
        Ok(Outcome::Valid(values))
    } else {
        debug!("Validation failed with {} error(s)", errors.len());
        Ok(Outcome::Invalid { values, errors })
    }
}
