// View model handed to the renderer

use serde::Serialize;
use serde_json::{Map, Value};

use crate::auth::token::SessionClaims;
use crate::inventory::models::Classification;
use crate::validation::{FormValues, ValidationErrorSet};
use crate::views::flash::Flash;

/// One entry of the site navigation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub href: String,
    pub label: String,
    pub title: String,
}

impl NavLink {
    /// Home link followed by one link per classification
    pub fn from_classifications(classifications: &[Classification]) -> Vec<NavLink> {
        let mut links = vec![NavLink {
            href: "/".to_string(),
            label: "Home".to_string(),
            title: "Home page".to_string(),
        }];
        links.extend(classifications.iter().map(|c| NavLink {
            href: format!("/inv/type/{}", c.classification_id),
            label: c.classification_name.clone(),
            title: format!("See our inventory of {} vehicles", c.classification_name),
        }));
        links
    }
}

/// Data for one rendered page.
///
/// `title`, `nav` and `errors` are always present; view-specific data is
/// flattened into the top level.
#[derive(Debug, Clone, Serialize)]
pub struct ViewModel {
    pub title: String,
    pub nav: Vec<NavLink>,
    pub errors: Option<ValidationErrorSet>,
    pub notices: Vec<String>,
    pub values: Map<String, Value>,
    pub account: Option<SessionClaims>,
    #[serde(flatten)]
    pub data: Map<String, Value>,
    #[serde(skip)]
    consumed_flash: bool,
}

impl ViewModel {
    pub fn new(title: impl Into<String>, nav: Vec<NavLink>) -> Self {
        Self {
            title: title.into(),
            nav,
            errors: None,
            notices: Vec::new(),
            values: Map::new(),
            account: None,
            data: Map::new(),
            consumed_flash: false,
        }
    }

    pub fn with_errors(mut self, errors: ValidationErrorSet) -> Self {
        self.errors = Some(errors);
        self
    }

    pub fn with_notice(mut self, notice: impl Into<String>) -> Self {
        self.notices.push(notice.into());
        self
    }

    /// Move pending notices from the previous redirect into this page
    pub fn with_flash(mut self, flash: Flash) -> Self {
        if flash.was_present() {
            self.consumed_flash = true;
        }
        self.notices.extend(flash.into_notices());
        self
    }

    pub fn with_account(mut self, account: Option<SessionClaims>) -> Self {
        self.account = account;
        self
    }

    /// Re-display previously entered (sanitized) form values
    pub fn with_values(mut self, values: &FormValues) -> Self {
        for (field, value) in values.iter() {
            self.values
                .insert(field.to_string(), Value::String(value.to_string()));
        }
        self
    }

    pub fn with_value(mut self, field: &str, value: impl Into<String>) -> Self {
        self.values
            .insert(field.to_string(), Value::String(value.into()));
        self
    }

    pub fn with_data(mut self, key: &str, value: impl Serialize) -> Self {
        let value = serde_json::to_value(value).unwrap_or(Value::Null);
        self.data.insert(key.to_string(), value);
        self
    }

    pub fn consumed_flash(&self) -> bool {
        self.consumed_flash
    }
}
