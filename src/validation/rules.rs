// Per-endpoint rule tables, built once

use std::sync::OnceLock;

use crate::accounts::models::{
    DeleteAccountForm, LoginForm, RegisterForm, UpdateAccountForm, UpdatePasswordForm,
};
use crate::inventory::models::{
    ClassificationForm, DeleteVehicleForm, UpdateVehicleForm, VehicleForm,
};
use crate::validation::extract::FormSpec;
use crate::validation::pipeline::{FieldRule, StoreCheck};
use crate::validation::FormValues;

pub const FIRSTNAME_MESSAGE: &str = "Please provide a first name.";
pub const LASTNAME_MESSAGE: &str = "Please provide a last name.";
pub const EMAIL_MESSAGE: &str = "A valid email is required.";
pub const EMAIL_EXISTS_MESSAGE: &str = "Email exists. Please log in or use different email";
pub const EMAIL_IN_USE_MESSAGE: &str = "Email exists. Please use a different email.";
pub const EMAIL_UNKNOWN_MESSAGE: &str = "That email does not belong to this account.";
pub const PASSWORD_MESSAGE: &str = "Password does not meet requirements.";
pub const PASSWORD_REQUIRED_MESSAGE: &str = "Please provide a password.";
pub const ACCOUNT_ID_MESSAGE: &str = "Account id is invalid.";
pub const CLASSIFICATION_NAME_MESSAGE: &str =
    "No spaces or special characters allowed. Use only letters and numbers.";
pub const CLASSIFICATION_EXISTS_MESSAGE: &str =
    "Classification already exists. Please enter a different Classification.";
pub const MAKE_MESSAGE: &str = "Vehicle make can only contain letters, numbers, and spaces.";
pub const MODEL_MESSAGE: &str = "Vehicle model can only contain letters, numbers, and spaces.";
pub const YEAR_MESSAGE: &str = "Vehicle year must be exactly 4 digits.";
pub const DESCRIPTION_MESSAGE: &str = "Vehicle description is required.";
pub const PRICE_MESSAGE: &str = "Vehicle price must be digits only, up to 9 digits.";
pub const MILES_MESSAGE: &str = "Vehicle miles must be digits only.";
pub const COLOR_MESSAGE: &str = "Vehicle color must contain only letters.";
pub const CLASSIFICATION_MESSAGE: &str = "Vehicle classification is required.";
pub const VEHICLE_ID_MESSAGE: &str = "Vehicle id is invalid.";

const ID_PATTERN: &str = r"^\d{1,9}$";
const MAKE_MODEL_PATTERN: &str = r"^[A-Za-z0-9 ]+$";

fn firstname() -> FieldRule {
    FieldRule::new("account_firstname")
        .trim()
        .escape()
        .required(FIRSTNAME_MESSAGE)
        .min_length(1, FIRSTNAME_MESSAGE)
}

fn lastname() -> FieldRule {
    FieldRule::new("account_lastname")
        .trim()
        .escape()
        .required(LASTNAME_MESSAGE)
        .min_length(2, LASTNAME_MESSAGE)
}

fn email() -> FieldRule {
    FieldRule::new("account_email")
        .trim()
        .escape()
        .normalize_email()
        .required(EMAIL_MESSAGE)
        .email(EMAIL_MESSAGE)
}

fn strong_password() -> FieldRule {
    FieldRule::new("account_password")
        .trim()
        .required(PASSWORD_MESSAGE)
        .strong_password(PASSWORD_MESSAGE)
}

fn account_id() -> FieldRule {
    FieldRule::new("account_id")
        .trim()
        .escape()
        .matches(ID_PATTERN, ACCOUNT_ID_MESSAGE)
}

pub fn registration() -> &'static [FieldRule] {
    static RULES: OnceLock<Vec<FieldRule>> = OnceLock::new();
    RULES.get_or_init(|| {
        vec![
            firstname(),
            lastname(),
            email().store(StoreCheck::EmailAbsent, EMAIL_EXISTS_MESSAGE),
            strong_password(),
        ]
    })
}

/// Login only checks shape; unknown emails and wrong passwords share one message
pub fn login() -> &'static [FieldRule] {
    static RULES: OnceLock<Vec<FieldRule>> = OnceLock::new();
    RULES.get_or_init(|| {
        vec![
            email(),
            FieldRule::new("account_password")
                .trim()
                .required(PASSWORD_REQUIRED_MESSAGE),
        ]
    })
}

pub fn account_update() -> &'static [FieldRule] {
    static RULES: OnceLock<Vec<FieldRule>> = OnceLock::new();
    RULES.get_or_init(|| {
        vec![
            account_id(),
            firstname(),
            lastname(),
            email().store(
                StoreCheck::EmailAvailableFor { id_field: "account_id" },
                EMAIL_IN_USE_MESSAGE,
            ),
        ]
    })
}

pub fn password_update() -> &'static [FieldRule] {
    static RULES: OnceLock<Vec<FieldRule>> = OnceLock::new();
    RULES.get_or_init(|| vec![account_id(), strong_password()])
}

pub fn account_delete() -> &'static [FieldRule] {
    static RULES: OnceLock<Vec<FieldRule>> = OnceLock::new();
    RULES.get_or_init(|| {
        vec![
            account_id(),
            firstname(),
            lastname(),
            email().store(
                StoreCheck::EmailOwnedBy { id_field: "account_id" },
                EMAIL_UNKNOWN_MESSAGE,
            ),
        ]
    })
}

pub fn classification() -> &'static [FieldRule] {
    static RULES: OnceLock<Vec<FieldRule>> = OnceLock::new();
    RULES.get_or_init(|| {
        vec![FieldRule::new("classification_name")
            .trim()
            .escape()
            .required(CLASSIFICATION_NAME_MESSAGE)
            .matches(r"^[a-zA-Z0-9]+$", CLASSIFICATION_NAME_MESSAGE)
            .store(StoreCheck::ClassificationAbsent, CLASSIFICATION_EXISTS_MESSAGE)]
    })
}

fn vehicle_fields() -> Vec<FieldRule> {
    vec![
        FieldRule::new("inv_make")
            .trim()
            .escape()
            .matches(MAKE_MODEL_PATTERN, MAKE_MESSAGE),
        FieldRule::new("inv_model")
            .trim()
            .escape()
            .matches(MAKE_MODEL_PATTERN, MODEL_MESSAGE),
        FieldRule::new("inv_year")
            .trim()
            .escape()
            .matches(r"^\d{4}$", YEAR_MESSAGE),
        FieldRule::new("inv_description")
            .trim()
            .escape()
            .required(DESCRIPTION_MESSAGE),
        FieldRule::new("inv_price")
            .trim()
            .escape()
            .matches(ID_PATTERN, PRICE_MESSAGE),
        FieldRule::new("inv_miles")
            .trim()
            .escape()
            .matches(ID_PATTERN, MILES_MESSAGE),
        FieldRule::new("inv_color")
            .trim()
            .escape()
            .matches(r"^[A-Za-z]+$", COLOR_MESSAGE),
        FieldRule::new("classification_id")
            .trim()
            .escape()
            .required(CLASSIFICATION_MESSAGE)
            .matches(ID_PATTERN, CLASSIFICATION_MESSAGE)
            .store(StoreCheck::ClassificationExists, CLASSIFICATION_MESSAGE),
    ]
}

pub fn vehicle() -> &'static [FieldRule] {
    static RULES: OnceLock<Vec<FieldRule>> = OnceLock::new();
    RULES.get_or_init(vehicle_fields)
}

pub fn vehicle_update() -> &'static [FieldRule] {
    static RULES: OnceLock<Vec<FieldRule>> = OnceLock::new();
    RULES.get_or_init(|| {
        let mut rules = vec![FieldRule::new("inv_id")
            .trim()
            .escape()
            .matches(ID_PATTERN, VEHICLE_ID_MESSAGE)];
        rules.extend(vehicle_fields());
        rules
    })
}

pub fn vehicle_delete() -> &'static [FieldRule] {
    static RULES: OnceLock<Vec<FieldRule>> = OnceLock::new();
    RULES.get_or_init(|| {
        vec![
            FieldRule::new("inv_id")
                .trim()
                .escape()
                .matches(ID_PATTERN, VEHICLE_ID_MESSAGE),
            FieldRule::new("inv_make").trim().escape(),
            FieldRule::new("inv_model").trim().escape(),
        ]
    })
}

fn vehicle_name(values: &FormValues) -> String {
    format!("{} {}", values.value("inv_make"), values.value("inv_model"))
}

impl FormSpec for RegisterForm {
    const VIEW: &'static str = "account/register";

    fn rules() -> &'static [FieldRule] {
        registration()
    }

    fn title(_: &FormValues) -> String {
        "Register".to_string()
    }
}

impl FormSpec for LoginForm {
    const VIEW: &'static str = "account/login";

    fn rules() -> &'static [FieldRule] {
        login()
    }

    fn title(_: &FormValues) -> String {
        "Login".to_string()
    }
}

impl FormSpec for UpdateAccountForm {
    const VIEW: &'static str = "account/update-account";

    fn rules() -> &'static [FieldRule] {
        account_update()
    }

    fn title(_: &FormValues) -> String {
        "Edit Account".to_string()
    }
}

impl FormSpec for UpdatePasswordForm {
    const VIEW: &'static str = "account/update-account";

    fn rules() -> &'static [FieldRule] {
        password_update()
    }

    fn title(_: &FormValues) -> String {
        "Edit Account".to_string()
    }
}

impl FormSpec for DeleteAccountForm {
    const VIEW: &'static str = "account/delete-account";

    fn rules() -> &'static [FieldRule] {
        account_delete()
    }

    fn title(_: &FormValues) -> String {
        "Delete Account".to_string()
    }
}

impl FormSpec for ClassificationForm {
    const VIEW: &'static str = "inventory/add-classification";

    fn rules() -> &'static [FieldRule] {
        classification()
    }

    fn title(_: &FormValues) -> String {
        "Add New Classification".to_string()
    }
}

impl FormSpec for VehicleForm {
    const VIEW: &'static str = "inventory/add-inventory";

    fn rules() -> &'static [FieldRule] {
        vehicle()
    }

    fn title(_: &FormValues) -> String {
        "Add New Vehicle".to_string()
    }

    fn needs_classifications() -> bool {
        true
    }
}

impl FormSpec for UpdateVehicleForm {
    const VIEW: &'static str = "inventory/edit-inventory";

    fn rules() -> &'static [FieldRule] {
        vehicle_update()
    }

    fn title(values: &FormValues) -> String {
        format!("Edit {}", vehicle_name(values))
    }

    fn needs_classifications() -> bool {
        true
    }
}

impl FormSpec for DeleteVehicleForm {
    const VIEW: &'static str = "inventory/delete-confirm";

    fn rules() -> &'static [FieldRule] {
        vehicle_delete()
    }

    fn title(values: &FormValues) -> String {
        format!("Delete {}", vehicle_name(values))
    }
}
