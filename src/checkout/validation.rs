use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use super::form::{CheckoutField, CheckoutForm, FieldValue};

/// A named phase of the multi-step checkout form, each with its own
/// validation rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutStep {
    Shipping,
    Payment,
}

/// Outcome of validating one step: `valid` iff no field in the step's rule
/// table failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepValidation {
    pub valid: bool,
    pub errors: BTreeMap<CheckoutField, String>,
}

/// One entry in a step's rule table. `check` returns true when the value is
/// acceptable; `message` is the inline error shown otherwise.
struct FieldRule {
    field: CheckoutField,
    check: fn(&FieldValue) -> bool,
    message: &'static str,
}

static ZIP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{7}$").expect("zip pattern"));
static CARD_NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{16}$").expect("card pattern"));
static EXP_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(0[1-9]|1[0-2])/\d{2}$").expect("expiry pattern"));
static CVV_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{3,4}$").expect("cvv pattern"));

fn non_blank(value: &FieldValue) -> bool {
    !value.as_text().trim().is_empty()
}

fn zip_ok(value: &FieldValue) -> bool {
    ZIP_RE.is_match(value.as_text())
}

fn card_number_ok(value: &FieldValue) -> bool {
    // All whitespace is stripped before the digit check, so grouped entry
    // like "4242 4242 4242 4242" is accepted.
    let digits: String = value
        .as_text()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    CARD_NUMBER_RE.is_match(&digits)
}

fn exp_date_ok(value: &FieldValue) -> bool {
    EXP_DATE_RE.is_match(value.as_text())
}

fn cvv_ok(value: &FieldValue) -> bool {
    CVV_RE.is_match(value.as_text())
}

static SHIPPING_RULES: [FieldRule; 6] = [
    FieldRule {
        field: CheckoutField::FirstName,
        check: non_blank,
        message: "First name is required",
    },
    FieldRule {
        field: CheckoutField::LastName,
        check: non_blank,
        message: "Last name is required",
    },
    FieldRule {
        field: CheckoutField::Address1,
        check: non_blank,
        message: "Address is required",
    },
    FieldRule {
        field: CheckoutField::City,
        check: non_blank,
        message: "City is required",
    },
    FieldRule {
        field: CheckoutField::State,
        check: non_blank,
        message: "State is required",
    },
    FieldRule {
        field: CheckoutField::Zip,
        check: zip_ok,
        message: "Invalid zip code",
    },
];

static PAYMENT_RULES: [FieldRule; 4] = [
    FieldRule {
        field: CheckoutField::CardName,
        check: non_blank,
        message: "Name on card is required",
    },
    FieldRule {
        field: CheckoutField::CardNumber,
        check: card_number_ok,
        message: "Invalid card number",
    },
    FieldRule {
        field: CheckoutField::ExpDate,
        check: exp_date_ok,
        message: "Invalid expiration date",
    },
    FieldRule {
        field: CheckoutField::Cvv,
        check: cvv_ok,
        message: "Invalid CVV",
    },
];

impl CheckoutStep {
    fn rules(self) -> &'static [FieldRule] {
        match self {
            CheckoutStep::Shipping => &SHIPPING_RULES,
            CheckoutStep::Payment => &PAYMENT_RULES,
        }
    }
}

/// Run every rule in the step's table against the current form values and
/// collect a message per failing field.
///
/// Pure: the caller feeds the result back into the form via
/// [`super::form::FormAction::SetErrors`].
pub fn validate_step(form: &CheckoutForm, step: CheckoutStep) -> StepValidation {
    let mut errors = BTreeMap::new();
    for rule in step.rules() {
        if !(rule.check)(form.value(rule.field)) {
            errors.insert(rule.field, rule.message.to_string());
        }
    }
    StepValidation {
        valid: errors.is_empty(),
        errors,
    }
}
