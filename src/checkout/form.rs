use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// The closed set of checkout form fields.
///
/// Keying state by this enum (rather than free-form strings) makes the
/// "errors only ever reference known fields" invariant structural.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum CheckoutField {
    FirstName,
    LastName,
    Address1,
    Address2,
    City,
    State,
    Zip,
    Country,
    CardName,
    CardNumber,
    ExpDate,
    Cvv,
    SaveAddress,
    SaveCardInfo,
}

impl CheckoutField {
    /// Every known field, in form order.
    pub const ALL: [CheckoutField; 14] = [
        CheckoutField::FirstName,
        CheckoutField::LastName,
        CheckoutField::Address1,
        CheckoutField::Address2,
        CheckoutField::City,
        CheckoutField::State,
        CheckoutField::Zip,
        CheckoutField::Country,
        CheckoutField::CardName,
        CheckoutField::CardNumber,
        CheckoutField::ExpDate,
        CheckoutField::Cvv,
        CheckoutField::SaveAddress,
        CheckoutField::SaveCardInfo,
    ];

    /// Wire/DOM name of the field.
    pub fn name(self) -> &'static str {
        match self {
            CheckoutField::FirstName => "firstName",
            CheckoutField::LastName => "lastName",
            CheckoutField::Address1 => "address1",
            CheckoutField::Address2 => "address2",
            CheckoutField::City => "city",
            CheckoutField::State => "state",
            CheckoutField::Zip => "zip",
            CheckoutField::Country => "country",
            CheckoutField::CardName => "cardName",
            CheckoutField::CardNumber => "cardNumber",
            CheckoutField::ExpDate => "expDate",
            CheckoutField::Cvv => "cvv",
            CheckoutField::SaveAddress => "saveAddress",
            CheckoutField::SaveCardInfo => "saveCardInfo",
        }
    }

    /// Whether the field holds a checkbox flag rather than text input.
    pub fn is_flag(self) -> bool {
        matches!(
            self,
            CheckoutField::SaveAddress | CheckoutField::SaveCardInfo
        )
    }
}

/// A single field's value: text inputs hold strings, checkboxes hold flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    /// Text content; flags read as empty text.
    pub fn as_text(&self) -> &str {
        match self {
            FieldValue::Text(s) => s.as_str(),
            FieldValue::Flag(_) => "",
        }
    }

    /// Flag content; text reads as unset.
    pub fn as_flag(&self) -> bool {
        match self {
            FieldValue::Flag(b) => *b,
            FieldValue::Text(_) => false,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

/// Actions dispatched against the checkout form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    /// Replace a single field's value. No validation side effect.
    SetFieldValue {
        field: CheckoutField,
        value: FieldValue,
    },
    /// Mark a field as interacted with. Idempotent.
    SetFieldTouched { field: CheckoutField },
    /// Merge a partial mapping into `values`, preserving unspecified fields
    /// (used to hydrate from a saved address or profile).
    SetFormValues(BTreeMap<CheckoutField, FieldValue>),
    /// Replace the entire error mapping after a validation pass.
    SetErrors(BTreeMap<CheckoutField, String>),
    /// Reset the error mapping to empty.
    ClearErrors,
}

static EMPTY_TEXT: FieldValue = FieldValue::Text(String::new());

/// Composite checkout form state: `{values, errors, touched}`.
///
/// `values` is total over [`CheckoutField::ALL`] from construction onward;
/// step progression is tracked by the caller, not the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutForm {
    values: BTreeMap<CheckoutField, FieldValue>,
    errors: BTreeMap<CheckoutField, String>,
    touched: BTreeSet<CheckoutField>,
}

impl Default for CheckoutForm {
    fn default() -> Self {
        let mut values = BTreeMap::new();
        for field in CheckoutField::ALL {
            let initial = if field.is_flag() {
                FieldValue::Flag(false)
            } else {
                FieldValue::Text(String::new())
            };
            values.insert(field, initial);
        }
        Self {
            values,
            errors: BTreeMap::new(),
            touched: BTreeSet::new(),
        }
    }
}

impl CheckoutForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pure state transition: same form + same action always yields the
    /// same next form.
    #[must_use]
    pub fn apply(&self, action: FormAction) -> CheckoutForm {
        let mut next = self.clone();
        match action {
            FormAction::SetFieldValue { field, value } => {
                next.values.insert(field, value);
            }
            FormAction::SetFieldTouched { field } => {
                next.touched.insert(field);
            }
            FormAction::SetFormValues(partial) => {
                for (field, value) in partial {
                    next.values.insert(field, value);
                }
            }
            FormAction::SetErrors(errors) => {
                next.errors = errors;
            }
            FormAction::ClearErrors => {
                next.errors.clear();
            }
        }
        next
    }

    pub fn value(&self, field: CheckoutField) -> &FieldValue {
        // Total from construction; the fallback is unreachable.
        self.values.get(&field).unwrap_or(&EMPTY_TEXT)
    }

    pub fn values(&self) -> &BTreeMap<CheckoutField, FieldValue> {
        &self.values
    }

    pub fn error(&self, field: CheckoutField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn errors(&self) -> &BTreeMap<CheckoutField, String> {
        &self.errors
    }

    pub fn is_touched(&self, field: CheckoutField) -> bool {
        self.touched.contains(&field)
    }

    pub fn touched(&self) -> &BTreeSet<CheckoutField> {
        &self.touched
    }
}
