//! Client-side checkout orchestration core: the multi-step form state
//! machine and the per-step validation engine.
//!
//! Everything in this module is pure and synchronous. Actions are applied
//! one at a time on the UI dispatch thread; validation results are data fed
//! back into the form via [`form::FormAction::SetErrors`], never faults.

pub mod form;
pub mod validation;

pub use form::{CheckoutField, CheckoutForm, FieldValue, FormAction};
pub use validation::{validate_step, CheckoutStep, StepValidation};
