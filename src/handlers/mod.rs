pub mod coupons;
pub mod payment_intents;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;
