pub mod coupons;
pub mod payment_intents;

pub use coupons::CouponService;
pub use payment_intents::PaymentIntentService;
