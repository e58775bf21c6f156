pub mod coupon;

pub use coupon::Entity as Coupon;
