use std::sync::Arc;

use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use tracing::{instrument, warn};

use crate::entities::coupon;
use crate::errors::ServiceError;

/// Read-only coupon lookup at checkout time. Applying a coupon never marks
/// it consumed or touches a usage counter.
#[derive(Clone)]
pub struct CouponService {
    db: Arc<DatabaseConnection>,
}

impl CouponService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Look up a coupon by exact, case-sensitive code match.
    ///
    /// If duplicate codes exist only the first match is considered.
    #[instrument(skip(self))]
    pub async fn apply_coupon(&self, code: &str) -> Result<coupon::Model, ServiceError> {
        if code.is_empty() {
            return Err(ServiceError::BadRequest("Coupon code is required".to_string()));
        }

        let coupon = coupon::Entity::find()
            .filter(coupon::Column::Code.eq(code))
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Coupon {} not found", code)))?;

        if !coupon.is_active {
            warn!(code, "rejected inactive coupon");
            return Err(ServiceError::InactiveCoupon(code.to_string()));
        }

        Ok(coupon)
    }
}
