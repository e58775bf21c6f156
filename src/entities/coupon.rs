use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A store-issued discount code. Created and edited by store administrators
/// outside this service; checkout only ever reads it.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "coupons")]
#[serde(rename_all = "camelCase")]
#[schema(as = Coupon)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Redemption code shoppers type in. Matched case-sensitively, exactly.
    #[sea_orm(indexed)]
    pub code: String,

    /// Gates redemption eligibility; inactive coupons are rejected at apply
    /// time with a 400.
    pub is_active: bool,

    /// "percentage" or "fixed"
    pub discount_type: String,

    pub discount_value: Decimal,

    pub description: Option<String>,

    #[schema(value_type = chrono::DateTime<chrono::Utc>)]
    pub created_at: DateTimeUtc,
    #[schema(value_type = chrono::DateTime<chrono::Utc>)]
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
