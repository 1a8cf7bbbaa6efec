use chrono::{DateTime, Utc};
use diesel::prelude::*;

#[derive(Debug, Clone, Queryable)]
#[diesel(table_name = crate::schema::inventory)]
pub struct Inventory {
    pub product_id: String,
    pub available_quantity: i32,
    pub reserved_quantity: i32,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}
