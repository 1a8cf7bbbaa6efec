use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use shared::*;

#[derive(Debug, Clone, Queryable, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::orders)]
pub struct DbOrder {
    pub id: String,
    pub customer_id: String,
    pub product_id: String,
    pub quantity: i32,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Queryable, Insertable)]
#[diesel(table_name = crate::schema::order_items)]
pub struct DbOrderItem {
    pub order_id: String,
    pub position: i32,
    pub product_id: String,
    pub quantity: i32,
    pub unit_price: BigDecimal,
}

impl From<&Order> for DbOrder {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.clone(),
            customer_id: order.customer_id.clone(),
            product_id: order.product_id.clone(),
            quantity: order.quantity,
            status: order.status.as_str().to_string(),
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

impl DbOrderItem {
    pub fn rows(order: &Order) -> Vec<Self> {
        order
            .items
            .iter()
            .zip(0..)
            .map(|(item, position)| Self {
                order_id: order.id.clone(),
                position,
                product_id: item.product_id.clone(),
                quantity: item.quantity,
                unit_price: item.unit_price.clone(),
            })
            .collect()
    }
}

impl From<DbOrderItem> for OrderItem {
    fn from(row: DbOrderItem) -> Self {
        OrderItem::new(row.product_id, row.quantity, row.unit_price)
    }
}

impl DbOrder {
    /// Rebuilds the domain order from its row and its item rows, which must
    /// already be sorted by position.
    pub fn into_order(self, items: Vec<DbOrderItem>) -> Result<Order, RepositoryError> {
        let status = self.status.parse::<OrderStatus>()?;

        Ok(Order {
            id: self.id,
            product_id: self.product_id,
            quantity: self.quantity,
            customer_id: self.customer_id,
            status,
            created_at: self.created_at,
            updated_at: self.updated_at,
            items: items.into_iter().map(OrderItem::from).collect(),
        })
    }
}
