use chrono::{Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use ims_core::{DomainError, DomainResult, Entity, OrderId, ProductId, ensure_field};
use ims_products::Product;

/// Timestamp layout used for `order_date` (always six fractional digits).
pub const ORDER_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Order status.
///
/// Well-known states get their own variant; any other text is kept verbatim.
/// No transition rules are enforced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    #[default]
    Pending,
    Shipped,
    Delivered,
    Cancelled,
    Other(String),
}

impl OrderStatus {
    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
            OrderStatus::Other(s) => s,
        }
    }
}

impl From<String> for OrderStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Pending" => OrderStatus::Pending,
            "Shipped" => OrderStatus::Shipped,
            "Delivered" => OrderStatus::Delivered,
            "Cancelled" => OrderStatus::Cancelled,
            _ => OrderStatus::Other(value),
        }
    }
}

impl From<&str> for OrderStatus {
    fn from(value: &str) -> Self {
        OrderStatus::from(value.to_string())
    }
}

impl From<OrderStatus> for String {
    fn from(value: OrderStatus) -> Self {
        match value {
            OrderStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl core::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every field of an order as read back from storage.
#[derive(Debug, Clone, PartialEq)]
pub struct RestoredOrder {
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub quantity: i64,
    pub order_date: NaiveDateTime,
    pub status: OrderStatus,
    pub total_price: f64,
}

/// Record: Order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    product_id: ProductId,
    quantity: i64,
    order_date: NaiveDateTime,
    status: OrderStatus,
    total_price: f64,
}

impl Order {
    /// Create a pending order for `product`, stamped with the current local time.
    pub fn new(id: OrderId, product: &Product, quantity: i64) -> Self {
        Self::placed_at(id, product, quantity, Local::now().naive_local())
    }

    /// Create a pending order with an explicit timestamp, truncated to
    /// microseconds.
    ///
    /// `total_price` is computed here once and never re-derived.
    pub fn placed_at(
        id: OrderId,
        product: &Product,
        quantity: i64,
        order_date: NaiveDateTime,
    ) -> Self {
        Self {
            id,
            product_id: product.id_typed(),
            quantity,
            order_date: truncate_to_micros(order_date),
            status: OrderStatus::Pending,
            total_price: product.price() * quantity as f64,
        }
    }

    /// Rebuild an order from persisted fields without recomputing anything.
    pub fn restore(fields: RestoredOrder) -> Self {
        Self {
            id: fields.order_id,
            product_id: fields.product_id,
            quantity: fields.quantity,
            order_date: fields.order_date,
            status: fields.status,
            total_price: fields.total_price,
        }
    }

    pub fn id_typed(&self) -> OrderId {
        self.id
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn order_date(&self) -> NaiveDateTime {
        self.order_date
    }

    pub fn status(&self) -> &OrderStatus {
        &self.status
    }

    pub fn total_price(&self) -> f64 {
        self.total_price
    }

    /// Overwrite the status. Any storable text is accepted; text naming a
    /// well-known state is stored as that variant.
    pub fn update_status(&mut self, status: impl Into<OrderStatus>) -> DomainResult<()> {
        let status = OrderStatus::from(String::from(status.into()));
        if status.as_str().is_empty() {
            return Err(DomainError::validation("status cannot be empty"));
        }
        ensure_field("status", status.as_str())?;
        self.status = status;
        Ok(())
    }

    /// Human-facing view of the order, resolved against its product.
    pub fn details(&self, product: &Product) -> OrderDetails {
        OrderDetails {
            order_id: self.id,
            product: product.name().to_string(),
            quantity: self.quantity,
            order_date: self.order_date,
            status: self.status.clone(),
            total_price: self.total_price,
        }
    }
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Snapshot line: `<id>,<product_id>,<quantity>,<order_date>,<status>,<total_price>`.
impl core::fmt::Display for Order {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{},{},{},{},{},{}",
            self.id,
            self.product_id,
            self.quantity,
            self.order_date.format(ORDER_DATE_FORMAT),
            self.status,
            self.total_price
        )
    }
}

/// Read-only order view carrying the product name instead of its ID.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderDetails {
    pub order_id: OrderId,
    pub product: String,
    pub quantity: i64,
    pub order_date: NaiveDateTime,
    pub status: OrderStatus,
    pub total_price: f64,
}

// Storage keeps microseconds, so in-memory timestamps do too.
fn truncate_to_micros(at: NaiveDateTime) -> NaiveDateTime {
    at.with_nanosecond(at.nanosecond() / 1_000 * 1_000)
        .unwrap_or(at)
}
