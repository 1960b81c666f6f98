//! Line-oriented snapshot format.
//!
//! ```text
//! Products
//! <id>,<name>,<category>,<price>,<quantity>,<reorder_level>
//! Suppliers
//! <id>,<name>,<contact_info>
//! Orders
//! <id>,<product_id>,<quantity>,<order_date>,<status>,<total_price>
//! ```
//!
//! Fields are never escaped; the record types refuse text containing the
//! delimiter or a line break, so anything they produce can be encoded.

use core::fmt::Display;
use core::str::FromStr;

use chrono::NaiveDateTime;
use tracing::warn;

use ims_core::{Entity, OrderId, ProductId, SupplierId};
use ims_inventory::{Inventory, ReferencePolicy};
use ims_products::{NewProduct, Product};
use ims_purchasing::{Order, OrderStatus, RestoredOrder};
use ims_suppliers::{NewSupplier, Supplier};

use super::r#trait::PersistenceError;

pub const PRODUCTS_HEADER: &str = "Products";
pub const SUPPLIERS_HEADER: &str = "Suppliers";
pub const ORDERS_HEADER: &str = "Orders";

const DELIMITER: char = ',';

// Accepts the six-digit fraction we write as well as a missing fraction.
const ORDER_DATE_PARSE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Products,
    Suppliers,
    Orders,
}

impl Section {
    fn from_header(line: &str) -> Option<Self> {
        match line {
            PRODUCTS_HEADER => Some(Section::Products),
            SUPPLIERS_HEADER => Some(Section::Suppliers),
            ORDERS_HEADER => Some(Section::Orders),
            _ => None,
        }
    }

    fn field_count(self) -> usize {
        match self {
            Section::Products => 6,
            Section::Suppliers => 3,
            Section::Orders => 6,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Section::Products => "product",
            Section::Suppliers => "supplier",
            Section::Orders => "order",
        }
    }
}

/// Encode the full inventory. Sections are always written, even when empty.
pub fn encode(inventory: &Inventory) -> String {
    let mut out = String::new();

    push_line(&mut out, PRODUCTS_HEADER);
    for product in inventory.products() {
        push_line(&mut out, product);
    }
    push_line(&mut out, SUPPLIERS_HEADER);
    for supplier in inventory.suppliers() {
        push_line(&mut out, supplier);
    }
    push_line(&mut out, ORDERS_HEADER);
    for order in inventory.orders() {
        push_line(&mut out, order);
    }

    out
}

/// Decode a snapshot produced by [`encode`].
///
/// Any malformed line fails the whole decode. Orders whose product is not
/// among the products read so far are dropped under
/// [`ReferencePolicy::Lenient`] and rejected under `Strict`.
pub fn decode(input: &str, policy: ReferencePolicy) -> Result<Inventory, PersistenceError> {
    let mut products: Vec<Product> = Vec::new();
    let mut suppliers: Vec<Supplier> = Vec::new();
    let mut orders: Vec<Order> = Vec::new();
    let mut section: Option<Section> = None;

    for (idx, raw) in input.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(next) = Section::from_header(line) {
            section = Some(next);
            continue;
        }

        let Some(current) = section else {
            return Err(PersistenceError::parse(
                line_no,
                "record appears before any section header",
            ));
        };
        let fields = split_fields(line, line_no, current)?;

        match current {
            Section::Products => {
                let product = decode_product(&fields, line_no)?;
                ensure_unique(&products, product.id(), line_no, current)?;
                products.push(product);
            }
            Section::Suppliers => {
                let supplier = decode_supplier(&fields, line_no)?;
                ensure_unique(&suppliers, supplier.id(), line_no, current)?;
                suppliers.push(supplier);
            }
            Section::Orders => {
                let order = decode_order(&fields, line_no)?;
                ensure_unique(&orders, order.id(), line_no, current)?;

                let resolved = products.iter().any(|p| p.id() == order.product_id());
                if resolved {
                    orders.push(order);
                } else if policy.is_strict() {
                    return Err(PersistenceError::DanglingOrder {
                        line: line_no,
                        order_id: order.id(),
                        product_id: order.product_id(),
                    });
                } else {
                    warn!(
                        line = line_no,
                        order_id = %order.id(),
                        product_id = %order.product_id(),
                        "dropping order that references a missing product"
                    );
                }
            }
        }
    }

    Ok(Inventory::from_parts(products, suppliers, orders, policy))
}

fn push_line(out: &mut String, value: impl Display) {
    out.push_str(&value.to_string());
    out.push('\n');
}

fn split_fields(
    line: &str,
    line_no: usize,
    section: Section,
) -> Result<Vec<&str>, PersistenceError> {
    let fields: Vec<&str> = line.split(DELIMITER).collect();
    if fields.len() != section.field_count() {
        return Err(PersistenceError::parse(
            line_no,
            format!(
                "{} record has {} fields, expected {}",
                section.label(),
                fields.len(),
                section.field_count()
            ),
        ));
    }
    Ok(fields)
}

fn parse_field<T>(value: &str, name: &str, line_no: usize) -> Result<T, PersistenceError>
where
    T: FromStr,
    T::Err: Display,
{
    value
        .parse::<T>()
        .map_err(|e| PersistenceError::parse(line_no, format!("invalid {name} {value:?}: {e}")))
}

fn ensure_unique<E: Entity>(
    records: &[E],
    id: E::Id,
    line_no: usize,
    section: Section,
) -> Result<(), PersistenceError> {
    if records.iter().any(|r| r.id() == id) {
        return Err(PersistenceError::parse(
            line_no,
            format!("duplicate {} id {:?}", section.label(), id),
        ));
    }
    Ok(())
}

fn decode_product(fields: &[&str], line_no: usize) -> Result<Product, PersistenceError> {
    let input = NewProduct {
        product_id: parse_field::<ProductId>(fields[0], "product id", line_no)?,
        name: fields[1].to_string(),
        category: fields[2].to_string(),
        price: parse_field::<f64>(fields[3], "price", line_no)?,
        quantity: parse_field::<i64>(fields[4], "quantity", line_no)?,
        reorder_level: parse_field::<i64>(fields[5], "reorder level", line_no)?,
    };
    Product::new(input).map_err(|e| PersistenceError::parse(line_no, e.to_string()))
}

fn decode_supplier(fields: &[&str], line_no: usize) -> Result<Supplier, PersistenceError> {
    let input = NewSupplier {
        supplier_id: parse_field::<SupplierId>(fields[0], "supplier id", line_no)?,
        name: fields[1].to_string(),
        contact_info: fields[2].to_string(),
    };
    Supplier::new(input).map_err(|e| PersistenceError::parse(line_no, e.to_string()))
}

fn decode_order(fields: &[&str], line_no: usize) -> Result<Order, PersistenceError> {
    let order_date = NaiveDateTime::parse_from_str(fields[3], ORDER_DATE_PARSE_FORMAT)
        .map_err(|e| {
            PersistenceError::parse(line_no, format!("invalid order date {:?}: {e}", fields[3]))
        })?;

    Ok(Order::restore(RestoredOrder {
        order_id: parse_field::<OrderId>(fields[0], "order id", line_no)?,
        product_id: parse_field::<ProductId>(fields[1], "product id", line_no)?,
        quantity: parse_field::<i64>(fields[2], "quantity", line_no)?,
        order_date,
        status: OrderStatus::from(fields[4]),
        total_price: parse_field::<f64>(fields[5], "total price", line_no)?,
    }))
}
