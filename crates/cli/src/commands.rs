//! Command handlers. Each opens the store, runs one operation, and prints.

use std::io::Write;

use anyhow::Context;
use serde::Serialize;

use ims_infra::{InventoryStore, StoreConfig};
use ims_products::NewProduct;
use ims_suppliers::NewSupplier;

use crate::Command;

pub fn run(
    config: &StoreConfig,
    command: Command,
    json: bool,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let mut store = InventoryStore::from_config(config)
        .with_context(|| format!("failed to open inventory at {}", config.db_path.display()))?;

    match command {
        Command::AddProduct {
            id,
            name,
            category,
            price,
            quantity,
            reorder_level,
        } => {
            store
                .add_product(NewProduct {
                    product_id: id,
                    name,
                    category,
                    price,
                    quantity,
                    reorder_level,
                })
                .with_context(|| format!("failed to add product {id}"))?;
            writeln!(out, "Product {id} added")?;
        }
        Command::RemoveProduct { id } => {
            let removed = store.remove_product(id)?;
            if removed == 0 {
                writeln!(out, "No product with id {id}")?;
            } else {
                writeln!(out, "Product {id} removed")?;
            }
        }
        Command::AdjustStock { id, delta } => {
            if store.update_product_quantity(id, delta)? {
                let quantity = store
                    .inventory()
                    .product(id)
                    .map(|p| p.quantity())
                    .unwrap_or_default();
                writeln!(out, "Product {id} stock is now {quantity}")?;
            } else {
                writeln!(out, "No product with id {id}; nothing changed")?;
            }
        }
        Command::AddSupplier {
            id,
            name,
            contact_info,
        } => {
            store
                .add_supplier(NewSupplier {
                    supplier_id: id,
                    name,
                    contact_info,
                })
                .with_context(|| format!("failed to add supplier {id}"))?;
            writeln!(out, "Supplier {id} added")?;
        }
        Command::UpdateContact { id, contact_info } => {
            store.update_supplier_contact(id, contact_info)?;
            writeln!(out, "Supplier {id} contact updated")?;
        }
        Command::LinkProduct {
            supplier_id,
            product_id,
        } => {
            store.link_supplier_product(supplier_id, product_id)?;
            writeln!(out, "Supplier {supplier_id} now supplies product {product_id}")?;
        }
        Command::PlaceOrder {
            id,
            product_id,
            quantity,
        } => {
            let order = store
                .place_order(id, product_id, quantity)
                .with_context(|| format!("failed to place order {id}"))?;
            if json {
                print_json(out, &order)?;
            } else {
                writeln!(
                    out,
                    "Order {id} placed: {quantity} x product {product_id}, total {}",
                    order.total_price()
                )?;
            }
        }
        Command::UpdateStatus { id, status } => {
            store.update_order_status(id, status.as_str())?;
            writeln!(out, "Order {id} is now {status}")?;
        }
        Command::Report { kind } => {
            let report = store.generate_report(&kind)?;
            write!(out, "{report}")?;
        }
        Command::Reorder => {
            let candidates = store.reorder_candidates();
            if json {
                print_json(out, &candidates)?;
            } else {
                for product in candidates {
                    writeln!(out, "{product}")?;
                }
            }
        }
        Command::Orders => {
            let orders = store.inventory().orders();
            if json {
                print_json(out, &orders)?;
            } else {
                for order in orders {
                    writeln!(out, "{order}")?;
                }
            }
        }
    }

    Ok(())
}

fn print_json(out: &mut impl Write, value: &impl Serialize) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).context("failed to serialize output")?;
    writeln!(out)?;
    Ok(())
}
