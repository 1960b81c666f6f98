//! `ims` — command-line front end for the inventory store.
//!
//! Each invocation opens the snapshot, runs one operation, and exits. All
//! mutating commands persist before returning.

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use ims_core::{OrderId, ProductId, SupplierId};
use ims_infra::StoreConfig;
use ims_inventory::ReferencePolicy;
use ims_observability::LogFormat;

#[derive(Debug, Parser)]
#[command(name = "ims")]
#[command(about = "Track products, suppliers, and purchase orders")]
#[command(version)]
pub struct Cli {
    /// Snapshot file (overrides IMS_DB_PATH; default IMSDB.txt)
    #[arg(long)]
    db: Option<PathBuf>,

    /// Report missing product references as errors instead of skipping them
    #[arg(long)]
    strict: bool,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add a product
    AddProduct {
        id: ProductId,
        name: String,
        category: String,
        price: f64,
        quantity: i64,
        reorder_level: i64,
    },

    /// Remove a product (orders that reference it are kept until the next load)
    RemoveProduct { id: ProductId },

    /// Add (or, with a negative delta, subtract) stock
    AdjustStock {
        id: ProductId,
        #[arg(allow_negative_numbers = true)]
        delta: i64,
    },

    /// Add a supplier
    AddSupplier {
        id: SupplierId,
        name: String,
        contact_info: String,
    },

    /// Replace a supplier's contact info
    UpdateContact { id: SupplierId, contact_info: String },

    /// Record that a supplier provides a product
    LinkProduct {
        supplier_id: SupplierId,
        product_id: ProductId,
    },

    /// Place an order; the product's stock drops by the ordered quantity
    PlaceOrder {
        id: OrderId,
        product_id: ProductId,
        quantity: i64,
    },

    /// Overwrite an order's status
    UpdateStatus { id: OrderId, status: String },

    /// Print a report
    Report {
        #[arg(default_value = "stock")]
        kind: String,
    },

    /// List products at or below their reorder level
    Reorder,

    /// List orders
    Orders,
}

impl Cli {
    fn store_config(&self) -> StoreConfig {
        let mut config = StoreConfig::from_env();
        if let Some(db) = &self.db {
            config = config.with_db_path(db);
        }
        if self.strict {
            config = config.with_reference_policy(ReferencePolicy::Strict);
        }
        config
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    ims_observability::init_with(level, LogFormat::Compact);

    let config = cli.store_config();
    let mut stdout = std::io::stdout().lock();

    match commands::run(&config, cli.command, cli.json, &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = ?err, "command failed");
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
