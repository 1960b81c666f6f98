//! Write-through inventory store (application-level orchestration).
//!
//! ```text
//! operation
//!   ↓
//! 1. Validate + mutate the in-memory `Inventory` (pure, may fail)
//!   ↓
//! 2. Encode the full snapshot
//!   ↓
//! 3. Replace the stored snapshot
//! ```
//!
//! A failed step 1 returns before anything is written. If step 3 fails the
//! in-memory change has already happened; the error is returned and the next
//! successful write (or [`InventoryStore::flush`]) persists it.

use thiserror::Error;
use tracing::{info, warn};

use ims_core::{DomainError, DomainResult, OrderId, ProductId, SupplierId};
use ims_inventory::{Inventory, ReferencePolicy};
use ims_products::{NewProduct, Product};
use ims_purchasing::{Order, OrderDetails, OrderStatus};
use ims_suppliers::{NewSupplier, Supplier};

use crate::config::StoreConfig;
use crate::snapshot::{self, FileSnapshotStore, PersistenceError, SnapshotStore};

/// Error returned by [`InventoryStore`] operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Rejected by the domain rules; nothing was changed or written.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Reading, writing, or decoding the snapshot failed.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

impl StoreError {
    pub fn as_domain(&self) -> Option<&DomainError> {
        match self {
            StoreError::Domain(e) => Some(e),
            StoreError::Persistence(_) => None,
        }
    }
}

/// Inventory plus the medium its snapshot is written to.
///
/// Callers never touch the collections directly; every mutating method
/// rewrites the whole snapshot before returning.
#[derive(Debug)]
pub struct InventoryStore<S> {
    inventory: Inventory,
    storage: S,
}

impl InventoryStore<FileSnapshotStore> {
    /// Open the file-backed store described by `config`.
    pub fn from_config(config: &StoreConfig) -> Result<Self, StoreError> {
        Self::open(
            FileSnapshotStore::new(config.db_path.clone()),
            config.reference_policy,
        )
    }
}

impl<S: SnapshotStore> InventoryStore<S> {
    /// Load the stored snapshot, or start empty if there is none.
    pub fn open(storage: S, policy: ReferencePolicy) -> Result<Self, StoreError> {
        let inventory = match storage.read()? {
            Some(text) => snapshot::decode(&text, policy)?,
            None => {
                info!("no snapshot found; starting with an empty inventory");
                Inventory::new(policy)
            }
        };

        info!(
            products = inventory.products().len(),
            suppliers = inventory.suppliers().len(),
            orders = inventory.orders().len(),
            policy = policy.as_str(),
            "inventory loaded"
        );

        Ok(Self { inventory, storage })
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_parts(self) -> (Inventory, S) {
        (self.inventory, self.storage)
    }

    /// Write the current state, regardless of whether anything changed.
    pub fn flush(&self) -> Result<(), StoreError> {
        self.storage.write(&snapshot::encode(&self.inventory))?;
        Ok(())
    }

    fn commit<T>(
        &mut self,
        op: impl FnOnce(&mut Inventory) -> DomainResult<T>,
    ) -> Result<T, StoreError> {
        let out = op(&mut self.inventory)?;
        self.flush()?;
        Ok(out)
    }

    pub fn add_product(&mut self, input: NewProduct) -> Result<(), StoreError> {
        let product = Product::new(input)?;
        let product_id = product.id_typed();
        self.commit(|inv| inv.add_product(product))?;
        info!(%product_id, "product added");
        Ok(())
    }

    /// Remove a product; an absent ID is a no-op (but still persists).
    pub fn remove_product(&mut self, id: ProductId) -> Result<usize, StoreError> {
        let removed = self.commit(|inv| Ok(inv.remove_product(id)))?;
        info!(product_id = %id, removed, "product removed");
        Ok(removed)
    }

    /// Apply a stock delta. See [`Inventory::update_product_quantity`] for
    /// how an unknown ID is treated.
    pub fn update_product_quantity(
        &mut self,
        id: ProductId,
        delta: i64,
    ) -> Result<bool, StoreError> {
        let applied = self.commit(|inv| inv.update_product_quantity(id, delta))?;
        if applied {
            info!(product_id = %id, delta, "stock adjusted");
        } else {
            warn!(product_id = %id, delta, "stock adjustment ignored: product not found");
        }
        Ok(applied)
    }

    pub fn add_supplier(&mut self, input: NewSupplier) -> Result<(), StoreError> {
        let supplier = Supplier::new(input)?;
        let supplier_id = supplier.id_typed();
        self.commit(|inv| inv.add_supplier(supplier))?;
        info!(%supplier_id, "supplier added");
        Ok(())
    }

    pub fn update_supplier_contact(
        &mut self,
        id: SupplierId,
        contact_info: impl Into<String>,
    ) -> Result<(), StoreError> {
        self.commit(|inv| inv.update_supplier_contact(id, contact_info))?;
        info!(supplier_id = %id, "supplier contact updated");
        Ok(())
    }

    pub fn link_supplier_product(
        &mut self,
        supplier_id: SupplierId,
        product_id: ProductId,
    ) -> Result<(), StoreError> {
        self.commit(|inv| inv.link_supplier_product(supplier_id, product_id))?;
        info!(%supplier_id, %product_id, "supplier linked to product");
        Ok(())
    }

    /// Append a prebuilt order and decrement its product's stock.
    pub fn add_order(&mut self, order: Order) -> Result<(), StoreError> {
        let order_id = order.id_typed();
        self.commit(|inv| inv.add_order(order))?;
        info!(%order_id, "order added");
        Ok(())
    }

    /// Place an order for `quantity` units of `product_id`.
    ///
    /// Fails with `ProductNotFound` (and writes nothing) if the product does
    /// not exist.
    pub fn place_order(
        &mut self,
        id: OrderId,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<Order, StoreError> {
        let order = self.commit(|inv| inv.place_order(id, product_id, quantity))?;
        info!(
            order_id = %id,
            %product_id,
            quantity,
            total_price = order.total_price(),
            "order placed"
        );
        Ok(order)
    }

    pub fn update_order_status(
        &mut self,
        id: OrderId,
        status: impl Into<OrderStatus>,
    ) -> Result<(), StoreError> {
        let status = status.into();
        let label = status.to_string();
        self.commit(|inv| inv.update_order_status(id, status))?;
        info!(order_id = %id, status = %label, "order status updated");
        Ok(())
    }

    pub fn order_details(&self, id: OrderId) -> Result<OrderDetails, StoreError> {
        Ok(self.inventory.order_details(id)?)
    }

    pub fn generate_report(&self, kind: &str) -> Result<String, StoreError> {
        Ok(self.inventory.generate_report(kind)?)
    }

    pub fn stock_report(&self) -> String {
        self.inventory.stock_report()
    }

    pub fn reorder_candidates(&self) -> Vec<&Product> {
        self.inventory.reorder_candidates()
    }
}
