use serde::{Deserialize, Serialize};

use ims_core::{DomainResult, Entity, ProductId, SupplierId, ensure_field};

/// Input for creating a supplier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSupplier {
    pub supplier_id: SupplierId,
    pub name: String,
    pub contact_info: String,
}

/// Record: Supplier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    id: SupplierId,
    name: String,
    contact_info: String,
    /// Append-only, in insertion order. Not persisted in the snapshot.
    products_supplied: Vec<ProductId>,
}

impl Supplier {
    pub fn new(input: NewSupplier) -> DomainResult<Self> {
        ensure_field("supplier name", &input.name)?;
        ensure_field("contact info", &input.contact_info)?;

        Ok(Self {
            id: input.supplier_id,
            name: input.name,
            contact_info: input.contact_info,
            products_supplied: Vec::new(),
        })
    }

    pub fn id_typed(&self) -> SupplierId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn contact_info(&self) -> &str {
        &self.contact_info
    }

    /// Record that this supplier provides `product_id`.
    ///
    /// Duplicates are kept; the list is a log of relation calls.
    pub fn add_product(&mut self, product_id: ProductId) {
        self.products_supplied.push(product_id);
    }

    pub fn update_contact_info(&mut self, contact_info: impl Into<String>) -> DomainResult<()> {
        let contact_info = contact_info.into();
        ensure_field("contact info", &contact_info)?;
        self.contact_info = contact_info;
        Ok(())
    }

    pub fn supplied_products(&self) -> &[ProductId] {
        &self.products_supplied
    }
}

impl Entity for Supplier {
    type Id = SupplierId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Snapshot line: `<id>,<name>,<contact_info>`.
impl core::fmt::Display for Supplier {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{},{},{}", self.id, self.name, self.contact_info)
    }
}
