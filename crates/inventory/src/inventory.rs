use ims_core::entity::{find, find_mut};
use ims_core::{DomainError, DomainResult, Entity, OrderId, ProductId, SupplierId};
use ims_products::Product;
use ims_purchasing::{Order, OrderDetails, OrderStatus};
use ims_suppliers::Supplier;

use crate::policy::ReferencePolicy;
use crate::report::{self, ReportKind};

/// The three record collections, in insertion order.
///
/// All lookups are linear scans by ID. Every method either fully applies its
/// change or returns an error and leaves the collections untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inventory {
    products: Vec<Product>,
    suppliers: Vec<Supplier>,
    orders: Vec<Order>,
    policy: ReferencePolicy,
}

impl Inventory {
    pub fn new(policy: ReferencePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Assemble an inventory from already-validated collections (snapshot load).
    pub fn from_parts(
        products: Vec<Product>,
        suppliers: Vec<Supplier>,
        orders: Vec<Order>,
        policy: ReferencePolicy,
    ) -> Self {
        Self {
            products,
            suppliers,
            orders,
            policy,
        }
    }

    pub fn policy(&self) -> ReferencePolicy {
        self.policy
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn suppliers(&self) -> &[Supplier] {
        &self.suppliers
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn product(&self, id: ProductId) -> Option<&Product> {
        find(&self.products, id)
    }

    pub fn supplier(&self, id: SupplierId) -> Option<&Supplier> {
        find(&self.suppliers, id)
    }

    pub fn order(&self, id: OrderId) -> Option<&Order> {
        find(&self.orders, id)
    }

    pub fn add_product(&mut self, product: Product) -> DomainResult<()> {
        if self.product(product.id()).is_some() {
            return Err(DomainError::duplicate(format!("product {}", product.id())));
        }
        self.products.push(product);
        Ok(())
    }

    /// Remove every product with `id`. Orders referencing it are kept.
    ///
    /// Returns how many products were removed (normally 0 or 1).
    pub fn remove_product(&mut self, id: ProductId) -> usize {
        let before = self.products.len();
        self.products.retain(|p| p.id() != id);
        before - self.products.len()
    }

    /// Apply a stock delta to a product.
    ///
    /// Returns `Ok(true)` when applied. An unknown `id` yields `Ok(false)` under
    /// [`ReferencePolicy::Lenient`] and `ProductNotFound` under `Strict`.
    pub fn update_product_quantity(&mut self, id: ProductId, delta: i64) -> DomainResult<bool> {
        match find_mut(&mut self.products, id) {
            Some(product) => {
                product.update_quantity(delta)?;
                Ok(true)
            }
            None if self.policy.is_strict() => Err(DomainError::ProductNotFound(id)),
            None => Ok(false),
        }
    }

    pub fn add_supplier(&mut self, supplier: Supplier) -> DomainResult<()> {
        if self.supplier(supplier.id()).is_some() {
            return Err(DomainError::duplicate(format!("supplier {}", supplier.id())));
        }
        self.suppliers.push(supplier);
        Ok(())
    }

    pub fn update_supplier_contact(
        &mut self,
        id: SupplierId,
        contact_info: impl Into<String>,
    ) -> DomainResult<()> {
        let supplier =
            find_mut(&mut self.suppliers, id).ok_or(DomainError::SupplierNotFound(id))?;
        supplier.update_contact_info(contact_info)
    }

    /// Record that a supplier provides a product. Both must exist.
    pub fn link_supplier_product(
        &mut self,
        supplier_id: SupplierId,
        product_id: ProductId,
    ) -> DomainResult<()> {
        if self.product(product_id).is_none() {
            return Err(DomainError::ProductNotFound(product_id));
        }
        let supplier = find_mut(&mut self.suppliers, supplier_id)
            .ok_or(DomainError::SupplierNotFound(supplier_id))?;
        supplier.add_product(product_id);
        Ok(())
    }

    /// Products linked to a supplier that are still in the inventory.
    pub fn supplied_products(&self, supplier_id: SupplierId) -> DomainResult<Vec<&Product>> {
        let supplier = self
            .supplier(supplier_id)
            .ok_or(DomainError::SupplierNotFound(supplier_id))?;
        Ok(supplier
            .supplied_products()
            .iter()
            .filter_map(|id| self.product(*id))
            .collect())
    }

    /// Append an order and decrement its product's stock by the ordered
    /// quantity, exactly once. No stock check: overdraft is allowed, but the
    /// ordered quantity must be positive.
    pub fn add_order(&mut self, order: Order) -> DomainResult<()> {
        if self.order(order.id()).is_some() {
            return Err(DomainError::duplicate(format!("order {}", order.id())));
        }
        ensure_order_quantity(order.quantity())?;
        let product = find_mut(&mut self.products, order.product_id())
            .ok_or(DomainError::ProductNotFound(order.product_id()))?;

        // quantity > 0, so the negation cannot overflow
        product.update_quantity(-order.quantity())?;
        self.orders.push(order);
        Ok(())
    }

    /// Build an order against a live product and add it.
    pub fn place_order(
        &mut self,
        id: OrderId,
        product_id: ProductId,
        quantity: i64,
    ) -> DomainResult<Order> {
        ensure_order_quantity(quantity)?;
        let product = self
            .product(product_id)
            .ok_or(DomainError::ProductNotFound(product_id))?;

        let order = Order::new(id, product, quantity);
        self.add_order(order.clone())?;
        Ok(order)
    }

    pub fn update_order_status(
        &mut self,
        id: OrderId,
        status: impl Into<OrderStatus>,
    ) -> DomainResult<()> {
        let order = find_mut(&mut self.orders, id).ok_or(DomainError::OrderNotFound(id))?;
        order.update_status(status)
    }

    /// Order view with the product name; fails if the product was removed.
    pub fn order_details(&self, id: OrderId) -> DomainResult<OrderDetails> {
        let order = self.order(id).ok_or(DomainError::OrderNotFound(id))?;
        let product = self
            .product(order.product_id())
            .ok_or(DomainError::ProductNotFound(order.product_id()))?;
        Ok(order.details(product))
    }

    pub fn generate_report(&self, kind: &str) -> DomainResult<String> {
        match kind.parse::<ReportKind>()? {
            ReportKind::Stock => Ok(self.stock_report()),
        }
    }

    pub fn stock_report(&self) -> String {
        report::stock_report(&self.products)
    }

    /// Products at or below their reorder level, in collection order.
    pub fn reorder_candidates(&self) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.check_reorder_level())
            .collect()
    }
}

fn ensure_order_quantity(quantity: i64) -> DomainResult<()> {
    if quantity <= 0 {
        return Err(DomainError::validation(format!(
            "order quantity must be positive, got {quantity}"
        )));
    }
    Ok(())
}

impl core::fmt::Display for Inventory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Inventory with {} products, {} suppliers, and {} orders.",
            self.products.len(),
            self.suppliers.len(),
            self.orders.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ims_products::NewProduct;
    use ims_suppliers::NewSupplier;

    fn product(id: i64, quantity: i64, reorder_level: i64) -> Product {
        Product::new(NewProduct {
            product_id: ProductId::new(id),
            name: format!("Item{id}"),
            category: "General".to_string(),
            price: 2.5,
            quantity,
            reorder_level,
        })
        .unwrap()
    }

    fn widget() -> Product {
        Product::new(NewProduct {
            product_id: ProductId::new(1),
            name: "Widget".to_string(),
            category: "Hardware".to_string(),
            price: 9.99,
            quantity: 10,
            reorder_level: 5,
        })
        .unwrap()
    }

    fn supplier(id: i64) -> Supplier {
        Supplier::new(NewSupplier {
            supplier_id: SupplierId::new(id),
            name: "Acme".to_string(),
            contact_info: "555-0100".to_string(),
        })
        .unwrap()
    }

    #[test]
    fn stock_report_lists_products_in_order() {
        let mut inv = Inventory::default();
        inv.add_product(widget()).unwrap();
        inv.add_product(product(2, 3, 1)).unwrap();

        let report = inv.generate_report("stock").unwrap();
        assert_eq!(
            report,
            "Stock Report:\n1,Widget,Hardware,9.99,10,5\n2,Item2,General,2.5,3,1\n"
        );
    }

    #[test]
    fn place_order_decrements_stock_and_freezes_total() {
        let mut inv = Inventory::default();
        inv.add_product(widget()).unwrap();

        let order = inv.place_order(OrderId::new(100), ProductId::new(1), 6).unwrap();

        let widget = inv.product(ProductId::new(1)).unwrap();
        assert_eq!(widget.quantity(), 4);
        assert!(widget.check_reorder_level());
        assert_eq!(order.total_price(), 59.94);
        assert_eq!(inv.orders(), &[order]);
    }

    #[test]
    fn place_order_for_unknown_product_changes_nothing() {
        let mut inv = Inventory::default();
        inv.add_product(widget()).unwrap();
        let before = inv.clone();

        let err = inv
            .place_order(OrderId::new(101), ProductId::new(999), 1)
            .unwrap_err();

        assert_eq!(err, DomainError::ProductNotFound(ProductId::new(999)));
        assert_eq!(inv, before);
    }

    #[test]
    fn place_order_rejects_non_positive_quantity() {
        let mut inv = Inventory::default();
        inv.add_product(widget()).unwrap();
        assert!(matches!(
            inv.place_order(OrderId::new(1), ProductId::new(1), 0),
            Err(DomainError::Validation(_))
        ));
        assert!(inv.orders().is_empty());
    }

    #[test]
    fn place_order_allows_overdraft() {
        let mut inv = Inventory::default();
        inv.add_product(widget()).unwrap();
        inv.place_order(OrderId::new(1), ProductId::new(1), 15).unwrap();
        assert_eq!(inv.product(ProductId::new(1)).unwrap().quantity(), -5);
    }

    #[test]
    fn duplicate_order_id_is_rejected_without_decrement() {
        let mut inv = Inventory::default();
        inv.add_product(widget()).unwrap();
        inv.place_order(OrderId::new(1), ProductId::new(1), 2).unwrap();

        let err = inv
            .place_order(OrderId::new(1), ProductId::new(1), 2)
            .unwrap_err();
        assert!(matches!(err, DomainError::DuplicateId(_)));
        assert_eq!(inv.product(ProductId::new(1)).unwrap().quantity(), 8);
        assert_eq!(inv.orders().len(), 1);
    }

    #[test]
    fn add_product_rejects_duplicate_id() {
        let mut inv = Inventory::default();
        inv.add_product(widget()).unwrap();
        let err = inv.add_product(widget()).unwrap_err();
        assert!(matches!(err, DomainError::DuplicateId(_)));
        assert_eq!(inv.products().len(), 1);
    }

    #[test]
    fn remove_product_keeps_orders() {
        let mut inv = Inventory::default();
        inv.add_product(widget()).unwrap();
        inv.place_order(OrderId::new(100), ProductId::new(1), 6).unwrap();

        assert_eq!(inv.remove_product(ProductId::new(1)), 1);
        assert_eq!(inv.remove_product(ProductId::new(1)), 0);
        assert!(inv.products().is_empty());
        assert_eq!(inv.orders().len(), 1);
        assert_eq!(
            inv.order_details(OrderId::new(100)).unwrap_err(),
            DomainError::ProductNotFound(ProductId::new(1))
        );
    }

    #[test]
    fn update_quantity_on_absent_product_is_noop_when_lenient() {
        let mut inv = Inventory::new(ReferencePolicy::Lenient);
        inv.add_product(widget()).unwrap();
        let before = inv.clone();

        assert_eq!(inv.update_product_quantity(ProductId::new(42), 5), Ok(false));
        assert_eq!(inv, before);
    }

    #[test]
    fn update_quantity_on_absent_product_fails_when_strict() {
        let mut inv = Inventory::new(ReferencePolicy::Strict);
        assert_eq!(
            inv.update_product_quantity(ProductId::new(42), 5),
            Err(DomainError::ProductNotFound(ProductId::new(42)))
        );
    }

    #[test]
    fn update_quantity_applies_delta() {
        let mut inv = Inventory::default();
        inv.add_product(widget()).unwrap();
        assert_eq!(inv.update_product_quantity(ProductId::new(1), 7), Ok(true));
        assert_eq!(inv.product(ProductId::new(1)).unwrap().quantity(), 17);
    }

    #[test]
    fn update_quantity_overflow_is_rejected_without_change() {
        let mut inv = Inventory::default();
        inv.add_product(product(1, i64::MAX, 5)).unwrap();
        let before = inv.clone();

        assert!(matches!(
            inv.update_product_quantity(ProductId::new(1), 1),
            Err(DomainError::Validation(_))
        ));
        assert_eq!(inv, before);
    }

    #[test]
    fn add_order_rejects_non_positive_quantity() {
        let mut inv = Inventory::default();
        let widget = widget();
        inv.add_product(widget.clone()).unwrap();
        let before = inv.clone();

        for quantity in [-5, 0, i64::MIN] {
            let err = inv
                .add_order(Order::new(OrderId::new(1), &widget, quantity))
                .unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)));
        }
        assert_eq!(inv, before);
        assert_eq!(inv.product(ProductId::new(1)).unwrap().quantity(), 10);
    }

    #[test]
    fn add_order_overflowing_stock_is_rejected() {
        let mut inv = Inventory::default();
        let low = product(1, i64::MIN + 1, 0);
        inv.add_product(low.clone()).unwrap();
        let before = inv.clone();

        let err = inv
            .add_order(Order::new(OrderId::new(1), &low, 2))
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(inv, before);
    }

    #[test]
    fn supplier_operations() {
        let mut inv = Inventory::default();
        inv.add_product(widget()).unwrap();
        inv.add_supplier(supplier(7)).unwrap();

        assert!(matches!(
            inv.add_supplier(supplier(7)),
            Err(DomainError::DuplicateId(_))
        ));

        inv.update_supplier_contact(SupplierId::new(7), "orders@acme.test")
            .unwrap();
        assert_eq!(
            inv.supplier(SupplierId::new(7)).unwrap().contact_info(),
            "orders@acme.test"
        );
        assert_eq!(
            inv.update_supplier_contact(SupplierId::new(8), "x"),
            Err(DomainError::SupplierNotFound(SupplierId::new(8)))
        );

        inv.link_supplier_product(SupplierId::new(7), ProductId::new(1))
            .unwrap();
        assert_eq!(
            inv.link_supplier_product(SupplierId::new(7), ProductId::new(2)),
            Err(DomainError::ProductNotFound(ProductId::new(2)))
        );
        let supplied = inv.supplied_products(SupplierId::new(7)).unwrap();
        assert_eq!(supplied.len(), 1);
        assert_eq!(supplied[0].name(), "Widget");
    }

    #[test]
    fn update_order_status() {
        let mut inv = Inventory::default();
        inv.add_product(widget()).unwrap();
        inv.place_order(OrderId::new(1), ProductId::new(1), 1).unwrap();

        inv.update_order_status(OrderId::new(1), "Delivered").unwrap();
        assert_eq!(
            inv.order(OrderId::new(1)).unwrap().status(),
            &OrderStatus::Delivered
        );
        assert_eq!(
            inv.update_order_status(OrderId::new(2), "Delivered"),
            Err(DomainError::OrderNotFound(OrderId::new(2)))
        );
    }

    #[test]
    fn unknown_report_kind_is_an_error() {
        let inv = Inventory::default();
        assert_eq!(
            inv.generate_report("sales"),
            Err(DomainError::UnsupportedReportKind("sales".to_string()))
        );
    }

    #[test]
    fn reorder_candidates_filters_by_threshold() {
        let mut inv = Inventory::default();
        inv.add_product(product(1, 10, 5)).unwrap();
        inv.add_product(product(2, 5, 5)).unwrap();
        inv.add_product(product(3, 0, 2)).unwrap();

        let ids: Vec<_> = inv.reorder_candidates().iter().map(|p| p.id()).collect();
        assert_eq!(ids, vec![ProductId::new(2), ProductId::new(3)]);
    }

    #[test]
    fn display_summarises_counts() {
        let mut inv = Inventory::default();
        inv.add_product(widget()).unwrap();
        assert_eq!(
            inv.to_string(),
            "Inventory with 1 products, 0 suppliers, and 0 orders."
        );
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: each accepted order lowers its product's stock by
            /// exactly the ordered amount, and rejected orders change nothing.
            #[test]
            fn orders_decrement_stock_exactly_once(
                orders in prop::collection::vec((0i64..4, 1i64..50), 1..30)
            ) {
                let mut inv = Inventory::default();
                for id in 0..3 {
                    inv.add_product(product(id, 100, 10)).unwrap();
                }

                for (n, (product_id, quantity)) in orders.into_iter().enumerate() {
                    let product_id = ProductId::new(product_id);
                    let before = inv.product(product_id).map(|p| p.quantity());
                    let orders_before = inv.orders().len();

                    let result = inv.place_order(OrderId::new(n as i64), product_id, quantity);

                    match before {
                        Some(before) => {
                            prop_assert!(result.is_ok());
                            prop_assert_eq!(
                                inv.product(product_id).unwrap().quantity(),
                                before - quantity
                            );
                            prop_assert_eq!(inv.orders().len(), orders_before + 1);
                        }
                        None => {
                            prop_assert_eq!(result, Err(DomainError::ProductNotFound(product_id)));
                            prop_assert_eq!(inv.orders().len(), orders_before);
                        }
                    }
                }
            }
        }
    }
}
