use serde::{Deserialize, Serialize};

use ims_core::{DomainError, DomainResult, Entity, ProductId, ensure_field};

/// Input for creating a product (mirrors the fields a caller collects).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub product_id: ProductId,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub quantity: i64,
    pub reorder_level: i64,
}

/// Record: Product.
///
/// `quantity` is the running sum of every delta applied to the product
/// (direct adjustments and order fulfilment). It has no floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    category: String,
    price: f64,
    quantity: i64,
    reorder_level: i64,
}

impl Product {
    /// Build a validated product.
    ///
    /// Price must be finite and non-negative; text fields must be storable in
    /// the flat snapshot format.
    pub fn new(input: NewProduct) -> DomainResult<Self> {
        ensure_field("product name", &input.name)?;
        ensure_field("product category", &input.category)?;
        if !input.price.is_finite() || input.price < 0.0 {
            return Err(DomainError::validation(format!(
                "price must be a non-negative amount, got {}",
                input.price
            )));
        }

        Ok(Self {
            id: input.product_id,
            name: input.name,
            category: input.category,
            price: input.price,
            quantity: input.quantity,
            reorder_level: input.reorder_level,
        })
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn reorder_level(&self) -> i64 {
        self.reorder_level
    }

    /// Apply a stock delta (positive or negative). Stock may go negative;
    /// only `i64` overflow is rejected, leaving the quantity unchanged.
    pub fn update_quantity(&mut self, delta: i64) -> DomainResult<()> {
        self.quantity = self.quantity.checked_add(delta).ok_or_else(|| {
            DomainError::validation(format!(
                "stock of product {} overflows when adjusted by {delta}",
                self.id
            ))
        })?;
        Ok(())
    }

    /// True when stock is at or below the reorder threshold.
    pub fn check_reorder_level(&self) -> bool {
        self.quantity <= self.reorder_level
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// One stock line: `<id>,<name>,<category>,<price>,<quantity>,<reorder_level>`.
impl core::fmt::Display for Product {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{},{},{},{},{},{}",
            self.id, self.name, self.category, self.price, self.quantity, self.reorder_level
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget() -> NewProduct {
        NewProduct {
            product_id: ProductId::new(1),
            name: "Widget".to_string(),
            category: "Hardware".to_string(),
            price: 9.99,
            quantity: 10,
            reorder_level: 5,
        }
    }

    #[test]
    fn display_matches_stock_line() {
        let product = Product::new(widget()).unwrap();
        assert_eq!(product.to_string(), "1,Widget,Hardware,9.99,10,5");
    }

    #[test]
    fn update_quantity_applies_signed_delta() {
        let mut product = Product::new(widget()).unwrap();
        product.update_quantity(-6).unwrap();
        assert_eq!(product.quantity(), 4);
        product.update_quantity(3).unwrap();
        assert_eq!(product.quantity(), 7);
    }

    #[test]
    fn quantity_may_go_negative() {
        let mut product = Product::new(widget()).unwrap();
        product.update_quantity(-25).unwrap();
        assert_eq!(product.quantity(), -15);
        assert!(product.check_reorder_level());
    }

    #[test]
    fn update_quantity_rejects_overflow() {
        let mut product = Product::new(NewProduct {
            quantity: i64::MAX,
            ..widget()
        })
        .unwrap();
        assert!(matches!(
            product.update_quantity(1),
            Err(DomainError::Validation(_))
        ));
        assert_eq!(product.quantity(), i64::MAX);

        let mut product = Product::new(NewProduct {
            quantity: -1,
            ..widget()
        })
        .unwrap();
        assert!(product.update_quantity(i64::MIN).is_err());
        assert_eq!(product.quantity(), -1);
    }

    #[test]
    fn reorder_level_is_inclusive() {
        let mut product = Product::new(widget()).unwrap();
        assert!(!product.check_reorder_level());
        product.update_quantity(-5).unwrap();
        assert!(product.check_reorder_level());
    }

    #[test]
    fn rejects_negative_price() {
        let mut input = widget();
        input.price = -0.01;
        let err = Product::new(input).unwrap_err();
        match err {
            DomainError::Validation(_) => {}
            _ => panic!("Expected Validation error for negative price"),
        }
    }

    #[test]
    fn rejects_non_finite_price() {
        let mut input = widget();
        input.price = f64::NAN;
        assert!(Product::new(input).is_err());
    }

    #[test]
    fn rejects_delimiter_in_name() {
        let mut input = widget();
        input.name = "Widget, large".to_string();
        assert!(matches!(
            Product::new(input),
            Err(DomainError::Validation(_))
        ));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: the reorder check is a pure predicate.
            #[test]
            fn check_reorder_level_is_idempotent(
                quantity in -1_000i64..1_000,
                reorder_level in -1_000i64..1_000,
            ) {
                let product = Product::new(NewProduct {
                    quantity,
                    reorder_level,
                    ..widget()
                }).unwrap();

                let first = product.check_reorder_level();
                prop_assert_eq!(first, product.check_reorder_level());
                prop_assert_eq!(first, product.check_reorder_level());
                prop_assert_eq!(first, quantity <= reorder_level);
            }

            /// Property: applying a sequence of deltas sums them exactly.
            #[test]
            fn deltas_accumulate(deltas in prop::collection::vec(-100i64..100, 0..20)) {
                let mut product = Product::new(widget()).unwrap();
                for d in &deltas {
                    product.update_quantity(*d).unwrap();
                }
                prop_assert_eq!(product.quantity(), 10 + deltas.iter().sum::<i64>());
            }
        }
    }
}
