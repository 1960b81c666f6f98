use core::str::FromStr;

use ims_core::DomainError;
use ims_products::Product;

/// First line of every stock report.
pub const STOCK_REPORT_HEADER: &str = "Stock Report:";

/// Report kinds the inventory can generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Stock,
}

impl ReportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportKind::Stock => "stock",
        }
    }
}

impl FromStr for ReportKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stock" => Ok(ReportKind::Stock),
            other => Err(DomainError::unsupported_report(other)),
        }
    }
}

/// Header line followed by one stock line per product, in collection order.
pub(crate) fn stock_report(products: &[Product]) -> String {
    let mut out = String::from(STOCK_REPORT_HEADER);
    out.push('\n');
    for product in products {
        out.push_str(&product.to_string());
        out.push('\n');
    }
    out
}
