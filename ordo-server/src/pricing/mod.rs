//! Order pricing
//!
//! Pure, synchronous money computation: locale-tolerant amount parsing and
//! the order-totals aggregation persisted as snapshot columns at save time.
//! All arithmetic runs on `Decimal`; `f64` appears only at the
//! storage/serialization boundary.

pub mod aggregator;
pub mod money;

pub use aggregator::{OrderTotals, material_line_total, materials_total, services_total};
pub use money::{parse_amount, round2, to_decimal, to_f64};

#[cfg(test)]
mod tests;
