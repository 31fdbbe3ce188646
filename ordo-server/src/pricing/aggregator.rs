//! Order-totals aggregator
//!
//! A pure function of the current line items: called on every change while
//! the order is being edited, once more at save time to produce the
//! snapshot columns, and again when a persisted order is rendered into a
//! document. Identical inputs always produce bit-identical totals, which is
//! what keeps the generated document in agreement with the on-screen
//! preview.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::money::{round2, to_decimal, to_f64};

/// Computed totals for one order.
///
/// `total` is NOT floored at zero: a discount larger than the subtotal
/// produces a negative total. The business accepts negative quotes, so the
/// figure is preserved rather than clamped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrderTotals {
    pub materials_total: f64,
    pub services_total: f64,
    pub subtotal: f64,
    pub discount: f64,
    pub total: f64,
}

impl OrderTotals {
    /// Aggregate totals from material lines (unit price, quantity),
    /// service line prices and an absolute discount.
    pub fn compute<M, S>(materials: M, services: S, discount: f64) -> Self
    where
        M: IntoIterator<Item = (f64, i64)>,
        S: IntoIterator<Item = f64>,
    {
        let materials_total = materials_total(materials);
        let services_total = services_total(services);
        let subtotal = round2(materials_total + services_total);
        let discount = round2(to_decimal(discount));
        let total = round2(subtotal - discount);

        Self {
            materials_total: to_f64(materials_total),
            services_total: to_f64(services_total),
            subtotal: to_f64(subtotal),
            discount: to_f64(discount),
            total: to_f64(total),
        }
    }

    /// All-zero totals for an order with no lines
    pub fn zero() -> Self {
        Self::compute(std::iter::empty(), std::iter::empty(), 0.0)
    }
}

/// Line total for one material usage: unit price times quantity, rounded
pub fn material_line_total(unit_price: f64, quantity: i64) -> Decimal {
    round2(to_decimal(unit_price) * Decimal::from(quantity))
}

/// Sum of rounded per-line material products, rounded.
/// Order-independent: lines can be summed in any order.
pub fn materials_total<I>(lines: I) -> Decimal
where
    I: IntoIterator<Item = (f64, i64)>,
{
    let sum: Decimal = lines
        .into_iter()
        .map(|(unit_price, quantity)| material_line_total(unit_price, quantity))
        .sum();
    round2(sum)
}

/// Sum of service line prices, rounded
pub fn services_total<I>(prices: I) -> Decimal
where
    I: IntoIterator<Item = f64>,
{
    let sum: Decimal = prices.into_iter().map(to_decimal).sum();
    round2(sum)
}
