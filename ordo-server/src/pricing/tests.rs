use super::*;
use rust_decimal::Decimal;

#[test]
fn test_parse_amount_accepts_both_separators() {
    assert_eq!(parse_amount("150,50"), 150.50);
    assert_eq!(parse_amount("150.50"), 150.50);
    assert_eq!(parse_amount("45,00"), 45.0);
    assert_eq!(parse_amount(" 12.3 "), 12.3);
}

#[test]
fn test_parse_amount_degrades_to_zero() {
    assert_eq!(parse_amount(""), 0.0);
    assert_eq!(parse_amount("abc"), 0.0);
    assert_eq!(parse_amount("12,34,56"), 0.0);
    assert_eq!(parse_amount("-5.00"), 0.0);
    assert_eq!(parse_amount("NaN"), 0.0);
}

#[test]
fn test_round2_half_up() {
    // The case the old float-epsilon hack existed for
    assert_eq!(to_f64(round2(Decimal::new(1005, 3))), 1.01); // 1.005
    assert_eq!(to_f64(round2(Decimal::new(50005, 3))), 50.01); // 50.005
    assert_eq!(to_f64(round2(Decimal::new(1004, 3))), 1.00); // 1.004
}

#[test]
fn test_decimal_precision() {
    // Classic floating point problem: 0.1 + 0.2 != 0.3
    let sum_f64 = 0.1_f64 + 0.2_f64;
    assert_ne!(sum_f64, 0.3);

    let sum_dec = to_decimal(0.1) + to_decimal(0.2);
    assert_eq!(to_f64(sum_dec), 0.3);
}

#[test]
fn test_material_line_total() {
    assert_eq!(to_f64(material_line_total(10.0, 3)), 30.0);
    assert_eq!(to_f64(material_line_total(2.335, 2)), 4.67); // 4.67 after rounding
}

#[test]
fn test_materials_total_is_order_independent() {
    let lines = vec![(12.5, 2), (0.35, 10), (99.99, 1)];
    let forward = materials_total(lines.clone());
    let reversed = materials_total(lines.into_iter().rev());
    assert_eq!(forward, reversed);
    assert_eq!(to_f64(forward), 128.49);
}

#[test]
fn test_totals_round_before_discount() {
    // materials = 100.00, services = 50.005 -> 50.01, discount = 20.00
    let totals = OrderTotals::compute([(100.0, 1)], [50.005], 20.0);
    assert_eq!(totals.materials_total, 100.0);
    assert_eq!(totals.services_total, 50.01);
    assert_eq!(totals.subtotal, 150.01);
    assert_eq!(totals.total, 130.01);
}

#[test]
fn test_totals_end_to_end_scenario() {
    // One material (10.00 x 3) + one service typed as "45,00" + discount 5.00
    let service_price = parse_amount("45,00");
    let totals = OrderTotals::compute([(10.0, 3)], [service_price], parse_amount("5,00"));
    assert_eq!(totals.materials_total, 30.0);
    assert_eq!(totals.services_total, 45.0);
    assert_eq!(totals.subtotal, 75.0);
    assert_eq!(totals.total, 70.0);
}

#[test]
fn test_totals_are_idempotent() {
    let materials = vec![(3.33, 3), (7.77, 7)];
    let services = vec![19.99, 0.01];
    let a = OrderTotals::compute(materials.clone(), services.clone(), 2.5);
    let b = OrderTotals::compute(materials, services, 2.5);
    assert_eq!(a, b);
    assert_eq!(a.total.to_bits(), b.total.to_bits());
}

#[test]
fn test_empty_order_is_all_zero() {
    let totals = OrderTotals::zero();
    assert_eq!(totals.materials_total, 0.0);
    assert_eq!(totals.services_total, 0.0);
    assert_eq!(totals.subtotal, 0.0);
    assert_eq!(totals.discount, 0.0);
    assert_eq!(totals.total, 0.0);
}

#[test]
fn test_zero_price_services_contribute_nothing() {
    let totals = OrderTotals::compute(
        std::iter::empty(),
        [parse_amount(""), parse_amount("bogus")],
        0.0,
    );
    assert_eq!(totals.total, 0.0);
}

#[test]
fn test_discount_can_exceed_subtotal() {
    // Not clamped: the quote goes negative and stays negative
    let totals = OrderTotals::compute(std::iter::empty(), [30.0], 50.0);
    assert_eq!(totals.subtotal, 30.0);
    assert_eq!(totals.total, -20.0);
}

#[test]
fn test_accumulation_precision() {
    // Sum 0.01 a thousand times through the aggregator path
    let totals = OrderTotals::compute(std::iter::empty(), std::iter::repeat(0.01).take(1000), 0.0);
    assert_eq!(totals.services_total, 10.0);
}
