use invoice_doc::{compute_totals, line_total, DiscountPolicy, LineItem};

fn items(specs: &[(f64, f64, f64)]) -> Vec<LineItem> {
    specs
        .iter()
        .map(|&(qty, price, tax)| LineItem::new("item", qty, price, tax))
        .collect()
}

#[test]
fn worked_example_one() {
    let items = items(&[(2.0, 50.0, 10.0)]);
    let totals = compute_totals(&items, &DiscountPolicy::absolute(0.0));
    assert_eq!(totals.subtotal, 100.0);
    assert_eq!(totals.tax_total, 10.0);
    assert_eq!(totals.discount_amount, 0.0);
    assert_eq!(totals.total, 110.0);
}

#[test]
fn worked_example_two() {
    let items = items(&[(1.0, 200.0, 0.0), (3.0, 10.0, 20.0)]);
    let totals = compute_totals(&items, &DiscountPolicy::percent(10.0));
    assert_eq!(totals.subtotal, 230.0);
    assert_eq!(totals.tax_total, 6.0);
    assert_eq!(totals.discount_amount, 23.0);
    assert_eq!(totals.total, 213.0);
}

#[test]
fn identical_inputs_are_bit_identical() {
    let items = items(&[(0.3, 17.77, 8.25), (2.0, 99.99, 19.0), (-1.0, 5.0, 0.0)]);
    let discount = DiscountPolicy::percent(12.5);
    let a = compute_totals(&items, &discount);
    let b = compute_totals(&items, &discount);
    assert_eq!(a.subtotal.to_bits(), b.subtotal.to_bits());
    assert_eq!(a.tax_total.to_bits(), b.tax_total.to_bits());
    assert_eq!(a.discount_amount.to_bits(), b.discount_amount.to_bits());
    assert_eq!(a.total.to_bits(), b.total.to_bits());
}

#[test]
fn zero_items_invariant() {
    let percent = compute_totals(&[], &DiscountPolicy::percent(40.0));
    assert_eq!(percent.subtotal, 0.0);
    assert_eq!(percent.tax_total, 0.0);
    assert_eq!(percent.discount_amount, 0.0);
    assert_eq!(percent.total, 0.0);

    let absolute = compute_totals(&[], &DiscountPolicy::absolute(40.0));
    assert_eq!(absolute.discount_amount, 40.0);
    assert_eq!(absolute.total, -40.0);
}

#[test]
fn percent_discount_equals_equivalent_absolute() {
    let items = items(&[(4.0, 25.0, 5.0), (1.5, 60.0, 0.0)]);
    let subtotal = compute_totals(&items, &DiscountPolicy::none()).subtotal;
    let rate = 15.0;

    let percent = compute_totals(&items, &DiscountPolicy::percent(rate));
    let absolute = compute_totals(&items, &DiscountPolicy::absolute(subtotal * rate / 100.0));
    assert_eq!(percent.discount_amount, absolute.discount_amount);
    assert_eq!(percent.total, absolute.total);
}

#[test]
fn negative_inputs_contribute_literally() {
    let items = items(&[(-2.0, 50.0, 10.0)]);
    let totals = compute_totals(&items, &DiscountPolicy::none());
    assert_eq!(totals.subtotal, -100.0);
    assert_eq!(totals.tax_total, -10.0);
    assert_eq!(totals.total, -110.0);
}

#[test]
fn oversized_discount_drives_total_negative() {
    let items = items(&[(1.0, 100.0, 0.0)]);
    let totals = compute_totals(&items, &DiscountPolicy::absolute(250.0));
    assert_eq!(totals.total, -150.0);

    let percent = compute_totals(&items, &DiscountPolicy::percent(300.0));
    assert_eq!(percent.total, -200.0);
}

#[test]
fn no_rounding_inside_the_calculator() {
    // 0.1 + 0.2 style residue must pass through untouched.
    let items = items(&[(1.0, 0.1, 0.0), (1.0, 0.2, 0.0)]);
    let totals = compute_totals(&items, &DiscountPolicy::none());
    assert_eq!(totals.subtotal, 0.1 + 0.2);
    assert_ne!(totals.subtotal, 0.3);
}

#[test]
fn line_total_matches_table_column_rule() {
    let item = LineItem::new("dev", 3.0, 10.0, 20.0);
    assert_eq!(line_total(&item), 36.0);
}
