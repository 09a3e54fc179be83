use rust_decimal::Decimal;

/// One service line as captured from the entry form. Numeric fields
/// arrive as raw text and are coerced, never rejected, so totals can be
/// recomputed on every keystroke.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceLineInput {
  pub design_type: String,
  pub level: String,
  pub area: String,
  pub unit_price: String,
}

/// Raw adjustment capture: a signed amount plus an optional description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdjustmentInput {
  pub amount: String,
  pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Totals {
  pub line_subtotals: Vec<Decimal>,
  pub invoice_total: Decimal,
}

/// Parse a monetary or measurement field, treating anything that is not
/// a plain decimal as zero. Missing and malformed input never raise.
pub fn amount_or_zero(raw: &str) -> Decimal {
  raw.trim().parse::<Decimal>().unwrap_or(Decimal::ZERO)
}

/// Compute per-line subtotals and the invoice total.
///
/// Pure: the result depends only on the arguments, costs O(lines), and
/// carries no state between calls. Callers own the recompute trigger:
/// any edit to a line or to the adjustment requires a fresh call.
/// A zero adjustment contributes nothing, identical to its absence.
pub fn compute_totals(lines: &[ServiceLineInput], adjustment: Option<&AdjustmentInput>) -> Totals {
  let line_subtotals: Vec<Decimal> = lines
    .iter()
    .map(|line| amount_or_zero(&line.area) * amount_or_zero(&line.unit_price))
    .collect();

  let mut invoice_total: Decimal = line_subtotals.iter().copied().sum();
  if let Some(adjustment) = adjustment {
    invoice_total += amount_or_zero(&adjustment.amount);
  }

  Totals {
    line_subtotals,
    invoice_total,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rust_decimal_macros::dec;

  fn line(area: &str, price: &str) -> ServiceLineInput {
    ServiceLineInput {
      design_type: "sanitario".to_string(),
      level: "1".to_string(),
      area: area.to_string(),
      unit_price: price.to_string(),
    }
  }

  #[test]
  fn test_amount_or_zero_parses_decimals() {
    assert_eq!(amount_or_zero("100"), dec!(100));
    assert_eq!(amount_or_zero("  12.50 "), dec!(12.50));
    assert_eq!(amount_or_zero("-3.25"), dec!(-3.25));
  }

  #[test]
  fn test_amount_or_zero_coerces_garbage_to_zero() {
    assert_eq!(amount_or_zero(""), Decimal::ZERO);
    assert_eq!(amount_or_zero("   "), Decimal::ZERO);
    assert_eq!(amount_or_zero("abc"), Decimal::ZERO);
    assert_eq!(amount_or_zero("12abc"), Decimal::ZERO);
    assert_eq!(amount_or_zero("1.2.3"), Decimal::ZERO);
  }

  #[test]
  fn test_subtotal_per_line() {
    let totals = compute_totals(&[line("100", "50"), line("100", "30")], None);
    assert_eq!(totals.line_subtotals, vec![dec!(5000), dec!(3000)]);
    assert_eq!(totals.invoice_total, dec!(8000));
  }

  #[test]
  fn test_empty_lines_total_is_adjustment_amount() {
    let totals = compute_totals(&[], None);
    assert!(totals.line_subtotals.is_empty());
    assert_eq!(totals.invoice_total, Decimal::ZERO);

    let surcharge = AdjustmentInput {
      amount: "250".to_string(),
      description: String::new(),
    };
    let totals = compute_totals(&[], Some(&surcharge));
    assert!(totals.line_subtotals.is_empty());
    assert_eq!(totals.invoice_total, dec!(250));
  }

  #[test]
  fn test_negative_adjustment_discounts_total() {
    let discount = AdjustmentInput {
      amount: "-500".to_string(),
      description: "Descuento por pronto pago".to_string(),
    };
    let totals = compute_totals(&[line("100", "50")], Some(&discount));
    assert_eq!(totals.invoice_total, dec!(4500));
  }

  #[test]
  fn test_zero_adjustment_matches_absence() {
    let zero = AdjustmentInput {
      amount: "0".to_string(),
      description: String::new(),
    };
    let with_zero = compute_totals(&[line("20", "10")], Some(&zero));
    let without = compute_totals(&[line("20", "10")], None);
    assert_eq!(with_zero, without);
  }

  #[test]
  fn test_malformed_fields_price_as_zero() {
    let totals = compute_totals(&[line("", "50"), line("100", "n/a")], None);
    assert_eq!(totals.line_subtotals, vec![Decimal::ZERO, Decimal::ZERO]);
    assert_eq!(totals.invoice_total, Decimal::ZERO);
  }

  #[test]
  fn test_total_keeps_full_precision() {
    let totals = compute_totals(&[line("33.333", "3.03")], None);
    assert_eq!(totals.invoice_total, dec!(100.99899));
  }

  #[test]
  fn test_sum_is_order_independent() {
    let a = [line("10", "5"), line("7", "3"), line("2.5", "8")];
    let b = [line("2.5", "8"), line("10", "5"), line("7", "3")];
    assert_eq!(
      compute_totals(&a, None).invoice_total,
      compute_totals(&b, None).invoice_total
    );
  }
}
