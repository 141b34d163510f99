/// `part` as a percentage of `total`.
///
/// A zero (or non-finite) total yields 0.0 rather than NaN, so weight pairs
/// such as `0,0` still render a defined percentage.
pub fn share_pct(part: f64, total: f64) -> f64 {
    if total == 0.0 || !total.is_finite() {
        return 0.0;
    }
    (part / total) * 100.0
}

/// Converts a USD amount into units of the quoted asset, rounded to the
/// nearest whole unit. Returns `None` when the quote is not a positive price.
pub fn usd_to_quote_units(amount_usd: f64, quote_price: f64) -> Option<f64> {
    if quote_price <= 0.0 || !quote_price.is_finite() {
        return None;
    }
    Some((amount_usd / quote_price).round())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn share_pct_basic_and_zero_total() {
        assert!((share_pct(1.0, 4.0) - 25.0).abs() < 1e-12);
        assert_eq!(share_pct(3.0, 0.0), 0.0);
        assert_eq!(share_pct(0.0, 0.0), 0.0);
        assert_eq!(share_pct(1.0, f64::NAN), 0.0);
    }

    #[test]
    fn usd_conversion_rounds_and_rejects_bad_quotes() {
        assert_eq!(usd_to_quote_units(100_000.0, 0.8), Some(125_000.0));
        assert_eq!(usd_to_quote_units(10.0, 3.0), Some(3.0));
        assert_eq!(usd_to_quote_units(10.0, 0.0), None);
        assert_eq!(usd_to_quote_units(10.0, -1.0), None);
        assert_eq!(usd_to_quote_units(10.0, f64::NAN), None);
    }
}
