/// Format a minor-unit amount (cents) for display, e.g. `2500` ->
/// `"25.00 CHF"`. A zero total renders as a dash, matching the
/// services sheet before options are loaded.
pub fn format_minor_units(amount_cents: i64, currency: &str) -> String {
    if amount_cents == 0 {
        return "–".to_string();
    }
    let sign = if amount_cents < 0 { "-" } else { "" };
    let abs = amount_cents.unsigned_abs();
    format!("{sign}{}.{:02} {currency}", abs / 100, abs % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_whole_and_fractional_amounts() {
        assert_eq!(format_minor_units(2500, "CHF"), "25.00 CHF");
        assert_eq!(format_minor_units(2050, "CHF"), "20.50 CHF");
        assert_eq!(format_minor_units(5, "CHF"), "0.05 CHF");
    }

    #[test]
    fn zero_renders_as_dash() {
        assert_eq!(format_minor_units(0, "CHF"), "–");
    }

    #[test]
    fn negative_amounts_keep_the_sign() {
        assert_eq!(format_minor_units(-500, "CHF"), "-5.00 CHF");
    }
}
