//! Display formatting for the rendered document.
//!
//! This is the single rounding boundary: amounts carry full floating
//! precision everywhere else and are rounded to two decimals exactly
//! once, here.

use chrono::NaiveDate;

/// Format a monetary amount with thousands grouping and two decimal
/// places. Dollar-denominated currencies get a `$` prefix; everything
/// else renders with the ISO code as a suffix, keeping output inside
/// the builtin font's character set.
pub fn format_amount(amount: f64, currency: &str) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u128;
    let units = cents / 100;
    let frac = cents % 100;
    let body = format!("{}.{:02}", group_thousands(units), frac);

    let formatted = match currency {
        "USD" | "AUD" | "CAD" | "NZD" => format!("${}", body),
        code if code.trim().is_empty() => body,
        code => format!("{} {}", body, code),
    };
    if negative {
        format!("-{}", formatted)
    } else {
        formatted
    }
}

/// Quantity column format: rounded to a whole number.
pub fn format_quantity(quantity: f64) -> String {
    format!("{}", quantity.round() as i64)
}

/// Tax column format: the rate with a `%` suffix, without trailing
/// zeros for whole rates.
pub fn format_percent(rate: f64) -> String {
    if rate == rate.floor() && rate.abs() < 1e15 {
        format!("{}%", rate as i64)
    } else {
        format!("{}%", rate)
    }
}

/// Dates render as DD/MM/YYYY.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

fn group_thousands(value: u128) -> String {
    let digits = value.to_string();
    digits
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap())
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dollar_currencies_use_symbol() {
        assert_eq!(format_amount(1234.5, "USD"), "$1,234.50");
        assert_eq!(format_amount(0.0, "USD"), "$0.00");
    }

    #[test]
    fn other_currencies_use_code_suffix() {
        assert_eq!(format_amount(9600.0, "EUR"), "9,600.00 EUR");
        assert_eq!(format_amount(12.345, "GBP"), "12.35 GBP");
    }

    #[test]
    fn negative_amounts_carry_leading_sign() {
        assert_eq!(format_amount(-25.0, "USD"), "-$25.00");
        assert_eq!(format_amount(-0.005, "EUR"), "-0.01 EUR");
    }

    #[test]
    fn rounding_happens_once_at_two_decimals() {
        assert_eq!(format_amount(10.005, "USD"), "$10.01");
        assert_eq!(format_amount(10.004, "USD"), "$10.00");
    }

    #[test]
    fn grouping_large_values() {
        assert_eq!(format_amount(1_000_000.0, "USD"), "$1,000,000.00");
    }

    #[test]
    fn quantity_formats_as_integer() {
        assert_eq!(format_quantity(2.0), "2");
        assert_eq!(format_quantity(2.6), "3");
    }

    #[test]
    fn percent_trims_whole_rates() {
        assert_eq!(format_percent(10.0), "10%");
        assert_eq!(format_percent(7.5), "7.5%");
        assert_eq!(format_percent(0.0), "0%");
    }

    #[test]
    fn date_is_day_month_year() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        assert_eq!(format_date(date), "05/01/2026");
    }
}
