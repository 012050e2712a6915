/// Formats euros with thousands separators and no decimals (`15,152 €`).
pub fn format_currency(amount: f64) -> String {
    format!("{} €", format_grouped(amount))
}

/// Rounds to a whole number (ties to even) and inserts `,` every three digits.
pub fn format_grouped(value: f64) -> String {
    let digits = format!("{:.0}", value.abs());
    let negative = value < 0.0 && digits.bytes().any(|digit| digit != b'0');

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if negative {
        grouped.push('-');
    }
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

/// One decimal place, used for ratios.
pub fn format_ratio(ratio: f64) -> String {
    format!("{ratio:.1}")
}

pub fn format_days(days: u64) -> String {
    format!("{days} days")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_currency(15_152.318), "15,152 €");
        assert_eq!(format_currency(1_234_567.5), "1,234,568 €");
        assert_eq!(format_currency(999.4), "999 €");
        assert_eq!(format_currency(0.0), "0 €");
    }

    #[test]
    fn exact_halves_round_to_even() {
        assert_eq!(format_currency(55_558.5), "55,558 €");
        assert_eq!(format_currency(1_234_566.5), "1,234,566 €");
        assert_eq!(format_grouped(2.5), "2");
        assert_eq!(format_grouped(3.5), "4");
        assert_eq!(format_grouped(-0.5), "0");
        assert_eq!(format_grouped(-1.5), "-2");
    }

    #[test]
    fn keeps_sign_for_losses() {
        assert_eq!(format_currency(-4_321.7), "-4,322 €");
        assert_eq!(format_grouped(-0.2), "0");
    }

    #[test]
    fn ratios_use_one_decimal() {
        assert_eq!(format_ratio(5.381_825), "5.4");
        assert_eq!(format_ratio(12.0), "12.0");
    }
}
