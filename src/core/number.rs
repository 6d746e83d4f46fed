//! Number and currency formatting (ru-RU conventions).

pub const DEFAULT_CURRENCY: &str = "RUB";

const GROUP_SEPARATOR: char = '\u{a0}';
const DECIMAL_SEPARATOR: char = ',';

fn currency_symbol(code: &str) -> &str {
    match code {
        "RUB" => "₽",
        "USD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        "CNY" => "¥",
        other => other,
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(GROUP_SEPARATOR);
        }
        out.push(ch);
    }
    out
}

/// Formats `amount` as `1 234,5 ₽`: at most two fraction digits, trailing zeros dropped.
pub fn format_currency(amount: f64, currency: &str) -> String {
    let symbol = currency_symbol(currency);

    if amount.is_nan() {
        return format!("не число{}{}", GROUP_SEPARATOR, symbol);
    }
    if amount.is_infinite() {
        let sign = if amount < 0.0 { "-" } else { "" };
        return format!("{}∞{}{}", sign, GROUP_SEPARATOR, symbol);
    }

    let fixed = format!("{:.2}", round_to(amount.abs(), 2));
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    // -0,001 四捨五入後為 0，不顯示負號
    let is_zero = int_part.chars().all(|c| c == '0') && frac_part.is_empty();
    let sign = if amount < 0.0 && !is_zero { "-" } else { "" };

    let mut out = format!("{}{}", sign, group_thousands(int_part));
    if !frac_part.is_empty() {
        out.push(DECIMAL_SEPARATOR);
        out.push_str(frac_part);
    }
    out.push(GROUP_SEPARATOR);
    out.push_str(symbol);
    out
}

/// 1.2К / 1.5М 形式的縮寫
pub fn format_large_number(num: f64) -> String {
    if num >= 1_000_000.0 {
        format!("{:.1}М", round_to(num / 1_000_000.0, 1))
    } else if num >= 1_000.0 {
        format!("{:.1}К", round_to(num / 1_000.0, 1))
    } else {
        num.to_string()
    }
}

/// Share of `part` in `total` as a percentage with one decimal; `0.0` for a zero total.
pub fn percentage(part: f64, total: f64) -> f64 {
    if total == 0.0 {
        return 0.0;
    }
    round_to(part / total * 100.0, 1)
}

/// Rounds half away from zero to `decimals` fraction digits.
pub fn round_to(num: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    let scaled = num * factor;
    if !scaled.is_finite() {
        return num;
    }
    scaled.round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency_rub() {
        assert_eq!(format_currency(1234.5, "RUB"), "1\u{a0}234,5\u{a0}₽");
        assert_eq!(format_currency(1_000_000.0, "RUB"), "1\u{a0}000\u{a0}000\u{a0}₽");
        assert_eq!(format_currency(0.0, DEFAULT_CURRENCY), "0\u{a0}₽");
        assert_eq!(format_currency(99.999, "RUB"), "100\u{a0}₽");
    }

    #[test]
    fn test_format_currency_rounds_half_up() {
        assert_eq!(format_currency(0.125, "RUB"), "0,13\u{a0}₽");
        assert_eq!(format_currency(-0.125, "RUB"), "-0,13\u{a0}₽");
        assert_eq!(format_currency(f64::MAX, "RUB").chars().last(), Some('₽'));
    }

    #[test]
    fn test_format_currency_other_codes() {
        assert_eq!(format_currency(12.34, "USD"), "12,34\u{a0}$");
        assert_eq!(format_currency(5.0, "EUR"), "5\u{a0}€");
        assert_eq!(format_currency(7.1, "KZT"), "7,1\u{a0}KZT");
    }

    #[test]
    fn test_format_currency_negative_and_special() {
        assert_eq!(format_currency(-2500.75, "RUB"), "-2\u{a0}500,75\u{a0}₽");
        assert_eq!(format_currency(-0.001, "RUB"), "0\u{a0}₽");
        assert_eq!(format_currency(f64::NAN, "RUB"), "не число\u{a0}₽");
        assert_eq!(format_currency(f64::NEG_INFINITY, "RUB"), "-∞\u{a0}₽");
    }

    #[test]
    fn test_format_large_number() {
        assert_eq!(format_large_number(999.0), "999");
        assert_eq!(format_large_number(1_200.0), "1.2К");
        assert_eq!(format_large_number(1_500_000.0), "1.5М");
        assert_eq!(format_large_number(12.5), "12.5");
        assert_eq!(format_large_number(1_250.0), "1.3К");
        assert_eq!(format_large_number(2_250_000.0), "2.3М");
    }

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(1.0, 3.0), 33.3);
        assert_eq!(percentage(50.0, 200.0), 25.0);
        assert_eq!(percentage(5.0, 0.0), 0.0);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(3.14159, 2), 3.14);
        assert_eq!(round_to(2.5, 0), 3.0);
        assert_eq!(round_to(1234.5678, 1), 1234.6);
    }
}
