fn keep(arg: &str, allowed: impl Fn(char) -> bool) -> String {
    arg.chars().filter(|c| allowed(*c)).collect()
}

/// Keeps digits, dots and minus signs: `"US$ -1,234.50"` becomes `"-1234.50"`.
#[must_use]
pub fn num_str(arg: &str) -> String {
    keep(arg, |c| c.is_ascii_digit() || c == '.' || c == '-')
}

/// Parses a dot-decimal float, ignoring everything but digits and dots.
#[must_use]
pub fn num_float(arg: &str) -> Option<f64> {
    keep(arg, |c| c.is_ascii_digit() || c == '.').parse().ok()
}

/// Parses the integer part of a dot-decimal number.
#[must_use]
pub fn num_int(arg: &str) -> Option<i64> {
    num_str(arg).split('.').next()?.parse().ok()
}

/// Keeps ASCII alphanumerics and whitespace, upper-cased and trimmed.
#[must_use]
pub fn alnum_upper(arg: &str) -> String {
    keep(arg, |c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .to_uppercase()
        .trim()
        .to_string()
}

/// Parses a comma-decimal float with dot thousands: `"1.234,5"` is `1234.5`.
#[must_use]
pub fn national_float(arg: &str) -> Option<f64> {
    keep(arg, |c| c.is_ascii_digit() || c == ',')
        .replace(',', ".")
        .parse()
        .ok()
}

/// Parses only the digits of a value: `"$12.000"` is `12000.0`.
#[must_use]
pub fn national_float_digits(arg: &str) -> Option<f64> {
    keep(arg, |c| c.is_ascii_digit()).parse().ok()
}

/// Formats an integer with dot thousands separators: `22158333` is `"22.158.333"`.
#[must_use]
pub fn format_amount(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }
    if amount < 0 {
        grouped.insert(0, '-');
    }
    grouped
}

/// Extracts a signed integer from text such as `"$-12.000"`, or `0` if none.
///
/// Only a leading minus sign counts; the first stray minus after a digit is dropped.
#[must_use]
pub fn str_int(value: &str) -> i64 {
    let mut numbers: Vec<char> = value
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '-')
        .collect();
    if numbers.first().is_some_and(|c| *c != '-')
        && let Some(position) = numbers.iter().position(|c| *c == '-')
    {
        numbers.remove(position);
    }
    numbers.into_iter().collect::<String>().parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_num_str() {
        assert_eq!(num_str("US$ -1,234.50"), "-1234.50");
    }

    #[test]
    fn test_num_float_and_int() {
        assert_eq!(num_float("1,234.50 USD"), Some(1234.5));
        assert_eq!(num_float("n/a"), None);
        assert_eq!(num_int("-42.9 kg"), Some(-42));
        assert_eq!(num_int("abc"), None);
    }

    #[test]
    fn test_alnum_upper() {
        assert_eq!(alnum_upper("  hola, mundo! 2021 "), "HOLA MUNDO 2021");
    }

    #[test]
    fn test_national_floats() {
        assert_eq!(national_float("$ 1.234,5"), Some(1234.5));
        assert_eq!(national_float_digits("$12.000"), Some(12000.0));
        assert_eq!(national_float_digits("gratis"), None);
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(22_158_333), "22.158.333");
        assert_eq!(format_amount(999), "999");
        assert_eq!(format_amount(1000), "1.000");
        assert_eq!(format_amount(-1_234_567), "-1.234.567");
        assert_eq!(format_amount(0), "0");
    }

    #[test]
    fn test_str_int() {
        assert_eq!(str_int("$12.000"), 12000);
        assert_eq!(str_int("$-12.000"), -12000);
        assert_eq!(str_int("12-34"), 1234);
        assert_eq!(str_int("--5"), 0);
        assert_eq!(str_int("sin monto"), 0);
    }
}
