//! Address and contact field checks

use std::sync::LazyLock;

use regex::Regex;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\w_\-\.]+@[\w_\-\.]{2,}\.[\w]{2,}(\.[\w])?").expect("valid email regex")
});

/// Decimal digits of `value` in order
pub fn only_digits(value: &str) -> Vec<u32> {
    value.chars().filter_map(|c| c.to_digit(10)).collect()
}

/// `value` with every non-digit character removed
pub fn only_digits_string(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// Landline (10 digits) or mobile (11 digits) number including area code
pub fn is_valid_phone(digits: &str) -> bool {
    matches!(digits.len(), 10 | 11) && digits.chars().all(|c| c.is_ascii_digit())
}

/// Brazilian CEP, exactly eight digits
pub fn is_valid_zip(digits: &str) -> bool {
    digits.len() == 8 && digits.chars().all(|c| c.is_ascii_digit())
}

/// `(11) 3333-4444` or `(11) 93333-4444`
pub fn format_phone(digits: &str) -> String {
    match digits.len() {
        10 => format!("({}) {}-{}", &digits[0..2], &digits[2..6], &digits[6..10]),
        11 => format!("({}) {}-{}", &digits[0..2], &digits[2..7], &digits[7..11]),
        _ => digits.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_punctuation() {
        assert_eq!(only_digits_string("01310-100"), "01310100");
        assert_eq!(only_digits_string("(11) 3333-4444"), "1133334444");
        assert_eq!(only_digits("1a2"), vec![1, 2]);
    }

    #[test]
    fn email_format() {
        assert!(is_valid_email("contato@empresa.com.br"));
        assert!(is_valid_email("joao.silva-2@mail.com"));
        assert!(!is_valid_email("contato@empresa"));
        assert!(!is_valid_email("sem-arroba.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn phone_lengths() {
        assert!(is_valid_phone("1133334444"));
        assert!(is_valid_phone("11933334444"));
        assert!(!is_valid_phone("333344"));
        assert!(!is_valid_phone("119333344445"));
    }

    #[test]
    fn zip_must_have_eight_digits() {
        assert!(is_valid_zip("01310100"));
        assert!(!is_valid_zip("0131010"));
        assert!(!is_valid_zip("01310-10"));
    }

    #[test]
    fn formats_phone_numbers() {
        assert_eq!(format_phone("1133334444"), "(11) 3333-4444");
        assert_eq!(format_phone("11933334444"), "(11) 93333-4444");
        assert_eq!(format_phone("123"), "123");
    }
}
