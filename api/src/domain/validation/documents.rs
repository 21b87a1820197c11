//! CPF and CNPJ check-digit validation

use super::contact::only_digits;

const CNPJ_FIRST_WEIGHTS: [u32; 12] = [5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];
const CNPJ_SECOND_WEIGHTS: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

/// Mod-11 check digit over `digits` with the given weights
fn check_digit(digits: &[u32], weights: &[u32]) -> u32 {
    let sum: u32 = digits.iter().zip(weights).map(|(d, w)| d * w).sum();
    let rest = sum % 11;
    if rest < 2 {
        0
    } else {
        11 - rest
    }
}

fn all_same(digits: &[u32]) -> bool {
    digits.windows(2).all(|w| w[0] == w[1])
}

/// Validate a CPF (individual taxpayer id); punctuation is ignored.
pub fn is_valid_cpf(value: &str) -> bool {
    let digits = only_digits(value);
    if digits.len() != 11 || all_same(&digits) {
        return false;
    }

    let first_weights: Vec<u32> = (2..=10).rev().collect();
    let second_weights: Vec<u32> = (2..=11).rev().collect();

    check_digit(&digits[..9], &first_weights) == digits[9]
        && check_digit(&digits[..10], &second_weights) == digits[10]
}

/// Validate a CNPJ (company taxpayer id); punctuation is ignored.
pub fn is_valid_cnpj(value: &str) -> bool {
    let digits = only_digits(value);
    if digits.len() != 14 || all_same(&digits) {
        return false;
    }

    check_digit(&digits[..12], &CNPJ_FIRST_WEIGHTS) == digits[12]
        && check_digit(&digits[..13], &CNPJ_SECOND_WEIGHTS) == digits[13]
}

/// Punctuate a stored CPF (11 digits) or CNPJ (14 digits) for display.
/// Anything else is returned unchanged.
pub fn format_cnpj_or_cpf(value: &str) -> String {
    match value.len() {
        11 if value.chars().all(|c| c.is_ascii_digit()) => format!(
            "{}.{}.{}-{}",
            &value[0..3],
            &value[3..6],
            &value[6..9],
            &value[9..11]
        ),
        14 if value.chars().all(|c| c.is_ascii_digit()) => format!(
            "{}.{}.{}/{}-{}",
            &value[0..2],
            &value[2..5],
            &value[5..8],
            &value[8..12],
            &value[12..14]
        ),
        _ => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_cpf_with_and_without_punctuation() {
        assert!(is_valid_cpf("529.982.247-25"));
        assert!(is_valid_cpf("52998224725"));
        assert!(is_valid_cpf("111.444.777-35"));
    }

    #[test]
    fn invalid_cpf() {
        assert!(!is_valid_cpf("529.982.247-24"));
        assert!(!is_valid_cpf("111.111.111-11"));
        assert!(!is_valid_cpf("1234567890"));
        assert!(!is_valid_cpf(""));
    }

    #[test]
    fn valid_cnpj() {
        assert!(is_valid_cnpj("11.222.333/0001-81"));
        assert!(is_valid_cnpj("11222333000181"));
        assert!(is_valid_cnpj("12.533.380/0001-09"));
    }

    #[test]
    fn invalid_cnpj() {
        assert!(!is_valid_cnpj("11.222.333/0001-80"));
        assert!(!is_valid_cnpj("00000000000000"));
        assert!(!is_valid_cnpj("1122233300018"));
    }

    #[test]
    fn cpf_is_not_a_cnpj() {
        assert!(!is_valid_cnpj("52998224725"));
        assert!(!is_valid_cpf("11222333000181"));
    }

    #[test]
    fn formats_documents() {
        assert_eq!(format_cnpj_or_cpf("52998224725"), "529.982.247-25");
        assert_eq!(format_cnpj_or_cpf("11222333000181"), "11.222.333/0001-81");
        assert_eq!(format_cnpj_or_cpf("123"), "123");
    }
}
