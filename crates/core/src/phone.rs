use std::sync::OnceLock;

use regex::Regex;

/// Vietnamese mobile numbers: a `+84`/`84`/`0` prefix, a carrier digit in
/// {3, 5, 7, 8, 9}, then eight digits.
pub fn is_valid_vietnamese_phone_number(phone: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"^(\+84|84|0)[35789][0-9]{8}$").expect("phone regex is valid")
    });
    re.is_match(phone)
}

#[cfg(test)]
mod tests {
    use super::is_valid_vietnamese_phone_number;

    #[test]
    fn accepts_common_prefixes() {
        assert!(is_valid_vietnamese_phone_number("0912345678"));
        assert!(is_valid_vietnamese_phone_number("+84912345678"));
        assert!(is_valid_vietnamese_phone_number("84387654321"));
    }

    #[test]
    fn rejects_bad_carrier_digit_or_length() {
        assert!(!is_valid_vietnamese_phone_number("0112345678"));
        assert!(!is_valid_vietnamese_phone_number("091234567"));
        assert!(!is_valid_vietnamese_phone_number("09123456789"));
        assert!(!is_valid_vietnamese_phone_number("hello"));
        assert!(!is_valid_vietnamese_phone_number(""));
    }
}
