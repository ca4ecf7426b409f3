//! Structural checks for account and bank identifiers

/// IBAN check (ISO 13616): length, country prefix, check digits and the
/// mod-97 checksum. Expects input without spaces.
pub fn is_valid_iban(iban: &str) -> bool {
    let len = iban.len();
    if !(15..=34).contains(&len) || !iban.chars().all(|c| c.is_ascii_alphanumeric()) {
        return false;
    }

    let bytes = iban.as_bytes();
    if !bytes[..2].iter().all(u8::is_ascii_uppercase) || !bytes[2..4].iter().all(u8::is_ascii_digit) {
        return false;
    }

    // Move country code and check digits to the end, expand letters to 10..=35
    let mut remainder: u32 = 0;
    for c in iban[4..].chars().chain(iban[..4].chars()) {
        let value = match c.to_digit(36) {
            Some(v) => v,
            None => return false,
        };
        remainder = if value >= 10 {
            (remainder * 100 + value) % 97
        } else {
            (remainder * 10 + value) % 97
        };
    }

    remainder == 1
}

/// BIC check (ISO 9362): 4 letter institution code, 2 letter country code,
/// 2 alphanumeric location code and an optional 3 alphanumeric branch code.
pub fn is_valid_bic(bic: &str) -> bool {
    let len = bic.len();
    if len != 8 && len != 11 {
        return false;
    }

    let bytes = bic.as_bytes();
    bytes[..6].iter().all(u8::is_ascii_uppercase)
        && bytes[6..].iter().all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
}
