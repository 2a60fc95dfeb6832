//! Ownership token generation
//!
//! Tokens are version-4 shaped identifiers (`xxxxxxxx-xxxx-4xxx-yxxx-xxxxxxxxxxxx`)
//! built from the current timestamp mixed with a pseudo-random source. They
//! only need to be unique among concurrently live tokens for the same key;
//! they are not meant to be unpredictable.

use rand::Rng;

const TOKEN_TEMPLATE: &str = "xxxxxxxx-xxxx-4xxx-yxxx-xxxxxxxxxxxx";

/// Generate a fresh ownership token
pub fn generate_token() -> String {
    let mut rng = rand::rng();
    let mut seed = chrono::Utc::now().timestamp_millis().unsigned_abs();

    TOKEN_TEMPLATE
        .chars()
        .map(|c| match c {
            'x' | 'y' => {
                let nibble = (seed.wrapping_add(rng.random_range(0..16u64)) % 16) as u32;
                seed /= 16;
                // Variant nibble is restricted to 8..=b
                let nibble = if c == 'x' { nibble } else { (nibble & 0x3) | 0x8 };
                char::from_digit(nibble, 16).unwrap_or('0')
            }
            other => other,
        })
        .collect()
}

/// Whether `token` has the canonical dashed version-4 shape
pub fn is_well_formed(token: &str) -> bool {
    token.len() == TOKEN_TEMPLATE.len()
        && token
            .chars()
            .zip(TOKEN_TEMPLATE.chars())
            .all(|(actual, expected)| match expected {
                'x' => actual.is_ascii_hexdigit() && !actual.is_ascii_uppercase(),
                'y' => matches!(actual, '8' | '9' | 'a' | 'b'),
                fixed => actual == fixed,
            })
}
