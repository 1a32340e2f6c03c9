//! Short code generation.

use rand::Rng;

/// Length of every generated short code.
pub const CODE_LENGTH: usize = 7;

/// Alphabet codes are drawn from: `[a-zA-Z0-9]`, 62 symbols.
const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generates a random short code candidate.
///
/// Each character is drawn uniformly from [`CHARSET`], giving 62^7 (about
/// 3.5 × 10^12) possible codes. Uniqueness is not checked here; the store's
/// unique constraint decides.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code();
/// assert_eq!(code.len(), 7);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code() -> String {
    let mut rng = rand::rng();

    (0..CODE_LENGTH)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}

/// Returns true if `code` has the shape of a generated short code.
pub fn is_valid_code(code: &str) -> bool {
    code.len() == CODE_LENGTH && code.bytes().all(|b| b.is_ascii_alphanumeric())
}
