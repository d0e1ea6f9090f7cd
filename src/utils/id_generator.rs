//! Shortlink id generation.
//!
//! Ids are drawn uniformly, with replacement, from a fixed 62-symbol alphabet using
//! the thread-local CSPRNG. At the default length of 7 there are 62^7 (about 3.5e12)
//! possible ids. A collision is not detected here: the store's primary key rejects
//! the insert and the creation pipeline retries with a fresh id.

use rand::Rng;

/// Symbols used in shortlink ids. The order is fixed but otherwise arbitrary.
pub const ID_ALPHABET: &[u8; 62] = b"1234567890AaBbCcDdEeFfGgHhIiJjKkLlMmNnOoPpQqRrSsTtUuVvWwXxYyZz";

/// Length of generated ids.
pub const DEFAULT_ID_LENGTH: usize = 7;

/// Generates a random id of `length` symbols from [`ID_ALPHABET`].
///
/// # Examples
///
/// ```ignore
/// let id = generate_id(7);
/// assert_eq!(id.len(), 7);
/// assert!(is_valid_id(&id));
/// ```
pub fn generate_id(length: usize) -> String {
    let mut rng = rand::rng();

    (0..length)
        .map(|_| ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())] as char)
        .collect()
}

/// Returns true if `id` is non-empty and uses only [`ID_ALPHABET`] symbols.
pub fn is_valid_id(id: &str) -> bool {
    !id.is_empty() && id.bytes().all(|b| ID_ALPHABET.contains(&b))
}
