//! Short code generation utilities.
//!
//! Codes are drawn uniformly from a 62-symbol alphanumeric alphabet. The
//! generator makes no uniqueness promise; that is the job of
//! [`crate::application::services::LinkService`].

use rand::Rng;

/// Symbols a generated code may contain.
pub const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Default length of a generated code.
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Path segments served by fixed routes.
///
/// A generated code equal to one of these would be shadowed by the route,
/// so the allocator discards it like a collision.
const RESERVED_CODES: &[&str] = &["health", "urls"];

/// Source of candidate short codes.
///
/// Implementations are pure and never touch storage.
pub trait CodeGenerator: Send + Sync {
    /// Produces a candidate code.
    fn generate(&self) -> String;
}

/// Generates fixed-length codes from [`ALPHABET`] using the thread-local RNG.
#[derive(Debug, Clone, Copy)]
pub struct RandomCodeGenerator {
    length: usize,
}

impl RandomCodeGenerator {
    /// Creates a generator producing codes of `length` characters.
    pub fn new(length: usize) -> Self {
        Self { length }
    }

    /// Length of every code this generator produces.
    pub fn length(&self) -> usize {
        self.length
    }
}

impl Default for RandomCodeGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_CODE_LENGTH)
    }
}

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> String {
        generate_code(self.length)
    }
}

/// Generates a random code of `length` characters.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code(6);
/// assert_eq!(code.len(), 6);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code(length: usize) -> String {
    let mut rng = rand::rng();

    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..ALPHABET.len());
            ALPHABET[idx] as char
        })
        .collect()
}

/// Returns true if `code` would be shadowed by a fixed route.
pub fn is_reserved(code: &str) -> bool {
    RESERVED_CODES.contains(&code)
}

/// Returns true if `code` uses only symbols from [`ALPHABET`].
pub fn is_valid_code(code: &str) -> bool {
    !code.is_empty() && code.bytes().all(|b| ALPHABET.contains(&b))
}
