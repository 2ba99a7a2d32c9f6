//! Password hashing for dirview.
//!
//! Understands the `{SCHEME}` prefixed values directory servers keep in
//! `userPassword`, so callers can tell whether a freshly entered plaintext
//! is the same password as the stored hash without rewriting it.

mod error;
mod password;

pub use error::{CryptoError, CryptoResult};
pub use password::{
    hash_password, hash_password_with_salt, scheme_tag, verify_password, PasswordScheme,
    StoredPassword, SALT_SIZE,
};
