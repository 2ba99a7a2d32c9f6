//! RFC 2307 style `userPassword` values.
//!
//! Stored values look like `{SSHA}base64(digest || salt)`. A value without a
//! `{SCHEME}` prefix is cleartext.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use rand::RngCore;
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha384, Sha512};
use std::fmt;
use std::str::FromStr;
use subtle::ConstantTimeEq;
use tracing::debug;

use crate::error::{CryptoError, CryptoResult};

/// Salt length used when hashing new passwords.
pub const SALT_SIZE: usize = 8;

/// A password storage scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PasswordScheme {
    Clear,
    Sha,
    Ssha,
    Sha256,
    Ssha256,
    Sha384,
    Ssha384,
    Sha512,
    Ssha512,
}

impl PasswordScheme {
    /// Every scheme this crate can compute.
    pub fn all() -> &'static [PasswordScheme] {
        &[
            Self::Clear,
            Self::Sha,
            Self::Ssha,
            Self::Sha256,
            Self::Ssha256,
            Self::Sha384,
            Self::Ssha384,
            Self::Sha512,
            Self::Ssha512,
        ]
    }

    /// The tag written between braces.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Clear => "CLEAR",
            Self::Sha => "SHA",
            Self::Ssha => "SSHA",
            Self::Sha256 => "SHA256",
            Self::Ssha256 => "SSHA256",
            Self::Sha384 => "SHA384",
            Self::Ssha384 => "SSHA384",
            Self::Sha512 => "SHA512",
            Self::Ssha512 => "SSHA512",
        }
    }

    pub fn is_salted(&self) -> bool {
        matches!(
            self,
            Self::Ssha | Self::Ssha256 | Self::Ssha384 | Self::Ssha512
        )
    }

    fn digest_len(&self) -> usize {
        match self {
            Self::Clear => 0,
            Self::Sha | Self::Ssha => 20,
            Self::Sha256 | Self::Ssha256 => 32,
            Self::Sha384 | Self::Ssha384 => 48,
            Self::Sha512 | Self::Ssha512 => 64,
        }
    }

    fn digest(&self, plaintext: &[u8], salt: &[u8]) -> Vec<u8> {
        fn run<D: Digest>(plaintext: &[u8], salt: &[u8]) -> Vec<u8> {
            let mut hasher = D::new();
            hasher.update(plaintext);
            hasher.update(salt);
            hasher.finalize().to_vec()
        }

        match self {
            Self::Clear => plaintext.to_vec(),
            Self::Sha | Self::Ssha => run::<Sha1>(plaintext, salt),
            Self::Sha256 | Self::Ssha256 => run::<Sha256>(plaintext, salt),
            Self::Sha384 | Self::Ssha384 => run::<Sha384>(plaintext, salt),
            Self::Sha512 | Self::Ssha512 => run::<Sha512>(plaintext, salt),
        }
    }
}

impl fmt::Display for PasswordScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for PasswordScheme {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|scheme| scheme.tag().eq_ignore_ascii_case(s))
            .ok_or_else(|| CryptoError::UnknownScheme(s.to_string()))
    }
}

/// Splits `{TAG}rest` into `(Some("TAG"), "rest")`; anything else is `(None, value)`.
fn split_scheme(value: &str) -> (Option<&str>, &str) {
    if let Some(rest) = value.strip_prefix('{')
        && let Some(end) = rest.find('}')
    {
        return (Some(&rest[..end]), &rest[end + 1..]);
    }
    (None, value)
}

/// Returns the scheme tag of a stored value as written (`"SSHA"`, `"CRYPT"`),
/// or `None` for cleartext.
pub fn scheme_tag(stored: &str) -> Option<&str> {
    split_scheme(stored).0
}

/// A parsed stored password.
#[derive(Clone, PartialEq, Eq)]
pub struct StoredPassword {
    scheme: PasswordScheme,
    digest: Vec<u8>,
    salt: Vec<u8>,
}

impl StoredPassword {
    /// Parses a stored `userPassword` value.
    pub fn parse(stored: &str) -> CryptoResult<Self> {
        let (tag, body) = split_scheme(stored);
        let scheme = match tag {
            None => {
                return Ok(Self {
                    scheme: PasswordScheme::Clear,
                    digest: stored.as_bytes().to_vec(),
                    salt: Vec::new(),
                });
            }
            Some(tag) => tag.parse::<PasswordScheme>()?,
        };

        if scheme == PasswordScheme::Clear {
            return Ok(Self {
                scheme,
                digest: body.as_bytes().to_vec(),
                salt: Vec::new(),
            });
        }

        let decoded = BASE64.decode(body.trim())?;
        let expected = scheme.digest_len();
        let valid_len = if scheme.is_salted() {
            decoded.len() >= expected
        } else {
            decoded.len() == expected
        };
        if !valid_len {
            return Err(CryptoError::InvalidHashLength {
                scheme: scheme.tag(),
                expected,
                actual: decoded.len(),
            });
        }

        let (digest, salt) = decoded.split_at(expected);
        Ok(Self {
            scheme,
            digest: digest.to_vec(),
            salt: salt.to_vec(),
        })
    }

    pub fn scheme(&self) -> PasswordScheme {
        self.scheme
    }

    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    /// Whether `plaintext` hashes to this stored value under its own scheme
    /// and salt.
    pub fn matches(&self, plaintext: &str) -> bool {
        let candidate = self.scheme.digest(plaintext.as_bytes(), &self.salt);
        candidate.ct_eq(&self.digest).into()
    }
}

impl fmt::Debug for StoredPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredPassword")
            .field("scheme", &self.scheme)
            .field("digest", &"[REDACTED]")
            .finish()
    }
}

/// Hashes `plaintext` under `scheme`, generating a fresh salt for salted schemes.
pub fn hash_password(scheme: PasswordScheme, plaintext: &str) -> String {
    let salt = if scheme.is_salted() {
        let mut bytes = [0u8; SALT_SIZE];
        rand::rngs::OsRng.fill_bytes(&mut bytes);
        bytes.to_vec()
    } else {
        Vec::new()
    };
    hash_password_with_salt(scheme, plaintext, &salt)
}

/// Hashes `plaintext` under `scheme` with an explicit salt.
///
/// The salt is ignored by unsalted schemes.
pub fn hash_password_with_salt(scheme: PasswordScheme, plaintext: &str, salt: &[u8]) -> String {
    if scheme == PasswordScheme::Clear {
        return format!("{{{}}}{}", scheme.tag(), plaintext);
    }

    let salt = if scheme.is_salted() { salt } else { &[][..] };
    let mut raw = scheme.digest(plaintext.as_bytes(), salt);
    raw.extend_from_slice(salt);
    format!("{{{}}}{}", scheme.tag(), BASE64.encode(raw))
}

/// Checks `plaintext` against a stored value.
///
/// Fails only when the stored value cannot be interpreted (unknown scheme,
/// corrupt encoding); a mismatch is `Ok(false)`.
pub fn verify_password(stored: &str, plaintext: &str) -> CryptoResult<bool> {
    let parsed = StoredPassword::parse(stored).inspect_err(|e| {
        debug!(error = %e, "stored password cannot be verified");
    })?;
    Ok(parsed.matches(plaintext))
}
