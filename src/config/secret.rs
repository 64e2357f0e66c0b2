//! Gateway credentials
//!
//! A model server behind an authenticating proxy needs a bearer token.
//! [`ApiToken`] keeps it in a [`secrecy::Secret`], so the value is zeroed on
//! drop and never shows up in `Debug` output or logs. Use
//! [`ApiToken::fingerprint`] when a log line needs to tell tokens apart.
//!
//! ```rust
//! use sniffnmask::config::ApiToken;
//!
//! let token = ApiToken::new("sk-local").unwrap();
//! assert_eq!(token.bearer(), "sk-local");
//! assert!(!format!("{token:?}").contains("sk-local"));
//! assert!(ApiToken::new("  ").is_none());
//! ```

use secrecy::{CloneableSecret, DebugSecret, ExposeSecret, Secret};
use serde::{Deserialize, Deserializer};
use sha2::{Digest, Sha256};
use zeroize::Zeroize;

#[derive(Clone, Zeroize)]
#[zeroize(drop)]
struct TokenText(String);

impl CloneableSecret for TokenText {}
impl DebugSecret for TokenText {}

/// Bearer token for a model gateway
#[derive(Clone, Debug)]
pub struct ApiToken(Secret<TokenText>);

impl ApiToken {
    /// Wrap a token value; blank input means "no token"
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return None;
        }
        Some(Self(Secret::new(TokenText(value))))
    }

    /// Raw value for the `Authorization` header
    pub fn bearer(&self) -> &str {
        &self.0.expose_secret().0
    }

    /// First 8 hex digits of the token's SHA-256
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.bearer().as_bytes());
        digest.iter().take(4).map(|b| format!("{b:02x}")).collect()
    }
}

/// Deserialize an optional token, mapping a blank string to `None`
pub(crate) fn deserialize_token<'de, D>(deserializer: D) -> Result<Option<ApiToken>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.and_then(ApiToken::new))
}
