use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque bearer credential for the gateway's protected endpoints.
///
/// The core never inspects the token; it is attached verbatim to requests.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for AuthToken {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<&str> for AuthToken {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

// Credential never appears in logs
impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "AuthToken(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_credential() {
        let token = AuthToken::new("secret-jwt");
        assert_eq!(format!("{:?}", token), "AuthToken(..)");
        assert_eq!(token.as_str(), "secret-jwt");
    }
}
