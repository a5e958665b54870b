/// Authentication service - JWT and password handling
use crate::error::{Result, ServerError};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use roster_core::UserId;
use serde::{Deserialize, Serialize};

#[derive(Clone)]
pub struct AuthService {
    secret: String,
    access_token_expiration: Option<Duration>,
    refresh_token_expiration: Option<Duration>,
    hash_cost: u32,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("access_token_expiration", &self.access_token_expiration)
            .field("refresh_token_expiration", &self.refresh_token_expiration)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (user ID)
    pub exp: i64,    // Expiration time
    pub iat: i64,    // Issued at
    pub token_type: TokenType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

impl AuthService {
    pub fn new(secret: String, access_expiration_hours: u64, refresh_expiration_days: u64) -> Self {
        Self {
            secret,
            access_token_expiration: i64::try_from(access_expiration_hours)
                .ok()
                .and_then(Duration::try_hours),
            refresh_token_expiration: i64::try_from(refresh_expiration_days)
                .ok()
                .and_then(Duration::try_days),
            hash_cost: bcrypt::DEFAULT_COST,
        }
    }

    /// Use a different bcrypt cost (tests use the minimum to stay fast)
    #[must_use]
    pub fn with_hash_cost(mut self, cost: u32) -> Self {
        self.hash_cost = cost;
        self
    }

    /// Hash a password using bcrypt
    pub fn hash_password(&self, password: &str) -> Result<String> {
        bcrypt::hash(password, self.hash_cost).map_err(ServerError::from)
    }

    /// Verify a password against a hash
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool> {
        bcrypt::verify(password, hash).map_err(ServerError::from)
    }

    /// Create an access token
    pub fn create_access_token(&self, user_id: UserId) -> Result<String> {
        self.create_token(user_id, TokenType::Access, self.access_token_expiration)
    }

    /// Create a refresh token
    pub fn create_refresh_token(&self, user_id: UserId) -> Result<String> {
        self.create_token(user_id, TokenType::Refresh, self.refresh_token_expiration)
    }

    /// Verify and decode a token
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let decoding_key = DecodingKey::from_secret(self.secret.as_bytes());
        let validation = Validation::default();

        let token_data = decode::<Claims>(token, &decoding_key, &validation)?;
        Ok(token_data.claims)
    }

    /// Verify that a token is an access token
    pub fn verify_access_token(&self, token: &str) -> Result<UserId> {
        self.verify_typed(token, TokenType::Access)
    }

    /// Verify that a token is a refresh token
    pub fn verify_refresh_token(&self, token: &str) -> Result<UserId> {
        self.verify_typed(token, TokenType::Refresh)
    }

    fn verify_typed(&self, token: &str, expected: TokenType) -> Result<UserId> {
        let claims = self.verify_token(token)?;
        if claims.token_type != expected {
            return Err(ServerError::Auth("Invalid token type".to_string()));
        }
        claims
            .sub
            .parse::<UserId>()
            .map_err(|_| ServerError::Auth("Invalid token subject".to_string()))
    }

    fn create_token(
        &self,
        user_id: UserId,
        token_type: TokenType,
        expiration: Option<Duration>,
    ) -> Result<String> {
        let now = Utc::now();
        let exp = expiration
            .and_then(|expiration| now.checked_add_signed(expiration))
            .ok_or_else(|| ServerError::Config("Token expiration out of range".to_string()))?;

        let claims = Claims {
            sub: user_id.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            token_type,
        };

        let encoding_key = EncodingKey::from_secret(self.secret.as_bytes());
        encode(&Header::default(), &claims, &encoding_key).map_err(ServerError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth() -> AuthService {
        AuthService::new("secret".to_string(), 24, 30).with_hash_cost(4)
    }

    #[test]
    fn test_password_hashing() {
        let auth = auth();
        let password = "my_secure_password";

        let hash = auth.hash_password(password).unwrap();
        assert!(auth.verify_password(password, &hash).unwrap());
        assert!(!auth.verify_password("wrong_password", &hash).unwrap());
    }

    #[test]
    fn test_token_creation_and_verification() {
        let auth = auth();

        let access_token = auth.create_access_token(42).unwrap();
        assert_eq!(auth.verify_access_token(&access_token).unwrap(), 42);

        let refresh_token = auth.create_refresh_token(42).unwrap();
        assert_eq!(auth.verify_refresh_token(&refresh_token).unwrap(), 42);
    }

    #[test]
    fn test_token_type_validation() {
        let auth = auth();

        let access_token = auth.create_access_token(1).unwrap();
        assert!(auth.verify_refresh_token(&access_token).is_err());

        let refresh_token = auth.create_refresh_token(1).unwrap();
        assert!(auth.verify_access_token(&refresh_token).is_err());
    }

    #[test]
    fn test_out_of_range_expiration_is_an_error() {
        let auth = AuthService::new("secret".to_string(), 1, 200_000_000).with_hash_cost(4);
        assert!(matches!(auth.create_refresh_token(1), Err(ServerError::Config(_))));
        assert!(auth.create_access_token(1).is_ok());

        let auth = AuthService::new("secret".to_string(), u64::MAX, 1).with_hash_cost(4);
        assert!(matches!(auth.create_access_token(1), Err(ServerError::Config(_))));
    }

    #[test]
    fn test_debug_hides_secret() {
        let debug = format!("{:?}", auth());
        assert!(!debug.contains("\"secret\""));
        assert!(debug.contains("AuthService"));
    }
}
