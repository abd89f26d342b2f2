//! JWT issuing and verification
//!
//! Two token classes are minted: a short-lived access token carrying the
//! owner's identity and role, and a long-lived refresh token carrying the
//! id only. Each class is signed with its own symmetric secret; a refresh
//! token can never authorize a request directly, it is only exchangeable
//! for a fresh access token.

use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

use crate::config::JwtConfig;
use crate::models::owner::{Owner, Role};

/// Claims embedded in an access token
#[derive(Debug, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Owner ID
    pub id: i64,
    /// Owner email
    pub email: String,
    /// Owner role
    pub role: Role,
    /// Issued at time
    pub iat: u64,
    /// Expiration time
    pub exp: u64,
}

/// Claims embedded in a refresh token
#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshClaims {
    /// Owner ID
    pub id: i64,
    /// Issued at time
    pub iat: u64,
    /// Expiration time
    pub exp: u64,
}

/// Token verification failure kinds, surfaced distinctly to the caller
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    /// Expiry elapsed
    #[error("Token expired")]
    Expired,
    /// Malformed token or bad signature
    #[error("Invalid token")]
    Invalid,
}

/// Token service for minting and validating both token classes
#[derive(Clone)]
pub struct TokenService {
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
    access_token_expiry: u64,
    refresh_token_expiry: u64,
}

impl TokenService {
    /// Initialize a new token service from JWT configuration
    pub fn new(config: &JwtConfig) -> Self {
        TokenService {
            access_encoding: EncodingKey::from_secret(config.access_secret.as_bytes()),
            access_decoding: DecodingKey::from_secret(config.access_secret.as_bytes()),
            refresh_encoding: EncodingKey::from_secret(config.refresh_secret.as_bytes()),
            refresh_decoding: DecodingKey::from_secret(config.refresh_secret.as_bytes()),
            access_token_expiry: config.access_token_expiry,
            refresh_token_expiry: config.refresh_token_expiry,
        }
    }

    /// Issue an access token for an owner
    pub fn issue_access_token(&self, owner: &Owner) -> Result<String, TokenError> {
        let now = unix_now();
        let claims = AccessClaims {
            id: owner.id,
            email: owner.email.clone(),
            role: owner.role,
            iat: now,
            exp: now + self.access_token_expiry,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.access_encoding)
            .map_err(|_| TokenError::Invalid)
    }

    /// Issue a refresh token for an owner
    pub fn issue_refresh_token(&self, owner: &Owner) -> Result<String, TokenError> {
        let now = unix_now();
        let claims = RefreshClaims {
            id: owner.id,
            iat: now,
            exp: now + self.refresh_token_expiry,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.refresh_encoding)
            .map_err(|_| TokenError::Invalid)
    }

    /// Verify an access token and return its claims
    pub fn verify_access_token(&self, token: &str) -> Result<AccessClaims, TokenError> {
        verify(token, &self.access_decoding)
    }

    /// Verify a refresh token and return its claims
    pub fn verify_refresh_token(&self, token: &str) -> Result<RefreshClaims, TokenError> {
        verify(token, &self.refresh_decoding)
    }

    /// Access token lifetime in seconds
    pub fn access_token_expiry(&self) -> u64 {
        self.access_token_expiry
    }

    /// Refresh token lifetime in seconds
    pub fn refresh_token_expiry(&self) -> u64 {
        self.refresh_token_expiry
    }
}

fn verify<C: serde::de::DeserializeOwned>(
    token: &str,
    key: &DecodingKey,
) -> Result<C, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;

    decode::<C>(token, key, &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Invalid,
        })
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before unix epoch")
        .as_secs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn test_owner() -> Owner {
        Owner {
            id: 1,
            name: "Owner".to_string(),
            email: "a@b.com".to_string(),
            password_hash: "hash".to_string(),
            bio: None,
            phone: None,
            picture: None,
            role: Role::Owner,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn service() -> TokenService {
        TokenService::new(&JwtConfig {
            access_secret: "access-secret-for-tests".to_string(),
            refresh_secret: "refresh-secret-for-tests".to_string(),
            access_token_expiry: 3600,
            refresh_token_expiry: 7200,
        })
    }

    #[test]
    fn test_access_token_round_trip() {
        let service = service();
        let token = service.issue_access_token(&test_owner()).unwrap();
        let claims = service.verify_access_token(&token).unwrap();

        assert_eq!(claims.id, 1);
        assert_eq!(claims.email, "a@b.com");
        assert_eq!(claims.role, Role::Owner);
        assert_eq!(claims.exp, claims.iat + 3600);
    }

    #[test]
    fn test_refresh_token_round_trip() {
        let service = service();
        let token = service.issue_refresh_token(&test_owner()).unwrap();
        let claims = service.verify_refresh_token(&token).unwrap();

        assert_eq!(claims.id, 1);
        assert_eq!(claims.exp, claims.iat + 7200);
    }

    #[test]
    fn test_refresh_token_is_not_an_access_token() {
        let service = service();
        let refresh = service.issue_refresh_token(&test_owner()).unwrap();
        // Different secret (and different claims): must not authorize.
        assert_eq!(
            service.verify_access_token(&refresh).unwrap_err(),
            TokenError::Invalid
        );
    }

    #[test]
    fn test_access_token_is_not_a_refresh_token() {
        let service = service();
        let access = service.issue_access_token(&test_owner()).unwrap();
        assert_eq!(
            service.verify_refresh_token(&access).unwrap_err(),
            TokenError::Invalid
        );
    }

    #[test]
    fn test_expired_token_is_distinguished_from_malformed() {
        let service = service();

        // jsonwebtoken applies a default 60s leeway, so hand-craft a
        // token that expired well in the past.
        let now = unix_now();
        let claims = AccessClaims {
            id: 1,
            email: "a@b.com".to_string(),
            role: Role::Owner,
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"access-secret-for-tests"),
        )
        .unwrap();

        assert_eq!(
            service.verify_access_token(&token).unwrap_err(),
            TokenError::Expired
        );
        assert_eq!(
            service.verify_access_token("garbage.token.here").unwrap_err(),
            TokenError::Invalid
        );
    }

    #[test]
    fn test_tampered_token_is_invalid() {
        let service = service();
        let mut token = service.issue_access_token(&test_owner()).unwrap();
        token.push('x');
        assert_eq!(
            service.verify_access_token(&token).unwrap_err(),
            TokenError::Invalid
        );
    }
}
