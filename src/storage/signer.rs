use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use super::traits::{SignedUrl, UrlSigner};
use crate::config::SigningConfig;
use crate::utils::error::ResolutionError;

/// Claims carried by an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    pub bkt: String,
    pub key: String,
    pub iat: i64,
    pub exp: i64,
}

/// Signs access URLs as `{base}/{bucket}/{key}?token=<HS256 JWT>`.
pub struct TokenUrlSigner {
    base_url: Url,
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenUrlSigner {
    pub fn new(base_url: &str, secret: &str) -> Result<Self, ResolutionError> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(ResolutionError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase));
        }

        Ok(Self {
            base_url,
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        })
    }

    pub fn from_config(config: &SigningConfig) -> Result<Self, ResolutionError> {
        Self::new(&config.public_base_url, &config.secret_key)
    }

    /// Checks signature and expiry of a token issued by this signer.
    pub fn verify(&self, token: &str) -> Result<AccessClaims, ResolutionError> {
        let data = decode::<AccessClaims>(token, &self.decoding, &Validation::new(Algorithm::HS256))?;
        Ok(data.claims)
    }

    fn object_url(&self, bucket: &str, key: &str) -> Result<Url, ResolutionError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ResolutionError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .push(bucket)
            .extend(key.split('/'));
        Ok(url)
    }
}

#[async_trait]
impl UrlSigner for TokenUrlSigner {
    async fn sign(&self, bucket: &str, key: &str, ttl: Duration) -> Result<SignedUrl, ResolutionError> {
        if key.trim().is_empty() {
            return Err(ResolutionError::EmptyKey);
        }

        let ttl = chrono::Duration::from_std(ttl).map_err(|e| ResolutionError::InvalidTtl(e.to_string()))?;
        let issued_at = Utc::now();
        let expires_at = issued_at
            .checked_add_signed(ttl)
            .ok_or_else(|| ResolutionError::InvalidTtl("expiry out of range".to_string()))?;

        let claims = AccessClaims {
            bkt: bucket.to_string(),
            key: key.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?;

        let mut url = self.object_url(bucket, key)?;
        url.query_pairs_mut().append_pair("token", &token);

        Ok(SignedUrl {
            url: url.to_string(),
            expires_at,
        })
    }
}
