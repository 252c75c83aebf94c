//! Firebase ID-token verification for social login.
//!
//! Google rotates the signing keys; they are fetched on first use and cached for as long
//! as the key endpoint's `Cache-Control: max-age` allows. A token naming an unknown key
//! triggers at most one refetch per `MIN_REFRESH_INTERVAL`.

use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};

use async_trait::async_trait;
use jsonwebtoken::{decode, decode_header, jwk::JwkSet, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::server::{
    config::FirebaseConfig,
    error::{auth::AuthError, AppError},
};

/// Used when the key endpoint sends no usable max-age.
const DEFAULT_KEY_TTL: Duration = Duration::from_secs(3600);

/// Minimum age of the cached key set before an unknown key id may refetch it.
const MIN_REFRESH_INTERVAL: Duration = Duration::from_secs(60);

/// Identity asserted by a verified provider token.
#[derive(Debug, Clone, PartialEq)]
pub struct SocialIdentity {
    pub uid: String,
    pub email: Option<String>,
    pub email_verified: bool,
    pub name: Option<String>,
    pub phone_number: Option<String>,
}

#[async_trait]
pub trait IdTokenVerifier: Send + Sync {
    /// # Returns
    /// - `Ok(SocialIdentity)` - Token is authentic and current
    /// - `Err(AppError::AuthErr)` - Token is malformed, expired or not issued for this project
    /// - `Err(AppError::ReqwestErr)` - Signing keys could not be fetched
    async fn verify(&self, id_token: &str) -> Result<SocialIdentity, AppError>;
}

#[derive(Deserialize)]
struct FirebaseClaims {
    sub: String,
    email: Option<String>,
    #[serde(default)]
    email_verified: bool,
    name: Option<String>,
    phone_number: Option<String>,
}

/// Fetches the current signing keys and how long they may be cached.
#[async_trait]
trait KeySource: Send + Sync {
    async fn fetch(&self) -> Result<(HashMap<String, DecodingKey>, Duration), AppError>;
}

/// Google's JWKS endpoint.
struct JwksEndpoint {
    http: reqwest::Client,
    url: String,
}

#[async_trait]
impl KeySource for JwksEndpoint {
    async fn fetch(&self) -> Result<(HashMap<String, DecodingKey>, Duration), AppError> {
        let response = self.http.get(&self.url).send().await?.error_for_status()?;

        let ttl = response
            .headers()
            .get(reqwest::header::CACHE_CONTROL)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_max_age)
            .unwrap_or(DEFAULT_KEY_TTL);

        let set: JwkSet = response.json().await?;
        let keys = set
            .keys
            .iter()
            .filter_map(|jwk| {
                let kid = jwk.common.key_id.clone()?;
                DecodingKey::from_jwk(jwk).ok().map(|key| (kid, key))
            })
            .collect::<HashMap<_, _>>();

        Ok((keys, ttl))
    }
}

struct CachedKeys {
    keys: HashMap<String, DecodingKey>,
    fetched_at: Instant,
    expires_at: Instant,
}

#[derive(Clone)]
pub struct FirebaseVerifier {
    config: FirebaseConfig,
    source: Arc<dyn KeySource>,
    keys: Arc<RwLock<Option<CachedKeys>>>,
}

impl FirebaseVerifier {
    pub fn new(http: reqwest::Client, config: FirebaseConfig) -> Self {
        let source = JwksEndpoint {
            http,
            url: config.jwks_url.clone(),
        };
        Self::with_source(config, Arc::new(source))
    }

    fn with_source(config: FirebaseConfig, source: Arc<dyn KeySource>) -> Self {
        Self {
            config,
            source,
            keys: Arc::new(RwLock::new(None)),
        }
    }

    /// Looks up the decoding key for `kid`, refreshing the cache when it is empty or
    /// expired, or when it does not know the key id and is older than
    /// `MIN_REFRESH_INTERVAL`.
    async fn key_for(&self, kid: &str) -> Result<DecodingKey, AppError> {
        {
            let cache = self.keys.read().await;
            if let Some(cached) = cache.as_ref() {
                if cached.expires_at > Instant::now() {
                    if let Some(key) = cached.keys.get(kid) {
                        return Ok(key.clone());
                    }
                }
            }
        }

        // Held across the fetch so concurrent misses wait for one refresh.
        let mut cache = self.keys.write().await;
        let now = Instant::now();
        if let Some(cached) = cache.as_ref() {
            if cached.expires_at > now {
                if let Some(key) = cached.keys.get(kid) {
                    return Ok(key.clone());
                }
                if now.duration_since(cached.fetched_at) < MIN_REFRESH_INTERVAL {
                    return Err(unknown_key(kid));
                }
            }
        }

        let (keys, ttl) = self.source.fetch().await?;
        tracing::debug!("Fetched {} Firebase signing keys, caching for {:?}", keys.len(), ttl);
        let key = keys.get(kid).cloned();
        let fetched_at = Instant::now();
        *cache = Some(CachedKeys {
            keys,
            fetched_at,
            expires_at: fetched_at + ttl,
        });

        key.ok_or_else(|| unknown_key(kid))
    }
}

fn unknown_key(kid: &str) -> AppError {
    AuthError::InvalidToken(format!("unknown signing key {kid}")).into()
}

#[async_trait]
impl IdTokenVerifier for FirebaseVerifier {
    async fn verify(&self, id_token: &str) -> Result<SocialIdentity, AppError> {
        let header =
            decode_header(id_token).map_err(|e| AuthError::InvalidToken(e.to_string()))?;
        if header.alg != Algorithm::RS256 {
            return Err(AuthError::InvalidToken("unexpected algorithm".to_string()).into());
        }
        let kid = header
            .kid
            .ok_or_else(|| AuthError::InvalidToken("missing key id".to_string()))?;
        let key = self.key_for(&kid).await?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[&self.config.project_id]);
        validation.set_issuer(&[format!(
            "https://securetoken.google.com/{}",
            self.config.project_id
        )]);

        let claims = decode::<FirebaseClaims>(id_token, &key, &validation)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?
            .claims;

        if claims.sub.is_empty() {
            return Err(AuthError::InvalidToken("empty subject".to_string()).into());
        }

        Ok(SocialIdentity {
            uid: claims.sub,
            email: claims.email,
            email_verified: claims.email_verified,
            name: claims.name,
            phone_number: claims.phone_number,
        })
    }
}

/// Extracts `max-age` from a `Cache-Control` header value.
fn parse_max_age(value: &str) -> Option<Duration> {
    value.split(',').find_map(|directive| {
        let (name, seconds) = directive.trim().split_once('=')?;
        if name.trim().eq_ignore_ascii_case("max-age") {
            seconds.trim().parse::<u64>().ok().map(Duration::from_secs)
        } else {
            None
        }
    })
}
