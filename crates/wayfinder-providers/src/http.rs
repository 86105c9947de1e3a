// crates/wayfinder-providers/src/http.rs
// ============================================================================
// Module: HTTP Entity Store
// Description: Entity store speaking a bounded JSON-over-HTTP contract.
// Purpose: Fetch entities and mutate relationships with strict limits.
// Dependencies: wayfinder-core, reqwest, serde_json, url
// ============================================================================

//! ## Overview
//! The HTTP store issues bounded requests against a backend exposing
//! `GET {base}/{kind}/{id}` for entity reads and `POST {base}/relationship`
//! for relationship mutations. It enforces scheme restrictions, host
//! allowlists, redirects disabled, and response size limits to preserve
//! fail-closed behavior.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::StatusCode;
use reqwest::redirect::Policy;
use url::Url;
use wayfinder_core::DomainEntity;
use wayfinder_core::EntityId;
use wayfinder_core::EntityKind;
use wayfinder_core::EntityStore;
use wayfinder_core::FetchError;
use wayfinder_core::MutationError;
use wayfinder_core::RelationshipLink;
use wayfinder_core::RelationshipMutation;
use wayfinder_core::RelationshipOp;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Configuration for the HTTP entity store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpStoreConfig {
    /// Base URL of the entity backend.
    pub base_url: Url,
    /// Allow cleartext HTTP (disabled by default).
    pub allow_http: bool,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Maximum response size allowed, in bytes.
    pub max_response_bytes: usize,
    /// Optional host allowlist.
    pub allowed_hosts: Option<BTreeSet<String>>,
    /// User agent string for outbound requests.
    pub user_agent: String,
}

impl HttpStoreConfig {
    /// Returns a config with default limits for the given base URL.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            allow_http: false,
            timeout_ms: 5_000,
            max_response_bytes: 1024 * 1024,
            allowed_hosts: None,
            user_agent: "wayfinder/0.1".to_string(),
        }
    }
}

// ============================================================================
// SECTION: Store Implementation
// ============================================================================

/// Entity store backed by a JSON-over-HTTP backend.
#[derive(Debug)]
pub struct HttpEntityStore {
    /// Store configuration, including limits and policy.
    config: HttpStoreConfig,
    /// HTTP client used for outbound requests.
    client: Client,
}

impl HttpEntityStore {
    /// Creates a new HTTP store with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Transport`] when the HTTP client cannot be
    /// created or the base URL violates the scheme/host policy.
    pub fn new(config: HttpStoreConfig) -> Result<Self, FetchError> {
        validate_url(&config.base_url, &config)?;
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(config.user_agent.clone())
            .redirect(Policy::none())
            .build()
            .map_err(|_| FetchError::Transport("http client build failed".to_string()))?;
        Ok(Self {
            config,
            client,
        })
    }

    /// Builds the entity URL for a kind and identifier.
    fn entity_url(&self, kind: EntityKind, id: &EntityId) -> Result<Url, FetchError> {
        let path = format!("{}/{}", kind.as_str(), id.as_str());
        self.config
            .base_url
            .join(&path)
            .map_err(|_| FetchError::Transport("invalid entity url".to_string()))
    }

    /// Builds the relationship mutation URL.
    fn relationship_url(&self) -> Result<Url, MutationError> {
        self.config
            .base_url
            .join("relationship")
            .map_err(|_| MutationError::Transport("invalid relationship url".to_string()))
    }
}

#[async_trait]
impl EntityStore for HttpEntityStore {
    async fn fetch_by_id(
        &self,
        kind: EntityKind,
        id: &EntityId,
    ) -> Result<DomainEntity, FetchError> {
        let url = self.entity_url(kind, id)?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|_| FetchError::Transport("http request failed".to_string()))?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound {
                kind,
                id: id.clone(),
            });
        }
        if !response.status().is_success() {
            return Err(FetchError::Transport(format!(
                "unexpected status {}",
                response.status().as_u16()
            )));
        }
        let body = response
            .bytes()
            .await
            .map_err(|_| FetchError::Transport("http body read failed".to_string()))?;
        if body.len() > self.config.max_response_bytes {
            return Err(FetchError::Transport("response exceeds size limit".to_string()));
        }
        let entity: DomainEntity = serde_json::from_slice(&body)
            .map_err(|_| FetchError::Transport("entity payload malformed".to_string()))?;
        if entity.kind() != kind {
            return Err(FetchError::Transport("entity kind mismatch".to_string()));
        }
        Ok(entity)
    }

    async fn mutate_relationship(
        &self,
        link: &RelationshipLink,
        op: RelationshipOp,
    ) -> Result<(), MutationError> {
        let url = self.relationship_url()?;
        let mutation = RelationshipMutation {
            employee_id: link.employee_id.clone(),
            profession_id: link.profession_id.clone(),
            op,
        };
        let response = self
            .client
            .post(url)
            .json(&mutation)
            .send()
            .await
            .map_err(|_| MutationError::Transport("http request failed".to_string()))?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(MutationError::LinkNotFound {
                employee_id: link.employee_id.clone(),
                profession_id: link.profession_id.clone(),
            });
        }
        if !response.status().is_success() {
            return Err(MutationError::Transport(format!(
                "unexpected status {}",
                response.status().as_u16()
            )));
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: URL Validation
// ============================================================================

/// Validates a URL against the scheme and host policy.
fn validate_url(url: &Url, config: &HttpStoreConfig) -> Result<(), FetchError> {
    match url.scheme() {
        "https" => {}
        "http" if config.allow_http => {}
        scheme => {
            return Err(FetchError::Transport(format!("scheme '{scheme}' not allowed")));
        }
    }
    if let Some(allowed) = &config.allowed_hosts {
        let host = url.host_str().unwrap_or("");
        if !allowed.contains(host) {
            return Err(FetchError::Transport(format!("host '{host}' not allowed")));
        }
    }
    Ok(())
}
