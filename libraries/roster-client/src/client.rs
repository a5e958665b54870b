//! Main Roster client.

use crate::error::{ClientError, Result};
use crate::types::{ClientConfig, Envelope, LoginRequest, LoginResponse, UsersData};
use reqwest::{Client, RequestBuilder, StatusCode};
use roster_core::{CreateUser, User, UserId};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Client for the Roster users API.
///
/// Cheap to clone; clones share the stored access token.
#[derive(Debug, Clone)]
pub struct RosterClient {
    http: Client,
    config: Arc<RwLock<ClientConfig>>,
}

impl RosterClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        if config.url.is_empty() {
            return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
        }

        let url = config.url.trim_end_matches('/').to_string();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }
        url::Url::parse(&url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("roster-client/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            config: Arc::new(RwLock::new(ClientConfig {
                url,
                access_token: config.access_token,
            })),
        })
    }

    /// Get the service URL.
    pub async fn url(&self) -> String {
        self.config.read().await.url.clone()
    }

    /// Check if the client has an access token.
    pub async fn is_authenticated(&self) -> bool {
        self.config.read().await.access_token.is_some()
    }

    /// Forget the stored access token.
    pub async fn logout(&self) {
        self.config.write().await.access_token = None;
        info!("Logged out");
    }

    /// `GET /users/ping`; returns the service message.
    pub async fn ping(&self) -> Result<String> {
        let url = format!("{}/users/ping", self.url().await);
        let envelope: Envelope<serde_json::Value> = self.send(self.http.get(&url)).await?;
        Ok(envelope.message.unwrap_or_default())
    }

    /// `GET /users`; users in the order the service lists them.
    pub async fn list_users(&self) -> Result<Vec<User>> {
        let url = format!("{}/users", self.url().await);
        debug!(url = %url, "Fetching users");

        let envelope: Envelope<UsersData> = self.send(self.http.get(&url)).await?;
        let users = envelope
            .data
            .ok_or_else(|| ClientError::ParseError("missing users data".into()))?
            .users;

        debug!(count = users.len(), "Fetched users");
        Ok(users)
    }

    /// `GET /users/:id`.
    pub async fn get_user(&self, id: UserId) -> Result<User> {
        let url = format!("{}/users/{}", self.url().await, id);

        let envelope: Envelope<User> = match self.send(self.http.get(&url)).await {
            Err(ClientError::Api { status: 404, .. }) => {
                return Err(ClientError::NotFound(id.to_string()))
            }
            other => other?,
        };

        envelope
            .data
            .ok_or_else(|| ClientError::ParseError("missing user data".into()))
    }

    /// `POST /users`; returns the confirmation message.
    pub async fn add_user(&self, user: &CreateUser) -> Result<String> {
        let url = format!("{}/users", self.url().await);
        debug!(url = %url, username = %user.username, "Adding user");

        let envelope: Envelope<serde_json::Value> =
            self.send(self.http.post(&url).json(user)).await?;
        Ok(envelope.message.unwrap_or_default())
    }

    /// `POST /auth/login`. On success the access token is kept for
    /// subsequent authenticated calls.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse> {
        let url = format!("{}/auth/login", self.url().await);
        debug!(url = %url, username = %username, "Attempting login");

        let request = self
            .http
            .post(&url)
            .json(&LoginRequest { username, password });

        let envelope: Envelope<LoginResponse> = match self.send(request).await {
            Err(ClientError::Api {
                status: 401,
                message,
            }) => {
                warn!(username = %username, "Login rejected");
                return Err(ClientError::AuthFailed(message));
            }
            other => other?,
        };

        let tokens = envelope
            .data
            .ok_or_else(|| ClientError::ParseError("missing token data".into()))?;

        self.config.write().await.access_token = Some(tokens.access_token.clone());
        info!(username = %username, "Login successful");

        Ok(tokens)
    }

    /// `GET /auth/status`; the user owning the stored token.
    pub async fn status(&self) -> Result<User> {
        let config = self.config.read().await;
        let token = config
            .access_token
            .clone()
            .ok_or(ClientError::AuthRequired)?;
        let url = format!("{}/auth/status", config.url);
        drop(config);

        let envelope: Envelope<User> =
            match self.send(self.http.get(&url).bearer_auth(token)).await {
                Err(ClientError::Api {
                    status: 401,
                    message,
                }) => return Err(ClientError::AuthFailed(message)),
                other => other?,
            };

        envelope
            .data
            .ok_or_else(|| ClientError::ParseError("missing user data".into()))
    }

    /// Send a request and decode the envelope, turning failures into
    /// [`ClientError::Api`] with the envelope message when there is one.
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<Envelope<T>> {
        let response = request.send().await.map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                ClientError::ServerUnreachable(e.to_string())
            } else {
                ClientError::Request(e)
            }
        })?;

        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            return serde_json::from_str(&body)
                .map_err(|e| ClientError::ParseError(format!("{}: {}", e, body)));
        }

        let message = serde_json::from_str::<Envelope<serde_json::Value>>(&body)
            .ok()
            .and_then(|envelope| envelope.message)
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            });

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            warn!(status = %status, message = %message, "Service error");
        }

        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}
