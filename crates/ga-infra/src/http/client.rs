use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use super::routes::{self, Route};
use ga_core::normalize::normalize_object;
use ga_core::ports::{AdminApiPort, TokenSourcePort};
use ga_core::{
    AdminUser, ApiError, CacheScope, Credential, MutationIntent, QueryParams, RecordId,
    ResourceType,
};

/// `reqwest` implementation of [`AdminApiPort`].
///
/// Every request carries the bearer token from `tokens` when there is one.
/// Non-2xx responses become [`ApiError`] via the status code and error body.
pub struct HttpAdminApi {
    client: Client,
    base_url: String,
    tokens: Arc<dyn TokenSourcePort>,
}

impl HttpAdminApi {
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        tokens: Arc<dyn TokenSourcePort>,
    ) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            tokens,
        })
    }

    async fn send(&self, route: Route) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.base_url, route.path);
        let mut request = self.client.request(route.method.clone(), &url);
        if !route.query.is_empty() {
            request = request.query(&route.query);
        }
        if let Some(token) = self.tokens.bearer_token() {
            request = request.bearer_auth(token);
        }
        if let Some(body) = &route.body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            debug!(method = %route.method, path = %route.path, error = %e, "request failed");
            ApiError::Transport(e.to_string())
        })?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        debug!(method = %route.method, path = %route.path, status = status.as_u16(), "admin api");

        // Bodies that are not JSON degrade to null; the normalizer copes.
        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or_else(|_| Value::String(text))
        };

        if status.is_success() {
            Ok(body)
        } else {
            Err(ApiError::from_status(status.as_u16(), &body))
        }
    }
}

/// The user object from a login or `me` response, at any envelope depth.
fn user_from(body: &Value) -> Option<AdminUser> {
    let data = normalize_object(body);
    match data.get("user") {
        Some(user) => AdminUser::from_value(user),
        None => AdminUser::from_value(&Value::Object(data)),
    }
}

#[async_trait]
impl AdminApiPort for HttpAdminApi {
    async fn login(&self, email: &str, password: &str) -> Result<Credential, ApiError> {
        let body = self.send(routes::login(email, password)).await?;
        let data = normalize_object(&body);

        let access_token = data
            .get("accessToken")
            .or_else(|| data.get("token"))
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ApiError::Decode("login response has no access token".to_string()))?
            .to_string();
        let refresh_token = data
            .get("refreshToken")
            .and_then(Value::as_str)
            .map(str::to_string);
        let admin = user_from(&body)
            .ok_or_else(|| ApiError::Decode("login response has no user".to_string()))?;

        Ok(Credential {
            access_token,
            refresh_token,
            admin,
        })
    }

    async fn logout(&self, refresh_token: &str) -> Result<(), ApiError> {
        self.send(routes::logout(refresh_token)).await.map(|_| ())
    }

    async fn current_admin(&self) -> Result<AdminUser, ApiError> {
        let body = self.send(routes::me()).await?;
        user_from(&body).ok_or_else(|| ApiError::Decode("me response has no user".to_string()))
    }

    async fn list(&self, resource: ResourceType, params: &QueryParams) -> Result<Value, ApiError> {
        self.send(routes::list(resource, params)).await
    }

    async fn get(&self, resource: ResourceType, id: &RecordId) -> Result<Value, ApiError> {
        self.send(routes::get(resource, id)).await
    }

    async fn view(&self, scope: CacheScope, params: &QueryParams) -> Result<Value, ApiError> {
        self.send(routes::view(scope, params)).await
    }

    async fn mutate(&self, intent: &MutationIntent) -> Result<Value, ApiError> {
        let route = routes::mutation(intent).map_err(|e| ApiError::Validation {
            status: 400,
            message: e.to_string(),
        })?;
        self.send(route).await
    }
}
