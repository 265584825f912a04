use std::{sync::Arc, time::Duration};

use api_types::{
    analytics::AnalyticsData,
    auth::{AccessToken, LoginRequest, TokenPair, TokenRefresh, User},
    budget::BudgetOverview,
    stats::DashboardStats,
    transaction::{TransactionListParams, TransactionPage},
};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;

use crate::{
    config::ApiConfig,
    error::{ClientError, Result},
    store::TokenStore,
};

/// Client for the hosted FinTrack REST API.
///
/// Owns the HTTP stack and the durable token store. Every request attaches
/// the current bearer token (token endpoints excepted) and recovers from a
/// single 401 by refreshing the access token and retrying once; an
/// unrecoverable 401 wipes the stored session and surfaces
/// [`ClientError::SessionExpired`].
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    auth_url: String,
    store: TokenStore,
    refresh_lock: Arc<Mutex<()>>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig, store: TokenStore) -> Result<Self> {
        for url in [&config.base_url, &config.auth_url] {
            Url::parse(url)
                .map_err(|err| ClientError::Config(format!("invalid url {url}: {err}")))?;
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|err| ClientError::Config(format!("failed to build http client: {err}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            auth_url: config.auth_url.trim_end_matches('/').to_string(),
            store,
            refresh_lock: Arc::new(Mutex::new(())),
        })
    }

    pub fn store(&self) -> &TokenStore {
        &self.store
    }

    /// Auth-prefixed endpoints go to the auth host, the prefix stripped;
    /// everything else goes to the main API host.
    fn url_for(&self, endpoint: &str) -> String {
        match endpoint.strip_prefix("/auth") {
            Some(rest) => format!("{}{}", self.auth_url, rest),
            None => format!("{}{}", self.base_url, endpoint),
        }
    }

    /// One attempt: build, sign, send, parse.
    async fn send_once<T, F>(&self, url: &str, with_bearer: bool, build: &F) -> Result<T>
    where
        T: DeserializeOwned,
        F: Fn(&reqwest::Client, &str) -> reqwest::RequestBuilder,
    {
        let mut req = build(&self.http, url);
        if with_bearer {
            if let Some(access) = self.store.access_token().await {
                req = req.bearer_auth(access);
            }
        }

        let resp = match req.send().await {
            Ok(resp) => resp,
            Err(err) if err.is_timeout() => return Err(ClientError::Timeout),
            Err(err) => return Err(ClientError::Network(err)),
        };

        let status = resp.status();
        if status.is_success() {
            return resp.json::<T>().await.map_err(ClientError::Network);
        }

        let details = resp.json::<serde_json::Value>().await.ok();
        let message = error_message(details.as_ref());
        Err(ClientError::Http {
            status,
            message,
            details,
        })
    }

    /// Sends a request, retrying exactly once after a token refresh on 401.
    ///
    /// A 401 on the retry surfaces as-is: the retry is bounded, never
    /// recursive. Token create/refresh endpoints are neither bearer-signed
    /// nor retried. A failed refresh wipes the stored session.
    async fn request<T, F>(&self, endpoint: &str, build: F) -> Result<T>
    where
        T: DeserializeOwned,
        F: Fn(&reqwest::Client, &str) -> reqwest::RequestBuilder,
    {
        let url = self.url_for(endpoint);
        let token_endpoint = endpoint.contains("/jwt/");

        match self.send_once(&url, !token_endpoint, &build).await {
            Err(ClientError::Http { status, .. })
                if status == StatusCode::UNAUTHORIZED && !token_endpoint =>
            {
                tracing::debug!(endpoint, "got 401, attempting token refresh");
                match self.refresh_access_token().await {
                    Ok(()) => self.send_once(&url, true, &build).await,
                    Err(err) => {
                        tracing::warn!("token refresh failed, clearing session: {err}");
                        let _ = self.store.clear().await;
                        Err(ClientError::SessionExpired)
                    }
                }
            }
            other => other,
        }
    }

    /// Creates a token pair, persists it, then fetches and persists the
    /// profile. Nothing is stored if the token creation fails.
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let pair: TokenPair = self
            .request("/auth/jwt/create/", |http, url| http.post(url).json(&body))
            .await?;
        self.store.store_tokens(&pair).await?;

        let user = self.profile().await?;
        self.store.store_user(&user).await?;
        tracing::info!("login succeeded");
        Ok(user)
    }

    pub async fn profile(&self) -> Result<User> {
        self.request("/auth/profile/", |http, url| http.get(url)).await
    }

    /// Mints a new access token from the stored refresh token and persists
    /// it. Serialized behind a lock so concurrent 401s cannot storm the
    /// refresh endpoint; re-running with a still-valid refresh token is
    /// harmless.
    pub async fn refresh_access_token(&self) -> Result<()> {
        let _guard = self.refresh_lock.lock().await;

        let Some(refresh) = self.store.refresh_token().await else {
            return Err(ClientError::SessionExpired);
        };

        let url = self.url_for("/auth/jwt/refresh/");
        let body = TokenRefresh { refresh };
        let token: AccessToken = self
            .send_once(&url, false, &|http: &reqwest::Client, url: &str| {
                http.post(url).json(&body)
            })
            .await?;
        self.store.store_access(&token.access).await?;
        tracing::debug!("access token refreshed");
        Ok(())
    }

    /// Clears the stored session.
    pub async fn logout(&self) -> Result<()> {
        self.store.clear().await
    }

    pub async fn transactions(&self, params: &TransactionListParams) -> Result<TransactionPage> {
        self.request("/transactions/", |http, url| http.get(url).query(params))
            .await
    }

    pub async fn dashboard_stats(&self) -> Result<DashboardStats> {
        self.request("/transactions/dashboard_stats/", |http, url| http.get(url))
            .await
    }

    pub async fn analytics(&self, months: u32) -> Result<AnalyticsData> {
        self.request("/transactions/analytics/", |http, url| {
            http.get(url).query(&[("months", months)])
        })
        .await
    }

    pub async fn budget_overview(&self) -> Result<BudgetOverview> {
        self.request("/budgets/overview/", |http, url| http.get(url)).await
    }
}

/// `detail` is what the API sends for auth errors, `message` for the rest.
fn error_message(details: Option<&serde_json::Value>) -> String {
    details
        .and_then(|body| {
            body.get("detail")
                .or_else(|| body.get("message"))
                .and_then(serde_json::Value::as_str)
        })
        .unwrap_or("network error while contacting the API")
        .to_string()
}
