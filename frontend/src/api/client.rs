use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::api::types::{ApiError, Envelope};
use crate::config;
use crate::utils::storage::{self, keys};

pub const REQUEST_TIMEOUT_SECS: u64 = 15;

/// Thin wrapper around `reqwest::Client` that resolves the base URL, attaches
/// the credential header, unwraps the response envelope and funnels every
/// failure into `ApiError`. A 401 clears the persisted session and bounces to
/// the login screen; everything else is left to the calling page.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Option<String>,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            client: build_client(),
            base_url: None,
        }
    }

    /// Tests and tools pin the base URL instead of going through runtime
    /// config resolution.
    pub fn new_with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: build_client(),
            base_url: Some(base_url.into()),
        }
    }

    pub(crate) fn http(&self) -> &Client {
        &self.client
    }

    pub(crate) async fn url(&self, path: &str) -> String {
        let base = match &self.base_url {
            Some(base) => base.clone(),
            None => config::await_api_base_url().await,
        };
        format!("{}{}", base.trim_end_matches('/'), path)
    }

    fn auth_token(&self) -> Option<String> {
        storage::get_item(keys::TOKEN)
    }

    fn handle_unauthorized_status(status: StatusCode) {
        if status == StatusCode::UNAUTHORIZED {
            Self::clear_auth_session();
            Self::redirect_to_login_if_needed();
        }
    }

    fn clear_auth_session() {
        storage::remove_item(keys::TOKEN);
        storage::remove_item(keys::USER_PROFILE);
        storage::remove_item(keys::ROLE);
    }

    #[allow(unused_variables, clippy::needless_return)]
    fn redirect_to_login_if_needed() {
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(window) = web_sys::window() {
                let location = window.location();
                if let Ok(pathname) = location.pathname() {
                    if pathname == "/login" {
                        return;
                    }
                }
                let _ = location.set_href("/login");
            }
        }
    }

    /// Single request path: send, check the HTTP status, decode the envelope,
    /// apply the success convention. Returns the envelope's `data` which may
    /// legitimately be absent for mutation endpoints.
    pub(crate) async fn execute<T: DeserializeOwned>(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<Option<T>, ApiError> {
        let builder = match self.auth_token() {
            Some(token) => builder.header(
                reqwest::header::AUTHORIZATION,
                format!("Bearer {}", token),
            ),
            None => builder,
        };

        let response = send_with_timeout(builder).await?;
        let status = response.status();
        Self::handle_unauthorized_status(status);
        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::server("登录已过期，请重新登录"));
        }
        if !status.is_success() {
            let message = response
                .json::<Envelope<Value>>()
                .await
                .ok()
                .and_then(|env| env.message);
            return Err(ApiError::server(message.unwrap_or_else(|| {
                format!("请求失败 (HTTP {})", status.as_u16())
            })));
        }

        let envelope: Envelope<T> = response
            .json()
            .await
            .map_err(|e| ApiError::decode(format!("响应解析失败: {}", e)))?;
        envelope.into_result()
    }

    /// Like `execute`, but the endpoint must return `data`.
    pub(crate) async fn fetch<T: DeserializeOwned>(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        self.execute(builder)
            .await?
            .ok_or_else(|| ApiError::decode("响应缺少 data 字段"))
    }

    /// Like `execute`, for mutations where `data` is irrelevant.
    pub(crate) async fn execute_unit(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<(), ApiError> {
        self.execute::<Value>(builder).await.map(|_| ())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn build_client() -> Client {
    Client::builder()
        .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
        .unwrap_or_else(|_| Client::new())
}

#[cfg(target_arch = "wasm32")]
fn build_client() -> Client {
    Client::new()
}

#[cfg(not(target_arch = "wasm32"))]
async fn send_with_timeout(
    builder: reqwest::RequestBuilder,
) -> Result<reqwest::Response, ApiError> {
    builder
        .send()
        .await
        .map_err(|e| ApiError::network(format!("网络请求失败: {}", e)))
}

// reqwest's builder timeout is not available on wasm; race the request
// against a timer instead.
#[cfg(target_arch = "wasm32")]
async fn send_with_timeout(
    builder: reqwest::RequestBuilder,
) -> Result<reqwest::Response, ApiError> {
    use futures::future::{select, Either};

    let request = Box::pin(builder.send());
    let deadline = Box::pin(gloo_timers::future::TimeoutFuture::new(
        (REQUEST_TIMEOUT_SECS * 1000) as u32,
    ));
    match select(request, deadline).await {
        Either::Left((result, _)) => {
            result.map_err(|e| ApiError::network(format!("网络请求失败: {}", e)))
        }
        Either::Right((_, _)) => Err(ApiError::network("请求超时，请稍后重试")),
    }
}
