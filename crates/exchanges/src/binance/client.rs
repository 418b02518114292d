use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use tracing::{debug, error, info};

use interface::ExchangeError;

use super::{get_timestamp, Credentials, RequestParams, API_KEY_HEADER, TESTNET_BASE_URL};
use crate::FuturesTransport;

/// HTTP 기반 Binance Futures 클라이언트
pub struct BinanceFuturesClient {
    http: reqwest::Client,
    base_url: String,
    credentials: Credentials,
    recv_window: Option<u64>,
}

impl BinanceFuturesClient {
    /// 테스트넷 엔드포인트를 사용한다
    pub fn new(credentials: Credentials) -> Self {
        Self::with_base_url(credentials, TESTNET_BASE_URL)
    }

    pub fn with_base_url(credentials: Credentials, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
            credentials,
            recv_window: None,
        }
    }

    /// signed 요청에 recvWindow(ms)를 추가
    pub fn with_recv_window(mut self, recv_window: u64) -> Self {
        self.recv_window = Some(recv_window);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 호출자 파라미터 → (recvWindow) → timestamp 순으로 서명하고 signature를 마지막에 붙인다.
    pub fn sign_params(&self, mut params: RequestParams, timestamp: u64) -> RequestParams {
        if let Some(recv_window) = self.recv_window {
            params.push("recvWindow", recv_window);
        }
        params.push("timestamp", timestamp);
        let signature = self.credentials.sign(&params.to_query_string());
        params.push("signature", signature);
        params
    }
}

/// non-2xx 응답 분류.
/// JSON 객체 바디면 Api (msg가 없으면 "Unknown error"), 아니면 Http.
fn classify_error_response(status: u16, body: &str) -> ExchangeError {
    let parsed = serde_json::from_str::<Value>(body).ok();
    match parsed.as_ref().and_then(|v| v.as_object()) {
        Some(obj) => ExchangeError::Api {
            status,
            code: obj.get("code").and_then(|v| v.as_i64()),
            msg: obj
                .get("msg")
                .and_then(|v| v.as_str())
                .unwrap_or("Unknown error")
                .to_string(),
        },
        None => ExchangeError::Http { status },
    }
}

fn truncate(text: &str) -> String {
    text.chars().take(200).collect()
}

#[async_trait]
impl FuturesTransport for BinanceFuturesClient {
    async fn request(
        &self,
        method: Method,
        path: &str,
        params: RequestParams,
        signed: bool,
    ) -> Result<Value, ExchangeError> {
        let params = if signed {
            self.sign_params(params, get_timestamp())
        } else {
            params
        };

        let mut url = format!("{}{}", self.base_url, path);
        if !params.is_empty() {
            url.push('?');
            url.push_str(&params.to_query_string());
        }

        info!("Making {} request to {}", method, path);
        debug!("Request params: {:?}", params);

        let response = self
            .http
            .request(method, &url)
            .header(API_KEY_HEADER, self.credentials.api_key())
            .send()
            .await
            .map_err(|e| {
                error!("Network Error: {}", e);
                if e.is_builder() {
                    ExchangeError::Configuration(format!("Invalid request: {}", e))
                } else {
                    ExchangeError::from(e)
                }
            })?;

        let status = response.status();
        let response_text = response.text().await.map_err(|e| {
            error!("Network Error: {}", e);
            ExchangeError::from(e)
        })?;

        if !status.is_success() {
            let err = classify_error_response(status.as_u16(), &response_text);
            match &err {
                ExchangeError::Api { .. } => error!("API Error: {}", truncate(&response_text)),
                _ => error!("HTTP Error: status {}", status),
            }
            return Err(err);
        }

        let data: Value = serde_json::from_str(&response_text).map_err(|e| {
            error!(
                "Failed to parse response: {}, response: {}",
                e,
                truncate(&response_text)
            );
            ExchangeError::from(e)
        })?;

        info!("Request successful: {}", status.as_u16());
        debug!("Response data: {}", data);

        Ok(data)
    }
}
