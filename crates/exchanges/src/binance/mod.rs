//! Binance USDⓈ-M Futures REST 클라이언트
//!
//! - `params`: 서명 대상이 되는 순서 보존 파라미터 목록
//! - `client`: HTTP 전송 및 에러 분류 (`FuturesTransport` 구현)

use std::env;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;

use interface::{ExchangeError, TimeInForce};

pub mod client;
pub mod params;

pub use client::BinanceFuturesClient;
pub use params::RequestParams;

pub const TESTNET_BASE_URL: &str = "https://testnet.binancefuture.com";
pub const API_KEY_HEADER: &str = "X-MBX-APIKEY";

pub const API_KEY_ENV: &str = "BINANCE_API_KEY";
pub const API_SECRET_ENV: &str = "BINANCE_API_SECRET";

/// API key / secret 쌍. secret은 로그나 Debug 출력에 노출되지 않는다.
pub struct Credentials {
    api_key: String,
    api_secret: SecretString,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: SecretString::from(api_secret.into()),
        }
    }

    /// 환경변수에서 API 키와 시크릿 가져오기
    pub fn from_env() -> Result<Self, ExchangeError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// 빈 문자열도 누락으로 취급한다
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ExchangeError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_ENV).filter(|v| !v.is_empty());
        let api_secret = lookup(API_SECRET_ENV).filter(|v| !v.is_empty());

        match (api_key, api_secret) {
            (Some(api_key), Some(api_secret)) => Ok(Self::new(api_key, api_secret)),
            _ => Err(ExchangeError::Configuration(format!(
                "API credentials not found. Please set {} and {} environment variables.",
                API_KEY_ENV, API_SECRET_ENV
            ))),
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// 쿼리 문자열 서명
    pub fn sign(&self, query_string: &str) -> String {
        generate_signature(query_string, self.api_secret.expose_secret())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}

/// 주문 옵션 (LIMIT 주문에만 적용)
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceOrderOptions {
    pub time_in_force: TimeInForce,
}

type HmacSha256 = Hmac<Sha256>;

/// Binance API 서명 생성 (HMAC-SHA256, lowercase hex)
/// query_string: 쿼리 파라미터 문자열 (예: "symbol=BTCUSDT&timestamp=1234567890")
pub fn generate_signature(query_string: &str, api_secret: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(api_secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(query_string.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// 타임스탬프 생성 (밀리초)
pub fn get_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    // https://binance-docs.github.io 의 SIGNED endpoint 예제
    const DOC_SECRET: &str = "NhqPtmdSJYdKjVHjA7PZj4Mge3R5YNiP1e3UZjInClVN65XAbvqqM6A7H5fATj0j";
    const DOC_QUERY: &str = "symbol=LTCBTC&side=BUY&type=LIMIT&timeInForce=GTC&quantity=1&price=0.1&recvWindow=5000&timestamp=1499827319559";

    #[test]
    fn test_signature_matches_binance_example() {
        assert_eq!(
            generate_signature(DOC_QUERY, DOC_SECRET),
            "c8db56825ae71d6d79447849e617115f4a920fa2acdcab2b053c4b2838bd6b71"
        );
    }

    #[test]
    fn test_signature_is_deterministic() {
        let a = generate_signature("symbol=BTCUSDT&side=BUY", "secret");
        let b = generate_signature("symbol=BTCUSDT&side=BUY", "secret");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_signature_depends_on_parameter_order() {
        let mut forward = RequestParams::new();
        forward.push("symbol", "BTCUSDT");
        forward.push("side", "BUY");

        let mut reversed = RequestParams::new();
        reversed.push("side", "BUY");
        reversed.push("symbol", "BTCUSDT");

        let credentials = Credentials::new("key", "secret");
        assert_ne!(
            credentials.sign(&forward.to_query_string()),
            credentials.sign(&reversed.to_query_string())
        );
    }

    #[test]
    fn test_credentials_from_lookup() {
        let credentials = Credentials::from_lookup(|name| match name {
            API_KEY_ENV => Some("my-key".to_string()),
            API_SECRET_ENV => Some("my-secret".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(credentials.api_key(), "my-key");
        assert!(!format!("{:?}", credentials).contains("my-secret"));
    }

    #[test]
    fn test_missing_credentials_is_configuration_error() {
        let missing_secret = Credentials::from_lookup(|name| match name {
            API_KEY_ENV => Some("my-key".to_string()),
            _ => None,
        });
        assert!(matches!(missing_secret, Err(ExchangeError::Configuration(_))));

        let empty_key = Credentials::from_lookup(|name| match name {
            API_KEY_ENV => Some(String::new()),
            _ => Some("my-secret".to_string()),
        });
        assert!(matches!(empty_key, Err(ExchangeError::Configuration(_))));
    }
}
