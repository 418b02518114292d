use thiserror::Error;

/// 거래소 호출 경로 전체에서 사용하는 에러.
/// 호출자는 문자열 검사 없이 variant로 분기한다.
#[derive(Debug, Error)]
pub enum ExchangeError {
    /// 자격 증명 누락 등. 네트워크 호출 전에 발생한다.
    #[error("{0}")]
    Configuration(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// DNS, 타임아웃, 연결 실패 등 전송 계층 오류
    #[error("Network error: {0}")]
    Network(String),

    /// 거래소가 구조화된 에러 바디로 요청을 거절한 경우
    #[error("HTTP Error: {status} - {msg}")]
    Api {
        status: u16,
        code: Option<i64>,
        msg: String,
    },

    /// 에러 바디를 해석할 수 없는 non-2xx 응답
    #[error("HTTP Error: {status}")]
    Http { status: u16 },

    /// 2xx 응답이지만 바디가 JSON이 아님
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl ExchangeError {
    /// 원격 거래소가 요청 자체를 거절했는지 여부 (Api / Http)
    pub fn is_rejection(&self) -> bool {
        matches!(self, ExchangeError::Api { .. } | ExchangeError::Http { .. })
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ExchangeError::Api { status, .. } | ExchangeError::Http { status } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ExchangeError {
    fn from(e: reqwest::Error) -> Self {
        ExchangeError::Network(e.to_string())
    }
}

impl From<serde_json::Error> for ExchangeError {
    fn from(e: serde_json::Error) -> Self {
        ExchangeError::Decode(e.to_string())
    }
}

/// 주문 파라미터 검증 실패. 검사 하나당 하나의 메시지.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Symbol must be a non-empty string")]
    EmptySymbol,

    #[error("Symbol is too short")]
    SymbolTooShort,

    #[error("Side must be a non-empty string")]
    EmptySide,

    #[error("Side must be one of [BUY, SELL]")]
    InvalidSide(String),

    #[error("Order type must be a non-empty string")]
    EmptyOrderType,

    #[error("Order type must be one of [MARKET, LIMIT]")]
    InvalidOrderType(String),

    #[error("Quantity must be a valid number")]
    InvalidQuantity(String),

    #[error("Quantity must be greater than 0")]
    NonPositiveQuantity,

    #[error("Price is required for LIMIT orders")]
    MissingPrice,

    #[error("Price must be a valid number")]
    InvalidPrice(String),

    #[error("Price must be greater than 0")]
    NonPositivePrice,

    #[error("Time in force must be one of [GTC, IOC, FOK, GTX]")]
    InvalidTimeInForce(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_message_carries_remote_msg() {
        let err = ExchangeError::Api {
            status: 400,
            code: Some(-1121),
            msg: "Invalid symbol.".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP Error: 400 - Invalid symbol.");
        assert!(err.is_rejection());
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn test_validation_error_is_transparent() {
        let err: ExchangeError = ValidationError::SymbolTooShort.into();
        assert_eq!(err.to_string(), "Symbol is too short");
        assert!(!err.is_rejection());
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_decode_error_from_serde() {
        let parse = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: ExchangeError = parse.into();
        assert!(matches!(err, ExchangeError::Decode(_)));
    }
}
