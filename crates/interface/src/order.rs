use std::fmt;
use std::str::FromStr;

use crate::ValidationError;

/// 거래소가 돌려준 주문 응답. 스키마 검증 없이 키/값 그대로 보관한다.
pub type OrderResult = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "BUY",
            Side::Sell => "SELL",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = ValidationError;

    /// 이미 정규화(trim + 대문자)된 값만 받는다
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BUY" => Ok(Side::Buy),
            "SELL" => Ok(Side::Sell),
            other => Err(ValidationError::InvalidSide(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderType {
    Market,
    Limit,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Market => "MARKET",
            OrderType::Limit => "LIMIT",
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MARKET" => Ok(OrderType::Market),
            "LIMIT" => Ok(OrderType::Limit),
            other => Err(ValidationError::InvalidOrderType(other.to_string())),
        }
    }
}

/// LIMIT 주문의 유효 기간
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TimeInForce {
    /// Good Till Cancel
    #[default]
    Gtc,
    /// Immediate Or Cancel
    Ioc,
    /// Fill Or Kill
    Fok,
    /// Good Till Crossing (post only)
    Gtx,
}

impl TimeInForce {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeInForce::Gtc => "GTC",
            TimeInForce::Ioc => "IOC",
            TimeInForce::Fok => "FOK",
            TimeInForce::Gtx => "GTX",
        }
    }
}

impl fmt::Display for TimeInForce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeInForce {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "GTC" => Ok(TimeInForce::Gtc),
            "IOC" => Ok(TimeInForce::Ioc),
            "FOK" => Ok(TimeInForce::Fok),
            "GTX" => Ok(TimeInForce::Gtx),
            _ => Err(ValidationError::InvalidTimeInForce(s.to_string())),
        }
    }
}

/// 검증을 통과한 주문 파라미터.
/// `price`는 `order_type == Limit`일 때만 `Some`이다.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSpec {
    pub symbol: String,
    pub side: Side,
    pub order_type: OrderType,
    pub quantity: f64,
    pub price: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_parse() {
        assert_eq!("BUY".parse::<Side>(), Ok(Side::Buy));
        assert_eq!("SELL".parse::<Side>(), Ok(Side::Sell));
        assert!("HOLD".parse::<Side>().is_err());
    }

    #[test]
    fn test_time_in_force_is_case_insensitive() {
        assert_eq!("ioc".parse::<TimeInForce>(), Ok(TimeInForce::Ioc));
        assert_eq!(TimeInForce::default().as_str(), "GTC");
        assert!("DAY".parse::<TimeInForce>().is_err());
    }
}
