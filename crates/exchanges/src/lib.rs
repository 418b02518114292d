use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use tracing::{error, info};

use interface::{ExchangeError, OrderResult, OrderType, Side, ValidationError};

pub mod binance;

pub use binance::{BinanceFuturesClient, Credentials, PlaceOrderOptions, RequestParams};

/// 선물 거래소 REST 호출의 공통 인터페이스.
/// 구현체는 `request`만 제공하면 되고 나머지 엔드포인트는 기본 구현을 쓴다.
#[async_trait]
pub trait FuturesTransport: Send + Sync {
    /// `signed`이면 timestamp와 signature를 붙여서 보낸다.
    /// 성공 바디는 검증 없이 그대로 돌려준다.
    async fn request(
        &self,
        method: Method,
        path: &str,
        params: RequestParams,
        signed: bool,
    ) -> Result<Value, ExchangeError>;

    /// `GET /fapi/v1/ping` liveness probe.
    /// 모든 실패(네트워크/API 구분 없이)를 `false`로 접는다.
    async fn test_connectivity(&self) -> bool {
        match self
            .request(Method::GET, "/fapi/v1/ping", RequestParams::new(), false)
            .await
        {
            Ok(_) => {
                info!("Connectivity test passed");
                true
            }
            Err(e) => {
                error!("Connectivity test failed: {}", e);
                false
            }
        }
    }

    /// 계정 정보 조회 (signed)
    async fn account_info(&self) -> Result<Value, ExchangeError> {
        self.request(Method::GET, "/fapi/v2/account", RequestParams::new(), true)
            .await
    }

    /// 거래 규칙 및 심볼 정보 조회
    async fn exchange_info(&self, symbol: Option<&str>) -> Result<Value, ExchangeError> {
        let mut params = RequestParams::new();
        if let Some(symbol) = symbol {
            params.push("symbol", symbol);
        }
        self.request(Method::GET, "/fapi/v1/exchangeInfo", params, false)
            .await
    }

    /// `POST /fapi/v1/order`.
    /// LIMIT 주문에 price가 없으면 네트워크 호출 없이 거절한다.
    async fn place_order(
        &self,
        symbol: &str,
        side: Side,
        order_type: OrderType,
        quantity: f64,
        price: Option<f64>,
        options: PlaceOrderOptions,
    ) -> Result<OrderResult, ExchangeError> {
        let mut params = RequestParams::new();
        params.push("symbol", symbol);
        params.push("side", side);
        params.push("type", order_type);
        params.push("quantity", quantity);

        if order_type == OrderType::Limit {
            let price = price.ok_or(ValidationError::MissingPrice)?;
            params.push("price", price);
            params.push("timeInForce", options.time_in_force);
        }

        info!(
            "Placing {} {} order for {} {}",
            order_type, side, quantity, symbol
        );

        let value = self
            .request(Method::POST, "/fapi/v1/order", params, true)
            .await?;
        let order: OrderResult = serde_json::from_value(value)?;
        Ok(order)
    }
}
