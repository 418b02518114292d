//! 주문 배치 및 응답 포맷팅

use serde_json::Value;
use tracing::{error, info};

use exchanges::{FuturesTransport, PlaceOrderOptions};
use interface::{ExchangeError, OrderResult, OrderSpec, OrderType, Side};

/// 응답에서 출력하는 필드 (라벨, 키). 순서 고정.
pub const DISPLAY_FIELDS: [(&str, &str); 11] = [
    ("Order ID", "orderId"),
    ("Symbol", "symbol"),
    ("Side", "side"),
    ("Type", "type"),
    ("Status", "status"),
    ("Quantity", "origQty"),
    ("Executed Quantity", "executedQty"),
    ("Price", "price"),
    ("Average Price", "avgPrice"),
    ("Time in Force", "timeInForce"),
    ("Update Time", "updateTime"),
];

const RULE_WIDTH: usize = 60;

/// 검증된 주문을 거래소 요청으로 변환해서 보낸다.
/// 에러는 복구나 재시도 없이 그대로 전달한다.
pub struct OrderManager<T> {
    client: T,
}

impl<T: FuturesTransport> OrderManager<T> {
    pub fn new(client: T) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &T {
        &self.client
    }

    pub async fn place_market_order(
        &self,
        symbol: &str,
        side: Side,
        quantity: f64,
    ) -> Result<OrderResult, ExchangeError> {
        info!("Placing MARKET {} order: {} {}", side, quantity, symbol);

        match self
            .client
            .place_order(
                symbol,
                side,
                OrderType::Market,
                quantity,
                None,
                PlaceOrderOptions::default(),
            )
            .await
        {
            Ok(order) => {
                info!(
                    "Market order placed successfully: Order ID {}",
                    display_value(order.get("orderId"))
                );
                Ok(order)
            }
            Err(e) => {
                error!("Failed to place market order: {}", e);
                Err(e)
            }
        }
    }

    /// timeInForce=GTC LIMIT 주문
    pub async fn place_limit_order(
        &self,
        symbol: &str,
        side: Side,
        quantity: f64,
        price: f64,
    ) -> Result<OrderResult, ExchangeError> {
        self.place_limit_order_with(symbol, side, quantity, price, PlaceOrderOptions::default())
            .await
    }

    pub async fn place_limit_order_with(
        &self,
        symbol: &str,
        side: Side,
        quantity: f64,
        price: f64,
        options: PlaceOrderOptions,
    ) -> Result<OrderResult, ExchangeError> {
        info!(
            "Placing LIMIT {} order: {} {} @ {}",
            side, quantity, symbol, price
        );

        match self
            .client
            .place_order(
                symbol,
                side,
                OrderType::Limit,
                quantity,
                Some(price),
                options,
            )
            .await
        {
            Ok(order) => {
                info!(
                    "Limit order placed successfully: Order ID {}",
                    display_value(order.get("orderId"))
                );
                Ok(order)
            }
            Err(e) => {
                error!("Failed to place limit order: {}", e);
                Err(e)
            }
        }
    }

    /// `OrderSpec`의 주문 타입에 맞는 요청을 보낸다
    pub async fn place(
        &self,
        spec: &OrderSpec,
        options: PlaceOrderOptions,
    ) -> Result<OrderResult, ExchangeError> {
        match (spec.order_type, spec.price) {
            (OrderType::Market, _) => {
                self.place_market_order(&spec.symbol, spec.side, spec.quantity)
                    .await
            }
            (OrderType::Limit, Some(price)) => {
                self.place_limit_order_with(&spec.symbol, spec.side, spec.quantity, price, options)
                    .await
            }
            (OrderType::Limit, None) => {
                self.client
                    .place_order(
                        &spec.symbol,
                        spec.side,
                        OrderType::Limit,
                        spec.quantity,
                        None,
                        options,
                    )
                    .await
            }
        }
    }
}

/// 응답 필드를 출력용 문자열로 (없으면 "N/A")
pub fn display_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "N/A".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// 값이 없거나, 숫자 0이거나, 문자열 "0"이면 출력하지 않는다.
/// `false`도 0으로 취급한다.
fn is_suppressed(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s == "0",
        Some(Value::Number(n)) => n.as_f64() == Some(0.0),
        Some(Value::Bool(b)) => !b,
        Some(_) => false,
    }
}

/// 주문 응답을 고정된 필드 순서로 출력용 문자열로 변환
pub fn format_order_response(response: &OrderResult) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut output = format!("\n{rule}\nORDER RESPONSE\n{rule}\n");

    for (label, key) in DISPLAY_FIELDS {
        let value = response.get(key);
        if is_suppressed(value) {
            continue;
        }
        output.push_str(&format!("{:20}: {}\n", label, display_value(value)));
    }

    output.push_str(&rule);
    output.push('\n');
    output
}
