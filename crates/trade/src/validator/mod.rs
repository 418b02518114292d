//! 주문 파라미터 검증.
//!
//! 각 검사는 원본 입력을 정규화(trim + 대문자, 숫자 변환)해서 돌려주거나
//! 첫 번째 실패를 `ValidationError`로 돌려준다.

use tracing::{debug, info};

use interface::{OrderSpec, OrderType, Side, ValidationError};

pub const MIN_SYMBOL_LEN: usize = 3;

/// 심볼 검증: 비어있으면 거절, trim + 대문자, 3자 미만 거절
pub fn validate_symbol(symbol: &str) -> Result<String, ValidationError> {
    if symbol.is_empty() {
        return Err(ValidationError::EmptySymbol);
    }

    let symbol = symbol.trim().to_uppercase();
    if symbol.chars().count() < MIN_SYMBOL_LEN {
        return Err(ValidationError::SymbolTooShort);
    }

    debug!("Symbol validated: {}", symbol);
    Ok(symbol)
}

pub fn validate_side(side: &str) -> Result<Side, ValidationError> {
    if side.is_empty() {
        return Err(ValidationError::EmptySide);
    }

    let side: Side = side.trim().to_uppercase().parse()?;
    debug!("Side validated: {}", side);
    Ok(side)
}

pub fn validate_order_type(order_type: &str) -> Result<OrderType, ValidationError> {
    if order_type.is_empty() {
        return Err(ValidationError::EmptyOrderType);
    }

    let order_type: OrderType = order_type.trim().to_uppercase().parse()?;
    debug!("Order type validated: {}", order_type);
    Ok(order_type)
}

/// 유한한 실수로만 변환한다 ("nan", "inf"는 숫자로 보지 않음)
fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

pub fn validate_quantity(quantity: &str) -> Result<f64, ValidationError> {
    let quantity = parse_number(quantity)
        .ok_or_else(|| ValidationError::InvalidQuantity(quantity.to_string()))?;

    if quantity <= 0.0 {
        return Err(ValidationError::NonPositiveQuantity);
    }

    debug!("Quantity validated: {}", quantity);
    Ok(quantity)
}

/// MARKET이면 입력과 상관없이 `None`. LIMIT이면 필수이며 0보다 커야 한다.
pub fn validate_price(
    price: Option<&str>,
    order_type: OrderType,
) -> Result<Option<f64>, ValidationError> {
    if order_type == OrderType::Market {
        return Ok(None);
    }

    let raw = price.ok_or(ValidationError::MissingPrice)?;
    let price = parse_number(raw).ok_or_else(|| ValidationError::InvalidPrice(raw.to_string()))?;

    if price <= 0.0 {
        return Err(ValidationError::NonPositivePrice);
    }

    debug!("Price validated: {}", price);
    Ok(Some(price))
}

/// symbol → side → order type → quantity → price 순서로 검사하고
/// 첫 번째 실패에서 멈춘다.
pub fn validate_all(
    symbol: &str,
    side: &str,
    order_type: &str,
    quantity: &str,
    price: Option<&str>,
) -> Result<OrderSpec, ValidationError> {
    let symbol = validate_symbol(symbol)?;
    let side = validate_side(side)?;
    let order_type = validate_order_type(order_type)?;
    let quantity = validate_quantity(quantity)?;
    let price = validate_price(price, order_type)?;

    info!("All parameters validated successfully");

    Ok(OrderSpec {
        symbol,
        side,
        order_type,
        quantity,
        price,
    })
}
