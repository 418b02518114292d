pub mod error;
pub mod order;

pub use error::{ExchangeError, ValidationError};
pub use order::{OrderResult, OrderSpec, OrderType, Side, TimeInForce};
