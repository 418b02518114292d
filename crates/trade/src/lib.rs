pub mod logger;
pub mod order;
pub mod report;
pub mod validator;

pub use order::{format_order_response, OrderManager};
pub use validator::validate_all;
