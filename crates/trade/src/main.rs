use std::path::PathBuf;
use std::process::ExitCode;

use color_eyre::eyre;
use structopt::StructOpt;
use tracing::{error, info};

use exchanges::{BinanceFuturesClient, Credentials, FuturesTransport, PlaceOrderOptions};
use interface::{ExchangeError, OrderResult, TimeInForce};
use trade::order::display_value;
use trade::{format_order_response, logger, report, validate_all, OrderManager};

#[derive(Debug, StructOpt)]
#[structopt(
    name = "trade",
    about = "Binance Futures Trading Bot - Place orders on Testnet",
    after_help = "Examples:\n  trade --symbol BTCUSDT --side BUY --type MARKET --quantity 0.001\n  trade --symbol ETHUSDT --side SELL --type LIMIT --quantity 0.01 --price 2000"
)]
struct Opt {
    /// Trading pair symbol (e.g., BTCUSDT, ETHUSDT)
    #[structopt(long)]
    symbol: String,

    /// Order side: BUY or SELL
    #[structopt(long, possible_values = &["BUY", "SELL"], case_insensitive = true)]
    side: String,

    /// Order type: MARKET or LIMIT
    #[structopt(long = "type", possible_values = &["MARKET", "LIMIT"], case_insensitive = true)]
    order_type: String,

    /// Order quantity (must be greater than 0)
    #[structopt(long, allow_hyphen_values = true)]
    quantity: String,

    /// Limit price (required for LIMIT orders)
    #[structopt(long, allow_hyphen_values = true)]
    price: Option<String>,

    /// Time in force for LIMIT orders: GTC, IOC, FOK or GTX
    #[structopt(long, default_value = "GTC")]
    time_in_force: TimeInForce,

    /// Directory for log files
    #[structopt(long, default_value = "logs", parse(from_os_str))]
    log_dir: PathBuf,

    /// Enable verbose logging (DEBUG level)
    #[structopt(long)]
    verbose: bool,

    /// REST endpoint of the futures API
    #[structopt(
        long,
        env = "BINANCE_FUTURES_BASE_URL",
        default_value = "https://testnet.binancefuture.com"
    )]
    base_url: String,

    /// recvWindow (ms) sent with signed requests
    #[structopt(long)]
    recv_window: Option<u64>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> eyre::Result<ExitCode> {
    // init error reporting
    color_eyre::install()?;

    // .env가 있으면 로드
    dotenv::dotenv().ok();

    let opt = Opt::from_args();

    println!("{}", report::banner());

    // init logging
    let guards = logger::init_tracing(&opt.log_dir, opt.verbose)?;
    let log_file = guards.log_file().display().to_string();

    match run(&opt).await {
        Ok(order) => {
            println!("\n✓ Order placed successfully!");
            println!("✓ Order ID: {}", display_value(order.get("orderId")));
            println!("✓ Status: {}", display_value(order.get("status")));
            println!("\nLog file: {}", log_file);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            report_failure(&e, &log_file);
            Ok(ExitCode::FAILURE)
        }
    }
}

/// 주문 한 건을 처리한다. 어느 단계든 실패하면 즉시 중단.
async fn run(opt: &Opt) -> Result<OrderResult, ExchangeError> {
    info!("Loading API credentials from environment variables");
    let credentials = Credentials::from_env()?;

    info!("Validating input parameters");
    let spec = validate_all(
        &opt.symbol,
        &opt.side,
        &opt.order_type,
        &opt.quantity,
        opt.price.as_deref(),
    )?;

    println!("{}", report::order_summary(&spec));

    info!("Initializing Binance Futures client");
    let mut client = BinanceFuturesClient::with_base_url(credentials, opt.base_url.as_str());
    if let Some(recv_window) = opt.recv_window {
        client = client.with_recv_window(recv_window);
    }

    info!("Testing API connectivity");
    if !client.test_connectivity().await {
        return Err(ExchangeError::Network(format!(
            "Failed to connect to Binance Futures Testnet ({})",
            client.base_url()
        )));
    }
    println!("✓ Connected to Binance Futures Testnet");

    let manager = OrderManager::new(client);

    println!("\nPlacing {} order...", spec.order_type);
    let options = PlaceOrderOptions {
        time_in_force: opt.time_in_force,
    };
    let order = manager.place(&spec, options).await?;

    println!("{}", format_order_response(&order));

    Ok(order)
}

/// 로그에 남길 에러 분류 라벨
fn failure_label(e: &ExchangeError) -> &'static str {
    match e {
        ExchangeError::Configuration(_) => "Configuration error",
        ExchangeError::Validation(_) => "Validation error",
        ExchangeError::Api { .. } | ExchangeError::Http { .. } => "API error",
        ExchangeError::Network(_) => "Connection error",
        ExchangeError::Decode(_) => "Unexpected error",
    }
}

fn report_failure(e: &ExchangeError, log_file: &str) {
    let label = failure_label(e);
    match e {
        ExchangeError::Configuration(_)
        | ExchangeError::Validation(_)
        | ExchangeError::Api { .. }
        | ExchangeError::Http { .. } => {
            error!("{}: {}", label, e);
            println!("\n✗ Error: {}", e);
        }
        ExchangeError::Network(_) => {
            error!("{}: {}", label, e);
            println!("\n✗ Connection Error: {}", e);
            println!("Please check your internet connection and API credentials.");
        }
        ExchangeError::Decode(_) => {
            error!("{}: {:?}", label, e);
            println!("\n✗ Unexpected Error: {}", e);
            println!("Check log file for details: {}", log_file);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use interface::ValidationError;

    #[test]
    fn test_failure_label_per_error_kind() {
        assert_eq!(
            failure_label(&ExchangeError::Configuration("missing key".to_string())),
            "Configuration error"
        );
        assert_eq!(
            failure_label(&ValidationError::SymbolTooShort.into()),
            "Validation error"
        );
        assert_eq!(
            failure_label(&ExchangeError::Http { status: 502 }),
            "API error"
        );
        assert_eq!(
            failure_label(&ExchangeError::Network("refused".to_string())),
            "Connection error"
        );
    }
}
