//! 콘솔 출력 (배너, 주문 요약, 결과 메시지)

use interface::OrderSpec;

const RULE_WIDTH: usize = 60;

pub fn banner() -> String {
    [
        "",
        "    ╔════════════════════════════════════════════════════════════╗",
        "    ║      Binance Futures Trading Bot - Testnet                 ║",
        "    ╚════════════════════════════════════════════════════════════╝",
        "",
    ]
    .join("\n")
}

/// 주문 요청 요약. price는 LIMIT 주문에만 표시된다.
pub fn order_summary(spec: &OrderSpec) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = format!("\n{rule}\nORDER REQUEST SUMMARY\n{rule}\n");
    out.push_str(&format!("{:14}: {}\n", "Symbol", spec.symbol));
    out.push_str(&format!("{:14}: {}\n", "Side", spec.side));
    out.push_str(&format!("{:14}: {}\n", "Order Type", spec.order_type));
    out.push_str(&format!("{:14}: {}\n", "Quantity", spec.quantity));
    if let Some(price) = spec.price {
        out.push_str(&format!("{:14}: {}\n", "Price", price));
    }
    out.push_str(&rule);
    out
}
