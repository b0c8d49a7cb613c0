//! Report Rendering
//!
//! Plain text rendering of a position report: one line per trade and a
//! summary block.

use crate::model::{PositionReport, PositionSummary, SettledTrade};

/// One trade line, e.g. `Bought    10.00 ADA at 1.0000 USDT`
pub fn trade_line(asset: &str, trade: &SettledTrade) -> String {
    let when = trade
        .timestamp()
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| trade.time.to_string());

    let mut line = format!(
        "{when}  {:<7} {:>12.2} {} at {:.4} {}",
        trade.side.verb(),
        trade.quantity,
        asset,
        trade.price,
        trade.settlement,
    );

    if trade.traded_against != trade.settlement {
        line.push_str(&format!("  (via {})", trade.traded_against));
    }
    if !trade.commission.is_zero() {
        line.push_str(&format!("  fee {:.4} {}", trade.commission, trade.settlement));
    }
    line
}

/// Summary block
pub fn summary_block(summary: &PositionSummary) -> String {
    let mut output = String::new();
    let sign = if summary.gain.is_sign_negative() { "" } else { "+" };

    output.push_str(&format!(
        "Gains:   {}{:.2} {}\n",
        sign, summary.gain, summary.settlement
    ));
    output.push_str(&format!(
        "Holding: {} {} ({:.2} {})\n",
        summary.holding.normalize(),
        summary.asset,
        summary.holding_value(),
        summary.settlement
    ));
    output.push_str(&format!(
        "1 {} = {:.4} {}\n",
        summary.asset, summary.current_price, summary.settlement
    ));
    output
}

/// Full report: trade lines, a rule, then the summary
pub fn render(report: &PositionReport) -> String {
    let mut output = String::new();
    let asset = &report.summary.asset;

    if report.trades.is_empty() {
        output.push_str(&format!("No trades found for {asset}\n"));
    } else {
        for trade in &report.trades {
            output.push_str(&trade_line(asset, trade));
            output.push('\n');
        }
    }

    output.push_str(&"─".repeat(60));
    output.push('\n');
    output.push_str(&summary_block(&report.summary));
    output
}
