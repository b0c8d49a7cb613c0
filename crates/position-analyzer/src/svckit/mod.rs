//! Service Kit
//!
//! Settlement conversion, position analysis and report rendering.

mod position_analyzer;
mod settlement;
pub mod report;

pub use position_analyzer::{PositionAnalyzer, sort_chronologically, summarize};
pub use settlement::SettlementConverter;
