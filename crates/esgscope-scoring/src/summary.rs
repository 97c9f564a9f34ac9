//! Summary report rendering

use chrono::{DateTime, Local};
use esgscope_core::RiskLevel;

/// Timestamp format used in summary reports
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Source of the analysis timestamp
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A clock frozen at one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Local>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}

/// Render the fixed-template summary report
pub fn build_summary(
    company_name: &str,
    timestamp: &DateTime<Local>,
    total_keyword_matches: u64,
    total_weighted_score: u64,
    risk_level: RiskLevel,
) -> String {
    format!(
        "Company ESG Risk Summary Report\n\
         ====================================\n\
         Company Name       : {}\n\
         Date of Analysis   : {}\n\
         Total ESG Terms    : {}\n\
         Total Weighted ESG Score : {}\n\
         Final ESG Risk Level      : {}\n",
        company_name,
        timestamp.format(TIMESTAMP_FORMAT),
        total_keyword_matches,
        total_weighted_score,
        risk_level,
    )
}
