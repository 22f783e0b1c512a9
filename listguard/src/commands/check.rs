//! `listguard check`: the full compliance check as JSON.

use anyhow::Result;
use log::info;

use listguard_core::{check_compliance, ComplianceEngine, UsageData};

pub struct CheckOptions {
    pub input: String,
    pub copies_last_hour: Option<u32>,
    pub copies_today: Option<u32>,
}

/// Usage counters, when either was given. A missing counter counts as zero.
pub fn usage_from(copies_last_hour: Option<u32>, copies_today: Option<u32>) -> Option<UsageData> {
    if copies_last_hour.is_none() && copies_today.is_none() {
        return None;
    }
    Some(UsageData {
        copies_last_hour: copies_last_hour.unwrap_or(0),
        copies_today: copies_today.unwrap_or(0),
    })
}

pub fn run_check(engine: &dyn ComplianceEngine, opts: CheckOptions) -> Result<()> {
    let usage = usage_from(opts.copies_last_hour, opts.copies_today);
    let check = check_compliance(engine, &opts.input, usage.as_ref());
    info!("Check {} complete.", check.check_id);
    println!("{}", serde_json::to_string_pretty(&check)?);
    Ok(())
}
