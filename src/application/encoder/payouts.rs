use super::values::{millis, number, text, text_or};
use super::{PAYOUTS_MEASUREMENT, Resource, entries, require_object};
use crate::domain::errors::EncodeError;
use crate::domain::metric::MetricRecord;
use serde_json::Value;
use tracing::{debug, warn};

const NANOS_PER_MILLI: i64 = 1_000_000;
const DEFAULT_CURRENCY: &str = "BTC";

/// Encodes the payout list. Each record carries the payout's own creation
/// time, so re-reporting the same payout on the next run lands on the same
/// point instead of a new one.
pub fn encode(doc: &Value) -> Result<Vec<MetricRecord>, EncodeError> {
    let data = require_object(doc, Resource::Payouts)?;
    let mut records = Vec::new();

    for payout in entries(data, "list") {
        let payout_id = text_or(payout.get("id"), "");

        let created_ms = millis(payout.get("created"));
        if created_ms == 0 {
            debug!(payout_id = %payout_id, "Skipping unsettled payout");
            continue;
        }
        let Some(timestamp_ns) = created_ms.checked_mul(NANOS_PER_MILLI) else {
            warn!(payout_id = %payout_id, created_ms, "Skipping payout with out-of-range timestamp");
            continue;
        };

        let record = MetricRecord::builder(PAYOUTS_MEASUREMENT)
            .tag("currency", currency_name(payout.get("currency")))
            .field("amount", number(payout.get("amount")))
            .field("fee", number(payout.get("feeAmount")))
            .field("payout_id", payout_id)
            .timestamp_ns(timestamp_ns)
            .build()?;
        records.push(record);
    }

    Ok(records)
}

/// Payout currency is usually `{"enumName": "BTC", ...}` but older payloads
/// carry a bare code.
fn currency_name(value: Option<&Value>) -> String {
    match value {
        Some(Value::Object(currency)) => text_or(currency.get("enumName"), DEFAULT_CURRENCY),
        other => text(other).unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
    }
}
