use super::values::{number, text, text_or};
use super::{ACCOUNT_MEASUREMENT, RIGS_MEASUREMENT, Resource, entries, require_object};
use crate::domain::errors::EncodeError;
use crate::domain::metric::MetricRecord;
use serde_json::Value;
use tracing::warn;

/// Encodes a `rigs2` listing: the account summary first, then one record per rig.
pub fn encode(doc: &Value, now_ns: i64) -> Result<Vec<MetricRecord>, EncodeError> {
    let data = require_object(doc, Resource::Rigs)?;
    let mut records = Vec::new();

    let mut account = MetricRecord::builder(ACCOUNT_MEASUREMENT)
        .field("unpaid_total", number(data.get("unpaidAmount")))
        .field("profitability_total", number(data.get("totalProfitability")))
        .timestamp_ns(now_ns);
    if let Some(next_payout) = text(data.get("nextPayoutTimestamp")) {
        account = account.field("next_payout_ts", next_payout);
    }
    records.push(account.build()?);

    for rig in entries(data, "miningRigs") {
        let rig_id = text_or(rig.get("rigId"), "unknown");
        let rig_name = text(rig.get("name")).unwrap_or_else(|| rig_id.clone());
        let status = text_or(rig.get("minerStatus"), "UNKNOWN");

        let stats = rig.get("stats").and_then(Value::as_array).into_iter().flatten();
        let (speed_accepted, speed_rejected) = stats.fold(
            (0.0, 0.0),
            |(accepted, rejected), stat| {
                (
                    accepted + number(stat.get("speedAccepted")),
                    rejected + number(stat.get("speedRejected")),
                )
            },
        );

        let record = MetricRecord::builder(RIGS_MEASUREMENT)
            .tag("rig_name", rig_name)
            .tag("rig_id", rig_id.clone())
            .tag("status", status)
            .field("unpaid", number(rig.get("unpaidAmount")))
            .field("profitability", number(rig.get("profitability")))
            .field("speed_accepted", speed_accepted)
            .field("speed_rejected", speed_rejected)
            .timestamp_ns(now_ns)
            .build();
        match record {
            Ok(record) => records.push(record),
            Err(e) => warn!(rig_id = %rig_id, error = %e, "Skipping rig"),
        }
    }

    Ok(records)
}
