use super::values::{number, text_or};
use super::{BALANCE_MEASUREMENT, Resource, require_object};
use crate::domain::errors::EncodeError;
use crate::domain::metric::MetricRecord;
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// The two layouts `accounts2` has been observed to return.
#[derive(Debug)]
enum BalanceShape<'a> {
    /// `{"currencies": [{"currency": "BTC", "available": .., "pending": ..}, ..]}`
    Currencies(&'a Value),
    /// `{"total": {"BTC": {"available": .., "pending": ..}, ..}}`
    Totals(&'a Value),
    Unrecognized,
}

impl<'a> BalanceShape<'a> {
    /// `currencies` wins when both keys are present.
    fn detect(data: &'a Map<String, Value>) -> Self {
        if let Some(currencies) = data.get("currencies") {
            BalanceShape::Currencies(currencies)
        } else if let Some(total) = data.get("total") {
            BalanceShape::Totals(total)
        } else {
            BalanceShape::Unrecognized
        }
    }
}

pub fn encode(doc: &Value, now_ns: i64) -> Result<Vec<MetricRecord>, EncodeError> {
    let data = require_object(doc, Resource::Balance)?;
    let mut records = Vec::new();

    match BalanceShape::detect(data) {
        BalanceShape::Currencies(currencies) => {
            let Some(list) = currencies.as_array() else {
                warn!("Balance 'currencies' is not a list, ignoring");
                return Ok(records);
            };
            for account in list {
                let currency = text_or(account.get("currency"), "UNKNOWN");
                if let Some(record) = balance_record(currency, account, now_ns) {
                    records.push(record);
                }
            }
        }
        BalanceShape::Totals(total) => {
            let Some(by_currency) = total.as_object() else {
                warn!("Balance 'total' is not a mapping, ignoring");
                return Ok(records);
            };
            for (currency, balances) in by_currency {
                let currency = if currency.is_empty() { "UNKNOWN" } else { currency.as_str() };
                if let Some(record) = balance_record(currency.to_string(), balances, now_ns) {
                    records.push(record);
                }
            }
        }
        BalanceShape::Unrecognized => {
            warn!("Balance response has neither 'currencies' nor 'total', ignoring");
        }
    }

    Ok(records)
}

/// Returns `None` for currencies whose available + pending is exactly zero,
/// and for entries whose sum overflows.
fn balance_record(currency: String, balances: &Value, now_ns: i64) -> Option<MetricRecord> {
    let available = number(balances.get("available"));
    let pending = number(balances.get("pending"));
    let total = available + pending;

    if total == 0.0 {
        debug!(currency = %currency, "Skipping zero balance");
        return None;
    }

    MetricRecord::builder(BALANCE_MEASUREMENT)
        .tag("currency", currency.clone())
        .field("available", available)
        .field("pending", pending)
        .field("total", total)
        .timestamp_ns(now_ns)
        .build()
        .inspect_err(|e| warn!(currency = %currency, error = %e, "Skipping balance"))
        .ok()
}
