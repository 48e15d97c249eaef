//! Caller-facing response shapes.
//!
//! Records inside these shapes (assets, quotes, account balances) are passed
//! through as raw JSON; only the envelopes are normalized.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single quote record (symbol, price, variation, bid/ask, ...).
pub type Quote = Value;

/// Instrument detail, passed through unchanged.
pub type InstrumentDetail = Value;

/// Normalized portfolio.
///
/// Totals keep the server's JSON value as-is, so `1000` stays an integer
/// and an unexpected string is not lost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    /// Asset records, in server order.
    pub activos: Vec<Value>,
    /// Total value in pesos.
    pub total: Value,
    /// Total value in dollars.
    pub total_usd: Value,
}

impl Default for Portfolio {
    fn default() -> Self {
        Self {
            activos: Vec::new(),
            total: Value::from(0),
            total_usd: Value::from(0),
        }
    }
}

impl Portfolio {
    /// Normalize a raw `/portafolio` payload.
    ///
    /// `totalEnPesos` and `totalEnDolares` become `total` and `total_usd`.
    /// Absent totals are `0`; absent or non-array `activos` is empty.
    pub fn from_payload(data: &Value) -> Self {
        Self {
            activos: array_field(data, "activos"),
            total: total_field(data, "totalEnPesos"),
            total_usd: total_field(data, "totalEnDolares"),
        }
    }
}

/// Normalized account status.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountStatus {
    /// Balance records, one per account/currency.
    pub cuentas: Vec<Value>,
}

impl AccountStatus {
    /// Normalize a raw `/estadocuenta` payload.
    pub fn from_payload(data: &Value) -> Self {
        Self {
            cuentas: array_field(data, "cuentas"),
        }
    }
}

/// Normalize a quotes payload: a bare array, or an object wrapping the array
/// under `titulos`.
pub fn quotes_from_payload(data: Value) -> Vec<Quote> {
    match data {
        Value::Array(items) => items,
        other => array_field(&other, "titulos"),
    }
}

fn array_field(data: &Value, key: &str) -> Vec<Value> {
    data.get(key)
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}

fn total_field(data: &Value, key: &str) -> Value {
    data.get(key).cloned().unwrap_or_else(|| Value::from(0))
}
