//! Metric names and recording helpers

use metrics::{counter, gauge};

pub const CALLS_TOTAL: &str = "callboard_calls_total";
pub const CALLS_REJECTED_TOTAL: &str = "callboard_calls_rejected_total";
pub const BROADCASTS_TOTAL: &str = "callboard_broadcasts_total";
pub const CONNECTED_CLIENTS: &str = "callboard_connected_clients";

/// Record an accepted call by the channel it arrived on
pub fn record_call(source: &'static str) {
    counter!(CALLS_TOTAL, "source" => source).increment(1);
}

/// Record a call rejected by validation
pub fn record_rejected_call(source: &'static str) {
    counter!(CALLS_REJECTED_TOTAL, "source" => source).increment(1);
}

pub fn record_broadcast() {
    counter!(BROADCASTS_TOTAL).increment(1);
}

pub fn set_connected_clients(count: usize) {
    gauge!(CONNECTED_CLIENTS).set(count as f64);
}
