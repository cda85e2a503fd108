// Usage records and the aggregates built from them
use chrono::{NaiveDateTime, Timelike};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub struct UsageRecord {
    pub faucet_id: String,
    pub timestamp: NaiveDateTime,
    pub usage_liters: f64,
}

impl UsageRecord {
    pub fn new(faucet_id: String, timestamp: NaiveDateTime, usage_liters: f64) -> Self {
        Self {
            faucet_id,
            timestamp,
            usage_liters,
        }
    }
}

/// Litres per faucet. Keys iterate in ascending id order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FaucetTotals(BTreeMap<String, f64>);

impl FaucetTotals {
    pub fn add(&mut self, faucet_id: &str, liters: f64) {
        *self.0.entry(faucet_id.to_string()).or_insert(0.0) += liters;
    }

    #[cfg(test)]
    pub fn get(&self, faucet_id: &str) -> Option<f64> {
        self.0.get(faucet_id).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }
}

/// Litres per hour of day (0-23). Hours with no readings are absent, not zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HourlyTotals(BTreeMap<u32, f64>);

impl HourlyTotals {
    pub fn add(&mut self, hour: u32, liters: f64) {
        *self.0.entry(hour).or_insert(0.0) += liters;
    }

    #[cfg(test)]
    pub fn get(&self, hour: u32) -> Option<f64> {
        self.0.get(&hour).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.0.iter().map(|(k, v)| (*k, *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }
}

/// Both aggregates of one analysis run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UsageAggregates {
    pub faucets: FaucetTotals,
    pub hourly: HourlyTotals,
}

impl UsageAggregates {
    /// Sums records by faucet and by naive hour of day.
    pub fn from_records(records: &[UsageRecord]) -> Self {
        let mut aggregates = Self::default();
        for record in records {
            aggregates.faucets.add(&record.faucet_id, record.usage_liters);
            aggregates
                .hourly
                .add(record.timestamp.hour(), record.usage_liters);
        }
        aggregates
    }
}

/// Render an hour of day on the 12-hour clock, e.g. 0 -> "12 AM", 13 -> "1 PM".
pub fn hour_label(hour: u32) -> String {
    let display = match hour % 12 {
        0 => 12,
        h => h,
    };
    let suffix = if hour < 12 { "AM" } else { "PM" };
    format!("{} {}", display, suffix)
}

/// Friendly chart label for a faucet id.
pub fn faucet_label(faucet_id: &str) -> String {
    match faucet_id {
        "Bathroom_1" => "Bathroom Sink 1".to_string(),
        "Bathroom_2" => "Bathroom Sink 2".to_string(),
        "Kitchen" => "Kitchen Sink".to_string(),
        "Shower_1" => "Shower 1".to_string(),
        "Shower_2" => "Shower 2".to_string(),
        "Dishwasher" => "Dishwasher".to_string(),
        "Garden_Hose" => "Garden Hose".to_string(),
        other => other.trim_end_matches('_').replace('_', " "),
    }
}

/// One faucet slice for the usage-by-faucet chart.
#[derive(Debug, Clone, Serialize)]
pub struct FaucetUsage {
    pub faucet_id: String,
    pub label: String,
    pub usage_liters: f64,
}

/// One point of the hourly trend chart.
#[derive(Debug, Clone, Serialize)]
pub struct HourlyUsage {
    pub hour: u32,
    pub label: String,
    pub usage_liters: f64,
}

impl FaucetTotals {
    pub fn to_chart(&self) -> Vec<FaucetUsage> {
        self.iter()
            .map(|(id, liters)| FaucetUsage {
                faucet_id: id.to_string(),
                label: faucet_label(id),
                usage_liters: liters,
            })
            .collect()
    }
}

impl HourlyTotals {
    pub fn to_chart(&self) -> Vec<HourlyUsage> {
        self.iter()
            .map(|(hour, liters)| HourlyUsage {
                hour,
                label: hour_label(hour),
                usage_liters: liters,
            })
            .collect()
    }
}

#[cfg(test)]
pub(crate) fn record(faucet_id: &str, timestamp: &str, liters: f64) -> UsageRecord {
    UsageRecord::new(
        faucet_id.to_string(),
        NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%d %H:%M:%S").unwrap(),
        liters,
    )
}
