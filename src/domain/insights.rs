// Salient facts derived from usage aggregates
use super::error::AdviceError;
use super::usage::{FaucetTotals, HourlyTotals, hour_label};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insights {
    pub max_faucet: String,
    pub max_faucet_usage: f64,
    pub avg_faucet_usage: f64,
    pub peak_hour: String,
    pub peak_hour_usage: f64,
    pub total_usage: f64,
}

impl Insights {
    /// Derive insights from both aggregates.
    ///
    /// Ties for the largest value go to the first key in iteration order,
    /// which is ascending key order for both aggregates.
    pub fn extract(faucets: &FaucetTotals, hourly: &HourlyTotals) -> Result<Self, AdviceError> {
        if faucets.is_empty() {
            return Err(AdviceError::InsufficientData("no faucet totals"));
        }
        if hourly.is_empty() {
            return Err(AdviceError::InsufficientData("no hourly totals"));
        }

        let (max_faucet, max_faucet_usage) =
            first_max(faucets.iter()).ok_or(AdviceError::InsufficientData("no faucet totals"))?;
        let (peak_hour, peak_hour_usage) =
            first_max(hourly.iter()).ok_or(AdviceError::InsufficientData("no hourly totals"))?;

        let total_usage = faucets.total();
        let avg_faucet_usage = total_usage / faucets.len() as f64;

        Ok(Self {
            max_faucet: max_faucet.to_string(),
            max_faucet_usage,
            avg_faucet_usage,
            peak_hour: hour_label(peak_hour),
            peak_hour_usage,
            total_usage,
        })
    }
}

/// Largest value, keeping the earliest key on ties.
fn first_max<K>(entries: impl Iterator<Item = (K, f64)>) -> Option<(K, f64)> {
    entries.fold(None, |best, (key, value)| match best {
        Some((_, best_value)) if value <= best_value => best,
        _ => Some((key, value)),
    })
}
