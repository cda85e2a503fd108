// Source trait for usage record ingestion
use crate::domain::error::AdviceError;
use crate::domain::usage::UsageRecord;

pub trait UsageSource: Send + Sync {
    /// Read every usage record once, in source order.
    fn load(&self) -> Result<Vec<UsageRecord>, AdviceError>;
}
