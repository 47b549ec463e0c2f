use crate::shared::entity::ID;
use std::collections::HashSet;

/// One calendar day permanently removed from a series. Recorded when the
/// user deletes a single occurrence without detaching it; the expander
/// never materializes an event for a recorded `(series, day)` again.
#[derive(Debug, Clone, PartialEq)]
pub struct RecurrenceException {
    pub series_id: ID,
    pub day_key: String,
}

impl RecurrenceException {
    pub fn new(series_id: ID, day_key: impl Into<String>) -> Self {
        Self {
            series_id,
            day_key: day_key.into(),
        }
    }
}

/// The form the expander consumes the ledger in.
pub fn day_key_set(exceptions: &[RecurrenceException]) -> HashSet<String> {
    exceptions.iter().map(|e| e.day_key.clone()).collect()
}
