use crate::derive::{AnalyticsSummary, summarize};
use crate::store::ViewState;

use super::Session;

/// Whole-team analytics over every task in the snapshot.
#[must_use]
pub fn analytics(state: &ViewState, session: &Session<'_>) -> AnalyticsSummary {
    summarize(state.tasks(), session.users)
}
