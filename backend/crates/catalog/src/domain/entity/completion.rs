//! Module Completion Entity
//!
//! At most one record per (learner, module). An absent record means the
//! module is not completed.

use chrono::{DateTime, Utc};
use kernel::id::{CompletionId, LearnerId, ModuleId};

/// Completion record
#[derive(Debug, Clone)]
pub struct ModuleCompletion {
    pub id: CompletionId,
    pub learner_id: LearnerId,
    pub module_id: ModuleId,
    pub is_completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
}

impl ModuleCompletion {
    /// Flip the flag, stamping or clearing the completion time
    pub fn toggle(&mut self, now: DateTime<Utc>) {
        self.is_completed = !self.is_completed;
        self.completed_at = self.is_completed.then_some(now);
    }
}
