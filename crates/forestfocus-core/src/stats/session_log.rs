use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::timer::IntervalKind;

/// One completed interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub id: String,
    pub completed_at: DateTime<Utc>,
    pub duration_min: u32,
    pub kind: IntervalKind,
}

/// Completed sessions in completion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionLog {
    records: Vec<SessionRecord>,
}

impl SessionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, kind: IntervalKind, duration_min: u32, completed_at: DateTime<Utc>) {
        self.records.push(SessionRecord {
            id: format!("session-{}", Uuid::new_v4()),
            completed_at,
            duration_min,
            kind,
        });
    }

    pub fn records(&self) -> &[SessionRecord] {
        &self.records
    }

    /// Focus sessions only.
    pub fn focus(&self) -> impl Iterator<Item = &SessionRecord> {
        self.records.iter().filter(|r| r.kind.is_focus())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_order_and_filters_focus() {
        let mut log = SessionLog::new();
        let now = Utc::now();
        log.record(IntervalKind::Focus, 25, now);
        log.record(IntervalKind::ShortBreak, 5, now);
        log.record(IntervalKind::Focus, 25, now);
        assert_eq!(log.len(), 3);
        assert_eq!(log.focus().count(), 2);
        assert_eq!(log.records()[1].kind, IntervalKind::ShortBreak);
    }
}
