use chrono::{DateTime, Local, NaiveDate, Utc};
use tracing::{debug, info, warn};

use super::{is_multiple, Award, AwardKind, SessionOutcome, SessionRules, UserStats};
use crate::events::Event;
use crate::growth::{Forest, Stage};
use crate::rewards::RewardLedger;
use crate::stats::SessionLog;
use crate::storage::{Identity, KeyValueStore, ProfileSnapshot, ProfileStore};
use crate::timer::IntervalKind;

/// Owns one identity's profile for the length of an invocation and applies
/// focus completions to it.
///
/// The profile is read once in [`open`](Self::open) and written after every
/// mutation. Writes are best-effort: a failure is logged and the in-memory
/// state is kept.
pub struct SessionOrchestrator<S> {
    store: ProfileStore<S>,
    identity: Option<Identity>,
    rules: SessionRules,
    profile: ProfileSnapshot,
}

impl<S: KeyValueStore> SessionOrchestrator<S> {
    pub fn open(store: S, identity: Option<Identity>, rules: SessionRules) -> Self {
        let store = ProfileStore::new(store);
        let profile = store.load(identity.as_ref());
        Self {
            store,
            identity,
            rules,
            profile,
        }
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn rules(&self) -> &SessionRules {
        &self.rules
    }

    pub fn stats(&self) -> &UserStats {
        &self.profile.stats
    }

    pub fn forest(&self) -> &Forest {
        &self.profile.forest
    }

    pub fn ledger(&self) -> &RewardLedger {
        &self.profile.ledger
    }

    pub fn sessions(&self) -> &SessionLog {
        &self.profile.sessions
    }

    pub fn last_session_date(&self) -> Option<NaiveDate> {
        self.profile.last_session_date
    }

    pub fn profile(&self) -> &ProfileSnapshot {
        &self.profile
    }

    pub fn store(&self) -> &ProfileStore<S> {
        &self.store
    }

    /// The stored coin total matches the ledger.
    pub fn is_consistent(&self) -> bool {
        self.profile.stats.leaf_coins == self.profile.ledger.balance()
    }

    /// Record a focus completion happening now, in the local calendar.
    pub fn complete_focus_session(&mut self) -> SessionOutcome {
        let now = Utc::now();
        let today = now.with_timezone(&Local).date_naive();
        self.complete_focus_session_at(now, today)
    }

    /// Record a focus completion at `now`, with `today` as the calendar day
    /// used for the streak.
    pub fn complete_focus_session_at(
        &mut self,
        now: DateTime<Utc>,
        today: NaiveDate,
    ) -> SessionOutcome {
        let rules = self.rules;
        let mut awards = Vec::new();
        let profile = &mut self.profile;

        profile.stats.total_sessions = profile.stats.total_sessions.saturating_add(1);
        let total = profile.stats.total_sessions;

        awards.push(Award {
            kind: AwardKind::FocusSession,
            amount: rules.rewards.focus_session,
            reason: "Focus Session Completed".to_string(),
        });

        if profile.last_session_date != Some(today) {
            profile.stats.current_streak = profile.stats.current_streak.saturating_add(1);
            let streak = profile.stats.current_streak;
            if is_multiple(streak, rules.streak_bonus_every) {
                awards.push(Award {
                    kind: AwardKind::StreakBonus,
                    amount: rules.rewards.streak_bonus,
                    reason: format!("{streak}-Day Streak Bonus"),
                });
            }
            profile.last_session_date = Some(today);
        }

        if is_multiple(total, rules.daily_goal_every) {
            awards.push(Award {
                kind: AwardKind::DailyGoal,
                amount: rules.rewards.daily_goal,
                reason: "Daily Goal Achieved".to_string(),
            });
        }
        if is_multiple(total, rules.weekly_goal_every) {
            awards.push(Award {
                kind: AwardKind::WeeklyGoal,
                amount: rules.rewards.weekly_goal,
                reason: "Weekly Goal Achieved".to_string(),
            });
        }

        let mut planted = None;
        let mut stage_changes = Vec::new();
        if is_multiple(total, rules.plant_every) {
            planted = Some(profile.forest.plant_tree(now).clone());
            profile.stats.trees_planted = profile.stats.trees_planted.saturating_add(1);
            awards.push(Award {
                kind: AwardKind::TreePlanted,
                amount: rules.rewards.tree_planted,
                reason: "New Tree Planted".to_string(),
            });
        } else {
            stage_changes = profile.forest.grow_trees(&rules.thresholds);
            for change in &stage_changes {
                awards.push(Award {
                    kind: AwardKind::TreeGrowth,
                    amount: rules.rewards.tree_growth,
                    reason: format!("Tree Grew to {}", stage_title(change.to)),
                });
            }
        }

        // A zero amount is not a ledger credit, so it is not an award either.
        awards.retain(|award| award.amount > 0);
        for award in &awards {
            profile.ledger.add_coins_at(award.amount, award.reason.clone(), now);
        }
        profile.stats.leaf_coins = profile.ledger.balance();
        profile
            .sessions
            .record(IntervalKind::Focus, rules.focus_minutes, now);

        info!(
            total_sessions = total,
            streak = profile.stats.current_streak,
            coins = profile.stats.leaf_coins,
            "focus session recorded"
        );

        let outcome_stats = profile.stats.clone();
        let persisted = self.persist();
        SessionOutcome {
            total_sessions: outcome_stats.total_sessions,
            current_streak: outcome_stats.current_streak,
            awards,
            planted,
            stage_changes,
            balance: outcome_stats.leaf_coins,
            persisted,
        }
    }

    /// React to a timer event. Only a completed focus interval does anything.
    pub fn handle_event(&mut self, event: &Event) -> Option<SessionOutcome> {
        match event {
            Event::TimerCompleted {
                kind: IntervalKind::Focus,
                at,
                ..
            } => {
                let today = at.with_timezone(&Local).date_naive();
                Some(self.complete_focus_session_at(*at, today))
            }
            _ => None,
        }
    }

    /// Spend coins if the balance allows it. Returns false and changes
    /// nothing otherwise.
    pub fn spend_coins(&mut self, amount: u32, reason: impl Into<String>) -> bool {
        if !self.profile.ledger.spend_coins(amount, reason) {
            debug!(amount, balance = self.profile.ledger.balance(), "spend refused");
            return false;
        }
        self.profile.stats.leaf_coins = self.profile.ledger.balance();
        self.persist();
        true
    }

    /// Write the profile. Returns whether it reached the store.
    pub fn persist(&self) -> bool {
        if self.identity.is_none() {
            debug!("no identity connected, profile kept in memory only");
            return false;
        }
        match self.store.save(self.identity.as_ref(), &self.profile) {
            Ok(written) => {
                debug!(keys = written, "profile saved");
                true
            }
            Err(err) => {
                warn!(error = %err, "failed to persist profile");
                false
            }
        }
    }
}

fn stage_title(stage: Stage) -> &'static str {
    match stage {
        Stage::Seedling => "Seedling",
        Stage::Sapling => "Sapling",
        Stage::Tree => "Tree",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::storage::MemoryStore;
    use chrono::{Duration, TimeZone};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    fn noon(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, d, 12, 0, 0).unwrap()
    }

    fn alice() -> Identity {
        Identity::new("0xA11CE").unwrap()
    }

    fn orchestrator(kv: &MemoryStore) -> SessionOrchestrator<&MemoryStore> {
        SessionOrchestrator::open(kv, Some(alice()), SessionRules::default())
    }

    #[test]
    fn four_sessions_in_one_day_plant_a_tree_and_earn_eighty() {
        let kv = MemoryStore::new();
        let mut orch = orchestrator(&kv);
        let mut outcomes = Vec::new();
        for i in 0..4 {
            let at = noon(10) + Duration::minutes(30 * i);
            outcomes.push(orch.complete_focus_session_at(at, day(10)));
        }

        assert_eq!(orch.stats().total_sessions, 4);
        assert_eq!(orch.stats().trees_planted, 1);
        assert_eq!(orch.stats().current_streak, 1);
        assert_eq!(orch.stats().leaf_coins, 80);
        assert_eq!(orch.forest().len(), 1);
        assert_eq!(orch.forest().trees()[0].stage, Stage::Seedling);
        assert!(outcomes[3].planted.is_some());
        assert!(outcomes[..3].iter().all(|o| o.planted.is_none()));
        assert!(orch.is_consistent());
    }

    #[test]
    fn ledger_reasons_in_award_order() {
        let kv = MemoryStore::new();
        let mut orch = orchestrator(&kv);
        for _ in 0..4 {
            orch.complete_focus_session_at(noon(10), day(10));
        }
        let reasons: Vec<&str> = orch
            .ledger()
            .transactions()
            .iter()
            .map(|t| t.reason.as_str())
            .collect();
        assert_eq!(
            reasons,
            vec![
                "Focus Session Completed",
                "Focus Session Completed",
                "Focus Session Completed",
                "Focus Session Completed",
                "Daily Goal Achieved",
                "New Tree Planted",
            ]
        );
    }

    #[test]
    fn streak_counts_distinct_days_and_pays_every_third() {
        let kv = MemoryStore::new();
        let mut orch = orchestrator(&kv);
        orch.complete_focus_session_at(noon(1), day(1));
        orch.complete_focus_session_at(noon(1), day(1));
        assert_eq!(orch.stats().current_streak, 1);

        orch.complete_focus_session_at(noon(2), day(2));
        let third = orch.complete_focus_session_at(noon(5), day(5));
        assert_eq!(orch.stats().current_streak, 3);
        assert!(third.awards.iter().any(|a| {
            a.kind == AwardKind::StreakBonus && a.reason == "3-Day Streak Bonus" && a.amount == 5
        }));
        assert_eq!(orch.last_session_date(), Some(day(5)));
    }

    #[test]
    fn growth_awards_follow_stage_changes() {
        let kv = MemoryStore::new();
        let mut orch = orchestrator(&kv);
        for _ in 0..4 {
            orch.complete_focus_session_at(noon(10), day(10));
        }
        // Sessions 5, 6, 7 grow the first tree to 3 sessions: sapling.
        let mut last = SessionOutcome::default();
        for _ in 0..3 {
            last = orch.complete_focus_session_at(noon(10), day(10));
        }
        assert_eq!(last.stage_changes.len(), 1);
        assert_eq!(last.stage_changes[0].to, Stage::Sapling);
        assert!(last
            .awards
            .iter()
            .any(|a| a.kind == AwardKind::TreeGrowth && a.reason == "Tree Grew to Sapling"));
        assert_eq!(orch.stats().leaf_coins, 80 + 30 + 15);
        assert!(orch.is_consistent());
    }

    #[test]
    fn twentieth_session_pays_weekly_goal() {
        let kv = MemoryStore::new();
        let mut orch = orchestrator(&kv);
        let mut last = SessionOutcome::default();
        for _ in 0..20 {
            last = orch.complete_focus_session_at(noon(10), day(10));
        }
        let kinds: Vec<AwardKind> = last.awards.iter().map(|a| a.kind).collect();
        assert_eq!(
            kinds,
            vec![
                AwardKind::FocusSession,
                AwardKind::DailyGoal,
                AwardKind::WeeklyGoal,
                AwardKind::TreePlanted,
            ]
        );
        assert_eq!(orch.stats().trees_planted, 5);
    }

    #[test]
    fn state_survives_reopen() {
        let kv = MemoryStore::new();
        {
            let mut orch = orchestrator(&kv);
            for _ in 0..5 {
                orch.complete_focus_session_at(noon(10), day(10));
            }
            assert!(orch.spend_coins(20, "Golden Oak"));
        }
        let reopened = orchestrator(&kv);
        assert_eq!(reopened.stats().total_sessions, 5);
        assert_eq!(reopened.stats().leaf_coins, 70);
        assert_eq!(reopened.forest().len(), 1);
        assert_eq!(reopened.sessions().len(), 5);
        assert_eq!(reopened.last_session_date(), Some(day(10)));
    }

    #[test]
    fn spend_beyond_balance_changes_nothing() {
        let kv = MemoryStore::new();
        let mut orch = orchestrator(&kv);
        orch.complete_focus_session_at(noon(10), day(10));
        let before = orch.profile().clone();
        assert!(!orch.spend_coins(11, "Too much"));
        assert_eq!(orch.profile(), &before);
        assert!(orch.spend_coins(10, "Exactly"));
        assert_eq!(orch.stats().leaf_coins, 0);
    }

    #[test]
    fn no_identity_means_no_writes() {
        let kv = MemoryStore::new();
        let mut orch = SessionOrchestrator::open(&kv, None, SessionRules::default());
        let outcome = orch.complete_focus_session_at(noon(10), day(10));
        assert!(!outcome.persisted);
        assert_eq!(orch.stats().total_sessions, 1);
        assert!(kv.is_empty());
    }

    #[test]
    fn only_focus_completions_are_handled() {
        let kv = MemoryStore::new();
        let mut orch = orchestrator(&kv);
        let brk = Event::TimerCompleted {
            kind: IntervalKind::ShortBreak,
            next_kind: IntervalKind::Focus,
            focus_sessions: 1,
            at: noon(10),
        };
        assert!(orch.handle_event(&brk).is_none());
        let focus = Event::TimerCompleted {
            kind: IntervalKind::Focus,
            next_kind: IntervalKind::ShortBreak,
            focus_sessions: 1,
            at: noon(10),
        };
        let outcome = orch.handle_event(&focus).unwrap();
        assert_eq!(outcome.total_sessions, 1);
        assert_eq!(outcome.coins_awarded(), 10);
    }

    #[test]
    fn zero_amount_rewards_are_left_out_of_the_outcome() {
        let kv = MemoryStore::new();
        let mut rules = SessionRules::default();
        rules.rewards.daily_goal = 0;
        rules.rewards.streak_bonus = 0;
        let mut orch = SessionOrchestrator::open(&kv, Some(alice()), rules);

        let mut outcomes = Vec::new();
        for d in 1..=4 {
            let before = orch.ledger().balance();
            let outcome = orch.complete_focus_session_at(noon(d), day(d));
            assert_eq!(i64::from(outcome.coins_awarded()), orch.ledger().balance() - before);
            outcomes.push(outcome);
        }

        assert_eq!(orch.stats().current_streak, 4);
        let kinds: Vec<AwardKind> = outcomes
            .iter()
            .flat_map(|o| o.awards.iter().map(|a| a.kind))
            .collect();
        assert!(!kinds.contains(&AwardKind::DailyGoal));
        assert!(!kinds.contains(&AwardKind::StreakBonus));
        assert!(kinds.contains(&AwardKind::TreePlanted));
        let award_count: usize = outcomes.iter().map(|o| o.awards.len()).sum();
        assert_eq!(award_count, orch.ledger().len());
    }

    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Locked)
        }
    }

    #[test]
    fn failed_write_keeps_in_memory_state() {
        let mut orch =
            SessionOrchestrator::open(FailingStore, Some(alice()), SessionRules::default());
        let outcome = orch.complete_focus_session_at(noon(10), day(10));
        assert!(!outcome.persisted);
        assert_eq!(orch.stats().total_sessions, 1);
        assert_eq!(orch.stats().leaf_coins, 10);
    }
}
