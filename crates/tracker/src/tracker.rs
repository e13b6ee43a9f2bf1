//! Thread-safe per-team request tracking.

use crate::config::TrackerConfig;
use crate::request::{StatusSnapshot, SupplyRequest};
use muster_common::{PlayerId, TeamId};
use parking_lot::Mutex;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Result of opening a request.
#[derive(Debug, Clone)]
pub struct OpenReceipt {
    /// An in-flight request for the same team was discarded
    pub replaced_in_flight: bool,

    /// Confirmations thrown away with the discarded request
    pub discarded_confirmations: usize,

    /// Fresh (all-zero) status of the new request
    pub status: StatusSnapshot,
}

/// Result of recording a confirmation.
#[derive(Debug, Clone)]
pub enum ConfirmOutcome {
    /// The confirmation was counted
    Accepted(ConfirmationReceipt),

    /// This fulfiller already confirmed this category
    AlreadyConfirmed,

    /// The team has no request open
    NoActiveRequest,
}

/// Everything the caller needs after an accepted confirmation, captured in
/// the same critical section that recorded it. `requester` is carried here
/// because a completing confirmation retires the request before the lock is
/// released, so it cannot be queried afterwards.
#[derive(Debug, Clone)]
pub struct ConfirmationReceipt {
    pub requester: PlayerId,
    pub completed: bool,
    pub status: StatusSnapshot,
}

/// Tracks at most one active supply request per team.
///
/// A single coarse mutex guards the team map: open, confirm and clear are
/// atomic with respect to each other, and completion detection runs inside
/// the confirming call's critical section. Nothing under the lock blocks or
/// does I/O.
#[derive(Debug)]
pub struct RequestTracker {
    config: TrackerConfig,
    active: Mutex<HashMap<TeamId, SupplyRequest>>,
}

impl RequestTracker {
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            config,
            active: Mutex::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Open a request for `team`, replacing any in-flight one.
    ///
    /// Replacement is the documented policy: the requester is the only
    /// player allowed to open requests for the team, and reissuing the
    /// command resets the tally. The receipt says whether (and how much)
    /// progress was discarded.
    pub fn open_request(
        &self,
        team: &TeamId,
        requester: &PlayerId,
        fulfiller_count: usize,
    ) -> OpenReceipt {
        let request = SupplyRequest::new(requester.clone(), fulfiller_count);
        let status = request.snapshot(&self.config);

        let mut active = self.active.lock();
        let replaced = active.insert(team.clone(), request);
        drop(active);

        let discarded = replaced.as_ref().map_or(0, SupplyRequest::total_confirmations);
        if let Some(ref old) = replaced {
            warn!(
                team = %team,
                request_id = %old.id(),
                discarded_confirmations = discarded,
                "Reopened request, discarding in-flight progress"
            );
        }
        info!(team = %team, requester = %requester, fulfillers = fulfiller_count, "Request opened");

        OpenReceipt {
            replaced_in_flight: replaced.is_some(),
            discarded_confirmations: discarded,
            status,
        }
    }

    /// Record one fulfiller's confirmation of one category.
    ///
    /// On the confirmation that brings every category to quota, the request
    /// is retired before the lock is released; the receipt's `completed`
    /// flag is the atomic completion signal.
    pub fn record_confirmation(
        &self,
        team: &TeamId,
        code: &str,
        fulfiller: &PlayerId,
    ) -> ConfirmOutcome {
        let mut active = self.active.lock();

        let Some(request) = active.get_mut(team) else {
            return ConfirmOutcome::NoActiveRequest;
        };

        if !request.confirm(code, fulfiller) {
            return ConfirmOutcome::AlreadyConfirmed;
        }

        let completed = request.is_complete(&self.config);
        let status = request.snapshot(&self.config);
        let requester = request.requester().clone();
        let request_id = request.id().to_string();

        if completed {
            active.remove(team);
        }
        drop(active);

        debug!(team = %team, category = %code, fulfiller = %fulfiller, "Confirmation recorded");
        if completed {
            info!(team = %team, request_id = %request_id, "Request complete, retired");
        }

        ConfirmOutcome::Accepted(ConfirmationReceipt {
            requester,
            completed,
            status,
        })
    }

    /// Current progress for the team's request. Pure query.
    pub fn status(&self, team: &TeamId) -> Option<StatusSnapshot> {
        self.active
            .lock()
            .get(team)
            .map(|request| request.snapshot(&self.config))
    }

    /// True iff the team has an active request with every category at quota.
    ///
    /// Observable only mid-flight: the completing confirmation retires the
    /// request, after which this reports `false`. Pure query.
    pub fn is_complete(&self, team: &TeamId) -> bool {
        self.active
            .lock()
            .get(team)
            .is_some_and(|request| request.is_complete(&self.config))
    }

    /// Remove the team's active request. Idempotent.
    pub fn clear_request(&self, team: &TeamId) {
        if self.active.lock().remove(team).is_some() {
            debug!(team = %team, "Request cleared");
        }
    }

    /// Requester of the team's active request, if any.
    pub fn requester_of(&self, team: &TeamId) -> Option<PlayerId> {
        self.active
            .lock()
            .get(team)
            .map(|request| request.requester().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> RequestTracker {
        RequestTracker::new(TrackerConfig::default())
    }

    fn team(name: &str) -> TeamId {
        TeamId::new(name)
    }

    fn player(name: &str) -> PlayerId {
        PlayerId::new(name)
    }

    fn confirm(tracker: &RequestTracker, team: &TeamId, code: &str, who: &str) -> ConfirmOutcome {
        tracker.record_confirmation(team, code, &player(who))
    }

    #[test]
    fn confirmation_without_request_is_rejected() {
        let tracker = tracker();
        let outcome = confirm(&tracker, &team("axis"), "muni", "f1");
        assert!(matches!(outcome, ConfirmOutcome::NoActiveRequest));
        // and it must not create a request as a side effect
        assert!(tracker.status(&team("axis")).is_none());
    }

    #[test]
    fn duplicate_confirmation_counts_once() {
        let tracker = tracker();
        let allies = team("allies");
        tracker.open_request(&allies, &player("cmdr"), 5);

        assert!(matches!(
            confirm(&tracker, &allies, "muni", "f1"),
            ConfirmOutcome::Accepted(_)
        ));
        assert!(matches!(
            confirm(&tracker, &allies, "muni", "f1"),
            ConfirmOutcome::AlreadyConfirmed
        ));

        let status = tracker.status(&allies).unwrap();
        let muni = status.rows.iter().find(|r| r.code == "muni").unwrap();
        assert_eq!(muni.confirmed, 1);
    }

    #[test]
    fn same_fulfiller_may_confirm_different_categories() {
        let tracker = tracker();
        let allies = team("allies");
        tracker.open_request(&allies, &player("cmdr"), 5);

        assert!(matches!(
            confirm(&tracker, &allies, "muni", "f1"),
            ConfirmOutcome::Accepted(_)
        ));
        assert!(matches!(
            confirm(&tracker, &allies, "fuel", "f1"),
            ConfirmOutcome::Accepted(_)
        ));
    }

    #[test]
    fn partial_progress_is_not_complete() {
        // Scenario A: muni at quota, the rest untouched.
        let tracker = tracker();
        let allies = team("allies");
        tracker.open_request(&allies, &player("cmdr1"), 5);

        for who in ["f1", "f2", "f3"] {
            assert!(matches!(
                confirm(&tracker, &allies, "muni", who),
                ConfirmOutcome::Accepted(_)
            ));
        }

        let status = tracker.status(&allies).unwrap();
        assert_eq!(status.rows[0].confirmed, 3);
        assert!(status.rows[0].satisfied());
        assert_eq!(status.rows[1].confirmed, 0);
        assert_eq!(status.rows[2].confirmed, 0);
        assert!(!status.is_complete());
        assert!(!tracker.is_complete(&allies));
    }

    #[test]
    fn final_confirmation_completes_and_retires() {
        // Scenario B: nine distinct confirmations, three per category.
        let tracker = tracker();
        let allies = team("allies");
        tracker.open_request(&allies, &player("cmdr1"), 9);

        let mut last = None;
        let mut fulfiller = 0;
        for code in ["muni", "fuel", "manpower"] {
            for _ in 0..3 {
                fulfiller += 1;
                last = Some(confirm(&tracker, &allies, code, &format!("f{fulfiller}")));
            }
        }

        let ConfirmOutcome::Accepted(receipt) = last.unwrap() else {
            panic!("final confirmation must be accepted");
        };
        assert!(receipt.completed);
        assert!(receipt.status.is_complete());
        assert_eq!(receipt.requester, player("cmdr1"));

        // Auto-clear: the team is back to Absent.
        assert!(tracker.status(&allies).is_none());
        assert!(tracker.requester_of(&allies).is_none());
        assert!(matches!(
            confirm(&tracker, &allies, "muni", "f1"),
            ConfirmOutcome::NoActiveRequest
        ));
    }

    #[test]
    fn non_final_confirmations_are_not_completed() {
        let tracker = tracker();
        let allies = team("allies");
        tracker.open_request(&allies, &player("cmdr"), 5);

        let ConfirmOutcome::Accepted(receipt) = confirm(&tracker, &allies, "muni", "f1") else {
            panic!("expected accepted");
        };
        assert!(!receipt.completed);
        assert_eq!(receipt.requester, player("cmdr"));
    }

    #[test]
    fn reopen_overwrites_and_reports_discarded_progress() {
        let tracker = tracker();
        let allies = team("allies");

        let first = tracker.open_request(&allies, &player("cmdr"), 5);
        assert!(!first.replaced_in_flight);

        confirm(&tracker, &allies, "muni", "f1");
        confirm(&tracker, &allies, "fuel", "f2");

        let second = tracker.open_request(&allies, &player("cmdr"), 4);
        assert!(second.replaced_in_flight);
        assert_eq!(second.discarded_confirmations, 2);
        assert!(second.status.rows.iter().all(|r| r.confirmed == 0));

        let status = tracker.status(&allies).unwrap();
        assert!(status.rows.iter().all(|r| r.confirmed == 0));
    }

    #[test]
    fn teams_are_independent() {
        let tracker = tracker();
        let allies = team("allies");
        let axis = team("axis");
        tracker.open_request(&allies, &player("cmdr_a"), 3);
        tracker.open_request(&axis, &player("cmdr_x"), 3);

        confirm(&tracker, &allies, "muni", "f1");

        assert_eq!(tracker.status(&allies).unwrap().rows[0].confirmed, 1);
        assert_eq!(tracker.status(&axis).unwrap().rows[0].confirmed, 0);
        assert_eq!(tracker.requester_of(&axis), Some(player("cmdr_x")));
    }

    #[test]
    fn clear_request_is_idempotent() {
        let tracker = tracker();
        let allies = team("allies");
        tracker.open_request(&allies, &player("cmdr"), 3);

        tracker.clear_request(&allies);
        tracker.clear_request(&allies);
        assert!(tracker.status(&allies).is_none());
    }

    #[test]
    fn concurrent_confirmations_respect_set_semantics() {
        use std::sync::Arc;

        let tracker = Arc::new(RequestTracker::new(TrackerConfig::default()));
        let allies = team("allies");
        tracker.open_request(&allies, &player("cmdr"), 8);

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let tracker = Arc::clone(&tracker);
                let allies = allies.clone();
                // two threads per fulfiller id, all hammering muni
                std::thread::spawn(move || {
                    tracker.record_confirmation(&allies, "muni", &player(&format!("f{}", i / 2)))
                })
            })
            .collect();

        let accepted = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|o| matches!(o, ConfirmOutcome::Accepted(_)))
            .count();

        assert_eq!(accepted, 4);
        let status = tracker.status(&allies).unwrap();
        assert_eq!(status.rows[0].confirmed, 4);
    }
}
