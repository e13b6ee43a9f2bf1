//! The per-team supply request aggregate and its status snapshots.

use crate::config::TrackerConfig;
use muster_common::{normalized, PlayerId};
use std::collections::{HashMap, HashSet};
use std::time::Instant;

/// An in-flight supply request for one team.
///
/// Confirmations are sets of distinct fulfiller ids keyed by category code;
/// the same fulfiller confirming the same category twice is a no-op at this
/// level. Completion is judged against the configured category set only —
/// codes outside it are stored but never counted.
#[derive(Debug, Clone)]
pub struct SupplyRequest {
    id: String,
    requester: PlayerId,
    opened_at: Instant,
    fulfillers_notified: usize,
    confirmations: HashMap<String, HashSet<PlayerId>>,
}

impl SupplyRequest {
    pub fn new(requester: PlayerId, fulfillers_notified: usize) -> Self {
        Self {
            id: format!("req_{}", uuid::Uuid::new_v4()),
            requester,
            opened_at: Instant::now(),
            fulfillers_notified,
            confirmations: HashMap::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn requester(&self) -> &PlayerId {
        &self.requester
    }

    pub fn opened_at(&self) -> Instant {
        self.opened_at
    }

    pub fn fulfillers_notified(&self) -> usize {
        self.fulfillers_notified
    }

    /// Record a confirmation. Returns `false` if this fulfiller already
    /// confirmed this category.
    pub fn confirm(&mut self, code: &str, fulfiller: &PlayerId) -> bool {
        self.confirmations
            .entry(normalized(code))
            .or_default()
            .insert(fulfiller.clone())
    }

    pub fn confirmed_count(&self, code: &str) -> usize {
        self.confirmations
            .get(&normalized(code))
            .map_or(0, HashSet::len)
    }

    /// Total confirmations recorded across all categories.
    pub fn total_confirmations(&self) -> usize {
        self.confirmations.values().map(HashSet::len).sum()
    }

    /// True once every configured category has reached the quota.
    pub fn is_complete(&self, config: &TrackerConfig) -> bool {
        config
            .categories
            .iter()
            .all(|c| self.confirmed_count(&c.code) >= config.quota as usize)
    }

    /// Per-category progress rows in configured category order.
    pub fn snapshot(&self, config: &TrackerConfig) -> StatusSnapshot {
        StatusSnapshot {
            rows: config
                .categories
                .iter()
                .map(|c| CategoryProgress {
                    code: c.code.clone(),
                    label: c.label.clone(),
                    confirmed: self.confirmed_count(&c.code) as u32,
                    required: config.quota,
                })
                .collect(),
        }
    }
}

/// Progress of a single category toward its quota.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryProgress {
    pub code: String,
    pub label: String,
    pub confirmed: u32,
    pub required: u32,
}

impl CategoryProgress {
    pub fn satisfied(&self) -> bool {
        self.confirmed >= self.required
    }
}

/// Point-in-time view of a request's progress, one row per category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub rows: Vec<CategoryProgress>,
}

impl StatusSnapshot {
    pub fn is_complete(&self) -> bool {
        self.rows.iter().all(CategoryProgress::satisfied)
    }
}
