//! In-memory audit trail for governance actions.
//!
//! Stores per-search entries capped at a configurable maximum (default 500)
//! with FIFO eviction. Uses `std::sync::RwLock` so dashboards and sweep
//! jobs can share one instance across threads.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::engine::Transition;

/// One audit trail entry, mirroring a governance audit lookup row.
#[derive(Debug, Clone, Serialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    pub action: String,
    pub search_name: String,
    pub performed_by: String,
    pub details: String,
}

/// Query parameters for filtering audit entries.
#[derive(Debug, Default, Deserialize)]
pub struct AuditQuery {
    /// Filter to a specific action name (e.g. "notify").
    pub action: Option<String>,
    /// Only entries at or after this timestamp.
    pub since: Option<DateTime<Utc>>,
    /// Maximum number of entries to return (default 100).
    pub limit: Option<u32>,
}

/// In-memory per-search audit trail with FIFO eviction.
pub struct AuditTrail {
    entries: Arc<RwLock<HashMap<String, VecDeque<AuditEntry>>>>,
    max_entries_per_search: usize,
}

impl AuditTrail {
    /// Default cap of 500 entries per search.
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            max_entries_per_search: 500,
        }
    }

    /// Custom per-search entry cap.
    pub fn with_max_entries(max: usize) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            max_entries_per_search: max,
        }
    }

    /// Append an entry stamped with the current time.
    pub fn record(
        &self,
        search_name: &str,
        action: &str,
        performed_by: &str,
        details: impl Into<String>,
    ) {
        self.record_at(Utc::now(), search_name, action, performed_by, details);
    }

    /// Append an entry with an explicit timestamp (injected clocks in tests
    /// and sweeps).
    pub fn record_at(
        &self,
        timestamp: DateTime<Utc>,
        search_name: &str,
        action: &str,
        performed_by: &str,
        details: impl Into<String>,
    ) {
        let entry = AuditEntry {
            timestamp,
            action: action.to_string(),
            search_name: search_name.to_string(),
            performed_by: performed_by.to_string(),
            details: details.into(),
        };

        let mut guard = self.entries.write().expect("audit trail lock poisoned");
        let deque = guard
            .entry(search_name.to_string())
            .or_insert_with(VecDeque::new);
        deque.push_back(entry);
        while deque.len() > self.max_entries_per_search {
            deque.pop_front();
        }
    }

    /// Record a successful engine transition.
    pub fn record_transition(
        &self,
        at: DateTime<Utc>,
        transition: &Transition,
        action: &Action,
        performed_by: &str,
    ) {
        self.record_at(
            at,
            &transition.search_name,
            action.name(),
            performed_by,
            format!(
                "status {} to {}",
                transition.previous_status, transition.new_status
            ),
        );
    }

    /// Query entries for a search, newest-first. The lock is held only for
    /// the clone+filter.
    pub fn query(&self, search_name: &str, params: &AuditQuery) -> Vec<AuditEntry> {
        let guard = self.entries.read().expect("audit trail lock poisoned");
        let Some(deque) = guard.get(search_name) else {
            return Vec::new();
        };

        let limit = params.limit.unwrap_or(100) as usize;

        deque
            .iter()
            .rev()
            .filter(|e| params.action.as_ref().map_or(true, |a| &e.action == a))
            .filter(|e| params.since.map_or(true, |s| e.timestamp >= s))
            .take(limit)
            .cloned()
            .collect()
    }

    /// Drop all entries for a search.
    pub fn clear(&self, search_name: &str) {
        let mut guard = self.entries.write().expect("audit trail lock poisoned");
        guard.remove(search_name);
    }
}

impl Default for AuditTrail {
    fn default() -> Self {
        Self::new()
    }
}
