//! Snapshot history with undo/redo.
//!
//! The manager keeps snapshots in memory only. Persisting them is up to the
//! host.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{FormatResult, RuleOptions, RuleRegistry};

/// Default number of retained snapshots.
pub const DEFAULT_CAPACITY: usize = 50;

/// Enabled flag of one rule at snapshot time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleState {
    pub id: String,
    pub enabled: bool,
}

/// Document content plus the rule configuration it was edited under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Assigned by [`SnapshotManager::push`]; 0 until then.
    pub id: u64,
    pub content: String,
    pub rule_states: Vec<RuleState>,
    pub current_preset: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl Snapshot {
    /// Creates a snapshot stamped with the current time.
    pub fn new(
        content: impl Into<String>,
        rule_states: Vec<RuleState>,
        current_preset: Option<String>,
    ) -> Self {
        Self {
            id: 0,
            content: content.into(),
            rule_states,
            current_preset,
            timestamp: Utc::now(),
        }
    }

    /// Captures the enabled state of every rule in `registry`.
    pub fn capture(
        content: impl Into<String>,
        registry: &RuleRegistry,
        options: &RuleOptions,
        preset: Option<&str>,
    ) -> Self {
        let enabled: Vec<&str> = registry
            .enabled_rules(options)
            .iter()
            .map(|rule| rule.id)
            .collect();
        let rule_states = registry
            .iter()
            .map(|rule| RuleState {
                id: rule.id.to_string(),
                enabled: enabled.contains(&rule.id),
            })
            .collect();
        Self::new(content, rule_states, preset.map(str::to_string))
    }

    /// Overrides the timestamp.
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Returns true if both snapshots hold the same content and configuration.
    pub fn same_state(&self, other: &Snapshot) -> bool {
        self.content == other.content
            && self.rule_states == other.rule_states
            && self.current_preset == other.current_preset
    }
}

/// Bounded snapshot history with an undo/redo cursor.
#[derive(Debug, Clone)]
pub struct SnapshotManager {
    capacity: usize,
    entries: VecDeque<Snapshot>,
    /// Index of the current snapshot in `entries`.
    cursor: Option<usize>,
    next_id: u64,
}

impl Default for SnapshotManager {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl SnapshotManager {
    /// Creates a manager retaining at most `capacity` snapshots (minimum 1).
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: VecDeque::new(),
            cursor: None,
            next_id: 1,
        }
    }

    /// Records a snapshot and makes it current.
    ///
    /// Snapshots taken after an undo discard the redo branch. A snapshot
    /// equal to the current one only refreshes its timestamp.
    pub fn push(&mut self, mut snapshot: Snapshot) -> &Snapshot {
        if let Some(cursor) = self.cursor {
            self.entries.truncate(cursor + 1);
        }

        if let Some(last) = self.entries.back_mut()
            && last.same_state(&snapshot)
        {
            last.timestamp = snapshot.timestamp;
            debug!("Snapshot {} unchanged, refreshed timestamp", last.id);
        } else {
            snapshot.id = self.next_id;
            self.next_id += 1;
            self.entries.push_back(snapshot);
            while self.entries.len() > self.capacity {
                self.entries.pop_front();
            }
        }

        let current = self.entries.len() - 1;
        self.cursor = Some(current);
        &self.entries[current]
    }

    /// The most recently recorded snapshot.
    pub fn latest(&self) -> Option<&Snapshot> {
        self.entries.back()
    }

    /// The snapshot the undo cursor points at.
    pub fn current(&self) -> Option<&Snapshot> {
        self.cursor.and_then(|cursor| self.entries.get(cursor))
    }

    /// All snapshots, newest first.
    pub fn list(&self) -> Vec<&Snapshot> {
        self.entries.iter().rev().collect()
    }

    /// Looks up a snapshot by id.
    pub fn get(&self, id: u64) -> Option<&Snapshot> {
        self.entries.iter().find(|snapshot| snapshot.id == id)
    }

    /// Removes a snapshot. Returns false if no snapshot has this id.
    pub fn delete(&mut self, id: u64) -> bool {
        let Some(index) = self.entries.iter().position(|snapshot| snapshot.id == id) else {
            return false;
        };
        self.entries.remove(index);

        self.cursor = match self.cursor {
            _ if self.entries.is_empty() => None,
            Some(cursor) if index < cursor => Some(cursor - 1),
            Some(cursor) => Some(cursor.min(self.entries.len() - 1)),
            None => None,
        };
        true
    }

    /// Removes every snapshot. Ids keep increasing afterwards.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = None;
    }

    /// Moves the cursor back one snapshot.
    pub fn undo(&mut self) -> Option<&Snapshot> {
        let cursor = self.cursor.filter(|cursor| *cursor > 0)? - 1;
        self.cursor = Some(cursor);
        self.entries.get(cursor)
    }

    /// Moves the cursor forward one snapshot.
    pub fn redo(&mut self) -> Option<&Snapshot> {
        let cursor = self.cursor? + 1;
        if cursor >= self.entries.len() {
            return None;
        }
        self.cursor = Some(cursor);
        self.entries.get(cursor)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor.is_some_and(|cursor| cursor > 0)
    }

    pub fn can_redo(&self) -> bool {
        self.cursor
            .is_some_and(|cursor| cursor + 1 < self.entries.len())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Persistable record of one formatting invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    /// Content fingerprint of input and output.
    pub id: String,
    pub input: String,
    pub output: String,
    pub applied_rules: Vec<String>,
    pub issue_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl HistoryItem {
    /// Builds a history record from a format result.
    pub fn from_result(input: &str, result: &FormatResult, preset: Option<&str>) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(input.as_bytes());
        hasher.update(&[0]);
        hasher.update(result.formatted.as_bytes());
        let id = hasher.finalize().to_hex()[..16].to_string();

        Self {
            id,
            input: input.to_string(),
            output: result.formatted.clone(),
            applied_rules: result.applied_rules.clone(),
            issue_count: result.issue_count(),
            preset: preset.map(str::to_string),
            timestamp: Utc::now(),
        }
    }
}
