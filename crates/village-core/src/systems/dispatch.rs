//! Guild Dispatcher
//!
//! Converts resource deficits into candidate actions. The board is
//! recomputed from the ledger exactly once per tick, before any agent
//! selects, so every agent choosing in the same tick sees an identical
//! candidate list.
//!
//! Issue rules, per resource key (non-exclusive):
//! - effective availability below its target -> Explore issue
//! - stock below its target -> Gather issue, capped at effective
//!   availability (you cannot harvest more than is reachable)

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::components::world::{ResourceKey, ResourceLedger};

/// The kind of work a dispatch record asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchKind {
    Explore,
    Gather,
}

/// One candidate action the guild wants done, with its deficit amount.
///
/// Ephemeral: recomputed each cycle, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchRecord {
    pub kind: DispatchKind,
    pub resource: ResourceKey,
    pub amount: u32,
}

/// This tick's dispatch snapshot, shared by all agents reselecting.
#[derive(Resource, Debug, Default)]
pub struct DispatchBoard {
    pub records: Vec<DispatchRecord>,
}

impl DispatchBoard {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Pure dispatch computation over a ledger snapshot. Read-only with
/// respect to the records; keys are visited in ledger (sorted) order.
pub fn compute_dispatch(ledger: &ResourceLedger) -> Vec<DispatchRecord> {
    let mut records = Vec::new();

    for (key, record) in ledger.iter() {
        let effective = record.effective_available();

        let explore_deficit = record.target_available.saturating_sub(effective);
        if explore_deficit > 0 {
            records.push(DispatchRecord {
                kind: DispatchKind::Explore,
                resource: key.clone(),
                amount: explore_deficit,
            });
        }

        let gather_deficit = record.target_stock.saturating_sub(record.stock);
        let gather_amount = gather_deficit.min(effective);
        if gather_amount > 0 {
            records.push(DispatchRecord {
                kind: DispatchKind::Gather,
                resource: key.clone(),
                amount: gather_amount,
            });
        }
    }

    records
}

/// System that refreshes the shared board from the current ledger.
pub fn refresh_dispatch(ledger: Res<ResourceLedger>, mut board: ResMut<DispatchBoard>) {
    board.records = compute_dispatch(&ledger);
    trace!(candidates = board.records.len(), "dispatch board refreshed");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::world::ResourceRecord;

    fn ledger_with(key: &str, record: ResourceRecord) -> ResourceLedger {
        let mut ledger = ResourceLedger::new();
        ledger.insert(ResourceKey::new(key), record);
        ledger
    }

    #[test]
    fn test_explore_issued_for_availability_deficit() {
        let ledger = ledger_with(
            "herb",
            ResourceRecord {
                available: 2,
                target_available: 5,
                is_discovered: true,
                ..Default::default()
            },
        );

        let records = compute_dispatch(&ledger);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, DispatchKind::Explore);
        assert_eq!(records[0].amount, 3);
    }

    #[test]
    fn test_undiscovered_resource_counts_as_zero_available() {
        let ledger = ledger_with(
            "ore",
            ResourceRecord {
                available: 10,
                target_available: 4,
                stock: 0,
                target_stock: 6,
                is_discovered: false,
                ..Default::default()
            },
        );

        let records = compute_dispatch(&ledger);
        // Despite 10 stored available, the discovery gate forces an
        // Explore issue and suppresses gathering entirely.
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, DispatchKind::Explore);
        assert_eq!(records[0].amount, 4);
    }

    #[test]
    fn test_gather_amount_capped_at_effective_available() {
        let ledger = ledger_with(
            "tree",
            ResourceRecord {
                available: 3,
                target_available: 3,
                stock: 1,
                target_stock: 10,
                is_discovered: true,
                ..Default::default()
            },
        );

        let records = compute_dispatch(&ledger);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, DispatchKind::Gather);
        assert_eq!(records[0].amount, 3);
    }

    #[test]
    fn test_both_issues_for_double_deficit() {
        let ledger = ledger_with(
            "fish",
            ResourceRecord {
                available: 2,
                target_available: 6,
                stock: 0,
                target_stock: 4,
                is_discovered: true,
                ..Default::default()
            },
        );

        let records = compute_dispatch(&ledger);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].kind, DispatchKind::Explore);
        assert_eq!(records[0].amount, 4);
        assert_eq!(records[1].kind, DispatchKind::Gather);
        assert_eq!(records[1].amount, 2);
    }

    #[test]
    fn test_satisfied_key_emits_nothing() {
        let ledger = ledger_with(
            "crop",
            ResourceRecord {
                available: 8,
                target_available: 5,
                stock: 9,
                target_stock: 5,
                is_discovered: true,
                ..Default::default()
            },
        );

        assert!(compute_dispatch(&ledger).is_empty());
    }

    #[test]
    fn test_keys_visited_in_sorted_order() {
        let mut ledger = ResourceLedger::new();
        for key in ["ore", "crop", "herb"] {
            ledger.insert(
                ResourceKey::new(key),
                ResourceRecord {
                    target_available: 1,
                    ..Default::default()
                },
            );
        }

        let keys: Vec<_> = compute_dispatch(&ledger)
            .into_iter()
            .map(|r| r.resource.0)
            .collect();
        assert_eq!(keys, vec!["crop", "herb", "ore"]);
    }
}
