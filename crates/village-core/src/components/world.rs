//! World Components
//!
//! The tile map and the guild's view of every resource: live
//! availability, collected stock and their configured targets.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// A tile coordinate.
pub type Coord = (i32, i32);

/// The simulation's tile grid: extents plus impassable tiles.
#[derive(Resource, Debug, Clone)]
pub struct TileMap {
    pub width: i32,
    pub height: i32,
    pub blocked: HashSet<Coord>,
}

impl TileMap {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            blocked: HashSet::new(),
        }
    }

    pub fn in_bounds(&self, (x, y): Coord) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    pub fn is_blocked(&self, coord: Coord) -> bool {
        self.blocked.contains(&coord)
    }

    /// Walkable: inside the map and not blocked.
    pub fn is_open(&self, coord: Coord) -> bool {
        self.in_bounds(coord) && !self.is_blocked(coord)
    }

    /// Open 4-neighborhood of a tile, in a fixed order.
    pub fn open_neighbors(&self, (x, y): Coord) -> Vec<Coord> {
        [(x + 1, y), (x - 1, y), (x, y + 1), (x, y - 1)]
            .into_iter()
            .filter(|&c| self.is_open(c))
            .collect()
    }
}

/// Identifier for a harvestable or explorable resource type.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ResourceKey(pub String);

impl ResourceKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Live guild-side state for one resource key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceRecord {
    /// Quantity currently accessible for harvest in the world.
    pub available: u32,
    /// Availability the guild wants to see before it stops exploring.
    pub target_available: u32,
    /// Quantity already collected into the guild stores.
    pub stock: u32,
    /// Stock level the guild gathers toward.
    pub target_stock: u32,
    /// Undiscovered resources count as zero availability.
    pub is_discovered: bool,
    /// World tiles where this resource can be worked.
    pub sites: Vec<Coord>,
}

impl ResourceRecord {
    /// Availability after the discovery gate.
    pub fn effective_available(&self) -> u32 {
        if self.is_discovered {
            self.available
        } else {
            0
        }
    }

    /// Site nearest to `from` by Manhattan distance, ties broken by
    /// coordinate order so the choice is deterministic.
    pub fn nearest_site(&self, from: Coord) -> Option<Coord> {
        self.sites
            .iter()
            .copied()
            .min_by_key(|&(x, y)| ((x - from.0).abs() + (y - from.1).abs(), x, y))
    }
}

/// All resource records, keyed and iterated in a stable order.
///
/// Mutated only by world-simulation collaborators (harvesting,
/// discovery); the dispatcher reads it and never writes.
#[derive(Resource, Debug, Clone, Default)]
pub struct ResourceLedger {
    pub records: BTreeMap<ResourceKey, ResourceRecord>,
}

impl ResourceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: ResourceKey, record: ResourceRecord) {
        self.records.insert(key, record);
    }

    pub fn get(&self, key: &ResourceKey) -> Option<&ResourceRecord> {
        self.records.get(key)
    }

    pub fn get_mut(&mut self, key: &ResourceKey) -> Option<&mut ResourceRecord> {
        self.records.get_mut(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ResourceKey, &ResourceRecord)> {
        self.records.iter()
    }

    /// Flip `is_discovered` for every record with a site on `coord`.
    pub fn discover_sites_at(&mut self, coord: Coord) {
        for record in self.records.values_mut() {
            if !record.is_discovered && record.sites.contains(&coord) {
                record.is_discovered = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discovery_gate_zeroes_availability() {
        let record = ResourceRecord {
            available: 12,
            is_discovered: false,
            ..Default::default()
        };
        assert_eq!(record.effective_available(), 0);

        let record = ResourceRecord {
            available: 12,
            is_discovered: true,
            ..Default::default()
        };
        assert_eq!(record.effective_available(), 12);
    }

    #[test]
    fn test_nearest_site_breaks_ties_deterministically() {
        let record = ResourceRecord {
            sites: vec![(4, 2), (2, 4), (0, 0)],
            ..Default::default()
        };
        // (4,2) and (2,4) are equidistant from (3,3); lower x wins.
        assert_eq!(record.nearest_site((3, 3)), Some((2, 4)));
    }

    #[test]
    fn test_discover_sites_at() {
        let mut ledger = ResourceLedger::new();
        ledger.insert(
            ResourceKey::new("herb"),
            ResourceRecord {
                sites: vec![(5, 5)],
                ..Default::default()
            },
        );
        ledger.discover_sites_at((5, 5));
        assert!(ledger.get(&ResourceKey::new("herb")).unwrap().is_discovered);
    }

    #[test]
    fn test_tilemap_open_neighbors() {
        let mut map = TileMap::new(3, 3);
        map.blocked.insert((1, 0));
        let neighbors = map.open_neighbors((0, 0));
        assert_eq!(neighbors, vec![(0, 1)]);
    }
}
