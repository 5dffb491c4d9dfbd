//! World Setup
//!
//! Builds the tile map, resource ledger and frontier index from
//! configuration. The town rectangle starts discovered, so the first
//! exploration frontier is its border.

use crate::components::world::{ResourceKey, ResourceLedger, ResourceRecord, TileMap};
use crate::config::Config;
use crate::systems::frontier::FrontierIndex;

/// Builds the tile grid with its blocked set.
pub fn create_tile_map(config: &Config) -> TileMap {
    let mut map = TileMap::new(config.map.width, config.map.height);
    map.blocked.extend(config.map.blocked.iter().copied());
    map
}

/// Builds the guild's resource ledger from configured records.
pub fn create_resource_ledger(config: &Config) -> ResourceLedger {
    let mut ledger = ResourceLedger::new();
    for resource in &config.resources {
        ledger.insert(
            ResourceKey::new(resource.key.clone()),
            ResourceRecord {
                available: resource.available,
                target_available: resource.target_available,
                stock: resource.stock,
                target_stock: resource.target_stock,
                is_discovered: resource.discovered,
                sites: resource.sites.clone(),
            },
        );
    }
    ledger
}

/// Builds the frontier index and seeds the pre-discovered town area.
///
/// Sites inside the town are discovered immediately; agent buffers do
/// not exist yet, so the seed produces no pending deltas.
pub fn create_frontier_index(
    config: &Config,
    map: &TileMap,
    ledger: &mut ResourceLedger,
) -> FrontierIndex {
    let mut frontier = FrontierIndex::new(map);
    if let Some((x0, y0, w, h)) = config.map.town {
        for y in y0..y0 + h {
            for x in x0..x0 + w {
                frontier.register_discovery((x, y));
                if frontier.is_discovered((x, y)) {
                    ledger.discover_sites_at((x, y));
                }
            }
        }
    }
    frontier
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_town_seed_leaves_border_frontier() {
        let config = Config::default();
        let map = create_tile_map(&config);
        let mut ledger = create_resource_ledger(&config);
        let frontier = create_frontier_index(&config, &map, &mut ledger);

        // An 8x8 town in a larger map keeps its outer ring on the
        // frontier; interior cells are fully surrounded.
        assert!(frontier.frontier_len() > 0);
        assert!(frontier.is_discovered((0, 0)));
        assert!(!frontier.is_discovered((9, 9)));
        // Only the town edge facing undiscovered land qualifies.
        assert!(frontier.frontier_cells().all(|(x, y)| x == 7 || y == 7));
    }

    #[test]
    fn test_ledger_mirrors_config() {
        let config = Config::default();
        let ledger = create_resource_ledger(&config);
        let fish = ledger.get(&ResourceKey::new("fish")).unwrap();
        assert!(fish.is_discovered);
        assert_eq!(fish.stock, 2);
        assert_eq!(ledger.iter().count(), config.resources.len());
    }
}
