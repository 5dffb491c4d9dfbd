//! Frontier Index
//!
//! Authoritative record of which map cells are discovered, which of
//! them form the exploration frontier (discovered cells bordering at
//! least one undiscovered open cell), and per-agent incremental
//! buffers of discovery events.
//!
//! The per-agent buffers are informational only: destination selection
//! is a uniform draw over the global frontier set, deliberately with
//! no spatial prioritization.

use bevy_ecs::prelude::*;
use rand::Rng;
use std::collections::{BTreeSet, HashMap, HashSet};

use crate::components::world::{Coord, TileMap};

/// Global frontier state plus per-agent delta buffers.
#[derive(Resource, Debug, Clone, Default)]
pub struct FrontierIndex {
    width: i32,
    height: i32,
    blocked: HashSet<Coord>,
    discovered: HashSet<Coord>,
    // Ordered so that indexing into it with a uniform draw is
    // deterministic across runs.
    frontier: BTreeSet<Coord>,
    buffers: HashMap<String, Vec<Coord>>,
}

impl FrontierIndex {
    pub fn new(map: &TileMap) -> Self {
        Self {
            width: map.width,
            height: map.height,
            blocked: map.blocked.clone(),
            discovered: HashSet::new(),
            frontier: BTreeSet::new(),
            buffers: HashMap::new(),
        }
    }

    /// Opens an incremental buffer for an agent. Cells discovered from
    /// now on are appended to it.
    pub fn register_agent(&mut self, agent_id: impl Into<String>) {
        self.buffers.entry(agent_id.into()).or_default();
    }

    fn is_open(&self, (x, y): Coord) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height && !self.blocked.contains(&(x, y))
    }

    fn neighbors8((x, y): Coord) -> [Coord; 8] {
        [
            (x - 1, y - 1),
            (x, y - 1),
            (x + 1, y - 1),
            (x - 1, y),
            (x + 1, y),
            (x - 1, y + 1),
            (x, y + 1),
            (x + 1, y + 1),
        ]
    }

    fn has_undiscovered_neighbor(&self, cell: Coord) -> bool {
        Self::neighbors8(cell)
            .into_iter()
            .any(|c| self.is_open(c) && !self.discovered.contains(&c))
    }

    /// Records `cell` as discovered and maintains the frontier set.
    ///
    /// Every newly discovered cell lands in every agent buffer; since
    /// discovery is monotonic, a cell enters any given buffer at most
    /// once. The cell joins the frontier iff it still borders an
    /// undiscovered open cell; neighbors that just lost their last
    /// undiscovered border leave it.
    pub fn register_discovery(&mut self, cell: Coord) {
        if !self.is_open(cell) || !self.discovered.insert(cell) {
            return;
        }

        for buffer in self.buffers.values_mut() {
            buffer.push(cell);
        }

        if self.has_undiscovered_neighbor(cell) {
            self.frontier.insert(cell);
        }

        for neighbor in Self::neighbors8(cell) {
            if self.frontier.contains(&neighbor) && !self.has_undiscovered_neighbor(neighbor) {
                self.frontier.remove(&neighbor);
            }
        }
    }

    /// Uniform random pick from the current frontier set; `None` iff
    /// the set is empty. Explicitly not nearest-first.
    pub fn choose_next_frontier<R: Rng>(&self, rng: &mut R) -> Option<Coord> {
        if self.frontier.is_empty() {
            return None;
        }
        let idx = rng.gen_range(0..self.frontier.len());
        self.frontier.iter().nth(idx).copied()
    }

    /// Drains an agent's pending discovery buffer (board-check sync).
    pub fn take_buffer(&mut self, agent_id: &str) -> Vec<Coord> {
        self.buffers
            .get_mut(agent_id)
            .map(std::mem::take)
            .unwrap_or_default()
    }

    pub fn is_discovered(&self, cell: Coord) -> bool {
        self.discovered.contains(&cell)
    }

    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    pub fn discovered_len(&self) -> usize {
        self.discovered.len()
    }

    pub fn frontier_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.frontier.iter().copied()
    }
}
