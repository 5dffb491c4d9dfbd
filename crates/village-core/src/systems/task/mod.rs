//! Task selection: the priority chain and its weighted-sampling
//! support structure.

pub mod select;
pub mod weights;

pub use select::{select_tasks, tick_down, SelectionContext};
pub use weights::WeightedTable;
