//! Simulation systems, run once per tick in a fixed order:
//! day-boundary reset, dispatch refresh, task selection, movement,
//! countdown, harvest crediting.

pub mod clock;
pub mod dispatch;
pub mod frontier;
pub mod harvest;
pub mod movement;
pub mod task;

pub use clock::{reset_daily_flags, SimClock};
pub use dispatch::{compute_dispatch, refresh_dispatch, DispatchBoard, DispatchKind, DispatchRecord};
pub use frontier::FrontierIndex;
pub use harvest::apply_harvests;
pub use movement::{execute_movement, random_adjacent_step, route_step};
pub use task::{select_tasks, tick_down, SelectionContext, WeightedTable};
