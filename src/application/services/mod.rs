//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (InventoryStore, RandomSource)
//! but are themselves concrete structs, not traits.

mod inventory;
mod planning;

pub use inventory::{
    parse_records, parse_records_lenient, InventoryService, InventorySummary, Preset,
};
pub use planning::PlanningService;
