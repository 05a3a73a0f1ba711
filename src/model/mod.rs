// File: ./src/model/mod.rs
pub mod item;

pub use item::{Priority, Recurrence, TaskRecord};
