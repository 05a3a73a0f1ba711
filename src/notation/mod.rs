// File: ./src/notation/mod.rs
pub mod checklist;
pub mod line;
