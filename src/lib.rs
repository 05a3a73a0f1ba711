// Crate root library declaration and module exports.
pub mod cli;
pub mod config;
pub mod coordinator;
pub mod model;
pub mod notation;
pub mod reconcile;
pub mod store;
