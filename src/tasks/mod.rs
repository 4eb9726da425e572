//! Task Directory — SQLite-backed CRUD for tasks, users, and assignments.

pub mod handlers;
pub mod model;
pub mod storage;

pub use storage::TaskStorage;
