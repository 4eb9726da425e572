//! RPC handler modules for the daemon-level and chat methods.
//! The `task.*`, `user.*`, and `analytics.*` handlers live next to their
//! storage in `crate::tasks` and `crate::analytics`.

pub mod chat;
pub mod daemon;
