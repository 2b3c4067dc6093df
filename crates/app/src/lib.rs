//! # dungeon-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `DungeonRecordRepository` — save, look up, filter, and aggregate records
//! - Define **driving/inbound ports** as use-case structs:
//!   - `DungeonService` — calculate minimum HP, persist, query, report stats
//! - Orchestrate domain objects without knowing *how* persistence or IO works
//!
//! ## Dependency rule
//! Depends on `dungeon-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
