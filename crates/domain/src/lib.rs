//! # dungeon-domain
//!
//! Pure domain model for the dungeon minimum-HP service.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define the **Grid** (validated rectangular table of HP deltas)
//! - Define **`MinHp`** and the **solver** that derives it from a grid
//! - Define **Records** (persisted calculations) and the **filters** used to
//!   query and aggregate them
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod filter;
pub mod grid;
pub mod record;
pub mod solver;
