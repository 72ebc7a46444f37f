//! Configuration subsystem: controller settings and the live level table.
//!
//! # Data Flow
//! ```text
//! controller settings (TOML file or literal struct)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ControllerConfig (validated, immutable)
//!
//! watched resource payload (raw text under the log key):
//!     → parser.rs (part → level-name mapping, insertion order)
//!     → table.rs (typed overrides, atomic snapshot swap)
//!     → decision queries from log call sites
//! ```
//!
//! # Design Decisions
//! - ControllerConfig is immutable once the controller starts; the live
//!   part of the configuration is the watched resource, not this struct
//! - The payload parser is pure and never fails; malformed lines degrade
//!   to fewer overrides
//! - Readers always see a complete table: updates build a fresh snapshot
//!   and swap it in with `arc-swap`

pub mod loader;
pub mod parser;
pub mod schema;
pub mod table;
pub mod validation;

pub use schema::ControllerConfig;
pub use table::LevelTable;
