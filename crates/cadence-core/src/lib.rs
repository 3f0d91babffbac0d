//! # Cadence Core Library
//!
//! Recurrence expansion for periodically-run reporting jobs: turns a
//! persisted schedule record into the sorted set of its future run times,
//! with a hard cap on work so malformed or pathological rules always
//! terminate.
//!
//! ## Features
//!
//! - **Strict Time Codec**: fixed-width UTC and local-naive timestamps with
//!   exact round-tripping
//! - **Canonical Rules**: `KEY=value;...` rules checked against a fixed
//!   vocabulary and rendered in one deterministic order
//! - **Early Validation**: zone, anchor and `UNTIL` are cross-checked before
//!   any occurrence is computed
//! - **Bounded Expansion**: fixed-step generation with `COUNT`, `UNTIL`,
//!   explicit additions/exclusions and an evaluation cap
//! - **Deterministic**: the current time is always passed in, never read
//!   from a clock
//!
//! ## Core Modules
//!
//! - [`timestamp`]: UTC and local-naive parsing and formatting
//! - [`timezone`]: IANA-shaped zone name checks
//! - [`rule`]: Recurrence vocabulary and canonicalization
//! - [`boundary`]: Anchor/`UNTIL` validation
//! - [`recurrence`]: Bounded expansion engine and next-run lookup
//! - [`models`]: Schedule record and occurrence set
//! - [`error`]: Failure kinds with stable codes
//!
//! ## Example Usage
//!
//! ```rust
//! use cadence_core::models::ReportingSchedule;
//! use cadence_core::recurrence::{expand_rrule_bounded, next_run};
//!
//! let schedule = ReportingSchedule::new("FREQ=DAILY;COUNT=2", "2025-01-01T00:00:00", "UTC")
//!     .with_rdates(["2025-06-01T00:00:00"]);
//!
//! let occurrences = expand_rrule_bounded(&schedule, "2024-12-31T00:00:00Z", 4096)?;
//! assert_eq!(
//!     occurrences.to_strings(),
//!     ["2025-01-01T00:00:00Z", "2025-01-02T00:00:00Z", "2025-06-01T00:00:00Z"]
//! );
//! assert_eq!(next_run(&schedule, "2024-12-31T00:00:00Z")?, "2025-01-01T00:00:00Z");
//! # Ok::<(), cadence_core::error::ScheduleError>(())
//! ```

pub mod boundary;
pub mod error;
pub mod models;
pub mod recurrence;
pub mod rule;
pub mod timestamp;
pub mod timezone;

pub use boundary::validate_anchor_until;
pub use error::{ErrorKind, Result, ScheduleError};
pub use models::{OccurrenceSet, ReportingSchedule};
pub use recurrence::{expand_rrule_bounded, next_run, ExpansionConfig, ScheduleExpander};
pub use rule::{canonicalize_rrule, RuleKeySet};
