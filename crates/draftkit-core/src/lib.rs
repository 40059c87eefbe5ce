//! draftkit core - foundation types for the draft compiler
//!
//! This crate provides the types shared by every other draftkit crate:
//! - Opaque object identifiers
//! - Microsecond time values and timeranges
//! - Draft configuration
//! - The error type

pub mod config;
pub mod error;
pub mod id;
pub mod time;

pub use config::{CanvasSettings, CatalogOverrides, DraftConfig, ImageDefaults, TextDefaults};
pub use error::{DraftError, Result};
pub use id::ObjectId;
pub use time::{scale_by_speed, seconds_to_micros, Micros, Timerange, MICROS_PER_SECOND};
