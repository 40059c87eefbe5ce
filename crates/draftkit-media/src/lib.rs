//! draftkit media - media classification and metadata probing
//!
//! This crate handles:
//! - Media kinds and their file-extension table
//! - The probe capability the draft compiler consumes
//! - An extension-only probe and an ffprobe-backed probe

pub mod ffprobe;
pub mod kind;
pub mod probe;

pub use ffprobe::FfprobeProbe;
pub use kind::MediaKind;
pub use probe::{ExtensionProbe, MediaProber, ProbeInfo};
