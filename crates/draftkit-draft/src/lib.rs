//! draftkit draft - timeline draft compiler
//!
//! Builds the two JSON documents a video editing host reads as a project:
//! - Record templates for every material, segment and meta-info kind
//! - Entity building from probed media, text and effects
//! - Sequential placement onto per-kind tracks
//! - Save-time duration reconciliation and persistence

pub mod builder;
pub mod catalog;
pub mod document;
pub mod draft;
pub mod serialization;
pub mod session;
pub mod template;
pub mod track;

pub use builder::{
    AuxiliaryMaterial, EntityBuilder, MediaEntity, MediaOptions, PrimaryMaterial, TextSpec,
};
pub use catalog::{
    AnimationData, AnimationType, EffectData, ResourceCatalog, ResourceRef, TransitionData,
};
pub use document::{
    ContentDocument, Materials, MetaBucket, MetaInfoDocument, AUDIO_BUCKET, BUCKET_CODES,
    VIDEO_BUCKET,
};
pub use draft::{Draft, SavedDraft};
pub use serialization::{
    load_documents, DraftStore, FsDraftStore, CONTENT_FILE_NAME, META_INFO_FILE_NAME,
};
pub use session::DraftSession;
pub use track::{Track, TrackKind};
