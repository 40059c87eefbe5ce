//! Entity template library.
//!
//! Every record kind that appears in the two draft documents has a typed
//! struct here whose `new` constructor is the canonical empty-valued
//! skeleton the host application expects. Constructors take the record's
//! identifier and return a fresh value; builders fill in the business fields
//! afterwards.

pub mod auxiliary;
pub mod media;
pub mod meta;
pub mod segment;

pub use auxiliary::{
    AnimationSlot, AudioFade, Beat, Canvas, DetailAnimation, MaterialAnimation,
    SoundChannelMapping, Speed, Transition,
};
pub use media::{AudioMaterial, TextMaterial, VideoEffect, VideoMaterial};
pub use meta::MetaInfoRecord;
pub use segment::{Clip, Segment};
