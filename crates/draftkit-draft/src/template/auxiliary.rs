//! Auxiliary material records referenced from `extra_material_refs`.

use draftkit_core::{Micros, ObjectId};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Playback speed record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Speed {
    pub curve_speed: Option<Value>,
    pub id: ObjectId,
    pub mode: i32,
    pub speed: f64,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Speed {
    pub fn new(id: ObjectId) -> Self {
        Self {
            curve_speed: None,
            id,
            mode: 0,
            speed: 1.0,
            kind: "speed".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoundChannelMapping {
    pub audio_channel_mapping: i32,
    pub id: ObjectId,
    pub is_config_open: bool,
    #[serde(rename = "type")]
    pub kind: String,
}

impl SoundChannelMapping {
    pub fn new(id: ObjectId) -> Self {
        Self {
            audio_channel_mapping: 0,
            id,
            is_config_open: false,
            kind: "none".to_string(),
        }
    }
}

/// Background fill behind a visual segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    pub album_image: String,
    pub blur: f64,
    pub color: String,
    pub id: ObjectId,
    pub image: String,
    pub image_id: String,
    pub image_name: String,
    pub source_platform: i32,
    pub team_id: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Canvas {
    pub fn new(id: ObjectId) -> Self {
        Self {
            album_image: String::new(),
            blur: 0.0,
            color: String::new(),
            id,
            image: String::new(),
            image_id: String::new(),
            image_name: String::new(),
            source_platform: 0,
            team_id: String::new(),
            kind: "canvas_color".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiBeats {
    pub beats_path: String,
    pub beats_url: String,
    pub melody_path: String,
    pub melody_percents: Vec<f64>,
    pub melody_url: String,
}

/// Beat-detection placeholder attached to audio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Beat {
    pub ai_beats: AiBeats,
    pub enable_ai_beats: bool,
    pub gear: i32,
    pub id: ObjectId,
    pub mode: i32,
    #[serde(rename = "type")]
    pub kind: String,
    pub user_beats: Vec<Value>,
    pub user_delete_ai_beats: Option<Value>,
}

impl Beat {
    pub fn new(id: ObjectId) -> Self {
        Self {
            ai_beats: AiBeats {
                beats_path: String::new(),
                beats_url: String::new(),
                melody_path: String::new(),
                melody_percents: vec![0.0],
                melody_url: String::new(),
            },
            enable_ai_beats: false,
            gear: 404,
            id,
            mode: 404,
            kind: "beats".to_string(),
            user_beats: Vec::new(),
            user_delete_ai_beats: None,
        }
    }
}

/// Audio fade in/out, durations in microseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioFade {
    pub fade_in_duration: Micros,
    pub fade_out_duration: Micros,
    pub fade_type: i32,
    pub id: ObjectId,
    #[serde(rename = "type")]
    pub kind: String,
}

impl AudioFade {
    pub fn new(id: ObjectId, fade_in: Micros, fade_out: Micros) -> Self {
        Self {
            fade_in_duration: fade_in,
            fade_out_duration: fade_out,
            fade_type: 0,
            id,
            kind: "audio_fade".to_string(),
        }
    }
}

/// Transition into the segment that owns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub category_id: String,
    pub category_name: String,
    pub duration: Micros,
    pub effect_id: String,
    pub id: ObjectId,
    pub is_overlap: bool,
    pub name: String,
    pub path: String,
    pub platform: String,
    pub request_id: String,
    /// Host resource library id; the host fetches the transition assets by it.
    pub resource_id: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Transition {
    pub fn new(id: ObjectId, resource_id: &str, name: &str, duration: Micros) -> Self {
        Self {
            category_id: "39862".to_string(),
            category_name: "叠化".to_string(),
            duration,
            effect_id: "321493".to_string(),
            id,
            is_overlap: false,
            name: name.to_string(),
            path: String::new(),
            platform: "all".to_string(),
            request_id: String::new(),
            resource_id: resource_id.to_string(),
            kind: "transition".to_string(),
        }
    }
}

/// One in/out/group animation inside a [`MaterialAnimation`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailAnimation {
    pub anim_adjust_params: String,
    pub category_id: String,
    pub category_name: String,
    pub duration: Micros,
    /// Not referenced from anywhere else.
    pub id: ObjectId,
    pub material_type: String,
    pub name: String,
    pub panel: String,
    pub path: String,
    pub platform: String,
    pub request_id: String,
    pub resource_id: String,
    pub start: Micros,
    #[serde(rename = "type")]
    pub kind: String,
}

impl DetailAnimation {
    pub fn new(resource_id: &str, name: &str, kind: &str, start: Micros, duration: Micros) -> Self {
        Self {
            anim_adjust_params: String::new(),
            category_id: kind.to_string(),
            category_name: kind.to_string(),
            duration,
            id: ObjectId::generate(),
            material_type: "video".to_string(),
            name: name.to_string(),
            panel: "video".to_string(),
            path: String::new(),
            platform: "all".to_string(),
            request_id: String::new(),
            resource_id: resource_id.to_string(),
            start,
            kind: kind.to_string(),
        }
    }
}

/// Container aggregating the animations of one segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialAnimation {
    pub animations: Vec<DetailAnimation>,
    pub id: ObjectId,
    #[serde(rename = "type")]
    pub kind: String,
}

impl MaterialAnimation {
    pub fn new(id: ObjectId) -> Self {
        Self {
            animations: Vec::new(),
            id,
            kind: "sticker_animation".to_string(),
        }
    }
}

/// An entry of the `material_animations` array.
///
/// Text segments register a speed-shaped record in this array rather than an
/// animation container; the host accepts both and drafts written by it
/// contain both shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnimationSlot {
    Animation(MaterialAnimation),
    SpeedShaped(Speed),
}

impl AnimationSlot {
    pub fn id(&self) -> &ObjectId {
        match self {
            AnimationSlot::Animation(a) => &a.id,
            AnimationSlot::SpeedShaped(s) => &s.id,
        }
    }
}
