//! Segment records.

use draftkit_core::{Micros, ObjectId, Timerange};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A 2D pair used for clip scale and position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flip {
    pub horizontal: bool,
    pub vertical: bool,
}

/// Visual placement of a segment on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clip {
    pub alpha: f64,
    pub flip: Flip,
    pub rotation: f64,
    pub scale: Point,
    pub transform: Point,
}

impl Default for Clip {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            flip: Flip::default(),
            rotation: 0.0,
            scale: Point { x: 1.0, y: 1.0 },
            transform: Point { x: 0.0, y: 0.0 },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HdrSettings {
    pub intensity: f64,
    pub mode: i32,
    pub nits: i32,
}

impl Default for HdrSettings {
    fn default() -> Self {
        Self {
            intensity: 1.0,
            mode: 1,
            nits: 1000,
        }
    }
}

/// A placement of one material on a track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub cartoon: bool,
    pub clip: Clip,
    pub common_keyframes: Vec<Value>,
    pub enable_adjust: bool,
    pub enable_color_curves: bool,
    pub enable_color_wheels: bool,
    pub enable_lut: bool,
    pub enable_smart_color_adjust: bool,
    /// Auxiliary materials, in creation order.
    pub extra_material_refs: Vec<ObjectId>,
    pub group_id: String,
    pub hdr_settings: HdrSettings,
    pub id: ObjectId,
    pub intensifies_audio: bool,
    pub is_placeholder: bool,
    pub is_tone_modify: bool,
    pub keyframe_refs: Vec<Value>,
    pub last_nonzero_volume: f64,
    /// Primary material.
    pub material_id: ObjectId,
    pub render_index: i32,
    pub reverse: bool,
    /// Portion of the source media consumed.
    pub source_timerange: Timerange,
    pub speed: f64,
    /// Placement on the timeline.
    pub target_timerange: Timerange,
    pub template_id: String,
    pub template_scene: String,
    pub track_attribute: i32,
    pub track_render_index: i32,
    pub visible: bool,
    pub volume: f64,
}

impl Segment {
    /// Empty segment template.
    pub fn new(id: ObjectId) -> Self {
        Self {
            cartoon: false,
            clip: Clip::default(),
            common_keyframes: Vec::new(),
            enable_adjust: true,
            enable_color_curves: true,
            enable_color_wheels: true,
            enable_lut: true,
            enable_smart_color_adjust: false,
            extra_material_refs: Vec::new(),
            group_id: String::new(),
            hdr_settings: HdrSettings::default(),
            id,
            intensifies_audio: false,
            is_placeholder: false,
            is_tone_modify: false,
            keyframe_refs: Vec::new(),
            last_nonzero_volume: 1.0,
            material_id: ObjectId::default(),
            render_index: 0,
            reverse: false,
            source_timerange: Timerange::ZERO,
            speed: 1.0,
            target_timerange: Timerange::ZERO,
            template_id: String::new(),
            template_scene: "default".to_string(),
            track_attribute: 0,
            track_render_index: 0,
            visible: true,
            volume: 1.0,
        }
    }

    /// End of this segment on the timeline.
    #[inline]
    pub fn target_end(&self) -> Micros {
        self.target_timerange.end()
    }

    /// Every material id this segment references.
    pub fn referenced_ids(&self) -> impl Iterator<Item = &ObjectId> {
        std::iter::once(&self.material_id).chain(self.extra_material_refs.iter())
    }
}
