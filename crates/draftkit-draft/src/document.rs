//! The two draft documents.
//!
//! [`ContentDocument`] is `draft_content.json`: canvas, tracks and every
//! material array. [`MetaInfoDocument`] is `draft_meta_info.json`: a
//! bucketed index of video and audio materials plus draft bookkeeping. The
//! two correlate by shared material id.

use draftkit_core::{DraftConfig, Micros, ObjectId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};

use crate::template::{
    AnimationSlot, AudioFade, AudioMaterial, Beat, Canvas, MetaInfoRecord, SoundChannelMapping,
    Speed, TextMaterial, Transition, VideoEffect, VideoMaterial,
};
use crate::track::{Track, TrackKind};

/// Material arrays the host expects but this crate never fills.
const UNUSED_MATERIAL_ARRAYS: &[&str] = &[
    "ai_translates",
    "audio_balances",
    "audio_effects",
    "audio_track_indexes",
    "chromas",
    "color_curves",
    "digital_humans",
    "drafts",
    "effects",
    "flowers",
    "green_screens",
    "handwrites",
    "hsl",
    "images",
    "log_color_wheels",
    "loudnesses",
    "manual_deformations",
    "masks",
    "material_colors",
    "placeholders",
    "plugin_effects",
    "primary_color_wheels",
    "realtime_denoises",
    "shapes",
    "smart_crops",
    "smart_relights",
    "stickers",
    "tail_leaders",
    "text_templates",
    "time_marks",
    "video_trackings",
    "vocal_beautifys",
    "vocal_separations",
];

// ── Content document ───────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasConfig {
    pub height: u32,
    pub ratio: String,
    pub width: u32,
}

/// The `config` block of the content document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftSettings {
    pub adjust_max_index: i32,
    pub attachment_info: Vec<Value>,
    pub combination_max_index: i32,
    pub export_range: Option<Value>,
    pub extract_audio_last_index: i32,
    pub lyrics_recognition_id: String,
    pub lyrics_sync: bool,
    pub lyrics_taskinfo: Vec<Value>,
    pub maintrack_adsorb: bool,
    pub material_save_mode: i32,
    pub original_sound_last_index: i32,
    pub record_audio_last_index: i32,
    pub sticker_max_index: i32,
    pub subtitle_recognition_id: String,
    pub subtitle_sync: bool,
    pub subtitle_taskinfo: Vec<Value>,
    pub system_font_list: Vec<Value>,
    pub video_mute: bool,
    pub zoom_info_params: Option<Value>,
}

impl Default for DraftSettings {
    fn default() -> Self {
        Self {
            adjust_max_index: 1,
            attachment_info: Vec::new(),
            combination_max_index: 1,
            export_range: None,
            extract_audio_last_index: 1,
            lyrics_recognition_id: String::new(),
            lyrics_sync: true,
            lyrics_taskinfo: Vec::new(),
            maintrack_adsorb: true,
            material_save_mode: 0,
            original_sound_last_index: 1,
            record_audio_last_index: 1,
            sticker_max_index: 1,
            subtitle_recognition_id: String::new(),
            subtitle_sync: true,
            subtitle_taskinfo: Vec::new(),
            system_font_list: Vec::new(),
            video_mute: false,
            zoom_info_params: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Keyframes {
    pub adjusts: Vec<Value>,
    pub audios: Vec<Value>,
    pub effects: Vec<Value>,
    pub filters: Vec<Value>,
    pub handwrites: Vec<Value>,
    pub stickers: Vec<Value>,
    pub texts: Vec<Value>,
    pub videos: Vec<Value>,
}

/// Client that created or last modified the draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub app_id: i32,
    pub app_source: String,
    pub app_version: String,
    pub device_id: String,
    pub hard_disk_id: String,
    pub mac_address: String,
    pub os: String,
    pub os_version: String,
}

impl Default for Platform {
    fn default() -> Self {
        Self {
            app_id: 3704,
            app_source: "lv".to_string(),
            app_version: "5.5.0".to_string(),
            device_id: String::new(),
            hard_disk_id: String::new(),
            mac_address: String::new(),
            os: "windows".to_string(),
            os_version: "10.0.22631".to_string(),
        }
    }
}

/// Every material array of the content document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Materials {
    pub audio_fades: Vec<AudioFade>,
    pub audios: Vec<AudioMaterial>,
    pub beats: Vec<Beat>,
    pub canvases: Vec<Canvas>,
    pub material_animations: Vec<AnimationSlot>,
    pub sound_channel_mappings: Vec<SoundChannelMapping>,
    pub speeds: Vec<Speed>,
    pub texts: Vec<TextMaterial>,
    pub transitions: Vec<Transition>,
    pub video_effects: Vec<VideoEffect>,
    pub videos: Vec<VideoMaterial>,
    /// Arrays emitted empty for the host.
    #[serde(flatten)]
    pub unused: BTreeMap<String, Vec<Value>>,
}

impl Materials {
    /// Empty arrays, including the ones this crate never fills.
    pub fn new() -> Self {
        Self {
            unused: UNUSED_MATERIAL_ARRAYS
                .iter()
                .map(|name| (name.to_string(), Vec::new()))
                .collect(),
            ..Default::default()
        }
    }

    /// Ids of every registered material.
    pub fn ids(&self) -> HashSet<&ObjectId> {
        let mut ids = HashSet::new();
        ids.extend(self.audio_fades.iter().map(|m| &m.id));
        ids.extend(self.audios.iter().map(|m| &m.id));
        ids.extend(self.beats.iter().map(|m| &m.id));
        ids.extend(self.canvases.iter().map(|m| &m.id));
        ids.extend(self.material_animations.iter().map(AnimationSlot::id));
        ids.extend(self.sound_channel_mappings.iter().map(|m| &m.id));
        ids.extend(self.speeds.iter().map(|m| &m.id));
        ids.extend(self.texts.iter().map(|m| &m.id));
        ids.extend(self.transitions.iter().map(|m| &m.id));
        ids.extend(self.video_effects.iter().map(|m| &m.id));
        ids.extend(self.videos.iter().map(|m| &m.id));
        ids
    }
}

/// `draft_content.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentDocument {
    pub canvas_config: CanvasConfig,
    pub color_space: i32,
    pub config: DraftSettings,
    pub cover: Option<Value>,
    pub create_time: i64,
    /// Timeline length; set at save time from the video track.
    pub duration: Micros,
    pub extra_info: Option<Value>,
    pub fps: f64,
    pub free_render_index_mode_on: bool,
    pub group_container: Option<Value>,
    pub id: ObjectId,
    pub keyframe_graph_list: Vec<Value>,
    pub keyframes: Keyframes,
    pub last_modified_platform: Platform,
    pub materials: Materials,
    pub mutable_config: Option<Value>,
    pub name: String,
    pub new_version: String,
    pub platform: Platform,
    pub relationships: Vec<Value>,
    pub render_index_track_mode_on: bool,
    pub retouch_cover: Option<Value>,
    pub source: String,
    pub static_cover_image_path: String,
    pub time_marks: Option<Value>,
    pub tracks: Vec<Track>,
    pub update_time: i64,
    pub version: i64,
}

impl ContentDocument {
    /// Empty document with canvas and frame rate from `config`.
    pub fn new(id: ObjectId, config: &DraftConfig) -> Self {
        Self {
            canvas_config: CanvasConfig {
                height: config.canvas.height,
                ratio: config.canvas.ratio.clone(),
                width: config.canvas.width,
            },
            color_space: 0,
            config: DraftSettings::default(),
            cover: None,
            create_time: 0,
            duration: 0,
            extra_info: None,
            fps: config.fps,
            free_render_index_mode_on: false,
            group_container: None,
            id,
            keyframe_graph_list: Vec::new(),
            keyframes: Keyframes::default(),
            last_modified_platform: Platform::default(),
            materials: Materials::new(),
            mutable_config: None,
            name: String::new(),
            new_version: "103.0.0".to_string(),
            platform: Platform::default(),
            relationships: Vec::new(),
            render_index_track_mode_on: false,
            retouch_cover: None,
            source: "default".to_string(),
            static_cover_image_path: String::new(),
            time_marks: None,
            tracks: Vec::new(),
            update_time: 0,
            version: 360000,
        }
    }

    /// The track of `kind`, if one has been created.
    pub fn track(&self, kind: TrackKind) -> Option<&Track> {
        self.tracks.iter().find(|t| t.kind == kind)
    }

    pub fn track_mut(&mut self, kind: TrackKind) -> Option<&mut Track> {
        self.tracks.iter_mut().find(|t| t.kind == kind)
    }

    /// The track of `kind`, created on first use.
    pub fn track_or_insert(&mut self, kind: TrackKind) -> &mut Track {
        let index = match self.tracks.iter().position(|t| t.kind == kind) {
            Some(index) => index,
            None => {
                self.tracks.push(Track::new(kind));
                self.tracks.len() - 1
            }
        };
        &mut self.tracks[index]
    }

    /// Ids referenced by segments that no material array holds.
    pub fn dangling_references(&self) -> Vec<ObjectId> {
        let known = self.materials.ids();
        self.tracks
            .iter()
            .flat_map(|t| t.segments.iter())
            .flat_map(|s| s.referenced_ids())
            .filter(|id| !known.contains(id))
            .cloned()
            .collect()
    }
}

// ── Meta-info document ─────────────────────────────────────────

/// Bucket holding video and image records.
pub const VIDEO_BUCKET: i32 = 0;
/// Bucket holding audio records.
pub const AUDIO_BUCKET: i32 = 8;
/// Every bucket code, in document order.
pub const BUCKET_CODES: [i32; 7] = [0, 1, 2, 3, 6, 7, 8];

/// One `draft_materials` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaBucket {
    #[serde(rename = "type")]
    pub code: i32,
    pub value: Vec<MetaInfoRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnterpriseInfo {
    pub draft_enterprise_extra: String,
    pub draft_enterprise_id: String,
    pub draft_enterprise_name: String,
    pub enterprise_material: Vec<Value>,
}

/// `draft_meta_info.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaInfoDocument {
    pub cloud_package_completed_time: String,
    pub draft_cloud_capcut_purchase_info: String,
    pub draft_cloud_last_action_download: bool,
    pub draft_cloud_materials: Vec<Value>,
    pub draft_cloud_purchase_info: String,
    pub draft_cloud_template_id: String,
    pub draft_cloud_tutorial_info: String,
    pub draft_cloud_videocut_purchase_info: String,
    pub draft_cover: String,
    pub draft_deeplink_url: String,
    pub draft_enterprise_info: EnterpriseInfo,
    pub draft_fold_path: String,
    /// Meta-info id; independent of the content document id.
    pub draft_id: ObjectId,
    pub draft_is_ai_packaging_used: bool,
    pub draft_is_ai_shorts: bool,
    pub draft_is_ai_translate: bool,
    pub draft_is_article_video_draft: bool,
    /// A string, not a bool.
    pub draft_is_from_deeplink: String,
    pub draft_is_invisible: bool,
    pub draft_materials: Vec<MetaBucket>,
    pub draft_materials_copied_info: Vec<Value>,
    pub draft_name: String,
    pub draft_new_version: String,
    pub draft_removable_storage_device: String,
    pub draft_root_path: String,
    pub draft_segment_extra_info: Vec<Value>,
    pub draft_timeline_materials_size_: i64,
    pub draft_type: String,
    pub tm_draft_cloud_completed: String,
    pub tm_draft_cloud_modified: i64,
    /// Microsecond timestamp.
    pub tm_draft_create: i64,
    /// Microsecond timestamp.
    pub tm_draft_modified: i64,
    pub tm_draft_removed: i64,
    pub tm_duration: Micros,
}

impl MetaInfoDocument {
    pub fn new(draft_id: ObjectId) -> Self {
        Self {
            cloud_package_completed_time: String::new(),
            draft_cloud_capcut_purchase_info: String::new(),
            draft_cloud_last_action_download: false,
            draft_cloud_materials: Vec::new(),
            draft_cloud_purchase_info: String::new(),
            draft_cloud_template_id: String::new(),
            draft_cloud_tutorial_info: String::new(),
            draft_cloud_videocut_purchase_info: String::new(),
            draft_cover: "draft_cover.jpg".to_string(),
            draft_deeplink_url: String::new(),
            draft_enterprise_info: EnterpriseInfo::default(),
            draft_fold_path: String::new(),
            draft_id,
            draft_is_ai_packaging_used: false,
            draft_is_ai_shorts: false,
            draft_is_ai_translate: false,
            draft_is_article_video_draft: false,
            draft_is_from_deeplink: "false".to_string(),
            draft_is_invisible: false,
            draft_materials: BUCKET_CODES
                .iter()
                .map(|&code| MetaBucket {
                    code,
                    value: Vec::new(),
                })
                .collect(),
            draft_materials_copied_info: Vec::new(),
            draft_name: String::new(),
            draft_new_version: String::new(),
            draft_removable_storage_device: String::new(),
            draft_root_path: String::new(),
            draft_segment_extra_info: Vec::new(),
            draft_timeline_materials_size_: 0,
            draft_type: String::new(),
            tm_draft_cloud_completed: String::new(),
            tm_draft_cloud_modified: 0,
            tm_draft_create: 0,
            tm_draft_modified: 0,
            tm_draft_removed: 0,
            tm_duration: 0,
        }
    }

    pub fn bucket(&self, code: i32) -> Option<&MetaBucket> {
        self.draft_materials.iter().find(|b| b.code == code)
    }

    pub fn bucket_mut(&mut self, code: i32) -> Option<&mut MetaBucket> {
        self.draft_materials.iter_mut().find(|b| b.code == code)
    }

    /// Every record across all buckets.
    pub fn records(&self) -> impl Iterator<Item = &MetaInfoRecord> {
        self.draft_materials.iter().flat_map(|b| b.value.iter())
    }
}
