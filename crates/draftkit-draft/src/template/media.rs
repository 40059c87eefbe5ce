//! Primary material records: one per placed item.

use draftkit_core::{DraftError, Micros, ObjectId, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ── Video / photo ──────────────────────────────────────────────

/// Normalized crop quad.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Crop {
    pub lower_left_x: f64,
    pub lower_left_y: f64,
    pub lower_right_x: f64,
    pub lower_right_y: f64,
    pub upper_left_x: f64,
    pub upper_left_y: f64,
    pub upper_right_x: f64,
    pub upper_right_y: f64,
}

impl Default for Crop {
    fn default() -> Self {
        Self {
            lower_left_x: 0.0,
            lower_left_y: 1.0,
            lower_right_x: 1.0,
            lower_right_y: 1.0,
            upper_left_x: 0.0,
            upper_left_y: 0.0,
            upper_right_x: 1.0,
            upper_right_y: 0.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Matting {
    pub flag: i32,
    pub has_use_quick_brush: bool,
    pub has_use_quick_eraser: bool,
    #[serde(rename = "interactiveTime")]
    pub interactive_time: Vec<Value>,
    pub path: String,
    pub strokes: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoAlgorithm {
    pub algorithms: Vec<Value>,
    pub deflicker: Option<Value>,
    pub motion_blur_config: Option<Value>,
    pub noise_reduction: Option<Value>,
    pub path: String,
    pub time_range: Option<Value>,
}

/// A video or still-image material (`materials.videos`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoMaterial {
    pub audio_fade: Option<Value>,
    pub cartoon_path: String,
    pub category_id: String,
    pub category_name: String,
    pub check_flag: i64,
    pub crop: Crop,
    pub crop_ratio: String,
    pub crop_scale: f64,
    pub duration: Micros,
    /// 0 plays the clip's own sound, 1 mutes it.
    pub extra_type_option: i32,
    pub formula_id: String,
    pub freeze: Option<Value>,
    pub gameplay: Option<Value>,
    pub has_audio: bool,
    pub height: u32,
    pub id: ObjectId,
    pub intensifies_audio_path: String,
    pub intensifies_path: String,
    pub is_unified_beauty_mode: bool,
    pub local_id: String,
    pub local_material_id: String,
    pub material_id: String,
    pub material_name: String,
    pub material_url: String,
    pub matting: Matting,
    pub media_path: String,
    pub object_locked: Option<Value>,
    pub path: String,
    pub picture_from: String,
    pub picture_set_category_id: String,
    pub picture_set_category_name: String,
    pub request_id: String,
    pub reverse_intensifies_path: String,
    pub reverse_path: String,
    pub source_platform: i32,
    pub stable: Option<Value>,
    pub team_id: String,
    /// `"video"` or `"photo"`.
    #[serde(rename = "type")]
    pub kind: String,
    pub video_algorithm: VideoAlgorithm,
    pub width: u32,
}

impl VideoMaterial {
    pub fn new(id: ObjectId) -> Self {
        Self {
            audio_fade: None,
            cartoon_path: String::new(),
            category_id: String::new(),
            category_name: "local".to_string(),
            check_flag: 63487,
            crop: Crop::default(),
            crop_ratio: "free".to_string(),
            crop_scale: 1.0,
            duration: 0,
            extra_type_option: 0,
            formula_id: String::new(),
            freeze: None,
            gameplay: None,
            has_audio: true,
            height: 0,
            id,
            intensifies_audio_path: String::new(),
            intensifies_path: String::new(),
            is_unified_beauty_mode: false,
            local_id: String::new(),
            local_material_id: String::new(),
            material_id: String::new(),
            material_name: String::new(),
            material_url: String::new(),
            matting: Matting::default(),
            media_path: String::new(),
            object_locked: None,
            path: String::new(),
            picture_from: "none".to_string(),
            picture_set_category_id: String::new(),
            picture_set_category_name: String::new(),
            request_id: String::new(),
            reverse_intensifies_path: String::new(),
            reverse_path: String::new(),
            source_platform: 0,
            stable: None,
            team_id: String::new(),
            kind: String::new(),
            video_algorithm: VideoAlgorithm::default(),
            width: 0,
        }
    }
}

// ── Audio ──────────────────────────────────────────────────────

/// An audio material (`materials.audios`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioMaterial {
    pub app_id: i32,
    pub category_id: String,
    pub category_name: String,
    pub check_flag: i32,
    pub duration: Micros,
    pub effect_id: String,
    pub formula_id: String,
    pub id: ObjectId,
    pub intensifies_path: String,
    pub local_material_id: String,
    pub music_id: ObjectId,
    pub name: String,
    pub path: String,
    pub request_id: String,
    pub resource_id: String,
    pub source_platform: i32,
    pub team_id: String,
    pub text_id: String,
    pub tone_category_id: String,
    pub tone_category_name: String,
    pub tone_effect_id: String,
    pub tone_effect_name: String,
    pub tone_speaker: String,
    pub tone_type: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub video_id: String,
    pub wave_points: Vec<Value>,
}

impl AudioMaterial {
    pub fn new(id: ObjectId) -> Self {
        Self {
            app_id: 0,
            category_id: String::new(),
            category_name: "local".to_string(),
            check_flag: 1,
            duration: 0,
            effect_id: String::new(),
            formula_id: String::new(),
            id,
            intensifies_path: String::new(),
            local_material_id: String::new(),
            music_id: ObjectId::generate(),
            name: String::new(),
            path: String::new(),
            request_id: String::new(),
            resource_id: String::new(),
            source_platform: 0,
            team_id: String::new(),
            text_id: String::new(),
            tone_category_id: String::new(),
            tone_category_name: String::new(),
            tone_effect_id: String::new(),
            tone_effect_name: String::new(),
            tone_speaker: String::new(),
            tone_type: String::new(),
            kind: "extract_music".to_string(),
            video_id: String::new(),
            wave_points: Vec::new(),
        }
    }
}

// ── Text ───────────────────────────────────────────────────────

const DEFAULT_FONT_PATH: &str = "E:/JianyingPro/4.2.0.10100/Resources/Font/SystemFont/zh-hans.ttf";
const COLOR_TAG_OPEN: &str = "<color=(";
const SIZE_TAG_OPEN: &str = "<size=";
const TAG_CLOSE: &str = ")>";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShadowPoint {
    pub x: f64,
    pub y: f64,
}

/// A text material (`materials.texts`).
///
/// The visible string lives in `content` as host markup:
/// `<font ...><color=(r, g, b, a)><size=s>TEXT</size></color></font>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextMaterial {
    pub add_type: i32,
    pub alignment: u8,
    pub background_alpha: f64,
    pub background_color: String,
    pub background_height: f64,
    pub background_horizontal_offset: f64,
    pub background_round_radius: f64,
    pub background_style: i32,
    pub background_vertical_offset: f64,
    pub background_width: f64,
    pub bold_width: f64,
    pub border_color: String,
    pub border_width: f64,
    pub check_flag: i32,
    pub content: String,
    pub font_category_id: String,
    pub font_category_name: String,
    pub font_id: String,
    pub font_name: String,
    pub font_path: String,
    pub font_resource_id: String,
    pub font_size: f64,
    pub font_source_platform: i32,
    pub font_team_id: String,
    pub font_title: String,
    pub font_url: String,
    pub fonts: Vec<Value>,
    pub force_apply_line_max_width: bool,
    pub global_alpha: f64,
    pub group_id: String,
    pub has_shadow: bool,
    pub id: ObjectId,
    pub initial_scale: f64,
    pub is_rich_text: bool,
    pub italic_degree: i32,
    pub ktv_color: String,
    pub language: String,
    pub layer_weight: i32,
    pub letter_spacing: f64,
    pub line_spacing: f64,
    pub name: String,
    pub preset_category: String,
    pub preset_category_id: String,
    pub preset_has_set_alignment: bool,
    pub preset_id: String,
    pub preset_index: i32,
    pub preset_name: String,
    pub recognize_type: i32,
    pub relevance_segment: Vec<Value>,
    pub shadow_alpha: f64,
    pub shadow_angle: f64,
    pub shadow_color: String,
    pub shadow_distance: f64,
    pub shadow_point: ShadowPoint,
    pub shadow_smoothing: f64,
    pub shape_clip_x: bool,
    pub shape_clip_y: bool,
    pub style_name: String,
    pub sub_type: i32,
    pub text_alpha: f64,
    pub text_color: String,
    pub text_preset_resource_id: String,
    pub text_size: i32,
    pub text_to_audio_ids: Vec<Value>,
    pub tts_auto_update: bool,
    #[serde(rename = "type")]
    pub kind: String,
    pub typesetting: i32,
    pub underline: bool,
    pub underline_offset: f64,
    pub underline_width: f64,
    pub use_effect_default_color: bool,
    pub words: Vec<Value>,
}

impl TextMaterial {
    /// Placeholder shown by the template before any text is set.
    pub const PLACEHOLDER: &'static str = "[默认文本]";

    pub fn new(id: ObjectId) -> Self {
        Self {
            add_type: 0,
            alignment: 1,
            background_alpha: 1.0,
            background_color: String::new(),
            background_height: 1.0,
            background_horizontal_offset: 0.0,
            background_round_radius: 0.0,
            background_style: 0,
            background_vertical_offset: 0.0,
            background_width: 1.0,
            bold_width: 0.0,
            border_color: String::new(),
            border_width: 0.08,
            check_flag: 7,
            content: compose_markup(Self::PLACEHOLDER, (1.0, 1.0, 1.0), 15.0),
            font_category_id: String::new(),
            font_category_name: String::new(),
            font_id: String::new(),
            font_name: String::new(),
            font_path: DEFAULT_FONT_PATH.to_string(),
            font_resource_id: String::new(),
            font_size: 15.0,
            font_source_platform: 0,
            font_team_id: String::new(),
            font_title: "none".to_string(),
            font_url: String::new(),
            fonts: Vec::new(),
            force_apply_line_max_width: false,
            global_alpha: 1.0,
            group_id: String::new(),
            has_shadow: false,
            id,
            initial_scale: 1.0,
            is_rich_text: false,
            italic_degree: 0,
            ktv_color: String::new(),
            language: String::new(),
            layer_weight: 1,
            letter_spacing: 0.0,
            line_spacing: 0.02,
            name: String::new(),
            preset_category: String::new(),
            preset_category_id: String::new(),
            preset_has_set_alignment: false,
            preset_id: String::new(),
            preset_index: 0,
            preset_name: String::new(),
            recognize_type: 0,
            relevance_segment: Vec::new(),
            shadow_alpha: 0.8,
            shadow_angle: -45.0,
            shadow_color: String::new(),
            shadow_distance: 8.0,
            shadow_point: ShadowPoint {
                x: 1.0182337649086284,
                y: -1.0182337649086284,
            },
            shadow_smoothing: 1.0,
            shape_clip_x: false,
            shape_clip_y: false,
            style_name: String::new(),
            sub_type: 0,
            text_alpha: 1.0,
            text_color: "#FFFFFF".to_string(),
            text_preset_resource_id: String::new(),
            text_size: 30,
            text_to_audio_ids: Vec::new(),
            tts_auto_update: false,
            kind: "text".to_string(),
            typesetting: 0,
            underline: false,
            underline_offset: 0.22,
            underline_width: 0.05,
            use_effect_default_color: true,
            words: Vec::new(),
        }
    }

    /// Replace the displayed text, keeping color and size markup.
    pub fn set_text(&mut self, text: &str) {
        let rgb = parse_hex_color(&self.text_color).unwrap_or((1.0, 1.0, 1.0));
        self.content = compose_markup(text, rgb, self.font_size);
    }

    /// The displayed text, without markup.
    pub fn text(&self) -> &str {
        let Some(size_start) = self.content.find(SIZE_TAG_OPEN) else {
            return "";
        };
        let after_size = &self.content[size_start..];
        let Some(open_end) = after_size.find('>') else {
            return "";
        };
        let body = &after_size[open_end + 1..];
        body.find("</size>").map(|end| &body[..end]).unwrap_or(body)
    }

    /// Change the text color.
    ///
    /// `color` is `#RRGGBB`. Sets `text_color` and rewrites the color tuple
    /// in the markup with each channel as `channel / 255` to six decimals.
    pub fn change_color(&mut self, color: &str) -> Result<()> {
        let (r, g, b) = parse_hex_color(color).ok_or_else(|| {
            DraftError::InvalidParameter(format!("Expected #RRGGBB color, got {:?}", color))
        })?;

        self.text_color = color.to_string();
        self.content = replace_tag(&self.content, COLOR_TAG_OPEN, &color_tuple((r, g, b)));
        Ok(())
    }

    /// Change the font size, in markup and record.
    pub fn set_size(&mut self, size: f64) {
        self.font_size = size;
        self.content = replace_tag(&self.content, SIZE_TAG_OPEN, &format!("{:.6}", size));
    }
}

fn compose_markup(text: &str, rgb: (f64, f64, f64), size: f64) -> String {
    format!(
        "<font id=\"\" path=\"{}\">{}{}{}<size={:.6}>{}</size></color></font>",
        DEFAULT_FONT_PATH,
        COLOR_TAG_OPEN,
        color_tuple(rgb),
        TAG_CLOSE,
        size,
        text
    )
}

fn color_tuple((r, g, b): (f64, f64, f64)) -> String {
    format!("{:.6}, {:.6}, {:.6}, 1.000000", r, g, b)
}

/// Rewrite the value of the first `open...close` tag in `markup`.
///
/// For `<size=` the tag ends at `>`; for `<color=(` at `)>`.
fn replace_tag(markup: &str, open: &str, value: &str) -> String {
    let close = if open == COLOR_TAG_OPEN { TAG_CLOSE } else { ">" };
    let Some(start) = markup.find(open) else {
        return markup.to_string();
    };
    let value_start = start + open.len();
    let Some(len) = markup[value_start..].find(close) else {
        return markup.to_string();
    };

    let mut out = String::with_capacity(markup.len());
    out.push_str(&markup[..value_start]);
    out.push_str(value);
    out.push_str(&markup[value_start + len..]);
    out
}

/// Parse `#RRGGBB` into normalized channels.
fn parse_hex_color(color: &str) -> Option<(f64, f64, f64)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    let (r, g, b) = (channel(0)?, channel(2)?, channel(4)?);
    Some((r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0))
}

// ── Effect ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustParam {
    pub default_value: f64,
    pub name: String,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRangeField {
    pub duration: Micros,
    pub start: Micros,
}

/// A video effect (`materials.video_effects`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoEffect {
    pub adjust_params: Vec<AdjustParam>,
    pub algorithm_artifact_path: String,
    pub apply_target_type: i32,
    pub apply_time_range: TimeRangeField,
    pub category_id: String,
    pub category_name: String,
    pub common_keyframes: Vec<Value>,
    pub disable_effect_faces: Vec<Value>,
    pub effect_id: String,
    pub formula_id: String,
    pub id: ObjectId,
    pub name: String,
    pub path: String,
    pub platform: String,
    pub render_index: i32,
    pub request_id: String,
    /// Host resource library id; the host fetches the effect assets by it.
    pub resource_id: String,
    pub source_platform: i32,
    pub time_range: TimeRangeField,
    pub track_render_index: i32,
    #[serde(rename = "type")]
    pub kind: String,
    pub value: f64,
    pub version: String,
}

impl VideoEffect {
    pub fn new(id: ObjectId, resource_id: &str, name: &str) -> Self {
        Self {
            adjust_params: vec![
                AdjustParam {
                    default_value: 0.33,
                    name: "effects_adjust_speed".to_string(),
                    value: 0.33,
                },
                AdjustParam {
                    default_value: 1.0,
                    name: "effects_adjust_background_animation".to_string(),
                    value: 1.0,
                },
            ],
            algorithm_artifact_path: String::new(),
            apply_target_type: 2,
            apply_time_range: TimeRangeField::default(),
            category_id: "1039448".to_string(),
            category_name: "热门".to_string(),
            common_keyframes: Vec::new(),
            disable_effect_faces: Vec::new(),
            effect_id: "1039448".to_string(),
            formula_id: String::new(),
            id,
            name: name.to_string(),
            path: String::new(),
            platform: "all".to_string(),
            render_index: 0,
            request_id: String::new(),
            resource_id: resource_id.to_string(),
            source_platform: 0,
            time_range: TimeRangeField::default(),
            track_render_index: 0,
            kind: "video_effect".to_string(),
            value: 1.0,
            version: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text() -> TextMaterial {
        TextMaterial::new(ObjectId::generate())
    }

    #[test]
    fn test_change_color_rewrites_markup() {
        let mut t = text();
        t.change_color("#FF0000").unwrap();

        assert_eq!(t.text_color, "#FF0000");
        assert!(t
            .content
            .contains("<color=(1.000000, 0.000000, 0.000000, 1.000000)>"));
        assert!(!t.content.contains("<color=(1.000000, 1.000000, 1.000000"));
    }

    #[test]
    fn test_change_color_partial_channel() {
        let mut t = text();
        t.change_color("#0080ff").unwrap();
        assert!(t
            .content
            .contains("(0.000000, 0.501961, 1.000000, 1.000000)"));
    }

    #[test]
    fn test_invalid_color_leaves_record_untouched() {
        let mut t = text();
        let before = t.clone();

        assert!(t.change_color("red").is_err());
        assert!(t.change_color("#12345").is_err());
        assert!(t.change_color("#GG0000").is_err());
        assert_eq!(t, before);
    }

    #[test]
    fn test_set_text_keeps_color_and_size() {
        let mut t = text();
        t.change_color("#00FF00").unwrap();
        t.set_size(20.0);
        t.set_text("Hello");

        assert_eq!(t.text(), "Hello");
        assert!(t.content.contains("(0.000000, 1.000000, 0.000000, 1.000000)"));
        assert!(t.content.contains("<size=20.000000>Hello</size>"));
    }

    #[test]
    fn test_template_text_is_placeholder() {
        assert_eq!(text().text(), TextMaterial::PLACEHOLDER);
    }

    #[test]
    fn test_video_template_json() {
        let json = serde_json::to_value(VideoMaterial::new(ObjectId::from("V"))).unwrap();
        assert_eq!(json["id"], "V");
        assert_eq!(json["category_name"], "local");
        assert_eq!(json["crop"]["lower_left_y"], 1.0);
        assert!(json["matting"]["interactiveTime"].is_array());
        assert!(json["freeze"].is_null());
    }

    #[test]
    fn test_audio_template_music_id_is_fresh() {
        let a = AudioMaterial::new(ObjectId::generate());
        let b = AudioMaterial::new(ObjectId::generate());
        assert_ne!(a.music_id, b.music_id);
        assert_eq!(a.kind, "extract_music");
    }
}
