//! Media entity builder.
//!
//! Turns a probed media reference (or a text/effect request) into one
//! [`MediaEntity`]: the primary material, its auxiliary materials, the
//! segment that places it and, for video and audio, the meta-info record.
//! The entity is not yet on any track; see [`crate::Draft::place_media`].

use draftkit_core::{
    scale_by_speed, seconds_to_micros, DraftConfig, DraftError, Micros, ObjectId, Result, Timerange,
};
use draftkit_media::{MediaKind, ProbeInfo};

use crate::catalog::{AnimationData, AnimationType, ResourceCatalog, ResourceRef, TransitionData};
use crate::template::{
    AudioFade, AudioMaterial, Beat, Canvas, DetailAnimation, MaterialAnimation, MetaInfoRecord,
    Segment, SoundChannelMapping, Speed, TextMaterial, Transition, VideoEffect, VideoMaterial,
};
use crate::track::TrackKind;

/// Business options for one video, image or audio placement.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaOptions {
    /// Playback speed; not validated.
    pub speed: f64,
    /// Offset into the source media where playback begins.
    pub trim_start: Micros,
    /// Explicit duration; zero counts as absent.
    pub duration: Option<Micros>,
    /// Silence the clip's own audio (video and image only).
    pub mute_original_audio: bool,
    /// Audio fade in (audio only).
    pub fade_in: Micros,
    /// Audio fade out (audio only).
    pub fade_out: Micros,
    pub transition: Option<TransitionData>,
    pub animations: Vec<AnimationData>,
}

impl Default for MediaOptions {
    fn default() -> Self {
        Self {
            speed: 1.0,
            trim_start: 0,
            duration: None,
            mute_original_audio: false,
            fade_in: 0,
            fade_out: 0,
            transition: None,
            animations: Vec::new(),
        }
    }
}

impl MediaOptions {
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_trim_start(mut self, trim_start: Micros) -> Self {
        self.trim_start = trim_start;
        self
    }

    pub fn with_duration(mut self, duration: Micros) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn muted(mut self) -> Self {
        self.mute_original_audio = true;
        self
    }

    pub fn with_fades(mut self, fade_in: Micros, fade_out: Micros) -> Self {
        self.fade_in = fade_in;
        self.fade_out = fade_out;
        self
    }

    pub fn with_transition(mut self, transition: TransitionData) -> Self {
        self.transition = Some(transition);
        self
    }

    pub fn with_animation(mut self, animation: AnimationData) -> Self {
        self.animations.push(animation);
        self
    }
}

/// A text placement request. Unset fields take the configured defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextSpec {
    pub content: String,
    /// `#RRGGBB`
    pub color: Option<String>,
    pub size: Option<f64>,
    /// 0 = left, 1 = center, 2 = right
    pub alignment: Option<u8>,
    pub duration: Option<Micros>,
}

impl TextSpec {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_alignment(mut self, alignment: u8) -> Self {
        self.alignment = Some(alignment);
        self
    }

    pub fn with_duration(mut self, duration: Micros) -> Self {
        self.duration = Some(duration);
        self
    }
}

/// The one primary record of an entity.
#[derive(Debug, Clone, PartialEq)]
pub enum PrimaryMaterial {
    /// Video or photo, in `videos`.
    Video(VideoMaterial),
    Audio(AudioMaterial),
    Text(TextMaterial),
    Effect(VideoEffect),
}

impl PrimaryMaterial {
    pub fn id(&self) -> &ObjectId {
        match self {
            PrimaryMaterial::Video(m) => &m.id,
            PrimaryMaterial::Audio(m) => &m.id,
            PrimaryMaterial::Text(m) => &m.id,
            PrimaryMaterial::Effect(m) => &m.id,
        }
    }
}

/// An auxiliary record referenced from the segment's `extra_material_refs`.
#[derive(Debug, Clone, PartialEq)]
pub enum AuxiliaryMaterial {
    Speed(Speed),
    SoundChannelMapping(SoundChannelMapping),
    Canvas(Canvas),
    Beat(Beat),
    AudioFade(AudioFade),
    Transition(Transition),
    MaterialAnimation(MaterialAnimation),
    /// Speed-shaped record that text stores in `material_animations`.
    TextAnimation(Speed),
}

impl AuxiliaryMaterial {
    pub fn id(&self) -> &ObjectId {
        match self {
            AuxiliaryMaterial::Speed(m) => &m.id,
            AuxiliaryMaterial::SoundChannelMapping(m) => &m.id,
            AuxiliaryMaterial::Canvas(m) => &m.id,
            AuxiliaryMaterial::Beat(m) => &m.id,
            AuxiliaryMaterial::AudioFade(m) => &m.id,
            AuxiliaryMaterial::Transition(m) => &m.id,
            AuxiliaryMaterial::MaterialAnimation(m) => &m.id,
            AuxiliaryMaterial::TextAnimation(m) => &m.id,
        }
    }
}

/// Everything one placement contributes to a draft.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaEntity {
    pub kind: MediaKind,
    pub track_kind: TrackKind,
    pub primary: PrimaryMaterial,
    /// In creation order; the segment references them in the same order.
    pub auxiliaries: Vec<AuxiliaryMaterial>,
    /// Target start is 0 until placed.
    pub segment: Segment,
    /// Present for video, image and audio only.
    pub meta_info: Option<MetaInfoRecord>,
}

impl MediaEntity {
    /// Id of the primary material, shared with the meta-info record.
    pub fn id(&self) -> &ObjectId {
        self.primary.id()
    }

    /// Length on the timeline.
    pub fn duration(&self) -> Micros {
        self.segment.target_timerange.duration
    }
}

/// Record kind written to `type` / `metetype` for a media kind.
pub fn record_kind(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Audio => "music",
        MediaKind::Image => "photo",
        other => other.as_str(),
    }
}

/// Track a media kind is placed on.
pub fn track_kind(kind: MediaKind) -> TrackKind {
    match kind {
        MediaKind::Video | MediaKind::Image => TrackKind::Video,
        MediaKind::Audio => TrackKind::Audio,
        MediaKind::Text => TrackKind::Text,
        MediaKind::Effect => TrackKind::Effect,
    }
}

/// Builds entities from probe results and placement requests.
#[derive(Debug, Clone, Copy)]
pub struct EntityBuilder<'a> {
    config: &'a DraftConfig,
    catalog: &'a ResourceCatalog,
}

impl<'a> EntityBuilder<'a> {
    pub fn new(config: &'a DraftConfig, catalog: &'a ResourceCatalog) -> Self {
        Self { config, catalog }
    }

    /// Build a video, image or audio entity.
    ///
    /// Text and effect kinds have no file to build from and are rejected
    /// with [`DraftError::UnsupportedMediaKind`].
    pub fn build_media(&self, info: &ProbeInfo, options: &MediaOptions) -> Result<MediaEntity> {
        if !info.kind.is_file_backed() {
            return Err(DraftError::UnsupportedMediaKind(format!(
                "{} cannot be built from {}",
                info.kind,
                info.path.display()
            )));
        }

        let id = ObjectId::generate();
        let duration = self.effective_duration(info, options);
        let name = info.stem();
        let path = info.path.to_string_lossy().into_owned();
        let width = info.width.unwrap_or(0);
        let height = info.height.unwrap_or(0);

        let (primary, auxiliaries) = match info.kind {
            MediaKind::Audio => {
                let mut audio = AudioMaterial::new(id.clone());
                audio.duration = duration;
                audio.local_material_id = id.to_string();
                audio.name = name.clone();
                audio.path = path.clone();
                (PrimaryMaterial::Audio(audio), audio_auxiliaries(options))
            }
            _ => {
                let mut video = VideoMaterial::new(id.clone());
                video.duration = duration;
                video.height = height;
                video.width = width;
                video.local_material_id = id.to_string();
                video.material_name = name.clone();
                video.path = path.clone();
                video.kind = record_kind(info.kind).to_string();
                video.extra_type_option = i32::from(options.mute_original_audio);
                (
                    PrimaryMaterial::Video(video),
                    visual_auxiliaries(options, duration),
                )
            }
        };

        let mut segment = Segment::new(ObjectId::generate());
        segment.material_id = id.clone();
        segment.extra_material_refs = auxiliaries.iter().map(|a| a.id().clone()).collect();
        segment.speed = options.speed;
        segment.source_timerange = Timerange::new(options.trim_start, duration);
        segment.target_timerange = Timerange::new(0, scale_by_speed(duration, options.speed));

        let mut meta = MetaInfoRecord::new(id);
        meta.metetype = record_kind(info.kind).to_string();
        meta.width = width;
        meta.height = height;
        meta.duration = duration;
        meta.extra_info = name;
        meta.file_path = path;

        Ok(MediaEntity {
            kind: info.kind,
            track_kind: track_kind(info.kind),
            primary,
            auxiliaries,
            segment,
            meta_info: Some(meta),
        })
    }

    /// Build a text entity.
    ///
    /// Fails with [`DraftError::InvalidParameter`] on a malformed color.
    pub fn build_text(&self, spec: &TextSpec) -> Result<MediaEntity> {
        let defaults = &self.config.text;
        let id = ObjectId::generate();

        let mut text = TextMaterial::new(id.clone());
        text.set_size(spec.size.unwrap_or(defaults.default_size));
        text.set_text(&spec.content);
        text.change_color(spec.color.as_deref().unwrap_or(&defaults.default_color))?;
        text.alignment = spec.alignment.unwrap_or(defaults.default_alignment);

        let duration = spec.duration.unwrap_or(defaults.default_duration);
        let auxiliaries = vec![AuxiliaryMaterial::TextAnimation(Speed::new(ObjectId::generate()))];

        let mut segment = Segment::new(ObjectId::generate());
        segment.material_id = id;
        segment.extra_material_refs = auxiliaries.iter().map(|a| a.id().clone()).collect();
        segment.source_timerange = Timerange::new(0, duration);
        segment.target_timerange = Timerange::new(0, duration);

        Ok(MediaEntity {
            kind: MediaKind::Text,
            track_kind: TrackKind::Text,
            primary: PrimaryMaterial::Text(text),
            auxiliaries,
            segment,
            meta_info: None,
        })
    }

    /// Build an effect entity from a catalog reference.
    pub fn build_effect(&self, effect: &ResourceRef, duration: Micros) -> MediaEntity {
        let data = self.catalog.effect(effect);
        let id = ObjectId::generate();

        let mut segment = Segment::new(ObjectId::generate());
        segment.material_id = id.clone();
        segment.source_timerange = Timerange::new(0, duration);
        segment.target_timerange = Timerange::new(0, duration);

        MediaEntity {
            kind: MediaKind::Effect,
            track_kind: TrackKind::Effect,
            primary: PrimaryMaterial::Effect(VideoEffect::new(id, &data.resource_id, &data.name)),
            auxiliaries: Vec::new(),
            segment,
            meta_info: None,
        }
    }

    /// Explicit duration, else probed duration minus trim; images with
    /// neither get the configured default.
    fn effective_duration(&self, info: &ProbeInfo, options: &MediaOptions) -> Micros {
        let duration = match options.duration.filter(|d| *d != 0) {
            Some(explicit) => explicit,
            None => info
                .duration_seconds
                .map(|s| seconds_to_micros(s).saturating_sub(options.trim_start))
                .unwrap_or(0),
        };

        if info.kind == MediaKind::Image && duration == 0 {
            self.config.image.default_duration
        } else {
            duration
        }
    }
}

fn visual_auxiliaries(options: &MediaOptions, duration: Micros) -> Vec<AuxiliaryMaterial> {
    let mut speed = Speed::new(ObjectId::generate());
    speed.speed = options.speed;

    let mut auxiliaries = vec![
        AuxiliaryMaterial::SoundChannelMapping(SoundChannelMapping::new(ObjectId::generate())),
        AuxiliaryMaterial::Canvas(Canvas::new(ObjectId::generate())),
        AuxiliaryMaterial::Speed(speed),
    ];

    if let Some(t) = &options.transition {
        auxiliaries.push(AuxiliaryMaterial::Transition(Transition::new(
            ObjectId::generate(),
            &t.resource_id,
            &t.name,
            t.duration,
        )));
    }

    if !options.animations.is_empty() {
        let mut container = MaterialAnimation::new(ObjectId::generate());
        container.animations = options
            .animations
            .iter()
            .map(|a| {
                let start = match a.animation_type {
                    AnimationType::In => 0,
                    AnimationType::Out => duration - a.duration,
                    AnimationType::Group => a.start,
                };
                DetailAnimation::new(&a.resource_id, &a.name, a.animation_type.as_str(), start, a.duration)
            })
            .collect();
        auxiliaries.push(AuxiliaryMaterial::MaterialAnimation(container));
    }

    auxiliaries
}

fn audio_auxiliaries(options: &MediaOptions) -> Vec<AuxiliaryMaterial> {
    let mut speed = Speed::new(ObjectId::generate());
    speed.speed = options.speed;

    let mut auxiliaries = vec![
        AuxiliaryMaterial::Speed(speed),
        AuxiliaryMaterial::SoundChannelMapping(SoundChannelMapping::new(ObjectId::generate())),
        AuxiliaryMaterial::Beat(Beat::new(ObjectId::generate())),
    ];

    if options.fade_in > 0 || options.fade_out > 0 {
        auxiliaries.push(AuxiliaryMaterial::AudioFade(AudioFade::new(
            ObjectId::generate(),
            options.fade_in,
            options.fade_out,
        )));
    }

    auxiliaries
}
