//! The draft aggregate.
//!
//! A [`Draft`] owns both documents. Entities are placed one at a time onto
//! per-kind tracks; [`Draft::save`] reconciles durations and hands both
//! documents to a [`DraftStore`]. Saving consumes the draft.

use chrono::Utc;
use draftkit_core::{DraftConfig, Micros, ObjectId, Result};
use draftkit_media::MediaProber;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::builder::{AuxiliaryMaterial, EntityBuilder, MediaEntity, MediaOptions, PrimaryMaterial, TextSpec};
use crate::catalog::{ResourceCatalog, ResourceRef};
use crate::document::{ContentDocument, MetaInfoDocument, AUDIO_BUCKET, VIDEO_BUCKET};
use crate::serialization::{DraftStore, FsDraftStore};
use crate::template::AnimationSlot;
use crate::track::TrackKind;

/// A draft being assembled.
#[derive(Debug, Clone)]
pub struct Draft {
    config: DraftConfig,
    catalog: ResourceCatalog,
    name: String,
    folder: PathBuf,
    content: ContentDocument,
    meta_info: MetaInfoDocument,
}

/// What [`Draft::save`] wrote.
#[derive(Debug, Clone)]
pub struct SavedDraft {
    pub folder: PathBuf,
    pub content: ContentDocument,
    pub meta_info: MetaInfoDocument,
    /// Reconciled timeline length.
    pub duration: Micros,
}

impl Draft {
    /// Create a draft named after the current UTC time (`YYYYMMDD.HHMMSS`).
    pub fn new(config: DraftConfig) -> Self {
        let name = Utc::now().format("%Y%m%d.%H%M%S").to_string();
        Self::with_name(config, name)
    }

    /// Create a draft in `<drafts_root>/<name>`.
    pub fn with_name(config: DraftConfig, name: impl Into<String>) -> Self {
        let name = name.into();
        let folder = config.drafts_root.join(&name);
        let catalog = ResourceCatalog::with_overrides(&config.catalog);
        let content = ContentDocument::new(ObjectId::generate(), &config);

        let mut meta_info = MetaInfoDocument::new(ObjectId::generate());
        let root = config.drafts_root.to_string_lossy();
        let now = Utc::now().timestamp_micros();
        meta_info.draft_name = name.clone();
        meta_info.draft_fold_path = folder.to_string_lossy().replace('\\', "/");
        meta_info.draft_root_path = root.replace('/', "\\");
        meta_info.draft_removable_storage_device = root
            .replace('\\', "/")
            .split_once(":/")
            .map(|(drive, _)| drive.to_string())
            .unwrap_or_default();
        meta_info.tm_draft_create = now;
        meta_info.tm_draft_modified = now;

        info!(name = %name, folder = %folder.display(), "Created draft");
        Self {
            config,
            catalog,
            name,
            folder,
            content,
            meta_info,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Id of the content document.
    pub fn content_id(&self) -> &ObjectId {
        &self.content.id
    }

    /// Id of the meta-info document, independent of [`Self::content_id`].
    pub fn meta_info_id(&self) -> &ObjectId {
        &self.meta_info.draft_id
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    pub fn config(&self) -> &DraftConfig {
        &self.config
    }

    pub fn catalog(&self) -> &ResourceCatalog {
        &self.catalog
    }

    pub fn content(&self) -> &ContentDocument {
        &self.content
    }

    pub fn meta_info(&self) -> &MetaInfoDocument {
        &self.meta_info
    }

    /// Builder using this draft's configuration and catalog.
    pub fn builder(&self) -> EntityBuilder<'_> {
        EntityBuilder::new(&self.config, &self.catalog)
    }

    /// End of the last segment on the track of `kind`, or 0.
    pub fn track_duration(&self, kind: TrackKind) -> Micros {
        self.content.track(kind).map(|t| t.duration()).unwrap_or(0)
    }

    /// Clamp the track of `kind` to `limit`. A missing track is left missing.
    pub fn truncate_track(&mut self, kind: TrackKind, limit: Micros) {
        if let Some(track) = self.content.track_mut(kind) {
            track.truncate(limit);
        }
    }

    /// Place an entity on its track and register its materials.
    ///
    /// With no start (or a zero start) the segment is appended after the
    /// track's current end. Returns the primary material id.
    pub fn place_media(&mut self, entity: MediaEntity, start: Option<Micros>) -> ObjectId {
        let MediaEntity {
            track_kind,
            primary,
            auxiliaries,
            mut segment,
            meta_info,
            ..
        } = entity;

        let start = match start {
            Some(start) if start != 0 => start,
            _ => self.track_duration(track_kind),
        };
        segment.target_timerange.start = start;

        debug!(
            track = %track_kind,
            start,
            duration = segment.target_timerange.duration,
            material = %segment.material_id,
            "Placed segment"
        );
        self.content.track_or_insert(track_kind).append_segment(segment);

        let id = primary.id().clone();
        self.register_primary(primary);
        for auxiliary in auxiliaries {
            self.register_auxiliary(auxiliary);
        }

        if let Some(record) = meta_info {
            let code = match track_kind {
                TrackKind::Audio => AUDIO_BUCKET,
                _ => VIDEO_BUCKET,
            };
            if let Some(bucket) = self.meta_info.bucket_mut(code) {
                bucket.value.push(record);
            }
        }

        id
    }

    /// Place an effect entity. Effects never get a meta-info record.
    pub fn place_effect(&mut self, mut entity: MediaEntity, start: Micros) -> ObjectId {
        entity.meta_info = None;
        self.place_media(entity, Some(start))
    }

    /// Probe, build and place a media file.
    ///
    /// Media that cannot be resolved is skipped with a warning and yields
    /// `Ok(None)`. Other failures are returned.
    pub fn add_media(
        &mut self,
        prober: &dyn MediaProber,
        path: &Path,
        options: &MediaOptions,
        start: Option<Micros>,
    ) -> Result<Option<ObjectId>> {
        let entity = prober
            .probe(path)
            .and_then(|info| self.builder().build_media(&info, options));

        match entity {
            Ok(entity) => Ok(Some(self.place_media(entity, start))),
            Err(e) if e.is_unresolved_media() => {
                warn!(path = %path.display(), error = %e, "Skipping unresolved media");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Build and place a text segment.
    pub fn add_text(&mut self, spec: &TextSpec, start: Option<Micros>) -> Result<ObjectId> {
        let entity = self.builder().build_text(spec)?;
        Ok(self.place_media(entity, start))
    }

    /// Build and place an effect by name or resource id.
    pub fn add_effect(&mut self, effect: impl Into<ResourceRef>, start: Micros, duration: Micros) -> ObjectId {
        let entity = self.builder().build_effect(&effect.into(), duration);
        self.place_effect(entity, start)
    }

    /// Align everything to the video track and return its duration.
    ///
    /// The audio track is truncated to the video track's end, and both
    /// documents record that end as the draft duration.
    pub fn reconcile(&mut self) -> Micros {
        let video_duration = self.track_duration(TrackKind::Video);
        self.truncate_track(TrackKind::Audio, video_duration);
        self.content.duration = video_duration;
        self.meta_info.tm_duration = video_duration;
        video_duration
    }

    /// Reconcile durations and write both documents through `store`.
    pub fn save(mut self, store: &dyn DraftStore) -> Result<SavedDraft> {
        let duration = self.reconcile();
        self.meta_info.tm_draft_modified = Utc::now().timestamp_micros();

        store.write(&self.folder, &self.content, &self.meta_info)?;
        info!(folder = %self.folder.display(), duration, "Saved draft");

        Ok(SavedDraft {
            folder: self.folder,
            content: self.content,
            meta_info: self.meta_info,
            duration,
        })
    }

    /// Save to the local filesystem.
    pub fn save_to_disk(self) -> Result<SavedDraft> {
        self.save(&FsDraftStore)
    }

    fn register_primary(&mut self, primary: PrimaryMaterial) {
        let materials = &mut self.content.materials;
        match primary {
            PrimaryMaterial::Video(m) => materials.videos.push(m),
            PrimaryMaterial::Audio(m) => materials.audios.push(m),
            PrimaryMaterial::Text(m) => materials.texts.push(m),
            PrimaryMaterial::Effect(m) => materials.video_effects.push(m),
        }
    }

    fn register_auxiliary(&mut self, auxiliary: AuxiliaryMaterial) {
        let materials = &mut self.content.materials;
        match auxiliary {
            AuxiliaryMaterial::Speed(m) => materials.speeds.push(m),
            AuxiliaryMaterial::SoundChannelMapping(m) => materials.sound_channel_mappings.push(m),
            AuxiliaryMaterial::Canvas(m) => materials.canvases.push(m),
            AuxiliaryMaterial::Beat(m) => materials.beats.push(m),
            AuxiliaryMaterial::AudioFade(m) => materials.audio_fades.push(m),
            AuxiliaryMaterial::Transition(m) => materials.transitions.push(m),
            AuxiliaryMaterial::MaterialAnimation(m) => {
                materials.material_animations.push(AnimationSlot::Animation(m))
            }
            AuxiliaryMaterial::TextAnimation(m) => {
                materials.material_animations.push(AnimationSlot::SpeedShaped(m))
            }
        }
    }
}
