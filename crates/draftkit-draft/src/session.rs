//! Scoped draft session.
//!
//! A [`DraftSession`] pairs a draft with a resource directory and a prober.
//! Relative media paths resolve against the resource directory, and
//! [`DraftSession::finish`] can add the directory's background music before
//! saving.

use draftkit_core::{DraftConfig, Micros, ObjectId, Result};
use draftkit_media::MediaProber;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::builder::{MediaOptions, TextSpec};
use crate::catalog::ResourceRef;
use crate::draft::{Draft, SavedDraft};
use crate::serialization::DraftStore;
use crate::track::TrackKind;

/// Background music file looked up in the resource directory.
pub const DEFAULT_BGM_FILE_NAME: &str = "default_bgm.wav";
/// Fade in applied to the background music.
pub const DEFAULT_BGM_FADE_IN: Micros = 1_000_000;
/// Fade out applied to the background music.
pub const DEFAULT_BGM_FADE_OUT: Micros = 1_500_000;

pub struct DraftSession<'p> {
    draft: Draft,
    res_path: PathBuf,
    prober: &'p dyn MediaProber,
}

impl<'p> DraftSession<'p> {
    pub fn new(draft: Draft, res_path: impl Into<PathBuf>, prober: &'p dyn MediaProber) -> Self {
        Self {
            draft,
            res_path: res_path.into(),
            prober,
        }
    }

    /// Open a session on a fresh draft named `name`.
    pub fn create(
        config: DraftConfig,
        name: impl Into<String>,
        res_path: impl Into<PathBuf>,
        prober: &'p dyn MediaProber,
    ) -> Self {
        Self::new(Draft::with_name(config, name), res_path, prober)
    }

    /// Run `f` against a fresh session and save the draft afterwards.
    ///
    /// If `f` fails the draft is dropped unsaved and the error returned.
    pub fn scoped<F>(
        config: DraftConfig,
        name: impl Into<String>,
        res_path: impl Into<PathBuf>,
        prober: &'p dyn MediaProber,
        store: &dyn DraftStore,
        add_default_bgm: bool,
        f: F,
    ) -> Result<SavedDraft>
    where
        F: FnOnce(&mut DraftSession<'p>) -> Result<()>,
    {
        let mut session = Self::create(config, name, res_path, prober);
        f(&mut session)?;
        session.finish(store, add_default_bgm)
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut Draft {
        &mut self.draft
    }

    pub fn res_path(&self) -> &Path {
        &self.res_path
    }

    /// Absolute paths are kept; relative ones join the resource directory.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.res_path.join(path)
        }
    }

    /// Add a media file, appended to its track. See [`Draft::add_media`].
    pub fn add_media(&mut self, path: impl AsRef<Path>, options: &MediaOptions) -> Result<Option<ObjectId>> {
        let path = self.resolve(path);
        self.draft.add_media(self.prober, &path, options, None)
    }

    pub fn add_text(&mut self, spec: &TextSpec) -> Result<ObjectId> {
        self.draft.add_text(spec, None)
    }

    pub fn add_effect(&mut self, effect: impl Into<ResourceRef>, start: Micros, duration: Micros) -> ObjectId {
        self.draft.add_effect(effect, start, duration)
    }

    /// Current video track length.
    pub fn duration(&self) -> Micros {
        self.draft.track_duration(TrackKind::Video)
    }

    /// Optionally add background music, then save.
    ///
    /// A missing music file is logged and skipped.
    pub fn finish(mut self, store: &dyn DraftStore, add_default_bgm: bool) -> Result<SavedDraft> {
        if add_default_bgm {
            let bgm = self.res_path.join(DEFAULT_BGM_FILE_NAME);
            let options = MediaOptions::default().with_fades(DEFAULT_BGM_FADE_IN, DEFAULT_BGM_FADE_OUT);
            match self.draft.add_media(self.prober, &bgm, &options, None)? {
                Some(_) => info!(path = %bgm.display(), "Added background music"),
                None => warn!(path = %bgm.display(), "Background music not added"),
            }
        }

        self.draft.save(store)
    }
}
