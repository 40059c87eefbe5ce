//! Integration tests for draft assembly.
//!
//! Exercises draftkit-media probe results flowing through the entity
//! builder into a draft, and the save-time reconciliation.

use draftkit_core::{DraftConfig, Micros, ObjectId, Timerange};
use draftkit_draft::{
    AnimationType, ContentDocument, Draft, DraftStore, MediaOptions, MetaInfoDocument,
    PrimaryMaterial, ResourceRef, TextSpec, TrackKind, AUDIO_BUCKET, VIDEO_BUCKET,
};
use draftkit_media::{MediaKind, ProbeInfo};
use std::collections::HashSet;
use std::path::Path;

// ── Helpers ────────────────────────────────────────────────────

/// Store that accepts and discards documents.
struct NullStore;

impl DraftStore for NullStore {
    fn write(&self, _: &Path, _: &ContentDocument, _: &MetaInfoDocument) -> draftkit_core::Result<()> {
        Ok(())
    }
}

fn new_draft() -> Draft {
    crate::init_tracing();
    Draft::with_name(DraftConfig::default(), "integration")
}

fn probed(kind: MediaKind, name: &str, seconds: Option<f64>) -> ProbeInfo {
    let info = ProbeInfo::new(format!("/media/{}", name), kind).with_size(1920, 1080);
    match seconds {
        Some(s) => info.with_duration(s),
        None => info,
    }
}

fn place(draft: &mut Draft, info: &ProbeInfo, options: &MediaOptions) -> ObjectId {
    let entity = draft.builder().build_media(info, options).unwrap();
    draft.place_media(entity, None)
}

// ── Reconciliation scenarios ───────────────────────────────────

#[test]
fn audio_longer_than_video_is_truncated_on_save() {
    let mut draft = new_draft();
    place(&mut draft, &probed(MediaKind::Video, "a.mp4", Some(10.0)), &MediaOptions::default());
    place(&mut draft, &probed(MediaKind::Audio, "b.mp3", Some(20.0)), &MediaOptions::default());

    let saved = draft.save(&NullStore).unwrap();

    assert_eq!(saved.content.duration, 10_000_000);
    assert_eq!(saved.meta_info.tm_duration, 10_000_000);
    let audio = &saved.content.track(TrackKind::Audio).unwrap().segments[0];
    assert_eq!(audio.target_timerange, Timerange::new(0, 10_000_000));
    assert_eq!(audio.source_timerange, Timerange::new(0, 10_000_000));
}

#[test]
fn later_audio_segments_are_zeroed_not_removed() {
    let mut draft = new_draft();
    place(&mut draft, &probed(MediaKind::Video, "a.mp4", Some(6.0)), &MediaOptions::default());
    for name in ["one.mp3", "two.mp3", "three.mp3"] {
        place(&mut draft, &probed(MediaKind::Audio, name, Some(4.0)), &MediaOptions::default());
    }

    let saved = draft.save(&NullStore).unwrap();
    let audio = saved.content.track(TrackKind::Audio).unwrap();

    assert_eq!(audio.segments.len(), 3);
    assert_eq!(audio.segments[0].target_timerange, Timerange::new(0, 4_000_000));
    assert_eq!(audio.segments[1].target_timerange, Timerange::new(4_000_000, 2_000_000));
    assert_eq!(audio.segments[2].target_timerange, Timerange::ZERO);
    assert_eq!(audio.segments[2].source_timerange, Timerange::ZERO);
    assert_eq!(saved.content.materials.audios.len(), 3);
}

#[test]
fn shorter_audio_is_left_alone() {
    let mut draft = new_draft();
    place(&mut draft, &probed(MediaKind::Video, "a.mp4", Some(10.0)), &MediaOptions::default());
    place(&mut draft, &probed(MediaKind::Audio, "b.mp3", Some(3.0)), &MediaOptions::default());

    let saved = draft.save(&NullStore).unwrap();
    let audio = saved.content.track(TrackKind::Audio).unwrap();
    assert_eq!(audio.duration(), 3_000_000);
    assert_eq!(saved.duration, 10_000_000);
}

#[test]
fn text_and_effect_tracks_are_not_truncated() {
    let mut draft = new_draft();
    place(&mut draft, &probed(MediaKind::Video, "a.mp4", Some(2.0)), &MediaOptions::default());
    draft
        .add_text(&TextSpec::new("title").with_duration(8_000_000), None)
        .unwrap();
    draft.add_effect("小花花", 0, 9_000_000);

    let saved = draft.save(&NullStore).unwrap();
    assert_eq!(saved.content.track(TrackKind::Text).unwrap().duration(), 8_000_000);
    assert_eq!(saved.content.track(TrackKind::Effect).unwrap().duration(), 9_000_000);
    assert_eq!(saved.duration, 2_000_000);
}

// ── Entity options through the draft ───────────────────────────

#[test]
fn speed_changes_timeline_length_not_source() {
    let mut draft = new_draft();
    place(
        &mut draft,
        &probed(MediaKind::Video, "fast.mp4", Some(10.0)),
        &MediaOptions::default().with_speed(2.0),
    );
    place(&mut draft, &probed(MediaKind::Video, "next.mp4", Some(1.0)), &MediaOptions::default());

    let track = draft.content().track(TrackKind::Video).unwrap();
    assert_eq!(track.segments[0].source_timerange.duration, 10_000_000);
    assert_eq!(track.segments[0].target_timerange.duration, 5_000_000);
    assert_eq!(track.segments[1].target_timerange.start, 5_000_000);
    assert_eq!(draft.content().materials.speeds[0].speed, 2.0);
}

#[test]
fn images_share_the_video_track() {
    let mut draft = new_draft();
    place(&mut draft, &probed(MediaKind::Video, "a.mp4", Some(3.0)), &MediaOptions::default());
    place(&mut draft, &probed(MediaKind::Image, "b.png", None), &MediaOptions::default());

    assert_eq!(draft.content().tracks.len(), 1);
    assert_eq!(draft.track_duration(TrackKind::Video), 8_000_000);

    let kinds: Vec<&str> = draft.content().materials.videos.iter().map(|v| v.kind.as_str()).collect();
    assert_eq!(kinds, vec!["video", "photo"]);
}

#[test]
fn configured_image_duration_applies() {
    let mut config = DraftConfig::default();
    config.image.default_duration = 2_500_000;
    let mut draft = Draft::with_name(config, "images");

    place(&mut draft, &probed(MediaKind::Image, "b.png", None), &MediaOptions::default());
    assert_eq!(draft.track_duration(TrackKind::Video), 2_500_000);
}

#[test]
fn text_color_markup() {
    let mut draft = new_draft();
    let id = draft
        .add_text(&TextSpec::new("Breaking").with_color("#FF0000"), None)
        .unwrap();

    let text = &draft.content().materials.texts[0];
    assert_eq!(text.id, id);
    assert_eq!(text.text_color, "#FF0000");
    assert!(text
        .content
        .contains("<color=(1.000000, 0.000000, 0.000000, 1.000000)>"));
    assert_eq!(text.text(), "Breaking");
}

#[test]
fn unknown_effect_uses_default_resource() {
    let mut draft = new_draft();
    let id = draft.add_effect("does-not-exist", 0, 1_000_000);

    let effect = &draft.content().materials.video_effects[0];
    assert_eq!(effect.id, id);
    assert_eq!(effect.resource_id, "7012933493663470088");
    assert!(draft.meta_info().records().next().is_none());
}

#[test]
fn configured_effect_resolves_by_name() {
    let mut config = DraftConfig::default();
    config
        .catalog
        .effects
        .insert("Sparkle".to_string(), "7000000000000000001".to_string());
    let mut draft = Draft::with_name(config, "effects");

    draft.add_effect("Sparkle", 0, 1_000_000);
    draft.add_effect(ResourceRef::ResourceId(42), 0, 1_000_000);

    let effects = &draft.content().materials.video_effects;
    assert_eq!(effects[0].resource_id, "7000000000000000001");
    assert_eq!(effects[0].name, "Sparkle");
    assert_eq!(effects[1].resource_id, "42");
    assert_eq!(effects[1].name, "42");
}

#[test]
fn out_animation_is_anchored_to_segment_end() {
    let mut draft = new_draft();
    let anim = draft
        .catalog()
        .animation(&"Fade".into(), AnimationType::Out, 0, 2_000_000);
    place(
        &mut draft,
        &probed(MediaKind::Video, "a.mp4", Some(10.0)),
        &MediaOptions::default().with_animation(anim),
    );

    let slot = &draft.content().materials.material_animations[0];
    let json = serde_json::to_value(slot).unwrap();
    assert_eq!(json["type"], "sticker_animation");
    assert_eq!(json["animations"][0]["start"], 8_000_000);
    assert_eq!(json["animations"][0]["type"], "out");
}

// ── Unvalidated numeric options ────────────────────────────────

#[test]
fn zero_speed_saturates_without_panicking() {
    let mut draft = new_draft();
    place(
        &mut draft,
        &probed(MediaKind::Video, "still.mp4", Some(10.0)),
        &MediaOptions::default().with_speed(0.0),
    );
    place(&mut draft, &probed(MediaKind::Video, "next.mp4", Some(1.0)), &MediaOptions::default());
    place(&mut draft, &probed(MediaKind::Audio, "bed.mp3", Some(5.0)), &MediaOptions::default());

    let saved = draft.save(&NullStore).unwrap();
    let video = saved.content.track(TrackKind::Video).unwrap();
    assert_eq!(video.segments[0].target_timerange, Timerange::new(0, Micros::MAX));
    assert_eq!(video.segments[0].source_timerange.duration, 10_000_000);
    assert_eq!(video.segments[1].target_timerange.start, Micros::MAX);
    assert_eq!(saved.duration, Micros::MAX);
    assert_eq!(saved.meta_info.tm_duration, Micros::MAX);
    assert_eq!(saved.content.track(TrackKind::Audio).unwrap().duration(), 5_000_000);
}

#[test]
fn negative_speed_flips_target_duration() {
    let mut draft = new_draft();
    place(
        &mut draft,
        &probed(MediaKind::Video, "back.mp4", Some(10.0)),
        &MediaOptions::default().with_speed(-1.0),
    );
    place(&mut draft, &probed(MediaKind::Audio, "bed.mp3", Some(5.0)), &MediaOptions::default());

    let saved = draft.save(&NullStore).unwrap();
    let video = &saved.content.track(TrackKind::Video).unwrap().segments[0];
    assert_eq!(video.source_timerange, Timerange::new(0, 10_000_000));
    assert_eq!(video.target_timerange, Timerange::new(0, -10_000_000));
    assert_eq!(saved.duration, -10_000_000);

    let audio = &saved.content.track(TrackKind::Audio).unwrap().segments[0];
    assert_eq!(audio.target_timerange, Timerange::new(0, -10_000_000));
    assert_eq!(audio.source_timerange.duration, -10_000_000);
}

#[test]
fn negative_explicit_duration_is_kept() {
    let mut draft = new_draft();
    place(
        &mut draft,
        &probed(MediaKind::Video, "a.mp4", Some(10.0)),
        &MediaOptions::default().with_duration(-3_000_000),
    );
    place(&mut draft, &probed(MediaKind::Video, "b.mp4", Some(1.0)), &MediaOptions::default());

    let saved = draft.save(&NullStore).unwrap();
    let video = saved.content.track(TrackKind::Video).unwrap();
    assert_eq!(video.segments[0].source_timerange, Timerange::new(0, -3_000_000));
    assert_eq!(video.segments[0].target_timerange, Timerange::new(0, -3_000_000));
    assert_eq!(video.segments[1].target_timerange, Timerange::new(-3_000_000, 1_000_000));
    assert_eq!(saved.duration, -2_000_000);
    assert_eq!(saved.content.materials.videos[0].duration, -3_000_000);
}

// ── Cross-document integrity ───────────────────────────────────

#[test]
fn every_reference_resolves_across_documents() {
    let mut draft = new_draft();
    let catalog = draft.catalog().clone();
    place(
        &mut draft,
        &probed(MediaKind::Video, "a.mp4", Some(5.0)),
        &MediaOptions::default()
            .with_transition(catalog.transition(&"闪黑".into(), 500_000))
            .with_animation(catalog.animation(&"Rise".into(), AnimationType::In, 0, 500_000)),
    );
    place(&mut draft, &probed(MediaKind::Image, "b.jpg", None), &MediaOptions::default().muted());
    place(
        &mut draft,
        &probed(MediaKind::Audio, "c.mp3", Some(30.0)),
        &MediaOptions::default().with_fades(1_000_000, 1_500_000),
    );
    draft.add_text(&TextSpec::new("hello"), None).unwrap();
    draft.add_effect("小花花", 0, 3_000_000);

    let saved = draft.save(&NullStore).unwrap();
    let content = &saved.content;
    assert!(content.dangling_references().is_empty());

    // Meta-info records mirror exactly the video and audio materials.
    let videos: HashSet<&ObjectId> = content.materials.videos.iter().map(|v| &v.id).collect();
    let audios: HashSet<&ObjectId> = content.materials.audios.iter().map(|a| &a.id).collect();
    let video_bucket: HashSet<&ObjectId> = saved
        .meta_info
        .bucket(VIDEO_BUCKET)
        .unwrap()
        .value
        .iter()
        .map(|r| &r.id)
        .collect();
    let audio_bucket: HashSet<&ObjectId> = saved
        .meta_info
        .bucket(AUDIO_BUCKET)
        .unwrap()
        .value
        .iter()
        .map(|r| &r.id)
        .collect();
    assert_eq!(video_bucket, videos);
    assert_eq!(audio_bucket, audios);
    assert_eq!(saved.meta_info.records().count(), 3);

    // Every id in the draft is distinct.
    let mut seen = HashSet::new();
    for track in &content.tracks {
        assert!(seen.insert(track.id.clone()));
        for segment in &track.segments {
            assert!(seen.insert(segment.id.clone()));
        }
    }
    for id in content.materials.ids() {
        assert!(seen.insert(id.clone()), "duplicate id {id}");
    }
    assert_ne!(content.id, saved.meta_info.draft_id);
}

#[test]
fn primary_material_matches_track_kind() {
    let mut draft = new_draft();
    let entity = draft
        .builder()
        .build_media(&probed(MediaKind::Audio, "song.wav", Some(1.0)), &MediaOptions::default())
        .unwrap();
    assert!(matches!(entity.primary, PrimaryMaterial::Audio(_)));
    assert_eq!(entity.track_kind, TrackKind::Audio);

    let id = draft.place_media(entity, Some(2_000_000));
    let track = draft.content().track(TrackKind::Audio).unwrap();
    assert_eq!(track.segments[0].material_id, id);
    assert_eq!(track.segments[0].target_timerange.start, 2_000_000);
}

#[test]
fn explicit_start_is_not_sorted() {
    let mut draft = new_draft();
    let entity = |draft: &Draft, seconds: f64| {
        draft
            .builder()
            .build_media(&probed(MediaKind::Video, "a.mp4", Some(seconds)), &MediaOptions::default())
            .unwrap()
    };

    let first = entity(&draft, 10.0);
    draft.place_media(first, None);
    let second = entity(&draft, 1.0);
    draft.place_media(second, Some(2_000_000));

    let expected: Micros = 3_000_000;
    assert_eq!(draft.track_duration(TrackKind::Video), expected);
}
