//! Property tests for placement and reconciliation.

use draftkit_core::{DraftConfig, Micros, ObjectId, Timerange};
use draftkit_draft::template::Segment;
use draftkit_draft::{
    ContentDocument, Draft, DraftStore, MediaOptions, MetaInfoDocument, Track, TrackKind,
};
use draftkit_media::{MediaKind, ProbeInfo};
use proptest::prelude::*;
use std::path::Path;

struct NullStore;

impl DraftStore for NullStore {
    fn write(&self, _: &Path, _: &ContentDocument, _: &MetaInfoDocument) -> draftkit_core::Result<()> {
        Ok(())
    }
}

fn place_all(draft: &mut Draft, kind: MediaKind, durations: &[Micros]) {
    for &d in durations {
        let info = ProbeInfo::new("/media/item.bin", kind);
        let options = MediaOptions::default().with_duration(d);
        let entity = draft.builder().build_media(&info, &options).unwrap();
        draft.place_media(entity, None);
    }
}

fn track_of(durations: &[Micros]) -> Track {
    let mut track = Track::new(TrackKind::Audio);
    let mut start = 0;
    for &d in durations {
        let mut segment = Segment::new(ObjectId::generate());
        segment.source_timerange = Timerange::new(0, d);
        segment.target_timerange = Timerange::new(start, d);
        track.append_segment(segment);
        start += d;
    }
    track
}

fn durations() -> impl Strategy<Value = Vec<Micros>> {
    prop::collection::vec(1..60_000_000i64, 1..12)
}

proptest! {
    #[test]
    fn appended_segments_start_at_previous_sum(ds in durations()) {
        let mut draft = Draft::with_name(DraftConfig::default(), "prop");
        place_all(&mut draft, MediaKind::Video, &ds);

        let track = draft.content().track(TrackKind::Video).unwrap();
        let mut expected_start = 0;
        for (segment, d) in track.segments.iter().zip(&ds) {
            prop_assert_eq!(segment.target_timerange.start, expected_start);
            prop_assert_eq!(segment.target_timerange.duration, *d);
            expected_start += d;
        }
        prop_assert_eq!(draft.track_duration(TrackKind::Video), ds.iter().sum::<Micros>());
    }

    #[test]
    fn truncate_is_noop_at_or_beyond_track_end(ds in durations(), extra in 0..10_000_000i64) {
        let mut track = track_of(&ds);
        let before = track.clone();
        track.truncate(track.duration() + extra);
        prop_assert_eq!(&track, &before);
    }

    #[test]
    fn truncate_is_idempotent(ds in durations(), limit in 0..200_000_000i64) {
        let mut once = track_of(&ds);
        once.truncate(limit);
        let mut twice = once.clone();
        twice.truncate(limit);

        prop_assert_eq!(&once, &twice);
        prop_assert!(once.segments.iter().all(|s| s.target_end() <= limit));
        prop_assert_eq!(once.segments.len(), ds.len());
    }

    #[test]
    fn saved_durations_agree(video in durations(), audio in durations()) {
        let mut draft = Draft::with_name(DraftConfig::default(), "prop");
        place_all(&mut draft, MediaKind::Video, &video);
        place_all(&mut draft, MediaKind::Audio, &audio);
        let video_total: Micros = video.iter().sum();

        let saved = draft.save(&NullStore).unwrap();
        prop_assert_eq!(saved.content.duration, video_total);
        prop_assert_eq!(saved.meta_info.tm_duration, video_total);

        let audio_track = saved.content.track(TrackKind::Audio).unwrap();
        prop_assert!(audio_track.duration() <= video_total);
        prop_assert!(audio_track.segments.iter().all(|s| s.target_end() <= video_total));
    }
}
