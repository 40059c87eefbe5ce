//! Integration tests for writing drafts to disk.

use draftkit_core::DraftConfig;
use draftkit_draft::{
    load_documents, Draft, DraftSession, FsDraftStore, MediaOptions, TextSpec, TrackKind,
    CONTENT_FILE_NAME, META_INFO_FILE_NAME,
};
use draftkit_media::ExtensionProbe;
use serde_json::Value;
use std::path::Path;

fn read_json(path: &Path) -> Value {
    let data = std::fs::read(path).unwrap();
    serde_json::from_slice(&data).unwrap()
}

fn touch(dir: &Path, name: &str) {
    std::fs::write(dir.join(name), b"not really media").unwrap();
}

#[test]
fn saved_folder_holds_both_documents() {
    crate::init_tracing();
    let tmp = tempfile::tempdir().expect("failed to create tempdir");
    touch(tmp.path(), "clip.mp4");
    touch(tmp.path(), "music.mp3");

    let probe = ExtensionProbe::default();
    let mut draft = Draft::with_name(DraftConfig::default().with_drafts_root(tmp.path()), "on-disk");
    for name in ["clip.mp4", "music.mp3", "missing.mp4", "notes.txt"] {
        draft
            .add_media(&probe, &tmp.path().join(name), &MediaOptions::default(), None)
            .unwrap();
    }

    let saved = draft.save_to_disk().unwrap();
    assert_eq!(saved.folder, tmp.path().join("on-disk"));

    let content = read_json(&saved.folder.join(CONTENT_FILE_NAME));
    let meta = read_json(&saved.folder.join(META_INFO_FILE_NAME));

    assert_eq!(content["duration"], 10_000_000);
    assert_eq!(meta["tm_duration"], 10_000_000);
    assert_eq!(content["materials"]["videos"].as_array().unwrap().len(), 1);
    assert_eq!(content["materials"]["audios"].as_array().unwrap().len(), 1);
    assert!(content["materials"]["stickers"].as_array().unwrap().is_empty());
    assert_eq!(content["tracks"].as_array().unwrap().len(), 2);
    assert_eq!(content["tracks"][0]["type"], "video");

    let codes: Vec<i64> = meta["draft_materials"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["type"].as_i64().unwrap())
        .collect();
    assert_eq!(codes, vec![0, 1, 2, 3, 6, 7, 8]);

    let video_record = &meta["draft_materials"][0]["value"][0];
    assert_eq!(video_record["id"], content["materials"]["videos"][0]["id"]);
    assert_eq!(video_record["metetype"], "video");
    assert_eq!(video_record["extra_info"], "clip");
    assert!(video_record["file_Path"].as_str().unwrap().ends_with("clip.mp4"));

    let audio_record = &meta["draft_materials"][6]["value"][0];
    assert_eq!(audio_record["id"], content["materials"]["audios"][0]["id"]);
    assert_eq!(audio_record["metetype"], "music");
}

#[test]
fn reloaded_documents_match_saved() {
    let tmp = tempfile::tempdir().expect("failed to create tempdir");
    let mut draft = Draft::with_name(DraftConfig::default().with_drafts_root(tmp.path()), "reload");
    draft.add_text(&TextSpec::new("caption").with_size(20.0), None).unwrap();
    draft.add_effect("小花花", 0, 2_000_000);

    let saved = draft.save_to_disk().unwrap();
    let (content, meta) = load_documents(&saved.folder).unwrap();

    assert_eq!(content, saved.content);
    assert_eq!(meta, saved.meta_info);
    assert_eq!(content.track(TrackKind::Text).unwrap().segment_count(), 1);
    assert!(content.materials.texts[0].content.contains("<size=20.000000>caption</size>"));
}

#[test]
fn session_round_trip_with_background_music() {
    crate::init_tracing();
    let tmp = tempfile::tempdir().expect("failed to create tempdir");
    let res = tmp.path().join("res");
    std::fs::create_dir_all(&res).unwrap();
    touch(&res, "intro.mp4");
    touch(&res, "outro.mp4");
    touch(&res, draftkit_draft::session::DEFAULT_BGM_FILE_NAME);

    let probe = ExtensionProbe::default();
    let saved = DraftSession::scoped(
        DraftConfig::default().with_drafts_root(tmp.path().join("drafts")),
        "session",
        &res,
        &probe,
        &FsDraftStore,
        true,
        |session| {
            session.add_media("intro.mp4", &MediaOptions::default())?;
            session.add_media("outro.mp4", &MediaOptions::default().with_speed(2.0))?;
            session.add_text(&TextSpec::new("The End"))?;
            assert_eq!(session.duration(), 15_000_000);
            Ok(())
        },
    )
    .unwrap();

    assert_eq!(saved.duration, 15_000_000);
    let (content, meta) = load_documents(&saved.folder).unwrap();
    assert_eq!(content.materials.audio_fades.len(), 1);
    assert_eq!(content.track(TrackKind::Audio).unwrap().duration(), 15_000_000);
    assert_eq!(meta.draft_name, "session");
    assert!(meta.tm_draft_modified >= meta.tm_draft_create);
}
