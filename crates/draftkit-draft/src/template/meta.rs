//! Meta-info records.

use chrono::Utc;
use draftkit_core::{Micros, ObjectId, Timerange};
use serde::{Deserialize, Serialize};

/// Reduced copy of a video or audio material, stored in a meta-info bucket.
///
/// `id` is the id of the content-document material it mirrors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaInfoRecord {
    /// Unix seconds.
    pub create_time: i64,
    pub duration: Micros,
    /// Material display name.
    pub extra_info: String,
    #[serde(rename = "file_Path")]
    pub file_path: String,
    pub height: u32,
    pub id: ObjectId,
    pub import_time: i64,
    pub import_time_ms: i64,
    pub md5: String,
    /// Record kind of the mirrored material (`video`, `photo`, `music`).
    pub metetype: String,
    pub roughcut_time_range: Timerange,
    pub sub_time_range: Timerange,
    #[serde(rename = "type")]
    pub kind: i32,
    pub width: u32,
}

impl MetaInfoRecord {
    pub fn new(id: ObjectId) -> Self {
        let now = Utc::now();
        Self {
            create_time: now.timestamp(),
            duration: 0,
            extra_info: String::new(),
            file_path: String::new(),
            height: 0,
            id,
            import_time: now.timestamp(),
            import_time_ms: now.timestamp_millis(),
            md5: String::new(),
            metetype: String::new(),
            roughcut_time_range: Timerange::ZERO,
            sub_time_range: Timerange::new(-1, -1),
            kind: 0,
            width: 0,
        }
    }
}
