//! Track types for the content document.

use draftkit_core::{Micros, ObjectId, Timerange};
use serde::{Deserialize, Serialize};

use crate::template::Segment;

/// Kind of track.
///
/// A draft holds at most one track of each kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackKind {
    Video,
    Audio,
    Text,
    Effect,
}

impl TrackKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrackKind::Video => "video",
            TrackKind::Audio => "audio",
            TrackKind::Text => "text",
            TrackKind::Effect => "effect",
        }
    }
}

impl std::fmt::Display for TrackKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A track holding segments in placement order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub attribute: i32,
    pub flag: i32,
    /// Unique track ID
    pub id: ObjectId,
    /// Segments in placement order
    pub segments: Vec<Segment>,
    #[serde(rename = "type")]
    pub kind: TrackKind,
}

impl Track {
    /// Create a new empty track.
    pub fn new(kind: TrackKind) -> Self {
        Self {
            attribute: 0,
            flag: 0,
            id: ObjectId::generate(),
            segments: Vec::new(),
            kind,
        }
    }

    /// End of the last segment on the timeline, or 0 for an empty track.
    ///
    /// Segments are not sorted: a later explicit placement at an earlier
    /// start shortens the reported duration.
    pub fn duration(&self) -> Micros {
        self.segments.last().map(Segment::target_end).unwrap_or(0)
    }

    /// Add a segment to the end of the track.
    pub fn append_segment(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    /// Clamp the track so nothing plays past `limit`.
    ///
    /// The first segment ending after `limit` keeps `limit - start` of both
    /// its source and target durations. Every segment after it has both
    /// timeranges zeroed. Segments are never removed, so ids referenced from
    /// materials stay valid.
    pub fn truncate(&mut self, limit: Micros) {
        let mut cut = false;
        for segment in &mut self.segments {
            if cut {
                segment.source_timerange = Timerange::ZERO;
                segment.target_timerange = Timerange::ZERO;
                continue;
            }

            if segment.target_end() > limit {
                let kept = limit.saturating_sub(segment.target_timerange.start);
                segment.source_timerange.duration = kept;
                segment.target_timerange.duration = kept;
                cut = true;
            }
        }
    }

    /// Number of segments in this track.
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }
}
