//! Track selection.
//!
//! Finds every `clipitem` element that sits anywhere below a `video` or
//! `audio` element, however deep the intermediate containers go.

use roxmltree::{Document, Node};
use serde::{Deserialize, Serialize};

use crate::constants::report::{AUDIO_HEADER, VIDEO_HEADER};

/// Tag name of a timeline clip instance.
pub const CLIP_ITEM_TAG: &str = "clipitem";

/// Which subtree of the timeline to scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackKind {
    /// Clips below a `video` element.
    Video,
    /// Clips below an `audio` element.
    Audio,
}

impl TrackKind {
    /// Scan order used when building a report.
    pub const ALL: [Self; 2] = [Self::Video, Self::Audio];

    /// Element name that marks this track kind.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Audio => "audio",
        }
    }

    /// Header line opening this kind's block in the text report.
    pub const fn header(self) -> &'static str {
        match self {
            Self::Video => VIDEO_HEADER,
            Self::Audio => AUDIO_HEADER,
        }
    }
}

impl std::fmt::Display for TrackKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Collect the `clipitem` elements nested under elements named after `kind`.
///
/// Results follow document order. A clip nested under several matching
/// ancestors is still returned once. An empty result is not an error.
pub fn select_clip_items<'a, 'input>(
    doc: &'a Document<'input>,
    kind: TrackKind,
) -> Vec<Node<'a, 'input>> {
    doc.descendants()
        .filter(|node| node.is_element() && node.tag_name().name() == CLIP_ITEM_TAG)
        .filter(|node| {
            node.ancestors()
                .skip(1)
                .any(|ancestor| ancestor.is_element() && ancestor.tag_name().name() == kind.tag())
        })
        .collect()
}
