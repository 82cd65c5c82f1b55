//! Clip metadata extraction from timeline XML exports.
//!
//! Extraction runs in three stages over one parsed document: track selection,
//! clip name filtering and attribute harvesting. The stages run once per
//! track kind and their output is collected into a [`Report`].

mod filter;
mod harvest;
mod report;
mod track;

pub use filter::{FilterPolicy, is_sequence_clip};
pub use harvest::{AttributeSet, FIELDS, FieldKey, FieldSpec, Lookup, Section, harvest};
pub use report::{Report, TrackSection, TrackStats};
pub use track::{CLIP_ITEM_TAG, TrackKind, select_clip_items};

use std::path::Path;

use roxmltree::{Document, ParsingOptions};
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Tag of the child element holding a clip's name.
const NAME_TAG: &str = "name";

/// Parse a timeline document.
///
/// Exports usually carry a `<!DOCTYPE xmeml>` declaration, so DTDs are
/// accepted.
pub fn parse_document(xml: &str) -> std::result::Result<Document<'_>, roxmltree::Error> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    Document::parse_with_options(xml, options)
}

/// Extract a report from timeline XML text.
pub fn extract_str(xml: &str, policy: FilterPolicy) -> Result<Report> {
    let doc = parse_document(xml)?;
    extract_document(&doc, policy)
}

/// Read and extract a report from a timeline file.
pub fn extract_file(path: &Path, policy: FilterPolicy) -> Result<Report> {
    let xml = std::fs::read_to_string(path).map_err(|e| Error::DocumentRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let doc = parse_document(&xml).map_err(|e| Error::DocumentParse {
        path: path.to_path_buf(),
        source: e,
    })?;

    extract_document(&doc, policy)
}

/// Extract a report from an already parsed document.
pub fn extract_document(doc: &Document<'_>, policy: FilterPolicy) -> Result<Report> {
    let sections = TrackKind::ALL
        .into_iter()
        .map(|kind| scan_track(doc, kind, policy))
        .collect::<Result<Vec<_>>>()?;

    Ok(Report { policy, sections })
}

fn scan_track(doc: &Document<'_>, kind: TrackKind, policy: FilterPolicy) -> Result<TrackSection> {
    let mut section = TrackSection::new(kind);

    for clip in select_clip_items(doc, kind) {
        section.stats.candidates += 1;

        let named = clip
            .children()
            .find(|child| child.is_element() && child.tag_name().name() == NAME_TAG)
            .and_then(|node| node.text().map(|text| (node, text)));
        let Some((name, text)) = named else {
            debug!(
                "Skipping unnamed {kind} clip {}",
                clip.attribute("id").unwrap_or("<no id>")
            );
            section.stats.unnamed += 1;
            continue;
        };

        if !is_sequence_clip(Some(text), policy)? {
            debug!("Filtered out {kind} clip: {text}");
            section.stats.filtered_out += 1;
            continue;
        }

        section.clips.push(harvest(name));
    }

    info!(
        "{} track: {} clip(s) kept, {} filtered out, {} unnamed",
        kind,
        section.clips.len(),
        section.stats.filtered_out,
        section.stats.unnamed
    );

    Ok(section)
}
