//! Clip name classification.
//!
//! Decides whether a clip name denotes a derived (sequence) clip that belongs
//! in the report, or a raw source-media reference that is dropped.

use serde::{Deserialize, Serialize};

use crate::constants::MEDIA_SUFFIXES;
use crate::error::{Error, Result};

/// Rule used to classify clip names against [`MEDIA_SUFFIXES`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterPolicy {
    /// First-marker short-circuit.
    ///
    /// Only the first marker (`.mp4`) is ever tested: a name containing it is
    /// kept, any other name is dropped.
    #[default]
    Legacy,
    /// Keep names that contain any of the media markers.
    ///
    /// This is what the desktop tool's reports actually contain.
    AnyMedia,
    /// Keep names that contain none of the media markers.
    ExcludeMedia,
}

impl std::fmt::Display for FilterPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Legacy => write!(f, "legacy"),
            Self::AnyMedia => write!(f, "any-media"),
            Self::ExcludeMedia => write!(f, "exclude-media"),
        }
    }
}

impl std::str::FromStr for FilterPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "legacy" => Ok(Self::Legacy),
            "any-media" => Ok(Self::AnyMedia),
            "exclude-media" | "strict" => Ok(Self::ExcludeMedia),
            other => Err(format!("unknown filter policy: {other}")),
        }
    }
}

/// Classify a clip name.
///
/// Matching is case-sensitive substring containment, not a true suffix test.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] when `name` is `None`; callers skip
/// unnamed clips before classifying.
pub fn is_sequence_clip(name: Option<&str>, policy: FilterPolicy) -> Result<bool> {
    let name = name.ok_or_else(|| Error::InvalidInput {
        message: "clip has no name text".to_string(),
    })?;

    let keep = match policy {
        FilterPolicy::Legacy => MEDIA_SUFFIXES
            .first()
            .is_some_and(|marker| name.contains(marker)),
        FilterPolicy::AnyMedia => MEDIA_SUFFIXES.iter().any(|marker| name.contains(marker)),
        FilterPolicy::ExcludeMedia => !MEDIA_SUFFIXES.iter().any(|marker| name.contains(marker)),
    };

    Ok(keep)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_keeps_names_with_first_marker() {
        assert!(is_sequence_clip(Some("Final_Edit.mp4"), FilterPolicy::Legacy).unwrap());
        assert!(is_sequence_clip(Some("a.mp4.wav.mov"), FilterPolicy::Legacy).unwrap());
    }

    #[test]
    fn test_legacy_drops_names_without_first_marker() {
        assert!(!is_sequence_clip(Some("Final_Edit"), FilterPolicy::Legacy).unwrap());
        assert!(!is_sequence_clip(Some("interview.mov"), FilterPolicy::Legacy).unwrap());
        assert!(!is_sequence_clip(Some("voice.wav"), FilterPolicy::Legacy).unwrap());
    }

    #[test]
    fn test_legacy_is_case_sensitive() {
        assert!(!is_sequence_clip(Some("CLIP.MP4"), FilterPolicy::Legacy).unwrap());
    }

    #[test]
    fn test_any_media_keeps_names_with_any_marker() {
        let policy = FilterPolicy::AnyMedia;
        assert!(is_sequence_clip(Some("interview.mov"), policy).unwrap());
        assert!(is_sequence_clip(Some("voice.wav"), policy).unwrap());
        assert!(is_sequence_clip(Some("Final_Edit.mp4"), policy).unwrap());
        assert!(!is_sequence_clip(Some("Final_Edit"), policy).unwrap());

        assert!(!is_sequence_clip(Some("interview.mov"), FilterPolicy::Legacy).unwrap());
    }

    #[test]
    fn test_exclude_media_tests_every_marker() {
        let policy = FilterPolicy::ExcludeMedia;
        assert!(is_sequence_clip(Some("Final_Edit"), policy).unwrap());
        assert!(is_sequence_clip(Some("Nested Sequence 01"), policy).unwrap());
        assert!(!is_sequence_clip(Some("Final_Edit.mp4"), policy).unwrap());
        assert!(!is_sequence_clip(Some("A001C002.ape"), policy).unwrap());
        assert!(!is_sequence_clip(Some("frame.0001.dpx"), policy).unwrap());
    }

    #[test]
    fn test_missing_name_is_invalid_input() {
        for policy in [
            FilterPolicy::Legacy,
            FilterPolicy::AnyMedia,
            FilterPolicy::ExcludeMedia,
        ] {
            let result = is_sequence_clip(None, policy);
            assert!(matches!(result, Err(Error::InvalidInput { .. })));
        }
    }

    #[test]
    fn test_filter_policy_from_str() {
        assert_eq!(
            "legacy".parse::<FilterPolicy>().ok(),
            Some(FilterPolicy::Legacy)
        );
        assert_eq!(
            "exclude-media".parse::<FilterPolicy>().ok(),
            Some(FilterPolicy::ExcludeMedia)
        );
        assert_eq!(
            "any-media".parse::<FilterPolicy>().ok(),
            Some(FilterPolicy::AnyMedia)
        );
        assert_eq!(
            "STRICT".parse::<FilterPolicy>().ok(),
            Some(FilterPolicy::ExcludeMedia)
        );
        assert!("sometimes".parse::<FilterPolicy>().is_err());
    }

    #[test]
    fn test_filter_policy_display_round_trips() {
        for policy in [
            FilterPolicy::Legacy,
            FilterPolicy::AnyMedia,
            FilterPolicy::ExcludeMedia,
        ] {
            assert_eq!(policy.to_string().parse::<FilterPolicy>().ok(), Some(policy));
        }
    }
}
