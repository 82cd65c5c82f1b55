//! Text report assembly.
//!
//! The report lists one block per kept clip, grouped by track kind:
//!
//! ```text
//! 视频轨道信息:
//!
//! 片段名称: Final_Edit.mp4
//! Video:
//!   素材长度: 1920
//!   ...
//! Audio:
//!   音频位深: 16
//!   ...
//! ---
//!
//! 音频轨道信息:
//! ```

use std::fmt;

use crate::constants::report::{
    AUDIO_HEADING, CLIP_NAME_KEY, FIELD_INDENT, SEPARATOR, VIDEO_HEADING,
};
use crate::timeline::filter::FilterPolicy;
use crate::timeline::harvest::{AttributeSet, Section};
use crate::timeline::track::TrackKind;

/// Counters collected while scanning one track kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrackStats {
    /// `clipitem` elements found under the track kind.
    pub candidates: usize,
    /// Clips skipped because they have no name text.
    pub unnamed: usize,
    /// Clips dropped by the name filter.
    pub filtered_out: usize,
}

/// Kept clips of one track kind, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackSection {
    /// Track kind of this block.
    pub kind: TrackKind,
    /// Harvested records.
    pub clips: Vec<AttributeSet>,
    /// Scan counters.
    pub stats: TrackStats,
}

impl TrackSection {
    /// Create an empty section.
    pub fn new(kind: TrackKind) -> Self {
        Self {
            kind,
            clips: Vec::new(),
            stats: TrackStats::default(),
        }
    }
}

/// Result of one extraction run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Filter policy the clips were classified with.
    pub policy: FilterPolicy,
    /// Sections in output order: video, then audio.
    pub sections: Vec<TrackSection>,
}

impl Report {
    /// Section for a track kind.
    pub fn section(&self, kind: TrackKind) -> Option<&TrackSection> {
        self.sections.iter().find(|section| section.kind == kind)
    }

    /// Number of kept clips across all sections.
    pub fn total_clips(&self) -> usize {
        self.sections.iter().map(|section| section.clips.len()).sum()
    }

    /// Render the text report.
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for section in &self.sections {
            writeln!(f, "{}", section.kind.header())?;
            for clip in &section.clips {
                write!(f, "{clip}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for AttributeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "{CLIP_NAME_KEY}: {}", self.clip_name())?;
        for (section, heading) in [(Section::Video, VIDEO_HEADING), (Section::Audio, AUDIO_HEADING)] {
            writeln!(f, "{heading}")?;
            for (spec, value) in self.resolved_fields() {
                if spec.section == section {
                    writeln!(f, "{FIELD_INDENT}{}: {value}", spec.label)?;
                }
            }
        }
        writeln!(f, "{SEPARATOR}")?;
        writeln!(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::harvest::FieldKey;

    fn report_with(video: Vec<AttributeSet>, audio: Vec<AttributeSet>) -> Report {
        let mut video_section = TrackSection::new(TrackKind::Video);
        video_section.clips = video;
        let mut audio_section = TrackSection::new(TrackKind::Audio);
        audio_section.clips = audio;
        Report {
            policy: FilterPolicy::Legacy,
            sections: vec![video_section, audio_section],
        }
    }

    #[test]
    fn test_empty_report_has_only_headers() {
        let report = report_with(vec![], vec![]);
        assert_eq!(report.to_text(), "视频轨道信息:\n音频轨道信息:\n");
        assert_eq!(report.total_clips(), 0);
    }

    #[test]
    fn test_clip_block_layout() {
        let clip = AttributeSet::new("Final_Edit.mp4")
            .with(FieldKey::Width, "1920")
            .with(FieldKey::Timecode, "01:00:00:00")
            .with(FieldKey::SampleRate, "48000");

        let expected = "\n片段名称: Final_Edit.mp4\n\
            Video:\n\
            \x20 素材长度: 1920\n\
            \x20 素材宽度: 无\n\
            \x20 素材帧数: 无\n\
            \x20 素材开始: 无\n\
            \x20 素材结束: 无\n\
            \x20 素材时码: 01:00:00:00\n\
            \x20 透明通道: 无\n\
            \x20 绕过特效: 未知\n\
            \x20 特效类型: 未知\n\
            \x20 始关键帧: 未检测到关键帧\n\
            \x20 可变参数: 未知\n\
            \x20 参数名称: 未知\n\
            \x20 交付软件: 未知\n\
            Audio:\n\
            \x20 音频位深: 无\n\
            \x20 音频通道: 无\n\
            \x20 音频采样: 48000\n\
            ---\n\n";

        assert_eq!(clip.to_string(), expected);
    }

    #[test]
    fn test_sections_render_video_then_audio() {
        let report = report_with(
            vec![AttributeSet::new("v.mp4")],
            vec![AttributeSet::new("a.mp4")],
        );
        let text = report.to_text();

        let video_header = text.find("视频轨道信息:").unwrap_or(usize::MAX);
        let video_clip = text.find("片段名称: v.mp4").unwrap_or(usize::MAX);
        let audio_header = text.find("音频轨道信息:").unwrap_or(usize::MAX);
        let audio_clip = text.find("片段名称: a.mp4").unwrap_or(usize::MAX);

        assert!(video_header < video_clip);
        assert!(video_clip < audio_header);
        assert!(audio_header < audio_clip);
        assert_eq!(report.total_clips(), 2);
    }

    #[test]
    fn test_section_lookup() {
        let report = report_with(vec![], vec![AttributeSet::new("a.mp4")]);
        assert_eq!(
            report.section(TrackKind::Audio).map(|s| s.clips.len()),
            Some(1)
        );
    }
}
