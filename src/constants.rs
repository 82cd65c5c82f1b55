//! Application-wide constants.
//!
//! All magic numbers and strings are defined here to ensure consistency
//! and make changes easy to track.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "clipscan";

/// Input file extension recognised when scanning directories.
pub const TIMELINE_EXTENSION: &str = "xml";

/// Output file extensions by format.
pub mod output_extensions {
    /// Text report extension.
    pub const TEXT: &str = ".clips.txt";
    /// CSV table extension.
    pub const CSV: &str = ".clips.csv";
    /// JSON envelope extension.
    pub const JSON: &str = ".clips.json";
}

/// Substring markers that identify raw source-media file names.
///
/// Order matters: the legacy filter policy only ever consults the first entry.
pub const MEDIA_SUFFIXES: &[&str] = &[
    ".mp4", ".avi", ".mov", ".mkv", ".flv", ".wmv", ".ari", ".dng", ".mxf", ".r3d", ".arw", ".jpg",
    ".jpeg", ".dpx", ".cine", ".raw", ".wav", ".wave", ".mp3", ".aac", ".ogg", ".flac", ".wma",
    ".aiff", ".au", ".m4a", ".ape",
];

/// Text report layout.
pub mod report {
    /// Header line opening the video block.
    pub const VIDEO_HEADER: &str = "视频轨道信息:";
    /// Header line opening the audio block.
    pub const AUDIO_HEADER: &str = "音频轨道信息:";
    /// Key of the line that starts every clip block.
    pub const CLIP_NAME_KEY: &str = "片段名称";
    /// Sub-heading for video fields inside a clip block.
    pub const VIDEO_HEADING: &str = "Video:";
    /// Sub-heading for audio fields inside a clip block.
    pub const AUDIO_HEADING: &str = "Audio:";
    /// Line closing every clip block.
    pub const SEPARATOR: &str = "---";
    /// Indentation of field lines.
    pub const FIELD_INDENT: &str = "  ";
}

/// Default values printed when a field is absent from a clip.
pub mod defaults {
    /// Generic "none".
    pub const NONE: &str = "无";
    /// Generic "unknown".
    pub const UNKNOWN: &str = "未知";
    /// No keyframe detected.
    pub const NO_KEYFRAME: &str = "未检测到关键帧";
}

/// UTF-8 Byte Order Mark for Excel compatibility in CSV files.
pub const UTF8_BOM: &[u8; 3] = b"\xEF\xBB\xBF";
