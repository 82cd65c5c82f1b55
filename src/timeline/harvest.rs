//! Attribute harvesting.
//!
//! Every reported field is described once in [`FIELDS`] as a lookup over the
//! clip's subtree. Lookups are evaluated independently, so a missing element
//! only ever affects its own field.

use std::collections::BTreeMap;

use roxmltree::Node;
use serde::{Deserialize, Serialize};

use crate::constants::defaults::{NO_KEYFRAME, NONE, UNKNOWN};

/// Keys of the harvested fields, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKey {
    /// Frame width.
    Width,
    /// Frame height.
    Height,
    /// Frame rate base.
    Timebase,
    /// Start frame on the timeline.
    Start,
    /// End frame on the timeline.
    End,
    /// Source timecode string.
    Timecode,
    /// Alpha channel type.
    AlphaType,
    /// Effect bypass flag.
    #[serde(rename = "pproBypass")]
    PproBypass,
    /// Effect type.
    EffectType,
    /// Time of the first keyframe.
    When,
    /// First effect parameter value.
    Value,
    /// First effect parameter id.
    ParameterId,
    /// Application that authored the effect parameters.
    #[serde(rename = "authoringApp")]
    AuthoringApp,
    /// Audio bit depth.
    Depth,
    /// Audio channel count.
    ChannelCount,
    /// Audio sample rate.
    SampleRate,
}

impl FieldKey {
    /// Declarative description of this field.
    pub fn spec(self) -> &'static FieldSpec {
        &FIELDS[self as usize]
    }

    /// Name of the field as used in JSON output.
    pub fn as_str(self) -> &'static str {
        self.spec().name
    }
}

impl std::fmt::Display for FieldKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sub-heading a field is printed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// Picture, timing and effect fields.
    Video,
    /// Sound format fields.
    Audio,
}

/// How a field's value is located below the clip element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    /// Text of an element path.
    ///
    /// The first step matches at any depth; later steps match direct children.
    Text(&'static [&'static str]),
    /// Attribute value on any descendant element with the given tag.
    Attribute {
        /// Element tag.
        element: &'static str,
        /// Attribute name.
        attribute: &'static str,
    },
}

/// Declarative description of one harvested field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Field key.
    pub key: FieldKey,
    /// Machine-readable name.
    pub name: &'static str,
    /// Label printed in the text report and used as a table column.
    pub label: &'static str,
    /// Sub-heading the field belongs to.
    pub section: Section,
    /// Where the value comes from.
    pub lookup: Lookup,
    /// Value reported when the lookup finds nothing.
    pub default: &'static str,
}

const fn field(
    key: FieldKey,
    name: &'static str,
    label: &'static str,
    section: Section,
    lookup: Lookup,
    default: &'static str,
) -> FieldSpec {
    FieldSpec {
        key,
        name,
        label,
        section,
        lookup,
        default,
    }
}

/// All harvested fields, indexed by [`FieldKey`] discriminant.
pub static FIELDS: [FieldSpec; 16] = [
    field(FieldKey::Width, "width", "素材长度", Section::Video, Lookup::Text(&["width"]), NONE),
    field(FieldKey::Height, "height", "素材宽度", Section::Video, Lookup::Text(&["height"]), NONE),
    field(
        FieldKey::Timebase,
        "timebase",
        "素材帧数",
        Section::Video,
        Lookup::Text(&["timebase"]),
        NONE,
    ),
    field(FieldKey::Start, "start", "素材开始", Section::Video, Lookup::Text(&["start"]), NONE),
    field(FieldKey::End, "end", "素材结束", Section::Video, Lookup::Text(&["end"]), NONE),
    field(
        FieldKey::Timecode,
        "timecode",
        "素材时码",
        Section::Video,
        Lookup::Text(&["timecode", "string"]),
        NONE,
    ),
    field(
        FieldKey::AlphaType,
        "alphatype",
        "透明通道",
        Section::Video,
        Lookup::Text(&["alphatype"]),
        NONE,
    ),
    field(
        FieldKey::PproBypass,
        "pproBypass",
        "绕过特效",
        Section::Video,
        Lookup::Text(&["pproBypass"]),
        UNKNOWN,
    ),
    field(
        FieldKey::EffectType,
        "effecttype",
        "特效类型",
        Section::Video,
        Lookup::Text(&["effecttype"]),
        UNKNOWN,
    ),
    field(FieldKey::When, "when", "始关键帧", Section::Video, Lookup::Text(&["when"]), NO_KEYFRAME),
    field(FieldKey::Value, "value", "可变参数", Section::Video, Lookup::Text(&["value"]), UNKNOWN),
    field(
        FieldKey::ParameterId,
        "parameterid",
        "参数名称",
        Section::Video,
        Lookup::Text(&["parameterid"]),
        UNKNOWN,
    ),
    field(
        FieldKey::AuthoringApp,
        "authoringApp",
        "交付软件",
        Section::Video,
        Lookup::Attribute {
            element: "parameter",
            attribute: "authoringApp",
        },
        UNKNOWN,
    ),
    field(FieldKey::Depth, "depth", "音频位深", Section::Audio, Lookup::Text(&["depth"]), NONE),
    field(
        FieldKey::ChannelCount,
        "channelcount",
        "音频通道",
        Section::Audio,
        Lookup::Text(&["channelcount"]),
        NONE,
    ),
    field(
        FieldKey::SampleRate,
        "samplerate",
        "音频采样",
        Section::Audio,
        Lookup::Text(&["samplerate"]),
        NONE,
    ),
];

/// Harvested record for one clip.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeSet {
    clip_name: String,
    values: BTreeMap<FieldKey, String>,
}

impl AttributeSet {
    /// Create an empty record for a clip.
    pub fn new(clip_name: impl Into<String>) -> Self {
        Self {
            clip_name: clip_name.into(),
            values: BTreeMap::new(),
        }
    }

    /// Set a field value.
    #[must_use]
    pub fn with(mut self, key: FieldKey, value: impl Into<String>) -> Self {
        self.values.insert(key, value.into());
        self
    }

    /// Clip name as written in the timeline.
    pub fn clip_name(&self) -> &str {
        &self.clip_name
    }

    /// Value found in the document, if any.
    pub fn get(&self, key: FieldKey) -> Option<&str> {
        self.values.get(&key).map(String::as_str)
    }

    /// Value found in the document, or the field's default.
    pub fn resolved(&self, key: FieldKey) -> &str {
        self.get(key).unwrap_or(key.spec().default)
    }

    /// All fields in report order with defaults applied.
    pub fn resolved_fields(&self) -> impl Iterator<Item = (&'static FieldSpec, &str)> + '_ {
        FIELDS.iter().map(|spec| (spec, self.resolved(spec.key)))
    }
}

/// Harvest every field for the clip owning `name`.
///
/// Lookups run over the subtree of the name element's parent. A parentless
/// name node harvests from itself. Line breaks inside the name or a value
/// are folded into single spaces so every field occupies one report line.
pub fn harvest(name: Node<'_, '_>) -> AttributeSet {
    let scope = name.parent_element().unwrap_or(name);
    let mut record = AttributeSet::new(fold_line_breaks(name.text().unwrap_or_default()));

    for spec in &FIELDS {
        if let Some(value) = evaluate(spec.lookup, scope) {
            record.values.insert(spec.key, fold_line_breaks(value));
        }
    }

    record
}

/// Join the lines of `text` with single spaces, trimming each line.
fn fold_line_breaks(text: &str) -> String {
    if !text.contains(['\n', '\r']) {
        return text.to_owned();
    }
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn evaluate<'a>(lookup: Lookup, scope: Node<'a, '_>) -> Option<&'a str> {
    match lookup {
        Lookup::Text(path) => path_matches(scope, path)
            .into_iter()
            .flat_map(|element| element.children())
            .filter(Node::is_text)
            .filter_map(|text| text.text())
            // Indentation between child elements is layout, not a value.
            .find(|text| !text.trim().is_empty()),
        Lookup::Attribute { element, attribute } => scope
            .descendants()
            .skip(1)
            .filter(|node| is_named(*node, element))
            .find_map(|node| node.attribute(attribute)),
    }
}

fn path_matches<'a, 'input>(scope: Node<'a, 'input>, path: &[&str]) -> Vec<Node<'a, 'input>> {
    let Some((first, rest)) = path.split_first() else {
        return Vec::new();
    };

    let mut current: Vec<Node<'a, 'input>> = scope
        .descendants()
        .skip(1)
        .filter(|node| is_named(*node, first))
        .collect();

    for step in rest {
        current = current
            .into_iter()
            .flat_map(|node| node.children().filter(move |child| is_named(*child, step)))
            .collect();
    }

    current
}

fn is_named(node: Node<'_, '_>, tag: &str) -> bool {
    node.is_element() && node.tag_name().name() == tag
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use roxmltree::Document;

    fn harvest_first_clip(xml: &str) -> AttributeSet {
        let doc = Document::parse(xml).unwrap();
        let name = doc
            .descendants()
            .find(|node| is_named(*node, "name"))
            .unwrap();
        harvest(name)
    }

    #[test]
    fn test_fields_table_is_indexed_by_key() {
        for (index, spec) in FIELDS.iter().enumerate() {
            assert_eq!(spec.key as usize, index, "{} out of place", spec.name);
        }
    }

    #[test]
    fn test_field_names_match_serde_names() {
        for spec in &FIELDS {
            let json = serde_json::to_string(&spec.key).unwrap();
            assert_eq!(json, format!("\"{}\"", spec.name));
        }
    }

    #[test]
    fn test_width_present_height_missing() {
        let record = harvest_first_clip(
            "<clipitem><name>Seq.mp4</name><rate><width>1920</width></rate></clipitem>",
        );
        assert_eq!(record.clip_name(), "Seq.mp4");
        assert_eq!(record.get(FieldKey::Width), Some("1920"));
        assert_eq!(record.resolved(FieldKey::Width), "1920");
        assert_eq!(record.get(FieldKey::Height), None);
        assert_eq!(record.resolved(FieldKey::Height), "无");
    }

    #[test]
    fn test_timecode_requires_nested_path() {
        let record = harvest_first_clip(
            "<clipitem><name>c</name><file><timecode><string>01:00:00:00</string></timecode></file></clipitem>",
        );
        assert_eq!(record.resolved(FieldKey::Timecode), "01:00:00:00");

        let record = harvest_first_clip(
            "<clipitem><name>c</name><string>01:00:00:00</string><timecode/></clipitem>",
        );
        assert_eq!(record.resolved(FieldKey::Timecode), "无");
    }

    #[test]
    fn test_first_match_in_document_order_wins() {
        let record = harvest_first_clip(
            "<clipitem><name>c</name>\
             <effect><parameter><value>10</value></parameter></effect>\
             <effect><parameter><value>20</value></parameter></effect>\
             </clipitem>",
        );
        assert_eq!(record.resolved(FieldKey::Value), "10");
    }

    #[test]
    fn test_authoring_app_is_read_from_parameter_attribute() {
        let record = harvest_first_clip(
            r#"<clipitem><name>c</name><effect>
                 <parameter><parameterid>a</parameterid></parameter>
                 <parameter authoringApp="PremierePro"><parameterid>b</parameterid></parameter>
               </effect></clipitem>"#,
        );
        assert_eq!(record.resolved(FieldKey::AuthoringApp), "PremierePro");
        assert_eq!(record.resolved(FieldKey::ParameterId), "a");
    }

    #[test]
    fn test_defaults_for_empty_clip() {
        let record = harvest_first_clip("<clipitem><name>c</name></clipitem>");
        for spec in &FIELDS {
            assert_eq!(record.get(spec.key), None);
            assert_eq!(record.resolved(spec.key), spec.default);
            assert!(!record.resolved(spec.key).is_empty());
        }
        assert_eq!(record.resolved(FieldKey::When), "未检测到关键帧");
        assert_eq!(record.resolved(FieldKey::PproBypass), "未知");
        assert_eq!(record.resolved(FieldKey::SampleRate), "无");
    }

    #[test]
    fn test_multiline_values_fold_into_one_line() {
        let record = harvest_first_clip(
            "<clipitem><name>Take\r\n 2.mp4</name><value>line1\n  line2\n</value></clipitem>",
        );
        assert_eq!(record.clip_name(), "Take 2.mp4");
        assert_eq!(record.resolved(FieldKey::Value), "line1 line2");
    }

    #[test]
    fn test_whitespace_only_text_is_not_a_value() {
        let record = harvest_first_clip(
            "<clipitem><name>c</name><value>\n   <horiz>1</horiz>\n</value><value>0.5</value></clipitem>",
        );
        assert_eq!(record.resolved(FieldKey::Value), "0.5");
    }

    #[test]
    fn test_lookups_stay_inside_the_clip() {
        let xml = "<track>\
            <clipitem><name>first</name></clipitem>\
            <clipitem><name>second</name><width>1280</width></clipitem>\
            </track>";
        let record = harvest_first_clip(xml);
        assert_eq!(record.clip_name(), "first");
        assert_eq!(record.resolved(FieldKey::Width), "无");
    }

    #[test]
    fn test_resolved_fields_follow_report_order() {
        let record = AttributeSet::new("c").with(FieldKey::Depth, "16");
        let names: Vec<_> = record.resolved_fields().map(|(spec, _)| spec.name).collect();
        assert_eq!(names.first(), Some(&"width"));
        assert_eq!(names.last(), Some(&"samplerate"));
        assert_eq!(names.len(), 16);
        assert_eq!(record.resolved(FieldKey::Depth), "16");
    }
}
