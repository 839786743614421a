use regex::Regex;
use std::fmt;

/// A DICOM tag address in `group,element` form (e.g. `0010,0010`)
///
/// This is an opaque key into a textual metadata dump, not a decoded DICOM
/// attribute: the dump tool renders each element as a line containing
/// `(GGGG,EEEE)` followed by its value in square brackets, and extraction is
/// purely textual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TagPath {
    pub group: u16,
    pub element: u16,
}

impl TagPath {
    /// Creates a tag path from its group and element numbers
    pub const fn new(group: u16, element: u16) -> Self {
        Self { group, element }
    }
}

impl fmt::Display for TagPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04X},{:04X}", self.group, self.element)
    }
}

// Patient Tags
pub const PATIENT_NAME: TagPath = TagPath::new(0x0010, 0x0010);
pub const PATIENT_AGE: TagPath = TagPath::new(0x0010, 0x1010);
pub const PATIENT_SEX: TagPath = TagPath::new(0x0010, 0x0040);
pub const ETHNIC_GROUP: TagPath = TagPath::new(0x0010, 0x2160);

// Study/Series Identification Tags
pub const STUDY_DATE: TagPath = TagPath::new(0x0008, 0x0020);
pub const SERIES_DESCRIPTION: TagPath = TagPath::new(0x0008, 0x103E);

// Equipment Tags
pub const MANUFACTURER: TagPath = TagPath::new(0x0008, 0x0070);
pub const INSTITUTION_NAME: TagPath = TagPath::new(0x0008, 0x0080);
pub const MANUFACTURER_MODEL_NAME: TagPath = TagPath::new(0x0008, 0x1090);

// Acquisition Tags
pub const REPETITION_TIME: TagPath = TagPath::new(0x0018, 0x0080);
pub const ECHO_TIME: TagPath = TagPath::new(0x0018, 0x0081);
pub const MAGNETIC_FIELD_STRENGTH: TagPath = TagPath::new(0x0018, 0x0087);
pub const PIXEL_BANDWIDTH: TagPath = TagPath::new(0x0018, 0x0095);
pub const PROTOCOL_NAME: TagPath = TagPath::new(0x0018, 0x1030);
pub const PHASE_ENCODING_DIRECTION: TagPath = TagPath::new(0x0018, 0x1312);
pub const FLIP_ANGLE: TagPath = TagPath::new(0x0018, 0x1314);

// Image Geometry Tags
pub const PIXEL_SPACING: TagPath = TagPath::new(0x0028, 0x0030);
pub const SLICE_THICKNESS: TagPath = TagPath::new(0x0018, 0x0050);

/// Extracts the bracketed value for a tag from a metadata dump
///
/// Performs a single regex search across the whole dump text for the first
/// occurrence of `(GGGG,EEEE)` (case-insensitive) followed by a bracketed
/// group `[...]`. The search is not line-scoped: if no bracket follows the
/// tag on its own line, the capture may span forward into later lines.
///
/// Returns the trimmed captured text, or the empty string when the tag is
/// absent or has no following bracketed value. Missing tags are a valid,
/// silent outcome, never an error. When the same tag occurs more than once,
/// only the first match in document order is used.
pub fn extract_tag_value(dump_text: &str, tag: TagPath) -> String {
    let pattern = format!(r"(?is)\({}\).*?\[(.*?)\]", regex::escape(&tag.to_string()));
    let Ok(re) = Regex::new(&pattern) else {
        return String::new();
    };
    re.captures(dump_text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}
