use std::str::FromStr;

// Built-in keyword sets, matched case-insensitively as substrings of the
// series description or protocol name. These are heuristics tuned for the
// scanner protocols seen in practice, not a DICOM-standard classification.
const DIFFUSION_KEYWORDS: &[&str] = &["dti", "diff", "ep2d", "dki", "dwi"];
const T1_KEYWORDS: &[&str] = &["mprage", "t1", "3d", "fspgr", "sag"];

/// A named modality profile: a keyword set matched against free-text fields
///
/// A series matches a profile when at least one keyword is a case-insensitive
/// substring of its series description or protocol name. False positives and
/// negatives are expected and acceptable; the contract is keyword membership,
/// not semantic image-type detection.
///
/// Profiles are data, not code: new ones can be built with [`ModalityProfile::new`]
/// or parsed from a `name:kw1,kw2,...` spec string, without touching the
/// matching logic.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct ModalityProfile {
    name: String,
    keywords: Vec<String>,
}

impl ModalityProfile {
    /// Creates a profile from a name and keyword set
    ///
    /// Keywords are lowercased at construction so matching can case-fold the
    /// searched fields only.
    pub fn new(
        name: impl Into<String>,
        keywords: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            keywords: keywords
                .into_iter()
                .map(|kw| kw.into().to_lowercase())
                .collect(),
        }
    }

    /// Built-in diffusion-weighted imaging profile
    pub fn diffusion() -> Self {
        Self::new("diffusion", DIFFUSION_KEYWORDS.iter().copied())
    }

    /// Built-in T1-weighted imaging profile
    pub fn t1() -> Self {
        Self::new("t1", T1_KEYWORDS.iter().copied())
    }

    /// Profile name, used to annotate matching records
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lowercased keyword set
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Checks whether a series matches this profile
    ///
    /// True iff at least one keyword is a substring of the case-folded
    /// series description or protocol name.
    pub fn matches(&self, series_description: &str, protocol_name: &str) -> bool {
        let desc = series_description.to_lowercase();
        let proto = protocol_name.to_lowercase();
        self.keywords
            .iter()
            .any(|kw| desc.contains(kw.as_str()) || proto.contains(kw.as_str()))
    }
}

impl FromStr for ModalityProfile {
    type Err = String;

    /// Parses a `name:kw1,kw2,...` profile spec
    ///
    /// Empty keywords are rejected: an empty keyword is a substring of every
    /// field and would match every series.
    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let Some((name, keyword_list)) = spec.split_once(':') else {
            return Err(format!("expected NAME:KW,KW,... got '{spec}'"));
        };
        let name = name.trim();
        if name.is_empty() {
            return Err(format!("profile name is empty in '{spec}'"));
        }
        let keywords: Vec<&str> = keyword_list
            .split(',')
            .map(str::trim)
            .filter(|kw| !kw.is_empty())
            .collect();
        if keywords.is_empty() {
            return Err(format!("profile '{name}' has no keywords"));
        }
        Ok(Self::new(name, keywords))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("AX DWI b1000", "")]
    #[case("", "ep2d_diff_mddw_20")]
    #[case("DTI 30 directions", "")]
    #[case("dki protocol", "")]
    fn test_diffusion_profile_matches(#[case] description: &str, #[case] protocol: &str) {
        assert!(ModalityProfile::diffusion().matches(description, protocol));
    }

    #[rstest]
    #[case("localizer", "")]
    #[case("", "")]
    #[case("T2 FLAIR", "flair")]
    fn test_diffusion_profile_rejects(#[case] description: &str, #[case] protocol: &str) {
        assert!(!ModalityProfile::diffusion().matches(description, protocol));
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let profile = ModalityProfile::diffusion();
        assert!(profile.matches("AX DWI B1000", ""));
        assert!(profile.matches("ax dwi b1000", ""));
        assert!(profile.matches("", "EP2D_DIFF"));
    }

    #[test]
    fn test_t1_profile() {
        let profile = ModalityProfile::t1();
        assert!(profile.matches("MPRAGE SAG 1mm", ""));
        assert!(profile.matches("", "3D FSPGR BRAVO"));
        assert!(!profile.matches("AX DWI b1000", ""));
        assert_eq!(profile.name(), "t1");
    }

    #[test]
    fn test_custom_profile() {
        let profile = ModalityProfile::new("flair", ["flair", "dark_fluid"]);
        assert!(profile.matches("Ax T2 FLAIR", ""));
        assert!(!profile.matches("MPRAGE", ""));
    }

    #[test]
    fn test_parse_spec_string() {
        let profile: ModalityProfile = "swi:swi,swan".parse().unwrap();
        assert_eq!(profile.name(), "swi");
        assert_eq!(profile.keywords(), ["swi", "swan"]);
        assert!(profile.matches("Ax SWAN", ""));
    }

    #[test]
    fn test_parse_lowercases_keywords() {
        let profile: ModalityProfile = "t2:FLAIR".parse().unwrap();
        assert_eq!(profile.keywords(), ["flair"]);
    }

    #[rstest]
    #[case("noseparator")]
    #[case(":kw1,kw2")]
    #[case("name:")]
    #[case("name: , ,")]
    fn test_parse_rejects_malformed_specs(#[case] spec: &str) {
        assert!(spec.parse::<ModalityProfile>().is_err());
    }
}
