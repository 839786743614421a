use crate::error::{HarvestError, Result};
use crate::exec::{SystemToolRunner, ToolRunner};
use crate::extraction::tags::{self, extract_tag_value};
use crate::extraction::{extract_axis_count, extract_shell_table};
use crate::locate;
use crate::types::{MetadataRecord, ModalityProfile};
use globset::{Glob, GlobMatcher};
use log::{debug, info};
use std::ffi::OsStr;
use std::path::Path;
use std::time::Duration;

/// Subject tree layout conventions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeLayout {
    /// Subject data lives under a mandated `org_data` subtree; subjects
    /// without one are skipped entirely
    OrgData,
    /// Series directories live directly under the subject directory
    Flat,
}

impl TreeLayout {
    pub const ORG_DATA_DIR: &'static str = "org_data";

    /// Series directory name glob conventionally used with this layout
    pub fn default_series_pattern(&self) -> &'static str {
        match self {
            TreeLayout::OrgData => "SE000*",
            TreeLayout::Flat => "SE*",
        }
    }
}

/// Canonical harvesting modes
///
/// Each mode is a preset over [`HarvestConfig`]; see
/// [`HarvestConfig::for_mode`]. Individual knobs remain overridable after
/// the preset is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HarvestMode {
    /// Every series, classified for annotation but never filtered
    All,
    /// Diffusion-weighted series only
    DiffusionOnly,
    /// T1-weighted series only
    T1Only,
}

/// Configuration for a harvest run
#[derive(Debug, Clone)]
pub struct HarvestConfig {
    /// Subject tree layout convention
    pub layout: TreeLayout,
    /// Glob matched against series directory names
    pub series_pattern: String,
    /// Modality profile used for classification; `None` disables it
    pub profile: Option<ModalityProfile>,
    /// Drop series that do not match the profile ("annotate and filter")
    /// rather than only annotating them
    pub filter: bool,
    /// Invoke the info tool per series for axis count and shell table
    pub collect_diffusion: bool,
    /// Metadata dump tool executable
    pub dump_tool: String,
    /// Imaging info tool executable
    pub info_tool: String,
    /// Timeout per external tool invocation
    pub tool_timeout: Duration,
}

impl HarvestConfig {
    /// Builds the preset configuration for a canonical mode
    pub fn for_mode(mode: HarvestMode) -> Self {
        let (layout, profile, filter, collect_diffusion) = match mode {
            HarvestMode::All => (TreeLayout::OrgData, ModalityProfile::diffusion(), false, true),
            HarvestMode::DiffusionOnly => {
                (TreeLayout::OrgData, ModalityProfile::diffusion(), true, true)
            }
            HarvestMode::T1Only => (TreeLayout::Flat, ModalityProfile::t1(), true, false),
        };
        Self {
            layout,
            series_pattern: layout.default_series_pattern().to_string(),
            profile: Some(profile),
            filter,
            collect_diffusion,
            dump_tool: "dcmdump".to_string(),
            info_tool: "mrinfo".to_string(),
            tool_timeout: SystemToolRunner::DEFAULT_TIMEOUT,
        }
    }
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self::for_mode(HarvestMode::All)
    }
}

/// Subject-level fields shared by every series row of one subject
#[derive(Debug, Clone, Default)]
struct SubjectFields {
    patient_name: String,
    patient_age: String,
    patient_sex: String,
    study_date: String,
}

/// Metadata harvesting pipeline
///
/// Walks each subject directory under a top-level directory, enumerates its
/// series directories, dumps one representative file per series through the
/// external dump tool, extracts the tag fields, classifies the series
/// against the configured modality profile, and optionally merges diffusion
/// descriptors from the info tool. Produces one [`MetadataRecord`] per
/// qualifying series.
///
/// Failure semantics: every external tool failure, missing tag, or
/// malformed tool output degrades to empty field values. The only hard
/// errors are an unreadable top-level directory and an invalid series
/// pattern, surfaced before any subject is processed.
pub struct MetadataHarvester<R = SystemToolRunner> {
    config: HarvestConfig,
    runner: R,
}

impl MetadataHarvester<SystemToolRunner> {
    /// Creates a harvester that invokes the real external tools
    pub fn new(config: HarvestConfig) -> Self {
        let runner = SystemToolRunner::new(config.tool_timeout);
        Self { config, runner }
    }
}

impl<R: ToolRunner> MetadataHarvester<R> {
    /// Creates a harvester with a custom command-execution collaborator
    pub fn with_runner(config: HarvestConfig, runner: R) -> Self {
        Self { config, runner }
    }

    /// Harvests every subject directory found directly under `top_level_dir`
    ///
    /// Subjects and series are processed sequentially in lexicographic
    /// order, so repeated runs over an unchanged tree yield identical
    /// output.
    pub fn harvest(&self, top_level_dir: &Path) -> Result<Vec<MetadataRecord>> {
        let pattern = Glob::new(&self.config.series_pattern)?.compile_matcher();

        let entries = std::fs::read_dir(top_level_dir).map_err(|source| {
            HarvestError::DirectoryUnreadable {
                path: top_level_dir.to_path_buf(),
                source,
            }
        })?;

        let mut subjects = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| HarvestError::DirectoryUnreadable {
                path: top_level_dir.to_path_buf(),
                source,
            })?;
            if entry.path().is_dir() {
                subjects.push(entry.path());
            }
        }
        subjects.sort();

        let mut records = Vec::new();
        for subject_dir in &subjects {
            records.extend(self.harvest_subject(subject_dir, &pattern));
        }
        Ok(records)
    }

    /// Harvests one subject directory; absent or empty subjects yield no rows
    fn harvest_subject(&self, subject_dir: &Path, pattern: &GlobMatcher) -> Vec<MetadataRecord> {
        let subject_id = final_segment(subject_dir);

        let series_root = match self.config.layout {
            TreeLayout::OrgData => {
                let org_data = subject_dir.join(TreeLayout::ORG_DATA_DIR);
                if !org_data.is_dir() {
                    debug!(
                        "skipping subject {subject_id}: no {} subtree",
                        TreeLayout::ORG_DATA_DIR
                    );
                    return Vec::new();
                }
                org_data
            }
            TreeLayout::Flat => subject_dir.to_path_buf(),
        };

        info!("Processing subject: {}", subject_dir.display());

        let Some(subject_source) = locate::first_file(&series_root) else {
            debug!("skipping subject {subject_id}: no representative file");
            return Vec::new();
        };

        let subject_dump = self.dump(&subject_source);
        let subject = SubjectFields {
            patient_name: extract_tag_value(&subject_dump, tags::PATIENT_NAME),
            patient_age: extract_tag_value(&subject_dump, tags::PATIENT_AGE),
            patient_sex: extract_tag_value(&subject_dump, tags::PATIENT_SEX),
            study_date: extract_tag_value(&subject_dump, tags::STUDY_DATE),
        };

        let mut records = Vec::new();
        for series_dir in locate::list_series_dirs(&series_root, pattern) {
            if let Some(record) = self.harvest_series(&series_dir, &subject_id, &subject) {
                records.push(record);
            }
        }
        records
    }

    /// Harvests one series directory into a record
    ///
    /// Returns `None` when the series holds no file, or when it fails the
    /// configured profile in filtering mode.
    fn harvest_series(
        &self,
        series_dir: &Path,
        subject_id: &str,
        subject: &SubjectFields,
    ) -> Option<MetadataRecord> {
        let series_id = final_segment(series_dir);
        let Some(representative) = locate::first_file(series_dir) else {
            debug!("skipping series {series_id}: no representative file");
            return None;
        };

        let dump = self.dump(&representative);
        let series_description = extract_tag_value(&dump, tags::SERIES_DESCRIPTION);
        let protocol_name = extract_tag_value(&dump, tags::PROTOCOL_NAME);

        let matched = self
            .config
            .profile
            .as_ref()
            .filter(|profile| profile.matches(&series_description, &protocol_name));
        if self.config.filter && matched.is_none() {
            debug!("skipping series {series_id}: no profile keyword match");
            return None;
        }

        let mut record = MetadataRecord {
            subject_dir: subject_id.to_string(),
            patient_name: subject.patient_name.clone(),
            patient_age: subject.patient_age.clone(),
            patient_sex: subject.patient_sex.clone(),
            study_date: subject.study_date.clone(),
            series_dir: series_id,
            manufacturer: extract_tag_value(&dump, tags::MANUFACTURER),
            institution_name: extract_tag_value(&dump, tags::INSTITUTION_NAME),
            series_description,
            model_name: extract_tag_value(&dump, tags::MANUFACTURER_MODEL_NAME),
            ethnic_group: extract_tag_value(&dump, tags::ETHNIC_GROUP),
            repetition_time: extract_tag_value(&dump, tags::REPETITION_TIME),
            echo_time: extract_tag_value(&dump, tags::ECHO_TIME),
            magnetic_field_strength: extract_tag_value(&dump, tags::MAGNETIC_FIELD_STRENGTH),
            pixel_bandwidth: extract_tag_value(&dump, tags::PIXEL_BANDWIDTH),
            protocol_name,
            phase_encoding: extract_tag_value(&dump, tags::PHASE_ENCODING_DIRECTION),
            flip_angle: extract_tag_value(&dump, tags::FLIP_ANGLE),
            pixel_spacing: extract_tag_value(&dump, tags::PIXEL_SPACING),
            slice_thickness: extract_tag_value(&dump, tags::SLICE_THICKNESS),
            matched_profile: matched.map(|p| p.name().to_string()).unwrap_or_default(),
            ..Default::default()
        };

        if self.config.collect_diffusion {
            record.dti_axis = extract_axis_count(&self.info(series_dir, &[]));
            let shells = extract_shell_table(
                &self.info(series_dir, &["-shell_sizes", "-shell_bvalues"]),
            );
            record.dti_b_values = shells.b_values.join(", ");
            record.dti_shell_sizes = shells.shell_sizes.join(", ");
        }

        Some(record)
    }

    fn dump(&self, file: &Path) -> String {
        self.runner.run(&self.config.dump_tool, &[file.as_os_str()])
    }

    fn info(&self, dir: &Path, flags: &[&str]) -> String {
        let mut args: Vec<&OsStr> = vec![dir.as_os_str()];
        args.extend(flags.iter().map(|flag| OsStr::new(flag)));
        self.runner.run(&self.config.info_tool, &args)
    }
}

/// Final path segment as a display string (e.g. `"1675428"`, `"SE000001"`)
fn final_segment(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
