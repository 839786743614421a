/// One harvested output row
///
/// A flat mapping of named fields for a single imaging series. All fields
/// are strings; absent or unparseable values are the empty string, never
/// omitted. Every declared column is present in every record — the output
/// table has a fixed schema regardless of operating mode, and modes that
/// skip a collection step simply leave the corresponding cells empty.
///
/// The column set is the union of all pipeline variants: subject and patient
/// identity, study date, series identity, equipment and protocol
/// descriptors, acquisition parameters, diffusion descriptors (axis count,
/// b-values, shell sizes), geometry descriptors (pixel spacing, slice
/// thickness), and the matched-profile annotation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct MetadataRecord {
    pub subject_dir: String,
    pub patient_name: String,
    pub patient_age: String,
    pub patient_sex: String,
    pub study_date: String,
    pub series_dir: String,
    pub manufacturer: String,
    pub institution_name: String,
    pub series_description: String,
    pub model_name: String,
    pub ethnic_group: String,
    pub repetition_time: String,
    pub echo_time: String,
    pub magnetic_field_strength: String,
    pub pixel_bandwidth: String,
    pub protocol_name: String,
    pub phase_encoding: String,
    pub flip_angle: String,
    pub dti_axis: String,
    pub dti_b_values: String,
    pub dti_shell_sizes: String,
    pub pixel_spacing: String,
    pub slice_thickness: String,
    pub matched_profile: String,
}

impl MetadataRecord {
    /// Output column names, in table order
    pub const COLUMNS: [&'static str; 24] = [
        "SubjectDir",
        "PatientName",
        "PatientAge",
        "PatientSex",
        "StudyDate",
        "SeriesDir",
        "Manufacturer",
        "InstitutionName",
        "SeriesDescription",
        "ModelName",
        "EthnicGroup",
        "RepetitionTime",
        "EchoTime",
        "MagneticFieldStrength",
        "PixelBandwidth",
        "ProtocolName",
        "PhaseEncoding",
        "FlipAngle",
        "DTI_Axis",
        "DTI_bvalues",
        "DTI_ShellSizes",
        "PixelSpacing",
        "SliceThickness",
        "MatchedProfile",
    ];

    /// Positional view of the record, aligned with [`MetadataRecord::COLUMNS`]
    pub fn row(&self) -> [&str; 24] {
        [
            &self.subject_dir,
            &self.patient_name,
            &self.patient_age,
            &self.patient_sex,
            &self.study_date,
            &self.series_dir,
            &self.manufacturer,
            &self.institution_name,
            &self.series_description,
            &self.model_name,
            &self.ethnic_group,
            &self.repetition_time,
            &self.echo_time,
            &self.magnetic_field_strength,
            &self.pixel_bandwidth,
            &self.protocol_name,
            &self.phase_encoding,
            &self.flip_angle,
            &self.dti_axis,
            &self.dti_b_values,
            &self.dti_shell_sizes,
            &self.pixel_spacing,
            &self.slice_thickness,
            &self.matched_profile,
        ]
    }
}
