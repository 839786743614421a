use crate::api::{HarvestConfig, HarvestMode, TreeLayout};
use crate::error::{HarvestError, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

/// Command-line arguments for seriescat
#[derive(Parser, Debug)]
#[command(name = "seriescat")]
#[command(about = "Summarize DICOM series metadata from subject trees into a CSV table")]
#[command(version)]
pub struct Cli {
    /// Top-level directory containing subject directories
    #[arg(value_name = "DIRECTORY")]
    pub directory: PathBuf,

    /// Which series to harvest
    #[arg(short, long, default_value = "all")]
    pub mode: Mode,

    /// Output CSV path (defaults per mode: results.csv, dti_results.csv,
    /// t1_results.csv)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Subject tree layout (defaults per mode)
    #[arg(long)]
    pub layout: Option<Layout>,

    /// Glob for series directory names (defaults per layout)
    #[arg(long)]
    pub series_pattern: Option<String>,

    /// Custom modality profile as NAME:KW,KW,... replacing the mode's
    /// built-in keyword set
    #[arg(long)]
    pub profile: Option<String>,

    /// Classify series but keep non-matching ones in the output
    #[arg(long)]
    pub annotate_only: bool,

    /// Metadata dump tool executable
    #[arg(long, default_value = "dcmdump")]
    pub dump_tool: String,

    /// Imaging info tool executable
    #[arg(long, default_value = "mrinfo")]
    pub info_tool: String,

    /// Timeout per external tool invocation, in seconds
    #[arg(long, default_value_t = 60)]
    pub tool_timeout: u64,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Harvesting mode options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Mode {
    /// Every series, annotated but never filtered
    All,
    /// Diffusion-weighted series only
    DiffusionOnly,
    /// T1-weighted series only
    T1Only,
}

impl Mode {
    /// Default output file name for this mode
    pub fn default_output_name(self) -> &'static str {
        match self {
            Mode::All => "results.csv",
            Mode::DiffusionOnly => "dti_results.csv",
            Mode::T1Only => "t1_results.csv",
        }
    }
}

impl From<Mode> for HarvestMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::All => HarvestMode::All,
            Mode::DiffusionOnly => HarvestMode::DiffusionOnly,
            Mode::T1Only => HarvestMode::T1Only,
        }
    }
}

/// Subject tree layout options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Layout {
    /// Series live under a mandated org_data subtree per subject
    OrgData,
    /// Series live directly under the subject directory
    Flat,
}

impl From<Layout> for TreeLayout {
    fn from(layout: Layout) -> Self {
        match layout {
            Layout::OrgData => TreeLayout::OrgData,
            Layout::Flat => TreeLayout::Flat,
        }
    }
}

impl Cli {
    /// Builds the harvest configuration from the mode preset and overrides
    pub fn to_config(&self) -> Result<HarvestConfig> {
        let mut config = HarvestConfig::for_mode(self.mode.into());
        if let Some(layout) = self.layout {
            config.layout = layout.into();
            config.series_pattern = config.layout.default_series_pattern().to_string();
        }
        if let Some(pattern) = &self.series_pattern {
            config.series_pattern = pattern.clone();
        }
        if let Some(spec) = &self.profile {
            config.profile = Some(spec.parse().map_err(HarvestError::InvalidProfile)?);
        }
        if self.annotate_only {
            config.filter = false;
        }
        config.dump_tool = self.dump_tool.clone();
        config.info_tool = self.info_tool.clone();
        config.tool_timeout = Duration::from_secs(self.tool_timeout);
        Ok(config)
    }

    /// Output path, defaulting to the mode's conventional file name
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(self.mode.default_output_name()))
    }
}
