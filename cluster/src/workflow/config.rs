use anyhow::Context;
use blockcore::catalog::WavePair;
use blockcore::math::block::{DEFAULT_DZ, DEFAULT_NX, DEFAULT_NY};
use blockcore::math::GridSpec;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_STATION_FILE: &str = "inventory/stations.csv";
pub const DEFAULT_OUTPUT_FILE: &str = "outfile";

/// Parameters of a gather run, from flags or a YAML file.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GatherConfig {
    pub output_file: String,
    pub nx: u32,
    pub ny: u32,
    pub dz: f64,
    pub wave_type: WavePair,
    pub stations: Vec<PathBuf>,
    pub parallel: bool,
}

impl Default for GatherConfig {
    fn default() -> Self {
        Self {
            output_file: DEFAULT_OUTPUT_FILE.into(),
            nx: DEFAULT_NX,
            ny: DEFAULT_NY,
            dz: DEFAULT_DZ,
            wave_type: WavePair::default(),
            stations: Vec::new(),
            parallel: false,
        }
    }
}

impl GatherConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading gather config {}", path_ref.display()))?;
        let config: GatherConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing gather config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn grid(&self) -> anyhow::Result<GridSpec> {
        GridSpec::new(self.nx, self.ny, self.dz).context("building block grid")
    }

    /// Station inventories in merge order, falling back to the bundled table.
    pub fn station_files(&self) -> Vec<PathBuf> {
        if self.stations.is_empty() {
            vec![PathBuf::from(DEFAULT_STATION_FILE)]
        } else {
            self.stations.clone()
        }
    }

    /// `<output_file>_<label>.csv` for each half of the wave pair.
    pub fn output_paths(&self) -> (PathBuf, PathBuf) {
        let path_for = |label: &str| PathBuf::from(format!("{}_{}.csv", self.output_file, label));
        (
            path_for(self.wave_type.first()),
            path_for(self.wave_type.second()),
        )
    }
}
