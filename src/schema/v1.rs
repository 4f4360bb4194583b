use serde::{Deserialize, Serialize};

use crate::layout::AxisCheck;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputMeta {
    pub input_dir: String,
    pub files: u64,
    pub bins: u64,
    pub preamble_lines: u64,
    pub data_rows: u64,
    pub axis_check: AxisCheck,
    pub diameter_min: Option<f64>,
    pub diameter_max: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldEntry {
    pub position: u64,
    pub role: String,
    pub pattern: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutSummary {
    pub separator: String,
    pub key_separator: String,
    pub arity: u64,
    pub fields: Vec<FieldEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyPart {
    pub role: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupStatistics {
    pub mean: f64,
    pub median: f64,
    pub mode: f64,
    #[serde(rename = "D10")]
    pub d10: f64,
    #[serde(rename = "D50")]
    pub d50: f64,
    #[serde(rename = "D90")]
    pub d90: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupReport {
    pub key: String,
    pub parts: Vec<KeyPart>,
    pub n_files: u64,
    pub total_count: u64,
    pub statistics: Option<GroupStatistics>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedEntry {
    pub key: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DimensionReport {
    pub name: String,
    pub roles: Vec<String>,
    pub groups: Vec<GroupReport>,
    pub skipped: Vec<SkippedEntry>,
    pub tables: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvSizeV1 {
    pub tool: String,
    pub version: String,
    pub schema_version: String,
    pub input: InputMeta,
    pub layout: LayoutSummary,
    pub dimensions: Vec<DimensionReport>,
    pub warnings: Vec<String>,
}
