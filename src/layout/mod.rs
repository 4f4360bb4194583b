//! Filename layouts: the per-run description of how sample metadata is
//! encoded in instrument output filenames, and which groupings to compute.

mod label;
mod loader;

use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};

pub use label::{SampleLabel, label_files};
pub use loader::{compile_layout, load_layout, parse_layout_yaml};

pub const DEFAULT_PREAMBLE_LINES: usize = 76;
pub const DEFAULT_DATA_ROWS: usize = 1200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisCheck {
    /// Every file must carry the first file's diameter axis.
    #[default]
    Strict,
    /// Take the first file's axis and only warn on differences.
    Trust,
}

/// One named field at a fixed 1-based position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSpec {
    pub position: usize,
    pub role: String,
    #[serde(default)]
    pub pattern: Option<String>,
}

/// A repeated field group, e.g. every second token in positions 2..=32.
/// Expands to roles `<role>_1`, `<role>_2`, ... and the whole group is
/// addressable as `<role>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepeatSpec {
    pub start: usize,
    pub end: usize,
    #[serde(default = "default_step")]
    pub step: usize,
    pub role: String,
    #[serde(default)]
    pub pattern: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DimensionSpec {
    pub name: String,
    pub roles: Vec<String>,
}

/// Layout file contents as written by the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutSpec {
    #[serde(default = "default_separator")]
    pub separator: String,

    #[serde(default = "default_separator")]
    pub key_separator: String,

    #[serde(default = "default_strip_extension")]
    pub strip_extension: bool,

    pub arity: usize,

    #[serde(default = "default_file_pattern")]
    pub file_pattern: String,

    #[serde(default = "default_preamble_lines")]
    pub preamble_lines: usize,

    #[serde(default = "default_data_rows")]
    pub data_rows: usize,

    #[serde(default)]
    pub axis_check: AxisCheck,

    #[serde(default)]
    pub fields: Vec<FieldSpec>,

    #[serde(default)]
    pub repeats: Vec<RepeatSpec>,

    pub dimensions: Vec<DimensionSpec>,
}

fn default_separator() -> String {
    "_".to_string()
}

fn default_strip_extension() -> bool {
    true
}

fn default_file_pattern() -> String {
    r"\.txt(\.gz)?$".to_string()
}

fn default_preamble_lines() -> usize {
    DEFAULT_PREAMBLE_LINES
}

fn default_data_rows() -> usize {
    DEFAULT_DATA_ROWS
}

fn default_step() -> usize {
    1
}

/// A resolved field position.
#[derive(Debug, Clone)]
pub struct Slot {
    pub position: usize,
    pub role: String,
    /// Name of the repeat group this slot was expanded from.
    pub group: Option<String>,
    pub pattern: Option<String>,
    pub(crate) regex: Option<Regex>,
}

/// A validated layout ready to label filenames.
#[derive(Debug, Clone)]
pub struct RunLayout {
    pub spec: LayoutSpec,
    /// Sorted by position.
    pub slots: Vec<Slot>,
    pub(crate) file_regex: Regex,
}

impl RunLayout {
    pub fn separator(&self) -> &str {
        &self.spec.separator
    }

    pub fn arity(&self) -> usize {
        self.spec.arity
    }

    pub fn preamble_lines(&self) -> usize {
        self.spec.preamble_lines
    }

    pub fn data_rows(&self) -> usize {
        self.spec.data_rows
    }

    pub fn axis_check(&self) -> AxisCheck {
        self.spec.axis_check
    }

    pub fn dimensions(&self) -> &[DimensionSpec] {
        &self.spec.dimensions
    }

    pub fn dimension(&self, name: &str) -> Option<&DimensionSpec> {
        self.spec.dimensions.iter().find(|d| d.name == name)
    }

    pub fn matches_file(&self, file_name: &str) -> bool {
        self.file_regex.is_match(file_name)
    }

    /// Human-readable form of the expected filename shape, used in errors.
    pub fn describe(&self) -> String {
        let mut out = format!(
            "{} '{}'-separated fields",
            self.spec.arity, self.spec.separator
        );
        if !self.slots.is_empty() {
            let parts: Vec<String> = self
                .slots
                .iter()
                .map(|s| match &s.pattern {
                    Some(p) => format!("{}={}({})", s.position, s.role, p),
                    None => format!("{}={}", s.position, s.role),
                })
                .collect();
            out.push_str(": ");
            out.push_str(&parts.join(", "));
        }
        out
    }

    /// Builds the group key of `label` within `dimension`.
    pub fn group_key(&self, dimension: &DimensionSpec, label: &SampleLabel) -> GroupKey {
        let mut parts = Vec::with_capacity(dimension.roles.len());
        for role in &dimension.roles {
            let values: Vec<&str> = label
                .values
                .iter()
                .filter(|(slot_role, _)| {
                    slot_role == role || self.slot_group(slot_role) == Some(role.as_str())
                })
                .map(|(_, v)| v.as_str())
                .collect();
            parts.push((role.clone(), values.join(&self.spec.key_separator)));
        }
        GroupKey::new(parts, &self.spec.key_separator)
    }

    fn slot_group(&self, role: &str) -> Option<&str> {
        self.slots
            .iter()
            .find(|s| s.role == role)
            .and_then(|s| s.group.as_deref())
    }
}

/// Label identifying one experimental condition within a dimension.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupKey {
    pub label: String,
    pub parts: Vec<(String, String)>,
}

impl GroupKey {
    pub fn new(parts: Vec<(String, String)>, separator: &str) -> Self {
        let label = parts
            .iter()
            .map(|(_, v)| v.as_str())
            .collect::<Vec<_>>()
            .join(separator);
        Self { label, parts }
    }

    /// Key with a single `group` part; convenient for ad hoc series.
    pub fn single(label: &str) -> Self {
        Self::new(vec![("group".to_string(), label.to_string())], "_")
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}
