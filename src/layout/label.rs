use crate::error::{EvError, EvResult};
use crate::layout::RunLayout;

/// Structured metadata pulled from one filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleLabel {
    pub file_name: String,
    /// `(role, value)` in position order.
    pub values: Vec<(String, String)>,
}

impl SampleLabel {
    pub fn get(&self, role: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(r, _)| r == role)
            .map(|(_, v)| v.as_str())
    }
}

impl RunLayout {
    /// Splits `file_name` into the layout's fields.
    pub fn label(&self, file_name: &str) -> EvResult<SampleLabel> {
        let stem = if self.spec.strip_extension {
            strip_extension(file_name)
        } else {
            file_name
        };
        let tokens: Vec<&str> = stem.split(self.separator()).collect();
        if tokens.len() != self.arity() {
            return Err(self.mismatch(
                file_name,
                format!("found {} fields", tokens.len()),
            ));
        }

        let mut values = Vec::with_capacity(self.slots.len());
        for slot in &self.slots {
            let value = tokens[slot.position - 1];
            if let Some(re) = &slot.regex {
                if !re.is_match(value) {
                    return Err(self.mismatch(
                        file_name,
                        format!(
                            "field {} ('{}') = '{}' does not match {}",
                            slot.position,
                            slot.role,
                            value,
                            slot.pattern.as_deref().unwrap_or_default()
                        ),
                    ));
                }
            }
            values.push((slot.role.clone(), value.to_string()));
        }

        Ok(SampleLabel {
            file_name: file_name.to_string(),
            values,
        })
    }

    fn mismatch(&self, file_name: &str, detail: String) -> EvError {
        EvError::FilenameFormatMismatch {
            file_name: file_name.to_string(),
            expected: format!("{} ({})", self.describe(), detail),
        }
    }
}

/// Labels every file, failing on the first filename that does not fit.
pub fn label_files<S: AsRef<str>>(layout: &RunLayout, file_names: &[S]) -> EvResult<Vec<SampleLabel>> {
    file_names
        .iter()
        .map(|name| layout.label(name.as_ref()))
        .collect()
}

fn strip_extension(file_name: &str) -> &str {
    let name = file_name.strip_suffix(".gz").unwrap_or(file_name);
    match name.rfind('.') {
        Some(idx) if idx > 0 => &name[..idx],
        _ => name,
    }
}
