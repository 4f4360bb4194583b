use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use regex::Regex;

use crate::error::{EvError, EvResult};
use crate::layout::{LayoutSpec, RunLayout, Slot};

pub fn load_layout(path: &Path) -> Result<RunLayout> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read layout {}", path.display()))?;
    parse_layout_yaml(&content, &path.display().to_string())
}

pub fn parse_layout_yaml(content: &str, source: &str) -> Result<RunLayout> {
    let spec: LayoutSpec = serde_yaml::from_str(content)
        .with_context(|| format!("failed to parse layout {}", source))?;
    let layout = compile_layout(spec).with_context(|| format!("layout {}", source))?;
    Ok(layout)
}

pub fn compile_layout(spec: LayoutSpec) -> EvResult<RunLayout> {
    if spec.arity == 0 {
        return Err(invalid("arity must be at least 1"));
    }
    if spec.separator.is_empty() {
        return Err(invalid("separator must not be empty"));
    }
    if spec.data_rows == 0 {
        return Err(invalid("data_rows must be at least 1"));
    }

    let mut slots: Vec<Slot> = Vec::new();
    for field in &spec.fields {
        slots.push(make_slot(
            field.position,
            &field.role,
            None,
            field.pattern.as_deref(),
        )?);
    }

    let mut groups: HashSet<String> = HashSet::new();
    for rep in &spec.repeats {
        if rep.step == 0 {
            return Err(invalid(format!("repeat '{}' has step 0", rep.role)));
        }
        if rep.start == 0 || rep.start > rep.end {
            return Err(invalid(format!(
                "repeat '{}' has invalid range {}..={}",
                rep.role, rep.start, rep.end
            )));
        }
        if !groups.insert(rep.role.clone()) {
            return Err(invalid(format!("duplicate repeat role '{}'", rep.role)));
        }
        for (k, position) in (rep.start..=rep.end).step_by(rep.step).enumerate() {
            slots.push(make_slot(
                position,
                &format!("{}_{}", rep.role, k + 1),
                Some(&rep.role),
                rep.pattern.as_deref(),
            )?);
        }
    }

    let mut positions = HashSet::new();
    let mut roles = HashSet::new();
    for slot in &slots {
        if slot.position == 0 || slot.position > spec.arity {
            return Err(invalid(format!(
                "role '{}' position {} outside 1..={}",
                slot.role, slot.position, spec.arity
            )));
        }
        if !positions.insert(slot.position) {
            return Err(invalid(format!(
                "position {} claimed more than once",
                slot.position
            )));
        }
        if !roles.insert(slot.role.clone()) {
            return Err(invalid(format!("duplicate role '{}'", slot.role)));
        }
    }
    for group in &groups {
        if roles.contains(group) {
            return Err(invalid(format!(
                "repeat role '{}' collides with a field role",
                group
            )));
        }
    }
    slots.sort_by_key(|s| s.position);

    if spec.dimensions.is_empty() {
        return Err(invalid("at least one dimension is required"));
    }
    let mut dim_names = HashSet::new();
    for dim in &spec.dimensions {
        // Names become directories under the output root.
        if !is_plain_dir_name(&dim.name) {
            return Err(invalid(format!(
                "dimension name '{}' must be a plain directory name",
                dim.name
            )));
        }
        if !dim_names.insert(dim.name.clone()) {
            return Err(invalid(format!("duplicate dimension '{}'", dim.name)));
        }
        if dim.roles.is_empty() {
            return Err(invalid(format!("dimension '{}' has no roles", dim.name)));
        }
        for role in &dim.roles {
            if !roles.contains(role) && !groups.contains(role) {
                return Err(invalid(format!(
                    "dimension '{}' references unknown role '{}'",
                    dim.name, role
                )));
            }
        }
    }

    let file_regex = Regex::new(&spec.file_pattern)
        .map_err(|e| invalid(format!("file_pattern: {}", e)))?;

    Ok(RunLayout {
        spec,
        slots,
        file_regex,
    })
}

fn make_slot(
    position: usize,
    role: &str,
    group: Option<&str>,
    pattern: Option<&str>,
) -> EvResult<Slot> {
    if role.trim().is_empty() {
        return Err(invalid(format!("empty role at position {}", position)));
    }
    let regex = match pattern {
        Some(p) => Some(
            Regex::new(&format!("^(?:{})$", p))
                .map_err(|e| invalid(format!("pattern for '{}': {}", role, e)))?,
        ),
        None => None,
    };
    Ok(Slot {
        position,
        role: role.to_string(),
        group: group.map(str::to_string),
        pattern: pattern.map(str::to_string),
        regex,
    })
}

fn is_plain_dir_name(name: &str) -> bool {
    !name.trim().is_empty()
        && name != "."
        && !name.contains("..")
        && !name.contains(['/', '\\', ':'])
}

fn invalid(reason: impl Into<String>) -> EvError {
    EvError::InvalidLayout(reason.into())
}
