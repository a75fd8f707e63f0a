//! Per-section value checks

pub use crate::error::ValidationError;

/// A `[section]` of the config file
pub trait ConfigSection {
    /// Table name in the TOML file
    const NAME: &'static str;

    /// Pushes one entry per bad value onto `problems`
    fn check(&self, problems: &mut Vec<ValidationError>);

    /// Records a problem with `key` in this section
    fn problem(problems: &mut Vec<ValidationError>, key: &str, message: impl Into<String>) {
        problems.push(ValidationError::new(Self::NAME, key, message));
    }
}

/// Store files live inside `data_dir`, so a name may not climb out of it
pub(crate) fn bare_file_name(value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err("must not be empty".to_string());
    }
    if value.contains(['/', '\\']) || value == "." || value == ".." {
        return Err(format!("'{}' must be a file name without directories", value));
    }
    Ok(())
}
