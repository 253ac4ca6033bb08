//! File scaffolding from templates (verb module)
//!
//! Templates live under `{templates.root}/{kind}/` as `*.tmpl` files. Both
//! file names and contents may use `{{key}}` placeholders; on top of the
//! request's params every template can use:
//!
//! - `{{name}}`: the name as given
//! - `{{Name}}`: pascal case (`user profile` → `UserProfile`)
//! - `{{name_snake}}`: snake case (`user_profile`)

mod error;
mod template;

pub use error::ScaffoldError;
pub use template::{pascal_case, render, snake_case};

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::TemplateConfig;

const TEMPLATE_EXTENSION: &str = ".tmpl";

/// What to generate and where
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldRequest {
    /// Template subdirectory, e.g. `component`
    pub kind: String,
    pub name: String,
    pub output_dir: PathBuf,
    pub params: BTreeMap<String, String>,
}

impl ScaffoldRequest {
    pub fn new(kind: impl Into<String>, name: impl Into<String>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
            output_dir: output_dir.into(),
            params: BTreeMap::new(),
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Params plus the derived name placeholders
    fn values(&self) -> BTreeMap<String, String> {
        let mut values = self.params.clone();
        values.insert("name".to_string(), self.name.clone());
        values.insert("Name".to_string(), pascal_case(&self.name));
        values.insert("name_snake".to_string(), snake_case(&self.name));
        values
    }
}

/// A rendered file waiting to be written
struct Rendered {
    target: PathBuf,
    contents: String,
}

pub struct Scaffolder {
    config: TemplateConfig,
}

impl Scaffolder {
    pub fn new(config: TemplateConfig) -> Self {
        Self { config }
    }

    /// Template files for `kind`, sorted by file name
    pub fn templates(&self, kind: &str) -> Result<Vec<PathBuf>, ScaffoldError> {
        let dir = self.config.root.join(kind);
        let not_found = || ScaffoldError::TemplateNotFound {
            kind: kind.to_string(),
            dir: dir.clone(),
        };
        if !dir.is_dir() {
            return Err(not_found());
        }

        let entries = fs::read_dir(&dir).map_err(|e| io_error(&dir, e))?;
        let mut templates = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| io_error(&dir, e))?.path();
            let is_template = path.is_file()
                && path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.ends_with(TEMPLATE_EXTENSION));
            if is_template {
                templates.push(path);
            }
        }
        if templates.is_empty() {
            return Err(not_found());
        }
        templates.sort();
        Ok(templates)
    }

    /// Render every template of the request's kind into its output directory.
    ///
    /// Everything is rendered and every target checked before the first
    /// write, so a failure leaves the output directory untouched.
    pub fn generate(&self, request: &ScaffoldRequest) -> Result<Vec<PathBuf>, ScaffoldError> {
        if template::words(&request.name).is_empty() {
            return Err(ScaffoldError::InvalidName(request.name.clone()));
        }
        let values = request.values();

        let rendered = self
            .templates(&request.kind)?
            .iter()
            .map(|path| self.render_one(path, &request.output_dir, &values))
            .collect::<Result<Vec<_>, _>>()?;

        if let Some(existing) = rendered.iter().find(|r| r.target.exists()) {
            return Err(ScaffoldError::AlreadyExists(existing.target.clone()));
        }

        fs::create_dir_all(&request.output_dir).map_err(|e| io_error(&request.output_dir, e))?;
        let mut written = Vec::with_capacity(rendered.len());
        for file in rendered {
            fs::write(&file.target, &file.contents).map_err(|e| io_error(&file.target, e))?;
            tracing::info!(path = %file.target.display(), kind = %request.kind, "scaffolded file");
            written.push(file.target);
        }
        Ok(written)
    }

    fn render_one(
        &self,
        template_path: &Path,
        output_dir: &Path,
        values: &BTreeMap<String, String>,
    ) -> Result<Rendered, ScaffoldError> {
        let template_name = template_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        let file_name = template_name
            .strip_suffix(TEMPLATE_EXTENSION)
            .unwrap_or(template_name);

        let rendered_name = render(template_name, file_name, values)?;
        validate_file_name(template_name, &rendered_name)?;

        let source = fs::read_to_string(template_path).map_err(|e| io_error(template_path, e))?;
        Ok(Rendered {
            target: output_dir.join(rendered_name),
            contents: render(template_name, &source, values)?,
        })
    }
}

/// Rendered names must stay inside the output directory
fn validate_file_name(template: &str, file_name: &str) -> Result<(), ScaffoldError> {
    let invalid = file_name.is_empty()
        || file_name == "."
        || file_name == ".."
        || file_name.contains(['/', '\\']);
    if invalid {
        return Err(ScaffoldError::InvalidFileName {
            template: template.to_string(),
            file_name: file_name.to_string(),
        });
    }
    Ok(())
}

fn io_error(path: &Path, source: std::io::Error) -> ScaffoldError {
    ScaffoldError::Io {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_values() {
        let request = ScaffoldRequest::new("component", "data table", "out").with_param("route", "/x");
        let values = request.values();
        assert_eq!(values["name"], "data table");
        assert_eq!(values["Name"], "DataTable");
        assert_eq!(values["name_snake"], "data_table");
        assert_eq!(values["route"], "/x");
    }

    #[test]
    fn test_missing_kind() {
        let scaffolder = Scaffolder::new(TemplateConfig::new("no/such/root"));
        let request = ScaffoldRequest::new("component", "x", "out");
        assert!(matches!(
            scaffolder.generate(&request),
            Err(ScaffoldError::TemplateNotFound { ref kind, .. }) if kind == "component"
        ));
    }

    #[test]
    fn test_file_name_must_be_one_component() {
        assert!(validate_file_name("t", "DataTable.tsx").is_ok());
        assert!(validate_file_name("t", "a..b.txt").is_ok());
        for bad in ["", ".", "..", "../escaped.txt", "nested/file.txt", "..\\escaped.txt"] {
            assert!(
                matches!(validate_file_name("t", bad), Err(ScaffoldError::InvalidFileName { .. })),
                "{bad}"
            );
        }
    }

    #[test]
    fn test_blank_name_rejected() {
        let scaffolder = Scaffolder::new(TemplateConfig::default());
        let request = ScaffoldRequest::new("component", " - ", "out");
        assert!(matches!(scaffolder.generate(&request), Err(ScaffoldError::InvalidName(_))));
    }
}
