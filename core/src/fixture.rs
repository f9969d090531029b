//! JSON fixture generation from `.jt` templates.
//!
//! # Design
//! Templates are Jinja-syntax files named `<name>.jt` in a template
//! directory, rendered with minijinja and written to `<name>.json` in an
//! output directory. `.jt` is not an auto-escaping extension, so values are
//! substituted verbatim. Both failure classes come back as `FixtureError`:
//! `render` surfaces them uniformly, while `replace_tags` reports a write
//! failure as `Ok(false)` and lets template failures through as errors.
//!
//! Scalars print the Jinja way: booleans as `True`/`False` and null as
//! `None`. A JSON fixture that needs a literal `true`/`false`/`null` has to
//! spell it in the template, e.g. `{% if gift %}true{% else %}false{% endif %}`.

use std::fs;
use std::path::{Path, PathBuf};

use minijinja::{path_loader, Environment};
use serde::Serialize;
use tracing::{info, warn};

use crate::error::FixtureError;

pub const TEMPLATE_EXTENSION: &str = "jt";
pub const OUTPUT_EXTENSION: &str = "json";

#[derive(Debug, Clone)]
pub struct FixtureRenderer {
    template_dir: PathBuf,
    output_dir: PathBuf,
}

impl FixtureRenderer {
    pub fn new(template_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            template_dir: template_dir.into(),
            output_dir: output_dir.into(),
        }
    }

    pub fn template_dir(&self) -> &Path {
        &self.template_dir
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Where the fixture for `template_name` is written.
    pub fn output_path(&self, template_name: &str) -> PathBuf {
        self.output_dir
            .join(format!("{template_name}.{OUTPUT_EXTENSION}"))
    }

    /// Render `template_name` with `variables` without writing anything.
    pub fn render_to_string<V>(&self, template_name: &str, variables: &V) -> Result<String, FixtureError>
    where
        V: Serialize + ?Sized,
    {
        let template_err = |source: minijinja::Error| FixtureError::Template {
            name: template_name.to_string(),
            source,
        };

        let mut env = Environment::new();
        env.set_loader(path_loader(&self.template_dir));
        let template = env
            .get_template(&format!("{template_name}.{TEMPLATE_EXTENSION}"))
            .map_err(template_err)?;
        template.render(variables).map_err(template_err)
    }

    /// Render and write the fixture, returning the path written.
    pub fn render<V>(&self, template_name: &str, variables: &V) -> Result<PathBuf, FixtureError>
    where
        V: Serialize + ?Sized,
    {
        let rendered = self.render_to_string(template_name, variables)?;
        let path = self.output_path(template_name);
        if let Err(source) = fs::write(&path, rendered) {
            return Err(FixtureError::Write { path, source });
        }
        info!(template = template_name, path = %path.display(), "fixture written");
        Ok(path)
    }

    /// Like `render`, but a failed write is reported as `Ok(false)` instead
    /// of an error. Template failures are still returned as `Err`.
    pub fn replace_tags<V>(&self, template_name: &str, variables: &V) -> Result<bool, FixtureError>
    where
        V: Serialize + ?Sized,
    {
        match self.render(template_name, variables) {
            Ok(_) => Ok(true),
            Err(FixtureError::Write { path, source }) => {
                warn!(template = template_name, path = %path.display(), error = %source, "fixture write failed");
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }
}

/// Everything needed for one fixture render, bundled for one-off calls.
#[derive(Debug)]
pub struct FixtureRequest<'a, V: ?Sized> {
    pub template_dir: &'a Path,
    pub output_dir: &'a Path,
    pub template_name: &'a str,
    pub variables: &'a V,
}

impl<V: Serialize + ?Sized> FixtureRequest<'_, V> {
    pub fn render(&self) -> Result<PathBuf, FixtureError> {
        FixtureRenderer::new(self.template_dir, self.output_dir).render(self.template_name, self.variables)
    }

    pub fn replace_tags(&self) -> Result<bool, FixtureError> {
        FixtureRenderer::new(self.template_dir, self.output_dir)
            .replace_tags(self.template_name, self.variables)
    }
}

/// Read a JSON file and return its content re-serialized as a compact
/// JSON string, ready to be used as a request body.
pub fn json_file_to_string(path: impl AsRef<Path>) -> Result<String, FixtureError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| FixtureError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let value: serde_json::Value = serde_json::from_str(&raw).map_err(|source| FixtureError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    // Re-encoding a parsed Value cannot fail.
    serde_json::to_string(&value).map_err(|source| FixtureError::Json {
        path: path.to_path_buf(),
        source,
    })
}
