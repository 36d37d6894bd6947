use std::fs;
use std::path::Path;

use minijinja::{AutoEscape, Environment, ErrorKind, UndefinedBehavior, Value};
use serde::Serialize;
use tracing::info;

use crate::assets::{AssetError, AssetStore};
use crate::error::{GenError, Result};
use crate::project::sanitize_identifier;

/// Renders templates fetched from an [`AssetStore`].
///
/// Undefined references are errors, output is never HTML-escaped and the
/// trailing newline of a template body is kept.
pub struct TemplateRenderer<'a> {
    env: Environment<'static>,
    assets: &'a dyn AssetStore,
}

impl<'a> TemplateRenderer<'a> {
    pub fn new(assets: &'a dyn AssetStore) -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.add_filter("pretty_json", pretty_json);
        env.add_filter("ident", ident);
        Self { env, assets }
    }

    /// Template source for `key`.
    pub fn source(&self, key: &str) -> Result<String> {
        let bytes = self.assets.read_asset(key).map_err(|err| match err {
            AssetError::NotFound(key) => GenError::TemplateNotFound { key },
            AssetError::Io { key, source } => GenError::fs("read template", key, source),
        })?;
        String::from_utf8(bytes.into_owned()).map_err(|_| GenError::TemplateRender {
            key: key.to_string(),
            source: minijinja::Error::new(ErrorKind::InvalidOperation, "template is not UTF-8"),
        })
    }

    /// Render the template under `key` against `ctx`.
    pub fn render<S: Serialize>(&self, key: &str, ctx: S) -> Result<String> {
        let source = self.source(key)?;
        self.env
            .render_named_str(key, &source, ctx)
            .map_err(|source| GenError::TemplateRender {
                key: key.to_string(),
                source,
            })
    }

    /// Render the template under `key` and write it to `path`. The parent
    /// directory must already exist.
    pub fn render_to_file<S: Serialize>(&self, key: &str, ctx: S, path: &Path) -> Result<()> {
        let rendered = self.render(key, ctx)?;
        fs::write(path, rendered).map_err(|err| GenError::fs("write", path, err))?;
        info!(path = %path.display(), template = key, "wrote file");
        Ok(())
    }
}

fn pretty_json(value: Value) -> std::result::Result<String, minijinja::Error> {
    serde_json::to_string_pretty(&value)
        .map_err(|err| minijinja::Error::new(ErrorKind::InvalidOperation, err.to_string()))
}

fn ident(value: &str) -> String {
    sanitize_identifier(value)
}
