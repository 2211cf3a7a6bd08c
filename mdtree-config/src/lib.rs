//! Shared configuration loader for the mdtree toolchain.
//!
//! `defaults/mdtree.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`MdtreeConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use mdtree::components::is_valid_tag_name;
use mdtree::{check_deprecated, ComponentRegistry, Deprecation, MarkdownOptions, Options, RawHtml};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use thiserror::Error;

pub use config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../defaults/mdtree.default.toml");

/// Top-level configuration consumed by mdtree applications.
#[derive(Debug, Clone, Deserialize)]
pub struct MdtreeConfig {
    pub markdown: MarkdownConfig,
    pub render: RenderConfig,
    pub output: OutputConfig,
    /// Deprecated keys found in the `[render]` table.
    #[serde(skip)]
    pub deprecations: Vec<Deprecation>,
}

/// Markdown extensions.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct MarkdownConfig {
    pub gfm: bool,
    pub footnotes: bool,
}

impl From<MarkdownConfig> for MarkdownOptions {
    fn from(config: MarkdownConfig) -> Self {
        MarkdownOptions {
            gfm: config.gfm,
            footnotes: config.footnotes,
        }
    }
}

/// The render options that can be expressed in a file.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    #[serde(default)]
    pub allowed_elements: Option<Vec<String>>,
    #[serde(default)]
    pub disallowed_elements: Option<Vec<String>>,
    pub unwrap_disallowed: bool,
    pub raw_html: String,
    pub include_source_position: bool,
    #[serde(default)]
    pub link_target: Option<String>,
    #[serde(default)]
    pub class_name: Option<String>,
    /// Tag → replacement tag.
    #[serde(default)]
    pub components: BTreeMap<String, String>,
}

/// A configured value that cannot be turned into render options.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntoOptionsError {
    #[error("invalid `raw_html`: {0}")]
    RawHtml(String),
    #[error("component for `{tag}` maps to invalid tag name `{target}`")]
    Component { tag: String, target: String },
}

impl RenderConfig {
    /// Build render options, taking markdown extensions from `markdown`.
    ///
    /// Setting both element lists is not rejected here; rendering reports it.
    pub fn to_options(&self, markdown: MarkdownConfig) -> Result<Options, IntoOptionsError> {
        let raw_html = self
            .raw_html
            .parse::<RawHtml>()
            .map_err(IntoOptionsError::RawHtml)?;

        let mut components = ComponentRegistry::new();
        for (tag, target) in &self.components {
            if !is_valid_tag_name(target) {
                return Err(IntoOptionsError::Component {
                    tag: tag.clone(),
                    target: target.clone(),
                });
            }
            components.register_tag(tag.clone(), target.clone());
        }

        let mut options = Options::default()
            .markdown(markdown.into())
            .unwrap_disallowed(self.unwrap_disallowed)
            .raw_html(raw_html)
            .include_source_position(self.include_source_position)
            .components(components);
        options.allowed_elements = self.allowed_elements.clone();
        options.disallowed_elements = self.disallowed_elements.clone();
        options.link_target = self.link_target.clone();
        options.class_name = self.class_name.clone();
        Ok(options)
    }
}

impl TryFrom<&MdtreeConfig> for Options {
    type Error = IntoOptionsError;

    fn try_from(config: &MdtreeConfig) -> Result<Self, Self::Error> {
        config.render.to_options(config.markdown)
    }
}

/// Output format selection and its knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: String,
    pub pretty: bool,
    pub standalone: bool,
    #[serde(default)]
    pub title: Option<String>,
}

impl OutputConfig {
    /// Serializer parameters understood by `format`.
    pub fn params_for(&self, format: &str) -> HashMap<String, String> {
        let mut params = HashMap::new();
        match format {
            "json" => {
                params.insert("pretty".to_string(), self.pretty.to_string());
            }
            "html" => {
                params.insert("standalone".to_string(), self.standalone.to_string());
                if let Some(title) = &self.title {
                    params.insert("title".to_string(), title.clone());
                }
            }
            _ => {}
        }
        params
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<MdtreeConfig, ConfigError> {
        let config = self.builder.build()?;
        let deprecations = match config.get_table("render") {
            Ok(table) => check_deprecated(table.keys()),
            Err(_) => Vec::new(),
        };
        let mut parsed: MdtreeConfig = config.try_deserialize()?;
        parsed.deprecations = deprecations;
        Ok(parsed)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<MdtreeConfig, ConfigError> {
    Loader::new().build()
}
