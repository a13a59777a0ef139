//! Site configuration module.
//!
//! The site's branding and navigation are compiled in: [`SiteConfig::default`]
//! carries the literal values, and [`load_config`] validates them once and
//! hands every caller the same `&'static SiteConfig` for the rest of the
//! process.
//!
//! ## Built-in Values
//!
//! ```toml
//! favicon_path = "/avatar.jpg"
//! logo_path = "/avatar.jpg"
//! title = "JunJie"
//! description = "这是我的个人博客，记录一些学习笔记和心得体会。"
//! footer_text = "谢谢你来 🦄"
//! analytics_id = "G-XXXXXXXXXX"   # opaque, never validated
//!
//! [[menu]]                        # display order = declaration order
//! title = "学习笔记"
//! link = "/posts"
//! target = "_self"                # "_self" or "_blank", nothing else
//! ```
//!
//! ## Candidate Overlays
//!
//! Tooling can check a proposed change before it is compiled in by writing a
//! sparse TOML file and passing it to [`load_config_file`]. The overlay is
//! merged onto the built-in values (tables key-by-key, arrays replaced
//! wholesale, so a `[[menu]]` in the overlay replaces the whole menu) and the
//! result goes through the same validation as the built-in set.
//!
//! Overlays are never consulted by [`load_config`], and nothing here reads
//! environment variables.
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {field}: {message}")]
    Validation { field: String, message: String },
}

impl ConfigError {
    fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// The offending field path for validation failures (e.g. `menu[2].target`).
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}

/// Where a navigation link opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkTarget {
    /// `_self`: same browsing context.
    SelfTab,
    /// `_blank`: new tab or window.
    Blank,
}

impl LinkTarget {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SelfTab => "_self",
            Self::Blank => "_blank",
        }
    }
}

impl fmt::Display for LinkTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown link target {0:?}, expected \"_self\" or \"_blank\"")]
pub struct UnknownLinkTarget(pub String);

impl FromStr for LinkTarget {
    type Err = UnknownLinkTarget;

    /// Case-sensitive: `_Blank` is not a target.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "_self" => Ok(Self::SelfTab),
            "_blank" => Ok(Self::Blank),
            other => Err(UnknownLinkTarget(other.to_string())),
        }
    }
}

/// One navigation menu item.
///
/// `target` stays a string so a config written by hand round-trips exactly;
/// [`SiteConfig::validate`] guarantees it parses as a [`LinkTarget`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MenuEntry {
    /// Label shown in the navigation bar.
    pub title: String,
    /// Site path (`/posts`) or absolute URL.
    pub link: String,
    #[serde(default = "default_target")]
    pub target: String,
}

fn default_target() -> String {
    LinkTarget::SelfTab.as_str().to_string()
}

impl MenuEntry {
    pub fn new(title: &str, link: &str, target: LinkTarget) -> Self {
        Self {
            title: title.to_string(),
            link: link.to_string(),
            target: target.as_str().to_string(),
        }
    }

    pub fn link_target(&self) -> Result<LinkTarget, UnknownLinkTarget> {
        self.target.parse()
    }

    pub fn opens_new_tab(&self) -> bool {
        matches!(self.link_target(), Ok(LinkTarget::Blank))
    }
}

/// Site-wide branding and navigation.
///
/// Constructed once at startup and never mutated. The defaults are the
/// compiled-in values; partial TOML overlays only name what they change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Path to the favicon, relative to the site root.
    pub favicon_path: String,
    /// Path to the header logo.
    pub logo_path: String,
    /// Site title. Must not be empty.
    pub title: String,
    /// Meta description. May be empty.
    pub description: String,
    /// Footer line shown on every page.
    pub footer_text: String,
    /// Analytics measurement id. Opaque: the placeholder is accepted.
    pub analytics_id: String,
    /// Navigation entries in display order.
    pub menu: Vec<MenuEntry>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            favicon_path: "/avatar.jpg".to_string(),
            logo_path: "/avatar.jpg".to_string(),
            title: "JunJie".to_string(),
            description: "这是我的个人博客，记录一些学习笔记和心得体会。".to_string(),
            footer_text: "谢谢你来 🦄".to_string(),
            analytics_id: "G-XXXXXXXXXX".to_string(),
            menu: vec![
                MenuEntry::new("学习笔记", "/posts", LinkTarget::SelfTab),
                MenuEntry::new("标签分类", "/tags", LinkTarget::SelfTab),
                MenuEntry::new("存档记录", "/date", LinkTarget::SelfTab),
            ],
        }
    }
}

fn require_non_empty(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::validation(field, "must not be empty"));
    }
    Ok(())
}

impl SiteConfig {
    /// Check every invariant, reporting the first offending field.
    ///
    /// `description`, `footer_text` and `analytics_id` are free-form.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty("title", &self.title)?;
        require_non_empty("favicon_path", &self.favicon_path)?;
        require_non_empty("logo_path", &self.logo_path)?;
        for (i, entry) in self.menu.iter().enumerate() {
            require_non_empty(&format!("menu[{i}].title"), &entry.title)?;
            require_non_empty(&format!("menu[{i}].link"), &entry.link)?;
            entry
                .link_target()
                .map_err(|e| ConfigError::validation(format!("menu[{i}].target"), e.to_string()))?;
        }
        Ok(())
    }

    /// Consume the config, returning it only if it validates.
    pub fn validated(self) -> Result<Self, ConfigError> {
        self.validate()?;
        Ok(self)
    }
}

// =============================================================================
// Process-wide config
// =============================================================================

static SITE_CONFIG: OnceLock<SiteConfig> = OnceLock::new();

/// Build and validate the compiled-in config without caching it.
pub fn build_config() -> Result<SiteConfig, ConfigError> {
    SiteConfig::default().validated()
}

/// The validated site config, built on first call and shared afterwards.
///
/// Concurrent first calls may each build a copy; exactly one is kept and all
/// callers observe it. A failure is not cached, but since the input is
/// compiled in, retrying reproduces it.
pub fn load_config() -> Result<&'static SiteConfig, ConfigError> {
    if let Some(config) = SITE_CONFIG.get() {
        return Ok(config);
    }
    let config = build_config()?;
    tracing::debug!(title = %config.title, menu = config.menu.len(), "site config loaded");
    Ok(SITE_CONFIG.get_or_init(|| config))
}

// =============================================================================
// Candidate overlays
// =============================================================================

/// The built-in config as a TOML table, the base every overlay lands on.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("built-in config serializes")
}

/// Lay a candidate overlay onto `base`.
///
/// Tables merge key-by-key with the overlay winning. Any other overlay
/// value, `[[menu]]` included, replaces the base value outright.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut table), toml::Value::Table(changes)) => {
            for (key, change) in changes {
                let value = match table.remove(&key) {
                    Some(current) => merge_toml(current, change),
                    None => change,
                };
                table.insert(key, value);
            }
            toml::Value::Table(table)
        }
        (_, replacement) => replacement,
    }
}

/// Parse a candidate overlay file.
pub fn read_overlay(path: &Path) -> Result<toml::Value, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Apply an optional overlay to the built-in values, then hold the result
/// to the same checks [`load_config`] applies.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let merged = match overlay {
        Some(changes) => merge_toml(base, changes),
        None => base,
    };
    let candidate: SiteConfig = merged.try_into()?;
    candidate.validated()
}

/// Check a candidate config file without touching the process-wide config.
pub fn load_config_file(path: &Path) -> Result<SiteConfig, ConfigError> {
    tracing::debug!(path = %path.display(), "checking candidate config");
    resolve_config(Some(read_overlay(path)?))
}

/// Returns a fully-commented `config.toml` with every key at its built-in value.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Site Configuration
# ==================
# Every key is optional in an overlay; values shown are the built-in ones.
# Unknown keys will cause an error.

# Favicon path, relative to the site root. Must not be empty.
favicon_path = "/avatar.jpg"

# Header logo path. Must not be empty.
logo_path = "/avatar.jpg"

# Site title. Must not be empty.
title = "JunJie"

# Meta description. May be empty.
description = "这是我的个人博客，记录一些学习笔记和心得体会。"

# Footer line shown on every page.
footer_text = "谢谢你来 🦄"

# Analytics measurement id (not validated).
analytics_id = "G-XXXXXXXXXX"

# ---------------------------------------------------------------------------
# Navigation menu, in display order.
# A [[menu]] entry in an overlay replaces the whole menu.
# target is "_self" (same tab) or "_blank" (new tab).
# ---------------------------------------------------------------------------
[[menu]]
title = "学习笔记"
link = "/posts"
target = "_self"

[[menu]]
title = "标签分类"
link = "/tags"
target = "_self"

[[menu]]
title = "存档记录"
link = "/date"
target = "_self"
"##
}
