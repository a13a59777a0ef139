//! # Site Content
//!
//! The data a personal static blog's rendering layer reads: the site's
//! branding and navigation, and the comments shown under each post.
//!
//! Two independent pieces, neither of which renders, serves, or stores
//! anything:
//!
//! ```text
//! compiled-in values  →  config::load_config()   →  &'static SiteConfig
//! raw comment records →  comment::normalize()    →  Comment
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | Built-in `SiteConfig`, validation, process-wide cache, TOML overlays for checking candidate changes |
//! | [`comment`] | Canonical `Comment` and the normalizer that accepts the legacy field-name variants |
//! | [`output`] | CLI output formatting for config listings and comment batch reports |
//!
//! # Design Decisions
//!
//! ## Compiled-In Configuration
//!
//! The config is not user input. It is a constant set validated once on
//! first access; a validation failure is a startup error because there is no
//! usable site without it. TOML overlays exist only so a proposed change can
//! be validated before it lands.
//!
//! ## One Canonical Comment Shape
//!
//! Stored comments use three field namings. Rather than pick one and drop
//! the others, the normalizer reads all three and emits only the canonical
//! `authorName`/`bodyText`/`timestamp` shape, so nothing downstream ever sees
//! a legacy name. Failures are per record: a batch keeps going past bad
//! records and reports them.

pub mod comment;
pub mod config;
pub mod output;

#[cfg(test)]
pub(crate) mod test_helpers;
