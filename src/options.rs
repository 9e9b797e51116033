//! Discovery options.
//!
//! Build them in code with the chainable methods, or load the data-only part
//! from a JSON settings file. Predicates can only be set in code.
//!
//! ```json
//! {
//!   "domainFilter": ["users", "orders"],
//!   "pathPrefix": "/api",
//!   "showUnprotectedOnly": false,
//!   "protectionMiddlewareName": "requireAuth"
//! }
//! ```
//!
//! `domainFilter` and `protectionMiddlewareName` take one string or a list.
//!
//! # How predicates are stored
//!
//! Options hold closures of different concrete types, so each one is erased
//! behind an `Arc<dyn Fn … + Send + Sync>`. Cloning the options clones the
//! `Arc`s, not the closures, and the options can be shared across threads.

use std::fmt;
use std::io::Read;
use std::sync::Arc;

use serde::{Deserialize, Deserializer};

use crate::error::Error;
use crate::protect::RouteContext;
use crate::record::RouteRecord;

/// Custom protection predicate. See [`RouteContext`].
pub type ProtectionFn = Arc<dyn Fn(&RouteContext<'_>) -> bool + Send + Sync + 'static>;

/// Include / exclude predicate over a finished record.
pub type RouteFilter = Arc<dyn Fn(&RouteRecord) -> bool + Send + Sync + 'static>;

/// Everything that shapes one discovery call.
///
/// ```rust
/// use routescope::DiscoverOptions;
///
/// let options = DiscoverOptions::new()
///     .domain("users")
///     .path_prefix("/api")
///     .protected_by("requireAuth")
///     .exclude(|r| r.path.ends_with("/health"));
/// ```
#[derive(Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DiscoverOptions {
    /// Keep routes with a path segment equal to one of these tokens.
    #[serde(deserialize_with = "one_or_many")]
    pub domain_filter: Vec<String>,
    /// Keep routes whose path starts with this prefix.
    pub path_prefix: Option<String>,
    /// Keep unprotected routes only.
    pub show_unprotected_only: bool,
    /// Middleware names that mark a route as protected.
    #[serde(rename = "protectionMiddlewareName", deserialize_with = "one_or_many")]
    pub protection_middleware_names: Vec<String>,

    #[serde(skip)]
    pub is_protected: Option<ProtectionFn>,
    #[serde(skip)]
    pub include_filter: Option<RouteFilter>,
    #[serde(skip)]
    pub exclude_filter: Option<RouteFilter>,
}

impl DiscoverOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the data-only settings from JSON.
    pub fn from_reader(reader: impl Read) -> Result<Self, Error> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn domain(mut self, token: impl Into<String>) -> Self {
        self.domain_filter.push(token.into());
        self
    }

    pub fn path_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.path_prefix = Some(prefix.into());
        self
    }

    pub fn unprotected_only(mut self) -> Self {
        self.show_unprotected_only = true;
        self
    }

    /// Adds a middleware name that marks a route as protected.
    pub fn protected_by(mut self, name: impl Into<String>) -> Self {
        self.protection_middleware_names.push(name.into());
        self
    }

    /// Decides protection with `predicate`, overriding any middleware names.
    pub fn protected_if<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&RouteContext<'_>) -> bool + Send + Sync + 'static,
    {
        self.is_protected = Some(Arc::new(predicate));
        self
    }

    pub fn include<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&RouteRecord) -> bool + Send + Sync + 'static,
    {
        self.include_filter = Some(Arc::new(predicate));
        self
    }

    pub fn exclude<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&RouteRecord) -> bool + Send + Sync + 'static,
    {
        self.exclude_filter = Some(Arc::new(predicate));
        self
    }
}

impl fmt::Debug for DiscoverOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiscoverOptions")
            .field("domain_filter", &self.domain_filter)
            .field("path_prefix", &self.path_prefix)
            .field("show_unprotected_only", &self.show_unprotected_only)
            .field("protection_middleware_names", &self.protection_middleware_names)
            .field("is_protected", &self.is_protected.is_some())
            .field("include_filter", &self.include_filter.is_some())
            .field("exclude_filter", &self.exclude_filter.is_some())
            .finish()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

fn one_or_many<'de, D: Deserializer<'de>>(de: D) -> Result<Vec<String>, D::Error> {
    Ok(match OneOrMany::deserialize(de)? {
        OneOrMany::One(s) => vec![s],
        OneOrMany::Many(v) => v,
    })
}
