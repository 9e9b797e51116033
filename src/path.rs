//! Path joining and normalisation.
//!
//! Every path that leaves this crate has the same shape:
//!
//! - starts with `/`
//! - no runs of `/`: `/api//users` → `/api/users`
//! - no trailing `/`: `/api/` → `/api`, except the root itself, `/`

use std::fmt;

use crate::matcher::{self, CompiledMatcher, decode_path};

/// A path fragment as the routing tree stores it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PathSpec {
    /// A literal path string, as declared.
    Literal(String),
    /// A compiled matcher whose literal was lost.
    Compiled(CompiledMatcher),
    /// Anything else (a path list, a number, …), by its display text.
    Other(String),
}

impl From<&str> for PathSpec {
    fn from(path: &str) -> Self {
        Self::Literal(path.to_owned())
    }
}

impl From<CompiledMatcher> for PathSpec {
    fn from(matcher: CompiledMatcher) -> Self {
        Self::Compiled(matcher)
    }
}

impl fmt::Display for PathSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(s) | Self::Other(s) => f.write_str(s),
            Self::Compiled(m) => f.write_str(m.as_str()),
        }
    }
}

/// Joins `base` and `sub` with exactly one separator between them.
///
/// Compiled subs are decoded with [`decode_path`]; other non-literal subs go
/// through [`normalize_route_path`] first.
///
/// ```rust
/// use routescope::combine;
///
/// assert_eq!(combine("/", &"/".into()), "/");
/// assert_eq!(combine("/api/", &"/users/".into()), "/api/users");
/// assert_eq!(combine("/api", &"//v1//items".into()), "/api/v1/items");
/// ```
pub fn combine(base: &str, sub: &PathSpec) -> String {
    let sub = match sub {
        PathSpec::Literal(s) => s.clone(),
        PathSpec::Compiled(m) => decode_path(m),
        other @ PathSpec::Other(_) => normalize_route_path(other),
    };
    if base == "/" && sub == "/" {
        return "/".to_owned();
    }
    clean(&format!("{base}/{sub}"))
}

/// Turns any path fragment into a displayable absolute path.
///
/// Literal paths come back unchanged when they already start with `/`.
/// Compiled matchers are reduced with every parameter group shown as `:param`.
///
/// ```rust
/// use routescope::{CompiledMatcher, PathSpec, normalize_route_path};
///
/// let m = CompiledMatcher::new(r"/^\/users\/(?:([^\/]+?))\/?(?=\/|$)/i");
/// assert_eq!(normalize_route_path(&PathSpec::Compiled(m)), "/users/:param");
/// assert_eq!(normalize_route_path(&PathSpec::Literal("/a//b/".into())), "/a//b/");
/// ```
pub fn normalize_route_path(path: &PathSpec) -> String {
    match path {
        PathSpec::Compiled(m) => matcher::with_placeholders(m),
        PathSpec::Literal(s) | PathSpec::Other(s) => absolute(s),
    }
}

fn absolute(path: &str) -> String {
    if path.is_empty() {
        "/".to_owned()
    } else if path.starts_with('/') {
        path.to_owned()
    } else {
        format!("/{path}")
    }
}

/// Collapses separator runs, drops the trailing separator and ensures a
/// leading one. The empty path becomes `/`.
pub(crate) fn clean(path: &str) -> String {
    let mut out = String::with_capacity(path.len() + 1);
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        out.push('/');
        out.push_str(segment);
    }
    if out.is_empty() {
        out.push('/');
    }
    out
}
