//! Deciding whether a route counts as protected.
//!
//! First applicable rule wins:
//!
//! 1. a custom predicate, when one is configured, decides alone;
//! 2. otherwise, named middleware: protected iff any attached handler's name
//!    equals one of the configured names;
//! 3. otherwise the route is unprotected.
//!
//! There is no built-in guess. A handler called `auth` protects nothing unless
//! you say so.

use http::Method;

use crate::handler::HandlerRef;
use crate::options::{DiscoverOptions, ProtectionFn};

/// What a custom protection predicate gets to look at.
#[derive(Clone, Copy, Debug)]
pub struct RouteContext<'a> {
    pub path: &'a str,
    /// Always upper-case.
    pub method: &'a Method,
    pub middlewares: &'a [HandlerRef],
}

/// The protection rules of one discovery call.
#[derive(Clone, Copy)]
pub struct Protection<'a> {
    predicate: Option<&'a ProtectionFn>,
    names: &'a [String],
}

impl<'a> Protection<'a> {
    pub fn new(predicate: Option<&'a ProtectionFn>, names: &'a [String]) -> Self {
        Self { predicate, names }
    }

    pub fn from_options(options: &'a DiscoverOptions) -> Self {
        Self::new(options.is_protected.as_ref(), &options.protection_middleware_names)
    }

    pub fn resolve(&self, path: &str, method: &Method, middlewares: &[HandlerRef]) -> bool {
        if let Some(predicate) = self.predicate {
            return predicate(&RouteContext { path, method, middlewares });
        }
        if !self.names.is_empty() {
            return middlewares
                .iter()
                .filter_map(HandlerRef::name)
                .any(|name| self.names.iter().any(|n| n == name));
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn auth() -> Vec<HandlerRef> {
        vec![HandlerRef::callable("requireAuth"), HandlerRef::Descriptor("audit".into())]
    }

    #[test]
    fn unprotected_by_default() {
        let p = Protection::new(None, &[]);
        assert!(!p.resolve("/admin", &Method::GET, &auth()));
        assert!(!p.resolve("/admin", &Method::GET, &[HandlerRef::callable("auth")]));
    }

    #[test]
    fn named_middleware_protects() {
        let names = vec!["requireAuth".to_owned()];
        let p = Protection::new(None, &names);
        assert!(p.resolve("/admin", &Method::GET, &auth()));
        assert!(!p.resolve("/admin", &Method::GET, &[HandlerRef::callable("requireauth")]));
        assert!(!p.resolve("/admin", &Method::GET, &[HandlerRef::Callable { name: None }]));
    }

    #[test]
    fn descriptors_match_by_text() {
        let names = vec!["audit".to_owned()];
        assert!(Protection::new(None, &names).resolve("/", &Method::GET, &auth()));
    }

    #[test]
    fn predicate_wins_over_names() {
        let names = vec!["requireAuth".to_owned()];
        let never: ProtectionFn = Arc::new(|_: &RouteContext<'_>| false);
        assert!(!Protection::new(Some(&never), &names).resolve("/admin", &Method::GET, &auth()));

        let always: ProtectionFn = Arc::new(|_: &RouteContext<'_>| true);
        assert!(Protection::new(Some(&always), &names).resolve("/open", &Method::GET, &[]));
    }

    #[test]
    fn predicate_sees_the_route() {
        let writes: ProtectionFn = Arc::new(|ctx: &RouteContext<'_>| {
            *ctx.method != Method::GET && ctx.path.starts_with("/admin") && ctx.middlewares.len() == 2
        });
        let p = Protection::new(Some(&writes), &[]);
        assert!(p.resolve("/admin/users", &Method::POST, &auth()));
        assert!(!p.resolve("/admin/users", &Method::GET, &auth()));
    }
}
