//! Narrowing a record set.
//!
//! Filters run in a fixed order: domain, path prefix, unprotected-only,
//! include, exclude. Each is optional and can only remove records.

use tracing::debug;

use crate::options::DiscoverOptions;
use crate::record::RouteRecord;

/// Applies every configured filter to `routes`, keeping their order.
pub fn apply(mut routes: Vec<RouteRecord>, options: &DiscoverOptions) -> Vec<RouteRecord> {
    let before = routes.len();

    if !options.domain_filter.is_empty() {
        routes.retain(|r| in_domain(&r.path, &options.domain_filter));
    }
    if let Some(prefix) = &options.path_prefix {
        routes.retain(|r| r.path.starts_with(prefix.as_str()));
    }
    if options.show_unprotected_only {
        routes.retain(|r| !r.protected);
    }
    if let Some(include) = &options.include_filter {
        routes.retain(|r| include(r));
    }
    if let Some(exclude) = &options.exclude_filter {
        routes.retain(|r| !exclude(r));
    }

    debug!(before, after = routes.len(), "filtered routes");
    routes
}

/// True when any segment of `path` equals one of `tokens`, ignoring case.
/// Tokens may be written with a leading `/`.
pub fn in_domain(path: &str, tokens: &[String]) -> bool {
    let tokens: Vec<String> = tokens
        .iter()
        .map(|t| t.trim_start_matches('/').to_lowercase())
        .filter(|t| !t.is_empty())
        .collect();
    path.split('/')
        .filter(|s| !s.is_empty())
        .any(|segment| tokens.contains(&segment.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use http::Method;

    use super::*;
    use crate::handler::HandlerRef;

    fn record(method: Method, path: &str, protected: bool) -> RouteRecord {
        RouteRecord { method, path: path.to_owned(), protected, middlewares: Vec::new() }
    }

    fn sample() -> Vec<RouteRecord> {
        vec![
            record(Method::GET, "/api/users", false),
            record(Method::POST, "/api/users", true),
            record(Method::GET, "/api/orders/:id", true),
            record(Method::GET, "/health", false),
            record(Method::DELETE, "/Admin/users", false),
        ]
    }

    fn paths(routes: &[RouteRecord]) -> Vec<String> {
        routes.iter().map(|r| format!("{} {}", r.method, r.path)).collect()
    }

    #[test]
    fn no_filters_keep_everything() {
        assert_eq!(apply(sample(), &DiscoverOptions::new()), sample());
    }

    #[test]
    fn domain_matches_whole_segments_case_insensitively() {
        assert!(in_domain("/api/users", &["USERS".to_owned()]));
        assert!(in_domain("/Admin/users", &["/admin".to_owned()]));
        assert!(!in_domain("/api/users", &["user".to_owned()]));
        assert!(!in_domain("/", &[String::new()]));
    }

    #[test]
    fn domain_folds_non_ascii_case() {
        assert!(in_domain("/Über", &["über".to_owned()]));
        assert!(in_domain("/ÜBER/x", &["/über".to_owned()]));
        assert!(!in_domain("/uber", &["über".to_owned()]));
    }

    #[test]
    fn domain_filter() {
        let kept = apply(sample(), &DiscoverOptions::new().domain("admin").domain("/orders"));
        assert_eq!(paths(&kept), vec!["GET /api/orders/:id", "DELETE /Admin/users"]);
    }

    #[test]
    fn prefix_filter_is_exact() {
        let kept = apply(sample(), &DiscoverOptions::new().path_prefix("/api/u"));
        assert_eq!(paths(&kept), vec!["GET /api/users", "POST /api/users"]);
    }

    #[test]
    fn unprotected_only() {
        let kept = apply(sample(), &DiscoverOptions::new().unprotected_only());
        assert!(kept.iter().all(|r| !r.protected));
        assert_eq!(kept.len(), 3);
    }

    #[test]
    fn include_then_exclude() {
        let options = DiscoverOptions::new()
            .include(|r| r.method == Method::GET)
            .exclude(|r| r.path == "/health");
        let kept = apply(sample(), &options);
        assert_eq!(paths(&kept), vec!["GET /api/users", "GET /api/orders/:id"]);
    }

    #[test]
    fn combined_filters_never_widen() {
        let all = DiscoverOptions::new()
            .domain("users")
            .path_prefix("/api")
            .unprotected_only()
            .include(|r| r.middlewares.iter().all(|m| m != &HandlerRef::callable("x")))
            .exclude(|r| r.method == Method::DELETE);
        let subsets = [
            DiscoverOptions::new().domain("users"),
            DiscoverOptions::new().path_prefix("/api"),
            DiscoverOptions::new().unprotected_only(),
            DiscoverOptions::new().exclude(|r| r.method == Method::DELETE),
            DiscoverOptions::new().domain("users").path_prefix("/api"),
        ];

        let combined = apply(sample(), &all);
        for subset in &subsets {
            let partial = apply(sample(), subset);
            assert!(combined.iter().all(|r| partial.contains(r)));
            assert!(combined.len() <= partial.len());
        }
        assert_eq!(paths(&combined), vec!["GET /api/users"]);
    }
}
