//! Presenting a route listing.
//!
//! ```text
//! /api
//!   GET     /api/users -         audit
//!   POST    /api/users protected requireAuth
//!
//! /health
//!   GET     /health    -
//! ```
//!
//! [`render_colored`] produces the same layout with ANSI styling: methods by
//! verb, bold headings, highlighted `protected` markers. Cells are padded
//! before styling so columns stay aligned.

use std::cmp::Ordering;
use std::io::Write;

use colored::{ColoredString, Colorize};
use serde_json::Value;
use tracing::warn;

use crate::discover;
use crate::error::Error;
use crate::method::rank;
use crate::options::DiscoverOptions;
use crate::record::RouteRecord;

const METHOD_WIDTH: usize = 7;

/// Output format of [`print_routes`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Format {
    #[default]
    Table,
    /// [`Format::Table`] with ANSI colours, for terminals.
    Colored,
    Json,
}

/// Sorts by path, then by conventional method order.
pub fn sort_routes(routes: &mut [RouteRecord]) {
    routes.sort_by(compare);
}

fn compare(a: &RouteRecord, b: &RouteRecord) -> Ordering {
    a.path
        .cmp(&b.path)
        .then_with(|| rank(&a.method).cmp(&rank(&b.method)))
        .then_with(|| a.method.as_str().cmp(b.method.as_str()))
}

/// The first segment of a path, as the heading it is grouped under.
fn group(path: &str) -> &str {
    match path.get(1..).and_then(|rest| rest.find('/')) {
        Some(end) => &path[..end + 1],
        None => path,
    }
}

/// Renders `routes` as a plain-text table, grouped by first path segment.
/// Routes are rendered in the order given; sort them first.
pub fn render(routes: &[RouteRecord]) -> String {
    render_rows(routes, false)
}

/// [`render`] with ANSI colours. Whether escapes are actually emitted follows
/// `colored`'s own switches (`NO_COLOR`, `CLICOLOR_FORCE`, overrides).
pub fn render_colored(routes: &[RouteRecord]) -> String {
    render_rows(routes, true)
}

fn render_rows(routes: &[RouteRecord], color: bool) -> String {
    let path_width = routes.iter().map(|r| r.path.len()).max().unwrap_or(0);
    let mut out = String::new();
    let mut current: Option<&str> = None;

    for route in routes {
        let heading = group(&route.path);
        if current != Some(heading) {
            if current.is_some() {
                out.push('\n');
            }
            out.push_str(&paint(heading, color, |s| s.bold()));
            out.push('\n');
            current = Some(heading);
        }

        let method = format!("{:<mw$}", route.method.as_str(), mw = METHOD_WIDTH);
        let path = format!("{:<pw$}", route.path, pw = path_width);
        let names = route.middleware_names().collect::<Vec<_>>().join(", ");
        let marker = if route.protected { "protected" } else { "-" };
        let marker = if names.is_empty() { marker.to_owned() } else { format!("{marker:<9} ") };

        out.push_str("  ");
        out.push_str(&paint(&method, color, |s| verb_color(route.method.as_str(), s)));
        out.push(' ');
        out.push_str(&path);
        out.push(' ');
        if route.protected {
            out.push_str(&paint(&marker, color, |s| s.cyan().bold()));
        } else {
            out.push_str(&paint(&marker, color, |s| s.dimmed()));
        }
        if !names.is_empty() {
            out.push_str(&paint(&names, color, |s| s.dimmed()));
        }
        out.push('\n');
    }
    out
}

fn paint(text: &str, color: bool, style: impl FnOnce(&str) -> ColoredString) -> String {
    if color { style(text).to_string() } else { text.to_owned() }
}

fn verb_color(method: &str, cell: &str) -> ColoredString {
    match method {
        "GET"            => cell.green(),
        "POST"           => cell.yellow(),
        "PUT" | "PATCH"  => cell.blue(),
        "DELETE"         => cell.red(),
        _                => cell.magenta(),
    }
}

pub fn render_json(routes: &[RouteRecord]) -> Result<String, Error> {
    Ok(serde_json::to_string_pretty(routes)?)
}

/// Discovers, sorts and writes the routes of `app`. Notices are logged at
/// `warn` level. Returns the number of routes written.
pub fn print_routes(
    app: &Value,
    options: &DiscoverOptions,
    format: Format,
    mut writer: impl Write,
) -> Result<usize, Error> {
    let discovery = discover(app, options);
    for notice in &discovery.notices {
        warn!(%notice, "route discovery");
    }

    let mut routes = discovery.routes;
    sort_routes(&mut routes);

    let rendered = match format {
        Format::Table => render(&routes),
        Format::Colored => render_colored(&routes),
        Format::Json => render_json(&routes)? + "\n",
    };
    writer.write_all(rendered.as_bytes())?;
    writer.flush()?;
    Ok(routes.len())
}

#[cfg(test)]
mod tests {
    use http::Method;
    use serde_json::json;

    use super::*;
    use crate::handler::HandlerRef;

    fn record(method: Method, path: &str, protected: bool, mw: &[&str]) -> RouteRecord {
        RouteRecord {
            method,
            path: path.to_owned(),
            protected,
            middlewares: mw.iter().map(|n| HandlerRef::callable(*n)).collect(),
        }
    }

    #[test]
    fn sorts_by_path_then_method_rank() {
        let mut routes = vec![
            record(Method::DELETE, "/b", false, &[]),
            record(Method::from_bytes(b"PURGE").unwrap(), "/a", false, &[]),
            record(Method::POST, "/a", false, &[]),
            record(Method::GET, "/a", false, &[]),
        ];
        sort_routes(&mut routes);
        let order: Vec<_> = routes.iter().map(|r| format!("{} {}", r.method, r.path)).collect();
        assert_eq!(order, vec!["GET /a", "POST /a", "PURGE /a", "DELETE /b"]);
    }

    #[test]
    fn groups_by_first_segment() {
        assert_eq!(group("/"), "/");
        assert_eq!(group("/api"), "/api");
        assert_eq!(group("/api/users/:id"), "/api");
    }

    #[test]
    fn renders_grouped_rows() {
        let routes = vec![
            record(Method::GET, "/api/users", false, &["audit"]),
            record(Method::POST, "/api/users", true, &["requireAuth"]),
            record(Method::GET, "/health", false, &[]),
        ];
        let text = render(&routes);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "/api");
        assert_eq!(lines[1], "  GET     /api/users -         audit");
        assert_eq!(lines[2], "  POST    /api/users protected requireAuth");
        assert_eq!(lines[3], "");
        assert_eq!(lines[4], "/health");
        assert!(lines[5].starts_with("  GET     /health"));
    }

    #[test]
    fn plain_table_has_no_escapes() {
        let routes = vec![
            record(Method::DELETE, "/api/users", true, &[]),
            record(Method::GET, "/health", false, &["audit"]),
        ];
        let text = render(&routes);
        assert!(!text.contains('\x1b'));
        assert!(text.lines().all(|line| line == line.trim_end()));
        assert!(text.contains("  DELETE  /api/users protected\n"));
        assert!(text.contains("  GET     /health    -         audit\n"));
    }

    #[test]
    fn colored_table_styles_cells_and_keeps_text() {
        colored::control::set_override(true);
        let routes = vec![
            record(Method::GET, "/api/users", false, &["audit"]),
            record(Method::POST, "/api/users", true, &["requireAuth"]),
        ];
        let text = render_colored(&routes);
        assert!(text.contains("\x1b["));
        assert!(text.contains(&"GET    ".green().to_string()));
        assert!(text.contains(&"protected ".cyan().bold().to_string()));
        assert!(text.contains("/api/users"));
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn json_never_carries_colour() {
        colored::control::set_override(true);
        let app = json!({ "stack": [{ "route": { "path": "/a", "methods": { "get": true } } }] });
        let mut buf = Vec::new();
        print_routes(&app, &DiscoverOptions::new(), Format::Json, &mut buf).unwrap();
        assert!(!buf.contains(&0x1b));
    }

    #[test]
    fn json_uses_method_strings() {
        let out = render_json(&[record(Method::PATCH, "/x", true, &["a"])]).unwrap();
        let parsed: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(
            parsed,
            json!([{ "method": "PATCH", "path": "/x", "protected": true, "middlewares": [{ "name": "a" }] }])
        );
    }

    #[test]
    fn print_routes_writes_sorted_output() {
        let app = json!({ "stack": [
            { "route": { "path": "/b", "methods": { "get": true } } },
            { "route": { "path": "/a", "methods": { "get": true } } }
        ] });
        let mut buf = Vec::new();
        let n = print_routes(&app, &DiscoverOptions::new(), Format::Table, &mut buf).unwrap();
        assert_eq!(n, 2);
        let text = String::from_utf8(buf).unwrap();
        assert!(text.find("/a").unwrap() < text.find("/b").unwrap());
    }

    #[test]
    fn print_routes_with_missing_stack_writes_nothing() {
        let mut buf = Vec::new();
        let n = print_routes(&json!({}), &DiscoverOptions::new(), Format::Table, &mut buf).unwrap();
        assert_eq!(n, 0);
        assert!(buf.is_empty());
    }
}
