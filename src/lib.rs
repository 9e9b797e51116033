//! # routescope
//!
//! Recovers a flat route listing from a dumped web-server router stack.
//!
//! ## The problem
//!
//! Once an application is running, its routes are no longer written down
//! anywhere readable. The framework keeps a stack of compiled layers: route
//! descriptors, nested routers, middleware. Mount paths survive only as the
//! text of a compiled regular expression. routescope walks a JSON dump of that
//! stack and turns it back into one row per (method, path):
//!
//! ```text
//! GET     /api/users     -         audit
//! POST    /api/users     protected requireAuth
//! DELETE  /api/users/:id protected requireAuth, audit
//! ```
//!
//! What it does:
//!
//! - Decodes compiled mount matchers back into paths, best-effort, never
//!   failing: see [`decode_path`]
//! - Joins paths across any nesting depth: see [`combine`]
//! - Marks routes as protected by named middleware or by your own predicate
//! - Filters by domain segment, prefix, protection, or any predicate
//!
//! What it does not do: touch a live server, or understand stacks from any
//! other framework.
//!
//! ## Dump shape
//!
//! ```json
//! { "_router": { "stack": [
//!     { "name": "router", "regexp": "/^\\/api\\/?(?=\\/|$)/i",
//!       "handle": { "type": "function", "stack": [
//!         { "route": { "path": "/users",
//!                      "methods": { "get": true, "post": true },
//!                      "stack": [{ "name": "requireAuth", "method": "post" }] } }
//!       ] } }
//! ] } }
//! ```
//!
//! The root stack is looked up at `_router.stack`, `router.stack`, `stack`,
//! or the document itself when it is an array.
//!
//! ## Quick start
//!
//! ```rust
//! use routescope::{DiscoverOptions, discover};
//! use serde_json::json;
//!
//! let app = json!({ "stack": [
//!     { "name": "router", "regexp": "/^\\/api\\/?(?=\\/|$)/i",
//!       "handle": { "type": "function", "stack": [
//!         { "route": { "path": "/users", "methods": { "get": true },
//!                      "stack": [{ "name": "requireAuth" }] } }
//!       ] } }
//! ] });
//!
//! let found = discover(&app, &DiscoverOptions::new().protected_by("requireAuth"));
//! assert!(found.notices.is_empty());
//! assert_eq!(found.routes[0].method, http::Method::GET);
//! assert_eq!(found.routes[0].path, "/api/users");
//! assert!(found.routes[0].protected);
//! ```

use serde_json::Value;
use tracing::debug;

mod error;
mod filter;
mod handler;
mod matcher;
mod method;
mod node;
mod options;
mod path;
mod protect;
mod record;
mod table;
mod walker;

pub use error::Error;
pub use filter::{apply as apply_filters, in_domain};
pub use handler::HandlerRef;
pub use matcher::{CompiledMatcher, decode_path, fast_path, structural};
pub use method::parse_declared;
pub use node::{Node, RouteNode, classify, is_middleware, is_route, is_router};
pub use options::{DiscoverOptions, ProtectionFn, RouteFilter};
pub use path::{PathSpec, combine, normalize_route_path};
pub use protect::{Protection, RouteContext};
pub use record::{Discovery, Notice, RouteRecord};
pub use table::{Format, print_routes, render, render_colored, render_json, sort_routes};
pub use walker::walk;

/// Where a dump may keep its root stack, in lookup order.
const ROOT_KEYS: [&str; 2] = ["_router", "router"];

/// Lists every route reachable from `app`'s root stack, filtered by `options`.
///
/// Never fails. A dump without a root stack, or with an empty one, yields no
/// routes and one [`Notice`].
pub fn discover(app: &Value, options: &DiscoverOptions) -> Discovery {
    let Some(stack) = root_stack(app) else {
        return Discovery::notice(Notice::MissingStack);
    };
    if stack.is_empty() {
        return Discovery::notice(Notice::EmptyStack);
    }

    let routes = walker::walk(stack, "/", &Protection::from_options(options));
    debug!(layers = stack.len(), routes = routes.len(), "walked router stack");

    Discovery { routes: filter::apply(routes, options), notices: Vec::new() }
}

fn root_stack(app: &Value) -> Option<&[Value]> {
    if let Value::Array(stack) = app {
        return Some(stack);
    }
    ROOT_KEYS
        .iter()
        .find_map(|key| app.get(*key)?.get("stack")?.as_array())
        .or_else(|| app.get("stack")?.as_array())
        .map(Vec::as_slice)
}
