//! Recursive traversal of a router stack.
//!
//! Layers are visited in declaration order. A router (or a middleware hiding a
//! stack) is descended into where it is declared, so the output is the
//! depth-first declaration order of the tree:
//!
//! ```text
//! stack                             records
//! ├─ GET  /health                   GET  /health
//! ├─ router /api                    GET  /api/users
//! │  ├─ GET,POST /users             POST /api/users
//! │  └─ router /admin               DELETE /api/admin/users/:id
//! │     └─ DELETE /users/:id        GET  /version
//! └─ GET  /version
//! ```
//!
//! The base path is threaded through the recursion by value. Nothing in the
//! dump is modified.

use serde_json::Value;
use tracing::{debug, trace};

use crate::node::{Node, RouteNode, classify};
use crate::path::{PathSpec, combine};
use crate::protect::Protection;
use crate::record::RouteRecord;

/// Collects one record per declared method of every route reachable from
/// `stack`, with paths resolved against `base`.
pub fn walk(stack: &[Value], base: &str, protection: &Protection<'_>) -> Vec<RouteRecord> {
    let mut routes = Vec::new();
    walk_into(stack, base, protection, &mut routes);
    routes
}

fn walk_into(stack: &[Value], base: &str, protection: &Protection<'_>, out: &mut Vec<RouteRecord>) {
    for layer in stack {
        match classify(layer) {
            Node::Route(route) => emit(route, base, protection, out),
            Node::Router { matcher, stack } => {
                let mount = match matcher {
                    Some(m) => combine(base, &PathSpec::Compiled(m)),
                    None => base.to_owned(),
                };
                debug!(%mount, layers = stack.len(), "descending into router");
                walk_into(stack, &mount, protection, out);
            }
            Node::Middleware { matcher, stack: Some(stack) } => {
                let mount = combine(base, &PathSpec::Compiled(matcher));
                debug!(%mount, layers = stack.len(), "descending into middleware stack");
                walk_into(stack, &mount, protection, out);
            }
            Node::Middleware { stack: None, .. } => {
                trace!(name = ?layer.get("name"), "middleware without routes");
            }
            Node::Unrecognized => {
                trace!(name = ?layer.get("name"), "skipping unrecognized layer");
            }
        }
    }
}

fn emit(route: RouteNode, base: &str, protection: &Protection<'_>, out: &mut Vec<RouteRecord>) {
    let path = combine(base, &route.path);
    for method in route.methods {
        let protected = protection.resolve(&path, &method, &route.handlers);
        out.push(RouteRecord {
            method,
            path: path.clone(),
            protected,
            middlewares: route.handlers.clone(),
        });
    }
}
