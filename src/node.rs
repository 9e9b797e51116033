//! Node classification.
//!
//! A dumped router stack is a list of layers of three shapes, told apart only
//! by which fields they carry:
//!
//! | Kind | Shape |
//! |---|---|
//! | **Route** | non-empty `route` descriptor: `{ path, methods, stack }` |
//! | **Router** | `name == "router"` and a `handle` exposing its own `stack` |
//! | **Middleware** | callable `handle` plus a `regexp`; may hide a `stack` |
//!
//! The three predicates are null-safe: anything that is not an object is
//! simply "not that kind". [`classify`] turns them into one closed [`Node`]
//! decision. Layers matching none of them (static-file serving, error
//! handlers without a matcher, …) are [`Node::Unrecognized`] and contribute
//! nothing.

use http::Method;
use serde_json::{Map, Value};
use tracing::trace;

use crate::handler::HandlerRef;
use crate::matcher::CompiledMatcher;
use crate::method::parse_declared;
use crate::path::PathSpec;

/// One classified layer, borrowing its children from the dump.
#[derive(Debug)]
pub enum Node<'a> {
    Route(RouteNode),
    Router {
        matcher: Option<CompiledMatcher>,
        stack: &'a [Value],
    },
    Middleware {
        matcher: CompiledMatcher,
        stack: Option<&'a [Value]>,
    },
    Unrecognized,
}

/// A terminal route: its own path fragment, the verbs it declares and the
/// handlers attached to it.
#[derive(Debug)]
pub struct RouteNode {
    pub path: PathSpec,
    pub methods: Vec<Method>,
    pub handlers: Vec<HandlerRef>,
}

pub fn is_route(layer: &Value) -> bool {
    layer
        .get("route")
        .and_then(Value::as_object)
        .is_some_and(|route| !route.is_empty())
}

pub fn is_router(layer: &Value) -> bool {
    layer.get("name").and_then(Value::as_str) == Some("router") && inner_stack(layer).is_some()
}

pub fn is_middleware(layer: &Value) -> bool {
    let callable = layer
        .get("handle")
        .and_then(|h| h.get("type"))
        .and_then(Value::as_str)
        == Some("function");
    callable && matcher(layer).is_some()
}

/// Classifies one layer. Routes win over routers, routers over middleware.
pub fn classify(layer: &Value) -> Node<'_> {
    if is_route(layer) {
        // `is_route` guarantees the object.
        let route = layer.get("route").and_then(Value::as_object);
        return route.map_or(Node::Unrecognized, |r| Node::Route(route_node(r)));
    }
    if is_router(layer) {
        return match inner_stack(layer) {
            Some(stack) => Node::Router { matcher: matcher(layer), stack },
            None => Node::Unrecognized,
        };
    }
    if is_middleware(layer) {
        return match matcher(layer) {
            Some(matcher) => Node::Middleware { matcher, stack: inner_stack(layer) },
            None => Node::Unrecognized,
        };
    }
    Node::Unrecognized
}

fn matcher(layer: &Value) -> Option<CompiledMatcher> {
    layer.get("regexp").and_then(Value::as_str).map(CompiledMatcher::new)
}

fn inner_stack(layer: &Value) -> Option<&[Value]> {
    layer
        .get("handle")
        .and_then(|h| h.get("stack"))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
}

fn route_node(route: &Map<String, Value>) -> RouteNode {
    let path = match route.get("path") {
        Some(Value::String(s)) => PathSpec::Literal(s.clone()),
        Some(Value::Object(m)) => match m.get("regexp").and_then(Value::as_str) {
            Some(text) => PathSpec::Compiled(CompiledMatcher::new(text)),
            None => PathSpec::Other(String::new()),
        },
        Some(Value::Array(paths)) => PathSpec::Other(
            paths.iter().map(display_text).collect::<Vec<_>>().join(","),
        ),
        Some(Value::Null) | None => PathSpec::Other(String::new()),
        Some(other) => PathSpec::Other(display_text(other)),
    };

    let methods = route
        .get("methods")
        .and_then(Value::as_object)
        .into_iter()
        .flatten()
        .filter(|(_, declared)| declared.as_bool() == Some(true))
        .filter_map(|(name, _)| {
            let method = parse_declared(name);
            if method.is_none() {
                trace!(method = %name, "skipping undeclarable method");
            }
            method
        })
        .collect();

    let handlers = route
        .get("stack")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .map(HandlerRef::from_value)
        .collect();

    RouteNode { path, methods, handlers }
}

fn display_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
