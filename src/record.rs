//! Discovery output: route records and diagnostic notices.

use std::fmt;

use http::Method;
use serde::{Serialize, Serializer};

use crate::handler::HandlerRef;

/// One discovered (method, path) pair.
///
/// Built fresh on every discovery call and never shared with the tree it came
/// from. A route declared for three methods yields three records with the same
/// path and middleware list.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct RouteRecord {
    #[serde(serialize_with = "method_str")]
    pub method: Method,
    pub path: String,
    pub protected: bool,
    pub middlewares: Vec<HandlerRef>,
}

impl RouteRecord {
    /// Names of the attached middleware, skipping anonymous ones.
    pub fn middleware_names(&self) -> impl Iterator<Item = &str> {
        self.middlewares.iter().filter_map(HandlerRef::name)
    }
}

fn method_str<S: Serializer>(method: &Method, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(method.as_str())
}

/// A structured diagnostic raised during discovery. The engine never prints
/// these; the caller decides what to do with them.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Notice {
    /// The dump has no root node list at any known location.
    MissingStack,
    /// The root node list exists but holds no nodes.
    EmptyStack,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingStack => f.write_str("no router stack found; is the application initialised?"),
            Self::EmptyStack   => f.write_str("router stack is empty; no routes registered"),
        }
    }
}

/// Everything one discovery call produced.
#[derive(Clone, Debug, Default)]
pub struct Discovery {
    /// Records in depth-first declaration order, filtered.
    pub routes: Vec<RouteRecord>,
    pub notices: Vec<Notice>,
}

impl Discovery {
    pub(crate) fn notice(notice: Notice) -> Self {
        Self { routes: Vec::new(), notices: vec![notice] }
    }
}
