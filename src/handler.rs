//! References to the handlers attached to a route.
//!
//! The dump cannot carry the handlers themselves, only what they looked like
//! when serialised. A handler object keeps its function name; anything else is
//! kept as an opaque descriptor and identified by its display text.
//!
//! ```text
//! { "name": "requireAuth", "method": "get" }   → Callable { name: Some("requireAuth") }
//! { "method": "get" }                          → Callable { name: None }
//! "rateLimit(100)"                             → Descriptor("rateLimit(100)")
//! ```

use serde::Serialize;
use serde_json::Value;

/// One handler attached to a route, in declaration order.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum HandlerRef {
    Callable { name: Option<String> },
    Descriptor(String),
}

impl HandlerRef {
    pub fn callable(name: impl Into<String>) -> Self {
        Self::Callable { name: Some(name.into()) }
    }

    /// The name protection matching compares against. Anonymous callables
    /// have none.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Callable { name } => name.as_deref(),
            Self::Descriptor(text) => Some(text),
        }
    }

    pub(crate) fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(map) => Self::Callable {
                name: map
                    .get("name")
                    .and_then(Value::as_str)
                    .filter(|n| !n.is_empty())
                    .map(str::to_owned),
            },
            Value::String(text) => Self::Descriptor(text.clone()),
            other => Self::Descriptor(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn objects_are_callables_named_by_their_name_field() {
        let h = HandlerRef::from_value(&json!({ "name": "requireAuth", "method": "get" }));
        assert_eq!(h, HandlerRef::callable("requireAuth"));
        assert_eq!(h.name(), Some("requireAuth"));
    }

    #[test]
    fn anonymous_callables_have_no_name() {
        assert_eq!(HandlerRef::from_value(&json!({ "name": "" })).name(), None);
        assert_eq!(HandlerRef::from_value(&json!({})).name(), None);
    }

    #[test]
    fn everything_else_is_a_descriptor() {
        assert_eq!(
            HandlerRef::from_value(&json!("rateLimit")),
            HandlerRef::Descriptor("rateLimit".into())
        );
        assert_eq!(HandlerRef::from_value(&json!(7)).name(), Some("7"));
    }
}
