//! Best-effort decoding of compiled path matchers.
//!
//! The framework compiles every mount path into a regular expression and
//! throws the literal away. What survives in a dump is the expression's text:
//!
//! ```text
//! app.use("/api", router)        →  /^\/api\/?(?=\/|$)/i
//! app.use(router)                →  /^\/?(?=\/|$)/i
//! router.use("/users/:id", sub)  →  /^\/users\/(?:([^\/]+?))\/?(?=\/|$)/i
//! ```
//!
//! [`decode_path`] turns that text back into something a human can read. It
//! tries three layers, first success wins:
//!
//! 1. [`fast_path`]: the plain literal mount, which is nearly every mount seen
//!    in practice.
//! 2. [`structural`]: strip anchors, suffixes and groups and keep whatever
//!    literal text is left.
//! 3. Fallback to `/`.
//!
//! Decoding is lossy. Parameters, alternations and constraint syntax collapse
//! to the literal prefix in front of them. It never fails.

use std::iter::Peekable;
use std::str::Chars;
use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::path::clean;

/// `^\/seg\/seg` with an optional `\/?` marker and an optional `(?=\/|$)` or
/// `$` terminator. Segments may hold escaped punctuation but no metacharacters;
/// `\d`, `\w`, `\b` and friends are classes, not text.
static FAST_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^\^\\/",
        r"((?:[^\\/^$.*+?()\[\]{}|]|\\[^/A-Za-z0-9])+(?:\\/(?:[^\\/^$.*+?()\[\]{}|]|\\[^/A-Za-z0-9])+)*)",
        r"(?:\\/\?)?(?:\(\?=\\/\|\$\)|\$)?$",
    ))
    .expect("fast-path pattern is valid")
});

/// The application root: `^\/?(?=\/|$)`, `^\/?$` or a bare `^\/?`.
static ROOT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\^?\\/\?(?:\(\?=\\/\|\$\)|\$)?$").expect("root pattern is valid")
});

static ESCAPED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\(.)").expect("escape pattern is valid"));

/// Suffixes stripped from the end of a pattern body, repeatedly, in any order.
const SUFFIXES: [&str; 3] = [r"(?=\/|$)", "$", r"\/?"];

const PLACEHOLDER: &str = ":param";

// ── CompiledMatcher ───────────────────────────────────────────────────────────

/// The text of a compiled path matcher, treated as opaque.
///
/// Accepts both the bare pattern source (`^\/api\/?(?=\/|$)`) and the
/// delimited form a regex prints as (`/^\/api\/?(?=\/|$)/i`).
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct CompiledMatcher(String);

impl CompiledMatcher {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// The text exactly as it was dumped.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The pattern source with `/…/flags` delimiters removed.
    pub fn source(&self) -> &str {
        let text = self.0.trim();
        if let Some(rest) = text.strip_prefix('/')
            && let Some(end) = rest.rfind('/')
            && rest[end + 1..].chars().all(|c| c.is_ascii_alphabetic())
        {
            return &rest[..end];
        }
        text
    }
}

impl From<&str> for CompiledMatcher {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

// ── Decoding ──────────────────────────────────────────────────────────────────

/// Recovers a readable absolute path from a compiled matcher.
///
/// Total: falls back to `/` when no layer recognises the text.
///
/// ```rust
/// use routescope::{CompiledMatcher, decode_path};
///
/// assert_eq!(decode_path(&CompiledMatcher::new(r"/^\/api\/?(?=\/|$)/i")), "/api");
/// assert_eq!(decode_path(&CompiledMatcher::new(r"/^\/?(?=\/|$)/i")), "/");
/// assert_eq!(decode_path(&CompiledMatcher::new("(a|b)+")), "/");
/// ```
pub fn decode_path(matcher: &CompiledMatcher) -> String {
    let source = matcher.source();

    if let Some(path) = fast_path(source) {
        return path;
    }
    if let Some(path) = structural(source) {
        trace!(matcher = matcher.as_str(), %path, "decoded structurally");
        return path;
    }

    trace!(matcher = matcher.as_str(), "undecodable matcher, using `/`");
    "/".to_owned()
}

/// Layer 1: a pure literal mount. `None` when the source holds any pattern
/// syntax beyond the anchors and the optional trailing marker.
pub fn fast_path(source: &str) -> Option<String> {
    let literal = FAST_PATH.captures(source)?.get(1)?.as_str();
    Some(format!("/{}", ESCAPED.replace_all(literal, "$1")))
}

/// Layer 2: strip the pattern syntax and keep the literal text around it.
/// Groups and bracketed classes are dropped whole. `None` when the source
/// carries no anchor or escaped separator to work from.
pub fn structural(source: &str) -> Option<String> {
    reduce(source, Groups::Strip)
}

/// Same reduction as [`structural`], but each group leaves a `:param`
/// placeholder behind. Used when normalising route paths for display.
pub(crate) fn with_placeholders(matcher: &CompiledMatcher) -> String {
    reduce(matcher.source(), Groups::Placeholder).unwrap_or_else(|| "/".to_owned())
}

#[derive(Clone, Copy)]
enum Groups {
    Strip,
    Placeholder,
}

fn reduce(source: &str, groups: Groups) -> Option<String> {
    if !(source.contains('^') || source.contains(r"\/") || source.contains('$')) {
        return None;
    }
    if ROOT.is_match(source) {
        return Some("/".to_owned());
    }

    let mut body = source.strip_prefix('^').unwrap_or(source);
    while let Some(rest) = SUFFIXES.iter().find_map(|s| body.strip_suffix(s)) {
        body = rest;
    }

    let body = body.replace(r"\/", "/");
    Some(clean(&literal_text(&body, groups)))
}

/// Walks a pattern body and keeps only its literal characters.
fn literal_text(body: &str, groups: Groups) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            // `\d`, `\w`, `\b` are classes or assertions, not text.
            '\\' => match chars.next() {
                Some(e) if !e.is_ascii_alphanumeric() => out.push(e),
                _ => {}
            },
            '(' => {
                let inner = take_group(&mut chars);
                if let Groups::Placeholder = groups {
                    out.push_str(&placeholder(&inner));
                }
            }
            '[' => skip_class(&mut chars),
            '{' => skip_until(&mut chars, '}'),
            // Top-level alternation: keep the first branch's prefix only.
            '|' => break,
            '^' | '$' | '.' | '*' | '+' | '?' | ')' | ']' | '}' => {}
            _ => out.push(c),
        }
    }
    out
}

/// What a group turns into in placeholder mode. Lookarounds vanish; a group
/// opening on a separator keeps it.
fn placeholder(inner: &str) -> String {
    if ["?=", "?!", "?<=", "?<!"].iter().any(|p| inner.starts_with(p)) {
        return String::new();
    }
    let inner = inner.strip_prefix("?:").unwrap_or(inner);
    if inner.starts_with('/') {
        format!("/{PLACEHOLDER}")
    } else {
        PLACEHOLDER.to_owned()
    }
}

/// Consumes up to the `)` that closes an already-opened group and returns the
/// text in between. Nested groups, escapes and classes are respected.
fn take_group(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut inner = String::new();
    let mut depth = 1usize;
    let mut in_class = false;

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                inner.push(c);
                if let Some(e) = chars.next() {
                    inner.push(e);
                }
                continue;
            }
            '[' if !in_class => in_class = true,
            ']' if in_class => in_class = false,
            '(' if !in_class => depth += 1,
            ')' if !in_class => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            _ => {}
        }
        inner.push(c);
    }
    inner
}

fn skip_class(chars: &mut Peekable<Chars<'_>>) {
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            ']' => break,
            _ => {}
        }
    }
}

fn skip_until(chars: &mut Peekable<Chars<'_>>, end: char) {
    for c in chars.by_ref() {
        if c == end {
            break;
        }
    }
}
