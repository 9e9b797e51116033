//! Declared method names to typed HTTP methods.
//!
//! A route descriptor declares its verbs as a name → bool map. Names arrive in
//! whatever case the framework stored them in (`get`, `Post`, `_all`). They are
//! upper-cased here and parsed into [`http::Method`], which also carries
//! extension verbs (`PURGE`, `MKCALENDAR`, …) without a lookup table.
//!
//! The framework's catch-all marker `_all` becomes the `ALL` verb.

use http::Method;

const CATCH_ALL: &str = "_all";

/// Parses one declared method name. Returns `None` for names that are not a
/// valid HTTP token once upper-cased (empty strings, whitespace, …).
pub fn parse_declared(name: &str) -> Option<Method> {
    let name = name.trim();
    if name.eq_ignore_ascii_case(CATCH_ALL) {
        return Method::from_bytes(b"ALL").ok();
    }
    Method::from_bytes(name.to_ascii_uppercase().as_bytes()).ok()
}

/// Display rank used when sorting a listing: the five CRUD verbs first in
/// their conventional order, everything else after them.
pub fn rank(method: &Method) -> u8 {
    match method.as_str() {
        "GET"     => 0,
        "POST"    => 1,
        "PUT"     => 2,
        "PATCH"   => 3,
        "DELETE"  => 4,
        "HEAD"    => 5,
        "OPTIONS" => 6,
        _         => 7,
    }
}
