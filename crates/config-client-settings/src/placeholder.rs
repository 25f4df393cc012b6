//! Placeholder expansion
//!
//! Values may reference other configuration paths with `${path}`, optionally
//! with a fallback: `${path?default}`. Dotted and colon paths are both
//! accepted. Expansion is recursive, defaults may themselves contain
//! placeholders, and anything that cannot be resolved is left verbatim.
//!
//! ```
//! use config_client_settings::placeholder::resolve_placeholders;
//! use config_client_settings::MemorySource;
//!
//! let source = MemorySource::new().with("cf:host", "cfg.example.com");
//! assert_eq!(
//!     resolve_placeholders("https://${cf.host}:${cf:port?443}", &source),
//!     "https://cfg.example.com:443"
//! );
//! ```

use crate::source::{ConfigSource, normalize_path};
use std::collections::HashSet;
use tracing::warn;

const OPEN: &str = "${";
const CLOSE: u8 = b'}';
const DEFAULT_SEPARATOR: u8 = b'?';

/// Expand every `${...}` placeholder in `text` against `source`.
pub fn resolve_placeholders(text: &str, source: &dyn ConfigSource) -> String {
    if !text.contains(OPEN) {
        return text.to_string();
    }
    let mut visiting = HashSet::new();
    expand(text, source, &mut visiting)
}

fn expand(text: &str, source: &dyn ConfigSource, visiting: &mut HashSet<String>) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find(OPEN) {
        out.push_str(&rest[..start]);
        let body = &rest[start + OPEN.len()..];
        let Some(end) = find_close(body) else {
            // Unterminated: keep the remainder as written.
            out.push_str(&rest[start..]);
            return out;
        };
        let whole = &rest[start..start + OPEN.len() + end + 1];
        out.push_str(&expand_one(&body[..end], whole, source, visiting));
        rest = &body[end + 1..];
    }

    out.push_str(rest);
    out
}

fn expand_one(
    inner: &str,
    whole: &str,
    source: &dyn ConfigSource,
    visiting: &mut HashSet<String>,
) -> String {
    let (key_part, default) = split_default(inner);
    let key = normalize_path(&expand(key_part, source, visiting));

    if !visiting.insert(key.clone()) {
        warn!(key = %key, "circular placeholder reference; leaving unresolved");
        return whole.to_string();
    }

    let resolved = match source.value(&key).filter(|v| !v.is_empty()) {
        Some(value) => Some(expand(&value, source, visiting)),
        None => default.map(|d| expand(d, source, visiting)),
    };

    visiting.remove(&key);
    resolved.unwrap_or_else(|| whole.to_string())
}

/// Byte offset of the `}` closing the placeholder whose body starts `body`.
fn find_close(body: &str) -> Option<usize> {
    let bytes = body.as_bytes();
    let mut depth = 0usize;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'$' && bytes.get(i + 1) == Some(&b'{') {
            depth += 1;
            i += 2;
            continue;
        }
        if bytes[i] == CLOSE {
            if depth == 0 {
                return Some(i);
            }
            depth -= 1;
        }
        i += 1;
    }
    None
}

/// Split `key?default` on the first separator outside nested placeholders.
fn split_default(inner: &str) -> (&str, Option<&str>) {
    let bytes = inner.as_bytes();
    let mut depth = 0usize;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'$' if bytes.get(i + 1) == Some(&b'{') => {
                depth += 1;
                i += 2;
                continue;
            }
            CLOSE if depth > 0 => depth -= 1,
            DEFAULT_SEPARATOR if depth == 0 => return (&inner[..i], Some(&inner[i + 1..])),
            _ => {}
        }
        i += 1;
    }
    (inner, None)
}
