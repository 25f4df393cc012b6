//! Typed value lookup with layered fallback
//!
//! Every lookup walks an ordered list of layers and stops at the first one
//! holding a present, well-formed value:
//!
//! 1. the primary section (`get_*`) or primary then secondary section
//!    (`get_setting*`)
//! 2. the global source, at the primary section's fully-qualified path
//! 3. the caller's default
//!
//! Absent, empty and malformed values all fall through to the next layer.
//! Lookups never fail. Raw values have `${...}` placeholders expanded against
//! the global source before they are coerced.

use crate::placeholder::resolve_placeholders;
use crate::source::{ConfigSource, Section, join_path};
use tracing::{trace, warn};

/// Which layer of the fallback chain produced (or rejected) a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    /// The first section consulted
    Primary,
    /// The alternate section of a three-layer lookup
    Secondary,
    /// The global source at the fully-qualified path
    Global,
}

impl Layer {
    fn as_str(self) -> &'static str {
        match self {
            Layer::Primary => "primary",
            Layer::Secondary => "secondary",
            Layer::Global => "global",
        }
    }
}

/// Resolve `key` through `primary` then `global`, coercing with `parse`.
pub fn get_typed<T, F>(
    key: &str,
    primary: &Section<'_>,
    global: &dyn ConfigSource,
    default: T,
    parse: F,
) -> T
where
    F: Fn(&str) -> Option<T>,
{
    first_valid(key, &[(Layer::Primary, primary)], global, &parse).unwrap_or(default)
}

/// Resolve `key` through `primary`, `secondary`, then `global`, coercing with
/// `parse`.
pub fn get_setting_typed<T, F>(
    key: &str,
    primary: &Section<'_>,
    secondary: &Section<'_>,
    global: &dyn ConfigSource,
    default: T,
    parse: F,
) -> T
where
    F: Fn(&str) -> Option<T>,
{
    first_valid(
        key,
        &[(Layer::Primary, primary), (Layer::Secondary, secondary)],
        global,
        &parse,
    )
    .unwrap_or(default)
}

/// String lookup: `primary`, then `global`, then `default`.
pub fn get_string(
    key: &str,
    primary: &Section<'_>,
    global: &dyn ConfigSource,
    default: Option<String>,
) -> Option<String> {
    first_valid(key, &[(Layer::Primary, primary)], global, &parse_string).or(default)
}

/// Three-layer string lookup: `primary`, `secondary`, `global`, then
/// `default`.
pub fn get_setting(
    key: &str,
    primary: &Section<'_>,
    secondary: &Section<'_>,
    global: &dyn ConfigSource,
    default: Option<String>,
) -> Option<String> {
    first_valid(
        key,
        &[(Layer::Primary, primary), (Layer::Secondary, secondary)],
        global,
        &parse_string,
    )
    .or(default)
}

/// Integer lookup; values that do not parse as `i32` fall through.
pub fn get_int(key: &str, primary: &Section<'_>, global: &dyn ConfigSource, default: i32) -> i32 {
    get_typed(key, primary, global, default, parse_int)
}

/// Floating-point lookup; values that do not parse as `f64` fall through.
pub fn get_double(
    key: &str,
    primary: &Section<'_>,
    global: &dyn ConfigSource,
    default: f64,
) -> f64 {
    get_typed(key, primary, global, default, parse_double)
}

/// Boolean lookup; anything other than `true`/`false` (any case) falls
/// through.
pub fn get_bool(key: &str, primary: &Section<'_>, global: &dyn ConfigSource, default: bool) -> bool {
    get_typed(key, primary, global, default, parse_bool)
}

pub fn parse_string(raw: &str) -> Option<String> {
    Some(raw.to_string())
}

pub fn parse_int(raw: &str) -> Option<i32> {
    raw.trim().parse().ok()
}

pub fn parse_double(raw: &str) -> Option<f64> {
    raw.trim().parse().ok()
}

pub fn parse_bool(raw: &str) -> Option<bool> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("true") {
        Some(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

fn first_valid<T>(
    key: &str,
    sections: &[(Layer, &Section<'_>)],
    global: &dyn ConfigSource,
    parse: &dyn Fn(&str) -> Option<T>,
) -> Option<T> {
    let qualified = match sections.first() {
        Some((_, section)) => join_path(section.path(), key),
        None => join_path("", key),
    };

    let section_attempts = sections
        .iter()
        .map(|(layer, section)| (*layer, section.value(key)));
    let global_attempt = std::iter::once_with(|| (Layer::Global, global.value(&qualified)));

    for (layer, raw) in section_attempts.chain(global_attempt) {
        let Some(raw) = raw.filter(|v| !v.is_empty()) else {
            continue;
        };
        let expanded = resolve_placeholders(&raw, global);
        if expanded.is_empty() {
            continue;
        }
        match parse(&expanded) {
            Some(value) => {
                trace!(key, layer = layer.as_str(), "resolved setting");
                return Some(value);
            }
            None => {
                warn!(key, layer = layer.as_str(), "ignoring malformed setting value");
            }
        }
    }

    None
}
