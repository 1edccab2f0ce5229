//! Line patterns of the script dialect.

use once_cell::sync::Lazy;
use regex::Regex;

/// Chain body: an identifier followed by `.segment` or `[...]` steps.
/// Identifiers start with any letter or `_`, umlauts included.
const CHAIN_BODY: &str = r"[^\W\d]\w*(?:\.\w+|\[[^\[\]]*\])*";

/// `name = ...  # type: T`
pub(crate) static TYPE_COMMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?P<name>[^\W\d]\w*)\s*=[^=].*#\s*type:\s*(?P<ty>[\w\[\]]+)\s*$")
        .expect("valid regex")
});

/// `name: T = ...` (comment already stripped)
pub(crate) static ANNOTATED_DECL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?P<name>[^\W\d]\w*)\s*:\s*(?P<ty>[^\W\d][\w\[\]]*)\s*(?:=[^=].*)?$")
        .expect("valid regex")
});

/// `name = expr` (comment already stripped)
pub(crate) static ASSIGNMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?P<name>[^\W\d]\w*)\s*=\s*(?P<expr>[^=\s].*?)\s*$").expect("valid regex")
});

/// `for name in expr:` (comment already stripped)
pub(crate) static FOR_LOOP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*for\s+(?P<name>[^\W\d]\w*)\s+in\s+(?P<expr>.+?)\s*:\s*$")
        .expect("valid regex")
});

/// `# param name: T` or `# @param name: T`
pub(crate) static PARAM_COMMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*#\s*@?param\s+(?P<name>[^\W\d]\w*)\s*:\s*(?P<ty>[\w\[\]]+)\s*$")
        .expect("valid regex")
});

pub(crate) static BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:async\s+)?(?:def|class)\b").expect("valid regex"));

static SIGNATURE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:async\s+)?def\s+\w+\s*\((?P<params>.*)\)").expect("valid regex")
});

pub(crate) static CHAIN: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"^{}$", CHAIN_BODY)).expect("valid regex"));

pub(crate) static CHAIN_STEP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.(?P<seg>\w+)|\[(?P<idx>[^\[\]]*)\]").expect("valid regex"));

/// A chain followed by `.partial` at the end of the text before the cursor.
pub(crate) static TRAILING_CHAIN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?:^|[^\w.\])])(?P<chain>{})\.(?P<partial>\w*)$",
        CHAIN_BODY
    ))
    .expect("valid regex")
});

/// A type name being typed inside a type or param comment.
pub(crate) static TYPE_POSITION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"#\s*(?:type:|@?param\s+\w+\s*:)\s*(?:(?:list|List)\[)?(?P<partial>\w*)$")
        .expect("valid regex")
});

static TYPE_EXPR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(?:list|List)\[\s*(?P<inner>\w+)\s*\]|(?P<arr>\w+)\[\]|(?P<plain>\w+))$")
        .expect("valid regex")
});

/// Split a type expression into its class name and collection flag.
///
/// `Projekt` is single; `list[Projekt]`, `List[Projekt]` and `Projekt[]`
/// are collections.
pub fn parse_type_expr(expr: &str) -> Option<(&str, bool)> {
    let caps = TYPE_EXPR.captures(expr.trim())?;
    if let Some(inner) = caps.name("inner") {
        return Some((inner.as_str(), true));
    }
    if let Some(arr) = caps.name("arr") {
        return Some((arr.as_str(), true));
    }
    caps.name("plain").map(|m| (m.as_str(), false))
}

/// The annotated type of `param` in a `def` line, if any.
pub fn signature_hint<'a>(line: &'a str, param: &str) -> Option<&'a str> {
    let caps = SIGNATURE.captures(line)?;
    let params = caps.name("params")?.as_str();
    params.split(',').find_map(|part| {
        let (name, rest) = part.split_once(':')?;
        if name.trim().trim_start_matches('*') != param {
            return None;
        }
        let ty = rest.split('=').next()?.trim();
        (!ty.is_empty()).then_some(ty)
    })
}

/// The code part of a line, without a trailing `#` comment.
pub fn strip_comment(line: &str) -> &str {
    let mut quote: Option<char> = None;
    let mut escaped = false;
    for (idx, ch) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match (quote, ch) {
            (Some(_), '\\') => escaped = true,
            (Some(q), c) if c == q => quote = None,
            (None, '\'' | '"') => quote = Some(ch),
            (None, '#') => return &line[..idx],
            _ => {}
        }
    }
    line
}

pub fn is_boundary(line: &str) -> bool {
    BOUNDARY.is_match(line)
}
