//! Name normalization for tag names, parameter names and class names.
//!
//! Callers pass names in whatever form they have at hand (`param` or
//! `@param`, `user` or `$user`, `App\User` or `\App\User`); these helpers
//! bring them to the single canonical form stored in the tree.

/// Prefix of every tag name (`@param`).
pub const TAG_MARKER: char = '@';

/// Prefix of every parameter and variable name (`$user`).
pub const VARIABLE_MARKER: char = '$';

/// PHP namespace separator.  A leading one marks a fully-qualified name.
pub const NAMESPACE_SEPARATOR: char = '\\';

/// Strip every leading `marker` from `value` and prepend exactly one.
///
///   - `normalize_marker("param", '@')`   → `"@param"`
///   - `normalize_marker("@@param", '@')` → `"@param"`
///   - `normalize_marker("$id", '$')`     → `"$id"`
pub fn normalize_marker(value: &str, marker: char) -> String {
    let stripped = value.trim_start_matches(marker);
    let mut normalized = String::with_capacity(stripped.len() + marker.len_utf8());
    normalized.push(marker);
    normalized.push_str(stripped);
    normalized
}

/// Mark a namespaced type name as fully qualified.
///
/// Names containing a namespace separator end up with exactly one leading
/// `\`.  Unqualified names (`int`, `User`) are returned verbatim; resolving
/// them against a namespace is the caller's business.
pub fn to_fully_qualified(type_name: &str) -> String {
    if type_name.contains(NAMESPACE_SEPARATOR) {
        normalize_marker(type_name, NAMESPACE_SEPARATOR)
    } else {
        type_name.to_string()
    }
}

/// Strip any leading namespace separators (`\App\User` → `App\User`).
pub(crate) fn strip_leading_separator(type_name: &str) -> &str {
    type_name.trim_start_matches(NAMESPACE_SEPARATOR)
}
