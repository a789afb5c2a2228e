//! Identifier rules shared by project and module names.

/// Whether `s` is a well-formed identifier.
///
/// Identifiers start with an ASCII letter or `_` and continue with ASCII
/// alphanumerics or `_`. Project names and module names both follow this
/// rule, since a project always contributes a module of the same name.
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
