/// Substituted for a leading character that cannot start an identifier.
pub const PLACEHOLDER_PREFIX: &str = "pkg";

/// Turn an arbitrary project or entity name into a package-safe identifier.
///
/// The first character must be an ASCII letter, otherwise it is replaced by
/// [`PLACEHOLDER_PREFIX`]. After that ASCII alphanumerics are kept, `-`, `_`
/// and spaces become `_`, and everything else is dropped. Total over every
/// input: the result is never empty and always starts with a letter.
pub fn sanitize_identifier(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + PLACEHOLDER_PREFIX.len());
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => out.push(c),
        _ => out.push_str(PLACEHOLDER_PREFIX),
    }
    for c in chars {
        if c.is_ascii_alphanumeric() {
            out.push(c);
        } else if matches!(c, '-' | '_' | ' ') {
            out.push('_');
        }
    }
    out
}
