/// Turns a raw `Set-Cookie` value into a string ready for a `Cookie` header.
///
/// Transports fold repeated `Set-Cookie` headers into one value joined with
/// commas, so the value is split on `,`, only the leading `name=value` pair of
/// each directive is kept, and the pairs are rejoined with `"; "`. Empty
/// fragments are kept, so `"a=1, "` becomes `"a=1; "`.
///
/// A comma inside a cookie value or an `Expires` date also splits the
/// directive. The trailing half then survives as a bogus pair.
pub fn normalize_cookie(raw: &str) -> String {
    raw.split(',')
        .filter_map(|directive| directive.split(';').next())
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("; ")
}
