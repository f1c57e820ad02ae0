/// Normalizes free text into a URL-safe slug.
///
/// ASCII letters are lowercased. ASCII alphanumerics and `_` are kept. Any
/// run of other characters, `-` included, becomes a single `-`, and the
/// result never starts or ends with `-`. Non-ASCII text is not
/// transliterated; it is treated like any other separator run.
///
/// ```
/// use encoded_id::parameterize;
///
/// assert_eq!(parameterize("Jane Doe"), "jane-doe");
/// assert_eq!(parameterize("  My -- Product!! "), "my-product");
/// assert_eq!(parameterize("snake_case"), "snake_case");
/// assert_eq!(parameterize("***"), "");
/// ```
pub fn parameterize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_dash = false;
    for ch in input.chars() {
        if ch.is_ascii_alphanumeric() || ch == '_' {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(ch.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    out
}

/// Converts a type name such as `MyModel` or `admin::HTTPRequest` into
/// `my_model` / `admin/http_request`.
pub fn snake_case(type_name: &str) -> String {
    let name = type_name.replace("::", "/");
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    for (i, &ch) in chars.iter().enumerate() {
        if ch.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|c| c.is_lowercase());
            if prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_is_lower)
            {
                out.push('_');
            }
        }
        out.extend(ch.to_lowercase());
    }
    out.replace('-', "_")
}
