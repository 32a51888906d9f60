//! Text synthesis for served and published scripts.

/// Marker replaced with the caller's key when a script is served
pub const KEY_PLACEHOLDER: &str = "%KEY%";

/// Replace the first placeholder occurrence with `key`.
pub fn substitute_key(content: &str, key: &str) -> String {
    content.replacen(KEY_PLACEHOLDER, key, 1)
}

/// Wrap an ad-hoc code fragment under a comment naming the key.
pub fn custom_script(key: &str, code: &str) -> String {
    format!("-- Custom script with key: {}\n\n{}", key, code)
}

/// True when every `%` starts a `%XX` escape with two hex digits.
pub fn is_well_formed_escapes(text: &str) -> bool {
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = bytes.get(i + 1..i + 3);
            if !hex.is_some_and(|h| h.iter().all(u8::is_ascii_hexdigit)) {
                return false;
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    true
}

/// Optional descriptive fields supplied on publish
#[derive(Debug, Default, Clone)]
pub struct ScriptMetadata<'a> {
    pub name: Option<&'a str>,
    pub author: Option<&'a str>,
    pub version: Option<&'a str>,
}

const DEFAULT_CODE: &str = "-- Empty script\nprint(\"Hello world!\")";

/// Build the stored body of a published script: metadata header, host
/// banner, a placeholder line for the key, then the code.
pub fn published_script(id: &str, host: &str, meta: &ScriptMetadata<'_>, code: Option<&str>) -> String {
    format!(
        "--[[    Script: {name}\n    Author: {author}\n    Version: {version}\n    ID: {id}\n]]\n\n\
         -- This script is hosted on {host}\n-- Your key: {placeholder}\n\n{code}",
        name = non_empty(meta.name).unwrap_or("Unnamed"),
        author = non_empty(meta.author).unwrap_or("Unknown"),
        version = non_empty(meta.version).unwrap_or("1.0.0"),
        id = id,
        host = host,
        placeholder = KEY_PLACEHOLDER,
        code = non_empty(code).unwrap_or(DEFAULT_CODE),
    )
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
