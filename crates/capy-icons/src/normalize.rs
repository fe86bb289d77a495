//! Icon identifier normalization.
//!
//! Tray items hand us icon names in several shapes: plain theme names,
//! absolute paths, URIs, and the `name?path=<dir>` encoding used by
//! StatusNotifierItem hosts that ship icons next to the binary.

/// Prefixes that mark a value as an already loadable resource.
pub const RESOURCE_SCHEMES: [&str; 4] = ["image://", "file://", "qrc:/", "data:"];

const PATH_MARKER: &str = "?path=";

/// Returns true if `value` starts with one of [`RESOURCE_SCHEMES`], ignoring case.
pub fn has_resource_scheme(value: &str) -> bool {
    RESOURCE_SCHEMES.iter().any(|scheme| {
        value
            .get(..scheme.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(scheme))
    })
}

/// Returns true if `value` can be handed to the UI without a theme lookup:
/// it carries a resource scheme or is an absolute path.
///
/// Does not decode `?path=` values.
pub fn is_direct_resource(value: &str) -> bool {
    has_resource_scheme(value) || value.starts_with('/')
}

/// Turn a raw identifier into its canonical form.
///
/// - empty stays empty
/// - URIs (`image://`, `file://`, `qrc:/`, `data:`) are returned unchanged
/// - `name?path=/dir` becomes `file:///dir/name`; a value with more than one
///   `?path=` marker is left alone
/// - `/abs/path` becomes `file:///abs/path`
/// - anything else is a theme name and is returned unchanged
///
/// Normalizing twice gives the same result as normalizing once.
pub fn normalize(identifier: &str) -> String {
    if identifier.is_empty() || has_resource_scheme(identifier) {
        return identifier.to_string();
    }

    if identifier.contains(PATH_MARKER) {
        let parts: Vec<&str> = identifier.split(PATH_MARKER).collect();
        return match parts.as_slice() {
            [name, dir] => {
                let tail = name.rsplit('/').next().unwrap_or(name);
                format!("file://{dir}/{tail}")
            }
            _ => identifier.to_string(),
        };
    }

    if identifier.starts_with('/') {
        return format!("file://{identifier}");
    }

    identifier.to_string()
}
