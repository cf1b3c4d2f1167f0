use std::env;
use std::path::Path;

/// Lowercased extension of `p`, if any.
pub fn extension_of<P: AsRef<Path>>(p: P) -> Option<String> {
    p.as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

/// Replaces anything that is not safe inside a file name with `_`.
pub fn sanitize_file_component(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

// CC BY-SA 3.0
// Adapted from https://stackoverflow.com/a/35046243
pub fn is_program_in_path<P: AsRef<Path>>(program: P) -> bool {
    let program = program.as_ref();
    if program.components().count() > 1 {
        return program.is_file();
    }
    if let Some(path) = env::var_os("PATH") {
        for p in env::split_paths(&path) {
            if std::fs::metadata(p.join(program)).is_ok() {
                return true;
            }
        }
    }
    false
}
