//! Extension-based source file classification

/// Language reported for paths outside the extension table
pub const UNKNOWN_LANGUAGE: &str = "Unknown";

/// Lower-cased text after the last `.` of `path`, if any.
fn extension(path: &str) -> Option<String> {
    path.rfind('.')
        .map(|idx| path[idx + 1..].to_ascii_lowercase())
}

/// Canonical language for a lower-cased extension.
fn language_for(ext: &str) -> Option<&'static str> {
    let lang = match ext {
        "go" => "Go",
        "py" => "Python",
        "js" => "JavaScript",
        "ts" => "TypeScript",
        "java" => "Java",
        "cpp" | "cc" | "cxx" => "C++",
        "c" => "C",
        "cs" => "C#",
        "rb" => "Ruby",
        "php" => "PHP",
        "rs" => "Rust",
        "kt" => "Kotlin",
        "swift" => "Swift",
        "scala" => "Scala",
        "r" => "R",
        "m" => "Objective-C",
        "h" => "C/C++ Header",
        "hpp" => "C++ Header",
        _ => return None,
    };
    Some(lang)
}

/// Whether `path` names a source file worth sampling.
#[must_use]
pub fn is_code_file(path: &str) -> bool {
    extension(path).is_some_and(|ext| language_for(&ext).is_some())
}

/// Language name for `path`, or [`UNKNOWN_LANGUAGE`].
#[must_use]
pub fn detect_language(path: &str) -> &'static str {
    extension(path)
        .and_then(|ext| language_for(&ext))
        .unwrap_or(UNKNOWN_LANGUAGE)
}

/// Both answers at once.
#[must_use]
pub fn classify(path: &str) -> (bool, &'static str) {
    let language = detect_language(path);
    (language != UNKNOWN_LANGUAGE, language)
}
