use std::fs;
use std::path::Path;

/// Extract the module path from go.mod content (the `module` line).
pub fn parse_module_path(content: &str) -> Option<String> {
    for line in content.lines() {
        let line = line.trim();
        if line.starts_with("//") {
            continue;
        }
        let mut parts = line.split_whitespace();
        if parts.next() == Some("module") {
            if let Some(path) = parts.next() {
                return Some(path.trim_matches('"').to_string());
            }
        }
    }
    None
}

/// Walk up from `start` (a file or directory) looking for a go.mod
/// and return its module path. Used to default the local-package
/// prefix when none is given.
pub fn find_module_path(start: &Path) -> Option<String> {
    let mut dir = if start.is_dir() {
        start
    } else {
        start.parent()?
    };

    loop {
        let gomod = dir.join("go.mod");
        if gomod.is_file() {
            let content = fs::read_to_string(&gomod).ok()?;
            return parse_module_path(&content);
        }
        dir = dir.parent()?;
    }
}
