//! Line-capped file reading for menu popups.

use std::fs;
use std::path::Path;

use tracing::warn;

/// Reads a text file, keeping at most `max_lines` lines.
///
/// Menu entries point at README-sized files; a missing or unreadable file
/// yields a placeholder message rather than an error so the popup can still
/// open.
pub fn read_file(path: impl AsRef<Path>, max_lines: usize) -> String {
    let path = path.as_ref();
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) => {
            warn!(path = %path.display(), %err, "failed to read menu file");
            return format!("Unable to read {}", path.display());
        }
    };

    let mut lines: Vec<&str> = contents.lines().take(max_lines).collect();
    let truncated = contents.lines().nth(max_lines).is_some();
    if truncated {
        lines.push("...");
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_and_caps_lines() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        for i in 0..10 {
            writeln!(file, "line {i}").expect("write");
        }

        let text = read_file(file.path(), 3);
        assert_eq!(text, "line 0\nline 1\nline 2\n...");

        let all = read_file(file.path(), 100);
        assert!(all.ends_with("line 9"));
    }

    #[test]
    fn missing_file_yields_placeholder() {
        let text = read_file("/definitely/not/here.md", 10);
        assert!(text.starts_with("Unable to read"));
    }
}
