//! Source hygiene for the ink engine.
//!
//! Scans `src/` (skipping `*_test.rs`) for patterns that crash the host or
//! drop errors on the floor. Every budget is zero; a new hit means fixing
//! the code, not raising the number.

use std::fs;
use std::path::{Path, PathBuf};

struct SourceFile {
    path: String,
    content: String,
}

fn source_files() -> Vec<SourceFile> {
    let mut paths = Vec::new();
    walk(Path::new("src"), &mut paths);
    paths
        .into_iter()
        .filter_map(|path| {
            let content = fs::read_to_string(&path).ok()?;
            Some(SourceFile { path: path.to_string_lossy().into_owned(), content })
        })
        .collect()
}

fn walk(dir: &Path, out: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for path in entries.flatten().map(|e| e.path()) {
        if path.is_dir() {
            walk(&path, out);
        } else if path.extension().is_some_and(|e| e == "rs")
            && !path.file_name().is_some_and(|n| n.to_string_lossy().ends_with("_test.rs"))
        {
            out.push(path);
        }
    }
}

/// Lines containing `pattern`, as `path:line` locations.
fn hits(files: &[SourceFile], pattern: &str) -> Vec<String> {
    files
        .iter()
        .flat_map(|file| {
            file.content
                .lines()
                .enumerate()
                .filter(|(_, line)| line.contains(pattern))
                .map(|(i, _)| format!("  {}:{}", file.path, i + 1))
                .collect::<Vec<_>>()
        })
        .collect()
}

fn check_budget(pattern: &str, max: usize) {
    let found = hits(&source_files(), pattern);
    assert!(
        found.len() <= max,
        "`{pattern}` budget exceeded: found {}, max {max}.\n{}",
        found.len(),
        found.join("\n")
    );
}

macro_rules! budget {
    ($name:ident, $pattern:expr, $max:expr) => {
        #[test]
        fn $name() {
            check_budget($pattern, $max);
        }
    };
}

// Panics.
budget!(unwrap_budget, ".unwrap()", 0);
budget!(expect_budget, ".expect(", 0);
budget!(panic_budget, "panic!(", 0);
budget!(unreachable_budget, "unreachable!(", 0);
budget!(todo_budget, "todo!(", 0);
budget!(unimplemented_budget, "unimplemented!(", 0);

// Silent loss.
budget!(silent_discard_budget, "let _ =", 0);
budget!(dot_ok_budget, ".ok()", 0);

// Output goes through `tracing`, never straight to the console.
budget!(println_budget, "println!(", 0);
budget!(eprintln_budget, "eprintln!(", 0);
budget!(dbg_budget, "dbg!(", 0);

// Structure.
budget!(allow_dead_code_budget, "#[allow(dead_code)]", 0);

#[test]
fn scan_finds_sources() {
    let files = source_files();
    assert!(files.iter().any(|f| f.path.ends_with("lib.rs")), "hygiene scan found no sources");
    assert!(files.iter().all(|f| !f.path.ends_with("_test.rs")));
}
