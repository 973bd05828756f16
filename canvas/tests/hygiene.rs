//! Hygiene: coding standards for the editor core, checked at test time.
//!
//! Every rule scans the non-test sources under `canvas/src/` for a pattern
//! and holds it to a budget. The budgets are zero. The core never panics on
//! bad input, never swallows an error without looking at it, and never does
//! its own I/O: the `designer` host reads files and the core logs through
//! `tracing`.

use std::fs;
use std::path::Path;

struct Rule {
    name: &'static str,
    pattern: &'static str,
    budget: usize,
}

const PANICS: &[Rule] = &[
    Rule { name: "unwrap", pattern: ".unwrap()", budget: 0 },
    Rule { name: "expect", pattern: ".expect(", budget: 0 },
    Rule { name: "panic", pattern: "panic!(", budget: 0 },
    Rule { name: "unreachable", pattern: "unreachable!(", budget: 0 },
    Rule { name: "todo", pattern: "todo!(", budget: 0 },
    Rule { name: "unimplemented", pattern: "unimplemented!(", budget: 0 },
];

const SILENT_LOSS: &[Rule] = &[
    Rule { name: "let-underscore", pattern: "let _ =", budget: 0 },
    Rule { name: "dot-ok", pattern: ".ok()", budget: 0 },
    Rule { name: "allow-dead-code", pattern: "#[allow(dead_code)]", budget: 0 },
];

const SIDE_CHANNELS: &[Rule] = &[
    Rule { name: "println", pattern: "println!(", budget: 0 },
    Rule { name: "dbg", pattern: "dbg!(", budget: 0 },
    Rule { name: "std-fs", pattern: "std::fs", budget: 0 },
    Rule { name: "std-net", pattern: "std::net", budget: 0 },
];

struct SourceFile {
    path: String,
    content: String,
}

/// Production `.rs` files under `src/`, without the sibling `_test.rs` files.
fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect(Path::new("src"), &mut files);
    assert!(!files.is_empty(), "no sources found; run from the canvas crate root");
    files
}

fn collect(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect(&path, out);
            continue;
        }
        let path_str = path.to_string_lossy().to_string();
        if !path_str.ends_with(".rs") || path_str.ends_with("_test.rs") {
            continue;
        }
        if let Ok(content) = fs::read_to_string(&path) {
            out.push(SourceFile { path: path_str, content });
        }
    }
}

/// Per-file line counts for a pattern, skipping files with no hits.
fn hits(files: &[SourceFile], pattern: &str) -> Vec<(String, usize)> {
    files
        .iter()
        .map(|f| (f.path.clone(), f.content.lines().filter(|l| l.contains(pattern)).count()))
        .filter(|(_, n)| *n > 0)
        .collect()
}

fn check(rules: &[Rule]) {
    let files = source_files();
    let mut failures = Vec::new();
    for rule in rules {
        let found = hits(&files, rule.pattern);
        let count: usize = found.iter().map(|(_, n)| n).sum();
        if count > rule.budget {
            let detail: Vec<String> = found.iter().map(|(p, n)| format!("    {p}: {n}")).collect();
            failures.push(format!(
                "  {} ({:?}): found {count}, budget {}\n{}",
                rule.name,
                rule.pattern,
                rule.budget,
                detail.join("\n")
            ));
        }
    }
    assert!(failures.is_empty(), "hygiene budget exceeded:\n{}", failures.join("\n"));
}

#[test]
fn no_panic_paths() {
    check(PANICS);
}

#[test]
fn no_silent_loss() {
    check(SILENT_LOSS);
}

#[test]
fn no_side_channels() {
    check(SIDE_CHANNELS);
}

#[test]
fn rules_have_distinct_names() {
    let mut names: Vec<&str> = PANICS.iter().chain(SILENT_LOSS).chain(SIDE_CHANNELS).map(|r| r.name).collect();
    let total = names.len();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), total);
}
