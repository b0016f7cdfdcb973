//! Integration tests for excerpt rendering against real files.
//!
//! These tests verify window clipping at file boundaries, the shared gutter,
//! failing-column highlighting, and the silent dropping of missing sources.

use std::fs;
use std::path::{Path, PathBuf};

use excerpt::{
    CallSkipList, FileSkipList, LineColumn, RawStack, Renderer, StackFrame, parse_raw_stack,
};
use regex::Regex;
use tempfile::TempDir;

fn strip(text: &str) -> String {
    Regex::new(r"\x1b\[[0-9;]*m")
        .expect("valid pattern")
        .replace_all(text, "")
        .into_owned()
}

fn source_with_lines(dir: &TempDir, name: &str, count: usize) -> PathBuf {
    let path = dir.path().join(name);
    let body: String = (1..=count).map(|n| format!("line {n} body\n")).collect();
    fs::write(&path, body).expect("write source");
    path
}

fn frame_at(path: &Path, row: usize, column: usize) -> StackFrame {
    StackFrame::new(
        "caller",
        path,
        LineColumn::from_parts(row, column).expect("non-zero"),
    )
}

// ============================================================================
// Window Tests
// ============================================================================

/// Row 10 of a 20-line file shows lines 6 through 12.
#[test]
fn window_surrounds_failing_row() {
    colored::control::set_override(true);
    let dir = tempfile::tempdir().expect("temp dir");
    let path = source_with_lines(&dir, "twenty.js", 20);

    let rendered = Renderer::new().render(&[frame_at(&path, 10, 5)]);
    assert_eq!(rendered.len(), 1);
    assert_eq!(rendered.gutter_width(), 4);

    let frame = &rendered.frames()[0];
    let numbers: Vec<usize> = frame.excerpt_lines().iter().map(|l| l.line_number).collect();
    assert_eq!(numbers, vec![6, 7, 8, 9, 10, 11, 12]);
    assert_eq!(frame.excerpt_lines()[4].raw_text, "line 10 body");
}

/// The failing line is highlighted from its column onwards.
#[test]
fn failing_column_starts_highlight() {
    colored::control::set_override(true);
    let dir = tempfile::tempdir().expect("temp dir");
    let path = source_with_lines(&dir, "twenty.js", 20);

    let rendered = Renderer::new().render(&[frame_at(&path, 10, 5)]);
    let text = rendered.frames()[0].rendered_text();
    let failing = text
        .lines()
        .find(|line| strip(line).starts_with("10  "))
        .expect("failing line present");

    // "line 10 body": the highlight begins at the fifth character.
    let body_start = failing.find("line").expect("unstyled head");
    let head_end = failing[body_start..].find('\u{1b}').expect("styled tail") + body_start;
    assert_eq!(&failing[body_start..head_end], "line");
    assert!(strip(failing).ends_with("line 10 body"));
}

/// Rows near the top of the file never index before line 1.
#[test]
fn window_is_clipped_at_file_start() {
    colored::control::set_override(true);
    let dir = tempfile::tempdir().expect("temp dir");
    let path = source_with_lines(&dir, "short.js", 20);

    let rendered = Renderer::new().render(&[frame_at(&path, 2, 1)]);
    let numbers: Vec<usize> = rendered.frames()[0]
        .excerpt_lines()
        .iter()
        .map(|l| l.line_number)
        .collect();
    assert_eq!(numbers, vec![1, 2, 3, 4]);
}

/// Rows near the end of the file never fabricate lines.
#[test]
fn window_is_clipped_at_file_end() {
    colored::control::set_override(true);
    let dir = tempfile::tempdir().expect("temp dir");
    let path = source_with_lines(&dir, "tail.js", 8);

    let rendered = Renderer::new().render(&[frame_at(&path, 8, 1)]);
    let numbers: Vec<usize> = rendered.frames()[0]
        .excerpt_lines()
        .iter()
        .map(|l| l.line_number)
        .collect();
    assert_eq!(numbers, vec![4, 5, 6, 7, 8]);
}

/// A row past the end of the file keeps only the leading context that exists.
#[test]
fn row_beyond_end_keeps_existing_lines_only() {
    colored::control::set_override(true);
    let dir = tempfile::tempdir().expect("temp dir");
    let path = source_with_lines(&dir, "tiny.js", 3);

    let rendered = Renderer::new().render(&[frame_at(&path, 6, 1)]);
    let numbers: Vec<usize> = rendered.frames()[0]
        .excerpt_lines()
        .iter()
        .map(|l| l.line_number)
        .collect();
    assert_eq!(numbers, vec![2, 3]);
}

// ============================================================================
// Gutter Tests
// ============================================================================

/// Rows 7 and 142 share a gutter of width 5.
#[test]
fn gutter_is_shared_across_frames() {
    colored::control::set_override(true);
    let dir = tempfile::tempdir().expect("temp dir");
    let small = source_with_lines(&dir, "small.js", 10);
    let large = source_with_lines(&dir, "large.js", 150);

    let rendered = Renderer::new().render(&[frame_at(&small, 7, 1), frame_at(&large, 142, 1)]);
    assert_eq!(rendered.gutter_width(), 5);

    let first = strip(rendered.frames()[0].rendered_text());
    let second = strip(rendered.frames()[1].rendered_text());
    assert!(first.lines().any(|line| line.starts_with("7    line 7 body")));
    assert!(second.lines().any(|line| line.starts_with("142  line 142 body")));
}

/// Each frame starts with a `[file][row][col]` header.
#[test]
fn header_names_location() {
    colored::control::set_override(true);
    let dir = tempfile::tempdir().expect("temp dir");
    let path = source_with_lines(&dir, "header.js", 5);

    let rendered = Renderer::new().render(&[frame_at(&path, 3, 2)]);
    let text = strip(rendered.frames()[0].rendered_text());
    let header = text.lines().next().expect("header line");
    assert_eq!(header, format!("[{}][3][2]", path.display()));
}

// ============================================================================
// Missing Source Tests
// ============================================================================

/// Frames pointing at missing files are dropped and the rest still render.
#[test]
fn missing_sources_are_dropped() {
    colored::control::set_override(true);
    let dir = tempfile::tempdir().expect("temp dir");
    let present = source_with_lines(&dir, "present.js", 5);
    let missing = dir.path().join("missing.js");

    let rendered = Renderer::new().render(&[frame_at(&missing, 2, 1), frame_at(&present, 2, 1)]);
    assert_eq!(rendered.len(), 1);
    assert_eq!(rendered.frames()[0].frame().source_file(), present.as_path());
}

/// Directories are not sources.
#[test]
fn directory_frames_are_dropped() {
    let dir = tempfile::tempdir().expect("temp dir");
    let rendered = Renderer::new().render(&[frame_at(dir.path(), 1, 1)]);
    assert!(rendered.is_empty());
}

// ============================================================================
// Comment Dimming Tests
// ============================================================================

/// Context lines with comments are dimmed, failing lines are not.
#[test]
fn comments_are_dimmed_on_context_lines() {
    colored::control::set_override(true);
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("comments.js");
    fs::write(&path, "// header\nlet a = 1; /* note */\nfail();\n").expect("write source");

    let rendered = Renderer::new().render(&[frame_at(&path, 3, 1)]);
    let text = rendered.frames()[0].rendered_text();
    let lines: Vec<&str> = text.lines().collect();

    assert!(lines[1].contains("\u{1b}[2m// header"));
    assert!(lines[2].contains("\u{1b}[2m/* note */"));
    assert_eq!(strip(lines[3]), "3  fail();");
}

// ============================================================================
// Pipeline Tests
// ============================================================================

/// Parsing, file skipping, call skipping, and rendering compose.
#[test]
fn raw_stack_to_rendered_stack() {
    colored::control::set_override(true);
    let dir = tempfile::tempdir().expect("temp dir");
    let app = source_with_lines(&dir, "app.js", 30);
    let internal = source_with_lines(&dir, "internal.js", 30);

    let text = format!(
        "Error: boom\n    at Loggy.assert ({internal}:4:1)\n    at readConfig ({app}:20:3)\n    at hidden ({internal}:9:1)\n    at main ({app}:28:1)",
        app = app.display(),
        internal = internal.display(),
    );

    let skip_files: FileSkipList = [internal.clone()].into_iter().collect();
    let frames = skip_files.apply(parse_raw_stack(&text));
    assert_eq!(frames.len(), 2);

    let skip_calls: CallSkipList = ["main"].into_iter().collect();
    let rendered = Renderer::new().with_skip_calls(skip_calls).render(&frames);
    assert_eq!(rendered.len(), 1);
    assert_eq!(rendered.frames()[0].frame().call_site(), "readConfig");

    let whole = rendered.to_string();
    assert!(strip(&whole).contains("20  line 20 body"));
}

/// Small read chunks produce the same excerpt as the default chunk size.
#[test]
fn chunk_size_does_not_change_excerpt() {
    colored::control::set_override(true);
    let dir = tempfile::tempdir().expect("temp dir");
    let path = source_with_lines(&dir, "chunks.js", 40);
    let frames = vec![frame_at(&path, 25, 3)];

    let default = Renderer::new().render(&frames);
    let tiny = Renderer::new().with_chunk_size(7).render(&frames);
    assert_eq!(default, tiny);
}

/// Re-rendering a sliced stack drops the leading frames.
#[test]
fn sliced_raw_stack_renders_remaining_frames() {
    colored::control::set_override(true);
    let dir = tempfile::tempdir().expect("temp dir");
    let path = source_with_lines(&dir, "slice.js", 10);
    let text = format!(
        "Error: x\n    at inner ({p}:2:1)\n    at outer ({p}:6:1)",
        p = path.display()
    );

    let sliced = RawStack::parse(&text).skip_frames(1);
    let rendered = Renderer::new().render(&sliced.frames());
    assert_eq!(rendered.len(), 1);
    assert_eq!(rendered.frames()[0].frame().call_site(), "outer");
}
