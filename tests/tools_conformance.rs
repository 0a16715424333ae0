//! End-to-end tool calls through the registry's JSON boundary.

use std::fs;
use std::path::Path;

use fskit::{Session, ToolContext, ToolRegistry};
use serde_json::json;
use tempfile::{tempdir, TempDir};

const THREE_LINES: &str = "Line 1\nLine 2\nLine 3\n";

struct Harness {
    dir: TempDir,
    registry: ToolRegistry,
    session: Session,
}

impl Harness {
    fn new() -> Self {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("test.txt"), THREE_LINES).unwrap();
        let session = Session::new(ToolContext::new(dir.path()));
        Self {
            dir,
            registry: ToolRegistry::new(),
            session,
        }
    }

    fn call(&mut self, tool: &str, args: serde_json::Value) -> String {
        self.registry
            .execute(&mut self.session, tool, &args.to_string())
    }

    fn edit(&mut self, args: serde_json::Value) -> String {
        self.call("text_editor", args)
    }

    fn read(&self, name: &str) -> String {
        fs::read_to_string(self.dir.path().join(name)).unwrap()
    }

    fn root(&self) -> &Path {
        self.dir.path()
    }
}

#[test]
fn scenario_a_view_numbers_every_line() {
    let mut h = Harness::new();
    let out = h.edit(json!({"operation": "view", "file_path": "test.txt"}));

    assert!(out.contains("(lines 1-3 of 3)"), "{out}");
    assert!(out.contains("   1 | Line 1"));
    assert!(out.contains("   2 | Line 2"));
    assert!(out.ends_with("   3 | Line 3"), "{out}");
}

#[test]
fn scenario_b_replace_then_view() {
    let mut h = Harness::new();
    let out = h.edit(json!({
        "operation": "str_replace",
        "file_path": "test.txt",
        "old_str": "Line 1",
        "new_str": "Modified Line 1",
    }));
    assert!(out.starts_with("Success: Replaced 1 occurrence "), "{out}");

    let out = h.edit(json!({"operation": "view", "file_path": "test.txt"}));
    assert!(out.contains("   1 | Modified Line 1"), "{out}");
}

#[test]
fn scenario_c_insert_shifts_following_lines() {
    let mut h = Harness::new();
    let out = h.edit(json!({
        "operation": "insert",
        "file_path": "test.txt",
        "line_number": 2,
        "content": "New Line\n",
    }));
    assert!(out.ends_with("(now 4 lines)"), "{out}");

    let out = h.edit(json!({
        "operation": "view",
        "file_path": "test.txt",
        "start_line": 2,
        "end_line": 3,
    }));
    assert!(out.contains("   2 | New Line\n   3 | Line 2"), "{out}");
}

#[test]
fn scenario_d_search_is_capped() {
    let mut h = Harness::new();
    let out = h.call("grep", json!({"pattern": "Line", "path": "test.txt", "max_results": 2}));

    assert!(out.contains("   1: Line 1"), "{out}");
    assert!(out.contains("   2: Line 2"), "{out}");
    assert!(!out.contains("Line 3"), "{out}");
    assert!(out.ends_with("(Showing first 2 matches, more results may exist)"), "{out}");
}

#[test]
fn scenario_e_create_never_overwrites() {
    let mut h = Harness::new();
    let out = h.edit(json!({"operation": "create", "file_path": "test.txt", "content": "x"}));

    assert!(out.starts_with("Error: File '"), "{out}");
    assert!(out.contains("already exists"), "{out}");
    assert_eq!(h.read("test.txt"), THREE_LINES);
}

#[test]
fn tree_and_listing_report_counts() {
    let mut h = Harness::new();
    fs::create_dir_all(h.root().join("src/nested")).unwrap();
    fs::write(h.root().join("src/lib.rs"), "").unwrap();
    fs::create_dir(h.root().join(".git")).unwrap();
    fs::create_dir(h.root().join("node_modules")).unwrap();

    let out = h.call("tree", json!({}));
    assert!(out.ends_with("\n\n2 directories, 2 files"), "{out}");
    assert!(!out.contains("node_modules"));

    let out = h.call("ls", json!({"recursive": true}));
    assert!(out.starts_with("Contents of '.':"), "{out}");
    assert!(out.contains("  lib.rs"), "{out}");
    assert!(out.ends_with("2 directories, 2 files"), "{out}");
}

#[test]
fn missing_arguments_fail_before_touching_files() {
    let mut h = Harness::new();

    let out = h.edit(json!({"operation": "create", "file_path": "new.txt"}));
    assert_eq!(out, "Error: 'content' parameter is required");
    assert!(!h.root().join("new.txt").exists());

    let out = h.edit(json!({"operation": "str_replace", "file_path": "test.txt", "old_str": "Line"}));
    assert_eq!(out, "Error: 'new_str' parameter is required");
    assert_eq!(h.read("test.txt"), THREE_LINES);
}

#[test]
fn error_kinds_are_named() {
    let mut h = Harness::new();
    fs::create_dir(h.root().join("sub")).unwrap();
    fs::write(h.root().join("blob.bin"), [0xff, 0xfe, 0x00]).unwrap();

    let out = h.edit(json!({"operation": "view", "file_path": "sub"}));
    assert!(out.contains("is a directory, not a file"), "{out}");

    let out = h.edit(json!({"operation": "view", "file_path": "blob.bin"}));
    assert!(out.contains("not a text file"), "{out}");

    let out = h.call("ls", json!({"path": "test.txt"}));
    assert!(out.contains("is not a directory"), "{out}");

    let out = h.call("grep", json!({"pattern": "("}));
    assert!(out.starts_with("Error: Invalid regex pattern '('"), "{out}");

    let out = h.edit(json!({"operation": "view", "file_path": "test.txt", "start_line": 9}));
    assert!(out.contains("exceeds file length"), "{out}");

    let out = h.edit(json!({
        "operation": "str_replace",
        "file_path": "test.txt",
        "old_str": "absent",
        "new_str": "x",
    }));
    assert!(out.contains("not found"), "{out}");
}

#[test]
fn schemas_cover_every_tool() {
    let registry = ToolRegistry::new();
    let schemas = registry.schemas();
    let names: Vec<_> = schemas
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, ["ls", "tree", "grep", "text_editor", "bash", "todo"]);
}
