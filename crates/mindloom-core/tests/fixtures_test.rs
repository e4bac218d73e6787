use mindloom_core::{OutlineNode, parse_outline};
use std::path::{Path, PathBuf};

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..")
}

fn read_fixture(name: &str) -> String {
    let path = workspace_root().join("fixtures").join("outline").join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("read {}: {e}", path.display()))
}

fn child_titles(node: &OutlineNode) -> Vec<&str> {
    node.children.iter().map(|c| c.title.as_str()).collect()
}

#[test]
fn study_notes_wrap_top_level_bullets_under_heading() {
    let root = parse_outline(&read_fixture("study_notes.md")).expect("outline");
    assert_eq!(root.title, "Ownership in Rust");
    assert_eq!(
        child_titles(&root),
        ["Ownership rules", "Borrowing", "Lifetimes", "Smart pointers"]
    );
    let borrowing = &root.children[1];
    assert_eq!(
        child_titles(borrowing),
        ["Shared references (&T)", "Mutable references (&mut T)"]
    );
    assert_eq!(root.node_count(), 18);
    assert_eq!(root.max_depth(), 3);
}

#[test]
fn single_root_fixture_collapses_wrapper() {
    let root = parse_outline(&read_fixture("single_root.md")).expect("outline");
    assert_eq!(root.title, "Release checklist");
    assert_eq!(root.children.len(), 4);
    assert_eq!(
        child_titles(&root.children[2]),
        ["Linux", "macOS", "Windows"]
    );
}

#[test]
fn messy_fixture_is_cleaned_and_nested() {
    let root = parse_outline(&read_fixture("messy.md")).expect("outline");
    assert_eq!(root.title, "Weekly sync — agenda");
    assert_eq!(
        child_titles(&root),
        ["Roadmap", "Incidents", "Follow-ups &"]
    );
    assert_eq!(child_titles(&root.children[0]), ["Q3 goals", "Hiring plan"]);
    assert_eq!(child_titles(&root.children[0].children[1]), ["Budget"]);
}

#[test]
fn prose_fixture_has_no_structure() {
    assert!(parse_outline(&read_fixture("prose.md")).is_none());
}

#[test]
fn outline_serializes_without_empty_children() {
    let root = parse_outline("- A\n  - B").expect("outline");
    let json = serde_json::to_string(&root).expect("json");
    assert_eq!(json, r#"{"title":"A","children":[{"title":"B"}]}"#);
}
