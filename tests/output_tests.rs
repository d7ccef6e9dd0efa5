use pretty_assertions::assert_eq;
use stacktrace_tree::aggregator::{build_collapsed_stacks, calculate_hot_paths};
use stacktrace_tree::model::{
    Frame, FrameCategorization, FrameSeparator, FrameType, Method, Package, StackTrace,
    StacktraceModel, TraversalDirection, TypeRef,
};
use stacktrace_tree::output::{
    build_report, read_report, report_to_string, write_collapsed, write_report, write_svg,
};
use stacktrace_tree::utils::config::SCHEMA_VERSION;
use stacktrace_tree::utils::OutputError;
use std::rc::Rc;
use tempfile::NamedTempFile;

fn trace(names: &[&str]) -> StackTrace {
    let ty = Rc::new(TypeRef::new(Rc::new(Package::new("p")), "T"));
    let frames = names
        .iter()
        .map(|n| Frame::new(Rc::new(Method::new(ty.clone(), *n, "")), None, None, FrameType::Native))
        .collect();
    StackTrace::new(frames, false)
}

fn create_test_model() -> StacktraceModel<StackTrace> {
    StacktraceModel::new(
        TraversalDirection::TopFrameFirst,
        FrameSeparator::new(FrameCategorization::Method, false),
        vec![
            trace(&["A", "B", "C"]),
            trace(&["A", "B", "D"]),
            trace(&["A", "E"]),
        ],
    )
}

#[test]
fn test_build_report_structure() {
    let model = create_test_model();
    let stacks = build_collapsed_stacks(&model, None);
    let report = build_report(&model, calculate_hot_paths(&stacks, 5), 10);

    assert_eq!(report.version, SCHEMA_VERSION);
    assert_eq!(report.total_items, 3);
    assert_eq!(report.hot_paths.len(), 3);

    let a = &report.root.branches[0];
    assert_eq!(a.frame, "p.T.A()");
    assert_eq!(a.item_count, 3);
    assert!(a.tail.is_empty());

    let after_a = a.end_fork.as_ref().unwrap();
    assert_eq!(after_a.frame_index, 1);
    let frames: Vec<&str> = after_a.branches.iter().map(|b| b.frame.as_str()).collect();
    assert_eq!(frames, vec!["p.T.B()", "p.T.E()"]);
    assert_eq!(after_a.branches[1].item_offset, 2);

    // dead end: no end fork, not depth limited
    assert!(after_a.branches[1].end_fork.is_none());
    assert!(!after_a.branches[1].depth_limited);
}

#[test]
fn test_build_report_depth_limit() {
    let model = create_test_model();
    let report = build_report(&model, Vec::new(), 0);

    let a = &report.root.branches[0];
    assert!(a.end_fork.is_none());
    assert!(a.depth_limited);
}

#[test]
fn test_build_report_depth_limit_skips_dead_ends() {
    let model = create_test_model();
    let report = build_report(&model, Vec::new(), 1);

    let after_a = report.root.branches[0].end_fork.as_ref().unwrap();
    let b = &after_a.branches[0];
    assert_eq!(b.frame, "p.T.B()");
    assert!(b.end_fork.is_none());
    assert!(b.depth_limited);

    let e = &after_a.branches[1];
    assert_eq!(e.frame, "p.T.E()");
    assert!(e.end_fork.is_none());
    assert!(!e.depth_limited);
}

#[test]
fn test_write_collapsed_with_jvm_descriptors() {
    let ty = Rc::new(TypeRef::new(Rc::new(Package::new("java.lang")), "Thread"));
    let method = |name: &str| Rc::new(Method::new(ty.clone(), name, "(Ljava/lang/String;)V"));
    let frames = vec![
        Frame::new(method("sleep"), None, None, FrameType::Native),
        Frame::new(method("run"), None, None, FrameType::Interpreted),
    ];
    let model = StacktraceModel::new(
        TraversalDirection::ThreadRootAtTop,
        FrameSeparator::new(FrameCategorization::Method, false),
        vec![StackTrace::new(frames, false)],
    );
    let temp_file = NamedTempFile::new().unwrap();

    write_collapsed(&build_collapsed_stacks(&model, None), temp_file.path()).unwrap();

    let content = std::fs::read_to_string(temp_file.path()).unwrap();
    assert_eq!(
        content,
        "java.lang.Thread.run((Ljava/lang/String:)V);java.lang.Thread.sleep((Ljava/lang/String:)V) 1\n"
    );
}

#[test]
fn test_write_and_read_report() {
    let model = create_test_model();
    let report = build_report(&model, Vec::new(), 10);
    let temp_file = NamedTempFile::new().unwrap();

    write_report(&report, temp_file.path()).unwrap();
    let loaded = read_report(temp_file.path()).unwrap();

    assert_eq!(loaded, report);
}

#[test]
fn test_report_to_string_omits_empty_fields() {
    let model = create_test_model();
    let json = report_to_string(&build_report(&model, Vec::new(), 10)).unwrap();

    assert!(json.contains("\"total_items\": 3"));
    assert!(!json.contains("depth_limited"));
}

#[test]
fn test_write_creates_parent_dirs() {
    let temp_dir = tempfile::tempdir().unwrap();
    let nested_path = temp_dir.path().join("nested/dirs/report.json");

    let model = create_test_model();
    write_report(&build_report(&model, Vec::new(), 2), &nested_path).unwrap();

    assert!(nested_path.exists());
}

#[test]
fn test_write_report_to_directory_fails() {
    let temp_dir = tempfile::tempdir().unwrap();
    let model = create_test_model();
    let result = write_report(&build_report(&model, Vec::new(), 2), temp_dir.path());

    assert!(matches!(result, Err(OutputError::InvalidPath(_))));
}

#[test]
fn test_write_collapsed() {
    let model = create_test_model();
    let stacks = build_collapsed_stacks(&model, None);
    let temp_file = NamedTempFile::new().unwrap();

    write_collapsed(&stacks, temp_file.path()).unwrap();

    let content = std::fs::read_to_string(temp_file.path()).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(
        lines,
        vec![
            "p.T.A();p.T.B();p.T.C() 1",
            "p.T.A();p.T.B();p.T.D() 1",
            "p.T.A();p.T.E() 1",
        ]
    );
}

#[test]
fn test_write_svg() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("out/flamegraph.svg");

    write_svg("<svg xmlns=\"http://www.w3.org/2000/svg\"></svg>", &path).unwrap();
    assert!(path.exists());

    let result = write_svg("plain text", temp_dir.path().join("bad.svg"));
    assert!(matches!(result, Err(OutputError::InvalidSvg(_))));
}
