use pretty_assertions::assert_eq;
use stacktrace_tree::model::{
    frame_text, CategoryKey, Frame, FrameCategorization, FrameSeparator, FrameType, Method,
    Package, TypeRef,
};
use std::collections::HashSet;
use std::rc::Rc;

const ALL: [FrameCategorization; 5] = [
    FrameCategorization::Bci,
    FrameCategorization::Line,
    FrameCategorization::Method,
    FrameCategorization::Class,
    FrameCategorization::Package,
];

fn frame_in(package: &str, type_name: &str, name: &str, line: u32, bci: u32, tier: FrameType) -> Frame {
    let ty = Rc::new(TypeRef::new(Rc::new(Package::new(package)), type_name));
    Frame::new(
        Rc::new(Method::new(ty, name, "I")),
        Some(line),
        Some(bci),
        tier,
    )
}

fn sample() -> Frame {
    frame_in("java.util", "HashMap", "get", 42, 7, FrameType::JitCompiled)
}

#[test]
fn test_is_separate_reflexive() {
    let frames = [sample(), Frame::unknown()];
    for categorization in ALL {
        for distinguish in [false, true] {
            let separator = FrameSeparator::new(categorization, distinguish);
            for frame in &frames {
                assert!(!separator.is_separate(frame, frame));
                assert!(separator.compare_details(frame, frame));
            }
        }
    }
}

#[test]
fn test_package_merges_classes_class_does_not() {
    let one = frame_in("java.util", "HashMap", "get", 1, 1, FrameType::Interpreted);
    let two = frame_in("java.util", "ArrayList", "get", 1, 1, FrameType::Interpreted);

    let by_package = FrameSeparator::new(FrameCategorization::Package, false);
    assert!(!by_package.is_separate(&one, &two));

    let by_class = FrameSeparator::new(FrameCategorization::Class, false);
    assert!(by_class.is_separate(&one, &two));
}

#[test]
fn test_line_and_bci_detail() {
    let base = sample();
    let other_line = frame_in("java.util", "HashMap", "get", 43, 7, FrameType::JitCompiled);
    let other_bci = frame_in("java.util", "HashMap", "get", 42, 9, FrameType::JitCompiled);

    let by_line = FrameSeparator::new(FrameCategorization::Line, false);
    assert!(by_line.is_separate(&base, &other_line));
    assert!(!by_line.is_separate(&base, &other_bci));

    let by_bci = FrameSeparator::new(FrameCategorization::Bci, false);
    assert!(by_bci.is_separate(&base, &other_bci));
    assert!(!by_bci.is_separate(&base, &other_line));

    let by_method = FrameSeparator::new(FrameCategorization::Method, false);
    assert!(!by_method.is_separate(&base, &other_line));
    assert!(!by_method.is_separate(&base, &other_bci));
}

#[test]
fn test_optimization_tier_detail() {
    let jit = sample();
    let interpreted = frame_in("java.util", "HashMap", "get", 42, 7, FrameType::Interpreted);

    for categorization in ALL {
        let plain = FrameSeparator::new(categorization, false);
        assert!(!plain.is_separate(&jit, &interpreted));

        let tiered = FrameSeparator::new(categorization, true);
        assert!(tiered.is_separate(&jit, &interpreted));
        assert!(!tiered.compare_details(&jit, &interpreted));
    }
}

#[test]
fn test_category_keys() {
    let frame = sample();

    let key = FrameSeparator::new(FrameCategorization::Package, false).category(&frame);
    assert_eq!(key, CategoryKey::Package(frame.package().clone()));

    let key = FrameSeparator::new(FrameCategorization::Class, false).category(&frame);
    assert_eq!(key, CategoryKey::Type(frame.declaring_type().clone()));

    for categorization in [FrameCategorization::Method, FrameCategorization::Line, FrameCategorization::Bci] {
        let key = FrameSeparator::new(categorization, false).category(&frame);
        assert_eq!(key, CategoryKey::Method(frame.method().clone()));
    }

    let key = FrameSeparator::new(FrameCategorization::Package, false).category(&Frame::unknown());
    assert_eq!(key, CategoryKey::Unknown);
}

#[test]
fn test_unknown_never_matches_lookalike() {
    let sentinel = Frame::unknown();
    let lookalike = Frame::new(sentinel.method().clone(), None, None, FrameType::Unknown);

    for categorization in ALL {
        let separator = FrameSeparator::new(categorization, false);
        assert!(separator.is_separate(&sentinel, &lookalike));
    }
}

#[test]
fn test_separator_value_equality() {
    let a = FrameSeparator::new(FrameCategorization::Line, true);
    let b = FrameSeparator::new(FrameCategorization::Line, true);
    let c = FrameSeparator::new(FrameCategorization::Line, false);

    assert_eq!(a, b);
    assert_ne!(a, c);

    let set: HashSet<FrameSeparator> = [a, b, c].into_iter().collect();
    assert_eq!(set.len(), 2);
    assert_eq!(FrameSeparator::default(), FrameSeparator::new(FrameCategorization::Method, false));
}

#[test]
fn test_frame_text_per_categorization() {
    let frame = sample();
    let text = |categorization, distinguish| {
        frame_text(&frame, &FrameSeparator::new(categorization, distinguish))
    };

    assert_eq!(text(FrameCategorization::Package, false), "java.util");
    assert_eq!(text(FrameCategorization::Class, false), "java.util.HashMap");
    assert_eq!(text(FrameCategorization::Method, false), "java.util.HashMap.get(I)");
    assert_eq!(text(FrameCategorization::Line, false), "java.util.HashMap.get(I):42");
    assert_eq!(text(FrameCategorization::Bci, false), "java.util.HashMap.get(I)@7");
    assert_eq!(
        text(FrameCategorization::Method, true),
        "java.util.HashMap.get(I) [JIT compiled]"
    );
}

#[test]
fn test_frame_text_special_cases() {
    let by_package = FrameSeparator::new(FrameCategorization::Package, false);
    let default_package = frame_in("", "Main", "run", 1, 0, FrameType::Interpreted);
    assert_eq!(frame_text(&default_package, &by_package), "(default package)");

    let by_method = FrameSeparator::new(FrameCategorization::Method, false);
    assert_eq!(frame_text(&default_package, &by_method), "Main.run(I)");
    assert_eq!(frame_text(&Frame::unknown(), &by_method), "<unknown>");
}

#[test]
fn test_frame_type_names() {
    assert_eq!(FrameType::from_name("Interpreted"), FrameType::Interpreted);
    assert_eq!(FrameType::from_name("JIT compiled"), FrameType::JitCompiled);
    assert_eq!(FrameType::from_name("jit"), FrameType::JitCompiled);
    assert_eq!(FrameType::from_name(" INLINED "), FrameType::Inlined);
    assert_eq!(FrameType::from_name("native"), FrameType::Native);
    assert_eq!(FrameType::from_name("mystery"), FrameType::Unknown);
}
