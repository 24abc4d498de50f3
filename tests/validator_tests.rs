//! Structural validator tests: event sequences checked against the
//! container grammar, independent of where the events come from.

use ev_nbt::{Error, Tag, TagReader, TagVisitor, TagWriter, ValidationVisitor};

// ==================== Well-Formed Sequences ====================

#[test]
fn test_minimal_document() {
    let mut validator = ValidationVisitor::new();
    validator.enter_root("").unwrap();
    validator.end_compound().unwrap();
    assert_eq!(validator.depth(), 0);
}

#[test]
fn test_keyed_scalars() {
    let mut validator = ValidationVisitor::new();
    validator.enter_root("root").unwrap();

    validator.visit_key("a").unwrap();
    validator.visit_byte(1).unwrap();
    validator.visit_key("b").unwrap();
    validator.visit_string("two").unwrap();
    validator.visit_key("c").unwrap();
    validator.visit_double(3.0).unwrap();

    validator.end_compound().unwrap();
    assert_eq!(validator.depth(), 0);
}

#[test]
fn test_homogeneous_list() {
    let mut validator = ValidationVisitor::new();
    validator.enter_root("").unwrap();
    validator.visit_key("list").unwrap();
    validator.enter_list(Tag::Short, 3).unwrap();
    validator.visit_short(1).unwrap();
    validator.visit_short(2).unwrap();
    validator.visit_short(3).unwrap();
    // The list popped itself on its last element; End closes the root.
    validator.end_compound().unwrap();
    assert_eq!(validator.depth(), 0);
}

#[test]
fn test_member_after_completed_array() {
    let mut validator = ValidationVisitor::new();
    validator.enter_root("").unwrap();

    validator.visit_key("ints").unwrap();
    validator.enter_int_array(2).unwrap();
    validator.visit_int(1).unwrap();
    validator.visit_int(2).unwrap();

    validator.visit_key("after").unwrap();
    validator.visit_byte(0).unwrap();

    validator.end_compound().unwrap();
}

#[test]
fn test_zero_length_sequences_do_not_linger() {
    // A zero-length array or list is complete the moment it is announced;
    // the next member must not be treated as one of its elements.
    let mut validator = ValidationVisitor::new();
    validator.enter_root("").unwrap();

    validator.visit_key("empty_bytes").unwrap();
    validator.enter_byte_array(0).unwrap();

    validator.visit_key("empty_list").unwrap();
    validator.enter_list(Tag::End, 0).unwrap();

    validator.visit_key("after").unwrap();
    validator.visit_long(9).unwrap();

    validator.end_compound().unwrap();
    assert_eq!(validator.depth(), 0);
}

#[test]
fn test_nested_compound_in_list() {
    let mut validator = ValidationVisitor::new();
    validator.enter_root("").unwrap();
    validator.visit_key("entries").unwrap();
    validator.enter_list(Tag::Compound, 2).unwrap();

    validator.enter_compound().unwrap();
    validator.visit_key("x").unwrap();
    validator.visit_int(1).unwrap();
    validator.end_compound().unwrap();

    validator.enter_compound().unwrap();
    validator.end_compound().unwrap();

    validator.end_compound().unwrap();
    assert_eq!(validator.depth(), 0);
}

// ==================== Structural Violations ====================

#[test]
fn test_list_element_type_mismatch() {
    let mut validator = ValidationVisitor::new();
    validator.enter_root("").unwrap();
    validator.visit_key("list").unwrap();
    validator.enter_list(Tag::Byte, 2).unwrap();

    match validator.visit_int(42) {
        Err(Error::ListElementMismatch {
            expected: Tag::Byte,
            actual: Tag::Int,
        }) => {}
        other => panic!("Expected ListElementMismatch, got {other:?}"),
    }
}

#[test]
fn test_byte_array_element_mismatch() {
    let mut validator = ValidationVisitor::new();
    validator.enter_root("").unwrap();
    validator.visit_key("a").unwrap();
    validator.enter_byte_array(1).unwrap();

    match validator.visit_short(1) {
        Err(Error::ArrayElementMismatch {
            expected: Tag::Byte,
            actual: Tag::Short,
        }) => {}
        other => panic!("Expected ArrayElementMismatch, got {other:?}"),
    }
}

#[test]
fn test_int_array_elements_checked_against_int() {
    // Integer arrays take Int elements; a Byte inside one is rejected.
    let mut validator = ValidationVisitor::new();
    validator.enter_root("").unwrap();
    validator.visit_key("a").unwrap();
    validator.enter_int_array(3).unwrap();
    validator.visit_int(1).unwrap();

    match validator.visit_byte(2) {
        Err(Error::ArrayElementMismatch {
            expected: Tag::Int,
            actual: Tag::Byte,
        }) => {}
        other => panic!("Expected ArrayElementMismatch, got {other:?}"),
    }
}

#[test]
fn test_missing_key_before_scalar() {
    let mut validator = ValidationVisitor::new();
    validator.enter_root("").unwrap();

    match validator.visit_int(1) {
        Err(Error::MissingKey(Tag::Int)) => {}
        other => panic!("Expected MissingKey, got {other:?}"),
    }
}

#[test]
fn test_missing_key_in_nested_compound() {
    let mut validator = ValidationVisitor::new();
    validator.enter_root("").unwrap();
    validator.visit_key("inner").unwrap();
    validator.enter_compound().unwrap();

    match validator.visit_string("orphan") {
        Err(Error::MissingKey(Tag::String)) => {}
        other => panic!("Expected MissingKey, got {other:?}"),
    }
}

#[test]
fn test_key_is_consumed_by_one_value() {
    // A key covers exactly one value; the next value needs its own.
    let mut validator = ValidationVisitor::new();
    validator.enter_root("").unwrap();
    validator.visit_key("a").unwrap();
    validator.visit_byte(1).unwrap();

    match validator.visit_byte(2) {
        Err(Error::MissingKey(Tag::Byte)) => {}
        other => panic!("Expected MissingKey, got {other:?}"),
    }
}

#[test]
fn test_end_inside_unfinished_byte_array() {
    let mut validator = ValidationVisitor::new();
    validator.enter_root("").unwrap();
    validator.visit_key("a").unwrap();
    validator.enter_byte_array(3).unwrap();
    validator.visit_byte(1).unwrap();

    match validator.end_compound() {
        Err(Error::UnbalancedEnd(Some(Tag::ByteArray))) => {}
        other => panic!("Expected UnbalancedEnd, got {other:?}"),
    }
}

#[test]
fn test_end_inside_unfinished_list() {
    let mut validator = ValidationVisitor::new();
    validator.enter_root("").unwrap();
    validator.visit_key("l").unwrap();
    validator.enter_list(Tag::Int, 2).unwrap();

    match validator.end_compound() {
        Err(Error::UnbalancedEnd(Some(Tag::List))) => {}
        other => panic!("Expected UnbalancedEnd, got {other:?}"),
    }
}

#[test]
fn test_end_with_nothing_open() {
    let mut validator = ValidationVisitor::new();

    match validator.end_compound() {
        Err(Error::UnbalancedEnd(None)) => {}
        other => panic!("Expected UnbalancedEnd, got {other:?}"),
    }
}

#[test]
fn test_second_root_rejected() {
    let mut validator = ValidationVisitor::new();
    validator.enter_root("first").unwrap();

    match validator.enter_root("second") {
        Err(Error::DuplicateRoot) => {}
        other => panic!("Expected DuplicateRoot, got {other:?}"),
    }
}

#[test]
fn test_root_after_complete_pass_is_allowed() {
    // Once the first document closes completely, the validator is back at
    // depth zero and a fresh pass may begin.
    let mut validator = ValidationVisitor::new();
    validator.enter_root("first").unwrap();
    validator.end_compound().unwrap();

    validator.enter_root("second").unwrap();
    validator.end_compound().unwrap();
    assert_eq!(validator.depth(), 0);
}

#[test]
fn test_violation_errors_are_structural() {
    let errors = [
        Error::DuplicateRoot,
        Error::MissingKey(Tag::Int),
        Error::ListElementMismatch {
            expected: Tag::Byte,
            actual: Tag::Int,
        },
        Error::ArrayElementMismatch {
            expected: Tag::Int,
            actual: Tag::Byte,
        },
        Error::UnbalancedEnd(None),
    ];

    for error in errors {
        assert!(error.is_structural(), "{error} should be structural");
        assert!(!error.is_grammar());
    }
}

// ==================== Chaining ====================

#[test]
fn test_checked_events_forward_to_next() {
    let mut chain = ValidationVisitor::with_next(TagWriter::new());
    chain.enter_root("").unwrap();
    chain.visit_key("answer").unwrap();
    chain.visit_int(42).unwrap();
    chain.end_compound().unwrap();

    let writer = chain.into_inner().unwrap();

    let mut direct = TagWriter::new();
    direct.enter_root("").unwrap();
    direct.visit_key("answer").unwrap();
    direct.visit_int(42).unwrap();
    direct.end_compound().unwrap();

    assert_eq!(writer.as_bytes(), direct.as_bytes());
}

#[test]
fn test_rejected_event_never_reaches_next() {
    let mut chain = ValidationVisitor::with_next(TagWriter::new());
    chain.enter_root("").unwrap();
    chain.visit_key("l").unwrap();
    chain.enter_list(Tag::Byte, 1).unwrap();

    let before = chain.next().unwrap().len();
    assert!(chain.visit_int(1).is_err());
    assert_eq!(chain.next().unwrap().len(), before);
}

#[test]
fn test_stacked_validators() {
    // Transparent stages stack; both see and pass the same sequence.
    let mut chain = ValidationVisitor::with_next(ValidationVisitor::with_next(TagWriter::new()));
    chain.enter_root("").unwrap();
    chain.visit_key("x").unwrap();
    chain.visit_byte(1).unwrap();
    chain.end_compound().unwrap();

    assert_eq!(chain.depth(), 0);
    let inner = chain.into_inner().unwrap();
    assert_eq!(inner.depth(), 0);
    assert!(!inner.into_inner().unwrap().is_empty());
}

#[test]
fn test_validator_accepts_all_decoder_output() {
    // Whatever decodes without a grammar error must also validate.
    let mut data = vec![0x0A, 0x00, 0x00];
    data.push(0x09);
    data.extend_from_slice(&4u16.to_be_bytes());
    data.extend_from_slice(b"list");
    data.push(0x0A); // element type Compound
    data.extend_from_slice(&1i32.to_be_bytes());
    data.push(0x0B);
    data.extend_from_slice(&4u16.to_be_bytes());
    data.extend_from_slice(b"ints");
    data.extend_from_slice(&2i32.to_be_bytes());
    data.extend_from_slice(&7i32.to_be_bytes());
    data.extend_from_slice(&8i32.to_be_bytes());
    data.push(0x00); // end list element
    data.push(0x00); // end root

    let mut validator = ValidationVisitor::new();
    TagReader::new(data).accept(&mut validator).unwrap();
    assert_eq!(validator.depth(), 0);
}
