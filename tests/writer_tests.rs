//! Encoder tests: event sequences and the exact bytes they serialize to.

use ev_nbt::{Tag, TagVisitor, TagWriter};

// ==================== Helper Functions ====================

/// Appends a u16-length-prefixed string.
fn put_str(data: &mut Vec<u8>, value: &str) {
    data.extend_from_slice(&(value.len() as u16).to_be_bytes());
    data.extend_from_slice(value.as_bytes());
}

// ==================== Root Forms ====================

#[test]
fn test_hello_world_bytes() {
    let mut writer = TagWriter::new();
    writer.enter_root("hello world").unwrap();
    writer.visit_key("name").unwrap();
    writer.visit_string("Bananrama").unwrap();
    writer.end_compound().unwrap();

    let mut expected = vec![0x0A];
    put_str(&mut expected, "hello world");
    expected.push(0x08);
    put_str(&mut expected, "name");
    put_str(&mut expected, "Bananrama");
    expected.push(0x00);

    assert_eq!(writer.as_bytes(), expected.as_slice());
}

#[test]
fn test_keyed_compound_opens_root() {
    // A top-level key followed by a compound produces the same root header
    // as enter_root.
    let mut keyed = TagWriter::new();
    keyed.visit_key("hello world").unwrap();
    keyed.enter_compound().unwrap();
    keyed.visit_key("name").unwrap();
    keyed.visit_string("Bananrama").unwrap();
    keyed.end_compound().unwrap();

    let mut rooted = TagWriter::new();
    rooted.enter_root("hello world").unwrap();
    rooted.visit_key("name").unwrap();
    rooted.visit_string("Bananrama").unwrap();
    rooted.end_compound().unwrap();

    assert_eq!(keyed.as_bytes(), rooted.as_bytes());
}

#[test]
fn test_empty_document() {
    let mut writer = TagWriter::new();
    writer.enter_root("").unwrap();
    writer.end_compound().unwrap();

    assert_eq!(writer.as_bytes(), &[0x0A, 0x00, 0x00, 0x00]);
}

// ==================== Scalar Encoding ====================

#[test]
fn test_scalar_payloads_are_big_endian() {
    let mut writer = TagWriter::new();
    writer.enter_root("").unwrap();

    writer.visit_key("s").unwrap();
    writer.visit_short(-2).unwrap();
    writer.visit_key("i").unwrap();
    writer.visit_int(0x0102_0304).unwrap();
    writer.visit_key("l").unwrap();
    writer.visit_long(1).unwrap();
    writer.visit_key("f").unwrap();
    writer.visit_float(1.5).unwrap();
    writer.visit_key("d").unwrap();
    writer.visit_double(-0.25).unwrap();

    writer.end_compound().unwrap();

    let mut expected = vec![0x0A, 0x00, 0x00];
    expected.push(0x02);
    put_str(&mut expected, "s");
    expected.extend_from_slice(&(-2i16).to_be_bytes());
    expected.push(0x03);
    put_str(&mut expected, "i");
    expected.extend_from_slice(&[0x01, 0x02, 0x03, 0x04]);
    expected.push(0x04);
    put_str(&mut expected, "l");
    expected.extend_from_slice(&1i64.to_be_bytes());
    expected.push(0x05);
    put_str(&mut expected, "f");
    expected.extend_from_slice(&1.5f32.to_be_bytes());
    expected.push(0x06);
    put_str(&mut expected, "d");
    expected.extend_from_slice(&(-0.25f64).to_be_bytes());
    expected.push(0x00);

    assert_eq!(writer.as_bytes(), expected.as_slice());
}

#[test]
fn test_unkeyed_value_gets_empty_key() {
    // The writer does not validate; a keyless member is written with an
    // empty key rather than rejected.
    let mut writer = TagWriter::new();
    writer.enter_root("").unwrap();
    writer.visit_byte(7).unwrap();
    writer.end_compound().unwrap();

    assert_eq!(
        writer.as_bytes(),
        &[0x0A, 0x00, 0x00, 0x01, 0x00, 0x00, 0x07, 0x00]
    );
}

// ==================== Sequences ====================

#[test]
fn test_byte_array_elements_are_bare() {
    let mut writer = TagWriter::new();
    writer.enter_root("").unwrap();
    writer.visit_key("a").unwrap();
    writer.enter_byte_array(3).unwrap();
    writer.visit_byte(1).unwrap();
    writer.visit_byte(-1).unwrap();
    writer.visit_byte(127).unwrap();
    writer.end_compound().unwrap();

    let mut expected = vec![0x0A, 0x00, 0x00];
    expected.push(0x07);
    put_str(&mut expected, "a");
    expected.extend_from_slice(&3i32.to_be_bytes());
    expected.extend_from_slice(&[0x01, 0xFF, 0x7F]);
    expected.push(0x00);

    assert_eq!(writer.as_bytes(), expected.as_slice());
}

#[test]
fn test_int_array_encoding() {
    let mut writer = TagWriter::new();
    writer.enter_root("").unwrap();
    writer.visit_key("ints").unwrap();
    writer.enter_int_array(3).unwrap();
    writer.visit_int(1).unwrap();
    writer.visit_int(2).unwrap();
    writer.visit_int(3).unwrap();
    writer.end_compound().unwrap();

    let mut expected = vec![0x0A, 0x00, 0x00];
    expected.push(0x0B);
    put_str(&mut expected, "ints");
    expected.extend_from_slice(&3i32.to_be_bytes());
    expected.extend_from_slice(&1i32.to_be_bytes());
    expected.extend_from_slice(&2i32.to_be_bytes());
    expected.extend_from_slice(&3i32.to_be_bytes());
    expected.push(0x00);

    assert_eq!(writer.as_bytes(), expected.as_slice());
}

#[test]
fn test_list_header_and_bare_elements() {
    let mut writer = TagWriter::new();
    writer.enter_root("").unwrap();
    writer.visit_key("list").unwrap();
    writer.enter_list(Tag::String, 2).unwrap();
    writer.visit_string("a").unwrap();
    writer.visit_string("bc").unwrap();
    writer.end_compound().unwrap();

    let mut expected = vec![0x0A, 0x00, 0x00];
    expected.push(0x09);
    put_str(&mut expected, "list");
    expected.push(0x08); // element type String
    expected.extend_from_slice(&2i32.to_be_bytes());
    put_str(&mut expected, "a");
    put_str(&mut expected, "bc");
    expected.push(0x00);

    assert_eq!(writer.as_bytes(), expected.as_slice());
}

#[test]
fn test_member_after_completed_sequence_gets_header() {
    // Once a sequence's countdown is spent, the next value is a compound
    // member again and gets a type code and key.
    let mut writer = TagWriter::new();
    writer.enter_root("").unwrap();
    writer.visit_key("a").unwrap();
    writer.enter_byte_array(1).unwrap();
    writer.visit_byte(5).unwrap();
    writer.visit_key("b").unwrap();
    writer.visit_byte(6).unwrap();
    writer.end_compound().unwrap();

    let mut expected = vec![0x0A, 0x00, 0x00];
    expected.push(0x07);
    put_str(&mut expected, "a");
    expected.extend_from_slice(&1i32.to_be_bytes());
    expected.push(0x05);
    expected.push(0x01);
    put_str(&mut expected, "b");
    expected.push(0x06);
    expected.push(0x00);

    assert_eq!(writer.as_bytes(), expected.as_slice());
}

#[test]
fn test_empty_list_with_end_element_type() {
    let mut writer = TagWriter::new();
    writer.enter_root("").unwrap();
    writer.visit_key("empty").unwrap();
    writer.enter_list(Tag::End, 0).unwrap();
    writer.visit_key("after").unwrap();
    writer.visit_byte(1).unwrap();
    writer.end_compound().unwrap();

    let mut expected = vec![0x0A, 0x00, 0x00];
    expected.push(0x09);
    put_str(&mut expected, "empty");
    expected.push(0x00);
    expected.extend_from_slice(&0i32.to_be_bytes());
    expected.push(0x01);
    put_str(&mut expected, "after");
    expected.push(0x01);
    expected.push(0x00);

    assert_eq!(writer.as_bytes(), expected.as_slice());
}

#[test]
fn test_nested_compound_in_list_is_bare() {
    // Compounds that are list elements carry no type code or key; their
    // members and End marker follow directly.
    let mut writer = TagWriter::new();
    writer.enter_root("").unwrap();
    writer.visit_key("entries").unwrap();
    writer.enter_list(Tag::Compound, 1).unwrap();
    writer.enter_compound().unwrap();
    writer.visit_key("x").unwrap();
    writer.visit_byte(1).unwrap();
    writer.end_compound().unwrap();
    writer.end_compound().unwrap();

    let mut expected = vec![0x0A, 0x00, 0x00];
    expected.push(0x09);
    put_str(&mut expected, "entries");
    expected.push(0x0A);
    expected.extend_from_slice(&1i32.to_be_bytes());
    expected.push(0x01);
    put_str(&mut expected, "x");
    expected.push(0x01);
    expected.push(0x00); // end list element
    expected.push(0x00); // end root

    assert_eq!(writer.as_bytes(), expected.as_slice());
}

// ==================== Output Access ====================

#[test]
fn test_len_and_into_bytes() {
    let mut writer = TagWriter::new();
    assert!(writer.is_empty());

    writer.enter_root("").unwrap();
    writer.end_compound().unwrap();

    assert_eq!(writer.len(), 4);
    let bytes = writer.into_bytes();
    assert_eq!(bytes, vec![0x0A, 0x00, 0x00, 0x00]);
}

#[test]
fn test_write_to_sink() {
    let mut writer = TagWriter::new();
    writer.enter_root("").unwrap();
    writer.end_compound().unwrap();

    let mut sink = Vec::new();
    writer.write_to(&mut sink).unwrap();
    assert_eq!(sink, writer.as_bytes());
}

#[test]
fn test_write_to_path_round_trips() {
    let mut writer = TagWriter::new();
    writer.enter_root("file").unwrap();
    writer.visit_key("x").unwrap();
    writer.visit_int(9).unwrap();
    writer.end_compound().unwrap();

    let path = std::env::temp_dir().join("ev_nbt_writer_test.nbt");
    writer.write_to_path(&path).unwrap();

    let read_back = std::fs::read(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert_eq!(read_back, writer.as_bytes());
}
