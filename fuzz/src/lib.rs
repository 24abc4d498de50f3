use ev_nbt::{Document, TagReader, TagWriter, ValidationVisitor};

/// Decodes arbitrary bytes through the validated pipeline and, when they
/// form a well-formed document, checks the round-trip contracts.
pub fn test(data: &[u8]) {
    let reader = TagReader::from_slice(data);

    // Decode with validation attached; malformed input must fail cleanly.
    let mut chain = ValidationVisitor::with_next(TagWriter::new());
    let validated = reader.accept(&mut chain).is_ok();

    // Decoding alone must agree with the validated pass on success. The
    // validator never rejects what the reader emits.
    let mut writer = TagWriter::new();
    assert_eq!(reader.accept(&mut writer).is_ok(), validated);

    if !validated {
        return;
    }

    // One decode-encode trip reaches a fixed point. The first generation
    // can differ from the input where invalid UTF-8 was replaced, but the
    // second generation must be byte-identical to the first.
    let encoded = writer.into_bytes();
    let mut echo = TagWriter::new();
    TagReader::from_slice(&encoded)
        .accept(&mut echo)
        .expect("re-encoded output must decode");
    assert_eq!(echo.into_bytes(), encoded);

    // The materialized tree encodes back to the same bytes.
    let document = Document::from_slice(data).expect("validated input must build");
    assert_eq!(document.to_vec().expect("tree re-encode"), encoded);
}
