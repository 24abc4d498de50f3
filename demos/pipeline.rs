//! Example: Composing visitor pipelines
//!
//! This example builds a document by firing events by hand through a
//! validating writer chain, then replays one reader against two independent
//! consumers, and finally shows a structural violation being caught before
//! it reaches the writer.
//!
//! Run with: cargo run --example pipeline

use ev_nbt::{
    Error, Result, Tag, TagReader, TagVisitor, TagWriter, TreeBuilder, ValidationVisitor,
};

fn encode_sample() -> Result<Vec<u8>> {
    // The validator checks every event before the writer sees it.
    let mut chain = ValidationVisitor::with_next(TagWriter::new());

    chain.enter_root("Level")?;

    chain.visit_key("name")?;
    chain.visit_string("Bananrama")?;

    chain.visit_key("scores")?;
    chain.enter_int_array(3)?;
    chain.visit_int(1)?;
    chain.visit_int(2)?;
    chain.visit_int(3)?;

    chain.visit_key("flags")?;
    chain.enter_list(Tag::Byte, 2)?;
    chain.visit_byte(0)?;
    chain.visit_byte(1)?;

    chain.end_compound()?;

    match chain.into_inner() {
        Some(writer) => Ok(writer.into_bytes()),
        None => Err(Error::EndOfFile),
    }
}

fn main() -> Result<()> {
    let bytes = encode_sample()?;
    println!("Encoded {} bytes", bytes.len());

    // One reader, two replays: the buffered input is decoded from the start
    // on every accept call.
    let reader = TagReader::new(bytes);

    let mut echo = TagWriter::new();
    reader.accept(&mut echo)?;

    let mut builder = TreeBuilder::new();
    reader.accept(&mut builder)?;

    let document = match builder.into_document() {
        Some(document) => document,
        None => return Err(Error::EndOfFile),
    };

    println!("Root name: {:?}", document.name());
    println!(
        "scores: {:?}",
        document.root().get("scores").and_then(|v| v.as_int_array())
    );
    println!(
        "Round trip byte-identical: {}",
        echo.as_bytes() == document.to_vec()?.as_slice()
    );

    // A malformed sequence never reaches the writer: here a list declared
    // as Byte receives an Int element.
    let mut chain = ValidationVisitor::with_next(TagWriter::new());
    chain.enter_root("broken")?;
    chain.visit_key("list")?;
    chain.enter_list(Tag::Byte, 1)?;

    match chain.visit_int(42) {
        Err(error) => println!("Rejected as expected: {error}"),
        Ok(()) => println!("BUG: mismatched element was accepted"),
    }

    Ok(())
}
