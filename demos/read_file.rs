//! Example: Reading NBT files from disk
//!
//! This example demonstrates how to read NBT files using ev_nbt.
//! NBT files can be either uncompressed or gzip/zlib compressed; the codec
//! itself only sees decompressed bytes, so compressed files are inflated
//! with flate2 before decoding.
//!
//! Run with: cargo run --example read_file -- <path_to_nbt_file>

use std::env;
use std::fs::File;
use std::io::{BufReader, Read};

use ev_nbt::{Document, Value};
use flate2::read::GzDecoder;

/// Pretty-print any value recursively
fn dump(value: &Value) -> String {
    dump_inner(value, 0)
}

fn dump_inner(value: &Value, indent: usize) -> String {
    let pad = "  ".repeat(indent);
    match value {
        Value::Byte(v) => format!("{pad}Byte({v})"),
        Value::Short(v) => format!("{pad}Short({v})"),
        Value::Int(v) => format!("{pad}Int({v})"),
        Value::Long(v) => format!("{pad}Long({v})"),
        Value::Float(v) => format!("{pad}Float({v})"),
        Value::Double(v) => format!("{pad}Double({v})"),
        Value::ByteArray(v) => format!("{pad}ByteArray({} bytes)", v.len()),
        Value::String(v) => format!("{pad}String({v:?})"),
        Value::IntArray(v) => format!("{pad}IntArray({} ints)", v.len()),
        Value::List(list) => {
            let mut out = format!("{pad}List[{}] {{\n", list.len());
            for item in list {
                out.push_str(&dump_inner(item, indent + 1));
                out.push('\n');
            }
            out.push_str(&format!("{pad}}}"));
            out
        }
        Value::Compound(compound) => {
            let mut out = format!("{pad}Compound {{\n");
            for (key, val) in compound.iter() {
                let nested = dump_inner(val, indent + 1);
                out.push_str(&format!("{}  {:?}: {}\n", pad, key, nested.trim_start()));
            }
            out.push_str(&format!("{pad}}}"));
            out
        }
    }
}

/// Compression type detected from file header
#[derive(Debug, Clone, Copy)]
enum Compression {
    None,
    Gzip,
    Zlib,
}

/// Detect compression type from the first bytes of data
fn detect_compression(data: &[u8]) -> Compression {
    if data.len() >= 2 {
        // Gzip magic: 0x1f 0x8b
        if data[0] == 0x1f && data[1] == 0x8b {
            return Compression::Gzip;
        }
        // Zlib magic: 0x78 followed by 0x01, 0x5e, 0x9c, or 0xda
        if data[0] == 0x78 && matches!(data[1], 0x01 | 0x5e | 0x9c | 0xda) {
            return Compression::Zlib;
        }
    }
    Compression::None
}

/// Read and decompress file data if needed
fn read_nbt_file(path: &str) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut raw_data = Vec::new();
    reader.read_to_end(&mut raw_data)?;

    let compression = detect_compression(&raw_data);
    println!("Compression: {:?}", compression);

    let data = match compression {
        Compression::None => raw_data,
        Compression::Gzip => {
            let mut decoder = GzDecoder::new(&raw_data[..]);
            let mut decompressed = Vec::new();
            decoder.read_to_end(&mut decompressed)?;
            decompressed
        }
        Compression::Zlib => {
            let mut decoder = flate2::read::ZlibDecoder::new(&raw_data[..]);
            let mut decompressed = Vec::new();
            decoder.read_to_end(&mut decompressed)?;
            decompressed
        }
    };

    Ok(data)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("Usage: cargo run --example read_file -- <path_to_nbt_file>");
        println!();
        println!("Examples:");
        println!("  cargo run --example read_file -- level.dat");
        println!("  cargo run --example read_file -- player.dat");
        println!();
        println!("Supported formats:");
        println!("  - Uncompressed NBT");
        println!("  - Gzip compressed NBT (.dat files)");
        println!("  - Zlib compressed NBT");
        return Ok(());
    }

    let path = &args[1];
    println!("Reading NBT file: {}", path);
    println!();

    // Read and decompress file
    let data = read_nbt_file(path)?;
    println!("Decompressed size: {} bytes", data.len());
    println!();

    // Decode, validate, and materialize the document
    let document = Document::from_slice(&data)?;
    println!("Root name: {:?}", document.name());
    println!("Compound {{");
    for (key, value) in document.root().iter() {
        let nested = dump(value);
        println!("  {:?}: {}", key, nested.trim_start());
    }
    println!("}}");
    println!();

    // Re-encoding a decoded document reproduces the decompressed bytes
    let encoded = document.to_vec()?;
    println!(
        "Round trip: {} bytes, byte-identical: {}",
        encoded.len(),
        encoded == data
    );

    Ok(())
}
