//! Basic streaming encode/decode example.
//!
//! Run with:
//!     cargo run --example stream_basic

use std::io::{Read, Write};

use crcchunk::{ChunkIter, CodecError, Decoder, FrameWriter, encode_size};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Create some sample data
    let data: Vec<u8> = (0..200_000u32).map(|i| (i % 251) as u8).collect();

    println!("Encoding {} bytes of data...\n", data.len());

    // Simulate streaming data in batches
    let mut writer = FrameWriter::new(Vec::new());
    for batch in data.chunks(8 * 1024) {
        writer.write_all(batch)?;
    }
    let encoded = writer.finish()?;

    println!(
        "Encoded: {} bytes (expected {})\n",
        encoded.len(),
        encode_size(data.len() as u64)
    );

    for chunk in ChunkIter::new(&encoded[..]) {
        let chunk = chunk?;
        println!("{}", chunk);
    }

    // Decode with a known length
    let mut decoded = Vec::new();
    Decoder::new(&encoded[..], data.len() as u64, None).read_to_end(&mut decoded)?;
    assert_eq!(decoded, data);
    println!("\nRound trip: ok");

    // Flip one bit and watch the decoder refuse the chunk
    let mut damaged = encoded.clone();
    damaged[100_000] ^= 0x01;
    let err = Decoder::new(&damaged[..], data.len() as u64, None)
        .read_to_end(&mut Vec::new())
        .unwrap_err();
    println!("Damaged stream: {}", CodecError::from_io(err));

    Ok(())
}
