#![no_main]

use std::io::Read;

use libfuzzer_sys::fuzz_target;
use crcchunk::{ChunkIter, Decoder, FramingDecoder, MemStore, decode_bytes, decode_range, range_decoder};

fuzz_target!(|data: Vec<u8>| {
    // Arbitrary input must fail cleanly, never panic
    let whole = decode_bytes(&data);

    let mut out = Vec::new();
    let framed = FramingDecoder::new(&data[..], None).read_to_end(&mut out);

    // Every decoder agrees on whether the input is valid
    assert_eq!(whole.is_ok(), framed.is_ok());
    if let Ok(decoded) = &whole {
        assert_eq!(decoded.as_ref(), out.as_slice());

        let chunks: Vec<_> = ChunkIter::new(&data[..]).collect::<Result<_, _>>().unwrap();
        let total: usize = chunks.iter().map(|c| c.len()).sum();
        assert_eq!(total, decoded.len());
    }

    // The bounded decoder may be given any declared size
    let declared = data.first().map_or(0, |b| u64::from(*b) * 257);
    let mut out = Vec::new();
    let _ = Decoder::new(&data[..], declared, None).read_to_end(&mut out);
    assert!(out.len() as u64 <= declared);

    // Random access over the same bytes as a store
    let store = MemStore::from(data.clone());
    let size = declared;
    let from = size / 3;
    if let Ok(mut dec) = range_decoder(&store, 0, from, size, size, None) {
        let mut out = Vec::new();
        let _ = dec.read_to_end(&mut out);
    }
    let _ = decode_range(&mut Vec::new(), &store, 0, from, size, None);
});
