#![no_main]

use std::io::{Read, Write};

use libfuzzer_sys::fuzz_target;
use crcchunk::{EncodedStore, FrameWriter, FramingEncoder, MemStore, decode_bytes, encode_bytes};

fuzz_target!(|data: Vec<u8>| {
    let encoded = encode_bytes(&data);

    // Verify: every encoder produces the same bytes
    let mut framed = Vec::new();
    FramingEncoder::new(&data[..], None).read_to_end(&mut framed).unwrap();
    assert_eq!(framed, encoded.as_ref());

    let mut w = FrameWriter::new(Vec::new());
    w.write_all(&data).unwrap();
    assert_eq!(w.finish().unwrap(), encoded.as_ref());

    // Verify: decode inverts encode
    assert_eq!(decode_bytes(&encoded).unwrap(), data.as_slice());

    // Verify: appending in two parts equals encoding at once
    let split = data.first().map_or(0, |b| *b as usize).min(data.len());
    let mut store = EncodedStore::new(MemStore::new());
    store.append_bytes(&data[..split]).unwrap();
    store.append_bytes(&data[split..]).unwrap();
    assert_eq!(store.get_ref().as_slice(), encoded.as_ref());

    // Verify: a random range matches the slice
    let from = split / 2;
    let mut out = Vec::new();
    store.reader(from as u64, split as u64).unwrap().read_to_end(&mut out).unwrap();
    assert_eq!(out, &data[from..split]);
});
