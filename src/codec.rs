//! Stream and string encoding used when serializing page objects.
//!
//! The page tree never encrypts or compresses on its own; it hands every
//! content stream and string payload to a [StreamCodec], along with the number
//! of the object it belongs to (which object-keyed encryption needs).

use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use pdf_writer::Filter;

pub trait StreamCodec {
    /// Encode a stream payload belonging to object `object`
    fn encode_stream(&self, bytes: &[u8], object: i32) -> Vec<u8>;

    /// The `/Filter` to declare for encoded streams, if any
    fn filter(&self) -> Option<Filter>;

    /// Encode the bytes of a string belonging to object `object`. The result is
    /// written as a PDF string, so delimiters and escapes are not the codec's concern.
    fn encode_string(&self, bytes: &[u8], object: i32) -> Vec<u8> {
        let _ = object;
        bytes.to_vec()
    }
}

/// Writes streams and strings as-is
#[derive(Debug, Default, Copy, Clone)]
pub struct Identity;

impl StreamCodec for Identity {
    fn encode_stream(&self, bytes: &[u8], _object: i32) -> Vec<u8> {
        bytes.to_vec()
    }

    fn filter(&self) -> Option<Filter> {
        None
    }
}

/// Compresses streams with zlib and declares `/FlateDecode`
#[derive(Debug, Copy, Clone)]
pub struct Flate {
    pub level: u8,
}

impl Default for Flate {
    fn default() -> Flate {
        Flate {
            level: CompressionLevel::DefaultCompression as u8,
        }
    }
}

impl StreamCodec for Flate {
    fn encode_stream(&self, bytes: &[u8], _object: i32) -> Vec<u8> {
        compress_to_vec_zlib(bytes, self.level)
    }

    fn filter(&self) -> Option<Filter> {
        Some(Filter::FlateDecode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use miniz_oxide::inflate::decompress_to_vec_zlib;

    #[test]
    fn flate_round_trips() {
        let text = lipsum::lipsum(200);
        let encoded = Flate::default().encode_stream(text.as_bytes(), 4);
        assert!(encoded.len() < text.len());
        assert_eq!(decompress_to_vec_zlib(&encoded).unwrap(), text.as_bytes());
        assert_eq!(Flate::default().filter(), Some(Filter::FlateDecode));
    }

    #[test]
    fn identity_is_transparent() {
        assert_eq!(Identity.encode_stream(b"q Q", 1), b"q Q");
        assert_eq!(Identity.filter(), None);
        assert_eq!(Identity.encode_string(b"D:1", 1), b"D:1");
        assert_eq!(Flate::default().encode_string(b"D:1", 1), b"D:1");
    }
}
