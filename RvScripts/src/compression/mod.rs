//! Compression utilities
//!
//! Script bodies in `.rvdata2` containers are stored as zlib streams.

use std::borrow::Cow;
use std::io::Read;

use flate2::read::ZlibDecoder;

use crate::error::{Error, Result};

/// Check for a zlib stream header (CMF/FLG pair with deflate method and valid check bits).
pub fn has_zlib_header(data: &[u8]) -> bool {
    match data {
        [cmf, flg, ..] => cmf & 0x0f == 8 && ((u16::from(*cmf) << 8) | u16::from(*flg)) % 31 == 0,
        _ => false,
    }
}

/// Decompress Zlib data
///
/// # Errors
/// Returns an error if the data is not a complete zlib stream.
pub fn decompress_zlib(compressed: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = ZlibDecoder::new(compressed);
    let mut decompressed = Vec::with_capacity(compressed.len() * 3);

    decoder
        .read_to_end(&mut decompressed)
        .map_err(|e| Error::ZlibDecompressionFailed {
            message: e.to_string(),
        })?;

    Ok(decompressed)
}

/// Inflate a script body if it is a zlib stream, otherwise hand it back unchanged.
pub fn inflate_script_body(data: &[u8]) -> Cow<'_, [u8]> {
    if !has_zlib_header(data) {
        return Cow::Borrowed(data);
    }
    match decompress_zlib(data) {
        Ok(inflated) => Cow::Owned(inflated),
        Err(e) => {
            tracing::debug!("Body has a zlib header but did not inflate, keeping raw bytes: {e}");
            Cow::Borrowed(data)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::ZlibEncoder;
    use std::io::Write;

    fn deflate(data: &[u8]) -> Vec<u8> {
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn test_inflates_zlib_body() {
        let compressed = deflate(b"class Foo; end\r\n");
        assert!(has_zlib_header(&compressed));
        assert_eq!(inflate_script_body(&compressed).as_ref(), b"class Foo; end\r\n");
    }

    #[test]
    fn test_plain_body_passes_through() {
        let body = b"puts 'hi'";
        assert!(!has_zlib_header(body));
        assert!(matches!(inflate_script_body(body), Cow::Borrowed(_)));
    }

    #[test]
    fn test_corrupt_stream_keeps_raw() {
        // Valid header, then a block with the reserved block type
        let corrupt = [0x78, 0x9c, 0xff, 0xff, 0xff];
        assert!(has_zlib_header(&corrupt));
        assert!(decompress_zlib(&corrupt).is_err());
        assert_eq!(inflate_script_body(&corrupt).as_ref(), &corrupt[..]);
    }
}
