const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Decode descriptor bytes to text.
///
/// A leading UTF-8 byte order mark is dropped (`serde_json` rejects it). Bytes
/// that are not valid UTF-8 are decoded as Latin-1 instead, which maps every
/// byte to a character and therefore never fails.
#[must_use]
pub fn decode_text(bytes: Vec<u8>) -> String {
    let bytes = match bytes.strip_prefix(&UTF8_BOM) {
        Some(rest) => rest.to_vec(),
        None => bytes,
    };
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => err.into_bytes().iter().map(|&b| char::from(b)).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(b"plain".to_vec(), "plain")]
    #[case(vec![0xEF, 0xBB, 0xBF, b'{', b'}'], "{}")]
    #[case("caf\u{e9}".as_bytes().to_vec(), "caf\u{e9}")]
    #[case(vec![b'c', b'a', b'f', 0xE9], "caf\u{e9}")]
    fn test_decode_text(#[case] input: Vec<u8>, #[case] expected: &str) {
        assert_eq!(decode_text(input), expected);
    }
}
