use crate::error::DecodeError;

/// Compress text into the LZ-string URI-component alphabet (`A-Za-z0-9+-$`).
///
/// The output can be placed in a query string as-is. This is the same stream
/// the web front-end produces, so tokens stay interchangeable.
pub fn compress(text: &str) -> String {
    lz_str::compress_to_encoded_uri_component(text)
}

pub fn decompress(token: &str) -> Result<String, DecodeError> {
    // query-string decoders turn '+' into a space, so spaces at the ends are data
    let token = token
        .trim_matches(|c: char| c.is_whitespace() && c != ' ')
        .replace(' ', "+");
    if token.is_empty() {
        return Err(DecodeError::Decompress);
    }

    let wide = lz_str::decompress_from_encoded_uri_component(token.as_str())
        .ok_or(DecodeError::Decompress)?;
    if wide.is_empty() {
        return Err(DecodeError::Decompress);
    }

    Ok(String::from_utf16(&wide)?)
}
