/// Query parameter the share view reads its token from
pub const DATA_PARAM: &str = "data";

/// Build a full share link, e.g. `https://host/share/view?data=<token>`.
///
/// Tokens only use URL-safe characters and are embedded without further encoding.
/// A token that went through form decoding has its spaces turned back into `+`.
pub fn share_link(base_url: &str, view_path: &str, token: &str) -> String {
    let token = token.trim().replace(' ', "+");
    format!(
        "{}/{}?{}={}",
        base_url.trim_end_matches('/'),
        view_path.trim_start_matches('/'),
        DATA_PARAM,
        token
    )
}

/// Pull the token out of whatever the user pasted.
///
/// Accepts a full share link (the `data` parameter is percent-decoded) or a bare token.
pub fn extract_token(input: &str) -> String {
    let input = input.trim();
    let Some((_, query)) = input.split_once('?') else {
        return input.to_string();
    };
    let query = query.split('#').next().unwrap_or(query);

    let prefix = format!("{}=", DATA_PARAM);
    query
        .split('&')
        .find_map(|pair| pair.strip_prefix(prefix.as_str()))
        .map(|value| {
            urlencoding::decode(value)
                .map(|decoded| decoded.into_owned())
                .unwrap_or_else(|_| value.to_string())
        })
        .unwrap_or_else(|| input.to_string())
}
