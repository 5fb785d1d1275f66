/// Base path of Steam's public artwork CDN
pub const STEAM_CDN_BASE: &str = "https://cdn.cloudflare.steamstatic.com/steam/apps";

/// Header artwork for a Steam app. Every Steam item's cover can be rebuilt from
/// its app id, which is why share tokens never carry it for game lists.
pub fn steam_header_url(app_id: u64) -> String {
    format!("{}/{}/header.jpg", STEAM_CDN_BASE, app_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steam_header_url() {
        assert_eq!(
            steam_header_url(440),
            "https://cdn.cloudflare.steamstatic.com/steam/apps/440/header.jpg"
        );
    }
}
