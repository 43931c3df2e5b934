include!(concat!(env!("OUT_DIR"), "/embedded_assets.rs"));

pub const INDEX_PATH: &str = "index.html";

/// Embedded dashboard file for a request path. The empty path resolves to
/// the index so `lookup` answers both `/` and direct asset requests.
pub fn lookup(path: &str) -> Option<&'static EmbeddedAsset> {
    let wanted = match path.trim_start_matches('/') {
        "" => INDEX_PATH,
        other => other,
    };
    EMBEDDED_ASSETS.iter().find(|asset| asset.path == wanted)
}

pub fn index() -> Option<&'static EmbeddedAsset> {
    lookup(INDEX_PATH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_path_resolves_to_the_index() {
        let asset = lookup("").expect("index embedded");
        assert_eq!(asset.path, INDEX_PATH);
        assert!(asset.mime.starts_with("text/html"));
    }

    #[test]
    fn dashboard_script_and_styles_are_embedded() {
        assert!(lookup("app.js").is_some());
        assert!(lookup("/style.css").is_some());
        assert!(lookup("missing.js").is_none());
    }
}
