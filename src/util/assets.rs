use std::{borrow::Cow, sync::OnceLock};

use rust_embed::RustEmbed;

/// Embed the entire `assets/` directory into the binary.
#[derive(RustEmbed)]
#[folder = "assets"]
struct EmbeddedAssets;

static MAIN_CSS: OnceLock<String> = OnceLock::new();

/// Returns the contents of `assets/main.css` as a static string.
pub fn main_css() -> &'static str {
    MAIN_CSS
        .get_or_init(|| load_text("/assets/main.css"))
        .as_str()
}

// A missing or undecodable stylesheet degrades to an unstyled page.
fn load_text(path: &str) -> String {
    load_asset(path)
        .map(|data| String::from_utf8_lossy(&data).into_owned())
        .unwrap_or_else(|| {
            tracing::warn!(path, "embedded asset missing");
            String::new()
        })
}

fn load_asset(path: &str) -> Option<Cow<'static, [u8]>> {
    EmbeddedAssets::get(&canonical_asset_path(path)).map(|file| file.data)
}

fn canonical_asset_path(path: &str) -> String {
    let trimmed = path.trim_start_matches('/');
    if let Some(rest) = trimmed.strip_prefix("assets/") {
        rest.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_paths_are_relative_to_the_folder() {
        assert_eq!(canonical_asset_path("/assets/main.css"), "main.css");
        assert_eq!(canonical_asset_path("main.css"), "main.css");
    }

    #[test]
    fn stylesheet_is_embedded() {
        assert!(main_css().contains(".inventory-toolbar"));
    }
}
