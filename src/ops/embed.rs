/// Builds the iframe snippet that embeds the player for `video_id` on another site.
///
/// The wrapper keeps a 16:9 box with the padding-top trick; the iframe points at
/// `{origin}/player/{video_id}` and is allowed to autoplay and go fullscreen.
pub fn generate_embed(origin: &str, video_id: &str) -> String {
    let origin = origin.trim_end_matches('/');
    format!(
        "<div style=\"position:relative;width:100%;padding-top:56.25%;\">\
<iframe src=\"{origin}/player/{video_id}\" \
style=\"position:absolute;top:0;left:0;width:100%;height:100%;border:none;border-radius:8px;\" \
allow=\"autoplay; fullscreen\"></iframe></div>"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_embed_snippet() {
        let snippet = generate_embed("https://vsl.example.com", "vsl-42");
        assert_eq!(
            snippet,
            "<div style=\"position:relative;width:100%;padding-top:56.25%;\"><iframe src=\"https://vsl.example.com/player/vsl-42\" style=\"position:absolute;top:0;left:0;width:100%;height:100%;border:none;border-radius:8px;\" allow=\"autoplay; fullscreen\"></iframe></div>"
        );
    }

    #[test]
    fn test_generate_embed_is_deterministic() {
        let a = generate_embed("http://localhost:5173", "demo-001");
        let b = generate_embed("http://localhost:5173", "demo-001");
        assert_eq!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn test_generate_embed_drops_trailing_slash() {
        assert_eq!(
            generate_embed("https://vsl.example.com/", "x"),
            generate_embed("https://vsl.example.com", "x")
        );
        assert!(generate_embed("https://vsl.example.com/", "x").contains("com/player/x\""));
    }
}
