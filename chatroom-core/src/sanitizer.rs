/// Escapes the characters that are significant in HTML markup so the result
/// can be rendered verbatim by a client.
pub fn sanitize(text: &str) -> String {
    let mut sanitized = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '&' => sanitized.push_str("&amp;"),
            '<' => sanitized.push_str("&lt;"),
            '>' => sanitized.push_str("&gt;"),
            '"' => sanitized.push_str("&quot;"),
            '\'' => sanitized.push_str("&#x27;"),
            _ => sanitized.push(c),
        }
    }

    sanitized
}

#[cfg(test)]
mod tests {
    use super::sanitize;

    #[test]
    fn escapes_markup() {
        assert_eq!(sanitize("<b>hi</b>"), "&lt;b&gt;hi&lt;/b&gt;");
    }

    #[test]
    fn escapes_quotes_and_ampersands() {
        assert_eq!(
            sanitize(r#"Tom & "Jerry" 'n' co"#),
            "Tom &amp; &quot;Jerry&quot; &#x27;n&#x27; co"
        );
    }

    #[test]
    fn ampersand_is_not_double_escaped() {
        assert_eq!(sanitize("&lt;"), "&amp;lt;");
    }

    #[test]
    fn plain_text_is_untouched() {
        assert_eq!(sanitize("hello world ünïcode 👋"), "hello world ünïcode 👋");
        assert_eq!(sanitize(""), "");
    }
}
