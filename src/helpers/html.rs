//! HTML helper functions

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};

/// Characters escaped inside a fragment path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'\'')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Percent-encode a route parameter for use in a fragment
pub fn encode_segment(s: &str) -> String {
    utf8_percent_encode(s, SEGMENT).to_string()
}

/// Decode a percent-encoded route parameter. Invalid UTF-8 is replaced.
pub fn decode_segment(s: &str) -> String {
    percent_decode_str(s).decode_utf8_lossy().into_owned()
}

/// Generate an anchor tag. `text` is escaped; `href` must already be safe.
pub fn link_to(href: &str, text: &str, class: Option<&str>) -> String {
    match class {
        Some(class) => format!(
            r#"<a class="{}" href="{}">{}</a>"#,
            class,
            html_escape(href),
            html_escape(text)
        ),
        None => format!(r#"<a href="{}">{}</a>"#, html_escape(href), html_escape(text)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<img src=x onerror="a('b')">&"#),
            "&lt;img src=x onerror=&quot;a(&#39;b&#39;)&quot;&gt;&amp;"
        );
        assert_eq!(html_escape("plain"), "plain");
    }

    #[test]
    fn test_segment_round_trip_for_awkward_tags() {
        let tag = "c++ & web/dev";
        let encoded = encode_segment(tag);
        assert!(!encoded.contains('/'));
        assert!(!encoded.contains(' '));
        assert_eq!(decode_segment(&encoded), tag);
    }

    #[test]
    fn test_link_to() {
        assert_eq!(
            link_to("#/tag/css", "<css>", Some("tag")),
            r##"<a class="tag" href="#/tag/css">&lt;css&gt;</a>"##
        );
    }
}
