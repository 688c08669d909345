// Page shell and escaping shared by every document

/// Escape text for use in HTML/SVG content and attribute values
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Wrap a body fragment in a standalone page; `title` is escaped here
pub fn page(title: &str, body: &str) -> String {
    let title = escape(title);
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
  body {{ font-family: "Open Sans", Verdana, Arial, sans-serif; margin: 2rem; color: #2a3f5f; }}
  h1 {{ font-size: 1.3rem; font-weight: normal; }}
  svg text {{ fill: #2a3f5f; }}
</style>
</head>
<body>
<h1>{title}</h1>
{body}
</body>
</html>
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"Prince George's <"Park"> & Marsh"#),
            "Prince George&#39;s &lt;&quot;Park&quot;&gt; &amp; Marsh"
        );
    }

    #[test]
    fn test_page_escapes_title() {
        let html = page("Birds & Bees", "<p>hi</p>");
        assert!(html.contains("<title>Birds &amp; Bees</title>"));
        assert!(html.contains("<p>hi</p>"));
        assert!(html.starts_with("<!DOCTYPE html>"));
    }
}
