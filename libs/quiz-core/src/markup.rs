//! Text-to-markup helpers shared by the parser and the serializer.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::images::ImageTable;

/// `*text*` with no whitespace just inside the asterisks.
static EMPHASIS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*([^*\s](?:[^*\n]*[^*\s])?)\*").expect("emphasis pattern is valid")
});

/// `[imagemN]`; the captured group is the table key.
pub(crate) static IMAGE_PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\[(imagem\d+)\]").expect("placeholder pattern is valid")
});

/// Replace the five reserved XML characters with entities, `&` first.
pub fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Render inline syntax of a text fragment.
///
/// Emphasis spans are located on the raw text first; when `escape` is set the
/// surrounding text and the span contents are escaped but the generated
/// `<strong>` tags are not.
pub fn render_inline(text: &str, emphasis: bool, escape: bool) -> String {
    let plain = |s: &str| -> String {
        if escape {
            escape_xml(s)
        } else {
            s.to_string()
        }
    };

    if !emphasis {
        return plain(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for caps in EMPHASIS.captures_iter(text) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        out.push_str(&plain(&text[last..whole.start()]));
        out.push_str("<strong>");
        out.push_str(&plain(inner.as_str()));
        out.push_str("</strong>");
        last = whole.end();
    }
    out.push_str(&plain(&text[last..]));
    out
}

/// Substitute every known `[imagemN]` placeholder with an inline image.
///
/// Unknown placeholders are left verbatim.
pub fn resolve_images<'a>(text: &'a str, images: &ImageTable) -> Cow<'a, str> {
    IMAGE_PLACEHOLDER.replace_all(text, |caps: &Captures| {
        let token = &caps[1];
        match images.get(token) {
            Some(uri) => format!(r#"<img src="{}" /><br>"#, escape_xml(uri)),
            None => {
                tracing::debug!(token, "no image registered for placeholder");
                caps[0].to_string()
            }
        }
    })
}

/// Drop the `<strong>` tags produced by [`render_inline`], keeping their content.
///
/// Only meaningful on escaped text, where these are the only raw tags left.
pub(crate) fn strip_emphasis(text: &str) -> String {
    text.replace("<strong>", "").replace("</strong>", "")
}

/// Turn stored line breaks into `<br>` markers.
pub fn text_to_html(text: &str) -> String {
    text.replace('\n', "<br>")
}

/// Wrap text in a CDATA section, splitting any `]]>` it contains.
pub fn cdata(text: &str) -> String {
    format!("<![CDATA[{}]]>", text.replace("]]>", "]]]]><![CDATA[>"))
}
