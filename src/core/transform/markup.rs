//! Markup translation from the note service's rich text to ENML
//!
//! Translation is an ordered table of regex rewrites applied to the whole
//! string. No rule's pattern matches the output of an earlier rule, so
//! applying the table to already-translated markup leaves it unchanged.

use crate::domain::{MinoteError, Result};
use regex::Regex;

/// Ordered (pattern, replacement) table; `(?s)` lets `.` cross newlines
const RULES: &[(&str, &str)] = &[
    (r"(?s)<text(?:\s[^>]*)?>(.*?)</text>", "<div>${1}</div>"),
    (r"(?s)<new-format>(.*?)</new-format>", "${1}"),
    (r"(?s)<delete>(.*?)</delete>", "<s>${1}</s>"),
    (
        r#"<input type="checkbox" checked="([^"]*)""#,
        r#"<en-todo checked="${1}""#,
    ),
    (
        r"(?s)<size>(.*?)</size>",
        r#"<font style="font-size:18pt">${1}</font>"#,
    ),
    (
        r"(?s)<mid-size>(.*?)</mid-size>",
        r#"<font style="font-size:16pt">${1}</font>"#,
    ),
    (
        r"(?s)<h3-size>(.*?)</h3-size>",
        r#"<font style="font-size:14pt">${1}</font>"#,
    ),
    (
        r#"(?s)<background color="([^"]*)">(.*?)</background>"#,
        r#"<span style="background-color:${1};-evernote-highlight:true;">${2}</span>"#,
    ),
];

struct Rule {
    pattern: Regex,
    replacement: &'static str,
}

/// Stateless translator holding the compiled rule table
///
/// # Example
///
/// ```
/// use minote::core::transform::ContentTranslator;
///
/// let translator = ContentTranslator::new().unwrap();
/// assert_eq!(
///     translator.translate("<text>milk</text>\n<delete>eggs</delete>"),
///     "<div>milk</div>\n\n<s>eggs</s>"
/// );
/// ```
pub struct ContentTranslator {
    rules: Vec<Rule>,
}

impl ContentTranslator {
    /// Compiles the rule table
    pub fn new() -> Result<Self> {
        let rules = RULES
            .iter()
            .map(|&(pattern, replacement)| {
                Regex::new(pattern)
                    .map(|pattern| Rule {
                        pattern,
                        replacement,
                    })
                    .map_err(|e| MinoteError::Configuration(format!("Invalid markup rule: {e}")))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    /// Applies the rewrite rules in order, without touching newlines
    pub fn apply_rules(&self, raw: &str) -> String {
        let mut content = raw.to_string();
        for rule in &self.rules {
            content = rule
                .pattern
                .replace_all(&content, rule.replacement)
                .into_owned();
        }
        content
    }

    /// Full translation: rule table, then every `\n` becomes `\n\n`
    ///
    /// The doubling is what makes line breaks survive ENEX import.
    pub fn translate(&self, raw: &str) -> String {
        self.apply_rules(raw).replace('\n', "\n\n")
    }
}

/// Escapes `& < > " '` for use as XML text or attribute content
pub fn escape_text(text: &str) -> String {
    quick_xml::escape::escape(text).into_owned()
}

/// Wraps a translated body in the ENML document carried by `<content>`
pub fn enml_document(body: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <!DOCTYPE en-note SYSTEM \"http://xml.evernote.com/pub/enml2.dtd\">\n\
         <en-note><div>{body}</div></en-note>"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn translator() -> ContentTranslator {
        ContentTranslator::new().unwrap()
    }

    #[test_case("<text>a</text>", "<div>a</div>" ; "text block")]
    #[test_case(r#"<text indent="1">a</text>"#, "<div>a</div>" ; "text block with attributes")]
    #[test_case("<new-format>a</new-format>", "a" ; "new format unwrapped")]
    #[test_case("<delete>a</delete>", "<s>a</s>" ; "strikethrough")]
    #[test_case(r#"<input type="checkbox" checked="true" />"#, r#"<en-todo checked="true" />"# ; "checkbox")]
    #[test_case("<size>a</size>", r#"<font style="font-size:18pt">a</font>"# ; "large")]
    #[test_case("<mid-size>a</mid-size>", r#"<font style="font-size:16pt">a</font>"# ; "medium")]
    #[test_case("<h3-size>a</h3-size>", r#"<font style="font-size:14pt">a</font>"# ; "h3")]
    #[test_case(
        r##"<background color="#ff0">a</background>"##,
        r##"<span style="background-color:#ff0;-evernote-highlight:true;">a</span>"## ;
        "highlight"
    )]
    fn test_single_rule(raw: &str, expected: &str) {
        assert_eq!(translator().apply_rules(raw), expected);
    }

    #[test]
    fn test_rules_span_newlines() {
        assert_eq!(
            translator().apply_rules("<text>line one\nline two</text>"),
            "<div>line one\nline two</div>"
        );
    }

    #[test]
    fn test_textarea_not_treated_as_text() {
        let raw = "<textarea>x</textarea>";
        assert_eq!(translator().apply_rules(raw), raw);
    }

    #[test]
    fn test_nested_rules_apply_in_order() {
        let raw = "<new-format><text><size><delete>big gone</delete></size></text></new-format>";
        assert_eq!(
            translator().apply_rules(raw),
            r#"<div><font style="font-size:18pt"><s>big gone</s></font></div>"#
        );
    }

    #[test]
    fn test_translate_doubles_newlines() {
        assert_eq!(translator().translate("a\nb\n"), "a\n\nb\n\n");
    }

    #[test]
    fn test_rules_stable_on_translated_markup() {
        let converted = concat!(
            "<div>Shopping</div>\n",
            r#"<div><en-todo checked="false" />milk</div>"#,
            "\n",
            r#"<font style="font-size:18pt">Big</font>"#,
            r#"<font style="font-size:16pt">Mid</font>"#,
            r#"<font style="font-size:14pt">Small</font>"#,
            "<s>struck</s>",
            r#"<span style="background-color:#ff0;-evernote-highlight:true;">hi</span>"#,
            r#"<div><en-media type="image/png" hash="abc"/></div>"#,
        );
        let t = translator();
        assert_eq!(t.apply_rules(converted), converted);
        assert_eq!(t.apply_rules(&t.apply_rules(converted)), converted);
    }

    #[test]
    fn test_escape_text() {
        assert_eq!(
            escape_text(r#"Tom & "Jerry" <3 'x'"#),
            "Tom &amp; &quot;Jerry&quot; &lt;3 &apos;x&apos;"
        );
    }

    #[test]
    fn test_enml_document() {
        let doc = enml_document("<div>x</div>");
        assert!(doc.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<!DOCTYPE en-note"));
        assert!(doc.ends_with("<en-note><div><div>x</div></div></en-note>"));
    }
}
