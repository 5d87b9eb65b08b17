//! Native override bodies embedded in documentation.
//!
//! A method documents its hand-written implementation for a target language
//! as `<native:LANG>body</native:LANG>`. The tag is matched greedily: the
//! body runs to the last closing tag for the same language.

use std::collections::BTreeMap;

/// Every native body in `doc`, keyed by language tag.
///
/// The first block for a language wins.
pub fn native_bodies(doc: &str) -> BTreeMap<String, String> {
    let mut bodies = BTreeMap::new();
    let mut rest = doc;

    while let Some(open) = rest.find("<native:") {
        let after_prefix = &rest[open + "<native:".len()..];
        let lang_len = after_prefix
            .find(|c: char| !c.is_alphabetic())
            .unwrap_or(after_prefix.len());
        let lang = &after_prefix[..lang_len];
        let Some(body_and_rest) = after_prefix[lang_len..].strip_prefix('>') else {
            rest = after_prefix;
            continue;
        };

        let close = format!("</native:{lang}>");
        match body_and_rest.rfind(&close) {
            Some(end) => {
                bodies
                    .entry(lang.to_owned())
                    .or_insert_with(|| clean_body(&body_and_rest[..end]));
                rest = &body_and_rest[end + close.len()..];
            }
            None => rest = body_and_rest,
        }
    }

    bodies
}

/// The native body for `lang`, if `doc` has one.
pub fn native_body(doc: &str, lang: &str) -> Option<String> {
    native_bodies(doc).remove(lang)
}

fn clean_body(body: &str) -> String {
    body.trim_start_matches('\n')
        .trim_end_matches('\n')
        .trim()
        .to_owned()
}
