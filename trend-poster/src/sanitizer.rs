//! Plain-text cleanup for feed fields.

use regex::{Captures, Regex};
use std::sync::OnceLock;

/// Named references that HTML allows without the trailing semicolon.
const LEGACY_ENTITIES: [&str; 106] = [
    "AElig", "AMP", "Aacute", "Acirc", "Agrave", "Aring", "Atilde", "Auml", "COPY", "Ccedil",
    "ETH", "Eacute", "Ecirc", "Egrave", "Euml", "GT", "Iacute", "Icirc", "Igrave", "Iuml", "LT",
    "Ntilde", "Oacute", "Ocirc", "Ograve", "Oslash", "Otilde", "Ouml", "QUOT", "REG", "THORN",
    "Uacute", "Ucirc", "Ugrave", "Uuml", "Yacute", "aacute", "acirc", "acute", "aelig", "agrave",
    "amp", "aring", "atilde", "auml", "brvbar", "ccedil", "cedil", "cent", "copy", "curren",
    "deg", "divide", "eacute", "ecirc", "egrave", "eth", "euml", "frac12", "frac14", "frac34",
    "gt", "iacute", "icirc", "iexcl", "igrave", "iquest", "iuml", "laquo", "lt", "macr", "micro",
    "middot", "nbsp", "not", "ntilde", "oacute", "ocirc", "ograve", "ordf", "ordm", "oslash",
    "otilde", "ouml", "para", "plusmn", "pound", "quot", "raquo", "reg", "sect", "shy", "sup1",
    "sup2", "sup3", "szlig", "thorn", "times", "uacute", "ucirc", "ugrave", "uml", "uuml",
    "yacute", "yen", "yuml",
];

fn tag_pattern() -> &'static Regex {
    static TAG: OnceLock<Regex> = OnceLock::new();
    TAG.get_or_init(|| Regex::new(r"<.*?>").expect("tag pattern is valid"))
}

fn entity_pattern() -> &'static Regex {
    static ENTITY: OnceLock<Regex> = OnceLock::new();
    ENTITY.get_or_init(|| {
        Regex::new(r"&(#[0-9]+;?|#[xX][0-9a-fA-F]+;?|[^\t\n\x0C <&#;]{1,32};?)")
            .expect("entity pattern is valid")
    })
}

/// Remove markup tags (shortest `<...>` match) and decode HTML entities,
/// including the legacy forms written without a semicolon.
///
/// Never fails: an unterminated `<` is left in place and anything that
/// does not look like an entity is passed through untouched.
pub fn sanitize(raw: &str) -> String {
    let stripped = tag_pattern().replace_all(raw, "");
    decode_entities(&stripped)
}

/// Single pass, so `&amp;nbsp;` becomes `&nbsp;` and not a space.
pub fn decode_entities(text: &str) -> String {
    entity_pattern()
        .replace_all(text, |caps: &Captures| decode_reference(&caps[0], &caps[1]))
        .into_owned()
}

fn decode_reference(whole: &str, reference: &str) -> String {
    if let Some(digits) = reference.strip_prefix('#') {
        return decode_numeric(digits.trim_end_matches(';')).to_string();
    }

    if reference.ends_with(';') {
        if let Some(decoded) = lookup_named(reference.trim_end_matches(';')) {
            return decoded;
        }
    } else if LEGACY_ENTITIES.contains(&reference) {
        if let Some(decoded) = lookup_named(reference) {
            return decoded;
        }
    }

    // Longest legacy name that prefixes the reference, e.g. `&nbspx`.
    for end in (2..reference.len()).rev() {
        if !reference.is_char_boundary(end) {
            continue;
        }
        let (name, rest) = reference.split_at(end);
        if LEGACY_ENTITIES.contains(&name) {
            if let Some(decoded) = lookup_named(name) {
                return decoded + rest;
            }
        }
    }

    whole.to_string()
}

fn lookup_named(name: &str) -> Option<String> {
    let reference = format!("&{};", name);
    let decoded = html_escape::decode_html_entities(&reference);
    if decoded == reference {
        None
    } else {
        Some(decoded.into_owned())
    }
}

fn decode_numeric(digits: &str) -> char {
    let value = match digits.strip_prefix(|c: char| c == 'x' || c == 'X') {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => digits.parse::<u32>(),
    };
    match value {
        Ok(0) | Err(_) => char::REPLACEMENT_CHARACTER,
        Ok(code) => char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER),
    }
}
