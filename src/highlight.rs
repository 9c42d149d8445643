use colored::{ColoredString, Colorize};
use regex::Regex;

use crate::config::HighlightTag;

/// Renders `tag` elements of an excerpt as colored terminal text.
pub fn preview(excerpt: &str, tag: HighlightTag, color: &str) -> String {
    let pattern = match element_pattern(tag) {
        Some(p) => p,
        None => return excerpt.to_string(),
    };

    let mut result = String::with_capacity(excerpt.len());
    let mut start_from = 0;
    for caps in pattern.captures_iter(excerpt) {
        let (element, inner) = match (caps.get(0), caps.get(1)) {
            (Some(element), Some(inner)) => (element, inner),
            _ => continue,
        };
        result.push_str(&excerpt[start_from..element.start()]);
        result.push_str(&format!("{}", paint(inner.as_str(), color)));
        start_from = element.end();
    }

    result.push_str(&excerpt[start_from..]);
    result
}

fn element_pattern(tag: HighlightTag) -> Option<Regex> {
    Regex::new(&format!(r"(?is)<{0}\b[^>]*>(.*?)</{0}\s*>", tag.as_str())).ok()
}

fn paint(text: &str, color: &str) -> ColoredString {
    match parse_hex(color) {
        Some((r, g, b)) => text.truecolor(r, g, b).bold(),
        None => text.red().bold(),
    }
}

/// Parses `#rrggbb` and `#rgb` colors.
fn parse_hex(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.trim().strip_prefix('#')?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        6 => Some((channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
        3 => {
            let short = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
            Some((short(0)?, short(1)?, short(2)?))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_highlight_elements() {
        colored::control::set_override(false);
        let excerpt = "a <span class=\"ep-highlight\">cat</span> and a <SPAN>dog</SPAN> <em>x</em>";
        assert_eq!(preview(excerpt, HighlightTag::Span, ""), "a cat and a dog <em>x</em>");
        assert_eq!(preview("no highlight", HighlightTag::Span, "#f00"), "no highlight");
    }

    #[test]
    fn only_the_given_tag_is_previewed() {
        colored::control::set_override(false);
        assert_eq!(preview("<mark>a</mark> <b>b</b>", HighlightTag::Mark, "red"), "a <b>b</b>");
    }

    #[test]
    fn hex_colors() {
        assert_eq!(parse_hex("#ff0080"), Some((255, 0, 128)));
        assert_eq!(parse_hex(" #f00 "), Some((255, 0, 0)));
        assert_eq!(parse_hex("red"), None);
        assert_eq!(parse_hex("#ff00"), None);
        assert_eq!(parse_hex("#gg0000"), None);
    }
}
