//! Strips markdown code fences that models wrap around their output.

use std::sync::LazyLock;

use regex::Regex;

static LEADING_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^```[A-Za-z0-9_+.-]*[ \t]*(?:\r?\n|$)").expect("valid regex"));

static TRAILING_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\r?\n)?[ \t]*```$").expect("valid regex"));

/// Removes a leading ```` ```<tag> ```` line and a trailing ```` ``` ````, then trims.
///
/// Fences are peeled until none are left, so `sanitize(sanitize(x)) == sanitize(x)`.
/// The result is not validated as markup.
pub fn sanitize(raw: &str) -> String {
    let mut current = raw.trim();

    loop {
        let mut next = current;

        if let Some(found) = LEADING_FENCE.find(next) {
            next = &next[found.end()..];
        }
        if let Some(found) = TRAILING_FENCE.find(next) {
            next = &next[..found.start()];
        }
        next = next.trim();

        if next.len() == current.len() {
            return next.to_string();
        }
        current = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_svg_fence() {
        assert_eq!(sanitize("```svg\n<svg/>\n```"), "<svg/>");
    }

    #[test]
    fn clean_input_is_unchanged() {
        assert_eq!(sanitize("<svg/>"), "<svg/>");
    }

    #[test]
    fn strips_untagged_and_other_tags() {
        assert_eq!(sanitize("```\n<svg/>\n```"), "<svg/>");
        assert_eq!(sanitize("```xml\r\n<svg/>\r\n```"), "<svg/>");
        assert_eq!(sanitize("  \n```svg\n<svg/>```  \n"), "<svg/>");
    }

    #[test]
    fn strips_only_one_side_when_needed() {
        assert_eq!(sanitize("```svg\n<svg/>"), "<svg/>");
        assert_eq!(sanitize("<svg/>\n```"), "<svg/>");
    }

    #[test]
    fn keeps_inner_backticks() {
        let raw = "```svg\n<svg><text>`a` ```b```</text></svg>\n```";
        assert_eq!(sanitize(raw), "<svg><text>`a` ```b```</text></svg>");
    }

    #[test]
    fn is_idempotent() {
        let samples = [
            "",
            "```",
            "``````",
            "```svg\n```svg\n<svg/>\n```\n```",
            "   <svg viewBox='0 0 200 200'></svg>   ",
            "```svg\n\n```",
            "text ``` more",
            "```svg<svg/>```",
        ];

        for sample in samples {
            let once = sanitize(sample);
            assert_eq!(sanitize(&once), once, "input: {sample:?}");
        }
    }

    #[test]
    fn nested_fences_are_peeled() {
        assert_eq!(sanitize("```svg\n```svg\n<svg/>\n```\n```"), "<svg/>");
    }
}
