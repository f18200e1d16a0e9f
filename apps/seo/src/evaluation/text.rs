//! Text primitives for markdown article bodies: words, keyword matches,
//! paragraphs, headings, sentences and syllables.
//!
//! Everything here is approximate by nature. Syllables in particular are a
//! vowel-group heuristic, not a phonetic dictionary lookup.

/// A markdown ATX heading (`#` through `######`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Heading<'a> {
    pub level: usize,
    pub text: &'a str,
}

fn is_token_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '\'' || c == '-'
}

/// True when `c` would continue a word, i.e. a match next to it is not on a
/// word boundary.
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Splits text into words. Apostrophes and hyphens are kept inside a word
/// (`e-commerce`, `don't`) but trimmed from its edges.
pub fn words(text: &str) -> Vec<&str> {
    text.split(|c: char| !is_token_char(c))
        .map(|w| w.trim_matches(|c: char| c == '\'' || c == '-'))
        .filter(|w| w.chars().any(char::is_alphanumeric))
        .collect()
}

/// Counts non-overlapping, word-bounded occurrences of `needle` in `haystack`.
/// Both arguments must already be lower-cased.
pub fn count_occurrences(haystack: &str, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }

    let mut count = 0;
    let mut start = 0;
    while let Some(pos) = haystack[start..].find(needle) {
        let begin = start + pos;
        let end = begin + needle.len();
        let before = haystack[..begin].chars().next_back();
        let after = haystack[end..].chars().next();
        let bounded = !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char);

        if bounded {
            count += 1;
            start = end;
        } else {
            // Step past the first char of this candidate and keep looking.
            start = begin + haystack[begin..].chars().next().map_or(1, char::len_utf8);
        }
    }
    count
}

/// Case-insensitive, word-bounded presence check.
pub fn contains_keyword(text: &str, keyword: &str) -> bool {
    count_occurrences(&text.to_lowercase(), &keyword.trim().to_lowercase()) > 0
}

/// Parses a single line as a heading. Requires whitespace after the `#` run
/// and non-empty heading text.
pub fn parse_heading(line: &str) -> Option<Heading<'_>> {
    let line = line.trim();
    let level = line.chars().take_while(|&c| c == '#').count();
    if level == 0 || level > 6 {
        return None;
    }

    let rest = &line[level..];
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }

    // Closing hashes ("## Title ##") are decoration.
    let text = rest.trim().trim_end_matches('#').trim();
    if text.is_empty() {
        return None;
    }

    Some(Heading { level, text })
}

pub fn headings(body: &str) -> Vec<Heading<'_>> {
    body.lines().filter_map(parse_heading).collect()
}

/// The first paragraph of the body: leading blank lines and headings are
/// skipped, then lines are collected until the next blank line or heading.
pub fn first_paragraph(body: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();

    for line in body.lines() {
        let trimmed = line.trim();
        let is_boundary = trimmed.is_empty() || parse_heading(trimmed).is_some();

        if is_boundary {
            if lines.is_empty() {
                continue;
            }
            break;
        }
        lines.push(trimmed);
    }

    lines.join(" ")
}

/// Counts sentences. A sentence ends at a run of `.`, `!` or `?` followed by
/// whitespace or the end of the text; segments without any alphanumeric
/// character are not counted. May return 0.
pub fn sentence_count(text: &str) -> usize {
    let mut count = 0;
    let mut has_content = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if matches!(c, '.' | '!' | '?') {
            while chars.next_if(|n| matches!(n, '.' | '!' | '?')).is_some() {}

            let at_boundary = chars.peek().map_or(true, |n| n.is_whitespace());
            if at_boundary {
                if has_content {
                    count += 1;
                }
                has_content = false;
            }
        } else if c.is_alphanumeric() {
            has_content = true;
        }
    }

    if has_content {
        count += 1;
    }
    count
}

/// Approximate syllable count: vowel groups (`aeiouy`), minus a silent
/// trailing `e`, never less than one.
pub fn syllables(word: &str) -> usize {
    let word = word.to_lowercase();
    let mut count = 0;
    let mut prev_was_vowel = false;

    for c in word.chars() {
        let is_vowel = matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
        if is_vowel && !prev_was_vowel {
            count += 1;
        }
        prev_was_vowel = is_vowel;
    }

    if word.ends_with('e') && count > 1 {
        count -= 1;
    }
    count.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_keep_inner_hyphens_and_apostrophes() {
        assert_eq!(
            words("Don't skip e-commerce -- ever!"),
            vec!["Don't", "skip", "e-commerce", "ever"]
        );
    }

    #[test]
    fn test_words_ignore_markdown_markers() {
        assert_eq!(words("## Heading\n- item *bold*"), vec!["Heading", "item", "bold"]);
    }

    #[test]
    fn test_words_empty_for_punctuation_only() {
        assert!(words("# -- !!").is_empty());
    }

    #[test]
    fn test_count_occurrences_respects_word_boundaries() {
        assert_eq!(count_occurrences("seo, seo tools and seoul", "seo"), 2);
    }

    #[test]
    fn test_count_occurrences_multi_word_phrase() {
        let text = "sustainable e-commerce is growing. sustainable e-commerce wins.";
        assert_eq!(count_occurrences(text, "sustainable e-commerce"), 2);
    }

    #[test]
    fn test_count_occurrences_retries_after_unbounded_candidate() {
        assert_eq!(count_occurrences("aseo seo", "seo"), 1);
    }

    #[test]
    fn test_count_occurrences_empty_needle_is_zero() {
        assert_eq!(count_occurrences("anything", ""), 0);
    }

    #[test]
    fn test_contains_keyword_is_case_insensitive() {
        assert!(contains_keyword("Rust Programming rocks", "rust programming"));
        assert!(!contains_keyword("Trusted", "rust"));
    }

    #[test]
    fn test_parse_heading_levels() {
        assert_eq!(
            parse_heading("## Benefits"),
            Some(Heading { level: 2, text: "Benefits" })
        );
        assert_eq!(
            parse_heading("  # Title #"),
            Some(Heading { level: 1, text: "Title" })
        );
    }

    #[test]
    fn test_parse_heading_rejects_non_headings() {
        assert_eq!(parse_heading("#hashtag"), None);
        assert_eq!(parse_heading("#   "), None);
        assert_eq!(parse_heading("####### too deep"), None);
        assert_eq!(parse_heading("plain text"), None);
    }

    #[test]
    fn test_first_paragraph_skips_leading_heading() {
        let body = "# Title\n\nFirst line\nsecond line\n\nNext paragraph.";
        assert_eq!(first_paragraph(body), "First line second line");
    }

    #[test]
    fn test_first_paragraph_stops_at_heading() {
        let body = "Intro text.\n## Section\nMore.";
        assert_eq!(first_paragraph(body), "Intro text.");
    }

    #[test]
    fn test_first_paragraph_empty_when_only_headings() {
        assert_eq!(first_paragraph("# One\n## Two"), "");
    }

    #[test]
    fn test_sentence_count_requires_boundary() {
        assert_eq!(sentence_count("Version 3.5 shipped. It works!"), 2);
        assert_eq!(sentence_count("Wait... what?! Really"), 3);
    }

    #[test]
    fn test_sentence_count_zero_for_punctuation_only() {
        assert_eq!(sentence_count("... !!!"), 0);
        assert_eq!(sentence_count(""), 0);
    }

    #[test]
    fn test_syllables_heuristic() {
        assert_eq!(syllables("cat"), 1);
        assert_eq!(syllables("make"), 1);
        assert_eq!(syllables("readability"), 5);
        assert_eq!(syllables("rhythm"), 1);
        assert_eq!(syllables("xyz"), 1);
        assert_eq!(syllables("bcd"), 1);
    }
}
