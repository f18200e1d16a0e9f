//! The six SEO metrics. Each function is independent and returns a
//! `MetricReading`: the raw measurement, a 0–100 sub-score and, whenever the
//! sub-score is below its maximum, a description of the shortfall.

use crate::evaluation::text::{
    count_occurrences, first_paragraph, headings, sentence_count, syllables, words,
};
use crate::models::{Article, KeywordSet};

/// Density band (percent of words) that scores 100.
pub const DENSITY_IDEAL_LOW: f64 = 1.0;
pub const DENSITY_IDEAL_HIGH: f64 = 2.0;
/// Density (percent) at and above which the sub-score is 0.
pub const DENSITY_SATURATION: f64 = 5.0;

/// Fixed score when the primary keyword misses the first paragraph.
pub const FIRST_PARAGRAPH_MISS_SCORE: u8 = 0;

const HEADING_SINGLE_H1_POINTS: f64 = 40.0;
const HEADING_H2_POINTS: f64 = 30.0;
const HEADING_KEYWORD_POINTS: f64 = 30.0;

pub const META_MIN_LEN: usize = 70;
pub const META_MAX_LEN: usize = 160;
const META_PRESENT_POINTS: f64 = 20.0;
const META_LENGTH_POINTS: f64 = 40.0;
const META_KEYWORD_POINTS: f64 = 40.0;

/// Readability signals used when explaining a low score.
const LONG_SENTENCE_WORDS: f64 = 20.0;
const COMPLEX_SYLLABLES_PER_WORD: f64 = 1.5;

#[derive(Debug, Clone, PartialEq)]
pub struct MetricReading {
    pub raw_value: Option<f64>,
    pub score: u8,
    pub shortfall: Option<String>,
}

impl MetricReading {
    fn new(raw_value: Option<f64>, score: u8, shortfall: Option<String>) -> Self {
        Self {
            raw_value,
            score,
            shortfall,
        }
    }
}

/// Rounds and clamps a score into 0–100.
pub fn clamp_score(score: f64) -> u8 {
    score.round().clamp(0.0, 100.0) as u8
}

// ────────────────────────────────────────────────────────────────────────────
// Keyword density
// ────────────────────────────────────────────────────────────────────────────

/// Primary keyword occurrences per 100 words of body.
pub fn keyword_density(body: &str, primary: &str) -> MetricReading {
    let body_lower = body.to_lowercase();
    let total_words = words(&body_lower).len();
    let occurrences = count_occurrences(&body_lower, &primary.to_lowercase());

    let density = if total_words == 0 {
        0.0
    } else {
        occurrences as f64 / total_words as f64 * 100.0
    };
    let score = clamp_score(density_score(density));

    let shortfall = if total_words == 0 {
        Some("the article body has no words to measure".to_string())
    } else if density < DENSITY_IDEAL_LOW {
        Some(format!(
            "primary keyword '{primary}' density is {density:.2}%, use it more often (target {DENSITY_IDEAL_LOW}%-{DENSITY_IDEAL_HIGH}%)"
        ))
    } else if density > DENSITY_IDEAL_HIGH {
        Some(format!(
            "primary keyword '{primary}' density is {density:.2}%, reduce keyword stuffing (target {DENSITY_IDEAL_LOW}%-{DENSITY_IDEAL_HIGH}%)"
        ))
    } else {
        None
    };

    MetricReading::new(Some(density), score, shortfall)
}

/// Piecewise-linear: 0 at 0%, 100 across the ideal band, 0 at saturation.
pub fn density_score(density: f64) -> f64 {
    if density <= 0.0 {
        0.0
    } else if density < DENSITY_IDEAL_LOW {
        100.0 * density / DENSITY_IDEAL_LOW
    } else if density <= DENSITY_IDEAL_HIGH {
        100.0
    } else if density >= DENSITY_SATURATION {
        0.0
    } else {
        100.0 * (DENSITY_SATURATION - density) / (DENSITY_SATURATION - DENSITY_IDEAL_HIGH)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Keyword coverage
// ────────────────────────────────────────────────────────────────────────────

pub fn keyword_coverage(body: &str, keywords: &KeywordSet) -> MetricReading {
    let body_lower = body.to_lowercase();
    let missing: Vec<&str> = keywords
        .keywords()
        .iter()
        .filter(|k| count_occurrences(&body_lower, &k.to_lowercase()) == 0)
        .map(String::as_str)
        .collect();

    let total = keywords.len().max(1);
    let coverage = (keywords.len() - missing.len()) as f64 / total as f64;
    let score = clamp_score(coverage * 100.0);

    let shortfall = (!missing.is_empty())
        .then(|| format!("keywords missing from the body: {}", missing.join(", ")));

    MetricReading::new(Some(coverage), score, shortfall)
}

// ────────────────────────────────────────────────────────────────────────────
// First paragraph
// ────────────────────────────────────────────────────────────────────────────

pub fn first_paragraph_usage(body: &str, primary: &str) -> MetricReading {
    let paragraph = first_paragraph(body).to_lowercase();
    let found = count_occurrences(&paragraph, &primary.to_lowercase()) > 0;

    if found {
        MetricReading::new(None, 100, None)
    } else {
        MetricReading::new(
            None,
            FIRST_PARAGRAPH_MISS_SCORE,
            Some(format!(
                "primary keyword '{primary}' is missing from the first paragraph"
            )),
        )
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Headings
// ────────────────────────────────────────────────────────────────────────────

/// 40 for exactly one H1, 30 for at least one H2, and up to 30 for the share
/// of keywords that appear in the title or any heading.
pub fn heading_quality(article: &Article, keywords: &KeywordSet) -> MetricReading {
    let found = headings(&article.body);
    if found.is_empty() {
        return MetricReading::new(
            Some(0.0),
            0,
            Some("no markdown headings found, add an H1 title and H2 sections".to_string()),
        );
    }

    let h1_count = found.iter().filter(|h| h.level == 1).count();
    let h2_count = found.iter().filter(|h| h.level == 2).count();

    let heading_text = std::iter::once(article.title.as_str())
        .chain(found.iter().map(|h| h.text))
        .collect::<Vec<_>>()
        .join("\n")
        .to_lowercase();
    let missing: Vec<&str> = keywords
        .keywords()
        .iter()
        .filter(|k| count_occurrences(&heading_text, &k.to_lowercase()) == 0)
        .map(String::as_str)
        .collect();
    let keyword_share = (keywords.len() - missing.len()) as f64 / keywords.len().max(1) as f64;

    let mut score = HEADING_KEYWORD_POINTS * keyword_share;
    let mut issues = Vec::new();

    match h1_count {
        1 => score += HEADING_SINGLE_H1_POINTS,
        0 => issues.push("add a single H1 heading".to_string()),
        n => issues.push(format!("use exactly one H1 heading (found {n})")),
    }
    if h2_count > 0 {
        score += HEADING_H2_POINTS;
    } else {
        issues.push("add at least one H2 section heading".to_string());
    }
    if !missing.is_empty() {
        issues.push(format!(
            "work these keywords into headings: {}",
            missing.join(", ")
        ));
    }

    let shortfall = (!issues.is_empty()).then(|| issues.join("; "));
    MetricReading::new(Some(found.len() as f64), clamp_score(score), shortfall)
}

// ────────────────────────────────────────────────────────────────────────────
// Readability
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReadabilityStats {
    pub words: usize,
    pub sentences: usize,
    pub syllables: usize,
    pub flesch: f64,
}

/// Flesch Reading Ease with zero-sentence and zero-syllable guards. A text
/// with no words at all scores 0.
pub fn readability_stats(text: &str) -> ReadabilityStats {
    let tokens = words(text);
    let sentences = sentence_count(text).max(1);
    let syllable_total = tokens.iter().map(|w| syllables(w)).sum::<usize>().max(1);

    let flesch = if tokens.is_empty() {
        0.0
    } else {
        let word_count = tokens.len() as f64;
        206.835
            - 1.015 * (word_count / sentences as f64)
            - 84.6 * (syllable_total as f64 / word_count)
    };

    ReadabilityStats {
        words: tokens.len(),
        sentences,
        syllables: syllable_total,
        flesch,
    }
}

pub fn readability(body: &str) -> MetricReading {
    let stats = readability_stats(body);
    let score = clamp_score(stats.flesch);

    let shortfall = (score < 100).then(|| {
        let mut tip = format!("Flesch reading ease is {:.1}", stats.flesch);
        if stats.words == 0 {
            tip.push_str(", the body has no readable prose");
            return tip;
        }
        let words_per_sentence = stats.words as f64 / stats.sentences as f64;
        let syllables_per_word = stats.syllables as f64 / stats.words as f64;
        if words_per_sentence > LONG_SENTENCE_WORDS {
            tip.push_str(&format!(
                ", shorten sentences (average {words_per_sentence:.1} words)"
            ));
        }
        if syllables_per_word > COMPLEX_SYLLABLES_PER_WORD {
            tip.push_str(&format!(
                ", prefer simpler words (average {syllables_per_word:.2} syllables)"
            ));
        }
        tip
    });

    MetricReading::new(Some(stats.flesch), score, shortfall)
}

// ────────────────────────────────────────────────────────────────────────────
// Meta description
// ────────────────────────────────────────────────────────────────────────────

/// 20 for presence, up to 40 for length within 70–160 characters, 40 for the
/// primary keyword.
pub fn meta_description_health(meta: Option<&str>, primary: &str) -> MetricReading {
    let Some(meta) = meta else {
        return MetricReading::new(None, 0, Some("meta description is missing".to_string()));
    };

    let length = meta.chars().count();
    let mut issues = Vec::new();

    let length_points = if length < META_MIN_LEN {
        issues.push(format!(
            "meta description too short ({length} chars, aim for {META_MIN_LEN}-{META_MAX_LEN})"
        ));
        META_LENGTH_POINTS * length as f64 / META_MIN_LEN as f64
    } else if length > META_MAX_LEN {
        issues.push(format!(
            "meta description too long ({length} chars, keep it within {META_MAX_LEN})"
        ));
        let overshoot = (length - META_MAX_LEN) as f64 / META_MAX_LEN as f64;
        (META_LENGTH_POINTS * (1.0 - overshoot)).max(0.0)
    } else {
        META_LENGTH_POINTS
    };

    let has_primary = count_occurrences(&meta.to_lowercase(), &primary.to_lowercase()) > 0;
    let keyword_points = if has_primary {
        META_KEYWORD_POINTS
    } else {
        issues.push(format!(
            "meta description missing primary keyword '{primary}'"
        ));
        0.0
    };

    let score = clamp_score(META_PRESENT_POINTS + length_points + keyword_points);
    let shortfall = (!issues.is_empty()).then(|| issues.join("; "));

    MetricReading::new(Some(length as f64), score, shortfall)
}
