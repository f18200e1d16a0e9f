//! SEO Evaluator: deterministic scoring of an article against a keyword set.
//!
//! `evaluate()` is a pure function: no I/O, no logging, no shared state. It
//! computes six independent metrics (see `metrics`), combines them with the
//! fixed weights below into a 0–100 total, and emits one recommendation per
//! metric whose sub-score falls below that metric's threshold.
//!
//! | metric             | weight | threshold |
//! |--------------------|--------|-----------|
//! | keyword_density    | 0.20   | 60        |
//! | keyword_coverage   | 0.15   | 80        |
//! | first_paragraph    | 0.10   | 100       |
//! | headings           | 0.20   | 80        |
//! | readability        | 0.20   | 65        |
//! | meta_description   | 0.15   | 90        |

pub mod metrics;
pub mod text;

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Article, KeywordSet};
use metrics::{clamp_score, MetricReading};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    KeywordDensity,
    KeywordCoverage,
    FirstParagraph,
    Headings,
    Readability,
    MetaDescription,
}

impl Metric {
    /// Evaluation order. Recommendations follow this order.
    pub const ALL: [Metric; 6] = [
        Metric::KeywordDensity,
        Metric::KeywordCoverage,
        Metric::FirstParagraph,
        Metric::Headings,
        Metric::Readability,
        Metric::MetaDescription,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Metric::KeywordDensity => "keyword_density",
            Metric::KeywordCoverage => "keyword_coverage",
            Metric::FirstParagraph => "first_paragraph",
            Metric::Headings => "headings",
            Metric::Readability => "readability",
            Metric::MetaDescription => "meta_description",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Metric::KeywordDensity => "Keyword density",
            Metric::KeywordCoverage => "Keyword coverage",
            Metric::FirstParagraph => "First paragraph",
            Metric::Headings => "Headings",
            Metric::Readability => "Readability",
            Metric::MetaDescription => "Meta description",
        }
    }

    /// Share of the total score. All weights sum to 1.0.
    pub fn weight(self) -> f64 {
        match self {
            Metric::KeywordDensity => 0.20,
            Metric::KeywordCoverage => 0.15,
            Metric::FirstParagraph => 0.10,
            Metric::Headings => 0.20,
            Metric::Readability => 0.20,
            Metric::MetaDescription => 0.15,
        }
    }

    /// Sub-scores strictly below this produce a recommendation.
    pub fn threshold(self) -> u8 {
        match self {
            Metric::KeywordDensity => 60,
            Metric::KeywordCoverage => 80,
            Metric::FirstParagraph => 100,
            Metric::Headings => 80,
            Metric::Readability => 65,
            Metric::MetaDescription => 90,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricScore {
    /// density %, coverage fraction, heading count, Flesch score or meta length.
    pub raw_value: Option<f64>,
    pub score: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub metric: Metric,
    pub message: String,
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub total_score: u8,
    /// Keyed by metric; iteration order is evaluation order.
    pub metrics: BTreeMap<Metric, MetricScore>,
    pub recommendations: Vec<Recommendation>,
}

impl EvaluationResult {
    pub fn score(&self, metric: Metric) -> u8 {
        self.metrics.get(&metric).map_or(0, |m| m.score)
    }

    pub fn raw_value(&self, metric: Metric) -> Option<f64> {
        self.metrics.get(&metric).and_then(|m| m.raw_value)
    }
}

/// Evaluates an article against target keywords.
///
/// `primary_keyword` defaults to the first non-blank keyword. Fails with
/// `InvalidInput` when no keyword is usable or the body is blank.
pub fn evaluate(
    article: &Article,
    keywords: &[String],
    primary_keyword: Option<&str>,
) -> Result<EvaluationResult, EvaluationError> {
    let keywords = KeywordSet::new(keywords).with_primary(primary_keyword);
    evaluate_keyword_set(article, &keywords)
}

pub fn evaluate_keyword_set(
    article: &Article,
    keywords: &KeywordSet,
) -> Result<EvaluationResult, EvaluationError> {
    // An explicit primary keyword does not stand in for an empty set.
    let primary = match keywords.primary() {
        Some(primary) if !keywords.is_empty() => primary,
        _ => {
            return Err(EvaluationError::InvalidInput(
                "At least one keyword is required for SEO evaluation".into(),
            ))
        }
    };
    if article.body.trim().is_empty() {
        return Err(EvaluationError::InvalidInput(
            "Article body must not be blank".into(),
        ));
    }

    let readings = Metric::ALL.map(|metric| {
        let reading = match metric {
            Metric::KeywordDensity => metrics::keyword_density(&article.body, primary),
            Metric::KeywordCoverage => metrics::keyword_coverage(&article.body, keywords),
            Metric::FirstParagraph => metrics::first_paragraph_usage(&article.body, primary),
            Metric::Headings => metrics::heading_quality(article, keywords),
            Metric::Readability => metrics::readability(&article.body),
            Metric::MetaDescription => {
                metrics::meta_description_health(article.meta_description(), primary)
            }
        };
        (metric, reading)
    });

    let weighted: f64 = readings
        .iter()
        .map(|(metric, reading)| metric.weight() * f64::from(reading.score))
        .sum();

    let recommendations = readings
        .iter()
        .filter(|(metric, reading)| reading.score < metric.threshold())
        .map(|(metric, reading)| recommend(*metric, reading))
        .collect();

    let metrics = readings
        .into_iter()
        .map(|(metric, reading)| {
            (
                metric,
                MetricScore {
                    raw_value: reading.raw_value,
                    score: reading.score,
                },
            )
        })
        .collect();

    Ok(EvaluationResult {
        total_score: clamp_score(weighted),
        metrics,
        recommendations,
    })
}

fn recommend(metric: Metric, reading: &MetricReading) -> Recommendation {
    let detail = reading
        .shortfall
        .clone()
        .unwrap_or_else(|| format!("score {} is below {}", reading.score, metric.threshold()));
    Recommendation {
        metric,
        message: format!("{}: {detail}.", metric.label()),
    }
}
