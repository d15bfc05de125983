//! Candidate spans and their features
//!
//! Numeric shapes are claimed first by an ordered list of patterns; a later
//! pattern never overlaps an earlier match. Name-like spans are runs of
//! capitalized words found on Unicode word boundaries.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

use super::model::Lexicon;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Candidate {
    pub start: usize,
    pub end: usize,
    pub features: Vec<&'static str>,
}

impl Candidate {
    fn overlaps(&self, start: usize, end: usize) -> bool {
        start < self.end && self.start < end
    }
}

struct NumericShape {
    pattern: Regex,
    features: &'static [&'static str],
}

impl NumericShape {
    fn new(pattern: &str, features: &'static [&'static str]) -> Self {
        Self {
            pattern: Regex::new(pattern).unwrap(),
            features,
        }
    }
}

const MONTHS: &str =
    "January|February|March|April|May|June|July|August|September|October|November|December";

// Earlier shapes win overlapping text
static NUMERIC_SHAPES: Lazy<Vec<NumericShape>> = Lazy::new(|| {
    vec![
        NumericShape::new(
            r"\$\s?\d{1,3}(?:,\d{3})+(?:\.\d+)?|\$\s?\d+(?:\.\d+)?",
            &["shape:money"],
        ),
        NumericShape::new(
            r"\b\d{1,3}(?:,\d{3})+(?:\.\d+)?\s*(?:dollars?|USD|EUR|GBP)\b|\b\d+(?:\.\d+)?\s*(?:dollars?|USD|EUR|GBP)\b",
            &["shape:number", "currency_word"],
        ),
        NumericShape::new(r"\b\d{4}-\d{2}-\d{2}\b", &["shape:date"]),
        NumericShape::new(r"\b\d{1,2}[/-]\d{1,2}[/-]\d{2,4}\b", &["shape:date"]),
        NumericShape::new(
            &format!(
                r"\b(?:{MONTHS})\s+\d{{1,2}}(?:st|nd|rd|th)?(?:,?\s+\d{{4}})?\b|\b\d{{1,2}}(?:st|nd|rd|th)?\s+(?:of\s+)?(?:{MONTHS})(?:,?\s+\d{{4}})?\b|\b(?:{MONTHS})\s+\d{{4}}\b"
            ),
            &["shape:month_date"],
        ),
        NumericShape::new(r"\b(?:19|20)\d{2}\b", &["shape:year", "shape:number"]),
        NumericShape::new(
            r"\b\d{1,3}(?:,\d{3})+(?:\.\d+)?\b|\b\d+(?:\.\d+)?\b",
            &["shape:number"],
        ),
    ]
});

static MONTH_NAMES: Lazy<Vec<String>> =
    Lazy::new(|| MONTHS.split('|').map(str::to_lowercase).collect());

/// All candidate spans in document order
pub(crate) fn candidate_spans(text: &str, lexicon: &Lexicon) -> Vec<Candidate> {
    let mut candidates = numeric_candidates(text);
    let names = name_candidates(text, lexicon, &candidates);
    candidates.extend(names);
    candidates.sort_by_key(|candidate| candidate.start);
    candidates
}

fn numeric_candidates(text: &str) -> Vec<Candidate> {
    let mut taken: Vec<Candidate> = Vec::new();
    for shape in NUMERIC_SHAPES.iter() {
        for m in shape.pattern.find_iter(text) {
            if taken.iter().any(|c| c.overlaps(m.start(), m.end())) {
                continue;
            }
            taken.push(Candidate {
                start: m.start(),
                end: m.end(),
                features: shape.features.to_vec(),
            });
        }
    }
    taken
}

/// Capitalized words collected into one span
#[derive(Debug)]
struct Run<'a> {
    start: usize,
    end: usize,
    tokens: Vec<&'a str>,
    prev_word: Option<&'a str>,
    pending_connector: bool,
}

impl Run<'_> {
    fn accepts_connector(&self, connector: &str) -> bool {
        match connector {
            // "Bank of America", "State of Texas"
            "of" => self.tokens.len() == 1,
            "&" => !self.tokens.is_empty(),
            _ => false,
        }
    }
}

fn name_candidates(text: &str, lexicon: &Lexicon, numeric: &[Candidate]) -> Vec<Candidate> {
    let mut candidates = Vec::new();
    let mut run: Option<Run> = None;
    let mut last_word: Option<&str> = None;

    for (offset, segment) in text.split_word_bound_indices() {
        if segment.chars().all(char::is_whitespace) {
            if segment.contains('\n') {
                close_run(text, lexicon, &mut run, &mut candidates);
            }
            continue;
        }

        let end = offset + segment.len();
        if numeric.iter().any(|c| c.overlaps(offset, end)) {
            close_run(text, lexicon, &mut run, &mut candidates);
            continue;
        }

        if let Some(current) = run.as_mut() {
            if !current.pending_connector && current.accepts_connector(segment) {
                current.pending_connector = true;
                last_word = Some(segment);
                continue;
            }
        }

        let is_word = segment.chars().next().is_some_and(char::is_alphabetic);
        if is_word && is_name_token(segment, lexicon) {
            match run.as_mut() {
                Some(current) => {
                    current.tokens.push(segment);
                    current.end = end;
                    current.pending_connector = false;
                }
                None => {
                    run = Some(Run {
                        start: offset,
                        end,
                        tokens: vec![segment],
                        prev_word: last_word,
                        pending_connector: false,
                    });
                }
            }
        } else {
            close_run(text, lexicon, &mut run, &mut candidates);
        }

        if is_word {
            last_word = Some(segment);
        }
    }
    close_run(text, lexicon, &mut run, &mut candidates);

    candidates
}

fn close_run(
    text: &str,
    lexicon: &Lexicon,
    run: &mut Option<Run<'_>>,
    candidates: &mut Vec<Candidate>,
) {
    if let Some(finished) = run.take() {
        candidates.push(Candidate {
            start: finished.start,
            end: finished.end,
            features: run_features(text, &finished, lexicon),
        });
    }
}

fn is_name_token(word: &str, lexicon: &Lexicon) -> bool {
    if !word.chars().next().is_some_and(char::is_uppercase) {
        return false;
    }
    let lower = word.to_lowercase();
    !(lexicon.non_entities.contains(&lower)
        || lexicon.titles.contains(&lower)
        || MONTH_NAMES.contains(&lower))
}

fn is_all_caps(word: &str) -> bool {
    word.chars().count() > 1 && word.chars().all(|c| !c.is_lowercase())
}

fn run_features(text: &str, run: &Run, lexicon: &Lexicon) -> Vec<&'static str> {
    let tokens: Vec<String> = run.tokens.iter().map(|t| t.to_lowercase()).collect();
    let span = text[run.start..run.end].to_lowercase();
    let mut features = vec!["shape:capitalized"];

    if run.tokens.iter().all(|t| is_all_caps(t)) {
        features.push("shape:all_caps");
    }

    features.push(match tokens.len() {
        1 => "len:1",
        2 => "len:2",
        _ => "len:3+",
    });

    if let Some(prev) = run.prev_word.map(str::to_lowercase) {
        if lexicon.titles.contains(&prev) {
            features.push("title_before");
        }
        if lexicon.location_prepositions.contains(&prev) {
            features.push("prev:location_preposition");
        }
    }

    if tokens.first().is_some_and(|t| lexicon.first_names.contains(t)) {
        features.push("first_name");
    }

    let last = tokens.last().map(String::as_str).unwrap_or_default();
    let org_suffix = lexicon.org_suffixes.contains(last);
    let org_keyword = tokens.iter().any(|t| lexicon.org_keywords.contains(t));
    if org_suffix {
        features.push("org_suffix");
    }
    if org_keyword {
        features.push("org_keyword");
    }
    if tokens.len() == 1 && (org_suffix || org_keyword) {
        features.push("bare_org_word");
    }
    if lexicon.law_keywords.contains(last) {
        features.push("law_keyword");
    }
    if lexicon.gpe.contains(&span) {
        features.push("gpe");
    }
    if tokens.iter().any(|t| lexicon.gpe.contains(t)) {
        features.push("gpe_token");
    }

    features
}
