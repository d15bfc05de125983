//! Plain-language rewriting of legal clauses
//!
//! Legal terms and phrases are replaced in table order (not longest match),
//! then overlong results are broken at commas and semicolons.

use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};

/// Results with more words than this get split into shorter sentences
pub const MAX_SENTENCE_WORDS: usize = 30;

/// Legal term to plain-language replacement, applied top to bottom
pub const SIMPLIFICATIONS: &[(&str, &str)] = &[
    ("hereby", "by this agreement"),
    ("whereas", "considering that"),
    ("aforesaid", "mentioned above"),
    ("hereinafter", "from now on"),
    ("notwithstanding", "despite"),
    ("provided that", "on condition that"),
    ("subject to", "depending on"),
    ("in accordance with", "following"),
    ("for the purpose of", "to"),
    ("with respect to", "regarding"),
    ("prior to", "before"),
    ("subsequent to", "after"),
    ("terminate", "end"),
    ("cease", "stop"),
    ("commence", "begin"),
    ("obligation", "duty"),
    ("liability", "responsibility"),
    ("indemnify", "protect from loss"),
    ("breach", "violation"),
    ("remedy", "solution"),
];

static RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    SIMPLIFICATIONS
        .iter()
        .map(|(term, replacement)| {
            let pattern = format!(r"(?i)\b{}\b", regex::escape(term));
            // Terms are fixed ASCII words and phrases
            (Regex::new(&pattern).unwrap(), *replacement)
        })
        .collect()
});

static CLAUSE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"[,;]").unwrap());

/// Rewrite a clause in plainer language
pub fn simplify(clause: &str) -> String {
    let mut simplified = clause.to_string();
    for (pattern, replacement) in RULES.iter() {
        if pattern.is_match(&simplified) {
            simplified = pattern
                .replace_all(&simplified, NoExpand(replacement))
                .into_owned();
        }
    }

    if simplified.split_whitespace().count() > MAX_SENTENCE_WORDS {
        simplified = break_long_sentence(&simplified);
    }

    simplified
}

/// Readability pass: may leave sentence fragments behind
fn break_long_sentence(text: &str) -> String {
    CLAUSE_BREAK
        .split(text)
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join(". ")
}
