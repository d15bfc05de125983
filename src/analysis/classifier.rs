//! Document-type classification
//!
//! A TF-IDF vectorizer and a multinomial naive Bayes model trained on a small
//! keyword lexicon, one training document per keyword. The model is built once
//! and is read-only afterwards.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeMap, HashMap, HashSet};

use super::models::DocumentType;

/// Vocabulary cap for the vectorizer
pub const MAX_FEATURES: usize = 100;

/// Laplace smoothing for the naive Bayes feature counts
const ALPHA: f64 = 1.0;

/// Keywords per document type, one training document each
pub const SEED_LEXICON: &[(DocumentType, &[&str])] = &[
    (
        DocumentType::NonDisclosureAgreement,
        &["confidential", "non-disclosure", "trade secret", "proprietary"],
    ),
    (
        DocumentType::LeaseAgreement,
        &["lease", "tenant", "landlord", "rent", "property"],
    ),
    (
        DocumentType::EmploymentContract,
        &["employment", "employee", "employer", "salary", "benefits"],
    ),
    (
        DocumentType::ServiceAgreement,
        &["service", "provider", "client", "deliverables", "scope"],
    ),
    (
        DocumentType::Other,
        &["agreement", "contract", "terms", "conditions"],
    ),
];

static TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w\w+\b").unwrap());

// Common English function words
static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "about", "above", "across", "after", "afterwards", "again", "against", "all",
        "almost", "alone", "along", "already", "also", "although", "always", "am", "among",
        "amongst", "an", "and", "another", "any", "anyhow", "anyone", "anything", "anyway",
        "anywhere", "are", "around", "as", "at", "back", "be", "became", "because", "become",
        "becomes", "becoming", "been", "before", "beforehand", "behind", "being", "below",
        "beside", "besides", "between", "beyond", "both", "but", "by", "can", "cannot",
        "could", "did", "do", "does", "doing", "done", "down", "due", "during", "each", "eg",
        "either", "else", "elsewhere", "enough", "etc", "even", "ever", "every", "everyone",
        "everything", "everywhere", "except", "few", "for", "former", "formerly", "from",
        "further", "had", "has", "have", "having", "he", "hence", "her", "here", "hereafter",
        "hereby", "herein", "hereupon", "hers", "herself", "him", "himself", "his", "how",
        "however", "ie", "if", "in", "indeed", "into", "is", "it", "its", "itself", "just",
        "keep", "last", "latter", "latterly", "least", "less", "made", "many", "may", "me",
        "meanwhile", "might", "mine", "more", "moreover", "most", "mostly", "much", "must",
        "my", "myself", "namely", "neither", "never", "nevertheless", "next", "no", "nobody",
        "none", "noone", "nor", "not", "nothing", "now", "nowhere", "of", "off", "often", "on",
        "once", "one", "only", "onto", "or", "other", "others", "otherwise", "our", "ours",
        "ourselves", "out", "over", "own", "per", "perhaps", "please", "put", "rather", "re",
        "same", "see", "seem", "seemed", "seeming", "seems", "several", "she", "should",
        "since", "so", "some", "somehow", "someone", "something", "sometime", "sometimes",
        "somewhere", "still", "such", "than", "that", "the", "their", "them", "themselves",
        "then", "thence", "there", "thereafter", "thereby", "therefore", "therein",
        "thereupon", "these", "they", "this", "those", "though", "through", "throughout",
        "thru", "thus", "to", "together", "too", "toward", "towards", "under", "until", "up",
        "upon", "us", "very", "via", "was", "we", "well", "were", "what", "whatever", "when",
        "whence", "whenever", "where", "whereafter", "whereas", "whereby", "wherein",
        "whereupon", "wherever", "whether", "which", "while", "whither", "who", "whoever",
        "whole", "whom", "whose", "why", "will", "with", "within", "without", "would", "yet",
        "you", "your", "yours", "yourself", "yourselves",
    ]
    .into_iter()
    .collect()
});

fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TOKEN
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|token| !STOP_WORDS.contains(token))
        .map(str::to_string)
        .collect()
}

/// Smoothed TF-IDF with L2-normalized output vectors
#[derive(Debug, Clone)]
pub struct TfIdfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl TfIdfVectorizer {
    /// Build the vocabulary and IDF weights from training documents
    pub fn fit(documents: &[&str], max_features: usize) -> Self {
        let tokenized: Vec<Vec<String>> = documents.iter().map(|doc| tokenize(doc)).collect();

        let mut term_counts: BTreeMap<&str, usize> = BTreeMap::new();
        let mut document_frequency: HashMap<&str, usize> = HashMap::new();
        for tokens in &tokenized {
            let unique: HashSet<&str> = tokens.iter().map(String::as_str).collect();
            for token in tokens {
                *term_counts.entry(token.as_str()).or_default() += 1;
            }
            for token in unique {
                *document_frequency.entry(token).or_default() += 1;
            }
        }

        // Most frequent first; BTreeMap iteration breaks ties alphabetically
        let mut ranked: Vec<(&str, usize)> = term_counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        let mut terms: Vec<&str> = ranked
            .into_iter()
            .take(max_features)
            .map(|(term, _)| term)
            .collect();
        terms.sort_unstable();

        let n_documents = documents.len() as f64;
        let idf = terms
            .iter()
            .map(|term| {
                let df = document_frequency.get(term).copied().unwrap_or(0) as f64;
                ((1.0 + n_documents) / (1.0 + df)).ln() + 1.0
            })
            .collect();
        let vocabulary = terms
            .into_iter()
            .enumerate()
            .map(|(index, term)| (term.to_string(), index))
            .collect();

        Self { vocabulary, idf }
    }

    pub fn transform(&self, document: &str) -> Vec<f64> {
        let mut vector = vec![0.0; self.vocabulary.len()];
        for token in tokenize(document) {
            if let Some(&index) = self.vocabulary.get(&token) {
                vector[index] += 1.0;
            }
        }
        for (value, idf) in vector.iter_mut().zip(&self.idf) {
            *value *= idf;
        }

        let norm = vector.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            vector.iter_mut().for_each(|v| *v /= norm);
        }
        vector
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }
}

#[derive(Debug, Clone)]
struct NaiveBayes {
    classes: Vec<DocumentType>,
    class_log_prior: Vec<f64>,
    feature_log_prob: Vec<Vec<f64>>,
}

impl NaiveBayes {
    fn fit(samples: &[(Vec<f64>, DocumentType)], n_features: usize) -> Self {
        // Classes sorted by label name, which decides ties in `predict`
        let mut classes: Vec<DocumentType> = DocumentType::ALL
            .into_iter()
            .filter(|class| samples.iter().any(|(_, label)| label == class))
            .collect();
        classes.sort_by_key(|class| class.as_str());

        let total = samples.len() as f64;
        let mut class_log_prior = Vec::with_capacity(classes.len());
        let mut feature_log_prob = Vec::with_capacity(classes.len());
        for class in &classes {
            let mut counts = vec![0.0; n_features];
            let mut class_samples = 0usize;
            for (vector, _) in samples.iter().filter(|(_, label)| label == class) {
                class_samples += 1;
                for (count, value) in counts.iter_mut().zip(vector) {
                    *count += value;
                }
            }

            let smoothed_total = counts.iter().sum::<f64>() + ALPHA * n_features as f64;
            class_log_prior.push((class_samples as f64 / total).ln());
            feature_log_prob.push(
                counts
                    .iter()
                    .map(|count| ((count + ALPHA) / smoothed_total).ln())
                    .collect(),
            );
        }

        Self {
            classes,
            class_log_prior,
            feature_log_prob,
        }
    }

    // Strictly greater keeps the first class by label name on ties
    fn predict(&self, vector: &[f64]) -> Option<DocumentType> {
        let mut best: Option<(DocumentType, f64)> = None;
        for (i, class) in self.classes.iter().enumerate() {
            let likelihood: f64 = self.feature_log_prob[i]
                .iter()
                .zip(vector)
                .map(|(log_prob, value)| log_prob * value)
                .sum();
            let score = self.class_log_prior[i] + likelihood;
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((*class, score));
            }
        }
        best.map(|(class, _)| class)
    }
}

/// Immutable document-type model
#[derive(Debug, Clone)]
pub struct DocumentClassifier {
    vectorizer: TfIdfVectorizer,
    model: NaiveBayes,
}

impl Default for DocumentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentClassifier {
    /// Classifier trained on the built-in keyword lexicon
    pub fn new() -> Self {
        Self::from_lexicon(SEED_LEXICON)
    }

    pub fn from_lexicon(lexicon: &[(DocumentType, &[&str])]) -> Self {
        let (documents, labels): (Vec<&str>, Vec<DocumentType>) = lexicon
            .iter()
            .flat_map(|(label, keywords)| keywords.iter().map(move |keyword| (*keyword, *label)))
            .unzip();

        let vectorizer = TfIdfVectorizer::fit(&documents, MAX_FEATURES);
        let samples: Vec<(Vec<f64>, DocumentType)> = documents
            .iter()
            .map(|doc| vectorizer.transform(doc))
            .zip(labels)
            .collect();
        let model = NaiveBayes::fit(&samples, vectorizer.vocabulary_size());

        tracing::debug!(
            documents = documents.len(),
            vocabulary = vectorizer.vocabulary_size(),
            "trained document classifier"
        );
        Self { vectorizer, model }
    }

    /// Most likely document type; `Other` when no vocabulary term occurs
    pub fn classify(&self, text: &str) -> DocumentType {
        let vector = self.vectorizer.transform(text);
        if vector.iter().all(|v| *v == 0.0) {
            return DocumentType::Other;
        }
        self.model.predict(&vector).unwrap_or(DocumentType::Other)
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vectorizer.vocabulary_size()
    }
}

static DEFAULT_CLASSIFIER: Lazy<DocumentClassifier> = Lazy::new(DocumentClassifier::new);

/// Classify with the shared built-in model
pub fn classify(text: &str) -> DocumentType {
    DEFAULT_CLASSIFIER.classify(text)
}
