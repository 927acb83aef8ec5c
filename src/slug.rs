use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;

/// How a label is turned into the name portion of a run directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(tag = "style", rename_all = "lowercase")]
pub enum SlugStyle {
    /// Lower-case, spaces and underscores become hyphens, nothing else touched.
    #[default]
    Simple,
    Full(SlugOptions),
}

impl SlugStyle {
    pub fn apply(&self, label: &str) -> String {
        match self {
            SlugStyle::Simple => slugify_simple(label),
            SlugStyle::Full(opts) => slugify(label, opts),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SlugOptions {
    pub separator: String,
    pub lowercase: bool,
    pub max_length: Option<usize>,
    /// Truncate on a whole word when `max_length` cuts one in half.
    pub word_boundary: bool,
    pub stopwords: Vec<String>,
    /// Literal substitutions applied before anything else.
    pub replacements: Vec<(String, String)>,
}

impl Default for SlugOptions {
    fn default() -> Self {
        Self {
            separator: "-".to_owned(),
            lowercase: true,
            max_length: None,
            word_boundary: false,
            stopwords: Vec::new(),
            replacements: Vec::new(),
        }
    }
}

pub fn slugify_simple(label: &str) -> String {
    label.to_lowercase().replace([' ', '_'], "-")
}

fn word_splitter() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^\p{Alphabetic}\p{Nd}]+").expect("static regex"))
}

pub fn slugify(text: &str, opts: &SlugOptions) -> String {
    let mut text = text.to_owned();
    for (from, to) in &opts.replacements {
        text = text.replace(from.as_str(), to);
    }
    if opts.lowercase {
        text = text.to_lowercase();
    }

    let words: Vec<&str> = word_splitter()
        .split(&text)
        .filter(|word| !word.is_empty())
        .filter(|word| {
            !opts
                .stopwords
                .iter()
                .any(|stop| stop.eq_ignore_ascii_case(word))
        })
        .collect();

    match opts.max_length {
        Some(max) => truncate(&words, &opts.separator, max, opts.word_boundary),
        None => words.join(&opts.separator),
    }
}

fn truncate(words: &[&str], separator: &str, max: usize, word_boundary: bool) -> String {
    if word_boundary {
        let mut out = String::new();
        for word in words {
            let extra = if out.is_empty() {
                word.chars().count()
            } else {
                separator.chars().count() + word.chars().count()
            };
            if out.chars().count() + extra > max {
                break;
            }
            if !out.is_empty() {
                out.push_str(separator);
            }
            out.push_str(word);
        }
        if out.is_empty() {
            // A single over-long word still yields something.
            return words
                .first()
                .map(|w| w.chars().take(max).collect())
                .unwrap_or_default();
        }
        return out;
    }

    let joined: String = words.join(separator).chars().take(max).collect();
    joined.trim_end_matches(separator).to_owned()
}
