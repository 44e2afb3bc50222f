use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Contraction and possessive rewrites.
/// Applied in this order to each whitespace token, and only while the token
/// still carries an apostrophe.
const CONTRACTIONS: &[(&str, &str)] = &[
    ("'s", ""),
    ("won't", "will not"),
    ("can't", "can not"),
    ("n't", " not"),
    ("'re", " are"),
    ("'d", " would"),
    ("'ll", " will"),
    ("'t", " not"),
    ("'ve", " have"),
    ("'m", " am"),
];

/// Punctuation handled by [`flush_marks`].
/// `--` comes before `-` and `...` is matched as a whole.
static MARKS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(--|-|—|–|_|\(|\)|\[|\]|,|:|;|'|"|“|”|‘|\.\.\.|…|\?|!)"#)
        .expect("punctuation pattern is valid")
});

/// Expand contractions and drop possessives in a single token.
///
/// Rules are tried in order until no apostrophe remains or the list is
/// exhausted, so a token such as `rock'n'roll` keeps whatever the rules
/// could not rewrite.
///
/// # Examples
/// ```
/// use authorship::utils::normalizer::expand_contractions;
/// assert_eq!(expand_contractions("won't"), "will not");
/// assert_eq!(expand_contractions("nation's"), "nation");
/// ```
pub fn expand_contractions(token: &str) -> String {
    let mut word = token.replace('\u{2019}', "'");
    let mut rules = CONTRACTIONS.iter();
    while word.contains('\'') {
        let Some((pattern, replacement)) = rules.next() else {
            break;
        };
        if word.contains(pattern) {
            word = word.replace(pattern, replacement);
        }
    }
    word
}

/// Dashes become word separators, `?` and `!` become `.`, the remaining
/// listed marks are deleted.
fn flush_marks(text: &str) -> String {
    MARKS
        .replace_all(text, |caps: &Captures| match &caps[1] {
            "--" | "-" | "—" | "–" | "_" => " ",
            "?" | "!" => ".",
            _ => "",
        })
        .into_owned()
}

/// Normalize raw document text.
///
/// The result holds only letters, single spaces and `.`
/// as the sole sentence terminator, with no leading or trailing
/// whitespace. Case is left unchanged.
pub fn normalize(text: &str) -> String {
    let expanded = text
        .split_whitespace()
        .map(expand_contractions)
        .collect::<Vec<_>>()
        .join(" ");
    let flushed: String = flush_marks(&expanded)
        .chars()
        .filter(|c| c.is_alphabetic() || c.is_whitespace() || *c == '.')
        .collect();
    flushed.split_whitespace().collect::<Vec<_>>().join(" ")
}
