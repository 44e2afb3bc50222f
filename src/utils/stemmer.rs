/// Suffixes stripped by [`stem`], in priority order.
/// Only the first one that matches is removed.
const ENDINGS: &[&str] = &[
    "able", "al", "ance", "ant", "ar", "ary", "ate", "ement", "ence", "ent", "er", "ess", "ible",
    "ic", "ify", "ine", "ion", "ism", "iti", "ity", "ive", "ize", "ly", "ment", "or", "ou", "ous",
    "th", "ure",
];

/// Heuristic suffix stripper.
///
/// Collapses plural and a few derivational endings so that inflected forms
/// share a term. It over-stems short words (`"faiths"` becomes `"fai"`) and
/// is not idempotent; both are accepted and relied upon for stable output.
///
/// # Arguments
/// * `word` - a lowercase, punctuation-free word
///
/// # Examples
/// ```
/// use authorship::utils::stemmer::stem;
/// assert_eq!(stem("cats"), "cat");
/// assert_eq!(stem("faiths"), "fai");
/// ```
pub fn stem(word: &str) -> String {
    let mut word = word.to_string();

    if word.ends_with("ies") && !word.ends_with("eies") && !word.ends_with("aies") {
        word.truncate(word.len() - 3);
        word.push('y');
    } else if word.ends_with("es")
        && !word.ends_with("aes")
        && !word.ends_with("ees")
        && !word.ends_with("oes")
    {
        word.pop();
    }

    if word.ends_with("'s") {
        word.truncate(word.len() - 2);
    }

    if word.ends_with('s') && !word.ends_with("us") && !word.ends_with("ss") && !word.ends_with("ys") {
        word.pop();
    }

    if let Some(ending) = ENDINGS.iter().find(|ending| word.ends_with(*ending)) {
        word.truncate(word.len() - ending.len());
    }

    word
}
