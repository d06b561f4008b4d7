//! Tokenization, stop-word filtering and a light suffix lemmatizer.

use jackpot_core::models::Keyword;

/// Lowercased word tokens. Apostrophes inside words are kept, possessive
/// `'s` is dropped.
pub fn raw_tokens(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .map(|w| w.trim_matches('\'').to_lowercase())
        .map(|w| match w.strip_suffix("'s") {
            Some(stem) => stem.to_string(),
            None => w,
        })
        .filter(|w| !w.is_empty())
        .collect()
}

/// Content words of at least `min_len` chars, deduplicated by surface form.
pub fn extract_keywords(text: &str, min_len: usize) -> Vec<Keyword> {
    let mut keywords: Vec<Keyword> = Vec::new();
    for token in raw_tokens(text) {
        if token.chars().count() < min_len || token.contains('\'') || is_stop_word(&token) {
            continue;
        }
        if keywords.iter().any(|k| k.surface == token) {
            continue;
        }
        let normalized = lemmatize(&token);
        keywords.push(Keyword::new(token, normalized));
    }
    keywords
}

/// Strip one common inflection. First matching rule wins.
pub fn lemmatize(word: &str) -> String {
    let len = word.chars().count();
    if len > 4 {
        if let Some(stem) = word.strip_suffix("ies") {
            return format!("{stem}y");
        }
    }
    if let Some(stem) = word.strip_suffix("sses") {
        return format!("{stem}ss");
    }
    if len > 3
        && word.ends_with('s')
        && !(word.ends_with("ss") || word.ends_with("us") || word.ends_with("is"))
    {
        return word[..word.len() - 1].to_string();
    }
    if len > 5 {
        if let Some(stem) = word.strip_suffix("ing") {
            return stem.to_string();
        }
    }
    if len > 4 {
        if let Some(stem) = word.strip_suffix("ed") {
            return stem.to_string();
        }
    }
    word.to_string()
}

pub fn is_stop_word(word: &str) -> bool {
    matches!(
        word,
        "a" | "about"
            | "above"
            | "after"
            | "again"
            | "against"
            | "all"
            | "almost"
            | "also"
            | "am"
            | "among"
            | "an"
            | "and"
            | "any"
            | "are"
            | "as"
            | "at"
            | "be"
            | "because"
            | "been"
            | "before"
            | "being"
            | "below"
            | "between"
            | "both"
            | "but"
            | "by"
            | "can"
            | "cannot"
            | "could"
            | "did"
            | "do"
            | "does"
            | "doing"
            | "done"
            | "down"
            | "during"
            | "each"
            | "either"
            | "else"
            | "enough"
            | "even"
            | "ever"
            | "every"
            | "few"
            | "for"
            | "from"
            | "further"
            | "get"
            | "gets"
            | "got"
            | "had"
            | "has"
            | "have"
            | "having"
            | "he"
            | "her"
            | "here"
            | "hers"
            | "herself"
            | "him"
            | "himself"
            | "his"
            | "how"
            | "however"
            | "i"
            | "if"
            | "in"
            | "into"
            | "is"
            | "it"
            | "its"
            | "itself"
            | "just"
            | "least"
            | "less"
            | "let"
            | "like"
            | "made"
            | "make"
            | "many"
            | "may"
            | "me"
            | "might"
            | "more"
            | "most"
            | "much"
            | "must"
            | "my"
            | "myself"
            | "neither"
            | "no"
            | "nor"
            | "not"
            | "now"
            | "of"
            | "off"
            | "often"
            | "on"
            | "once"
            | "one"
            | "only"
            | "or"
            | "other"
            | "others"
            | "our"
            | "ours"
            | "ourselves"
            | "out"
            | "over"
            | "own"
            | "per"
            | "perhaps"
            | "quite"
            | "rather"
            | "really"
            | "same"
            | "several"
            | "she"
            | "should"
            | "since"
            | "so"
            | "some"
            | "still"
            | "such"
            | "than"
            | "that"
            | "the"
            | "their"
            | "theirs"
            | "them"
            | "themselves"
            | "then"
            | "there"
            | "these"
            | "they"
            | "this"
            | "those"
            | "though"
            | "through"
            | "thus"
            | "to"
            | "too"
            | "under"
            | "until"
            | "up"
            | "upon"
            | "us"
            | "very"
            | "via"
            | "was"
            | "we"
            | "well"
            | "were"
            | "what"
            | "whatever"
            | "when"
            | "where"
            | "whether"
            | "which"
            | "while"
            | "who"
            | "whom"
            | "whose"
            | "why"
            | "will"
            | "with"
            | "within"
            | "without"
            | "would"
            | "yet"
            | "you"
            | "your"
            | "yours"
            | "yourself"
            | "yourselves"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_surface_and_lemma() {
        let keywords = extract_keywords("Savors many flavors", 3);
        let pairs: Vec<(&str, &str)> = keywords
            .iter()
            .map(|k| (k.surface.as_str(), k.normalized.as_str()))
            .collect();
        assert_eq!(pairs, vec![("savors", "savor"), ("flavors", "flavor")]);
    }

    #[test]
    fn deduplicates_repeated_words() {
        let keywords = extract_keywords("Round and round", 3);
        assert_eq!(keywords.len(), 1);
        assert_eq!(keywords[0].surface, "round");
    }

    #[test]
    fn lemmatizer_rules() {
        assert_eq!(lemmatize("cities"), "city");
        assert_eq!(lemmatize("classes"), "class");
        assert_eq!(lemmatize("glass"), "glass");
        assert_eq!(lemmatize("status"), "status");
        assert_eq!(lemmatize("trespassing"), "trespass");
        assert_eq!(lemmatize("sing"), "sing");
        assert_eq!(lemmatize("played"), "play");
        assert_eq!(lemmatize("red"), "red");
    }

    #[test]
    fn possessives_and_contractions() {
        assert_eq!(raw_tokens("Nature's can't"), vec!["nature", "can't"]);
        assert!(extract_keywords("can't won't", 3).is_empty());
    }

    #[test]
    fn blank_text_has_no_keywords() {
        assert!(extract_keywords("  ...  ", 3).is_empty());
    }
}
