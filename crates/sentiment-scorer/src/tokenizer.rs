//! Text tokenizer

/// Emoticons kept verbatim, longest first so prefixes do not shadow them
const EMOTICONS: &[&str] = &[
    ">:(", ":'(", ":-)", ":-(", ":-D", ":)", ":(", ":D", ";)", ":/", "<3",
];

/// Split text into lowercase word tokens and verbatim emoticons.
///
/// Words are runs of letters, digits, apostrophes and hyphens.
/// Typographic apostrophes are normalized to `'`.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    for chunk in text.split_whitespace() {
        let bare = chunk.trim_end_matches(['.', ',', '!', '?']);
        if let Some(emoticon) = EMOTICONS.iter().find(|e| **e == bare) {
            tokens.push((*emoticon).to_owned());
            continue;
        }

        let mut word = String::new();
        for c in chunk.chars() {
            let c = if c == '\u{2019}' { '\'' } else { c };
            if c.is_alphanumeric() || c == '\'' || c == '-' {
                word.extend(c.to_lowercase());
            } else {
                push_word(&mut tokens, &mut word);
            }
        }
        push_word(&mut tokens, &mut word);
    }
    tokens
}

fn push_word(tokens: &mut Vec<String>, word: &mut String) {
    let trimmed = word.trim_matches(['\'', '-']);
    if !trimmed.is_empty() {
        tokens.push(trimmed.to_owned());
    }
    word.clear();
}
