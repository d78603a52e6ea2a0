use unicode_segmentation::UnicodeSegmentation;

use super::{TokenizeError, TokenizedLine, Tokenizer};

/// Clitics split off the end of a word, PTB style ("don't" -> "do n't").
const CLITICS: &[&str] = &["n't", "'s", "'re", "'ve", "'ll", "'d", "'m"];

/// In-process approximation of PTB tokenization with `-preserveLines -lowerCase`.
///
/// Uses Unicode word boundaries, then applies the PTB conventions the
/// punctuation filter relies on: bracket escapes, directional quotes, clitic
/// splitting and `...`/`--` runs. Line structure is preserved one to one.
#[derive(Debug, Default, Clone)]
pub struct BuiltinTokenizer;

impl BuiltinTokenizer {
    pub fn new() -> Self {
        Self
    }
}

impl Tokenizer for BuiltinTokenizer {
    fn name(&self) -> &str {
        "builtin"
    }

    fn tokenize(&self, text: &str) -> Result<Vec<TokenizedLine>, TokenizeError> {
        Ok(text
            .split('\n')
            .map(|line| TokenizedLine::new(tokenize_line(line)))
            .collect())
    }
}

/// Tokenize a single line.
pub fn tokenize_line(line: &str) -> Vec<String> {
    let segments: Vec<&str> = line.split_word_bounds().collect();
    let mut tokens: Vec<String> = Vec::new();
    let mut open_quote = true;
    // Whether the previous segment became exactly one token.
    let mut prev_whole = false;
    let mut i = 0;

    while i < segments.len() {
        let segment = segments[i];

        if segment.trim().is_empty() {
            i += 1;
            continue;
        }

        // Runs of '.' or '-' collapse into one token ("...", "--").
        if segment == "." || segment == "-" {
            let run = segments[i..].iter().take_while(|s| **s == segment).count();
            if run > 1 {
                tokens.push(segment.repeat(run));
                prev_whole = false;
                i += run;
                continue;
            }
        }

        // Hyphenated words stay whole.
        if segment == "-" && prev_whole && i > 0 && i + 1 < segments.len() {
            if is_word(segments[i - 1]) && is_word(segments[i + 1]) {
                if let Some(last) = tokens.last_mut() {
                    last.push('-');
                    last.push_str(&segments[i + 1].to_lowercase());
                    i += 2;
                    continue;
                }
            }
        }

        let before = tokens.len();
        match segment {
            "(" => tokens.push("-LRB-".to_string()),
            ")" => tokens.push("-RRB-".to_string()),
            "{" => tokens.push("-LCB-".to_string()),
            "}" => tokens.push("-RCB-".to_string()),
            "[" => tokens.push("-LSB-".to_string()),
            "]" => tokens.push("-RSB-".to_string()),
            "\u{201C}" => tokens.push("``".to_string()),
            "\u{201D}" => tokens.push("''".to_string()),
            "\"" => {
                let quote = if open_quote { "``" } else { "''" };
                tokens.push(quote.to_string());
                open_quote = !open_quote;
            }
            word => push_word(&mut tokens, word),
        }
        prev_whole = tokens.len() == before + 1;

        i += 1;
    }

    tokens
}

fn is_word(segment: &str) -> bool {
    segment.chars().next().is_some_and(char::is_alphanumeric)
}

fn push_word(tokens: &mut Vec<String>, word: &str) {
    let word = word.replace('\u{2019}', "'").to_lowercase();

    for clitic in CLITICS {
        if word.len() > clitic.len() && word.ends_with(clitic) {
            let stem = &word[..word.len() - clitic.len()];
            tokens.push(stem.to_string());
            tokens.push(clitic.to_string());
            return;
        }
    }

    tokens.push(word);
}
