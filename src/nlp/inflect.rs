// SPDX-License-Identifier: MIT

//! Verb inflection used for event labels

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Turns a verb lemma into an inflected form
pub trait Inflector: Send + Sync {
    /// Past participle of `lemma` ("ship" -> "shipped", "send" -> "sent")
    fn past_participle(&self, lemma: &str) -> String;
}

static IRREGULAR_PARTICIPLES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        ("be", "been"),
        ("begin", "begun"),
        ("bring", "brought"),
        ("build", "built"),
        ("buy", "bought"),
        ("catch", "caught"),
        ("choose", "chosen"),
        ("come", "come"),
        ("cut", "cut"),
        ("deal", "dealt"),
        ("do", "done"),
        ("draw", "drawn"),
        ("drive", "driven"),
        ("eat", "eaten"),
        ("fall", "fallen"),
        ("feel", "felt"),
        ("find", "found"),
        ("forget", "forgotten"),
        ("get", "gotten"),
        ("give", "given"),
        ("go", "gone"),
        ("have", "had"),
        ("hear", "heard"),
        ("hold", "held"),
        ("keep", "kept"),
        ("know", "known"),
        ("lay", "laid"),
        ("lead", "led"),
        ("leave", "left"),
        ("lend", "lent"),
        ("let", "let"),
        ("lose", "lost"),
        ("make", "made"),
        ("meet", "met"),
        ("pay", "paid"),
        ("put", "put"),
        ("read", "read"),
        ("ring", "rung"),
        ("rise", "risen"),
        ("run", "run"),
        ("say", "said"),
        ("see", "seen"),
        ("sell", "sold"),
        ("send", "sent"),
        ("set", "set"),
        ("show", "shown"),
        ("shut", "shut"),
        ("sit", "sat"),
        ("speak", "spoken"),
        ("spend", "spent"),
        ("stand", "stood"),
        ("take", "taken"),
        ("teach", "taught"),
        ("tell", "told"),
        ("think", "thought"),
        ("throw", "thrown"),
        ("understand", "understood"),
        ("win", "won"),
        ("write", "written"),
    ]
    .into_iter()
    .collect()
});

/// Rule-based English inflector with an irregular-verb table
#[derive(Debug, Clone, Default)]
pub struct EnglishInflector;

impl EnglishInflector {
    pub fn new() -> Self {
        Self
    }

    fn regular(word: &str) -> String {
        let chars: Vec<char> = word.chars().collect();
        let n = chars.len();
        if n == 0 {
            return String::new();
        }

        let is_vowel = |c: char| "aeiou".contains(c);
        let last = chars[n - 1];

        if last == 'e' {
            return format!("{}d", word);
        }
        if last == 'y' && n > 1 && !is_vowel(chars[n - 2]) {
            return format!("{}ied", &word[..word.len() - 1]);
        }
        // Single-syllable consonant-vowel-consonant stems double the final consonant
        if n >= 3
            && !is_vowel(last)
            && !"wxy".contains(last)
            && is_vowel(chars[n - 2])
            && !is_vowel(chars[n - 3])
            && chars.iter().filter(|c| is_vowel(**c)).count() == 1
        {
            return format!("{}{}ed", word, last);
        }

        format!("{}ed", word)
    }
}

impl Inflector for EnglishInflector {
    fn past_participle(&self, lemma: &str) -> String {
        let lemma = lemma.trim().to_lowercase();
        let (head, rest) = match lemma.split_once(' ') {
            Some((head, rest)) => (head, Some(rest)),
            None => (lemma.as_str(), None),
        };

        let inflected = match IRREGULAR_PARTICIPLES.get(head) {
            Some(participle) => participle.to_string(),
            None => Self::regular(head),
        };

        match rest {
            Some(rest) => format!("{} {}", inflected, rest),
            None => inflected,
        }
    }
}
