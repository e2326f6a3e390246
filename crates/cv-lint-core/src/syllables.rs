//! Syllable estimation by vowel-group counting.
//!
//! Every maximal run of `a e i o u y` counts as one syllable. No silent-e or
//! suffix adjustments: the readability score depends on this exact proxy.

/// Estimate the syllables in `word`. Never returns less than 1.
pub fn estimate_syllables(word: &str) -> usize {
    let mut groups = 0;
    let mut previous_was_vowel = false;

    for ch in word.chars() {
        let is_vowel = matches!(ch.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
        if is_vowel && !previous_was_vowel {
            groups += 1;
        }
        previous_was_vowel = is_vowel;
    }

    groups.max(1)
}

/// Total estimated syllables across a token sequence.
pub fn total_syllables<S: AsRef<str>>(tokens: &[S]) -> usize {
    tokens.iter().map(|t| estimate_syllables(t.as_ref())).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_vowel_groups() {
        assert_eq!(estimate_syllables("rust"), 1);
        assert_eq!(estimate_syllables("python"), 2);
        assert_eq!(estimate_syllables("engineer"), 3);
        assert_eq!(estimate_syllables("beautiful"), 3);
    }

    #[test]
    fn y_is_a_vowel() {
        assert_eq!(estimate_syllables("sky"), 1);
        assert_eq!(estimate_syllables("yearly"), 2);
    }

    #[test]
    fn silent_e_is_not_special() {
        // A cheap proxy: "make" has two vowel groups.
        assert_eq!(estimate_syllables("make"), 2);
    }

    #[test]
    fn case_insensitive() {
        assert_eq!(estimate_syllables("AUDIO"), estimate_syllables("audio"));
    }

    #[test]
    fn floors_at_one() {
        assert_eq!(estimate_syllables(""), 1);
        assert_eq!(estimate_syllables("2024"), 1);
        assert_eq!(estimate_syllables("nth"), 1);
    }

    #[test]
    fn totals_tokens() {
        let tokens = vec!["rust".to_string(), "python".to_string(), "sql".to_string()];
        assert_eq!(total_syllables(&tokens), 4);
        assert_eq!(total_syllables::<String>(&[]), 0);
    }
}
