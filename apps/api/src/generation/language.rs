//! Language detection — heuristic classifier for job-post text.
//!
//! Counts known function words per language as substrings of the lowercased
//! input. NOT word-boundary aware: "understand" contains Spanish "de". The
//! thresholds and check order are frozen — changing either changes which
//! proposals come back in which language for existing users.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A concrete output language. `detect_language` always returns one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    English,
    Russian,
    Spanish,
    French,
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Language::English => "English",
            Language::Russian => "Russian",
            Language::Spanish => "Spanish",
            Language::French => "French",
        };
        f.write_str(label)
    }
}

const RUSSIAN_WORDS: &[&str] = &[
    "и", "в", "на", "с", "по", "для", "от", "до", "из", "о", "об", "за", "при", "без", "работа",
    "опыт", "проект",
];

const SPANISH_WORDS: &[&str] = &[
    "que", "para", "con", "una", "por", "como", "trabajo", "de", "la", "el", "en", "y",
];

const FRENCH_WORDS: &[&str] = &[
    "que", "pour", "avec", "une", "par", "comme", "travail", "de", "la", "le", "et", "dans",
];

/// Classifies free text into a `Language`.
///
/// A language matches when more than 3 of its list words occur in the text.
/// Checks run Russian → Spanish → French; the first match wins even if a
/// later language has a higher count. Falls back to English.
pub fn detect_language(text: &str) -> Language {
    let lower = text.to_lowercase();

    let count = |words: &[&str]| words.iter().filter(|w| lower.contains(*w)).count();

    if count(RUSSIAN_WORDS) > 3 {
        return Language::Russian;
    }
    if count(SPANISH_WORDS) > 3 {
        return Language::Spanish;
    }
    if count(FRENCH_WORDS) > 3 {
        return Language::French;
    }
    Language::English
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_english_defaults_to_english() {
        assert_eq!(
            detect_language("Build a dashboard with React and TypeScript"),
            Language::English
        );
    }

    #[test]
    fn test_empty_input_defaults_to_english() {
        assert_eq!(detect_language(""), Language::English);
    }

    #[test]
    fn test_russian_function_words_detected() {
        // Clears the threshold through substrings alone: "и", "о", "от"
        // (inside "работа") plus the three content words.
        assert_eq!(detect_language("работа опыт проект и"), Language::Russian);
    }

    #[test]
    fn test_spanish_job_post_detected() {
        let text = "Buscamos un desarrollador para trabajo remoto con experiencia en la web";
        assert_eq!(detect_language(text), Language::Spanish);
    }

    #[test]
    fn test_french_job_post_detected() {
        // Hits "pour", "avec", "le", "et", "dans" while staying at or below
        // 3 Spanish-list hits, so the earlier Spanish check does not fire.
        let text =
            "Nous cherchons surtout: pitch bref pour vidéo avec Figma, style net et dans les temps";
        assert_eq!(detect_language(text), Language::French);
    }

    #[test]
    fn test_russian_wins_over_spanish_by_check_order() {
        // Both lists clear the threshold; Russian is checked first.
        let text = "trabajo para una empresa que busca работа опыт проект и ещё кое-что";
        assert_eq!(detect_language(text), Language::Russian);
    }

    #[test]
    fn test_detection_is_deterministic() {
        let text = "работа для la empresa, projet avec une équipe";
        assert_eq!(detect_language(text), detect_language(text));
    }

    #[test]
    fn test_substring_matching_counts_embedded_words() {
        // No Spanish in sight, but "understand" embeds "de", "blast" embeds
        // "la", "energy" embeds "en" and "y" — four distinct list words, so
        // the containment check clears the > 3 threshold.
        let text = "understand blast energy yacht";
        assert_eq!(detect_language(text), Language::Spanish);
    }
}
