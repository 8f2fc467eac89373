//! Prompt construction for proposal generation.
//!
//! A non-empty custom template overrides everything: the four `{placeholder}`
//! tokens are substituted literally and the result ships to the provider with
//! no further validation. Unknown placeholders or stray braces pass through
//! untouched.

use crate::generation::language::detect_language;
use crate::settings::{LanguageChoice, ProposalSettings};

/// Builds the final instruction string sent to the provider.
///
/// Language resolution happens first: `Auto-detect` runs the heuristic
/// detector over the job text, any other choice is used verbatim.
pub fn build_prompt(job_text: &str, settings: &ProposalSettings, custom_template: &str) -> String {
    let language = match settings.language {
        LanguageChoice::AutoDetect => detect_language(job_text).to_string(),
        chosen => chosen.to_string(),
    };

    if !custom_template.trim().is_empty() {
        // Global, literal substitution — every occurrence of every token.
        return custom_template
            .replace("{jobDescription}", job_text)
            .replace("{tone}", settings.tone.as_str())
            .replace("{goal}", settings.goal.as_str())
            .replace("{language}", &language);
    }

    format!(
        "You are a top-performing freelance proposal writer with a 90% win rate.\n\
         \n\
         Write a compelling freelance proposal that gets hired. Your proposal must:\n\
         \n\
         STRUCTURE:\n\
         1. Strong opening hook that mirrors their exact needs\n\
         2. 2-3 bullet points of relevant experience/results\n\
         3. Clear next steps and timeline\n\
         4. Professional closing\n\
         \n\
         REQUIREMENTS:\n\
         - Tone: {tone}\n\
         - Goal: {goal}\n\
         - Language: {language}\n\
         - Length: 150-200 words maximum\n\
         - No generic phrases or filler words\n\
         - Include specific technical skills mentioned in the job\n\
         - Show understanding of their business/industry\n\
         \n\
         JOB POST:\n\
         {job_text}\n\
         \n\
         Write the proposal now. Be direct, confident, and results-focused.",
        tone = settings.tone.as_str(),
        goal = settings.goal.as_str(),
        language = language,
        job_text = job_text,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{Goal, Tone};

    fn settings(language: LanguageChoice) -> ProposalSettings {
        ProposalSettings {
            tone: Tone::Bold,
            goal: Goal::FastClosure,
            language,
        }
    }

    #[test]
    fn test_default_template_interpolates_style_and_job_text() {
        let prompt = build_prompt(
            "Need a Rust developer for an API project",
            &settings(LanguageChoice::English),
            "",
        );
        assert!(prompt.contains("- Tone: Bold"));
        assert!(prompt.contains("- Goal: Fast Closure"));
        assert!(prompt.contains("- Language: English"));
        assert!(prompt.contains("Need a Rust developer for an API project"));
        assert!(prompt.contains("150-200 words"));
    }

    #[test]
    fn test_auto_detect_resolves_from_job_text() {
        let prompt = build_prompt(
            "работа опыт проект и",
            &settings(LanguageChoice::AutoDetect),
            "",
        );
        assert!(prompt.contains("- Language: Russian"));
    }

    #[test]
    fn test_explicit_language_skips_detection() {
        // Russian job text, but the user pinned French.
        let prompt = build_prompt(
            "работа опыт проект и",
            &settings(LanguageChoice::French),
            "",
        );
        assert!(prompt.contains("- Language: French"));
    }

    #[test]
    fn test_custom_template_substitutes_every_occurrence() {
        let prompt = build_prompt(
            "X",
            &settings(LanguageChoice::English),
            "{tone}-{tone}: {jobDescription}",
        );
        assert_eq!(prompt, "Bold-Bold: X");
    }

    #[test]
    fn test_custom_template_substitutes_all_four_placeholders() {
        let template = "Job: {jobDescription} | Tone: {tone} | Goal: {goal} | Lang: {language}";
        let prompt = build_prompt("Fix my site", &settings(LanguageChoice::Spanish), template);
        assert_eq!(
            prompt,
            "Job: Fix my site | Tone: Bold | Goal: Fast Closure | Lang: Spanish"
        );
    }

    #[test]
    fn test_whitespace_only_template_falls_back_to_default() {
        let prompt = build_prompt("Fix my site", &settings(LanguageChoice::English), "  \n\t ");
        assert!(prompt.contains("STRUCTURE:"));
        assert!(prompt.contains("JOB POST:"));
    }

    #[test]
    fn test_unknown_placeholders_pass_through_untouched() {
        let prompt = build_prompt(
            "X",
            &settings(LanguageChoice::English),
            "{tone} {budget} {jobDescription",
        );
        assert_eq!(prompt, "Bold {budget} {jobDescription");
    }

    #[test]
    fn test_custom_template_is_not_trimmed_in_output() {
        let prompt = build_prompt("X", &settings(LanguageChoice::English), "  {tone}  ");
        assert_eq!(prompt, "  Bold  ");
    }
}
