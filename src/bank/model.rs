//! Question model
//!
//! Questions arrive as loosely-typed JSON, so every field here has a default and
//! the loader decides which records are usable.

use serde::{Deserialize, Serialize};

/// A single multiple-choice question
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Question {
    /// Globally unique identifier (deduplication key across banks)
    pub id: String,
    /// Category code (e.g. "U3")
    pub unit: String,
    /// Sub-category label within the unit
    pub topic: String,
    /// Stem, assets and options
    pub prompt: Prompt,
    /// Correct answer
    pub answer: Answer,
    /// Graduated hints, revealed one tier at a time
    pub socratic_hints: SocraticHints,
}

/// The visible part of a question
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Prompt {
    /// Stem text
    pub stem: String,
    /// Asset references (image paths, figure ids)
    pub assets: Vec<String>,
    /// Option texts, lettered A, B, C... in order
    pub options: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Answer {
    /// Letter of the correct option
    pub mcq_key: String,
}

/// Three tiers of guidance
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocraticHints {
    pub tier_1: Vec<String>,
    pub tier_2: Vec<String>,
    /// Worked solution steps
    pub tier_3: Vec<WorkedStep>,
}

/// One step of a worked solution
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkedStep {
    pub label: String,
    /// Mark value awarded for this step, if the source gives one
    pub marks: Option<u32>,
}

/// A revealed hint, tagged with the tier it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HintLine {
    pub tier: u8,
    pub text: String,
}

/// Highest hint tier
pub const MAX_HINT_TIER: u8 = 3;

impl Question {
    /// Letter shown for the option at `index` (0 -> 'A')
    pub fn option_letter(index: usize) -> Option<char> {
        u8::try_from(index).ok().filter(|i| *i < 26).map(|i| (b'A' + i) as char)
    }

    /// Options paired with their letters
    pub fn lettered_options(&self) -> impl Iterator<Item = (char, &str)> {
        self.prompt
            .options
            .iter()
            .enumerate()
            .filter_map(|(i, text)| Self::option_letter(i).map(|l| (l, text.as_str())))
    }

    /// Exact, case-sensitive comparison with the answer key
    pub fn is_correct(&self, letter: char) -> bool {
        let mut key = self.answer.mcq_key.chars();
        key.next() == Some(letter) && key.next().is_none()
    }
}

impl SocraticHints {
    /// Hint lines visible at the given tier (0 shows nothing)
    pub fn revealed(&self, tier: u8) -> Vec<HintLine> {
        let mut lines = Vec::new();

        if tier >= 1 {
            lines.extend(self.tier_1.iter().map(|t| HintLine { tier: 1, text: t.clone() }));
        }
        if tier >= 2 {
            lines.extend(self.tier_2.iter().map(|t| HintLine { tier: 2, text: t.clone() }));
        }
        if tier >= 3 {
            lines.extend(self.tier_3.iter().map(|step| {
                let text = match step.marks {
                    Some(1) => format!("{} (1 mark)", step.label),
                    Some(n) => format!("{} ({} marks)", step.label, n),
                    None => step.label.clone(),
                };
                HintLine { tier: 3, text }
            }));
        }

        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question_with_key(key: &str) -> Question {
        Question {
            id: "q1".into(),
            prompt: Prompt {
                options: vec!["one".into(), "two".into(), "three".into()],
                ..Default::default()
            },
            answer: Answer { mcq_key: key.into() },
            ..Default::default()
        }
    }

    #[test]
    fn option_letters_start_at_a() {
        assert_eq!(Question::option_letter(0), Some('A'));
        assert_eq!(Question::option_letter(3), Some('D'));
        assert_eq!(Question::option_letter(26), None);
    }

    #[test]
    fn lettered_options_pair_in_order() {
        let q = question_with_key("B");
        let letters: Vec<char> = q.lettered_options().map(|(l, _)| l).collect();
        assert_eq!(letters, vec!['A', 'B', 'C']);
    }

    #[test]
    fn answer_check_is_exact() {
        let q = question_with_key("B");
        assert!(q.is_correct('B'));
        assert!(!q.is_correct('b'));
        assert!(!q.is_correct('A'));
    }

    #[test]
    fn multi_letter_key_is_never_correct() {
        let q = question_with_key("BC");
        assert!(!q.is_correct('B'));
        let q = question_with_key("");
        assert!(!q.is_correct('A'));
    }

    #[test]
    fn hints_reveal_cumulatively() {
        let hints = SocraticHints {
            tier_1: vec!["Think about units".into()],
            tier_2: vec!["Convert to SI".into(), "Then divide".into()],
            tier_3: vec![
                WorkedStep { label: "m = 2 kg".into(), marks: Some(1) },
                WorkedStep { label: "F = ma".into(), marks: Some(2) },
                WorkedStep { label: "Answer".into(), marks: None },
            ],
        };

        assert!(hints.revealed(0).is_empty());
        assert_eq!(hints.revealed(1).len(), 1);
        assert_eq!(hints.revealed(2).len(), 3);

        let all = hints.revealed(3);
        assert_eq!(all.len(), 6);
        assert_eq!(all[3].text, "m = 2 kg (1 mark)");
        assert_eq!(all[4].text, "F = ma (2 marks)");
        assert_eq!(all[5].text, "Answer");
        assert_eq!(all[5].tier, 3);
    }

    #[test]
    fn question_deserializes_with_missing_fields() {
        let json = r#"{"id":"x","prompt":{"stem":"What?"}}"#;
        let q: Question = serde_json::from_str(json).unwrap();
        assert_eq!(q.id, "x");
        assert!(q.prompt.options.is_empty());
        assert!(q.answer.mcq_key.is_empty());
    }
}
