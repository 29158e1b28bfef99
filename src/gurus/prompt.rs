//! Prompt assembly for direct guru requests.

use super::GuruKind;

/// Inputs to [`build_prompt`].
#[derive(Debug, Clone, Copy)]
pub struct PromptParts<'a> {
    pub base_prompt: &'a str,
    pub question: &'a str,
    pub context: &'a str,
}

impl<'a> PromptParts<'a> {
    /// Parts for `guru` answering `question`, using its profile's persona and
    /// context tag.
    pub fn for_guru(guru: GuruKind, question: &'a str) -> Self {
        let profile = guru.profile();
        Self {
            base_prompt: profile.base_prompt,
            question,
            context: profile.context,
        }
    }
}

/// Embed a question in a guru persona prompt.
pub fn build_prompt(parts: PromptParts<'_>) -> String {
    format!(
        "{base}\n\nQuestion: {question}\nContext: {context}\n\n\
         Please provide guidance that is:\n\
         1. Practical and applicable\n\
         2. Deeply transformative\n\
         3. Rooted in genuine spiritual wisdom\n\
         4. Compassionate yet direct\n",
        base = parts.base_prompt,
        question = parts.question,
        context = parts.context,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_prompt_layout() {
        let prompt = build_prompt(PromptParts {
            base_prompt: "You are a guide.",
            question: "How do I begin?",
            context: "meditation-guidance",
        });

        assert!(prompt.starts_with("You are a guide.\n\nQuestion: How do I begin?\n"));
        assert!(prompt.contains("Context: meditation-guidance\n"));
        assert!(prompt.ends_with("4. Compassionate yet direct\n"));
    }

    #[test]
    fn test_for_guru_uses_profile() {
        let parts = PromptParts::for_guru(GuruKind::Karma, "What is right action?");
        assert_eq!(parts.context, "ethical-guidance");

        let prompt = build_prompt(parts);
        assert!(prompt.starts_with("You are the AI Karma Guru"));
        assert!(prompt.contains("Question: What is right action?"));
    }
}
