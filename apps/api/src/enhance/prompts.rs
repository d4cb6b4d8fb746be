// Prompt builders for the enhancement gateway.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::llm_client::prompts::ATS_INSTRUCTION;

/// Role used when the caller does not name one.
pub const DEFAULT_ROLE: &str = "Professional";
/// Skills used when neither the caller nor the document has any.
pub const DEFAULT_SKILLS: &str = "General Skills";

pub fn summary_prompt(role: &str, skills: &str) -> String {
    format!(
        "Write a professional, concise resume summary for a {role} with expertise in \
         {skills}. Keep it under 50 words. {ATS_INSTRUCTION}"
    )
}

pub fn refine_prompt(text: &str) -> String {
    format!(
        "Rewrite the following resume bullet points to be more impactful and \
         action-oriented. Use strong verbs and quantify results where possible. \
         Keep the same format: one item per line, keeping any leading bullet markers. \
         {ATS_INSTRUCTION}\n\nText:\n{text}"
    )
}
