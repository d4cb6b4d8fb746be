// Cross-cutting prompt fragments. Each service that calls the LLM keeps its own
// prompts.rs alongside it and builds on these.

/// System prompt fragment that enforces plain-text output.
pub const PLAIN_TEXT_SYSTEM: &str = "You are an expert resume writer. \
    Respond with the requested text only. \
    Do NOT use markdown formatting or code fences. \
    Do NOT wrap the answer in quotes. \
    Do NOT include explanations, preambles or apologies.";

/// Instruction appended to every generation prompt.
pub const ATS_INSTRUCTION: &str = "\
    The output must be ATS-friendly: standard wording, no tables, no emoji, \
    no first-person pronouns.";
