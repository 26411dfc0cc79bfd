// Shared prompt fragments.
// Extraction and judge prompts live next to their collaborators; this file holds the
// cross-cutting pieces they both append.

/// Appended to every system prompt so replies parse as a single JSON object.
pub const JSON_ONLY_INSTRUCTION: &str = "\
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Joins a role-specific system prompt with the JSON-only fragment.
pub fn with_json_only(system: &str) -> String {
    format!("{}\n\n{}", system.trim_end(), JSON_ONLY_INSTRUCTION)
}
