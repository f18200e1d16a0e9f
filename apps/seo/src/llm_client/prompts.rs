// Shared prompt fragments. Each feature that calls the model keeps its own
// prompts.rs next to it; only cross-cutting pieces live here.

/// Appended to system prompts whose replies are parsed as JSON.
pub const JSON_ONLY_INSTRUCTION: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON value. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Builds a system prompt from a role description plus the JSON-only rule.
pub fn json_system_prompt(role: &str) -> String {
    format!("{role} {JSON_ONLY_INSTRUCTION}")
}
