use crate::error::Result;
use advisor_llm::ChatClient;

const SYSTEM_PROMPT: &str =
    "You are an expert laptop advisor providing recommendations based on retrieval results.";

/// Hand the retrieved candidate pool to the text-generation service and ask
/// for a ranked, explained shortlist. `preferences_json` is the collected
/// preference state rendered as a flat JSON object; the returned free text
/// is displayed verbatim. Callers fall back to the locally formatted list on
/// failure.
pub async fn rerank_with_service(
    client: &ChatClient,
    preferences_json: &str,
    candidates: &[(&str, f32)],
    top_n: usize,
) -> Result<String> {
    let retrieved = candidates
        .iter()
        .map(|(text, _)| *text)
        .collect::<Vec<_>>()
        .join("\n");
    let prompt = format!(
        "Based on the following user preferences: {preferences_json},\n\
         and the retrieved results from the database:\n\
         {retrieved}\n\
         Provide a ranked list of exactly {top_n} laptop recommendations.\n\
         For each recommendation, include:\n\
         - Laptop title\n\
         - Specifications (RAM, processor, storage, etc.)\n\
         - Reasoning: Why this laptop is suitable based on the user's preferences."
    );
    log::debug!(
        "Re-ranking {} candidates down to {top_n} via the service",
        candidates.len()
    );
    Ok(client.complete(SYSTEM_PROMPT, &prompt).await?)
}
