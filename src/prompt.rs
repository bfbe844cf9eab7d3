//! Deterministic prompt construction from retrieved context and a question.

/// The fixed instruction header placed before the retrieved context.
const INSTRUCTION: &str = "Answer the following question based on the context:";

/// Build the generation prompt from retrieved context and the question.
///
/// The template is deterministic: the instruction header, the context lines
/// joined with newlines (in retrieval rank order), the question, and an
/// `Answer:` cue. No truncation is applied; a prompt that exceeds the
/// generator's input limit fails at the generator.
pub fn build_prompt(context: &[String], question: &str) -> String {
    let context = context.join("\n");
    format!("{INSTRUCTION}\n\n{context}\n\nQuestion: {question}\nAnswer:")
}
