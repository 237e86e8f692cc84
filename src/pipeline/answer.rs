// file: src/pipeline/answer.rs
// description: grounded prompt assembly and completion delegation
// reference: the template wording is part of the pipeline contract

use crate::error::Result;
use crate::llm::CompletionService;
use crate::models::RetrievedChunk;

/// Fallback phrase the model is instructed to emit when the retrieved
/// context cannot answer the question.
pub const NO_INFORMATION_FALLBACK: &str =
    "I don't have information about that in your documents.";

const SYSTEM_PROMPT: &str = "You are a helpful assistant that answers questions based on the \
     provided context from the user's personal documents.";

/// Concatenate retrieved chunks into an attributed context block,
/// preserving input order.
fn build_context(chunks: &[RetrievedChunk]) -> String {
    chunks
        .iter()
        .map(|chunk| format!("[From {}]\n{}", chunk.filename(), chunk.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn build_prompt(query: &str, context: &str) -> String {
    format!(
        "Based on the following context from my personal documents, please answer the question.\n\
         If the answer is not in the context, say \"{NO_INFORMATION_FALLBACK}\"\n\
         \n\
         Context:\n\
         {context}\n\
         \n\
         Question: {query}\n\
         \n\
         Answer:"
    )
}

/// Assemble the grounded prompt and delegate to the completion service.
/// The response text is returned verbatim; grounding failures are a
/// property of the upstream service, not validated here.
pub async fn generate_answer(
    query: &str,
    chunks: &[RetrievedChunk],
    completions: &dyn CompletionService,
) -> Result<String> {
    let prompt = build_prompt(query, &build_context(chunks));
    completions.complete(SYSTEM_PROMPT, &prompt).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::KbError;
    use crate::models::MetadataMap;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    struct RecordingCompletion {
        pub requests: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl CompletionService for RecordingCompletion {
        async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
            self.requests
                .lock()
                .unwrap()
                .push((system_prompt.to_string(), user_prompt.to_string()));
            Ok("A grounded answer.".to_string())
        }
    }

    struct FailingCompletion;

    #[async_trait]
    impl CompletionService for FailingCompletion {
        async fn complete(&self, _system_prompt: &str, _user_prompt: &str) -> Result<String> {
            Err(KbError::Completion("upstream unavailable".to_string()))
        }
    }

    fn chunk(filename: &str, content: &str) -> RetrievedChunk {
        let mut metadata = MetadataMap::new();
        metadata.insert("filename".to_string(), json!(filename));
        RetrievedChunk::new(content.to_string(), metadata, None)
    }

    #[test]
    fn test_context_preserves_order_and_attribution() {
        let chunks = vec![
            chunk("a.md", "Alpha facts."),
            chunk("b.md", "Beta facts."),
        ];

        let context = build_context(&chunks);
        let alpha = context.find("[From a.md]\nAlpha facts.").unwrap();
        let beta = context.find("[From b.md]\nBeta facts.").unwrap();
        assert!(alpha < beta);
    }

    #[test]
    fn test_prompt_contains_question_exactly_once() {
        let chunks = vec![chunk("a.md", "Alpha facts."), chunk("b.md", "Beta facts.")];
        let question = "What are the alpha facts?";

        let prompt = build_prompt(question, &build_context(&chunks));

        assert_eq!(prompt.matches(question).count(), 1);
        assert!(prompt.contains(NO_INFORMATION_FALLBACK));
        assert!(prompt.contains("[From a.md]"));
        assert!(prompt.contains("[From b.md]"));
        assert!(prompt.contains("Alpha facts."));
        assert!(prompt.ends_with("Answer:"));
    }

    #[tokio::test]
    async fn test_generate_answer_sends_one_message_pair() {
        let completions = RecordingCompletion {
            requests: Mutex::new(Vec::new()),
        };
        let chunks = vec![chunk("notes.md", "The deadline is Friday.")];

        let answer = generate_answer("When is the deadline?", &chunks, &completions)
            .await
            .unwrap();

        assert_eq!(answer, "A grounded answer.");
        let requests = completions.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].0.contains("personal documents"));
        assert!(requests[0].1.contains("The deadline is Friday."));
    }

    #[tokio::test]
    async fn test_upstream_failure_propagates_unmodified() {
        let chunks = vec![chunk("notes.md", "Something.")];
        let result = generate_answer("Anything?", &chunks, &FailingCompletion).await;

        match result {
            Err(KbError::Completion(message)) => assert_eq!(message, "upstream unavailable"),
            other => panic!("expected completion error, got {other:?}"),
        }
    }
}
