use healthfit_client::CompletionProvider;
use log::error;

pub const SYSTEM_PROMPT: &str = "You are a helpful and motivational fitness coach named HealthFit AI. \
Keep responses concise and encouraging.";
pub const EMPTY_REPLY: &str = "I couldn't generate a response. Please try again.";

pub fn offline_advice(prompt: &str) -> String {
    format!(
        "[Offline Mode] This is a personalized advice for: \"{}\". Stay consistent and drink water!",
        prompt
    )
}

/// Always yields a reply: provider failures fall back to offline advice.
pub async fn advise(provider: &dyn CompletionProvider, prompt: &str) -> String {
    match provider.complete(SYSTEM_PROMPT, prompt).await {
        Ok(Some(content)) => content,
        Ok(None) => EMPTY_REPLY.to_owned(),
        Err(e) => {
            error!("Completion provider failed: {}", e);
            offline_advice(prompt)
        }
    }
}

#[cfg(test)]
mod tests {
    use healthfit_client::{Error, MockCompletionProvider};

    use super::*;

    #[actix_web::test]
    async fn reply_or_fallback() {
        let test_data = [
            (Ok(Some("Walk 10k steps.".to_owned())), "Walk 10k steps."),
            (Ok(None), "I couldn't generate a response. Please try again."),
            (
                Err(Error::CommunicationError),
                "[Offline Mode] This is a personalized advice for: \"How do I start?\". Stay consistent and drink water!",
            ),
            (
                Err(Error::RequestError),
                "[Offline Mode] This is a personalized advice for: \"How do I start?\". Stay consistent and drink water!",
            ),
        ];

        for (i, (result, expected)) in test_data.into_iter().enumerate() {
            let mut provider = MockCompletionProvider::new();
            provider
                .expect_complete()
                .times(1)
                .return_once(move |system_prompt, prompt| {
                    assert_eq!(system_prompt, SYSTEM_PROMPT);
                    assert_eq!(prompt, "How do I start?");
                    result
                });

            assert_eq!(
                advise(&provider, "How do I start?").await,
                expected,
                "Test case #{}",
                i
            );
        }
    }
}
