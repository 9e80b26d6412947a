use crate::ExtractorKind;
use advisor_dialogue::{
    render_query, AskOrder, DialoguePolicy, PolicyState, PreferenceExtractor, PreferenceState,
    QuestionGenerator, RuleBasedExtractor, ServiceBackedExtractor, ServiceQuestions,
    TemplateQuestions, TurnOutcome, FALLBACK_QUESTION,
};
use advisor_llm::ChatClient;
use advisor_recommend::{rerank_with_service, RetrievalService, DEFAULT_OVER_FETCH, RERANK_POOL};
use anyhow::{Context as AnyhowContext, Result};
use std::io::{self, BufRead, Write};

/// One interactive conversation: turn loop, then retrieval and
/// presentation. The retrieval service is borrowed read-only; everything
/// mutable (preferences, policy) lives and dies with the session.
pub struct ChatSession<'a> {
    service: &'a RetrievalService,
    extractor: Box<dyn PreferenceExtractor>,
    questions: Box<dyn QuestionGenerator>,
    reranker: Option<ChatClient>,
    order: AskOrder,
    top_n: usize,
}

impl<'a> ChatSession<'a> {
    pub fn configure(
        service: &'a RetrievalService,
        kind: ExtractorKind,
        order: AskOrder,
        rerank: bool,
        top_n: usize,
    ) -> Result<Self> {
        let (extractor, questions): (Box<dyn PreferenceExtractor>, Box<dyn QuestionGenerator>) =
            match kind {
                ExtractorKind::Rule => (Box::new(RuleBasedExtractor), Box::new(TemplateQuestions)),
                ExtractorKind::Service => {
                    let client = ChatClient::from_env()
                        .context("The service extractor needs ADVISOR_API_KEY")?;
                    (
                        Box::new(ServiceBackedExtractor::new(client.clone())),
                        Box::new(ServiceQuestions::new(client)),
                    )
                }
            };
        let reranker = rerank
            .then(ChatClient::from_env)
            .transpose()
            .context("Re-ranking needs ADVISOR_API_KEY")?;

        Ok(Self {
            service,
            extractor,
            questions,
            reranker,
            order,
            top_n,
        })
    }

    pub async fn run(self) -> Result<()> {
        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();

        println!("LaptopGPT: Hello! I'm your laptop advisor.");
        println!(
            "LaptopGPT: Tell me what you're looking for in a laptop, like brand, budget, RAM, or purpose."
        );

        let mut preferences = PreferenceState::new();
        let mut policy = DialoguePolicy::new(self.order);

        while !policy.is_terminal() {
            print!("User: ");
            io::stdout().flush()?;
            let Some(line) = lines.next() else {
                log::debug!("Input ended; proceeding to retrieval");
                break;
            };
            let line = line?;

            // A failed extraction keeps the prior state; the conversation
            // never aborts mid-dialogue.
            match self.extractor.extract(&line, &preferences).await {
                Ok(updated) => preferences = updated,
                Err(err) => {
                    log::warn!("Preference extraction failed; keeping previous state: {err}");
                }
            }
            if !preferences.is_empty() {
                println!(
                    "LaptopGPT: Got it! Your preferences so far:\n{}",
                    preferences.summary()
                );
            }

            match policy.record_turn(&preferences) {
                TurnOutcome::Ask(slot) => {
                    let question = match self.questions.question_for(slot, &preferences).await {
                        Ok(question) => question,
                        Err(err) => {
                            log::warn!("Question generation failed: {err}");
                            FALLBACK_QUESTION.to_string()
                        }
                    };
                    println!("LaptopGPT: {question}");
                }
                TurnOutcome::Listen => {}
                TurnOutcome::Done(PolicyState::Sufficient) => {
                    println!("LaptopGPT: I have enough details to make a recommendation!");
                }
                TurnOutcome::Done(_) => {
                    println!(
                        "LaptopGPT: Let me find recommendations based on your current preferences."
                    );
                }
            }
        }

        self.present_recommendations(&preferences).await
    }

    async fn present_recommendations(&self, preferences: &PreferenceState) -> Result<()> {
        let query = render_query(preferences);
        log::debug!("Retrieval query: '{query}'");

        if let Some(client) = &self.reranker {
            let known = serde_json::to_string(preferences)?;
            let pool = self
                .service
                .search_texts(&query, RERANK_POOL)
                .context("Retrieval failed")?;
            match rerank_with_service(client, &known, &pool, self.top_n).await {
                Ok(text) => {
                    println!("LaptopGPT: Here are my top recommendations for you:\n");
                    println!("{text}");
                    return Ok(());
                }
                Err(err) => {
                    log::warn!("Service re-ranking failed; showing the local ranking: {err}");
                }
            }
        }

        let set = self
            .service
            .recommend(&query, self.top_n, DEFAULT_OVER_FETCH)
            .context("Retrieval failed")?;

        if preferences.is_empty() {
            println!("LaptopGPT: Here are some laptops you might like:");
        } else {
            println!(
                "LaptopGPT: Based on your preferences: {}",
                preferences.inline_summary()
            );
        }

        if set.items.is_empty() {
            println!(
                "LaptopGPT: Sorry, I couldn't find any matches. Try providing more details or adjusting your preferences."
            );
            return Ok(());
        }
        if set.is_partial() {
            println!("LaptopGPT: Sorry, I couldn't find enough matches. Here's what I found so far:");
        }
        println!("LaptopGPT: Here are the Top-{} laptops for you:", self.top_n);
        for (i, rec) in set.items.iter().enumerate() {
            println!("{}. {}", i + 1, rec.display_block());
        }
        Ok(())
    }
}
