use crate::error::Result;
use crate::preferences::PreferenceState;
use crate::slots::Slot;
use advisor_llm::ChatClient;
use async_trait::async_trait;
use rand::seq::SliceRandom;

/// Generic fallback when no better phrasing is available.
pub const FALLBACK_QUESTION: &str = "Could you provide more details about this?";

const SYSTEM_PROMPT: &str =
    "You are an assistant designed to ask users for missing specifications in a natural tone.";

/// Phrases the next question about a missing slot given the preferences
/// collected so far.
#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    async fn question_for(&self, slot: Slot, preferences: &PreferenceState) -> Result<String>;
}

/// Canned question templates, two phrasings per slot, chosen uniformly at
/// random per ask so repeated sessions do not sound scripted.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateQuestions;

impl TemplateQuestions {
    /// The two canned phrasings for a slot.
    #[must_use]
    pub fn templates(slot: Slot) -> [&'static str; 2] {
        match slot {
            Slot::Brand => [
                "Do you have a particular brand in mind for your laptop? Feel free to mention other specs if you'd like.",
                "Are you leaning towards a specific brand, or do you have other preferences to share?",
            ],
            Slot::Ram => [
                "What kind of performance are you looking for? Maybe tell me about RAM or anything else important to you.",
                "Do you have a preference for RAM size or other specifications that matter to you?",
            ],
            Slot::Processor => [
                "What type of tasks will you be performing on the laptop? This might help determine the right processor and other specs.",
                "Tell me about the performance you need. Any thoughts on the processor or related features?",
            ],
            Slot::GpuBrand => [
                "Are you planning to use the laptop for gaming, video editing, or something else? Let me know if a specific GPU or other features matter.",
                "What graphics capabilities do you need? Feel free to share any other important specs too.",
            ],
            Slot::StorageCapacity => [
                "How much storage would be enough for your files and apps? Or let me know if other specs are on your mind.",
                "What are your thoughts on storage size? Anything else you'd like your laptop to have?",
            ],
            Slot::StorageType => [
                "Do you prefer a faster SSD or a larger HDD? Or are there other features you're prioritizing?",
                "What type of storage do you think fits your needs? Feel free to include other specs if you'd like.",
            ],
            Slot::Price => [
                "What budget range are you thinking about? If there are other key specs you'd like, let me know.",
                "How much are you planning to spend? You can also share other preferences if you'd like.",
            ],
            Slot::ScreenSize => [
                "Do you have a preferred screen size or any other display features you're considering?",
                "What screen size works for you? Or is there something else you'd like your laptop to have?",
            ],
            Slot::BatteryLife => [
                "Will you need long battery life for travel or work? Let me know if other specs are important too.",
                "How important is battery life to you? Feel free to mention other features you'd like.",
            ],
            Slot::Weight => [
                "Are you looking for a lightweight option for portability? Any other specs you have in mind?",
                "Do you prefer a lighter laptop? Let me know if there are other features you're considering.",
            ],
            Slot::Os => [
                "What operating system do you prefer? Or let me know about other features you're prioritizing.",
                "Would you like a specific OS, like Windows or macOS? Any other key specs you'd like?",
            ],
            Slot::Audio => [
                "Do you care about high-quality audio for music or video calls? Or are there other features on your mind?",
                "How important is audio quality to you? Let me know if there are other things you're considering.",
            ],
            Slot::KeyboardFeatures => [
                "Do you need a backlit keyboard or anything special? Feel free to mention other specs too.",
                "What are your thoughts on keyboard features? You can also tell me about other priorities you have.",
            ],
            Slot::Material => [
                "Would you prefer a premium build like aluminum or something else? Or are there other specs you'd like?",
                "What kind of build material do you prefer? Feel free to mention any other features too.",
            ],
            Slot::WebcamQuality => [
                "Will you be using the webcam often? Let me know if there's a quality level or other spec you need.",
                "Do you care about webcam quality? Or is there something else you'd like your laptop to have?",
            ],
            Slot::Connectivity => [
                "Do you need any specific connectivity options, like Wi-Fi 6 or Bluetooth? Let me know if there's more on your mind.",
                "What connectivity features are important to you? Feel free to mention other key specs too.",
            ],
            Slot::Purpose => [
                "What will you primarily use the laptop for? Feel free to include other preferences as well.",
                "Is this laptop for work, gaming, or general use? Let me know if there are other features you're considering.",
            ],
        }
    }
}

#[async_trait]
impl QuestionGenerator for TemplateQuestions {
    async fn question_for(&self, slot: Slot, _preferences: &PreferenceState) -> Result<String> {
        let templates = Self::templates(slot);
        let chosen = templates
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(FALLBACK_QUESTION);
        Ok(chosen.to_string())
    }
}

/// Service-backed question phrasing. A transport failure falls back to the
/// canned template so the conversation never stalls on the network.
pub struct ServiceQuestions {
    client: ChatClient,
}

impl ServiceQuestions {
    #[must_use]
    pub fn new(client: ChatClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl QuestionGenerator for ServiceQuestions {
    async fn question_for(&self, slot: Slot, preferences: &PreferenceState) -> Result<String> {
        let known = serde_json::to_string(preferences)?;
        let prompt = format!(
            "User's current preferences are: {known}.\n\
             The assistant needs to ask the user about their {}.\n\
             Generate a natural-sounding query for this.",
            slot.key().replace('_', " ")
        );
        match self.client.complete(SYSTEM_PROMPT, &prompt).await {
            Ok(question) => Ok(question),
            Err(err) => {
                log::warn!("Question generation failed ({err}); using canned phrasing");
                TemplateQuestions.question_for(slot, preferences).await
            }
        }
    }
}
