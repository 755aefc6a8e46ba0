//! Prompt text sent to the chat-completion endpoint.

use crate::types::story::StoryMode;

/// Appended when both companion characters appear in the cast.
pub const COMPANION_NOTE: &str = "\n\nNote: If the story includes Chip and Milo, they are Minecraft YouTuber characters who are brothers and love building and exploring in Minecraft.";

/// Always appended.
pub const GUIDELINES: &str = "\n\nGuidelines: Use simple language appropriate for children ages 3-10. Include dialogue. Make it engaging and imaginative. Ensure the story has a clear beginning, middle, and happy ending.";

/// Builds the story prompt.
///
/// `None` as the mode selects a generic instruction. The holiday is woven in
/// only for [`StoryMode::Holiday`] and only when it is not blank.
pub fn build_prompt(
    mode: Option<StoryMode>,
    child_names: &str,
    characters: &str,
    holiday: Option<&str>,
) -> String {
    let mut prompt = match mode {
        Some(StoryMode::Playful) => format!(
            "Create a fun, energetic story for {child_names} featuring {characters}. \
Make it playful, adventurous, and exciting with lots of action and laughs. \
Perfect for daytime reading with about 3-4 paragraphs. Include dialogue and vivid descriptions."
        ),
        Some(StoryMode::BathTime) => format!(
            "Create a gentle, water-themed story for {child_names} featuring {characters}. \
Include bubbles, splashing, and cleanliness themes. Make it soothing but fun. \
Perfect for bath time with about 3-4 paragraphs. Include sensory details about water and soap."
        ),
        Some(StoryMode::Bedtime) => format!(
            "Create a calm, peaceful bedtime story for {child_names} featuring {characters}. \
Include themes of friendship, dreams, and gentle adventures. \
Make it soothing and perfect for bedtime with about 3-4 paragraphs. End on a peaceful, sleepy note."
        ),
        Some(StoryMode::Holiday) => {
            let theme = holiday
                .map(str::trim)
                .filter(|h| !h.is_empty())
                .map(|h| format!(" celebrating {h}"))
                .unwrap_or_default();
            format!(
                "Create a festive holiday story for {child_names} featuring {characters}{theme}. \
Include holiday magic, traditions, and celebration themes. \
Make it joyful and festive with about 3-4 paragraphs. Include holiday-specific details and warmth."
            )
        }
        None => format!(
            "Create an engaging story for {child_names} featuring {characters}. \
Make it age-appropriate, entertaining, and heartwarming with about 3-4 paragraphs."
        ),
    };

    if characters.contains("Chip") && characters.contains("Milo") {
        prompt.push_str(COMPANION_NOTE);
    }
    prompt.push_str(GUIDELINES);
    prompt
}
