//! Offline template stories.
//!
//! Each mode maps to one hand-written story with the names spliced in.
//! Output depends only on the arguments.

use crate::types::story::StoryMode;

/// Word used in holiday stories when no holiday was named.
pub const DEFAULT_HOLIDAY: &str = "holiday";

type TemplateFn = fn(&TemplateInput<'_>) -> String;

/// Names spliced into a template.
#[derive(Debug, Clone, Copy)]
pub struct TemplateInput<'a> {
    /// Child names as displayed.
    pub child_names: &'a str,
    /// Character names as displayed.
    pub characters: &'a str,
    /// Holiday name, already defaulted.
    pub holiday: &'a str,
}

fn template_for(mode: StoryMode) -> TemplateFn {
    match mode {
        StoryMode::Playful => playful,
        StoryMode::BathTime => bath_time,
        StoryMode::Bedtime => bedtime,
        StoryMode::Holiday => holiday,
    }
}

/// Generates the template story for a mode.
///
/// An unrecognized mode (`None`) gets the playful story. A missing or blank
/// holiday is rendered as the word `holiday`.
pub fn generate_template(
    mode: Option<StoryMode>,
    child_names: &str,
    characters: &str,
    holiday: Option<&str>,
) -> String {
    let input = TemplateInput {
        child_names,
        characters,
        holiday: holiday
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .unwrap_or(DEFAULT_HOLIDAY),
    };

    template_for(mode.unwrap_or(StoryMode::Playful))(&input)
}

fn playful(input: &TemplateInput<'_>) -> String {
    let TemplateInput {
        child_names: kids,
        characters: friends,
        ..
    } = *input;

    format!(
        "Once upon a time, {kids} was playing outside when suddenly {friends} appeared! \
\"Want to go on an adventure?\" asked {friends} with a big smile.\n\n\
\"Yes!\" shouted {kids} excitedly. Together, they discovered a hidden playground \
with slides that sparkled like rainbows and swings that could fly through the clouds. \
They played games, told jokes, and had races around the magical equipment.\n\n\
As the golden sun began to set, painting the sky in beautiful colors, {friends} said, \
\"This was the best day ever!\" {kids} agreed, feeling happy and tired from all the fun. \
They promised to meet again tomorrow for another exciting adventure.\n\n\
{kids} went home with a big smile, already dreaming about what amazing things \
they would discover next time with their wonderful friend {friends}!"
    )
}

fn bath_time(input: &TemplateInput<'_>) -> String {
    let TemplateInput {
        child_names: kids,
        characters: friends,
        ..
    } = *input;

    format!(
        "It was bath time, and {kids} was getting ready for a warm, bubbly bath. \
Suddenly, {friends} appeared with a magical bottle of rainbow soap!\n\n\
\"This soap creates the most amazing bubbles,\" explained {friends}, pouring some into the water. \
Instantly, the bathroom filled with bubbles of every color - purple ones that smelled like lavender, \
blue ones that sparkled like stars, and yellow ones that felt as soft as silk.\n\n\
{kids} and {friends} played bubble games, making bubble castles and watching them \
float gently around the room. The magical soap made {kids} feel clean and refreshed, \
and the warm water was perfectly cozy.\n\n\
After the bath, wrapped in a fluffy towel, {kids} felt squeaky clean and ready for \
sweet dreams. \"Thank you for making bath time so special!\" said {kids}, giving \
{friends} a big, clean hug."
    )
}

fn bedtime(input: &TemplateInput<'_>) -> String {
    let TemplateInput {
        child_names: kids,
        characters: friends,
        ..
    } = *input;

    format!(
        "As the first stars began to twinkle in the night sky, {kids} was getting ready for bed. \
{friends} came to visit with a very special gift - a magical dream pillow made of moonbeams and starlight.\n\n\
\"This pillow will bring you the most wonderful dreams,\" whispered {friends} softly. \
\"Dreams filled with friendship, gentle adventures, and beautiful places.\" They tucked the pillow \
under {kids}' head, and immediately it felt as soft as a cloud.\n\n\
{friends} sat beside the bed, telling quiet stories about peaceful meadows where friendly \
animals danced under the moonlight, and magical gardens where flowers sang lullabies. \
The gentle words made {kids} feel safe, loved, and wonderfully sleepy.\n\n\
Soon, {kids} drifted off to the most peaceful sleep, with {friends} watching over \
their dreams like a guardian angel. All through the night, the magical pillow brought \
beautiful dreams of joy, adventure, and friendship."
    )
}

fn holiday(input: &TemplateInput<'_>) -> String {
    let TemplateInput {
        child_names: kids,
        characters: friends,
        holiday,
    } = *input;

    format!(
        "It was a very special {holiday}, and {kids} was bubbling with excitement! \
{friends} arrived with arms full of festive decorations and holiday magic.\n\n\
\"Let's make this the most wonderful {holiday} ever!\" exclaimed {friends}. Together, \
they decorated with sparkling lights, colorful ornaments, and magical holiday symbols. \
The air filled with the sweet scents of holiday treats and the warm glow of celebration.\n\n\
They prepared special {holiday} activities, singing festive songs and sharing stories \
about the meaning of this special day. {friends} showed {kids} how holiday magic \
comes from sharing joy, kindness, and love with others.\n\n\
As the {holiday} celebration came to an end, {kids} felt their heart full of warmth \
and happiness. \"This was the most magical {holiday} ever!\" they said, hugging {friends} tightly. \
The holiday spirit would stay in their heart all year long, reminding them of this \
perfect day filled with love, friendship, and wonder."
    )
}
