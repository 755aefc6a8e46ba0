//! Display text for names, characters and titles.
//!
//! The shell collects child names as a list and characters as a
//! comma-separated field; these helpers turn them into the strings that go
//! into a [`StoryRequest`](crate::types::story::StoryRequest) and onto the
//! story screen.

use crate::types::story::StoryMode;

/// Used when every child-name field is blank.
pub const UNNAMED_CHILD: &str = "your child";

/// Joins child names for prose: `A`, `A and B`, `A, B, and C`.
///
/// Blank entries are skipped. With no names left, returns [`UNNAMED_CHILD`].
pub fn join_child_names<S: AsRef<str>>(names: &[S]) -> String {
    let names: Vec<&str> = names
        .iter()
        .map(|n| n.as_ref().trim())
        .filter(|n| !n.is_empty())
        .collect();

    match names.as_slice() {
        [] => UNNAMED_CHILD.to_string(),
        [only] => (*only).to_string(),
        [first, second] => format!("{first} and {second}"),
        [init @ .., last] => format!("{}, and {}", init.join(", "), last),
    }
}

/// Splits a comma-separated character field, trimming and dropping blanks.
pub fn parse_characters(field: &str) -> Vec<String> {
    field
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect()
}

/// Short cast summary: up to two names joined with `and`, then `and others`.
pub fn summarize_characters<S: AsRef<str>>(characters: &[S]) -> String {
    if characters.len() > 2 {
        format!(
            "{} and {} and others",
            characters[0].as_ref(),
            characters[1].as_ref()
        )
    } else {
        let names: Vec<&str> = characters.iter().map(|c| c.as_ref()).collect();
        names.join(" and ")
    }
}

/// Title shown above a finished story.
pub fn story_title(mode: Option<StoryMode>, names: &str, holiday: Option<&str>) -> String {
    match mode {
        Some(StoryMode::Playful) => format!("{names}'s Fun Adventure"),
        Some(StoryMode::BathTime) => format!("{names}'s Splashing Bath Time"),
        Some(StoryMode::Bedtime) => format!("{names}'s Peaceful Dream"),
        Some(StoryMode::Holiday) => match holiday.map(str::trim).filter(|h| !h.is_empty()) {
            Some(holiday) => format!("{names}'s {holiday} Adventure"),
            None => format!("{names}'s Holiday Magic"),
        },
        None => format!("{names}'s Special Story"),
    }
}
