//! Character franchises offered by the character picker.

/// A group of well-known characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Franchise {
    /// Franchise name.
    pub name: &'static str,
    /// Character names, in picker order.
    pub characters: &'static [&'static str],
}

impl Franchise {
    /// Preview text for the picker card, e.g. `Mario, Luigi, Peach +1 more`.
    pub fn preview(&self) -> String {
        let shown: Vec<&str> = self.characters.iter().take(3).copied().collect();
        let preview = shown.join(", ");
        match self.characters.len().saturating_sub(shown.len()) {
            0 => preview,
            hidden => format!("{preview} +{hidden} more"),
        }
    }
}

/// Default franchises, in picker order.
pub const FRANCHISES: &[Franchise] = &[
    Franchise {
        name: "Super Mario Bros",
        characters: &["Mario", "Luigi", "Peach", "Bowser"],
    },
    Franchise {
        name: "Pokemon",
        characters: &["Pikachu", "Charizard", "Squirtle", "Bulbasaur"],
    },
    Franchise {
        name: "Disney Classics",
        characters: &["Mickey", "Minnie", "Donald", "Goofy"],
    },
    Franchise {
        name: "Paw Patrol",
        characters: &["Chase", "Marshall", "Skye", "Rubble"],
    },
    Franchise {
        name: "Minecraft",
        characters: &["Steve", "Alex", "Ender Dragon", "Creeper", "Chip", "Milo"],
    },
    Franchise {
        name: "Bluey",
        characters: &["Bluey", "Bingo", "Bandit", "Chilli"],
    },
];

/// Looks up a franchise by name, ignoring case.
pub fn find_franchise(name: &str) -> Option<&'static Franchise> {
    FRANCHISES
        .iter()
        .find(|f| f.name.eq_ignore_ascii_case(name.trim()))
}
