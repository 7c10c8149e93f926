use serde::{Deserialize, Serialize};
use std::fmt;

/// Reading medium a contest entry was logged under.
///
/// The set is open: any label that is not recognized maps to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Medium {
    Book,
    Manga,
    Game,
    Anime,
    Drama,
    Other,
}

impl Medium {
    pub const ALL: [Medium; 6] = [
        Medium::Book,
        Medium::Manga,
        Medium::Game,
        Medium::Anime,
        Medium::Drama,
        Medium::Other,
    ];

    /// Map a free-form label (as shown on contest pages or stored in snapshots).
    pub fn parse(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "book" | "books" => Medium::Book,
            "manga" => Medium::Manga,
            "game" | "games" | "full game" | "fullgame" => Medium::Game,
            "anime" => Medium::Anime,
            "drama" | "dramas" => Medium::Drama,
            _ => Medium::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Medium::Book => "book",
            Medium::Manga => "manga",
            Medium::Game => "game",
            Medium::Anime => "anime",
            Medium::Drama => "drama",
            Medium::Other => "other",
        }
    }

    /// Capitalized name for table headings
    pub fn title(&self) -> &'static str {
        match self {
            Medium::Book => "Book",
            Medium::Manga => "Manga",
            Medium::Game => "Game",
            Medium::Anime => "Anime",
            Medium::Drama => "Drama",
            Medium::Other => "Other",
        }
    }
}

impl From<&str> for Medium {
    fn from(label: &str) -> Self {
        Medium::parse(label)
    }
}

impl From<String> for Medium {
    fn from(label: String) -> Self {
        Medium::parse(&label)
    }
}

impl From<Medium> for String {
    fn from(medium: Medium) -> Self {
        medium.as_str().to_string()
    }
}

impl fmt::Display for Medium {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Native unit a quantity is measured in.
///
/// Units outside the well-known four are kept verbatim (lowercased) so a
/// conversion table can still name them.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Unit {
    Pages,
    Characters,
    Minutes,
    Episodes,
    Custom(String),
}

impl Unit {
    pub fn parse(label: &str) -> Self {
        let label = label.trim().to_lowercase();
        match label.as_str() {
            "pages" | "page" => Unit::Pages,
            "characters" | "character" | "chars" => Unit::Characters,
            "minutes" | "minute" | "min" => Unit::Minutes,
            "episodes" | "episode" | "eps" => Unit::Episodes,
            _ => Unit::Custom(label),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Unit::Pages => "pages",
            Unit::Characters => "characters",
            Unit::Minutes => "minutes",
            Unit::Episodes => "episodes",
            Unit::Custom(label) => label,
        }
    }

    /// The same unit in its canonical spelling (`Custom("Page")` becomes `Pages`)
    pub fn canonical(&self) -> Self {
        Unit::parse(self.as_str())
    }

    pub fn is_blank(&self) -> bool {
        self.as_str().is_empty()
    }
}

impl From<&str> for Unit {
    fn from(label: &str) -> Self {
        Unit::parse(label)
    }
}

impl From<String> for Unit {
    fn from(label: String) -> Self {
        Unit::parse(&label)
    }
}

impl From<Unit> for String {
    fn from(unit: Unit) -> Self {
        unit.as_str().to_string()
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
