//! Two-faced card rendering for the terminal.

use crate::deck::Card;

/// Which side of a card is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Face {
    /// Japanese text and romaji.
    #[default]
    Front,
    /// English meaning.
    Back,
}

/// Flip state for the card on screen.
///
/// The view holds no reference to the deck; callers pass the card to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlipCard {
    face: Face,
    show_romaji: bool,
}

impl Default for FlipCard {
    fn default() -> Self {
        Self::new(true)
    }
}

impl FlipCard {
    /// Create a view showing the front face.
    #[must_use]
    pub fn new(show_romaji: bool) -> Self {
        Self {
            face: Face::Front,
            show_romaji,
        }
    }

    /// The face currently showing.
    #[must_use]
    pub fn face(&self) -> Face {
        self.face
    }

    /// Turn the card over.
    pub fn flip(&mut self) {
        self.face = match self.face {
            Face::Front => Face::Back,
            Face::Back => Face::Front,
        };
    }

    /// Show the front again, used whenever another card is brought up.
    pub fn turn_front(&mut self) {
        self.face = Face::Front;
    }

    /// Render the showing face of `card`.
    #[must_use]
    pub fn render(&self, card: &Card) -> String {
        let mut lines = Vec::with_capacity(4);
        match self.face {
            Face::Front => {
                lines.push(format!("  {}", card.japanese));
                if self.show_romaji {
                    if let Some(romaji) = card.romaji() {
                        lines.push(format!("  {romaji}"));
                    }
                }
                lines.push("  (flip to see meaning)".to_string());
            }
            Face::Back => {
                lines.push(format!("  {}", card.english));
                lines.push("  (flip to see Japanese)".to_string());
            }
        }
        if card.known {
            lines.push("  [Known]".to_string());
        }
        lines.join("\n")
    }
}
