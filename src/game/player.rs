use std::fmt;

/// A player, and the color of the pieces they drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Black,
}

impl Color {
    /// Get the other player
    pub fn other(self) -> Color {
        match self {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
        }
    }

    /// Get player name for display
    pub fn name(self) -> &'static str {
        match self {
            Color::Red => "Red",
            Color::Black => "Black",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_color() {
        assert_eq!(Color::Red.other(), Color::Black);
        assert_eq!(Color::Black.other(), Color::Red);
    }

    #[test]
    fn test_color_name() {
        assert_eq!(Color::Red.name(), "Red");
        assert_eq!(Color::Black.to_string(), "Black");
    }
}
