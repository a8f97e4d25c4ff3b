//! Contains the ANSI escape codes used to decorate console output.

use std::fmt::Display;

/// Represents a text decoration: either a style or a foreground color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Paint {
    Bold,
    Underline,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
}

impl Paint {
    /// Gets the SGR parameter of the decoration.
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Bold => 1,
            Self::Underline => 4,
            Self::Red => 31,
            Self::Green => 32,
            Self::Yellow => 33,
            Self::Blue => 34,
            Self::Magenta => 35,
            Self::Cyan => 36,
        }
    }

    /// Applies the decoration to the given displayable object.
    pub fn with<T>(self, display: T) -> Painted<T> {
        Painted {
            paint: self,
            display,
        }
    }
}

/// Is a struct implementing [`Display`] that represents a displayable object with a decoration
/// applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Painted<T> {
    /// The decoration applied to the displayable object.
    pub paint: Paint,

    /// The displayable object.
    pub display: T,
}

impl<T: Display> Display for Painted<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\x1B[{}m{}\x1B[0m", self.paint.code(), self.display)
    }
}
