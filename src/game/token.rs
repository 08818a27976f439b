use std::fmt;

/// Contents of a single board slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Token {
    #[default]
    Empty,
    Player,
    Computer,
}

impl Token {
    /// Get the opposing side. `Empty` has no opponent and maps to itself.
    pub fn other(self) -> Token {
        match self {
            Token::Player => Token::Computer,
            Token::Computer => Token::Player,
            Token::Empty => Token::Empty,
        }
    }

    /// Swap Player and Computer in place.
    pub fn toggle(&mut self) {
        *self = self.other();
    }

    pub fn is_empty(self) -> bool {
        self == Token::Empty
    }

    /// Character used by the ASCII board
    pub fn symbol(self) -> char {
        match self {
            Token::Empty => '.',
            Token::Player => 'X',
            Token::Computer => '0',
        }
    }

    /// Get side name for display
    pub fn name(self) -> &'static str {
        match self {
            Token::Empty => "Empty",
            Token::Player => "Player",
            Token::Computer => "Computer",
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_token() {
        assert_eq!(Token::Player.other(), Token::Computer);
        assert_eq!(Token::Computer.other(), Token::Player);
        assert_eq!(Token::Empty.other(), Token::Empty);
    }

    #[test]
    fn test_toggle_twice_restores() {
        let mut token = Token::Player;
        token.toggle();
        assert_eq!(token, Token::Computer);
        token.toggle();
        assert_eq!(token, Token::Player);
    }

    #[test]
    fn test_symbols() {
        assert_eq!(Token::Empty.symbol(), '.');
        assert_eq!(Token::Player.to_string(), "X");
        assert_eq!(Token::Computer.to_string(), "0");
    }

    #[test]
    fn test_token_name() {
        assert_eq!(Token::Player.name(), "Player");
        assert_eq!(Token::Computer.name(), "Computer");
    }
}
