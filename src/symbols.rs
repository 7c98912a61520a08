use std::fmt::{self, Display};

/// Logical connectives understood by the converter and the evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Not,
    And,
    Or,
    Implies,
    Equiv,
}

impl Operator {
    pub const fn from_symbol(c: char) -> Option<Self> {
        match c {
            '!' => Some(Self::Not),
            '&' => Some(Self::And),
            '|' => Some(Self::Or),
            '>' => Some(Self::Implies),
            '~' => Some(Self::Equiv),
            _ => None,
        }
    }

    pub const fn symbol(self) -> char {
        match self {
            Self::Not => '!',
            Self::And => '&',
            Self::Or => '|',
            Self::Implies => '>',
            Self::Equiv => '~',
        }
    }

    /// Binding strength, higher binds tighter.
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Not => 5,
            Self::And => 4,
            Self::Or => 3,
            Self::Implies => 2,
            Self::Equiv => 1,
        }
    }

    pub const fn arity(self) -> usize {
        match self {
            Self::Not => 1,
            _ => 2,
        }
    }

    /// Applies a binary connective. `Not` ignores its second argument.
    pub const fn apply(self, lhs: bool, rhs: bool) -> bool {
        match self {
            Self::Not => !lhs,
            Self::And => lhs && rhs,
            Self::Or => lhs || rhs,
            Self::Implies => !lhs || rhs,
            Self::Equiv => lhs == rhs,
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
