use std::error::Error;
use std::fmt;

use cfg_grammar::CfgRule;

/// An error in the use of the recognizer. Rejection of an input is not an error.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CykError {
    /// The recognizer does not handle the empty input.
    EmptyInput,
    /// The grammar has a rule that is not in Chomsky Normal Form.
    NotCnf {
        /// The first such rule.
        rule: CfgRule,
    },
    /// The grammar has no start symbol.
    MissingStart,
}

impl fmt::Display for CykError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CykError::EmptyInput => write!(f, "the empty input is not supported"),
            CykError::NotCnf { rule } => {
                write!(f, "rule {:?} is not in Chomsky Normal Form", rule)
            }
            CykError::MissingStart => write!(f, "grammar has no start symbol"),
        }
    }
}

impl Error for CykError {}
