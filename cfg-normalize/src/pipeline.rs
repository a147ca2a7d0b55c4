use log::debug;

use cfg_grammar::Cfg;
use cfg_history::History;

use crate::{eliminate_nulling, eliminate_units, remove_useless, to_cnf, NormalizeError};

/// A grammar in Chomsky Normal Form, together with the history that relates it to the grammar
/// it was normalized from.
#[derive(Clone, Debug)]
pub struct Normalized {
    grammar: Cfg,
    history: History,
    short_circuited: bool,
}

impl Normalized {
    /// Normalizes a grammar. A grammar that is already in Chomsky Normal Form is taken as it is,
    /// with an empty history.
    pub fn new(cfg: &Cfg) -> Result<Self, NormalizeError> {
        cfg.validate()?;
        let start = cfg.start().ok_or(NormalizeError::MissingStart)?;

        if cfg.is_cnf() {
            if cfg.rules_for(start).next().is_none() {
                return Err(NormalizeError::NoStartRule { start });
            }
            debug!("grammar of {} rules is already in normal form", cfg.len());
            return Ok(Normalized {
                grammar: cfg.clone(),
                history: History::new(),
                short_circuited: true,
            });
        }

        let useful = remove_useless(cfg)?;
        let (without_nulling, nulling) = eliminate_nulling(&useful);
        let (without_units, unit) = eliminate_units(&without_nulling);
        let (grammar, split) = to_cnf(&without_units)?;

        let mut history = History::new();
        history.set_nulling(nulling);
        history.set_unit(unit);
        history.set_split(split);
        debug!(
            "normalized {} rules into {} rules",
            cfg.len(),
            grammar.len()
        );
        Ok(Normalized {
            grammar,
            history,
            short_circuited: false,
        })
    }

    /// Returns the grammar in Chomsky Normal Form.
    pub fn grammar(&self) -> &Cfg {
        &self.grammar
    }

    /// Returns the history of every stage that changed the grammar.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Checks whether the grammar was in normal form to begin with.
    pub fn is_short_circuited(&self) -> bool {
        self.short_circuited
    }
}
