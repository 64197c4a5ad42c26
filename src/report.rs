//! Human-readable rendering of a [`MachineDescription`].
//!
//! ```text
//! ********************************************************************************
//! *                                                                              *
//! *                                  unary_add                                   *
//! *                                                                              *
//! ********************************************************************************
//! Alphabet: [ 1, ., +, = ]
//! States  : [ scanright, eraseone, HALT ]
//! Initial : scanright
//! Finals  : [ HALT ]
//! (scanright, .) -> (scanright, ., RIGHT)
//! ...
//! ********************************************************************************
//! ```

use crate::types::{Direction, MachineDescription};
use std::fmt;

const BANNER_WIDTH: usize = 80;

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for MachineDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "*".repeat(BANNER_WIDTH);
        let inner = BANNER_WIDTH - 2;

        writeln!(f, "{rule}")?;
        writeln!(f, "*{:inner$}*", "")?;
        writeln!(f, "*{:^inner$}*", self.name())?;
        writeln!(f, "*{:inner$}*", "")?;
        writeln!(f, "{rule}")?;

        writeln!(f, "Alphabet: {}", list(self.alphabet().iter()))?;
        writeln!(f, "States  : {}", list(self.states().iter()))?;
        writeln!(f, "Initial : {}", self.initial())?;
        writeln!(f, "Finals  : {}", list(self.finals().iter()))?;

        for (state, rules) in self.transitions() {
            for rule in rules {
                writeln!(
                    f,
                    "({}, {}) -> ({}, {}, {})",
                    state, rule.read, rule.to_state, rule.write, rule.action
                )?;
            }
        }

        write!(f, "{rule}")
    }
}

/// Formats items as `[ a, b, c ]`.
fn list<T: fmt::Display>(items: impl Iterator<Item = T>) -> String {
    let items = items.map(|item| item.to_string()).collect::<Vec<_>>();
    format!("[ {} ]", items.join(", "))
}
