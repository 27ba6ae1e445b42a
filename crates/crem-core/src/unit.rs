//! Units of measure attached to decision variables.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitOfMeasure {
    #[default]
    NotApplicable,
    TonnesPerYear,
    Dollars,
}

impl fmt::Display for UnitOfMeasure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            UnitOfMeasure::NotApplicable => "Not Applicable",
            UnitOfMeasure::TonnesPerYear => "Tonnes per Year (t/y)",
            UnitOfMeasure::Dollars => "Dollars ($)",
        };
        f.write_str(text)
    }
}
