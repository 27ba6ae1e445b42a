use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of management intervention.
///
/// Variants are declared in name order so that sorting by type matches
/// sorting by name.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum ActionType {
    GullyRestoration,
    HillSlopeRestoration,
    RiverBankRestoration,
    WetlandsEstablishment,
    /// Type of the null action; never applied to anything.
    Null,
}

impl ActionType {
    pub const APPLICABLE: [ActionType; 4] = [
        ActionType::GullyRestoration,
        ActionType::HillSlopeRestoration,
        ActionType::RiverBankRestoration,
        ActionType::WetlandsEstablishment,
    ];

    pub fn is_null(self) -> bool {
        self == ActionType::Null
    }

    pub fn name(self) -> &'static str {
        match self {
            ActionType::GullyRestoration => "GullyRestoration",
            ActionType::HillSlopeRestoration => "HillSlopeRestoration",
            ActionType::RiverBankRestoration => "RiverBankRestoration",
            ActionType::WetlandsEstablishment => "WetlandsEstablishment",
            ActionType::Null => "NullAction",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
