//! Names of the action attributes the catchment variables read.

pub const ORIGINAL_SEDIMENT: &str = "OriginalSedimentProduction";
pub const ACTIONED_SEDIMENT: &str = "ActionedSedimentProduction";

pub const ORIGINAL_PARTICULATE_NITROGEN: &str = "OriginalParticulateNitrogen";
pub const ACTIONED_PARTICULATE_NITROGEN: &str = "ActionedParticulateNitrogen";

pub const ORIGINAL_DISSOLVED_NITROGEN: &str = "OriginalDissolvedNitrogen";
pub const ACTIONED_DISSOLVED_NITROGEN: &str = "ActionedDissolvedNitrogen";

pub const IMPLEMENTATION_COST: &str = "ImplementationCost";
pub const OPPORTUNITY_COST: &str = "OpportunityCost";

// Inputs to the precomputed sediment magnitudes of river bank restorations.
pub const ORIGINAL_BUFFER_VEGETATION: &str = "OriginalBufferVegetation";
pub const ACTIONED_BUFFER_VEGETATION: &str = "ActionedBufferVegetation";
