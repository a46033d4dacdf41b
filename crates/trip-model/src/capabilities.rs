//! Schema capability descriptor.
//!
//! Column presence is checked exactly once, when the table is loaded; every
//! downstream stage consumes the resulting descriptor instead of re-probing
//! the schema.

use serde::Serialize;

use crate::columns;

/// Which optional columns an input file actually provides.
///
/// Built from the realized column list after the pruned load, so it reflects
/// what is in memory, not what the fixed request hoped for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SchemaCapabilities {
    /// Target column (`total_amount`) is present.
    pub has_target: bool,
    /// `trip_distance` is present.
    pub has_trip_distance: bool,
    /// `store_and_fwd_flag` is present.
    pub has_flag: bool,
    /// Primary pickup timestamp is present.
    pub has_primary_pickup: bool,
    /// Primary dropoff timestamp is present.
    pub has_primary_dropoff: bool,
    /// Legacy pickup timestamp is present.
    pub has_legacy_pickup: bool,
    /// Legacy dropoff timestamp is present.
    pub has_legacy_dropoff: bool,
}

impl SchemaCapabilities {
    /// Build the descriptor from a list of column names.
    pub fn from_columns<'a, I>(names: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut capabilities = Self::default();
        for name in names {
            match name {
                columns::TARGET => capabilities.has_target = true,
                columns::TRIP_DISTANCE => capabilities.has_trip_distance = true,
                columns::STORE_AND_FWD_FLAG => capabilities.has_flag = true,
                columns::PICKUP_TS => capabilities.has_primary_pickup = true,
                columns::DROPOFF_TS => capabilities.has_primary_dropoff = true,
                columns::LEGACY_PICKUP_TS => capabilities.has_legacy_pickup = true,
                columns::LEGACY_DROPOFF_TS => capabilities.has_legacy_dropoff = true,
                _ => {}
            }
        }
        capabilities
    }

    /// Hour, day-of-week and month can be derived.
    pub fn derives_time_features(&self) -> bool {
        self.has_primary_pickup
    }

    /// Trip duration can be derived (needs both ends of the primary pair).
    pub fn derives_duration(&self) -> bool {
        self.has_primary_pickup && self.has_primary_dropoff
    }

    /// Names of expected columns that are absent, for reduced-schema logging.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if !self.has_target {
            missing.push(columns::TARGET);
        }
        if !self.has_trip_distance {
            missing.push(columns::TRIP_DISTANCE);
        }
        if !self.has_primary_pickup {
            missing.push(columns::PICKUP_TS);
        }
        if !self.has_primary_dropoff {
            missing.push(columns::DROPOFF_TS);
        }
        missing
    }
}
