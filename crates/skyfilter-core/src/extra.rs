use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

///
/// CONSTANTS
///

/// Base name of the synthetic boolean field emitted for each `cone(...)` call.
pub const CONE_FIELD_PREFIX: &str = "cone_query";

/// Synthetic field name for the cone at `index` in call order.
///
/// The first cone keeps the bare prefix; later ones append their index, so
/// the names read `cone_query`, `cone_query1`, `cone_query2`, ...
#[must_use]
pub fn cone_field_name(index: usize) -> String {
    if index == 0 {
        CONE_FIELD_PREFIX.to_string()
    } else {
        format!("{CONE_FIELD_PREFIX}{index}")
    }
}

///
/// Cone
///
/// Parameters of one spatial cone search, in degrees.
///

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct Cone {
    pub ra: f64,
    pub dec: f64,
    pub radius: f64,
}

impl Cone {
    #[must_use]
    pub const fn new(ra: f64, dec: f64, radius: f64) -> Self {
        Self { ra, dec, radius }
    }
}

///
/// ExtraParams
///
/// Side-channel output of one resolution pass.
/// `cones` is append-only and ordered by the left-to-right position of the
/// `cone(...)` calls in the query text; `cones[i]` backs the synthetic field
/// `cone_field_name(i)`.
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct ExtraParams {
    pub cones: Vec<Cone>,
    pub aliases: BTreeMap<String, String>,
}

impl ExtraParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a cone and return the synthetic field name that refers to it.
    pub(crate) fn push_cone(&mut self, cone: Cone) -> String {
        let name = cone_field_name(self.cones.len());
        self.cones.push(cone);

        name
    }

    /// Look up the cone behind a synthetic field name.
    #[must_use]
    pub fn cone_for_field(&self, field: &str) -> Option<&Cone> {
        let suffix = field.strip_prefix(CONE_FIELD_PREFIX)?;
        let index = if suffix.is_empty() {
            0
        } else {
            // `cone_query0` and `cone_query01` are never emitted
            if suffix.starts_with('0') {
                return None;
            }
            suffix.parse::<usize>().ok()?
        };

        self.cones.get(index)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cones.is_empty() && self.aliases.is_empty()
    }
}

///
/// TESTS
///
