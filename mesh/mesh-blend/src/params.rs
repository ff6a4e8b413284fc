//! Pipeline parameters.

use mesh_correspond::MatchParams;
use mesh_subdivide::SubdivideParams;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Parameters for [`MorphPipeline`](crate::MorphPipeline).
///
/// # Examples
///
/// ```
/// use mesh_blend::BlendParams;
///
/// let params = BlendParams::new()
///     .with_equalize(true)
///     .with_initial_percent(50.0)
///     .with_step_size(1.0);
///
/// assert!(params.equalize);
/// assert_eq!(params.subdivide.iterations, 4);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BlendParams {
    /// Subdivide the sparser mesh towards the denser one before matching.
    pub equalize: bool,

    /// Limits for equalization. `iterations` caps the number of passes.
    pub subdivide: SubdivideParams,

    /// Vertex matching options.
    pub matching: MatchParams,

    /// Percent the pipeline starts at.
    pub initial_percent: f64,

    /// Percent change per [`step_forward`](crate::MorphPipeline::step_forward)
    /// or [`step_back`](crate::MorphPipeline::step_back).
    pub step_size: f64,
}

impl Default for BlendParams {
    fn default() -> Self {
        Self {
            equalize: false,
            subdivide: SubdivideParams::new().with_iterations(4),
            matching: MatchParams::default(),
            initial_percent: 0.1,
            step_size: 0.5,
        }
    }
}

impl BlendParams {
    /// Create new parameters with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable density equalization.
    #[must_use]
    pub const fn with_equalize(mut self, equalize: bool) -> Self {
        self.equalize = equalize;
        self
    }

    /// Set the equalization limits.
    #[must_use]
    pub const fn with_subdivide(mut self, subdivide: SubdivideParams) -> Self {
        self.subdivide = subdivide;
        self
    }

    /// Set the matching options.
    #[must_use]
    pub const fn with_matching(mut self, matching: MatchParams) -> Self {
        self.matching = matching;
        self
    }

    /// Set the starting percent.
    #[must_use]
    pub const fn with_initial_percent(mut self, percent: f64) -> Self {
        self.initial_percent = percent;
        self
    }

    /// Set the step size.
    #[must_use]
    pub const fn with_step_size(mut self, step_size: f64) -> Self {
        self.step_size = step_size;
        self
    }
}
