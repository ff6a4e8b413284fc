//! Match once, morph many times.

use mesh_correspond::{Correspondence, MatchError, MeshSide, match_meshes};
use mesh_morph::{MorphError, MorphOutput, interpolate};
use mesh_subdivide::equalize_density;
use mesh_types::IndexedMesh;
use tracing::info;

use crate::error::BlendResult;
use crate::params::BlendParams;

/// Two meshes prepared for blending.
///
/// Building the pipeline does the expensive work (optional equalization and
/// vertex matching) once. Each [`morph`](Self::morph) afterwards only
/// interpolates positions and rebuilds normals.
///
/// The pipeline also keeps a current percent so callers driving it from
/// input events can [`step`](Self::step) it.
///
/// # Examples
///
/// ```
/// use mesh_blend::{BlendParams, MorphPipeline};
/// use mesh_types::octahedron;
///
/// let sparse = octahedron(1.0);
/// let dense = mesh_subdivide::subdivide(&octahedron(2.0))?;
///
/// let mut pipeline = MorphPipeline::new(&sparse, &dense, &BlendParams::default())?;
/// let halfway = pipeline.morph(50.0)?;
/// assert_eq!(halfway.mesh.vertices.len(), 18);
///
/// pipeline.set_percent(99.5)?;
/// let full = pipeline.step_forward()?;
/// assert!((full.percent - 100.0).abs() < 1e-12);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct MorphPipeline {
    correspondence: Correspondence,
    large_triangles: Vec<[u32; 3]>,
    percent: f64,
    step_size: f64,
    equalize_passes: u32,
}

impl MorphPipeline {
    /// Validate both meshes, optionally equalize the sparser one, and match.
    ///
    /// The denser input (the first one on equal counts) always supplies the
    /// positions reached at 100% and the output triangles, even when
    /// equalization brings the sparser mesh up to the same vertex count.
    /// [`Correspondence::large_side`] refers to the arguments of this call.
    ///
    /// # Errors
    ///
    /// Returns an error if either mesh is invalid, equalization fails,
    /// matching fails, or `initial_percent` is not finite.
    pub fn new(first: &IndexedMesh, second: &IndexedMesh, params: &BlendParams) -> BlendResult<Self> {
        check_percent(params.initial_percent)?;
        first.validate()?;
        second.validate()?;

        // Ties go to the first argument, as in the matcher
        let (large, small, large_side) = if first.vertices.len() >= second.vertices.len() {
            (first, second, MeshSide::First)
        } else {
            (second, first, MeshSide::Second)
        };

        let mut equalize_passes = 0;
        let mut equalized = None;
        if params.equalize {
            let result = equalize_density(small, large.vertices.len(), &params.subdivide)?;
            equalize_passes = result.iterations;
            if result.was_subdivided() {
                equalized = Some(result.mesh);
            }
        }
        let small = equalized.as_ref().unwrap_or(small);

        // Equalization stops at or below the large count, so `large` stays
        // the large side of the match
        let mut correspondence = match_meshes(large, small, &params.matching)
            .map_err(|err| relative_to_inputs(err, large_side))?;
        correspondence.large_side = large_side;
        let large_triangles = large.faces.clone();

        info!(
            "Morph pipeline ready: {} groups, {} large vertices, {} faces, {} equalization passes",
            correspondence.group_count(),
            correspondence.large_vertex_count(),
            large_triangles.len(),
            equalize_passes
        );

        Ok(Self {
            correspondence,
            large_triangles,
            percent: params.initial_percent,
            step_size: params.step_size,
            equalize_passes,
        })
    }

    /// Blend at `percent` without changing the stored percent.
    ///
    /// # Errors
    ///
    /// Returns an error if `percent` is not finite.
    pub fn morph(&self, percent: f64) -> BlendResult<MorphOutput> {
        Ok(interpolate(&self.correspondence, &self.large_triangles, percent)?)
    }

    /// Blend at the stored percent.
    ///
    /// # Errors
    ///
    /// See [`morph`](Self::morph).
    pub fn current(&self) -> BlendResult<MorphOutput> {
        self.morph(self.percent)
    }

    /// Stored percent.
    #[must_use]
    pub const fn percent(&self) -> f64 {
        self.percent
    }

    /// Replace the stored percent. Values outside `[0, 100]` are kept as is.
    ///
    /// # Errors
    ///
    /// Returns an error if `percent` is not finite; the stored value is left
    /// unchanged.
    pub fn set_percent(&mut self, percent: f64) -> BlendResult<()> {
        check_percent(percent)?;
        self.percent = percent;
        Ok(())
    }

    /// Add `delta` to the stored percent and blend there.
    ///
    /// # Errors
    ///
    /// Returns an error if the new percent is not finite; the stored value
    /// is left unchanged.
    pub fn step(&mut self, delta: f64) -> BlendResult<MorphOutput> {
        self.set_percent(self.percent + delta)?;
        self.current()
    }

    /// Step up by the configured step size.
    ///
    /// # Errors
    ///
    /// See [`step`](Self::step).
    pub fn step_forward(&mut self) -> BlendResult<MorphOutput> {
        self.step(self.step_size)
    }

    /// Step down by the configured step size.
    ///
    /// # Errors
    ///
    /// See [`step`](Self::step).
    pub fn step_back(&mut self) -> BlendResult<MorphOutput> {
        self.step(-self.step_size)
    }

    /// The cached correspondence.
    #[must_use]
    pub const fn correspondence(&self) -> &Correspondence {
        &self.correspondence
    }

    /// Triangles of the denser mesh, shared by every output.
    #[must_use]
    pub fn large_triangles(&self) -> &[[u32; 3]] {
        &self.large_triangles
    }

    /// Subdivision passes applied to the sparser mesh.
    #[must_use]
    pub const fn equalize_passes(&self) -> u32 {
        self.equalize_passes
    }
}

/// Name the side in a matcher error after this pipeline's arguments, which
/// the matcher saw in (large, small) order.
fn relative_to_inputs(err: MatchError, large_side: MeshSide) -> MatchError {
    match err {
        MatchError::NonFinitePosition { side, index } if large_side == MeshSide::Second => {
            let side = match side {
                MeshSide::First => MeshSide::Second,
                MeshSide::Second => MeshSide::First,
            };
            MatchError::NonFinitePosition { side, index }
        }
        other => other,
    }
}

fn check_percent(percent: f64) -> BlendResult<()> {
    if percent.is_finite() {
        Ok(())
    } else {
        Err(MorphError::NonFiniteParameter(percent).into())
    }
}
