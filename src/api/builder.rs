//! High-level pipeline builder.

use crate::api::RecolorError;
use crate::exec::Executor;
use crate::output::RecoloredImage;
use crate::palette::PalettePair;
use crate::reconstruct::{reconstruct, BlendSettings};
use crate::solve::{solve_labels, SolveSettings};

/// Configured recoloring pipeline.
///
/// Runs the label solver on the native-resolution buffer, then the
/// reconstructor against the resampled output buffer, with one set of
/// tuning knobs. Build it once per palette; `recolor` can be called
/// repeatedly (the palette tables are rebuilt per call, which is cheap
/// next to the per-pixel work).
///
/// ```
/// use recolor::{build_palette, PaletteSelection, Recolorer, Rgb};
///
/// let palette = build_palette(&[
///     PaletteSelection::manual(0, Rgb { r: 200, g: 40, b: 40 })
///         .with_target(Rgb { r: 40, g: 40, b: 200 }),
/// ]);
/// let native = vec![200, 40, 40, 255];
/// let resampled = native.clone();
/// let image = Recolorer::new(palette)
///     .recolor(&native, 1, 1, &resampled, 1, 1)
///     .unwrap()
///     .expect("non-empty palette recolors");
/// assert_eq!(image.pixel(0, 0), [40, 40, 200, 255]);
/// ```
#[derive(Debug, Clone)]
pub struct Recolorer {
    palette: PalettePair,
    solve: SolveSettings,
    blend: BlendSettings,
    executor: Executor,
}

impl Recolorer {
    /// A pipeline over `palette` with default tuning (all knobs at 50)
    /// and the preferred execution backend.
    pub fn new(palette: PalettePair) -> Self {
        Self {
            palette,
            solve: SolveSettings::default(),
            blend: BlendSettings::default(),
            executor: Executor::preferred(),
        }
    }

    /// Label-field cleanup aggressiveness, `0..=100`.
    pub fn edge_protection(mut self, value: f32) -> Self {
        self.solve.edge_protection = value;
        self
    }

    /// Resistance to relabeling during refinement, `0..=100`.
    pub fn vertex_inertia(mut self, value: f32) -> Self {
        self.solve.vertex_inertia = value;
        self
    }

    /// Boundary smoothing during reconstruction, `0..=100`.
    pub fn smoothing_levels(mut self, value: f32) -> Self {
        self.blend.smoothing_levels = value;
        self
    }

    /// Pin the execution backend (the default is
    /// [`Executor::preferred`]).
    pub fn executor(mut self, executor: Executor) -> Self {
        self.executor = executor;
        self
    }

    /// Run the full pipeline.
    ///
    /// `native` is the original image at native resolution (drives the
    /// label solve); `resampled` is the same image resampled to the
    /// output dimensions (drives blend ratios). Returns `Ok(None)` when
    /// the palette is empty: nothing to recolor is not an error.
    ///
    /// # Errors
    ///
    /// See [`solve_labels`](crate::solve_labels) and
    /// [`reconstruct`](crate::reconstruct).
    pub fn recolor(
        &self,
        native: &[u8],
        native_width: usize,
        native_height: usize,
        resampled: &[u8],
        out_width: usize,
        out_height: usize,
    ) -> Result<Option<RecoloredImage>, RecolorError> {
        if self.palette.is_empty() {
            tracing::debug!("empty palette, skipping recolor");
            return Ok(None);
        }

        let labels = solve_labels(
            native,
            native_width,
            native_height,
            &self.palette,
            &self.solve,
            self.executor,
        )?;
        let image = reconstruct(
            &labels,
            resampled,
            out_width,
            out_height,
            &self.palette,
            &self.blend,
            self.executor,
        )?;
        Ok(Some(image))
    }
}
