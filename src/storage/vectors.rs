use std::num::NonZeroUsize;

use crate::{
    error::{KernelErr, Result},
    initialization::ValueGen,
};

/// Owns the kernel's data: the vectors `X` and `Y`, the scalar `a` and the per
/// iteration averages `Y_avgs`.
///
/// `X` and `a` are read only once the store is built. `Y` is updated in place by
/// the workers, each over its own partition, and `Y_avgs` is handed over to an
/// accumulator for the duration of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorStore {
    x: Box<[f64]>,
    y: Box<[f64]>,
    a: f64,
    y_avgs: Box<[f64]>,
}

impl VectorStore {
    /// Creates a new `VectorStore` sampling every value from `value_gen`.
    ///
    /// Values are drawn as `X[0], Y[0], X[1], Y[1], ...` followed by `a`, so two
    /// generators yielding the same sequence produce the same store.
    ///
    /// # Arguments
    /// * `p` - The size of `X` and `Y`.
    /// * `max_iters` - The size of `Y_avgs`.
    /// * `value_gen` - The generator of initial values.
    ///
    /// # Returns
    /// A new `VectorStore` or a `KernelErr::Allocation` if any buffer can't be allocated.
    pub fn generate<G>(p: NonZeroUsize, max_iters: NonZeroUsize, value_gen: &mut G) -> Result<Self>
    where
        G: ValueGen + ?Sized,
    {
        let p = p.get();
        let mut x = try_alloc("X", p)?;
        let mut y = try_alloc("Y", p)?;

        for _ in 0..p {
            x.push(value_gen.sample());
            y.push(value_gen.sample());
        }

        let a = value_gen.sample();
        let y_avgs = zeroed("Y_avgs", max_iters.get())?;

        Ok(Self {
            x: x.into_boxed_slice(),
            y: y.into_boxed_slice(),
            a,
            y_avgs,
        })
    }

    /// Creates a new `VectorStore` from explicit initial values.
    ///
    /// # Arguments
    /// * `x` - The initial state of `X`.
    /// * `y` - The initial state of `Y`.
    /// * `a` - The scalar.
    /// * `max_iters` - The size of `Y_avgs`.
    ///
    /// # Returns
    /// A `KernelErr` if the vectors are empty or their lengths differ.
    pub fn from_parts(x: Vec<f64>, y: Vec<f64>, a: f64, max_iters: NonZeroUsize) -> Result<Self> {
        if x.is_empty() {
            return Err(KernelErr::EmptyVector);
        }

        if x.len() != y.len() {
            return Err(KernelErr::LengthMismatch {
                what: "Y",
                got: y.len(),
                expected: x.len(),
            });
        }

        Ok(Self {
            x: x.into_boxed_slice(),
            y: y.into_boxed_slice(),
            a,
            y_avgs: zeroed("Y_avgs", max_iters.get())?,
        })
    }

    /// Returns the size of `X` and `Y`.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Returns the amount of iterations `Y_avgs` has room for.
    pub fn max_iters(&self) -> usize {
        self.y_avgs.len()
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    pub fn a(&self) -> f64 {
        self.a
    }

    pub fn y_avgs(&self) -> &[f64] {
        &self.y_avgs
    }

    /// Splits the store into the views a run needs: shared `X`, `a`, exclusive `Y`
    /// and the `Y_avgs` buffer, which is taken out and replaced by an empty one.
    pub(crate) fn split_for_run(&mut self) -> (&[f64], f64, &mut [f64], Box<[f64]>) {
        let y_avgs = std::mem::take(&mut self.y_avgs);
        (&self.x[..], self.a, &mut self.y[..], y_avgs)
    }

    /// Gives back the `Y_avgs` buffer after a run.
    ///
    /// # Returns
    /// A `KernelErr::LengthMismatch` if the buffer isn't the one taken out by `split_for_run`.
    pub(crate) fn restore_averages(&mut self, y_avgs: Box<[f64]>, expected: usize) -> Result<()> {
        if y_avgs.len() != expected {
            return Err(KernelErr::LengthMismatch {
                what: "Y_avgs",
                got: y_avgs.len(),
                expected,
            });
        }

        self.y_avgs = y_avgs;
        Ok(())
    }
}

/// Reserves room for exactly `len` values, reporting allocation failures instead of aborting.
fn try_alloc(what: &'static str, len: usize) -> Result<Vec<f64>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| KernelErr::Allocation { what, len })?;
    Ok(buf)
}

fn zeroed(what: &'static str, len: usize) -> Result<Box<[f64]>> {
    let mut buf = try_alloc(what, len)?;
    buf.resize(len, 0.);
    Ok(buf.into_boxed_slice())
}
