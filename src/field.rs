use crate::{Error, Result};

/// Double-buffered Game of Life field on a torus.
///
/// `cells_curr` holds a fully-resolved generation between steps; `cells_next`
/// is scratch space that only has meaning inside a single [`Field::update`]
/// call. Direct edits ([`Field::set`]) always go into `cells_curr`, so they
/// cannot be clobbered by a later buffer swap.
pub struct Field {
    cells_curr: Vec<bool>,
    cells_next: Vec<bool>,
    width: usize,
    height: usize,
}

/// Computes one row of the next generation from the whole current one.
///
/// Shared by the sequential and the parallel kernel so both produce
/// bit-identical output. Edge rows/columns wrap to the opposite side.
fn step_row(curr: &[bool], dst_row: &mut [bool], y: usize, width: usize, height: usize) {
    let y1 = if y == 0 { height - 1 } else { y - 1 };
    let y2 = if y == height - 1 { 0 } else { y + 1 };
    let (above, here, below) = (y1 * width, y * width, y2 * width);
    for x in 0..width {
        let x1 = if x == 0 { width - 1 } else { x - 1 };
        let x2 = if x == width - 1 { 0 } else { x + 1 };
        let neibs = curr[x1 + above] as usize
            + curr[x + above] as usize
            + curr[x2 + above] as usize
            + curr[x1 + here] as usize
            + curr[x2 + here] as usize
            + curr[x1 + below] as usize
            + curr[x + below] as usize
            + curr[x2 + below] as usize;
        dst_row[x] = if curr[x + here] {
            neibs == 2 || neibs == 3
        } else {
            neibs == 3
        };
    }
}

impl Field {
    /// Creates a field of dead cells.
    pub fn blank(width: usize, height: usize) -> Self {
        assert!(width >= 1 && height >= 1);
        let size = width * height;
        Self {
            cells_curr: vec![false; size],
            cells_next: vec![false; size],
            width,
            height,
        }
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn check_bounds(&self, x: usize, y: usize) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::OutOfRange {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    pub fn get(&self, x: usize, y: usize) -> Result<bool> {
        self.check_bounds(x, y)?;
        Ok(self.cells_curr[x + y * self.width])
    }

    /// Writes a single cell of the current generation.
    ///
    /// Fails with [`Error::OutOfRange`] outside `[0, width) x [0, height)`
    /// instead of wrapping or clamping; callers that want toroidal
    /// addressing must pre-wrap their indices.
    pub fn set(&mut self, x: usize, y: usize, state: bool) -> Result<()> {
        self.check_bounds(x, y)?;
        self.cells_curr[x + y * self.width] = state;
        Ok(())
    }

    /// Row-major snapshot of the current generation.
    pub fn cells(&self) -> &[bool] {
        &self.cells_curr
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [bool] {
        &mut self.cells_curr
    }

    pub fn population(&self) -> usize {
        self.cells_curr.iter().map(|&c| c as usize).sum()
    }

    /// Advances the field by `n` generations, single-threaded.
    ///
    /// Every transition for a generation is computed into `cells_next` from
    /// the untouched `cells_curr`, then the buffers are swapped. The two
    /// phases never interleave per cell.
    pub fn update(&mut self, n: usize) {
        for _ in 0..n {
            let (w, h) = (self.width, self.height);
            let curr = &self.cells_curr;
            for (y, row) in self.cells_next.chunks_mut(w).enumerate() {
                step_row(curr, row, y, w, h);
            }
            std::mem::swap(&mut self.cells_next, &mut self.cells_curr);
        }
    }

    /// Advances the field by `n` generations with one rayon task per row.
    ///
    /// Workers own disjoint row bands of `cells_next` and only read
    /// `cells_curr`, so there are no write-write races; the parallel loop
    /// joins before the buffer swap. Output is bit-identical to
    /// [`Field::update`].
    pub fn update_par(&mut self, n: usize) {
        use rayon::prelude::*;

        for _ in 0..n {
            let (w, h) = (self.width, self.height);
            let curr = &self.cells_curr;
            self.cells_next
                .par_chunks_mut(w)
                .enumerate()
                .for_each(|(y, row)| step_row(curr, row, y, w, h));
            std::mem::swap(&mut self.cells_next, &mut self.cells_curr);
        }
    }
}
