use crate::{Error, Field, Result};

/// Single-channel raster the field is magnified into, row-major, one `f32`
/// per pixel mirroring the source cell (0.0 dead, 1.0 alive).
pub struct PixelBuffer {
    data: Vec<f32>,
    width: usize,
    height: usize,
}

impl PixelBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            data: vec![0.0; width * height],
            width,
            height,
        }
    }

    /// Buffer sized for `field` magnified `zoom` times.
    pub fn for_field(field: &Field, zoom: usize) -> Self {
        let (w, h) = field.size();
        Self::new(w * zoom, h * zoom)
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn pixel(&self, x: usize, y: usize) -> Result<f32> {
        if x >= self.width || y >= self.height {
            return Err(Error::OutOfRange {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(self.data[x + y * self.width])
    }
}

fn check_expand(field: &Field, zoom: usize, dest: &PixelBuffer) -> Result<()> {
    if zoom == 0 {
        return Err(Error::InvalidConfig {
            reason: "zoom must be positive".to_string(),
        });
    }
    let (w, h) = field.size();
    if dest.width != w * zoom || dest.height != h * zoom {
        return Err(Error::DimensionMismatch {
            got_width: dest.width,
            got_height: dest.height,
            want_width: w * zoom,
            want_height: h * zoom,
        });
    }
    Ok(())
}

/// Rebuilds `dest` from `field`, replicating every cell over a `zoom x zoom`
/// pixel block.
///
/// Pull-style traversal: each destination pixel reads its one source cell at
/// `(x / zoom, y / zoom)`. Validation happens before any pixel is written;
/// on error `dest` is left exactly as it was.
pub fn expand(field: &Field, zoom: usize, dest: &mut PixelBuffer) -> Result<()> {
    check_expand(field, zoom, dest)?;
    let (src_w, dst_w) = (field.width(), dest.width);
    let cells = field.cells();
    for (y, row) in dest.data.chunks_mut(dst_w).enumerate() {
        let src_row = (y / zoom) * src_w;
        for (x, px) in row.iter_mut().enumerate() {
            *px = cells[x / zoom + src_row] as u8 as f32;
        }
    }
    Ok(())
}

/// Same output as [`expand`], push-style: iterates source cells and writes
/// each one's whole `zoom x zoom` block. Cheaper when the source side
/// dominates iteration cost (large zoom factors).
pub fn expand_blocks(field: &Field, zoom: usize, dest: &mut PixelBuffer) -> Result<()> {
    check_expand(field, zoom, dest)?;
    let (src_w, dst_w) = (field.width(), dest.width);
    let cells = field.cells();
    for (i, &cell) in cells.iter().enumerate() {
        let value = cell as u8 as f32;
        let (x0, y0) = ((i % src_w) * zoom, (i / src_w) * zoom);
        for dy in 0..zoom {
            let row = (y0 + dy) * dst_w + x0;
            dest.data[row..row + zoom].fill(value);
        }
    }
    Ok(())
}
