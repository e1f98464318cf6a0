use tracing::debug;

use crate::host::{DisplayHost, RasterTarget};

/// The chart's persistent pixel store: a BGRA byte buffer plus the host-side
/// raster target it is committed to. Recreated whenever the plotted area's
/// pixel size changes.
///
/// Storage is one `u32` per pixel so the whole-buffer operations go through
/// an aligned view; byte-level access casts down, which is always valid.
pub struct PlotSurface {
    width: u32,
    height: u32,
    buffer: Vec<u32>,
    target: Box<dyn RasterTarget>,
    /// One-shot latch set by resize and structural changes, consumed by the
    /// next paint pass so untouched frames skip the clear.
    needs_clear: bool,
}

impl PlotSurface {
    /// Allocates the buffer and creates a matching raster target. Callers
    /// guarantee `width > 0 && height > 0`.
    pub fn new(host: &mut dyn DisplayHost, width: u32, height: u32) -> Self {
        debug!(width, height, "creating plot surface");
        Self {
            width,
            height,
            buffer: vec![0; (width * height) as usize],
            target: host.create_target(width, height),
            needs_clear: true,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per row.
    pub fn stride(&self) -> u32 {
        self.width * 4
    }

    /// Total length in bytes; always `width * height * 4`.
    pub fn len(&self) -> usize {
        self.buffer.len() * 4
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// B,G,R,A byte view of the buffer.
    pub fn bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.buffer)
    }

    fn bytes_mut(&mut self) -> &mut [u8] {
        bytemuck::cast_slice_mut(&mut self.buffer)
    }

    /// Replace buffer and raster target with freshly sized ones. Zero or
    /// unchanged dimensions are a no-op.
    pub fn resize(&mut self, host: &mut dyn DisplayHost, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width == self.width && height == self.height {
            return;
        }
        debug!(width, height, "resizing plot surface");
        self.width = width;
        self.height = height;
        self.buffer = vec![0; (width * height) as usize];
        self.target = host.create_target(width, height);
        self.needs_clear = true;
    }

    pub fn mark_needs_clear(&mut self) {
        self.needs_clear = true;
    }

    /// Consume the one-shot clear latch.
    pub fn take_needs_clear(&mut self) -> bool {
        std::mem::replace(&mut self.needs_clear, false)
    }

    /// Zero-fill the buffer.
    pub fn clear(&mut self) {
        self.buffer.fill(0);
    }

    /// Write one BGRA pixel at a byte offset. Offsets must satisfy
    /// `offset <= len - 4`; rasterization clips before producing them.
    #[inline]
    pub fn write(&mut self, offset: u32, b: u8, g: u8, r: u8, a: u8) {
        let i = offset as usize;
        let bytes = self.bytes_mut();
        bytes[i] = b;
        bytes[i + 1] = g;
        bytes[i + 2] = r;
        bytes[i + 3] = a;
    }

    /// Write a single channel byte, used by the selection channel cursor.
    #[inline]
    pub fn write_byte(&mut self, offset: u32, value: u8) {
        self.bytes_mut()[offset as usize] = value;
    }

    /// Read back one pixel's B,G,R,A bytes.
    #[inline]
    pub fn read(&self, offset: u32) -> [u8; 4] {
        let i = offset as usize;
        let bytes = self.bytes();
        [bytes[i], bytes[i + 1], bytes[i + 2], bytes[i + 3]]
    }

    /// Packed view of a pixel, for snapshot comparisons. Matches
    /// [`crate::data_types::Rgba::packed`].
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> u32 {
        self.buffer[(y * self.width + x) as usize]
    }

    /// Copy the buffer into the raster target and flag it for display.
    pub fn commit(&mut self) {
        self.target.present(bytemuck::cast_slice(&self.buffer));
    }
}
