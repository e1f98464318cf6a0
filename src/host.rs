//! In-process contracts with the hosting toolkit: presentation of the pixel
//! buffer and deferred single-threaded dispatch. The engine never talks to a
//! real windowing system; embedders implement these traits, and the provided
//! in-memory versions back headless use and the test suite.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// A displayable raster the host can blit to the screen. Created and sized by
/// the host, fed by [`crate::raster::PlotSurface::commit`].
pub trait RasterTarget {
    fn resize(&mut self, width: u32, height: u32);

    /// Copy the buffer into the backing store and mark it for redraw.
    fn present(&mut self, buffer: &[u8]);
}

/// Presentation side of the hosting toolkit.
pub trait DisplayHost {
    /// Create (and attach) a raster target of the given pixel size.
    fn create_target(&mut self, width: u32, height: u32) -> Box<dyn RasterTarget>;

    /// Ask the host to schedule a visual redraw.
    fn request_redraw(&mut self);
}

/// Deferred dispatch on the logical UI thread. The engine calls
/// [`UpdateDispatcher::schedule_pass`] at most once per pending cycle; the
/// host must later call [`crate::ChartEngine::run_scheduled_pass`] once per
/// scheduled token.
pub trait UpdateDispatcher {
    fn schedule_pass(&self);
}

/// Last frame presented to a [`MemoryTarget`].
#[derive(Clone, Debug, Default)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
    pub presents: u32,
}

/// In-memory display host. Keeps a shared handle to the presented frame so
/// embedders and tests can inspect what the engine committed.
#[derive(Default)]
pub struct MemoryHost {
    frame: Rc<RefCell<Frame>>,
    redraws: Rc<Cell<u32>>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frame(&self) -> Rc<RefCell<Frame>> {
        self.frame.clone()
    }

    pub fn redraw_count(&self) -> Rc<Cell<u32>> {
        self.redraws.clone()
    }
}

impl DisplayHost for MemoryHost {
    fn create_target(&mut self, width: u32, height: u32) -> Box<dyn RasterTarget> {
        {
            let mut frame = self.frame.borrow_mut();
            frame.width = width;
            frame.height = height;
            frame.pixels.clear();
            frame.presents = 0;
        }
        Box::new(MemoryTarget {
            frame: self.frame.clone(),
        })
    }

    fn request_redraw(&mut self) {
        self.redraws.set(self.redraws.get() + 1);
    }
}

pub struct MemoryTarget {
    frame: Rc<RefCell<Frame>>,
}

impl RasterTarget for MemoryTarget {
    fn resize(&mut self, width: u32, height: u32) {
        let mut frame = self.frame.borrow_mut();
        frame.width = width;
        frame.height = height;
        frame.pixels.clear();
    }

    fn present(&mut self, buffer: &[u8]) {
        let mut frame = self.frame.borrow_mut();
        frame.pixels.clear();
        frame.pixels.extend_from_slice(buffer);
        frame.presents += 1;
    }
}

/// Cooperative task queue: a counter of scheduled wake-ups instead of a real
/// event loop. [`crate::engine::drain`] runs one engine pass per token.
#[derive(Default)]
pub struct LocalQueue {
    pending: Cell<u32>,
}

impl LocalQueue {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn pending(&self) -> u32 {
        self.pending.get()
    }

    /// Take one scheduled token, if any.
    pub fn take(&self) -> bool {
        let n = self.pending.get();
        if n == 0 {
            return false;
        }
        self.pending.set(n - 1);
        true
    }
}

impl UpdateDispatcher for LocalQueue {
    fn schedule_pass(&self) {
        self.pending.set(self.pending.get() + 1);
    }
}
