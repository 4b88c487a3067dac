//! Render sink contract: where aggregation passes deliver their cells.

use std::sync::{Arc, Mutex};

use crate::aggregate::RenderableCell;

/// Drawing surface driven by the pipeline.
///
/// Every pass replaces the whole frame: `clear` first, then `draw` once per
/// cell in emission order. Sinks never receive diffs, and a failed pass
/// calls neither method.
pub trait RenderSink {
    /// Removes everything the previous pass drew.
    fn clear(&mut self);

    /// Draws one cell on top of what this pass has drawn so far.
    fn draw(&mut self, cell: &RenderableCell);
}

/// In-memory sink retaining the latest frame.
///
/// `clear_count` tells how many passes have run, which is how tests pin
/// down debounce behavior.
#[derive(Debug, Default)]
pub struct BufferSink {
    cells: Vec<RenderableCell>,
    clears: usize,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cells drawn by the most recent pass.
    pub fn cells(&self) -> &[RenderableCell] {
        &self.cells
    }

    /// Number of passes that have reached this sink.
    pub fn clear_count(&self) -> usize {
        self.clears
    }
}

impl RenderSink for BufferSink {
    fn clear(&mut self) {
        self.cells.clear();
        self.clears += 1;
    }

    fn draw(&mut self, cell: &RenderableCell) {
        self.cells.push(cell.clone());
    }
}

/// Lets a sink be observed from outside the pipeline task that owns it.
impl<S: RenderSink> RenderSink for Arc<Mutex<S>> {
    fn clear(&mut self) {
        self.lock().unwrap().clear();
    }

    fn draw(&mut self, cell: &RenderableCell) {
        self.lock().unwrap().draw(cell);
    }
}
