//! Repaint controller
//!
//! The calculator only changes when the user does something, so there is
//! no reason to redraw on a timer. egui already repaints on input;
//! `RepaintController` asks for one more frame only when something outside
//! the input stream changed state (for example, the about window was
//! closed from its own viewport and the main window must drop its
//! "open" styling).

/// Controls when the egui context should request repaints.
///
/// Call [`RepaintController::begin_frame`] at the top of `update()` and
/// [`RepaintController::end_frame`] at the bottom.
#[derive(Debug, Default)]
pub struct RepaintController {
    needs_repaint: bool,
}

impl RepaintController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a single repaint on the next opportunity.
    pub fn mark_needs_repaint(&mut self) {
        self.needs_repaint = true;
    }

    pub fn needs_repaint(&self) -> bool {
        self.needs_repaint
    }

    /// Call at the **start** of `update()`. The frame now running serves
    /// any earlier request.
    pub fn begin_frame(&mut self) {
        self.needs_repaint = false;
    }

    /// Call at the **end** of `update()`.
    ///
    /// Issues an immediate repaint if anything was marked dirty while the
    /// frame's UI code ran; otherwise egui sleeps until the next input.
    pub fn end_frame(&mut self, ctx: &egui::Context) {
        if self.needs_repaint {
            ctx.request_repaint();
        }
    }
}
