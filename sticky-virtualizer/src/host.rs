use crate::SlotStyle;

/// Capabilities the binding layer provides to the engine.
///
/// The engine never touches visual elements; it asks the host for measurements and tells it how
/// to style the slots it renders.
pub trait LayoutHost {
    /// Current rendered height of the item at `index`, or `None` if its element is not laid out
    /// (detached, not yet rendered, ...).
    fn measure_height(&mut self, index: usize) -> Option<f64>;

    /// Applies per-slot styling after a window pass. The default does nothing.
    fn apply_slot_style(&mut self, index: usize, style: SlotStyle) {
        let _ = (index, style);
    }
}

impl<H: LayoutHost + ?Sized> LayoutHost for &mut H {
    fn measure_height(&mut self, index: usize) -> Option<f64> {
        (**self).measure_height(index)
    }

    fn apply_slot_style(&mut self, index: usize, style: SlotStyle) {
        (**self).apply_slot_style(index, style);
    }
}
