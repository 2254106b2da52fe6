use sticky_virtualizer::{LayoutHost, Viewport, VirtualScrollOptions};
use sticky_virtualizer_adapter::Controller;

/// Pretend layout: every tenth row is a 56px section header, the rest are 32px. Rows below the
/// fold report "not laid out yet" once before they measure.
struct Layout {
    pending: Vec<bool>,
}

impl LayoutHost for Layout {
    fn measure_height(&mut self, index: usize) -> Option<f64> {
        if std::mem::take(&mut self.pending[index]) {
            return None;
        }
        Some(if index % 10 == 0 { 56.0 } else { 32.0 })
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let rows: Vec<String> = (0..500).map(|i| format!("row {i}")).collect();
    let options = VirtualScrollOptions::new(rows)
        .with_min_row_height_attr("32px")
        .with_is_sticky(|i| i % 10 == 0);
    let mut c = Controller::new(options).expect("valid options");
    let mut layout = Layout {
        pending: (0..500).map(|i| i > 12).collect(),
    };

    for offset in [0.0, 120.0, 380.0, 400.0, 420.0, 900.0, 860.0] {
        let poll = c
            .scroll(&mut layout, Viewport::new(offset, 300.0, 480.0))
            .await;
        let w = c.engine().window();
        println!(
            "t={}ms offset={offset} window={}..={} pad={} poll={poll:?}",
            c.now_ms(),
            w.start_index,
            w.end_index,
            w.padding_top
        );
        if let Some(o) = c.overlay() {
            println!(
                "  pinned row {} in slot {} at top={} ({}px visible)",
                o.index, o.render_slot, o.top, o.clip
            );
        }
    }
}
