// Example: window computation over a large list with lazily measured rows.
use sticky_virtualizer::{LayoutHost, Viewport, VirtualScroll, VirtualScrollOptions};

struct Rows;

impl LayoutHost for Rows {
    fn measure_height(&mut self, index: usize) -> Option<f64> {
        Some(24.0 + (index % 3) as f64 * 8.0)
    }
}

fn main() {
    let items: Vec<u32> = (0..100_000).collect();
    let opts = VirtualScrollOptions::new(items)
        .with_min_row_height(24.0)
        .with_on_render(Some(|w: &sticky_virtualizer::RenderWindow<'_, u32>| {
            println!("render {}..={} ({} items)", w.start_index, w.end_index, w.length);
        }));
    let mut v = VirtualScroll::new(opts).expect("valid options");

    let mut now_ms = 0;
    for offset in [0.0, 240.0, 4_800.0, 4_700.0] {
        v.on_scroll(&mut Rows, Viewport::new(offset, 480.0, 640.0), now_ms);
        v.tick(&mut Rows, now_ms);
        now_ms += 16;

        let w = v.window();
        println!(
            "offset={offset} pad_top={} remaining={} content={} direction={:?}",
            w.padding_top,
            w.remaining_height(),
            w.content_height,
            v.direction()
        );
    }
    println!("measured={}", v.heights().measured_len());
}
