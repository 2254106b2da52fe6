// Example: section headers that pin to the top and push each other off.
use sticky_virtualizer::{LayoutHost, Viewport, VirtualScroll, VirtualScrollOptions};

struct Sections;

impl LayoutHost for Sections {
    fn measure_height(&mut self, index: usize) -> Option<f64> {
        Some(if index % 20 == 0 { 48.0 } else { 36.0 })
    }
}

fn main() {
    let items: Vec<String> = (0..400)
        .map(|i| {
            if i % 20 == 0 {
                format!("Section {}", i / 20)
            } else {
                format!("Item {i}")
            }
        })
        .collect();
    let opts = VirtualScrollOptions::new(items)
        .with_min_row_height_attr("36")
        .with_is_sticky(|i| i % 20 == 0);
    let mut v = VirtualScroll::new(opts).expect("valid options");

    let mut slots = Vec::new();
    let mut now_ms = 0;
    // Scroll down across a section boundary, then back up.
    let offsets = (0..=48).map(|step| step as f64 * 16.0).chain([700.0, 690.0, 640.0]);
    for offset in offsets {
        v.on_scroll(&mut Sections, Viewport::new(offset, 360.0, 320.0), now_ms);
        v.tick(&mut Sections, now_ms);
        now_ms += 16;

        let Some(current) = v.sticky().current() else {
            continue;
        };
        v.collect_rendered_slots(&mut slots);
        println!(
            "offset={offset:>5} pinned={:?} diff_top={:>4} transitioning={} slots={}",
            v.items()[current.source_index],
            current.diff_top,
            v.sticky().is_transitioning(),
            slots.len()
        );
    }
}
