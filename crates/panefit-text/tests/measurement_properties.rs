//! Property tests for textarea measurement on the virtual surface.

use panefit_text::{
    AutosizeConfig, MeasureSurface, ResponsiveAutosizer, VirtualTextarea, line_count, measure,
};
use proptest::prelude::*;

fn textarea(text: &str, line_height: u32, padding: u32) -> VirtualTextarea {
    VirtualTextarea::new(8.0, 1200.0)
        .with_line_height(format!("{line_height}px"))
        .with_padding(format!("{padding}px"), format!("{padding}px"))
        .with_text(text)
}

fn text_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z]{0,12}( [a-z]{1,12}){0,20}",
        "[a-zA-Z0-9 \\n]{0,200}",
        "[\u{4e00}-\u{4e20} ]{0,40}",
    ]
}

proptest! {
    #[test]
    fn measurement_is_idempotent(
        text in text_strategy(),
        width in 1.0f64..1200.0,
        line_height in 10u32..40,
        padding in 0u32..12,
    ) {
        let config = AutosizeConfig::default();
        let mut ta = textarea(&text, line_height, padding);
        let before = ta.inline_size();
        let a = measure(&mut ta, width, &config).unwrap();
        let b = measure(&mut ta, width, &config).unwrap();
        prop_assert_eq!(a, b);
        prop_assert_eq!(ta.inline_size(), before);
    }

    #[test]
    fn wider_never_needs_more_lines(
        text in text_strategy(),
        narrow in 1.0f64..600.0,
        extra in 0.0f64..600.0,
        line_height in 10u32..40,
        padding in 0u32..12,
    ) {
        let config = AutosizeConfig::default();
        let mut ta = textarea(&text, line_height, padding);
        let at_narrow = measure(&mut ta, narrow, &config).unwrap();
        let at_wide = measure(&mut ta, narrow + extra, &config).unwrap();
        prop_assert!(at_wide.line_count <= at_narrow.line_count);
    }

    #[test]
    fn single_line_height_has_floor(
        text in text_strategy(),
        width in 1.0f64..1200.0,
        line_height in 1u32..60,
        padding in 0u32..20,
    ) {
        let config = AutosizeConfig::default();
        let mut ta = textarea(&text, line_height, padding);
        let result = measure(&mut ta, width, &config).unwrap();
        prop_assert!(result.single_line_height_px >= 30.0);
        prop_assert!(result.line_count >= 1);
        prop_assert_eq!(result.is_overflowing, result.line_count > 1);
    }

    #[test]
    fn line_count_matches_wrapping(
        text in text_strategy(),
        columns in 1usize..120,
    ) {
        // 8px cells: a width of columns * 8 gives exactly `columns` cells.
        let config = AutosizeConfig::default();
        let mut ta = textarea(&text, 20, 4);
        let result = measure(&mut ta, columns as f64 * 8.0, &config).unwrap();
        prop_assert_eq!(result.line_count as usize, line_count(&text, columns));
    }

    #[test]
    fn coalesced_input_measures_once(
        keystrokes in 1usize..20,
    ) {
        let ta = textarea("", 20, 5);
        let mut sizer = ResponsiveAutosizer::new(ta, AutosizeConfig::default());
        sizer.mount();
        for _ in 0..keystrokes {
            sizer.surface_mut().set_text("x".repeat(keystrokes));
            sizer.on_input();
        }
        prop_assert!(sizer.on_frame().is_some());
        prop_assert!(sizer.on_frame().is_none());
        prop_assert_eq!(sizer.measurements(), 2);
    }
}

#[test]
fn reference_single_and_multi_line() {
    let config = AutosizeConfig::default();

    let mut ta = VirtualTextarea::new(10.0, 300.0)
        .with_line_height("20px")
        .with_padding("5px", "5px")
        .with_text("hello");
    let single = measure(&mut ta, 300.0, &config).unwrap();
    assert_eq!(single.natural_height_px, 30.0);
    assert_eq!(single.line_count, 1);
    assert!(!single.is_overflowing);
    assert_eq!(single.single_line_height_px, 30.0);

    ta.set_text("lorem ipsum dolor sit amet consectetur adipiscing elit sed do eiusmod tempor");
    let multi = measure(&mut ta, 300.0, &config).unwrap();
    assert_eq!(multi.natural_height_px, 70.0);
    assert_eq!(multi.line_count, 3);
    assert!(multi.is_overflowing);
    assert_eq!(multi.single_line_height_px, 30.0);
}
