//! End-to-end use of the facade.

use panefit::prelude::*;
use panefit::{DegradationAction, InputRowLayout, PaneLayout};

fn load(toml: &str) -> panefit::Result<TripleSplitPaneConfig> {
    Ok(TripleSplitPaneConfig::from_toml_str(toml)?)
}

#[test]
fn configured_pane_shrinks_on_resize() {
    let config = load(
        r#"
        [left]
        width = "300px"
        collapsed_width = "48px"

        [center]
        min_width = "400px"
        "#,
    )
    .unwrap();
    let mut pane = TripleSplitPane::new(config);

    let layout = *pane.on_resize(900.0);
    let PaneLayout::Measured(result) = layout else {
        panic!("expected a measured layout, got {layout:?}");
    };
    assert_eq!(result.left_width_px, 250.0);
    assert_eq!(result.right_width_px, 250.0);

    pane.toggle_left();
    assert!(pane.is_compact(PanelSide::Left));
    assert_eq!(pane.left_css(), "48px");
}

#[test]
fn bad_config_degrades_to_defaults() {
    let err = load("[left]\nwidth = \"wide\"\n").unwrap_err();
    assert_eq!(err.error_type(), "config");
    assert_eq!(err.degradation(), DegradationAction::UseDefaults);
    assert!(err.is_recoverable());
}

#[test]
fn sender_switches_to_block_layout() {
    let textarea = VirtualTextarea::new(10.0, 300.0);
    let mut sender: ResponsiveSender<VirtualTextarea, ()> =
        ResponsiveSender::new(textarea, AutosizeConfig::default());
    sender.mount();
    assert_eq!(sender.layout().row, InputRowLayout::Row);

    sender.input("a sentence that is clearly longer than thirty cells");
    sender.on_frame();
    assert_eq!(sender.layout().row, InputRowLayout::Column);
    assert!(sender.can_send());
}

#[test]
fn infeasible_pane_degrades_to_floor_widths() {
    let mut pane = TripleSplitPane::new(TripleSplitPaneConfig::default());
    pane.on_resize(600.0);
    let err = panefit::Error::from(pane.diagnostic().cloned().unwrap());
    assert_eq!(err.degradation(), DegradationAction::UseFloorWidths);
    assert_eq!(pane.left_css(), "200px");

    pane.on_resize(1600.0);
    assert!(pane.diagnostic().is_none());
}
