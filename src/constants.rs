// Browser-side tuning constants.
//
// Scene and material defaults live in `scene_core::constants`; these cover
// the DOM, the drawing buffer and input mapping only.
// Drawing buffer
pub const PIXEL_RATIO_CAP: f64 = 2.0;
pub const CLEAR_COLOR: [f64; 4] = [0.0, 0.0, 0.0, 1.0];

// Debug panel
pub const GUI_WIDTH_PX: u32 = 320;
pub const GUI_TITLE: &str = "Controls";

// Element classes, used for styling hooks and for cleanup on dispose
pub const CANVAS_CLASS: &str = "wave-scene-canvas";
pub const GUI_CLASS: &str = "wave-scene-gui";
pub const STATS_CLASS: &str = "wave-scene-stats";

// Pointer mapping
pub const MOUSE_BUTTON_PRIMARY: i16 = 0;
pub const MOUSE_BUTTON_SECONDARY: i16 = 2;
// WheelEvent.deltaMode line/page units converted to pixels
pub const WHEEL_LINE_PX: f64 = 16.0;
pub const WHEEL_PAGE_PX: f64 = 800.0;
