// src/constants.rs

// Figure geometry (inches, figure fractions).
pub const DEFAULT_FIGURE_SIZE_IN: (f64, f64) = (8.0, 8.0);
pub const DEFAULT_DPI: u32 = 100;
pub const SUBPLOT_LEFT: f64 = 0.177;
pub const SUBPLOT_RIGHT: f64 = 0.946;
pub const SUBPLOT_BOTTOM: f64 = 0.156;
pub const SUBPLOT_TOP: f64 = 0.965;

// Points per inch, used to turn point sizes into pixels for a given dpi.
pub const POINTS_PER_INCH: f64 = 72.0;

// Font sizes in points.
pub const FONT_SIZE_BASE: f64 = 40.0;
pub const FONT_SIZE_LEGEND: f64 = 28.0;
pub const FONT_SIZE_TICK_LABEL: f64 = 22.0;

// Axes frame.
pub const AXES_LINE_WIDTH: f64 = 1.1;
pub const AXES_LABEL_PAD: f64 = 10.0;
pub const AXES_MARGIN: f64 = 0.0;

// Ticks (points).
pub const TICK_MAJOR_SIZE: f64 = 7.0;
pub const TICK_MINOR_SIZE: f64 = 3.5;
pub const TICK_MAJOR_WIDTH: f64 = 1.1;
pub const TICK_MINOR_WIDTH: f64 = 1.1;
pub const TICK_MAJOR_PAD: f64 = 5.0;

// Lines and markers.
pub const LINE_WIDTH_PLOT: f64 = 2.5;
pub const MARKER_SIZE: f64 = 10.0;
pub const MARKER_EDGE_WIDTH: f64 = 0.8;
pub const SCATTER_SIZE: f64 = 20.0;

// Discontinuity thresholds for segmented line plots.
pub const CONTINUITY_THRESHOLD: f64 = 0.5;
pub const INSET_CONTINUITY_THRESHOLD: f64 = 10.0;

// Fit overlay.
pub const FIT_MAX_FEV: usize = 1600;
pub const FIT_SAMPLES: usize = 1000;

// Inset axes shrink their tick labels and tick lengths by this factor.
pub const INSET_TICK_SCALE: f64 = 1.8;
pub const INSET_MINOR_DIVISIONS: usize = 5;
pub const INSET_MAJOR_STEP: f64 = 0.5;

// Default colour cycle, hex without the leading '#'.
pub const COLOR_CYCLE: [&str; 10] = [
    "000000", "FE0000", "0000FE", "008001", "FD8000", "8c564b", "e377c2", "7f7f7f", "bcbd22",
    "17becf",
];

// Dash patterns in units of the line width, alternating on/off lengths.
pub const DASH_PATTERN: [f64; 2] = [3.7, 1.6];
pub const DOT_PATTERN: [f64; 2] = [1.0, 1.65];
pub const DASH_DOT_PATTERN: [f64; 4] = [6.4, 1.6, 1.0, 1.6];

// Legend sample line length and inner padding, in units of the legend font size.
pub const LEGEND_HANDLE_LENGTH: f64 = 2.0;
pub const LEGEND_BORDER_PAD: f64 = 0.4;
