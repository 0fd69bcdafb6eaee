// Page elements the front-end looks up by id.
pub const CANVAS_ID: &str = "app-canvas";
pub const ERROR_ID: &str = "error";
pub const CONTAINER_ID: &str = "container";

pub const NO_WEBGPU_MESSAGE: &str =
    "Your browser does not support WebGPU. Try a recent Chrome, Edge or Firefox Nightly.";

// Label canvas, in units of a 512px texture
pub const LABEL_FONT_PX: f64 = 35.0;
pub const LABEL_FONT_FAMILY: &str = "verdana";
pub const LABEL_PLATE_BORDER_PX: f64 = 2.0;
pub const LABEL_PLATE_FILL: &str = "#FFFFFF";
pub const LABEL_PLATE_STROKE: &str = "#AAAAAA";
pub const LABEL_TEXT_COLOR: &str = "#FF0000";
