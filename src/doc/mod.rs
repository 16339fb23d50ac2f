mod convert;
mod detect;
mod mock;
mod stamp;
mod tool;

pub use convert::{DocumentConverter, StandardConverter};
pub use detect::{
    detect, is_encrypted_pdf, kind_from_extension, kind_from_signature, DocumentKind,
    MAGIC_HEADER_LEN,
};
pub use mock::{MockConverter, MockStamper};
pub use stamp::{
    DocumentStamper, OverlayStamper, OVERLAY_FILL_OPACITY, OVERLAY_FONT, OVERLAY_FONT_SIZE,
    OVERLAY_ROTATION_DEGREES, OVERLAY_TEXT,
};
pub use tool::ToolCommand;
