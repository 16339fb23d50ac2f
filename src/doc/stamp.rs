use std::path::Path;

use tracing::debug;

use super::tool::ToolCommand;
use crate::error::StampError;

/// Fixed overlay applied to every page of an archived document. The values
/// are part of the output contract: identical input always yields an
/// identical stamped artifact.
pub const OVERLAY_TEXT: &str = "COPY";
pub const OVERLAY_ROTATION_DEGREES: f32 = 60.0;
pub const OVERLAY_FILL_OPACITY: f32 = 0.6;
pub const OVERLAY_FONT: &str = "Courier";
pub const OVERLAY_FONT_SIZE: f32 = 119.0;

/// Applies the fixed visual overlay to every page, centered, writing the
/// result to `dest`.
pub trait DocumentStamper: Send + Sync {
    fn stamp(&self, source: &Path, dest: &Path) -> Result<(), StampError>;
}

/// Production stamper: delegates page rendering to an external tool command.
/// Overlay placeholders in the template are resolved once at construction
/// from the fixed constants above.
pub struct OverlayStamper {
    tool: ToolCommand,
}

impl OverlayStamper {
    pub fn new(template: &str) -> Result<Self, String> {
        let resolved = template
            .replace("{text}", OVERLAY_TEXT)
            .replace("{rotation}", &OVERLAY_ROTATION_DEGREES.to_string())
            .replace("{opacity}", &OVERLAY_FILL_OPACITY.to_string())
            .replace("{font}", OVERLAY_FONT)
            .replace("{font_size}", &OVERLAY_FONT_SIZE.to_string());
        Ok(Self {
            tool: ToolCommand::parse(&resolved)?,
        })
    }
}

impl DocumentStamper for OverlayStamper {
    fn stamp(&self, source: &Path, dest: &Path) -> Result<(), StampError> {
        // surface a missing source as an IO error rather than a tool failure
        std::fs::metadata(source)?;
        self.tool.run(source, dest).map_err(StampError::Tool)?;
        debug!(source = %source.display(), dest = %dest.display(), "overlay stamped");
        Ok(())
    }
}
