use std::path::Path;

use tracing::debug;

use super::detect::{self, DocumentKind};
use super::tool::ToolCommand;
use crate::error::ConvertError;

/// Transforms a source document into the canonical intermediate format (PDF)
/// at the given destination. Implementations must be safe to call from many
/// worker threads at once on disjoint paths.
pub trait DocumentConverter: Send + Sync {
    fn convert(&self, source: &Path, dest: &Path) -> Result<(), ConvertError>;
}

/// Production converter: dispatches on the detected format. PDF sources are
/// probed for encryption and copied through; TIFF sources are rendered by an
/// external tool command.
pub struct StandardConverter {
    renderer: Option<ToolCommand>,
}

impl StandardConverter {
    pub fn new() -> Self {
        Self { renderer: None }
    }

    pub fn with_renderer(renderer: ToolCommand) -> Self {
        Self {
            renderer: Some(renderer),
        }
    }
}

impl Default for StandardConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentConverter for StandardConverter {
    fn convert(&self, source: &Path, dest: &Path) -> Result<(), ConvertError> {
        match detect::detect(source)? {
            DocumentKind::Pdf => {
                let bytes = std::fs::read(source)?;
                if detect::is_encrypted_pdf(&bytes) {
                    return Err(ConvertError::PasswordLocked);
                }
                std::fs::write(dest, bytes)?;
                debug!(source = %source.display(), dest = %dest.display(), "pdf passed through");
                Ok(())
            }
            DocumentKind::Tiff => {
                let renderer = self.renderer.as_ref().ok_or_else(|| {
                    ConvertError::Renderer("no render tool configured for tiff input".to_string())
                })?;
                renderer
                    .run(source, dest)
                    .map_err(ConvertError::Renderer)?;
                debug!(source = %source.display(), dest = %dest.display(), "tiff rendered");
                Ok(())
            }
        }
    }
}
