use std::path::Path;
use std::process::Command;

use tracing::debug;

/// External command template for a collaborator tool. `{source}` and `{dest}`
/// placeholders are substituted per invocation; any other placeholder must be
/// resolved before construction.
#[derive(Debug, Clone)]
pub struct ToolCommand {
    program: String,
    args: Vec<String>,
}

impl ToolCommand {
    /// Parses a shell-style template, e.g. `tiff2pdf -o {dest} {source}`.
    pub fn parse(template: &str) -> Result<Self, String> {
        let words = shell_words::split(template).map_err(|e| e.to_string())?;
        let mut iter = words.into_iter();
        let program = iter.next().ok_or_else(|| "empty tool command".to_string())?;
        Ok(Self {
            program,
            args: iter.collect(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Runs the tool with placeholders substituted. Non-zero exit status or a
    /// spawn failure is reported as one flattened message.
    pub fn run(&self, source: &Path, dest: &Path) -> Result<(), String> {
        let args: Vec<String> = self
            .args
            .iter()
            .map(|a| {
                a.replace("{source}", &source.to_string_lossy())
                    .replace("{dest}", &dest.to_string_lossy())
            })
            .collect();

        debug!(program = self.program.as_str(), ?args, "running external tool");
        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .map_err(|e| format!("{}: {e}", self.program))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            ));
        }
        Ok(())
    }
}
