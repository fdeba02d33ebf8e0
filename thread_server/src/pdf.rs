// PDF export through an external wkhtmltopdf process.

use anyhow::{bail, Context};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use std::path::PathBuf;
use std::process::Stdio;

#[derive(Debug, Clone)]
pub struct PdfRenderer {
    program: PathBuf,
}

impl PdfRenderer {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self { program: program.into() }
    }

    /// Convert a complete HTML page to PDF bytes.
    /// The page is written to the process's stdin and the PDF read from its stdout.
    pub async fn render(&self, html: &str) -> anyhow::Result<Vec<u8>> {
        let mut child = Command::new(&self.program)
            .args(["--quiet", "--encoding", "utf-8", "-", "-"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("cannot start {}", self.program.display()))?;

        let mut stdin = child.stdin.take().context("stdin of wkhtmltopdf is not piped")?;
        let input = html.as_bytes();
        let write = async move {
            stdin.write_all(input).await?;
            stdin.shutdown().await
        };
        let (written, output) = tokio::join!(write, child.wait_with_output());
        let output = output.context("wkhtmltopdf did not finish")?;
        written.context("cannot write page to wkhtmltopdf")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!("wkhtmltopdf exited with {}: {}", output.status, stderr.trim());
        }
        tracing::info!("Rendered PDF of {} bytes", output.stdout.len());
        Ok(output.stdout)
    }
}
