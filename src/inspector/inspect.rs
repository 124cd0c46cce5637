use super::format::{write_failure, write_header, write_report, OutputFormat};
use super::report::FileReport;
use crate::error::{NeomapError, Result};
use crate::signatures::SignatureSet;
use crate::types::image::stat;
use crate::types::{ExecutableImage, JumpTable};
use anyhow::Context;
use std::io::Write;
use std::path::{Path, PathBuf};

/// A file the inspector could not examine
#[derive(Clone, Debug)]
pub struct InspectFailure {
    pub path: PathBuf,
    pub exit_code: u8,
    pub message: String,
}

/// Totals for one run
#[derive(Clone, Debug, Default)]
pub struct InspectSummary {
    pub processed: usize,
    pub matched: usize,
    pub failures: Vec<InspectFailure>,
}

/// Reports which known jump tables are present in executables
pub struct Inspector {
    tables: Vec<JumpTable>,
    format: OutputFormat,
}

impl Inspector {
    pub fn new(format: OutputFormat) -> Self {
        Self::with_tables(SignatureSet::jump_tables().to_vec(), format)
    }

    pub fn with_tables(tables: Vec<JumpTable>, format: OutputFormat) -> Self {
        Self { tables, format }
    }

    /// Reads one file and checks it against every known table
    pub fn inspect_file(&self, path: &Path) -> Result<FileReport> {
        let image = ExecutableImage::load(path)?;
        Ok(FileReport::from_image(&image, &self.tables))
    }

    /// Inspects `input`, or every path it lists when it is a `.txt` file
    ///
    /// Per-file failures are written in-line and collected in the summary.
    /// Only a list that cannot be read, or a broken output stream, is an error.
    pub fn run<W: Write>(&self, out: &mut W, input: &Path) -> anyhow::Result<InspectSummary> {
        let paths = if is_path_list(input) {
            read_path_list(input)?
        } else {
            vec![input.to_path_buf()]
        };

        write_header(out, self.format).context("Failed to write report header")?;

        let mut summary = InspectSummary::default();
        for path in paths {
            self.examine(out, &path, &mut summary)?;
        }

        tracing::info!(
            "Inspected {} file(s): {} with a known table, {} failed",
            summary.processed,
            summary.matched,
            summary.failures.len()
        );
        Ok(summary)
    }

    fn examine<W: Write>(
        &self,
        out: &mut W,
        path: &Path,
        summary: &mut InspectSummary,
    ) -> anyhow::Result<()> {
        summary.processed += 1;
        let display = path.display().to_string();

        match self.inspect_file(path) {
            Ok(report) => {
                if !report.matches.is_empty() {
                    summary.matched += 1;
                }
                write_report(out, self.format, &report)
                    .with_context(|| format!("Failed to write report for {}", display))?;
            }
            Err(err) => {
                tracing::warn!("{}", err);
                let message = err.to_string();
                write_failure(out, self.format, &display, &message)
                    .with_context(|| format!("Failed to write report for {}", display))?;
                summary.failures.push(InspectFailure {
                    path: path.to_path_buf(),
                    exit_code: err.exit_code(),
                    message,
                });
            }
        }

        Ok(())
    }
}

/// A `.txt` input is a list of executable paths
pub fn is_path_list(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("txt"))
        .unwrap_or(false)
}

/// One path per line; blank lines are skipped
///
/// Lines are taken as raw bytes, so a line in a legacy code page only affects
/// its own entry. A leading UTF-8 byte order mark is ignored.
pub fn read_path_list(path: &Path) -> Result<Vec<PathBuf>> {
    stat(path)?;
    let contents = std::fs::read(path).map_err(|source| NeomapError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let body = contents.strip_prefix(UTF8_BOM).unwrap_or(&contents[..]);
    let paths: Vec<PathBuf> = body
        .split(|&byte| byte == b'\n')
        .map(<[u8]>::trim_ascii)
        .filter(|line| !line.is_empty())
        .map(path_from_bytes)
        .collect();

    tracing::debug!("{} lists {} path(s)", path.display(), paths.len());
    Ok(paths)
}

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[cfg(unix)]
fn path_from_bytes(line: &[u8]) -> PathBuf {
    use std::os::unix::ffi::OsStrExt;
    PathBuf::from(std::ffi::OsStr::from_bytes(line))
}

#[cfg(not(unix))]
fn path_from_bytes(line: &[u8]) -> PathBuf {
    PathBuf::from(String::from_utf8_lossy(line).into_owned())
}
