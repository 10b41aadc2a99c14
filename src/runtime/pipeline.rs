use std::io::{self, BufRead, Write};
use std::path::Path;

use crossterm::style::Stylize;
use tracing::info;

use crate::config::Settings;
use crate::library::{self, MoveOperation};
use crate::metadata::{MetadataExtractor, MetadataSource};

const RULE_WIDTH: usize = 50;

/// Counts reported at the end of a run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Summary {
    pub found: usize,
    pub planned: usize,
    pub skipped: usize,
    pub moved: usize,
    pub failed: usize,
    /// `None` when the run was cancelled before the prune pass.
    pub removed_dirs: Option<usize>,
    pub cancelled: bool,
}

/// Scan, plan, preview, confirm, move, prune.
///
/// The narrative goes to `out`; the confirmation answer is read from
/// `input`. Anything but the configured confirm word (or end of input)
/// cancels the whole run before any file or folder is touched. When there
/// is nothing to move the prune pass runs without asking.
pub fn organize<S, R, W>(
    root: &Path,
    settings: &Settings,
    extractor: &MetadataExtractor<S>,
    input: &mut R,
    out: &mut W,
) -> io::Result<Summary>
where
    S: MetadataSource,
    R: BufRead,
    W: Write,
{
    let mut summary = Summary::default();
    let rule = "-".repeat(RULE_WIDTH);

    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out, "{}", "MUSIC LIBRARY ORGANIZER".bold())?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;

    writeln!(out, "\n{} Finding music files...", "[1/3]".cyan())?;
    let files = library::scan(root, &settings.library);
    summary.found = files.len();
    writeln!(out, "      Found {} files", files.len())?;
    info!(root = %root.display(), found = files.len(), "scan finished");

    writeln!(out, "\n{} Reading metadata...", "[2/3]".cyan())?;
    let every = settings.organize.progress_every;
    let mut progress_err = None;
    let plan = library::plan(&files, root, extractor, |done, total| {
        if every > 0 && done % every == 0 && progress_err.is_none() {
            progress_err = writeln!(out, "      {done}/{total}...").err();
        }
    });
    if let Some(err) = progress_err {
        return Err(err);
    }
    summary.planned = plan.moves.len();
    summary.skipped = plan.skipped;

    writeln!(out, "\n      {} {} files to move", "✓".green(), plan.moves.len())?;
    writeln!(
        out,
        "      {} {} files skipped (incomplete metadata)",
        "✗".red(),
        plan.skipped
    )?;

    if plan.moves.is_empty() {
        writeln!(out, "\nNo files to move.")?;
    } else {
        write_preview(out, root, &plan.moves, settings.organize.preview_limit, &rule)?;

        writeln!(out, "\n{rule}")?;
        write!(
            out,
            "Move {} files? ({}/no): ",
            plan.moves.len(),
            settings.organize.confirm_word
        )?;
        out.flush()?;

        if !confirmed(input, &settings.organize.confirm_word)? {
            writeln!(out, "Cancelled.")?;
            summary.cancelled = true;
            return Ok(summary);
        }

        writeln!(out, "\nMoving...")?;
        let report = library::apply_moves(&plan.moves);
        summary.moved = report.moved;
        summary.failed = report.failures.len();
        writeln!(out, "{} Moved {} files.", "✓".green(), report.moved)?;
        for failure in &report.failures {
            let (src, _) = failure.operation.relative_to(root);
            writeln!(out, "{} {}: {}", "✗".red(), src.display(), failure.error)?;
        }
    }

    writeln!(out, "\nCleaning up empty folders...")?;
    let removed = library::prune_empty_directories(root, &settings.library);
    summary.removed_dirs = Some(removed);
    writeln!(out, "{} Removed {} empty folders.", "✓".green(), removed)?;
    writeln!(out, "\n{} Done!", "✓".green())?;

    Ok(summary)
}

fn write_preview<W: Write>(
    out: &mut W,
    root: &Path,
    moves: &[MoveOperation],
    limit: usize,
    rule: &str,
) -> io::Result<()> {
    writeln!(out, "\n{} Preview (first {limit}):", "[3/3]".cyan())?;
    writeln!(out, "{rule}")?;
    for op in moves.iter().take(limit) {
        let (src, dst) = op.relative_to(root);
        writeln!(out, "\n  {}", src.display())?;
        writeln!(out, "  {} {}", "→".yellow(), dst.display())?;
    }
    if moves.len() > limit {
        writeln!(out, "\n  ... and {} more", moves.len() - limit)?;
    }
    Ok(())
}

fn confirmed<R: BufRead>(input: &mut R, confirm_word: &str) -> io::Result<bool> {
    let mut answer = String::new();
    if input.read_line(&mut answer)? == 0 {
        return Ok(false);
    }
    Ok(answer.trim().to_lowercase() == confirm_word.trim().to_lowercase())
}
