//! Plain-text coverage reports
//!
//! Every report goes to its own file. The distinct, overall and per-format
//! reports are also mirrored into a combined release file, each wrapped in a
//! `[spoiler=..]` block. Without a release file the mirror is simply skipped.

use crate::error::{Result, TrackingError};
use crate::reconcile::{Coverage, Reconciliation, SetCoverage};
use mtg_common::{normalize_oracle, OracleCatalog};
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

pub const COMPLETE_STATS_FILE: &str = "CompleteStats.txt";
pub const DISTINCT_STATS_FILE: &str = "DistinctStats.txt";
pub const DISTINCT_ORACLE_FILE: &str = "DistinctOracle.txt";
pub const RELEASE_STATS_FILE: &str = "ReleaseStats.txt";

const OVERALL_SECTION: &str = "Overall Editions";

pub fn set_file_name(code: &str) -> String {
    format!("set_{}.txt", code.trim())
}

pub fn format_file_name(format: &str) -> String {
    format!("Format{}.txt", format)
}

/// Writes everything to `primary` and, when present, the same bytes to
/// `mirror`
pub struct Tee<'a, P: Write + ?Sized, M: Write + ?Sized> {
    primary: &'a mut P,
    mirror: Option<&'a mut M>,
}

impl<'a, P: Write + ?Sized, M: Write + ?Sized> Tee<'a, P, M> {
    pub fn new(primary: &'a mut P, mirror: Option<&'a mut M>) -> Self {
        Self { primary, mirror }
    }

    /// The primary target alone, for content that is not mirrored
    pub fn primary(&mut self) -> &mut P {
        &mut *self.primary
    }
}

impl<'a, P: Write + ?Sized> Tee<'a, P, io::Sink> {
    pub fn primary_only(primary: &'a mut P) -> Self {
        Self {
            primary,
            mirror: None,
        }
    }
}

impl<P: Write + ?Sized, M: Write + ?Sized> Write for Tee<'_, P, M> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.primary.write_all(buf)?;
        if let Some(mirror) = self.mirror.as_mut() {
            mirror.write_all(buf)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.primary.flush()?;
        if let Some(mirror) = self.mirror.as_mut() {
            mirror.flush()?;
        }
        Ok(())
    }
}

/// Per-set report: both listings, oracle details under each missing card,
/// then the totals
pub fn render_set(
    out: &mut dyn Write,
    set: &SetCoverage,
    oracle: &OracleCatalog,
) -> io::Result<()> {
    let coverage = &set.coverage;

    writeln!(out, "Implemented ({}):", coverage.implemented_count())?;
    for name in &coverage.implemented {
        writeln!(out, "{}", name)?;
    }
    writeln!(out)?;

    writeln!(out, "Missing ({}):", coverage.missing_count())?;
    for name in &coverage.missing {
        writeln!(out, "{}", name)?;
        match oracle.lookup(name) {
            Ok(record) => {
                if let Some(cost) = &record.mana_cost {
                    writeln!(out, "{}", cost)?;
                }
                if let Some(type_line) = &record.type_line {
                    writeln!(out, "{}", normalize_oracle(type_line))?;
                }
                if let Some(pt) = record.power_toughness() {
                    writeln!(out, "PT:{}", pt)?;
                }
                if let Some(loyalty) = &record.loyalty {
                    writeln!(out, "Loyalty:{}", loyalty)?;
                }
                let text = record.text.as_deref().map(normalize_oracle).unwrap_or_default();
                writeln!(out, "{}", text)?;
                writeln!(out)?;
            }
            Err(e) => {
                log::warn!("Failed to grab oracle for {}: {}", name, e);
                writeln!(out)?;
            }
        }
    }
    writeln!(out)?;

    writeln!(out, "Total: {}", coverage.total())?;
    writeln!(out, "Percentage implemented: {:.2}%", coverage.percentage())?;
    Ok(())
}

/// Summary block for a group of cards. The implemented listing, when
/// requested, only goes to the primary target.
pub fn render_card_set<P, M>(
    out: &mut Tee<'_, P, M>,
    coverage: &Coverage,
    set_coverage: Option<&[String]>,
    print_implemented: bool,
) -> io::Result<()>
where
    P: Write + ?Sized,
    M: Write + ?Sized,
{
    if let Some(codes) = set_coverage {
        writeln!(out, "{}", codes.join(" "))?;
    }
    writeln!(out, "Implemented (Missing) / Total = Percentage Implemented")?;
    writeln!(
        out,
        "{} ({}) / {} = {:.2} %",
        coverage.implemented_count(),
        coverage.missing_count(),
        coverage.total(),
        coverage.percentage()
    )?;

    if print_implemented {
        let primary = out.primary();
        write!(primary, "\nImplemented ({}):", coverage.implemented_count())?;
        for name in &coverage.implemented {
            write!(primary, "\n{}", name)?;
        }
    }

    write!(out, "\nMissing ({}):", coverage.missing_count())?;
    for name in &coverage.missing {
        write!(out, "\n{}", name)?;
    }
    writeln!(out)?;
    Ok(())
}

/// Ranked per-set table followed by the totals over all sets
pub fn render_overall<P, M>(out: &mut Tee<'_, P, M>, result: &Reconciliation) -> io::Result<()>
where
    P: Write + ?Sized,
    M: Write + ?Sized,
{
    writeln!(out, "Set: Implemented (Missing) / Total = Percentage Implemented")?;
    for set in result.ranked() {
        if set.is_unmapped() {
            log::warn!("SetCode unknown: {}", set.code);
            continue;
        }
        let name = set.name.trim_start();
        let label = if name.is_empty() { set.code.as_str() } else { name };
        let c = &set.coverage;
        writeln!(
            out,
            "{}: {} ({}) / {} = {:.2}%",
            label,
            c.implemented_count(),
            c.missing_count(),
            c.total(),
            c.percentage()
        )?;
    }

    let totals = result.totals();
    write!(
        out,
        "\nTotal over all sets: {} ({}) / {}",
        totals.implemented, totals.missing, totals.total
    )?;
    if let Some(percentage) = totals.percentage() {
        write!(out, " = {:.2}%", percentage)?;
    }
    writeln!(out)?;
    Ok(())
}

/// Missing cards with their normalized rules text. Cards without oracle
/// text are written by name alone.
pub fn render_distinct_oracle(
    out: &mut dyn Write,
    missing: &BTreeSet<String>,
    oracle: &OracleCatalog,
) -> io::Result<()> {
    for name in missing.iter().filter(|n| !n.is_empty()) {
        match oracle.oracle_text(name) {
            Ok(text) => write!(out, "{}\n{}\n\n", name, text)?,
            Err(e) => {
                log::warn!("Failed to grab oracle for {}: {}", name, e);
                write!(out, "{}\n\n", name)?;
            }
        }
    }
    writeln!(out)?;
    Ok(())
}

/// Writes the report files of one run into an output directory
pub struct ReportWriter<'a> {
    output_dir: PathBuf,
    oracle: &'a OracleCatalog,
    print_implemented: bool,
    release: Option<BufWriter<File>>,
}

impl<'a> ReportWriter<'a> {
    /// Create the writer, creating `output_dir` if needed. With
    /// `write_release` the combined release file is opened as well.
    pub fn new(
        output_dir: &Path,
        oracle: &'a OracleCatalog,
        print_implemented: bool,
        write_release: bool,
    ) -> Result<Self> {
        std::fs::create_dir_all(output_dir).map_err(|e| TrackingError::io(output_dir, e))?;

        let release = if write_release {
            Some(create_file(&output_dir.join(RELEASE_STATS_FILE))?)
        } else {
            None
        };

        Ok(Self {
            output_dir: output_dir.to_path_buf(),
            oracle,
            print_implemented,
            release,
        })
    }

    /// Write every report of a reconciliation run
    pub fn write_all(&mut self, result: &Reconciliation) -> Result<()> {
        for set in &result.sets {
            self.write_set(set)?;
        }

        self.write_card_set(&result.distinct, DISTINCT_STATS_FILE, None)?;
        self.write_overall(result)?;
        for format in &result.formats {
            self.write_card_set(
                &format.coverage,
                &format_file_name(&format.name),
                Some(format.sets.as_slice()),
            )?;
        }
        self.write_distinct_oracle(&result.distinct.missing)?;
        Ok(())
    }

    pub fn write_set(&self, set: &SetCoverage) -> Result<()> {
        let path = self.output_dir.join(set_file_name(&set.code));
        let mut file = create_file(&path)?;
        render_set(&mut file, set, self.oracle)
            .and_then(|_| file.flush())
            .map_err(|e| TrackingError::io(&path, e))
    }

    /// Write a card-set summary to `file_name`, mirrored into the release
    /// file. Groups without any card are skipped.
    pub fn write_card_set(
        &mut self,
        coverage: &Coverage,
        file_name: &str,
        set_coverage: Option<&[String]>,
    ) -> Result<()> {
        log::info!(
            "{} Counts: {} {} {}",
            file_name,
            coverage.implemented_count(),
            coverage.missing_count(),
            coverage.total()
        );
        if coverage.total() == 0 {
            log::warn!("Total count is 0 for {}, skipping", file_name);
            return Ok(());
        }

        let path = self.output_dir.join(file_name);
        let mut file = create_file(&path)?;
        let print_implemented = self.print_implemented;
        self.in_release_section(file_name, |release| {
            let mut out = Tee::new(&mut file, release);
            render_card_set(&mut out, coverage, set_coverage, print_implemented)?;
            out.flush()
        })
        .map_err(|e| TrackingError::io(&path, e))
    }

    pub fn write_overall(&mut self, result: &Reconciliation) -> Result<()> {
        let path = self.output_dir.join(COMPLETE_STATS_FILE);
        let mut file = create_file(&path)?;
        self.in_release_section(OVERALL_SECTION, |release| {
            let mut out = Tee::new(&mut file, release);
            render_overall(&mut out, result)?;
            out.flush()
        })
        .map_err(|e| TrackingError::io(&path, e))
    }

    pub fn write_distinct_oracle(&self, missing: &BTreeSet<String>) -> Result<()> {
        let path = self.output_dir.join(DISTINCT_ORACLE_FILE);
        let mut file = create_file(&path)?;
        render_distinct_oracle(&mut file, missing, self.oracle)
            .and_then(|_| file.flush())
            .map_err(|e| TrackingError::io(&path, e))
    }

    /// Flush the release file
    pub fn finish(mut self) -> Result<()> {
        if let Some(release) = self.release.as_mut() {
            release
                .flush()
                .map_err(|e| TrackingError::io(self.output_dir.join(RELEASE_STATS_FILE), e))?;
        }
        Ok(())
    }

    /// Run `body` with the release file, wrapped in a spoiler block
    fn in_release_section<F>(&mut self, title: &str, body: F) -> io::Result<()>
    where
        F: FnOnce(Option<&mut BufWriter<File>>) -> io::Result<()>,
    {
        if let Some(release) = self.release.as_mut() {
            writeln!(release, "[spoiler={}]", title)?;
        }
        body(self.release.as_mut())?;
        if let Some(release) = self.release.as_mut() {
            write!(release, "[/spoiler]\n\n")?;
        }
        Ok(())
    }
}

fn create_file(path: &Path) -> Result<BufWriter<File>> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|e| TrackingError::io(path, e))
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
