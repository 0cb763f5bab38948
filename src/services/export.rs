use std::borrow::Cow;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use colormap_match::ColorTable;

use crate::error::ExportError;
use crate::models::{DetectionReport, StatisticEntry};

/// Paths of the two debug tables written for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugFiles {
    pub colors: PathBuf,
    pub coverage: PathBuf,
}

impl DebugFiles {
    /// `NAME_colors.csv` and `NAME_cm.csv`
    pub fn for_name(name: &str) -> Self {
        Self {
            colors: PathBuf::from(format!("{name}_colors.csv")),
            coverage: PathBuf::from(format!("{name}_cm.csv")),
        }
    }
}

/// Write the color and coverage tables of a report.
pub fn write_debug_files(report: &DetectionReport, name: &str) -> Result<DebugFiles, ExportError> {
    let files = DebugFiles::for_name(name);
    write_colors_csv(&files.colors, &report.colors)?;
    write_coverage_csv(&files.coverage, &report.statistics)?;

    tracing::info!(
        colors = %files.colors.display(),
        coverage = %files.coverage.display(),
        "Wrote debug tables"
    );
    Ok(files)
}

/// One row per distinct color per page: `R,G,B,count,page`.
pub fn write_colors_csv(path: &Path, tables: &[ColorTable]) -> Result<(), ExportError> {
    write_csv(path, |out| {
        writeln!(out, "R,G,B,count,page")?;
        for table in tables {
            let page = escape(&table.page_id);
            for sample in &table.samples {
                let [r, g, b] = sample.rgb;
                writeln!(out, "{r},{g},{b},{},{page}", sample.count)?;
            }
        }
        Ok(())
    })
}

/// One row per page and colormap: `page,cm,pct_cm,pct_page`.
pub fn write_coverage_csv(path: &Path, statistics: &[StatisticEntry]) -> Result<(), ExportError> {
    write_csv(path, |out| {
        writeln!(out, "page,cm,pct_cm,pct_page")?;
        for row in statistics {
            writeln!(
                out,
                "{},{},{},{}",
                escape(&row.page),
                escape(&row.colormap),
                row.pct_cm,
                row.pct_page
            )?;
        }
        Ok(())
    })
}

fn write_csv<F>(path: &Path, write_rows: F) -> Result<(), ExportError>
where
    F: FnOnce(&mut BufWriter<File>) -> std::io::Result<()>,
{
    let export_error = |error| ExportError {
        path: path.to_path_buf(),
        error,
    };
    let file = File::create(path).map_err(export_error)?;
    let mut out = BufWriter::new(file);
    write_rows(&mut out).map_err(export_error)?;
    out.flush().map_err(export_error)
}

// Quote fields holding a separator, quote or newline
fn escape(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use colormap_match::ColorSample;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_debug_file_names() {
        let files = DebugFiles::for_name("out/run");
        assert_eq!(files.colors, PathBuf::from("out/run_colors.csv"));
        assert_eq!(files.coverage, PathBuf::from("out/run_cm.csv"));
    }

    #[test]
    fn test_colors_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("colors.csv");
        let tables = vec![
            ColorTable::new(
                "doc-1",
                vec![
                    ColorSample { rgb: [0, 0, 128], count: 3 },
                    ColorSample { rgb: [10, 20, 30], count: 1 },
                ],
            ),
            ColorTable::new("a,b", vec![ColorSample { rgb: [1, 2, 3], count: 7 }]),
        ];

        write_colors_csv(&path, &tables).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "R,G,B,count,page\n0,0,128,3,doc-1\n10,20,30,1,doc-1\n1,2,3,7,\"a,b\"\n"
        );
    }

    #[test]
    fn test_coverage_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cm.csv");
        let rows = vec![StatisticEntry {
            page: "doc-1".to_string(),
            colormap: "jet".to_string(),
            pct_cm: 0.75,
            pct_page: 1.0,
        }];

        write_coverage_csv(&path, &rows).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "page,cm,pct_cm,pct_page\ndoc-1,jet,0.75,1\n");
    }

    #[test]
    fn test_unwritable_path() {
        let err = write_coverage_csv(Path::new("/nonexistent/dir/cm.csv"), &[]).unwrap_err();
        assert_eq!(err.path, PathBuf::from("/nonexistent/dir/cm.csv"));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("plain"), "plain");
        assert_eq!(escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
