//! ConsoleSink - human-readable table and run summary on stdout

use std::io::{self, Stdout, Write};
use std::path::PathBuf;

use contracts::{FloatFormat, Report, ReportError, ReportSink};
use tracing::instrument;

use super::REPORT_HEADER;

/// Render the report as an aligned text table
///
/// Text columns are left-aligned, numeric columns right-aligned. A missing
/// program or day mean is shown as `-`.
pub fn render_table(report: &Report, float_format: FloatFormat) -> String {
    let cells: Vec<[String; 4]> = report
        .rows
        .iter()
        .map(|row| {
            [
                row.year.to_string(),
                row.program.clone().unwrap_or_else(|| "-".to_string()),
                row.avg_days
                    .map_or_else(|| "-".to_string(), |v| float_format.format(v)),
                float_format.format(row.avg_business_days),
            ]
        })
        .collect();

    let mut widths = REPORT_HEADER.map(str::len);
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let header: Vec<String> = REPORT_HEADER
        .iter()
        .zip(widths)
        .map(|(h, w)| format!("{h:<w$}"))
        .collect();
    out.push_str(header.join("  ").trim_end());
    out.push('\n');

    for row in &cells {
        let line = format!(
            "{:<w0$}  {:<w1$}  {:>w2$}  {:>w3$}",
            row[0],
            row[1],
            row[2],
            row[3],
            w0 = widths[0],
            w1 = widths[1],
            w2 = widths[2],
            w3 = widths[3],
        );
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Sink that prints the report and its summary
pub struct ConsoleSink<W: Write = Stdout> {
    name: String,
    out: W,
    output_path: PathBuf,
    float_format: FloatFormat,
    print_table: bool,
}

impl ConsoleSink<Stdout> {
    /// Create a ConsoleSink writing to stdout
    pub fn stdout(
        name: impl Into<String>,
        output_path: impl Into<PathBuf>,
        float_format: FloatFormat,
        print_table: bool,
    ) -> Self {
        Self::new(name, io::stdout(), output_path, float_format, print_table)
    }
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(
        name: impl Into<String>,
        out: W,
        output_path: impl Into<PathBuf>,
        float_format: FloatFormat,
        print_table: bool,
    ) -> Self {
        Self {
            name: name.into(),
            out,
            output_path: output_path.into(),
            float_format,
            print_table,
        }
    }

    /// Consume the sink and return the writer
    pub fn into_inner(self) -> W {
        self.out
    }

    fn print(&mut self, report: &Report) -> io::Result<()> {
        if self.print_table {
            writeln!(
                self.out,
                "\naverage days from po approval to president approval by year and program:"
            )?;
            write!(self.out, "{}", render_table(report, self.float_format))?;
        }

        let years: Vec<String> = report.years().iter().map(i32::to_string).collect();
        writeln!(
            self.out,
            "\nresults saved to {}",
            self.output_path.display()
        )?;
        writeln!(self.out, "\ntotal records: {}", report.len())?;
        writeln!(self.out, "years covered: [{}]", years.join(", "))?;
        self.out.flush()
    }
}

impl<W: Write> ReportSink for ConsoleSink<W> {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(name = "console_sink_write", skip(self, report), fields(sink = %self.name))]
    fn write(&mut self, report: &Report) -> Result<(), ReportError> {
        self.print(report)
            .map_err(|e| ReportError::sink_write(&self.name, e.to_string()))
    }
}
