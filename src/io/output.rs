use crate::core::AnalysisResult;
use colored::*;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

pub trait OutputWriter {
    fn write_analysis(&mut self, result: &AnalysisResult) -> anyhow::Result<()>;
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_analysis(&mut self, result: &AnalysisResult) -> anyhow::Result<()> {
        write_json(&mut self.writer, result)
    }
}

pub struct TextWriter<W: Write> {
    writer: W,
}

impl<W: Write> TextWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_findings(&mut self, result: &AnalysisResult) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", "Findings".bold().blue())?;
        if result.findings.is_empty() {
            writeln!(self.writer, "  {}", "none".green())?;
        }
        for finding in &result.findings {
            writeln!(self.writer, "  {} {}", "-".yellow(), finding)?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_refactors(&mut self, result: &AnalysisResult) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", "Refactors".bold().blue())?;
        for refactor in &result.refactors {
            writeln!(
                self.writer,
                "  {}: {}",
                refactor.symbol.yellow(),
                refactor.suggestion
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_formatted(&mut self, result: &AnalysisResult) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", "Formatted".bold().blue())?;
        write!(self.writer, "{}", result.formatted)?;
        Ok(())
    }
}

impl<W: Write> OutputWriter for TextWriter<W> {
    fn write_analysis(&mut self, result: &AnalysisResult) -> anyhow::Result<()> {
        self.write_findings(result)?;
        self.write_refactors(result)?;
        self.write_formatted(result)?;
        Ok(())
    }
}

/// Pretty-print any serializable response followed by a newline
pub fn write_json<W: Write, T: Serialize + ?Sized>(
    writer: &mut W,
    value: &T,
) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    writer.write_all(json.as_bytes())?;
    writeln!(writer)?;
    Ok(())
}

pub fn create_writer(format: OutputFormat) -> Box<dyn OutputWriter> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(std::io::stdout())),
        OutputFormat::Text => Box::new(TextWriter::new(std::io::stdout())),
    }
}
