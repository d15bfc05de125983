//! Result export: JSON, entity CSV and plain-text report

use anyhow::Result;
use std::fmt::Write;
use unicode_segmentation::UnicodeSegmentation;

use crate::analysis::AnalysisResult;

/// Full result as pretty-printed JSON
pub fn export_to_json(result: &AnalysisResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

/// `Type,Entity` table, one row per entity string; `None` when nothing was found
pub fn export_entities_to_csv(result: &AnalysisResult) -> Option<String> {
    if result.entities.is_empty() {
        return None;
    }

    let mut output = String::from("Type,Entity\n");
    for (category, entries) in result.entities.iter() {
        for entry in entries {
            output.push_str(category.as_str());
            output.push(',');
            output.push_str(&escape_csv(entry));
            output.push('\n');
        }
    }
    Some(output)
}

fn escape_csv(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Human-readable report without terminal styling
pub fn export_to_text(result: &AnalysisResult, width: usize) -> Result<String> {
    let mut output = String::new();

    writeln!(output, "Legal Document Analysis")?;
    writeln!(output, "{}", "=".repeat(23))?;
    output.push('\n');
    writeln!(output, "Summary: {}", result.summary)?;
    writeln!(output, "Document type: {}", result.classification)?;
    output.push('\n');

    writeln!(output, "Entities")?;
    writeln!(output, "--------")?;
    if result.entities.is_empty() {
        writeln!(output, "(none)")?;
    }
    for (category, entries) in result.entities.iter() {
        if entries.is_empty() {
            continue;
        }
        writeln!(output, "{category}: {}", entries.join(", "))?;
    }
    output.push('\n');

    writeln!(output, "Clauses")?;
    writeln!(output, "-------")?;
    for (number, original, simplified) in result.clause_pairs() {
        writeln!(output, "Clause {number}")?;
        for line in wrap_text(original, width.saturating_sub(4)) {
            writeln!(output, "    {line}")?;
        }
        writeln!(output, "  Simplified:")?;
        for line in wrap_text(simplified, width.saturating_sub(4)) {
            writeln!(output, "    {line}")?;
        }
        output.push('\n');
    }

    Ok(output)
}

/// Greedy wrap on Unicode word boundaries
pub(crate) fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(20);
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_len = 0;

    for segment in text.split_word_bounds() {
        if segment.chars().all(char::is_whitespace) {
            if line_len > 0 {
                line.push(' ');
                line_len += 1;
            }
            continue;
        }

        let segment_len = segment.chars().count();
        if line_len + segment_len > width && !line.trim().is_empty() {
            lines.push(line.trim_end().to_string());
            line.clear();
            line_len = 0;
        }
        line.push_str(segment);
        line_len += segment_len;
    }

    if !line.trim().is_empty() {
        lines.push(line.trim_end().to_string());
    }
    lines
}
