use anyhow::Result;
use crossterm::style::{Attribute, Color as CrosstermColor, ResetColor, SetAttribute, SetForegroundColor};
use std::fmt::Write;

use crate::ColorDepth;
use crate::analysis::{AnalysisResult, DocumentType, EntityCategory};
use crate::export::wrap_text;

pub struct AnsiOptions {
    pub terminal_width: usize,
    pub color_depth: ColorDepth,
}

impl Default for AnsiOptions {
    fn default() -> Self {
        Self {
            terminal_width: std::env::var("COLUMNS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(80),
            color_depth: ColorDepth::Auto,
        }
    }
}

pub fn export_to_ansi_with_options(result: &AnalysisResult, options: &AnsiOptions) -> Result<String> {
    let mut output = String::new();

    write_ansi_heading(&mut output, "Legal Document Analysis", 1, options)?;
    output.push('\n');

    writeln!(
        output,
        "{}",
        format_ansi_text(
            result.classification.as_str(),
            true,
            false,
            Some(document_type_color(result.classification)),
            options,
        )
    )?;
    writeln!(output, "{}", result.summary)?;
    output.push('\n');

    let separator = "=".repeat(std::cmp::min(50, options.terminal_width));
    writeln!(output, "{separator}")?;
    output.push('\n');

    write_ansi_entities(&mut output, result, options)?;
    write_ansi_clauses(&mut output, result, options)?;

    Ok(output)
}

/// One report colour with its fallbacks for smaller palettes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Swatch {
    rgb: (u8, u8, u8),
    ansi16: u8,
    ansi256: u8,
}

impl Swatch {
    const fn new(rgb: (u8, u8, u8), ansi16: u8, ansi256: u8) -> Self {
        Self { rgb, ansi16, ansi256 }
    }

    fn for_depth(self, color_depth: ColorDepth) -> Option<CrosstermColor> {
        let (r, g, b) = self.rgb;
        match color_depth {
            ColorDepth::Monochrome => None,
            ColorDepth::Standard => Some(CrosstermColor::AnsiValue(self.ansi16)),
            ColorDepth::Extended => Some(CrosstermColor::AnsiValue(self.ansi256)),
            ColorDepth::TrueColor | ColorDepth::Auto => Some(CrosstermColor::Rgb { r, g, b }),
        }
    }
}

const YELLOW: Swatch = Swatch::new((255, 255, 0), 11, 226);
const GREEN: Swatch = Swatch::new((0, 255, 0), 10, 46);
const MAGENTA: Swatch = Swatch::new((255, 0, 255), 13, 201);
const ORANGE: Swatch = Swatch::new((255, 170, 0), 3, 214);
const CYAN: Swatch = Swatch::new((0, 255, 255), 14, 51);
const GRAY: Swatch = Swatch::new((170, 170, 170), 7, 248);
const DIM: Swatch = Swatch::new((102, 102, 102), 8, 241);
const BLUE: Swatch = Swatch::new((0, 102, 255), 12, 27);
const SKY: Swatch = Swatch::new((0, 170, 255), 14, 39);

fn write_ansi_heading(
    output: &mut String,
    text: &str,
    level: u8,
    options: &AnsiOptions,
) -> Result<()> {
    let color = match level {
        1 => YELLOW,
        _ => GREEN,
    };

    let prefix = match level {
        1 => "■ ",
        _ => "  ▶ ",
    };

    let formatted_text = format_ansi_text(&format!("{prefix}{text}"), true, false, Some(color), options);
    writeln!(output, "{formatted_text}")?;
    Ok(())
}

fn write_ansi_entities(
    output: &mut String,
    result: &AnalysisResult,
    options: &AnsiOptions,
) -> Result<()> {
    write_ansi_heading(output, "Entities", 2, options)?;

    if result.entities.is_empty() {
        writeln!(
            output,
            "    {}",
            format_ansi_text("No entities found", false, true, Some(DIM), options)
        )?;
    }

    for (category, entries) in result.entities.iter() {
        if entries.is_empty() {
            continue;
        }
        let label = format_ansi_text(
            &format!("{:<9}", category.as_str()),
            true,
            false,
            Some(entity_color(category)),
            options,
        );
        writeln!(output, "    {label} {}", entries.join(", "))?;
    }
    output.push('\n');
    Ok(())
}

fn write_ansi_clauses(
    output: &mut String,
    result: &AnalysisResult,
    options: &AnsiOptions,
) -> Result<()> {
    write_ansi_heading(output, "Clauses", 2, options)?;
    let width = options.terminal_width.saturating_sub(6);

    for (number, original, simplified) in result.clause_pairs() {
        let bullet = format_ansi_text(&format!("{number}. "), false, false, Some(BLUE), options);
        writeln!(output, "    {bullet}")?;
        for line in wrap_text(original, width) {
            writeln!(output, "      {line}")?;
        }
        if simplified != original {
            for line in wrap_text(simplified, width) {
                writeln!(
                    output,
                    "      {}",
                    format_ansi_text(&line, false, true, Some(SKY), options)
                )?;
            }
        }
        output.push('\n');
    }
    Ok(())
}

fn document_type_color(document_type: DocumentType) -> Swatch {
    match document_type {
        DocumentType::NonDisclosureAgreement => MAGENTA,
        DocumentType::LeaseAgreement => GREEN,
        DocumentType::EmploymentContract => ORANGE,
        DocumentType::ServiceAgreement => CYAN,
        DocumentType::Other => GRAY,
    }
}

fn entity_color(category: EntityCategory) -> Swatch {
    match category {
        EntityCategory::Person => YELLOW,
        EntityCategory::Org => CYAN,
        EntityCategory::Date => GREEN,
        EntityCategory::Money => ORANGE,
        EntityCategory::Cardinal => GRAY,
        EntityCategory::Gpe => MAGENTA,
    }
}

fn format_ansi_text(
    text: &str,
    bold: bool,
    italic: bool,
    color: Option<Swatch>,
    options: &AnsiOptions,
) -> String {
    let mut result = String::new();

    if bold {
        result.push_str(&format!("{}", SetAttribute(Attribute::Bold)));
    }
    if italic {
        result.push_str(&format!("{}", SetAttribute(Attribute::Italic)));
    }
    if let Some(color) = color.and_then(|swatch| swatch.for_depth(options.color_depth)) {
        result.push_str(&format!("{}", SetForegroundColor(color)));
    }

    result.push_str(text);

    // Reset so styling never bleeds into the next span
    result.push_str(&format!("{}", SetAttribute(Attribute::Reset)));
    result.push_str(&format!("{ResetColor}"));

    result
}
