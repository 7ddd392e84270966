// dqlens-core/src/infrastructure/render/terminal.rs

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, Table};
use std::fmt::Write;

use crate::application::ports::ReportRenderer;
use crate::application::presenter::{Bar, ReportView, TableView};
use crate::domain::tier::Tier;
use crate::error::QualityError;
use crate::infrastructure::error::InfrastructureError;

const GAUGE_WIDTH: usize = 20;

/// Coloured tables for an interactive terminal.
#[derive(Debug, Clone, Copy)]
pub struct TerminalRenderer {
    styled: bool,
}

impl TerminalRenderer {
    /// `styled = false` drops colours and attributes (pipes, tests, NO_COLOR).
    pub fn new(styled: bool) -> Self {
        Self { styled }
    }

    fn new_table(&self) -> Table {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL_CONDENSED)
            .apply_modifier(UTF8_ROUND_CORNERS);
        if self.styled {
            table.enforce_styling();
        } else {
            table.force_no_tty();
        }
        table
    }

    fn bar_table(&self, title: &str, bars: &[Bar]) -> Table {
        let mut table = self.new_table();
        table.set_header(vec![
            header_cell("Column"),
            header_cell(title),
            header_cell("%"),
        ]);
        for bar in bars {
            table.add_row(vec![
                Cell::new(&bar.column),
                Cell::new(gauge(bar.value)).fg(tier_color(bar.tier)),
                Cell::new(format!("{:.2}", bar.value))
                    .fg(tier_color(bar.tier))
                    .set_alignment(CellAlignment::Right),
            ]);
        }
        table
    }

    fn missing_table(&self, view: &TableView) -> Table {
        let mut table = self.new_table();
        table.set_header(vec![header_cell("Column"), header_cell("Missing values")]);
        for missing in &view.missing_values {
            let count = Cell::new(missing.count).set_alignment(CellAlignment::Right);
            let count = if missing.count > 0 {
                count.fg(Color::Red).add_attribute(Attribute::Bold)
            } else {
                count
            };
            table.add_row(vec![Cell::new(&missing.column), count]);
        }
        table
    }

    fn render_table(&self, out: &mut String, view: &TableView) -> std::fmt::Result {
        writeln!(out, "📊 {}", view.table)?;
        writeln!(out)?;
        writeln!(out, "Completeness Percentage")?;
        writeln!(out, "{}", self.bar_table("Completeness", &view.completeness))?;
        writeln!(out, "Uniqueness Percentage")?;
        writeln!(out, "{}", self.bar_table("Uniqueness", &view.uniqueness))?;
        writeln!(
            out,
            "Duplicate Percentage: {:.2}% ({} duplicate rows)",
            view.duplicate_percentage, view.duplicate_rows
        )?;
        writeln!(out, "Missing Values")?;
        writeln!(out, "{}", self.missing_table(view))
    }
}

impl ReportRenderer for TerminalRenderer {
    fn render(&self, view: &ReportView) -> Result<String, QualityError> {
        let mut out = String::new();
        for (idx, table) in view.tables.iter().enumerate() {
            if idx > 0 {
                out.push('\n');
            }
            self.render_table(&mut out, table).map_err(|e| {
                QualityError::Infrastructure(InfrastructureError::RenderError(e.to_string()))
            })?;
        }
        Ok(out)
    }
}

/// Fixed-width textual gauge: `██████░░░░…`.
fn gauge(value: f64) -> String {
    let filled = ((value / 100.0) * GAUGE_WIDTH as f64).round() as usize;
    let filled = filled.min(GAUGE_WIDTH);
    format!("{}{}", "█".repeat(filled), "░".repeat(GAUGE_WIDTH - filled))
}

fn tier_color(tier: Tier) -> Color {
    match tier {
        Tier::High => Color::Green,
        Tier::Medium => Color::Yellow,
        Tier::Low => Color::Red,
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .add_attribute(Attribute::Bold)
        .fg(Color::Cyan)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::application::presenter::MissingValues;

    fn view() -> ReportView {
        ReportView {
            tables: vec![TableView {
                table: "category1".into(),
                completeness: vec![Bar {
                    column: "category_id".into(),
                    value: 100.0,
                    tier: Tier::High,
                }],
                uniqueness: vec![Bar {
                    column: "category_id".into(),
                    value: 55.0,
                    tier: Tier::Low,
                }],
                duplicate_percentage: 0.0,
                duplicate_rows: 0,
                missing_values: vec![MissingValues {
                    column: "category_id".into(),
                    count: 3,
                }],
            }],
        }
    }

    #[test]
    fn test_gauge_width_and_fill() {
        assert_eq!(gauge(100.0).chars().filter(|c| *c == '█').count(), 20);
        assert_eq!(gauge(0.0).chars().filter(|c| *c == '░').count(), 20);
        assert_eq!(gauge(50.0).chars().filter(|c| *c == '█').count(), 10);
        assert_eq!(gauge(50.0).chars().count(), 20);
    }

    #[test]
    fn test_plain_render_contains_sections_in_order() {
        let out = TerminalRenderer::new(false).render(&view()).unwrap();

        let positions: Vec<usize> = [
            "📊 category1",
            "Completeness Percentage",
            "Uniqueness Percentage",
            "Duplicate Percentage: 0.00% (0 duplicate rows)",
            "Missing Values",
        ]
        .iter()
        .map(|needle| out.find(needle).unwrap())
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{out}");

        assert!(out.contains("100.00"));
        assert!(out.contains("55.00"));
        // No ANSI escapes when unstyled.
        assert!(!out.contains('\u{1b}'));
    }

    #[test]
    fn test_styled_render_uses_tier_colours() {
        let out = TerminalRenderer::new(true).render(&view()).unwrap();
        assert!(out.contains('\u{1b}'));
    }

    #[test]
    fn test_tier_colour_mapping() {
        assert_eq!(tier_color(Tier::High), Color::Green);
        assert_eq!(tier_color(Tier::Medium), Color::Yellow);
        assert_eq!(tier_color(Tier::Low), Color::Red);
    }

    #[test]
    fn test_empty_view_renders_empty_string() {
        let out = TerminalRenderer::new(false)
            .render(&ReportView { tables: vec![] })
            .unwrap();
        assert!(out.is_empty());
    }
}
