//! 结果打印器
//!
//! 提供逐行、表格和 JSON 三种路线输出

use crate::algorithm::TourStep;
use crate::config::{OutputFormat, RunConfig};
use crate::error::Result;
use crate::import::VertexNames;
use crate::metrics::SolveStats;
use crate::types::Cost;
use colored::{Color, Colorize};
use prettytable::{format, row, Cell, Row, Table};
use serde::Serialize;
use std::collections::HashMap;

/// JSON 输出中的一步
#[derive(Serialize)]
struct JsonStep<'a> {
    label: &'a str,
    from: String,
    to: String,
}

#[derive(Serialize)]
struct JsonTour<'a> {
    cost: Cost,
    steps: Vec<JsonStep<'a>>,
}

/// 结果打印器
pub struct Printer {
    format: OutputFormat,
    color: bool,
    minutes: bool,
    names: VertexNames,
    /// 路线名称 -> 颜色
    colors: HashMap<String, String>,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new(OutputFormat::Plain)
    }
}

impl Printer {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            color: false,
            minutes: false,
            names: VertexNames::default(),
            colors: HashMap::new(),
        }
    }

    pub fn from_config(config: &RunConfig) -> Self {
        Self {
            color: config.color,
            minutes: config.minutes,
            ..Self::new(config.format)
        }
    }

    /// 顶点显示名称
    pub fn with_names(mut self, names: VertexNames) -> Self {
        self.names = names;
        self
    }

    /// 路线颜色
    pub fn with_colors<I>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.colors.extend(colors);
        self
    }

    /// 打印整条路线和总代价
    pub fn print_tour(&self, steps: &[TourStep<'_>], cost: Cost) -> Result<String> {
        let output = match self.format {
            OutputFormat::Plain => self.format_plain(steps, cost),
            OutputFormat::Table => self.format_table(steps, cost),
            OutputFormat::Json => self.format_json(steps, cost)?,
        };
        Ok(output)
    }

    /// 单步：`Take <label> from <from> to <to>`
    pub fn format_step(&self, step: &TourStep<'_>) -> String {
        format!(
            "Take {} from {} to {}",
            self.label(step.label),
            self.names.display(step.from),
            self.names.display(step.to)
        )
    }

    /// 总代价，按分钟显示时折算为小时和分钟
    pub fn format_cost(&self, cost: Cost) -> String {
        if self.minutes {
            let minutes = cost.round() as i64;
            format!(
                "Total time: {} hour(s) and {} minute(s)",
                minutes / 60,
                minutes % 60
            )
        } else {
            format!("Total cost: {}", cost)
        }
    }

    fn label(&self, label: &str) -> String {
        if !self.color {
            return label.to_string();
        }
        match self
            .colors
            .get(label)
            .and_then(|c| c.parse::<Color>().ok())
        {
            Some(color) => label.color(color).to_string(),
            None => label.to_string(),
        }
    }

    fn format_plain(&self, steps: &[TourStep<'_>], cost: Cost) -> String {
        let mut output = format!("{}\n\n", self.format_cost(cost));
        for step in steps {
            output.push_str(&self.format_step(step));
            output.push('\n');
        }
        output
    }

    fn format_table(&self, steps: &[TourStep<'_>], cost: Cost) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);
        table.set_titles(row!["#", "Trail", "From", "To"]);

        for (i, step) in steps.iter().enumerate() {
            table.add_row(Row::new(vec![
                Cell::new(&(i + 1).to_string()),
                Cell::new(&self.label(step.label)),
                Cell::new(&self.names.display(step.from)),
                Cell::new(&self.names.display(step.to)),
            ]));
        }

        format!(
            "{}\n{} step(s), {}\n",
            table,
            steps.len(),
            self.format_cost(cost)
        )
    }

    fn format_json(&self, steps: &[TourStep<'_>], cost: Cost) -> Result<String> {
        let doc = JsonTour {
            cost,
            steps: steps
                .iter()
                .map(|s| JsonStep {
                    label: s.label,
                    from: self.names.display(s.from),
                    to: self.names.display(s.to),
                })
                .collect(),
        };
        Ok(serde_json::to_string_pretty(&doc)?)
    }

    /// 打印求解统计
    pub fn print_stats(&self, stats: &SolveStats) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);
        table.set_titles(row!["Property", "Value"]);
        table.add_row(row!["Vertex Count", stats.vertices.to_string()]);
        table.add_row(row!["Arc Count", stats.arcs.to_string()]);
        table.add_row(row!["Deficit Vertices", stats.deficit_vertices.to_string()]);
        table.add_row(row!["Surplus Vertices", stats.surplus_vertices.to_string()]);
        table.add_row(row!["Initial Extra Cost", stats.initial_phi.to_string()]);
        table.add_row(row!["Final Extra Cost", stats.final_phi.to_string()]);
        table.add_row(row!["Improvement", stats.improvement().to_string()]);
        table.add_row(row!["Cycles Cancelled", stats.cycles_cancelled.to_string()]);
        table.add_row(row!["Extra Traversals", stats.extra_traversals.to_string()]);
        table.add_row(row!["Total Time (ms)", format!("{:.3}", stats.total_ms)]);
        table.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn steps() -> Vec<TourStep<'static>> {
        vec![
            TourStep {
                label: "Lift A",
                from: 0,
                to: 1,
            },
            TourStep {
                label: "Run B",
                from: 1,
                to: 0,
            },
        ]
    }

    fn names() -> VertexNames {
        VertexNames::new(vec!["Base".to_string(), "Summit".to_string()])
    }

    #[test]
    fn test_plain_output() {
        let printer = Printer::new(OutputFormat::Plain).with_names(names());
        let output = printer.print_tour(&steps(), 12.0).unwrap();

        assert!(output.starts_with("Total cost: 12\n"));
        assert!(output.contains("Take Lift A from Base to Summit\n"));
        assert!(output.ends_with("Take Run B from Summit to Base\n"));
    }

    #[test]
    fn test_numeric_names_without_table() {
        let printer = Printer::default();
        assert_eq!(printer.format_step(&steps()[0]), "Take Lift A from 0 to 1");
    }

    #[test]
    fn test_minutes_display() {
        let config = RunConfig {
            minutes: true,
            color: false,
            ..Default::default()
        };
        let printer = Printer::from_config(&config);
        assert_eq!(
            printer.format_cost(134.6),
            "Total time: 2 hour(s) and 15 minute(s)"
        );
    }

    #[test]
    fn test_color_disabled_keeps_label() {
        let printer = Printer::new(OutputFormat::Plain)
            .with_colors(vec![("Lift A".to_string(), "blue".to_string())]);
        assert_eq!(printer.format_step(&steps()[0]), "Take Lift A from 0 to 1");
    }

    #[test]
    fn test_table_output() {
        let printer = Printer::new(OutputFormat::Table).with_names(names());
        let output = printer.print_tour(&steps(), 3.0).unwrap();

        assert!(output.contains("Trail"));
        assert!(output.contains("Summit"));
        assert!(output.contains("2 step(s), Total cost: 3"));
    }

    #[test]
    fn test_json_output() {
        let printer = Printer::new(OutputFormat::Json).with_names(names());
        let output = printer.print_tour(&steps(), 3.5).unwrap();

        let doc: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(doc["cost"], 3.5);
        assert_eq!(doc["steps"][0]["label"], "Lift A");
        assert_eq!(doc["steps"][1]["from"], "Summit");
    }

    #[test]
    fn test_stats_table() {
        let stats = SolveStats {
            vertices: 4,
            initial_phi: 9.0,
            final_phi: 5.5,
            cycles_cancelled: 2,
            ..Default::default()
        };
        let output = Printer::default().print_stats(&stats);
        assert!(output.contains("Vertex Count"));
        assert!(output.contains("Cycles Cancelled"));
        assert!(output.contains("3.5"));
    }
}
