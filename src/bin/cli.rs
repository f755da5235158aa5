//! Postman CLI 工具
//!
//! 读取边列表，求解并打印路线

use anyhow::{anyhow, Context};
use clap::Parser;
use postman::algorithm::TourStep;
use postman::cli::Printer;
use postman::{EdgeList, OutputFormat, RunConfig};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "postman-cli")]
#[command(about = "有向中国邮递员问题求解器", version)]
struct Args {
    /// 边列表文件（每行: 起点, 终点, 名称, 代价, 颜色）
    input: PathBuf,

    /// 起点名称，缺省为文件中出现的第一个顶点
    #[arg(short, long)]
    start: Option<String>,

    /// 求开放路线（不必回到起点）
    #[arg(short, long)]
    open: bool,

    /// 开放路线时尝试所有起点
    #[arg(short, long, requires = "open")]
    best_start: bool,

    /// 输出格式
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Plain)]
    format: OutputFormat,

    /// 关闭颜色输出
    #[arg(long)]
    no_color: bool,

    /// 代价按分钟显示
    #[arg(short, long)]
    minutes: bool,

    /// 路线之后打印求解统计
    #[arg(long)]
    stats: bool,

    /// 输出更多日志（可重复）
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl From<Args> for RunConfig {
    fn from(args: Args) -> Self {
        Self {
            input: args.input,
            start: args.start,
            open: args.open,
            best_start: args.best_start,
            format: args.format,
            color: !args.no_color,
            minutes: args.minutes,
            stats: args.stats,
        }
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);
    let config = RunConfig::from(args);

    if !config.color {
        colored::control::set_override(false);
    }

    let edges = EdgeList::from_path(&config.input)
        .with_context(|| format!("无法读取边列表 {}", config.input.display()))?;
    info!(
        vertices = edges.vertex_count(),
        arcs = edges.arc_count(),
        "边列表已加载"
    );

    let names = edges.vertex_names();
    let start = match &config.start {
        Some(name) => names
            .lookup(name)
            .filter(|&v| v < edges.vertex_count())
            .ok_or_else(|| anyhow!("未知的起点: {}", name))?,
        None => 0,
    };

    let colors = edges
        .records()
        .map(|r| (r.label.clone(), r.color.clone()))
        .collect::<Vec<_>>();
    let printer = Printer::from_config(&config)
        .with_names(names)
        .with_colors(colors);

    let (output, stats) = if config.open {
        let problem = edges.to_open_postman()?;
        let solution = if config.best_start {
            problem.solve_best()?
        } else {
            problem.solve_from(start)?
        };
        let steps: Vec<TourStep<'_>> = solution.tour().collect();
        (
            printer.print_tour(&steps, solution.cost())?,
            solution.closed().stats().clone(),
        )
    } else {
        let solution = edges.to_postman()?.solve()?;
        let steps: Vec<TourStep<'_>> = solution.tour(start)?.collect();
        (
            printer.print_tour(&steps, solution.cost())?,
            solution.stats().clone(),
        )
    };

    print!("{}", output);
    if config.stats {
        print!("\n{}", printer.print_stats(&stats));
    }
    Ok(())
}
