//! 运行配置

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// 每步一行 `Take ... from ... to ...`
    #[default]
    Plain,
    /// 表格
    Table,
    /// JSON 文档
    Json,
}

/// 一次求解运行的配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// 边列表文件
    pub input: PathBuf,
    /// 起点名称（缺省为第一个顶点）
    pub start: Option<String>,
    /// 求开放路线（终点可以不同于起点）
    pub open: bool,
    /// 开放路线时尝试所有起点
    pub best_start: bool,
    pub format: OutputFormat,
    /// 按路线颜色给标签着色
    pub color: bool,
    /// 代价按分钟显示为小时和分钟
    pub minutes: bool,
    /// 路线之后打印求解统计
    pub stats: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("edges.txt"),
            start: None,
            open: false,
            best_start: false,
            format: OutputFormat::Plain,
            color: true,
            minutes: false,
            stats: false,
        }
    }
}
