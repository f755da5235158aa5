//! 边列表导入模块
//!
//! 每行一条弧：`起点, 终点, 名称, 代价, 颜色`。空行和以 `#` 开头的行被忽略，
//! 顶点按首次出现的顺序编号。

use crate::algorithm::OpenPostman;
use crate::error::{Error, Result};
use crate::graph::Postman;
use crate::types::{Cost, VertexId};
use csv::{ReaderBuilder, StringRecord, Trim};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Instant;
use tracing::debug;

/// 每行的字段数
const FIELDS: usize = 5;

/// 导入统计
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ImportStats {
    pub vertices_imported: usize,
    pub arcs_imported: usize,
    pub lines_skipped: usize,
    pub duration_ms: u64,
}

/// 一条已解析的弧
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub from: VertexId,
    pub to: VertexId,
    pub label: String,
    pub cost: Cost,
    pub color: String,
}

/// 顶点名称表，缺失时用编号显示
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VertexNames {
    names: Vec<String>,
}

impl VertexNames {
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    /// 顶点的显示名称
    pub fn display(&self, vertex: VertexId) -> String {
        self.names
            .get(vertex)
            .cloned()
            .unwrap_or_else(|| vertex.to_string())
    }

    /// 按名称查找顶点，名称也可以直接是编号
    pub fn lookup(&self, name: &str) -> Option<VertexId> {
        self.names
            .iter()
            .position(|n| n == name)
            .or_else(|| name.parse().ok())
    }
}

/// 解析后的边列表
#[derive(Debug, Clone, Default)]
pub struct EdgeList {
    /// 顶点名称 -> 编号（插入顺序即编号）
    vertices: IndexMap<String, VertexId>,
    /// 弧名称 -> 弧记录
    records: IndexMap<String, EdgeRecord>,
    stats: ImportStats,
}

impl EdgeList {
    /// 从文件读取
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// 从字符串解析
    pub fn parse(input: &str) -> Result<Self> {
        Self::from_reader(input.as_bytes())
    }

    /// 从任意输入流解析
    pub fn from_reader<R: Read>(input: R) -> Result<Self> {
        let start = Instant::now();
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .comment(Some(b'#'))
            .trim(Trim::All)
            .flexible(true)
            .from_reader(input);

        let mut list = Self::default();
        for record in reader.records() {
            let record = record?;
            if is_blank_or_comment(&record) {
                list.stats.lines_skipped += 1;
                continue;
            }
            list.push_record(&record)?;
        }

        list.stats.vertices_imported = list.vertices.len();
        list.stats.arcs_imported = list.records.len();
        list.stats.duration_ms = start.elapsed().as_millis() as u64;
        debug!(
            vertices = list.stats.vertices_imported,
            arcs = list.stats.arcs_imported,
            "边列表导入完成"
        );
        Ok(list)
    }

    fn push_record(&mut self, record: &StringRecord) -> Result<()> {
        let line = record.position().map_or(0, |p| p.line());
        if record.len() != FIELDS {
            return Err(Error::ParseError(format!(
                "第 {} 行格式错误 (必须是 {} 个逗号分隔的字段): {}",
                line,
                FIELDS,
                record.iter().collect::<Vec<_>>().join(",")
            )));
        }

        let label = record[2].to_string();
        let cost: Cost = record[3].parse().map_err(|e| {
            Error::ParseError(format!("第 {} 行代价无效 '{}': {}", line, &record[3], e))
        })?;
        if self.records.contains_key(&label) {
            return Err(Error::DuplicateLabel(label));
        }

        let from = self.vertex_id(&record[0]);
        let to = self.vertex_id(&record[1]);
        self.records.insert(
            label.clone(),
            EdgeRecord {
                from,
                to,
                label,
                cost,
                color: record[4].to_string(),
            },
        );
        Ok(())
    }

    fn vertex_id(&mut self, name: &str) -> VertexId {
        let next = self.vertices.len();
        *self.vertices.entry(name.to_string()).or_insert(next)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn arc_count(&self) -> usize {
        self.records.len()
    }

    /// 所有弧（文件顺序）
    pub fn records(&self) -> impl Iterator<Item = &EdgeRecord> {
        self.records.values()
    }

    /// 弧的颜色
    pub fn color_of(&self, label: &str) -> Option<&str> {
        self.records.get(label).map(|r| r.color.as_str())
    }

    /// 顶点编号
    pub fn vertex(&self, name: &str) -> Option<VertexId> {
        self.vertices.get(name).copied()
    }

    /// 顶点名称表
    pub fn vertex_names(&self) -> VertexNames {
        VertexNames::new(self.vertices.keys().cloned().collect())
    }

    pub fn stats(&self) -> &ImportStats {
        &self.stats
    }

    /// 构建闭合路线问题
    pub fn to_postman(&self) -> Result<Postman> {
        let mut g = Postman::new(self.vertex_count())?;
        for r in self.records() {
            g.add_arc(r.label.as_str(), r.from, r.to, r.cost)?;
        }
        Ok(g)
    }

    /// 构建开放路线问题
    pub fn to_open_postman(&self) -> Result<OpenPostman> {
        let mut g = OpenPostman::new(self.vertex_count())?;
        for r in self.records() {
            g.add_arc(r.label.as_str(), r.from, r.to, r.cost)?;
        }
        Ok(g)
    }
}

/// 只含空白的行，或第一个非空字符是 `#` 的行
fn is_blank_or_comment(record: &StringRecord) -> bool {
    match record.get(0) {
        None => true,
        Some(first) if first.starts_with('#') => true,
        Some(first) => first.is_empty() && record.len() == 1,
    }
}
