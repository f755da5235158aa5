//! 错误类型定义

use crate::types::{Cost, VertexId};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("图为空: 顶点数必须大于 0")]
    EmptyGraph,

    #[error("顶点 {vertex} 超出范围 (顶点数 {count})")]
    VertexOutOfRange { vertex: VertexId, count: usize },

    #[error("弧 {label} 的代价无效: {cost}")]
    InvalidCost { label: String, cost: Cost },

    #[error("重复的弧标签: {0}")]
    DuplicateLabel(String),

    #[error("图不是强连通的: 顶点 {from} 与 {to} 之间没有路径")]
    NotStronglyConnected { from: VertexId, to: VertexId },

    #[error("图中存在负环 (经过顶点 {vertex})")]
    NegativeCycle { vertex: VertexId },

    #[error("图中存在负代价弧: {label} ({cost})")]
    NegativeCost { label: String, cost: Cost },

    #[error("解析错误: {0}")]
    ParseError(String),

    #[error("IO 错误: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV 错误: {0}")]
    CsvError(#[from] csv::Error),

    #[error("序列化错误: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::SerializationError(err.to_string())
    }
}
