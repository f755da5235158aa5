//! 弧定义
//!
//! 有向、带标签、带代价的弧，允许平行弧

use crate::types::{Cost, VertexId};
use serde::{Deserialize, Serialize};

/// 弧
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArcSpec {
    /// 弧标签（全图唯一）
    label: String,
    /// 源顶点
    src: VertexId,
    /// 目标顶点
    dst: VertexId,
    /// 代价
    cost: Cost,
}

impl ArcSpec {
    /// 创建新弧
    pub fn new(label: impl Into<String>, src: VertexId, dst: VertexId, cost: Cost) -> Self {
        Self {
            label: label.into(),
            src,
            dst,
            cost,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn src(&self) -> VertexId {
        self.src
    }

    pub fn dst(&self) -> VertexId {
        self.dst
    }

    pub fn cost(&self) -> Cost {
        self.cost
    }
}
