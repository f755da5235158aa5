//! 顶点不平衡分析

use crate::types::VertexId;
use serde::{Deserialize, Serialize};

/// 按不平衡度划分的顶点集合（均按顶点编号递增）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Imbalance {
    /// 入度多于出度的顶点（delta < 0）
    pub deficit: Vec<VertexId>,
    /// 出度多于入度的顶点（delta > 0）
    pub surplus: Vec<VertexId>,
}

impl Imbalance {
    /// 根据 `delta` 划分顶点
    pub fn analyze(delta: &[i64]) -> Self {
        let mut imbalance = Self::default();
        for (vertex, &d) in delta.iter().enumerate() {
            if d < 0 {
                imbalance.deficit.push(vertex);
            } else if d > 0 {
                imbalance.surplus.push(vertex);
            }
        }
        imbalance
    }

    /// 图已经是欧拉图
    pub fn is_balanced(&self) -> bool {
        self.deficit.is_empty() && self.surplus.is_empty()
    }

    /// 需要补足的额外遍历总数
    pub fn total_deficit(&self, delta: &[i64]) -> i64 {
        self.deficit.iter().map(|&v| -delta[v]).sum()
    }
}
