//! 弧标签索引
//!
//! 按有序顶点对保存平行弧标签，后插入的标签先被消耗

use crate::error::{Error, Result};
use crate::types::{Matrix, VertexId};
use smallvec::SmallVec;
use std::collections::HashSet;

/// 单个顶点对上的标签栈（大多数顶点对只有一条弧）
pub type LabelStack = SmallVec<[String; 1]>;

/// 标签索引
#[derive(Debug, Clone)]
pub struct LabelIndex {
    /// (src, dst) 到标签栈的映射
    stacks: Matrix<LabelStack>,
    /// 已使用的标签
    seen: HashSet<String>,
}

impl LabelIndex {
    /// 创建新索引
    pub fn new(vertex_count: usize) -> Self {
        Self {
            stacks: Matrix::new(vertex_count, LabelStack::new()),
            seen: HashSet::new(),
        }
    }

    /// 压入标签，标签重复时报错
    pub fn push(&mut self, src: VertexId, dst: VertexId, label: &str) -> Result<()> {
        if !self.seen.insert(label.to_string()) {
            return Err(Error::DuplicateLabel(label.to_string()));
        }
        self.stacks.get_mut(src, dst).push(label.to_string());
        Ok(())
    }

    /// 顶点对上的全部标签（按插入顺序）
    pub fn labels(&self, src: VertexId, dst: VertexId) -> &[String] {
        self.stacks.get(src, dst)
    }

    /// 新的游标，所有平行弧都尚未走过
    pub fn cursor(&self) -> LabelCursor<'_> {
        let mut remaining = Matrix::new(self.stacks.size(), 0);
        for (src, dst, stack) in self.stacks.iter() {
            remaining.set(src, dst, stack.len());
        }
        LabelCursor {
            index: self,
            remaining,
        }
    }

    /// 标签总数
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// 一次路线重建中尚未走过的平行弧
///
/// 索引本身不变，同一个索引可以同时有多个游标。
#[derive(Debug, Clone)]
pub struct LabelCursor<'a> {
    index: &'a LabelIndex,
    /// 每个顶点对上剩余的弧数
    remaining: Matrix<usize>,
}

impl<'a> LabelCursor<'a> {
    /// `src -> dst` 上尚未走过的弧数
    pub fn remaining(&self, src: VertexId, dst: VertexId) -> usize {
        self.remaining.at(src, dst)
    }

    /// 弹出 `src -> dst` 上最后插入且尚未走过的标签
    pub fn pop(&mut self, src: VertexId, dst: VertexId) -> Option<&'a str> {
        let index: &'a LabelIndex = self.index;
        let count = self.remaining.get_mut(src, dst);
        if *count == 0 {
            return None;
        }
        *count -= 1;
        index.stacks.get(src, dst).get(*count).map(String::as_str)
    }
}
