//! 全源最短路径
//!
//! Floyd-Warshall 算法，同时维护下一跳指针；遇到负环立即停止

use crate::error::{Error, Result};
use crate::types::{Cost, Matrix, VertexId};
use tracing::trace;

/// 舍入误差容限（相对于最大弧代价与顶点数之积）
const RELATIVE_TOLERANCE: Cost = 1e-9;

/// 松弛结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relaxation {
    /// 全部松弛完成
    Complete,
    /// 发现经过该顶点的负环，矩阵只计算了一部分
    NegativeCycle(VertexId),
}

/// 最短路径矩阵
///
/// 初始时保存最便宜的直接弧代价，[`PathMatrix::compute`] 之后保存最短路径代价。
/// `next(i, j)` 是从 `i` 沿最短路径走向 `j` 的下一个顶点。
#[derive(Debug, Clone)]
pub struct PathMatrix {
    /// 顶点数
    n: usize,
    /// 顶点对之间是否存在路径
    defined: Matrix<bool>,
    /// 最便宜的弧或路径代价
    cost: Matrix<Cost>,
    /// 下一跳
    next: Matrix<VertexId>,
    /// 直接弧代价绝对值的最大值
    scale: Cost,
}

impl PathMatrix {
    /// 创建空矩阵（没有任何直接弧）
    pub fn new(n: usize) -> Self {
        Self {
            n,
            defined: Matrix::new(n, false),
            cost: Matrix::new(n, 0.0),
            next: Matrix::new(n, 0),
            scale: 0.0,
        }
    }

    /// 顶点数
    pub fn vertex_count(&self) -> usize {
        self.n
    }

    /// 记录一条直接弧
    ///
    /// 当它成为 `(u, v)` 之间最便宜的直接弧时返回 `true`。
    pub fn add_direct(&mut self, u: VertexId, v: VertexId, cost: Cost) -> bool {
        if self.defined.at(u, v) && self.cost.at(u, v) <= cost {
            return false;
        }
        self.cost.set(u, v, cost);
        self.defined.set(u, v, true);
        self.next.set(u, v, v);
        self.scale = self.scale.max(cost.abs());
        true
    }

    /// 浮点比较容限，随代价规模和顶点数增长
    ///
    /// 改进幅度不超过容限的松弛被忽略，代价高于 `-tolerance` 的环不算负环。
    pub fn tolerance(&self) -> Cost {
        RELATIVE_TOLERANCE * self.scale * self.n as Cost
    }

    /// 代价在容限之外为负
    pub fn is_negative(&self, cost: Cost) -> bool {
        cost < -self.tolerance()
    }

    /// 计算所有顶点对之间的最短路径
    ///
    /// 一旦某个对角线元素变为负数就停止。
    pub fn compute(&mut self) -> Relaxation {
        let n = self.n;
        let tolerance = self.tolerance();
        for k in 0..n {
            for i in 0..n {
                if !self.defined.at(i, k) {
                    continue;
                }
                for j in 0..n {
                    if !self.defined.at(k, j) {
                        continue;
                    }
                    let via = self.cost.at(i, k) + self.cost.at(k, j);
                    if self.defined.at(i, j) && self.cost.at(i, j) <= via + tolerance {
                        continue;
                    }
                    let hop = self.next.at(i, k);
                    self.next.set(i, j, hop);
                    self.cost.set(i, j, via);
                    self.defined.set(i, j, true);
                    if i == j && via < -tolerance {
                        trace!(vertex = i, cost = via, "发现负环，停止松弛");
                        return Relaxation::NegativeCycle(i);
                    }
                }
            }
        }
        Relaxation::Complete
    }

    /// 检查负环和强连通性
    ///
    /// 负环优先：松弛提前停止时矩阵并不完整，缺失的路径没有意义。
    /// 连通性按行优先顺序扫描，报告第一个没有路径的顶点对。
    pub fn check_valid(&self) -> Result<()> {
        if let Some(vertex) = self.first_negative_diagonal() {
            return Err(Error::NegativeCycle { vertex });
        }
        for i in 0..self.n {
            if let Some(j) = (0..self.n).find(|&j| !self.defined.at(i, j)) {
                return Err(Error::NotStronglyConnected { from: i, to: j });
            }
        }
        Ok(())
    }

    /// 按顶点编号递增顺序找到第一个对角线为负的顶点
    pub fn first_negative_diagonal(&self) -> Option<VertexId> {
        (0..self.n).find(|&i| self.defined.at(i, i) && self.is_negative(self.cost.at(i, i)))
    }

    pub fn is_defined(&self, i: VertexId, j: VertexId) -> bool {
        self.defined.at(i, j)
    }

    pub fn cost(&self, i: VertexId, j: VertexId) -> Cost {
        self.cost.at(i, j)
    }

    pub fn next(&self, i: VertexId, j: VertexId) -> VertexId {
        self.next.at(i, j)
    }

    /// 沿下一跳指针展开 `from` 到 `to` 的路径（包含两端）
    ///
    /// `from == to` 时展开的是经过该顶点的最便宜环。
    pub fn hops(&self, from: VertexId, to: VertexId) -> Option<Vec<VertexId>> {
        if !self.defined.at(from, to) {
            return None;
        }
        let mut vertices = vec![from];
        let mut u = from;
        loop {
            u = self.next.at(u, to);
            vertices.push(u);
            if u == to {
                return Some(vertices);
            }
            if vertices.len() > self.n + 1 {
                return None;
            }
        }
    }
}
