//! 待求解的有向多重图
//!
//! 逐条插入弧，同时维护顶点不平衡度、标签栈和直接弧代价矩阵

use super::edge::ArcSpec;
use super::index::LabelIndex;
use crate::algorithm::PathMatrix;
use crate::error::{Error, Result};
use crate::types::{Cost, Matrix, VertexId};

/// 中国邮递员问题的输入图
///
/// 构建完成后调用 [`Postman::solve`]，图被消耗并得到 [`crate::Solution`]。
#[derive(Debug, Clone)]
pub struct Postman {
    /// 顶点数
    pub(crate) n: usize,
    /// 出度 - 入度
    pub(crate) delta: Vec<i64>,
    /// 顶点对之间的标签栈
    pub(crate) labels: LabelIndex,
    /// 直接弧代价（求解后为最短路径）
    pub(crate) paths: PathMatrix,
    /// 顶点对之间最便宜直接弧在 `arc_list` 中的下标
    pub(crate) cheapest: Matrix<Option<usize>>,
    /// 所有弧（按插入顺序）
    pub(crate) arc_list: Vec<ArcSpec>,
    /// 每条弧各走一次的总代价
    pub(crate) basic_cost: Cost,
}

impl Postman {
    /// 创建有 `vertices` 个顶点、没有弧的图
    pub fn new(vertices: usize) -> Result<Self> {
        if vertices == 0 {
            return Err(Error::EmptyGraph);
        }
        let n = vertices;
        Ok(Self {
            n,
            delta: vec![0; n],
            labels: LabelIndex::new(n),
            paths: PathMatrix::new(n),
            cheapest: Matrix::new(n, None),
            arc_list: Vec::new(),
            basic_cost: 0.0,
        })
    }

    /// 添加弧 `u -> v`
    pub fn add_arc(
        &mut self,
        label: impl Into<String>,
        u: VertexId,
        v: VertexId,
        cost: Cost,
    ) -> Result<&mut Self> {
        let label = label.into();
        self.check_vertex(u)?;
        self.check_vertex(v)?;
        if !cost.is_finite() {
            return Err(Error::InvalidCost { label, cost });
        }
        self.labels.push(u, v, &label)?;

        let index = self.arc_list.len();
        self.arc_list.push(ArcSpec::new(label, u, v, cost));
        self.basic_cost += cost;
        if self.paths.add_direct(u, v, cost) {
            self.cheapest.set(u, v, Some(index));
        }
        self.delta[u] += 1;
        self.delta[v] -= 1;
        Ok(self)
    }

    /// 添加一条 [`ArcSpec`]
    pub fn add(&mut self, arc: &ArcSpec) -> Result<&mut Self> {
        self.add_arc(arc.label(), arc.src(), arc.dst(), arc.cost())
    }

    fn check_vertex(&self, vertex: VertexId) -> Result<()> {
        if vertex >= self.n {
            return Err(Error::VertexOutOfRange {
                vertex,
                count: self.n,
            });
        }
        Ok(())
    }

    /// 顶点数
    pub fn vertex_count(&self) -> usize {
        self.n
    }

    /// 弧数
    pub fn arc_count(&self) -> usize {
        self.arc_list.len()
    }

    /// 所有弧（按插入顺序）
    pub fn arcs(&self) -> &[ArcSpec] {
        &self.arc_list
    }

    /// 每条弧各走一次的总代价
    pub fn basic_cost(&self) -> Cost {
        self.basic_cost
    }

    /// 顶点的出度 - 入度
    pub fn delta(&self, vertex: VertexId) -> i64 {
        self.delta[vertex]
    }

    /// 所有顶点的不平衡度
    pub fn deltas(&self) -> &[i64] {
        &self.delta
    }
}
