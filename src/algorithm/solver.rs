//! 中国邮递员问题求解流程
//!
//! 最短路径 -> 不平衡分析 -> 初始可行流 -> 负环消除

use super::cycle_cancel::CycleCanceler;
use super::feasible::feasible_flow;
use super::imbalance::Imbalance;
use super::shortest_path::PathMatrix;
use super::tour::Tour;
use crate::error::{Error, Result};
use crate::graph::{ArcSpec, Postman};
use crate::metrics::{PhaseTimer, SolveStats};
use crate::types::{Cost, Flow, Matrix, VertexId};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// 一条需要额外走 `count` 次的最短路径
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtraPath {
    pub from: VertexId,
    pub to: VertexId,
    pub count: Flow,
    /// 单次路径代价
    pub cost: Cost,
}

/// 求解结果
///
/// 持有最短路径矩阵和最小代价额外流，可从任意起点重建路线。
#[derive(Debug, Clone)]
pub struct Solution {
    pub(crate) graph: Postman,
    pub(crate) imbalance: Imbalance,
    /// `f[i][j]`：从 i 到 j 的最短路径需要额外走的次数
    pub(crate) flow: Matrix<Flow>,
    phi: Cost,
    stats: SolveStats,
}

impl Postman {
    /// 求解，图被消耗
    pub fn solve(mut self) -> Result<Solution> {
        let mut timer = PhaseTimer::new();
        debug!(
            vertices = self.n,
            arcs = self.arc_list.len(),
            "开始求解"
        );

        self.paths.compute();
        self.paths.check_valid()?;
        let shortest_path_ms = timer.lap();

        let imbalance = Imbalance::analyze(&self.delta);
        let (flow, initial_phi, cycles_cancelled) = if imbalance.is_balanced() {
            debug!("图已平衡，无需额外路径");
            (Matrix::new(self.n, 0), 0.0, 0)
        } else {
            debug!(
                deficit = imbalance.deficit.len(),
                surplus = imbalance.surplus.len(),
                extra = imbalance.total_deficit(&self.delta),
                "构造初始可行流"
            );
            let mut flow = feasible_flow(&self.delta, &imbalance);
            let initial_phi = phi(&self.paths, &flow);
            let cancelled = CycleCanceler::new(&self.paths, &imbalance).optimize(&mut flow);
            (flow, initial_phi, cancelled)
        };
        let optimization_ms = timer.lap();

        let final_phi = phi(&self.paths, &flow);
        let stats = SolveStats {
            vertices: self.n,
            arcs: self.arc_list.len(),
            deficit_vertices: imbalance.deficit.len(),
            surplus_vertices: imbalance.surplus.len(),
            initial_phi,
            final_phi,
            cycles_cancelled,
            extra_traversals: flow.iter().map(|(_, _, &f)| f).sum(),
            shortest_path_ms,
            optimization_ms,
            total_ms: timer.total(),
        };
        info!(
            cost = self.basic_cost + final_phi,
            basic_cost = self.basic_cost,
            phi = final_phi,
            cycles_cancelled,
            "求解完成"
        );

        Ok(Solution {
            graph: self,
            imbalance,
            flow,
            phi: final_phi,
            stats,
        })
    }
}

/// 额外路径的总代价 `Σ c[i][j] * f[i][j]`
fn phi(paths: &PathMatrix, flow: &Matrix<Flow>) -> Cost {
    flow.iter()
        .filter(|(_, _, &f)| f != 0)
        .map(|(i, j, &f)| paths.cost(i, j) * f as Cost)
        .sum()
}

impl Solution {
    /// 路线总代价
    pub fn cost(&self) -> Cost {
        self.graph.basic_cost + self.phi
    }

    /// 额外路径的代价
    pub fn phi(&self) -> Cost {
        self.phi
    }

    /// 每条弧各走一次的代价
    pub fn basic_cost(&self) -> Cost {
        self.graph.basic_cost
    }

    /// 从 `start` 出发的路线
    pub fn tour(&self, start: VertexId) -> Result<Tour<'_>> {
        if start >= self.graph.n {
            return Err(Error::VertexOutOfRange {
                vertex: start,
                count: self.graph.n,
            });
        }
        Ok(Tour::new(self, start))
    }

    /// 求解统计
    pub fn stats(&self) -> &SolveStats {
        &self.stats
    }

    /// 原图已经是欧拉图
    pub fn is_eulerian(&self) -> bool {
        self.imbalance.is_balanced()
    }

    // ==================== 只读查询 ====================

    pub fn vertex_count(&self) -> usize {
        self.graph.n
    }

    pub fn arc_count(&self) -> usize {
        self.graph.arc_list.len()
    }

    /// 原图的所有弧
    pub fn arcs(&self) -> &[ArcSpec] {
        &self.graph.arc_list
    }

    /// 顶点的出度 - 入度
    pub fn delta(&self, vertex: VertexId) -> i64 {
        self.graph.delta[vertex]
    }

    /// 亏缺顶点（编号递增）
    pub fn deficit(&self) -> &[VertexId] {
        &self.imbalance.deficit
    }

    /// 盈余顶点（编号递增）
    pub fn surplus(&self) -> &[VertexId] {
        &self.imbalance.surplus
    }

    /// 最短路径代价
    pub fn path_cost(&self, from: VertexId, to: VertexId) -> Cost {
        self.graph.paths.cost(from, to)
    }

    /// 最短路径上的下一跳
    pub fn next_hop(&self, from: VertexId, to: VertexId) -> VertexId {
        self.graph.paths.next(from, to)
    }

    /// 最短路径经过的顶点（包含两端）
    pub fn path_between(&self, from: VertexId, to: VertexId) -> Option<Vec<VertexId>> {
        self.graph.paths.hops(from, to)
    }

    /// `f[from][to]`
    pub fn extra_flow(&self, from: VertexId, to: VertexId) -> Flow {
        self.flow.at(from, to)
    }

    /// 所有非零的额外路径（行优先）
    pub fn extra_paths(&self) -> Vec<ExtraPath> {
        self.flow
            .iter()
            .filter(|(_, _, &count)| count > 0)
            .map(|(from, to, &count)| ExtraPath {
                from,
                to,
                count,
                cost: self.graph.paths.cost(from, to),
            })
            .collect()
    }

    /// `from -> to` 之间最便宜直接弧的标签
    pub fn cheapest_label(&self, from: VertexId, to: VertexId) -> Option<&str> {
        self.graph
            .cheapest
            .at(from, to)
            .map(|index| self.graph.arc_list[index].label())
    }

    /// `from -> to` 之间所有平行弧的标签（按插入顺序）
    pub fn labels(&self, from: VertexId, to: VertexId) -> &[String] {
        self.graph.labels.labels(from, to)
    }
}
