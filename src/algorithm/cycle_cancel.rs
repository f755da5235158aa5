//! 负环消除
//!
//! 在残量网络上反复寻找负环并沿环调整流量，直到不存在负环，此时流的代价最小

use super::imbalance::Imbalance;
use super::shortest_path::PathMatrix;
use crate::types::{Flow, Matrix, VertexId};
use tracing::{debug, trace, warn};

/// 单轮消环的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Improvement {
    /// 消去了经过 `vertex` 的负环，调整量为 `amount`
    Cancelled {
        vertex: VertexId,
        amount: Flow,
        hops: usize,
    },
    /// 残量网络中没有负环，当前流最优
    Optimal,
    /// 找到负环但走出的环无法降低代价
    Stalled { vertex: VertexId },
}

/// 负环消除优化器
pub struct CycleCanceler<'a> {
    /// 原图的最短路径
    paths: &'a PathMatrix,
    /// 不平衡顶点划分
    imbalance: &'a Imbalance,
}

impl<'a> CycleCanceler<'a> {
    pub fn new(paths: &'a PathMatrix, imbalance: &'a Imbalance) -> Self {
        Self { paths, imbalance }
    }

    /// 反复消环直到最优，返回消去的负环数量
    pub fn optimize(&self, flow: &mut Matrix<Flow>) -> usize {
        let mut cancelled = 0;
        loop {
            match self.improve(flow) {
                Improvement::Cancelled {
                    vertex,
                    amount,
                    hops,
                } => {
                    cancelled += 1;
                    trace!(vertex, amount, hops, "消去负环");
                }
                Improvement::Optimal => break,
                Improvement::Stalled { vertex } => {
                    warn!(vertex, "负环无法消去，停止优化");
                    break;
                }
            }
        }
        debug!(cancelled, "负环消除完成");
        cancelled
    }

    /// 构建残量网络
    ///
    /// 每个亏缺顶点 i 到盈余顶点 j 有正向弧，代价为最短路径代价；
    /// `f[i][j]` 非零时另有代价取反的反向弧 `j -> i`。
    pub fn residual(&self, flow: &Matrix<Flow>) -> PathMatrix {
        let mut residual = PathMatrix::new(self.paths.vertex_count());
        for &i in &self.imbalance.deficit {
            for &j in &self.imbalance.surplus {
                let cost = self.paths.cost(i, j);
                residual.add_direct(i, j, cost);
                if flow.at(i, j) != 0 {
                    residual.add_direct(j, i, -cost);
                }
            }
        }
        residual
    }

    /// 从盈余顶点出发的残量弧只可能是反向弧
    fn is_reverse(&self, u: VertexId) -> bool {
        self.imbalance.surplus.binary_search(&u).is_ok()
    }

    /// 执行一轮：找到编号最小的负对角线顶点，沿它的环消去负环
    ///
    /// 下一跳指针走不回起点、走出的环代价不在容限之外为负，或环上可调整量
    /// 为 0 时返回 [`Improvement::Stalled`]，每次消环都严格降低总代价。
    pub fn improve(&self, flow: &mut Matrix<Flow>) -> Improvement {
        let mut residual = self.residual(flow);
        residual.compute();

        let Some(vertex) = residual.first_negative_diagonal() else {
            return Improvement::Optimal;
        };
        let Some(cycle) = walk_cycle(&residual, vertex) else {
            return Improvement::Stalled { vertex };
        };

        // 第一遍：反向弧上流量的最小值，以及整个环的代价
        let mut amount: Option<Flow> = None;
        let mut gain = 0.0;
        for &(u, v) in &cycle {
            if self.is_reverse(u) {
                let available = flow.at(v, u);
                if amount.map_or(true, |k| k > available) {
                    amount = Some(available);
                }
                gain -= self.paths.cost(v, u);
            } else {
                gain += self.paths.cost(u, v);
            }
        }
        let amount = match amount {
            Some(k) if k > 0 && residual.is_negative(gain) => k,
            _ => return Improvement::Stalled { vertex },
        };

        // 第二遍：沿环调整
        for &(u, v) in &cycle {
            if self.is_reverse(u) {
                *flow.get_mut(v, u) -= amount;
            } else {
                *flow.get_mut(u, v) += amount;
            }
        }

        Improvement::Cancelled {
            vertex,
            amount,
            hops: cycle.len(),
        }
    }
}

/// 沿残量网络的下一跳指针从 `start` 出发走回 `start`
///
/// 超过 `N` 跳仍未回到起点时返回 `None`。
fn walk_cycle(residual: &PathMatrix, start: VertexId) -> Option<Vec<(VertexId, VertexId)>> {
    let mut cycle = Vec::new();
    let mut u = start;
    loop {
        let v = residual.next(u, start);
        cycle.push((u, v));
        u = v;
        if u == start {
            return Some(cycle);
        }
        if cycle.len() > residual.vertex_count() {
            return None;
        }
    }
}
