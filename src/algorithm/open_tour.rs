//! 开放路线（起点和终点可以不同）
//!
//! 增加一个虚拟顶点，用虚拟弧把候选终点接回起点，转化为闭合路线问题

use super::imbalance::Imbalance;
use super::solver::Solution;
use super::tour::{Tour, TourStep};
use crate::error::{Error, Result};
use crate::graph::Postman;
use crate::types::{Cost, VertexId};
use tracing::{debug, info};

/// 虚拟起始弧标签
pub const VIRTUAL_START: &str = "'virtual start'";
/// 虚拟结束弧标签
pub const VIRTUAL_END: &str = "'virtual end'";

/// 开放路线问题的输入图
///
/// 要求所有弧代价非负：虚拟弧的代价取原图总代价，只有这样它们才不会被
/// 当作捷径使用。
#[derive(Debug, Clone)]
pub struct OpenPostman {
    base: Postman,
}

impl OpenPostman {
    pub fn new(vertices: usize) -> Result<Self> {
        Ok(Self {
            base: Postman::new(vertices)?,
        })
    }

    /// 添加弧 `u -> v`，代价为负时报错
    pub fn add_arc(
        &mut self,
        label: impl Into<String>,
        u: VertexId,
        v: VertexId,
        cost: Cost,
    ) -> Result<&mut Self> {
        let label = label.into();
        if cost < 0.0 {
            return Err(Error::NegativeCost { label, cost });
        }
        self.base.add_arc(label, u, v, cost)?;
        Ok(self)
    }

    pub fn vertex_count(&self) -> usize {
        self.base.vertex_count()
    }

    pub fn arc_count(&self) -> usize {
        self.base.arc_count()
    }

    /// 每条弧各走一次的代价
    pub fn basic_cost(&self) -> Cost {
        self.base.basic_cost()
    }

    /// 求从 `start` 出发的最便宜开放路线
    ///
    /// 原图平衡时终点就是起点；否则依次尝试每个亏缺顶点作为终点，
    /// 代价严格更低才替换，相同代价保留先出现的候选。
    pub fn solve_from(&self, start: VertexId) -> Result<OpenSolution> {
        let n = self.base.vertex_count();
        if start >= n {
            return Err(Error::VertexOutOfRange {
                vertex: start,
                count: n,
            });
        }

        let basic_cost = self.base.basic_cost();
        let imbalance = Imbalance::analyze(self.base.deltas());
        let candidates = if imbalance.is_balanced() {
            vec![start]
        } else {
            imbalance.deficit
        };

        let mut best: Option<(VertexId, Solution)> = None;
        for end in candidates {
            let mut g = Postman::new(n + 1)?;
            for arc in self.base.arcs() {
                g.add(arc)?;
            }
            g.add_arc(VIRTUAL_START, n, start, basic_cost)?
                .add_arc(VIRTUAL_END, end, n, basic_cost)?;

            let solution = g.solve()?;
            debug!(start, end, cost = solution.cost(), "候选终点");
            if best
                .as_ref()
                .map_or(true, |(_, b)| solution.cost() < b.cost())
            {
                best = Some((end, solution));
            }
        }

        let Some((end, solution)) = best else {
            // 候选集合至少包含一个顶点
            return Err(Error::VertexOutOfRange {
                vertex: start,
                count: n,
            });
        };
        let open = OpenSolution {
            start,
            end,
            basic_cost,
            solution,
        };
        info!(start, end, cost = open.cost(), "开放路线求解完成");
        Ok(open)
    }

    /// 尝试所有起点，返回代价最低的开放路线（相同代价取编号最小的起点）
    pub fn solve_best(&self) -> Result<OpenSolution> {
        let mut best: Option<OpenSolution> = None;
        for start in 0..self.base.vertex_count() {
            let candidate = self.solve_from(start)?;
            if best.as_ref().map_or(true, |b| candidate.cost() < b.cost()) {
                best = Some(candidate);
            }
        }
        best.ok_or(Error::EmptyGraph)
    }
}

/// 开放路线求解结果
#[derive(Debug, Clone)]
pub struct OpenSolution {
    start: VertexId,
    end: VertexId,
    /// 原图（不含虚拟弧）的基本代价
    basic_cost: Cost,
    /// 含虚拟顶点的闭合路线解
    solution: Solution,
}

impl OpenSolution {
    pub fn start(&self) -> VertexId {
        self.start
    }

    pub fn end(&self) -> VertexId {
        self.end
    }

    /// 虚拟顶点编号（等于原图顶点数）
    pub fn virtual_vertex(&self) -> VertexId {
        self.solution.vertex_count() - 1
    }

    /// 路线总代价（不含虚拟弧）
    pub fn cost(&self) -> Cost {
        self.basic_cost + self.solution.phi()
    }

    /// 含虚拟顶点的闭合路线解
    pub fn closed(&self) -> &Solution {
        &self.solution
    }

    /// 从虚拟顶点出发的完整路线，首尾两步是虚拟弧
    pub fn raw_tour(&self) -> Tour<'_> {
        Tour::new(&self.solution, self.virtual_vertex())
    }

    /// 去掉虚拟弧后的路线
    pub fn tour(&self) -> impl Iterator<Item = TourStep<'_>> {
        let virtual_vertex = self.virtual_vertex();
        self.raw_tour()
            .filter(move |step| step.from != virtual_vertex && step.to != virtual_vertex)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> OpenPostman {
        let mut g = OpenPostman::new(4).unwrap();
        g.add_arc("a", 0, 1, 1.0)
            .unwrap()
            .add_arc("b", 0, 2, 1.0)
            .unwrap()
            .add_arc("c", 1, 2, 1.0)
            .unwrap()
            .add_arc("d", 1, 3, 1.0)
            .unwrap()
            .add_arc("e", 2, 3, 1.0)
            .unwrap()
            .add_arc("f", 3, 0, 1.0)
            .unwrap();
        g
    }

    #[test]
    fn test_negative_cost_rejected() {
        let mut g = OpenPostman::new(2).unwrap();
        assert!(matches!(
            g.add_arc("neg", 0, 1, -1.0),
            Err(Error::NegativeCost { .. })
        ));
        assert_eq!(g.arc_count(), 0);
    }

    #[test]
    fn test_open_path_on_simple_chain() {
        // 0 -> 1 -> 2 再回到 0：从 0 出发不必回来
        let mut g = OpenPostman::new(3).unwrap();
        g.add_arc("x", 0, 1, 1.0)
            .unwrap()
            .add_arc("y", 1, 2, 1.0)
            .unwrap()
            .add_arc("z", 2, 0, 5.0)
            .unwrap();

        let open = g.solve_from(1).unwrap();
        assert_eq!(open.start(), 1);
        assert_eq!(open.end(), 1);
        assert_eq!(open.cost(), 7.0);

        let labels: Vec<_> = open.tour().map(|s| s.label).collect();
        assert_eq!(labels, vec!["y", "z", "x"]);

        let raw: Vec<_> = open.raw_tour().map(|s| s.label).collect();
        assert_eq!(raw.first(), Some(&VIRTUAL_START));
        assert_eq!(raw.last(), Some(&VIRTUAL_END));
        assert_eq!(raw.len(), 5);
    }

    #[test]
    fn test_open_tour_covers_every_arc() {
        let g = sample();
        let open = g.solve_from(0).unwrap();

        let steps: Vec<_> = open.tour().collect();
        assert_eq!(steps.first().map(|s| s.from), Some(0));
        assert_eq!(steps.last().map(|s| s.to), Some(open.end()));
        for window in steps.windows(2) {
            assert_eq!(window[0].to, window[1].from);
        }
        for label in ["a", "b", "c", "d", "e", "f"] {
            assert!(steps.iter().any(|s| s.label == label), "missing {}", label);
        }
        let cost: f64 = steps.len() as f64;
        assert_eq!(open.cost(), cost);
    }

    #[test]
    fn test_equal_cost_ends_keep_lower_index() {
        // 1 和 2 对称，都是亏缺顶点，在哪一个结束代价都是 7
        let mut g = OpenPostman::new(3).unwrap();
        g.add_arc("a", 0, 1, 1.0)
            .unwrap()
            .add_arc("b", 0, 2, 1.0)
            .unwrap()
            .add_arc("c", 1, 0, 1.0)
            .unwrap()
            .add_arc("d", 2, 0, 1.0)
            .unwrap()
            .add_arc("e", 0, 1, 1.0)
            .unwrap()
            .add_arc("f", 0, 2, 1.0)
            .unwrap();

        let open = g.solve_from(0).unwrap();
        assert_eq!(open.end(), 1);
        assert_eq!(open.cost(), 7.0);
        assert_eq!(open.tour().last().map(|s| s.to), Some(1));
    }

    #[test]
    fn test_equal_cost_starts_keep_lower_index() {
        let mut g = OpenPostman::new(3).unwrap();
        g.add_arc("x", 0, 1, 1.0)
            .unwrap()
            .add_arc("y", 1, 2, 1.0)
            .unwrap()
            .add_arc("z", 2, 0, 1.0)
            .unwrap();
        for start in 0..3 {
            assert_eq!(g.solve_from(start).unwrap().cost(), 3.0);
        }

        let best = g.solve_best().unwrap();
        assert_eq!(best.start(), 0);
        assert_eq!(best.end(), 0);
        assert_eq!(best.cost(), 3.0);
    }

    #[test]
    fn test_best_start_not_worse_than_any_start() {
        let g = sample();
        let best = g.solve_best().unwrap();
        for start in 0..g.vertex_count() {
            assert!(best.cost() <= g.solve_from(start).unwrap().cost());
        }
        assert!(best.cost() <= 10.0);
    }
}
