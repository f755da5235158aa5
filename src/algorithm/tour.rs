//! 欧拉回路重建
//!
//! 把原图的弧和优化后的额外路径交织成一条闭合路线，按需逐步产生

use super::solver::Solution;
use crate::graph::LabelCursor;
use crate::types::{Flow, Matrix, VertexId};
use serde::Serialize;
use std::fmt;

/// 路线中的一步
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TourStep<'a> {
    /// 经过的弧标签
    pub label: &'a str,
    /// 起点
    pub from: VertexId,
    /// 终点
    pub to: VertexId,
}

impl fmt::Display for TourStep<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Take {} from {} to {}", self.label, self.from, self.to)
    }
}

/// 从指定起点出发的邮递员路线
///
/// 在标签游标和额外流量的副本上消耗，求解结果本身不被修改，
/// 因此同一起点的路线可以反复重建且结果相同。
pub struct Tour<'a> {
    solution: &'a Solution,
    /// 路线起点
    start: VertexId,
    /// 当前所在顶点
    current: VertexId,
    /// 剩余的原图弧
    cursor: LabelCursor<'a>,
    /// 剩余的额外路径
    flow: Matrix<Flow>,
    /// 正在展开的额外路径终点
    detour: Option<VertexId>,
    finished: bool,
}

impl<'a> Tour<'a> {
    pub(crate) fn new(solution: &'a Solution, start: VertexId) -> Self {
        Self {
            solution,
            start,
            current: start,
            cursor: solution.graph.labels.cursor(),
            flow: solution.flow.clone(),
            detour: None,
            finished: false,
        }
    }

    /// 路线起点
    pub fn start(&self) -> VertexId {
        self.start
    }

    /// `from` 出发、编号最小的尚未走过的额外路径终点
    fn pending_path(&self, from: VertexId) -> Option<VertexId> {
        self.flow.row(from).iter().position(|&f| f > 0)
    }

    /// 沿最短路径走一跳
    fn detour_step(&mut self, target: VertexId) -> TourStep<'a> {
        let solution: &'a Solution = self.solution;
        let u = self.current;
        let p = solution.graph.paths.next(u, target);
        if p == target {
            self.detour = None;
        }
        self.current = p;
        TourStep {
            label: solution.cheapest_label(u, p).unwrap_or_default(),
            from: u,
            to: p,
        }
    }
}

impl<'a> Iterator for Tour<'a> {
    type Item = TourStep<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(target) = self.detour {
            return Some(self.detour_step(target));
        }
        if self.finished {
            return None;
        }

        let u = self.current;
        if let Some(target) = self.pending_path(u) {
            *self.flow.get_mut(u, target) -= 1;
            self.detour = Some(target);
            return Some(self.detour_step(target));
        }

        // 通往起点的桥最后才走，避免路线过早闭合
        let solution: &'a Solution = self.solution;
        let graph = &solution.graph;
        let bridge = graph.paths.next(u, self.start);
        if self.cursor.remaining(u, bridge) == 0 {
            self.finished = true;
            return None;
        }
        let v = (0..graph.n)
            .find(|&i| i != bridge && self.cursor.remaining(u, i) > 0)
            .unwrap_or(bridge);

        let label = self.cursor.pop(u, v).unwrap_or_default();
        self.current = v;
        Some(TourStep { label, from: u, to: v })
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::Postman;

    #[test]
    fn test_balanced_two_cycle() {
        let mut g = Postman::new(2).unwrap();
        g.add_arc("a", 0, 1, 1.0).unwrap().add_arc("b", 1, 0, 1.0).unwrap();
        let solution = g.solve().unwrap();

        let steps: Vec<_> = solution
            .tour(0)
            .unwrap()
            .map(|s| (s.label, s.from, s.to))
            .collect();
        assert_eq!(steps, vec![("a", 0, 1), ("b", 1, 0)]);
    }

    #[test]
    fn test_parallel_arcs_consumed_last_in_first_out() {
        let mut g = Postman::new(2).unwrap();
        g.add_arc("x1", 0, 1, 1.0)
            .unwrap()
            .add_arc("y1", 1, 0, 1.0)
            .unwrap()
            .add_arc("x2", 0, 1, 1.0)
            .unwrap()
            .add_arc("y2", 1, 0, 1.0)
            .unwrap();
        let solution = g.solve().unwrap();

        let labels: Vec<_> = solution.tour(0).unwrap().map(|s| s.label).collect();
        assert_eq!(labels, vec!["x2", "y2", "x1", "y1"]);
    }

    #[test]
    fn test_self_loops_only() {
        let mut g = Postman::new(1).unwrap();
        g.add_arc("l1", 0, 0, 2.0).unwrap().add_arc("l2", 0, 0, 1.0).unwrap();
        let solution = g.solve().unwrap();

        let labels: Vec<_> = solution.tour(0).unwrap().map(|s| s.label).collect();
        assert_eq!(labels, vec!["l2", "l1"]);
        assert_eq!(solution.cost(), 3.0);
    }

    #[test]
    fn test_step_display() {
        let mut g = Postman::new(2).unwrap();
        g.add_arc("a", 0, 1, 1.0).unwrap().add_arc("b", 1, 0, 1.0).unwrap();
        let solution = g.solve().unwrap();
        let first = solution.tour(0).unwrap().next().unwrap();
        assert_eq!(first.to_string(), "Take a from 0 to 1");
    }
}
