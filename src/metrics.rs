//! 求解统计
//!
//! 记录求解各阶段的规模、代价变化和耗时

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// 一次求解的统计快照
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SolveStats {
    /// 顶点数
    pub vertices: usize,
    /// 弧数
    pub arcs: usize,
    /// 亏缺顶点数
    pub deficit_vertices: usize,
    /// 盈余顶点数
    pub surplus_vertices: usize,
    /// 贪心初始流的额外代价
    pub initial_phi: f64,
    /// 优化后的额外代价
    pub final_phi: f64,
    /// 消去的负环数量
    pub cycles_cancelled: usize,
    /// 额外路径总次数
    pub extra_traversals: i64,
    /// 最短路径阶段耗时（毫秒）
    pub shortest_path_ms: f64,
    /// 负环消除阶段耗时（毫秒）
    pub optimization_ms: f64,
    /// 总耗时（毫秒）
    pub total_ms: f64,
}

impl SolveStats {
    /// 优化节省的代价
    pub fn improvement(&self) -> f64 {
        self.initial_phi - self.final_phi
    }
}

/// 阶段计时器
pub struct PhaseTimer {
    start: Instant,
    phase_start: Instant,
}

impl PhaseTimer {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            phase_start: now,
        }
    }

    /// 结束当前阶段并开始下一阶段，返回当前阶段耗时（毫秒）
    pub fn lap(&mut self) -> f64 {
        let now = Instant::now();
        let elapsed = now - self.phase_start;
        self.phase_start = now;
        as_millis(elapsed)
    }

    /// 从创建到现在的耗时（毫秒）
    pub fn total(&self) -> f64 {
        as_millis(self.start.elapsed())
    }
}

impl Default for PhaseTimer {
    fn default() -> Self {
        Self::new()
    }
}

fn as_millis(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1000.0
}
