//! 图算法模块
//!
//! 最短路径、不平衡分析、初始可行流、负环消除和路线重建

mod cycle_cancel;
mod feasible;
mod imbalance;
mod open_tour;
mod shortest_path;
mod solver;
mod tour;

pub use cycle_cancel::{CycleCanceler, Improvement};
pub use feasible::feasible_flow;
pub use imbalance::Imbalance;
pub use open_tour::{OpenPostman, OpenSolution, VIRTUAL_END, VIRTUAL_START};
pub use shortest_path::{PathMatrix, Relaxation};
pub use solver::{ExtraPath, Solution};
pub use tour::{Tour, TourStep};
