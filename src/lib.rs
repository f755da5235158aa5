//! Postman - 有向中国邮递员问题求解器
//!
//! 求一条经过有向图每条弧至少一次、总代价最小的闭合路线：
//! - Floyd-Warshall 全源最短路径
//! - 初始可行流 + 负环消除求最小代价额外路径
//! - 按需逐步重建路线
//! - 起点和终点可以不同的开放路线
//! - 边列表文件导入

pub mod algorithm;
pub mod cli;
pub mod config;
pub mod error;
pub mod graph;
pub mod import;
pub mod metrics;
pub mod types;

// 重导出常用类型
pub use algorithm::{ExtraPath, OpenPostman, OpenSolution, Solution, Tour, TourStep};
pub use config::{OutputFormat, RunConfig};
pub use error::{Error, Result};
pub use graph::{ArcSpec, Postman};
pub use import::{EdgeList, VertexNames};
pub use metrics::SolveStats;
pub use types::{Cost, Flow, VertexId};

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
