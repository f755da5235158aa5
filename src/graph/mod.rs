//! 图核心模块
//!
//! 定义弧、标签索引和待求解的多重图

mod edge;
mod graph;
mod index;

pub use edge::ArcSpec;
pub use graph::Postman;
pub use index::{LabelCursor, LabelIndex, LabelStack};
