//! CLI 模块
//!
//! 命令行输出格式化

mod printer;

pub use printer::Printer;
