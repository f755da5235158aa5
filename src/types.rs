//! 通用类型定义

use serde::{Deserialize, Serialize};

/// 顶点 ID（稠密编号，范围 `[0, N)`）
pub type VertexId = usize;

/// 弧或路径的代价
pub type Cost = f64;

/// 额外遍历次数
pub type Flow = i64;

/// 稠密方阵（行优先连续存储）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix<T> {
    size: usize,
    data: Vec<T>,
}

impl<T: Clone> Matrix<T> {
    /// 创建 `size x size` 的矩阵，所有元素初始化为 `value`
    pub fn new(size: usize, value: T) -> Self {
        Self {
            size,
            data: vec![value; size * size],
        }
    }
}

impl<T> Matrix<T> {
    /// 矩阵边长
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, row: usize, col: usize) -> &T {
        &self.data[row * self.size + col]
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> &mut T {
        &mut self.data[row * self.size + col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: T) {
        self.data[row * self.size + col] = value;
    }

    /// 取出一行
    pub fn row(&self, row: usize) -> &[T] {
        &self.data[row * self.size..(row + 1) * self.size]
    }

    /// 按行优先顺序遍历 `(row, col, value)`
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &T)> {
        let size = self.size;
        self.data
            .iter()
            .enumerate()
            .map(move |(idx, value)| (idx / size, idx % size, value))
    }
}

impl<T: Copy> Matrix<T> {
    pub fn at(&self, row: usize, col: usize) -> T {
        self.data[row * self.size + col]
    }
}
