//! 初始可行流
//!
//! 运输问题的贪心分配：依次把每个亏缺顶点的缺口分给盈余顶点

use super::imbalance::Imbalance;
use crate::types::{Flow, Matrix};

/// 构造满足所有不平衡度的初始流 `f[i][j]`（亏缺顶点 i 到盈余顶点 j）
///
/// 结果可行但通常不是最优的。`delta` 只读，内部使用副本。
pub fn feasible_flow(delta: &[i64], imbalance: &Imbalance) -> Matrix<Flow> {
    let mut remaining = delta.to_vec();
    let mut flow = Matrix::new(delta.len(), 0);

    for &i in &imbalance.deficit {
        for &j in &imbalance.surplus {
            let amount = (-remaining[i]).min(remaining[j]);
            flow.set(i, j, amount);
            remaining[i] += amount;
            remaining[j] -= amount;
        }
    }

    flow
}
