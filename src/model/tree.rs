//! 节点树接口：核心算法只依赖有序子节点列表与不透明的节点句柄

use std::fmt::Debug;
use std::hash::Hash;

/// 由外部协作方实现的树结构
///
/// 句柄只是对树内节点的非拥有引用（通常是arena下标），
/// `children` 必须在树未变更时返回稳定的顺序。
pub trait NodeTree {
    type Handle: Copy + Eq + Hash + Debug;

    fn children(&self, node: Self::Handle) -> &[Self::Handle];
}
