//! 值转换器：In 与 Out 两个值域之间的一对函数（apply/revert）
//!
//! 转换器本身不保证双射，只能针对某个具体的属性路径和视图验证。

use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;
use std::rc::Rc;
use std::str::FromStr;

use crate::model::attribute_path::AttributePath;
use crate::model::error::{TableError, TransformError};
use crate::model::selective_view::SelectiveView;
use crate::model::tree::NodeTree;

type TransformFn<A, B> = Rc<dyn Fn(&A) -> Result<B, TransformError>>;

pub struct ValueTransform<In, Out> {
    func_apply: TransformFn<In, Out>,
    func_revert: TransformFn<Out, In>,
}

impl<In, Out> Clone for ValueTransform<In, Out> {
    fn clone(&self) -> Self {
        Self {
            func_apply: Rc::clone(&self.func_apply),
            func_revert: Rc::clone(&self.func_revert),
        }
    }
}

impl<In: 'static, Out: 'static> ValueTransform<In, Out> {
    pub fn new<A, R>(func_apply: A, func_revert: R) -> Self
    where
        A: Fn(&In) -> Result<Out, TransformError> + 'static,
        R: Fn(&Out) -> Result<In, TransformError> + 'static,
    {
        Self {
            func_apply: Rc::new(func_apply),
            func_revert: Rc::new(func_revert),
        }
    }

    /// 两个方向都不会失败的转换
    pub fn infallible<A, R>(func_apply: A, func_revert: R) -> Self
    where
        A: Fn(&In) -> Out + 'static,
        R: Fn(&Out) -> In + 'static,
    {
        Self::new(
            move |val: &In| Ok(func_apply(val)),
            move |val: &Out| Ok(func_revert(val)),
        )
    }

    pub fn apply(&self, value: &In) -> Result<Out, TransformError> {
        (self.func_apply)(value)
    }

    pub fn revert(&self, value: &Out) -> Result<In, TransformError> {
        (self.func_revert)(value)
    }

    /// 串联另一个转换器：apply 先走自身再走 `next`，revert 顺序相反
    pub fn compose<Next: 'static>(
        &self,
        next: &ValueTransform<Out, Next>,
    ) -> ValueTransform<In, Next> {
        let (first, second) = (self.clone(), next.clone());
        let (first_rev, second_rev) = (self.clone(), next.clone());
        ValueTransform::new(
            move |val: &In| {
                let cache = first.apply(val)?;
                second.apply(&cache)
            },
            move |val: &Next| {
                let cache = second_rev.revert(val)?;
                first_rev.revert(&cache)
            },
        )
    }

    /// `compose` 的别名
    pub fn chain_with<Next: 'static>(
        &self,
        next: &ValueTransform<Out, Next>,
    ) -> ValueTransform<In, Next> {
        self.compose(next)
    }
}

impl<In, Out> ValueTransform<In, Out>
where
    In: Clone + Eq + Hash + 'static,
    Out: Clone + Eq + Hash + 'static,
{
    /// 检查转换在当前视图实际出现的值上是否为双射
    ///
    /// 对每个节点：`revert(apply(v))` 必须还原为 `v`；同一个 `v` 只能映射到一个输出，
    /// 同一个输出也只能来自一个 `v`。属性缺失或转换失败会作为错误返回。
    pub fn is_bijective_over<T>(
        &self,
        tree: &T,
        path: &AttributePath<T, In>,
        view: &SelectiveView<T::Handle>,
    ) -> Result<bool, TableError>
    where
        T: NodeTree,
    {
        let mut mapping_apply: HashMap<In, Out> = HashMap::new();
        let mut mapping_revert: HashMap<Out, In> = HashMap::new();

        for &node in view.nodes() {
            let val = path.get_value(tree, node)?;
            let val_modified = self.apply(&val)?;
            let val_reverted = self.revert(&val_modified)?;

            if val != val_reverted {
                tracing::debug!("节点 {:?} 的值无法经 apply/revert 还原", node);
                return Ok(false);
            }

            // apply 在该值集合上不是函数
            let known_out = mapping_apply
                .entry(val.clone())
                .or_insert_with(|| val_modified.clone());
            if *known_out != val_modified {
                tracing::debug!("节点 {:?}: 同一输入得到不同输出", node);
                return Ok(false);
            }

            // apply 在该值集合上不是单射
            let known_in = mapping_revert.entry(val_modified).or_insert_with(|| val.clone());
            if *known_in != val {
                tracing::debug!("节点 {:?}: 不同输入得到相同输出", node);
                return Ok(false);
            }
        }

        Ok(true)
    }
}

impl<V: 'static> ValueTransform<V, V> {
    /// 两个方向使用同一个函数
    pub fn passthrough<F>(func: F) -> Self
    where
        F: Fn(&V) -> V + 'static,
    {
        let func = Rc::new(func);
        let func_rev = Rc::clone(&func);
        Self::new(move |val: &V| Ok(func(val)), move |val: &V| Ok(func_rev(val)))
    }

    pub fn identity() -> Self
    where
        V: Clone,
    {
        Self::passthrough(V::clone)
    }
}

impl<V> ValueTransform<V, String>
where
    V: Display + FromStr + 'static,
    <V as FromStr>::Err: Display,
{
    /// `to_string` 输出，`parse` 还原；解析失败作为转换错误返回
    pub fn display_parse() -> Self {
        Self::new(
            |val: &V| Ok(val.to_string()),
            |text: &String| {
                text.parse::<V>()
                    .map_err(|e| TransformError::new(format!("无法解析 '{}': {}", text, e)))
            },
        )
    }
}
