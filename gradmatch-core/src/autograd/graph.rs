use crate::autograd::GradAccumulation;
use crate::error::GradMatchError;
use crate::ops::arithmetic::add_op;
use crate::tensor::Tensor;
use crate::tensor_data::TensorData;
use log::{debug, trace};
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

/// Stable identity of a graph node: the address of its shared `RwLock<TensorData>`.
///
/// Only used as a map key. The pointer is never dereferenced, so it is sound even
/// if a node were dropped, which cannot happen while the traversal holds handles.
pub type NodeId = *const RwLock<TensorData>;

/// Orders every node reachable from `root` through tensors that require grad.
///
/// The result is a post-order: each node appears after all of its inputs, so
/// iterating it in reverse visits a node only once all its consumers are done.
/// Iterative to keep deep graphs off the call stack.
pub fn topological_sort(root: &Tensor) -> Vec<Tensor> {
    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut sorted = Vec::new();
    let mut stack: Vec<(Tensor, bool)> = vec![(root.clone(), false)];

    while let Some((node, expanded)) = stack.pop() {
        if expanded {
            sorted.push(node);
            continue;
        }
        if !visited.insert(node.node_id()) {
            continue;
        }
        let grad_fn = node.grad_fn();
        stack.push((node, true));
        if let Some(op) = grad_fn {
            for input in op.inputs() {
                if input.requires_grad() && !visited.contains(&input.node_id()) {
                    stack.push((input, false));
                }
            }
        }
    }
    sorted
}

/// Propagates `seed` (dL/droot) back through the graph below `root`.
///
/// Gradients reaching a node from several consumers are summed before the node is
/// processed. Non-leaf nodes hand their gradient to their `BackwardOp`; leaves that
/// require grad receive it in their accumulator according to `mode`.
pub(crate) fn run_backward(
    root: &Tensor,
    seed: Tensor,
    mode: GradAccumulation,
) -> Result<(), GradMatchError> {
    let order = topological_sort(root);
    debug!("backward: {} node(s) reachable from root", order.len());

    let mut pending: HashMap<NodeId, Tensor> = HashMap::new();
    pending.insert(root.node_id(), seed);

    for node in order.iter().rev() {
        let Some(grad) = pending.remove(&node.node_id()) else {
            continue;
        };

        let Some(op) = node.grad_fn() else {
            if node.requires_grad() {
                trace!("backward: depositing gradient {:?} into leaf ({:?})", grad.shape(), mode);
                node.accumulate_grad(grad, mode)?;
            }
            continue;
        };

        trace!("backward: {} for output {:?}", op.name(), node.shape());
        let input_grads = op.backward(&grad)?;
        let inputs = op.inputs();
        if input_grads.len() != inputs.len() {
            return Err(GradMatchError::BackwardError(format!(
                "{} returned {} gradients, but has {} inputs",
                op.name(),
                input_grads.len(),
                inputs.len()
            )));
        }

        for (input, input_grad) in inputs.iter().zip(input_grads) {
            if !input.requires_grad() {
                continue;
            }
            if input_grad.shape() != input.shape() {
                return Err(GradMatchError::GradientAccumulationShapeMismatch {
                    expected: input.shape(),
                    actual: input_grad.shape(),
                });
            }
            match pending.entry(input.node_id()) {
                Entry::Occupied(mut slot) => {
                    let summed = add_op(slot.get(), &input_grad)?;
                    slot.insert(summed);
                }
                Entry::Vacant(slot) => {
                    slot.insert(input_grad);
                }
            }
        }
    }

    Ok(())
}
