//! The gradient-check pipeline: forward, engine backward, hand-derived
//! backward, echo and comparison for `c = sum(x * y + z)`.

use crate::config::CheckConfig;
use crate::error::CheckError;
use gradmatch_core::tensor::{ones, ones_like, randn};
use gradmatch_core::{manual_seed, GradAccumulation, RandomContext, Tensor};
use log::{debug, info, warn};

/// The three leaf inputs, each `[rows, cols]` and requiring grad.
#[derive(Debug, Clone)]
pub struct Variables {
    pub x: Tensor,
    pub y: Tensor,
    pub z: Tensor,
}

/// Intermediates and output of the forward pass.
#[derive(Debug, Clone)]
pub struct ForwardPass {
    /// `x * y`
    pub a: Tensor,
    /// `a + z`
    pub b: Tensor,
    /// `sum(b)`, shape `[]`.
    pub c: Tensor,
}

/// One gradient per variable, each with its variable's shape.
#[derive(Debug, Clone)]
pub struct GradientSet {
    pub x: Tensor,
    pub y: Tensor,
    pub z: Tensor,
}

/// Per-variable result of comparing engine and hand-derived gradients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verification {
    pub grad_x: bool,
    pub grad_y: bool,
    pub grad_z: bool,
}

impl Verification {
    pub fn all_match(&self) -> bool {
        self.grad_x && self.grad_y && self.grad_z
    }
}

/// Everything a run produced, in the order the report prints it.
#[derive(Debug, Clone)]
pub struct GradCheckRun {
    pub variables: Variables,
    pub forward: ForwardPass,
    /// Engine gradients captured right after `c.backward()`.
    pub auto: GradientSet,
    pub manual: GradientSet,
    /// Accumulators read back after zeroing and re-seeding with `manual`.
    pub echoed: GradientSet,
    pub verification: Verification,
}

/// Draws x, y, z from `ctx` in that order and marks them as requiring grad.
pub fn allocate(ctx: &mut RandomContext, rows: usize, cols: usize) -> Result<Variables, CheckError> {
    let shape = [rows, cols];
    let x = randn(ctx, &shape)?;
    let y = randn(ctx, &shape)?;
    let z = randn(ctx, &shape)?;
    for t in [&x, &y, &z] {
        t.requires_grad_(true)?;
    }
    Ok(Variables { x, y, z })
}

pub fn forward(vars: &Variables) -> Result<ForwardPass, CheckError> {
    let a = vars.x.mul(&vars.y)?;
    let b = a.add(&vars.z)?;
    let c = b.sum()?;
    Ok(ForwardPass { a, b, c })
}

/// Runs `c.backward()` and snapshots the leaf gradients.
///
/// The snapshots are deep copies, so resetting the accumulators later does not
/// change them.
pub fn auto_backward(vars: &Variables, pass: &ForwardPass) -> Result<GradientSet, CheckError> {
    pass.c.backward()?;
    Ok(GradientSet {
        x: snapshot_grad(&vars.x, "x")?,
        y: snapshot_grad(&vars.y, "y")?,
        z: snapshot_grad(&vars.z, "z")?,
    })
}

pub fn reset_gradients(vars: &Variables) -> Result<(), CheckError> {
    for t in [&vars.x, &vars.y, &vars.z] {
        t.zero_grad()?;
    }
    Ok(())
}

/// Chain rule for `c = sum(x * y + z)` written out by hand.
///
/// Operands are detached, so nothing here records graph or touches an accumulator.
pub fn manual_backward(vars: &Variables) -> Result<GradientSet, CheckError> {
    let grad_c = ones(&[])?;
    let grad_b = grad_c.mul(&ones_like(&vars.x)?)?;
    let grad_a = grad_b.deep_clone()?;
    let grad_z = grad_b.deep_clone()?;
    let grad_x = grad_a.mul(&vars.y.detach())?;
    let grad_y = grad_a.mul(&vars.x.detach())?;
    Ok(GradientSet {
        x: grad_x,
        y: grad_y,
        z: grad_z,
    })
}

/// Feeds each manual gradient back through `backward` on its own leaf and reads
/// the accumulators. On zeroed accumulators this returns `manual` unchanged.
pub fn echo_gradients(vars: &Variables, manual: &GradientSet) -> Result<GradientSet, CheckError> {
    vars.x.backward_with(Some(manual.x.clone()), GradAccumulation::Accumulate)?;
    vars.y.backward_with(Some(manual.y.clone()), GradAccumulation::Accumulate)?;
    vars.z.backward_with(Some(manual.z.clone()), GradAccumulation::Accumulate)?;
    Ok(GradientSet {
        x: snapshot_grad(&vars.x, "x")?,
        y: snapshot_grad(&vars.y, "y")?,
        z: snapshot_grad(&vars.z, "z")?,
    })
}

pub fn verify(
    auto: &GradientSet,
    manual: &GradientSet,
    rtol: f32,
    atol: f32,
) -> Result<Verification, CheckError> {
    let check = |name: &str, engine: &Tensor, derived: &Tensor| -> Result<bool, CheckError> {
        let ok = engine.allclose_with(derived, rtol, atol)?;
        if !ok {
            warn!("grad_{} from the engine differs from the hand-derived gradient", name);
        }
        Ok(ok)
    };
    Ok(Verification {
        grad_x: check("x", &auto.x, &manual.x)?,
        grad_y: check("y", &auto.y, &manual.y)?,
        grad_z: check("z", &auto.z, &manual.z)?,
    })
}

/// Runs every step in order with the parameters of `config`.
pub fn run(config: &CheckConfig) -> Result<GradCheckRun, CheckError> {
    info!(
        "allocating x, y, z with shape [{}, {}] (seed {})",
        config.rows, config.cols, config.seed
    );
    let mut ctx = manual_seed(config.seed);
    let variables = allocate(&mut ctx, config.rows, config.cols)?;

    info!("forward pass");
    let forward = forward(&variables)?;
    debug!("c = {}", forward.c);

    info!("engine backward");
    let auto = auto_backward(&variables, &forward)?;

    info!("resetting gradients");
    reset_gradients(&variables)?;

    info!("hand-derived backward");
    let manual = manual_backward(&variables)?;

    info!("echoing hand-derived gradients through backward");
    let echoed = echo_gradients(&variables, &manual)?;

    info!("comparing engine and hand-derived gradients");
    let verification = verify(&auto, &manual, config.rtol, config.atol)?;

    Ok(GradCheckRun {
        variables,
        forward,
        auto,
        manual,
        echoed,
        verification,
    })
}

fn snapshot_grad(t: &Tensor, variable: &'static str) -> Result<Tensor, CheckError> {
    let grad = t.grad().ok_or(CheckError::MissingGradient { variable })?;
    Ok(grad.deep_clone()?)
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
