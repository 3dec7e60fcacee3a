use crate::error::CheckError;
use crate::pipeline::GradCheckRun;
use std::io::Write;

/// Prints the inputs, output, gradients and comparison results of `run`.
///
/// `c` is printed as a bare number.
pub fn write_report<W: Write>(run: &GradCheckRun, out: &mut W) -> Result<(), CheckError> {
    let vars = &run.variables;
    writeln!(out, "x: {}", vars.x)?;
    writeln!(out, "y: {}", vars.y)?;
    writeln!(out, "z: {}", vars.z)?;
    writeln!(out, "c: {}", run.forward.c.item_f32()?)?;
    writeln!(out)?;

    writeln!(out, "Hand-calculated gradients:")?;
    writeln!(out, "grad_x: {}", run.manual.x)?;
    writeln!(out, "grad_y: {}", run.manual.y)?;
    writeln!(out, "grad_z: {}", run.manual.z)?;
    writeln!(out)?;

    writeln!(out, "Gradients from backward:")?;
    writeln!(out, "x.grad: {}", run.echoed.x)?;
    writeln!(out, "y.grad: {}", run.echoed.y)?;
    writeln!(out, "z.grad: {}", run.echoed.z)?;
    writeln!(out)?;

    let v = &run.verification;
    writeln!(out, "grad_x correct: {}", v.grad_x)?;
    writeln!(out, "grad_y correct: {}", v.grad_y)?;
    writeln!(out, "grad_z correct: {}", v.grad_z)?;
    Ok(())
}
