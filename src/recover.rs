use crate::brain::{Brain, Thought, THOUGHT_SIZE};
use crate::error::{Error, Result};
use crate::solver::Solver;
use crate::value::{vc, Value};

/// width the dot products are modelled in, wide enough that no
/// thought of the challenge wraps
pub const WORD_BITS: u32 = 64;

/// solve the next `THOUGHT_SIZE` input bytes so that the brain in its
/// current state thinks `target`. the brain is not advanced
pub fn solve_chunk(
    brain: &Brain,
    target: &Thought,
    pattern: &str,
    chunk: usize,
) -> Result<Vec<u8>> {
    let mut solver = Solver::new();

    let bytes: Vec<Value> = (0..THOUGHT_SIZE)
        .map(|i| solver.symbolic_value(&format!("flag_{}_{}", chunk, i), 8))
        .collect();

    for byte in &bytes {
        solver.constrain_bytes_value(byte, pattern)?;
    }

    let words: Vec<Value> = bytes.iter().map(|b| b.uext(WORD_BITS - 8)).collect();
    let thought = brain.ponder(&words)?;

    for (expr, expected) in thought.iter().zip(target) {
        solver.assert(&expr.eq(&vc(*expected)));
    }

    if !solver.is_sat() {
        return Err(Error::Unsat { chunk });
    }

    solver
        .evaluate_bytes(&bytes)
        .ok_or(Error::Unsat { chunk })
}

/// recover the whole input chunk by chunk, feeding each solved chunk
/// back through `think` before solving the next
pub fn recover(brain: &mut Brain, targets: &[Thought], pattern: &str) -> Result<Vec<u8>> {
    let mut input = Vec::with_capacity(targets.len() * THOUGHT_SIZE);

    for (chunk, target) in targets.iter().enumerate() {
        let bytes = solve_chunk(brain, target, pattern, chunk)?;
        brain.think(&bytes)?;
        input.extend(bytes);
    }

    Ok(input)
}

/// replay `input` through `brain` and check every thought and the final brainstem
pub fn verify(brain: &mut Brain, input: &[u8], targets: &[Thought], brainstem: &str) -> Result<()> {
    let expected = targets.len() * THOUGHT_SIZE;
    if input.len() != expected {
        return Err(Error::Length {
            expected,
            found: input.len(),
        });
    }

    for (chunk, (data, target)) in input.chunks(THOUGHT_SIZE).zip(targets).enumerate() {
        if brain.think(data)? != *target {
            return Err(Error::ThoughtMismatch { chunk });
        }
    }

    let found = brain.brainstem();
    if found != brainstem {
        return Err(Error::Fingerprint {
            expected: brainstem.to_owned(),
            found,
        });
    }

    Ok(())
}
