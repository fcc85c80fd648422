use crate::error::{Error, Result};
use crate::value::{vc, Value};
use sha2::{Digest, Sha256};

/// width of a thought, and the side of the neuron grid
pub const THOUGHT_SIZE: usize = 10;

pub type Grid = [[u64; THOUGHT_SIZE]; THOUGHT_SIZE];
pub type Thought = [u64; THOUGHT_SIZE];

#[derive(Debug, Clone, PartialEq)]
pub struct Brain {
    neurons: Grid,
}

impl Brain {
    pub fn new(neurons: Grid) -> Self {
        Brain { neurons }
    }

    pub fn neurons(&self) -> &Grid {
        &self.neurons
    }

    /// xor each byte of `data` into the cell picked by two fixed
    /// linear index formulas, cells repeat every `THOUGHT_SIZE` bytes
    pub fn rot(&mut self, data: &[u8]) {
        for (i, byte) in data.iter().enumerate() {
            let row = (3 * i + 7) % THOUGHT_SIZE;
            let col = (9 * i + 3) % THOUGHT_SIZE;
            self.neurons[row][col] ^= *byte as u64;
        }
    }

    /// dot every row with `data`, then shift the rows up and
    /// keep the new thought as the last row
    pub fn think(&mut self, data: &[u8]) -> Result<Thought> {
        if data.len() != THOUGHT_SIZE {
            return Err(Error::ThoughtSize {
                expected: THOUGHT_SIZE,
                found: data.len(),
            });
        }

        let mut thought = [0u64; THOUGHT_SIZE];
        for (i, row) in self.neurons.iter().enumerate() {
            thought[i] = row
                .iter()
                .zip(data)
                .fold(0u64, |acc, (n, d)| acc.wrapping_add(n.wrapping_mul(*d as u64)));
        }

        self.neurons.rotate_left(1);
        self.neurons[THOUGHT_SIZE - 1] = thought;
        Ok(thought)
    }

    /// the same dot products as `think` over possibly symbolic values,
    /// without touching the neurons
    pub fn ponder(&self, data: &[Value]) -> Result<Vec<Value>> {
        if data.len() != THOUGHT_SIZE {
            return Err(Error::ThoughtSize {
                expected: THOUGHT_SIZE,
                found: data.len(),
            });
        }

        Ok(self
            .neurons
            .iter()
            .map(|row| {
                row.iter()
                    .zip(data)
                    .fold(vc(0), |acc, (n, d)| acc + vc(*n) * d.to_owned())
            })
            .collect())
    }

    /// sha256 of the flattened neurons, comma separated decimals
    pub fn brainstem(&self) -> String {
        let flat: Vec<String> = self
            .neurons
            .iter()
            .flat_map(|row| row.iter().map(|n| n.to_string()))
            .collect();

        hex::encode(Sha256::digest(flat.join(",").as_bytes()))
    }
}
