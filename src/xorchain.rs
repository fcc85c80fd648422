use crate::error::{Error, Result};
use std::collections::HashSet;

/// an ordered chain of equal length xor masks, one per encryption step
#[derive(Debug, Clone, PartialEq)]
pub struct MaskChain {
    masks: Vec<Vec<u8>>,
}

impl MaskChain {
    pub fn new(masks: Vec<Vec<u8>>) -> Result<Self> {
        let first_len = masks.first().ok_or(Error::EmptyChain)?.len();

        let mut seen = HashSet::with_capacity(masks.len());
        for (index, mask) in masks.iter().enumerate() {
            if mask.len() != first_len {
                return Err(Error::MaskLength {
                    index,
                    expected: first_len,
                    found: mask.len(),
                });
            }
            if !seen.insert(mask.as_slice()) {
                return Err(Error::DuplicateMask { index });
            }
        }

        Ok(MaskChain { masks })
    }

    /// one hex encoded mask per line, blank lines are ignored
    pub fn from_hex_lines(text: &str) -> Result<Self> {
        let masks = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(hex::decode)
            .collect::<std::result::Result<Vec<_>, _>>()?;

        MaskChain::new(masks)
    }

    pub fn len(&self) -> usize {
        self.masks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.masks.is_empty()
    }

    pub fn mask_len(&self) -> usize {
        self.masks[0].len()
    }

    pub fn masks(&self) -> &[Vec<u8>] {
        &self.masks
    }

    /// encrypt: xor the masks in chain order
    pub fn apply(&self, data: &[u8]) -> Result<Vec<u8>> {
        self.xor_in_order(data, self.masks.iter().enumerate())
    }

    /// decrypt: undo the masks last to first
    pub fn reverse(&self, data: &[u8]) -> Result<Vec<u8>> {
        self.xor_in_order(data, self.masks.iter().enumerate().rev())
    }

    fn xor_in_order<'a, I>(&self, data: &[u8], masks: I) -> Result<Vec<u8>>
    where
        I: Iterator<Item = (usize, &'a Vec<u8>)>,
    {
        let mut out = data.to_vec();
        for (index, mask) in masks {
            if mask.len() != out.len() {
                return Err(Error::MaskLength {
                    index,
                    expected: out.len(),
                    found: mask.len(),
                });
            }
            out.iter_mut().zip(mask).for_each(|(b, m)| *b ^= m);
        }
        Ok(out)
    }
}
