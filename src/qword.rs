use crate::error::{Error, Result};

/// pack qwords little endian, the way they sit in a ymm register
pub fn qwords_to_bytes(qwords: &[u64]) -> Vec<u8> {
    qwords.iter().flat_map(|q| q.to_le_bytes()).collect()
}

pub fn xor_bytes(a: &[u8], b: &[u8]) -> Result<Vec<u8>> {
    if a.len() != b.len() {
        return Err(Error::Length {
            expected: a.len(),
            found: b.len(),
        });
    }
    Ok(a.iter().zip(b).map(|(x, y)| x ^ y).collect())
}

/// the input block that xors with `constant` to give `register`
pub fn recover_block(constant: &[u64], register: &[u64]) -> Result<Vec<u8>> {
    xor_bytes(&qwords_to_bytes(constant), &qwords_to_bytes(register))
}

pub fn candidate(prefix: &[u8], block: &[u8]) -> Vec<u8> {
    let mut flag = Vec::with_capacity(prefix.len() + block.len());
    flag.extend_from_slice(prefix);
    flag.extend_from_slice(block);
    flag
}
