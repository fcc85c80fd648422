use crate::error::Result;
use crate::session::Session;
use crate::xorchain::MaskChain;
use std::fs;

pub const DEFAULT_FLAG_FILE: &str = "encrypted_flag.bin";
pub const DEFAULT_KEY_FILE: &str = "keys.txt";

/// undo the whole chain of per frame keys, last key first
pub fn solve(session: &mut Session) -> Result<Vec<u8>> {
    let encrypted = fs::read(&session.flag_file)?;
    session.info(&format!("Encrypted flag length: {} bytes", encrypted.len()));

    let keys = fs::read_to_string(&session.key_file)?;
    let chain = MaskChain::from_hex_lines(&keys)?;
    session.debug(&format!("{} unique keys of {} bytes", chain.len(), chain.mask_len()));

    let flag = chain.reverse(&encrypted)?;
    session.success(&format!("Decrypted Flag: {}", String::from_utf8_lossy(&flag)));
    Ok(flag)
}
