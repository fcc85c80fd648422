use crate::error::Result;
use crate::qword;
use crate::session::Session;

/// the constant the binary xors the input against
pub const CONSTANT: [u64; 4] = [
    0x2a8c7f3acdf36ffb,
    0x8cc2eef32660caaa,
    0xefa1fd61d7a3b592,
    0xa9ddc2d22a90025e,
];

/// ymm7 at the compare, as four qwords
pub const YMM7: [u64; 4] = [
    0x1eca2043bfc01980,
    0xd386a3ba753fbe9f,
    0x87d5cc1688d185ea,
    0xd4aebbb741cf3001,
];

pub const PREFIX: &[u8] = b"gigem";

pub fn solve(session: &mut Session) -> Result<Vec<u8>> {
    let block = qword::recover_block(&CONSTANT, &YMM7)?;
    session.debug(&format!("required input {}", hex::encode(&block)));

    let flag = qword::candidate(PREFIX, &block);
    session.info(&format!("Raw bytes: {:?}", String::from_utf8_lossy(&flag)));

    if flag.is_ascii() {
        session.success(&format!("ASCII: {}", String::from_utf8_lossy(&flag)));
    } else {
        session.failure("Contains non-ASCII bytes");
    }

    Ok(flag)
}
