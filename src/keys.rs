use crate::error::{Error, Result};
use crate::r2_api::R2Result;
use std::io::Write;
use std::ops::RangeInclusive;

/// frames of the recursive encryptor that hold a key
pub const DEFAULT_FRAMES: RangeInclusive<usize> = 4..=1003;
pub const DEFAULT_KEY_LEN: usize = 59;
pub const DEFAULT_KEY_VAR: &str = "key";

/// anything that can be walked frame by frame to read a key
pub trait KeySource {
    fn select_frame(&mut self, index: usize) -> R2Result<()>;
    fn read_key(&mut self, length: usize) -> R2Result<Vec<u8>>;
}

fn parse_byte(token: &str) -> Option<u8> {
    let digits = token.strip_prefix("0x")?;
    if digits.len() == 2 && digits.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')) {
        u8::from_str_radix(digits, 16).ok()
    } else {
        None
    }
}

/// bytes of one line of an `x/Nbx` dump, eg.
/// `0x7ffe603d0100: 0x45 0x65 0x41 0x15`
pub fn parse_dump_line(line: &str) -> Vec<u8> {
    for (pos, _) in line.match_indices(':') {
        let rest = &line[pos + 1..];
        if !rest.starts_with(char::is_whitespace) {
            continue;
        }

        let bytes: Vec<u8> = rest
            .split_whitespace()
            .map_while(parse_byte)
            .collect();

        if !bytes.is_empty() {
            return bytes;
        }
    }
    vec![]
}

pub fn parse_dump(text: &str) -> Vec<u8> {
    text.lines().flat_map(parse_dump_line).collect()
}

/// split a saved transcript into one dump per blank line separated block
pub fn parse_dump_blocks(text: &str) -> Vec<Vec<u8>> {
    let mut blocks = vec![];
    let mut current = vec![];

    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.extend(parse_dump_line(line));
        }
    }

    if !current.is_empty() {
        blocks.push(current);
    }
    blocks
}

/// keys captured earlier, the first block belongs to `first_frame`
pub struct Transcript {
    pub blocks: Vec<Vec<u8>>,
    pub first_frame: usize,
    selected: Option<usize>,
}

impl Transcript {
    pub fn new(text: &str, first_frame: usize) -> Self {
        Transcript {
            blocks: parse_dump_blocks(text),
            first_frame,
            selected: None,
        }
    }
}

impl KeySource for Transcript {
    fn select_frame(&mut self, index: usize) -> R2Result<()> {
        let block = index
            .checked_sub(self.first_frame)
            .filter(|b| *b < self.blocks.len())
            .ok_or_else(|| format!("no frame {}", index))?;

        self.selected = Some(block);
        Ok(())
    }

    fn read_key(&mut self, length: usize) -> R2Result<Vec<u8>> {
        let block = self.selected.ok_or_else(|| "no frame selected".to_owned())?;
        let bytes = &self.blocks[block];
        if bytes.len() < length {
            return Err(format!("block has {} bytes, wanted {}", bytes.len(), length));
        }
        Ok(bytes[..length].to_vec())
    }
}

/// walk `frames`, write each key as a hex line and return the count.
/// frames that can't be read are reported and skipped
pub fn extract_keys<S: KeySource, W: Write>(
    source: &mut S,
    frames: RangeInclusive<usize>,
    length: usize,
    out: &mut W,
    debug: bool,
) -> Result<usize> {
    let mut count = 0;

    for frame in frames {
        let key = source
            .select_frame(frame)
            .and_then(|_| source.read_key(length));

        match key {
            Ok(key) if !key.is_empty() => {
                writeln!(out, "{}", hex::encode(&key))?;
                count += 1;
                if debug {
                    println!("[+] Extracted {}-byte key from frame {}", key.len(), frame);
                }
            }
            Ok(_) => {}
            Err(e) => {
                println!("[-] Skipping frame {} (No key found)", frame);
                if debug {
                    println!("    {}", e);
                }
            }
        }
    }

    if count == 0 {
        return Err(Error::NoKeys);
    }
    Ok(count)
}
