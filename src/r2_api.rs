use crate::keys::KeySource;
use r2pipe::R2Pipe;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

pub type R2Result<T> = Result<T, String>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BinInfo {
    pub arch: String,
    pub bits: u64,
    pub endian: String,
    pub os: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Information {
    pub bin: BinInfo,
}

/// one entry of the debugger backtrace
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub index: usize,
    pub pc: u64,
    pub sp: u64,
    pub frame_size: u64,
    pub name: String,
}

impl Frame {
    /// r2 has printed these fields as numbers and as hex strings
    /// depending on version, so read them loosely
    pub fn from_json(index: usize, json: &serde_json::Value) -> Frame {
        Frame {
            index: json_u64(&json["idx"]).map(|i| i as usize).unwrap_or(index),
            pc: json_u64(&json["pc"]).unwrap_or_default(),
            sp: json_u64(&json["sp"]).unwrap_or_default(),
            frame_size: json_u64(&json["frame_size"]).unwrap_or_default(),
            name: json["fname"].as_str().unwrap_or_default().to_owned(),
        }
    }

    /// address of a local in this frame. rbp based locals are relative to
    /// the frame pointer, which sits below the return address and saved fp
    pub fn var_address(&self, var: &Variable, ptr: u64) -> u64 {
        let base = if var.is_sp_based() {
            self.sp
        } else {
            self.sp
                .wrapping_add(self.frame_size)
                .wrapping_sub(2 * ptr)
        };
        base.wrapping_add(var.reference.offset as u64)
    }
}

pub fn json_u64(value: &serde_json::Value) -> Option<u64> {
    match value {
        serde_json::Value::Number(n) => n.as_u64(),
        serde_json::Value::String(s) => {
            let s = s.trim();
            if let Some(hex) = s.strip_prefix("0x") {
                u64::from_str_radix(hex, 16).ok()
            } else {
                s.parse().ok()
            }
        }
        _ => None,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VarRef {
    pub base: String,
    pub offset: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,

    #[serde(default)]
    pub kind: String,

    #[serde(rename = "ref")]
    pub reference: VarRef,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FunctionVars {
    #[serde(default)]
    pub sp: Vec<Variable>,

    #[serde(default)]
    pub bp: Vec<Variable>,
}

impl Variable {
    pub fn is_sp_based(&self) -> bool {
        self.reference.base.ends_with("sp")
    }
}

impl FunctionVars {
    pub fn find(&self, name: &str) -> Option<&Variable> {
        self.bp.iter().chain(self.sp.iter()).find(|v| v.name == name)
    }
}

#[derive(Clone)]
pub struct R2Api {
    pub r2p: Arc<Mutex<R2Pipe>>,
    pub info: Option<Information>,
    pub debug: bool,
}

impl R2Api {
    pub fn new(path: &str, debug: bool) -> R2Result<R2Api> {
        let r2p = R2Pipe::spawn(path, None).map_err(|e| e.to_string())?;
        let mut r2api = R2Api {
            r2p: Arc::new(Mutex::new(r2p)),
            info: None,
            debug,
        };

        r2api.get_info()?;
        Ok(r2api)
    }

    pub fn cmd(&mut self, cmd: &str) -> R2Result<String> {
        if self.debug {
            println!("r2> {}", cmd);
        }
        self.r2p.lock().map_err(|e| e.to_string())?.cmd(cmd).map_err(|e| e.to_string())
    }

    pub fn cmdj<T: DeserializeOwned>(&mut self, cmd: &str) -> R2Result<T> {
        let json = self.cmd(cmd)?;
        serde_json::from_str(json.as_str()).map_err(|e| format!("{}: {}", cmd, e))
    }

    pub fn get_info(&mut self) -> R2Result<Information> {
        if self.info.is_none() {
            self.info = Some(self.cmdj("ij")?);
        }
        self.info.clone().ok_or_else(|| "no info".to_owned())
    }

    pub fn ptr_size(&mut self) -> R2Result<u64> {
        Ok(self.get_info()?.bin.bits / 8)
    }

    /// reopen the file in debug mode with `args` for the target
    pub fn debug_process(&mut self, args: &[String]) -> R2Result<()> {
        self.cmd(&format!("ood {}", args.join(" "))).map(|_| ())
    }

    pub fn breakpoint(&mut self, addr: u64) -> R2Result<()> {
        self.cmd(&format!("db {}", addr)).map(|_| ())
    }

    pub fn cont(&mut self) -> R2Result<()> {
        self.cmd("dc").map(|_| ())
    }

    pub fn backtrace(&mut self) -> R2Result<Vec<Frame>> {
        let json: serde_json::Value = self.cmdj("dbtj")?;
        let frames = json.as_array().cloned().unwrap_or_default();
        Ok(frames
            .iter()
            .enumerate()
            .map(|(i, f)| Frame::from_json(i, f))
            .collect())
    }

    pub fn get_function_vars(&mut self, pc: u64) -> R2Result<FunctionVars> {
        self.cmdj(&format!("af @ {}; afvj @ {}", pc, pc))
    }

    pub fn read(&mut self, addr: u64, length: usize) -> R2Result<Vec<u8>> {
        self.cmdj(&format!("pxj {} @ {}", length, addr))
    }

    pub fn get_address(&mut self, symbol: &str) -> R2Result<u64> {
        let val = self.cmd(&format!("?v {}", symbol))?;
        let val = val.trim();
        u64::from_str_radix(val.trim_start_matches("0x"), 16)
            .map_err(|e| format!("bad address for {}: {}", symbol, e))
    }

    pub fn close(&mut self) {
        if let Ok(mut r2p) = self.r2p.lock() {
            r2p.close();
        }
    }
}

/// where the key lives relative to a stack frame
#[derive(Debug, Clone, PartialEq)]
pub enum KeyLocation {
    /// a named local of the frame's function
    Variable(String),
    /// a fixed offset from the frame's stack pointer
    StackOffset(i64),
}

/// reads the key of each frame out of a live r2 debug session
pub struct FrameReader {
    pub r2api: R2Api,
    pub location: KeyLocation,
    frames: Option<Vec<Frame>>,
    selected: Option<Frame>,
}

impl FrameReader {
    pub fn new(r2api: R2Api, location: KeyLocation) -> Self {
        FrameReader {
            r2api,
            location,
            frames: None,
            selected: None,
        }
    }

    fn key_address(&mut self, frame: &Frame) -> R2Result<u64> {
        match &self.location {
            KeyLocation::StackOffset(offset) => Ok(frame.sp.wrapping_add(*offset as u64)),
            KeyLocation::Variable(name) => {
                let name = name.to_owned();
                let vars = self.r2api.get_function_vars(frame.pc)?;
                let var = vars
                    .find(&name)
                    .ok_or_else(|| format!("no variable {} in {}", name, frame.name))?;

                let ptr = if var.is_sp_based() {
                    0
                } else {
                    self.r2api.ptr_size()?
                };
                Ok(frame.var_address(var, ptr))
            }
        }
    }
}

impl KeySource for FrameReader {
    fn select_frame(&mut self, index: usize) -> R2Result<()> {
        if self.frames.is_none() {
            self.frames = Some(self.r2api.backtrace()?);
        }

        let frame = self
            .frames
            .as_ref()
            .and_then(|frames| frames.iter().find(|f| f.index == index))
            .cloned()
            .ok_or_else(|| format!("no frame {}", index))?;

        self.selected = Some(frame);
        Ok(())
    }

    fn read_key(&mut self, length: usize) -> R2Result<Vec<u8>> {
        let frame = self
            .selected
            .clone()
            .ok_or_else(|| "no frame selected".to_owned())?;

        let addr = self.key_address(&frame)?;
        self.r2api.read(addr, length)
    }
}
