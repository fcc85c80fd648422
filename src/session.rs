use crate::challenges::keychain::{DEFAULT_FLAG_FILE, DEFAULT_KEY_FILE};
use crate::challenges::{get_challenges, Challenge};
use crate::error::{Error, Result};
use crate::solver::PRINTABLE;
use colored::*;

#[derive(Debug, Clone, PartialEq)]
pub enum SessionOption {
    Debug(bool),        // enable debug output
    Color(bool),        // colorize status markers
    Pattern(String),    // byte class every solved byte must match
    FlagFile(String),   // encrypted flag blob
    KeyFile(String),    // hex keys, one per line
}

pub struct Session {
    pub challenges: Vec<Challenge>,
    pub debug: bool,
    pub pattern: String,
    pub flag_file: String,
    pub key_file: String,
}

impl Default for Session {
    fn default() -> Self {
        Session::new_with_options(&[])
    }
}

impl Session {
    pub fn new() -> Self {
        Session::default()
    }

    pub fn new_with_options(options: &[SessionOption]) -> Self {
        let mut session = Session {
            challenges: get_challenges(),
            debug: false,
            pattern: PRINTABLE.to_owned(),
            flag_file: DEFAULT_FLAG_FILE.to_owned(),
            key_file: DEFAULT_KEY_FILE.to_owned(),
        };

        for option in options {
            match option {
                SessionOption::Debug(debug) => session.debug = *debug,
                SessionOption::Color(color) => colored::control::set_override(*color),
                SessionOption::Pattern(pattern) => session.pattern = pattern.to_owned(),
                SessionOption::FlagFile(path) => session.flag_file = path.to_owned(),
                SessionOption::KeyFile(path) => session.key_file = path.to_owned(),
            }
        }

        session
    }

    /// run the named challenge and hand back the recovered flag
    pub fn run(&mut self, name: &str) -> Result<Vec<u8>> {
        let function = self
            .challenges
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.function)
            .ok_or_else(|| Error::UnknownChallenge(name.to_owned()))?;

        self.debug(&format!("running {}", name));
        function(self)
    }

    pub fn info(&self, msg: &str) {
        println!("{} {}", "[INFO]".blue(), msg);
    }

    pub fn success(&self, msg: &str) {
        println!("{} {}", "[+]".green(), msg);
    }

    pub fn failure(&self, msg: &str) {
        println!("{} {}", "[-]".red(), msg);
    }

    pub fn debug(&self, msg: &str) {
        if self.debug {
            println!("{} {}", "[DEBUG]".yellow(), msg);
        }
    }
}
