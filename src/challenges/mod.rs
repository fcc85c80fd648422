use crate::error::Result;
use crate::session::Session;

pub mod brainrot;
pub mod keychain;
pub mod xorox;

pub type ChallengeMethod = fn(&mut Session) -> Result<Vec<u8>>;

pub struct Challenge {
    pub name: String,
    pub about: String,
    pub function: ChallengeMethod,
}

pub fn make_challenge(name: &str, about: &str, function: ChallengeMethod) -> Challenge {
    Challenge {
        name: String::from(name),
        about: String::from(about),
        function,
    }
}

// get a vec of all available challenges
pub fn get_challenges() -> Vec<Challenge> {
    vec![
        make_challenge(
            "brainrot",
            "solve the rotted 10x10 brain for its input, chunk by chunk",
            brainrot::solve,
        ),
        make_challenge(
            "keychain",
            "undo a chain of per frame xor keys on the encrypted flag",
            keychain::solve,
        ),
        make_challenge(
            "xorox",
            "xor the simd constant with ymm7 to get the input",
            xorox::solve,
        ),
    ]
}
