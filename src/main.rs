use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use revflag::challenges::keychain::{DEFAULT_FLAG_FILE, DEFAULT_KEY_FILE};
use revflag::keys::{self, Transcript, DEFAULT_KEY_LEN, DEFAULT_KEY_VAR};
use revflag::r2_api::{FrameReader, KeyLocation, R2Api};
use revflag::{Error, Result, Session, SessionOption};

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::process;

fn main() {
    let start = keys::DEFAULT_FRAMES.start().to_string();
    let end = keys::DEFAULT_FRAMES.end().to_string();
    let key_len = DEFAULT_KEY_LEN.to_string();

    let matches = App::new("revflag")
        .version("0.1.0")
        .about("Recover flags from a few reversing challenges")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(Arg::with_name("verbose")
            .short("v")
            .long("verbose")
            .global(true)
            .help("Show verbose / debugging output"))
        .arg(Arg::with_name("no_color")
            .long("no-color")
            .global(true)
            .help("Do not colorize output"))
        .subcommand(SubCommand::with_name("list")
            .about("List the available challenges"))
        .subcommand(SubCommand::with_name("brainrot")
            .about("Solve the rotted brain for its input")
            .arg(Arg::with_name("constrain")
                .short("c")
                .long("constrain")
                .takes_value(true)
                .value_name("PATTERN")
                .help("Byte pattern the flag must match, eg. '[ -~]'")))
        .subcommand(SubCommand::with_name("xorox")
            .about("Recover the input xored against the SIMD constant"))
        .subcommand(SubCommand::with_name("keychain")
            .about("Undo the chain of xor keys on the encrypted flag")
            .arg(Arg::with_name("flag")
                .short("f")
                .long("flag")
                .takes_value(true)
                .default_value(DEFAULT_FLAG_FILE)
                .help("Encrypted flag blob"))
            .arg(Arg::with_name("keys")
                .short("k")
                .long("keys")
                .takes_value(true)
                .default_value(DEFAULT_KEY_FILE)
                .help("Hex keys, one per line")))
        .subcommand(SubCommand::with_name("dump-keys")
            .about("Dump the key of every frame to a file")
            .arg(Arg::with_name("path")
                .short("p")
                .long("path")
                .takes_value(true)
                .required_unless("from")
                .help("Path to the target binary"))
            .arg(Arg::with_name("from")
                .long("from")
                .takes_value(true)
                .conflicts_with("path")
                .help("Convert a saved x/Nbx transcript instead of debugging"))
            .arg(Arg::with_name("arg")
                .long("arg")
                .takes_value(true)
                .multiple(true)
                .help("Argument for the target program"))
            .arg(Arg::with_name("breakpoint")
                .short("b")
                .long("break")
                .takes_value(true)
                .help("Continue to this address or symbol before walking frames"))
            .arg(Arg::with_name("start")
                .long("start")
                .takes_value(true)
                .default_value(&start)
                .help("First frame to read"))
            .arg(Arg::with_name("end")
                .long("end")
                .takes_value(true)
                .default_value(&end)
                .help("Last frame to read"))
            .arg(Arg::with_name("len")
                .short("n")
                .long("len")
                .takes_value(true)
                .default_value(&key_len)
                .help("Key length in bytes"))
            .arg(Arg::with_name("var")
                .long("var")
                .takes_value(true)
                .default_value(DEFAULT_KEY_VAR)
                .help("Name of the key variable in each frame"))
            .arg(Arg::with_name("offset")
                .long("offset")
                .takes_value(true)
                .allow_hyphen_values(true)
                .help("Read the key at this offset from the frame's SP instead"))
            .arg(Arg::with_name("out")
                .short("o")
                .long("out")
                .takes_value(true)
                .default_value(DEFAULT_KEY_FILE)
                .help("Output file for the hex keys")))
        .get_matches();

    let debug = matches.is_present("verbose");
    let mut options = vec![
        SessionOption::Debug(debug),
        SessionOption::Color(!matches.is_present("no_color")),
    ];

    let result = match matches.subcommand() {
        ("list", _) => {
            let session = Session::new_with_options(&options);
            for challenge in &session.challenges {
                println!("{:<10} {}", challenge.name, challenge.about);
            }
            Ok(())
        }
        ("brainrot", Some(sub)) => {
            if let Some(pattern) = sub.value_of("constrain") {
                options.push(SessionOption::Pattern(pattern.to_owned()));
            }
            run_challenge("brainrot", &options)
        }
        ("xorox", _) => run_challenge("xorox", &options),
        ("keychain", Some(sub)) => {
            let flag = sub.value_of("flag").unwrap_or(DEFAULT_FLAG_FILE);
            let keys = sub.value_of("keys").unwrap_or(DEFAULT_KEY_FILE);
            options.push(SessionOption::FlagFile(flag.to_owned()));
            options.push(SessionOption::KeyFile(keys.to_owned()));
            run_challenge("keychain", &options)
        }
        ("dump-keys", Some(sub)) => dump_keys(sub, &options, debug),
        _ => Ok(()),
    };

    if let Err(e) = result {
        Session::new_with_options(&options).failure(&e.to_string());
        process::exit(1);
    }
}

fn run_challenge(name: &str, options: &[SessionOption]) -> Result<()> {
    let mut session = Session::new_with_options(options);
    session.run(name).map(|_| ())
}

fn parse_arg<T: std::str::FromStr>(sub: &ArgMatches, name: &str) -> Result<T> {
    let value = sub.value_of(name).unwrap_or_default();
    value
        .parse()
        .map_err(|_| Error::Usage(format!("bad value for --{}: {}", name, value)))
}

fn dump_keys(sub: &ArgMatches, options: &[SessionOption], debug: bool) -> Result<()> {
    let session = Session::new_with_options(options);
    let start: usize = parse_arg(sub, "start")?;
    let end: usize = parse_arg(sub, "end")?;
    let length: usize = parse_arg(sub, "len")?;
    let out_path = sub.value_of("out").unwrap_or(DEFAULT_KEY_FILE);
    let mut out = BufWriter::new(File::create(out_path)?);

    let count = if let Some(from) = sub.value_of("from") {
        let text = fs::read_to_string(from)?;
        let mut transcript = Transcript::new(&text, start);
        keys::extract_keys(&mut transcript, start..=end, length, &mut out, debug)?
    } else {
        let path = sub.value_of("path").unwrap_or_default();
        let mut r2api = R2Api::new(path, debug)?;

        let args: Vec<String> = sub
            .values_of("arg")
            .map(|v| v.map(str::to_owned).collect())
            .unwrap_or_default();
        r2api.debug_process(&args)?;

        if let Some(bp) = sub.value_of("breakpoint") {
            let addr = r2api.get_address(bp)?;
            r2api.breakpoint(addr)?;
            r2api.cont()?;
        }

        let location = match sub.value_of("offset") {
            Some(_) => KeyLocation::StackOffset(parse_arg(sub, "offset")?),
            None => {
                let var = sub.value_of("var").unwrap_or(DEFAULT_KEY_VAR);
                KeyLocation::Variable(var.to_owned())
            }
        };

        let mut reader = FrameReader::new(r2api, location);
        let count = keys::extract_keys(&mut reader, start..=end, length, &mut out, debug);
        reader.r2api.close();
        count?
    };

    out.flush()?;
    session.success(&format!("{} keys extracted to {}", count, out_path));
    Ok(())
}
