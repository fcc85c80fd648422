#[test]
fn think_fixed_grid() {
    use crate::brain::Brain;
    use crate::challenges::brainrot::HEALTHY_BRAIN;

    let mut brain = Brain::new(HEALTHY_BRAIN);
    let input: Vec<u8> = (0..10).collect();
    let thought = brain.think(&input).unwrap();

    assert_eq!(
        thought,
        [2049, 1283, 3186, 3567, 3344, 3263, 4164, 2409, 2578, 3717]
    );
    // rows moved up one, the thought is the new last row
    assert_eq!(brain.neurons()[0], HEALTHY_BRAIN[1]);
    assert_eq!(brain.neurons()[8], HEALTHY_BRAIN[9]);
    assert_eq!(brain.neurons()[9], thought);
}

#[test]
fn think_wrong_size() {
    use crate::brain::Brain;
    use crate::challenges::brainrot::HEALTHY_BRAIN;
    use crate::error::Error;

    let mut brain = Brain::new(HEALTHY_BRAIN);
    match brain.think(b"short") {
        Err(Error::ThoughtSize { expected, found }) => {
            assert_eq!(expected, 10);
            assert_eq!(found, 5);
        }
        other => panic!("unexpected {:?}", other),
    }
    // nothing moved
    assert_eq!(brain.neurons(), &HEALTHY_BRAIN);
}

#[test]
fn ponder_matches_think() {
    use crate::brain::Brain;
    use crate::challenges::brainrot::HEALTHY_BRAIN;
    use crate::value::byte_values;

    let input = b"gigem{what";
    let brain = Brain::new(HEALTHY_BRAIN);
    let pondered: Vec<u64> = brain
        .ponder(&byte_values(input))
        .unwrap()
        .iter()
        .map(|v| v.as_u64().unwrap())
        .collect();

    let mut thinker = brain.clone();
    let thought = thinker.think(input).unwrap();
    assert_eq!(pondered, thought.to_vec());
    // pondering leaves the brain alone
    assert_eq!(brain.neurons(), &HEALTHY_BRAIN);
}

#[test]
fn rot_cells() {
    use crate::brain::Brain;

    let mut brain = Brain::new([[0; 10]; 10]);
    let data: Vec<u8> = (1..=11).collect();
    brain.rot(&data);

    let n = brain.neurons();
    assert_eq!(n[7][3], 1 ^ 11); // bytes 0 and 10 land on the same cell
    assert_eq!(n[0][2], 2);
    assert_eq!(n[3][1], 3);
    assert_eq!(n[6][0], 4);
    assert_eq!(n[9][9], 5);
    assert_eq!(n[2][8], 6);
    assert_eq!(n[5][7], 7);
    assert_eq!(n[8][6], 8);
    assert_eq!(n[1][5], 9);
    assert_eq!(n[4][4], 10);

    let touched: usize = n.iter().flatten().filter(|c| **c != 0).count();
    assert_eq!(touched, 10);
}

#[test]
fn brainstems() {
    use crate::brain::Brain;
    use crate::challenges::brainrot::{rotted_brain, HEALTHY_BRAIN};

    assert_eq!(
        Brain::new(HEALTHY_BRAIN).brainstem(),
        "3a51cda6448f6d9669f0454d6a4a83c9321eed79fd78c6542551adf3048c7089"
    );
    assert_eq!(
        rotted_brain().brainstem(),
        "c81bea4dbb78075fe90e4c2bf572e36f66662135a74d9e61d05352181eaecda0"
    );
}

#[test]
fn brainrot_phrase() {
    use crate::challenges::brainrot::brainrot;

    let phrase = String::from_utf8(brainrot()).unwrap();
    assert_eq!(phrase.len(), 1198);
    assert!(phrase.starts_with("Skibidi, Skibidi toilet"));
    assert!(phrase.ends_with("coffee, idksterling"));
}

#[test]
fn verify_known_flag() {
    use crate::challenges::brainrot::{rotted_brain, BRAINSTEM, REQUIRED_THOUGHTS};
    use crate::recover::verify;

    let flag = b"gigem{whats_up_my_fellow_skibidi_sigmas}";
    let mut brain = rotted_brain();
    verify(&mut brain, flag, &REQUIRED_THOUGHTS, BRAINSTEM).unwrap();
    assert_eq!(brain.brainstem(), BRAINSTEM);
}

#[test]
fn verify_rejects() {
    use crate::challenges::brainrot::{rotted_brain, BRAINSTEM, REQUIRED_THOUGHTS};
    use crate::error::Error;
    use crate::recover::verify;

    let mut flag = b"gigem{whats_up_my_fellow_skibidi_sigmas}".to_vec();
    flag[25] = b'X';
    match verify(&mut rotted_brain(), &flag, &REQUIRED_THOUGHTS, BRAINSTEM) {
        Err(Error::ThoughtMismatch { chunk }) => assert_eq!(chunk, 2),
        other => panic!("unexpected {:?}", other),
    }

    match verify(&mut rotted_brain(), b"gigem{", &REQUIRED_THOUGHTS, BRAINSTEM) {
        Err(Error::Length { expected, found }) => {
            assert_eq!(expected, 40);
            assert_eq!(found, 6);
        }
        other => panic!("unexpected {:?}", other),
    }

    // right thoughts for the first chunk only, against a different brainstem
    let flag = b"gigem{what";
    match verify(&mut rotted_brain(), flag, &REQUIRED_THOUGHTS[..1], BRAINSTEM) {
        Err(Error::Fingerprint { expected, .. }) => assert_eq!(expected, BRAINSTEM),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn solve_first_chunk() {
    use crate::challenges::brainrot::{rotted_brain, REQUIRED_THOUGHTS};
    use crate::recover::solve_chunk;
    use crate::solver::PRINTABLE;

    let brain = rotted_brain();
    let chunk = solve_chunk(&brain, &REQUIRED_THOUGHTS[0], PRINTABLE, 0).unwrap();
    assert!(chunk.iter().all(|b| (0x20..=0x7e).contains(b)));
    assert_eq!(&chunk, b"gigem{what");

    // solving doesn't advance the brain
    assert_eq!(brain, rotted_brain());
}

#[test]
fn solve_chunk_unsat() {
    use crate::challenges::brainrot::{rotted_brain, REQUIRED_THOUGHTS};
    use crate::error::Error;
    use crate::recover::solve_chunk;

    let brain = rotted_brain();
    match solve_chunk(&brain, &REQUIRED_THOUGHTS[0], "[a]", 3) {
        Err(Error::Unsat { chunk }) => assert_eq!(chunk, 3),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn solve_chunk_bad_pattern() {
    use crate::challenges::brainrot::{rotted_brain, REQUIRED_THOUGHTS};
    use crate::error::Error;
    use crate::recover::solve_chunk;

    let brain = rotted_brain();
    for pattern in &["ab", "gigem", "[]"] {
        match solve_chunk(&brain, &REQUIRED_THOUGHTS[0], pattern, 0) {
            Err(Error::Usage(_)) => {}
            other => panic!("unexpected {:?} for {}", other, pattern),
        }
    }
}

#[test]
fn brainrot() {
    use crate::session::Session;

    let mut session = Session::new();
    let flag = session.run("brainrot").unwrap();
    assert_eq!(flag, b"gigem{whats_up_my_fellow_skibidi_sigmas}");
}

#[test]
fn recover_advances_brain() {
    use crate::challenges::brainrot::{rotted_brain, BRAINSTEM, REQUIRED_THOUGHTS};
    use crate::recover::recover;
    use crate::solver::PRINTABLE;

    let mut brain = rotted_brain();
    let flag = recover(&mut brain, &REQUIRED_THOUGHTS, PRINTABLE).unwrap();
    assert_eq!(flag.len(), 40);
    assert!(flag.iter().all(|b| b.is_ascii_graphic() || *b == b' '));
    assert_eq!(brain.brainstem(), BRAINSTEM);
    assert_eq!(brain.neurons()[9], REQUIRED_THOUGHTS[3]);
}

#[test]
fn values() {
    use crate::value::vc;

    assert_eq!((vc(3) * vc(5) + vc(1)).as_u64(), Some(16));
    assert_eq!((vc(u64::MAX) + vc(2)).as_u64(), Some(1));
    assert_eq!((vc(0xf0) ^ vc(0xff)).as_u64(), Some(0x0f));
    assert_eq!(vc(7).eq(&vc(7)).as_u64(), Some(1));
    assert_eq!(vc(7).ult(&vc(7)).as_u64(), Some(0));
    assert_eq!(vc(0xabcd).slice(15, 8).as_u64(), Some(0xab));
    assert!(vc(1).is_concrete());
}

#[test]
fn symbolic_values() {
    use crate::solver::Solver;
    use crate::value::vc;

    let mut solver = Solver::new();
    let y = solver.symbolic_value("y", 64);
    assert!(y.is_symbolic());

    let expr = vc(7) * y.clone() + vc(3);
    assert_eq!(expr.size(), 64);
    solver.assert(&expr.eq(&vc(38)));
    assert_eq!(solver.eval_to_u64(&y), Some(5));

    // narrower operands are zero extended
    let b = solver.symbolic_value("b", 8);
    let wide = b.uext(56) + y.clone();
    assert_eq!(wide.size(), 64);

    solver.push();
    solver.assert(&y.eq(&vc(6)));
    assert!(!solver.is_sat());
    solver.pop();
    assert!(solver.is_sat());
}

#[test]
fn constrain_bytes() {
    use crate::solver::Solver;
    use crate::value::{vc, Value};

    let mut solver = Solver::new();
    let digit = solver.symbolic_value("digit", 8);
    solver.constrain_bytes_value(&digit, "[0-9]").unwrap();
    solver.assert(&digit.ugte(&vc(b'5' as u64)));
    let v = solver.eval_to_u64(&digit).unwrap();
    assert!((b'5' as u64..=b'9' as u64).contains(&v));

    let word = solver.bv("word", 24);
    solver.constrain_bytes(&word, "ABC").unwrap();
    let bytes: Vec<Value> = (0..3)
        .map(|i| Value::Symbolic(word.slice(8 * i + 7, 8 * i)))
        .collect();
    assert_eq!(solver.evaluate_bytes(&bytes).unwrap(), b"ABC");

    let short = solver.bv("short", 16);
    assert!(solver.constrain_bytes(&short, "ABC").is_err());
    assert!(solver.constrain_bytes(&short, "[]").is_err());
    assert!(solver.constrain_bytes(&short, "AB").is_ok());
}

#[test]
fn mask_chain_involution() {
    use crate::xorchain::MaskChain;
    use rand::Rng;

    let mut rng = rand::thread_rng();
    let plain: Vec<u8> = (0..59).map(|_| rng.gen()).collect();
    let masks: Vec<Vec<u8>> = (0..100)
        .map(|_| (0..59).map(|_| rng.gen()).collect())
        .collect();

    let chain = MaskChain::new(masks).unwrap();
    assert_eq!(chain.len(), 100);
    assert_eq!(chain.mask_len(), 59);

    let encrypted = chain.apply(&plain).unwrap();
    assert_eq!(chain.reverse(&encrypted).unwrap(), plain);
    assert_eq!(chain.apply(&chain.reverse(&plain).unwrap()).unwrap(), plain);
}

#[test]
fn mask_chain_order() {
    use crate::xorchain::MaskChain;

    let chain = MaskChain::new(vec![vec![0x01, 0x02], vec![0x10, 0x20]]).unwrap();
    assert_eq!(chain.apply(&[0, 0]).unwrap(), vec![0x11, 0x22]);
    assert_eq!(chain.reverse(&[0x11, 0x22]).unwrap(), vec![0, 0]);
}

#[test]
fn mask_chain_rejects() {
    use crate::error::Error;
    use crate::xorchain::MaskChain;

    match MaskChain::new(vec![]) {
        Err(Error::EmptyChain) => {}
        other => panic!("unexpected {:?}", other),
    }

    match MaskChain::new(vec![vec![1, 2], vec![3, 4], vec![1, 2]]) {
        Err(Error::DuplicateMask { index }) => assert_eq!(index, 2),
        other => panic!("unexpected {:?}", other),
    }

    match MaskChain::new(vec![vec![1, 2], vec![3]]) {
        Err(Error::MaskLength {
            index,
            expected,
            found,
        }) => {
            assert_eq!((index, expected, found), (1, 2, 1));
        }
        other => panic!("unexpected {:?}", other),
    }

    let chain = MaskChain::new(vec![vec![1, 2], vec![3, 4]]).unwrap();
    match chain.reverse(&[1, 2, 3]) {
        Err(Error::MaskLength { index, .. }) => assert_eq!(index, 1),
        other => panic!("unexpected {:?}", other),
    }

    match MaskChain::from_hex_lines("0102\nzz\n") {
        Err(Error::Hex(_)) => {}
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn mask_chain_hex_lines() {
    use crate::xorchain::MaskChain;

    let chain = MaskChain::from_hex_lines("  0a0b0c\n\n0d0e0f  \r\n").unwrap();
    assert_eq!(chain.masks(), &[vec![0x0a, 0x0b, 0x0c], vec![0x0d, 0x0e, 0x0f]]);
}

#[test]
fn xorox() {
    use crate::challenges::xorox::{CONSTANT, PREFIX, YMM7};
    use crate::qword::{candidate, qwords_to_bytes, recover_block, xor_bytes};

    let block = recover_block(&CONSTANT, &YMM7).unwrap();
    assert_eq!(block.len(), 32);
    assert_eq!(
        candidate(PREFIX, &block),
        b"gigem{v3ry_F45t_SIMD_x0r_w1th_2_keys}".to_vec()
    );

    // xor back with either operand gives the other
    let constant = qwords_to_bytes(&CONSTANT);
    let register = qwords_to_bytes(&YMM7);
    assert_eq!(xor_bytes(&block, &constant).unwrap(), register);
    assert_eq!(xor_bytes(&block, &register).unwrap(), constant);
}

#[test]
fn qwords_little_endian() {
    use crate::error::Error;
    use crate::qword::{qwords_to_bytes, xor_bytes};

    assert_eq!(
        qwords_to_bytes(&[0x0807060504030201, 0x11]),
        vec![1, 2, 3, 4, 5, 6, 7, 8, 0x11, 0, 0, 0, 0, 0, 0, 0]
    );

    match xor_bytes(&[1, 2], &[1]) {
        Err(Error::Length { expected, found }) => assert_eq!((expected, found), (2, 1)),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn dump_lines() {
    use crate::keys::{parse_dump, parse_dump_blocks, parse_dump_line};

    assert_eq!(
        parse_dump_line("0x7ffe603d0100: 0x45 0x65 0x41 0x15 0x57 0xc0 0xdb 0xda"),
        vec![0x45, 0x65, 0x41, 0x15, 0x57, 0xc0, 0xdb, 0xda]
    );
    assert_eq!(
        parse_dump_line("0x7ffe603d0100 <key>:\t0x01\t0x02"),
        vec![0x01, 0x02]
    );
    assert!(parse_dump_line("No symbol \"key\" in current context.").is_empty());
    assert!(parse_dump_line("#4  0x0000555555555189 in encrypt ()").is_empty());

    let text = "0x10: 0x01 0x02\n0x12: 0x03\n\n0x20: 0xff\n";
    assert_eq!(parse_dump(text), vec![1, 2, 3, 0xff]);
    assert_eq!(parse_dump_blocks(text), vec![vec![1, 2, 3], vec![0xff]]);
}

#[test]
fn extract_from_transcript() {
    use crate::keys::{extract_keys, Transcript};
    use crate::xorchain::MaskChain;

    let text = "0x10: 0x01 0x02\n\n0x20: 0x03 0x04\n\n0x30: 0x05\n";
    let mut transcript = Transcript::new(text, 4);
    let mut out = vec![];

    // frame 6 is short and frame 7 doesn't exist, both are skipped
    let count = extract_keys(&mut transcript, 4..=7, 2, &mut out, false).unwrap();
    assert_eq!(count, 2);

    let written = String::from_utf8(out).unwrap();
    assert_eq!(written, "0102\n0304\n");

    let chain = MaskChain::from_hex_lines(&written).unwrap();
    assert_eq!(chain.reverse(&[0x02, 0x06]).unwrap(), vec![0, 0]);
}

#[test]
fn extract_nothing() {
    use crate::error::Error;
    use crate::keys::{extract_keys, Transcript};

    let mut transcript = Transcript::new("garbage\n", 4);
    let mut out = vec![];
    match extract_keys(&mut transcript, 4..=10, 59, &mut out, false) {
        Err(Error::NoKeys) => {}
        other => panic!("unexpected {:?}", other),
    }
    assert!(out.is_empty());
}

#[test]
fn backtrace_frames() {
    use crate::r2_api::{json_u64, Frame};

    let json: serde_json::Value = serde_json::from_str(
        r#"[{"idx":0,"pc":4198742,"sp":"0x7ffe603d0100","frame_size":96,"fname":"encrypt"},
            {"pc":"0x401156","sp":140730511409408}]"#,
    )
    .unwrap();
    let frames: Vec<Frame> = json
        .as_array()
        .unwrap()
        .iter()
        .enumerate()
        .map(|(i, f)| Frame::from_json(i, f))
        .collect();

    assert_eq!(frames[0].pc, 4198742);
    assert_eq!(frames[0].sp, 0x7ffe603d0100);
    assert_eq!(frames[0].frame_size, 96);
    assert_eq!(frames[0].name, "encrypt");
    assert_eq!(frames[1].index, 1);
    assert_eq!(frames[1].pc, 0x401156);
    assert_eq!(frames[1].sp, 140730511409408);

    assert_eq!(json_u64(&serde_json::json!("42")), Some(42));
    assert_eq!(json_u64(&serde_json::json!(null)), None);
}

#[test]
fn function_vars() {
    use crate::r2_api::FunctionVars;

    let vars: FunctionVars = serde_json::from_str(
        r#"{"reg":[{"name":"arg1","kind":"reg","type":"int64_t","ref":"rdi"}],
            "sp":[{"name":"var_8h","kind":"var","type":"int64_t","ref":{"base":"rsp","offset":8}}],
            "bp":[{"name":"key","kind":"var","type":"char *","ref":{"base":"rbp","offset":-80}}]}"#,
    )
    .unwrap();

    let key = vars.find("key").unwrap();
    assert_eq!(key.reference.base, "rbp");
    assert_eq!(key.reference.offset, -80);
    assert!(vars.find("arg1").is_none());
}

#[test]
fn var_addresses() {
    use crate::r2_api::{Frame, FunctionVars};

    let vars: FunctionVars = serde_json::from_str(
        r#"{"sp":[{"name":"var_8h","kind":"var","ref":{"base":"rsp","offset":8}}],
            "bp":[{"name":"key","kind":"var","ref":{"base":"rbp","offset":-80}}]}"#,
    )
    .unwrap();
    let key = vars.find("key").unwrap();
    let local = vars.find("var_8h").unwrap();

    let frame = Frame {
        index: 4,
        pc: 0x401156,
        sp: 0x7ffe603d0100,
        frame_size: 96,
        name: "encrypt".to_owned(),
    };
    assert_eq!(frame.var_address(local, 8), 0x7ffe603d0108);
    assert_eq!(frame.var_address(key, 8), 0x7ffe603d0100 + 96 - 16 - 80);

    // garbage from dbtj must not overflow
    let bad = Frame {
        sp: u64::MAX - 4,
        frame_size: u64::MAX,
        ..frame
    };
    assert_eq!(
        bad.var_address(key, 8),
        (u64::MAX - 4)
            .wrapping_add(u64::MAX)
            .wrapping_sub(16)
            .wrapping_sub(80)
    );
}

#[test]
fn session_runs() {
    use crate::error::Error;
    use crate::session::Session;

    let mut session = Session::new();
    assert_eq!(session.challenges.len(), 3);
    assert_eq!(
        session.run("xorox").unwrap(),
        b"gigem{v3ry_F45t_SIMD_x0r_w1th_2_keys}".to_vec()
    );

    match session.run("nope") {
        Err(Error::UnknownChallenge(name)) => assert_eq!(name, "nope"),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn keychain_files() {
    use crate::session::{Session, SessionOption};
    use crate::xorchain::MaskChain;
    use rand::Rng;
    use std::fs;

    let mut rng = rand::thread_rng();
    let flag = b"gigem{per_frame_keys_all_the_way_down}".to_vec();
    let masks: Vec<Vec<u8>> = (0..32)
        .map(|_| (0..flag.len()).map(|_| rng.gen()).collect())
        .collect();
    let chain = MaskChain::new(masks).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let flag_file = dir.path().join("encrypted_flag.bin");
    let key_file = dir.path().join("keys.txt");

    fs::write(&flag_file, chain.apply(&flag).unwrap()).unwrap();
    let lines: Vec<String> = chain.masks().iter().map(hex::encode).collect();
    fs::write(&key_file, lines.join("\n")).unwrap();

    let options = [
        SessionOption::FlagFile(flag_file.to_string_lossy().into_owned()),
        SessionOption::KeyFile(key_file.to_string_lossy().into_owned()),
    ];
    let mut session = Session::new_with_options(&options);
    assert_eq!(session.run("keychain").unwrap(), flag);
}
