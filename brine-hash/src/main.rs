use std::fs;
use std::io::{self, Read};
use std::process;

use brine_cshake::Custom;

const DIGEST_LEN: usize = 32;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    match args[1].as_str() {
        "hash" => cmd_hash(&args[2..]),
        "xof" => cmd_xof(&args[2..]),
        "custom" => cmd_custom(&args[2..]),
        "help" | "--help" | "-h" => print_usage(),
        other => {
            eprintln!("unknown command: {other}");
            print_usage();
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!("brine-hash — SHAKE256 / cSHAKE256 extendable-output hashing");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("  brine-hash hash [FILE...]              32-byte digests (or stdin if no files)");
    eprintln!("  brine-hash xof <LEN> [FILE]            LEN bytes of output");
    eprintln!("  brine-hash custom <NAME> <CUSTOM> [FILE]");
    eprintln!("                                         32-byte domain-separated digest");
}

fn cmd_hash(args: &[String]) {
    if args.is_empty() {
        let data = read_stdin();
        println!("{}", to_hex(&brine_cshake::shake(&data, DIGEST_LEN)));
    } else {
        for path in args {
            let data =
                fs::read(path).unwrap_or_else(|e| fatal(&format!("reading {path}: {e}")));
            let digest = to_hex(&brine_cshake::shake(&data, DIGEST_LEN));
            if args.len() > 1 {
                println!("{digest}  {path}");
            } else {
                println!("{digest}");
            }
        }
    }
}

fn cmd_xof(args: &[String]) {
    if args.is_empty() {
        eprintln!("usage: brine-hash xof <LEN> [FILE]");
        process::exit(1);
    }
    let len: usize = args[0]
        .parse()
        .unwrap_or_else(|_| fatal(&format!("invalid output length: {}", args[0])));
    let data = read_input(args.get(1));
    println!("{}", to_hex(&brine_cshake::shake(&data, len)));
}

fn cmd_custom(args: &[String]) {
    if args.len() < 2 {
        eprintln!("usage: brine-hash custom <NAME> <CUSTOM> [FILE]");
        process::exit(1);
    }
    let custom = Custom::new(args[0].as_bytes(), args[1].as_bytes())
        .unwrap_or_else(|e| fatal(&e.to_string()));
    let data = read_input(args.get(2));
    println!("{}", to_hex(&custom.once_to_bytes(&data, DIGEST_LEN)));
}

fn read_input(path: Option<&String>) -> Vec<u8> {
    match path {
        Some(path) => fs::read(path).unwrap_or_else(|e| fatal(&format!("reading {path}: {e}"))),
        None => read_stdin(),
    }
}

fn read_stdin() -> Vec<u8> {
    let mut data = Vec::new();
    io::stdin()
        .read_to_end(&mut data)
        .unwrap_or_else(|e| fatal(&format!("reading stdin: {e}")));
    data
}

fn to_hex(bytes: &[u8]) -> String {
    use std::fmt::Write;
    let mut s = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        let _ = write!(s, "{byte:02x}");
    }
    s
}

fn fatal(msg: &str) -> ! {
    eprintln!("error: {msg}");
    process::exit(1);
}
