//! Inserts random keys and optionally verifies the tree after every insert.
//!
//! Usage: `random_inserts [--test-size N] [--check-integrity] [--verbose]`

use std::env;
use std::process;
use std::time::Instant;

use log::{debug, error, info, trace, LevelFilter};
use rand::Rng;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use avltree::{verify, AvlTree};

struct Options {
    test_size: usize,
    check_integrity: bool,
    level: LevelFilter,
}

fn parse_args() -> Result<Options, String> {
    let mut options = Options {
        test_size: 16_384,
        check_integrity: false,
        level: LevelFilter::Info,
    };
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--test-size" => {
                let value = args.next().ok_or("--test-size expects a value")?;
                options.test_size = value
                    .parse()
                    .map_err(|err| format!("invalid --test-size {value:?}: {err}"))?;
            }
            "--check-integrity" => options.check_integrity = true,
            "--verbose" => options.level = LevelFilter::Trace,
            other => return Err(format!("unknown argument {other:?}")),
        }
    }
    Ok(options)
}

fn main() {
    let options = match parse_args() {
        Ok(options) => options,
        Err(err) => {
            eprintln!("{err}");
            process::exit(2);
        }
    };
    TermLogger::init(
        options.level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .unwrap();

    info!("Inserting {} random numbers...", options.test_size);
    let mut rng = rand::thread_rng();
    let mut tree = AvlTree::new();
    let mut collisions = 0usize;
    let begin = Instant::now();

    for i in 0..options.test_size {
        let num: i64 = rng.gen();
        if i == 0 || (i + 1) % 1000 == 0 {
            trace!("Insert #{}: {num}", i + 1);
        }
        if tree.find(&num).is_some() {
            debug!("{num} already inserted in tree.");
            collisions += 1;
            continue;
        }
        tree.insert(num, num);
        if options.check_integrity {
            if let Err(violation) = verify(&tree) {
                error!("Integrity check failed after inserting {num}: {violation}");
                process::exit(1);
            }
        }
    }

    let elapsed = begin.elapsed();
    if collisions > 0 {
        debug!(
            "Supposed to insert {} numbers, but got {collisions} collision(s).",
            options.test_size
        );
    }
    if options.test_size - collisions != tree.size() {
        error!("Tree size does not match expected size after insertions");
        process::exit(1);
    }
    info!(
        "Done! size: {}, height: {}, {:.3} seconds",
        tree.size(),
        tree.height(),
        elapsed.as_secs_f64()
    );
}
