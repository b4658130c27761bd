use clap::{App, Arg};
use dpsat::formula::dimacs::{parse, parse_file};
use dpsat::{SatResult, Solver, Stats};
use env_logger::{fmt, Builder, Target};
use log::{info, Level, LevelFilter, Record};
use std::env;
use std::io::Write;

fn main() {
    let matches = App::new("dpsat")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Decides satisfiability of a CNF formula by Davis-Putnam search")
        .arg(
            Arg::with_name("INPUT")
                .help("input file (in DIMACS CNF), stdin if omitted")
                .index(1),
        )
        .arg(Arg::with_name("stats").long("stats").help("print search statistics"))
        .arg(
            Arg::with_name("quiet")
                .short("q")
                .long("quiet")
                .help("don't print the model"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .multiple(true)
                .help("log more (repeat for debug and trace output)"),
        )
        .get_matches();

    init_logging(matches.occurrences_of("verbose"));

    let f = if let Some(path) = matches.value_of("INPUT") {
        info!("reading file '{}'", path);
        parse_file(path)
    } else {
        info!("reading from stdin");
        parse(std::io::stdin())
    };

    match f {
        Ok(f) => {
            info!("{} atoms, {} clauses", f.atom_count(), f.num_clauses());
            let mut solver = Solver::new(&f);
            let result = solver.solve();

            if matches.is_present("stats") {
                print_stats(&solver.stats());
            }

            let exit_code = match result {
                SatResult::Satisfiable(model) => {
                    println!("s SATISFIABLE");
                    if !matches.is_present("quiet") {
                        println!("v {} 0", model);
                    }
                    0
                }
                SatResult::Unsatisfiable => {
                    println!("s UNSATISFIABLE");
                    1
                }
            };
            std::process::exit(exit_code);
        }
        Err(e) => {
            eprintln!("parse error: {}", e);
            std::process::exit(-1);
        }
    }
}

fn init_logging(verbosity: u64) {
    let format = |buf: &mut fmt::Formatter, record: &Record| {
        if record.level() == Level::Info {
            writeln!(buf, "c {}", record.args())
        } else {
            writeln!(buf, "c {}: {}", record.level(), record.args())
        }
    };

    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    let mut builder = Builder::new();
    builder.target(Target::Stdout).format(format).filter(None, level);

    if let Ok(ref env_var) = env::var("RUST_LOG") {
        builder.parse_filters(env_var);
    }

    builder.init();
}

fn print_stats(stats: &Stats) {
    println!("c decisions:     {}", stats.decisions);
    println!("c pure literals: {}", stats.pure_literals);
    println!("c unit clauses:  {}", stats.unit_clauses);
    println!("c conflicts:     {}", stats.conflicts);
    println!("c max depth:     {}", stats.max_depth);
}
