use nerode::prelude::*;

use clap::{Arg, ArgAction, ArgMatches, Command};
use owo_colors::OwoColorize;
use tracing::{debug, info, trace};
use tracing_subscriber::{filter, prelude::*};

fn cli() -> clap::Command {
    Command::new("nerode")
        .about("Computes the Myhill-Nerode equivalence classes of an example DFA")
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbosity")
                .num_args(0..=1)
                .require_equals(true)
                .value_parser(["info", "debug", "trace"])
                .default_missing_value("info"),
        )
        .arg(
            Arg::new("sink")
                .long("sink")
                .action(ArgAction::SetTrue)
                .help("treat undefined transitions as leading into a rejecting sink"),
        )
}

fn setup_logging(matches: &ArgMatches) {
    let level = match matches
        .try_get_one::<String>("verbosity")
        .ok()
        .flatten()
        .map(|m| m.as_str())
    {
        Some("trace") => filter::LevelFilter::TRACE,
        Some("debug") => filter::LevelFilter::DEBUG,
        Some("info") => filter::LevelFilter::INFO,
        _ => filter::LevelFilter::WARN,
    };

    let stderr_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(stderr_log.with_filter(level))
        .init();

    trace!("setup {level} logging");
}

/// Builds the four state example in which `q0` and `q1` cannot be told apart.
fn example() -> Result<Dfa, AutomatonError<Id>> {
    let mut ids = IdAllocator::default();
    let mut dfa = Dfa::new();

    let q0 = dfa.add_state(ids.fresh(), true, false);
    let q1 = dfa.add_state(ids.fresh(), false, false);
    let q2 = dfa.add_state(ids.fresh(), false, false);
    let q3 = dfa.add_state(ids.fresh(), false, true);

    dfa.add_transition(q0, 'a', q3)?;
    dfa.add_transition(q1, 'a', q3)?;
    dfa.add_transition(q0, 'b', q2)?;
    dfa.add_transition(q1, 'b', q2)?;

    dfa.add_transition(q2, 'a', q0)?;
    dfa.add_transition(q2, 'b', q1)?;

    // q3 is a trap, which makes the automaton complete
    dfa.add_transition(q3, 'a', q3)?;
    dfa.add_transition(q3, 'b', q3)?;

    Ok(dfa)
}

fn verdict(valid: bool) -> String {
    if valid {
        "holds".green().to_string()
    } else {
        "violated".red().to_string()
    }
}

/// Checks reflexivity, symmetry and transitivity of the relation induced by `partition`.
fn equivalence_properties(dfa: &Dfa, partition: &Partition<Id>) {
    println!("\n{}", "Equivalence relation".bold());

    let states = dfa.states().collect::<Vec<_>>();
    let reflexive = states.iter().all(|q| partition.related(q, q));
    println!("1. reflexivity (x ~ x): {}", verdict(reflexive));

    match partition.iter().find(|class| class.len() >= 2) {
        Some(class) => {
            let mut members = class.iter();
            let (p, q) = (members.next(), members.next());
            if let (Some(p), Some(q)) = (p, q) {
                println!(
                    "2. symmetry ({p} ~ {q} implies {q} ~ {p}): {}",
                    verdict(partition.related(p, q) == partition.related(q, p))
                );
            }
        }
        None => println!("2. symmetry: no class with two states, holds vacuously"),
    }

    match partition.iter().find(|class| class.len() >= 3) {
        Some(class) => {
            let members = class.iter().take(3).collect::<Vec<_>>();
            let (x, y, z) = (members[0], members[1], members[2]);
            let transitive = !(partition.related(x, y) && partition.related(y, z))
                || partition.related(x, z);
            println!(
                "3. transitivity ({x} ~ {y} and {y} ~ {z} imply {x} ~ {z}): {}",
                verdict(transitive)
            );
        }
        None => println!("3. transitivity: no class with three states, holds by construction"),
    }

    println!(
        "   successors of related states are related: {}",
        verdict(partition.respects(dfa))
    );
}

pub fn main() {
    let matches = cli().get_matches();
    setup_logging(&matches);

    let options = if matches.get_flag("sink") {
        SolverOptions::default().with_undefined(UndefinedTransitions::Sink)
    } else {
        SolverOptions::default()
    };
    debug!("solving with {options:?}");

    let dfa = match example() {
        Ok(dfa) => dfa,
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(1);
        }
    };

    println!("{}", "Transition table".bold());
    println!("{}", dfa.transition_table());

    let table = dfa.solve_with(options);
    info!("fixed point reached after {} passes", table.passes());

    println!("\n{}", "Distinguishability".bold());
    println!("{}", table.render());
    for (pair, distinct) in table.iter() {
        if distinct {
            let word = table
                .witness(pair.lo(), pair.hi())
                .unwrap_or_default();
            println!("{}: {} by {}", pair.show(), "distinct".red(), word.show());
        } else {
            println!("{}: {}", pair.show(), "equivalent".green());
        }
    }

    let partition = dfa.partition(&table);
    println!("\n{}", "Equivalence classes".bold());
    for (i, class) in partition.iter().enumerate() {
        println!("class {i}: {}", class.show());
    }

    equivalence_properties(&dfa, &partition);
}
