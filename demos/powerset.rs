use std::path::PathBuf;

use clap::Parser;
use num_bigint::BigUint;

use zdd_rs::factory::Factory;

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Number of keys in the universe.
    #[arg(value_name = "INT", default_value = "16")]
    n: u32,

    /// Write the built families as a Graphviz file.
    #[clap(long, value_name = "PATH")]
    dot: Option<PathBuf>,

    /// Run garbage collection at the end.
    #[clap(long)]
    gc: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let time_total = std::time::Instant::now();

    let args = Cli::parse();
    println!("args = {:?}", args);

    let factory: Factory<u32> = Factory::default();
    println!("factory = {:?}", factory);

    // The powerset of {1..n}: every key is taken and skipped alike, so the
    // whole family fits in n nodes.
    let n = args.n;
    println!("Building the powerset of {{1..{}}}", n);
    let mut powerset = factory.one();
    for key in (1..=n).rev() {
        powerset = factory.make_node(key, &powerset, &powerset);
    }
    println!(
        "powerset holds {} sets in {} live nodes",
        factory.count(&powerset),
        factory.live_nodes()
    );

    // The same shape one level down: the powerset of {2..n}.
    let mut tail = factory.one();
    for key in (2..=n).rev() {
        tail = factory.make_node(key, &tail, &tail);
    }

    // Sets containing 1 are everything minus the 1-free sets.
    let with_one = factory.subtraction(&powerset, &tail);
    println!("sets containing 1: {}", factory.count(&with_one));
    let expected = if n == 0 {
        BigUint::ZERO
    } else {
        BigUint::from(1u64) << (n - 1)
    };
    assert_eq!(factory.count(&with_one), expected);

    // The two halves partition the powerset.
    assert_eq!(factory.union(&with_one, &tail), powerset);
    assert_eq!(factory.intersection(&with_one, &tail), factory.zero());
    assert_eq!(factory.symmetric_difference(&with_one, &tail), powerset);

    // Spot checks through independent membership walks.
    assert!(powerset.contains(&[]));
    if n >= 2 {
        println!("powerset contains {{1, 2}}: {}", powerset.contains(&[1, 2]));
        println!("with_one contains {{2}}: {}", with_one.contains(&[2]));
    }
    if n <= 4 {
        println!("powerset = {}", powerset.to_set_string());
        println!("with_one = {}", with_one.to_set_string());
    }

    let stats = factory.stats();
    println!(
        "union cache: {} hits, {} misses",
        stats.union.hits, stats.union.misses
    );
    println!(
        "subtraction cache: {} hits, {} misses",
        stats.subtraction.hits, stats.subtraction.misses
    );
    println!(
        "created {} nodes, {} live",
        stats.created_nodes, stats.live_nodes
    );

    if let Some(path) = &args.dot {
        let dot = factory.to_dot(&[powerset.clone(), with_one.clone()])?;
        std::fs::write(path, dot)?;
        println!("Wrote {}", path.display());
    }

    if args.gc {
        println!("GC...");
        drop(tail);
        drop(with_one);
        factory.collect_garbage();
        println!("factory = {:?}", factory);
    }

    let time_total = time_total.elapsed();
    println!("Done in {:.3} s", time_total.as_secs_f64());

    Ok(())
}
