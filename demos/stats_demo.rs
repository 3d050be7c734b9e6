use std::collections::hash_map::RandomState;

use clap::Parser;
use hop_map::HashMap;

#[derive(Parser, Debug)]
struct Args {
    #[arg(short = 'c', long = "target_capacity", default_value_t = 1000)]
    target_capacity: usize,

    /// Remove every n-th key after filling, to show swap-with-last removal.
    #[arg(short = 'r', long = "remove_every", default_value_t = 0)]
    remove_every: u64,
}

fn print_histogram(histogram: &[usize]) {
    let total: usize = histogram.iter().sum();
    let widest = histogram.iter().copied().max().unwrap_or(0).max(1);
    println!("=== Probe Histogram ===");
    for (offset, &count) in histogram.iter().enumerate() {
        if count == 0 {
            continue;
        }
        let bar = "#".repeat(count * 50 / widest);
        println!(
            "{offset:>3}: {count:>8} ({:>6.2}%) {bar}",
            count as f64 / total.max(1) as f64 * 100.0
        );
    }
}

fn main() {
    let args = Args::parse();

    println!(
        "Creating HashMap with target capacity: {}",
        args.target_capacity
    );

    let mut map: HashMap<u64, u64, RandomState> =
        HashMap::with_capacity_and_hasher(args.target_capacity, RandomState::new());
    let initial_capacity = map.capacity();

    println!("Actual capacity: {}", initial_capacity);
    println!("Filling map with u64 keys...");

    let mut growths = 0;
    let mut capacity = initial_capacity;
    for key in 0..args.target_capacity as u64 {
        if let Err(err) = map.set(key, key * 2) {
            eprintln!("Insert of {key} failed: {err}");
            return;
        }
        if map.capacity() != capacity {
            growths += 1;
            capacity = map.capacity();
        }
    }

    println!("Inserted {} entries into map", map.len());
    println!("Growth events after preallocation: {growths}");

    if args.remove_every > 0 {
        let before = map.len();
        map.retain(|key, _| key % args.remove_every != 0);
        println!("Removed {} entries", before - map.len());
    }

    println!(
        "Final load factor: {:.2}%",
        (map.len() as f64 / map.capacity() as f64) * 100.0
    );

    print_histogram(&map.probe_histogram());
    map.debug_stats().print();

    match map.check_invariants() {
        Ok(()) => println!("Invariants hold"),
        Err(err) => println!("Invariant violation: {err}"),
    }
}
