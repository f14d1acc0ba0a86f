//! Learned-index vs binary-search comparison
//!
//! Generates a large sorted random array, runs the same lookups through
//! the learned index and a plain binary search, and reports comparison
//! counts and timings.

use std::time::Instant;

use rand::Rng;

use planbench::learned::{binary_search, LearnedIndex};

const DATA_SIZE: usize = 1_000_000;
const MAX_VALUE: i64 = 2_000_000;
const NUM_SEARCHES: usize = 1000;

fn generate_sorted_data(size: usize, max_value: i64) -> Vec<i64> {
    let mut rng = rand::thread_rng();
    let mut data: Vec<i64> = (0..size).map(|_| rng.gen_range(1..=max_value)).collect();
    data.sort_unstable();
    data
}

fn main() {
    let data = generate_sorted_data(DATA_SIZE, MAX_VALUE);
    let index = LearnedIndex::new(data.clone());

    let mut rng = rand::thread_rng();
    let keys: Vec<i64> = (0..NUM_SEARCHES)
        .map(|_| rng.gen_range(1..=MAX_VALUE))
        .collect();

    let mut learned_ops: u64 = 0;
    let learned_start = Instant::now();
    for &key in &keys {
        learned_ops += index.search_binary(key).operations;
    }
    let learned_elapsed = learned_start.elapsed().as_secs_f64() * 1000.0;

    let mut binary_ops: u64 = 0;
    let binary_start = Instant::now();
    for &key in &keys {
        binary_ops += binary_search(&data, key).operations;
    }
    let binary_elapsed = binary_start.elapsed().as_secs_f64() * 1000.0;

    println!("Comparison of Learned Index vs Binary Search");
    println!(
        "Data size: {}, Searches performed: {}",
        DATA_SIZE, NUM_SEARCHES
    );
    println!();
    println!("Learned Index (linear regression + bounded binary search):");
    println!("  Total operations: {}", learned_ops);
    println!(
        "  Avg operations per search: {:.2}",
        learned_ops as f64 / NUM_SEARCHES as f64
    );
    println!("  Total time: {:.2} ms", learned_elapsed);
    println!(
        "  Avg time per search: {:.4} ms",
        learned_elapsed / NUM_SEARCHES as f64
    );
    println!();
    println!("Binary Search:");
    println!("  Total operations: {}", binary_ops);
    println!(
        "  Avg operations per search: {:.2}",
        binary_ops as f64 / NUM_SEARCHES as f64
    );
    println!("  Total time: {:.2} ms", binary_elapsed);
    println!(
        "  Avg time per search: {:.4} ms",
        binary_elapsed / NUM_SEARCHES as f64
    );
}
