// In demos/broadcast.rs
//
// One writer streams "index:sha256" lines into a ring, several readers
// consume them on their own threads and verify every line they get.
//
//   cargo run --example broadcast -- <num_messages> [readers] [--slow]
//
// With --slow one reader sleeps between lines and falls behind, so it reports
// lines lost to overwrite.
use dmxp_ringcast::RingBuilder;
use sha2::{Digest, Sha256};
use std::env;
use std::io::{BufRead, BufReader};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

fn digest(i: usize) -> String {
    let mut hasher = Sha256::new();
    hasher.update(format!("message_{}", i).as_bytes());
    format!("{:x}", hasher.finalize())
}

fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <num_messages> [readers] [--slow]", args[0]);
        std::process::exit(1);
    }
    let num_messages: usize = args[1].parse().expect("Invalid number of messages");
    let num_readers: usize = args
        .get(2)
        .and_then(|s| s.parse().ok())
        .unwrap_or(3);
    let slow = args.iter().any(|a| a == "--slow");

    println!("Broadcast: Precomputing {} hashes...", num_messages);
    let hashes: Vec<String> = (0..num_messages).map(digest).collect();

    let mut writer = RingBuilder::new()
        .with_capacity(64 * 1024)
        .with_channel_id(1)
        .build();

    let keep_alive = Arc::new(AtomicBool::new(true));
    let keep_alive_for_handler = Arc::clone(&keep_alive);
    ctrlc::set_handler(move || {
        keep_alive_for_handler.store(false, Ordering::SeqCst);
    })
    .expect("Error setting Ctrl+C handler");

    let handles: Vec<_> = (0..num_readers)
        .map(|r| {
            let reader = writer.new_reader();
            let lagging = slow && r == 0;
            std::thread::spawn(move || {
                let mut valid = 0usize;
                let mut torn = 0usize;
                for line in BufReader::new(&reader).lines() {
                    let Ok(line) = line else {
                        // Overwrite can split a multi-byte sequence.
                        torn += 1;
                        continue;
                    };
                    match line.split_once(':') {
                        Some((idx, hash)) if idx.parse().map(digest).as_deref() == Ok(hash) => {
                            valid += 1
                        }
                        _ => torn += 1,
                    }
                    if lagging {
                        std::thread::sleep(Duration::from_micros(50));
                    }
                }
                let stats = reader.stats().expect("reader still open");
                (r, valid, torn, stats)
            })
        })
        .collect();

    let start = Instant::now();
    let mut sent = 0;
    for (i, hash) in hashes.iter().enumerate() {
        if !keep_alive.load(Ordering::SeqCst) {
            println!("Broadcast: Interrupted after {} messages", sent);
            break;
        }
        let message = format!("{}:{}\n", i, hash);
        if let Err(e) = writer.write(message.as_bytes()) {
            eprintln!("Failed to write message {}: {}", i, e);
            break;
        }
        sent += 1;
        if sent % 10_000 == 0 {
            println!("Sent {} messages", sent);
        }
    }
    let elapsed = start.elapsed();
    println!(
        "Broadcast: Sent {} messages ({} bytes) in {:.2?}",
        sent,
        writer.position(),
        elapsed
    );
    drop(writer);

    for handle in handles {
        let (r, valid, torn, stats) = handle.join().expect("reader thread panicked");
        println!(
            "Reader {}: {} valid lines, {} torn, {} bytes read, {} bytes overwritten",
            r, valid, torn, stats.bytes_read, stats.bytes_skipped
        );
        if valid == sent {
            println!("Reader {}: All messages received successfully", r);
        }
    }

    Ok(())
}
