// In demos/blocking_reader.rs
//
// Pipes stdin through a small ring to a blocking reader that echoes to
// stdout. Shows that Writer/Reader compose with std::io::copy.
//
//   printf 'hello\nring\n' | cargo run --example blocking_reader -- [capacity]
use dmxp_ringcast::new_ring_buffer;
use std::env;
use std::io::{self, Write};

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let capacity = env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(4096);

    let mut writer = new_ring_buffer(capacity);
    let mut reader = writer.new_reader();

    let echo = std::thread::spawn(move || -> io::Result<u64> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        let copied = io::copy(&mut reader, &mut out)?;
        out.flush()?;
        Ok(copied)
    });

    // Chunks never exceed the capacity, so no write is truncated.
    let mut chunk = vec![0u8; writer.capacity()];
    let stdin = io::stdin();
    let mut input = stdin.lock();
    loop {
        let n = io::Read::read(&mut input, &mut chunk)?;
        if n == 0 {
            break;
        }
        writer.write(&chunk[..n])?;
    }
    let written = writer.position();
    drop(writer);

    let copied = echo.join().expect("reader thread panicked")?;
    eprintln!("Blocking reader: {} of {} bytes echoed", copied, written);
    Ok(())
}
