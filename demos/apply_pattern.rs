//! Apply one stripe pattern to a single image.
//!
//! Usage:
//! ```sh
//! cargo run --example apply_pattern -- input.png output.jpg 2
//! ```

use std::env;
use std::process;

use stripe_pattern_overlay::{OverlayEngine, PatternId};

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: {} <input> <output> [pattern-id 1-4]", args[0]);
        process::exit(1);
    }

    let input = &args[1];
    let output = &args[2];
    let pattern_id: u8 = args.get(3).map_or(1, |s| s.parse().unwrap_or(0));

    let pattern = match PatternId::from_id(pattern_id) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    let engine = OverlayEngine::new().expect("failed to initialize engine");
    let result = engine.process_file(input.as_ref(), output.as_ref(), pattern);

    if result.success {
        println!("Done: {}", result.message);
    } else {
        eprintln!("Error: {}", result.message);
        process::exit(1);
    }
}
