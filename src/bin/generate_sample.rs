use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use sortplot::data::loader::{ALPHA_DIR, BETA_FILE};
use sortplot::data::model::{Method, TRIALS_PER_SAMPLE};

/// Write synthetic α/β measurement files for previewing charts.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Output base directory
    #[arg(long, default_value = "data")]
    out: PathBuf,

    /// PRNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

const FILE_COUNTS: [u32; 4] = [4, 6, 8, 10];
const MEMORY_SIZES: [u32; 5] = [3, 15, 30, 45, 60];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Rough shape of α(r): merge passes grow with log r, faster with fewer files.
fn alpha_model(method: Method, files: u32, r: u32) -> f64 {
    let r = r as f64;
    let ways = match method {
        Method::Balanced => (files / 2).max(2) as f64,
        Method::Polyphasic => (files - 1).max(2) as f64 * 1.2,
        Method::Cascade => (files - 1).max(2) as f64 * 0.9,
    };
    1.0 + r.ln() / ways.ln()
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut rng = SimpleRng::new(args.seed);

    let alpha_dir = args.out.join(ALPHA_DIR);
    fs::create_dir_all(&alpha_dir)
        .with_context(|| format!("creating {}", alpha_dir.display()))?;

    let mut n_files = 0;
    for method in Method::ALL {
        for files in FILE_COUNTS {
            let mut text = String::new();
            for r in (10..=1000).step_by(10) {
                let alpha = alpha_model(method, files, r) + rng.gauss(0.0, 0.02);
                writeln!(text, "{r} : {alpha:.4}")?;
            }
            let path = alpha_dir.join(format!("{}{files}.txt", method.stem()));
            fs::write(&path, text).with_context(|| format!("writing {}", path.display()))?;
            n_files += 1;
        }
    }

    let mut text = String::new();
    for m in MEMORY_SIZES {
        writeln!(text, "{m}:")?;
        let trials: Vec<String> = (0..TRIALS_PER_SAMPLE)
            .map(|_| format!("{:.4}", rng.gauss(2.0, 0.01 + 0.03 / m as f64)))
            .collect();
        writeln!(text, "{} ", trials.join(" "))?;
    }
    let beta_path = args.out.join(BETA_FILE);
    fs::write(&beta_path, text).with_context(|| format!("writing {}", beta_path.display()))?;

    println!(
        "Wrote {n_files} α files to {} and {} memory sizes to {}",
        alpha_dir.display(),
        MEMORY_SIZES.len(),
        beta_path.display()
    );
    Ok(())
}
