//! Writes `sample_sales.csv`: regional sales by year with a few blank
//! cells, for trying out every menu action.

use anyhow::{Context, Result};

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
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
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

/// Blank roughly `rate` of the cells so the missing-data tools have work.
fn maybe_blank(rng: &mut SimpleRng, rate: f64, value: String) -> String {
    if rng.next_f64() < rate {
        String::new()
    } else {
        value
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    // (region, base sales)
    let regions = [("North", 1200.0), ("South", 950.0), ("East", 1100.0), ("West", 800.0)];
    let products = ["Widget", "Gadget", "Gizmo"];
    let years = 2019..=2024;

    let output_path = "sample_sales.csv";
    let mut writer = csv::Writer::from_path(output_path).with_context(|| format!("creating {output_path}"))?;
    writer.write_record(["Region", "Year", "Product", "Sales", "Units"])?;

    let mut rows = 0usize;
    for year in years {
        let growth = 1.0 + 0.06 * (year - 2019) as f64;
        for &(region, base) in &regions {
            for product in products {
                let sales = (base * growth + rng.gauss(0.0, 120.0)).max(0.0);
                let units = (sales / 25.0 + rng.gauss(0.0, 3.0)).round().max(0.0);

                let sales = maybe_blank(&mut rng, 0.05, format!("{sales:.2}"));
                let units = maybe_blank(&mut rng, 0.05, format!("{units:.0}"));
                let region = maybe_blank(&mut rng, 0.02, region.to_string());
                writer.write_record([region, year.to_string(), product.to_string(), sales, units])?;
                rows += 1;
            }
        }
    }
    writer.flush().with_context(|| format!("writing {output_path}"))?;

    println!("Wrote {rows} rows to {output_path}");
    Ok(())
}
