use std::fs::File;
use std::io::{BufWriter, Write};

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

/// Height at one scan position: long-period waviness, a 40 nm step feature in
/// the middle of the scan, and gaussian roughness.
fn surface_height(x: f64, rng: &mut SimpleRng) -> f64 {
    let waviness = 25.0 * (x / 80.0 * std::f64::consts::TAU).sin();
    let step = if (200.0..300.0).contains(&x) { 40.0 } else { 0.0 };
    waviness + step + rng.gauss(0.0, 1.5)
}

fn main() -> std::io::Result<()> {
    let mut rng = SimpleRng::new(42);

    // Scan positions: 0 → 500 microns, step 0.5
    let positions: Vec<f64> = (0..1000).map(|i| i as f64 * 0.5).collect();
    let heights: Vec<f64> = positions
        .iter()
        .map(|&x| surface_height(x, &mut rng))
        .collect();

    let output_path = "sample_profile.xml";
    let file = File::create(output_path)?;
    let mut w = BufWriter::new(file);

    writeln!(w, "<Profile>")?;
    writeln!(w, "    <Header>")?;
    writeln!(w, "        <TestDate>03-01-19</TestDate>")?;
    writeln!(w, "        <TestTime>10:15:02</TestTime>")?;
    writeln!(w, "        <XUnits>micrometres</XUnits>")?;
    writeln!(w, "        <ZUnits>nanometres</ZUnits>")?;
    writeln!(w, "        <NumData>{} points</NumData>", positions.len())?;
    writeln!(w, "        <DataGain>1.25 nm/count</DataGain>")?;
    writeln!(w, "        <DataOffset>0.5 nm</DataOffset>")?;
    writeln!(w, "    </Header>")?;
    writeln!(w, "    <Data>")?;
    for (x, z) in positions.iter().zip(&heights) {
        writeln!(w, "        <Point>")?;
        writeln!(w, "            <X>{x:.4} um</X>")?;
        writeln!(w, "            <Z>{z:.4} nm</Z>")?;
        writeln!(w, "        </Point>")?;
    }
    writeln!(w, "    </Data>")?;
    writeln!(w, "</Profile>")?;
    w.flush()?;

    println!(
        "Wrote {} sample pairs to {output_path}",
        positions.len()
    );
    Ok(())
}
