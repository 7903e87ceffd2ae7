use std::f64::consts::PI;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use super::types::{Inputs, SimulationOutput};

#[derive(Debug, Clone, Copy)]
struct TrialResult {
    final_balance: f64,
    retire_balance: f64,
}

/// Runs `inputs.simulations` independent trials and returns the balance at
/// `life_expectancy` and at `retire_age` for each, index-aligned.
///
/// A non-zero `inputs.seed` makes the output bit-for-bit reproducible:
/// every trial runs on its own generator derived from the seed and the
/// trial index, so no state leaks between calls or between trials. A zero
/// seed resolves fresh entropy per call instead.
pub fn simulate(inputs: &Inputs) -> SimulationOutput {
    let base_seed = resolve_base_seed(inputs.seed);
    let years_total = inputs.life_expectancy.saturating_sub(inputs.current_age);
    let years_to_retire = inputs.retire_age.saturating_sub(inputs.current_age);

    let mut final_balances = Vec::with_capacity(inputs.simulations as usize);
    let mut retire_balances = Vec::with_capacity(inputs.simulations as usize);

    for trial_id in 0..inputs.simulations {
        let mut rng = Rng::new(derive_seed(base_seed, trial_id));
        let trial = simulate_trial(inputs, years_total, years_to_retire, &mut rng);
        final_balances.push(trial.final_balance);
        retire_balances.push(trial.retire_balance);
    }

    SimulationOutput {
        final_balances,
        retire_balances,
    }
}

fn simulate_trial(
    inputs: &Inputs,
    years_total: u32,
    years_to_retire: u32,
    rng: &mut Rng,
) -> TrialResult {
    let mean = inputs.mean_return / 100.0;
    let vol = inputs.return_vol / 100.0;

    // Full path to life expectancy. Depletion is an absorbing barrier: the
    // balance is clamped to zero and the remaining years are skipped.
    let mut balance = inputs.current_savings;
    for year in 0..years_total {
        let r = mean + vol * rng.standard_normal();
        balance *= 1.0 + r;
        let age = inputs.current_age + year;
        if age < inputs.coast_age {
            balance += inputs.contrib_full;
        } else if age < inputs.retire_age {
            balance += inputs.contrib_barista;
        } else {
            balance -= inputs.withdraw_retire;
        }
        if balance <= 0.0 {
            balance = 0.0;
            break;
        }
    }
    let final_balance = balance;

    // Balance at retirement only, on fresh draws from the same trial
    // stream. Withdrawals never apply: the loop stops at retire_age.
    let mut balance = inputs.current_savings;
    for year in 0..years_to_retire {
        let r = mean + vol * rng.standard_normal();
        balance *= 1.0 + r;
        let age = inputs.current_age + year;
        if age < inputs.coast_age {
            balance += inputs.contrib_full;
        } else {
            balance += inputs.contrib_barista;
        }
        if balance <= 0.0 {
            balance = 0.0;
            break;
        }
    }

    TrialResult {
        final_balance,
        retire_balance: balance,
    }
}

fn resolve_base_seed(seed: u64) -> u64 {
    if seed != 0 {
        return seed;
    }

    // Unseeded runs must not be reproducible and must not share generator
    // state across calls. The counter keeps two calls within one clock tick
    // distinct.
    static UNSEEDED_CALLS: AtomicU64 = AtomicU64::new(0);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    let call = UNSEEDED_CALLS.fetch_add(1, Ordering::Relaxed);
    splitmix64(nanos ^ call.rotate_left(32))
}

fn derive_seed(base_seed: u64, trial_id: u32) -> u64 {
    splitmix64(base_seed ^ ((trial_id as u64) << 32))
}

fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

struct Rng {
    state: u64,
    cached_normal: Option<f64>,
}

impl Rng {
    fn new(seed: u64) -> Self {
        // xorshift state must never be zero.
        let state = if seed == 0 {
            0xA5A5_A5A5_A5A5_A5A5
        } else {
            seed
        };
        Self {
            state,
            cached_normal: None,
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    fn next_f64(&mut self) -> f64 {
        const DENOM: f64 = (1_u64 << 53) as f64;
        let v = self.next_u64() >> 11;
        ((v as f64) + 0.5) / DENOM
    }

    fn standard_normal(&mut self) -> f64 {
        if let Some(z) = self.cached_normal.take() {
            return z;
        }

        let u1 = self.next_f64().max(1e-12);
        let u2 = self.next_f64();
        let r = (-2.0 * u1.ln()).sqrt();
        let theta = 2.0 * PI * u2;

        let z0 = r * theta.cos();
        let z1 = r * theta.sin();
        self.cached_normal = Some(z1);
        z0
    }
}

pub fn percentile(values: &mut [f64], p: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    values.sort_by(|a, b| a.total_cmp(b));

    let n = values.len();
    if n == 1 {
        return values[0];
    }

    let rank = (p / 100.0) * (n as f64 - 1.0);
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;

    if lower == upper {
        values[lower]
    } else {
        let w = rank - lower as f64;
        values[lower] * (1.0 - w) + values[upper] * w
    }
}
