/// Monte Carlo inputs. Return figures are percentages (7.5 means 7.5%);
/// a `seed` of 0 means "no fixed seed" and makes runs non-reproducible.
#[derive(Debug, Clone)]
pub struct Inputs {
    pub current_age: u32,
    pub coast_age: u32,
    pub retire_age: u32,
    pub life_expectancy: u32,
    pub current_savings: f64,
    pub contrib_full: f64,
    pub contrib_barista: f64,
    pub withdraw_retire: f64,
    pub mean_return: f64,
    pub return_vol: f64,
    pub simulations: u32,
    pub seed: u64,
}

/// One entry per trial, index-aligned across both sequences: the balance at
/// `life_expectancy` and the balance at `retire_age`. Balances are clamped
/// at zero; depletion is terminal within a trial.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationOutput {
    pub final_balances: Vec<f64>,
    pub retire_balances: Vec<f64>,
}
