/// RandomSource provides the random draws the race requires. It is implemented for every
/// rand::Rng, such that a seeded StdRng can be used for reproducible races.
pub trait RandomSource {
    /// next_unit returns a uniformly distributed value in [0.0, 1.0).
    fn next_unit(&mut self) -> f64;

    /// next_position returns a uniformly distributed integer in [1, max].
    fn next_position(&mut self, max: u32) -> u32;
}

impl<R: rand::Rng> RandomSource for R {
    fn next_unit(&mut self) -> f64 {
        self.random::<f64>()
    }

    fn next_position(&mut self, max: u32) -> u32 {
        self.random_range(1..=max.max(1))
    }
}

/// ScriptedRandom returns a predefined sequence of draws, which makes the position changes of a
/// race fully deterministic. If a sequence is exhausted it continues with its fallback value.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    units: Vec<f64>,
    unit_idx: usize,
    unit_fallback: f64,
    positions: Vec<u32>,
    position_idx: usize,
}

impl ScriptedRandom {
    pub fn new(units: Vec<f64>, positions: Vec<u32>) -> ScriptedRandom {
        ScriptedRandom {
            units,
            unit_idx: 0,
            unit_fallback: 0.5,
            positions,
            position_idx: 0,
        }
    }

    /// neutral creates a source that never changes the position (all draws are 0.5) and always
    /// starts from the inserted grid position.
    pub fn neutral(start_position: u32) -> ScriptedRandom {
        ScriptedRandom::new(vec![], vec![start_position])
    }

    /// with_fallback sets the draw that is returned once the unit sequence is exhausted.
    pub fn with_fallback(mut self, unit_fallback: f64) -> ScriptedRandom {
        self.unit_fallback = unit_fallback;
        self
    }
}

impl RandomSource for ScriptedRandom {
    fn next_unit(&mut self) -> f64 {
        let val = self
            .units
            .get(self.unit_idx)
            .copied()
            .unwrap_or(self.unit_fallback);
        self.unit_idx += 1;
        val
    }

    fn next_position(&mut self, max: u32) -> u32 {
        // the last scripted position is repeated, clamped to the allowed range
        let val = match self.positions.get(self.position_idx) {
            Some(&x) => x,
            None => self.positions.last().copied().unwrap_or(1),
        };
        self.position_idx += 1;
        val.max(1).min(max.max(1))
    }
}
