/// Engine tunables, passed at gradient construction.
///
/// These were module-level globals in older editors; carrying them in an
/// explicit config keeps every editing session independently tunable.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Sample count of the internal table. Clamped to a minimum of 2.
    pub table_size: usize,
    /// Hit-test radius for [`crate::Gradient::find_point`], in gradient
    /// position units.
    pub click_tolerance: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            table_size: 256,
            click_tolerance: 0.05,
        }
    }
}
