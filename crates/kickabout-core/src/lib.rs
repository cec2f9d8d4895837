pub mod input;
pub mod time;

pub use input::{InputState, KeyBindings};
pub use time::{FrameClock, FrameTime};

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::time::FrameTime;

    /// Standard step used by tests: 60 Hz.
    pub const TEST_DT: f32 = 1.0 / 60.0;

    /// `n` consecutive fixed-rate frames starting at frame 0.
    pub fn frames(n: usize, dt: f32) -> impl Iterator<Item = FrameTime> {
        (0..n as u64).map(move |i| FrameTime::fixed(i, dt))
    }

    /// Assert two floats are within `eps` of each other.
    pub fn assert_close(actual: f32, expected: f32, eps: f32) {
        assert!(
            (actual - expected).abs() <= eps,
            "expected {expected}, got {actual} (eps {eps})"
        );
    }

}
