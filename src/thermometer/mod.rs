//! Temperature and time types shared by the decoder and the sampling loop

use fixed::types::I28F4;

/// I28F4 is a fixed point number with 4 fractional bits and 28 integer bits.
/// This gives us a precision of 0.0625 degrees Celsius & a range of (-2^27, 2^27 - 0.0625).
///
/// Both fields of a frame land on this grid exactly: the internal sensor reports in 1/16 steps and
/// the thermocouple in 1/4 steps.
pub type Temperature = I28F4;

/// Microsecond tick instant, same resolution as the TIM2 monotonic.
pub type Instant = fugit::TimerInstantU64<1_000_000>;

/// Microsecond tick duration
pub type Duration = fugit::TimerDurationU64<1_000_000>;
