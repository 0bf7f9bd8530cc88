//! Abstraction over standard normal variate sources.

/// A source of independent standard normal variates.
///
/// Path generation is generic over this trait (static dispatch), so a
/// seeded [`SimRng`](super::SimRng) drives production runs while tests can
/// substitute deterministic sources.
pub trait NormalSource {
    /// Draws one standard normal variate.
    fn next_normal(&mut self) -> f64;

    /// Fills `buffer` with standard normal variates, in order.
    fn fill_normal(&mut self, buffer: &mut [f64]) {
        for value in buffer.iter_mut() {
            *value = self.next_normal();
        }
    }
}

impl<S: NormalSource + ?Sized> NormalSource for &mut S {
    #[inline]
    fn next_normal(&mut self) -> f64 {
        (**self).next_normal()
    }

    #[inline]
    fn fill_normal(&mut self, buffer: &mut [f64]) {
        (**self).fill_normal(buffer);
    }
}
