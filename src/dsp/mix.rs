//! Linear crossfade primitive.

/*
Crossfading
===========

Two signals blended with complementary weights:

    output = (A × (1 - x)) + (B × x)

      x = 0.0  →  100% A
      x = 0.5  →  50% A, 50% B
      x = 1.0  →  100% B

The weights always sum to 1.0, so two full-scale inputs cannot sum past
full scale. Unlike the buffer mixers elsewhere the weight is NOT clamped: a
weight outside [0, 1] extrapolates, which patches are free to use.

The endpoints are exact. With x = 0 the B term is B × 0 = 0 and the A term is
A × 1 = A, so the output is bit-for-bit A (and symmetrically for x = 1). The
`a + x(b - a)` lerp form does not have that property at x = 1.
*/

/// Crossfade between `a` and `b` by weight `x`.
#[inline]
pub fn crossfade(a: f64, b: f64, x: f64) -> f64 {
    (1.0 - x) * a + x * b
}
