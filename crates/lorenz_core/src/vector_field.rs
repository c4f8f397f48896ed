use crate::{
    config::Parameters,
    traits::{DynamicalSystem, Scalar, State},
};

/// The Lorenz-63 vector field
///
/// ```text
/// dx = sigma * (y - x)
/// dy = (rho - z) * x - y
/// dz = x * y - beta * z
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lorenz63Field<T: Scalar> {
    pub sigma: T,
    pub rho: T,
    pub beta: T,
}

impl<T: Scalar> Lorenz63Field<T> {
    pub fn new(sigma: T, rho: T, beta: T) -> Self {
        Self { sigma, rho, beta }
    }

    pub fn from_parameters(params: &Parameters) -> Self {
        Self {
            sigma: T::from_f64(params.sigma).unwrap(),
            rho: T::from_f64(params.rho).unwrap(),
            beta: T::from_f64(params.beta).unwrap(),
        }
    }

    /// All three components are computed from the same input state.
    pub fn derivative(&self, s: &State<T>) -> State<T> {
        let [x, y, z] = *s;
        [
            self.sigma * (y - x),
            (self.rho - z) * x - y,
            x * y - self.beta * z,
        ]
    }
}

impl<T: Scalar> DynamicalSystem<T> for Lorenz63Field<T> {
    fn dimension(&self) -> usize {
        3
    }

    fn apply(&self, _t: T, x: &[T], out: &mut [T]) {
        let d = self.derivative(&[x[0], x[1], x[2]]);
        out[..3].copy_from_slice(&d);
    }
}
