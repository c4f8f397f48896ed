use crate::traits::{DynamicalSystem, Scalar, Steppable};

/// Explicit (forward) Euler solver: `y_next = y + dt * f(t, y)`.
///
/// The derivative is evaluated into a scratch buffer before any component of
/// the state is touched.
pub struct ForwardEuler<T: Scalar> {
    k: Vec<T>,
}

impl<T: Scalar> ForwardEuler<T> {
    pub fn new(dim: usize) -> Self {
        Self {
            k: vec![T::from_f64(0.0).unwrap(); dim],
        }
    }
}

impl<T: Scalar> Steppable<T> for ForwardEuler<T> {
    fn step(&mut self, system: &impl DynamicalSystem<T>, t: &mut T, state: &mut [T], dt: T) {
        system.apply(*t, state, &mut self.k);

        for i in 0..state.len() {
            state[i] = state[i] + self.k[i] * dt;
        }

        *t = *t + dt;
    }
}

#[cfg(test)]
mod tests {
    use super::ForwardEuler;
    use crate::traits::{DynamicalSystem, Steppable};

    struct Decay {
        rate: f64,
    }

    impl DynamicalSystem<f64> for Decay {
        fn dimension(&self) -> usize {
            1
        }

        fn apply(&self, _t: f64, x: &[f64], out: &mut [f64]) {
            out[0] = -self.rate * x[0];
        }
    }

    // dx/dt = y, dy/dt = -x. Catches solvers that reuse a half-updated state.
    struct Rotation;

    impl DynamicalSystem<f64> for Rotation {
        fn dimension(&self) -> usize {
            2
        }

        fn apply(&self, _t: f64, x: &[f64], out: &mut [f64]) {
            out[0] = x[1];
            out[1] = -x[0];
        }
    }

    #[test]
    fn single_step_is_linear_update() {
        let mut solver = ForwardEuler::new(1);
        let mut t = 0.0;
        let mut state = vec![2.0];
        solver.step(&Decay { rate: 0.5 }, &mut t, &mut state, 0.1);
        assert_eq!(state[0], 2.0 + (-1.0) * 0.1);
        assert_eq!(t, 0.1);
    }

    #[test]
    fn update_uses_pre_step_state_for_every_component() {
        let mut solver = ForwardEuler::new(2);
        let mut t = 0.0;
        let mut state = vec![1.0, 0.0];
        solver.step(&Rotation, &mut t, &mut state, 0.5);
        assert_eq!(state, vec![1.0, -0.5]);
    }

    #[test]
    fn converges_towards_exponential_decay() {
        let system = Decay { rate: 1.0 };
        let mut solver = ForwardEuler::new(1);
        let mut t = 0.0;
        let mut state = vec![1.0];
        for _ in 0..10_000 {
            solver.step(&system, &mut t, &mut state, 1.0e-4);
        }
        assert!((t - 1.0).abs() < 1e-9);
        assert!((state[0] - (-1.0_f64).exp()).abs() < 1e-4);
    }
}
