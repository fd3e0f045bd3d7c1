use std::f32::consts::PI;

/// Settling tolerance on displacement, as a fraction of the travelled distance
const POSITION_EPSILON: f32 = 0.001;
/// Settling tolerance on velocity (units per second), as a fraction of the travelled distance
const VELOCITY_EPSILON: f32 = 0.01;
/// Resolution of the settle-time scan, in seconds
const SETTLE_STEP: f32 = 0.001;
/// Springs that have not settled after this long are cut off
const MAX_SETTLE_SECS: f32 = 10.0;

/// Configuration for spring physics animation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringConfig {
    /// Mass of the spring (default: 1.0)
    pub mass: f32,
    /// Stiffness of the spring
    pub stiffness: f32,
    /// Damping coefficient
    pub damping: f32,
}

impl SpringConfig {
    /// Default spring: 0.55s response with a hint of bounce
    pub const DEFAULT: Self = Self {
        mass: 1.0,
        stiffness: 130.507,
        damping: 18.850,
    };

    /// Bouncy spring: 0.5s response, 0.3 bounce
    pub const BOUNCY: Self = Self {
        mass: 1.0,
        stiffness: 157.914,
        damping: 17.593,
    };

    /// Snappy spring: 0.5s response, 0.15 bounce
    pub const SNAPPY: Self = Self {
        mass: 1.0,
        stiffness: 157.914,
        damping: 21.363,
    };

    /// Smooth spring: 0.5s response, critically damped
    pub const SMOOTH: Self = Self {
        mass: 1.0,
        stiffness: 157.914,
        damping: 25.133,
    };

    pub fn new(mass: f32, stiffness: f32, damping: f32) -> Self {
        Self {
            mass,
            stiffness,
            damping,
        }
    }

    /// Build a unit-mass spring from a perceptual response time and a bounce
    /// amount. `bounce` of 0.0 is critically damped, positive values overshoot,
    /// negative values are overdamped.
    pub fn from_response(response: f32, bounce: f32) -> Self {
        let response = response.max(f32::EPSILON);
        let omega = 2.0 * PI / response;
        Self {
            mass: 1.0,
            stiffness: omega * omega,
            damping: 4.0 * PI * (1.0 - bounce) / response,
        }
    }

    /// Undamped angular frequency
    pub fn natural_frequency(&self) -> f32 {
        (self.stiffness / self.mass).sqrt()
    }

    /// Ratio of the damping to critical damping
    pub fn damping_ratio(&self) -> f32 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }

    pub fn is_underdamped(&self) -> bool {
        self.damping_ratio() < 1.0
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Closed-form motion of a damped spring released at `from` with
/// `initial_velocity`, pulling toward `to`.
///
/// Position and velocity are pure functions of time, so the same instant can
/// be sampled any number of times and in any order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringMotion {
    pub from: f32,
    pub to: f32,
    pub initial_velocity: f32,
    pub config: SpringConfig,
}

impl SpringMotion {
    pub fn new(from: f32, to: f32, initial_velocity: f32, config: SpringConfig) -> Self {
        Self {
            from,
            to,
            initial_velocity,
            config,
        }
    }

    /// Position at `t` seconds after release
    pub fn position(&self, t: f32) -> f32 {
        self.to + self.solve(t.max(0.0)).0
    }

    /// Velocity at `t` seconds after release
    pub fn velocity(&self, t: f32) -> f32 {
        self.solve(t.max(0.0)).1
    }

    /// Whether the spring is within tolerance of its target at `t`
    pub fn is_settled_at(&self, t: f32) -> bool {
        let (displacement, velocity) = self.solve(t.max(0.0));
        let span = (self.to - self.from).abs().max(1.0);
        displacement.abs() < POSITION_EPSILON * span && velocity.abs() < VELOCITY_EPSILON * span
    }

    /// Time after which the spring stays settled.
    ///
    /// Scans the closed form at 1ms resolution and reports the instant just past
    /// the last unsettled sample, capped at 10 seconds.
    pub fn settle_duration(&self) -> f32 {
        let steps = (MAX_SETTLE_SECS / SETTLE_STEP) as usize;
        let mut last_unsettled = None;
        for step in 0..=steps {
            let t = step as f32 * SETTLE_STEP;
            if !self.is_settled_at(t) {
                last_unsettled = Some(t);
            }
        }
        match last_unsettled {
            Some(t) => (t + SETTLE_STEP).min(MAX_SETTLE_SECS),
            None => 0.0,
        }
    }

    /// Displacement from target and velocity at time `t`
    fn solve(&self, t: f32) -> (f32, f32) {
        let x0 = self.from - self.to;
        let v0 = self.initial_velocity;
        let omega = self.config.natural_frequency();
        let zeta = self.config.damping_ratio();

        if !omega.is_finite() || omega <= 0.0 {
            return (0.0, 0.0);
        }

        if (zeta - 1.0).abs() < 1e-4 {
            // Critically damped
            let b = v0 + omega * x0;
            let decay = (-omega * t).exp();
            let x = (x0 + b * t) * decay;
            let v = (v0 - omega * b * t) * decay;
            (x, v)
        } else if zeta < 1.0 {
            // Underdamped: decaying oscillation
            let alpha = zeta * omega;
            let omega_d = omega * (1.0 - zeta * zeta).sqrt();
            let decay = (-alpha * t).exp();
            let (sin, cos) = (omega_d * t).sin_cos();
            let b = (v0 + alpha * x0) / omega_d;
            let x = decay * (x0 * cos + b * sin);
            let v = decay * (v0 * cos - (alpha * v0 + omega * omega * x0) / omega_d * sin);
            (x, v)
        } else {
            // Overdamped: sum of two decaying exponentials
            let root = (zeta * zeta - 1.0).sqrt();
            let r1 = -omega * (zeta - root);
            let r2 = -omega * (zeta + root);
            let c2 = (v0 - r1 * x0) / (r2 - r1);
            let c1 = x0 - c2;
            let e1 = (r1 * t).exp();
            let e2 = (r2 * t).exp();
            (c1 * e1 + c2 * e2, r1 * c1 * e1 + r2 * c2 * e2)
        }
    }
}
