// extensions/easing.rs
//
// Pure easing functions for tween interpolation.
// Every curve maps (start, end, t) -> value with t normalized to [0, 1],
// and has a paired derivative for velocity queries.
// No dependencies on scripts or stages, just math.

use std::f32::consts::{LN_2, PI};
use serde::{Deserialize, Serialize};

/// Signature shared by easing curves and their derivatives.
pub type EaseFn = fn(start: f32, end: f32, t: f32) -> f32;

const BACK: f32 = 1.70158;
const BACK_IN_OUT: f32 = BACK * 1.525;
const ELASTIC_PERIOD: f32 = 0.3;
const ELASTIC_SHIFT: f32 = ELASTIC_PERIOD / 4.0;
const ELASTIC_W: f32 = 2.0 * PI / ELASTIC_PERIOD;
const BOUNCE_N: f32 = 7.5625;
const BOUNCE_D: f32 = 2.75;

/// Easing curve selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    QuadIn,
    QuadOut,
    QuadInOut,
    CubicIn,
    CubicOut,
    CubicInOut,
    QuartIn,
    QuartOut,
    QuartInOut,
    QuintIn,
    QuintOut,
    QuintInOut,
    SineIn,
    SineOut,
    SineInOut,
    /// Exponential easing (dramatic).
    ExpoIn,
    ExpoOut,
    ExpoInOut,
    CircIn,
    CircOut,
    CircInOut,
    /// Constant velocity (no easing).
    #[default]
    Linear,
    /// Damped overshoot that settles on the end value.
    Spring,
    BounceIn,
    /// Bouncy finish.
    BounceOut,
    BounceInOut,
    /// Overshoot then settle.
    BackIn,
    BackOut,
    BackInOut,
    ElasticIn,
    /// Elastic spring.
    ElasticOut,
    ElasticInOut,
}

impl Easing {
    /// Every curve, in declaration order.
    pub const ALL: [Easing; 32] = [
        Easing::QuadIn,
        Easing::QuadOut,
        Easing::QuadInOut,
        Easing::CubicIn,
        Easing::CubicOut,
        Easing::CubicInOut,
        Easing::QuartIn,
        Easing::QuartOut,
        Easing::QuartInOut,
        Easing::QuintIn,
        Easing::QuintOut,
        Easing::QuintInOut,
        Easing::SineIn,
        Easing::SineOut,
        Easing::SineInOut,
        Easing::ExpoIn,
        Easing::ExpoOut,
        Easing::ExpoInOut,
        Easing::CircIn,
        Easing::CircOut,
        Easing::CircInOut,
        Easing::Linear,
        Easing::Spring,
        Easing::BounceIn,
        Easing::BounceOut,
        Easing::BounceInOut,
        Easing::BackIn,
        Easing::BackOut,
        Easing::BackInOut,
        Easing::ElasticIn,
        Easing::ElasticOut,
        Easing::ElasticInOut,
    ];

    /// Resolve the curve. Cache the result rather than resolving per tick.
    pub fn function(self) -> EaseFn {
        match self {
            Easing::QuadIn => quad_in,
            Easing::QuadOut => quad_out,
            Easing::QuadInOut => quad_in_out,
            Easing::CubicIn => cubic_in,
            Easing::CubicOut => cubic_out,
            Easing::CubicInOut => cubic_in_out,
            Easing::QuartIn => quart_in,
            Easing::QuartOut => quart_out,
            Easing::QuartInOut => quart_in_out,
            Easing::QuintIn => quint_in,
            Easing::QuintOut => quint_out,
            Easing::QuintInOut => quint_in_out,
            Easing::SineIn => sine_in,
            Easing::SineOut => sine_out,
            Easing::SineInOut => sine_in_out,
            Easing::ExpoIn => expo_in,
            Easing::ExpoOut => expo_out,
            Easing::ExpoInOut => expo_in_out,
            Easing::CircIn => circ_in,
            Easing::CircOut => circ_out,
            Easing::CircInOut => circ_in_out,
            Easing::Linear => linear,
            Easing::Spring => spring,
            Easing::BounceIn => bounce_in,
            Easing::BounceOut => bounce_out,
            Easing::BounceInOut => bounce_in_out,
            Easing::BackIn => back_in,
            Easing::BackOut => back_out,
            Easing::BackInOut => back_in_out,
            Easing::ElasticIn => elastic_in,
            Easing::ElasticOut => elastic_out,
            Easing::ElasticInOut => elastic_in_out,
        }
    }

    /// Resolve the derivative of the curve with respect to normalized time.
    /// Divide by the real duration to get a rate per second.
    pub fn derivative(self) -> EaseFn {
        match self {
            Easing::QuadIn => d::quad_in,
            Easing::QuadOut => d::quad_out,
            Easing::QuadInOut => d::quad_in_out,
            Easing::CubicIn => d::cubic_in,
            Easing::CubicOut => d::cubic_out,
            Easing::CubicInOut => d::cubic_in_out,
            Easing::QuartIn => d::quart_in,
            Easing::QuartOut => d::quart_out,
            Easing::QuartInOut => d::quart_in_out,
            Easing::QuintIn => d::quint_in,
            Easing::QuintOut => d::quint_out,
            Easing::QuintInOut => d::quint_in_out,
            Easing::SineIn => d::sine_in,
            Easing::SineOut => d::sine_out,
            Easing::SineInOut => d::sine_in_out,
            Easing::ExpoIn => d::expo_in,
            Easing::ExpoOut => d::expo_out,
            Easing::ExpoInOut => d::expo_in_out,
            Easing::CircIn => d::circ_in,
            Easing::CircOut => d::circ_out,
            Easing::CircInOut => d::circ_in_out,
            Easing::Linear => d::linear,
            Easing::Spring => d::spring,
            Easing::BounceIn => d::bounce_in,
            Easing::BounceOut => d::bounce_out,
            Easing::BounceInOut => d::bounce_in_out,
            Easing::BackIn => d::back_in,
            Easing::BackOut => d::back_out,
            Easing::BackInOut => d::back_in_out,
            Easing::ElasticIn => d::elastic_in,
            Easing::ElasticOut => d::elastic_out,
            Easing::ElasticInOut => d::elastic_in_out,
        }
    }

    /// Apply the curve to a normalized time value `t`.
    /// Returns a value typically in [0, 1] (Back, Spring and Elastic overshoot).
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        (self.function())(0.0, 1.0, t)
    }
}

// ── Curves ───────────────────────────────────────────────────────────────

pub fn linear(start: f32, end: f32, t: f32) -> f32 {
    lerp(start, end, t)
}

pub fn spring(start: f32, end: f32, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    let k = ((t * PI * (0.2 + 2.5 * t * t * t)).sin() * (1.0 - t).powf(2.2) + t)
        * (1.0 + 1.2 * (1.0 - t));
    start + (end - start) * k
}

pub fn quad_in(start: f32, end: f32, t: f32) -> f32 {
    start + (end - start) * t * t
}

pub fn quad_out(start: f32, end: f32, t: f32) -> f32 {
    start - (end - start) * t * (t - 2.0)
}

pub fn quad_in_out(start: f32, end: f32, t: f32) -> f32 {
    let d = end - start;
    let v = t * 2.0;
    if v < 1.0 {
        return start + d * 0.5 * v * v;
    }
    let v = v - 1.0;
    start - d * 0.5 * (v * (v - 2.0) - 1.0)
}

pub fn cubic_in(start: f32, end: f32, t: f32) -> f32 {
    start + (end - start) * t * t * t
}

pub fn cubic_out(start: f32, end: f32, t: f32) -> f32 {
    let u = t - 1.0;
    start + (end - start) * (u * u * u + 1.0)
}

pub fn cubic_in_out(start: f32, end: f32, t: f32) -> f32 {
    let d = end - start;
    let v = t * 2.0;
    if v < 1.0 {
        return start + d * 0.5 * v * v * v;
    }
    let w = v - 2.0;
    start + d * 0.5 * (w * w * w + 2.0)
}

pub fn quart_in(start: f32, end: f32, t: f32) -> f32 {
    start + (end - start) * t.powi(4)
}

pub fn quart_out(start: f32, end: f32, t: f32) -> f32 {
    let u = t - 1.0;
    start - (end - start) * (u.powi(4) - 1.0)
}

pub fn quart_in_out(start: f32, end: f32, t: f32) -> f32 {
    let d = end - start;
    let v = t * 2.0;
    if v < 1.0 {
        return start + d * 0.5 * v.powi(4);
    }
    let w = v - 2.0;
    start - d * 0.5 * (w.powi(4) - 2.0)
}

pub fn quint_in(start: f32, end: f32, t: f32) -> f32 {
    start + (end - start) * t.powi(5)
}

pub fn quint_out(start: f32, end: f32, t: f32) -> f32 {
    let u = t - 1.0;
    start + (end - start) * (u.powi(5) + 1.0)
}

pub fn quint_in_out(start: f32, end: f32, t: f32) -> f32 {
    let d = end - start;
    let v = t * 2.0;
    if v < 1.0 {
        return start + d * 0.5 * v.powi(5);
    }
    let w = v - 2.0;
    start + d * 0.5 * (w.powi(5) + 2.0)
}

pub fn sine_in(start: f32, end: f32, t: f32) -> f32 {
    let d = end - start;
    start + d - d * (t * PI * 0.5).cos()
}

pub fn sine_out(start: f32, end: f32, t: f32) -> f32 {
    start + (end - start) * (t * PI * 0.5).sin()
}

pub fn sine_in_out(start: f32, end: f32, t: f32) -> f32 {
    start - (end - start) * 0.5 * ((PI * t).cos() - 1.0)
}

pub fn expo_in(start: f32, end: f32, t: f32) -> f32 {
    start + (end - start) * 2f32.powf(10.0 * (t - 1.0))
}

pub fn expo_out(start: f32, end: f32, t: f32) -> f32 {
    start + (end - start) * (1.0 - 2f32.powf(-10.0 * t))
}

pub fn expo_in_out(start: f32, end: f32, t: f32) -> f32 {
    let d = end - start;
    let v = t * 2.0;
    if v < 1.0 {
        return start + d * 0.5 * 2f32.powf(10.0 * (v - 1.0));
    }
    let w = v - 1.0;
    start + d * 0.5 * (2.0 - 2f32.powf(-10.0 * w))
}

pub fn circ_in(start: f32, end: f32, t: f32) -> f32 {
    start - (end - start) * ((1.0 - t * t).sqrt() - 1.0)
}

pub fn circ_out(start: f32, end: f32, t: f32) -> f32 {
    let u = t - 1.0;
    start + (end - start) * (1.0 - u * u).sqrt()
}

pub fn circ_in_out(start: f32, end: f32, t: f32) -> f32 {
    let d = end - start;
    let v = t * 2.0;
    if v < 1.0 {
        return start - d * 0.5 * ((1.0 - v * v).sqrt() - 1.0);
    }
    let w = v - 2.0;
    start + d * 0.5 * ((1.0 - w * w).sqrt() + 1.0)
}

pub fn bounce_in(start: f32, end: f32, t: f32) -> f32 {
    let d = end - start;
    start + d - bounce_out(0.0, d, 1.0 - t)
}

pub fn bounce_out(start: f32, end: f32, t: f32) -> f32 {
    start + (end - start) * bounce_curve(t)
}

pub fn bounce_in_out(start: f32, end: f32, t: f32) -> f32 {
    let d = end - start;
    if t < 0.5 {
        start + bounce_in(0.0, d, t * 2.0) * 0.5
    } else {
        start + bounce_out(0.0, d, t * 2.0 - 1.0) * 0.5 + d * 0.5
    }
}

pub fn back_in(start: f32, end: f32, t: f32) -> f32 {
    start + (end - start) * t * t * ((BACK + 1.0) * t - BACK)
}

pub fn back_out(start: f32, end: f32, t: f32) -> f32 {
    let u = t - 1.0;
    start + (end - start) * (u * u * ((BACK + 1.0) * u + BACK) + 1.0)
}

pub fn back_in_out(start: f32, end: f32, t: f32) -> f32 {
    let d = end - start;
    let s = BACK_IN_OUT;
    let v = t * 2.0;
    if v < 1.0 {
        return start + d * 0.5 * (v * v * ((s + 1.0) * v - s));
    }
    let w = v - 2.0;
    start + d * 0.5 * (w * w * ((s + 1.0) * w + s) + 2.0)
}

pub fn elastic_in(start: f32, end: f32, t: f32) -> f32 {
    if t == 0.0 {
        return start;
    }
    if t == 1.0 {
        return end;
    }
    let u = t - 1.0;
    start - (end - start) * 2f32.powf(10.0 * u) * ((u - ELASTIC_SHIFT) * ELASTIC_W).sin()
}

pub fn elastic_out(start: f32, end: f32, t: f32) -> f32 {
    if t == 0.0 {
        return start;
    }
    if t == 1.0 {
        return end;
    }
    let d = end - start;
    start + d + d * 2f32.powf(-10.0 * t) * ((t - ELASTIC_SHIFT) * ELASTIC_W).sin()
}

pub fn elastic_in_out(start: f32, end: f32, t: f32) -> f32 {
    if t == 0.0 {
        return start;
    }
    let v = t * 2.0;
    if v == 2.0 {
        return end;
    }
    let d = end - start;
    let u = v - 1.0;
    let wave = ((u - ELASTIC_SHIFT) * ELASTIC_W).sin();
    if v < 1.0 {
        start - 0.5 * d * 2f32.powf(10.0 * u) * wave
    } else {
        start + d + 0.5 * d * 2f32.powf(-10.0 * u) * wave
    }
}

#[inline]
fn bounce_curve(t: f32) -> f32 {
    if t < 1.0 / BOUNCE_D {
        BOUNCE_N * t * t
    } else if t < 2.0 / BOUNCE_D {
        let t = t - 1.5 / BOUNCE_D;
        BOUNCE_N * t * t + 0.75
    } else if t < 2.5 / BOUNCE_D {
        let t = t - 2.25 / BOUNCE_D;
        BOUNCE_N * t * t + 0.9375
    } else {
        let t = t - 2.625 / BOUNCE_D;
        BOUNCE_N * t * t + 0.984375
    }
}

#[inline]
fn bounce_slope(t: f32) -> f32 {
    let shifted = if t < 1.0 / BOUNCE_D {
        t
    } else if t < 2.0 / BOUNCE_D {
        t - 1.5 / BOUNCE_D
    } else if t < 2.5 / BOUNCE_D {
        t - 2.25 / BOUNCE_D
    } else {
        t - 2.625 / BOUNCE_D
    };
    2.0 * BOUNCE_N * shifted
}

/// Analytic derivatives, `d/dt` of the matching curve.
mod d {
    use super::*;

    pub fn linear(start: f32, end: f32, _t: f32) -> f32 {
        end - start
    }

    pub fn spring(start: f32, end: f32, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        let phase = PI * (0.2 * t + 2.5 * t.powi(4));
        let phase_rate = PI * (0.2 + 10.0 * t.powi(3));
        let decay = (1.0 - t).powf(2.2);
        let decay_rate = -2.2 * (1.0 - t).powf(1.2);
        let a = phase.sin() * decay + t;
        let a_rate = phase.cos() * phase_rate * decay + phase.sin() * decay_rate + 1.0;
        let b = 1.0 + 1.2 * (1.0 - t);
        (end - start) * (a_rate * b - 1.2 * a)
    }

    pub fn quad_in(start: f32, end: f32, t: f32) -> f32 {
        2.0 * (end - start) * t
    }

    pub fn quad_out(start: f32, end: f32, t: f32) -> f32 {
        (end - start) * (2.0 - 2.0 * t)
    }

    pub fn quad_in_out(start: f32, end: f32, t: f32) -> f32 {
        let d = end - start;
        let v = t * 2.0;
        if v < 1.0 {
            return 2.0 * d * v;
        }
        d * (2.0 - 2.0 * (v - 1.0))
    }

    pub fn cubic_in(start: f32, end: f32, t: f32) -> f32 {
        3.0 * (end - start) * t * t
    }

    pub fn cubic_out(start: f32, end: f32, t: f32) -> f32 {
        let u = t - 1.0;
        3.0 * (end - start) * u * u
    }

    pub fn cubic_in_out(start: f32, end: f32, t: f32) -> f32 {
        let d = end - start;
        let v = t * 2.0;
        let w = if v < 1.0 { v } else { v - 2.0 };
        3.0 * d * w * w
    }

    pub fn quart_in(start: f32, end: f32, t: f32) -> f32 {
        4.0 * (end - start) * t.powi(3)
    }

    pub fn quart_out(start: f32, end: f32, t: f32) -> f32 {
        -4.0 * (end - start) * (t - 1.0).powi(3)
    }

    pub fn quart_in_out(start: f32, end: f32, t: f32) -> f32 {
        let d = end - start;
        let v = t * 2.0;
        if v < 1.0 {
            return 4.0 * d * v.powi(3);
        }
        -4.0 * d * (v - 2.0).powi(3)
    }

    pub fn quint_in(start: f32, end: f32, t: f32) -> f32 {
        5.0 * (end - start) * t.powi(4)
    }

    pub fn quint_out(start: f32, end: f32, t: f32) -> f32 {
        5.0 * (end - start) * (t - 1.0).powi(4)
    }

    pub fn quint_in_out(start: f32, end: f32, t: f32) -> f32 {
        let d = end - start;
        let v = t * 2.0;
        let w = if v < 1.0 { v } else { v - 2.0 };
        5.0 * d * w.powi(4)
    }

    pub fn sine_in(start: f32, end: f32, t: f32) -> f32 {
        (end - start) * 0.5 * PI * (0.5 * PI * t).sin()
    }

    pub fn sine_out(start: f32, end: f32, t: f32) -> f32 {
        (end - start) * 0.5 * PI * (0.5 * PI * t).cos()
    }

    pub fn sine_in_out(start: f32, end: f32, t: f32) -> f32 {
        (end - start) * 0.5 * PI * (PI * t).sin()
    }

    pub fn expo_in(start: f32, end: f32, t: f32) -> f32 {
        10.0 * LN_2 * (end - start) * 2f32.powf(10.0 * (t - 1.0))
    }

    pub fn expo_out(start: f32, end: f32, t: f32) -> f32 {
        10.0 * LN_2 * (end - start) * 2f32.powf(-10.0 * t)
    }

    pub fn expo_in_out(start: f32, end: f32, t: f32) -> f32 {
        let d = end - start;
        let v = t * 2.0;
        if v < 1.0 {
            return 10.0 * LN_2 * d * 2f32.powf(10.0 * (v - 1.0));
        }
        10.0 * LN_2 * d * 2f32.powf(-10.0 * (v - 1.0))
    }

    pub fn circ_in(start: f32, end: f32, t: f32) -> f32 {
        (end - start) * t / (1.0 - t * t).sqrt()
    }

    pub fn circ_out(start: f32, end: f32, t: f32) -> f32 {
        let u = t - 1.0;
        -(end - start) * u / (1.0 - u * u).sqrt()
    }

    pub fn circ_in_out(start: f32, end: f32, t: f32) -> f32 {
        let d = end - start;
        let v = t * 2.0;
        if v < 1.0 {
            return d * v / (1.0 - v * v).sqrt();
        }
        let w = v - 2.0;
        -d * w / (1.0 - w * w).sqrt()
    }

    pub fn bounce_in(start: f32, end: f32, t: f32) -> f32 {
        (end - start) * bounce_slope(1.0 - t)
    }

    pub fn bounce_out(start: f32, end: f32, t: f32) -> f32 {
        (end - start) * bounce_slope(t)
    }

    pub fn bounce_in_out(start: f32, end: f32, t: f32) -> f32 {
        if t < 0.5 {
            bounce_in(start, end, t * 2.0)
        } else {
            bounce_out(start, end, t * 2.0 - 1.0)
        }
    }

    pub fn back_in(start: f32, end: f32, t: f32) -> f32 {
        (end - start) * (3.0 * (BACK + 1.0) * t * t - 2.0 * BACK * t)
    }

    pub fn back_out(start: f32, end: f32, t: f32) -> f32 {
        let u = t - 1.0;
        (end - start) * (3.0 * (BACK + 1.0) * u * u + 2.0 * BACK * u)
    }

    pub fn back_in_out(start: f32, end: f32, t: f32) -> f32 {
        let d = end - start;
        let s = BACK_IN_OUT;
        let v = t * 2.0;
        let w = if v < 1.0 { v } else { v - 2.0 };
        if v < 1.0 {
            d * (3.0 * (s + 1.0) * w * w - 2.0 * s * w)
        } else {
            d * (3.0 * (s + 1.0) * w * w + 2.0 * s * w)
        }
    }

    pub fn elastic_in(start: f32, end: f32, t: f32) -> f32 {
        let u = t - 1.0;
        let theta = (u - ELASTIC_SHIFT) * ELASTIC_W;
        -(end - start) * 2f32.powf(10.0 * u) * (10.0 * LN_2 * theta.sin() + ELASTIC_W * theta.cos())
    }

    pub fn elastic_out(start: f32, end: f32, t: f32) -> f32 {
        let theta = (t - ELASTIC_SHIFT) * ELASTIC_W;
        (end - start) * 2f32.powf(-10.0 * t) * (ELASTIC_W * theta.cos() - 10.0 * LN_2 * theta.sin())
    }

    pub fn elastic_in_out(start: f32, end: f32, t: f32) -> f32 {
        let d = end - start;
        let u = t * 2.0 - 1.0;
        let theta = (u - ELASTIC_SHIFT) * ELASTIC_W;
        if u < 0.0 {
            -d * 2f32.powf(10.0 * u) * (10.0 * LN_2 * theta.sin() + ELASTIC_W * theta.cos())
        } else {
            d * 2f32.powf(-10.0 * u) * (ELASTIC_W * theta.cos() - 10.0 * LN_2 * theta.sin())
        }
    }
}

// ── Interpolation helpers ────────────────────────────────────────────────

/// Linearly interpolate between two values.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Interpolate with easing.
#[inline]
pub fn ease(a: f32, b: f32, t: f32, easing: Easing) -> f32 {
    (easing.function())(a, b, t)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Sample points that avoid the kinks of the piecewise curves.
    const SAMPLES: [f32; 5] = [0.13, 0.31, 0.47, 0.62, 0.83];

    #[test]
    fn linear_endpoints() {
        assert_eq!(Easing::Linear.apply(0.0), 0.0);
        assert_eq!(Easing::Linear.apply(1.0), 1.0);
        assert_eq!(Easing::Linear.apply(0.5), 0.5);
    }

    #[test]
    fn every_curve_starts_and_ends_near_its_endpoints() {
        for easing in Easing::ALL {
            let f = easing.function();
            let start = f(2.0, 6.0, 0.0);
            let end = f(2.0, 6.0, 1.0);
            // Expo curves stop just short of their endpoints by 2^-10.
            assert!((start - 2.0).abs() < 5e-3, "{:?} starts at {}", easing, start);
            assert!((end - 6.0).abs() < 5e-3, "{:?} ends at {}", easing, end);
        }
    }

    #[test]
    fn derivatives_match_finite_differences() {
        let h = 1e-3;
        for easing in Easing::ALL {
            let f = easing.function();
            let df = easing.derivative();
            for t in SAMPLES {
                let numeric = (f(0.0, 1.0, t + h) - f(0.0, 1.0, t - h)) / (2.0 * h);
                let analytic = df(0.0, 1.0, t);
                let tolerance = 1e-2 * analytic.abs().max(1.0);
                assert!(
                    (numeric - analytic).abs() < tolerance,
                    "{:?} at t={}: numeric {} vs analytic {}",
                    easing, t, numeric, analytic
                );
            }
        }
    }

    #[test]
    fn derivative_scales_with_range() {
        for easing in Easing::ALL {
            let df = easing.derivative();
            let unit = df(0.0, 1.0, 0.4);
            let scaled = df(10.0, 13.0, 0.4);
            assert!((scaled - 3.0 * unit).abs() < 1e-3 * unit.abs().max(1.0), "{:?}", easing);
        }
    }

    #[test]
    fn quad_out_faster_start() {
        // QuadOut should be > 0.5 at t=0.5 (faster start, slower end)
        let mid = Easing::QuadOut.apply(0.5);
        assert!(mid > 0.5, "QuadOut at 0.5 should be > 0.5, got {}", mid);
    }

    #[test]
    fn back_overshoots() {
        let early = Easing::BackOut.apply(0.3);
        assert!(early > 0.3, "BackOut should overshoot");
        let dip = Easing::BackIn.apply(0.2);
        assert!(dip < 0.0, "BackIn should dip below start, got {}", dip);
    }

    #[test]
    fn in_out_curves_are_symmetric_at_midpoint() {
        for easing in [
            Easing::QuadInOut,
            Easing::CubicInOut,
            Easing::QuartInOut,
            Easing::QuintInOut,
            Easing::SineInOut,
            Easing::CircInOut,
            Easing::BounceInOut,
            Easing::ElasticInOut,
        ] {
            let mid = easing.apply(0.5);
            assert!((mid - 0.5).abs() < 1e-4, "{:?} at 0.5 gave {}", easing, mid);
        }
    }

    #[test]
    fn curves_are_referentially_transparent() {
        for easing in Easing::ALL {
            let f = easing.function();
            assert_eq!(f(1.0, 4.0, 0.37).to_bits(), f(1.0, 4.0, 0.37).to_bits());
        }
    }

    #[test]
    fn ease_interpolates() {
        let result = ease(100.0, 200.0, 0.5, Easing::Linear);
        assert!((result - 150.0).abs() < 0.001);
    }
}
