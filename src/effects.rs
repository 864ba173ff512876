use crate::config::FxConfig;
use crate::constants::*;
use crate::surface::Surface;
use glam::Vec2;
use rand::Rng;
use smallvec::SmallVec;

pub type ParticleList<N> = SmallVec<[N; 24]>;

// ---------------- Scroll parallax ----------------

/// Translations for the primary and secondary layers at `scroll_offset`.
#[inline]
pub fn parallax_offsets(scroll_offset: f64) -> (Vec2, Vec2) {
    let rate = scroll_offset as f32 * PARALLAX_RATE;
    (
        Vec2::splat(rate),
        Vec2::splat(rate * PARALLAX_SECONDARY_RATIO),
    )
}

pub fn apply_parallax<S: Surface>(
    surface: &S,
    primary: Option<&S::Node>,
    secondary: Option<&S::Node>,
    scroll_offset: f64,
) {
    let (near, far) = parallax_offsets(scroll_offset);
    if let Some(node) = primary {
        surface.set_transform(node, &translate_css(near));
    }
    if let Some(node) = secondary {
        surface.set_transform(node, &translate_css(far));
    }
}

// ---------------- Pointer drift ----------------

/// Depth factor cycling over particles so neighbours drift at different speeds.
#[inline]
pub fn speed_factor(index: usize) -> f32 {
    DRIFT_SPEED_FACTORS[index % DRIFT_SPEED_FACTORS.len()]
}

/// Translation of particle `index` for a pointer at `pointer` in a viewport
/// of `viewport`. A degenerate viewport axis contributes no drift.
pub fn pointer_drift(pointer: Vec2, viewport: Vec2, index: usize) -> Vec2 {
    let ratio = |p: f32, size: f32| {
        if size > 0.0 && size.is_finite() && p.is_finite() {
            p / size
        } else {
            0.0
        }
    };
    Vec2::new(ratio(pointer.x, viewport.x), ratio(pointer.y, viewport.y))
        * DRIFT_SCALE
        * speed_factor(index)
}

pub fn apply_pointer_drift<S: Surface>(
    surface: &S,
    particles: &[S::Node],
    pointer: Vec2,
    viewport: Vec2,
) {
    for (i, node) in particles.iter().enumerate() {
        surface.set_transform(node, &translate_css(pointer_drift(pointer, viewport, i)));
    }
}

// ---------------- Cursor light ----------------

/// Top-left corner that centers the light under the pointer.
#[inline]
pub fn light_position(pointer: Vec2) -> Vec2 {
    pointer - Vec2::splat(LIGHT_SIZE_PX * 0.5)
}

pub fn apply_light<S: Surface>(surface: &S, light: &S::Node, pointer: Vec2) {
    surface.set_transform(light, &translate_css(light_position(pointer)));
}

// ---------------- Particles ----------------

#[inline]
pub fn particle_count_for_width(width: f64, cfg: &FxConfig) -> usize {
    if width < cfg.narrow_breakpoint_px {
        cfg.narrow_particle_count
    } else {
        cfg.particle_count
    }
}

/// Randomized placement and animation timing for one particle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleDescriptor {
    pub left_pct: f32,
    pub top_pct: f32,
    pub delay_s: f32,
    pub duration_s: f32,
}

impl ParticleDescriptor {
    pub fn random(rng: &mut impl Rng) -> Self {
        Self {
            left_pct: rng.gen_range(0.0..100.0),
            top_pct: rng.gen_range(0.0..100.0),
            delay_s: rng.gen_range(0.0..PARTICLE_DELAY_MAX_S),
            duration_s: PARTICLE_DURATION_MIN_S + rng.gen_range(0.0..PARTICLE_DURATION_SPAN_S),
        }
    }
}

/// Append `count` freshly randomized particles to `container`.
pub fn spawn_particles<S: Surface>(
    surface: &S,
    container: &S::Node,
    count: usize,
    rng: &mut impl Rng,
) -> ParticleList<S::Node> {
    let mut out = ParticleList::new();
    for _ in 0..count {
        let Some(node) = surface.create_child(container, "div", CLASS_PARTICLE) else {
            continue;
        };
        let p = ParticleDescriptor::random(rng);
        surface.set_style(&node, "left", &format!("{:.2}%", p.left_pct));
        surface.set_style(&node, "top", &format!("{:.2}%", p.top_pct));
        surface.set_style(&node, "animation-delay", &format!("{:.2}s", p.delay_s));
        surface.set_style(&node, "animation-duration", &format!("{:.2}s", p.duration_s));
        surface.set_attribute(&node, "aria-hidden", "true");
        out.push(node);
    }
    out
}

// ---------------- CSS helpers ----------------

#[inline]
fn round2(v: f32) -> f32 {
    let r = (v * 100.0).round() / 100.0;
    // avoid "-0px"
    if r == 0.0 {
        0.0
    } else {
        r
    }
}

#[inline]
pub fn translate_css(v: Vec2) -> String {
    format!("translate({}px, {}px)", round2(v.x), round2(v.y))
}
