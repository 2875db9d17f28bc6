//! The gradient model: an ordered set of control points plus the densely
//! sampled table derived from them.
//!
//! Every edit operation re-sorts the point list where needed and ends in a
//! full [`Gradient::recompute`], so the sampled tables are never observably
//! stale.

use hueramp_expr::{CompileError, RemapFn};

use crate::color::{Hsva, Rgba, hsva_to_rgba, rgba_to_hsva};
use crate::config::EngineConfig;
use crate::point::{Channel, ChannelSet, ColorPoint};

/// The full gradient model.
///
/// Owns its control points and both sampled tables exclusively; consumers
/// get read-only views or copies of sampled colors.
#[derive(Debug, Clone)]
pub struct Gradient {
    size: usize,
    points: Vec<ColorPoint>,
    table: Vec<Hsva>,
    rgba: Vec<Rgba>,
    remap: Option<RemapFn>,
    click_tolerance: f32,
}

impl Gradient {
    /// Creates a gradient with the two fixed boundary points — black at 0,
    /// white at 1 — and recomputes immediately.
    pub fn new(config: &EngineConfig) -> Self {
        let left = ColorPoint::boundary(0.0, rgba_to_hsva(Rgba::black()));
        let right = ColorPoint::boundary(1.0, rgba_to_hsva(Rgba::white()));
        let mut gradient = Self {
            size: config.table_size.max(2),
            points: vec![left, right],
            table: Vec::new(),
            rgba: Vec::new(),
            remap: None,
            click_tolerance: config.click_tolerance,
        };
        gradient.recompute();
        gradient
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn points(&self) -> &[ColorPoint] {
        &self.points
    }

    #[inline]
    pub fn hsva_table(&self) -> &[Hsva] {
        &self.table
    }

    #[inline]
    pub fn rgba_table(&self) -> &[Rgba] {
        &self.rgba
    }

    #[inline]
    pub fn remap(&self) -> Option<&RemapFn> {
        self.remap.as_ref()
    }

    /// Index of the point closest to `position` within the configured click
    /// tolerance, if any.
    pub fn find_point(&self, position: f32) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        for (idx, point) in self.points.iter().enumerate() {
            let dist = (point.position() - position).abs();
            if dist <= self.click_tolerance && best.is_none_or(|(_, d)| dist < d) {
                best = Some((idx, dist));
            }
        }
        best.map(|(idx, _)| idx)
    }

    // ── Edit operations ───────────────────────────────────────────────────

    /// Inserts a movable point and returns its index in the sorted list.
    ///
    /// Equal positions insert after existing points (stable tie-break).
    pub fn add_point(&mut self, position: f32, color: Hsva, channels: ChannelSet) -> usize {
        let idx = self.insert_sorted(ColorPoint::new(position, color, channels));
        self.recompute();
        idx
    }

    /// Removes the point at `idx`. Fixed boundary points and out-of-range
    /// indices are a silent no-op; returns whether anything changed.
    pub fn remove_point(&mut self, idx: usize) -> bool {
        match self.points.get(idx) {
            Some(point) if !point.is_fixed() => {
                self.points.remove(idx);
                self.recompute();
                true
            }
            _ => false,
        }
    }

    /// Moves the point at `idx` to `position` (clamped) and returns its new
    /// index. Fixed points and out-of-range indices are a silent no-op.
    pub fn move_point(&mut self, idx: usize, position: f32) -> Option<usize> {
        match self.points.get(idx) {
            Some(point) if !point.is_fixed() => {}
            _ => return None,
        }
        let mut point = self.points.remove(idx);
        point.set_position(position);
        let new_idx = self.insert_sorted(point);
        self.recompute();
        Some(new_idx)
    }

    /// Sets one channel of the point's color (clamped to [0, 1]) and marks
    /// that channel active.
    pub fn set_channel_value(&mut self, idx: usize, channel: Channel, value: f32) -> bool {
        let Some(point) = self.points.get_mut(idx) else {
            return false;
        };
        let mut color = point.color();
        channel.write(&mut color, value.clamp(0.0, 1.0));
        point.set_hsva(color);
        point.activate(channel.into());
        self.recompute();
        true
    }

    /// Replaces the point's color with a direct HSVA value.
    pub fn set_point_hsva(&mut self, idx: usize, color: Hsva) -> bool {
        let Some(point) = self.points.get_mut(idx) else {
            return false;
        };
        point.set_hsva(color);
        self.recompute();
        true
    }

    /// Replaces the point's color from RGBA; converts through the color
    /// space and activates H, S, and V on the point.
    pub fn set_point_rgba(&mut self, idx: usize, color: Rgba) -> bool {
        let Some(point) = self.points.get_mut(idx) else {
            return false;
        };
        point.set_rgba(color);
        self.recompute();
        true
    }

    /// Changes the internal table resolution (minimum 2) and recomputes.
    pub fn set_size(&mut self, size: usize) {
        self.size = size.max(2);
        self.recompute();
    }

    /// Compiles and installs a remap expression. An empty or whitespace-only
    /// expression clears the remap. On a compile error the previous remap
    /// stays in effect.
    pub fn set_remap(&mut self, expr: &str, param: f32) -> Result<(), CompileError> {
        if expr.trim().is_empty() {
            self.remap = None;
            return Ok(());
        }
        self.remap = Some(RemapFn::compile(expr, param)?);
        Ok(())
    }

    /// Re-binds the remap parameter, keeping the expression. No-op without
    /// an installed remap.
    pub fn set_remap_param(&mut self, param: f32) -> Result<(), CompileError> {
        if let Some(remap) = self.remap.as_mut() {
            remap.set_param(param)?;
        }
        Ok(())
    }

    pub fn clear_remap(&mut self) {
        self.remap = None;
    }

    /// Wholesale replacement used by the codec after a successful load.
    /// `points` must already be sorted and carry the fixed boundaries.
    pub(crate) fn replace_model(&mut self, points: Vec<ColorPoint>, remap: Option<RemapFn>) {
        self.points = points;
        self.remap = remap;
        self.recompute();
    }

    fn insert_sorted(&mut self, point: ColorPoint) -> usize {
        let idx = self.points.partition_point(|p| p.position() <= point.position());
        self.points.insert(idx, point);
        idx
    }

    // ── Recompute ─────────────────────────────────────────────────────────

    /// Rebuilds both sampled tables from the control points.
    ///
    /// Each channel interpolates independently over the subsequence of
    /// points active on it; the boundary points are active everywhere, so
    /// that subsequence always has at least two members spanning [0, 1].
    /// A coincident bracket (two active points at the same position) takes
    /// the earlier point's value.
    pub fn recompute(&mut self) {
        self.table.clear();
        self.table.resize(self.size, Hsva::default());
        let last = (self.size - 1) as f32;

        for channel in Channel::ALL {
            let active: Vec<(f32, f32)> = self
                .points
                .iter()
                .filter(|p| p.active().contains(channel))
                .map(|p| (p.position(), channel.of(p.color())))
                .collect();

            let mut seg = 0;
            for k in 0..self.size {
                let pos = k as f32 / last;
                while seg + 2 < active.len() && pos > active[seg + 1].0 {
                    seg += 1;
                }
                let (start, end) = (active[seg], active[seg + 1]);
                let span = end.0 - start.0;
                let f = if span > 0.0 {
                    ((pos - start.0) / span).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                // The (1 - f)/f form reproduces the endpoints exactly at
                // f = 0 and f = 1.
                channel.write(&mut self.table[k], start.1 * (1.0 - f) + end.1 * f);
            }
        }

        self.rgba = self.table.iter().map(|&c| hsva_to_rgba(c)).collect();
        log::trace!(
            "recomputed {} samples from {} control points",
            self.size,
            self.points.len()
        );
    }

    // ── Sampling and export ───────────────────────────────────────────────

    /// Samples the RGBA table at `t` (clamped), interpolating linearly
    /// between neighbouring entries.
    ///
    /// This is a second interpolation layer over the materialized table and
    /// operates purely in RGBA space.
    pub fn sample_at(&self, t: f32) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        let x = t * (self.size - 1) as f32;
        let i0 = x.floor() as usize;
        let i1 = (i0 + 1).min(self.size - 1);
        let frac = x - i0 as f32;
        let (a, b) = (self.rgba[i0], self.rgba[i1]);
        Rgba::new(
            a.r * (1.0 - frac) + b.r * frac,
            a.g * (1.0 - frac) + b.g * frac,
            a.b * (1.0 - frac) + b.b * frac,
            a.a * (1.0 - frac) + b.a * frac,
        )
    }

    /// Exports an `n`-entry RGBA table through the installed remap, if any.
    pub fn export_table(&self, n: usize) -> Vec<Rgba> {
        self.export_table_with(n, self.remap.as_ref())
    }

    /// Exports an `n`-entry RGBA table through a caller-supplied remap.
    /// `n = 1` produces the single sample at 0.
    pub fn export_table_with(&self, n: usize, remap: Option<&RemapFn>) -> Vec<Rgba> {
        let n = n.max(1);
        let last = (n - 1).max(1) as f32;
        (0..n)
            .map(|idx| {
                let u = idx as f32 / last;
                let t = match remap {
                    Some(remap) => remap.eval(u),
                    None => u,
                };
                self.sample_at(t)
            })
            .collect()
    }
}

impl Default for Gradient {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}
