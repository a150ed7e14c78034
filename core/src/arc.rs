//! Paths a sticker follows while it moves between two slots.
//!
//! Every `(permutation, from_slot)` pair owns exactly one [`Arc`]. A fresh
//! permutation gets straight [`ArcShape::Line`] arcs; catalog data may swap
//! individual ones for circular arcs.

use std::f32::consts::TAU;

use crate::vector::{Vec2, EPSILON};

/// Number of straight segments used when an arc is drawn.
pub const ARC_SEGMENTS: usize = 24;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CircleParams {
    pub radius: f32,
    /// Put the center on the other side of the chord.
    pub plus_side: bool,
    pub reversed: bool,
    pub reflected: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CircleArc {
    pub params: CircleParams,
    pub center: Vec2,
    pub angle_u: f32,
    pub angle_v: f32,
    pub angle_span: f32,
}

impl CircleArc {
    fn derive(params: CircleParams, u: Vec2, v: Vec2) -> Self {
        let radius = params.radius;
        let chord = u.distance(v);
        let disc = (radius * radius - chord * chord / 4.0).max(EPSILON);
        let h = disc.sqrt();
        let mid = (u + v) * 0.5;
        let mut rot = (v - u).unit().perp();
        if params.plus_side {
            rot = -rot;
        }
        let center = mid + rot * h;

        let mut angle_u = (u - center).angle();
        let angle_v = (v - center).angle();
        let mut angle_span = angle_v - angle_u;
        // Order matters when both flags are set: each step recomputes the span.
        if params.reversed {
            angle_u += TAU;
            angle_span = angle_v - angle_u;
        }
        if params.reflected {
            angle_u -= TAU;
            angle_span = angle_v - angle_u;
        }
        Self {
            params,
            center,
            angle_u,
            angle_v,
            angle_span,
        }
    }

    fn point(&self, t: f32) -> Vec2 {
        let theta = self.angle_u + t * self.angle_span;
        self.center + Vec2::from_angle(theta) * self.params.radius
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ArcShape {
    Line,
    Circle(CircleArc),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Arc {
    shape: ArcShape,
    from: usize,
    to: usize,
    u: Vec2,
    v: Vec2,
    permutation: usize,
}

impl Arc {
    pub fn line(permutation: usize, from: usize, to: usize, u: Vec2, v: Vec2) -> Self {
        Self {
            shape: ArcShape::Line,
            from,
            to,
            u,
            v,
            permutation,
        }
    }

    pub fn circle(
        permutation: usize,
        from: usize,
        to: usize,
        u: Vec2,
        v: Vec2,
        params: CircleParams,
    ) -> Self {
        Self {
            shape: ArcShape::Circle(CircleArc::derive(params, u, v)),
            from,
            to,
            u,
            v,
            permutation,
        }
    }

    pub fn shape(&self) -> &ArcShape {
        &self.shape
    }

    pub fn from_slot(&self) -> usize {
        self.from
    }

    pub fn to_slot(&self) -> usize {
        self.to
    }

    pub fn permutation(&self) -> usize {
        self.permutation
    }

    pub fn endpoints(&self) -> (Vec2, Vec2) {
        (self.u, self.v)
    }

    /// True when the arc starts and ends on the same slot.
    pub fn is_fixed_point(&self) -> bool {
        self.from == self.to
    }

    pub fn point(&self, t: f32) -> Vec2 {
        match &self.shape {
            ArcShape::Line => self.u.lerp(self.v, t),
            ArcShape::Circle(circle) => circle.point(t),
        }
    }

    /// Moves the endpoints and recomputes circle geometry.
    pub fn set_endpoints(&mut self, u: Vec2, v: Vec2) {
        self.u = u;
        self.v = v;
        self.rederive();
    }

    /// Divides the radius by `scale_factor`; endpoints are expected to be
    /// rescaled by the caller through [`Arc::set_endpoints`].
    pub fn normalize(&mut self, scale_factor: f32) {
        if let ArcShape::Circle(circle) = &mut self.shape {
            if scale_factor.abs() > EPSILON {
                circle.params.radius /= scale_factor;
            }
        }
        self.rederive();
    }

    fn rederive(&mut self) {
        if let ArcShape::Circle(circle) = &self.shape {
            self.shape = ArcShape::Circle(CircleArc::derive(circle.params, self.u, self.v));
        }
    }

    /// Points along the arc, `segments + 1` of them including both ends.
    pub fn sample(&self, segments: usize) -> Vec<Vec2> {
        let segments = segments.max(1);
        (0..=segments)
            .map(|step| self.point(step as f32 / segments as f32))
            .collect()
    }
}
