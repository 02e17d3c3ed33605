//! Draw-list builder. Reads frame state, writes paint commands; never mutates
//! the simulation.

use crate::components::particle::{Particle, GLOW_EPSILON};
use crate::renderer::traits::{Color, DrawCommand, DrawList, Shadow};
use crate::systems::effects::{Ripple, Spark};
use crate::systems::proximity::Connection;

pub const DOT_RADIUS: f32 = 1.5;
pub const DOT_ALPHA: f32 = 0.7;
pub const HALO_SPREAD: f32 = 8.0;
pub const LINE_WIDTH: f32 = 0.55;

/// Everything one frame draws, borrowed from the field.
pub struct FrameView<'a> {
    pub particles: &'a [Particle],
    pub connections: &'a [Connection],
    pub sparks: &'a [Spark],
    pub ripples: &'a [Ripple],
    /// Surface width in CSS pixels, for hue drift.
    pub width: f32,
    /// Connection threshold the edges were built with.
    pub threshold: f32,
    /// Shift hues across the width instead of painting in the base colour.
    pub hue_drift: bool,
}

impl FrameView<'_> {
    fn hue(&self, x: f32, span: f32) -> f32 {
        let ratio = if self.width > 0.0 { x / self.width } else { 0.0 };
        210.0 + ratio * span
    }

    /// `hsl(h, s%, l%)` with hue drift, otherwise the base colour.
    fn paint(&self, h: f32, s: f32, l: f32) -> Color {
        if self.hue_drift {
            Color::Hsl { h, s, l }
        } else {
            Color::Base
        }
    }
}

/// Rebuild `out` for one frame: clear, particles, connections, sparks, ripples.
pub fn build_draw_list(view: &FrameView, out: &mut DrawList) {
    out.clear();
    out.push(DrawCommand::Clear);

    for p in view.particles {
        push_particle(view, p, out);
    }
    for c in view.connections {
        push_connection(view, c, out);
    }
    for s in view.sparks {
        push_spark(view, s, out);
    }
    for r in view.ripples {
        push_ripple(r, out);
    }
}

fn push_particle(view: &FrameView, p: &Particle, out: &mut DrawList) {
    if !p.is_glowing() {
        out.push(DrawCommand::Dot {
            pos: p.pos,
            radius: DOT_RADIUS,
            color: Color::Base,
            alpha: DOT_ALPHA,
        });
        return;
    }

    let h = view.hue(p.pos.x, 150.0);
    let inner = view.paint(h, 100.0, 85.0);
    out.push(DrawCommand::Halo {
        pos: p.pos,
        radius: DOT_RADIUS + p.glow * HALO_SPREAD,
        inner,
        outer: view.paint(h, 100.0, 70.0),
        alpha: p.glow * 0.8,
    });
    out.push(DrawCommand::Dot {
        pos: p.pos,
        radius: DOT_RADIUS,
        color: inner,
        alpha: p.glow * 0.9,
    });
}

fn push_connection(view: &FrameView, c: &Connection, out: &mut DrawList) {
    let (Some(a), Some(b)) = (view.particles.get(c.a), view.particles.get(c.b)) else {
        return;
    };
    let base = if view.threshold > 0.0 {
        (view.threshold - c.distance) / view.threshold
    } else {
        0.0
    };
    let h = view.hue((a.pos.x + b.pos.x) / 2.0, 120.0);
    let glow = a.glow.max(b.glow);

    let cmd = if glow > GLOW_EPSILON {
        DrawCommand::Line {
            from: a.pos,
            to: b.pos,
            color: view.paint(h, 90.0, 68.0),
            alpha: base * (0.35 + glow * 0.65),
            width: LINE_WIDTH + glow,
            shadow: view.hue_drift.then_some(Shadow {
                color: Color::Hsla { h, s: 100.0, l: 75.0, a: 0.6 },
                blur: 8.0,
            }),
        }
    } else {
        DrawCommand::Line {
            from: a.pos,
            to: b.pos,
            color: view.paint(h, 70.0, 55.0),
            alpha: base * 0.8,
            width: LINE_WIDTH,
            shadow: view.hue_drift.then_some(Shadow {
                color: Color::Rgba { r: 120, g: 180, b: 255, a: 0.25 },
                blur: 5.0,
            }),
        }
    };
    out.push(cmd);
}

fn push_spark(view: &FrameView, s: &Spark, out: &mut DrawList) {
    let (Some(start), Some(end)) = (view.particles.get(s.start), view.particles.get(s.end)) else {
        return;
    };
    let f = s.distance_factor();
    out.push(DrawCommand::Spark {
        pos: s.position(start.pos, end.pos),
        core_radius: 0.24 + f,
        glow_radius: 6.0 + f * 10.0,
        alpha: 0.55 + f * 0.45,
        shadow: Shadow {
            color: Color::white(0.6 + f * 0.25),
            blur: 6.0 + f * 6.0,
        },
    });
}

fn push_ripple(r: &Ripple, out: &mut DrawList) {
    let alpha = r.current_alpha();
    out.push(DrawCommand::Ring {
        center: r.origin,
        radius: r.radius(),
        alpha,
        width: r.line_width(),
        shadow: Shadow {
            color: Color::white(alpha * 0.7),
            blur: 6.0,
        },
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn view<'a>(
        particles: &'a [Particle],
        connections: &'a [Connection],
        sparks: &'a [Spark],
        ripples: &'a [Ripple],
        hue_drift: bool,
    ) -> FrameView<'a> {
        FrameView {
            particles,
            connections,
            sparks,
            ripples,
            width: 400.0,
            threshold: 130.0,
            hue_drift,
        }
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn clear_comes_first() {
        let mut list = DrawList::new("#fff");
        build_draw_list(&view(&[], &[], &[], &[], true), &mut list);
        assert_eq!(list.commands, vec![DrawCommand::Clear]);
    }

    #[test]
    fn dim_particle_is_plain_base_dot() {
        let ps = [Particle::new(Vec2::new(10.0, 10.0), Vec2::ZERO, 0.0)];
        let mut list = DrawList::new("#fff");
        build_draw_list(&view(&ps, &[], &[], &[], true), &mut list);
        assert_eq!(
            list.commands[1],
            DrawCommand::Dot { pos: Vec2::new(10.0, 10.0), radius: 1.5, color: Color::Base, alpha: 0.7 }
        );
    }

    #[test]
    fn glowing_particle_draws_halo_then_core() {
        let mut p = Particle::new(Vec2::new(200.0, 10.0), Vec2::ZERO, 0.0);
        p.glow = 0.5;
        let ps = [p];
        let mut list = DrawList::new("#fff");
        build_draw_list(&view(&ps, &[], &[], &[], true), &mut list);
        assert_eq!(list.len(), 3);

        // Halfway across: 210 + 0.5 * 150.
        match list.commands[1] {
            DrawCommand::Halo { radius, inner, outer, alpha, .. } => {
                assert!(approx(radius, 5.5));
                assert!(approx(alpha, 0.4));
                assert_eq!(inner, Color::Hsl { h: 285.0, s: 100.0, l: 85.0 });
                assert_eq!(outer, Color::Hsl { h: 285.0, s: 100.0, l: 70.0 });
            }
            ref other => panic!("expected halo, got {:?}", other),
        }
        match list.commands[2] {
            DrawCommand::Dot { radius, color, alpha, .. } => {
                assert_eq!(radius, 1.5);
                assert!(approx(alpha, 0.45));
                assert_eq!(color, Color::Hsl { h: 285.0, s: 100.0, l: 85.0 });
            }
            ref other => panic!("expected dot, got {:?}", other),
        }
    }

    #[test]
    fn without_hue_drift_glow_uses_base_colour() {
        let mut p = Particle::new(Vec2::new(200.0, 10.0), Vec2::ZERO, 0.0);
        p.glow = 1.0;
        let ps = [p];
        let mut list = DrawList::new("#fff");
        build_draw_list(&view(&ps, &[], &[], &[], false), &mut list);
        match list.commands[1] {
            DrawCommand::Halo { inner, outer, .. } => {
                assert_eq!(inner, Color::Base);
                assert_eq!(outer, Color::Base);
            }
            ref other => panic!("expected halo, got {:?}", other),
        }
    }

    #[test]
    fn connection_styles() {
        let ps = [
            Particle::new(Vec2::new(0.0, 0.0), Vec2::ZERO, 0.0),
            Particle::new(Vec2::new(65.0, 0.0), Vec2::ZERO, 0.0),
        ];
        let cs = [Connection { a: 0, b: 1, distance: 65.0 }];
        let mut list = DrawList::new("#fff");
        build_draw_list(&view(&ps, &cs, &[], &[], true), &mut list);
        match list.commands[3] {
            DrawCommand::Line { alpha, width, color, shadow, .. } => {
                assert!(approx(alpha, 0.4));
                assert_eq!(width, 0.55);
                assert!(matches!(color, Color::Hsl { s, l, .. } if s == 70.0 && l == 55.0));
                assert_eq!(shadow.map(|s| s.blur), Some(5.0));
            }
            ref other => panic!("expected line, got {:?}", other),
        }
    }

    #[test]
    fn glowing_connection_brightens() {
        let mut a = Particle::new(Vec2::new(0.0, 0.0), Vec2::ZERO, 0.0);
        a.glow = 1.0;
        let ps = [a, Particle::new(Vec2::new(65.0, 0.0), Vec2::ZERO, 0.0)];
        let cs = [Connection { a: 0, b: 1, distance: 65.0 }];
        let mut list = DrawList::new("#fff");
        build_draw_list(&view(&ps, &cs, &[], &[], true), &mut list);
        let line = list.commands.iter().find(|c| matches!(c, DrawCommand::Line { .. }));
        match line {
            Some(DrawCommand::Line { alpha, width, shadow, .. }) => {
                assert!(approx(*alpha, 0.5));
                assert!(approx(*width, 1.55));
                assert_eq!(shadow.map(|s| s.blur), Some(8.0));
            }
            other => panic!("expected line, got {:?}", other),
        }
    }

    #[test]
    fn effects_follow_connections_in_order() {
        let ps = [
            Particle::new(Vec2::new(0.0, 0.0), Vec2::ZERO, 0.0),
            Particle::new(Vec2::new(130.0, 0.0), Vec2::ZERO, 0.0),
        ];
        let cs = [Connection { a: 0, b: 1, distance: 130.0 }];
        let sparks = [Spark::new(0, 1, 0.6, 130.0)];
        let ripples = [Ripple::new(Vec2::new(5.0, 5.0), 130.0)];
        let mut list = DrawList::new("#fff");
        build_draw_list(&view(&ps, &cs, &sparks, &ripples, true), &mut list);

        let kinds: Vec<&str> = list
            .iter()
            .map(|c| match c {
                DrawCommand::Clear => "clear",
                DrawCommand::Dot { .. } | DrawCommand::Halo { .. } => "particle",
                DrawCommand::Line { .. } => "line",
                DrawCommand::Spark { .. } => "spark",
                DrawCommand::Ring { .. } => "ring",
            })
            .collect();
        assert_eq!(kinds, vec!["clear", "particle", "particle", "line", "spark", "ring"]);

        match list.commands[4] {
            DrawCommand::Spark { pos, core_radius, glow_radius, alpha, shadow } => {
                assert_eq!(pos, Vec2::ZERO);
                assert!(approx(core_radius, 1.24));
                assert!(approx(glow_radius, 16.0));
                assert!(approx(alpha, 1.0));
                assert!(approx(shadow.blur, 12.0));
            }
            ref other => panic!("expected spark, got {:?}", other),
        }
        match list.commands[5] {
            DrawCommand::Ring { radius, alpha, width, shadow, .. } => {
                assert_eq!(radius, 0.0);
                assert!(approx(alpha, 0.9));
                assert!(approx(width, 2.2));
                assert_eq!(shadow.blur, 6.0);
            }
            ref other => panic!("expected ring, got {:?}", other),
        }
    }

    #[test]
    fn spark_position_follows_the_curve() {
        let ps = [
            Particle::new(Vec2::new(0.0, 0.0), Vec2::ZERO, 0.0),
            Particle::new(Vec2::new(100.0, 0.0), Vec2::ZERO, 0.0),
        ];
        let mut spark = Spark::new(0, 1, 0.6, 100.0);
        spark.progress = 0.5;
        let sparks = [spark];
        let mut list = DrawList::new("#fff");
        build_draw_list(&view(&ps, &[], &sparks, &[], true), &mut list);
        match list.commands.last() {
            Some(DrawCommand::Spark { pos, .. }) => assert!(approx(pos.x, 24.125)),
            other => panic!("expected spark, got {:?}", other),
        }
    }
}
