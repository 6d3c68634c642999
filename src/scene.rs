//! Layered drawing of one animation frame.
//!
//! The scene is a flat list of primitives in canvas pixels, painted in
//! order. The GUI hands them to egui and snapshots rasterise them, so nothing
//! here depends on a drawing backend.

use std::f32::consts::TAU;

use eframe::egui::Vec2;
use rand::Rng;

use crate::animation::State;
use crate::color::Rgb;
use crate::particle::{EnergyKind, ParticleField};
use crate::pattern::StressPattern;
use crate::visual::VisualParameters;

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Circle {
        center: Vec2,
        radius: f32,
        color: Rgb,
    },
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Rgb,
    },
    Path {
        points: Vec<Vec2>,
        width: f32,
        color: Rgb,
    },
    Text {
        position: Vec2,
        text: String,
        size: f32,
        bold: bool,
        color: Rgb,
    },
}

impl Shape {
    fn points(&self) -> Vec<Vec2> {
        match self {
            Shape::Circle { center, .. } => vec![*center],
            Shape::Line { from, to, .. } => vec![*from, *to],
            Shape::Path { points, .. } => points.clone(),
            Shape::Text { position, .. } => vec![*position],
        }
    }

    pub fn is_finite(&self) -> bool {
        let sized = match self {
            Shape::Circle { radius, .. } => radius.is_finite(),
            Shape::Line { width, .. } | Shape::Path { width, .. } => width.is_finite(),
            Shape::Text { size, .. } => size.is_finite(),
        };
        sized && self.points().iter().all(|p| p.is_finite())
    }
}

/// Everything one frame needs.
pub struct Frame<'a> {
    pub state: State,
    pub params: &'a VisualParameters,
    pub field: &'a ParticleField,
    /// Elapsed nominal frames
    pub clock: f32,
    /// Canvas size in pixels
    pub size: Vec2,
}

impl Frame<'_> {
    fn center(&self) -> Vec2 {
        self.size * 0.5
    }
}

/// Builds the frame back to front.
pub fn compose<R: Rng + ?Sized>(frame: &Frame<'_>, rng: &mut R) -> Vec<Shape> {
    let mut shapes = Vec::new();
    background(frame, &mut shapes);
    economic_pressure(frame, &mut shapes);
    wisps(frame, &mut shapes);
    particles(frame, &mut shapes);
    stone_core(frame, &mut shapes);
    pattern_overlay(frame, &mut shapes);
    sparkles(frame, rng, &mut shapes);
    floating_text(frame, &mut shapes);
    shapes
}

fn background(frame: &Frame<'_>, shapes: &mut Vec<Shape>) {
    let t = frame.clock;
    let center = frame.center();
    let tint = Rgb::from_hue(frame.params.hue_base);

    for layer in 0..6 {
        let layer_f = layer as f32;
        let frequency = 0.01 + layer_f * 0.002;
        let amplitude = 20.0 + layer_f * 8.0;

        let mut points = Vec::new();
        let mut x = 0.0;
        while x < frame.size.x {
            let y1 = center.y + amplitude * (x * frequency + t * 0.02 + layer_f).sin();
            let y2 = y1 + 30.0 * (x * frequency * 1.7 + t * 0.015).sin();
            points.push(Vec2::new(x, y2));
            x += 15.0;
        }
        if points.len() < 3 {
            continue;
        }

        let hue = (t * frame.params.color_speed + layer_f * 0.2).rem_euclid(1.0) * TAU;
        let intensity = 30.0 + 20.0 * layer_f;
        let color = Rgb::clamped(
            intensity + 20.0 * hue.sin(),
            intensity * 0.7 + 15.0 * (hue + 2.1).sin(),
            intensity * 1.2 + 25.0 * (hue + 4.2).sin(),
        )
        .mix(tint, 0.15);
        shapes.push(Shape::Path {
            points,
            width: 2.0,
            color,
        });
    }
}

fn economic_pressure(frame: &Frame<'_>, shapes: &mut Vec<Shape>) {
    let pressure = frame.params.pressure;
    if pressure <= 0.3 {
        return;
    }
    let t = frame.clock;
    let center = frame.center();
    let intensity = 150.0 * pressure * (0.5 + 0.5 * (t * 0.04).sin());
    let color = Rgb::clamped(intensity, intensity / 3.0, intensity / 3.0);

    for degrees in (0..360).step_by(20) {
        let angle = (degrees as f32).to_radians();
        let start = 180.0 + 40.0 * (t * 0.03 + degrees as f32 * 0.1).sin();
        let end = 120.0 - pressure * 25.0;
        shapes.push(Shape::Line {
            from: center + Vec2::angled(angle) * start,
            to: center + Vec2::angled(angle) * end,
            width: 2.0,
            color,
        });
    }
}

fn wisps(frame: &Frame<'_>, shapes: &mut Vec<Shape>) {
    let center = frame.center();
    for wisp in &frame.field.wisps {
        let points = (0..15)
            .map(|step| {
                let angle = wisp.angle + step as f32 * 0.15;
                let r1 = wisp.radius + wisp.amplitude * (angle * wisp.frequency).sin();
                let r2 = r1 + 12.0 * (angle * wisp.frequency * 1.8).cos();
                center + Vec2::angled(angle) * r2
            })
            .collect();

        let hue = (frame.clock * 0.008 + wisp.hue_phase).rem_euclid(1.0) * TAU;
        let color = Rgb::clamped(
            80.0 + 80.0 * hue.sin(),
            120.0 + 40.0 * (hue + 2.0).cos(),
            160.0 + 45.0 * (hue + 4.0).sin(),
        );
        shapes.push(Shape::Path {
            points,
            width: 2.0,
            color,
        });
    }
}

fn particles(frame: &Frame<'_>, shapes: &mut Vec<Shape>) {
    let center = frame.center();
    for particle in &frame.field.particles {
        let radius = particle.size * particle.vitality();
        if radius <= 0.5 {
            continue;
        }
        let base = match particle.kind {
            EnergyKind::Stress => Rgb::hex(0xFF6666),
            EnergyKind::Economic => Rgb::hex(0xFFAA44),
            EnergyKind::Core => Rgb::hex(0x66AAFF),
        };
        let glow = 0.8 + 0.2 * (particle.phase * TAU).sin();
        shapes.push(Shape::Circle {
            center: center + particle.position,
            radius,
            color: base.scale(glow),
        });
    }

    for fragment in &frame.field.fragments {
        shapes.push(Shape::Circle {
            center: center + fragment.position,
            radius: fragment.size * 0.5,
            color: Rgb::hex(0xCC3333),
        });
    }
}

fn stone_core(frame: &Frame<'_>, shapes: &mut Vec<Shape>) {
    let t = frame.clock;
    let center = frame.center();
    let palette = frame.params.archetype.palette();
    let compression = 1.0 - frame.params.pressure * 0.25;

    for ring in 0..10 {
        let ring_f = ring as f32;
        let pulse = (t * 0.04 + ring_f * 0.3).sin() * 6.0 + (t * 0.06 + ring_f * 0.2).cos() * 4.0;
        let radius = (100.0 - ring_f * 7.0 + pulse) * compression;
        if radius <= 0.0 {
            continue;
        }

        let index = (t * 0.01 + ring_f * 0.2) as usize % palette.len();
        let distortion = 1.0 + frame.params.stress * 0.3 * (t * 0.1 + ring_f).sin();
        let offset = Vec2::new((ring_f * 0.4).cos(), (ring_f * 0.4).sin());
        shapes.push(Shape::Circle {
            center: center + offset,
            radius,
            color: palette[index].scale(distortion),
        });
    }
}

fn pattern_overlay(frame: &Frame<'_>, shapes: &mut Vec<Shape>) {
    let t = frame.clock;
    let center = frame.center();
    for pattern in &frame.params.patterns {
        match pattern {
            StressPattern::EconomicPsychologicalSpiral => {
                for step in 0..80 {
                    let step = step as f32;
                    let radius = 2.5 - step * 0.02;
                    if radius <= 0.0 {
                        continue;
                    }
                    let angle = step * 0.12 + t * 0.02;
                    shapes.push(Shape::Circle {
                        center: center + Vec2::angled(angle) * (70.0 + step * 0.6),
                        radius,
                        color: Rgb::hex(0xFF6B6B),
                    });
                }
            }
            StressPattern::SurvivalModeActivation => {
                for spike in 0..8 {
                    let spike = spike as f32;
                    let angle = spike * TAU / 8.0 + t * 0.05;
                    let length = 90.0 + 25.0 * (t * 0.08 + spike).sin();
                    shapes.push(Shape::Line {
                        from: center + Vec2::angled(angle) * 70.0,
                        to: center + Vec2::angled(angle) * length,
                        width: 3.0,
                        color: Rgb::hex(0xFF4444),
                    });
                }
            }
            _ => {}
        }
    }
}

/// Sparkles are re-rolled every frame, so they twinkle rather than move.
fn sparkles<R: Rng + ?Sized>(frame: &Frame<'_>, rng: &mut R, shapes: &mut Vec<Shape>) {
    let t = frame.clock;
    let center = frame.center();
    let positive = (1.0 - frame.params.stress).max(0.0);
    let count = (40.0 * positive) as usize + 15;

    for _ in 0..count {
        let angle: f32 = rng.gen_range(0.0..TAU);
        let distance: f32 = rng.gen_range(120.0..350.0);
        let position = center + Vec2::angled(angle + t * 0.002) * distance;

        let age = (t as i64 + (position.x + position.y) as i64).rem_euclid(50) as f32;
        if age < 15.0 {
            shapes.push(Shape::Circle {
                center: position,
                radius: (15.0 - age) / 3.0,
                color: Rgb::gray(200.0 * (15.0 - age) / 15.0),
            });
        }
    }
}

fn floating_text(frame: &Frame<'_>, shapes: &mut Vec<Shape>) {
    let t = frame.clock;
    let center = frame.center();
    let y = center.y + 150.0 + 8.0 * (t * 0.04).sin();
    let shimmer = Rgb::shimmer((t * 0.006).rem_euclid(1.0), 120.0, 120.0);

    let title = match frame.state {
        State::Idle => "Take the assessment to reveal your stone",
        State::Animating => frame.params.archetype.name(),
    };
    shapes.push(Shape::Text {
        position: Vec2::new(center.x, y),
        text: title.to_string(),
        size: 16.0,
        bold: true,
        color: shimmer,
    });
    if frame.state == State::Idle {
        return;
    }

    let params = frame.params;
    let metrics = [
        (
            format!("Stress Level: {}%", params.stress_percent()),
            Rgb::hex(0xAAAAAA),
        ),
        (
            format!("Economic Pressure: {}%", params.pressure_percent()),
            Rgb::hex(0xFFAA66),
        ),
        (
            format!("Life Events: {}%", params.disruption_percent()),
            Rgb::hex(0x66AAFF),
        ),
    ];
    for (line, (text, color)) in metrics.into_iter().enumerate() {
        shapes.push(Shape::Text {
            position: Vec2::new(center.x, y + 25.0 + 20.0 * line as f32),
            text,
            size: 11.0,
            bold: false,
            color,
        });
    }
}
