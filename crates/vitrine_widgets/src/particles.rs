//! Particle background
//!
//! A field of slowly drifting dots painted onto a fixed, full-window canvas
//! behind the page. Particles move one step per frame and wrap around the
//! edges.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use vitrine_platform::{Canvas, Document, ElementId, HostEvent, Point, Viewport};
use vitrine_theme::BrandTokens;

use crate::context::WidgetContext;
use crate::widget::Widget;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    pub count: usize,
    /// The field is not created at or below this viewport width
    pub min_viewport_width: f32,
    /// Radius range in CSS pixels
    pub size: (f32, f32),
    /// Maximum speed along each axis, in pixels per frame
    pub max_speed: f32,
    pub opacity: (f32, f32),
    /// Canvas element opacity
    pub canvas_opacity: f32,
    /// Fixed seed for reproducible fields
    pub seed: Option<u64>,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: 50,
            min_viewport_width: 768.0,
            size: (1.0, 3.0),
            max_speed: 0.25,
            opacity: (0.2, 0.7),
            canvas_opacity: 0.3,
            seed: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Point,
    pub velocity: Point,
    pub size: f32,
    pub opacity: f32,
}

pub struct ParticleField {
    tokens: BrandTokens,
    canvas: ElementId,
    width: f32,
    height: f32,
    particles: Vec<Particle>,
}

impl ParticleField {
    /// Create the canvas element and populate the field
    ///
    /// Returns `None` on narrow viewports.
    pub fn mount(
        doc: &mut dyn Document,
        viewport: &Viewport,
        config: &ParticleConfig,
        tokens: BrandTokens,
    ) -> Option<Self> {
        if viewport.width <= config.min_viewport_width {
            tracing::debug!(
                "particles: viewport {}px wide, skipping",
                viewport.width
            );
            return None;
        }

        let canvas = doc.create_element("canvas");
        for (property, value) in [
            ("position", "fixed"),
            ("top", "0"),
            ("left", "0"),
            ("width", "100%"),
            ("height", "100%"),
            ("pointer-events", "none"),
            ("z-index", "-1"),
        ] {
            doc.set_style(canvas, property, value);
        }
        doc.set_style(canvas, "opacity", &config.canvas_opacity.to_string());
        let body = doc.body();
        doc.append_child(body, canvas);

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let particles = (0..config.count)
            .map(|_| spawn(&mut rng, config, viewport.width, viewport.height))
            .collect();

        Some(Self {
            tokens,
            canvas,
            width: viewport.width,
            height: viewport.height,
            particles,
        })
    }

    pub fn canvas_element(&self) -> ElementId {
        self.canvas
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    /// Move every particle one frame, wrapping at the edges
    pub fn step(&mut self) {
        for p in &mut self.particles {
            p.position.x += p.velocity.x;
            p.position.y += p.velocity.y;

            if p.position.x > self.width {
                p.position.x = 0.0;
            }
            if p.position.x < 0.0 {
                p.position.x = self.width;
            }
            if p.position.y > self.height {
                p.position.y = 0.0;
            }
            if p.position.y < 0.0 {
                p.position.y = self.height;
            }
        }
    }

    pub fn render(&self, canvas: &mut dyn Canvas) {
        if canvas.size() != (self.width, self.height) {
            canvas.resize(self.width, self.height);
        }
        canvas.clear();
        for p in &self.particles {
            canvas.fill_circle(p.position, p.size, self.tokens.particle(p.opacity));
        }
    }
}

fn spawn(rng: &mut impl Rng, config: &ParticleConfig, width: f32, height: f32) -> Particle {
    let speed = config.max_speed;
    Particle {
        position: Point::new(
            rng.random_range(0.0..=width),
            rng.random_range(0.0..=height),
        ),
        velocity: Point::new(
            rng.random_range(-speed..=speed),
            rng.random_range(-speed..=speed),
        ),
        size: rng.random_range(config.size.0..=config.size.1),
        opacity: rng.random_range(config.opacity.0..=config.opacity.1),
    }
}

impl Widget for ParticleField {
    fn name(&self) -> &'static str {
        "particles"
    }

    fn handle_event(&mut self, _cx: &mut WidgetContext<'_>, event: &HostEvent) {
        match event {
            HostEvent::Frame => self.step(),
            HostEvent::Resize(vp) => self.resize(vp.width, vp.height),
            _ => {}
        }
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        self.render(canvas);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_platform::{DrawCommand, MemoryDocument, RecordingCanvas};

    fn seeded() -> ParticleConfig {
        ParticleConfig {
            seed: Some(7),
            ..Default::default()
        }
    }

    #[test]
    fn test_not_created_on_narrow_viewport() {
        let mut doc = MemoryDocument::new();
        let vp = Viewport::new(768.0, 1024.0);
        assert!(ParticleField::mount(&mut doc, &vp, &seeded(), BrandTokens::default()).is_none());
        assert!(doc.query("canvas").is_none());
    }

    #[test]
    fn test_spawn_ranges_and_canvas_element() {
        let mut doc = MemoryDocument::new();
        let vp = Viewport::new(1280.0, 800.0);
        let field = ParticleField::mount(&mut doc, &vp, &seeded(), BrandTokens::default()).unwrap();

        assert_eq!(field.particles().len(), 50);
        for p in field.particles() {
            assert!((1.0..=3.0).contains(&p.size));
            assert!((0.2..=0.7).contains(&p.opacity));
            assert!(p.velocity.x.abs() <= 0.25 && p.velocity.y.abs() <= 0.25);
            assert!((0.0..=1280.0).contains(&p.position.x));
        }

        let canvas = field.canvas_element();
        assert_eq!(doc.query("canvas"), Some(canvas));
        assert_eq!(doc.style(canvas, "z-index").as_deref(), Some("-1"));
        assert_eq!(doc.style(canvas, "pointer-events").as_deref(), Some("none"));
        assert_eq!(doc.style(canvas, "opacity").as_deref(), Some("0.3"));
    }

    #[test]
    fn test_step_wraps_edges() {
        let mut doc = MemoryDocument::new();
        let vp = Viewport::new(1000.0, 800.0);
        let mut field =
            ParticleField::mount(&mut doc, &vp, &seeded(), BrandTokens::default()).unwrap();
        field.particles = vec![
            Particle {
                position: Point::new(999.9, 10.0),
                velocity: Point::new(0.2, 0.0),
                size: 1.0,
                opacity: 0.5,
            },
            Particle {
                position: Point::new(10.0, 0.1),
                velocity: Point::new(0.0, -0.2),
                size: 1.0,
                opacity: 0.5,
            },
        ];

        field.step();
        assert_eq!(field.particles()[0].position.x, 0.0);
        assert_eq!(field.particles()[1].position.y, 800.0);
    }

    #[test]
    fn test_render_paints_every_particle() {
        let mut doc = MemoryDocument::new();
        let vp = Viewport::new(1280.0, 800.0);
        let field = ParticleField::mount(&mut doc, &vp, &seeded(), BrandTokens::default()).unwrap();
        let mut canvas = RecordingCanvas::new();

        field.render(&mut canvas);
        field.render(&mut canvas);

        assert_eq!(canvas.size(), (1280.0, 800.0));
        assert_eq!(canvas.circles_since_clear(), 50);
        let resizes = canvas
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Resize { .. }))
            .count();
        assert_eq!(resizes, 1);
        match &canvas.commands()[2] {
            DrawCommand::FillCircle { color, .. } => assert_eq!((color.r, color.g, color.b), (120, 0, 0)),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_seed_is_reproducible() {
        let vp = Viewport::new(1280.0, 800.0);
        let mut a = MemoryDocument::new();
        let mut b = MemoryDocument::new();
        let fa = ParticleField::mount(&mut a, &vp, &seeded(), BrandTokens::default()).unwrap();
        let fb = ParticleField::mount(&mut b, &vp, &seeded(), BrandTokens::default()).unwrap();
        assert_eq!(fa.particles(), fb.particles());
    }
}
