//! Interactive DLA viewer built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns a growing aggregate and its
//! configuration and implements [`eframe::App`] to grow and render it live.

use dla_core::{
    Aggregate2D, Aggregate3D, AggregateError, AttractorKind, Config, Dimension, Geometry, Lattice,
    Site,
};
use eframe::App;
use glam::Vec2;
use tracing::{debug, info, warn};

/// Summary of the most recent stick, for the status bar.
#[derive(Clone, Copy, Debug, PartialEq)]
struct LastStick {
    steps: u64,
    bounces: u64,
}

/// The aggregate being grown, in whichever dimension the config asks for.
enum Growth {
    Flat(Aggregate2D),
    Solid(Aggregate3D),
}

impl Growth {
    /// Builds the aggregate and seeds its attractor so it shows at once.
    fn new(cfg: &Config) -> Result<Self, AggregateError> {
        Ok(match cfg.dimension {
            Dimension::Two => {
                let mut agg = Aggregate2D::new(cfg)?;
                agg.seed_attractor(0)?;
                Self::Flat(agg)
            }
            Dimension::Three => {
                let mut agg = Aggregate3D::new(cfg)?;
                agg.seed_attractor(0)?;
                Self::Solid(agg)
            }
        })
    }

    fn size(&self) -> usize {
        match self {
            Self::Flat(agg) => agg.size(),
            Self::Solid(agg) => agg.size(),
        }
    }

    fn attractor_len(&self) -> usize {
        match self {
            Self::Flat(agg) => agg.attractor().len(),
            Self::Solid(agg) => agg.attractor().len(),
        }
    }

    fn geometry(&self) -> &Geometry {
        match self {
            Self::Flat(agg) => agg.geometry(),
            Self::Solid(agg) => agg.geometry(),
        }
    }

    fn dim(&self) -> usize {
        match self {
            Self::Flat(_) => 2,
            Self::Solid(_) => 3,
        }
    }

    /// Steps already taken by the live walker, zero if none is out.
    fn walker_steps(&self) -> u64 {
        match self {
            Self::Flat(agg) => agg.walker().map_or(0, |w| w.steps),
            Self::Solid(agg) => agg.walker().map_or(0, |w| w.steps),
        }
    }

    fn walk(&mut self, max_steps: u64) -> Result<Option<LastStick>, AggregateError> {
        let stick = match self {
            Self::Flat(agg) => agg.walk(max_steps)?.map(|s| (s.steps, s.bounces)),
            Self::Solid(agg) => agg.walk(max_steps)?.map(|s| (s.steps, s.bounces)),
        };
        Ok(stick.map(|(steps, bounces)| LastStick { steps, bounces }))
    }

    /// Cluster sites projected on the xy plane, in stick order.
    fn projected(&self) -> Vec<Vec2> {
        fn xy<S: Site>(sites: &[S]) -> Vec<Vec2> {
            sites
                .iter()
                .map(|p| {
                    let v = p.to_dvec3();
                    Vec2::new(v.x as f32, v.y as f32)
                })
                .collect()
        }
        match self {
            Self::Flat(agg) => xy(agg.particles()),
            Self::Solid(agg) => xy(agg.particles()),
        }
    }
}

/// Segments outlining where walkers are launched, projected on xy.
///
/// ### Parameters
/// - `geom` - Current spawn-region state.
/// - `dim` - Lattice dimension, 2 or 3.
///
/// ### Returns
/// World-space line segments.
fn spawn_outline(geom: &Geometry, dim: usize) -> Vec<[Vec2; 2]> {
    let box_outline = |hx: f32, hy: f32| {
        let c = [
            Vec2::new(-hx, -hy),
            Vec2::new(hx, -hy),
            Vec2::new(hx, hy),
            Vec2::new(-hx, hy),
        ];
        vec![[c[0], c[1]], [c[1], c[2]], [c[2], c[3]], [c[3], c[0]]]
    };

    let att = geom.att_size as f32;
    let diam = geom.spawn_diam as f32;
    match geom.kind {
        AttractorKind::Line => vec![
            [Vec2::new(-att, diam), Vec2::new(att, diam)],
            [Vec2::new(-att, -diam), Vec2::new(att, -diam)],
        ],
        AttractorKind::Plane if dim == 3 => box_outline(att, att),
        _ => {
            let half = geom.half_diam() as f32;
            box_outline(half, half)
        }
    }
}

/// Colour of the `i`-th of `n` cluster sites, attractor sites in grey.
fn site_color(i: usize, seeds: usize, n: usize) -> egui::Color32 {
    if i < seeds {
        return egui::Color32::GRAY;
    }
    let span = n.saturating_sub(seeds).max(1) as f32;
    let t = (i - seeds) as f32 / span;
    egui::Color32::from_rgb(
        (60.0 + 195.0 * t) as u8,
        (140.0 - 60.0 * t) as u8,
        (255.0 - 195.0 * t) as u8,
    )
}

/// Main application state for the interactive viewer.
///
/// The typical per-frame update is:
/// 1. Handle UI interactions / input.
/// 2. If `running` is `true`, call [`Viewer::advance`] with the per-frame
///    particle count.
/// 3. Render the cluster and the spawn boundary.
///
/// ### Fields
/// - `growth` - The aggregate being grown.
/// - `cfg` - Parameters used for the next reset.
/// - `fixed_seed` - Whether `cfg.seed` is kept across resets.
/// - `particles_per_frame` - Walkers to stick per frame while running.
/// - `step_budget` - Walker steps allowed per frame.
/// - `running` - Whether growth is auto-advancing.
/// - `zoom` - Pixels per lattice unit.
/// - `pan` - Screen-space pan offset in pixels.
/// - `last_stick` - Steps and bounces of the most recent walker.
/// - `error` - Last error raised by the engine, shown in the status bar.
pub struct Viewer {
    growth: Growth,
    cfg: Config,
    fixed_seed: bool,

    particles_per_frame: usize,
    step_budget: u64,

    running: bool,
    zoom: f32,
    pan: egui::Vec2,

    last_stick: Option<LastStick>,
    error: Option<String>,
}

impl Viewer {
    /// Creates a viewer with a 2-D point aggregate and a fresh seed.
    ///
    /// ### Returns
    /// A fully-initialized [`Viewer`] ready to be passed to `eframe::run_native`.
    ///
    /// ### Errors
    /// Fails only if the attractor cannot be allocated.
    pub fn new() -> Result<Self, AggregateError> {
        let cfg = Config::default().with_seed(rand::random());
        let growth = Growth::new(&cfg)?;

        Ok(Self {
            growth,
            cfg,
            fixed_seed: false,
            particles_per_frame: 20,
            step_budget: 200_000,
            running: false,
            zoom: 4.0,
            pan: egui::vec2(0.0, 0.0),
            last_stick: None,
            error: None,
        })
    }

    /// Rebuilds the aggregate from `cfg` and stops auto-running.
    ///
    /// Draws a new seed unless `fixed_seed` is set. On an invalid config the
    /// current aggregate is kept and the error is shown.
    fn reset(&mut self) {
        if !self.fixed_seed || self.cfg.seed.is_none() {
            self.cfg.seed = Some(rand::random());
        }
        self.running = false;

        match Growth::new(&self.cfg) {
            Ok(growth) => {
                info!(cfg = ?self.cfg, "aggregate reset");
                self.growth = growth;
                self.last_stick = None;
                self.error = None;
            }
            Err(e) => {
                warn!(error = %e, "rejected viewer config");
                self.error = Some(e.to_string());
            }
        }
    }

    /// Sticks up to `particles` walkers within the per-frame step budget.
    ///
    /// A walker that runs out of budget stays live and resumes next call.
    ///
    /// ### Returns
    /// The number of walkers that stuck.
    fn advance(&mut self, particles: usize) -> usize {
        let mut budget = self.step_budget;
        let mut stuck = 0;

        while stuck < particles && budget > 0 {
            let before = self.growth.walker_steps();
            match self.growth.walk(budget) {
                Ok(Some(stick)) => {
                    budget = budget.saturating_sub(stick.steps - before);
                    self.last_stick = Some(stick);
                    stuck += 1;
                }
                Ok(None) => break,
                Err(e) => {
                    warn!(error = %e, "growth stopped");
                    self.error = Some(e.to_string());
                    self.running = false;
                    break;
                }
            }
        }

        if stuck > 0 {
            debug!(stuck, size = self.growth.size(), "frame advanced");
        }
        stuck
    }

    /// Converts a world-space position to screen-space.
    ///
    /// World coordinates are scaled by `zoom`, offset by `pan`, and then
    /// centered inside the given `rect`. The y-axis is flipped so that
    /// positive y goes up in world space.
    ///
    /// ### Parameters
    /// - `p` - World-space position.
    /// - `rect` - Screen-space rectangle representing the drawing area.
    ///
    /// ### Returns
    /// The corresponding egui position in screen-space.
    fn world_to_screen(&self, p: Vec2, rect: egui::Rect) -> egui::Pos2 {
        let center = rect.center();
        egui::pos2(
            center.x + p.x * self.zoom + self.pan.x,
            center.y - p.y * self.zoom + self.pan.y,
        )
    }

    /// Inverse of [`Viewer::world_to_screen`].
    fn screen_to_world(&self, p: egui::Pos2, rect: egui::Rect) -> Vec2 {
        let center = rect.center();
        let x = (p.x - center.x - self.pan.x) / self.zoom;
        let y = (center.y - p.y + self.pan.y) / self.zoom;
        Vec2::new(x, y)
    }

    /// Builds the top panel UI (run controls, stepping, zoom).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui
                    .button(if self.running { "⏸ Pause" } else { "▶ Run" })
                    .clicked()
                {
                    self.running = !self.running;
                }

                if ui.button("Step").clicked() {
                    self.advance(1);
                }

                if ui.button("Reset").clicked() {
                    self.reset();
                }

                ui.separator();
                ui.add(egui::Slider::new(&mut self.zoom, 0.1..=40.0).text("Zoom"));
            });
        });
    }

    /// Builds the bottom status bar.
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if let Some(stick) = self.last_stick {
                    ui.label(format!("last bounces = {}", stick.bounces));
                    ui.label(format!("last steps = {}", stick.steps));
                }
                ui.separator();
                ui.label(format!("spawn diameter = {}", self.growth.geometry().spawn_diam));
                ui.label(format!("particles = {}", self.growth.size()));
                if let Some(err) = &self.error {
                    ui.separator();
                    ui.colored_label(egui::Color32::LIGHT_RED, err);
                }
            });
        });
    }

    /// Builds the right-hand panel for aggregate parameters.
    fn ui_config_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("config_panel")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| {
                ui.heading("Config");

                ui.separator();
                ui.label("Aggregate");
                egui::ComboBox::from_label("dimension")
                    .selected_text(self.cfg.dimension.to_string())
                    .show_ui(ui, |ui| {
                        for dim in [Dimension::Two, Dimension::Three] {
                            ui.selectable_value(&mut self.cfg.dimension, dim, dim.to_string());
                        }
                    });
                egui::ComboBox::from_label("lattice")
                    .selected_text(self.cfg.lattice.to_string())
                    .show_ui(ui, |ui| {
                        for lattice in [Lattice::Square, Lattice::Triangle] {
                            ui.selectable_value(&mut self.cfg.lattice, lattice, lattice.to_string());
                        }
                    });
                egui::ComboBox::from_label("attractor")
                    .selected_text(self.cfg.attractor.to_string())
                    .show_ui(ui, |ui| {
                        for kind in [
                            AttractorKind::Point,
                            AttractorKind::Line,
                            AttractorKind::Circle,
                            AttractorKind::Sphere,
                            AttractorKind::Plane,
                        ] {
                            ui.selectable_value(&mut self.cfg.attractor, kind, kind.to_string());
                        }
                    });
                ui.horizontal(|ui| {
                    ui.label("attractor size:");
                    ui.add(
                        egui::DragValue::new(&mut self.cfg.attractor_size)
                            .range(1..=500)
                            .speed(1.0),
                    );
                });
                ui.add(egui::Slider::new(&mut self.cfg.stickiness, 0.0..=1.0).text("stickiness"));
                ui.checkbox(&mut self.cfg.count_line_bounces, "count line bounces");

                ui.separator();
                ui.label("Seed");
                ui.checkbox(&mut self.fixed_seed, "keep seed on reset");
                let mut seed = self.cfg.seed.unwrap_or(0);
                ui.add_enabled(self.fixed_seed, egui::DragValue::new(&mut seed));
                if self.fixed_seed {
                    self.cfg.seed = Some(seed);
                }

                ui.separator();
                ui.label("Pacing");
                ui.horizontal(|ui| {
                    ui.label("particles / frame:");
                    ui.add(
                        egui::DragValue::new(&mut self.particles_per_frame)
                            .range(1..=10_000)
                            .speed(1.0),
                    );
                });
                ui.horizontal(|ui| {
                    ui.label("steps / frame:");
                    ui.add(
                        egui::DragValue::new(&mut self.step_budget)
                            .range(1_000..=50_000_000)
                            .speed(1_000.0),
                    );
                });

                ui.separator();
                if ui.button("Apply").clicked() {
                    self.reset();
                }
                if ui.button("Reset cfg to default").clicked() {
                    self.cfg = Config::default();
                }
            });
    }

    /// Builds the central panel where the cluster is drawn.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        if self.running {
            self.advance(self.particles_per_frame);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            let response = ui.allocate_response(ui.available_size(), egui::Sense::click_and_drag());
            let rect = response.rect;
            let painter = ui.painter_at(rect);

            if response.dragged() {
                self.pan += response.drag_delta();
            }

            // Zoom around the mouse cursor.
            let scroll = ui.ctx().input(|i| i.raw_scroll_delta.y);
            if scroll != 0.0 {
                let pointer_screen = response.hover_pos().unwrap_or(rect.center());
                let world_before = self.screen_to_world(pointer_screen, rect);

                let factor = (1.0 + scroll * 0.001).clamp(0.5, 2.0);
                self.zoom = (self.zoom * factor).clamp(0.1, 40.0);

                let screen_after = self.world_to_screen(world_before, rect);
                self.pan += pointer_screen - screen_after;
            }

            let stroke = egui::Stroke::new(1.0, egui::Color32::YELLOW);
            for [a, b] in spawn_outline(self.growth.geometry(), self.growth.dim()) {
                painter.line_segment(
                    [self.world_to_screen(a, rect), self.world_to_screen(b, rect)],
                    stroke,
                );
            }

            let seeds = self.growth.attractor_len();
            let sites = self.growth.projected();
            let r = (0.5 * self.zoom).max(1.0);
            for (i, &p) in sites.iter().enumerate() {
                let color = site_color(i, seeds, sites.len());
                painter.circle_filled(self.world_to_screen(p, rect), r, color);
            }

            if self.running {
                ctx.request_repaint();
            }
        });
    }
}

impl App for Viewer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_config_panel(ctx);
        self.ui_central_panel(ctx);
    }
}
