/*!
 * Desktop viewer for weather-viz
 *
 * Draws the temperature and precipitation charts for one city and keeps
 * them interactive:
 * - Hover the temperature plot to snap a marker to the nearest day
 * - Hover a precipitation bar to see its monthly value
 * - Four checkboxes show or hide each series
 */

use anyhow::{Context, Result};
use clap::Parser;
use eframe::egui;
use egui::epaint::TextShape;
use egui::{Color32, FontId, Pos2, Rect, Sense, Stroke, Vec2};
use std::path::PathBuf;
use weather_viz::config::{self, AppConfig, ChartConfig};
use weather_viz::storage::{self, NumericPolicy};
use weather_viz::viz::scene::{Anchor, Primitive, Rgb, Scene};
use weather_viz::viz::{Dashboard, DashboardState, Event, PointerEvent};
use weather_viz::{Series, Visibility};

#[derive(Parser, Debug)]
#[command(name = "wxviz-gui", version, about = "Interactive weather charts")]
struct Args {
    /// Weather CSV with date, city, temperature and precipitation columns.
    #[arg(short, long)]
    input: PathBuf,
    /// City to chart. Overrides the config file.
    #[arg(short, long)]
    city: Option<String>,
    /// JSON layout/config file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Turn unparseable numbers into NaN instead of failing.
    #[arg(long, default_value_t = false)]
    lenient: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut app = match &args.config {
        Some(path) => config::load_config(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => AppConfig::default(),
    };
    if let Some(city) = args.city {
        app.city = city;
    }
    let policy = if args.lenient {
        NumericPolicy::Lenient
    } else {
        NumericPolicy::Strict
    };
    let records = storage::load_csv(&args.input, policy)
        .with_context(|| format!("loading {}", args.input.display()))?;
    let dashboard = Dashboard::build(&records, &app.city, app.chart)?;

    let (w, h) = (app.chart.width as f32, app.chart.height as f32);
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([w + 40.0, 2.0 * h + 100.0])
            .with_min_inner_size([400.0, 300.0])
            .with_title(format!("Weather - {}", app.city)),
        ..Default::default()
    };

    eframe::run_native(
        "Weather Charts",
        options,
        Box::new(move |_cc| Ok(Box::new(ChartsApp::new(dashboard)))),
    )
    .map_err(|e| anyhow::anyhow!("viewer failed: {e}"))
}

/// Main application state
struct ChartsApp {
    dashboard: Dashboard,
    state: DashboardState,
}

impl ChartsApp {
    fn new(dashboard: Dashboard) -> Self {
        Self {
            dashboard,
            state: DashboardState::default(),
        }
    }

    fn apply(&mut self, event: Event) {
        self.state = self.dashboard.handle(&self.state, event);
    }
}

impl eframe::App for ChartsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("series_toggles").show(ctx, |ui| {
            ui.horizontal(|ui| {
                for series in Series::ALL {
                    let mut visible = self.state.visibility.is_visible(series);
                    if ui.checkbox(&mut visible, series.label()).changed() {
                        self.apply(Event::Toggle(series, visible));
                    }
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                let config = *self.dashboard.temperature().config();

                let (response, painter) = allocate_chart(ui, &config);
                let local = plot_local(&response, &config);
                let was_active = self.state.temperature_hover.active;
                match (local, was_active) {
                    (Some((x, y)), false) => {
                        self.apply(Event::Temperature(PointerEvent::Enter));
                        self.apply(Event::Temperature(PointerEvent::Move { x, y }));
                    }
                    (Some((x, y)), true) => {
                        self.apply(Event::Temperature(PointerEvent::Move { x, y }));
                    }
                    (None, true) => self.apply(Event::Temperature(PointerEvent::Leave)),
                    (None, false) => {}
                }
                let scene = self.dashboard.temperature_scene(&self.state);
                paint_scene(&painter, response.rect.min, &scene, &self.state.visibility);

                ui.add_space(12.0);

                let config = *self.dashboard.precipitation().config();
                let (response, painter) = allocate_chart(ui, &config);
                let event = match plot_local(&response, &config) {
                    Some((x, y)) => PointerEvent::Move { x, y },
                    None => PointerEvent::Leave,
                };
                self.apply(Event::Precipitation(event));
                let scene = self.dashboard.precipitation_scene(&self.state);
                paint_scene(&painter, response.rect.min, &scene, &self.state.visibility);
            });
        });
    }
}

fn allocate_chart(ui: &mut egui::Ui, config: &ChartConfig) -> (egui::Response, egui::Painter) {
    let (w, h) = config.canvas_px();
    ui.allocate_painter(Vec2::new(w as f32, h as f32), Sense::hover())
}

/// Pointer position relative to the plotting area, if it is inside it.
fn plot_local(response: &egui::Response, config: &ChartConfig) -> Option<(f64, f64)> {
    let pos = response.hover_pos()?;
    let x = (pos.x - response.rect.min.x) as f64 - config.margin.left;
    let y = (pos.y - response.rect.min.y) as f64 - config.margin.top;
    let inside = (0.0..=config.plot_width()).contains(&x) && (0.0..=config.plot_height()).contains(&y);
    inside.then_some((x, y))
}

fn color32(c: Rgb) -> Color32 {
    Color32::from_rgb(c.0, c.1, c.2)
}

fn at(origin: Pos2, x: f64, y: f64) -> Pos2 {
    Pos2::new(origin.x + x as f32, origin.y + y as f32)
}

fn paint_scene(painter: &egui::Painter, origin: Pos2, scene: &Scene, visibility: &Visibility) {
    let canvas = Rect::from_min_size(origin, Vec2::new(scene.width as f32, scene.height as f32));
    painter.rect_filled(canvas, 0.0, Color32::WHITE);

    for element in scene.visible(visibility) {
        match &element.primitive {
            Primitive::Path { points, color, width } => {
                let pts: Vec<Pos2> = points.iter().map(|&(x, y)| at(origin, x, y)).collect();
                painter.add(egui::Shape::line(pts, Stroke::new(*width as f32, color32(*color))));
            }
            Primitive::Rect { x, y, w, h, fill, stroke, opacity } => {
                let rect = Rect::from_min_size(at(origin, *x, *y), Vec2::new(*w as f32, *h as f32));
                painter.rect_filled(rect, 0.0, color32(*fill).gamma_multiply(*opacity as f32));
                if let Some(border) = stroke {
                    painter.rect_stroke(rect, 0.0, Stroke::new(1.0, color32(*border)));
                }
            }
            Primitive::Circle { cx, cy, r, fill } => {
                painter.circle_filled(at(origin, *cx, *cy), *r as f32, color32(*fill));
            }
            Primitive::Text { x, y, text, size, anchor, rotation, color, .. } => {
                let galley =
                    painter.layout_no_wrap(text.clone(), FontId::proportional(*size as f32), color32(*color));
                let dims = galley.size();
                // Offset from the anchor point to the galley's top-left, in text space.
                let dx = match anchor {
                    Anchor::Start => 0.0,
                    Anchor::Middle => -dims.x / 2.0,
                    Anchor::End => -dims.x,
                };
                let dy = -dims.y / 2.0;
                let angle = (*rotation as f32).to_radians();
                let (sin, cos) = angle.sin_cos();
                let offset = Vec2::new(dx * cos - dy * sin, dx * sin + dy * cos);
                let pos = at(origin, *x, *y) + offset;
                painter.add(TextShape::new(pos, galley, color32(*color)).with_angle(angle));
            }
        }
    }
}
