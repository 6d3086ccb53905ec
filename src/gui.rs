//! Native viewer using egui
//!
//! A static landing panel with the snake overlay drawn on a foreground
//! layer, so it never takes pointer input away from the page.

use eframe::egui;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

use crate::color::Palette;
use crate::config::{Config, RenderConfig};
use crate::effect::{self, Frame, FrameInput, TrailEffect, Viewport};
use crate::trail::Point;

/// Run the native viewer
pub fn run_viewer(config: Config, screenshot_dir: PathBuf) -> anyhow::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_title("Infinity Snake"),
        ..Default::default()
    };

    eframe::run_native(
        "Infinity Snake",
        options,
        Box::new(|cc| Ok(Box::new(SnakeApp::new(cc, config, screenshot_dir)))),
    )
    .map_err(|e| anyhow::anyhow!("GUI error: {}", e))
}

struct SnakeApp {
    config: Config,
    screenshot_dir: PathBuf,
    /// `None` while the overlay is unmounted
    effect: Option<TrailEffect>,
    last_status: Option<String>,
}

impl SnakeApp {
    fn new(cc: &eframe::CreationContext<'_>, config: Config, screenshot_dir: PathBuf) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());
        let effect = Some(TrailEffect::mount(&config, Instant::now()));

        Self {
            config,
            screenshot_dir,
            effect,
            last_status: None,
        }
    }

    fn landing_page(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                match &self.effect {
                    Some(effect) => {
                        ui.label(format!("{} samples | hue {:.1}", effect.sample_count(), effect.hue()));
                    }
                    None => {
                        ui.label("effect off");
                    }
                }
                ui.separator();
                ui.label("T: toggle effect | C: clear trail | F12: screenshot");
                if let Some(status) = &self.last_status {
                    ui.separator();
                    ui.label(status);
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(ui.available_height() * 0.3);
                ui.heading(egui::RichText::new("Infinity Snake").size(56.0).strong());
                ui.add_space(12.0);
                ui.label(egui::RichText::new("Move your cursor. Something follows.").size(22.0));
                ui.add_space(24.0);
                ui.label("A thousand pixels of trail, smoothed into one continuous curve.");
            });
        });
    }
}

impl eframe::App for SnakeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let (events, toggle, clear, screenshot) = ctx.input(|i| {
            (
                i.events.clone(),
                i.key_pressed(egui::Key::T),
                i.key_pressed(egui::Key::C),
                i.key_pressed(egui::Key::F12),
            )
        });

        if toggle {
            effect::toggle(&mut self.effect, &self.config, Instant::now());
        }
        if screenshot {
            ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot);
        }

        for event in &events {
            if let egui::Event::Screenshot { image, .. } = event {
                match save_screenshot(image, &self.screenshot_dir) {
                    Ok(path) => {
                        info!("Screenshot saved to {:?}", path);
                        self.last_status = Some(format!("saved {}", path.display()));
                    }
                    Err(e) => {
                        crate::log_error!(e, dir = ?self.screenshot_dir);
                        self.last_status = Some("screenshot failed".to_string());
                    }
                }
            }
        }

        self.landing_page(ctx);

        let screen = ctx.screen_rect();
        let input = FrameInput {
            viewport: Some(Viewport { width: screen.width(), height: screen.height() }),
            moves: events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::PointerMoved(pos) => Some(Point::new(pos.x as f64, pos.y as f64)),
                    _ => None,
                })
                .collect(),
            clear,
        };

        let Some(frame) = effect::step(&mut self.effect, &input, Instant::now()) else {
            return;
        };

        let painter = ctx.layer_painter(egui::LayerId::new(
            egui::Order::Foreground,
            egui::Id::new("snake_overlay"),
        ));
        paint_frame(&painter, &frame, &self.config.render);

        // Repaint loop; stops as soon as the effect is unmounted
        ctx.request_repaint();
    }
}

/// Draw the trail as a rounded gradient stroke plus the head marker
fn paint_frame(painter: &egui::Painter, frame: &Frame, render: &RenderConfig) {
    if !frame.trail.is_drawable() {
        return;
    }

    let polyline: Vec<egui::Pos2> = frame
        .trail
        .path
        .flatten(render.curve_segments)
        .into_iter()
        .map(|p| egui::pos2(p.x as f32, p.y as f32))
        .collect();

    let (min_x, max_x) = polyline
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), p| (lo.min(p.x), hi.max(p.x)));
    let span = max_x - min_x;
    let gradient_at = |x: f32| -> egui::Color32 {
        let t = if span > 0.0 { (x - min_x) / span } else { 0.0 };
        to_color32(frame.palette.sample(t))
    };

    let segments = polyline.len().saturating_sub(1).max(1) as f32;
    for (k, pair) in polyline.windows(2).enumerate() {
        let along = (k + 1) as f32 / segments;
        let width = render.stroke_width * (render.tail_taper + (1.0 - render.tail_taper) * along);
        let color = gradient_at((pair[0].x + pair[1].x) / 2.0);
        painter.line_segment([pair[0], pair[1]], egui::Stroke::new(width, color));
        // Round joins and caps
        painter.circle_filled(pair[1], width / 2.0, color);
        if k == 0 {
            painter.circle_filled(pair[0], width / 2.0, gradient_at(pair[0].x));
        }
    }

    if let Some(head) = frame.trail.head {
        painter.circle_filled(
            egui::pos2(head.x as f32, head.y as f32),
            render.head_radius,
            head_color(&frame.palette),
        );
    }
}

fn head_color(palette: &Palette) -> egui::Color32 {
    let [r, g, b] = palette.head().to_rgb8();
    egui::Color32::from_rgb(r, g, b)
}

fn to_color32(rgb: [f32; 3]) -> egui::Color32 {
    egui::Color32::from_rgb(
        (rgb[0].clamp(0.0, 1.0) * 255.0).round() as u8,
        (rgb[1].clamp(0.0, 1.0) * 255.0).round() as u8,
        (rgb[2].clamp(0.0, 1.0) * 255.0).round() as u8,
    )
}

/// Write a captured frame as a timestamped PNG
fn save_screenshot(image: &egui::ColorImage, dir: &Path) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let [width, height] = image.size;
    let bytes: Vec<u8> = image.pixels.iter().flat_map(|c| c.to_array()).collect();

    let rgba = image::RgbaImage::from_raw(width as u32, height as u32, bytes)
        .ok_or_else(|| anyhow::anyhow!("Screenshot buffer does not match {}x{}", width, height))?;

    let path = dir.join(format!("snake-{}.png", chrono::Local::now().format("%Y%m%d-%H%M%S")));
    rgba.save(&path)?;
    Ok(path)
}
