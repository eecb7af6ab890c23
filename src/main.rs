use egui_timegrid::{GridConfig, GridEngine, GridStyle, Playhead, Timeline, TimelineApi};

const QUANTIZE_OPTIONS: [i32; 7] = [2, 4, 8, 16, 32, 64, 128];
const DENOMINATOR_OPTIONS: [i32; 5] = [1, 2, 4, 8, 16];
/// Playback speed of the demo, 120 BPM in quarter notes.
const TICKS_PER_SECOND: f64 = 960.0;

fn main() -> eframe::Result<()> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => GridConfig::read(&path).unwrap_or_else(|err| {
            log::warn!("{err}, using the default grid config");
            GridConfig::default()
        }),
        None => GridConfig::default(),
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1200.0, 600.0]),
        ..Default::default()
    };
    eframe::run_native(
        "egui_timegrid Demo",
        options,
        Box::new(move |_cc| Ok(Box::new(TimegridApp::new(&config)) as Box<dyn eframe::App>)),
    )
}

struct TimegridApp {
    engine: GridEngine,
    style: GridStyle,
    scroll_tick: f64,
    playhead_tick: f64,
    playing: bool,
}

impl TimegridApp {
    fn new(config: &GridConfig) -> Self {
        Self {
            engine: config.engine(),
            style: config.colors.into(),
            scroll_tick: 0.0,
            playhead_tick: 0.0,
            playing: false,
        }
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        let sig = self.engine.time_sig();
        let mut numerator = sig.numerator();
        let mut denominator = sig.denominator();
        let mut quantize = self.engine.quantize();
        let mut no_snap = self.engine.is_no_snap_mode();
        let mut spacing = self.engine.minimum_spacing();

        ui.horizontal(|ui| {
            ui.label("Time signature");
            ui.add(egui::DragValue::new(&mut numerator).range(1..=32));
            ui.label("/");
            egui::ComboBox::from_id_salt("denominator")
                .selected_text(denominator.to_string())
                .show_ui(ui, |ui| {
                    for option in DENOMINATOR_OPTIONS {
                        ui.selectable_value(&mut denominator, option, option.to_string());
                    }
                });

            ui.separator();
            ui.label("Quantize");
            egui::ComboBox::from_id_salt("quantize")
                .selected_text(format!("1/{quantize}"))
                .show_ui(ui, |ui| {
                    for option in QUANTIZE_OPTIONS {
                        ui.selectable_value(&mut quantize, option, format!("1/{option}"));
                    }
                });
            ui.checkbox(&mut no_snap, "No snap");

            ui.separator();
            ui.add(egui::Slider::new(&mut spacing, 0.0..=64.0).text("Min spacing"));

            ui.separator();
            let label = if self.playing { "Stop" } else { "Play" };
            if ui.button(label).clicked() {
                self.playing = !self.playing;
            }
        });

        if numerator != sig.numerator() || denominator != sig.denominator() {
            self.engine.set_time_signature(numerator, denominator);
        }
        self.engine.set_quantize(quantize);
        self.engine.set_no_snap_mode(no_snap);
        self.engine.set_minimum_spacing(spacing);
    }
}

impl TimelineApi for TimegridApp {
    fn grid_engine(&self) -> &GridEngine {
        &self.engine
    }

    fn scroll_tick(&self) -> f64 {
        self.scroll_tick
    }

    fn shift_scroll_tick(&mut self, ticks: f64) {
        self.scroll_tick = (self.scroll_tick + ticks).max(0.0);
    }

    fn zoom(&mut self, y_delta: f32) {
        let ppq = self.engine.pixels_per_quarter_note() * (1.0 + f64::from(y_delta) * 0.01);
        self.engine.set_pixels_per_quarter_note(ppq.clamp(0.5, 2048.0));
    }

    fn playhead_tick(&self) -> f64 {
        self.playhead_tick
    }

    fn set_playhead_tick(&mut self, tick: f64) {
        self.playhead_tick = tick;
    }

    fn is_playing(&self) -> bool {
        self.playing
    }
}

impl eframe::App for TimegridApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.playing {
            let dt = f64::from(ctx.input(|i| i.stable_dt));
            self.playhead_tick += dt * TICKS_PER_SECOND;
            ctx.request_repaint();
        }

        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.add_space(4.0);
            self.controls(ui);
            ui.add_space(4.0);
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!("Scroll: {:.1} ticks", self.scroll_tick));
                ui.label(format!(
                    "Zoom: {:.1} pt/quarter",
                    self.engine.pixels_per_quarter_note()
                ));
                ui.label(format!("Playhead: {:.0} ticks", self.playhead_tick));
            });
            ui.label("Scroll horizontally to move, Ctrl+Scroll to zoom, click the ruler to move the playhead");
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            Timeline::new()
                .ruler_height(24.0)
                .style(self.style)
                .playhead(Playhead::new().width(1.5))
                .show(ui, self);
        });
    }
}
