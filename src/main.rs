mod app;
mod dataset;
mod util;

use std::path::PathBuf;

use clap::Parser;

use app::LayoutSettings;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    #[arg(long, default_value = "demos/bubbles.json", help = "JSON file with the bubbles to lay out")]
    dataset: PathBuf,

    #[arg(long, default_value_t = LayoutSettings::default().radius_divisor)]
    radius_divisor: f32,

    #[arg(long, default_value_t = LayoutSettings::default().min_zoom)]
    min_zoom: f32,

    #[arg(long, default_value_t = LayoutSettings::default().max_zoom)]
    max_zoom: f32,

    #[arg(long, default_value_t = LayoutSettings::default().repulsion_strength)]
    repulsion: f32,
}

impl Args {
    fn layout_settings(&self) -> LayoutSettings {
        LayoutSettings {
            radius_divisor: self.radius_divisor,
            min_zoom: self.min_zoom,
            max_zoom: self.max_zoom,
            repulsion_strength: self.repulsion,
        }
    }
}

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let settings = args.layout_settings();
    log::debug!("starting with {args:?}");

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1280.0, 860.0]),
        ..Default::default()
    };

    eframe::run_native(
        "bubble-field",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::BubbleFieldApp::new(
                cc,
                args.dataset.clone(),
                settings,
            )))
        }),
    )
}
