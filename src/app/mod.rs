use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context, Vec2};

use crate::dataset::{Dataset, load_dataset};

mod drag;
mod graph;
mod physics;
mod render_utils;
mod scale;
mod truncation;
mod ui;
mod viewport;

use drag::DragController;
use physics::{ForceConfig, Simulation};
use scale::DEFAULT_RADIUS_DIVISOR;
use truncation::TruncationSet;
use viewport::{DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM, ViewportTransform, ZoomRange};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutSettings {
    pub radius_divisor: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
    pub repulsion_strength: f32,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            radius_divisor: DEFAULT_RADIUS_DIVISOR,
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
            repulsion_strength: ForceConfig::default().repulsion_strength,
        }
    }
}

impl LayoutSettings {
    fn force_config(&self) -> ForceConfig {
        ForceConfig {
            repulsion_strength: self.repulsion_strength.max(0.0),
            ..ForceConfig::default()
        }
    }

    fn zoom_range(&self) -> ZoomRange {
        ZoomRange::new(self.min_zoom, self.max_zoom)
    }
}

pub struct BubbleFieldApp {
    dataset_path: PathBuf,
    settings: LayoutSettings,
    state: AppState,
    reload_rx: Option<Receiver<Result<Dataset, String>>>,
}

enum AppState {
    Loading {
        rx: Receiver<Result<Dataset, String>>,
    },
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    dataset: Dataset,
    settings: LayoutSettings,
    simulation: Option<Simulation>,
    viewport: ViewportTransform,
    drag: DragController,
    gesture: PointerGesture,
    truncation: TruncationSet,
    hovered: Option<usize>,
    canvas_size: Option<Vec2>,
    layout_revision: u64,
    live_physics: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PointerGesture {
    Idle,
    Body,
    Pan,
}

impl BubbleFieldApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        dataset_path: PathBuf,
        settings: LayoutSettings,
    ) -> Self {
        let state = Self::start_load(dataset_path.clone());
        Self {
            dataset_path,
            settings,
            state,
            reload_rx: None,
        }
    }

    fn spawn_load(dataset_path: PathBuf) -> Receiver<Result<Dataset, String>> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = load_dataset(&dataset_path).map_err(|error| {
                log::error!("{error:#}");
                format!("{error:#}")
            });
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(dataset_path: PathBuf) -> AppState {
        AppState::Loading {
            rx: Self::spawn_load(dataset_path),
        }
    }
}

impl eframe::App for BubbleFieldApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                match rx.try_recv() {
                    Ok(result) => {
                        transition = Some(match result {
                            Ok(dataset) => {
                                AppState::Ready(Box::new(ViewModel::new(dataset, self.settings)))
                            }
                            Err(error) => AppState::Error(error),
                        });
                    }
                    Err(TryRecvError::Empty) => ctx.request_repaint(),
                    Err(TryRecvError::Disconnected) => {
                        transition =
                            Some(AppState::Error("Background load worker disconnected".to_owned()));
                    }
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading bubbles...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load bubble dataset");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        transition = Some(Self::start_load(self.dataset_path.clone()));
                    }
                });
            }
            AppState::Ready(model) => {
                let mut reload_requested = false;
                let is_reloading = self.reload_rx.is_some();
                model.show(ctx, &self.dataset_path, &mut reload_requested, is_reloading);

                if reload_requested && self.reload_rx.is_none() {
                    self.reload_rx = Some(Self::spawn_load(self.dataset_path.clone()));
                }

                if let Some(rx) = self.reload_rx.take() {
                    match rx.try_recv() {
                        Ok(Ok(dataset)) => model.replace_dataset(dataset),
                        Ok(Err(error)) => transition = Some(AppState::Error(error)),
                        Err(TryRecvError::Empty) => {
                            self.reload_rx = Some(rx);
                            ctx.request_repaint();
                        }
                        Err(TryRecvError::Disconnected) => {
                            transition = Some(AppState::Error(
                                "Background load worker disconnected".to_owned(),
                            ));
                        }
                    }
                }
            }
        }

        if let Some(next_state) = transition {
            self.reload_rx = None;
            self.state = next_state;
        }
    }
}
