use bevy::app::Plugin;
use bevy::prelude::*;
use bevy_egui::{
    EguiContexts, EguiPlugin, EguiPrimaryContextPass,
    egui::{self},
};
use rs_sim::{DisplayPhase, InteractionMode, SimContext, SimSnapshot};
use rs_utils::{AppState, ApplicationState, CursorRequest, PerfTimings, UiState};
use tracing::info;

const HINT_TEXT: &str = "WASD: move • Shift: run • Space: jump • E: sit • N: stand • F: focus • \
                         P: power • Esc: unlock";
const CARD_WIDTH: f32 = 150.0;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut bevy::app::App) {
        app.add_systems(EguiPrimaryContextPass, mission_ui)
            .add_plugins(EguiPlugin::default())
            .init_resource::<MissionConsoleState>();
    }
}

pub struct Planet {
    pub name: &'static str,
    pub emoji: &'static str,
    pub description: &'static str,
}

pub const PLANETS: [Planet; 4] = [
    Planet {
        name: "Earth",
        emoji: "🌍",
        description: "The Blue Planet. Home base for humanity.",
    },
    Planet {
        name: "Mars",
        emoji: "🔴",
        description: "The Red Planet. Top destination for explorers.",
    },
    Planet {
        name: "Jupiter",
        emoji: "🪐",
        description: "Gas giant. Known for its massive storms.",
    },
    Planet {
        name: "Pluto",
        emoji: "❄",
        description: "The dwarf planet. Cold and mysterious.",
    },
];

#[derive(Resource, Default)]
pub struct MissionConsoleState {
    pub search: String,
    pub selected: usize,
    /// Planet the player last opened a briefing for.
    pub opened: Option<usize>,
}

/// Planets whose name contains `query`, ignoring case. An empty query matches all.
pub fn filter_planets(query: &str) -> Vec<usize> {
    let query = query.trim().to_lowercase();
    PLANETS
        .iter()
        .enumerate()
        .filter(|(_, planet)| query.is_empty() || planet.name.to_lowercase().contains(&query))
        .map(|(idx, _)| idx)
        .collect()
}

fn mission_ui(
    mut contexts: EguiContexts,
    sim: Res<SimContext>,
    app_state: Res<AppState>,
    mut ui_state: ResMut<UiState>,
    mut cursor: ResMut<CursorRequest>,
    mut console: ResMut<MissionConsoleState>,
    mut timings: ResMut<PerfTimings>,
) {
    let start = std::time::Instant::now();
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };
    ui_state.egui_keyboard = ctx.wants_keyboard_input();
    ui_state.egui_pointer = ctx.wants_pointer_input();

    if matches!(app_state.0, ApplicationState::Loading) {
        egui::Window::new("Loading")
            .collapsible(false)
            .resizable(false)
            .title_bar(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Loading scene...");
                });
            });
        timings.ui_ms = start.elapsed().as_secs_f32() * 1000.0;
        return;
    }

    let snapshot = sim.snapshot();
    draw_pointer_controls(ctx, &ui_state, &snapshot, &mut cursor);
    draw_prompt(ctx, &snapshot);

    match snapshot.display.phase {
        DisplayPhase::Off => {}
        DisplayPhase::PoweringOn => draw_boot_progress(ctx, snapshot.display.progress()),
        DisplayPhase::On => draw_console(ctx, &mut console),
    }

    if ui_state.pointer_locked
        && matches!(
            snapshot.mode,
            InteractionMode::FreeRoam | InteractionMode::Seated
        )
    {
        draw_crosshair(ctx);
    }

    timings.ui_ms = start.elapsed().as_secs_f32() * 1000.0;
}

fn draw_pointer_controls(
    ctx: &egui::Context,
    ui_state: &UiState,
    snapshot: &SimSnapshot,
    cursor: &mut CursorRequest,
) {
    // Focus mode frees the cursor for the console; no play button there.
    if snapshot.mode == InteractionMode::Focused {
        return;
    }
    egui::Area::new(egui::Id::new("pointer_controls"))
        .anchor(egui::Align2::RIGHT_TOP, egui::Vec2::new(-12.0, 12.0))
        .show(ctx, |ui| {
            if !ui_state.pointer_locked {
                if ui.button("Click to Play (Lock Pointer)").clicked() {
                    cursor.capture();
                }
                return;
            }
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(HINT_TEXT).color(egui::Color32::from_gray(220)));
                if ui.small_button("Unlock").clicked() {
                    cursor.release();
                }
            });
        });
}

fn prompt_text(snapshot: &SimSnapshot) -> Option<&'static str> {
    match snapshot.mode {
        InteractionMode::FreeRoam if snapshot.near_seat => Some("Press E to sit"),
        InteractionMode::FreeRoam | InteractionMode::SitTransition => None,
        InteractionMode::Seated => Some("N: stand • F: focus • P: power"),
        InteractionMode::Focused => Some("F: leave focus • P: power"),
    }
}

fn draw_prompt(ctx: &egui::Context, snapshot: &SimSnapshot) {
    let Some(text) = prompt_text(snapshot) else {
        return;
    };
    egui::Area::new(egui::Id::new("interaction_prompt"))
        .anchor(egui::Align2::CENTER_BOTTOM, egui::Vec2::new(0.0, -48.0))
        .interactable(false)
        .show(ctx, |ui| {
            egui::Frame::NONE
                .fill(egui::Color32::from_black_alpha(170))
                .inner_margin(egui::Margin::same(8))
                .show(ui, |ui| {
                    ui.label(egui::RichText::new(text).color(egui::Color32::WHITE));
                });
        });
}

fn draw_boot_progress(ctx: &egui::Context, progress: f32) {
    egui::Window::new("Display")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            ui.add(
                egui::ProgressBar::new(progress)
                    .desired_width(220.0)
                    .text("Booting..."),
            );
        });
}

fn draw_console(ctx: &egui::Context, console: &mut MissionConsoleState) {
    egui::Window::new("🚀 Mission Console")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.add(
                    egui::TextEdit::singleline(&mut console.search)
                        .hint_text("Search planets..."),
                );
                egui::ComboBox::from_id_salt("planet_select")
                    .selected_text(PLANETS[console.selected].name)
                    .show_ui(ui, |ui| {
                        for (idx, planet) in PLANETS.iter().enumerate() {
                            ui.selectable_value(&mut console.selected, idx, planet.name);
                        }
                    });
            });
            ui.add_space(8.0);

            let matches = filter_planets(&console.search);
            if matches.is_empty() {
                ui.label("No planets match.");
                return;
            }
            ui.horizontal_wrapped(|ui| {
                for idx in matches {
                    if draw_planet_card(ui, &PLANETS[idx], console.selected == idx).clicked() {
                        console.selected = idx;
                        console.opened = Some(idx);
                        info!(planet = PLANETS[idx].name, "planet selected");
                    }
                }
            });

            if let Some(idx) = console.opened {
                ui.separator();
                ui.label(format!("Briefing: {}", PLANETS[idx].name));
            }
        });
}

fn draw_planet_card(ui: &mut egui::Ui, planet: &Planet, selected: bool) -> egui::Response {
    let stroke = if selected {
        egui::Stroke::new(2.0, egui::Color32::from_rgb(90, 170, 255))
    } else {
        egui::Stroke::new(1.0, egui::Color32::from_gray(64))
    };
    egui::Frame::NONE
        .fill(egui::Color32::from_rgb(16, 20, 36))
        .stroke(stroke)
        .inner_margin(egui::Margin::same(8))
        .show(ui, |ui| {
            ui.set_width(CARD_WIDTH);
            ui.heading(format!("{} {}", planet.emoji, planet.name));
            ui.label(planet.description);
        })
        .response
        .interact(egui::Sense::click())
}

fn draw_crosshair(ctx: &egui::Context) {
    let painter = ctx.layer_painter(egui::LayerId::new(
        egui::Order::Foreground,
        egui::Id::new("crosshair"),
    ));
    let center = ctx.screen_rect().center();
    let stroke = egui::Stroke::new(1.5, egui::Color32::from_white_alpha(230));
    let arm = 7.0;
    let gap = 2.0;

    for (dx, dy) in [(-1.0, 0.0), (1.0, 0.0), (0.0, -1.0), (0.0, 1.0)] {
        painter.line_segment(
            [
                egui::pos2(center.x + dx * gap, center.y + dy * gap),
                egui::pos2(center.x + dx * arm, center.y + dy * arm),
            ],
            stroke,
        );
    }
}
