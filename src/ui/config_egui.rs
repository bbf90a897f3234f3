use crate::prelude::*;
use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

pub struct ConfigEguiPlugin;

impl Plugin for ConfigEguiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(FrameTimeDiagnosticsPlugin::default())
            .add_systems(Startup, configure_visuals_system)
            .add_systems(Update, ui_system);
    }
}

fn configure_visuals_system(mut contexts: EguiContexts) {
    contexts.ctx_mut().set_visuals(egui::Visuals {
        window_corner_radius: 0.0.into(),
        ..Default::default()
    });
}

fn color_ui(color: &mut LinearRgba, label: &str, ui: &mut egui::Ui) {
    ui.horizontal(|ui| {
        let mut rgb = [color.red, color.green, color.blue];
        if ui.color_edit_button_rgb(&mut rgb).changed() {
            *color = LinearRgba::rgb(rgb[0], rgb[1], rgb[2]);
        }
        ui.label(label);
    });
}

fn galaxy_ui(params: &mut GalaxyParameters, ui: &mut egui::Ui) {
    egui::CollapsingHeader::new("Galaxy Parameters")
        .default_open(true)
        .show(ui, |ui| {
            ui.add(
                egui::Slider::new(&mut params.count, 0..=500_000)
                    .logarithmic(true)
                    .text("Count"),
            );
            ui.add(egui::Slider::new(&mut params.arms, 1..=12).text("Arms"));
            ui.add(egui::Slider::new(&mut params.radius, 1.0..=30.0).text("Radius"));
            ui.add(egui::Slider::new(&mut params.spin, -5.0..=5.0).text("Spin"));
            ui.add(egui::Slider::new(&mut params.randomness, 0.0..=2.0).text("Randomness"));
            ui.add(
                egui::Slider::new(&mut params.randomness_power, 1.0..=10.0)
                    .text("Randomness Power"),
            );
            color_ui(&mut params.inside_color, "Inside Color", ui);
            color_ui(&mut params.outside_color, "Outside Color", ui);
        });
    ui.separator();
}

fn seed_ui(seed: &mut Option<u64>, ui: &mut egui::Ui) {
    let mut fixed = seed.is_some();
    ui.horizontal(|ui| {
        ui.checkbox(&mut fixed, "Fixed Seed");
        if !fixed {
            *seed = None;
        } else if seed.is_none() {
            *seed = Some(0);
        }
        if let Some(value) = seed.as_mut() {
            ui.add(egui::DragValue::new(value));
        }
    });
}

fn ui_system(
    mut contexts: EguiContexts,
    mut galaxy_config: ResMut<GalaxyConfig>,
    diagnostics: Res<DiagnosticsStore>,
) {
    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|fps| fps.smoothed())
        .unwrap_or(0.0);
    let frame_time = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FRAME_TIME)
        .and_then(|frame_time| frame_time.smoothed())
        .unwrap_or(0.0);

    // edit a copy so change detection only fires on real edits
    let mut edited = galaxy_config.clone();
    let mut regenerate = false;

    let ctx = contexts.ctx_mut();
    egui::SidePanel::left("side_panel")
        .default_width(220.0)
        .show(ctx, |ui| {
            ui.heading("Configuration");
            ui.label(format!("FPS: {fps:.1} ({frame_time:.2} ms)"));
            ui.separator();

            galaxy_ui(&mut edited.params, ui);

            egui::CollapsingHeader::new("Display").show(ui, |ui| {
                ui.add(
                    egui::Slider::new(&mut edited.point_size, 0.005..=0.2)
                        .logarithmic(true)
                        .text("Point Size"),
                );
                ui.add(
                    egui::Slider::new(&mut edited.galaxy_spin_rate, -0.5..=0.5)
                        .text("Galaxy Spin (rad/s)"),
                );
                ui.add(
                    egui::Slider::new(&mut edited.stars_spin_rate, -0.5..=0.5)
                        .text("Stars Spin (rad/s)"),
                );
                ui.checkbox(&mut edited.auto_rotate, "Auto Rotate Camera");
                ui.add(
                    egui::Slider::new(&mut edited.auto_rotate_speed, 0.0..=5.0)
                        .text("Auto Rotate Speed"),
                );
            });
            ui.separator();

            seed_ui(&mut edited.seed, ui);
            regenerate = ui.button("Regenerate").clicked();
        });

    if regenerate {
        edited.reroll += 1;
    }
    galaxy_config.set_if_neq(edited);
}
