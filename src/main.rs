// src/main.rs

#![cfg_attr(all(not(debug_assertions), target_os = "windows"), windows_subsystem = "windows")]

use bevy::{
    log::LogPlugin,
    prelude::*,
    window::WindowPlugin,
    winit::{UpdateMode, WinitSettings},
};
use bevy_egui::EguiPlugin;
use bevy_tokio_tasks::TokioTasksPlugin;
use clap::Parser;
use std::process::ExitCode;
use std::time::Duration;

mod cli;
mod grid;
mod media;
mod settings;
mod ui;

use cli::{Cli, Commands};
use grid::database::DbConfig;
use grid::GridPlugin;
use media::MediaPlugin;
use ui::EditorUiPlugin;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let mut app_settings = settings::io::load_settings();
    cli.apply_to(&mut app_settings);

    if let Some(command) = &cli.command {
        let db_path = DbConfig::new(app_settings.database_path.clone()).database_path;
        let result = match command {
            Commands::DumpCells => cli::dump_cells::run(&db_path),
            Commands::ListMedia => cli::list_media::run(&db_path, &app_settings),
        };
        return match result {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Error: {}", e);
                ExitCode::FAILURE
            }
        };
    }

    App::new()
        .insert_resource(WinitSettings {
            focused_mode: UpdateMode::Continuous,
            unfocused_mode: UpdateMode::reactive_low_power(Duration::from_secs_f32(1.0 / 5.0)),
        })
        .insert_resource(app_settings)
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "MediaGrid".into(),
                        ..default()
                    }),
                    ..default()
                })
                .set(LogPlugin {
                    level: bevy::log::Level::INFO,
                    filter: "wgpu=error,naga=warn,bevy_tokio_tasks=warn".to_string(),
                    ..default()
                }),
        )
        .add_plugins(EguiPlugin {
            enable_multipass_for_primary_context: true,
        })
        .add_plugins(TokioTasksPlugin::default())
        .add_plugins(GridPlugin)
        .add_plugins(MediaPlugin)
        .add_plugins(EditorUiPlugin)
        .run();

    ExitCode::SUCCESS
}
