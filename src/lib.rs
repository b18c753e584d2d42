pub mod bridge;
#[cfg(feature = "desktop")]
mod commands;
pub mod config;
pub mod error;
#[cfg(feature = "desktop")]
mod events;
pub mod instance;
pub mod models;
pub mod safety;
pub mod services;
pub mod state;

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. `RUST_LOG` wins over `default_filter`.
pub fn init_tracing(default_filter: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .try_init();
}

#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    use commands::{file_commands, system_commands};
    use config::FileManagerConfig;
    use services::location_service::LocationResolver;
    use state::{AppContext, Startup};
    use tauri::Manager;

    let (config, config_error) = match FileManagerConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (FileManagerConfig::default(), Some(e)),
    };
    init_tracing(&config.log_filter);
    if let Some(e) = config_error {
        tracing::warn!(error = %e, "failed to load config, using defaults");
    }

    let resolver = match LocationResolver::from_env() {
        Ok(resolver) => resolver,
        Err(e) => {
            tracing::error!(error = %e, "cannot start without a home directory");
            return;
        }
    };

    let args: Vec<String> = std::env::args().collect();
    let startup =
        match tauri::async_runtime::block_on(AppContext::startup(config, resolver, &args)) {
            Ok(startup) => startup,
            Err(e) => {
                tracing::error!(error = %e, "failed to start");
                return;
            }
        };
    let (ctx, events) = match startup {
        Startup::Primary { ctx, events } => (ctx, events),
        Startup::Forwarded => {
            tracing::info!("another instance is running, exiting");
            return;
        }
    };

    let app = tauri::Builder::default()
        .manage(ctx)
        .setup(move |app| {
            let handle = app.handle().clone();
            tauri::async_runtime::spawn(events::event_loop(handle, events));
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            file_commands::list_directory,
            file_commands::get_home_dir,
            file_commands::get_common_path,
            file_commands::get_well_known_locations,
            file_commands::get_mounted_devices,
            file_commands::get_thumbnail_url,
            file_commands::open_file,
            file_commands::get_file_permissions,
            system_commands::is_wayland,
            system_commands::get_desktop_info,
            system_commands::get_startup_directory,
        ])
        .build(tauri::generate_context!())
        .expect("error while building tauri application");

    app.run(|handle, event| {
        if let tauri::RunEvent::Exit = event {
            tracing::info!("shutting down");
            handle.state::<AppContext>().shutdown();
        }
    });
}
