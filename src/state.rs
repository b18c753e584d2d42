use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

use crate::bridge::{FileManagerApi, FileManagerBridge};
use crate::config::FileManagerConfig;
use crate::error::AppError;
use crate::instance::{self, InstanceRole, PrimaryInstance, ShellEvent};
use crate::services::location_service::LocationResolver;

/// Everything the shell owns between startup and shutdown.
pub struct AppContext {
    pub api: Arc<dyn FileManagerBridge>,
    pub config: FileManagerConfig,
    pub startup_directory: Option<PathBuf>,
    instance: Mutex<Option<PrimaryInstance>>,
}

pub enum Startup {
    Primary {
        ctx: AppContext,
        events: mpsc::UnboundedReceiver<ShellEvent>,
    },
    /// Another instance is running and received our arguments.
    Forwarded,
}

impl AppContext {
    pub async fn startup(
        config: FileManagerConfig,
        resolver: LocationResolver,
        args: &[String],
    ) -> Result<Startup, AppError> {
        let cwd = std::env::current_dir().ok();
        let role = instance::acquire(&config.socket_path(), args, cwd.as_deref()).await?;

        let (instance, events) = match role {
            InstanceRole::Secondary => return Ok(Startup::Forwarded),
            InstanceRole::Primary { instance, events } => (instance, events),
        };

        let startup_directory = instance::startup_directory(args, cwd.as_deref()).await;
        let api = Arc::new(FileManagerApi::new(resolver, &config));

        Ok(Startup::Primary {
            ctx: AppContext {
                api,
                config,
                startup_directory,
                instance: Mutex::new(Some(instance)),
            },
            events,
        })
    }

    /// Releases the single-instance lock. Safe to call more than once.
    pub fn shutdown(&self) {
        let instance = self
            .instance
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();
        if let Some(instance) = instance {
            instance.shutdown();
        }
    }
}
