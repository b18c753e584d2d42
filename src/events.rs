use tauri::{AppHandle, Emitter, Manager};
use tokio::sync::mpsc;

use crate::instance::ShellEvent;

const MAIN_WINDOW: &str = "main";

/// Forwards instance events to the main window until the channel closes.
pub async fn event_loop(handle: AppHandle, mut events: mpsc::UnboundedReceiver<ShellEvent>) {
    while let Some(event) = events.recv().await {
        match event {
            ShellEvent::SecondInstance { open_directory } => {
                if let Some(window) = handle.get_webview_window(MAIN_WINDOW) {
                    if let Err(e) = window.unminimize() {
                        tracing::warn!(error = %e, "failed to unminimize main window");
                    }
                    if let Err(e) = window.set_focus() {
                        tracing::warn!(error = %e, "failed to focus main window");
                    }
                }
                if let Some(dir) = open_directory {
                    let path = dir.to_string_lossy().to_string();
                    if let Err(e) = handle.emit_to(MAIN_WINDOW, "open-directory", &path) {
                        tracing::warn!(error = %e, "failed to emit open-directory");
                    }
                }
            }
        }
    }
    tracing::debug!("shell event loop finished");
}
