//! Background report loading: UI command queue and the loader thread.

use std::{path::PathBuf, sync::Arc, thread};

use crossbeam_channel::{Receiver, Sender, TrySendError};

use workbench_core::ReportStore;

use crate::app::UiEvent;

pub enum LoaderCommand {
    ScanDirectory { dir: PathBuf },
    LoadReport { path: PathBuf },
}

/// Queues a command for the loader thread, reporting queue pressure in
/// the status line instead of blocking the UI.
pub fn queue_command(cmd_tx: &Sender<LoaderCommand>, cmd: LoaderCommand, status: &mut String) {
    let cmd_name = match &cmd {
        LoaderCommand::ScanDirectory { .. } => "scan_directory",
        LoaderCommand::LoadReport { .. } => "load_report",
    };

    match cmd_tx.try_send(cmd) {
        Ok(()) => tracing::debug!(command = cmd_name, "queued ui->loader command"),
        Err(TrySendError::Full(_)) => {
            *status = "Report loader queue is full; please retry".to_string();
        }
        Err(TrySendError::Disconnected(_)) => {
            *status =
                "Report loader stopped (possible startup failure); restart the workbench"
                    .to_string();
        }
    }
}

pub fn spawn_loader_thread(cmd_rx: Receiver<LoaderCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let mut store = ReportStore::new();

        while let Ok(cmd) = cmd_rx.recv() {
            match cmd {
                LoaderCommand::ScanDirectory { dir } => match store.load_dir(&dir) {
                    Ok(loaded) => {
                        for snapshot in store.reports() {
                            let _ = ui_tx.try_send(UiEvent::ReportLoaded {
                                snapshot: Arc::clone(snapshot),
                            });
                        }
                        let _ = ui_tx.try_send(UiEvent::ScanFinished { dir, loaded });
                    }
                    Err(err) => {
                        let _ = ui_tx.try_send(UiEvent::ScanFailed {
                            dir,
                            reason: err.to_string(),
                        });
                    }
                },
                LoaderCommand::LoadReport { path } => match store.load_file(&path) {
                    Ok(snapshot) => {
                        let _ = ui_tx.try_send(UiEvent::ReportLoaded { snapshot });
                    }
                    Err(err) => {
                        let _ = ui_tx.try_send(UiEvent::ReportLoadFailed {
                            path,
                            reason: err.to_string(),
                        });
                    }
                },
            }
        }
    });
}
