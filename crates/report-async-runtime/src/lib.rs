use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;

// Re-export types from the library crate
pub use report_compose::{ReportOptions, ReportSpec};

use report_compose::collab::ProgressSink;

/// Commands sent to the worker
#[derive(Debug)]
pub enum ReportCommand {
    Build {
        spec: Box<ReportSpec>,
        options: ReportOptions,
        assets: PathBuf,
        output_path: PathBuf,
    },
    ExportMap {
        spec: Box<ReportSpec>,
        options: ReportOptions,
        output_path: PathBuf,
    },
}

/// Updates sent from the worker
#[derive(Debug, Clone, PartialEq)]
pub enum ReportUpdate {
    Progress {
        operation: String,
        current: usize,
        total: usize,
    },
    Complete {
        path: PathBuf,
        pages: usize,
    },
    MapExported {
        path: PathBuf,
    },
    Error {
        message: String,
    },
}

/// Progress sink that forwards notifications as [`ReportUpdate::Progress`]
#[derive(Debug, Clone)]
pub struct ChannelProgress {
    tx: UnboundedSender<ReportUpdate>,
}

impl ChannelProgress {
    pub fn new(tx: UnboundedSender<ReportUpdate>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelProgress {
    fn notify(&self, label: &str, current: usize, total: usize) {
        // The receiver may already be gone
        let _ = self.tx.send(ReportUpdate::Progress {
            operation: label.to_string(),
            current,
            total,
        });
    }
}

/// Run one command, reporting progress and the outcome on `tx`
pub async fn handle_command(command: ReportCommand, tx: UnboundedSender<ReportUpdate>) {
    let update = match command {
        ReportCommand::Build {
            spec,
            options,
            assets,
            output_path,
        } => {
            let progress = Arc::new(ChannelProgress::new(tx.clone()));
            match report_compose::generate_report(*spec, options, assets, &output_path, progress)
                .await
            {
                Ok(pages) => ReportUpdate::Complete {
                    path: output_path,
                    pages: pages.len(),
                },
                Err(e) => ReportUpdate::Error {
                    message: e.to_string(),
                },
            }
        }
        ReportCommand::ExportMap {
            spec,
            options,
            output_path,
        } => match report_compose::export_map(&spec, &options, &output_path).await {
            Ok(()) => ReportUpdate::MapExported { path: output_path },
            Err(e) => ReportUpdate::Error {
                message: e.to_string(),
            },
        },
    };

    let _ = tx.send(update);
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[test]
    fn test_channel_progress_forwards() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let progress = ChannelProgress::new(tx);
        progress.notify("Generating cover page", 0, 4);

        assert_eq!(
            rx.try_recv().unwrap(),
            ReportUpdate::Progress {
                operation: "Generating cover page".to_string(),
                current: 0,
                total: 4,
            }
        );
    }

    #[test]
    fn test_closed_channel_is_ignored() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        ChannelProgress::new(tx).notify("Saving generated PDF", 3, 4);
    }

    #[tokio::test]
    async fn test_build_reports_progress_then_completion() {
        let dir = tempfile::tempdir().unwrap();
        let output_path = dir.path().join("report.pdf");

        let (tx, mut rx) = mpsc::unbounded_channel();
        let command = ReportCommand::Build {
            spec: Box::default(),
            options: ReportOptions::default(),
            assets: dir.path().to_path_buf(),
            output_path: output_path.clone(),
        };
        handle_command(command, tx).await;

        let mut updates = Vec::new();
        while let Ok(update) = rx.try_recv() {
            updates.push(update);
        }

        let labels: Vec<&str> = updates
            .iter()
            .filter_map(|u| match u {
                ReportUpdate::Progress { operation, .. } => Some(operation.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(
            labels,
            vec![
                "Generating cover page",
                "Generating company page",
                "Generating last page",
                "Saving generated PDF"
            ]
        );
        assert_eq!(
            updates.last(),
            Some(&ReportUpdate::Complete {
                path: output_path.clone(),
                pages: 3,
            })
        );
        assert!(output_path.exists());
    }
}
