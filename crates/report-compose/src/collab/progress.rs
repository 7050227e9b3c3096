use super::ProgressSink;

/// Progress sink that writes to the `log` facade
#[derive(Debug, Clone, Copy, Default)]
pub struct LogProgress;

impl ProgressSink for LogProgress {
    fn notify(&self, label: &str, current: usize, total: usize) {
        log::info!("[{}/{}] {}", current, total, label);
    }
}
