use log::{debug, info};

/// Display collaborator: a settable progress value and a settable
/// multi-line score text. The session degrades silently when absent.
pub trait Display {
    fn set_progress(&mut self, percent: f32);
    fn set_score_text(&mut self, text: &str);
}

/// Routes display updates to the log, for headless runs.
#[derive(Default)]
pub struct LogDisplay;

impl Display for LogDisplay {
    fn set_progress(&mut self, percent: f32) {
        debug!("progress: {percent:.1}%");
    }

    fn set_score_text(&mut self, text: &str) {
        info!("{}", text.replace('\n', " "));
    }
}
