pub mod gemini;

pub use gemini::GeminiGenerator;

use std::sync::mpsc;
use std::thread;

use crate::model::theme::ThemeIdea;

/// Error type for theme generation
#[derive(Debug, thiserror::Error)]
pub enum VisionError {
    #[error("no API key: set the {0} environment variable")]
    MissingKey(String),
    #[error("request failed: {0}")]
    Request(String),
    #[error("the model returned an unexpected response format")]
    BadResponse,
}

/// The external theme-generation collaborator. Implementations block; the
/// session runs them on a worker thread.
pub trait ThemeGenerator {
    fn generate(&self, prompt: &str) -> Result<Vec<ThemeIdea>, VisionError>;
}

/// One in-flight theme generation at a time.
///
/// `begin` refuses while a request is pending, so a double-tap can never
/// produce overlapping requests. Completion is delivered through `poll`,
/// called from the event loop; failures become a user-visible message rather
/// than an error to propagate.
#[derive(Debug, Default)]
pub struct VisionSession {
    loading: bool,
    error: Option<String>,
    rx: Option<mpsc::Receiver<Result<Vec<ThemeIdea>, VisionError>>>,
}

impl VisionSession {
    pub fn new() -> Self {
        VisionSession::default()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Kick off a generation run on a worker thread. Returns false (and does
    /// nothing) for a blank prompt or while a request is already in flight.
    pub fn begin<G>(&mut self, generator: G, prompt: &str) -> bool
    where
        G: ThemeGenerator + Send + 'static,
    {
        if self.loading || prompt.trim().is_empty() {
            return false;
        }
        self.loading = true;
        self.error = None;
        let prompt = prompt.trim().to_string();
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let _ = tx.send(generator.generate(&prompt));
        });
        self.rx = Some(rx);
        true
    }

    /// Poll for completion. Returns the generated themes exactly once, on
    /// the call that observes the finished request.
    pub fn poll(&mut self) -> Option<Vec<ThemeIdea>> {
        let rx = self.rx.as_ref()?;
        match rx.try_recv() {
            Ok(Ok(themes)) => {
                self.finish();
                Some(themes)
            }
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "theme generation failed");
                self.finish();
                self.error = Some(format!(
                    "Sorry, something went wrong while generating ideas ({e}). Please try again."
                ));
                None
            }
            Err(mpsc::TryRecvError::Empty) => None,
            Err(mpsc::TryRecvError::Disconnected) => {
                self.finish();
                self.error =
                    Some("Sorry, something went wrong while generating ideas. Please try again.".into());
                None
            }
        }
    }

    /// Block until the in-flight request (if any) completes, then poll it.
    /// Used by the one-shot CLI path; the dashboard polls instead.
    pub fn wait(&mut self) -> Option<Vec<ThemeIdea>> {
        let rx = self.rx.as_ref()?;
        let result = rx.recv();
        match result {
            Ok(Ok(themes)) => {
                self.finish();
                Some(themes)
            }
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "theme generation failed");
                self.finish();
                self.error = Some(format!(
                    "Sorry, something went wrong while generating ideas ({e}). Please try again."
                ));
                None
            }
            Err(_) => {
                self.finish();
                self.error =
                    Some("Sorry, something went wrong while generating ideas. Please try again.".into());
                None
            }
        }
    }

    fn finish(&mut self) {
        self.loading = false;
        self.rx = None;
    }
}
