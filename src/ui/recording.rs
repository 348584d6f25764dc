use parking_lot::Mutex;

use super::{Ui, View};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Alert(String),
    Confirm(String),
    Redirect(View),
    Show(String),
}

/// Headless [`Ui`] that records every interaction and answers confirmations
/// with a fixed value. Used for scripting and in tests.
#[derive(Debug)]
pub struct RecordingUi {
    confirm_answer: bool,
    events: Mutex<Vec<UiEvent>>,
}

impl RecordingUi {
    pub fn new(confirm_answer: bool) -> Self {
        Self {
            confirm_answer,
            events: Mutex::new(Vec::new()),
        }
    }

    pub fn events(&self) -> Vec<UiEvent> {
        self.events.lock().clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.events
            .lock()
            .iter()
            .filter_map(|e| match e {
                UiEvent::Alert(m) => Some(m.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn redirects(&self) -> Vec<View> {
        self.events
            .lock()
            .iter()
            .filter_map(|e| match e {
                UiEvent::Redirect(v) => Some(v.clone()),
                _ => None,
            })
            .collect()
    }

    /// Most recent content passed to [`Ui::show`]
    pub fn last_shown(&self) -> Option<String> {
        self.events.lock().iter().rev().find_map(|e| match e {
            UiEvent::Show(c) => Some(c.clone()),
            _ => None,
        })
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl Default for RecordingUi {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Ui for RecordingUi {
    fn alert(&self, message: &str) {
        self.events.lock().push(UiEvent::Alert(message.to_string()));
    }

    fn confirm(&self, question: &str) -> bool {
        self.events
            .lock()
            .push(UiEvent::Confirm(question.to_string()));
        self.confirm_answer
    }

    fn redirect(&self, view: &View) {
        self.events.lock().push(UiEvent::Redirect(view.clone()));
    }

    fn show(&self, content: &str) {
        self.events.lock().push(UiEvent::Show(content.to_string()));
    }
}
