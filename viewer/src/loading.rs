use std::cell::Cell;
use std::rc::Rc;

/// Tracks whether a query is in flight. The indicator is visible exactly as long as some
/// `Loading` guard is alive, so it clears no matter how the query ends.
#[derive(Clone, Default)]
pub struct LoadingIndicator {
    active: Rc<Cell<usize>>,
}

impl LoadingIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&self, label: &str) -> Loading {
        if self.active.get() == 0 {
            info!("Loading: {label}");
        }
        self.active.set(self.active.get() + 1);
        Loading {
            active: self.active.clone(),
            label: label.to_string(),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.active.get() > 0
    }
}

pub struct Loading {
    active: Rc<Cell<usize>>,
    label: String,
}

impl Drop for Loading {
    fn drop(&mut self) {
        self.active.set(self.active.get().saturating_sub(1));
        if self.active.get() == 0 {
            debug!("Done: {}", self.label);
        }
    }
}
