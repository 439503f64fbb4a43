//! Ordered record of teardown steps across several doubles.

use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, Default)]
pub struct Timeline {
    entries: Rc<RefCell<Vec<&'static str>>>,
}

impl Timeline {
    pub fn record(&self, entry: &'static str) {
        self.entries.borrow_mut().push(entry);
    }

    pub fn entries(&self) -> Vec<&'static str> {
        self.entries.borrow().clone()
    }
}
