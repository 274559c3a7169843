use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use serde_json::{json, Value};

// Store-update lines waiting for the main loop to flush them. Cell
// callbacks push here synchronously during command handling; the loop
// drains after writing the command's own response, so a fresh subscriber
// has its subscription id in hand before the first event lands.
#[derive(Clone, Default)]
pub struct EventSink {
    queue: Rc<RefCell<VecDeque<String>>>,
}

impl EventSink {
    pub fn new() -> Self {
        EventSink::default()
    }

    pub fn emit_update(&self, cell: &str, subscription_id: u64, value: Value) {
        let line = json!({
            "event": "store.update",
            "cell": cell,
            "subscription_id": subscription_id,
            "value": value
        })
        .to_string();

        self.queue.borrow_mut().push_back(line);
    }

    pub fn drain(&self) -> Vec<String> {
        self.queue.borrow_mut().drain(..).collect()
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }
}
