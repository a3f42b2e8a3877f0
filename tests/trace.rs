#![cfg(feature = "trace")]

use std::{fmt, pin::pin, sync::Arc};

use spin::Mutex;
use static_lists::intrusive_adapter;
use static_lists::linked_list::intrusive::prelude::*;
use tracing::{
    Event, Metadata, Subscriber,
    field::{Field, Visit},
    span,
};

/// Collects the `op` field of every event under the crate's target.
#[derive(Clone, Default)]
struct Recorder {
    ops: Arc<Mutex<Vec<String>>>,
}

struct OpVisitor<'a>(&'a mut Option<String>);

impl Visit for OpVisitor<'_> {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "op" {
            *self.0 = Some(value.to_owned());
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "op" && self.0.is_none() {
            *self.0 = Some(format!("{value:?}"));
        }
    }
}

impl Subscriber for Recorder {
    fn enabled(&self, _: &Metadata<'_>) -> bool {
        true
    }

    fn new_span(&self, _: &span::Attributes<'_>) -> span::Id {
        span::Id::from_u64(1)
    }

    fn record(&self, _: &span::Id, _: &span::Record<'_>) {}

    fn record_follows_from(&self, _: &span::Id, _: &span::Id) {}

    fn event(&self, event: &Event<'_>) {
        if event.metadata().target() != "static_lists" {
            return;
        }
        let mut op = None;
        event.record(&mut OpVisitor(&mut op));
        if let Some(op) = op {
            self.ops.lock().push(op);
        }
    }

    fn enter(&self, _: &span::Id) {}

    fn exit(&self, _: &span::Id) {}
}

struct Job {
    id: u32,
    links: DoubleListLinks,
}

intrusive_adapter!(JobLinks = Job { links: DoubleListLinks });

#[test]
fn test_traced_operations_keep_list_behaviour() {
    let recorder = Recorder::default();
    let ops = recorder.ops.clone();

    let ids = tracing::subscriber::with_default(recorder, || {
        let a = pin!(Job { id: 1, links: DoubleListLinks::new() });
        let b = pin!(Job { id: 2, links: DoubleListLinks::new() });
        let c = pin!(Job { id: 3, links: DoubleListLinks::new() });
        let jobs = pin!(IntrusiveList::<JobLinks>::new());
        let jobs = jobs.init();

        unsafe {
            jobs.link_tail(b.as_ref());
            jobs.link_tail(c.as_ref());
            jobs.link_head(a.as_ref());
        }
        let ids: Vec<_> = jobs.iter().map(|job| job.id).collect();
        assert_eq!(jobs.count(), 3);

        b.links.unlink();
        b.links.unlink();
        assert_eq!(jobs.iter().map(|job| job.id).collect::<Vec<_>>(), [1, 3]);

        while jobs.unlink_head().is_some() {}
        assert!(jobs.empty());
        ids
    });
    assert_eq!(ids, [1, 2, 3]);

    let ops = ops.lock();
    assert_eq!(ops.iter().filter(|op| *op == "link_previous").count(), 2);
    assert_eq!(ops.iter().filter(|op| *op == "link_next").count(), 1);
    assert_eq!(ops.iter().filter(|op| *op == "unlink").count(), 3);
    assert!(ops.iter().any(|op| op == "unlink_nop"));
    #[cfg(feature = "trace-construct")]
    assert!(ops.iter().any(|op| op == "init"));
}
