//! Property-based tests for promise lifetime bookkeeping using proptest.
//!
//! The destroy-at-zero rule must hold for every resolution order, not just
//! the ones the scenario tests happen to pick, so these properties resolve
//! shuffled permutations and check the counts after every step.

use std::cell::Cell;
use std::rc::Rc;

use proptest::prelude::*;

use corolink::{
    CallbackSlot, ChainValue, Engine, ErrorCode, Handler, HandlerCount, IoObject, Payload, Strand,
};

#[derive(Default)]
struct MockIo {
    handlers: HandlerCount,
    destroyed: Cell<usize>,
}

impl IoObject for MockIo {
    fn handlers(&self) -> &HandlerCount {
        &self.handlers
    }

    fn destroy(&self) {
        self.destroyed.set(self.destroyed.get() + 1);
    }
}

fn shuffled_order(max: usize) -> impl Strategy<Value = Vec<usize>> {
    (1..max).prop_flat_map(|n| Just((0..n).collect::<Vec<_>>()).prop_shuffle())
}

proptest! {
    /// The origin is destroyed exactly at the last resolution, whatever
    /// the order, and the handler count matches the unresolved promises
    /// after every step.
    #[test]
    fn destroy_fires_exactly_at_the_last_resolution(order in shuffled_order(12)) {
        let engine = Engine::<i64>::new();
        let io = Rc::new(MockIo::default());

        let ids: Vec<_> = (0..order.len())
            .map(|_| {
                let id = engine.issue(io.clone());
                engine
                    .register(
                        id,
                        Handler::Plain(CallbackSlot::code(|_, code| ChainValue::Value(code.into()))),
                    )
                    .unwrap();
                id
            })
            .collect();
        prop_assert_eq!(io.handlers().current(), order.len());

        for (step, &index) in order.iter().enumerate() {
            engine.resolve(ids[index], ErrorCode::OK, Payload::Code(0)).unwrap();

            let remaining = order.len() - step - 1;
            prop_assert_eq!(io.handlers().current(), remaining);
            prop_assert_eq!(io.destroyed.get(), usize::from(remaining == 0));
        }

        prop_assert_eq!(engine.pending_count(), 0);
        prop_assert_eq!(io.destroyed.get(), 1);
    }

    /// A strand's handler count equals its unresolved registrations at
    /// every point, for every resolution order.
    #[test]
    fn strand_count_matches_unresolved_registrations(order in shuffled_order(10)) {
        let engine = Engine::<i64>::new();
        let io = Rc::new(MockIo::default());
        let strand = Strand::new();

        let ids: Vec<_> = (0..order.len())
            .map(|_| {
                let id = engine.issue(io.clone());
                engine
                    .register(
                        id,
                        strand.wrap(CallbackSlot::code(|_, code| ChainValue::Value(code.into()))),
                    )
                    .unwrap();
                id
            })
            .collect();
        prop_assert_eq!(strand.handlers().current(), order.len());

        for (step, &index) in order.iter().enumerate() {
            engine.resolve(ids[index], ErrorCode::OK, Payload::Code(0)).unwrap();
            prop_assert_eq!(strand.handlers().current(), order.len() - step - 1);
        }

        prop_assert_eq!(strand.handlers().current(), 0);
    }

    /// Promises split across several I/O objects release each object
    /// independently: destruction order follows each object's own last
    /// resolution.
    #[test]
    fn objects_are_released_independently(order in shuffled_order(10), split in 1usize..4) {
        let engine = Engine::<i64>::new();
        let objects: Vec<_> = (0..split).map(|_| Rc::new(MockIo::default())).collect();

        let mut issued_per_object = vec![0usize; split];
        let ids: Vec<_> = (0..order.len())
            .map(|index| {
                issued_per_object[index % split] += 1;
                let io = &objects[index % split];
                let id = engine.issue(io.clone());
                engine
                    .register(
                        id,
                        Handler::Plain(CallbackSlot::code(|_, code| ChainValue::Value(code.into()))),
                    )
                    .unwrap();
                id
            })
            .collect();

        for &index in &order {
            engine.resolve(ids[index], ErrorCode::OK, Payload::Code(0)).unwrap();
        }

        for (io, &issued) in objects.iter().zip(&issued_per_object) {
            prop_assert_eq!(io.handlers().current(), 0);
            // Destroyed exactly once iff any promise was issued against it.
            prop_assert_eq!(io.destroyed.get(), usize::from(issued > 0));
        }
    }
}
