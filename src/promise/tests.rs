use std::cell::Cell;
use std::rc::Rc;

use crate::callback::{CallbackSlot, Handler};
use crate::coroutine::ChainValue;
use crate::error::CorolinkError;
use crate::io_object::{HandlerCount, IoObject};
use crate::promise::{Promise, PromiseId};
use crate::strand::Strand;

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

fn plain_slot() -> Handler<i64> {
    Handler::Plain(CallbackSlot::code(|_, code| ChainValue::Value(code.into())))
}

#[test]
fn construction_pins_the_origin() {
    let io = Rc::new(MockIo::default());
    let promise = Promise::<i64>::new(PromiseId::new(1), io.clone());

    assert_eq!(io.handlers().current(), 1);
    assert_eq!(promise.id(), PromiseId::new(1));
    assert!(!promise.is_chained());
}

#[test]
fn drop_releases_the_origin_and_fires_destroy_at_zero() {
    let io = Rc::new(MockIo::default());

    let first = Promise::<i64>::new(PromiseId::new(1), io.clone());
    let second = Promise::<i64>::new(PromiseId::new(2), io.clone());
    assert_eq!(io.handlers().current(), 2);

    drop(first);
    assert_eq!(io.handlers().current(), 1);
    assert_eq!(io.destroyed.get(), 0);

    drop(second);
    assert_eq!(io.handlers().current(), 0);
    assert_eq!(io.destroyed.get(), 1);
}

#[test]
fn register_twice_is_rejected() {
    let io = Rc::new(MockIo::default());
    let mut promise = Promise::<i64>::new(PromiseId::new(1), io);

    promise.register(plain_slot()).unwrap();
    let error = promise.register(plain_slot()).unwrap_err();
    assert_eq!(error, CorolinkError::CallbackAlreadySet(PromiseId::new(1)));
}

#[test]
fn serialized_handler_attaches_the_strand() {
    let io = Rc::new(MockIo::default());
    let strand = Strand::new();
    let mut promise = Promise::<i64>::new(PromiseId::new(1), io);

    let handler = strand.wrap(CallbackSlot::size(|_, len| ChainValue::Value(len as i64)));
    promise.register(handler).unwrap();

    assert_eq!(strand.handlers().current(), 1);
    assert!(promise.strand().is_some());

    drop(promise);
    assert_eq!(strand.handlers().current(), 0);
}

#[test]
fn plain_handler_leaves_the_strand_unset() {
    let io = Rc::new(MockIo::default());
    let mut promise = Promise::<i64>::new(PromiseId::new(1), io);

    promise.register(plain_slot()).unwrap();
    assert!(promise.strand().is_none());
}
