//! Walkthrough: a coroutine awaiting two reads on a stream descriptor.
//!
//! The host side of the adapter is mocked out: `StreamDescriptor` stands in
//! for an I/O object type and `Reader` for a suspended computation that
//! awaits one operation per yield. The "event loop" below is just two
//! manual `resolve` calls, which is all the engine ever sees from a real
//! I/O subsystem.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use corolink::{
    CallbackSlot, ChainValue, Coroutine, CoroutineHandle, Engine, ErrorCode, Handler,
    HandlerCount, IoObject, Payload, PromiseId, Yielded,
};

struct StreamDescriptor {
    name: &'static str,
    handlers: HandlerCount,
    closed: Cell<bool>,
}

impl StreamDescriptor {
    fn open(name: &'static str) -> Rc<Self> {
        Rc::new(Self {
            name,
            handlers: HandlerCount::new(),
            closed: Cell::new(false),
        })
    }
}

impl IoObject for StreamDescriptor {
    fn handlers(&self) -> &HandlerCount {
        &self.handlers
    }

    fn destroy(&self) {
        self.closed.set(true);
        println!("[{}] last handler resolved, descriptor closed", self.name);
    }
}

/// Reads a fixed number of chunks, submitting each read from inside its
/// own resumption.
struct Reader {
    engine: Rc<Engine<i64>>,
    stream: Rc<StreamDescriptor>,
    awaiting: Option<PromiseId>,
    total: i64,
    chunks_left: usize,
}

impl Reader {
    /// Submit the first read and park the reader on it.
    fn start(
        engine: &Rc<Engine<i64>>,
        stream: &Rc<StreamDescriptor>,
        chunks: usize,
    ) -> Rc<RefCell<Self>> {
        let first = submit_read(engine, stream);
        let reader = Rc::new(RefCell::new(Reader {
            engine: engine.clone(),
            stream: stream.clone(),
            awaiting: Some(first),
            total: 0,
            chunks_left: chunks - 1,
        }));
        let handle: CoroutineHandle<i64> = reader.clone();
        engine.advance(ChainValue::Coroutine(handle));
        reader
    }
}

impl Coroutine<i64> for Reader {
    fn is_resumable(&self) -> bool {
        self.awaiting.is_some() || self.chunks_left > 0
    }

    fn yielded(&self) -> Option<Yielded> {
        self.awaiting.map(Yielded::Promise)
    }

    fn resume(&mut self, value: ChainValue<i64>) {
        if let ChainValue::Value(bytes) = value {
            self.total += bytes;
            println!("reader resumed: +{bytes} bytes, {} so far", self.total);
        }
        if self.chunks_left > 0 {
            self.chunks_left -= 1;
            self.awaiting = Some(submit_read(&self.engine, &self.stream));
        } else {
            self.awaiting = None;
            println!("reader finished: {} bytes total", self.total);
        }
    }
}

fn submit_read(engine: &Rc<Engine<i64>>, stream: &Rc<StreamDescriptor>) -> PromiseId {
    let id = engine.issue(stream.clone());
    engine
        .register(
            id,
            Handler::Plain(CallbackSlot::size(|error, len| {
                assert!(error.is_ok());
                ChainValue::Value(len as i64)
            })),
        )
        .expect("fresh promise accepts a handler");
    println!("submitted read {id}");
    id
}

fn main() {
    let engine = Rc::new(Engine::<i64>::new());
    let stream = StreamDescriptor::open("stream");

    let reader = Reader::start(&engine, &stream, 2);
    let first = reader.borrow().awaiting.expect("reader parked on its first read");

    println!("-- completion for {first} arrives");
    engine
        .resolve(first, ErrorCode::OK, Payload::Size(1024))
        .expect("first read resolves");

    // The reader submitted its second read from inside the resumption.
    let second = reader.borrow().awaiting.expect("reader parked on its second read");
    assert_eq!(engine.pending_count(), 1);

    println!("-- completion for {second} arrives");
    engine
        .resolve(second, ErrorCode::OK, Payload::Size(512))
        .expect("second read resolves");

    assert_eq!(engine.pending_count(), 0);
    assert!(stream.closed.get());
    assert_eq!(reader.borrow().total, 1536);
}
