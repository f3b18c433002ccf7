//! Client-side command batching.
//!
//! Requests are buffered without any I/O and flushed as one pipeline on
//! [`Batch::execute`]. Each reply is decoded by the decoder of the request
//! that produced it; results come back in submission order and are read
//! with the typed [`BatchHandle`] returned at queue time.
//!
//! The executor answers a pipeline with one `Result`: a server error on any
//! command fails the whole flush with that error, and no slot is decoded.
//! A slot's own result only ever fails with a decode error.
//!
//! In a clustered deployment the executor may split the pipeline by slot;
//! only same-key ordering survives that.

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::command::{Command, Request};
use crate::error::{ModuleError, Result};
use crate::executor::CommandExecutor;
use crate::reply::Reply;

type AnyValue = Box<dyn Any + Send>;
type AnyDecoder = Box<dyn FnOnce(Reply) -> Result<AnyValue> + Send>;

/// Distinguishes handles of different batches and flushes.
static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

fn next_generation() -> u64 {
    NEXT_GENERATION.fetch_add(1, Ordering::Relaxed)
}

struct Queued {
    command: Command,
    decoder: AnyDecoder,
}

struct BatchState {
    generation: u64,
    queued: Vec<Queued>,
}

impl BatchState {
    /// Take the buffered commands and start a new generation.
    fn drain(&mut self) -> (u64, Vec<Queued>) {
        let generation = std::mem::replace(&mut self.generation, next_generation());
        (generation, std::mem::take(&mut self.queued))
    }
}

/// Typed ticket for one queued request.
pub struct BatchHandle<T> {
    generation: u64,
    index: usize,
    _marker: PhantomData<fn() -> T>,
}

impl<T> BatchHandle<T> {
    /// Position of the request within its batch.
    pub fn index(&self) -> usize {
        self.index
    }
}

impl<T> Clone for BatchHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for BatchHandle<T> {}

impl<T> fmt::Debug for BatchHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BatchHandle")
            .field("generation", &self.generation)
            .field("index", &self.index)
            .finish()
    }
}

/// A buffer of not-yet-sent requests sharing one executor.
pub struct Batch<E> {
    executor: Arc<E>,
    state: Mutex<BatchState>,
}

impl<E: CommandExecutor> Batch<E> {
    pub fn new(executor: Arc<E>) -> Self {
        Self {
            executor,
            state: Mutex::new(BatchState {
                generation: next_generation(),
                queued: Vec::new(),
            }),
        }
    }

    /// Buffer a request; nothing is sent until [`execute`](Self::execute).
    pub fn queue<T: Send + 'static>(&self, request: Request<T>) -> BatchHandle<T> {
        let (command, decoder) = request.into_parts();
        let decoder: AnyDecoder =
            Box::new(move |reply| decoder(reply).map(|v| Box::new(v) as AnyValue));
        let mut state = self.state.lock();
        state.queued.push(Queued { command, decoder });
        BatchHandle {
            generation: state.generation,
            index: state.queued.len() - 1,
            _marker: PhantomData,
        }
    }

    /// Number of buffered requests.
    pub fn len(&self) -> usize {
        self.state.lock().queued.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().queued.is_empty()
    }

    /// Drop every buffered request without sending anything.
    pub fn discard(&self) {
        let (_, dropped) = self.state.lock().drain();
        tracing::trace!(commands = dropped.len(), "batch discarded");
    }

    /// Flush the buffer as one pipeline and decode every reply.
    pub fn execute(&self) -> Result<BatchResults> {
        let (generation, queued) = self.state.lock().drain();
        if queued.is_empty() {
            return Ok(BatchResults::empty(generation));
        }
        let (commands, decoders) = split(queued);
        tracing::trace!(commands = commands.len(), "flushing batch");
        let replies = self.executor.pipeline(commands)?;
        BatchResults::decode(generation, decoders, replies)
    }

    /// Async [`execute`](Self::execute).
    pub async fn execute_async(&self) -> Result<BatchResults> {
        let (generation, queued) = self.state.lock().drain();
        if queued.is_empty() {
            return Ok(BatchResults::empty(generation));
        }
        let (commands, decoders) = split(queued);
        tracing::trace!(commands = commands.len(), "flushing batch");
        let replies = self.executor.pipeline_async(commands).await?;
        BatchResults::decode(generation, decoders, replies)
    }
}

fn split(queued: Vec<Queued>) -> (Vec<Command>, Vec<AnyDecoder>) {
    queued.into_iter().map(|q| (q.command, q.decoder)).unzip()
}

/// Decoded replies of one flushed batch, in submission order.
pub struct BatchResults {
    generation: u64,
    slots: Vec<Option<Result<AnyValue>>>,
}

impl BatchResults {
    fn empty(generation: u64) -> Self {
        Self {
            generation,
            slots: Vec::new(),
        }
    }

    fn decode(generation: u64, decoders: Vec<AnyDecoder>, replies: Vec<Reply>) -> Result<Self> {
        if decoders.len() != replies.len() {
            return Err(ModuleError::Batch(format!(
                "executor returned {} replies for {} commands",
                replies.len(),
                decoders.len()
            )));
        }
        let slots = decoders
            .into_iter()
            .zip(replies)
            .map(|(decode, reply)| Some(decode(reply)))
            .collect();
        Ok(Self { generation, slots })
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Take the decoded value for `handle`. Each slot can be taken once;
    /// a per-command decode error is returned here, not from `execute`.
    pub fn take<T: 'static>(&mut self, handle: BatchHandle<T>) -> Result<T> {
        if handle.generation != self.generation {
            return Err(ModuleError::Batch("handle belongs to another batch".into()));
        }
        let slot = self
            .slots
            .get_mut(handle.index)
            .ok_or_else(|| ModuleError::Batch(format!("no result at index {}", handle.index)))?
            .take()
            .ok_or_else(|| ModuleError::Batch(format!("result {} already taken", handle.index)))?;
        let value = slot?;
        value
            .downcast::<T>()
            .map(|v| *v)
            .map_err(|_| ModuleError::Batch(format!("result {} has another type", handle.index)))
    }
}

impl fmt::Debug for BatchResults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BatchResults")
            .field("generation", &self.generation)
            .field("len", &self.slots.len())
            .finish()
    }
}
