//! Long-lived event sources: terminal input and repeating timers.
//!
//! Subscriptions are declared by [`Model::subscriptions`](crate::Model::subscriptions)
//! after every update. The runtime diffs them by [`SubscriptionId`]: new ids
//! are spawned, missing ids are aborted, unchanged ids keep running.

use crossterm::event::{Event, EventStream};
use futures::stream::BoxStream;
use futures::StreamExt;
use std::any::TypeId;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::task::AbortHandle;

type Spawn<Msg> = Box<dyn FnOnce(mpsc::UnboundedSender<Msg>) -> AbortHandle + Send>;

/// A long-lived event source managed by the runtime.
pub struct Subscription<Msg: Send + 'static> {
    pub(crate) id: SubscriptionId,
    pub(crate) spawn: Spawn<Msg>,
}

/// Identity used to diff subscriptions between update cycles.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId {
    type_id: TypeId,
    discriminant: u64,
}

impl SubscriptionId {
    /// An id for a singleton source of type `T`.
    pub fn of<T: 'static>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            discriminant: 0,
        }
    }

    /// An id for one of several sources of type `T`, keyed by name.
    pub fn keyed<T: 'static>(key: &str) -> Self {
        let mut hasher = std::hash::DefaultHasher::new();
        key.hash(&mut hasher);
        Self {
            type_id: TypeId::of::<T>(),
            discriminant: hasher.finish(),
        }
    }
}

struct TerminalEvents;
struct Every;

impl<Msg: Send + 'static> Subscription<Msg> {
    /// Drive a stream, forwarding each item to the runtime.
    pub fn from_stream(id: SubscriptionId, stream: BoxStream<'static, Msg>) -> Self {
        Subscription {
            id,
            spawn: Box::new(move |tx| {
                let handle = tokio::spawn(forward(stream, tx));
                handle.abort_handle()
            }),
        }
    }

    /// A repeating timer. `key` distinguishes concurrent timers.
    pub fn every(
        interval: Duration,
        key: &str,
        map: impl Fn(Instant) -> Msg + Send + Sync + 'static,
    ) -> Self {
        let stream =
            tokio_stream::wrappers::IntervalStream::new(tokio::time::interval(interval))
                .map(move |tick| map(tick.into_std()));
        Subscription::from_stream(SubscriptionId::keyed::<Every>(key), Box::pin(stream))
    }

    /// Transform the message type (for component composition).
    pub fn map<NewMsg: Send + 'static>(
        self,
        f: impl Fn(Msg) -> NewMsg + Send + Sync + 'static,
    ) -> Subscription<NewMsg> {
        let f = Arc::new(f);
        Subscription {
            id: self.id,
            spawn: Box::new(move |outer: mpsc::UnboundedSender<NewMsg>| {
                let (inner_tx, mut inner_rx) = mpsc::unbounded_channel::<Msg>();
                let abort = (self.spawn)(inner_tx);
                // Ends on its own once the source task is aborted and inner_tx drops.
                tokio::spawn(async move {
                    while let Some(msg) = inner_rx.recv().await {
                        if outer.send(f(msg)).is_err() {
                            break;
                        }
                    }
                });
                abort
            }),
        }
    }

    pub fn id(&self) -> &SubscriptionId {
        &self.id
    }
}

/// Terminal input mapped through `map`; return `None` to drop an event.
///
/// The crossterm [`EventStream`] is created inside the spawned task so that
/// redeclaring the subscription on every update does not touch the global
/// event reader.
pub fn terminal_events<Msg: Send + 'static>(
    map: impl Fn(Event) -> Option<Msg> + Send + Sync + 'static,
) -> Subscription<Msg> {
    let map = Arc::new(map);
    Subscription {
        id: SubscriptionId::of::<TerminalEvents>(),
        spawn: Box::new(move |tx| {
            let handle = tokio::spawn(async move {
                let stream = EventStream::new().filter_map(move |result| {
                    let map = map.clone();
                    async move {
                        match result {
                            Ok(event) => map(event),
                            Err(err) => {
                                tracing::warn!(%err, "terminal event stream error");
                                None
                            }
                        }
                    }
                });
                forward(Box::pin(stream), tx).await;
            });
            handle.abort_handle()
        }),
    }
}

async fn forward<Msg: Send + 'static>(
    mut stream: BoxStream<'static, Msg>,
    tx: mpsc::UnboundedSender<Msg>,
) {
    while let Some(msg) = stream.next().await {
        if tx.send(msg).is_err() {
            break;
        }
    }
}

/// Running subscriptions keyed by id.
pub(crate) struct SubscriptionManager<Msg: Send + 'static> {
    active: HashMap<SubscriptionId, AbortHandle>,
    msg_tx: mpsc::UnboundedSender<Msg>,
}

impl<Msg: Send + 'static> SubscriptionManager<Msg> {
    pub fn new(msg_tx: mpsc::UnboundedSender<Msg>) -> Self {
        Self {
            active: HashMap::new(),
            msg_tx,
        }
    }

    pub fn reconcile(&mut self, declared: Vec<Subscription<Msg>>) {
        let mut declared: HashMap<SubscriptionId, Subscription<Msg>> = declared
            .into_iter()
            .map(|sub| (sub.id.clone(), sub))
            .collect();

        self.active.retain(|id, handle| {
            let keep = declared.contains_key(id);
            if !keep {
                handle.abort();
            }
            keep
        });

        for (id, sub) in declared.drain() {
            if !self.active.contains_key(&id) {
                let handle = (sub.spawn)(self.msg_tx.clone());
                self.active.insert(id, handle);
            }
        }
    }

    pub fn shutdown(&mut self) {
        for (_, handle) in self.active.drain() {
            handle.abort();
        }
    }

    #[cfg(test)]
    pub fn active_count(&self) -> usize {
        self.active.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending(id: SubscriptionId) -> Subscription<i32> {
        Subscription::from_stream(id, Box::pin(futures::stream::pending()))
    }

    #[test]
    fn keyed_ids_compare_by_key() {
        assert_eq!(
            SubscriptionId::keyed::<Every>("clock"),
            SubscriptionId::keyed::<Every>("clock")
        );
        assert_ne!(
            SubscriptionId::keyed::<Every>("clock"),
            SubscriptionId::keyed::<Every>("blink")
        );
        assert_ne!(SubscriptionId::of::<Every>(), SubscriptionId::of::<TerminalEvents>());
    }

    #[tokio::test]
    async fn reconcile_starts_keeps_and_stops() {
        let (tx, _rx) = mpsc::unbounded_channel::<i32>();
        let mut manager = SubscriptionManager::new(tx);
        let a = SubscriptionId::keyed::<Every>("a");
        let b = SubscriptionId::keyed::<Every>("b");

        manager.reconcile(vec![pending(a.clone())]);
        assert_eq!(manager.active_count(), 1);

        manager.reconcile(vec![pending(a.clone()), pending(b)]);
        assert_eq!(manager.active_count(), 2);

        manager.reconcile(vec![pending(a)]);
        assert_eq!(manager.active_count(), 1);

        manager.shutdown();
        assert_eq!(manager.active_count(), 0);
    }

    #[tokio::test]
    async fn mapped_stream_delivers_transformed_messages() {
        let (tx, mut rx) = mpsc::unbounded_channel::<String>();
        let mut manager = SubscriptionManager::new(tx);
        let sub = Subscription::from_stream(
            SubscriptionId::of::<Every>(),
            Box::pin(futures::stream::iter(vec![1, 2])),
        )
        .map(|n: i32| format!("#{n}"));

        manager.reconcile(vec![sub]);
        assert_eq!(rx.recv().await.as_deref(), Some("#1"));
        assert_eq!(rx.recv().await.as_deref(), Some("#2"));
    }
}
