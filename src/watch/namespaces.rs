// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Namespace change notifications with periodic resync.

use crate::constants::watch::EVENT_BUFFER;
use futures::{Stream, StreamExt};
use k8s_openapi::api::core::v1::Namespace;
use kube::{
    runtime::{reflector, watcher, WatchStreamExt},
    Api, ResourceExt,
};
use kube_runtime::watcher::Config as WatcherConfig;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// A namespace change delivered to the consumer
#[derive(Debug, Clone)]
pub enum NamespaceEvent {
    /// The namespace was listed at startup, added, or modified
    Applied(Namespace),
    /// Periodic re-delivery of the cached state
    Resynced(Namespace),
}

impl NamespaceEvent {
    pub fn namespace(&self) -> &Namespace {
        match self {
            NamespaceEvent::Applied(ns) | NamespaceEvent::Resynced(ns) => ns,
        }
    }

    pub fn into_namespace(self) -> Namespace {
        match self {
            NamespaceEvent::Applied(ns) | NamespaceEvent::Resynced(ns) => ns,
        }
    }
}

/// Stream of namespace events backed by a spawned list-watch task.
///
/// Deletes are not reported. The task stops when the token it was started with
/// is cancelled, when [`NamespaceWatcher::stop`] is called, or when this value
/// is dropped; the stream ends afterwards.
pub struct NamespaceWatcher {
    events: mpsc::Receiver<NamespaceEvent>,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl NamespaceWatcher {
    /// Start watching all namespaces.
    ///
    /// A zero `resync` disables periodic re-delivery.
    pub fn spawn(api: Api<Namespace>, resync: Duration, cancel: &CancellationToken) -> Self {
        let (event_tx, events) = mpsc::channel(EVENT_BUFFER);
        let cancel = cancel.child_token();
        let task = tokio::spawn(run(api, resync, event_tx, cancel.clone()));

        Self {
            events,
            cancel,
            task,
        }
    }

    /// Stop the watch and wait for the background task to finish
    pub async fn stop(mut self) {
        self.cancel.cancel();
        if let Err(e) = (&mut self.task).await {
            warn!("Namespace watch task ended abnormally: {}", e);
        }
    }
}

impl Stream for NamespaceWatcher {
    type Item = NamespaceEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.events.poll_recv(cx)
    }
}

impl Drop for NamespaceWatcher {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn run(
    api: Api<Namespace>,
    resync: Duration,
    event_tx: mpsc::Sender<NamespaceEvent>,
    cancel: CancellationToken,
) {
    let (reader, writer) = reflector::store::<Namespace>();
    let stream = watcher(api, WatcherConfig::default())
        .default_backoff()
        .reflect(writer);
    futures::pin_mut!(stream);

    let mut resync_timer = resync_timer(resync);

    info!("Namespace watch started (resync every {:?})", resync);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = next_resync(&mut resync_timer) => {
                let cached = reader.state();
                debug!("Resyncing {} namespaces", cached.len());
                for ns in cached {
                    let event = NamespaceEvent::Resynced(ns.as_ref().clone());
                    if !deliver(&event_tx, &cancel, event).await {
                        return;
                    }
                }
            }
            item = stream.next() => match item {
                Some(Ok(watcher::Event::Apply(ns) | watcher::Event::InitApply(ns))) => {
                    debug!("Namespace {} applied", ns.name_any());
                    if !deliver(&event_tx, &cancel, NamespaceEvent::Applied(ns)).await {
                        return;
                    }
                }
                Some(Ok(watcher::Event::Delete(ns))) => {
                    debug!("Namespace {} deleted, not delivered", ns.name_any());
                }
                Some(Ok(watcher::Event::Init | watcher::Event::InitDone)) => {}
                Some(Err(e)) => warn!("Namespace watch error: {}", e),
                None => {
                    warn!("Namespace watch stream ended");
                    break;
                }
            },
        }
    }

    info!("Namespace watch stopped");
}

fn resync_timer(resync: Duration) -> Option<Interval> {
    if resync.is_zero() {
        return None;
    }
    let Some(start) = Instant::now().checked_add(resync) else {
        warn!("Resync interval {:?} is out of range, resync disabled", resync);
        return None;
    };
    let mut timer = interval_at(start, resync);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    Some(timer)
}

async fn next_resync(timer: &mut Option<Interval>) {
    match timer {
        Some(timer) => {
            timer.tick().await;
        }
        None => std::future::pending().await,
    }
}

/// Send an event unless the watch is cancelled first. Returns false when the
/// watch should end.
async fn deliver(
    event_tx: &mpsc::Sender<NamespaceEvent>,
    cancel: &CancellationToken,
    event: NamespaceEvent,
) -> bool {
    tokio::select! {
        _ = cancel.cancelled() => false,
        sent = event_tx.send(event) => sent.is_ok(),
    }
}
