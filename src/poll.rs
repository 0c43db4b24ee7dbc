//! Timer scheduling for animated widgets.
//!
//! This is the single cross-thread hand-off point in the crate: the timer
//! thread never touches the tree. It only collects due view ids and sends
//! them back over the event channel as [`Event::Tick`]; the owning thread
//! drains the channel and delivers `on_tick` to each still-live widget.

use std::{
    cmp::Ordering,
    collections::binary_heap::BinaryHeap,
    sync::{Arc, Mutex, mpsc},
    thread,
    time::{Duration, Instant},
};

use crate::{event::Event, view::ViewId};

/// A view with a pending tick.
#[derive(Debug)]
struct PendingTick {
    /// Scheduled time for the callback.
    time: Instant,
    /// View to tick.
    view: ViewId,
}

impl PartialEq for PendingTick {
    fn eq(&self, other: &Self) -> bool {
        self.time == other.time
    }
}

impl Eq for PendingTick {}

/// Reverse order so the closest callback time is at the top of the heap.
impl PartialOrd for PendingTick {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Reverse order so the closest callback time is at the top of the heap.
impl Ord for PendingTick {
    fn cmp(&self, other: &Self) -> Ordering {
        other.time.cmp(&self.time)
    }
}

/// The schedule of pending ticks, shared with the timer thread.
#[derive(Default, Debug)]
struct Schedule {
    ticks: BinaryHeap<PendingTick>,
}

impl Schedule {
    fn add_at(&mut self, now: Instant, view: ViewId, delay: Duration) {
        self.ticks.push(PendingTick {
            time: now + delay,
            view,
        });
    }

    /// The wait until the next due tick: `None` when nothing is scheduled,
    /// zero when the top entry is already overdue.
    fn wait_at(&self, now: Instant) -> Option<Duration> {
        self.ticks.peek().map(|top| {
            top.time
                .checked_duration_since(now)
                .unwrap_or(Duration::ZERO)
        })
    }

    /// Remove and return all views due at `now`.
    fn collect_at(&mut self, now: Instant) -> Vec<ViewId> {
        let mut due = vec![];
        while let Some(t) = self.ticks.pop() {
            if t.time <= now {
                due.push(t.view);
            } else {
                self.ticks.push(t);
                break;
            }
        }
        due
    }
}

/// Schedules tick events for views.
///
/// The host owns one of these next to its event channel; reschedule
/// requests drained from [`Context::take_tick_requests`]
/// (crate::Context::take_tick_requests) are fed back in through
/// [`schedule`](Self::schedule).
#[derive(Debug)]
pub struct Poller {
    /// Handle for the timer thread, spawned on first use.
    handle: Option<thread::JoinHandle<()>>,
    /// Schedule shared with the timer thread.
    pending: Arc<Mutex<Schedule>>,
    /// Event sender for tick notifications.
    event_tx: mpsc::Sender<Event>,
}

impl Poller {
    /// Construct a poller that sends ticks into the given channel.
    pub fn new(event_tx: mpsc::Sender<Event>) -> Self {
        Self {
            handle: None,
            pending: Arc::new(Mutex::new(Schedule::default())),
            event_tx,
        }
    }

    /// Schedule a view to be ticked after `delay`.
    pub fn schedule(&mut self, view: ViewId, delay: Duration) {
        let mut pending = self.pending.lock().unwrap();
        pending.add_at(Instant::now(), view, delay);
        drop(pending);
        if let Some(h) = self.handle.as_mut() {
            // The thread is running, wake it up to re-check the schedule.
            h.thread().unpark();
        } else {
            let pending = self.pending.clone();
            let tx = self.event_tx.clone();
            self.handle = Some(thread::spawn(move || {
                loop {
                    // Caution: holding the lock across the park would
                    // deadlock schedule().
                    let wait = pending.lock().unwrap().wait_at(Instant::now());
                    if let Some(d) = wait {
                        thread::park_timeout(d);
                    } else {
                        thread::park();
                    }
                    let due = pending.lock().unwrap().collect_at(Instant::now());
                    if !due.is_empty() && tx.send(Event::Tick(due)).is_err() {
                        break;
                    }
                }
            }));
        }
    }
}

#[cfg(test)]
mod tests {
    use slotmap::SlotMap;

    use super::*;

    #[test]
    fn schedule_ordering() {
        let now = Instant::now();
        let mut map: SlotMap<ViewId, ()> = SlotMap::with_key();
        let v1 = map.insert(());
        let v2 = map.insert(());

        let mut s = Schedule::default();
        assert_eq!(s.wait_at(now), None);
        s.add_at(now, v1, Duration::from_secs(10));
        assert_eq!(s.wait_at(now).unwrap(), Duration::from_secs(10));
        s.add_at(now, v2, Duration::from_secs(100));
        assert!(s.wait_at(now).unwrap() <= Duration::from_secs(10));
        assert_eq!(s.collect_at(now + Duration::from_secs(11)), vec![v1]);
        assert!(s.wait_at(now).unwrap() <= Duration::from_secs(100));
        assert_eq!(s.collect_at(now + Duration::from_secs(101)), vec![v2]);
        assert_eq!(s.wait_at(now), None);
    }

    #[test]
    fn overdue_wait_is_zero() {
        let now = Instant::now();
        let mut map: SlotMap<ViewId, ()> = SlotMap::with_key();
        let v = map.insert(());
        let mut s = Schedule::default();
        s.add_at(now, v, Duration::ZERO);
        assert_eq!(s.wait_at(now + Duration::from_secs(1)), Some(Duration::ZERO));
    }
}
