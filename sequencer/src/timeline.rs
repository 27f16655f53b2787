use std::cmp::Ordering;
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::time::Duration;

struct Entry<E> {
    at: Duration,
    seq: u64,
    event: E,
}

impl<E> PartialEq for Entry<E> {
    fn eq(&self, other: &Self) -> bool {
        self.at == other.at && self.seq == other.seq
    }
}

impl<E> Eq for Entry<E> {}

impl<E> PartialOrd for Entry<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> Ord for Entry<E> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.at.cmp(&other.at).then(self.seq.cmp(&other.seq))
    }
}

/// Deferred events keyed by virtual time since the session started.
///
/// Events due at the same instant come out in the order they were scheduled.
pub struct Timeline<E> {
    queue: BinaryHeap<Reverse<Entry<E>>>,
    seq: u64,
}

impl<E> Default for Timeline<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Timeline<E> {
    pub fn new() -> Self {
        Self {
            queue: BinaryHeap::new(),
            seq: 0,
        }
    }

    pub fn schedule(&mut self, at: Duration, event: E) {
        let seq = self.seq;
        self.seq += 1;
        self.queue.push(Reverse(Entry { at, seq, event }));
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.queue.peek().map(|Reverse(entry)| entry.at)
    }

    /// Removes and returns the earliest event due at or before `now`.
    pub fn pop_due(&mut self, now: Duration) -> Option<(Duration, E)> {
        if self.next_deadline()? > now {
            return None;
        }
        self.queue
            .pop()
            .map(|Reverse(entry)| (entry.at, entry.event))
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn pops_in_deadline_order() {
        let mut tl = Timeline::new();
        tl.schedule(ms(30), "c");
        tl.schedule(ms(10), "a");
        tl.schedule(ms(20), "b");

        assert_eq!(tl.pop_due(ms(5)), None);
        assert_eq!(tl.pop_due(ms(25)), Some((ms(10), "a")));
        assert_eq!(tl.pop_due(ms(25)), Some((ms(20), "b")));
        assert_eq!(tl.pop_due(ms(25)), None);
        assert_eq!(tl.next_deadline(), Some(ms(30)));
    }

    #[test]
    fn same_instant_keeps_insertion_order() {
        let mut tl = Timeline::new();
        for name in ["first", "second", "third"] {
            tl.schedule(ms(0), name);
        }
        let order: Vec<_> = std::iter::from_fn(|| tl.pop_due(ms(0)).map(|(_, e)| e)).collect();
        assert_eq!(order, vec!["first", "second", "third"]);
        assert!(tl.is_empty());
    }
}
