//! # Shared Use Across Threads
//!
//! The bus is `Send + Sync`; producers and drivers on different threads
//! must still see per-class FIFO order and exactly-once delivery per drain.

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use priority_bus::{Bus, DrainLimit, PriorityClass};

    use crate::support::Recorder;

    const PRODUCERS: u64 = 8;
    const PER_PRODUCER: u64 = 250;

    fn tag(producer: u64, seq: u64) -> u64 {
        producer * 10_000 + seq
    }

    /// Every producer's messages appear exactly once and in its own post order.
    fn assert_per_producer_fifo(seen: &[u64]) {
        let mut next: HashMap<u64, u64> = HashMap::new();
        for &message in seen {
            let producer = message / 10_000;
            let seq = message % 10_000;
            let expected = next.entry(producer).or_insert(0);
            assert_eq!(seq, *expected, "producer {producer} out of order");
            *expected += 1;
        }
        assert_eq!(next.len() as u64, PRODUCERS);
        assert!(next.values().all(|&count| count == PER_PRODUCER));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_producers_keep_fifo() {
        let bus = Arc::new(Bus::<u64>::new());
        let recorder = Arc::new(Recorder::new("recorder"));
        bus.register(recorder.clone());

        let handles: Vec<_> = (0..PRODUCERS)
            .map(|producer| {
                let bus = bus.clone();
                tokio::spawn(async move {
                    for seq in 0..PER_PRODUCER {
                        bus.post(tag(producer, seq), PriorityClass::High).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        let summary = bus.drain_all(PriorityClass::High);

        assert_eq!(summary.processed as u64, PRODUCERS * PER_PRODUCER);
        assert_per_producer_fifo(&recorder.seen());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_drains_deliver_exactly_once() {
        let bus = Arc::new(Bus::<u64>::new());
        let recorder = Arc::new(Recorder::new("recorder"));
        bus.register(recorder.clone());

        for producer in 0..PRODUCERS {
            for seq in 0..PER_PRODUCER {
                bus.post(tag(producer, seq), PriorityClass::Low).unwrap();
            }
        }

        let drivers: Vec<_> = (0..4)
            .map(|_| {
                let bus = bus.clone();
                tokio::task::spawn_blocking(move || {
                    let mut processed = 0;
                    loop {
                        let summary = bus.drain(PriorityClass::Low, DrainLimit::AtMost(17));
                        if summary.processed == 0 {
                            return processed;
                        }
                        processed += summary.processed;
                    }
                })
            })
            .collect();

        let mut total = 0;
        for driver in drivers {
            total += driver.await.unwrap();
        }

        assert_eq!(total as u64, PRODUCERS * PER_PRODUCER);
        assert_eq!(bus.total_pending(), 0);
        assert_per_producer_fifo(&recorder.seen());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_immediate_posts_from_many_threads() {
        let bus = Arc::new(Bus::<u64>::new());
        let recorder = Arc::new(Recorder::new("recorder"));
        bus.register(recorder.clone());

        let handles: Vec<_> = (0..PRODUCERS)
            .map(|producer| {
                let bus = bus.clone();
                let recorder = recorder.clone();
                tokio::task::spawn_blocking(move || {
                    for seq in 0..PER_PRODUCER {
                        let message = tag(producer, seq);
                        bus.post(message, PriorityClass::Immediate).unwrap();
                        assert!(recorder.seen().contains(&message));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(bus.pending(PriorityClass::Immediate), 0);
        assert_per_producer_fifo(&recorder.seen());
    }
}
