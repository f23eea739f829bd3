use crate::queue::{QueueArena, QueueId};
use rand::RngCore;

impl QueueArena {
    /// Shuffles the queue's elements into a random order, in place,
    /// drawing from the caller's random source.
    ///
    /// This is a Fisher-Yates pass over the ring. With `i` elements still
    /// unplaced, one draw picks an index below `i`, the cursor walks to
    /// it from the head, and the element moves in front of the sentinel.
    /// The placed suffix grows at the tail, so the first `i` positions
    /// are exactly the unplaced elements. One draw is consumed per
    /// element; queues with fewer than two elements return before the
    /// source is touched.
    ///
    /// The drawn index is `next_u32() % i`, which carries the usual tiny
    /// modulo bias for `i` not dividing 2^32.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*²) time: each draw walks
    /// from the head to the drawn index.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::QueueArena;
    /// use rand::rngs::StdRng;
    /// use rand::SeedableRng;
    ///
    /// let mut arena = QueueArena::new();
    /// let queue = arena.new_queue().unwrap();
    /// for text in ["a", "b", "c", "d"] {
    ///     arena.push_back(queue, text).unwrap();
    /// }
    ///
    /// let mut rng = StdRng::seed_from_u64(42);
    /// arena.shuffle(queue, &mut rng);
    ///
    /// let mut values: Vec<&str> = arena.values(queue).collect();
    /// values.sort();
    /// assert_eq!(values, ["a", "b", "c", "d"]);
    /// ```
    pub fn shuffle<R: RngCore>(&mut self, queue: QueueId, rng: &mut R) {
        if !self.is_queue(queue) {
            return;
        }
        let sentinel = queue.0;
        let n = self.count(sentinel);
        if n < 2 {
            return;
        }
        for i in (1..=n).rev() {
            let j = rng.next_u32() as usize % i;
            let mut node = self.slot(sentinel).next;
            for _ in 0..j {
                node = self.slot(node).next;
            }
            self.move_before(node, sentinel);
        }
    }
}
