use crate::queue::{Order, QueueArena, QueueId, Segment};
use std::mem;

mod shuffle;
mod sort;

impl QueueArena {
    /// Reverses the order of the queue's elements in place.
    ///
    /// Every slot of the ring, the sentinel included, has its `next` and
    /// `prev` links swapped; no payload is moved. Stale, empty, and
    /// singleton queues are no-ops.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time and *O*(1) memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::QueueArena;
    ///
    /// let mut arena = QueueArena::new();
    /// let queue = arena.new_queue().unwrap();
    /// for text in ["a", "b", "c"] {
    ///     arena.push_back(queue, text).unwrap();
    /// }
    ///
    /// arena.reverse(queue);
    ///
    /// let values: Vec<&str> = arena.values(queue).collect();
    /// assert_eq!(values, ["c", "b", "a"]);
    /// ```
    pub fn reverse(&mut self, queue: QueueId) {
        if !self.is_queue(queue) {
            return;
        }
        let sentinel = queue.0;
        let mut cur = sentinel;
        loop {
            let slot = self.slot_mut(cur);
            mem::swap(&mut slot.next, &mut slot.prev);
            // The old `next` now sits in `prev`.
            cur = slot.prev;
            if cur == sentinel {
                break;
            }
        }
    }

    /// Reverses every consecutive group of exactly `k` elements, leaving
    /// a trailing remainder of fewer than `k` elements untouched.
    ///
    /// Each full group is cut out of the ring, reversed by link surgery,
    /// and reattached between its neighbours. `k <= 1` is a no-op, and
    /// `k` beyond the queue size reverses nothing.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time and *O*(1) memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::QueueArena;
    ///
    /// let mut arena = QueueArena::new();
    /// let queue = arena.new_queue().unwrap();
    /// for text in ["1", "2", "3", "4", "5"] {
    ///     arena.push_back(queue, text).unwrap();
    /// }
    ///
    /// arena.reverse_groups(queue, 2);
    ///
    /// let values: Vec<&str> = arena.values(queue).collect();
    /// assert_eq!(values, ["2", "1", "4", "3", "5"]);
    /// ```
    pub fn reverse_groups(&mut self, queue: QueueId, k: usize) {
        if !self.is_queue(queue) || k <= 1 {
            return;
        }
        let groups = self.count(queue.0) / k;
        let mut before = queue.0;
        for _ in 0..groups {
            let first = self.slot(before).next;
            let mut last = first;
            for _ in 1..k {
                last = self.slot(last).next;
            }
            let segment = self.detach_range(first, last);
            self.reverse_segment(segment);
            self.attach_after(
                before,
                Segment {
                    first: segment.last,
                    last: segment.first,
                },
            );
            // The group's old first element is its tail now.
            before = segment.first;
        }
    }

    /// Swap the links of every slot in a detached segment, turning
    /// `first..=last` into `last..=first`.
    fn reverse_segment(&mut self, segment: Segment) {
        let mut cur = segment.first;
        loop {
            let slot = self.slot_mut(cur);
            mem::swap(&mut slot.next, &mut slot.prev);
            let next = slot.prev;
            if cur == segment.last {
                break;
            }
            cur = next;
        }
    }

    /// Swaps every two adjacent elements; with an odd count, the last
    /// element stays put.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time and *O*(1) memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::QueueArena;
    ///
    /// let mut arena = QueueArena::new();
    /// let queue = arena.new_queue().unwrap();
    /// for text in ["a", "b", "c", "d", "e"] {
    ///     arena.push_back(queue, text).unwrap();
    /// }
    ///
    /// arena.swap_pairs(queue);
    ///
    /// let values: Vec<&str> = arena.values(queue).collect();
    /// assert_eq!(values, ["b", "a", "d", "c", "e"]);
    /// ```
    pub fn swap_pairs(&mut self, queue: QueueId) {
        if !self.is_queue(queue) {
            return;
        }
        let sentinel = queue.0;
        let mut cur = self.slot(sentinel).next;
        while cur != sentinel && self.slot(cur).next != sentinel {
            let second = self.slot(cur).next;
            self.move_after(cur, second);
            cur = self.slot(cur).next;
        }
    }

    /// Removes the element at index `len / 2` (counting from 0) and
    /// returns `true`, or returns `false` if the queue is empty or stale.
    ///
    /// The middle is found by a head cursor and a tail cursor converging
    /// one step at a time, so the queue size is never taken.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::QueueArena;
    ///
    /// let mut arena = QueueArena::new();
    /// let queue = arena.new_queue().unwrap();
    /// for text in ["a", "b", "c", "d"] {
    ///     arena.push_back(queue, text).unwrap();
    /// }
    ///
    /// assert!(arena.delete_mid(queue));
    ///
    /// let values: Vec<&str> = arena.values(queue).collect();
    /// assert_eq!(values, ["a", "b", "d"]);
    /// ```
    pub fn delete_mid(&mut self, queue: QueueId) -> bool {
        if self.is_empty(queue) {
            return false;
        }
        let sentinel = queue.0;
        let mut front = self.slot(sentinel).next;
        let mut back = self.slot(sentinel).prev;
        while front != back && self.slot(front).next != back {
            front = self.slot(front).next;
            back = self.slot(back).prev;
        }
        self.detach_node(back);
        self.free_slot(back);
        true
    }

    /// On a queue already ordered by value, removes every element whose
    /// text equals an adjacent neighbour's: a value duplicated in place
    /// vanishes entirely rather than being reduced to one copy.
    ///
    /// Returns `false` if the queue is empty or stale, `true` otherwise,
    /// whether or not anything was removed.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time with a one-element
    /// lookback flag.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::QueueArena;
    ///
    /// let mut arena = QueueArena::new();
    /// let queue = arena.new_queue().unwrap();
    /// for text in ["a", "a", "b", "b", "c"] {
    ///     arena.push_back(queue, text).unwrap();
    /// }
    ///
    /// assert!(arena.delete_dup(queue));
    ///
    /// let values: Vec<&str> = arena.values(queue).collect();
    /// assert_eq!(values, ["c"]);
    /// ```
    pub fn delete_dup(&mut self, queue: QueueId) -> bool {
        if self.is_empty(queue) {
            return false;
        }
        let sentinel = queue.0;
        let mut cur = self.slot(sentinel).next;
        let mut dup = false;
        while cur != sentinel {
            let next = self.slot(cur).next;
            if next != sentinel && self.text(cur) == self.text(next) {
                self.detach_node(cur);
                self.free_slot(cur);
                dup = true;
            } else if dup {
                // Last element of a duplicated run.
                self.detach_node(cur);
                self.free_slot(cur);
                dup = false;
            }
            cur = next;
        }
        true
    }

    /// Removes every element with a strictly smaller text somewhere later
    /// in the queue, leaving a non-decreasing sequence. Returns the
    /// number of elements remaining (0 for a stale handle).
    ///
    /// # Complexity
    ///
    /// This operation should compute in amortized *O*(*n*) time: the scan
    /// runs backward from the tail and its cursor does not advance while
    /// removals happen, and every removal shrinks the queue for good.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::QueueArena;
    ///
    /// let mut arena = QueueArena::new();
    /// let queue = arena.new_queue().unwrap();
    /// for text in ["e", "a", "d", "b"] {
    ///     arena.push_back(queue, text).unwrap();
    /// }
    ///
    /// assert_eq!(arena.ascend(queue), 2);
    ///
    /// let values: Vec<&str> = arena.values(queue).collect();
    /// assert_eq!(values, ["a", "b"]);
    /// ```
    pub fn ascend(&mut self, queue: QueueId) -> usize {
        self.filter_monotonic(queue, Order::Ascending)
    }

    /// Removes every element with a strictly greater text somewhere later
    /// in the queue, leaving a non-increasing sequence. Returns the
    /// number of elements remaining (0 for a stale handle).
    ///
    /// # Complexity
    ///
    /// This operation should compute in amortized *O*(*n*) time, the same
    /// way as [`ascend`](QueueArena::ascend).
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::QueueArena;
    ///
    /// let mut arena = QueueArena::new();
    /// let queue = arena.new_queue().unwrap();
    /// for text in ["b", "e", "c", "e", "a"] {
    ///     arena.push_back(queue, text).unwrap();
    /// }
    ///
    /// assert_eq!(arena.descend(queue), 3);
    ///
    /// let values: Vec<&str> = arena.values(queue).collect();
    /// assert_eq!(values, ["e", "e", "a"]);
    /// ```
    pub fn descend(&mut self, queue: QueueId) -> usize {
        self.filter_monotonic(queue, Order::Descending)
    }

    /// Backward scan shared by [`ascend`](QueueArena::ascend) and
    /// [`descend`](QueueArena::descend): compare the cursor's predecessor
    /// to the cursor and unlink the predecessor while it is disqualified.
    /// The cursor only advances when no removal happened, so each element
    /// is examined an amortized constant number of times.
    fn filter_monotonic(&mut self, queue: QueueId, order: Order) -> usize {
        if !self.is_queue(queue) {
            return 0;
        }
        let sentinel = queue.0;
        let mut cur = self.slot(sentinel).prev;
        while cur != sentinel {
            let prev = self.slot(cur).prev;
            if prev == sentinel {
                break;
            }
            let doomed = match order {
                Order::Ascending => self.text(prev) > self.text(cur),
                Order::Descending => self.text(prev) < self.text(cur),
            };
            if doomed {
                self.detach_node(prev);
                self.free_slot(prev);
            } else {
                cur = prev;
            }
        }
        self.count(sentinel)
    }
}

#[cfg(test)]
mod tests {
    use crate::queue::tests::{check_ring, queue_of};
    use crate::QueueArena;

    #[test]
    fn reverse_reverses_and_round_trips() {
        let mut arena = QueueArena::new();
        let queue = queue_of(&mut arena, &["a", "b", "c", "d"]);

        arena.reverse(queue);
        check_ring(&arena, queue, &["d", "c", "b", "a"]);

        arena.reverse(queue);
        check_ring(&arena, queue, &["a", "b", "c", "d"]);
    }

    #[test]
    fn reverse_trivial_queues() {
        let mut arena = QueueArena::new();
        let empty = arena.new_queue().unwrap();
        arena.reverse(empty);
        check_ring(&arena, empty, &[]);

        let single = queue_of(&mut arena, &["a"]);
        arena.reverse(single);
        check_ring(&arena, single, &["a"]);

        arena.free_queue(single);
        arena.reverse(single); // stale: no-op
    }

    #[test]
    fn reverse_groups_leaves_the_remainder() {
        let mut arena = QueueArena::new();
        let queue = queue_of(&mut arena, &["1", "2", "3", "4", "5"]);
        arena.reverse_groups(queue, 2);
        check_ring(&arena, queue, &["2", "1", "4", "3", "5"]);
    }

    #[test]
    fn reverse_groups_exact_multiple() {
        let mut arena = QueueArena::new();
        let queue = queue_of(&mut arena, &["1", "2", "3", "4", "5", "6"]);
        arena.reverse_groups(queue, 3);
        check_ring(&arena, queue, &["3", "2", "1", "6", "5", "4"]);
    }

    #[test]
    fn reverse_groups_whole_queue() {
        let mut arena = QueueArena::new();
        let queue = queue_of(&mut arena, &["1", "2", "3"]);
        arena.reverse_groups(queue, 3);
        check_ring(&arena, queue, &["3", "2", "1"]);
    }

    #[test]
    fn reverse_groups_degenerate_k() {
        let mut arena = QueueArena::new();
        let queue = queue_of(&mut arena, &["1", "2", "3"]);

        arena.reverse_groups(queue, 0);
        arena.reverse_groups(queue, 1);
        check_ring(&arena, queue, &["1", "2", "3"]);

        // k beyond the size produces no full group.
        arena.reverse_groups(queue, 4);
        check_ring(&arena, queue, &["1", "2", "3"]);
    }

    #[test]
    fn swap_pairs_even_and_odd() {
        let mut arena = QueueArena::new();
        let even = queue_of(&mut arena, &["a", "b", "c", "d"]);
        arena.swap_pairs(even);
        check_ring(&arena, even, &["b", "a", "d", "c"]);

        let odd = queue_of(&mut arena, &["a", "b", "c"]);
        arena.swap_pairs(odd);
        check_ring(&arena, odd, &["b", "a", "c"]);
    }

    #[test]
    fn swap_pairs_trivial_queues() {
        let mut arena = QueueArena::new();
        let empty = arena.new_queue().unwrap();
        arena.swap_pairs(empty);
        check_ring(&arena, empty, &[]);

        let single = queue_of(&mut arena, &["a"]);
        arena.swap_pairs(single);
        check_ring(&arena, single, &["a"]);
    }

    #[test]
    fn delete_mid_removes_index_half_len() {
        let cases: [(&[&str], &[&str]); 5] = [
            (&["a"], &[]),
            (&["a", "b"], &["a"]),
            (&["a", "b", "c"], &["a", "c"]),
            (&["a", "b", "c", "d"], &["a", "b", "d"]),
            (&["a", "b", "c", "d", "e"], &["a", "b", "d", "e"]),
        ];
        for (input, expected) in cases {
            let mut arena = QueueArena::new();
            let queue = queue_of(&mut arena, input);
            assert!(arena.delete_mid(queue));
            check_ring(&arena, queue, expected);
        }
    }

    #[test]
    fn delete_mid_empty_or_stale_is_false() {
        let mut arena = QueueArena::new();
        let queue = arena.new_queue().unwrap();
        assert!(!arena.delete_mid(queue));

        arena.free_queue(queue);
        assert!(!arena.delete_mid(queue));
    }

    #[test]
    fn delete_dup_removes_runs_entirely() {
        let mut arena = QueueArena::new();
        let queue = queue_of(&mut arena, &["a", "a", "b", "b", "c"]);
        assert!(arena.delete_dup(queue));
        check_ring(&arena, queue, &["c"]);
    }

    #[test]
    fn delete_dup_keeps_distinct_values() {
        let mut arena = QueueArena::new();
        let queue = queue_of(&mut arena, &["a", "b", "c"]);
        assert!(arena.delete_dup(queue));
        check_ring(&arena, queue, &["a", "b", "c"]);
    }

    #[test]
    fn delete_dup_can_empty_the_queue() {
        let mut arena = QueueArena::new();
        let queue = queue_of(&mut arena, &["a", "a", "a"]);
        assert!(arena.delete_dup(queue));
        check_ring(&arena, queue, &[]);
    }

    #[test]
    fn delete_dup_long_run_in_the_middle() {
        let mut arena = QueueArena::new();
        let queue = queue_of(&mut arena, &["a", "b", "b", "b", "c"]);
        assert!(arena.delete_dup(queue));
        check_ring(&arena, queue, &["a", "c"]);
    }

    #[test]
    fn delete_dup_empty_or_stale_is_false() {
        let mut arena = QueueArena::new();
        let queue = arena.new_queue().unwrap();
        assert!(!arena.delete_dup(queue));

        arena.free_queue(queue);
        assert!(!arena.delete_dup(queue));
    }

    #[test]
    fn ascend_keeps_a_non_decreasing_suffix() {
        let mut arena = QueueArena::new();
        let queue = queue_of(&mut arena, &["e", "a", "d", "b"]);
        assert_eq!(arena.ascend(queue), 2);
        check_ring(&arena, queue, &["a", "b"]);
    }

    #[test]
    fn ascend_keeps_equal_neighbours() {
        let mut arena = QueueArena::new();
        let queue = queue_of(&mut arena, &["a", "a", "b"]);
        assert_eq!(arena.ascend(queue), 3);
        check_ring(&arena, queue, &["a", "a", "b"]);
    }

    #[test]
    fn descend_keeps_a_non_increasing_suffix() {
        let mut arena = QueueArena::new();
        let queue = queue_of(&mut arena, &["b", "e", "c", "e", "a"]);
        assert_eq!(arena.descend(queue), 3);
        check_ring(&arena, queue, &["e", "e", "a"]);
    }

    #[test]
    fn filters_are_idempotent() {
        let mut arena = QueueArena::new();
        let queue = queue_of(&mut arena, &["e", "a", "d", "b"]);
        let remaining = arena.ascend(queue);
        assert_eq!(arena.ascend(queue), remaining);
        check_ring(&arena, queue, &["a", "b"]);

        let other = queue_of(&mut arena, &["b", "e", "c", "e", "a"]);
        let remaining = arena.descend(other);
        assert_eq!(arena.descend(other), remaining);
        check_ring(&arena, other, &["e", "e", "a"]);
    }

    #[test]
    fn filters_on_trivial_queues() {
        let mut arena = QueueArena::new();
        let empty = arena.new_queue().unwrap();
        assert_eq!(arena.ascend(empty), 0);
        assert_eq!(arena.descend(empty), 0);

        let single = queue_of(&mut arena, &["x"]);
        assert_eq!(arena.ascend(single), 1);
        assert_eq!(arena.descend(single), 1);
        check_ring(&arena, single, &["x"]);

        arena.free_queue(single);
        assert_eq!(arena.ascend(single), 0);
        assert_eq!(arena.descend(single), 0);
    }
}
