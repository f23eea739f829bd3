use crate::queue::{NodeKey, QueueArena, QueueId};
use std::fmt;
use std::iter::FusedIterator;

/// An iterator over the texts of one queue.
///
/// It holds a pair of element keys `front..=back` for the closed range
/// not yet yielded, plus a flag for the exhausted state (a closed range
/// cannot express emptiness on its own).
///
/// The iterator borrows the arena immutably, so the queue cannot change
/// while it is alive.
///
/// # Examples
///
/// ```compile_fail
/// use cyclic_queue::QueueArena;
///
/// let mut arena = QueueArena::new();
/// let queue = arena.new_queue().unwrap();
/// let mut values = arena.values(queue);
///
/// // Won't compile, because the arena is already borrowed immutably.
/// arena.push_back(queue, "a").unwrap();
/// println!("{:?}", values.next());
/// ```
#[derive(Clone)]
pub struct Values<'a> {
    arena: &'a QueueArena,
    front: NodeKey,
    back: NodeKey,
    finished: bool,
}

impl<'a> Values<'a> {
    pub(crate) fn new(arena: &'a QueueArena, queue: QueueId) -> Self {
        if arena.is_empty(queue) {
            // Covers stale handles too; the keys are never read.
            return Self {
                arena,
                front: NodeKey::NONE,
                back: NodeKey::NONE,
                finished: true,
            };
        }
        Self {
            arena,
            front: arena.slot(queue.0).next,
            back: arena.slot(queue.0).prev,
            finished: false,
        }
    }
}

impl fmt::Debug for Values<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut f = f.debug_tuple("Values");
        if !self.finished {
            let mut cur = self.front;
            loop {
                f.field(&self.arena.text(cur));
                if cur == self.back {
                    break;
                }
                cur = self.arena.slot(cur).next;
            }
        }
        f.finish()
    }
}

impl<'a> Iterator for Values<'a> {
    type Item = &'a str;

    /// Return `*front` and shrink the range to `(front.next)..=back`,
    /// or return `None` if the range is already exhausted.
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let current = self.front;
        if current == self.back {
            self.finished = true;
        } else {
            self.front = self.arena.slot(current).next;
        }
        Some(self.arena.text(current))
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl<'a> DoubleEndedIterator for Values<'a> {
    /// Return `*back` and shrink the range to `front..=(back.prev)`,
    /// or return `None` if the range is already exhausted.
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let current = self.back;
        if current == self.front {
            self.finished = true;
        } else {
            self.back = self.arena.slot(current).prev;
        }
        Some(self.arena.text(current))
    }
}

impl FusedIterator for Values<'_> {}

#[cfg(test)]
mod tests {
    use crate::queue::tests::queue_of;
    use crate::QueueArena;

    #[test]
    fn values_forward_and_backward() {
        let mut arena = QueueArena::new();
        let queue = queue_of(&mut arena, &["a", "b", "c"]);

        let collected: Vec<&str> = arena.values(queue).collect();
        assert_eq!(collected, ["a", "b", "c"]);

        let reversed: Vec<&str> = arena.values(queue).rev().collect();
        assert_eq!(reversed, ["c", "b", "a"]);
    }

    #[test]
    fn values_is_fused() {
        let mut arena = QueueArena::new();
        let queue = queue_of(&mut arena, &["a"]);

        let mut values = arena.values(queue);
        assert_eq!(values.next(), Some("a"));
        assert_eq!(values.next(), None);
        assert_eq!(values.next(), None);
        assert_eq!(values.next_back(), None);
    }

    #[test]
    fn values_meet_in_the_middle() {
        let mut arena = QueueArena::new();
        let queue = queue_of(&mut arena, &["a", "b", "c", "d"]);

        let mut values = arena.values(queue);
        assert_eq!(values.next(), Some("a"));
        assert_eq!(values.next_back(), Some("d"));
        assert_eq!(values.next(), Some("b"));
        assert_eq!(values.next_back(), Some("c"));
        assert_eq!(values.next(), None);
        assert_eq!(values.next_back(), None);
    }

    #[test]
    fn values_of_empty_and_stale_queues() {
        let mut arena = QueueArena::new();
        let queue = arena.new_queue().unwrap();
        assert_eq!(arena.values(queue).next(), None);

        arena.push_back(queue, "a").unwrap();
        arena.free_queue(queue);
        assert_eq!(arena.values(queue).next(), None);
    }

    #[test]
    fn values_last_and_debug() {
        let mut arena = QueueArena::new();
        let queue = queue_of(&mut arena, &["a", "b"]);
        assert_eq!(arena.values(queue).last(), Some("b"));
        assert_eq!(format!("{:?}", arena.values(queue)), r#"Values("a", "b")"#);
    }
}
