//! This crate provides text queues hosted together in one arena, each
//! implemented as a cyclic doubly-linked list of slot indices.
//!
//! A [`QueueArena`] owns a single slot vector and hands out [`QueueId`]
//! handles. Every queue is a ring threaded through that vector, anchored
//! at a sentinel slot, so inserting or removing at a known slot takes
//! constant time, and a run of elements can move between queues of the
//! same arena without a walk. Finding a position still takes *O*(*n*)
//! time.
//!
//! Here is a quick example showing how the queues work.
//!
//! ```
//! use cyclic_queue::QueueArena;
//!
//! let mut arena = QueueArena::new();
//! let queue = arena.new_queue().unwrap();
//!
//! arena.push_back(queue, "way").unwrap();
//! arena.push_front(queue, "the").unwrap();
//! arena.push_back(queue, "out").unwrap();
//!
//! assert_eq!(arena.len(queue), 3);
//! assert_eq!(arena.pop_front(queue), Some("the".to_string()));
//! assert_eq!(arena.pop_front(queue), Some("way".to_string()));
//! assert_eq!(arena.pop_front(queue), Some("out".to_string()));
//! assert_eq!(arena.pop_front(queue), None);
//! ```
//!
//! # Memory Layout
//!
//! The memory layout of an arena hosting two queues is like the
//! following graph:
//! ```text
//!  slots:      0           1           2           3           4
//!        ┌───────────┬───────────┬───────────┬───────────┬───────────┐
//!        │ Sentinel  │ Text "a"  │ Sentinel  │ Text "b"  │  Vacant   │
//!  next: │     1     │     3     │     2     │     0     │   NONE    │
//!  prev: │     3     │     0     │     2     │     1     │     -     │
//!        └───────────┴───────────┴───────────┴───────────┴───────────┘
//!
//!  queue A (sentinel 0):  0 → 1 → 3 → 0    holds "a", "b"
//!  queue B (sentinel 2):  2 → 2            empty
//!  free list:             4
//! ```
//!
//! The `QueueArena` contains:
//! - the slot vector, where links are plain indices rather than
//!   pointers;
//! - the head of a free list threaded through vacant slots, so memory
//!   from removed elements is reused before the vector grows;
//! - a count of live elements and an optional capacity limit.
//!
//! Each slot is either vacant, a queue's sentinel, or an element
//! carrying its text. Sentinels live in the same index space as
//! elements, which is what makes cross-queue splicing a pure link
//! update.
//!
//! Initially, a fresh queue is just its sentinel, of which the `next`
//! and `prev` links point to itself. As elements are pushed,
//! `sentinel.next` is the first element and `sentinel.prev` is the
//! last.
//!
//! Queues do not store their length. Asking for it recounts the ring in
//! *O*(*n*) time, and in exchange no structural operation has to keep a
//! counter honest.
//!
//! # Handles
//!
//! A [`QueueId`] names a queue, not a borrow of it. After
//! [`free_queue`], the handle is stale: read operations treat the queue
//! as absent (`None`, `0`, `false`, an empty iterator) and structural
//! operations return without touching anything. Only two things are
//! ever reported as errors, both at element insertion: the arena being
//! [`full`](Error::Full), and a handle that does not name a live queue
//! ([`UnknownQueue`](Error::UnknownQueue)).
//!
//! # Iteration
//!
//! Iterating over a queue's texts is by the [`Values`] iterator. It is
//! a double-ended iterator and iterates the queue like an array (fused
//! and non-cyclic).
//!
//! ## Examples
//!
//! ```
//! use cyclic_queue::QueueArena;
//!
//! let mut arena = QueueArena::new();
//! let queue = arena.new_queue().unwrap();
//! for text in ["a", "b", "c"] {
//!     arena.push_back(queue, text).unwrap();
//! }
//!
//! let mut iter = arena.values(queue);
//! assert_eq!(iter.next(), Some("a"));
//! assert_eq!(iter.next_back(), Some("c"));
//! assert_eq!(iter.next(), Some("b"));
//! assert_eq!(iter.next(), None);
//! assert_eq!(iter.next(), None); // Fused and non-cyclic
//! ```
//!
//! # Algorithms
//!
//! The structural algorithms work by rewiring links in place and never
//! move or clone a text:
//!
//! - [`reverse`] and [`reverse_groups`]: flip the whole queue, or every
//!   run of exactly *k* elements;
//! - [`swap_pairs`] and [`delete_mid`]: exchange adjacent elements, or
//!   remove the middle one;
//! - [`delete_dup`], [`ascend`] and [`descend`]: drop elements by
//!   neighbour or suffix comparison;
//! - [`sort`], [`merge`] and [`merge_all`]: stable merge sort over the
//!   ring, pairwise merge, and a fold over many queues;
//! - [`shuffle`]: a Fisher-Yates pass fed by a caller-supplied random
//!   source.
//!
//! ## Examples
//!
//! ```
//! use cyclic_queue::{Order, QueueArena};
//!
//! let mut arena = QueueArena::new();
//! let left = arena.new_queue().unwrap();
//! let right = arena.new_queue().unwrap();
//! for text in ["pear", "date", "kiwi"] {
//!     arena.push_back(left, text).unwrap();
//! }
//! for text in ["fig", "lime"] {
//!     arena.push_back(right, text).unwrap();
//! }
//!
//! arena.sort(left, Order::Ascending);
//! arena.sort(right, Order::Ascending);
//! assert_eq!(arena.merge(left, right, Order::Ascending), 5);
//!
//! let values: Vec<&str> = arena.values(left).collect();
//! assert_eq!(values, ["date", "fig", "kiwi", "lime", "pear"]);
//! assert!(arena.is_empty(right));
//! ```
//!
//! [`QueueArena`]: crate::QueueArena
//! [`QueueId`]: crate::QueueId
//! [`Values`]: crate::Values
//! [`free_queue`]: crate::QueueArena::free_queue
//! [`reverse`]: crate::QueueArena::reverse
//! [`reverse_groups`]: crate::QueueArena::reverse_groups
//! [`swap_pairs`]: crate::QueueArena::swap_pairs
//! [`delete_mid`]: crate::QueueArena::delete_mid
//! [`delete_dup`]: crate::QueueArena::delete_dup
//! [`ascend`]: crate::QueueArena::ascend
//! [`descend`]: crate::QueueArena::descend
//! [`sort`]: crate::QueueArena::sort
//! [`merge`]: crate::QueueArena::merge
//! [`merge_all`]: crate::QueueArena::merge_all
//! [`shuffle`]: crate::QueueArena::shuffle

#[doc(inline)]
pub use queue::iterator::Values;
#[doc(inline)]
pub use queue::{Error, Order, QueueArena, QueueGroup, QueueId};

pub mod queue;

mod experiments;
