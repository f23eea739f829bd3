use ghost_cell::{GhostCell, GhostToken};
use static_rc::StaticRc;
use std::ops::Deref;

pub struct TextList<'brand> {
    ends: [Option<NodePtr<'brand>>; 2],
}

struct Node<'brand> {
    links: [Option<NodePtr<'brand>>; 2],
    text: Box<str>,
}

type NodePtr<'brand> = Half<GhostCell<'brand, Node<'brand>>>;

type Half<T> = StaticRc<T, 1, 2>;
type Full<T> = StaticRc<T, 2, 2>;

impl<'brand> Node<'brand> {
    fn new(text: &str) -> Self {
        let links = [None, None];
        Self {
            links,
            text: text.into(),
        }
    }
}

impl<'brand> Default for TextList<'brand> {
    fn default() -> Self {
        let ends = [None, None];
        Self { ends }
    }
}

impl<'brand> TextList<'brand> {
    const FRONT: usize = 0;
    const BACK: usize = 1;

    fn push_at(&mut self, side: usize, text: &str, token: &mut GhostToken<'brand>) {
        let oppo = 1 - side;
        let (half, other) = Full::split(Full::new(GhostCell::new(Node::new(text))));
        match self.ends[side].take() {
            Some(end) => {
                end.deref().borrow_mut(token).links[oppo] = Some(half);
                other.deref().borrow_mut(token).links[side] = Some(end);
            }
            None => self.ends[oppo] = Some(half),
        }
        self.ends[side] = Some(other);
    }

    fn pop_at(&mut self, side: usize, token: &mut GhostToken<'brand>) -> Option<String> {
        debug_assert!(side < 2);
        let oppo = 1 - side;
        let outer = self.ends[side].take()?;
        let inner = match outer.deref().borrow_mut(token).links[side].take() {
            Some(end) => {
                let inner = end.deref().borrow_mut(token).links[oppo].take().unwrap();
                self.ends[side] = Some(end);
                inner
            }
            None => self.ends[oppo].take().unwrap(),
        };
        Some(
            Full::into_box(Full::join(inner, outer))
                .into_inner()
                .text
                .into_string(),
        )
    }
}

impl<'brand> TextList<'brand> {
    pub fn new() -> Self {
        Default::default()
    }
    pub fn is_empty(&self) -> bool {
        self.ends[Self::FRONT].is_none()
    }
    pub fn push_back(&mut self, text: &str, token: &mut GhostToken<'brand>) {
        self.push_at(Self::BACK, text, token);
    }
    pub fn pop_back(&mut self, token: &mut GhostToken<'brand>) -> Option<String> {
        self.pop_at(Self::BACK, token)
    }
    pub fn push_front(&mut self, text: &str, token: &mut GhostToken<'brand>) {
        self.push_at(Self::FRONT, text, token);
    }
    pub fn pop_front(&mut self, token: &mut GhostToken<'brand>) -> Option<String> {
        self.pop_at(Self::FRONT, token)
    }
}

#[cfg(test)]
mod tests {
    use crate::experiments::TextList;
    use ghost_cell::GhostToken;

    #[test]
    fn list_push_pop() {
        GhostToken::new(|mut token| {
            let mut list = TextList::new();
            assert!(list.is_empty());
            list.push_back("a", &mut token);
            list.push_front("b", &mut token);
            assert!(!list.is_empty());
            assert_eq!(list.pop_back(&mut token), Some("a".to_string()));
            assert_eq!(list.pop_front(&mut token), Some("b".to_string()));
            assert!(list.is_empty());
        })
    }

    #[test]
    fn list_pops_front_in_push_order() {
        GhostToken::new(|mut token| {
            let mut list = TextList::new();
            for text in ["x", "y", "z"] {
                list.push_back(text, &mut token);
            }
            assert_eq!(list.pop_front(&mut token), Some("x".to_string()));
            assert_eq!(list.pop_front(&mut token), Some("y".to_string()));
            assert_eq!(list.pop_front(&mut token), Some("z".to_string()));
            assert_eq!(list.pop_front(&mut token), None);
        })
    }
}
