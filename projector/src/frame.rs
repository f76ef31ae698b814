use crate::Rectangle;

/// One list item inside a [`crate::Movie`].
///
/// `id` is the join key between successive movies and snapshots, and the host's render key.
/// `content` is whatever the host needs to render the item. Keep it cheap to clone (an `Arc`,
/// an index, a handle): rebuilding a movie clones every frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame<K, C> {
    pub id: K,
    pub content: C,
    pub rect: Rectangle,
}

impl<K, C> Frame<K, C> {
    pub fn new(id: K, content: C, rect: Rectangle) -> Self {
        Self { id, content, rect }
    }

    pub fn top(&self) -> f64 {
        self.rect.top()
    }

    pub fn bottom(&self) -> f64 {
        self.rect.bottom()
    }

    pub fn height(&self) -> f64 {
        self.rect.height()
    }
}
