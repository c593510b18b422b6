use std::cell::RefCell;
use std::rc::Rc;

pub type SubId = usize;

/// Shared value that is only ever replaced whole.
///
/// Readers get a copy of the current snapshot; a replacement never tears a
/// read in progress. Each replacement bumps the generation and notifies
/// subscribers with the new value.
#[derive(Clone)]
pub struct Snapshot<T: 'static>(Rc<RefCell<Inner<T>>>);

struct Inner<T> {
    value: T,
    generation: u64,
    subs: Vec<Box<dyn Fn(&T)>>,
}

impl<T> Snapshot<T> {
    pub fn new(value: T) -> Self {
        Self(Rc::new(RefCell::new(Inner {
            value,
            generation: 0,
            subs: Vec::new(),
        })))
    }

    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.0.borrow().value.clone()
    }

    pub fn generation(&self) -> u64 {
        self.0.borrow().generation
    }

    /// Swap in `v`, returning the previous snapshot.
    pub fn replace(&self, v: T) -> T {
        let mut inner = self.0.borrow_mut();
        let prev = std::mem::replace(&mut inner.value, v);
        inner.generation += 1;
        let vref = &inner.value;
        for s in &inner.subs {
            s(vref);
        }
        prev
    }

    /// Subscribers run inside `replace` and must not touch this snapshot.
    pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> SubId {
        let mut inner = self.0.borrow_mut();
        inner.subs.push(Box::new(f));
        inner.subs.len() - 1
    }
}
