//! Frontiers of a graph exploration behind the common `Agenda` interface.

use std::collections::VecDeque;

/// A container of nodes that still have to be expanded. The order in which
/// `pop` hands them out determines the exploration order.
pub trait Agenda {
    type Item;

    fn push(&mut self, element: Self::Item);
    fn pop(&mut self) -> Option<Self::Item>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn extend<I: IntoIterator<Item = Self::Item>>(&mut self, elements: I) {
        for element in elements {
            self.push(element);
        }
    }
}

/// Last in, first out.
impl<I> Agenda for Vec<I> {
    type Item = I;

    fn push(&mut self, element: I) {
        Vec::push(self, element)
    }

    fn pop(&mut self) -> Option<I> {
        Vec::pop(self)
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }
}

/// First in, first out.
impl<I> Agenda for VecDeque<I> {
    type Item = I;

    fn push(&mut self, element: I) {
        self.push_back(element)
    }

    fn pop(&mut self) -> Option<I> {
        self.pop_front()
    }

    fn len(&self) -> usize {
        VecDeque::len(self)
    }
}

/// An `Agenda` whose discipline is chosen at runtime.
#[derive(Clone, Debug)]
pub enum Frontier<I> {
    Stack(Vec<I>),
    Queue(VecDeque<I>),
}

impl<I> Frontier<I> {
    pub fn stack<II: IntoIterator<Item = I>>(initials: II) -> Self {
        Frontier::Stack(initials.into_iter().collect())
    }

    pub fn queue<II: IntoIterator<Item = I>>(initials: II) -> Self {
        Frontier::Queue(initials.into_iter().collect())
    }
}

impl<I> Agenda for Frontier<I> {
    type Item = I;

    fn push(&mut self, element: I) {
        match *self {
            Frontier::Stack(ref mut stack) => Agenda::push(stack, element),
            Frontier::Queue(ref mut queue) => Agenda::push(queue, element),
        }
    }

    fn pop(&mut self) -> Option<I> {
        match *self {
            Frontier::Stack(ref mut stack) => Agenda::pop(stack),
            Frontier::Queue(ref mut queue) => Agenda::pop(queue),
        }
    }

    fn len(&self) -> usize {
        match *self {
            Frontier::Stack(ref stack) => stack.len(),
            Frontier::Queue(ref queue) => queue.len(),
        }
    }
}
