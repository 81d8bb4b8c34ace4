use crate::route::Route;

use std::any::Any;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::sync::Arc;

/// An opaque value attached to a route.
///
/// The mux gives flags no meaning. Middleware reads them back through
/// [`flags_of_type`] to apply route level policy.
pub type Flag = Arc<dyn Any + Send + Sync>;

/// Yields every flag of `route` whose type is `T`, in attachment order.
pub fn flags_of_type<T: Any, B>(route: &Route<B>) -> FlagsOfType<'_, T> {
    FlagsOfType {
        iter: route.flags().iter(),
        _marker: PhantomData,
    }
}

pub struct FlagsOfType<'a, T> {
    iter: std::slice::Iter<'a, Flag>,
    _marker: PhantomData<fn() -> T>,
}

impl<'a, T: Any> Iterator for FlagsOfType<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.iter.by_ref().find_map(|flag| (**flag).downcast_ref::<T>())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.iter.size_hint().1)
    }
}

impl<T: Any> DoubleEndedIterator for FlagsOfType<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter.by_ref().rev().find_map(|flag| (**flag).downcast_ref::<T>())
    }
}

impl<T: Any> FusedIterator for FlagsOfType<'_, T> {}
