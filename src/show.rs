use std::collections::BTreeSet;

use itertools::Itertools;

use crate::id::Id;

/// Helper trait which can be used to display states, symbols, words and such.
pub trait Show {
    /// Returns a human readable representation of `self`, for a state that should be
    /// for example `q0`, for a pair of states `(q0, q1)`.
    fn show(&self) -> String;

    /// Show a collection of the thing. For a collection of states this gives `{q0, q1, q2}`,
    /// symbols are concatenated into a word `"aab"` instead.
    fn show_collection<'a, I>(iter: I) -> String
    where
        Self: 'a,
        I: IntoIterator<Item = &'a Self>,
    {
        format!("{{{}}}", iter.into_iter().map(|x| x.show()).join(", "))
    }
}

impl Show for Id {
    fn show(&self) -> String {
        self.to_string()
    }
}

impl Show for char {
    fn show(&self) -> String {
        self.to_string()
    }

    fn show_collection<'a, I>(iter: I) -> String
    where
        Self: 'a,
        I: IntoIterator<Item = &'a Self>,
    {
        format!("\"{}\"", iter.into_iter().join(""))
    }
}

impl Show for &str {
    fn show(&self) -> String {
        self.to_string()
    }
}

impl Show for String {
    fn show(&self) -> String {
        self.clone()
    }
}

macro_rules! impl_integer_show {
    ($($t:ty),*) => {
        $(
            impl Show for $t {
                fn show(&self) -> String {
                    self.to_string()
                }
            }
        )*
    }
}

impl_integer_show!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

impl<L: Show, R: Show> Show for (L, R) {
    fn show(&self) -> String {
        format!("({}, {})", self.0.show(), self.1.show())
    }
}

impl<S: Show> Show for BTreeSet<S> {
    fn show(&self) -> String {
        format!("{{{}}}", self.iter().map(|x| x.show()).join(", "))
    }
}

impl<S: Show> Show for Vec<S> {
    fn show(&self) -> String {
        S::show_collection(self.iter())
    }
}

impl<S: Show> Show for [S] {
    fn show(&self) -> String {
        S::show_collection(self.iter())
    }
}
