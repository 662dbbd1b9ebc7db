//! Node IDs and child ranges for the flat expression arena.
//!
//! Children are `ExprId(u32)` indices rather than `Box<Expr>`; ordered child
//! lists (call arguments, block statements, conditional arms) are contiguous
//! ranges into the arena's side tables.

use std::fmt;

/// Index into [`ExprArena`](crate::ExprArena).
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct ExprId(u32);

impl ExprId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        ExprId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ExprId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExprId({})", self.0)
    }
}

macro_rules! define_range {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
        pub struct $name {
            pub start: u32,
            pub len: u16,
        }

        impl $name {
            pub const EMPTY: $name = $name { start: 0, len: 0 };

            #[inline]
            pub const fn new(start: u32, len: u16) -> Self {
                $name { start, len }
            }

            #[inline]
            pub const fn is_empty(self) -> bool {
                self.len == 0
            }

            #[inline]
            pub const fn len(self) -> usize {
                self.len as usize
            }

            #[inline]
            pub(crate) fn as_range(self) -> std::ops::Range<usize> {
                let start = self.start as usize;
                start..start + self.len as usize
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({}..+{})", stringify!($name), self.start, self.len)
            }
        }
    };
}

define_range!(
    /// Range of expression IDs (call arguments).
    ExprRange
);
define_range!(
    /// Range of statements (block bodies).
    StmtRange
);
define_range!(
    /// Range of conditional arms.
    BranchRange
);
