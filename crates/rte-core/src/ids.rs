//! Typed indices into the road graph's flat arrays.
//!
//! Vertices, edges and arcs are all addressed by position in a `Vec`, so a
//! raw `u32` would do.  Wrapping each in its own type keeps a `NodeId` from
//! being used where an `EdgeId` is expected.

use std::fmt;

macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Position in the graph array this id addresses.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        /// Fails once a graph outgrows the `u32` id space.
        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Index of a graph vertex.  Vertices of the base graph are numbered in
    /// registration order; query overlays append virtual vertices after them.
    pub struct NodeId(u32);
}

typed_id! {
    /// Index of an undirected road edge.  One `EdgeId` per input segment, in
    /// input order.
    pub struct EdgeId(u32);
}

typed_id! {
    /// Index of a directed arc in CSR order.  An undirected edge owns two
    /// arcs, a one-way edge owns one.
    pub struct ArcId(u32);
}
