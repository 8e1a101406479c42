use core::cmp::Ordering;

/// An edge between two vertex indices of a closed contour, normalized on the
/// shortest way around.
///
/// For indices `x` and `y` on a cycle of `num` vertices, `len` is the smaller
/// of the two modular distances and `(a, b)` is ordered so that walking
/// forward `len` steps from `a` reaches `b`. The result is the same whatever
/// the order of `x` and `y`, except when both distances are equal, in which
/// case the arguments are kept in order.
///
/// Edges shorter than two steps join a vertex with itself or with one of its
/// neighbors. They are not diagonals, see [`CyclicEdgeLength::is_degenerate`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct CyclicEdgeLength {
    pub a: u32,
    pub b: u32,
    pub len: u32,
}

impl CyclicEdgeLength {
    pub fn new(x: u32, y: u32, num: u32) -> Self {
        if num == 0 {
            return CyclicEdgeLength { a: x, b: y, len: 0 };
        }

        let n = num as i64;
        let (xi, yi) = (x as i64, y as i64);
        let backward = (xi - yi).rem_euclid(n) as u32;
        let forward = (yi - xi).rem_euclid(n) as u32;

        if backward < forward {
            CyclicEdgeLength {
                a: y,
                b: x,
                len: backward,
            }
        } else {
            CyclicEdgeLength {
                a: x,
                b: y,
                len: forward,
            }
        }
    }

    /// True if the edge joins a vertex with itself or with an adjacent vertex.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.len < 2
    }
}

/// Ordered by length first.
impl Ord for CyclicEdgeLength {
    fn cmp(&self, other: &Self) -> Ordering {
        self.len
            .cmp(&other.len)
            .then(self.a.cmp(&other.a))
            .then(self.b.cmp(&other.b))
    }
}

impl PartialOrd for CyclicEdgeLength {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[test]
fn normalization_is_symmetric() {
    let e1 = CyclicEdgeLength::new(2, 8, 10);
    let e2 = CyclicEdgeLength::new(8, 2, 10);

    assert_eq!(e1, e2);
    assert_eq!(e1.len, 4);
    assert_eq!((e1.a, e1.b), (8, 2));
    assert!(!e1.is_degenerate());
}

#[test]
fn degenerate_edges() {
    assert!(CyclicEdgeLength::new(3, 3, 10).is_degenerate());
    assert!(CyclicEdgeLength::new(3, 4, 10).is_degenerate());
    assert!(CyclicEdgeLength::new(0, 9, 10).is_degenerate());
    assert_eq!(CyclicEdgeLength::new(0, 9, 10).len, 1);
    assert!(CyclicEdgeLength::new(1, 2, 0).is_degenerate());
    assert!(!CyclicEdgeLength::new(0, 2, 4).is_degenerate());
}

#[test]
fn ties_keep_the_argument_order() {
    let e = CyclicEdgeLength::new(1, 4, 6);
    assert_eq!((e.a, e.b, e.len), (1, 4, 3));
    let e = CyclicEdgeLength::new(4, 1, 6);
    assert_eq!((e.a, e.b, e.len), (4, 1, 3));
}

#[test]
fn ordered_by_length() {
    let mut edges = [
        CyclicEdgeLength::new(0, 5, 12),
        CyclicEdgeLength::new(0, 2, 12),
        CyclicEdgeLength::new(11, 1, 12),
    ];
    edges.sort();
    let lengths: [u32; 3] = [edges[0].len, edges[1].len, edges[2].len];
    assert_eq!(lengths, [2, 2, 5]);
    assert_eq!((edges[0].a, edges[0].b), (0, 2));
    assert_eq!((edges[1].a, edges[1].b), (11, 1));
}
