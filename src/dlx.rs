//! Dancing Links network and Algorithm X search.
//!
//! The sparse 0/1 matrix is stored as circular doubly linked lists in two
//! dimensions, with all nodes held in one arena and links stored as arena
//! indices:
//!
//! ```text
//! :> root <> C0 <> C1 <> C2 <> ... <:   (root and column headers)
//!            ||    ||    ||
//!         :> r0  <>  r0  <:        ..   (one node per 1 in a row)
//!            ||          ||
//!               :> r1 <> r1 <:
//!            ..    ..    ..
//! ```
//!
//! Node 0 is the root; nodes `1..=columns` are the column headers, in column
//! order; row nodes follow in row order. Covering a column unlinks it and
//! every row that intersects it without freeing anything, and uncovering
//! relinks exactly those nodes in reverse order.

/// Arena index of a node.
type Index = usize;

/// Arena index of the root node.
const ROOT: Index = 0;

/// Row id stored in header nodes, which belong to no row.
const NO_ROW: usize = usize::MAX;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Node {
    left: Index,
    right: Index,
    up: Index,
    down: Index,
    /// Header of the column this node sits in (headers point at themselves).
    column: Index,
    /// Matrix row this node belongs to.
    row: usize,
}

impl Node {
    const fn header(index: Index) -> Self {
        Self {
            left: index,
            right: index,
            up: index,
            down: index,
            column: index,
            row: NO_ROW,
        }
    }
}

/// An exact-cover problem ready to be searched.
///
/// One instance is owned by a single solve; searching mutates the links in
/// place and restores them before returning.
#[derive(Clone, Debug)]
pub struct Dlx {
    nodes: Vec<Node>,
    /// Live node count per column, indexed by header index (slot 0 unused).
    sizes: Vec<usize>,
    /// Selected row node per search depth, overwritten on backtrack.
    partial: Vec<Index>,
    /// Row ids of every complete cover found so far.
    solutions: Vec<Vec<usize>>,
}

impl Dlx {
    /// Builds the network for a matrix with `columns` columns.
    ///
    /// Each entry of `rows` lists the columns holding a 1 in that row; nodes
    /// are linked left to right in the order given. Row ids reported by
    /// [`Dlx::solve_all`] are positions in `rows`. A row without entries is
    /// never selected.
    ///
    /// # Panics
    ///
    /// Panics if a row names a column `>= columns`.
    pub fn new(columns: usize, rows: &[Vec<usize>]) -> Self {
        let entries: usize = rows.iter().map(Vec::len).sum();
        let mut nodes = Vec::with_capacity(1 + columns + entries);

        // root and headers form one horizontal ring
        for index in 0..=columns {
            let mut header = Node::header(index);
            header.left = if index == 0 { columns } else { index - 1 };
            header.right = if index == columns { 0 } else { index + 1 };
            nodes.push(header);
        }

        let mut dlx = Self {
            nodes,
            sizes: vec![0; columns + 1],
            partial: Vec::new(),
            solutions: Vec::new(),
        };

        for (row, entries) in rows.iter().enumerate() {
            let mut first: Option<Index> = None;
            for &column in entries {
                assert!(column < columns, "row {row} names column {column} of {columns}");
                let node = dlx.append_to_column(column + 1, row);
                match first {
                    Some(head) => dlx.insert_left_of(head, node),
                    None => first = Some(node),
                }
            }
        }
        dlx
    }

    /// Pushes a new node at the bottom of a column and returns its index.
    fn append_to_column(&mut self, header: Index, row: usize) -> Index {
        let index = self.nodes.len();
        let bottom = self.nodes[header].up;
        self.nodes.push(Node {
            left: index,
            right: index,
            up: bottom,
            down: header,
            column: header,
            row,
        });
        self.nodes[bottom].down = index;
        self.nodes[header].up = index;
        self.sizes[header] += 1;
        index
    }

    /// Splices `node` into the row ring just before `first`, i.e. at its end.
    fn insert_left_of(&mut self, first: Index, node: Index) {
        let last = self.nodes[first].left;
        self.nodes[node].left = last;
        self.nodes[node].right = first;
        self.nodes[last].right = node;
        self.nodes[first].left = node;
    }

    /// Number of columns in the matrix.
    pub fn columns(&self) -> usize {
        self.sizes.len() - 1
    }

    /// Current number of live entries in `column`.
    pub fn column_size(&self, column: usize) -> usize {
        self.sizes[column + 1]
    }

    /// Finds every exact cover, discarding results of earlier calls.
    ///
    /// Each solution lists the selected row ids in the order they were
    /// chosen. Discovery order is deterministic: columns are chosen by
    /// smallest size (leftmost on ties) and rows are tried top to bottom.
    pub fn solve_all(&mut self) -> Vec<Vec<usize>> {
        self.solutions.clear();
        self.search(0);
        debug_assert_eq!(self.check_links(), Ok(()));
        std::mem::take(&mut self.solutions)
    }

    fn search(&mut self, depth: usize) {
        if self.nodes[ROOT].right == ROOT {
            let rows = self.partial[..depth]
                .iter()
                .map(|&node| self.nodes[node].row)
                .collect();
            self.solutions.push(rows);
            return;
        }

        let column = self.choose_column();
        self.cover(column);

        let mut r = self.nodes[column].down;
        while r != column {
            if self.partial.len() <= depth {
                self.partial.push(r);
            } else {
                self.partial[depth] = r;
            }

            let mut j = self.nodes[r].right;
            while j != r {
                self.cover(self.nodes[j].column);
                j = self.nodes[j].right;
            }

            self.search(depth + 1);

            // mirror order of the covers above
            let mut j = self.nodes[r].left;
            while j != r {
                self.uncover(self.nodes[j].column);
                j = self.nodes[j].left;
            }

            r = self.nodes[r].down;
        }

        self.uncover(column);
    }

    /// Picks the live column with the fewest entries, leftmost on ties.
    fn choose_column(&self) -> Index {
        let mut best = self.nodes[ROOT].right;
        let mut j = self.nodes[best].right;
        while j != ROOT {
            if self.sizes[j] < self.sizes[best] {
                best = j;
            }
            j = self.nodes[j].right;
        }
        best
    }

    /// Removes a column header and every row through it from the other
    /// columns. The column's own vertical list is left intact.
    fn cover(&mut self, column: Index) {
        let Node { left, right, .. } = self.nodes[column];
        self.nodes[right].left = left;
        self.nodes[left].right = right;

        let mut i = self.nodes[column].down;
        while i != column {
            let mut j = self.nodes[i].right;
            while j != i {
                let Node { up, down, column: header, .. } = self.nodes[j];
                self.nodes[down].up = up;
                self.nodes[up].down = down;
                self.sizes[header] -= 1;
                j = self.nodes[j].right;
            }
            i = self.nodes[i].down;
        }
    }

    /// Exact reverse of [`Dlx::cover`].
    fn uncover(&mut self, column: Index) {
        let mut i = self.nodes[column].up;
        while i != column {
            let mut j = self.nodes[i].left;
            while j != i {
                let Node { up, down, column: header, .. } = self.nodes[j];
                self.sizes[header] += 1;
                self.nodes[down].up = j;
                self.nodes[up].down = j;
                j = self.nodes[j].left;
            }
            i = self.nodes[i].up;
        }

        let Node { left, right, .. } = self.nodes[column];
        self.nodes[right].left = column;
        self.nodes[left].right = column;
    }

    /// Verifies that every link is mirrored by its neighbour and that every
    /// column size matches its vertical list.
    ///
    /// Only meaningful while no column is covered, i.e. outside a search.
    pub fn check_links(&self) -> Result<(), String> {
        for (index, node) in self.nodes.iter().enumerate() {
            if self.nodes[node.right].left != index || self.nodes[node.left].right != index {
                return Err(format!("horizontal links of node {index} are broken"));
            }
            if self.nodes[node.down].up != index || self.nodes[node.up].down != index {
                return Err(format!("vertical links of node {index} are broken"));
            }
        }

        for header in 1..self.sizes.len() {
            let mut count = 0;
            let mut i = self.nodes[header].down;
            while i != header {
                if self.nodes[i].column != header {
                    return Err(format!("node {i} is listed under the wrong column"));
                }
                count += 1;
                i = self.nodes[i].down;
            }
            if count != self.sizes[header] {
                return Err(format!(
                    "column {} has size {} but {count} nodes",
                    header - 1,
                    self.sizes[header]
                ));
            }
        }
        Ok(())
    }
}
