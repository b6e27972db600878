use crate::core::models::afp::Afp;

/// Fragments ordered by `(start1, start2)`, with the chaining relation between them.
///
/// An edge `a → b` exists when `a` ends before `b` starts in both chains and neither
/// chain skips more than `max_gap` residues between them. Edges only point forward in
/// the ordering, so the graph is acyclic and the ordering is a topological order.
#[derive(Debug, Clone)]
pub struct AfpGraph {
    afps: Vec<Afp>,
    max_gap: usize,
}

impl AfpGraph {
    pub fn new(mut afps: Vec<Afp>, max_gap: usize) -> Self {
        afps.sort_by(Afp::position_cmp);
        Self { afps, max_gap }
    }

    pub fn afps(&self) -> &[Afp] {
        &self.afps
    }

    pub fn len(&self) -> usize {
        self.afps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.afps.is_empty()
    }

    pub fn get(&self, index: usize) -> &Afp {
        &self.afps[index]
    }

    pub fn into_afps(self) -> Vec<Afp> {
        self.afps
    }

    /// Indices of the fragments that may directly precede fragment `index`, ascending.
    pub fn predecessors(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        let target = &self.afps[index];
        // Candidates start in chain 1 no earlier than `start1 - len - max_gap` and strictly
        // before `target.start1`.
        let lo = self
            .afps
            .partition_point(|a| a.start1 + a.len + self.max_gap < target.start1);
        let hi = self.afps.partition_point(|a| a.start1 < target.start1);
        (lo..hi.max(lo)).filter(move |&i| self.connects(&self.afps[i], target))
    }

    fn connects(&self, from: &Afp, to: &Afp) -> bool {
        if !from.precedes(to) {
            return false;
        }
        let (g1, g2) = from.gaps_to(to);
        g1 <= self.max_gap && g2 <= self.max_gap
    }
}
