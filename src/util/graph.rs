use {
    num::Zero,
    std::{cmp::Ordering, collections::BinaryHeap, hash::Hash, ops::Add},
};

pub struct OpenSetElement<V, C>(pub V, pub C);

impl<V: Clone + PartialEq, C: Clone + Ord> PartialEq for OpenSetElement<V, C> {
    fn eq(&self, other: &Self) -> bool {
        self.1 == other.1
    }
}

impl<V: Clone + PartialEq, C: Clone + Ord> PartialOrd for OpenSetElement<V, C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        // Reverse the order so that cost is minimized when popping from the heap
        Some(other.1.cmp(&self.1))
    }
}

impl<V: Clone + PartialEq, C: Clone + Ord> Eq for OpenSetElement<V, C> {}

impl<V: Clone + PartialEq, C: Clone + Ord> Ord for OpenSetElement<V, C> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse the order so that cost is minimized when popping from the heap
        other.1.cmp(&self.1)
    }
}

pub struct WeightedGraphSearchState<V, C> {
    open_set_heap: BinaryHeap<OpenSetElement<V, C>>,
    neighbors: Vec<OpenSetElement<V, C>>,
}

impl<V, C> WeightedGraphSearchState<V, C> {
    fn clear(&mut self) {
        self.open_set_heap.clear();
        self.neighbors.clear();
    }
}

impl<V, C> Default for WeightedGraphSearchState<V, C>
where
    OpenSetElement<V, C>: Ord,
{
    fn default() -> Self {
        Self {
            open_set_heap: Default::default(),
            neighbors: Default::default(),
        }
    }
}

pub fn zero_heuristic<W: WeightedGraphSearch + ?Sized>(
    _search: &W,
    _vertex: &W::Vertex,
) -> W::Cost {
    W::Cost::zero()
}

/// An implementation of https://en.wikipedia.org/wiki/A*_search_algorithm and
/// https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm
///
/// Rather than decreasing the key of an open set element when a cheaper route to its vertex is
/// found, the element is re-inserted at the cheaper priority; the superseded element is detected
/// and skipped when popped, by comparing its priority against the best known cost for its vertex.
pub trait WeightedGraphSearch {
    type Vertex: Clone + Eq + Hash;
    type Cost: Add<Self::Cost, Output = Self::Cost> + Clone + Ord + Sized + Zero;

    fn start(&self) -> &Self::Vertex;
    fn is_end(&self, vertex: &Self::Vertex) -> bool;
    fn path_to(&self, vertex: &Self::Vertex) -> Vec<Self::Vertex>;

    /// The best known cost from the start to `vertex`, or the maximum cost if `vertex` hasn't been
    /// reached yet.
    fn cost_from_start(&self, vertex: &Self::Vertex) -> Self::Cost;
    fn heuristic(&self, vertex: &Self::Vertex) -> Self::Cost;

    /// The cost is from `vertex` to the neighbor.
    fn neighbors(
        &self,
        vertex: &Self::Vertex,
        neighbors: &mut Vec<OpenSetElement<Self::Vertex, Self::Cost>>,
    );

    /// `heuristic` may be zero if this is called by Dijkstra.
    fn update_vertex(
        &mut self,
        from: &Self::Vertex,
        to: &Self::Vertex,
        cost: Self::Cost,
        heuristic: Self::Cost,
    );
    fn reset(&mut self);

    fn run_internal<F: Fn(&Self, &Self::Vertex) -> Self::Cost>(
        &mut self,
        state: &mut WeightedGraphSearchState<Self::Vertex, Self::Cost>,
        heuristic: F,
    ) -> Option<Vec<Self::Vertex>> {
        self.reset();
        state.clear();

        let start: Self::Vertex = self.start().clone();
        let start_priority: Self::Cost = self.cost_from_start(&start) + heuristic(self, &start);

        state
            .open_set_heap
            .push(OpenSetElement(start, start_priority));

        while let Some(OpenSetElement(current, priority)) = state.open_set_heap.pop() {
            if self.is_end(&current) {
                return Some(self.path_to(&current));
            }

            let start_to_current: Self::Cost = self.cost_from_start(&current);

            // A popped vertex has been pushed at least once, so `start_to_current` is a real cost
            // and this sum cannot overflow. A cheaper element for the same vertex pops earlier, so
            // anything popped at a larger priority than the recorded cost warrants is stale.
            if priority > start_to_current.clone() + heuristic(self, &current) {
                continue;
            }

            self.neighbors(&current, &mut state.neighbors);

            for OpenSetElement(neighbor, neighbor_cost) in state.neighbors.drain(..) {
                let start_to_neighbor: Self::Cost = start_to_current.clone() + neighbor_cost;

                if start_to_neighbor < self.cost_from_start(&neighbor) {
                    let neighbor_heuristic: Self::Cost = heuristic(self, &neighbor);

                    self.update_vertex(
                        &current,
                        &neighbor,
                        start_to_neighbor.clone(),
                        neighbor_heuristic.clone(),
                    );
                    state.open_set_heap.push(OpenSetElement(
                        neighbor,
                        start_to_neighbor + neighbor_heuristic,
                    ));
                }
            }
        }

        None
    }

    fn run_a_star_internal(
        &mut self,
        state: &mut WeightedGraphSearchState<Self::Vertex, Self::Cost>,
    ) -> Option<Vec<Self::Vertex>> {
        self.run_internal(state, Self::heuristic)
    }

    fn run_a_star(&mut self) -> Option<Vec<Self::Vertex>> {
        self.run_a_star_internal(&mut WeightedGraphSearchState::default())
    }

    fn run_dijkstra_internal(
        &mut self,
        state: &mut WeightedGraphSearchState<Self::Vertex, Self::Cost>,
    ) -> Option<Vec<Self::Vertex>> {
        self.run_internal(state, zero_heuristic::<Self>)
    }

    fn run_dijkstra(&mut self) -> Option<Vec<Self::Vertex>> {
        self.run_dijkstra_internal(&mut WeightedGraphSearchState::default())
    }
}
