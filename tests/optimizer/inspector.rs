use std::cell::RefCell;
use std::rc::Rc;

use unsga3::prelude::*;

use crate::test_functions::zdt1;
use crate::{evaluate_with, unit_dimensions};

/// Collects what it sees, like a plotting hook would.
#[derive(Default)]
struct Seen {
    generations: Vec<usize>,
    population_sizes: Vec<usize>,
    front_sizes: Vec<usize>,
    ranks: Vec<Vec<usize>>,
}

struct GenerationalInspector(Rc<RefCell<Seen>>);

impl Inspector for GenerationalInspector {
    fn inspect(&mut self, snapshot: &GenerationSnapshot<'_>) {
        let mut state = self.0.borrow_mut();
        state.generations.push(snapshot.generation);
        state.population_sizes.push(snapshot.population.len());
        state.front_sizes.push(snapshot.fronts.first().map_or(0, Vec::len));
        state
            .ranks
            .push(snapshot.population.iter().map(|c| c.rank).collect());
    }
}

#[test]
fn test_inspector_sees_every_generation() {
    let seen = Rc::new(RefCell::new(Seen::default()));

    let mut optimizer = Unsga3::builder()
        .dimensions(unit_dimensions(3))
        .num_objectives(2)
        .max_generations(5)
        .inspector(GenerationalInspector(Rc::clone(&seen)))
        .seed(17)
        .build(evaluate_with(zdt1))
        .unwrap();
    let result = optimizer.run().unwrap();

    let seen = seen.borrow();
    assert_eq!(seen.generations, vec![0, 1, 2, 3, 4]);
    assert!(seen.population_sizes.iter().all(|&n| n == 8));
    assert!(seen.front_sizes.iter().all(|&n| n > 0));
    let last_ranks: Vec<usize> = result.population.iter().map(|c| c.rank).collect();
    assert_eq!(seen.ranks.last(), Some(&last_ranks));
}

#[test]
fn test_closure_inspector_sees_reference_directions() {
    let counts = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&counts);

    let mut optimizer = Unsga3::builder()
        .dimensions(unit_dimensions(2))
        .num_objectives(3)
        .reference_point_increments(4)
        .max_generations(3)
        .inspector(move |snapshot: &GenerationSnapshot<'_>| {
            let on_directions = snapshot
                .population
                .iter()
                .all(|c| c.reference_direction.is_some_and(|d| d < snapshot.reference_directions.len()));
            sink.borrow_mut()
                .push((snapshot.reference_directions.len(), snapshot.shortfall, on_directions));
        })
        .seed(18)
        .build(evaluate_with(|x| vec![x[0], x[1], 2.0 - x[0] - x[1]]))
        .unwrap();
    optimizer.run().unwrap();

    assert_eq!(*counts.borrow(), vec![(10, 0, true); 3]);
}
