use unsga3::prelude::*;

use crate::test_functions::{dtlz2, zdt1};
use crate::{evaluate_with, mutually_non_dominated, unit_dimensions};

#[test]
fn test_single_generation_returns_ranked_population() {
    let mut optimizer = Unsga3::builder()
        .dimensions(unit_dimensions(3))
        .num_objectives(2)
        .population_size(10)
        .max_generations(1)
        .seed(1)
        .build(evaluate_with(|x| vec![x[0], 1.0 - x[0] + x[1] + x[2]]))
        .unwrap();

    let result = optimizer.run().unwrap();
    assert_eq!(result.population.len(), 10);
    for c in &result.population {
        assert!(c.fitness.is_scored());
        assert_eq!(c.fitness.len(), 2);
        assert_eq!(c.fitness, c.training_fitness);
        assert!(c.reference_direction.is_some());
    }
    let covered: usize = result.fronts.iter().map(Vec::len).sum();
    assert_eq!(covered, 10);
    assert!(result.underfilled_generations.is_empty());
    assert!(result.history.is_none());
}

#[test]
fn test_evaluator_called_once_per_generation() {
    let mut calls = Vec::new();
    let mut optimizer = Unsga3::builder()
        .dimensions(unit_dimensions(2))
        .num_objectives(2)
        .max_generations(4)
        .seed(5)
        .build(|population: &mut [Candidate], generation: usize| {
            calls.push((generation, population.len()));
            Ok::<_, Error>(Evaluation::training(
                population.iter().map(|c| zdt1(&c.solution)).collect(),
            ))
        })
        .unwrap();

    optimizer.run().unwrap();
    drop(optimizer);
    // Seeded population first, then one batch of offspring per generation.
    assert_eq!(calls, vec![(0, 8), (1, 8), (2, 8), (3, 8)]);
}

#[test]
fn test_final_front_is_non_dominated() {
    let mut optimizer = Unsga3::builder()
        .dimensions(unit_dimensions(5))
        .num_objectives(2)
        .reference_point_increments(12)
        .max_generations(30)
        .seed(42)
        .build(evaluate_with(zdt1))
        .unwrap();

    let result = optimizer.run().unwrap();
    assert_eq!(result.population.len(), optimizer.population_size());

    let front: Vec<&Candidate> = result.pareto_front().collect();
    assert!(!front.is_empty());
    assert!(mutually_non_dominated(&front));
    assert!(front.iter().all(|c| c.rank == 0));

    // Every later front is dominated by something in an earlier one.
    for (k, members) in result.fronts.iter().enumerate().skip(1) {
        for &i in members {
            let c = &result.population[i];
            assert_eq!(c.rank, k);
            assert!(
                result.fronts[..k]
                    .iter()
                    .flatten()
                    .any(|&j| result.population[j].fitness.dominates(&c.fitness))
            );
        }
    }
}

#[test]
fn test_zdt1_converges_towards_front() {
    let mut optimizer = Unsga3::builder()
        .dimensions(unit_dimensions(4))
        .num_objectives(2)
        .reference_point_increments(12)
        .max_generations(60)
        .seed(7)
        .build(evaluate_with(zdt1))
        .unwrap();

    let result = optimizer.run().unwrap();
    // On the true front f2 = 1 - sqrt(f1); random points sit far above it.
    let mean_gap: f64 = result
        .pareto_front()
        .map(|c| c.fitness[1] - (1.0 - c.fitness[0].sqrt()))
        .sum::<f64>()
        / result.fronts[0].len() as f64;
    assert!(mean_gap < 1.0, "mean distance to front {mean_gap}");
}

#[test]
fn test_three_objectives_spread_over_directions() {
    let mut optimizer = Unsga3::builder()
        .dimensions(unit_dimensions(6))
        .num_objectives(3)
        .reference_point_increments(5)
        .max_generations(25)
        .seed(11)
        .build(evaluate_with(|x| dtlz2(x, 3)))
        .unwrap();

    let result = optimizer.run().unwrap();
    assert_eq!(result.population.len(), 16);

    let mut directions: Vec<usize> = result
        .population
        .iter()
        .filter_map(|c| c.reference_direction)
        .collect();
    directions.sort_unstable();
    directions.dedup();
    assert!(
        directions.len() >= 6,
        "population collapsed onto {} directions",
        directions.len()
    );
}

#[test]
fn test_same_seed_same_result() {
    let run = |seed: u64| {
        let mut optimizer = Unsga3::builder()
            .dimensions(unit_dimensions(3))
            .num_objectives(2)
            .max_generations(10)
            .seed(seed)
            .build(evaluate_with(zdt1))
            .unwrap();
        optimizer.run().unwrap()
    };

    let a = run(99);
    let b = run(99);
    assert_eq!(a.population, b.population);
    assert_eq!(a.fronts, b.fronts);
}

#[test]
fn test_repeated_runs_restart_from_seed() {
    let mut optimizer = Unsga3::builder()
        .dimensions(unit_dimensions(2))
        .num_objectives(2)
        .max_generations(5)
        .seed(3)
        .build(evaluate_with(zdt1))
        .unwrap();

    let first = optimizer.run().unwrap();
    let second = optimizer.run().unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_history_records_every_generation() {
    let mut optimizer = Unsga3::builder()
        .dimensions(unit_dimensions(2))
        .num_objectives(2)
        .max_generations(6)
        .record_history(true)
        .seed(8)
        .build(evaluate_with(zdt1))
        .unwrap();

    let result = optimizer.run().unwrap();
    let history = result.history.as_ref().unwrap();
    assert_eq!(history.len(), 6);
    for (i, record) in history.iter().enumerate() {
        assert_eq!(record.generation, i);
        assert_eq!(record.population.len(), 8);
        assert_eq!(record.shortfall, 0);
    }
    let last = history.last().unwrap();
    assert_eq!(last.population, result.population);
    assert_eq!(last.fronts, result.fronts);
}

#[test]
fn test_discrete_dimensions_stay_on_lattice() {
    let dims = vec![
        SolutionDimension::discrete(0.0, 1.0, 0.1).unwrap(),
        SolutionDimension::discrete(2.0, 10.0, 1.0).unwrap(),
        SolutionDimension::new(0.0, 5.0).unwrap(),
    ];
    let mut optimizer = Unsga3::builder()
        .dimensions(dims.clone())
        .num_objectives(2)
        .max_generations(10)
        .record_history(true)
        .seed(21)
        .build(evaluate_with(|x| vec![x[0] + x[2], (x[1] - 2.0) / 8.0 + 1.0 - x[0]]))
        .unwrap();

    let result = optimizer.run().unwrap();
    for record in result.history.unwrap() {
        for c in &record.population {
            for (x, d) in c.solution.iter().zip(&dims) {
                assert!(*x >= d.min_val() && *x <= d.max_val());
                assert_eq!(d.repair(*x), *x);
            }
        }
    }
}

#[test]
fn test_evaluator_annotations_survive_selection() {
    let mut optimizer = Unsga3::builder()
        .dimensions(unit_dimensions(2))
        .num_objectives(2)
        .max_generations(5)
        .seed(4)
        .build(|population: &mut [Candidate], generation: usize| {
            for (i, c) in population.iter_mut().enumerate() {
                c.annotate("id", format!("g{generation}_c{i}"));
            }
            Ok::<_, Error>(Evaluation::training(
                population.iter().map(|c| zdt1(&c.solution)).collect(),
            ))
        })
        .unwrap();

    let result = optimizer.run().unwrap();
    let mut ids: Vec<String> = result.population.iter().filter_map(Candidate::id).collect();
    assert_eq!(ids.len(), result.population.len());
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), result.population.len());
}

#[test]
fn test_custom_variation() {
    // Offspring copy the first parent, so no new solution ever appears.
    let variation = |parents: &[Candidate],
                     _dims: &[SolutionDimension],
                     count: usize,
                     _rng: &mut fastrand::Rng| { vec![parents[0].solution.clone(); count] };

    let mut optimizer = Unsga3::builder()
        .dimensions(unit_dimensions(2))
        .num_objectives(2)
        .max_generations(3)
        .variation(variation)
        .record_history(true)
        .seed(6)
        .build(evaluate_with(zdt1))
        .unwrap();

    let result = optimizer.run().unwrap();
    let history = result.history.unwrap();
    let seeded: Vec<&Vec<f64>> = history[0].population.iter().map(|c| &c.solution).collect();
    assert!(
        result
            .population
            .iter()
            .all(|c| seeded.contains(&&c.solution))
    );
}

#[test]
fn test_empty_offspring_keeps_parents() {
    // Every later pool holds only the parents, which still fill the population.
    let starve = |_: &[Candidate], _: &[SolutionDimension], _: usize, _: &mut fastrand::Rng| {
        Vec::<Vec<f64>>::new()
    };
    let mut optimizer = Unsga3::builder()
        .dimensions(unit_dimensions(1))
        .num_objectives(2)
        .max_generations(3)
        .variation(starve)
        .seed(2)
        .build(|population: &mut [Candidate], _generation: usize| {
            Ok::<_, Error>(Evaluation::training(
                population.iter().map(|c| zdt1(&c.solution)).collect(),
            ))
        })
        .unwrap();

    let result = optimizer.run().unwrap();
    assert_eq!(result.population.len(), 8);
    assert!(result.underfilled_generations.is_empty());
}
