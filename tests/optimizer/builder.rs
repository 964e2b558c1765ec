use unsga3::prelude::*;

use crate::{evaluate_with, unit_dimensions};

fn zero_objectives(population: &mut [Candidate], _generation: usize) -> Result<Evaluation> {
    Ok(Evaluation::training(vec![vec![0.0, 0.0]; population.len()]))
}

#[test]
fn test_builder_defaults() {
    let optimizer = Unsga3::builder()
        .dimensions(unit_dimensions(2))
        .num_objectives(2)
        .build(zero_objectives)
        .unwrap();

    assert_eq!(optimizer.max_generations(), 100);
    assert_eq!(optimizer.num_objectives(), 2);
    assert_eq!(optimizer.dimensions().len(), 2);
    assert_eq!(optimizer.fitness_source(), FitnessSource::Training);
    // 2 objectives with 5 increments give 5 directions; rounded up to 8.
    assert_eq!(optimizer.reference_directions().len(), 5);
    assert_eq!(optimizer.reference_directions().increments(), 5);
    assert_eq!(optimizer.population_size(), 8);
}

#[test]
fn test_builder_explicit_population() {
    let optimizer = Unsga3::builder()
        .dimensions(unit_dimensions(1))
        .num_objectives(3)
        .population_size(10)
        .reference_point_increments(4)
        .max_generations(7)
        .build(evaluate_with(|x| vec![x[0], x[0], x[0]]))
        .unwrap();

    assert_eq!(optimizer.population_size(), 10);
    assert_eq!(optimizer.reference_directions().len(), 10);
    assert_eq!(optimizer.max_generations(), 7);
}

#[test]
fn test_builder_many_objectives() {
    let optimizer = Unsga3::builder()
        .dimensions(unit_dimensions(8))
        .num_objectives(6)
        .reference_point_increments(3)
        .build(zero_objectives)
        .unwrap();

    // C(2 + 5, 5) = 21 directions -> 24 candidates
    assert_eq!(optimizer.reference_directions().len(), 21);
    assert_eq!(optimizer.population_size(), 24);
    assert!(
        optimizer
            .reference_directions()
            .iter()
            .all(|d| d.len() == 6 && (d.iter().sum::<f64>() - 1.0).abs() < 1e-12)
    );
}

#[test]
fn test_builder_rejects_empty_dimensions() {
    let result = Unsga3::builder().num_objectives(2).build(zero_objectives);
    assert!(matches!(result, Err(Error::EmptySolutionDimensions)));
}

#[test]
fn test_builder_requires_objective_count() {
    let result = Unsga3::builder()
        .dimensions(unit_dimensions(1))
        .build(zero_objectives);
    assert!(matches!(result, Err(Error::InvalidObjectiveCount(0))));
}

#[test]
fn test_builder_rejects_bad_increments() {
    for increments in [0, 1] {
        let result = Unsga3::builder()
            .dimensions(unit_dimensions(1))
            .num_objectives(2)
            .reference_point_increments(increments)
            .build(zero_objectives);
        assert!(matches!(result, Err(Error::InvalidIncrements(i)) if i == increments));
    }
}

#[test]
fn test_builder_rejects_zero_population_and_generations() {
    let result = Unsga3::builder()
        .dimensions(unit_dimensions(1))
        .num_objectives(2)
        .population_size(0)
        .build(zero_objectives);
    assert!(matches!(result, Err(Error::InvalidPopulationSize(0))));

    let result = Unsga3::builder()
        .dimensions(unit_dimensions(1))
        .num_objectives(2)
        .max_generations(0)
        .build(zero_objectives);
    assert!(matches!(result, Err(Error::InvalidMaxGenerations(0))));
}

#[test]
fn test_builder_rejects_bad_crossover_prob() {
    let result = Unsga3::builder()
        .dimensions(unit_dimensions(1))
        .num_objectives(2)
        .crossover_prob(-0.1)
        .build(zero_objectives);
    assert!(matches!(result, Err(Error::InvalidProbability(_))));
}

#[test]
fn test_builder_rejects_bad_distribution_index() {
    let result = Unsga3::builder()
        .dimensions(unit_dimensions(1))
        .num_objectives(2)
        .crossover_eta(-1.0)
        .build(zero_objectives);
    assert!(matches!(result, Err(Error::InvalidDistributionIndex(_))));

    let result = Unsga3::builder()
        .dimensions(unit_dimensions(1))
        .num_objectives(2)
        .mutation_eta(f64::INFINITY)
        .build(zero_objectives);
    assert!(matches!(result, Err(Error::InvalidDistributionIndex(_))));
}

#[test]
fn test_builder_default_matches_builder_fn() {
    let a = Unsga3Builder::default()
        .dimensions(unit_dimensions(1))
        .num_objectives(3)
        .build(zero_objectives)
        .unwrap();
    let b = Unsga3::builder()
        .dimensions(unit_dimensions(1))
        .num_objectives(3)
        .build(zero_objectives)
        .unwrap();
    assert_eq!(a.population_size(), b.population_size());
    assert_eq!(a.reference_directions(), b.reference_directions());
}
