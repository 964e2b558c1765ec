use unsga3::prelude::*;

use crate::test_functions::zdt1;
use crate::unit_dimensions;

/// Training follows ZDT1; validation reverses the first objective, so good
/// training candidates tend to validate badly.
fn train_and_validate(
    population: &mut [Candidate],
    _generation: usize,
) -> Result<Evaluation> {
    let training: Vec<Vec<f64>> = population.iter().map(|c| zdt1(&c.solution)).collect();
    let validation = training.iter().map(|f| vec![1.0 - f[0], f[1]]).collect();
    Ok(Evaluation::with_validation(training, validation))
}

#[test]
fn test_validation_ranks_are_stamped() {
    let mut optimizer = Unsga3::builder()
        .dimensions(unit_dimensions(3))
        .num_objectives(2)
        .max_generations(5)
        .seed(10)
        .build(train_and_validate)
        .unwrap();

    let result = optimizer.run().unwrap();
    for c in &result.population {
        assert!(c.validation_fitness.is_scored());
        assert!(c.validation_rank.is_some());
        assert!(c.overfit.is_some());
        assert_eq!(c.fitness, c.training_fitness);
    }
}

#[test]
fn test_training_only_leaves_validation_unset() {
    let mut optimizer = Unsga3::builder()
        .dimensions(unit_dimensions(2))
        .num_objectives(2)
        .max_generations(3)
        .seed(10)
        .build(|population: &mut [Candidate], _generation: usize| {
            Ok::<_, Error>(Evaluation::training(
                population.iter().map(|c| zdt1(&c.solution)).collect(),
            ))
        })
        .unwrap();

    let result = optimizer.run().unwrap();
    for c in &result.population {
        assert!(c.validation_fitness.is_empty());
        assert_eq!(c.validation_rank, None);
        assert_eq!(c.overfit, None);
    }
}

#[test]
fn test_overfit_flags_follow_diagnostic() {
    let mut optimizer = Unsga3::builder()
        .dimensions(unit_dimensions(3))
        .num_objectives(2)
        .max_generations(4)
        .overfit_diagnostic(RankDivergence { tolerance: 1 })
        .seed(12)
        .build(train_and_validate)
        .unwrap();

    let result = optimizer.run().unwrap();
    let diagnostic = RankDivergence { tolerance: 1 };
    for c in &result.population {
        assert_eq!(c.overfit, Some(diagnostic.is_overfit(c)));
    }
}

#[test]
fn test_custom_overfit_diagnostic() {
    let mut optimizer = Unsga3::builder()
        .dimensions(unit_dimensions(2))
        .num_objectives(2)
        .max_generations(2)
        .overfit_diagnostic(|c: &Candidate| c.validation_rank != Some(c.rank))
        .seed(13)
        .build(train_and_validate)
        .unwrap();

    let result = optimizer.run().unwrap();
    for c in &result.population {
        assert_eq!(c.overfit, Some(c.validation_rank != Some(c.rank)));
    }
}

#[test]
fn test_rank_on_validation_fitness() {
    let mut optimizer = Unsga3::builder()
        .dimensions(unit_dimensions(3))
        .num_objectives(2)
        .max_generations(4)
        .fitness_source(FitnessSource::Validation)
        .seed(14)
        .build(train_and_validate)
        .unwrap();

    let result = optimizer.run().unwrap();
    for c in &result.population {
        assert_eq!(c.fitness, c.validation_fitness);
        // Ranked on validation, so both sorts agree.
        assert_eq!(c.validation_rank, Some(c.rank));
        assert_eq!(c.overfit, Some(false));
    }
}

#[test]
fn test_validation_source_without_validation_fitness_fails() {
    let mut optimizer = Unsga3::builder()
        .dimensions(unit_dimensions(2))
        .num_objectives(2)
        .fitness_source(FitnessSource::Validation)
        .build(|population: &mut [Candidate], _generation: usize| {
            Ok::<_, Error>(Evaluation::training(
                population.iter().map(|c| zdt1(&c.solution)).collect(),
            ))
        })
        .unwrap();

    assert!(matches!(
        optimizer.run(),
        Err(Error::MissingFitness { index: 0, .. })
    ));
}
