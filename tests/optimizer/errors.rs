use unsga3::prelude::*;

use crate::test_functions::zdt1;
use crate::unit_dimensions;

#[derive(Debug)]
enum EvalError {
    SimulatorCrashed { generation: usize },
    Optimizer(Error),
}

impl From<Error> for EvalError {
    fn from(e: Error) -> Self {
        Self::Optimizer(e)
    }
}

#[test]
fn test_evaluator_error_propagates_unmodified() {
    let mut optimizer = Unsga3::builder()
        .dimensions(unit_dimensions(2))
        .num_objectives(2)
        .max_generations(10)
        .seed(1)
        .build(|population: &mut [Candidate], generation: usize| {
            if generation == 3 {
                return Err(EvalError::SimulatorCrashed { generation });
            }
            Ok(Evaluation::training(
                population.iter().map(|c| zdt1(&c.solution)).collect(),
            ))
        })
        .unwrap();

    match optimizer.run() {
        Err(EvalError::SimulatorCrashed { generation }) => assert_eq!(generation, 3),
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[test]
fn test_wrong_fitness_count_is_reported() {
    let mut optimizer = Unsga3::builder()
        .dimensions(unit_dimensions(1))
        .num_objectives(2)
        .build(|population: &mut [Candidate], _generation: usize| {
            Ok::<_, EvalError>(Evaluation::training(vec![
                vec![0.0, 1.0];
                population.len() - 1
            ]))
        })
        .unwrap();

    match optimizer.run() {
        Err(EvalError::Optimizer(Error::EvaluationCountMismatch { expected, got })) => {
            assert_eq!(expected, 8);
            assert_eq!(got, 7);
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[test]
fn test_wrong_objective_count_is_reported() {
    let mut optimizer = Unsga3::builder()
        .dimensions(unit_dimensions(1))
        .num_objectives(3)
        .build(|population: &mut [Candidate], _generation: usize| {
            Ok::<_, Error>(Evaluation::training(vec![vec![0.0, 1.0]; population.len()]))
        })
        .unwrap();

    assert!(matches!(
        optimizer.run(),
        Err(Error::ObjectiveDimensionMismatch {
            candidate: 0,
            expected: 3,
            got: 2
        })
    ));
}

#[test]
fn test_malformed_offspring_is_reported() {
    let mut optimizer = Unsga3::builder()
        .dimensions(unit_dimensions(2))
        .num_objectives(2)
        .max_generations(2)
        .variation(
            |_: &[Candidate], _: &[SolutionDimension], count: usize, _: &mut fastrand::Rng| {
                vec![vec![0.5]; count]
            },
        )
        .build(|population: &mut [Candidate], _generation: usize| {
            Ok::<_, Error>(Evaluation::training(
                population.iter().map(|c| zdt1(&c.solution)).collect(),
            ))
        })
        .unwrap();

    assert!(matches!(
        optimizer.run(),
        Err(Error::OffspringDimensionMismatch {
            index: 0,
            expected: 2,
            got: 1
        })
    ));
}

#[test]
fn test_error_messages() {
    let err = Error::EvaluationCountMismatch {
        expected: 8,
        got: 7,
    };
    assert_eq!(
        err.to_string(),
        "evaluation count mismatch: expected 8 fitness vectors, got 7"
    );
    assert_eq!(
        Error::InvalidIncrements(1).to_string(),
        "invalid reference point increments: 1 (need at least 2, the zero point included)"
    );
}
