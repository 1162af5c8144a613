//! End-to-end sampling runs against the shared fixture bank

use pathfault_bank::{Difficulty, ErrorType};
use pathfault_sampler::{
    apply_plan, build_plan, corrupt_pathway, errors_per_category, RngStreams, SamplerError,
};
use pathfault_test_utils::{complete_sample_bank, sample_steps};

#[test]
fn budget_plan_apply_chain() {
    let steps = sample_steps();
    let error_types = [ErrorType::WrongEntity, ErrorType::WrongDirection];

    let per_category = errors_per_category(0.5, steps.len(), error_types.len(), 1).unwrap();
    assert_eq!(per_category, 1);

    let plan = build_plan(
        &error_types,
        Difficulty::One,
        per_category,
        steps.len(),
        42,
        RngStreams::Shared,
    )
    .unwrap();
    assert_eq!(plan.len(), 2);

    let bank = complete_sample_bank();
    let view = bank.for_pathway("sample");
    let (modified, applied) = apply_plan(&steps, &view, &plan, 42).unwrap();

    // Replace-only bank entries for these two categories: length preserved.
    assert_eq!(modified.len(), steps.len());
    assert_eq!(applied.len(), 2);
    assert!(applied
        .windows(2)
        .all(|w| w[0].corrupted_step_index <= w[1].corrupted_step_index));
    for row in &applied {
        assert_eq!(row.sampling_seed, 42);
        assert!(row.original_ref_step_index.is_some());
    }
}

#[test]
fn insert_heavy_run_grows_pathway() {
    let steps = sample_steps();
    let bank = complete_sample_bank();
    let view = bank.for_pathway("sample");

    let (modified, applied) = corrupt_pathway(
        &steps,
        &view,
        &[ErrorType::AddUnsupportedStep],
        Difficulty::Two,
        3,
        7,
        RngStreams::Shared,
    )
    .unwrap();

    // Three insert_after entries: output length = input length + 3.
    assert_eq!(modified.len(), steps.len() + 3);
    assert_eq!(applied.len(), 3);
    assert!(applied.iter().all(|r| r.original_ref_step_index.is_none()));
    // Every reference step survives, in order.
    let surviving: Vec<&String> = modified
        .iter()
        .filter(|s| steps.contains(s))
        .collect();
    assert_eq!(surviving.len(), steps.len());
}

#[test]
fn mixed_run_is_reproducible() {
    let steps = sample_steps();
    let bank = complete_sample_bank();
    let view = bank.for_pathway("sample");
    let error_types = ErrorType::ALL;

    let run = |seed| {
        corrupt_pathway(
            &steps,
            &view,
            &error_types,
            Difficulty::One,
            1,
            seed,
            RngStreams::Shared,
        )
        .unwrap()
    };

    let (first_steps, first_meta) = run(11);
    let (second_steps, second_meta) = run(11);
    assert_eq!(first_steps, second_steps);
    assert_eq!(first_meta, second_meta);
}

#[test]
fn over_budget_run_fails_before_touching_bank() {
    let steps = sample_steps();
    let bank = complete_sample_bank();
    let view = bank.for_pathway("sample");

    let err = corrupt_pathway(
        &steps,
        &view,
        &[ErrorType::WrongEntity, ErrorType::WrongDirection],
        Difficulty::One,
        3,
        1,
        RngStreams::Shared,
    )
    .unwrap_err();
    assert!(matches!(err, SamplerError::OverBudget { requested: 6, available: 3 }));
}

#[test]
fn unknown_pathway_view_fails_with_corruption_not_found() {
    let steps = sample_steps();
    let bank = complete_sample_bank();
    let view = bank.for_pathway("not-a-pathway");

    let err = corrupt_pathway(
        &steps,
        &view,
        &[ErrorType::WrongEntity],
        Difficulty::One,
        1,
        5,
        RngStreams::Shared,
    )
    .unwrap_err();
    assert!(matches!(err, SamplerError::CorruptionNotFound { .. }));
}
