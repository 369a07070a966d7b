//! Design matrix construction tests.

mod common;

use approx::assert_relative_eq;
use ols_toolkit::core::{ModelSpec, NaAction, NaError, ObservationTable};
use ols_toolkit::design::{DesignMatrixBuilder, PredictorEncoding, SchemaError};
use ols_toolkit::solvers::{FittedRegressor, OlsRegressor, RegressionError};

fn groups(levels: &[&str]) -> Vec<Option<String>> {
    levels.iter().map(|l| Some(l.to_string())).collect()
}

// ============================================================================
// Categorical Encoding
// ============================================================================

#[test]
fn test_reference_level_is_first_sorted() {
    // Presented in a scrambled order; the reference is always "Black"
    let orders: [&[&str]; 3] = [
        &["White", "Hispanic", "Other", "Black", "White", "Other"],
        &["Other", "Black", "White", "Hispanic", "Black", "Hispanic"],
        &["Hispanic", "Other", "White", "Black", "Other", "White"],
    ];

    for order in orders {
        let table = ObservationTable::builder()
            .numeric_complete("y", &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0])
            .categorical("race", groups(order))
            .build()
            .unwrap();
        let spec = ModelSpec::builder("y").categorical("race").build().unwrap();

        let design = DesignMatrixBuilder::new(&spec).build(&table).unwrap();

        assert_eq!(design.schema.reference_level("race"), Some("Black"));
        assert_eq!(design.n_columns(), 4);
        assert_eq!(
            design.column_names(),
            &["(Intercept)", "race[Hispanic]", "race[Other]", "race[White]"]
        );
    }
}

#[test]
fn test_indicator_values() {
    let table = common::survey_table();
    let spec = ModelSpec::builder("income").categorical("group").build().unwrap();
    let design = DesignMatrixBuilder::new(&spec).build(&table).unwrap();

    let column = table.column("group").unwrap();
    for i in 0..design.n_rows() {
        let level = match column.value(i) {
            ols_toolkit::core::Value::Categorical(level) => level,
            other => panic!("unexpected value {other:?}"),
        };
        let expected = [
            (level == "Hispanic") as u8 as f64,
            (level == "Other") as u8 as f64,
            (level == "White") as u8 as f64,
        ];
        for (k, &v) in expected.iter().enumerate() {
            assert_eq!(design.x[(i, k + 1)], v);
        }
    }
}

#[test]
fn test_categorical_without_intercept_keeps_k_minus_one() {
    let table = common::survey_table();
    let spec = ModelSpec::builder("income")
        .numeric("age")
        .categorical("group")
        .with_intercept(false)
        .build()
        .unwrap();

    let design = DesignMatrixBuilder::new(&spec).build(&table).unwrap();
    assert_eq!(design.column_names(), &["age", "group[Hispanic]", "group[Other]", "group[White]"]);
}

#[test]
fn test_levels_come_from_retained_rows() {
    // "Z" only appears in a row with a missing response
    let table = ObservationTable::builder()
        .numeric("y", vec![Some(1.0), Some(2.0), None, Some(4.0), Some(3.0)])
        .categorical("g", groups(&["a", "b", "Z", "a", "b"]))
        .build()
        .unwrap();
    let spec = ModelSpec::builder("y").categorical("g").build().unwrap();

    let design = DesignMatrixBuilder::new(&spec).build(&table).unwrap();
    match &design.schema.predictors()[0].encoding {
        PredictorEncoding::Categorical { reference, levels } => {
            assert_eq!(reference, "a");
            assert_eq!(levels, &["b"]);
        }
        other => panic!("expected categorical encoding, got {other:?}"),
    }
}

// ============================================================================
// Centering
// ============================================================================

#[test]
fn test_centering_records_mean() {
    let table = common::survey_table();
    let spec = ModelSpec::builder("income").centered("age").build().unwrap();
    let design = DesignMatrixBuilder::new(&spec).build(&table).unwrap();

    let mean_age = [23.0, 35.0, 41.0, 29.0, 52.0, 47.0, 33.0, 38.0, 61.0, 27.0, 44.0, 56.0]
        .iter()
        .sum::<f64>()
        / 12.0;
    assert_relative_eq!(design.schema.center_of("age").unwrap(), mean_age, epsilon = 1e-12);

    let column_sum: f64 = (0..design.n_rows()).map(|i| design.x[(i, 1)]).sum();
    assert_relative_eq!(column_sum, 0.0, epsilon = 1e-9);
}

#[test]
fn test_centering_changes_only_intercept() {
    for seed in [1, 2, 3] {
        let (x, y) = common::synthetic_line(40, 1.5, -0.7, 2.0, seed);
        let table = ObservationTable::builder()
            .numeric_complete("x", &x)
            .numeric_complete("y", &y)
            .build()
            .unwrap();

        let raw = ModelSpec::builder("y").numeric("x").build().unwrap();
        let centered = ModelSpec::builder("y").centered("x").build().unwrap();

        let (raw_fit, _) = OlsRegressor::default().fit_table(&table, &raw).unwrap();
        let (centered_fit, schema) = OlsRegressor::default().fit_table(&table, &centered).unwrap();

        let slope = raw_fit.coefficients()[1];
        assert_relative_eq!(centered_fit.coefficients()[1], slope, epsilon = 1e-9);

        // intercept moves by slope * mean(x)
        let mean_x = schema.center_of("x").unwrap();
        assert_relative_eq!(
            centered_fit.coefficients()[0],
            raw_fit.coefficients()[0] + slope * mean_x,
            epsilon = 1e-9
        );
        for i in 0..x.len() {
            assert_relative_eq!(
                centered_fit.result().fitted_values[i],
                raw_fit.result().fitted_values[i],
                epsilon = 1e-9
            );
        }
    }
}

#[test]
fn test_centering_uses_retained_rows_only() {
    let table = ObservationTable::builder()
        .numeric("y", vec![Some(1.0), None, Some(3.0), Some(5.0)])
        .numeric("x", vec![Some(1.0), Some(100.0), Some(2.0), Some(3.0)])
        .build()
        .unwrap();
    let spec = ModelSpec::builder("y").centered("x").build().unwrap();

    let design = DesignMatrixBuilder::new(&spec).build(&table).unwrap();
    assert_relative_eq!(design.schema.center_of("x").unwrap(), 2.0);
}

// ============================================================================
// Missing Values
// ============================================================================

#[test]
fn test_dropped_rows_are_reported() {
    let table = ObservationTable::builder()
        .numeric("y", vec![Some(1.0), Some(2.0), None, Some(4.0), Some(5.0), Some(6.0)])
        .numeric("x", vec![Some(1.0), Some(f64::NAN), Some(3.0), Some(4.0), Some(5.0), Some(6.5)])
        .categorical("g", vec![Some("a"), Some("b"), Some("a"), None, Some("b"), Some("a")])
        .build()
        .unwrap();
    let spec = ModelSpec::builder("y").numeric("x").categorical("g").build().unwrap();

    let design = DesignMatrixBuilder::new(&spec).build(&table).unwrap();

    assert_eq!(design.dropped_rows(), 3);
    assert_eq!(design.n_rows(), 3);
    assert_eq!(design.na_info.kept_indices, vec![0, 4, 5]);

    let reasons: Vec<(usize, &str)> = design
        .na_info
        .dropped
        .iter()
        .map(|d| (d.row, d.column.as_str()))
        .collect();
    assert_eq!(reasons, vec![(1, "x"), (2, "y"), (3, "g")]);
}

#[test]
fn test_unused_columns_do_not_drop_rows() {
    let table = ObservationTable::builder()
        .numeric_complete("y", &[1.0, 2.0, 4.0, 3.0])
        .numeric_complete("x", &[1.0, 2.0, 3.0, 4.0])
        .numeric("unused", vec![None, None, Some(1.0), None])
        .build()
        .unwrap();
    let spec = ModelSpec::builder("y").numeric("x").build().unwrap();

    let design = DesignMatrixBuilder::new(&spec).build(&table).unwrap();
    assert_eq!(design.dropped_rows(), 0);
}

#[test]
fn test_fail_policy_rejects_missing() {
    let table = ObservationTable::builder()
        .numeric("y", vec![Some(1.0), None, Some(3.0), Some(2.0)])
        .numeric_complete("x", &[1.0, 2.0, 3.0, 4.0])
        .build()
        .unwrap();
    let spec = ModelSpec::builder("y").numeric("x").build().unwrap();

    let err = DesignMatrixBuilder::new(&spec)
        .na_action(NaAction::Fail)
        .build(&table)
        .unwrap_err();
    assert_eq!(
        err,
        RegressionError::MissingValues(NaError::MissingValues {
            n_rows: 1,
            first_row: 1,
            column: "y".to_string(),
        })
    );
}

#[test]
fn test_exclude_pads_residuals() {
    let table = ObservationTable::builder()
        .numeric("y", vec![Some(1.0), None, Some(3.1), Some(3.9), Some(5.2)])
        .numeric_complete("x", &[1.0, 2.0, 3.0, 4.0, 5.0])
        .build()
        .unwrap();
    let spec = ModelSpec::builder("y").numeric("x").build().unwrap();

    let (fitted, _) = OlsRegressor::builder()
        .na_action(NaAction::Exclude)
        .build()
        .fit_table(&table, &spec)
        .unwrap();
    let result = fitted.result();

    assert_eq!(result.residuals.nrows(), 4);
    assert_eq!(result.n_na_removed(), 1);
    let padded = result.residuals_expanded();
    assert_eq!(padded.nrows(), 5);
    assert!(padded[1].is_nan());
    assert_relative_eq!(padded[2], result.residuals[1]);
}

// ============================================================================
// Schema Errors
// ============================================================================

#[test]
fn test_unknown_predictor() {
    let table = common::survey_table();
    let spec = ModelSpec::builder("income").numeric("height").build().unwrap();

    assert_eq!(
        DesignMatrixBuilder::new(&spec).build(&table).unwrap_err(),
        RegressionError::Schema(SchemaError::UnknownColumn("height".to_string()))
    );
}

#[test]
fn test_unknown_response() {
    let table = common::survey_table();
    let spec = ModelSpec::builder("wealth").numeric("age").build().unwrap();

    assert!(matches!(
        DesignMatrixBuilder::new(&spec).build(&table),
        Err(RegressionError::Schema(SchemaError::UnknownColumn(_)))
    ));
}

#[test]
fn test_declared_kind_must_match() {
    let table = common::survey_table();
    let spec = ModelSpec::builder("income").numeric("group").build().unwrap();

    assert!(matches!(
        DesignMatrixBuilder::new(&spec).build(&table),
        Err(RegressionError::Schema(SchemaError::KindMismatch { .. }))
    ));
}

#[test]
fn test_categorical_response_rejected() {
    let table = common::survey_table();
    let spec = ModelSpec::builder("group").numeric("age").build().unwrap();

    assert!(matches!(
        DesignMatrixBuilder::new(&spec).build(&table),
        Err(RegressionError::Schema(SchemaError::NonNumericResponse(_)))
    ));
}

#[test]
fn test_spec_validation() {
    assert!(matches!(
        ModelSpec::builder("y").numeric("x").categorical("x").build(),
        Err(SchemaError::DuplicatePredictor(_))
    ));
    assert!(matches!(
        ModelSpec::builder("y").numeric("y").build(),
        Err(SchemaError::ResponseAsPredictor(_))
    ));
}

#[test]
fn test_empty_model() {
    let table = common::survey_table();
    let spec = ModelSpec::builder("income").with_intercept(false).build().unwrap();

    assert_eq!(
        DesignMatrixBuilder::new(&spec).build(&table).unwrap_err(),
        RegressionError::Schema(SchemaError::EmptyModel)
    );
}

#[test]
fn test_table_validation() {
    let mismatched = ObservationTable::builder()
        .numeric_complete("a", &[1.0, 2.0])
        .numeric_complete("b", &[1.0])
        .build();
    assert!(matches!(mismatched, Err(SchemaError::LengthMismatch { .. })));

    let duplicated = ObservationTable::builder()
        .numeric_complete("a", &[1.0])
        .numeric_complete("a", &[2.0])
        .build();
    assert!(matches!(duplicated, Err(SchemaError::DuplicateColumn(_))));
}

// ============================================================================
// Insufficient Data
// ============================================================================

#[test]
fn test_too_few_complete_rows() {
    let table = ObservationTable::builder()
        .numeric("y", vec![Some(1.0), None, Some(3.0), None])
        .numeric("x", vec![Some(1.0), Some(2.0), None, Some(4.0)])
        .numeric_complete("z", &[0.5, 1.5, 2.5, 3.5])
        .build()
        .unwrap();
    let spec = ModelSpec::builder("y").numeric("x").numeric("z").build().unwrap();

    assert_eq!(
        DesignMatrixBuilder::new(&spec).build(&table).unwrap_err(),
        RegressionError::InsufficientData {
            needed: 3,
            got: 1,
            dropped: 3,
        }
    );
}

#[test]
fn test_all_rows_dropped_without_intercept() {
    let table = ObservationTable::builder()
        .numeric("y", vec![Some(1.0), None, Some(3.0)])
        .categorical("g", vec![None, Some("a"), None])
        .build()
        .unwrap();
    let spec = ModelSpec::builder("y")
        .categorical("g")
        .with_intercept(false)
        .build()
        .unwrap();

    assert_eq!(
        DesignMatrixBuilder::new(&spec).build(&table).unwrap_err(),
        RegressionError::InsufficientData {
            needed: 1,
            got: 0,
            dropped: 3,
        }
    );
}
