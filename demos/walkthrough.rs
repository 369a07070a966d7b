//! # OLS Toolkit Walkthrough
//!
//! From a table with a categorical predictor and missing values, through the
//! summary and diagnostics, to predictions with intervals. Ends with the R²
//! inflation demonstration on pure noise.
//!
//! Run with: `cargo run --example walkthrough`

use ols_toolkit::core::{IntervalType, ModelSpec, ObservationTable};
use ols_toolkit::design::DesignMatrixBuilder;
use ols_toolkit::diagnostics::RegressionDiagnostics;
use ols_toolkit::simulation::InflationStudy;
use ols_toolkit::solvers::OlsRegressor;
use ols_toolkit::synthetic::{GeneratingParams, NoiseModel, SyntheticGenerator};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== OLS Toolkit Walkthrough ===\n");

    table_model()?;
    synthetic_noise_models()?;
    r_squared_inflation()?;
    Ok(())
}

/// Income on centered age and group membership, with two incomplete rows.
fn table_model() -> Result<(), Box<dyn std::error::Error>> {
    println!("--- Table Model ---\n");

    let age = [23.0, 35.0, 41.0, 29.0, 52.0, 47.0, 33.0, 38.0, 61.0, 27.0, 44.0, 56.0];
    let income = [
        Some(31.2),
        Some(44.8),
        Some(52.1),
        None,
        Some(60.3),
        Some(58.9),
        Some(40.2),
        Some(47.5),
        Some(69.0),
        Some(33.8),
        Some(55.1),
        Some(66.4),
    ];
    let group = [
        Some("White"),
        Some("Black"),
        Some("Hispanic"),
        Some("Other"),
        Some("White"),
        None,
        Some("Black"),
        Some("Other"),
        Some("Hispanic"),
        Some("White"),
        Some("Black"),
        Some("Other"),
    ];

    let table = ObservationTable::builder()
        .numeric("income", income.to_vec())
        .numeric_complete("age", &age)
        .categorical("group", group.to_vec())
        .build()?;

    let spec = ModelSpec::builder("income")
        .centered("age")
        .categorical("group")
        .build()?;

    let design = DesignMatrixBuilder::new(&spec).build(&table)?;
    println!(
        "Kept {} of {} rows ({} dropped)",
        design.n_rows(),
        table.n_rows(),
        design.dropped_rows()
    );
    for dropped in &design.na_info.dropped {
        println!("  row {} dropped: missing {}", dropped.row, dropped.column);
    }
    println!(
        "Age centered at {:.2}; reference group: {}",
        design.schema.center_of("age").unwrap_or(0.0),
        design.schema.reference_level("group").unwrap_or("-")
    );

    let fitted = OlsRegressor::default().fit_design(&design)?;
    let summary = fitted.summary()?;

    println!("\n{:<18} {:>10} {:>10} {:>8} {:>10}", "term", "estimate", "std.err", "t", "p");
    for c in &summary.coefficients {
        println!(
            "{:<18} {:>10.4} {:>10.4} {:>8.2} {:>10.4}",
            c.name, c.estimate, c.std_error, c.t_statistic, c.p_value
        );
    }
    println!("\nR² = {:.4}, adjusted R² = {:.4}", summary.r_squared, summary.adj_r_squared);
    if let Some(f) = summary.f_statistic {
        println!(
            "F = {:.3} on ({}, {}) df, p = {:.4}",
            f.value, f.df_model, f.df_residual, f.p_value
        );
    }
    println!("AIC = {:.3}, BIC = {:.3}", summary.aic, summary.bic);

    let diagnostics = RegressionDiagnostics::from_fit(&fitted, &design.x)?;
    println!("High leverage rows: {:?}", diagnostics.high_leverage());
    println!("Influential rows (Cook's D > 4/n): {:?}", diagnostics.influential());

    let new_rows = ObservationTable::builder()
        .numeric_complete("age", &[30.0, 50.0])
        .categorical("group", vec![Some("Black"), Some("White")])
        .build()?;
    let predictions = fitted.predictor(&design.schema)?.predict_with_interval(
        &new_rows,
        IntervalType::Prediction,
        0.95,
    )?;

    println!("\nPredictions (95% prediction intervals):");
    if let (Some(lower), Some(upper)) = (predictions.lower(), predictions.upper()) {
        for i in 0..predictions.len() {
            println!(
                "  {:.2}  [{:.2}, {:.2}]",
                predictions.fit[i], lower[i], upper[i]
            );
        }
    }
    println!();
    Ok(())
}

/// The same draws under the three noise models.
fn synthetic_noise_models() -> Result<(), Box<dyn std::error::Error>> {
    println!("--- Synthetic Data ---\n");

    let noise_models = [
        ("constant", NoiseModel::Constant { sd: 1.0 }),
        ("proportional", NoiseModel::ProportionalVariance { sd: 1.0 }),
        ("nonlinear", NoiseModel::NonlinearMean { sd: 1.0, curvature: 0.3 }),
    ];

    for (label, noise) in noise_models {
        let params = GeneratingParams {
            n: 200,
            intercept: 2.0,
            slope: 3.0,
            noise,
            x_range: (0.0, 10.0),
            seed: 2024,
        };
        let data = SyntheticGenerator::new(params).generate()?;
        let table = data.to_table()?;
        let spec = ModelSpec::builder("y").numeric("x").build()?;

        let design = DesignMatrixBuilder::new(&spec).build(&table)?;
        let fitted = OlsRegressor::default().fit_design(&design)?;
        let summary = fitted.summary()?;

        let slope = summary.coefficient("x").map_or(f64::NAN, |c| c.estimate);
        println!(
            "{:<13} slope = {:.3}, R² = {:.3}, RSE = {:.3}",
            label, slope, summary.r_squared, summary.residual_std_error
        );
    }
    println!();
    Ok(())
}

/// R² climbs with every irrelevant column; adjusted R² does not.
fn r_squared_inflation() -> Result<(), Box<dyn std::error::Error>> {
    println!("--- R² Inflation ---\n");

    let points = InflationStudy::default().run()?;
    println!("{:>10} {:>10} {:>12}", "k", "R²", "adjusted R²");
    for p in points {
        println!(
            "{:>10} {:>10.4} {:>12.4}",
            p.n_predictors, p.r_squared, p.adj_r_squared
        );
    }
    Ok(())
}
