//! Integration tests for the full composition workflow.

use braid_encoders::StandardScaler;
use braid_pipeline::features::{bag_of_words, columns, one_hot, seasonal};
use braid_pipeline::{CrossProduct, NamedTransformer, Pipeline, PipelineNode};
use braid_traits::TransformError;
use polars::df;
use polars::prelude::DataFrame;

fn training_frame() -> DataFrame {
    df!(
        "date" => [
            "2024-01-08", "2024-02-12", "2024-03-18", "2024-04-22",
            "2024-05-27", "2024-07-01", "2024-08-05", "2024-09-09",
            "2024-10-14", "2024-11-18", "2024-12-23", "2024-06-03",
            "2024-03-04", "2024-09-30",
        ],
        "weekday" => [
            "mon", "tue", "wed", "thu", "fri", "sat", "sun",
            "mon", "tue", "wed", "thu", "fri", "sat", "sun",
        ],
        "temperature" => [
            3.1, 4.5, 9.2, 14.0, 18.3, 24.1, 23.7, 19.5,
            13.2, 7.4, 2.8, 21.0, 8.8, 15.5,
        ],
        "note" => [
            "cold morning", "light rain", "clear sky", "warm breeze",
            "sunny day", "hot sunny day", "hot evening", "mild day",
            "windy day", "first frost", "cold snap", "summer heat",
            "wet morning", "calm clear day",
        ],
    )
    .unwrap()
}

#[test]
fn test_seasonal_times_weekday_width() {
    // Seasonal with 6 knots has width 5; weekday one-hot has width 7.
    let mut pipeline = seasonal("date", 6).cross_with(&one_hot(["weekday"]));
    let df = training_frame();
    let out = pipeline.fit_transform(&df).unwrap();
    assert_eq!(out.ncols(), 35);
    assert_eq!(out.nrows(), 14);

    let PipelineNode::Cross(cross) = pipeline.node() else {
        panic!("expected a cross node");
    };
    let marks = cross.split_marks().unwrap();
    assert_eq!(marks[0].width(), 5);
    assert_eq!(marks[1].width(), 7);
    assert_eq!(cross.output_width(), Some(35));
}

#[test]
fn test_seasonal_times_weekday_column_mapping() {
    // Product column k holds seasonal column k % 5 gated by weekday
    // column k / 5: on a row whose weekday is one-hot column j, the
    // columns for j reproduce the seasonal block and all others are zero.
    let df = training_frame();

    let mut seasonal_alone = seasonal("date", 6);
    let seasonal_out = seasonal_alone.fit_transform(&df).unwrap().to_dense();
    let mut weekday_alone = one_hot(["weekday"]);
    let weekday_out = weekday_alone.fit_transform(&df).unwrap().to_dense();

    let mut crossed = seasonal("date", 6).cross_with(&one_hot(["weekday"]));
    let out = crossed.fit_transform(&df).unwrap().to_dense();

    for row in 0..out.nrows() {
        for k in 0..out.ncols() {
            let expected = seasonal_out[[row, k % 5]] * weekday_out[[row, k / 5]];
            assert!(
                (out[[row, k]] - expected).abs() < 1e-12,
                "row {row}, column {k}"
            );
        }
    }
}

#[test]
fn test_union_then_scaler_workflow() {
    let a = columns(["temperature"]);
    let b = one_hot(["weekday"]);
    let mut pipeline = a.union_with(&b).then_apply(StandardScaler::new());

    let df = training_frame();
    let out = pipeline.fit_transform(&df).unwrap();
    assert_eq!(out.ncols(), 8);
    assert_eq!(out.nrows(), 14);

    // The union of a dense and a sparse block is sparse, and the scaler
    // keeps it that way.
    assert!(out.is_sparse());

    // The operands themselves were never fitted by the composition.
    assert!(matches!(
        b.transform(&df).unwrap_err(),
        TransformError::NotFitted(_)
    ));
}

#[test]
fn test_all_sparse_union_stays_sparse() {
    let mut pipeline = one_hot(["weekday"]).union_with(&bag_of_words("note"));
    let df = training_frame();
    let out = pipeline.fit_transform(&df).unwrap();
    assert!(out.is_sparse());
    assert_eq!(out.nrows(), 14);

    let fresh = pipeline.transform(&df).unwrap();
    assert_eq!(out, fresh);
}

#[test]
fn test_cross_product_transform_is_repeatable_on_new_data() {
    let df = training_frame();
    let mut pipeline = seasonal("date", 6).cross_with(&one_hot(["weekday"]));
    pipeline.fit(&df).unwrap();

    let holdout = df.slice(3, 5);
    let first = pipeline.transform(&holdout).unwrap();
    let second = pipeline.transform(&holdout).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.nrows(), 5);
    assert_eq!(first.ncols(), 35);
}

#[test]
fn test_direct_cross_product_equals_operator_form() {
    let df = training_frame();

    let mut via_algebra = columns(["temperature"]).cross_with(&one_hot(["weekday"]));
    let algebra_out = via_algebra.fit_transform(&df).unwrap();

    let mut direct = Pipeline::from(CrossProduct::new(vec![
        NamedTransformer::new("columns(temperature)", braid_encoders::SelectColumns::new(["temperature"])),
        NamedTransformer::new("one_hot(weekday)", braid_encoders::OneHotEncoder::new(["weekday"])),
    ]));
    let direct_out = direct.fit_transform(&df).unwrap();

    assert_eq!(algebra_out, direct_out);
}
