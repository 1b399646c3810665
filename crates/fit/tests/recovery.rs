use epicurves_fit::{FitError, fit_exponential, project};

#[test]
fn recovers_parameters_from_exact_exponential() {
    let offsets = [0, 5, 10, 15];
    let values: Vec<f64> = offsets
        .iter()
        .map(|&t| 10.0 * (0.1 * t as f64).exp())
        .collect();

    let fit = fit_exponential(&offsets, &values).unwrap();
    assert!((fit.a - 10.0).abs() < 1e-3, "a = {}", fit.a);
    assert!((fit.b - 0.1).abs() < 1e-3, "b = {}", fit.b);

    let expected_doubling = std::f64::consts::LN_2 / 0.1;
    assert!(
        (fit.doubling_time() - expected_doubling).abs() < 0.01,
        "doubling time = {}",
        fit.doubling_time()
    );
}

#[test]
fn recovers_doubling_every_five_days() {
    // 100 -> 200 -> 400 over two 5-day steps: doubling time 5 days.
    let offsets = [-10, -5, 0];
    let values = [100.0, 200.0, 400.0];

    let p = project(&offsets, &values, 10).unwrap();
    assert!(
        (p.fit.doubling_time() - 5.0).abs() < 0.01,
        "doubling time = {}",
        p.fit.doubling_time()
    );

    // Two more doublings by offset +10.
    let at_10 = p
        .offsets
        .iter()
        .position(|&t| t == 10)
        .map(|i| p.values[i])
        .unwrap();
    assert!((at_10 - 1600.0).abs() / 1600.0 < 0.01, "value = {at_10}");
}

#[test]
fn noisy_data_still_recovers_the_trend() {
    // Exact curve a=20, b=0.15 with small multiplicative perturbations.
    let offsets: Vec<i32> = (0..12).map(|i| i * 2).collect();
    let wobble = [1.02, 0.97, 1.01, 0.99, 1.03, 0.98, 1.0, 1.02, 0.97, 1.01, 0.99, 1.0];
    let values: Vec<f64> = offsets
        .iter()
        .zip(&wobble)
        .map(|(&t, &w)| 20.0 * (0.15 * t as f64).exp() * w)
        .collect();

    let fit = fit_exponential(&offsets, &values).unwrap();
    assert!((fit.b - 0.15).abs() < 0.01, "b = {}", fit.b);
}

#[test]
fn horizon_axis_matches_specified_union() {
    let offsets = [0, 5, 10];
    let values: Vec<f64> = offsets
        .iter()
        .map(|&t| 10.0 * (0.1 * t as f64).exp())
        .collect();
    let p = project(&offsets, &values, 20).unwrap();
    assert_eq!(p.offsets, (0..=20).collect::<Vec<i32>>());
}

#[test]
fn two_points_suffice_one_does_not() {
    assert!(fit_exponential(&[0, 5], &[10.0, 20.0]).is_ok());
    assert!(matches!(
        fit_exponential(&[0], &[10.0]),
        Err(FitError::InsufficientData { .. })
    ));
}
