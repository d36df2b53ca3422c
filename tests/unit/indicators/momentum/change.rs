use sigscan::indicators::momentum::calculate_price_change;

#[test]
fn test_price_change_one_candle() {
    let change = calculate_price_change(&[90.0, 100.0, 110.0], 1);
    assert!((change - 10.0).abs() < 1e-9);
}

#[test]
fn test_price_change_longer_lookback() {
    let change = calculate_price_change(&[50.0, 100.0, 110.0, 75.0], 3);
    assert!((change - 50.0).abs() < 1e-9);
}

#[test]
fn test_price_change_too_short() {
    assert_eq!(calculate_price_change(&[100.0, 110.0], 2), 0.0);
    assert_eq!(calculate_price_change(&[100.0, 110.0], 0), 0.0);
}
