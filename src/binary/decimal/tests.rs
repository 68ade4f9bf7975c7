use super::Decimal;

#[test]
fn display_places_decimal_point_by_scale() {
	assert_eq!(Decimal::new(1234, 2).expect("valid").to_string(), "12.34");
	assert_eq!(Decimal::new(-5, 3).expect("valid").to_string(), "-0.005");
	assert_eq!(Decimal::new(42, 0).expect("valid").to_string(), "42");
	assert_eq!(Decimal::ZERO.to_string(), "0");
}

#[test]
fn scale_above_28_is_rejected() {
	assert!(Decimal::new(1, 28).is_some());
	assert!(Decimal::new(1, 29).is_none());
}

#[test]
fn mantissa_limited_to_96_bits() {
	assert!(Decimal::new(Decimal::MAX_MANTISSA, 0).is_some());
	assert!(Decimal::new(-Decimal::MAX_MANTISSA, 0).is_some());
	assert!(Decimal::new(Decimal::MAX_MANTISSA + 1, 0).is_none());
}

#[test]
fn to_f64_applies_scale() {
	let value = Decimal::new(-250, 2).expect("valid");
	assert!(value.is_negative());
	assert!((value.to_f64() + 2.5).abs() < f64::EPSILON);
}
