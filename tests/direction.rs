use proptest::prelude::*;
use quantmc::solver::*;

fn direction_strategy() -> impl Strategy<Value = OptimizationDirection> {
    prop_oneof![
        Just(OptimizationDirection::Minimize),
        Just(OptimizationDirection::Maximize)
    ]
}

proptest! {
    #[test]
    fn invert_is_an_involution(d in direction_strategy()) {
        prop_assert_ne!(d.invert(), d);
        prop_assert_eq!(d.invert().invert(), d);
        prop_assert_eq!(!d, d.invert());
        prop_assert_eq!(d.is_minimize(), !d.is_maximize());
    }

    #[test]
    fn conversion_round_trip(d in direction_strategy()) {
        let setting = OptimizationDirectionSetting::from(d);
        prop_assert!(setting.is_set());
        prop_assert_eq!(OptimizationDirection::from(setting), d);
        prop_assert_eq!(setting.direction(), d);
        prop_assert_eq!(setting.invert().direction(), d.invert());
    }

    #[test]
    fn display_parses_back(d in direction_strategy()) {
        let s = d.to_string();
        prop_assert_eq!(s.parse::<OptimizationDirection>().unwrap(), d);
        prop_assert_eq!(s.to_uppercase().parse::<OptimizationDirection>().unwrap(), d);
    }

    #[test]
    fn best_agrees_with_improves(d in direction_strategy(), a in -10.0f64..10.0, b in -10.0f64..10.0) {
        let best = d.best(a, b);
        prop_assert!(!d.improves(a, best) && !d.improves(b, best));
    }
}

#[test]
fn test_direction_display() {
    assert_eq!(OptimizationDirection::Minimize.to_string(), "Minimize");
    assert_eq!(OptimizationDirection::Maximize.to_string(), "Maximize");
    assert_eq!(OptimizationDirectionSetting::Unset.to_string(), "Unset");
    assert_eq!(" max ".parse::<OptimizationDirection>(), Ok(OptimizationDirection::Maximize));
    assert!("sideways".parse::<OptimizationDirection>().is_err());
}

#[test]
fn test_unset_setting() {
    let unset = OptimizationDirectionSetting::default();
    assert!(!unset.is_set());
    assert_eq!(unset.try_direction(), None);
    assert_eq!(unset.invert(), OptimizationDirectionSetting::Unset);
}

#[test]
#[should_panic]
fn test_unset_conversion_panics() {
    let _ = OptimizationDirection::from(OptimizationDirectionSetting::Unset);
}
