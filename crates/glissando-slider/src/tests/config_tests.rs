use super::*;

#[test]
fn defaults_are_enumerated_in_one_place() {
    let config = SliderConfig::default();
    assert_eq!((config.min, config.max, config.step), (0.0, 100.0, 1.0));
    assert_eq!(config.width, None);
    assert_eq!(config.thumb_radius, 4.0);
    assert_eq!(config.track_size, 2.0);
    assert_eq!(config.thumb_tint_color, Color::WHITE);
    assert_eq!(Some(config.lower_track_color), Color::from_hex("#448aff"));
    assert_eq!(Some(config.upper_track_color), Color::from_hex("#616161"));
    assert!(!config.disabled);
    assert_eq!(config.touch_scale, 1.6);
    assert_eq!(config.hit_slop, 16.0);
    assert!(!config.haptic_feedback);
    assert!(config.validate().is_ok());
}

#[test]
fn zero_or_negative_step_is_rejected() {
    let err = SliderConfig::default().with_step(0.0).validate().unwrap_err();
    assert_eq!(err, ConfigurationError::NonPositiveStep { step: 0.0 });

    let err = Domain::new(0.0, 10.0, -1.0).unwrap_err();
    assert_eq!(err, ConfigurationError::NonPositiveStep { step: -1.0 });
}

#[test]
fn inverted_or_empty_range_is_rejected() {
    let err = SliderConfig::default().with_range(5.0, 5.0).validate().unwrap_err();
    assert_eq!(err, ConfigurationError::EmptyRange { min: 5.0, max: 5.0 });
    assert!(Domain::new(10.0, 0.0, 1.0).is_err());
}

#[test]
fn non_finite_fields_are_rejected() {
    let err = SliderConfig::default().with_range(0.0, f64::INFINITY).validate().unwrap_err();
    assert!(matches!(err, ConfigurationError::NonFinite { field: "max", .. }));

    let err = SliderConfig::default().with_width(f64::NAN).validate().unwrap_err();
    assert!(matches!(err, ConfigurationError::NonFinite { field: "width", .. }));
}

#[test]
fn negative_dimensions_and_bad_touch_scale_are_rejected() {
    let err = SliderConfig::default().with_hit_slop(-1.0).validate().unwrap_err();
    assert_eq!(
        err,
        ConfigurationError::NegativeDimension {
            field: "hit_slop",
            value: -1.0
        }
    );

    let err = SliderConfig::default().with_touch_scale(0.0).validate().unwrap_err();
    assert_eq!(err, ConfigurationError::InvalidTouchScale { value: 0.0 });
}

#[test]
fn errors_render_readable_messages() {
    let err = ConfigurationError::NonPositiveStep { step: 0.0 };
    assert_eq!(err.to_string(), "step must be greater than zero, got 0");
    let err = ConfigurationError::EmptyRange { min: 3.0, max: 1.0 };
    assert_eq!(err.to_string(), "min (3) must be less than max (1)");
}

#[test]
fn configs_compare_structurally() {
    let a = SliderConfig::default().with_width(200.0);
    let b = SliderConfig::default().with_width(200.0);
    assert_eq!(a, b);
    assert_ne!(a, b.clone().with_disabled(true));
}

#[test]
fn springs_that_cannot_settle_are_rejected() {
    let undamped = SliderConfig::default().with_spring(SpringSpec::new(150.0, 0.0));
    assert_eq!(
        undamped.validate().unwrap_err(),
        ConfigurationError::InvalidSpring {
            field: "damping",
            value: 0.0
        }
    );

    let err = SliderConfig::default()
        .with_spring(SpringSpec::new(f64::NAN, 15.0))
        .validate()
        .unwrap_err();
    assert!(matches!(err, ConfigurationError::InvalidSpring { field: "stiffness", .. }));

    let err = SliderConfig::default()
        .with_spring(SpringSpec::default().with_mass(0.0))
        .validate()
        .unwrap_err();
    assert!(matches!(err, ConfigurationError::InvalidSpring { field: "mass", .. }));

    let negative = SpringSpec {
        damping: -2.0,
        ..SpringSpec::default()
    };
    let err = SliderConfig::default().with_spring(negative).validate().unwrap_err();
    assert!(matches!(err, ConfigurationError::InvalidSpring { field: "damping", .. }));

    let no_rest = SpringSpec {
        rest_speed_threshold: 0.0,
        ..SpringSpec::default()
    };
    let err = SliderConfig::default().with_spring(no_rest).validate().unwrap_err();
    assert!(matches!(
        err,
        ConfigurationError::InvalidSpring {
            field: "rest_speed_threshold",
            ..
        }
    ));

    let no_rest = SpringSpec {
        rest_displacement_threshold: f64::INFINITY,
        ..SpringSpec::default()
    };
    let err = SliderConfig::default().with_spring(no_rest).validate().unwrap_err();
    assert!(matches!(
        err,
        ConfigurationError::InvalidSpring {
            field: "rest_displacement_threshold",
            ..
        }
    ));

    let heavy = SliderConfig::default().with_spring(SpringSpec::new(300.0, 30.0).with_mass(2.0));
    assert!(heavy.validate().is_ok());
}

#[test]
fn domain_validates_the_whole_config() {
    let config = SliderConfig::default().with_touch_scale(-1.0);
    assert_eq!(
        config.domain(),
        Err(ConfigurationError::InvalidTouchScale { value: -1.0 })
    );
    assert_eq!(
        SliderConfig::default().with_step(5.0).domain().map(|d| d.step()),
        Ok(5.0)
    );
}
