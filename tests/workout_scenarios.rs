use planrs::{
    dump, units, BinaryCodec, Codec, Duration, Equipment, HeartRateTarget, Intensity, JsonCodec,
    PlanError, PoolLengthUnit, PowerTarget, Sport, StepIndex, SubSport, SwimStroke, Target,
    ValidationCause, WorkoutPlan, WorkoutPlanBuilder, WorkoutStep,
};

/// End-to-end scenarios: each classic workout builds, survives a
/// round trip through both codecs, and renders for review.

fn round_trip_both_codecs(plan: &WorkoutPlan) {
    for codec in [&JsonCodec::new() as &dyn Codec, &BinaryCodec::new()] {
        let bytes = codec.encode(plan).unwrap();
        let decoded = codec.decode(&bytes).unwrap();
        assert_eq!(&decoded, plan);
        // review dump consumes the decoded plan without feeding back
        assert!(!dump::plan_table(&decoded).is_empty());
    }
}

fn tempo_bike_plan() -> WorkoutPlan {
    let mut builder = WorkoutPlanBuilder::new("Tempo Bike", Sport::Cycling);

    // w/u 10min z1 HR
    builder
        .append(
            WorkoutStep::new(
                builder.next_index(),
                Intensity::Warmup,
                Duration::Time { seconds: 600.0 },
                Target::HeartRate(HeartRateTarget::Zone(1)),
            )
            .unwrap()
            .named("Warm Up"),
        )
        .unwrap();

    // bike 40min z3 power
    builder
        .append(
            WorkoutStep::new(
                builder.next_index(),
                Intensity::Active,
                Duration::Time { seconds: 2400.0 },
                Target::Power(PowerTarget::Zone(3)),
            )
            .unwrap()
            .named("Bike zone 3"),
        )
        .unwrap();

    // c/d until lap button press
    builder
        .append(
            WorkoutStep::new(
                builder.next_index(),
                Intensity::Cooldown,
                Duration::Open,
                Target::Open,
            )
            .unwrap()
            .named("Cool Down Until Lap Button Pressed"),
        )
        .unwrap();

    builder.build().unwrap()
}

#[test]
fn tempo_bike_builds_and_round_trips() {
    let plan = tempo_bike_plan();
    assert_eq!(plan.name(), "Tempo Bike");
    assert_eq!(plan.len(), 3);
    assert_eq!(plan.step_count(), 3);
    assert_eq!(plan.steps()[1].intensity(), Intensity::Active);
    round_trip_both_codecs(&plan);
}

#[test]
fn run_800m_repeats_builds_and_round_trips() {
    let mut builder = WorkoutPlanBuilder::new("800m Repeats", Sport::Running);

    // w/u 4km @ z1 HR
    builder
        .append(
            WorkoutStep::new(
                builder.next_index(),
                Intensity::Warmup,
                Duration::Distance { meters: 4e3 },
                Target::HeartRate(HeartRateTarget::Zone(1)),
            )
            .unwrap()
            .named("Warm Up"),
        )
        .unwrap();

    // 5x run 800m @ z4 HR / recover 200m @ z2 HR
    let repeat_from = builder.next_index();
    builder
        .append(
            WorkoutStep::new(
                builder.next_index(),
                Intensity::Active,
                Duration::Distance { meters: 800.0 },
                Target::HeartRate(HeartRateTarget::Zone(4)),
            )
            .unwrap()
            .named("Run"),
        )
        .unwrap();
    builder
        .append(
            WorkoutStep::new(
                builder.next_index(),
                Intensity::Recovery,
                Duration::Distance { meters: 200.0 },
                Target::HeartRate(HeartRateTarget::Zone(2)),
            )
            .unwrap()
            .named("Recover"),
        )
        .unwrap();
    builder
        .append(WorkoutStep::repeat(builder.next_index(), repeat_from, 5).unwrap())
        .unwrap();

    // c/d 1km @ z2 HR
    builder
        .append(
            WorkoutStep::new(
                builder.next_index(),
                Intensity::Cooldown,
                Duration::Distance { meters: 1e3 },
                Target::HeartRate(HeartRateTarget::Zone(2)),
            )
            .unwrap()
            .named("Cool Down"),
        )
        .unwrap();

    let plan = builder.build().unwrap();
    assert_eq!(plan.len(), 5);

    let control = &plan.steps()[3];
    assert!(control.is_control_step());
    assert_eq!(
        *control.duration(),
        Duration::RepeatUntilStepsComplete {
            repeat_from: StepIndex(1),
            count: 5,
        }
    );

    round_trip_both_codecs(&plan);
}

#[test]
fn custom_target_values_build_and_round_trip() {
    let mut builder = WorkoutPlanBuilder::new("Custom Target Values", Sport::Cycling);

    // w/u 10min @ 135-155 bpm absolute
    builder
        .append(
            WorkoutStep::new(
                builder.next_index(),
                Intensity::Warmup,
                Duration::Time { seconds: 600.0 },
                Target::HeartRate(HeartRateTarget::Custom {
                    low: 135,
                    high: 155,
                }),
            )
            .unwrap()
            .named("Warm Up"),
        )
        .unwrap();

    // bike 40min @ 175-195 W
    builder
        .append(
            WorkoutStep::new(
                builder.next_index(),
                Intensity::Active,
                Duration::Time { seconds: 2400.0 },
                Target::Power(PowerTarget::Custom {
                    low: 175,
                    high: 195,
                }),
            )
            .unwrap()
            .named("Bike"),
        )
        .unwrap();

    // c/d 10min @ 20-25 km/h
    builder
        .append(
            WorkoutStep::new(
                builder.next_index(),
                Intensity::Cooldown,
                Duration::Time { seconds: 600.0 },
                Target::Speed {
                    low: units::kph_to_mps(20.0),
                    high: units::kph_to_mps(25.0),
                },
            )
            .unwrap()
            .named("Cool Down"),
        )
        .unwrap();

    let plan = builder.build().unwrap();
    assert_eq!(plan.len(), 3);
    round_trip_both_codecs(&plan);
}

fn swim_rest(index: StepIndex, duration: Duration) -> WorkoutStep {
    WorkoutStep::new(index, Intensity::Rest, duration, Target::Open)
        .unwrap()
        .named("Rest")
}

#[test]
fn pool_swim_builds_and_round_trips() {
    let mut builder =
        WorkoutPlanBuilder::new("Pool Swim", Sport::Swimming).sub_sport(SubSport::LapSwimming);
    builder
        .set_pool_metadata(units::yards_to_meters(25.0), PoolLengthUnit::Statute)
        .unwrap();

    // w/u 200yd any stroke
    builder
        .append(
            WorkoutStep::new(
                builder.next_index(),
                Intensity::Warmup,
                Duration::Distance {
                    meters: units::yards_to_meters(200.0),
                },
                Target::SwimStroke(SwimStroke::Any),
            )
            .unwrap()
            .named("Warm Up"),
        )
        .unwrap();
    builder
        .append(swim_rest(builder.next_index(), Duration::Open))
        .unwrap();

    // drill w/ kickboard 200yd
    builder
        .append(
            WorkoutStep::new(
                builder.next_index(),
                Intensity::Active,
                Duration::Distance {
                    meters: units::yards_to_meters(200.0),
                },
                Target::SwimStroke(SwimStroke::Drill),
            )
            .unwrap()
            .named("Drill")
            .with_equipment(Equipment::Kickboard),
        )
        .unwrap();
    builder
        .append(swim_rest(builder.next_index(), Duration::Open))
        .unwrap();

    // 5x 100yd freestyle on 2:00
    let repeat_from = builder.next_index();
    builder
        .append(
            WorkoutStep::new(
                builder.next_index(),
                Intensity::Active,
                Duration::Distance {
                    meters: units::yards_to_meters(100.0),
                },
                Target::SwimStroke(SwimStroke::Freestyle),
            )
            .unwrap()
            .named("Swim"),
        )
        .unwrap();
    builder
        .append(swim_rest(
            builder.next_index(),
            Duration::RepetitionTime {
                seconds: units::minutes_to_seconds(2.0),
            },
        ))
        .unwrap();
    builder
        .append(WorkoutStep::repeat(builder.next_index(), repeat_from, 5).unwrap())
        .unwrap();

    builder
        .append(swim_rest(builder.next_index(), Duration::Open))
        .unwrap();

    // c/d 100yd any stroke
    builder
        .append(
            WorkoutStep::new(
                builder.next_index(),
                Intensity::Cooldown,
                Duration::Distance {
                    meters: units::yards_to_meters(100.0),
                },
                Target::SwimStroke(SwimStroke::Any),
            )
            .unwrap()
            .named("Cool down"),
        )
        .unwrap();

    let plan = builder.build().unwrap();
    assert_eq!(plan.len(), 9);
    assert_eq!(plan.sub_sport(), Some(SubSport::LapSwimming));

    let pool = plan.pool().unwrap();
    assert!((pool.length_m - 22.86).abs() < 1e-9);
    assert_eq!(pool.unit, PoolLengthUnit::Statute);

    assert_eq!(
        plan.steps()[2].equipment(),
        Some(Equipment::Kickboard)
    );
    assert_eq!(
        *plan.steps()[6].duration(),
        Duration::RepeatUntilStepsComplete {
            repeat_from: StepIndex(4),
            count: 5,
        }
    );

    round_trip_both_codecs(&plan);
}

#[test]
fn swimming_without_pool_metadata_fails() {
    let mut builder =
        WorkoutPlanBuilder::new("Pool Swim", Sport::Swimming).sub_sport(SubSport::LapSwimming);
    builder
        .append(
            WorkoutStep::new(
                builder.next_index(),
                Intensity::Warmup,
                Duration::Distance { meters: 200.0 },
                Target::SwimStroke(SwimStroke::Any),
            )
            .unwrap(),
        )
        .unwrap();

    let err = builder.build().unwrap_err();
    assert!(matches!(err, PlanError::InvalidConfiguration { .. }));
}

#[test]
fn self_referencing_repeat_fails_at_its_index() {
    let mut builder = WorkoutPlanBuilder::new("800m Repeats", Sport::Running);
    builder
        .append(
            WorkoutStep::new(
                builder.next_index(),
                Intensity::Active,
                Duration::Distance { meters: 800.0 },
                Target::HeartRate(HeartRateTarget::Zone(4)),
            )
            .unwrap(),
        )
        .unwrap();
    builder
        .append(
            WorkoutStep::new(
                builder.next_index(),
                Intensity::Recovery,
                Duration::Distance { meters: 200.0 },
                Target::HeartRate(HeartRateTarget::Zone(2)),
            )
            .unwrap(),
        )
        .unwrap();
    builder
        .append(WorkoutStep::repeat(StepIndex(2), StepIndex(2), 5).unwrap())
        .unwrap();

    let err = builder.build().unwrap_err();
    assert!(matches!(
        err,
        PlanError::Validation {
            index: StepIndex(2),
            cause: ValidationCause::SelfReference,
        }
    ));
}

#[test]
fn decoded_plan_is_shareable_across_threads() {
    let plan = tempo_bike_plan();
    let bytes = BinaryCodec::new().encode(&plan).unwrap();
    let decoded = std::sync::Arc::new(BinaryCodec::new().decode(&bytes).unwrap());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let shared = std::sync::Arc::clone(&decoded);
            std::thread::spawn(move || shared.step_count())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), 3);
    }
}
