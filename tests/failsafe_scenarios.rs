//! End-to-end failsafe scenarios: parameter store through classifier.

use peregrine_core::failsafe::{
    FailsafeClassifier, FailsafeConfig, FailsafeEvent, FailsafeReason, FailsafeState, FlightMode,
    HealthSample, LongAction, ShortAction,
};
use peregrine_core::parameters::{FailsafeParams, ParamValue, ParameterStore, SystemParams};

/// Classifier wired the way boot code does it: defaults registered,
/// operator overrides applied through the store, policy decoded once.
fn classifier_from_store(configure: impl FnOnce(&mut ParameterStore)) -> FailsafeClassifier {
    let mut store = ParameterStore::new();
    FailsafeParams::register_defaults(&mut store).unwrap();
    SystemParams::register_defaults(&mut store).unwrap();
    configure(&mut store);

    let params = FailsafeParams::from_store(&store);
    assert!(params.is_configured());
    let options = SystemParams::from_store(&store).options;
    FailsafeClassifier::new(FailsafeConfig::from_params(&params, options))
}

fn tick_span(
    fs: &mut FailsafeClassifier,
    sample: &HealthSample,
    from_ms: u64,
    to_ms: u64,
) -> Vec<FailsafeEvent> {
    let mut events = Vec::new();
    let mut t = from_ms;
    while t <= to_ms {
        events.extend(fs.tick(sample, t).iter().copied());
        t += 100;
    }
    events
}

#[test]
fn radio_loss_escalates_through_both_tiers() {
    let mut fs = classifier_from_store(|store| {
        store.set("FS_SHORT_ACTN", ParamValue::Int(1)).unwrap(); // circle
        store.set("FS_LONG_ACTN", ParamValue::Int(1)).unwrap(); // rtl
    });

    let lost = HealthSample {
        radio_ok: false,
        ..HealthSample::healthy(FlightMode::Cruise)
    };
    let events = tick_span(&mut fs, &lost, 0, 10_000);

    // Exactly one entry per tier across the whole loss
    assert_eq!(
        events,
        vec![
            FailsafeEvent::ShortEntry {
                action: ShortAction::Circle,
                reason: FailsafeReason::RadioLoss,
            },
            FailsafeEvent::LongEntry {
                action: LongAction::Rtl,
                reason: FailsafeReason::RadioLoss,
            },
        ]
    );
    assert_eq!(fs.state(), FailsafeState::Long);
}

#[test]
fn custom_timeouts_from_store_shift_tier_entry() {
    let mut fs = classifier_from_store(|store| {
        store.set("FS_SHORT_TIMEOUT", ParamValue::Float(0.5)).unwrap();
        store.set("FS_LONG_TIMEOUT", ParamValue::Float(2.0)).unwrap();
    });

    let lost = HealthSample {
        radio_ok: false,
        ..HealthSample::healthy(FlightMode::Manual)
    };

    assert!(fs.tick(&lost, 0).is_empty());
    assert!(fs.tick(&lost, 400).is_empty());
    assert!(!fs.tick(&lost, 500).is_empty());
    assert_eq!(fs.state(), FailsafeState::Short);
    assert!(!fs.tick(&lost, 2000).is_empty());
    assert_eq!(fs.state(), FailsafeState::Long);
}

#[test]
fn gcs_heartbeat_loss_during_auto_mission() {
    // Ground station silently disappears mid-mission with the
    // heartbeat-in-auto-only gating selected.
    let build = || {
        classifier_from_store(|store| {
            store.set("FS_GCS_ENABL", ParamValue::Int(3)).unwrap();
            store.set("FS_SHORT_ACTN", ParamValue::Int(1)).unwrap();
        })
    };

    // Pilot flying MANUAL: the same heartbeat absence must change nothing.
    let mut fs = build();
    let manual = HealthSample {
        gcs_heartbeat_ok: false,
        ..HealthSample::healthy(FlightMode::Manual)
    };
    assert!(tick_span(&mut fs, &manual, 0, 10_000).is_empty());
    assert_eq!(fs.state(), FailsafeState::None);

    // Same absence in AUTO fires the configured short action.
    let mut fs = build();
    let auto = HealthSample {
        gcs_heartbeat_ok: false,
        ..HealthSample::healthy(FlightMode::Auto)
    };
    let events = tick_span(&mut fs, &auto, 0, 2_000);
    assert_eq!(
        events,
        vec![FailsafeEvent::ShortEntry {
            action: ShortAction::Circle,
            reason: FailsafeReason::GcsLoss,
        }]
    );
}

#[test]
fn recovery_and_second_loss_fire_again() {
    let mut fs = classifier_from_store(|_| {});
    let lost = HealthSample {
        radio_ok: false,
        ..HealthSample::healthy(FlightMode::Manual)
    };
    let healthy = HealthSample::healthy(FlightMode::Manual);

    let first = tick_span(&mut fs, &lost, 0, 2_000);
    assert_eq!(first.len(), 1);
    assert_eq!(fs.state(), FailsafeState::Short);

    // Link returns: recovered on the next tick, with cause bookkeeping
    let events = fs.tick(&healthy, 2_100);
    assert_eq!(
        events.as_slice(),
        [FailsafeEvent::Recovered {
            from: FailsafeState::Short,
            reason: FailsafeReason::RadioLoss,
        }]
    );
    assert_eq!(fs.last_reason(), Some(FailsafeReason::RadioLoss));

    // A later, separate loss re-arms the action
    let second = tick_span(&mut fs, &lost, 10_000, 12_000);
    assert_eq!(second.len(), 1);
    assert_eq!(fs.short_count(), 2);
}

#[test]
fn disabled_policy_enters_tier_without_mode_change() {
    let mut fs = classifier_from_store(|store| {
        store.set("FS_SHORT_ACTN", ParamValue::Int(3)).unwrap(); // disabled
        store.set("FS_LONG_ACTN", ParamValue::Int(0)).unwrap(); // continue
    });

    let lost = HealthSample {
        radio_ok: false,
        ..HealthSample::healthy(FlightMode::Auto)
    };
    let events = tick_span(&mut fs, &lost, 0, 10_000);

    assert_eq!(
        events,
        vec![
            FailsafeEvent::ShortEntry {
                action: ShortAction::Disabled,
                reason: FailsafeReason::RadioLoss,
            },
            FailsafeEvent::LongEntry {
                action: LongAction::Continue,
                reason: FailsafeReason::RadioLoss,
            },
        ]
    );
    // The tier is still tracked even though no action was taken
    assert_eq!(fs.state(), FailsafeState::Long);
    assert_eq!(fs.long_count(), 1);
}

#[test]
fn rudder_warning_repeats_through_a_long_loss() {
    let mut fs = classifier_from_store(|store| {
        store.set("FLIGHT_OPTIONS", ParamValue::Int(1 << 13)).unwrap();
    });

    let sample = HealthSample {
        radio_ok: false,
        rudder_neutral_pending: true,
        ..HealthSample::healthy(FlightMode::Manual)
    };
    let events = tick_span(&mut fs, &sample, 0, 12_000);

    let warnings = events
        .iter()
        .filter(|e| **e == FailsafeEvent::RudderNeutralWarning)
        .count();
    // First at tier entry (1500), then every 3000 ms: 4500, 7500, 10500
    assert_eq!(warnings, 4);
}
