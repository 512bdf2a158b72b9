use core::cell::Cell;

use dbgshell::command::{CommandError, CommandInfo, DebugCommand};
use dbgshell::config::Config;
use dbgshell::field::Field;
use dbgshell::platform::Platform;
use dbgshell::snapshot_field;
use dbgshell::structured::{Capture, StructuredCommand};
use dbgshell::view::{view_bit, view_mask, ViewEntry, ViewId, ViewTable};

const FULL: ViewId = 0;
const ATTITUDE: ViewId = 1;
const HEALTH: ViewId = 2;

static VIEWS: ViewTable = ViewTable::new(&[
    ViewEntry::new("full", FULL),
    ViewEntry::new("attitude", ATTITUDE),
    ViewEntry::new("health", HEALTH),
]);

#[derive(Default, Debug, Clone, PartialEq)]
struct ImuSnapshot {
    online: bool,
    error_count: u8,
    roll: f32,
    pitch: f32,
    temperature: f32,
}

/// Simulated IMU whose state advances every time it is sampled.
#[derive(Default)]
struct Imu {
    samples: Cell<u8>,
    captures: Cell<u32>,
}

impl Capture for Imu {
    type Snapshot = ImuSnapshot;

    fn capture(&self, snapshot: &mut ImuSnapshot) {
        self.captures.set(self.captures.get() + 1);
        let n = self.samples.get();
        self.samples.set(n.wrapping_add(1));

        snapshot.online = true;
        snapshot.error_count = n;
        snapshot.roll = f32::from(n) * 0.5;
        snapshot.pitch = 10.0 - f32::from(n);
        snapshot.temperature = 40.3125;
    }
}

static FIELDS: &[Field<ImuSnapshot>] = &[
    snapshot_field!(bool, ImuSnapshot, online, view_bit(HEALTH)),
    snapshot_field!(u8, ImuSnapshot, error_count, view_bit(HEALTH)),
    snapshot_field!(f32, ImuSnapshot, roll, view_bit(ATTITUDE)),
    snapshot_field!(f32, ImuSnapshot, pitch, view_bit(ATTITUDE)),
    snapshot_field!(f32, ImuSnapshot, temperature, view_mask(&[HEALTH, ATTITUDE])),
];

#[derive(Default)]
struct SimPlatform {
    now: u64,
    sleeps: Vec<u32>,
}

impl Platform for SimPlatform {
    fn now_ms(&self) -> u64 {
        self.now
    }

    fn sleep_ms(&mut self, ms: u32) {
        self.sleeps.push(ms);
        self.now += u64::from(ms);
    }
}

fn command() -> StructuredCommand<'static, Imu> {
    StructuredCommand::new(
        CommandInfo::new("imu", VIEWS, FULL).with_description("IMU attitude and health"),
        FIELDS,
    )
}

fn run(argv: &[&str]) -> (Result<(), String>, String, SimPlatform, u32) {
    let imu = Imu::default();
    let mut out = String::new();
    let mut platform = SimPlatform::default();
    let result = command()
        .run(&imu, argv, &mut out, &mut platform)
        .map_err(|e| e.to_string());
    (result, out, platform, imu.captures.get())
}

#[test]
fn once_full_view_prints_every_field_from_one_capture() {
    let (result, out, _, captures) = run(&["imu", "once"]);
    assert_eq!(result, Ok(()));
    assert_eq!(captures, 1);
    assert_eq!(
        out,
        "[0 ms] imu full\r\n  online=true\r\n  error_count=0\r\n  roll=0.0000\r\n  pitch=10.0000\r\n  temperature=40.3125\r\n"
    );
}

#[test]
fn direct_view_prints_only_members_of_that_view() {
    let (result, out, _, _) = run(&["imu", "health"]);
    assert_eq!(result, Ok(()));
    assert_eq!(
        out,
        "[0 ms] imu health\r\n  online=true\r\n  error_count=0\r\n  temperature=40.3125\r\n"
    );
}

#[test]
fn monitor_captures_a_fresh_snapshot_per_iteration() {
    let (result, out, platform, captures) = run(&["imu", "monitor", "300", "100", "attitude"]);
    assert_eq!(result, Ok(()));
    assert_eq!(captures, 3);
    assert_eq!(platform.sleeps, [100, 100, 100]);
    assert_eq!(
        out,
        "[0 ms] imu attitude\r\n  roll=0.0000\r\n  pitch=10.0000\r\n  temperature=40.3125\r\n\
         [100 ms] imu attitude\r\n  roll=0.5000\r\n  pitch=9.0000\r\n  temperature=40.3125\r\n\
         [200 ms] imu attitude\r\n  roll=1.0000\r\n  pitch=8.0000\r\n  temperature=40.3125\r\n"
    );
}

#[test]
fn elapsed_time_is_nominal_not_measured() {
    /// A platform whose sleeps overshoot by 50%.
    struct SlowPlatform {
        now: u64,
    }

    impl Platform for SlowPlatform {
        fn now_ms(&self) -> u64 {
            self.now
        }

        fn sleep_ms(&mut self, ms: u32) {
            self.now += u64::from(ms) * 3 / 2;
        }
    }

    let imu = Imu::default();
    let mut out = String::new();
    let mut platform = SlowPlatform { now: 0 };
    command()
        .run(&imu, &["imu", "monitor", "200", "100", "health"], &mut out, &mut platform)
        .unwrap();

    // Two iterations despite 300 ms of wall time having passed.
    assert_eq!(imu.captures.get(), 2);
    assert_eq!(platform.now, 300);
}

#[test]
fn validation_failures_never_capture() {
    for argv in [
        ["imu", "once", "badname"].as_slice(),
        ["imu", "monitor", "0"].as_slice(),
        ["imu", "monitor", "-5"].as_slice(),
        ["imu", "monitor", "100", "health", "attitude"].as_slice(),
        ["imu", "frobnicate"].as_slice(),
    ] {
        let (result, out, platform, captures) = run(argv);
        assert!(result.is_err(), "{argv:?}");
        assert_eq!(captures, 0, "{argv:?}");
        assert!(platform.sleeps.is_empty());
        assert!(out.starts_with("Error: "), "{out}");
        assert!(!out.contains(" ms] imu"));
    }
}

#[test]
fn configured_precision_applies_to_float_fields() {
    let command: StructuredCommand<Imu> = StructuredCommand::new(
        CommandInfo::new("imu", VIEWS, FULL)
            .with_config(Config { float_precision: 1, ..Config::default() }),
        FIELDS,
    );
    let mut out = String::new();
    command
        .run(&Imu::default(), &["imu", "attitude"], &mut out, &mut SimPlatform::default())
        .unwrap();
    assert_eq!(out, "[0 ms] imu attitude\r\n  roll=0.0\r\n  pitch=10.0\r\n  temperature=40.3\r\n");
}

#[test]
fn binding_exposes_name_description_and_status() {
    let imu = Imu::default();
    let command = command();
    let mut binding = command.attach(&imu);
    let mut out = String::new();
    let mut platform = SimPlatform::default();

    assert_eq!(binding.name(), "imu");
    assert_eq!(binding.description(), "IMU attitude and health");
    assert_eq!(binding.invoke(&["imu", "attitude"], &mut out, &mut platform), 0);
    assert_eq!(binding.invoke(&["imu", "once", "a", "b"], &mut out, &mut platform), -1);
    assert!(out.ends_with("Error: Too many arguments for once.\r\n"));
    assert_eq!(imu.captures.get(), 1);
}

#[test]
fn errors_borrow_the_offending_token() {
    let imu = Imu::default();
    let line = String::from("imu once gyro");
    let argv: Vec<&str> = line.split(' ').collect();
    let mut out = String::new();
    let err = command()
        .run(&imu, &argv, &mut out, &mut SimPlatform::default())
        .unwrap_err();
    assert_eq!(err, CommandError::UnknownView("gyro"));
}
