use core::fmt;
use std::hint::black_box;

use criterion::{Criterion, Throughput};
use dbgshell::command::{CommandInfo, Invocation};
use dbgshell::config::Config;
use dbgshell::field::{render_fields, Field};
use dbgshell::platform::Platform;
use dbgshell::snapshot_field;
use dbgshell::structured::{Capture, StructuredCommand};
use dbgshell::system::shell::Shell;
use dbgshell::view::{view_bit, ViewEntry, ViewId, ViewTable};

const FULL: ViewId = 0;
const DRIVE: ViewId = 1;
const THERMAL: ViewId = 2;

const VIEWS: ViewTable = ViewTable::new(&[
    ViewEntry::new("full", FULL),
    ViewEntry::new("drive", DRIVE),
    ViewEntry::new("thermal", THERMAL),
]);

#[derive(Default)]
struct DriveSnapshot {
    enabled: bool,
    fault: bool,
    mode: u8,
    speed: f32,
    current: f32,
    temperature: f32,
}

struct Drive {
    tick: u8,
}

impl Capture for Drive {
    type Snapshot = DriveSnapshot;

    fn capture(&self, snapshot: &mut DriveSnapshot) {
        snapshot.enabled = true;
        snapshot.fault = false;
        snapshot.mode = self.tick;
        snapshot.speed = 1250.5;
        snapshot.current = 3.75;
        snapshot.temperature = 48.125;
    }
}

static FIELDS: &[Field<DriveSnapshot>] = &[
    snapshot_field!(bool, DriveSnapshot, enabled, view_bit(DRIVE)),
    snapshot_field!(bool, DriveSnapshot, fault, 0),
    snapshot_field!(u8, DriveSnapshot, mode, view_bit(DRIVE)),
    snapshot_field!(f32, DriveSnapshot, speed, view_bit(DRIVE)),
    snapshot_field!(f32, DriveSnapshot, current, view_bit(DRIVE) | view_bit(THERMAL)),
    snapshot_field!(f32, DriveSnapshot, temperature, view_bit(THERMAL)),
];

/// Discards output so only formatting cost is measured.
struct Sink;

impl fmt::Write for Sink {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        black_box(s);
        Ok(())
    }
}

struct NoSleep {
    now: u64,
}

impl Platform for NoSleep {
    fn now_ms(&self) -> u64 {
        self.now
    }

    fn sleep_ms(&mut self, ms: u32) {
        self.now += u64::from(ms);
    }
}

fn command() -> StructuredCommand<'static, Drive> {
    StructuredCommand::new(
        CommandInfo::new("drive", VIEWS, FULL).with_description("Drive state"),
        FIELDS,
    )
}

pub fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    let config = Config::default();
    let lines: [&[&str]; 4] = [
        &["drive", "monitor", "5000", "100", "thermal"],
        &["drive", "monitor", "5000", "drive"],
        &["drive", "once", "thermal"],
        &["drive", "frobnicate"],
    ];
    group.throughput(Throughput::Elements(lines.len() as u64));
    group.bench_function("invocation", |b| {
        b.iter(|| {
            for argv in lines {
                let _ = black_box(Invocation::parse(black_box(argv), &VIEWS, FULL, &config));
            }
        })
    });
    group.finish();
}

pub fn bench_render_fields(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_fields");
    let snapshot = DriveSnapshot {
        enabled: true,
        fault: false,
        mode: 3,
        speed: 1250.5,
        current: 3.75,
        temperature: 48.125,
    };
    for (name, view) in [("full", FULL), ("thermal", THERMAL)] {
        group.bench_function(name, |b| {
            b.iter(|| render_fields(&mut Sink, FIELDS, black_box(&snapshot), view, FULL, 4))
        });
    }
    group.finish();
}

pub fn bench_monitor(c: &mut Criterion) {
    let mut group = c.benchmark_group("monitor");
    let command = command();
    let drive = Drive { tick: 1 };
    group.throughput(Throughput::Elements(50));
    group.bench_function("50_prints", |b| {
        b.iter(|| {
            let mut platform = NoSleep { now: 0 };
            command.run(&drive, &["drive", "monitor", "5000", "100", "drive"], &mut Sink, &mut platform)
        })
    });
    group.finish();
}

pub fn bench_shell_execute(c: &mut Criterion) {
    let mut group = c.benchmark_group("shell");
    let command = command();
    let drive = Drive { tick: 2 };
    let mut binding = command.attach(&drive);
    let mut shell: Shell<'_, 4> = Shell::new();
    shell.register(&mut binding);
    let mut platform = NoSleep { now: 0 };
    group.bench_function("execute_once", |b| {
        b.iter(|| shell.execute(black_box("drive once thermal"), &mut Sink, &mut platform))
    });
    group.finish();
}
