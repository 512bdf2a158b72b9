use criterion::{criterion_group, criterion_main};

mod command;

criterion_group!(
    benches,
    command::dispatch::bench_parse,
    command::dispatch::bench_render_fields,
    command::dispatch::bench_monitor,
    command::dispatch::bench_shell_execute
);
criterion_main!(benches);
